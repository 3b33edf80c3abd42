//! End-to-end run of the whole pipeline: boxes in, both rendered views out.

use worldshift_core::{BlockPos, BoundingBox, DelayProfile};
use worldshift_plan::{TransferJob, TransferPlan};
use worldshift_rendering::{
    merge_profile, profile_name, render_messages, render_script, skeletal_document, MacroProfile,
};
use worldshift_system_sequencing::Sequencer;

fn two_box_job(dry_run: bool) -> TransferJob {
    let main_hall =
        BoundingBox::from_corners(BlockPos::new(10, 5, 10), BlockPos::new(137, 15, 73));
    let outbuilding =
        BoundingBox::from_corners(BlockPos::new(-5, 5, 20), BlockPos::new(10, 12, 35));
    TransferJob::new(
        "overworld".to_owned(),
        "museum".to_owned(),
        vec![main_hall, outbuilding],
        BlockPos::new(1000, 64, -200),
        64,
        true,
        dry_run,
        DelayProfile::new(20, 15, 50, 100),
    )
    .expect("job is valid")
}

#[test]
fn multi_box_run_preserves_relative_layout_in_both_views() {
    let job = two_box_job(false);
    let plan = TransferPlan::assemble(&job).expect("plan assembles");
    assert_eq!(plan.anchor(), BlockPos::new(-5, 5, 10));

    // First box: 128x64 footprint -> 2x1 grid; second box fits in one tile.
    assert_eq!(plan.tiles().len(), 3);
    let first = plan.tiles()[0];
    assert_eq!(
        first.target_anchor(),
        BlockPos::new(1000 + 15, 64, -200),
        "anchor offsets are relative to the global minimum corner",
    );
    let third = plan.tiles()[2];
    assert_eq!(third.source().min(), BlockPos::new(-5, 5, 20));
    assert_eq!(third.target_anchor(), BlockPos::new(1000, 64, -200 + 10));

    let sequencer = Sequencer::new(
        job.source_world(),
        job.target_world(),
        job.creative_mode(),
        job.dry_run(),
    );
    let mut ops = Vec::new();
    sequencer.sequence(plan.tiles(), &mut ops);

    let script = render_script(&ops);
    assert!(script.starts_with("# --- SUB-REGION 1 of 3 "));
    assert_eq!(
        script.matches("//paste -be\n").count(),
        3,
        "one paste per tile",
    );
    assert!(script.ends_with(
        "# WorldEdit transfer job complete! All regions processed.\n"
    ));

    let messages = render_messages(&ops, &job.delays());
    // 12 operations per creative tile minus the separator, plus completion.
    assert_eq!(messages.len(), 3 * 11 + 1);
    assert_eq!(messages[0].delay_ticks(), 0);
    let delays_after_paste: Vec<u32> = messages
        .iter()
        .zip(messages.iter().skip(1))
        .filter(|(entry, _)| entry.string() == "//paste -be")
        .map(|(_, next)| next.delay_ticks())
        .collect();
    assert_eq!(
        delays_after_paste,
        vec![100, 100, 100],
        "each paste's delay lands on the next entry despite the separator",
    );

    let profile = MacroProfile::new(
        profile_name(job.source_world(), job.target_world(), job.dry_run()),
        messages,
    );
    assert_eq!(profile.name(), "overworld -> museum");

    let mut document = skeletal_document();
    merge_profile(&mut document, &profile).expect("merge succeeds");
    assert_eq!(document["profiles"][0]["name"], "overworld -> museum");
    assert_eq!(
        document["profiles"][0]["macros"][0]["messages"]
            .as_array()
            .map(Vec::len),
        Some(3 * 11 + 1),
    );
}

#[test]
fn dry_run_is_flagged_everywhere_but_keeps_sequencing() {
    let job = two_box_job(true);
    let plan = TransferPlan::assemble(&job).expect("plan assembles");
    let sequencer = Sequencer::new(
        job.source_world(),
        job.target_world(),
        job.creative_mode(),
        job.dry_run(),
    );
    let mut ops = Vec::new();
    sequencer.sequence(plan.tiles(), &mut ops);

    let script = render_script(&ops);
    assert!(!script.contains("//paste"));
    assert_eq!(script.matches("/say DRY RUN - Pasting from ").count(), 3);

    let messages = render_messages(&ops, &job.delays());
    assert_eq!(
        messages.len(),
        3 * 11 + 1,
        "dry-run changes texts, never the stream shape",
    );
    assert_eq!(
        profile_name(job.source_world(), job.target_world(), job.dry_run()),
        "DRY RUN: overworld -> museum",
    );
}

#[test]
fn identical_jobs_render_identical_outputs() {
    let job = two_box_job(false);
    let render = |job: &TransferJob| {
        let plan = TransferPlan::assemble(job).expect("plan assembles");
        let sequencer = Sequencer::new(
            job.source_world(),
            job.target_world(),
            job.creative_mode(),
            job.dry_run(),
        );
        let mut ops = Vec::new();
        sequencer.sequence(plan.tiles(), &mut ops);
        (render_script(&ops), render_messages(&ops, &job.delays()))
    };

    assert_eq!(render(&job), render(&job));
}
