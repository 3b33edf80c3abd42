#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the WorldShift pipeline.
//!
//! The binary gathers inputs from flags, saved jobs, and the settings file
//! (in that precedence order), assembles the transfer plan, and writes the
//! two output views: the plain command script (stdout or a file) and the
//! macro profile spliced into the external tool's configuration document.
//! All I/O lives here; the pipeline crates stay pure.

mod settings;

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::{info, warn};
use serde_json::Value;
use settings::{JobFile, Overrides, Settings};
use worldshift_core::{BlockPos, BoundingBox};
use worldshift_plan::{TransferJob, TransferPlan};
use worldshift_rendering::{
    merge_profile, profile_name, render_messages, render_script, skeletal_document, MacroProfile,
};
use worldshift_system_sequencing::Sequencer;

/// Plans WorldEdit command streams that copy regions between worlds in
/// size-bounded tiles.
#[derive(Debug, Parser)]
#[command(name = "worldshift", version)]
struct Cli {
    /// World the structure is copied from.
    #[arg(long, value_name = "NAME")]
    source_world: Option<String>,

    /// World the structure is pasted into.
    #[arg(long, value_name = "NAME")]
    target_world: Option<String>,

    /// Source bounding box corners (repeatable).
    #[arg(long = "box", value_name = "X1,Y1,Z1,X2,Y2,Z2")]
    boxes: Vec<String>,

    /// Destination origin the whole structure is anchored to.
    #[arg(long, value_name = "X,Y,Z")]
    target_origin: Option<String>,

    /// Maximum tile footprint along the X and Z axes.
    #[arg(long, value_name = "BLOCKS")]
    tile_size: Option<i64>,

    /// Whether to switch to creative mode before editing in each world.
    #[arg(long, value_name = "BOOL")]
    creative: Option<bool>,

    /// Whether to replace paste operations with /say announcements.
    #[arg(long, value_name = "BOOL")]
    dry_run: Option<bool>,

    /// Write the plain command script to this file instead of stdout.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Splice the generated profile into this macro-tool config document.
    #[arg(long, value_name = "FILE")]
    macro_config: Option<PathBuf>,

    /// Ticks to wait after a /mvtp world move.
    #[arg(long, value_name = "TICKS")]
    move_delay: Option<u32>,

    /// Ticks to wait after a /tp teleport.
    #[arg(long, value_name = "TICKS")]
    teleport_delay: Option<u32>,

    /// Ticks to wait after a //copy.
    #[arg(long, value_name = "TICKS")]
    copy_delay: Option<u32>,

    /// Ticks to wait after a //paste.
    #[arg(long, value_name = "TICKS")]
    paste_delay: Option<u32>,

    /// Settings file holding persisted defaults.
    #[arg(long, value_name = "FILE", default_value = "settings.json")]
    settings: PathBuf,

    /// Save the resolved inputs back to the settings file.
    #[arg(long)]
    save_settings: bool,

    /// Directory holding saved jobs.
    #[arg(long, value_name = "DIR", default_value = "jobs")]
    jobs_dir: PathBuf,

    /// Load every input from this saved job.
    #[arg(long, value_name = "NAME")]
    job: Option<String>,

    /// Save the resolved inputs as a named job.
    #[arg(long, value_name = "NAME")]
    save_job: Option<String>,

    /// List saved jobs and exit.
    #[arg(long)]
    list_jobs: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.list_jobs {
        let names = settings::list_jobs(&cli.jobs_dir)?;
        if names.is_empty() {
            println!("no saved jobs in '{}'", cli.jobs_dir.display());
        }
        for name in names {
            println!("{name}");
        }
        return Ok(());
    }

    let defaults = Settings::load(&cli.settings)?;
    let job_file = match &cli.job {
        Some(name) => {
            let job = settings::load_job(&cli.jobs_dir, name)?;
            info!("loaded job '{name}'");
            Some(job)
        }
        None => None,
    };
    let stored = job_file.as_ref().map(|job| &job.settings);

    let target_origin = match &cli.target_origin {
        Some(raw) => {
            let pos = BlockPos::parse(raw)?;
            Some([pos.x(), pos.y(), pos.z()])
        }
        None => None,
    };
    let resolved = settings::resolve(
        Overrides {
            source_world: cli.source_world.clone(),
            target_world: cli.target_world.clone(),
            target_origin,
            tile_size: cli.tile_size,
            creative_mode: cli.creative,
            dry_run: cli.dry_run,
            output_file: cli.output.clone(),
            macro_config: cli.macro_config.clone(),
            move_delay: cli.move_delay,
            teleport_delay: cli.teleport_delay,
            copy_delay: cli.copy_delay,
            paste_delay: cli.paste_delay,
        },
        stored,
        &defaults,
    );

    let source_world = resolved
        .source_world
        .clone()
        .context("no source world given (use --source-world)")?;
    let target_world = resolved
        .target_world
        .clone()
        .context("no target world given (use --target-world)")?;
    let boxes = resolve_boxes(&cli, job_file.as_ref())?;
    let [ox, oy, oz] = resolved.target_origin;
    let output = resolved.output_file.clone();
    let macro_config = resolved.macro_config.clone();

    let job = TransferJob::new(
        source_world,
        target_world,
        boxes,
        BlockPos::new(ox, oy, oz),
        resolved.tile_size,
        resolved.creative_mode,
        resolved.dry_run,
        resolved.delays,
    )?;
    let plan = TransferPlan::assemble(&job)?;
    info!(
        "tiled {} boxes into {} sub-regions (anchor {},{},{})",
        job.boxes().len(),
        plan.tiles().len(),
        plan.anchor().x(),
        plan.anchor().y(),
        plan.anchor().z(),
    );

    let sequencer = Sequencer::new(
        job.source_world(),
        job.target_world(),
        job.creative_mode(),
        job.dry_run(),
    );
    let mut ops = Vec::new();
    sequencer.sequence(plan.tiles(), &mut ops);

    let script = render_script(&ops);
    match &output {
        Some(path) => {
            fs::write(path, &script)
                .with_context(|| format!("writing command script '{}'", path.display()))?;
            info!("wrote command script to '{}'", path.display());
        }
        None => print!("{script}"),
    }

    if let Some(path) = &macro_config {
        let mut document = load_macro_document(path)?;
        let messages = render_messages(&ops, &job.delays());
        let profile = MacroProfile::new(
            profile_name(job.source_world(), job.target_world(), job.dry_run()),
            messages,
        );
        let name = profile.name().to_owned();
        merge_profile(&mut document, &profile)?;
        write_macro_document(path, &document)?;
        info!("spliced profile '{name}' into '{}'", path.display());
    }

    let persisted = Settings {
        source_world: Some(job.source_world().to_owned()),
        target_world: Some(job.target_world().to_owned()),
        target_origin: Some([ox, oy, oz]),
        tile_size: Some(job.tile_size()),
        creative_mode: Some(job.creative_mode()),
        dry_run: Some(job.dry_run()),
        output_file: output.clone(),
        macro_config: macro_config.clone(),
        delays: Some(job.delays()),
    };
    if cli.save_settings {
        persisted.save(&cli.settings)?;
        info!("saved defaults to '{}'", cli.settings.display());
    }
    if let Some(name) = &cli.save_job {
        let job_file = JobFile {
            settings: persisted,
            source_boxes: job
                .boxes()
                .iter()
                .map(|bbox| {
                    [
                        bbox.min().x(),
                        bbox.min().y(),
                        bbox.min().z(),
                        bbox.max().x(),
                        bbox.max().y(),
                        bbox.max().z(),
                    ]
                })
                .collect(),
        };
        let path = settings::save_job(&cli.jobs_dir, name, &job_file)?;
        info!("saved job '{name}' to '{}'", path.display());
    }

    Ok(())
}

fn resolve_boxes(cli: &Cli, job: Option<&JobFile>) -> Result<Vec<BoundingBox>> {
    let boxes: Vec<BoundingBox> = if !cli.boxes.is_empty() {
        cli.boxes
            .iter()
            .map(|raw| Ok(BoundingBox::parse_corners(raw)?))
            .collect::<Result<_>>()?
    } else {
        job.map(|job| {
            job.source_boxes
                .iter()
                .map(|&[x1, y1, z1, x2, y2, z2]| {
                    BoundingBox::from_corners(BlockPos::new(x1, y1, z1), BlockPos::new(x2, y2, z2))
                })
                .collect()
        })
        .unwrap_or_default()
    };
    ensure!(
        !boxes.is_empty(),
        "no source boxes given (use --box or --job)",
    );
    Ok(boxes)
}

fn load_macro_document(path: &Path) -> Result<Value> {
    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents)
            .with_context(|| format!("parsing macro config '{}'", path.display())),
        Err(error) if error.kind() == ErrorKind::NotFound => {
            warn!(
                "macro config '{}' not found, starting from a fresh document",
                path.display(),
            );
            Ok(skeletal_document())
        }
        Err(error) => {
            Err(error).with_context(|| format!("reading macro config '{}'", path.display()))
        }
    }
}

fn write_macro_document(path: &Path, document: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory '{}'", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(document).context("serializing macro config")?;
    fs::write(path, json + "\n")
        .with_context(|| format!("writing macro config '{}'", path.display()))
}
