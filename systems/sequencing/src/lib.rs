#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure sequencing system that turns an ordered tile list into the abstract
//! operation stream consumed by both renderers.
//!
//! The per-tile operation set and its order are fixed: annotation, move to
//! the source world, teleport to the tile's minimum corner, optional
//! creative-mode switch, both selection corners, copy, move to the target
//! world, teleport to the paste anchor, optional creative-mode switch, paste
//! (or its dry-run stand-in), blank separator. The only permitted branches
//! are the two creative-mode insertions and the paste-versus-dry-run choice.

use worldshift_core::{BlockPos, DelayCategory, OpKind, Operation, Tile};

/// Final announcement appended after the last tile.
const JOB_COMPLETE_TEXT: &str = "WorldEdit transfer job complete! All regions processed.";

/// Sequencer configured for a single generation run.
#[derive(Clone, Debug)]
pub struct Sequencer {
    source_world: String,
    target_world: String,
    creative_mode: bool,
    dry_run: bool,
}

impl Sequencer {
    /// Creates a sequencer for the provided worlds and mode flags.
    #[must_use]
    pub fn new(
        source_world: impl Into<String>,
        target_world: impl Into<String>,
        creative_mode: bool,
        dry_run: bool,
    ) -> Self {
        Self {
            source_world: source_world.into(),
            target_world: target_world.into(),
            creative_mode,
            dry_run,
        }
    }

    /// Walks the tiles in order and appends the operation stream to `out`.
    ///
    /// Emission is a single deterministic pass; identical inputs always
    /// produce an identical stream.
    pub fn sequence(&self, tiles: &[Tile], out: &mut Vec<Operation>) {
        let total = tiles.len();
        for (index, tile) in tiles.iter().enumerate() {
            self.sequence_tile(index + 1, total, tile, out);
        }
        out.push(Operation::new(
            OpKind::Annotate,
            DelayCategory::None,
            JOB_COMPLETE_TEXT,
        ));
    }

    fn sequence_tile(&self, number: usize, total: usize, tile: &Tile, out: &mut Vec<Operation>) {
        let source = tile.source();
        let src_min = source.min();
        let src_max = source.max();
        let target = tile.target_anchor();

        out.push(Operation::new(
            OpKind::Annotate,
            DelayCategory::None,
            format!(
                "--- SUB-REGION {number} of {total} (Source: {},{},{} to {},{},{} -> Target: {},{},{}) ---",
                src_min.x(),
                src_min.y(),
                src_min.z(),
                src_max.x(),
                src_max.y(),
                src_max.z(),
                target.x(),
                target.y(),
                target.z(),
            ),
        ));
        out.push(move_world(&self.source_world));
        out.push(teleport(src_min));
        if self.creative_mode {
            out.push(set_creative());
        }
        out.push(Operation::new(
            OpKind::SelectCorner1,
            DelayCategory::None,
            format!("//pos1 {},{},{}", src_min.x(), src_min.y(), src_min.z()),
        ));
        out.push(Operation::new(
            OpKind::SelectCorner2,
            DelayCategory::None,
            format!("//pos2 {},{},{}", src_max.x(), src_max.y(), src_max.z()),
        ));
        out.push(Operation::new(
            OpKind::Copy,
            DelayCategory::Copy,
            "//copy -be",
        ));
        out.push(move_world(&self.target_world));
        out.push(teleport(target));
        if self.creative_mode {
            out.push(set_creative());
        }
        if self.dry_run {
            out.push(Operation::new(
                OpKind::Paste,
                DelayCategory::Paste,
                format!(
                    "/say DRY RUN - Pasting from {},{},{} to {},{},{}",
                    src_min.x(),
                    src_min.y(),
                    src_min.z(),
                    target.x(),
                    target.y(),
                    target.z(),
                ),
            ));
        } else {
            out.push(Operation::new(
                OpKind::Paste,
                DelayCategory::Paste,
                "//paste -be",
            ));
        }
        out.push(Operation::new(OpKind::Separator, DelayCategory::None, ""));
    }
}

fn move_world(world: &str) -> Operation {
    Operation::new(
        OpKind::MoveWorld,
        DelayCategory::MoveWorld,
        format!("/mvtp {world}"),
    )
}

fn teleport(pos: BlockPos) -> Operation {
    Operation::new(
        OpKind::Teleport,
        DelayCategory::Teleport,
        format!("/tp {} {} {}", pos.x(), pos.y(), pos.z()),
    )
}

fn set_creative() -> Operation {
    Operation::new(OpKind::SetMode, DelayCategory::None, "/gamemode creative")
}
