#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative representation of one WorldShift generation run.
//!
//! A [`TransferJob`] holds the validated inputs gathered by the command-line
//! adapter: world names, source boxes, the destination origin, the tile size,
//! the mode flags, and the delay profile. Assembling a [`TransferPlan`]
//! resolves the global anchor and tiles every box in order, producing the
//! ordered tile list the sequencer walks. Both types are immutable once
//! created; repeated assembly of the same job yields an identical plan.

use worldshift_core::{BlockPos, BoundingBox, DelayProfile, PlanError, Tile};
use worldshift_system_tiling::{resolve_anchor, tile_box};

/// Validated input set for a single generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferJob {
    source_world: String,
    target_world: String,
    boxes: Vec<BoundingBox>,
    target_origin: BlockPos,
    tile_size: i64,
    creative_mode: bool,
    dry_run: bool,
    delays: DelayProfile,
}

impl TransferJob {
    /// Creates a job after validating its preconditions.
    ///
    /// Fails with [`PlanError::EmptyInput`] when no boxes are supplied and
    /// with [`PlanError::InvalidTileSize`] when the tile size is not
    /// positive, so downstream components never observe invalid inputs.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source_world: String,
        target_world: String,
        boxes: Vec<BoundingBox>,
        target_origin: BlockPos,
        tile_size: i64,
        creative_mode: bool,
        dry_run: bool,
        delays: DelayProfile,
    ) -> Result<Self, PlanError> {
        if boxes.is_empty() {
            return Err(PlanError::EmptyInput);
        }
        if tile_size <= 0 {
            return Err(PlanError::InvalidTileSize(tile_size));
        }
        Ok(Self {
            source_world,
            target_world,
            boxes,
            target_origin,
            tile_size,
            creative_mode,
            dry_run,
            delays,
        })
    }

    /// Name of the world the structure is copied from.
    #[must_use]
    pub fn source_world(&self) -> &str {
        &self.source_world
    }

    /// Name of the world the structure is pasted into.
    #[must_use]
    pub fn target_world(&self) -> &str {
        &self.target_world
    }

    /// Source boxes in user-supplied order.
    #[must_use]
    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    /// Destination point anchoring the whole multi-box structure.
    #[must_use]
    pub const fn target_origin(&self) -> BlockPos {
        self.target_origin
    }

    /// Maximum tile footprint along the X and Z axes.
    #[must_use]
    pub const fn tile_size(&self) -> i64 {
        self.tile_size
    }

    /// Whether creative-mode commands are woven into the sequence.
    #[must_use]
    pub const fn creative_mode(&self) -> bool {
        self.creative_mode
    }

    /// Whether paste operations are replaced by inert announcements.
    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Per-category tick delays configured for this run.
    #[must_use]
    pub const fn delays(&self) -> DelayProfile {
        self.delays
    }
}

/// Assembled tiling of a job: the global anchor plus the ordered tile list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferPlan {
    anchor: BlockPos,
    tiles: Vec<Tile>,
}

impl TransferPlan {
    /// Resolves the global anchor and tiles every box of the job in order.
    ///
    /// Box order is preserved and tiles within a box follow the tiler's grid
    /// order, so the concatenated list is deterministic.
    pub fn assemble(job: &TransferJob) -> Result<Self, PlanError> {
        let anchor = resolve_anchor(job.boxes())?;
        let mut tiles = Vec::new();
        for bbox in job.boxes() {
            tile_box(bbox, job.tile_size(), job.target_origin(), anchor, &mut tiles)?;
        }
        Ok(Self { anchor, tiles })
    }

    /// Global source anchor shared by every tile of the run.
    #[must_use]
    pub const fn anchor(&self) -> BlockPos {
        self.anchor
    }

    /// Ordered tiles across all boxes.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
