#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the WorldShift pipeline.
//!
//! This crate defines the vocabulary that connects the tiling and sequencing
//! systems with the rendering and command-line adapters. Source volumes enter
//! the pipeline as [`BoundingBox`] values, the tiler derives [`Tile`] values
//! from them, the sequencer emits a stream of [`Operation`] values, and the
//! renderers consume that stream to produce the plain script and the
//! structured macro fragment. Every type here is immutable once constructed
//! and free of I/O.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Absolute block position within a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    x: i64,
    y: i64,
    z: i64,
}

impl BlockPos {
    /// Creates a new position from explicit coordinates.
    #[must_use]
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// X coordinate of the position.
    #[must_use]
    pub const fn x(&self) -> i64 {
        self.x
    }

    /// Y coordinate of the position.
    #[must_use]
    pub const fn y(&self) -> i64 {
        self.y
    }

    /// Z coordinate of the position.
    #[must_use]
    pub const fn z(&self) -> i64 {
        self.z
    }

    /// Component-wise minimum of two positions.
    #[must_use]
    pub fn component_min(self, other: BlockPos) -> BlockPos {
        BlockPos::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Returns the position translated by the provided per-axis deltas.
    #[must_use]
    pub const fn translated(self, dx: i64, dy: i64, dz: i64) -> BlockPos {
        BlockPos::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Parses a position from an `X,Y,Z` coordinate list.
    ///
    /// Fails with [`PlanError::InvalidGeometry`] unless the input contains
    /// exactly three comma-separated integers.
    pub fn parse(input: &str) -> Result<Self, PlanError> {
        let coords = parse_coords(input, 3)?;
        Ok(Self::new(coords[0], coords[1], coords[2]))
    }
}

/// Axis-aligned volume described by its minimum and maximum corners.
///
/// Construction normalizes arbitrary corner pairs coordinate-wise, so
/// `min() <= max()` holds on every axis. Zero-extent boxes (a one-block-thick
/// slab, or a single block) are legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    min: BlockPos,
    max: BlockPos,
}

impl BoundingBox {
    /// Creates a normalized box from two opposing corners in any order.
    #[must_use]
    pub fn from_corners(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Parses a box from an `X1,Y1,Z1,X2,Y2,Z2` coordinate list.
    ///
    /// Fails with [`PlanError::InvalidGeometry`] unless the input contains
    /// exactly six comma-separated integers. No further validation is
    /// performed beyond corner normalization.
    pub fn parse_corners(input: &str) -> Result<Self, PlanError> {
        let coords = parse_coords(input, 6)?;
        Ok(Self::from_corners(
            BlockPos::new(coords[0], coords[1], coords[2]),
            BlockPos::new(coords[3], coords[4], coords[5]),
        ))
    }

    /// Minimum corner of the box.
    #[must_use]
    pub const fn min(&self) -> BlockPos {
        self.min
    }

    /// Maximum corner of the box.
    #[must_use]
    pub const fn max(&self) -> BlockPos {
        self.max
    }

    /// Number of blocks spanned along the X axis.
    #[must_use]
    pub const fn extent_x(&self) -> i64 {
        self.max.x - self.min.x + 1
    }

    /// Number of blocks spanned along the Y axis.
    #[must_use]
    pub const fn extent_y(&self) -> i64 {
        self.max.y - self.min.y + 1
    }

    /// Number of blocks spanned along the Z axis.
    #[must_use]
    pub const fn extent_z(&self) -> i64 {
        self.max.z - self.min.z + 1
    }

    /// Reports whether `other` lies fully inside this box.
    #[must_use]
    pub const fn contains(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.min.z <= other.min.z
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
            && other.max.z <= self.max.z
    }
}

/// Grid-partitioned sub-volume of a source box paired with its destination.
///
/// Tiles are derived by the tiler, consumed immediately by the sequencer, and
/// never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    source: BoundingBox,
    target_anchor: BlockPos,
}

impl Tile {
    /// Creates a new tile pairing a source sub-volume with its paste anchor.
    #[must_use]
    pub const fn new(source: BoundingBox, target_anchor: BlockPos) -> Self {
        Self {
            source,
            target_anchor,
        }
    }

    /// Sub-volume of the parent box covered by this tile.
    #[must_use]
    pub const fn source(&self) -> BoundingBox {
        self.source
    }

    /// Destination minimum corner where the tile is pasted.
    #[must_use]
    pub const fn target_anchor(&self) -> BlockPos {
        self.target_anchor
    }
}

/// Label selecting which configured tick delay governs the pause after an
/// operation.
///
/// The structured renderer applies the delay to the *next* emitted entry, not
/// to the operation carrying the label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DelayCategory {
    /// Pause after switching worlds.
    MoveWorld,
    /// Pause after teleporting within a world.
    Teleport,
    /// Pause after a region copy.
    Copy,
    /// Pause after a region paste.
    Paste,
    /// No pause is associated with the operation.
    None,
}

/// Run-scoped tick delays for each [`DelayCategory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayProfile {
    move_world: u32,
    teleport: u32,
    copy: u32,
    paste: u32,
}

impl DelayProfile {
    /// Creates a profile from explicit per-category tick values.
    #[must_use]
    pub const fn new(move_world: u32, teleport: u32, copy: u32, paste: u32) -> Self {
        Self {
            move_world,
            teleport,
            copy,
            paste,
        }
    }

    /// Ticks configured for the provided category; `None` maps to zero.
    #[must_use]
    pub const fn ticks_for(&self, category: DelayCategory) -> u32 {
        match category {
            DelayCategory::MoveWorld => self.move_world,
            DelayCategory::Teleport => self.teleport,
            DelayCategory::Copy => self.copy,
            DelayCategory::Paste => self.paste,
            DelayCategory::None => 0,
        }
    }

    /// Ticks applied after a world move.
    #[must_use]
    pub const fn move_world(&self) -> u32 {
        self.move_world
    }

    /// Ticks applied after a teleport.
    #[must_use]
    pub const fn teleport(&self) -> u32 {
        self.teleport
    }

    /// Ticks applied after a region copy.
    #[must_use]
    pub const fn copy(&self) -> u32 {
        self.copy
    }

    /// Ticks applied after a region paste.
    #[must_use]
    pub const fn paste(&self) -> u32 {
        self.paste
    }
}

impl Default for DelayProfile {
    fn default() -> Self {
        Self::new(20, 15, 50, 100)
    }
}

/// Kind of step emitted by the command sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Switch the player to another world.
    MoveWorld,
    /// Teleport the player within the current world.
    Teleport,
    /// Select the first selection corner.
    SelectCorner1,
    /// Select the second selection corner.
    SelectCorner2,
    /// Copy the current selection to the clipboard.
    Copy,
    /// Paste the clipboard at the player position (or its dry-run stand-in).
    Paste,
    /// Force the game mode required for editing.
    SetMode,
    /// Human-readable annotation carried alongside the commands.
    Annotate,
    /// Blank spacer between tile groups.
    Separator,
}

/// One abstract step of the generated command stream.
///
/// The same operation sequence is consumed once by each renderer, so the
/// rendered text, the step kind, and the delay category travel together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operation {
    kind: OpKind,
    category: DelayCategory,
    text: String,
}

impl Operation {
    /// Creates a new operation with the provided kind, category, and text.
    #[must_use]
    pub fn new(kind: OpKind, category: DelayCategory, text: impl Into<String>) -> Self {
        Self {
            kind,
            category,
            text: text.into(),
        }
    }

    /// Kind of step this operation represents.
    #[must_use]
    pub const fn kind(&self) -> OpKind {
        self.kind
    }

    /// Delay category governing the pause after this operation.
    #[must_use]
    pub const fn category(&self) -> DelayCategory {
        self.category
    }

    /// Rendered text of the operation (empty for separators).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Reports whether this operation is an annotation rather than a command.
    #[must_use]
    pub fn is_annotation(&self) -> bool {
        self.kind == OpKind::Annotate
    }

    /// Reports whether this operation is a blank spacer.
    #[must_use]
    pub fn is_separator(&self) -> bool {
        self.kind == OpKind::Separator
    }
}

/// Precondition failures surfaced by the planning pipeline.
///
/// All variants are detected before any tiling work begins; once inputs are
/// valid, generation cannot fail midway.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlanError {
    /// A coordinate list did not contain the expected number of integers.
    #[error("expected {expected} comma-separated integers, got '{input}'")]
    InvalidGeometry {
        /// Raw input that failed to parse.
        input: String,
        /// Number of coordinates the input was required to contain.
        expected: usize,
    },
    /// No bounding boxes were supplied to the anchor resolver.
    #[error("at least one source bounding box is required")]
    EmptyInput,
    /// The requested tile size was zero or negative.
    #[error("tile size must be positive, got {0}")]
    InvalidTileSize(i64),
}

fn parse_coords(input: &str, expected: usize) -> Result<Vec<i64>, PlanError> {
    let parsed: Result<Vec<i64>, _> = input
        .split(',')
        .map(|part| part.trim().parse::<i64>())
        .collect();
    match parsed {
        Ok(coords) if coords.len() == expected => Ok(coords),
        _ => Err(PlanError::InvalidGeometry {
            input: input.to_owned(),
            expected,
        }),
    }
}
