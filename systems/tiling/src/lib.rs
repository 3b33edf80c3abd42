#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure tiling system that partitions source boxes into paste-sized tiles.
//!
//! The tiler splits a [`BoundingBox`] into a row-major grid over the X and Z
//! axes while the Y axis always spans the parent box, reflecting the intended
//! use case of horizontal build footprints whose vertical extent fits within
//! a single operation. Every tile's paste anchor is offset relative to the
//! run's *global* anchor, which is what keeps multiple disjoint source boxes
//! in their original mutual arrangement at the destination.

use worldshift_core::{BlockPos, BoundingBox, PlanError, Tile};

/// Computes the global source anchor for a generation run.
///
/// The anchor is the component-wise minimum of the minimum corners of all
/// boxes and is computed exactly once per run. Fails with
/// [`PlanError::EmptyInput`] when no boxes are supplied.
pub fn resolve_anchor(boxes: &[BoundingBox]) -> Result<BlockPos, PlanError> {
    let mut corners = boxes.iter().map(BoundingBox::min);
    let first = corners.next().ok_or(PlanError::EmptyInput)?;
    Ok(corners.fold(first, BlockPos::component_min))
}

/// Partitions one box into tiles, appending them to `out` in grid order.
///
/// Tiles are ordered by increasing X offset (outer) and increasing Z offset
/// (inner). The final tile of each row and column is clipped to the parent
/// box, so extents that are not multiples of `tile_size` produce remainder
/// tiles. Each tile's anchor is
/// `target_origin + (tile.min - anchor)` component-wise.
///
/// Fails with [`PlanError::InvalidTileSize`] when `tile_size` is not
/// positive; nothing is appended in that case.
pub fn tile_box(
    bbox: &BoundingBox,
    tile_size: i64,
    target_origin: BlockPos,
    anchor: BlockPos,
    out: &mut Vec<Tile>,
) -> Result<(), PlanError> {
    if tile_size <= 0 {
        return Err(PlanError::InvalidTileSize(tile_size));
    }

    let min = bbox.min();
    let max = bbox.max();
    let dx = bbox.extent_x();
    let dz = bbox.extent_z();

    let mut ix = 0;
    while ix < dx {
        let mut iz = 0;
        while iz < dz {
            let sub_min = BlockPos::new(min.x() + ix, min.y(), min.z() + iz);
            let sub_max = BlockPos::new(
                (min.x() + ix + tile_size - 1).min(max.x()),
                max.y(),
                (min.z() + iz + tile_size - 1).min(max.z()),
            );
            let source = BoundingBox::from_corners(sub_min, sub_max);
            let target_anchor = target_origin.translated(
                sub_min.x() - anchor.x(),
                sub_min.y() - anchor.y(),
                sub_min.z() - anchor.z(),
            );
            out.push(Tile::new(source, target_anchor));
            iz += tile_size;
        }
        ix += tile_size;
    }

    Ok(())
}
