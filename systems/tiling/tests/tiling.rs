use worldshift_core::{BlockPos, BoundingBox, Tile};
use worldshift_system_tiling::{resolve_anchor, tile_box};

fn tiles_for(bbox: &BoundingBox, size: i64, origin: BlockPos, anchor: BlockPos) -> Vec<Tile> {
    let mut out = Vec::new();
    tile_box(bbox, size, origin, anchor, &mut out).expect("tiling succeeds");
    out
}

#[test]
fn tiles_stay_inside_parent_and_cover_footprint_exactly() {
    let bbox = BoundingBox::from_corners(BlockPos::new(-7, 3, 11), BlockPos::new(50, 9, 40));
    let tiles = tiles_for(&bbox, 13, BlockPos::new(0, 0, 0), bbox.min());

    let mut covered = 0;
    for tile in &tiles {
        let source = tile.source();
        assert!(bbox.contains(&source), "tile {source:?} escapes parent");
        assert_eq!(
            source.min().y(),
            bbox.min().y(),
            "tiles span the full Y range"
        );
        assert_eq!(source.max().y(), bbox.max().y());
        assert!(source.extent_x() <= 13);
        assert!(source.extent_z() <= 13);
        covered += source.extent_x() * source.extent_z();
    }

    // Exact area coverage combined with per-tile containment and the
    // grid construction rules out both gaps and overlaps.
    assert_eq!(covered, bbox.extent_x() * bbox.extent_z());
}

#[test]
fn footprint_cells_are_covered_exactly_once() {
    let bbox = BoundingBox::from_corners(BlockPos::new(0, 0, 0), BlockPos::new(20, 4, 17));
    let tiles = tiles_for(&bbox, 7, BlockPos::new(0, 0, 0), bbox.min());

    for x in 0..bbox.extent_x() {
        for z in 0..bbox.extent_z() {
            let hits = tiles
                .iter()
                .filter(|tile| {
                    let source = tile.source();
                    let px = bbox.min().x() + x;
                    let pz = bbox.min().z() + z;
                    source.min().x() <= px
                        && px <= source.max().x()
                        && source.min().z() <= pz
                        && pz <= source.max().z()
                })
                .count();
            assert_eq!(hits, 1, "cell ({x},{z}) must belong to exactly one tile");
        }
    }
}

#[test]
fn tile_size_covering_both_extents_yields_the_whole_box() {
    let bbox = BoundingBox::from_corners(BlockPos::new(4, -2, -9), BlockPos::new(40, 30, 12));
    let size = bbox.extent_x().max(bbox.extent_z());
    let tiles = tiles_for(&bbox, size, BlockPos::new(100, 0, 100), bbox.min());

    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0].source(), bbox);
    assert_eq!(tiles[0].target_anchor(), BlockPos::new(100, 0, 100));
}

#[test]
fn tiling_is_deterministic_across_runs() {
    let bbox = BoundingBox::from_corners(BlockPos::new(-31, 0, -17), BlockPos::new(64, 8, 59));
    let first = tiles_for(&bbox, 24, BlockPos::new(7, 1, -3), BlockPos::new(-31, 0, -17));
    let second = tiles_for(&bbox, 24, BlockPos::new(7, 1, -3), BlockPos::new(-31, 0, -17));
    assert_eq!(first, second);
}

#[test]
fn translating_inputs_translates_anchors_without_reshaping_tiles() {
    let bbox = BoundingBox::from_corners(BlockPos::new(5, 2, 5), BlockPos::new(90, 12, 70));
    let origin = BlockPos::new(-40, 6, 300);
    let base = tiles_for(&bbox, 30, origin, bbox.min());

    let (sx, sy, sz) = (17, -4, 23);
    let shifted_box = BoundingBox::from_corners(
        bbox.min().translated(sx, sy, sz),
        bbox.max().translated(sx, sy, sz),
    );
    let shifted = tiles_for(
        &shifted_box,
        30,
        origin.translated(sx, sy, sz),
        shifted_box.min(),
    );

    assert_eq!(base.len(), shifted.len());
    for (before, after) in base.iter().zip(&shifted) {
        assert_eq!(
            after.target_anchor(),
            before.target_anchor().translated(sx, sy, sz),
        );
        assert_eq!(after.source().extent_x(), before.source().extent_x());
        assert_eq!(after.source().extent_y(), before.source().extent_y());
        assert_eq!(after.source().extent_z(), before.source().extent_z());
    }
}

#[test]
fn exact_multiple_extents_produce_a_two_by_two_grid() {
    let bbox = BoundingBox::from_corners(BlockPos::new(0, 0, 0), BlockPos::new(127, 10, 127));
    let tiles = tiles_for(&bbox, 64, BlockPos::new(0, 0, 0), bbox.min());

    assert_eq!(tiles.len(), 4, "128x128 footprint tiles into a 2x2 grid");
    for tile in &tiles {
        assert_eq!(tile.source().extent_x(), 64);
        assert_eq!(tile.source().extent_y(), 11);
        assert_eq!(tile.source().extent_z(), 64);
    }

    // X-major, Z-minor ordering.
    let anchors: Vec<BlockPos> = tiles.iter().map(Tile::target_anchor).collect();
    assert_eq!(
        anchors,
        vec![
            BlockPos::new(0, 0, 0),
            BlockPos::new(0, 0, 64),
            BlockPos::new(64, 0, 0),
            BlockPos::new(64, 0, 64),
        ],
    );
}

#[test]
fn global_anchor_preserves_multi_box_arrangement() {
    let first = BoundingBox::from_corners(BlockPos::new(10, 5, 10), BlockPos::new(30, 8, 25));
    let second = BoundingBox::from_corners(BlockPos::new(-5, 5, 20), BlockPos::new(0, 9, 40));

    let anchor = resolve_anchor(&[first, second]).expect("anchor resolves");
    assert_eq!(anchor, BlockPos::new(-5, 5, 10));

    let origin = BlockPos::new(100, 0, 100);
    let tiles = tiles_for(&first, 64, origin, anchor);
    assert_eq!(tiles.len(), 1);

    // target = origin + (sub_min - anchor), asserted from the formula.
    let sub_min = tiles[0].source().min();
    assert_eq!(
        tiles[0].target_anchor(),
        origin.translated(
            sub_min.x() - anchor.x(),
            sub_min.y() - anchor.y(),
            sub_min.z() - anchor.z(),
        ),
    );
    assert_eq!(tiles[0].target_anchor(), BlockPos::new(115, 0, 100));
}

#[test]
fn anchor_resolution_ignores_box_order() {
    let a = BoundingBox::from_corners(BlockPos::new(3, 9, -4), BlockPos::new(10, 12, 2));
    let b = BoundingBox::from_corners(BlockPos::new(-1, 20, 7), BlockPos::new(5, 25, 9));

    assert_eq!(
        resolve_anchor(&[a, b]).expect("anchor resolves"),
        resolve_anchor(&[b, a]).expect("anchor resolves"),
    );
    assert_eq!(
        resolve_anchor(&[a, b]).expect("anchor resolves"),
        BlockPos::new(-1, 9, -4),
    );
}
