//! Chunk streaming and aggregate accounting through the chunk manager.

mod common;

use std::collections::HashSet;

use cgmath::{Point3, SquareMatrix, Vector4};
use common::{plains_generator, RecordingSink, SinkEvent};
use voxel_world::engine_state::voxels::{
    block::block_kind::BlockKind,
    chunk::{ChunkCoord, ChunkCounters, CHUNK_DIMENSION, WORLD_CHUNK_LIMIT},
    chunk_manager::{ChunkManager, WorldStats, MAX_RENDER_DISTANCE},
    generation::TerrainGenerator,
};

fn window(center: ChunkCoord, render_distance: i32) -> HashSet<ChunkCoord> {
    let mut expected = HashSet::new();
    for x in center.x - render_distance..=center.x + render_distance {
        for z in center.z - render_distance..=center.z + render_distance {
            expected.insert(ChunkCoord::new(x, z));
        }
    }
    expected
}

fn chunk_center(position: ChunkCoord) -> Point3<f32> {
    let size = CHUNK_DIMENSION as f32;
    Point3::new(position.x as f32 * size + 16.0, 20.0, position.z as f32 * size + 16.0)
}

fn sum_counters(manager: &ChunkManager, positions: &[ChunkCoord]) -> ChunkCounters {
    positions.iter().fold(ChunkCounters::default(), |mut sum, position| {
        let counters = manager
            .get_chunk(*position)
            .expect("chunk should be loaded")
            .counters();
        sum.vertices += counters.vertices;
        sum.triangles += counters.triangles;
        sum.trees += counters.trees;
        sum
    })
}

/// After every update the loaded set is exactly the Chebyshev window around the viewer
#[test]
fn test_loaded_set_matches_window() {
    let mut sink = RecordingSink::default();
    let mut manager = ChunkManager::new(TerrainGenerator::default(), 5);

    let path = [
        ChunkCoord::new(0, 0),
        ChunkCoord::new(0, 1),
        ChunkCoord::new(3, 1),
        ChunkCoord::new(-4, -4),
        ChunkCoord::new(-4, -4),
        ChunkCoord::new(10, -20),
    ];
    for position in path {
        manager.update(chunk_center(position), &mut sink);

        let loaded: HashSet<ChunkCoord> = manager.loaded_positions().collect();
        assert_eq!(loaded, window(position, 5), "window around {:?}", position);
        assert_eq!(manager.viewer_chunk(), position);
    }
}

/// Incremental totals equal a fresh summation after any sequence of moves and edits
#[test]
fn test_aggregates_never_drift() {
    let mut sink = RecordingSink::default();
    let mut manager = ChunkManager::new(TerrainGenerator::default(), 5);

    let steps: [(ChunkCoord, Option<(i32, i32, i32, BlockKind)>); 5] = [
        (ChunkCoord::new(0, 0), Some((3, 0, 3, BlockKind::AIR))),
        (ChunkCoord::new(1, 0), Some((9, 31, 9, BlockKind::DIRT))),
        (ChunkCoord::new(2, 2), None),
        (ChunkCoord::new(-7, 2), Some((0, 1, 31, BlockKind::AIR))),
        (ChunkCoord::new(0, 0), Some((4, 4, 4, BlockKind::LEAF))),
    ];
    for (position, edit) in steps {
        manager.update(chunk_center(position), &mut sink);
        assert_eq!(manager.stats(), manager.recount());

        if let Some((x, y, z, kind)) = edit {
            assert!(manager
                .modify_voxel(position, Point3::new(x, y, z), kind, &mut sink)
                .is_some());
            assert_eq!(manager.stats(), manager.recount());
        }
    }

    manager.set_render_distance(8);
    manager.update(chunk_center(ChunkCoord::new(0, 0)), &mut sink);
    assert_eq!(manager.len(), 17 * 17);
    assert_eq!(manager.stats(), manager.recount());

    manager.set_render_distance(5);
    manager.update(chunk_center(ChunkCoord::new(0, 0)), &mut sink);
    assert_eq!(manager.len(), 11 * 11);
    assert_eq!(manager.stats(), manager.recount());
}

/// Crossing from chunk (0, 0) to (1, 0) swaps exactly the x = -5 column for the x = 6 column
#[test]
fn test_single_chunk_crossing() {
    let mut sink = RecordingSink::default();
    let mut manager = ChunkManager::new(TerrainGenerator::default(), 5);
    manager.update(Point3::new(16.0, 20.0, 16.0), &mut sink);

    let leaving: Vec<ChunkCoord> = (-5..=5).map(|z| ChunkCoord::new(-5, z)).collect();
    let arriving: Vec<ChunkCoord> = (-5..=5).map(|z| ChunkCoord::new(6, z)).collect();

    let before = manager.stats();
    let removed = sum_counters(&manager, &leaving);
    sink.clear();

    let report = manager.update(Point3::new(48.0, 20.0, 16.0), &mut sink);

    let unloaded: HashSet<ChunkCoord> = report.unloaded.iter().copied().collect();
    let loaded: HashSet<ChunkCoord> = report.loaded.iter().copied().collect();
    assert_eq!(unloaded, leaving.iter().copied().collect());
    assert_eq!(loaded, arriving.iter().copied().collect());

    let added = sum_counters(&manager, &arriving);
    let after = manager.stats();
    assert_eq!(
        after,
        WorldStats {
            loaded_chunks: before.loaded_chunks,
            total_vertices: before.total_vertices - removed.vertices + added.vertices,
            total_triangles: before.total_triangles - removed.triangles + added.triangles,
            total_trees: before.total_trees - removed.trees + added.trees,
        }
    );

    // Every release reaches the sink before any upload.
    let first_upload = sink
        .events
        .iter()
        .position(|event| matches!(event, SinkEvent::Upload { .. }))
        .unwrap();
    let last_release = sink
        .events
        .iter()
        .rposition(|event| matches!(event, SinkEvent::Release(_)))
        .unwrap();
    assert!(last_release < first_upload);
    assert_eq!(sink.releases().len(), 11);
    assert_eq!(sink.uploads().len(), 11);
}

/// A viewer arbitrarily far out streams the window around the world limit
#[test]
fn test_far_viewer_streams_at_world_limit() {
    let mut sink = RecordingSink::default();
    let mut manager = ChunkManager::new(plains_generator(Vec::new()), MAX_RENDER_DISTANCE);

    let report = manager.update(Point3::new(1.0e11, 10.0, 0.0), &mut sink);

    let limit = ChunkCoord::new(WORLD_CHUNK_LIMIT, 0);
    assert_eq!(report.viewer_chunk, limit);
    let loaded: HashSet<ChunkCoord> = manager.loaded_positions().collect();
    assert_eq!(loaded, window(limit, MAX_RENDER_DISTANCE));
    assert_eq!(manager.stats(), manager.recount());

    // Jumping to the opposite limit swaps the whole window.
    manager.set_render_distance(5);
    let report = manager.update(Point3::new(0.0, 10.0, f32::NEG_INFINITY), &mut sink);
    let limit = ChunkCoord::new(0, -WORLD_CHUNK_LIMIT);
    assert_eq!(report.viewer_chunk, limit);
    assert_eq!(report.unloaded.len(), 41 * 41);
    let loaded: HashSet<ChunkCoord> = manager.loaded_positions().collect();
    assert_eq!(loaded, window(limit, 5));
    assert_eq!(manager.stats(), manager.recount());
}

/// Render distance is clamped into [5, 20] before it is used
#[test]
fn test_render_distance_clamp() {
    let mut sink = RecordingSink::default();
    let mut manager = ChunkManager::new(plains_generator(Vec::new()), 0);

    manager.update(Point3::new(0.0, 0.0, 0.0), &mut sink);
    assert_eq!(manager.render_distance(), 5);
    assert_eq!(manager.len(), 121);
}

/// Each loaded chunk is drawn once per render with a pure translation to its origin
#[test]
fn test_render_draws_every_chunk_at_its_origin() {
    let mut sink = RecordingSink::default();
    let mut manager = ChunkManager::new(plains_generator(Vec::new()), 5);
    manager.update(Point3::new(-10.0, 12.0, 70.0), &mut sink);
    sink.clear();

    manager.render(&mut sink);

    assert_eq!(sink.events.len(), 121);
    for event in &sink.events {
        let SinkEvent::Draw(position, transform) = event else {
            panic!("unexpected sink call {:?}", event);
        };
        let origin = *transform * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(
            origin,
            Vector4::new(
                (position.x * CHUNK_DIMENSION) as f32,
                0.0,
                (position.z * CHUNK_DIMENSION) as f32,
                1.0
            )
        );
        let mut linear = *transform;
        linear.w = Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(linear.is_identity());
    }
}

/// An edit re-uploads exactly the edited chunk
#[test]
fn test_edit_reuploads_one_chunk() {
    let mut sink = RecordingSink::default();
    let mut manager = ChunkManager::new(plains_generator(Vec::new()), 5);
    manager.update(Point3::new(0.0, 12.0, 0.0), &mut sink);
    sink.clear();

    let position = ChunkCoord::new(-1, 2);
    manager.modify_voxel(position, Point3::new(5, 5, 5), BlockKind::AIR, &mut sink);

    assert_eq!(sink.uploads(), vec![position]);
    let SinkEvent::Upload { vertices, .. } = &sink.events[0] else {
        panic!("expected an upload");
    };
    assert_eq!(
        *vertices as u64,
        manager.get_chunk(position).unwrap().counters().vertices
    );
}
