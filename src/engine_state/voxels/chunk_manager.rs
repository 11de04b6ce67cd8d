//! # Chunk Manager
//!
//! This module provides the `ChunkManager`, which owns every loaded chunk and
//! streams chunks in and out of a square window around the viewer.
//!
//! ## Streaming
//!
//! Each `update` call:
//! 1. Clamps the render distance into `[MIN_RENDER_DISTANCE, MAX_RENDER_DISTANCE]`
//! 2. Recomputes the viewer's chunk coordinate, clamped to `WORLD_CHUNK_LIMIT`
//! 3. Unloads every chunk whose Chebyshev distance to the viewer exceeds the render distance
//! 4. Loads every missing chunk inside the square window of side `2 * render_distance + 1`
//!
//! All unloads of a tick happen before any load of that tick. Generation is
//! synchronous: a chunk is generated, meshed and uploaded before `update` returns.
//!
//! ## Accounting
//!
//! World totals are maintained incrementally: a chunk's counters are added when
//! it loads, subtracted when it unloads, and adjusted by the before/after
//! difference when it is edited. `recount` recomputes them from scratch.

use std::collections::HashMap;

use cgmath::Point3;

use super::{
    block::block_kind::BlockKind,
    chunk::{Chunk, ChunkCoord, ChunkCounters, EditOutcome},
    generation::TerrainGenerator,
};
use crate::engine_state::rendering::RenderSink;

/// Smallest render distance `update` will use.
pub const MIN_RENDER_DISTANCE: i32 = 5;
/// Largest render distance `update` will use.
pub const MAX_RENDER_DISTANCE: i32 = 20;
/// Render distance of a freshly created manager.
pub const DEFAULT_RENDER_DISTANCE: i32 = 12;

/// Aggregate statistics over the loaded chunks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Number of loaded chunks
    pub loaded_chunks: usize,
    /// Sum of mesh vertices over loaded chunks
    pub total_vertices: u64,
    /// Sum of mesh triangles over loaded chunks
    pub total_triangles: u64,
    /// Sum of trees over loaded chunks
    pub total_trees: u64,
}

/// What a single `update` call changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamingReport {
    /// The viewer's chunk after the update
    pub viewer_chunk: ChunkCoord,
    /// Chunks dropped this tick
    pub unloaded: Vec<ChunkCoord>,
    /// Chunks generated this tick
    pub loaded: Vec<ChunkCoord>,
}

/// Owns the loaded chunks and keeps them aligned with the viewer's position.
///
/// The manager is the sole owner of its chunks; nothing else holds on to them
/// between calls.
pub struct ChunkManager {
    chunks: HashMap<ChunkCoord, Chunk>,
    generator: TerrainGenerator,
    render_distance: i32,
    viewer_chunk: ChunkCoord,
    total_vertices: u64,
    total_triangles: u64,
    total_trees: u64,
}

impl ChunkManager {
    /// Creates a manager with no chunks loaded.
    ///
    /// Nothing is generated until the first `update`.
    pub fn new(generator: TerrainGenerator, render_distance: i32) -> Self {
        ChunkManager {
            chunks: HashMap::new(),
            generator,
            render_distance: Self::clamp_render_distance(render_distance),
            viewer_chunk: ChunkCoord::default(),
            total_vertices: 0,
            total_triangles: 0,
            total_trees: 0,
        }
    }

    fn clamp_render_distance(render_distance: i32) -> i32 {
        render_distance.clamp(MIN_RENDER_DISTANCE, MAX_RENDER_DISTANCE)
    }

    /// The render distance, in chunks.
    pub fn render_distance(&self) -> i32 {
        self.render_distance
    }

    /// Changes the render distance. The value is clamped into the allowed range
    /// and takes effect on the next `update`.
    pub fn set_render_distance(&mut self, render_distance: i32) {
        let clamped = Self::clamp_render_distance(render_distance);
        if clamped != render_distance {
            log::warn!(
                "Render distance {} clamped to {}",
                render_distance,
                clamped
            );
        }
        self.render_distance = clamped;
    }

    /// The viewer's chunk as of the last `update`.
    pub fn viewer_chunk(&self) -> ChunkCoord {
        self.viewer_chunk
    }

    /// The generator used for every chunk this manager loads.
    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Streams chunks so the loaded set matches the window around `viewer_position`.
    pub fn update(
        &mut self,
        viewer_position: Point3<f32>,
        sink: &mut dyn RenderSink,
    ) -> StreamingReport {
        self.render_distance = Self::clamp_render_distance(self.render_distance);
        self.viewer_chunk = ChunkCoord::containing(viewer_position);

        let unloaded = self.unload_chunks(sink);

        let mut loaded = Vec::new();
        let distance = self.render_distance;
        for x in self.viewer_chunk.x - distance..=self.viewer_chunk.x + distance {
            for z in self.viewer_chunk.z - distance..=self.viewer_chunk.z + distance {
                let position = ChunkCoord::new(x, z);
                if !self.chunks.contains_key(&position) {
                    self.load_chunk(position, sink);
                    loaded.push(position);
                }
            }
        }

        if !loaded.is_empty() || !unloaded.is_empty() {
            log::debug!(
                "Viewer in {:?}: loaded {}, unloaded {}, {} resident",
                self.viewer_chunk,
                loaded.len(),
                unloaded.len(),
                self.chunks.len()
            );
        }

        StreamingReport {
            viewer_chunk: self.viewer_chunk,
            unloaded,
            loaded,
        }
    }

    fn unload_chunks(&mut self, sink: &mut dyn RenderSink) -> Vec<ChunkCoord> {
        let viewer_chunk = self.viewer_chunk;
        let render_distance = self.render_distance;
        let mut far: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|position| position.chebyshev_distance(viewer_chunk) > render_distance)
            .copied()
            .collect();
        far.sort();

        for position in &far {
            if let Some(chunk) = self.chunks.remove(position) {
                self.subtract_counters(chunk.counters());
                sink.release_chunk(*position);
                log::trace!("Unloaded chunk {:?}", position);
            }
        }

        far
    }

    fn load_chunk(&mut self, position: ChunkCoord, sink: &mut dyn RenderSink) {
        let chunk = Chunk::generate(position, &self.generator);
        chunk.sync_to_sink(sink);
        self.add_counters(chunk.counters());
        log::trace!(
            "Loaded chunk {:?} with {} trees",
            position,
            chunk.tree_count()
        );
        self.chunks.insert(position, chunk);
    }

    fn add_counters(&mut self, counters: ChunkCounters) {
        self.total_vertices += counters.vertices;
        self.total_triangles += counters.triangles;
        self.total_trees += counters.trees;
    }

    fn subtract_counters(&mut self, counters: ChunkCounters) {
        self.total_vertices -= counters.vertices;
        self.total_triangles -= counters.triangles;
        self.total_trees -= counters.trees;
    }

    /// Edits one voxel of a loaded chunk, re-uploads its mesh and updates the totals.
    ///
    /// # Returns
    /// `None` if the chunk is not loaded, otherwise the chunk's edit outcome.
    pub fn modify_voxel(
        &mut self,
        position: ChunkCoord,
        local: Point3<i32>,
        kind: BlockKind,
        sink: &mut dyn RenderSink,
    ) -> Option<EditOutcome> {
        let chunk = self.chunks.get_mut(&position)?;
        let before = chunk.counters();
        let outcome = chunk.modify_voxel(local.x, local.y, local.z, kind);
        if outcome == EditOutcome::OutOfBounds {
            return Some(outcome);
        }

        chunk.sync_to_sink(sink);
        let after = chunk.counters();
        self.subtract_counters(before);
        self.add_counters(after);

        log::debug!(
            "Edit {:?} at {:?} in chunk {:?}: {:?}",
            kind,
            local,
            position,
            outcome
        );
        Some(outcome)
    }

    /// Draws every loaded chunk with its world translation.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        for (position, chunk) in &self.chunks {
            sink.draw_chunk(*position, &chunk.transform());
        }
    }

    /// Gets a loaded chunk.
    pub fn get_chunk(&self, position: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Whether a chunk is loaded.
    pub fn is_loaded(&self, position: ChunkCoord) -> bool {
        self.chunks.contains_key(&position)
    }

    /// The coordinates of every loaded chunk, in no particular order.
    pub fn loaded_positions(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Number of loaded chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether no chunk is loaded.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The incrementally maintained totals.
    pub fn stats(&self) -> WorldStats {
        WorldStats {
            loaded_chunks: self.chunks.len(),
            total_vertices: self.total_vertices,
            total_triangles: self.total_triangles,
            total_trees: self.total_trees,
        }
    }

    /// Totals recomputed by summing over the loaded chunks.
    pub fn recount(&self) -> WorldStats {
        self.chunks.values().fold(
            WorldStats {
                loaded_chunks: self.chunks.len(),
                ..WorldStats::default()
            },
            |mut stats, chunk| {
                let counters = chunk.counters();
                stats.total_vertices += counters.vertices;
                stats.total_triangles += counters.triangles;
                stats.total_trees += counters.trees;
                stats
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::LoggingRenderSink;
    use crate::engine_state::voxels::chunk::CHUNK_DIMENSION;

    #[test]
    fn render_distance_is_clamped() {
        let mut manager = ChunkManager::new(TerrainGenerator::default(), 1);
        assert_eq!(manager.render_distance(), MIN_RENDER_DISTANCE);
        manager.set_render_distance(100);
        assert_eq!(manager.render_distance(), MAX_RENDER_DISTANCE);
        manager.set_render_distance(7);
        assert_eq!(manager.render_distance(), 7);
    }

    #[test]
    fn first_update_loads_full_window() {
        let mut sink = LoggingRenderSink::new();
        let mut manager = ChunkManager::new(TerrainGenerator::default(), 5);

        let report = manager.update(Point3::new(-1.0, 20.0, 40.0), &mut sink);

        assert_eq!(report.viewer_chunk, ChunkCoord::new(-1, 1));
        assert_eq!(report.loaded.len(), 121);
        assert!(report.unloaded.is_empty());
        assert_eq!(manager.len(), 121);
        assert_eq!(sink.resident().len(), 121);
        assert_eq!(manager.stats(), manager.recount());
    }

    #[test]
    fn staying_in_a_chunk_changes_nothing() {
        let mut sink = LoggingRenderSink::new();
        let mut manager = ChunkManager::new(TerrainGenerator::default(), 5);
        manager.update(Point3::new(1.0, 0.0, 1.0), &mut sink);
        let stats = manager.stats();

        let report = manager.update(Point3::new(CHUNK_DIMENSION as f32 - 0.5, 0.0, 3.0), &mut sink);

        assert!(report.loaded.is_empty());
        assert!(report.unloaded.is_empty());
        assert_eq!(manager.stats(), stats);
        assert_eq!(sink.uploads(), 121);
    }

    #[test]
    fn edits_keep_totals_consistent() {
        let mut sink = LoggingRenderSink::new();
        let mut manager = ChunkManager::new(TerrainGenerator::default(), 5);
        manager.update(Point3::new(0.0, 0.0, 0.0), &mut sink);

        let position = ChunkCoord::new(0, 0);
        let outcome = manager.modify_voxel(position, Point3::new(8, 0, 8), BlockKind::AIR, &mut sink);
        assert_eq!(outcome, Some(EditOutcome::Removed));
        assert_eq!(manager.stats(), manager.recount());

        let outcome = manager.modify_voxel(position, Point3::new(8, 31, 8), BlockKind::DIRT, &mut sink);
        assert_eq!(outcome, Some(EditOutcome::Placed));
        assert_eq!(manager.stats(), manager.recount());

        assert_eq!(
            manager.modify_voxel(ChunkCoord::new(50, 50), Point3::new(0, 0, 0), BlockKind::AIR, &mut sink),
            None
        );
        assert_eq!(
            manager.modify_voxel(position, Point3::new(0, 99, 0), BlockKind::AIR, &mut sink),
            Some(EditOutcome::OutOfBounds)
        );
    }
}
