//! Shared doubles for the integration tests.

#![allow(dead_code)]

use cgmath::Matrix4;
use voxel_world::engine_state::{
    rendering::{ChunkMesh, RenderSink},
    voxels::{
        chunk::ChunkCoord,
        generation::{TerrainGenerator, TerrainNoise, TreeHeightSource},
    },
};

/// Noise with constant biome and height samples and trees only at listed world columns.
pub struct ForcedNoise {
    pub biome: f64,
    pub height: f64,
    pub tree_columns: Vec<(i32, i32)>,
}

impl TerrainNoise for ForcedNoise {
    fn biome_sample(&self, _position: ChunkCoord) -> f64 {
        self.biome
    }

    fn height_sample(&self, _world_x: i32, _world_z: i32) -> f64 {
        self.height
    }

    fn tree_sample(&self, world_x: i32, world_z: i32) -> f64 {
        if self.tree_columns.contains(&(world_x, world_z)) {
            0.95
        } else {
            -1.0
        }
    }
}

/// Plains at surface height 10 with trees at the given world columns.
pub fn plains_generator(tree_columns: Vec<(i32, i32)>) -> TerrainGenerator {
    TerrainGenerator::new(
        Box::new(ForcedNoise {
            biome: -1.0,
            height: 0.25,
            tree_columns,
        }),
        TreeHeightSource::Seeded(99),
    )
}

/// One call received by a `RecordingSink`.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Upload { position: ChunkCoord, vertices: usize, indices: usize },
    Release(ChunkCoord),
    Draw(ChunkCoord, Matrix4<f32>),
}

/// A render sink that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn uploads(&self) -> Vec<ChunkCoord> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Upload { position, .. } => Some(*position),
                _ => None,
            })
            .collect()
    }

    pub fn releases(&self) -> Vec<ChunkCoord> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Release(position) => Some(*position),
                _ => None,
            })
            .collect()
    }
}

impl RenderSink for RecordingSink {
    fn upload_chunk(&mut self, position: ChunkCoord, mesh: &ChunkMesh) {
        self.events.push(SinkEvent::Upload {
            position,
            vertices: mesh.vertices.len(),
            indices: mesh.indices.len(),
        });
    }

    fn release_chunk(&mut self, position: ChunkCoord) {
        self.events.push(SinkEvent::Release(position));
    }

    fn draw_chunk(&mut self, position: ChunkCoord, transform: &Matrix4<f32>) {
        self.events.push(SinkEvent::Draw(position, *transform));
    }
}
