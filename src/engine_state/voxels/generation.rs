//! # Terrain Generation Sources
//!
//! This module owns everything terrain generation reads apart from the chunk
//! coordinate: the coherent-noise field (behind the `TerrainNoise` trait) and the
//! random source used for tree heights.
//!
//! ## Noise Layout
//!
//! A single simplex field is sampled three ways:
//! - **Biome**: once per chunk at `5 * chunk_coordinate`
//! - **Height**: once per column at the column's world coordinate
//! - **Trees**: once per grass column at `10 * world_coordinate`, which pushes the
//!   samples into a much higher spatial frequency so trees come out scattered

use noise::{NoiseFn, OpenSimplex};

use super::chunk::{ChunkCoord, CHUNK_DIMENSION};

/// Default seed of the terrain noise field.
pub const DEFAULT_SEED: u32 = 1337;
/// Default base frequency of the terrain noise field.
pub const DEFAULT_FREQUENCY: f64 = 0.01;
/// Biome samples above this value select the desert biome.
pub const DESERT_THRESHOLD: f64 = 0.3;
/// Scale applied to chunk coordinates before sampling the biome field.
pub const BIOME_COORDINATE_SCALE: f64 = 5.0;
/// Scale applied to world coordinates before sampling the tree field.
pub const TREE_COORDINATE_SCALE: f64 = 10.0;

/// The two biomes a chunk can belong to. Selection is per chunk, not per column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Biome {
    /// Grass-topped soil with trees
    #[default]
    Plains,
    /// Uniform sand, no trees
    Desert,
}

/// A coherent-noise source for terrain generation.
///
/// Every sample is expected in roughly `[-1, 1]`. Implementations receive
/// integer chunk or world coordinates and are responsible for their own
/// frequency scaling.
pub trait TerrainNoise {
    /// Samples the biome field for a chunk.
    fn biome_sample(&self, position: ChunkCoord) -> f64;

    /// Samples the height field for a world-space column.
    fn height_sample(&self, world_x: i32, world_z: i32) -> f64;

    /// Samples the tree-eligibility field for a world-space column.
    fn tree_sample(&self, world_x: i32, world_z: i32) -> f64;
}

/// The default `TerrainNoise`: one OpenSimplex field sampled at a fixed frequency.
pub struct SimplexTerrainNoise {
    noise: OpenSimplex,
    frequency: f64,
}

impl SimplexTerrainNoise {
    /// Creates a noise source with the given seed and base frequency.
    pub fn new(seed: u32, frequency: f64) -> Self {
        SimplexTerrainNoise {
            noise: OpenSimplex::new(seed),
            frequency,
        }
    }

    fn sample(&self, x: f64, z: f64) -> f64 {
        self.noise.get([x * self.frequency, z * self.frequency])
    }
}

impl Default for SimplexTerrainNoise {
    fn default() -> Self {
        SimplexTerrainNoise::new(DEFAULT_SEED, DEFAULT_FREQUENCY)
    }
}

impl TerrainNoise for SimplexTerrainNoise {
    fn biome_sample(&self, position: ChunkCoord) -> f64 {
        self.sample(
            position.x as f64 * BIOME_COORDINATE_SCALE,
            position.z as f64 * BIOME_COORDINATE_SCALE,
        )
    }

    fn height_sample(&self, world_x: i32, world_z: i32) -> f64 {
        self.sample(world_x as f64, world_z as f64)
    }

    fn tree_sample(&self, world_x: i32, world_z: i32) -> f64 {
        self.sample(
            world_x as f64 * TREE_COORDINATE_SCALE,
            world_z as f64 * TREE_COORDINATE_SCALE,
        )
    }
}

/// Where tree heights come from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TreeHeightSource {
    /// Derived from the world seed and the chunk coordinate; identical on every load.
    Seeded(u64),
    /// Drawn from system entropy; a reloaded chunk may grow different trees.
    Entropy,
}

/// Everything a chunk needs to generate its terrain.
///
/// The generator is shared by every chunk the manager loads; it holds no
/// per-chunk state.
pub struct TerrainGenerator {
    noise: Box<dyn TerrainNoise>,
    tree_heights: TreeHeightSource,
}

impl TerrainGenerator {
    /// Creates a generator over the given noise source.
    pub fn new(noise: Box<dyn TerrainNoise>, tree_heights: TreeHeightSource) -> Self {
        TerrainGenerator {
            noise,
            tree_heights,
        }
    }

    /// Creates the default simplex-backed generator with seeded tree heights.
    pub fn seeded(seed: u32, frequency: f64) -> Self {
        TerrainGenerator::new(
            Box::new(SimplexTerrainNoise::new(seed, frequency)),
            TreeHeightSource::Seeded(seed as u64),
        )
    }

    /// Selects the biome for a chunk.
    pub fn biome_for(&self, position: ChunkCoord) -> Biome {
        if self.noise.biome_sample(position) > DESERT_THRESHOLD {
            Biome::Desert
        } else {
            Biome::Plains
        }
    }

    /// The index of the highest filled voxel of a world-space column.
    ///
    /// Maps the raw sample from `[-1, 1]` into `[0, CHUNK_DIMENSION / 2]`; the
    /// `/ 4` divisor keeps terrain in the lower half of the chunk.
    pub fn column_height(&self, world_x: i32, world_z: i32) -> i32 {
        let sample = self.noise.height_sample(world_x, world_z);
        let height = ((sample + 1.0) * (CHUNK_DIMENSION as f64 / 4.0)).round() as i32;
        height.clamp(0, CHUNK_DIMENSION - 1)
    }

    /// Samples the tree-eligibility field for a world-space column.
    pub fn tree_sample(&self, world_x: i32, world_z: i32) -> f64 {
        self.noise.tree_sample(world_x, world_z)
    }

    /// The random source for the tree heights of one chunk.
    pub fn tree_rng(&self, position: ChunkCoord) -> fastrand::Rng {
        match self.tree_heights {
            TreeHeightSource::Seeded(seed) => fastrand::Rng::with_seed(
                seed ^ (position.x as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
                    ^ (position.z as i64 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F),
            ),
            TreeHeightSource::Entropy => fastrand::Rng::new(),
        }
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        TerrainGenerator::seeded(DEFAULT_SEED, DEFAULT_FREQUENCY)
    }
}
