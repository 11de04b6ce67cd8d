//! # Terrain Generation
//!
//! Fills a chunk's grid from the terrain generator in two passes:
//! 1. Column fill: one height sample per column, filled with biome voxels
//! 2. Feature pass (plains only): trees on sufficiently high tree-noise samples

use super::{Chunk, CHUNK_DIMENSION};
use crate::engine_state::voxels::{
    block::{block_kind::BlockKind, Voxel},
    generation::{Biome, TerrainGenerator},
};

/// Tree-noise samples above this value plant a tree.
pub const TREE_THRESHOLD: f64 = 0.93;
/// Columns closer than this to any chunk edge never grow trees.
pub const TREE_EDGE_MARGIN: i32 = 2;
/// Free voxels required above the surface for a tree.
pub const TREE_CLEARANCE: i32 = 6;
/// Trunk height before the random increment.
pub const BASE_TREE_HEIGHT: i32 = 5;
/// Radius of the widest canopy layers.
pub const MAX_CANOPY_RADIUS: i32 = 2;

// Canopies are written without bounds checks on X/Z; the edge margin is what keeps them inside.
const _: () = assert!(TREE_EDGE_MARGIN >= MAX_CANOPY_RADIUS);

impl Chunk {
    /// Regenerates the whole grid from the generator.
    ///
    /// Leaves the mesh untouched; call `build_mesh` afterwards.
    pub fn generate_terrain(&mut self, generator: &TerrainGenerator) {
        self.voxels.fill(Voxel::air());
        self.tree_count = 0;

        let biome = generator.biome_for(self.position);

        for x in 0..CHUNK_DIMENSION {
            for z in 0..CHUNK_DIMENSION {
                let (world_x, world_z) = self.position.world_column(x, z);
                let height = generator.column_height(world_x, world_z);
                self.fill_column(x, z, height, biome);
            }
        }

        if biome == Biome::Desert {
            log::trace!("Chunk {:?} is desert, skipping features", self.position);
            return;
        }

        let mut rng = generator.tree_rng(self.position);
        for x in 0..CHUNK_DIMENSION {
            for z in 0..CHUNK_DIMENSION {
                let Some(surface) = self.surface_height(x, z) else {
                    continue;
                };
                if self.kind_at(x, surface, z) != BlockKind::GRASS {
                    continue;
                }

                let (world_x, world_z) = self.position.world_column(x, z);
                let tree_value = generator.tree_sample(world_x, world_z);
                if tree_value > TREE_THRESHOLD
                    && Self::is_inside_tree_margin(x, z)
                    && surface < CHUNK_DIMENSION - TREE_CLEARANCE
                {
                    let tree_height = BASE_TREE_HEIGHT + rng.i32(0..2);
                    self.place_tree(x, surface + 1, z, tree_height);
                    self.tree_count += 1;
                }
            }
        }
    }

    fn fill_column(&mut self, x: i32, z: i32, height: i32, biome: Biome) {
        for y in 0..=height {
            let voxel = match biome {
                Biome::Plains if y == height => Voxel::grass(),
                Biome::Plains => Voxel::dirt(),
                Biome::Desert => Voxel::sand(),
            };
            self.set_voxel(x, y, z, voxel);
        }
    }

    /// The y of the highest solid voxel in a column, scanning down from the ceiling.
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        (0..CHUNK_DIMENSION)
            .rev()
            .find(|&y| self.kind_at(x, y, z).is_solid())
    }

    fn is_inside_tree_margin(x: i32, z: i32) -> bool {
        let allowed = TREE_EDGE_MARGIN..CHUNK_DIMENSION - TREE_EDGE_MARGIN;
        allowed.contains(&x) && allowed.contains(&z)
    }

    /// Plants a tree whose trunk starts at (x, root_y, z).
    ///
    /// The trunk is `tree_height` voxels of wood. The canopy spans from three
    /// layers below the trunk top to one layer above it: radius 2 with the four
    /// corners cut, and radius 1 on the top layer. Leaves never replace the trunk.
    /// Both are clipped at the chunk ceiling.
    fn place_tree(&mut self, x: i32, root_y: i32, z: i32, tree_height: i32) {
        for dy in 0..tree_height {
            let y = root_y + dy;
            if y >= CHUNK_DIMENSION {
                break;
            }
            self.set_voxel(x, y, z, Voxel::wood());
        }

        let trunk_end = root_y + tree_height;
        let leaf_start = trunk_end - 3;
        let leaf_end = trunk_end + 1;

        for ly in leaf_start..=leaf_end.min(CHUNK_DIMENSION - 1) {
            let radius = if ly == leaf_end { 1 } else { MAX_CANOPY_RADIUS };

            for lx in x - radius..=x + radius {
                for lz in z - radius..=z + radius {
                    let (dx, dz) = ((lx - x).abs(), (lz - z).abs());
                    if radius == MAX_CANOPY_RADIUS && dx == radius && dz == radius {
                        continue;
                    }
                    if dx == 0 && dz == 0 && ly < trunk_end {
                        continue;
                    }
                    self.set_voxel(lx, ly, lz, Voxel::leaf());
                }
            }
        }
    }
}
