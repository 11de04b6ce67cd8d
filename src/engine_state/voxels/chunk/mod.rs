//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a 32x32x32 column of voxels that
//! generates its own terrain, builds a face-culled mesh from its grid, and
//! applies single-voxel edits.
//!
//! ## Storage
//!
//! Voxels live in one flat, contiguous buffer of `CHUNK_SIZE` cells indexed by
//! `x * CHUNK_PLANE_SIZE + y * CHUNK_DIMENSION + z`. Generation and meshing both
//! scan in that order. A chunk covers the full vertical extent of the world;
//! there is no vertical chunk splitting.
//!
//! ## Lifecycle
//!
//! Construction is split into explicit phases so each can be exercised on its own:
//! 1. `Chunk::empty` allocates an all-air grid
//! 2. `generate_terrain` fills it from the terrain generator
//! 3. `build_mesh` derives the vertex and index buffers
//! 4. `sync_to_sink` hands the buffers to the renderer
//!
//! `Chunk::generate` runs phases 1-3. The mesh is rebuilt in full after every
//! edit, so the buffers always describe the current grid.

use cgmath::{Matrix4, Point3, Vector3};

use super::block::{block_kind::BlockKind, block_side::BlockSide, Voxel, PLACEABLE_KIND};
use super::chunk_manager::MAX_RENDER_DISTANCE;
use super::generation::TerrainGenerator;
use crate::engine_state::rendering::{ChunkMesh, RenderSink};

mod terrain;

/// The edge length of a chunk in voxels.
pub const CHUNK_DIMENSION: i32 = 32;
/// The number of voxels in a single plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of voxels in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// The furthest chunk index, along either horizontal axis, a viewer can occupy.
///
/// `ChunkCoord::containing` clamps onto `[-WORLD_CHUNK_LIMIT, WORLD_CHUNK_LIMIT]`.
/// The bound leaves room for the widest streaming window, so every voxel of a
/// streamed chunk has a world coordinate that fits in an `i32`.
pub const WORLD_CHUNK_LIMIT: i32 = i32::MAX / CHUNK_DIMENSION - 2 * MAX_RENDER_DISTANCE;

/// Identifies a chunk on the horizontal chunk grid.
///
/// Ordered and hashable so it can key the chunk map directly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    /// Chunk index along world X
    pub x: i32,
    /// Chunk index along world Z
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// The chunk containing a world-space position.
    ///
    /// Positions beyond `WORLD_CHUNK_LIMIT` chunks from the origin map onto the
    /// limit; a NaN component maps to chunk 0.
    pub fn containing(position: Point3<f32>) -> Self {
        let axis = |value: f32| {
            ((value / CHUNK_DIMENSION as f32).floor() as i32)
                .clamp(-WORLD_CHUNK_LIMIT, WORLD_CHUNK_LIMIT)
        };
        ChunkCoord {
            x: axis(position.x),
            z: axis(position.z),
        }
    }

    /// The world-space position of this chunk's minimum corner.
    pub fn world_origin(&self) -> Vector3<f32> {
        let origin = self.voxel_origin();
        Vector3::new(origin.0 as f32, 0.0, origin.1 as f32)
    }

    /// The voxel-space X/Z of this chunk's minimum corner, saturating at the `i32` range.
    pub fn voxel_origin(&self) -> (i32, i32) {
        (
            self.x.saturating_mul(CHUNK_DIMENSION),
            self.z.saturating_mul(CHUNK_DIMENSION),
        )
    }

    /// The world-space X/Z of a column inside this chunk.
    pub fn world_column(&self, local_x: i32, local_z: i32) -> (i32, i32) {
        let (origin_x, origin_z) = self.voxel_origin();
        (
            origin_x.saturating_add(local_x),
            origin_z.saturating_add(local_z),
        )
    }

    /// Chebyshev distance between two chunk coordinates.
    pub fn chebyshev_distance(&self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

/// The result of a single-voxel edit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// A solid voxel was cleared to air
    Removed,
    /// The placeable kind was written
    Placed,
    /// The request matched no recognised transition; the mesh was still rebuilt
    Unchanged,
    /// The coordinate lies outside the chunk; nothing happened
    OutOfBounds,
}

/// Per-chunk counters reported upward to the chunk manager.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChunkCounters {
    /// Vertices in the current mesh
    pub vertices: u64,
    /// Triangles in the current mesh
    pub triangles: u64,
    /// Trees planted during generation
    pub trees: u64,
}

/// Represents a 32x32x32 column of voxels in the world.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not voxel coordinates).
    pub position: ChunkCoord,

    /// Flat voxel buffer of `CHUNK_SIZE` cells.
    voxels: Vec<Voxel>,

    /// Mesh derived from `voxels` by the last rebuild.
    mesh: ChunkMesh,

    /// Trees planted by the last terrain generation.
    tree_count: u32,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all voxels are air) with an empty mesh.
    pub fn empty(position: ChunkCoord) -> Self {
        Chunk {
            position,
            voxels: vec![Voxel::air(); CHUNK_SIZE as usize],
            mesh: ChunkMesh::default(),
            tree_count: 0,
        }
    }

    /// Creates a chunk, generates its terrain and builds its initial mesh.
    ///
    /// Generation is a pure function of the coordinate and the generator, so
    /// this cannot fail.
    pub fn generate(position: ChunkCoord, generator: &TerrainGenerator) -> Self {
        let mut chunk = Chunk::empty(position);
        chunk.generate_terrain(generator);
        chunk.build_mesh();
        chunk
    }

    /// Converts chunk-relative coordinates into an index of the voxel buffer.
    ///
    /// # Returns
    /// `None` if any coordinate lies outside `[0, CHUNK_DIMENSION)`.
    #[inline]
    pub fn index_of(x: i32, y: i32, z: i32) -> Option<usize> {
        if Self::in_bounds(x, y, z) {
            Some((x * CHUNK_PLANE_SIZE + y * CHUNK_DIMENSION + z) as usize)
        } else {
            None
        }
    }

    /// Whether chunk-relative coordinates address a voxel of this chunk.
    #[inline]
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        let range = 0..CHUNK_DIMENSION;
        range.contains(&x) && range.contains(&y) && range.contains(&z)
    }

    /// Gets the voxel at chunk-relative coordinates, or `None` when out of bounds.
    pub fn get_voxel(&self, x: i32, y: i32, z: i32) -> Option<&Voxel> {
        Self::index_of(x, y, z).map(|index| &self.voxels[index])
    }

    /// Gets the kind at chunk-relative coordinates; out-of-bounds reads as air.
    pub fn kind_at(&self, x: i32, y: i32, z: i32) -> BlockKind {
        self.get_voxel(x, y, z)
            .map(|voxel| voxel.kind)
            .unwrap_or(BlockKind::AIR)
    }

    /// Writes a voxel without touching the mesh. Out-of-bounds writes are ignored.
    pub(crate) fn set_voxel(&mut self, x: i32, y: i32, z: i32, voxel: Voxel) {
        if let Some(index) = Self::index_of(x, y, z) {
            self.voxels[index] = voxel;
        }
    }

    /// The whole voxel buffer, in storage order.
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Whether the given face of the voxel at (x, y, z) is hidden by a neighbour.
    ///
    /// A face is occluded only when its neighbour lies inside this chunk and is
    /// solid. Faces on the chunk boundary are always drawn, whatever the adjacent
    /// chunk holds.
    pub fn is_face_occluded(&self, x: i32, y: i32, z: i32, side: BlockSide) -> bool {
        let offset = side.neighbor_offset();
        self.get_voxel(x + offset.x, y + offset.y, z + offset.z)
            .is_some_and(Voxel::is_solid)
    }

    /// Rebuilds the mesh from the current voxel grid.
    pub fn build_mesh(&mut self) {
        self.mesh = ChunkMesh::build(self);
        log::trace!(
            "Meshed chunk {:?}: {} vertices, {} triangles",
            self.position,
            self.mesh.vertex_count(),
            self.mesh.triangle_count()
        );
    }

    /// The mesh derived from the grid by the last rebuild.
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// Number of trees planted during generation.
    pub fn tree_count(&self) -> u32 {
        self.tree_count
    }

    /// The counters this chunk contributes to the world totals.
    pub fn counters(&self) -> ChunkCounters {
        ChunkCounters {
            vertices: self.mesh.vertex_count() as u64,
            triangles: self.mesh.triangle_count() as u64,
            trees: self.tree_count as u64,
        }
    }

    /// The world-space translation the renderer applies to this chunk's mesh.
    pub fn transform(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position.world_origin())
    }

    /// The voxel-space position of the chunk's minimum corner.
    pub fn world_voxel_origin(&self) -> Point3<i32> {
        let (x, z) = self.position.voxel_origin();
        Point3::new(x, 0, z)
    }

    /// Hands the current mesh buffers to the render sink.
    pub fn sync_to_sink(&self, sink: &mut dyn RenderSink) {
        sink.upload_chunk(self.position, &self.mesh);
    }

    /// Edits a single voxel and rebuilds the mesh.
    ///
    /// Two transitions are recognised: clearing a solid voxel to `AIR`, and
    /// writing `PLACEABLE_KIND` with its fixed textures. Any other request
    /// changes nothing, but the mesh is rebuilt regardless. Out-of-range
    /// coordinates are a no-op.
    pub fn modify_voxel(&mut self, x: i32, y: i32, z: i32, kind: BlockKind) -> EditOutcome {
        let Some(index) = Self::index_of(x, y, z) else {
            return EditOutcome::OutOfBounds;
        };

        let voxel = &mut self.voxels[index];
        let outcome = if kind == BlockKind::AIR && voxel.is_solid() {
            voxel.kind = BlockKind::AIR;
            EditOutcome::Removed
        } else if kind == PLACEABLE_KIND {
            *voxel = Voxel::placeable();
            EditOutcome::Placed
        } else {
            EditOutcome::Unchanged
        };

        self.build_mesh();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_coord_floors_negative_positions() {
        assert_eq!(ChunkCoord::containing(Point3::new(0.0, 50.0, 31.9)), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::containing(Point3::new(-0.1, 0.0, 32.0)), ChunkCoord::new(-1, 1));
        assert_eq!(ChunkCoord::containing(Point3::new(-32.0, 0.0, -32.1)), ChunkCoord::new(-1, -2));
    }

    #[test]
    fn far_positions_clamp_to_the_world_limit() {
        let limit = ChunkCoord::new(WORLD_CHUNK_LIMIT, -WORLD_CHUNK_LIMIT);
        assert_eq!(ChunkCoord::containing(Point3::new(1.0e11, 0.0, -1.0e11)), limit);
        assert_eq!(
            ChunkCoord::containing(Point3::new(f32::INFINITY, 0.0, f32::NEG_INFINITY)),
            limit
        );
        assert_eq!(
            ChunkCoord::containing(Point3::new(f32::NAN, 0.0, 3.0)),
            ChunkCoord::new(0, 0)
        );

        // The furthest streamed column still has an exact world coordinate.
        let edge = ChunkCoord::new(WORLD_CHUNK_LIMIT + MAX_RENDER_DISTANCE, 0);
        let (world_x, _) = edge.world_column(CHUNK_DIMENSION - 1, 0);
        assert_eq!(
            world_x as i64,
            (WORLD_CHUNK_LIMIT + MAX_RENDER_DISTANCE) as i64 * CHUNK_DIMENSION as i64 + 31
        );
        assert!(world_x < i32::MAX);
    }

    #[test]
    fn chebyshev_distance_is_max_axis_distance() {
        let origin = ChunkCoord::new(0, 0);
        assert_eq!(origin.chebyshev_distance(ChunkCoord::new(3, -5)), 5);
        assert_eq!(ChunkCoord::new(-2, 4).chebyshev_distance(ChunkCoord::new(-2, 4)), 0);
    }

    #[test]
    fn index_layout_is_x_major() {
        assert_eq!(Chunk::index_of(0, 0, 0), Some(0));
        assert_eq!(Chunk::index_of(0, 0, 1), Some(1));
        assert_eq!(Chunk::index_of(0, 1, 0), Some(CHUNK_DIMENSION as usize));
        assert_eq!(Chunk::index_of(1, 0, 0), Some(CHUNK_PLANE_SIZE as usize));
        assert_eq!(Chunk::index_of(31, 31, 31), Some(CHUNK_SIZE as usize - 1));
        assert_eq!(Chunk::index_of(32, 0, 0), None);
        assert_eq!(Chunk::index_of(0, -1, 0), None);
    }

    #[test]
    fn out_of_bounds_edits_are_explicit_no_ops() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        chunk.set_voxel(0, 0, 0, Voxel::sand());
        chunk.build_mesh();
        let before = chunk.mesh().clone();

        for (x, y, z) in [(-1, 0, 0), (0, 32, 0), (0, 0, 40)] {
            assert_eq!(chunk.modify_voxel(x, y, z, BlockKind::AIR), EditOutcome::OutOfBounds);
            assert_eq!(chunk.modify_voxel(x, y, z, PLACEABLE_KIND), EditOutcome::OutOfBounds);
        }
        assert_eq!(chunk.mesh(), &before);
    }

    #[test]
    fn edit_transitions() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));

        assert_eq!(chunk.modify_voxel(4, 4, 4, BlockKind::AIR), EditOutcome::Unchanged);
        assert_eq!(chunk.modify_voxel(4, 4, 4, PLACEABLE_KIND), EditOutcome::Placed);
        assert_eq!(chunk.get_voxel(4, 4, 4), Some(&Voxel::placeable()));
        assert_eq!(chunk.mesh().vertex_count(), 24);

        assert_eq!(chunk.modify_voxel(4, 4, 4, BlockKind::LEAF), EditOutcome::Unchanged);
        assert_eq!(chunk.modify_voxel(4, 4, 4, BlockKind::STONE), EditOutcome::Unchanged);
        assert_eq!(chunk.kind_at(4, 4, 4), PLACEABLE_KIND);

        assert_eq!(chunk.modify_voxel(4, 4, 4, BlockKind::AIR), EditOutcome::Removed);
        assert_eq!(chunk.kind_at(4, 4, 4), BlockKind::AIR);
        assert!(chunk.mesh().is_empty());
    }

    #[test]
    fn transform_translates_to_world_origin() {
        let chunk = Chunk::empty(ChunkCoord::new(-2, 3));
        let origin = chunk.transform() * cgmath::Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(origin, cgmath::Vector4::new(-64.0, 0.0, 96.0, 1.0));
        assert_eq!(chunk.world_voxel_origin(), Point3::new(-64, 0, 96));
    }
}
