//! Mesh data structures and the visible-surface extraction that fills them.
//!
//! Meshing is naive per-voxel face culling rather than greedy merging: every
//! solid voxel emits one quad for each face whose neighbour is not solid.

use cgmath::Point3;

use crate::engine_state::{
    rendering::Vertex,
    voxels::{
        block::{block_side::BlockSide, texture::TextureId},
        chunk::{Chunk, CHUNK_DIMENSION},
    },
};

/// The vertex, texture-layer and index buffers of one chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// Interleaved vertex data
    pub vertices: Vec<Vertex>,
    /// One texture-layer index per vertex
    pub texture_layers: Vec<i32>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Builds the mesh for a chunk from its current voxel grid.
    ///
    /// Scans the grid in storage order (x, then y, then z) and emits faces in
    /// `BlockSide::all()` order, so the output is fully determined by the grid.
    pub fn build(chunk: &Chunk) -> Self {
        let mut mesh = ChunkMesh::default();

        for x in 0..CHUNK_DIMENSION {
            for y in 0..CHUNK_DIMENSION {
                for z in 0..CHUNK_DIMENSION {
                    let Some(voxel) = chunk.get_voxel(x, y, z) else {
                        continue;
                    };
                    if !voxel.is_solid() {
                        continue;
                    }

                    for side in BlockSide::all() {
                        if chunk.is_face_occluded(x, y, z, side) {
                            continue;
                        }
                        mesh.push_face(Point3::new(x, y, z), side, voxel.texture_for(side));
                    }
                }
            }
        }

        mesh
    }

    /// Appends one quad for the given face of the voxel at `origin`.
    pub fn push_face(&mut self, origin: Point3<i32>, side: BlockSide, texture: TextureId) {
        let first_vertex = self.vertices.len() as u32;
        let normal = side.normal();

        for (corner, uv) in side.corners().iter().zip(side.uvs()) {
            self.vertices.push(Vertex::new(
                [
                    corner[0] + origin.x as f32,
                    corner[1] + origin.y as f32,
                    corner[2] + origin.z as f32,
                ],
                *uv,
                normal,
            ));
            self.texture_layers.push(texture.layer());
        }

        self.indices
            .extend_from_slice(&Self::generate_face_indices(first_vertex));
    }

    /// The six indices forming the two triangles of a quad whose first vertex is
    /// `first_vertex`.
    pub fn generate_face_indices(first_vertex: u32) -> [u32; 6] {
        [
            first_vertex,
            first_vertex + 1,
            first_vertex + 2,
            first_vertex,
            first_vertex + 2,
            first_vertex + 3,
        ]
    }

    /// Number of vertices in the mesh (4 per face).
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Number of triangles in the mesh (2 per face).
    pub fn triangle_count(&self) -> u32 {
        (self.indices.len() / 3) as u32
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> u32 {
        self.vertex_count() / 4
    }

    /// Whether the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The interleaved vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The texture-layer stream as raw bytes.
    pub fn texture_layer_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texture_layers)
    }

    /// The index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
