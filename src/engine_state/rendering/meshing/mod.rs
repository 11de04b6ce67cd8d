//! Mesh generation for voxel rendering.
//!
//! Converts a chunk's voxel grid into the buffers the render sink consumes.
//! Every edit triggers a full rebuild; there is no incremental patching of
//! existing buffers, which keeps the buffers trivially consistent with the grid.

mod mesh;

pub use mesh::ChunkMesh;
