//! # Rendering
//!
//! The boundary between the voxel world and the graphics layer.
//!
//! The graphics API binding itself lives outside this crate. The world talks to
//! it through the `RenderSink` trait: meshes are uploaded after every (re)build,
//! released when a chunk unloads, and drawn once per frame with a pure
//! translation transform.

use std::collections::HashMap;

use cgmath::Matrix4;

use crate::engine_state::voxels::chunk::ChunkCoord;

pub mod meshing;
mod vertex;

pub use meshing::ChunkMesh;
pub use vertex::Vertex;

/// Receives chunk meshes and draw requests.
///
/// Buffers are only borrowed for the duration of a call; a sink that needs
/// them later must copy them.
pub trait RenderSink {
    /// Uploads (or re-uploads) the buffers of a chunk.
    fn upload_chunk(&mut self, position: ChunkCoord, mesh: &ChunkMesh);

    /// Releases any resources held for a chunk that has been unloaded.
    fn release_chunk(&mut self, position: ChunkCoord);

    /// Draws a previously uploaded chunk with the given world transform.
    fn draw_chunk(&mut self, position: ChunkCoord, transform: &Matrix4<f32>);
}

/// Bookkeeping for one chunk resident in a `LoggingRenderSink`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidentMesh {
    /// Size of the uploaded vertex buffer in bytes
    pub vertex_bytes: usize,
    /// Number of uploaded indices
    pub index_count: usize,
}

/// A headless sink that tracks what a GPU backend would hold and logs traffic.
#[derive(Debug, Default)]
pub struct LoggingRenderSink {
    resident: HashMap<ChunkCoord, ResidentMesh>,
    uploads: usize,
    releases: usize,
    draws: usize,
    drawn_indices: usize,
}

impl LoggingRenderSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The chunks currently holding uploaded buffers.
    pub fn resident(&self) -> &HashMap<ChunkCoord, ResidentMesh> {
        &self.resident
    }

    /// Total upload calls received.
    pub fn uploads(&self) -> usize {
        self.uploads
    }

    /// Total release calls received.
    pub fn releases(&self) -> usize {
        self.releases
    }

    /// Total draw calls received.
    pub fn draws(&self) -> usize {
        self.draws
    }

    /// Sum of the index counts of every draw call.
    pub fn drawn_indices(&self) -> usize {
        self.drawn_indices
    }

    /// Total bytes of vertex data currently resident.
    pub fn resident_vertex_bytes(&self) -> usize {
        self.resident.values().map(|mesh| mesh.vertex_bytes).sum()
    }
}

impl RenderSink for LoggingRenderSink {
    fn upload_chunk(&mut self, position: ChunkCoord, mesh: &ChunkMesh) {
        self.uploads += 1;
        let resident = ResidentMesh {
            vertex_bytes: mesh.vertex_bytes().len(),
            index_count: mesh.indices.len(),
        };
        log::trace!("Upload {:?}: {:?}", position, resident);
        self.resident.insert(position, resident);
    }

    fn release_chunk(&mut self, position: ChunkCoord) {
        self.releases += 1;
        if self.resident.remove(&position).is_none() {
            log::warn!("Release of chunk {:?} that was never uploaded", position);
        }
    }

    fn draw_chunk(&mut self, position: ChunkCoord, _transform: &Matrix4<f32>) {
        match self.resident.get(&position) {
            Some(mesh) => {
                self.draws += 1;
                self.drawn_indices += mesh.index_count;
            }
            None => log::warn!("Draw of chunk {:?} that is not resident", position),
        }
    }
}
