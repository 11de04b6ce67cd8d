//! # Voxel World Core
//!
//! This module contains the voxel world itself: what a voxel is, how chunks of
//! voxels are generated and meshed, and how chunks are streamed around the viewer.
//!
//! ## Architecture
//!
//! * **Block**: The block kinds, per-face textures, and the texture catalog
//! * **Generation**: The noise field and random source terrain generation reads
//! * **Chunk**: Fixed-size 32³ voxel columns that generate, mesh and edit themselves
//! * **Chunk Manager**: Owns the loaded chunks and keeps the aggregate counters
//! * **Picking**: Maps a view ray onto a voxel edit
//!
//! ## Data Flow
//!
//! 1. The chunk manager receives the viewer position each tick
//! 2. Far chunks are released, missing chunks are generated and meshed
//! 3. Meshes are uploaded to the render sink
//! 4. Edits are dispatched along the view ray, rebuilding and re-uploading one chunk
//!
//! Everything runs synchronously on the calling thread.

pub mod block;
pub mod chunk;
pub mod chunk_manager;
pub mod generation;
pub mod picking;
