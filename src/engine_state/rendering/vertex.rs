//! Vertex data structures for voxel rendering.
//!
//! This module defines the interleaved vertex format the render sink receives.

/// A vertex in the voxel rendering pipeline.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes), chunk-local
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Normal: [f32; 3] (12 bytes)
///
/// Total size: 32 bytes. The texture layer travels in a separate per-vertex
/// integer stream.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position relative to the chunk origin
    pub position: [f32; 3],
    /// UV texture coordinates (0.0-1.0)
    pub tex_coords: [f32; 2],
    /// Outward face normal
    pub normal: [f32; 3],
}

impl Vertex {
    /// The number of `f32` components in one interleaved vertex.
    pub const COMPONENTS: usize = 8;

    /// Creates a new vertex.
    pub fn new(position: [f32; 3], tex_coords: [f32; 2], normal: [f32; 3]) -> Self {
        Vertex {
            position,
            tex_coords,
            normal,
        }
    }
}
