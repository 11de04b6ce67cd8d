//! # Block Kind Module
//!
//! This module defines the closed set of block kinds that can occupy a voxel.
//! Kinds carry no per-instance state; the per-face textures live on the voxel itself.

/// Enumerates all possible block kinds in the voxel world.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum BlockKind {
    /// An empty cell. Removed voxels become this kind rather than being freed.
    #[default]
    AIR,

    /// Plain stone. Neither generated nor placeable by an edit.
    STONE,

    /// Soil that fills terrain columns below the surface.
    DIRT,

    /// The top-most soil voxel of a plains column.
    GRASS,

    /// Tree trunk.
    WOOD,

    /// Tree canopy.
    LEAF,

    /// Desert fill, uniform on every face.
    SAND,
}

impl BlockKind {
    /// Returns `true` for every kind except `AIR`.
    ///
    /// Solid voxels occlude the faces of their neighbours during meshing.
    #[inline]
    pub fn is_solid(self) -> bool {
        self != BlockKind::AIR
    }
}
