//! # Block Module
//!
//! This module provides the block registry for the voxel engine: block kinds,
//! block faces, texture identifiers, and the `Voxel` cell stored in every chunk.

use block_kind::BlockKind;
use block_side::BlockSide;
use texture::TextureId;

pub mod block_kind;
pub mod block_side;
pub mod texture;

/// The only kind that can be placed by an edit.
pub const PLACEABLE_KIND: BlockKind = BlockKind::DIRT;

/// Represents a single voxel cell in a chunk.
///
/// The per-face textures are stored redundantly on every voxel so an edit only
/// has to overwrite this struct instead of consulting a lookup table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Voxel {
    /// What occupies the cell
    pub kind: BlockKind,
    /// Texture on the +Y face
    pub top: TextureId,
    /// Texture on the four side faces
    pub side: TextureId,
    /// Texture on the -Y face
    pub bottom: TextureId,
}

impl Voxel {
    /// Creates a voxel with explicit per-face textures.
    pub const fn new(kind: BlockKind, top: TextureId, side: TextureId, bottom: TextureId) -> Self {
        Voxel {
            kind,
            top,
            side,
            bottom,
        }
    }

    /// Creates a voxel that uses the same texture on every face.
    pub const fn uniform(kind: BlockKind, texture: TextureId) -> Self {
        Voxel::new(kind, texture, texture, texture)
    }

    /// An empty cell.
    pub const fn air() -> Self {
        Voxel::uniform(BlockKind::AIR, TextureId::GRASS_TOP)
    }

    /// Soil with grass textures, used to fill plains columns.
    pub const fn dirt() -> Self {
        Voxel::new(
            BlockKind::DIRT,
            TextureId::GRASS_TOP,
            TextureId::GRASS_SIDE,
            TextureId::GRASS_BOTTOM,
        )
    }

    /// The surface voxel of a plains column.
    pub const fn grass() -> Self {
        Voxel::new(
            BlockKind::GRASS,
            TextureId::GRASS_TOP,
            TextureId::GRASS_SIDE,
            TextureId::GRASS_BOTTOM,
        )
    }

    /// Desert fill.
    pub const fn sand() -> Self {
        Voxel::uniform(BlockKind::SAND, TextureId::SAND)
    }

    /// A trunk segment.
    pub const fn wood() -> Self {
        Voxel::new(
            BlockKind::WOOD,
            TextureId::WOOD_TOP,
            TextureId::WOOD,
            TextureId::WOOD_TOP,
        )
    }

    /// A canopy cell.
    pub const fn leaf() -> Self {
        Voxel::uniform(BlockKind::LEAF, TextureId::LEAF)
    }

    /// The voxel written by a place edit.
    pub const fn placeable() -> Self {
        Voxel::dirt()
    }

    /// Whether this voxel occludes its neighbours.
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.kind.is_solid()
    }

    /// The texture drawn on the given face.
    #[inline]
    pub fn texture_for(&self, side: BlockSide) -> TextureId {
        match side {
            BlockSide::TOP => self.top,
            BlockSide::BOTTOM => self.bottom,
            _ => self.side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_pick_their_texture() {
        let wood = Voxel::wood();
        assert_eq!(wood.texture_for(BlockSide::TOP), TextureId::WOOD_TOP);
        assert_eq!(wood.texture_for(BlockSide::BOTTOM), TextureId::WOOD_TOP);
        for side in [BlockSide::FRONT, BlockSide::BACK, BlockSide::LEFT, BlockSide::RIGHT] {
            assert_eq!(wood.texture_for(side), TextureId::WOOD);
        }
    }

    #[test]
    fn placeable_matches_placeable_kind() {
        assert_eq!(Voxel::placeable().kind, PLACEABLE_KIND);
        assert!(!Voxel::air().is_solid());
        assert!(Voxel::default() == Voxel::air());
    }
}
