//! # Texture Module
//!
//! Texture identifiers referenced by voxels, and the catalog that maps them to
//! image assets on disk. The core never loads image data itself; it only refers
//! to textures by identifier and hands the layer index to the render sink.

use std::path::{Path, PathBuf};

use anyhow::Context;

/// Identifies one layer of the block texture array.
///
/// The discriminant is the texture-layer index written next to every vertex.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum TextureId {
    /// Green top of a grass voxel.
    #[default]
    GRASS_TOP = 0,
    /// Side of a grass voxel, grass over dirt.
    GRASS_SIDE = 1,
    /// Bottom of a grass voxel, plain dirt.
    GRASS_BOTTOM = 2,
    /// Bark on the sides of a trunk.
    WOOD = 3,
    /// Canopy leaves.
    LEAF = 4,
    /// Sand, used on every face.
    SAND = 5,
    /// Rings on the top and bottom of a trunk.
    WOOD_TOP = 6,
}

impl TextureId {
    /// Every texture layer, in layer order.
    pub fn all() -> [TextureId; 7] {
        [
            TextureId::GRASS_TOP,
            TextureId::GRASS_SIDE,
            TextureId::GRASS_BOTTOM,
            TextureId::WOOD,
            TextureId::LEAF,
            TextureId::SAND,
            TextureId::WOOD_TOP,
        ]
    }

    /// The layer index sent to the render sink for this texture.
    #[inline]
    pub fn layer(self) -> i32 {
        self as i32
    }

    /// The asset file name for this texture.
    pub fn asset_name(self) -> &'static str {
        match self {
            TextureId::GRASS_TOP => "grass_block_top.png",
            TextureId::GRASS_SIDE => "grass_block_side.png",
            TextureId::GRASS_BOTTOM => "dirt.png",
            TextureId::WOOD => "spruce_log.png",
            TextureId::LEAF => "oak_leaves.png",
            TextureId::SAND => "sand.png",
            TextureId::WOOD_TOP => "spruce_log_top.png",
        }
    }
}

/// A texture identifier paired with the asset file that backs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTexture {
    /// The texture layer
    pub id: TextureId,
    /// Full path of the image asset
    pub path: PathBuf,
}

/// Maps texture identifiers to image assets below a root directory.
///
/// Resolution happens once at startup; a missing file is reported as an error
/// rather than producing chunks that cannot be drawn.
#[derive(Debug, Clone)]
pub struct TextureCatalog {
    root: PathBuf,
}

impl TextureCatalog {
    /// Creates a catalog rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory the assets are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The expected path of the asset for `id`.
    pub fn path_for(&self, id: TextureId) -> PathBuf {
        self.root.join(id.asset_name())
    }

    /// Checks that every texture asset exists and returns the resolved paths.
    ///
    /// # Errors
    /// Fails on the first asset that is missing or is not a regular file.
    pub fn resolve(&self) -> anyhow::Result<Vec<ResolvedTexture>> {
        let mut resolved = Vec::with_capacity(TextureId::all().len());
        for id in TextureId::all() {
            let path = self.path_for(id);
            let metadata = std::fs::metadata(&path)
                .with_context(|| format!("texture {:?} not found at {}", id, path.display()))?;
            if !metadata.is_file() {
                anyhow::bail!("texture {:?} at {} is not a file", id, path.display());
            }
            log::debug!("Resolved texture {:?} -> {}", id, path.display());
            resolved.push(ResolvedTexture { id, path });
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_indices_are_stable() {
        for (expected, id) in TextureId::all().into_iter().enumerate() {
            assert_eq!(id.layer(), expected as i32);
        }
    }

    #[test]
    fn every_texture_has_its_own_asset() {
        let names: std::collections::HashSet<&str> =
            TextureId::all().into_iter().map(TextureId::asset_name).collect();
        assert_eq!(names.len(), TextureId::all().len());
        assert!(names.iter().all(|name| name.ends_with(".png")));
        assert!(!names.contains("missing.png"));
        assert_eq!(TextureId::GRASS_BOTTOM.asset_name(), "dirt.png");
        assert_eq!(TextureId::WOOD_TOP.asset_name(), "spruce_log_top.png");
    }

    #[test]
    fn resolving_a_missing_root_fails() {
        let catalog = TextureCatalog::new("/definitely/not/a/real/texture/root");
        let error = catalog.resolve().unwrap_err();
        assert!(format!("{:#}", error).contains("GRASS_TOP"));
    }

    #[test]
    fn resolves_existing_assets() {
        let root = std::env::temp_dir().join(format!("voxel-world-textures-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        for id in TextureId::all() {
            std::fs::write(root.join(id.asset_name()), b"png").unwrap();
        }

        let resolved = TextureCatalog::new(&root).resolve().unwrap();
        assert_eq!(resolved.len(), 7);
        assert_eq!(resolved[4].id, TextureId::LEAF);
        assert_eq!(resolved[4].path, root.join("oak_leaves.png"));

        std::fs::remove_dir_all(&root).unwrap();
    }
}
