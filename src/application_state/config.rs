//! # World Configuration
//!
//! Runtime settings for a session, read from an optional JSON file.
//!
//! The file is located from the first command-line argument, falling back to
//! the `VOXEL_WORLD_CONFIG` environment variable. Any field the file omits
//! takes its default, and a missing file location means all defaults.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use cgmath::Point3;
use serde::Deserialize;

use crate::engine_state::{
    camera_state::camera::{DEFAULT_SENSITIVITY, DEFAULT_SPEED},
    voxels::{
        chunk_manager::DEFAULT_RENDER_DISTANCE,
        generation::{
            SimplexTerrainNoise, TerrainGenerator, TreeHeightSource, DEFAULT_FREQUENCY,
            DEFAULT_SEED,
        },
    },
};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "VOXEL_WORLD_CONFIG";

/// Settings for one session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Seed of the terrain noise field
    pub seed: u32,
    /// Render distance in chunks; clamped by the chunk manager
    pub render_distance: i32,
    /// Base frequency of the terrain noise field
    pub terrain_frequency: f64,
    /// Whether tree heights are derived from the seed or drawn from system entropy
    pub deterministic_trees: bool,
    /// Directory holding the block textures; skipped when absent
    pub texture_root: Option<PathBuf>,
    /// Where the camera starts
    pub camera_start: [f32; 3],
    /// Camera movement speed in units per second
    pub camera_speed: f32,
    /// Degrees of rotation per unit of mouse motion
    pub mouse_sensitivity: f32,
    /// Number of ticks the headless session runs
    pub session_frames: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: DEFAULT_SEED,
            render_distance: DEFAULT_RENDER_DISTANCE,
            terrain_frequency: DEFAULT_FREQUENCY,
            deterministic_trees: true,
            texture_root: None,
            camera_start: [0.0, 15.0, 0.0],
            camera_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            session_frames: 240,
        }
    }
}

impl WorldConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: WorldConfig =
            serde_json::from_str(json).context("Invalid world configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Failed to load config file {}", path.display()))
    }

    /// Loads the configuration named by the command line or environment, or the
    /// defaults if neither names one.
    ///
    /// # Arguments
    /// * `args` - The command-line arguments, excluding the program name
    pub fn from_env(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let path = args
            .next()
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok())
            .map(PathBuf::from);

        match path {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::load(&path)
            }
            None => {
                log::info!("No configuration given, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.terrain_frequency.is_finite() && self.terrain_frequency > 0.0,
            "terrain_frequency must be positive, got {}",
            self.terrain_frequency
        );
        anyhow::ensure!(
            self.camera_start.iter().all(|c| c.is_finite()),
            "camera_start must be finite"
        );
        Ok(())
    }

    /// Builds the terrain generator these settings describe.
    pub fn generator(&self) -> TerrainGenerator {
        let tree_heights = if self.deterministic_trees {
            TreeHeightSource::Seeded(self.seed as u64)
        } else {
            TreeHeightSource::Entropy
        };
        TerrainGenerator::new(
            Box::new(SimplexTerrainNoise::new(self.seed, self.terrain_frequency)),
            tree_heights,
        )
    }

    /// The camera start position.
    pub fn camera_start(&self) -> Point3<f32> {
        Point3::from(self.camera_start)
    }
}
