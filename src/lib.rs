#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A chunked voxel world: procedural terrain, face-culled chunk meshes, a
//! streaming window of chunks around the viewer, and ray-picked voxel edits.
//!
//! ## Key Modules
//!
//! * `application_state` - Configuration, input handling and the tick loop
//! * `engine_state` - The camera, the voxel world, and the render sink boundary
//!
//! ## Architecture
//!
//! The crate stops at the `RenderSink` trait. A graphics backend implements it
//! to receive chunk meshes and per-chunk transforms; the bundled
//! `LoggingRenderSink` tracks what a backend would hold, which is enough to run
//! a session headless.
//!
//! ## Usage
//!
//! ```no_run
//! fn main() -> anyhow::Result<()> {
//!     voxel_world::run()
//! }
//! ```

use anyhow::Context;
use log::info;

use application_state::config::WorldConfig;
use engine_state::{rendering::LoggingRenderSink, voxels::block::texture::TextureCatalog};

pub mod application_state;
pub mod engine_state;

/// Runs a headless session configured from the command line or environment.
///
/// Logging is controlled by `RUST_LOG`.
pub fn run() -> anyhow::Result<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = WorldConfig::from_env(std::env::args().skip(1))
        .context("Failed to load configuration")?;

    if let Some(root) = &config.texture_root {
        let textures = TextureCatalog::new(root)
            .resolve()
            .inspect_err(|error| log::error!("{:#}", error))?;
        info!("Resolved {} textures under {}", textures.len(), root.display());
    }

    let stats = application_state::run_session(&config, LoggingRenderSink::new());
    stats.log();

    Ok(())
}
