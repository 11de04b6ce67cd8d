//! # Voxel World Entry Point
//!
//! Calls into the library's `run()` function to load the configuration and run
//! a headless session.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

fn main() -> anyhow::Result<()> {
    voxel_world::run()
}
