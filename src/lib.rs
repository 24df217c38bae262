#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! Procedural voxel terrain generation for a chunked, GPU-rendered world.
//!
//! A seeded noise field is turned into a heightfield, the heightfield fills a
//! fixed grid of 16x16x16 chunks, and every chunk is packed into a swizzled
//! word buffer with hidden faces already culled. A view frustum built from the
//! camera selects the chunks worth drawing.
//!
//! ## Key Modules
//!
//! * `config` - JSON configuration with defaults for every field
//! * `engine_state` - The world, its chunks and blocks, and the camera
//! * `error` - The crate error type
//!
//! ## Usage
//!
//! ```rust
//! use voxel_terrain::engine_state::voxels::noise::{NoiseField, NoiseSettings};
//! use voxel_terrain::engine_state::voxels::world::World;
//!
//! let settings = NoiseSettings { seed: Some(42), ..NoiseSettings::default() };
//! let noise = NoiseField::new(&settings)?;
//! let world = World::new(&noise, 6)?;
//!
//! let upload: &[u8] = world.terrain_bytes();
//! assert_eq!(upload.len(), 36 * 4096 * 4);
//! # Ok::<(), voxel_terrain::error::VoxelError>(())
//! ```
//!
//! ## Determinism
//!
//! Generation is a pure function of the configuration. The same seed and
//! settings always yield the same noise map and a byte-identical terrain
//! buffer.

use log::{error, info};

use config::EngineConfig;
use engine_state::EngineState;

pub mod config;
pub mod engine_state;
pub mod error;

/// Initializes logging, generates the configured world and logs a summary.
///
/// The first command line argument, if any, is the path of a JSON
/// configuration file. Without one the defaults are used.
///
/// # Errors
/// Returns the first configuration or generation error encountered.
pub fn run() -> error::Result<EngineState> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => {
            info!("No configuration file given, using defaults");
            EngineConfig::default()
        }
    };

    let engine_state = EngineState::new(&config).inspect_err(|err| {
        error!("World generation failed: {err}");
    })?;

    let world = engine_state.world();
    let active = world.chunks().iter().filter(|chunk| chunk.is_active()).count();
    let solid: usize = world.chunks().iter().map(|chunk| chunk.solid_block_count()).sum();
    info!(
        "{} of {} chunks active, {} solid blocks, {} chunks in view, {} bytes of terrain",
        active,
        world.chunk_count(),
        solid,
        engine_state.visible_chunk_indices().len(),
        engine_state.terrain_bytes().len()
    );

    Ok(engine_state)
}
