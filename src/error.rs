//! # Error Module
//!
//! Recoverable errors raised while configuring and generating a world.
//!
//! Only configuration problems are reported through [`VoxelError`]. Broken
//! invariants (an out-of-range material id, block coordinate or chunk index)
//! are programming errors and panic at the point of detection instead, since
//! continuing with corrupted voxel data would silently corrupt the terrain
//! buffer handed to the renderer.

use thiserror::Error;

/// Errors returned by noise, world and engine construction.
#[derive(Debug, Error)]
pub enum VoxelError {
    /// The requested noise dimensionality is not 1, 2 or 3.
    #[error("invalid noise mode: {0} (expected 1, 2 or 3 dimensions)")]
    InvalidNoiseMode(u32),

    /// A construction parameter is out of its accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VoxelError>;
