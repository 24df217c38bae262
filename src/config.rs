//! # Configuration
//!
//! Engine settings loaded from a JSON file. Every section and field is
//! optional; anything left out falls back to its default.
//!
//! ```json
//! {
//!     "noise": { "seed": 42, "octave_count": 4 },
//!     "world": { "render_distance": 4 },
//!     "camera": { "pitch_degrees": -20.0 }
//! }
//! ```

use std::fs;
use std::path::Path;

use cgmath::Deg;
use log::info;
use serde::{Deserialize, Serialize};

use crate::engine_state::camera_state::camera::Projection;
use crate::engine_state::voxels::noise::NoiseSettings;
use crate::error::{Result, VoxelError};

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Heightfield synthesis parameters.
    pub noise: NoiseSettings,
    /// World grid parameters.
    pub world: WorldSettings,
    /// Initial camera orientation and projection.
    pub camera: CameraSettings,
}

/// Size of the generated world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Chunks along x and along z.
    pub render_distance: usize,
}

impl Default for WorldSettings {
    fn default() -> Self {
        WorldSettings { render_distance: 6 }
    }
}

/// Initial camera orientation and perspective parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Heading in degrees, 0 looking down +x.
    pub yaw_degrees: f32,
    /// Elevation in degrees, clamped by the camera.
    pub pitch_degrees: f32,
    /// Vertical field of view in degrees.
    pub fovy_degrees: f32,
    /// Viewport width divided by height.
    pub aspect: f32,
    /// Near clip distance.
    pub znear: f32,
    /// Far clip distance.
    pub zfar: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            yaw_degrees: 45.0,
            pitch_degrees: -30.0,
            fovy_degrees: 45.0,
            aspect: 16.0 / 9.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl CameraSettings {
    /// Builds the projection described by these settings.
    ///
    /// # Errors
    /// Returns [`VoxelError::InvalidArgument`] for a field of view outside
    /// `(0, 180)` degrees, a non-positive aspect ratio, or clip distances that
    /// are not `0 < znear < zfar`.
    pub fn projection(&self) -> Result<Projection> {
        if !(self.fovy_degrees > 0.0 && self.fovy_degrees < 180.0) {
            return Err(VoxelError::InvalidArgument(format!(
                "field of view must lie in (0, 180) degrees, got {}",
                self.fovy_degrees
            )));
        }
        if !(self.aspect > 0.0 && self.aspect.is_finite()) {
            return Err(VoxelError::InvalidArgument(format!(
                "aspect ratio must be positive, got {}",
                self.aspect
            )));
        }
        if !(self.znear > 0.0 && self.zfar > self.znear) {
            return Err(VoxelError::InvalidArgument(format!(
                "clip distances must satisfy 0 < znear < zfar, got {} and {}",
                self.znear, self.zfar
            )));
        }

        Ok(Projection::from_aspect(
            self.aspect,
            Deg(self.fovy_degrees),
            self.znear,
            self.zfar,
        ))
    }
}

impl EngineConfig {
    /// Reads a configuration from a JSON file.
    ///
    /// # Errors
    /// Returns [`VoxelError::Io`] if the file cannot be read and
    /// [`VoxelError::Config`] if it is not valid configuration JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
