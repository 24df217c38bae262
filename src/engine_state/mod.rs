//! # Engine State Module
//!
//! The core engine module that owns the generated world and the camera looking
//! at it.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Camera snapshot, projection and view frustum
//! * `voxels` - Noise, blocks, chunks and world generation
//!
//! ## Frame Flow
//!
//! The windowing layer hands in a camera snapshot every frame with
//! [`EngineState::set_camera`]. The frustum is rebuilt from it, and
//! [`EngineState::visible_chunk_indices`] reports which slices of the terrain
//! buffer are worth drawing.

use camera_state::camera::Camera;
use camera_state::frustum::Frustum;
use camera_state::{CameraState, CameraUpdates};
use cgmath::{Deg, Point3};
use log::{debug, info};
use voxels::noise::NoiseField;
use voxels::world::World;

use crate::config::EngineConfig;
use crate::error::Result;

pub mod camera_state;
pub mod voxels;

/// The main state container for the voxel engine.
///
/// # Examples
///
/// ```
/// use voxel_terrain::config::EngineConfig;
/// use voxel_terrain::engine_state::EngineState;
///
/// let mut config = EngineConfig::default();
/// config.noise.seed = Some(42);
/// config.world.render_distance = 2;
///
/// let engine_state = EngineState::new(&config)?;
/// assert_eq!(engine_state.world().chunk_count(), 4);
/// # Ok::<(), voxel_terrain::error::VoxelError>(())
/// ```
pub struct EngineState {
    /// Camera state managing position, orientation and the view frustum
    pub camera_state: CameraState,
    /// The heightfield the world was generated from
    noise: NoiseField,
    /// The voxel world containing all chunk data
    world: World,
    /// Current chunk position of the camera
    current_player_chunk_position: Point3<i32>,
}

impl EngineState {
    /// Synthesizes the heightfield, generates the world and places the camera
    /// at the world origin.
    ///
    /// # Errors
    /// Returns an error if any section of `config` is invalid, including a
    /// heightfield too small for the requested render distance.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let noise = NoiseField::new(&config.noise)?;
        let world = World::new(&noise, config.world.render_distance)?;
        let projection = config.camera.projection()?;

        let camera = Camera::new(
            world.origin(),
            Deg(config.camera.yaw_degrees),
            Deg(config.camera.pitch_degrees),
        );
        let camera_state = CameraState::new(camera, projection);
        let current_player_chunk_position = camera_state.chunk_position();

        info!(
            "Engine ready: seed {}, {} chunks, camera at {:?}",
            noise.seed(),
            world.chunk_count(),
            camera.position
        );

        Ok(Self {
            camera_state,
            noise,
            world,
            current_player_chunk_position,
        })
    }

    /// The generated world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The heightfield the world was generated from.
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// The current camera snapshot.
    pub fn camera(&self) -> &Camera {
        &self.camera_state.camera
    }

    /// The frustum of the current camera snapshot.
    pub fn frame_frustum(&self) -> &Frustum {
        &self.camera_state.frustum
    }

    /// Chunk coordinates the camera was last seen in.
    pub fn current_chunk_position(&self) -> Point3<i32> {
        self.current_player_chunk_position
    }

    /// Accepts the camera snapshot for a new frame.
    ///
    /// # Returns
    /// `true` if the camera moved into a different chunk.
    pub fn set_camera(&mut self, camera: Camera) -> bool {
        let Some(CameraUpdates { new_chunk_position }) = self.camera_state.update(camera) else {
            return false;
        };

        if new_chunk_position == self.current_player_chunk_position {
            return false;
        }

        debug!(
            "Camera moved from chunk {:?} to {:?}",
            self.current_player_chunk_position, new_chunk_position
        );
        self.current_player_chunk_position = new_chunk_position;
        true
    }

    /// Updates the projection for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera_state.resize(width, height);
        debug!("Viewport resized to {}x{}", width, height);
    }

    /// Indices of the active chunks inside the current frustum.
    pub fn visible_chunk_indices(&self) -> Vec<usize> {
        self.world
            .visible_chunks(&self.camera_state.frustum)
            .map(|(index, _)| index)
            .collect()
    }

    /// The terrain buffer as bytes, ready for upload.
    pub fn terrain_bytes(&self) -> &[u8] {
        self.world.terrain_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.noise.seed = Some(42);
        config.world.render_distance = 3;
        config
    }

    #[test]
    fn test_camera_starts_at_world_origin() {
        let engine_state = EngineState::new(&small_config()).unwrap();

        assert_eq!(engine_state.camera().position, engine_state.world().origin());
        assert_eq!(engine_state.noise().seed(), 42);
        assert_eq!(
            engine_state.terrain_bytes().len(),
            engine_state.world().chunk_count() * 4096 * 4
        );
    }

    #[test]
    fn test_set_camera_reports_chunk_changes() {
        let mut engine_state = EngineState::new(&small_config()).unwrap();
        let camera = engine_state.camera_state.camera;

        assert!(!engine_state.set_camera(camera));

        let turned = Camera::new(camera.position, Deg(120.0), Deg(-10.0));
        assert!(!engine_state.set_camera(turned));

        let moved = Camera::new(Point3::new(2.0, 40.0, 2.0), Deg(0.0), Deg(-30.0));
        assert!(engine_state.set_camera(moved));
        assert_eq!(engine_state.current_chunk_position(), Point3::new(0, 2, 0));
    }

    #[test]
    fn test_looking_away_hides_every_chunk() {
        let mut engine_state = EngineState::new(&small_config()).unwrap();

        // High above the world, looking straight up.
        engine_state.set_camera(Camera::new(Point3::new(24.0, 200.0, 24.0), Deg(0.0), Deg(89.0)));
        assert!(engine_state.visible_chunk_indices().is_empty());

        // Far above, looking down at the middle.
        engine_state.set_camera(Camera::new(Point3::new(24.0, 300.0, 24.0), Deg(0.0), Deg(-89.0)));
        assert!(engine_state.visible_chunk_indices().contains(&4));
    }

    #[test]
    fn test_oversized_render_distance_is_rejected() {
        let mut config = small_config();
        config.world.render_distance = 7;
        assert!(EngineState::new(&config).is_err());
    }
}
