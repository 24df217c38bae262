//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Camera position and orientation tracking
//! - Projection parameters
//! - View frustum construction for chunk visibility
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `Projection`: Manages the camera's perspective parameters
//! - `Frustum`: The six planes bounding what the camera can see

use camera::{Camera, Projection};
use cgmath::Point3;
use frustum::Frustum;

use super::voxels::chunk::CHUNK_DIMENSION;

pub mod camera;
pub mod frustum;

/// Manages the camera snapshot handed in by the windowing layer.
///
/// # Fields
/// - `camera`: The current camera state (position, orientation)
/// - `projection`: The current projection parameters
/// - `frustum`: The view frustum of the current frame
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: Camera,
    /// The current projection parameters
    pub projection: Projection,
    /// The view frustum built from `camera` and `projection`
    pub frustum: Frustum,
}

impl CameraState {
    /// Creates a new CameraState and builds its first frustum.
    pub fn new(camera: Camera, projection: Projection) -> Self {
        let frustum = Frustum::from_camera(&camera, &projection);
        CameraState {
            camera,
            projection,
            frustum,
        }
    }

    /// Replaces the camera snapshot for a new frame.
    ///
    /// # Returns
    /// - `Some(CameraUpdates)` if the camera moved or turned
    /// - `None` if the snapshot is identical to the previous one
    pub fn update(&mut self, camera: Camera) -> Option<CameraUpdates> {
        if camera == self.camera {
            return None;
        }

        self.camera = camera;
        self.frustum = Frustum::from_camera(&self.camera, &self.projection);

        Some(CameraUpdates {
            new_chunk_position: self.chunk_position(),
        })
    }

    /// Updates the projection for a new viewport size and rebuilds the frustum.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
        self.frustum = Frustum::from_camera(&self.camera, &self.projection);
    }

    /// The chunk coordinates containing the camera.
    pub fn chunk_position(&self) -> Point3<i32> {
        let position = self.camera.position;
        Point3::new(
            (position.x / CHUNK_DIMENSION as f32).floor() as i32,
            (position.y / CHUNK_DIMENSION as f32).floor() as i32,
            (position.z / CHUNK_DIMENSION as f32).floor() as i32,
        )
    }
}

/// Represents updates to the camera's state that affect game world interaction.
///
/// This is returned by `CameraState::update()` when the camera's position or
/// orientation has changed.
pub struct CameraUpdates {
    /// The current chunk position of the camera in chunk coordinates
    pub new_chunk_position: Point3<i32>,
}
