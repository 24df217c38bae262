//! # Camera Implementation
//!
//! This module contains the camera snapshot consumed by the terrain core:
//! - Camera position and orthonormal orientation basis
//! - Projection parameters used to shape the view frustum
//!
//! ## Key Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `Projection`: Manages perspective projection settings

use cgmath::*;
use std::f32::consts::FRAC_PI_2;

/// Safe limit for pitch to prevent gimbal lock
const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// Represents a first-person camera in 3D space.
///
/// # Fields
/// - `position`: The camera's position in world space
/// - `yaw`: Horizontal rotation (around Y axis) in radians
/// - `pitch`: Vertical rotation (around X axis) in radians
/// - `front`: Normalized vector pointing where the camera looks
/// - `right`: Normalized vector pointing to the camera's right
/// - `up`: Normalized vector pointing to the camera's up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation (around X axis) in radians
    pub pitch: Rad<f32>,
    /// Normalized vector pointing where the camera looks
    pub front: Vector3<f32>,
    /// Normalized vector pointing to the camera's right
    pub right: Vector3<f32>,
    /// Normalized vector pointing to the camera's up
    pub up: Vector3<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// A yaw of zero looks along positive X; the pitch is clamped just short
    /// of straight up or down so the basis stays well defined.
    ///
    /// # Example
    /// ```rust
    /// use cgmath::{Deg, Point3};
    /// use voxel_terrain::engine_state::camera_state::camera::Camera;
    ///
    /// let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
    /// assert!((camera.front.x - 1.0).abs() < 1e-6);
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let yaw: Rad<f32> = yaw.into();
        let mut pitch: Rad<f32> = pitch.into();
        pitch.0 = pitch.0.clamp(-SAFE_FRAC_PI_2, SAFE_FRAC_PI_2);

        let (yaw_sin, yaw_cos) = yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = pitch.0.sin_cos();

        let front = Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize();
        let right = front.cross(Vector3::unit_y()).normalize();
        let up = right.cross(front).normalize();

        Self {
            position: position.into(),
            yaw,
            pitch,
            front,
            right,
            up,
        }
    }

    /// Creates a camera from an externally maintained basis.
    ///
    /// The vectors are normalized but not re-orthogonalized. Yaw and pitch are
    /// recovered from `front`.
    pub fn from_basis(
        position: Point3<f32>,
        front: Vector3<f32>,
        right: Vector3<f32>,
        up: Vector3<f32>,
    ) -> Self {
        let front = front.normalize();
        Self {
            position,
            yaw: Rad(front.z.atan2(front.x)),
            pitch: Rad(front.y.clamp(-1.0, 1.0).asin()),
            front,
            right: right.normalize(),
            up: up.normalize(),
        }
    }
}

/// Represents a camera's perspective projection parameters.
///
/// It manages the aspect ratio, field of view, and near/far clipping planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Vertical field of view in radians
    pub fovy: Rad<f32>,
    /// Near clipping plane distance
    pub znear: f32,
    /// Far clipping plane distance
    pub zfar: f32,
}

impl Projection {
    /// Creates a new projection for a viewport of the given pixel size.
    ///
    /// # Arguments
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    /// * `fovy` - Vertical field of view (can be any type convertible to `Rad<f32>`)
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self::from_aspect(width as f32 / height.max(1) as f32, fovy, znear, zfar)
    }

    /// Creates a new projection from an explicit aspect ratio.
    pub fn from_aspect<F: Into<Rad<f32>>>(aspect: f32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    ///
    /// # Arguments
    /// * `width` - New viewport width in pixels
    /// * `height` - New viewport height in pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1.0e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let camera = Camera::new(Point3::new(1.0, 2.0, 3.0), Deg(37.0), Deg(-20.0));

        for v in [camera.front, camera.right, camera.up] {
            assert!((v.magnitude() - 1.0).abs() < 1.0e-5);
        }
        assert!(camera.front.dot(camera.right).abs() < 1.0e-5);
        assert!(camera.front.dot(camera.up).abs() < 1.0e-5);
        assert!(camera.right.dot(camera.up).abs() < 1.0e-5);
        assert!(camera.up.y > 0.0);
    }

    #[test]
    fn test_default_orientation() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));

        assert_close(camera.front, Vector3::unit_x());
        assert_close(camera.right, Vector3::unit_z());
        assert_close(camera.up, Vector3::unit_y());
    }

    #[test]
    fn test_pitch_is_clamped() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(120.0));
        assert!(camera.pitch.0 < FRAC_PI_2);
        assert!(camera.right.magnitude() > 0.99);
    }

    #[test]
    fn test_from_basis_recovers_angles() {
        let original = Camera::new(Point3::new(0.0, 5.0, 0.0), Deg(30.0), Deg(10.0));
        let rebuilt = Camera::from_basis(original.position, original.front, original.right, original.up);

        assert!((rebuilt.yaw.0 - original.yaw.0).abs() < 1.0e-5);
        assert!((rebuilt.pitch.0 - original.pitch.0).abs() < 1.0e-5);
    }

    #[test]
    fn test_projection_resize() {
        let mut projection = Projection::new(800, 600, Deg(45.0), 0.1, 1000.0);
        assert!((projection.aspect - 4.0 / 3.0).abs() < 1.0e-6);

        projection.resize(1920, 1080);
        assert!((projection.aspect - 16.0 / 9.0).abs() < 1.0e-6);
    }
}
