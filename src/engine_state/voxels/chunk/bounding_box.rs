//! Axis-aligned bounding boxes for frustum tests.

use cgmath::{Point3, Vector3};

use crate::engine_state::camera_state::frustum::{BoundingVolume, Frustum, Intersection};

use super::CHUNK_DIMENSION;

/// An axis-aligned box stored as center and half extent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    /// World-space center.
    pub center: Point3<f32>,
    /// Distance from the center to each face, per axis.
    pub half_extent: Vector3<f32>,
}

impl BoundingBox {
    /// Creates a box from its center and half extent.
    pub fn new(center: Point3<f32>, half_extent: Vector3<f32>) -> Self {
        BoundingBox {
            center,
            half_extent,
        }
    }

    /// The cube occupied by the chunk at grid position `position`.
    pub fn for_chunk(position: Point3<usize>) -> Self {
        let size = CHUNK_DIMENSION as f32;
        let half = size / 2.0;
        BoundingBox::new(
            Point3::new(
                position.x as f32 * size + half,
                position.y as f32 * size + half,
                position.z as f32 * size + half,
            ),
            Vector3::new(half, half, half),
        )
    }

    /// The minimum corner.
    pub fn min(&self) -> Point3<f32> {
        self.center - self.half_extent
    }

    /// The maximum corner.
    pub fn max(&self) -> Point3<f32> {
        self.center + self.half_extent
    }

    /// Whether `point` lies inside or on the box.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        let (min, max) = (self.min(), self.max());
        (min.x..=max.x).contains(&point.x)
            && (min.y..=max.y).contains(&point.y)
            && (min.z..=max.z).contains(&point.z)
    }
}

impl BoundingVolume for BoundingBox {
    fn classify(&self, frustum: &Frustum) -> Intersection {
        frustum.classify_box(self.center, self.half_extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_box_corners() {
        let bounding_box = BoundingBox::for_chunk(Point3::new(1, 0, 3));

        assert_eq!(bounding_box.min(), Point3::new(16.0, 0.0, 48.0));
        assert_eq!(bounding_box.max(), Point3::new(32.0, 16.0, 64.0));
        assert!(bounding_box.contains_point(Point3::new(16.0, 8.0, 63.5)));
        assert!(!bounding_box.contains_point(Point3::new(15.9, 8.0, 50.0)));
    }
}
