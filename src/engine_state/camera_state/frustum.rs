//! # Frustum Module
//!
//! The view volume of a camera as six inward-facing half-spaces, and the
//! classification of bounding volumes against it.
//!
//! A [`Frustum`] is rebuilt every frame from the active camera and thrown away
//! afterwards; it has no identity beyond the frame it was built for.

use cgmath::{InnerSpace, Point3, Vector3, Vector4};

use super::camera::{Camera, Projection};

/// One half-space of a frustum.
///
/// `normal.dot(point) + d` is the signed distance of `point` from the plane,
/// positive on the inner side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    /// Unit normal pointing into the frustum.
    pub normal: Vector3<f32>,
    /// Plane offset.
    pub d: f32,
}

impl Plane {
    /// Creates a plane from its normal and offset.
    pub fn new(normal: Vector3<f32>, d: f32) -> Self {
        Plane { normal, d }
    }

    /// Creates the plane through `point` with the given inward normal.
    pub fn through_point(normal: Vector3<f32>, point: Point3<f32>) -> Self {
        let normal = normal.normalize();
        Plane::new(normal, -normal.dot(Vector3::new(point.x, point.y, point.z)))
    }

    /// Signed distance of a point from the plane.
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(Vector3::new(point.x, point.y, point.z)) + self.d
    }

    /// Classifies an axis-aligned box given by its center and half extent.
    ///
    /// The half extent is projected onto the normal to get the box's radius
    /// along it; the box is only on one side if the center lies further than
    /// that radius from the plane.
    pub fn classify_box(&self, center: Point3<f32>, half_extent: Vector3<f32>) -> Intersection {
        let radius = self.normal.x.abs() * half_extent.x
            + self.normal.y.abs() * half_extent.y
            + self.normal.z.abs() * half_extent.z;
        let distance = self.signed_distance(center);

        if distance < -radius {
            Intersection::Outside
        } else if distance > radius {
            Intersection::Inside
        } else {
            Intersection::Intersecting
        }
    }

    /// The plane as `(nx, ny, nz, d)`, the layout shaders expect.
    pub fn as_vec4(&self) -> Vector4<f32> {
        self.normal.extend(self.d)
    }
}

/// Result of testing a volume against a frustum or a single plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Intersection {
    /// Entirely on the outer side.
    Outside,
    /// Crosses the boundary.
    Intersecting,
    /// Entirely on the inner side.
    Inside,
}

/// Anything that can be tested against a [`Frustum`].
pub trait BoundingVolume {
    /// Classifies this volume against all six planes.
    fn classify(&self, frustum: &Frustum) -> Intersection;

    /// Whether any part of the volume may be inside the frustum.
    fn is_visible(&self, frustum: &Frustum) -> bool {
        self.classify(frustum) != Intersection::Outside
    }
}

/// Index of each plane inside [`Frustum::planes`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrustumSide {
    /// Near clipping plane.
    Near = 0,
    /// Far clipping plane.
    Far = 1,
    /// Upper edge of the view.
    Top = 2,
    /// Lower edge of the view.
    Bottom = 3,
    /// Left edge of the view.
    Left = 4,
    /// Right edge of the view.
    Right = 5,
}

/// Six inward-facing planes bounding the visible region of a camera.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frustum {
    /// Planes in [`FrustumSide`] order.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Wraps six planes given in [`FrustumSide`] order.
    pub fn from_planes(planes: [Plane; 6]) -> Self {
        Frustum { planes }
    }

    /// Builds the view frustum of a camera.
    ///
    /// Each side plane passes through the camera position and contains the
    /// corresponding edge direction of the view pyramid.
    pub fn from_camera(camera: &Camera, projection: &Projection) -> Self {
        let position = camera.position;
        let front = camera.front;
        let right = camera.right;
        let up = camera.up;

        let half_v = (projection.fovy.0 * 0.5).tan();
        let half_h = half_v * projection.aspect;

        let eye = Vector3::new(position.x, position.y, position.z);
        let near_plane = Plane::new(front, -front.dot(eye) - projection.znear);
        let far_plane = Plane::new(-front, front.dot(eye) + projection.zfar);

        let top_edge = front + up * half_v;
        let bottom_edge = front - up * half_v;
        let left_edge = front - right * half_h;
        let right_edge = front + right * half_h;

        let top_plane = Plane::through_point(top_edge.cross(right), position);
        let bottom_plane = Plane::through_point(right.cross(bottom_edge), position);
        let left_plane = Plane::through_point(left_edge.cross(up), position);
        let right_plane = Plane::through_point(up.cross(right_edge), position);

        Frustum {
            planes: [
                near_plane,
                far_plane,
                top_plane,
                bottom_plane,
                left_plane,
                right_plane,
            ],
        }
    }

    /// The plane on one side of the frustum.
    pub fn plane(&self, side: FrustumSide) -> &Plane {
        &self.planes[side as usize]
    }

    /// Classifies an axis-aligned box against all six planes.
    ///
    /// Any `Outside` plane makes the whole box `Outside`. Otherwise the box is
    /// `Intersecting` if any plane cuts it and `Inside` if none do.
    pub fn classify_box(&self, center: Point3<f32>, half_extent: Vector3<f32>) -> Intersection {
        let mut result = Intersection::Inside;
        for plane in &self.planes {
            match plane.classify_box(center, half_extent) {
                Intersection::Outside => return Intersection::Outside,
                Intersection::Intersecting => result = Intersection::Intersecting,
                Intersection::Inside => {}
            }
        }
        result
    }

    /// Whether a point lies inside or on every plane.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(point) >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Deg;

    /// The cube `[-10, 10]³` as six inward planes.
    fn cube_frustum() -> Frustum {
        Frustum::from_planes([
            Plane::new(Vector3::new(0.0, 0.0, -1.0), 10.0),
            Plane::new(Vector3::new(0.0, 0.0, 1.0), 10.0),
            Plane::new(Vector3::new(0.0, -1.0, 0.0), 10.0),
            Plane::new(Vector3::new(0.0, 1.0, 0.0), 10.0),
            Plane::new(Vector3::new(1.0, 0.0, 0.0), 10.0),
            Plane::new(Vector3::new(-1.0, 0.0, 0.0), 10.0),
        ])
    }

    fn looking_down_negative_z() -> (Camera, Projection) {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(-90.0), Deg(0.0));
        let projection = Projection::from_aspect(1.0, Deg(90.0), 0.1, 100.0);
        (camera, projection)
    }

    #[test]
    fn test_box_inside_every_plane_is_inside() {
        let frustum = cube_frustum();
        let result = frustum.classify_box(Point3::new(1.0, 2.0, 3.0), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(result, Intersection::Inside);
    }

    #[test]
    fn test_box_behind_one_plane_is_outside() {
        let frustum = cube_frustum();
        let result = frustum.classify_box(Point3::new(0.0, 0.0, 20.0), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(result, Intersection::Outside);
    }

    #[test]
    fn test_box_straddling_one_plane_is_intersecting() {
        let frustum = cube_frustum();
        let center = Point3::new(10.0, 0.0, 0.0);
        let half = Vector3::new(1.0, 1.0, 1.0);

        let straddled: Vec<Intersection> = frustum
            .planes
            .iter()
            .map(|plane| plane.classify_box(center, half))
            .collect();
        assert_eq!(
            straddled
                .iter()
                .filter(|&&i| i == Intersection::Intersecting)
                .count(),
            1
        );
        assert_eq!(frustum.classify_box(center, half), Intersection::Intersecting);
    }

    #[test]
    fn test_outside_short_circuits_over_intersecting() {
        let frustum = cube_frustum();
        // Cuts the x = 10 plane but lies wholly beyond z = 10.
        let result = frustum.classify_box(Point3::new(10.0, 0.0, 15.0), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(result, Intersection::Outside);
    }

    #[test]
    fn test_camera_frustum_sees_ahead() {
        let (camera, projection) = looking_down_negative_z();
        let frustum = Frustum::from_camera(&camera, &projection);
        let half = Vector3::new(1.0, 1.0, 1.0);

        assert_eq!(
            frustum.classify_box(Point3::new(0.0, 0.0, -10.0), half),
            Intersection::Inside
        );
        assert_eq!(
            frustum.classify_box(Point3::new(0.0, 0.0, 10.0), half),
            Intersection::Outside
        );
        assert_eq!(
            frustum.classify_box(Point3::new(0.0, 0.0, -200.0), half),
            Intersection::Outside
        );
        assert_eq!(
            frustum.classify_box(Point3::new(0.0, 0.0, -100.0), half),
            Intersection::Intersecting
        );
    }

    #[test]
    fn test_camera_frustum_side_planes() {
        let (camera, projection) = looking_down_negative_z();
        let frustum = Frustum::from_camera(&camera, &projection);

        // 90 degree field of view: the side planes run along x = ±z.
        assert!(frustum.contains_point(Point3::new(4.0, 0.0, -5.0)));
        assert!(!frustum.contains_point(Point3::new(6.0, 0.0, -5.0)));
        assert!(!frustum.contains_point(Point3::new(-6.0, 0.0, -5.0)));
        assert!(frustum.contains_point(Point3::new(0.0, 4.0, -5.0)));
        assert!(!frustum.contains_point(Point3::new(0.0, -6.0, -5.0)));

        let left = frustum.plane(FrustumSide::Left);
        assert!(left.normal.x > 0.0);
        assert!((left.normal.magnitude() - 1.0).abs() < 1.0e-5);
    }

    #[test]
    fn test_plane_as_vec4() {
        let plane = Plane::new(Vector3::new(0.0, 1.0, 0.0), -3.0);
        assert_eq!(plane.as_vec4(), Vector4::new(0.0, 1.0, 0.0, -3.0));
        assert_eq!(plane.signed_distance(Point3::new(5.0, 4.0, 5.0)), 1.0);
    }
}
