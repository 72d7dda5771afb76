//! Infinite planes, used by the flat surfaces.

use nalgebra::{Point3, Vector3};

use crate::Ray;

/// Default epsilon for plane classification.
/// Points within this distance of the plane are considered "on" the plane.
pub const PLANE_EPSILON: f32 = 1e-5;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// A plane in 3D space, represented as `normal · point = offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane3D {
    normal: Vector3<f32>,
    offset: f32,
}

impl Plane3D {
    /// Creates a new plane from a normal vector and offset.
    /// The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn new(normal: Vector3<f32>, offset: f32) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Plane normal cannot be zero");
        Self {
            normal: normal / norm,
            offset: offset / norm,
        }
    }

    /// Creates a plane from a point on the plane and a normal vector.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn from_point_and_normal(point: Point3<f32>, normal: Vector3<f32>) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Plane normal cannot be zero");
        let unit_normal = normal / norm;
        Self {
            normal: unit_normal,
            offset: unit_normal.dot(&point.coords),
        }
    }

    /// Creates a plane from three non-collinear points.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    ///
    /// # Panics
    /// Panics if the points are collinear (or nearly so).
    pub fn from_three_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self::from_point_and_normal(a, (b - a).cross(&(c - a)))
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Computes the signed distance from a point to the plane.
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies which side of the plane a point lies on.
    /// Uses the default `PLANE_EPSILON` tolerance.
    #[inline]
    pub fn classify_point(&self, point: Point3<f32>) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > PLANE_EPSILON {
            PlaneSide::Front
        } else if dist < -PLANE_EPSILON {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Computes where a ray crosses the plane.
    ///
    /// Returns the parametric distance of the crossing, or `None` if the ray
    /// is parallel to the plane or the crossing lies behind the origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let denom = self.normal.dot(&ray.direction());

        // Ray is parallel to plane
        if denom.abs() < f32::EPSILON {
            return None;
        }

        let t = -self.signed_distance(ray.origin()) / denom;
        (t >= 0.0).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes() {
        let plane = Plane3D::new(Vector3::new(0.0, 2.0, 0.0), 4.0);
        assert_eq!(plane.normal(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(plane.offset(), 2.0);
    }

    #[test]
    fn classify_points() {
        let plane = Plane3D::from_point_and_normal(Point3::new(0.0, 1.0, 0.0), Vector3::y());
        assert_eq!(plane.classify_point(Point3::new(3.0, 2.0, 0.0)), PlaneSide::Front);
        assert_eq!(plane.classify_point(Point3::new(3.0, 0.0, 0.0)), PlaneSide::Back);
        assert_eq!(plane.classify_point(Point3::new(-7.0, 1.0, 2.0)), PlaneSide::OnPlane);
    }

    #[test]
    fn three_points_right_hand_rule() {
        let plane = Plane3D::from_three_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert_eq!(plane.normal(), Vector3::z());
    }

    #[test]
    fn ray_crossing() {
        let plane = Plane3D::from_point_and_normal(Point3::new(0.0, 0.0, 2.0), Vector3::z());

        let towards = Ray::new(Point3::origin(), Vector3::new(0.0, 0.0, 0.5));
        assert_eq!(plane.intersect_ray(&towards), Some(4.0));

        let away = Ray::new(Point3::origin(), -Vector3::z());
        assert_eq!(plane.intersect_ray(&away), None);

        let parallel = Ray::new(Point3::origin(), Vector3::x());
        assert_eq!(plane.intersect_ray(&parallel), None);
    }
}
