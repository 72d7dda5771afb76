//! Ray representation.

use nalgebra::{Point3, Vector3};

/// A half-line starting at `origin` and extending along `direction`.
///
/// The direction is not normalized; distances reported by surfaces and the
/// tree are parametric, i.e. measured in multiples of `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3<f32>,
    direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    /// Creates a ray from `origin` towards `target`, with a unit direction.
    ///
    /// Returns `None` if the two points coincide.
    pub fn towards(origin: Point3<f32>, target: Point3<f32>) -> Option<Self> {
        let direction = (target - origin).try_normalize(f32::EPSILON)?;
        Some(Self::new(origin, direction))
    }

    #[inline]
    pub fn origin(&self) -> Point3<f32> {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    /// Returns the point `origin + distance * direction`.
    #[inline]
    pub fn point_at(&self, distance: f32) -> Point3<f32> {
        self.origin + self.direction * distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_at_walks_direction() {
        let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.point_at(0.0), Point3::new(-5.0, 0.0, 0.0));
        assert_eq!(ray.point_at(2.25), Point3::new(-0.5, 0.0, 0.0));
    }

    #[test]
    fn towards_normalizes() {
        let ray = Ray::towards(Point3::origin(), Point3::new(0.0, 3.0, 4.0)).unwrap();
        assert!((ray.direction().norm() - 1.0).abs() < 1e-6);
        assert!((ray.point_at(5.0) - Point3::new(0.0, 3.0, 4.0)).norm() < 1e-5);
    }

    #[test]
    fn towards_same_point() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(Ray::towards(p, p).is_none());
    }
}
