//! Axis-aligned bounding boxes and the geometric predicates the kd-tree relies on.

use std::fmt;

use nalgebra::{Point3, Vector3};

use crate::error::{BuildError, Result};
use crate::Ray;

/// Tolerance used by [`Aabb::contains`].
///
/// Hit points are reconstructed from `origin + distance * direction`, so a
/// point that lies exactly on a face can land a few ulps outside the box.
pub const CONTAINS_EPSILON: f32 = 1e-4;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the split axis for a node at `depth`: `depth mod 3`.
    ///
    /// The root sits at depth 1, so the sequence is y, z, x, y, ...
    #[inline]
    pub fn from_depth(depth: usize) -> Self {
        Self::ALL[depth % 3]
    }

    /// Returns the component index (0, 1 or 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// An axis-aligned box given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Point3<f32>,
    max: Point3<f32>,
}

impl Aabb {
    /// Creates a box from two opposite corners, in any order.
    pub fn new(a: Point3<f32>, b: Point3<f32>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Returns the smallest box enclosing all `points`, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Point3<f32>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.inf(&p),
            max: acc.max.sup(&p),
        }))
    }

    /// Returns the minimum corner.
    #[inline]
    pub fn min(&self) -> Point3<f32> {
        self.min
    }

    /// Returns the maximum corner.
    #[inline]
    pub fn max(&self) -> Point3<f32> {
        self.max
    }

    /// Minimum extent along `axis`.
    #[inline]
    pub fn min_along(&self, axis: Axis) -> f32 {
        self.min[axis.index()]
    }

    /// Maximum extent along `axis`.
    #[inline]
    pub fn max_along(&self, axis: Axis) -> f32 {
        self.max[axis.index()]
    }

    /// Size of the box on each axis.
    #[inline]
    pub fn extent(&self) -> Vector3<f32> {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns the smallest box enclosing both boxes.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Returns the box grown by `margin` on every side.
    pub fn padded(&self, margin: f32) -> Aabb {
        let margin = Vector3::repeat(margin);
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    /// Returns `true` if every corner coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.min.iter().chain(self.max.iter()).all(|c| c.is_finite())
    }

    /// Checks that the box has a strictly positive extent on every axis.
    pub fn validate(&self) -> Result<()> {
        for axis in Axis::ALL {
            let extent = self.max_along(axis) - self.min_along(axis);
            // Written so that NaN extents are rejected as well.
            if !(extent > 0.0 && extent.is_finite()) {
                return Err(BuildError::DegenerateBounds { axis, extent });
            }
        }
        Ok(())
    }

    /// Returns `true` if the two boxes share any point, touching faces included.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }

    /// Returns `true` if `point` lies inside or on the boundary of the box.
    pub fn contains(&self, point: Point3<f32>) -> bool {
        (0..3).all(|i| {
            point[i] >= self.min[i] - CONTAINS_EPSILON && point[i] <= self.max[i] + CONTAINS_EPSILON
        })
    }

    /// Slab test of `ray` against the box.
    ///
    /// Returns the distance along the ray at which it enters the box, or
    /// `None` when the ray misses it or the box lies entirely behind the
    /// origin. The distance is `0.0` when the origin is inside the box.
    pub fn check(&self, ray: &Ray) -> Option<f32> {
        let origin = ray.origin();
        let direction = ray.direction();

        let mut t_min = 0.0f32;
        let mut t_max = f32::INFINITY;

        for i in 0..3 {
            if direction[i] == 0.0 {
                // Parallel to this slab: either always inside it or never.
                if origin[i] < self.min[i] || origin[i] > self.max[i] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / direction[i];
            let mut t0 = (self.min[i] - origin[i]) * inv;
            let mut t1 = (self.max[i] - origin[i]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_max < t_min {
                return None;
            }
        }

        Some(t_min)
    }

    /// Splits the box by the plane `axis = coordinate`.
    ///
    /// The coordinate is clamped into the box, so both halves are always
    /// valid boxes (one of them possibly flat) that together cover `self`.
    pub fn split(&self, axis: Axis, coordinate: f32) -> (Aabb, Aabb) {
        let i = axis.index();
        let coordinate = coordinate.clamp(self.min[i], self.max[i]);

        let mut left = *self;
        let mut right = *self;
        left.max[i] = coordinate;
        right.min[i] = coordinate;

        (left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_box(min: [f32; 3], max: [f32; 3]) -> Aabb {
        Aabb::new(Point3::from(min), Point3::from(max))
    }

    fn make_ray(origin: [f32; 3], direction: [f32; 3]) -> Ray {
        Ray::new(Point3::from(origin), Vector3::from(direction))
    }

    #[test]
    fn axis_cycles_with_depth() {
        assert_eq!(Axis::from_depth(1), Axis::Y);
        assert_eq!(Axis::from_depth(2), Axis::Z);
        assert_eq!(Axis::from_depth(3), Axis::X);
        assert_eq!(Axis::from_depth(4), Axis::Y);
    }

    #[test]
    fn new_orders_corners() {
        let b = make_box([1.0, -1.0, 3.0], [-1.0, 1.0, 0.0]);
        assert_eq!(b.min(), Point3::new(-1.0, -1.0, 0.0));
        assert_eq!(b.max(), Point3::new(1.0, 1.0, 3.0));
    }

    #[test]
    fn from_points_encloses_all() {
        let b = Aabb::from_points([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, -1.0, 1.0),
            Point3::new(1.0, 3.0, -2.0),
        ])
        .unwrap();

        assert_eq!(b.min(), Point3::new(0.0, -1.0, -2.0));
        assert_eq!(b.max(), Point3::new(2.0, 3.0, 1.0));
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn overlaps_includes_touching_faces() {
        let a = make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let touching = make_box([1.0, 0.0, 0.0], [2.0, 1.0, 1.0]);
        let apart = make_box([1.5, 0.0, 0.0], [2.0, 1.0, 1.0]);

        assert!(a.overlaps(&touching));
        assert!(touching.overlaps(&a));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn contains_boundary_points() {
        let b = make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        assert!(b.contains(Point3::new(1.0, 0.5, 0.0)));
        assert!(b.contains(Point3::new(0.5, 0.5, 0.5)));
        assert!(!b.contains(Point3::new(1.01, 0.5, 0.5)));
    }

    #[test]
    fn check_reports_entry_distance() {
        let b = make_box([-0.5, -0.5, -0.5], [0.5, 0.5, 0.5]);
        let ray = make_ray([-5.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        assert_eq!(b.check(&ray), Some(4.5));
    }

    #[test]
    fn check_from_inside_is_zero() {
        let b = make_box([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);
        let ray = make_ray([0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(b.check(&ray), Some(0.0));
    }

    #[test]
    fn check_misses_and_behind() {
        let b = make_box([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);

        let parallel_outside = make_ray([-5.0, 2.0, 0.0], [1.0, 0.0, 0.0]);
        assert_eq!(b.check(&parallel_outside), None);

        let pointing_away = make_ray([-5.0, 0.0, 0.0], [-1.0, 0.0, 0.0]);
        assert_eq!(b.check(&pointing_away), None);
    }

    #[test]
    fn check_flat_box() {
        let flat = make_box([0.0, -1.0, -1.0], [0.0, 1.0, 1.0]);
        let ray = make_ray([-3.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        assert_eq!(flat.check(&ray), Some(3.0));
    }

    #[test]
    fn split_partitions_box() {
        let b = make_box([0.0, 0.0, 0.0], [4.0, 2.0, 2.0]);
        let (left, right) = b.split(Axis::X, 1.0);

        assert_eq!(left, make_box([0.0, 0.0, 0.0], [1.0, 2.0, 2.0]));
        assert_eq!(right, make_box([1.0, 0.0, 0.0], [4.0, 2.0, 2.0]));
        assert_eq!(left.union(&right), b);
    }

    #[test]
    fn split_clamps_coordinate() {
        let b = make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let (left, right) = b.split(Axis::Z, 5.0);

        assert_eq!(left, b);
        assert_eq!(right.min_along(Axis::Z), 1.0);
        assert_eq!(right.max_along(Axis::Z), 1.0);
    }

    #[test]
    fn validate_rejects_degenerate() {
        assert!(make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).validate().is_ok());

        let flat = make_box([0.0, 0.0, 0.0], [1.0, 0.0, 1.0]);
        assert_eq!(
            flat.validate(),
            Err(BuildError::DegenerateBounds {
                axis: Axis::Y,
                extent: 0.0
            })
        );

        let nan = make_box([0.0, 0.0, f32::NAN], [1.0, 1.0, 1.0]);
        assert!(nan.validate().is_err());
    }
}
