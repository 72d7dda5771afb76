//! Rectangle (quad) surface.

use nalgebra::{Point3, Vector3};

use crate::surface::facing;
use crate::{Aabb, Plane3D, PlaneSide, Ray, Surface, SurfaceHit};

/// A rectangle (quad) in 3D space, defined by a corner and two edge vectors.
///
/// The four vertices are:
/// - `origin`
/// - `origin + u`
/// - `origin + u + v`
/// - `origin + v`
///
/// Non-orthogonal edges are allowed, in which case the quad is a parallelogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    origin: Point3<f32>,
    u: Vector3<f32>,
    v: Vector3<f32>,
}

impl Rectangle {
    /// Creates a new rectangle from an origin corner and two edge vectors.
    pub fn new(origin: Point3<f32>, u: Vector3<f32>, v: Vector3<f32>) -> Self {
        Self { origin, u, v }
    }

    /// Creates a rectangle from four corner points, wound a -> b -> c -> d.
    ///
    /// Internally computes u = b - a and v = d - a.
    ///
    /// # Panics (debug builds only)
    /// Panics if the points are not coplanar.
    pub fn from_corners(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>, d: Point3<f32>) -> Self {
        debug_assert!(
            {
                let plane = Plane3D::from_three_points(a, b, d);
                plane.classify_point(c) == PlaneSide::OnPlane
            },
            "Rectangle corners must be coplanar"
        );
        Self {
            origin: a,
            u: b - a,
            v: d - a,
        }
    }

    #[inline]
    pub fn origin(&self) -> Point3<f32> {
        self.origin
    }

    #[inline]
    pub fn u(&self) -> Vector3<f32> {
        self.u
    }

    #[inline]
    pub fn v(&self) -> Vector3<f32> {
        self.v
    }

    /// Returns the four vertices of the rectangle.
    pub fn vertices(&self) -> [Point3<f32>; 4] {
        [
            self.origin,
            self.origin + self.u,
            self.origin + self.u + self.v,
            self.origin + self.v,
        ]
    }

    /// Computes the (unnormalized) normal vector: u × v.
    pub fn normal(&self) -> Vector3<f32> {
        self.u.cross(&self.v)
    }

    /// Returns the plane that this rectangle lies on, or `None` if it is degenerate.
    pub fn plane(&self) -> Option<Plane3D> {
        let normal = self.normal();
        (normal.norm() > f32::EPSILON).then(|| Plane3D::from_point_and_normal(self.origin, normal))
    }

    /// Computes the centroid (center) of the rectangle.
    pub fn centroid(&self) -> Point3<f32> {
        self.origin + (self.u + self.v) * 0.5
    }

    /// Computes the area of the rectangle.
    pub fn area(&self) -> f32 {
        self.normal().norm()
    }
}

impl Surface for Rectangle {
    fn bounds(&self) -> Aabb {
        let [a, b, c, d] = self.vertices();
        Aabb::new(a.inf(&b).inf(&c).inf(&d), a.sup(&b).sup(&c).sup(&d))
    }

    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let plane = self.plane()?;
        let distance = plane.intersect_ray(ray)?;

        // Express the hit point in (u, v) coordinates of the parallelogram.
        let n = self.normal();
        let n_sq = n.norm_squared();
        let offset = ray.point_at(distance) - self.origin;
        let alpha = n.dot(&offset.cross(&self.v)) / n_sq;
        let beta = n.dot(&self.u.cross(&offset)) / n_sq;

        if !(0.0..=1.0).contains(&alpha) || !(0.0..=1.0).contains(&beta) {
            return None;
        }

        Some(SurfaceHit {
            distance,
            normal: facing(plane.normal(), ray.direction()),
        })
    }
}
