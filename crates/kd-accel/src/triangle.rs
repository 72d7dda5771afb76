//! Triangle surface.

use nalgebra::{Point3, Vector3};

use crate::surface::facing;
use crate::{Aabb, Ray, Surface, SurfaceHit};

/// Determinants below this are treated as a ray parallel to the triangle.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A triangle in 3D space, defined by three vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
}

impl Triangle {
    /// Creates a new triangle from three points.
    ///
    /// The winding order determines the normal direction via the right-hand rule:
    /// normal = (b - a) × (c - a)
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns the three vertices of the triangle.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>; 3] {
        &self.vertices
    }

    /// Computes the (unnormalized) normal vector of the triangle.
    pub fn normal(&self) -> Vector3<f32> {
        let [a, b, c] = &self.vertices;
        (b - a).cross(&(c - a))
    }

    /// Computes the unit normal vector of the triangle.
    ///
    /// Returns `None` if the triangle is degenerate (zero area).
    pub fn unit_normal(&self) -> Option<Vector3<f32>> {
        self.normal().try_normalize(f32::EPSILON)
    }

    /// Computes the centroid (center of mass) of the triangle.
    pub fn centroid(&self) -> Point3<f32> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }
}

impl Surface for Triangle {
    fn bounds(&self) -> Aabb {
        let [a, b, c] = self.vertices;
        Aabb::new(a.inf(&b).inf(&c), a.sup(&b).sup(&c))
    }

    /// Möller–Trumbore intersection; both faces are hittable.
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let [a, b, c] = &self.vertices;
        let ab = b - a;
        let ac = c - a;

        let p = ray.direction().cross(&ac);
        let det = ab.dot(&p);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let s = ray.origin() - a;
        let u = s.dot(&p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&ab);
        let v = ray.direction().dot(&q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let distance = ac.dot(&q) * inv_det;
        if distance < 0.0 {
            return None;
        }

        let normal = self.unit_normal()?;
        Some(SurfaceHit {
            distance,
            normal: facing(normal, ray.direction()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(Point3::from(a), Point3::from(b), Point3::from(c))
    }

    #[test]
    fn bounds_enclose_vertices() {
        let tri = make_triangle([0.0, 0.0, 0.0], [2.0, -1.0, 0.0], [1.0, 3.0, 1.0]);
        let bounds = tri.bounds();
        assert_eq!(bounds.min(), Point3::new(0.0, -1.0, 0.0));
        assert_eq!(bounds.max(), Point3::new(2.0, 3.0, 1.0));
    }

    #[test]
    fn ray_hits_interior() {
        let tri = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let ray = Ray::new(Point3::new(0.25, 0.25, 5.0), -Vector3::z());

        let hit = tri.intersect(&ray).unwrap();
        assert!((hit.distance - 5.0).abs() < 1e-6);
        assert_eq!(hit.normal, Vector3::z());
    }

    #[test]
    fn back_face_normal_faces_ray() {
        let tri = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let ray = Ray::new(Point3::new(0.25, 0.25, -5.0), Vector3::z());

        let hit = tri.intersect(&ray).unwrap();
        assert_eq!(hit.normal, -Vector3::z());
    }

    #[test]
    fn ray_misses_outside_edges() {
        let tri = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let ray = Ray::new(Point3::new(0.8, 0.8, 5.0), -Vector3::z());
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn ray_parallel_or_behind() {
        let tri = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);

        let parallel = Ray::new(Point3::new(-1.0, 0.25, 0.0), Vector3::x());
        assert!(tri.intersect(&parallel).is_none());

        let behind = Ray::new(Point3::new(0.25, 0.25, 5.0), Vector3::z());
        assert!(tri.intersect(&behind).is_none());
    }

    #[test]
    fn centroid_is_vertex_mean() {
        let tri = make_triangle([0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 3.0, 0.0]);
        assert_eq!(tri.centroid(), Point3::new(1.0, 1.0, 0.0));
    }
}
