//! Solid axis-aligned box surface.

use nalgebra::{Point3, Vector3};

use crate::{Aabb, Ray, Surface, SurfaceHit};

/// A solid box whose faces are aligned with the coordinate axes.
///
/// Rays starting inside the box hit the face they leave through.
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    bounds: Aabb,
}

impl Cuboid {
    /// Creates a cuboid spanning two opposite corners.
    pub fn new(a: Point3<f32>, b: Point3<f32>) -> Self {
        Self {
            bounds: Aabb::new(a, b),
        }
    }

    /// Creates a cube of edge length `size` centered on `center`.
    pub fn cube(center: Point3<f32>, size: f32) -> Self {
        let half = Vector3::repeat(size * 0.5);
        Self::new(center - half, center + half)
    }

    #[inline]
    pub fn center(&self) -> Point3<f32> {
        self.bounds.center()
    }
}

impl Surface for Cuboid {
    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let origin = ray.origin();
        let direction = ray.direction();
        let min = self.bounds.min();
        let max = self.bounds.max();

        // Track the entering and leaving slab along with the face normal.
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        let mut near_normal = Vector3::zeros();
        let mut far_normal = Vector3::zeros();

        for i in 0..3 {
            if direction[i] == 0.0 {
                if origin[i] < min[i] || origin[i] > max[i] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / direction[i];
            let t0 = (min[i] - origin[i]) * inv;
            let t1 = (max[i] - origin[i]) * inv;

            // Face crossed first when travelling along +axis is the min face.
            let mut axis_normal = Vector3::zeros();
            axis_normal[i] = 1.0;
            let (enter, exit, enter_normal) = if t0 <= t1 {
                (t0, t1, -axis_normal)
            } else {
                (t1, t0, axis_normal)
            };

            if enter > t_near {
                t_near = enter;
                near_normal = enter_normal;
            }
            if exit < t_far {
                t_far = exit;
                far_normal = -enter_normal;
            }
            if t_far < t_near {
                return None;
            }
        }

        if t_near >= 0.0 {
            Some(SurfaceHit {
                distance: t_near,
                normal: near_normal,
            })
        } else if t_far >= 0.0 {
            // Leaving from inside: report the exit face, facing back at the ray.
            Some(SurfaceHit {
                distance: t_far,
                normal: -far_normal,
            })
        } else {
            None
        }
    }
}
