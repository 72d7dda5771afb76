//! The surface abstraction consumed by the kd-tree.

use std::fmt;

use nalgebra::Vector3;

use crate::{Aabb, Ray};

/// Identifies a surface by its position in the list a tree was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(usize);

impl SurfaceId {
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A raw intersection reported by a single [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Parametric distance along the ray.
    pub distance: f32,
    /// Unit normal at the hit point, facing against the ray.
    pub normal: Vector3<f32>,
}

/// Geometry that can be stored in a [`KdTree`](crate::KdTree).
///
/// Implementations must report a box that encloses every point
/// [`intersect`](Surface::intersect) can return, and must only report hits
/// with a non-negative distance.
pub trait Surface {
    /// The surface's own bounding box.
    fn bounds(&self) -> Aabb;

    /// Intersects the ray with this surface, returning the nearest hit.
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit>;
}

impl<S: Surface + ?Sized> Surface for &S {
    fn bounds(&self) -> Aabb {
        (**self).bounds()
    }

    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        (**self).intersect(ray)
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn bounds(&self) -> Aabb {
        (**self).bounds()
    }

    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        (**self).intersect(ray)
    }
}

/// Orients `normal` so that it faces against `direction`.
#[inline]
pub(crate) fn facing(normal: Vector3<f32>, direction: Vector3<f32>) -> Vector3<f32> {
    if normal.dot(&direction) > 0.0 {
        -normal
    } else {
        normal
    }
}
