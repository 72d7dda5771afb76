//! Closest-hit records produced by the tree.

use nalgebra::{Point3, Vector3};

use crate::SurfaceId;

/// An accepted intersection between a ray and one of the tree's surfaces.
///
/// A miss is represented by `None` wherever a `Hit` is expected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// The surface that was hit.
    pub surface: SurfaceId,
    /// Parametric distance along the ray.
    pub distance: f32,
    /// World-space hit point.
    pub point: Point3<f32>,
    /// Unit normal at the hit point.
    pub normal: Vector3<f32>,
}

impl Hit {
    /// Returns whichever of `self` and `other` is closer to the ray origin.
    ///
    /// A miss always loses; on equal distances `other` is kept, so folding
    /// hits in scan order favours the earliest one.
    pub fn closer(self, other: Option<Hit>) -> Hit {
        match other {
            Some(other) if other.distance <= self.distance => other,
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_hit(surface: usize, distance: f32) -> Hit {
        Hit {
            surface: SurfaceId::new(surface),
            distance,
            point: Point3::origin(),
            normal: Vector3::x(),
        }
    }

    #[test]
    fn closer_than_miss() {
        let hit = make_hit(0, 3.0);
        assert_eq!(hit.closer(None), hit);
    }

    #[test]
    fn closer_picks_smaller_distance() {
        let near = make_hit(0, 1.0);
        let far = make_hit(1, 2.0);

        assert_eq!(near.closer(Some(far)), near);
        assert_eq!(far.closer(Some(near)), near);
    }

    #[test]
    fn closer_keeps_existing_on_tie() {
        let first = make_hit(0, 1.0);
        let second = make_hit(1, 1.0);
        assert_eq!(second.closer(Some(first)).surface, SurfaceId::new(0));
    }
}
