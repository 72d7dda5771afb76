//! kd-tree ray acceleration structure.
//!
//! Builds a kd-tree over a set of [`Surface`]s and answers "which surface
//! does this ray hit first" queries against it. Ships with the box, ray and
//! hit types the tree works with, plus a few ready-made surfaces.

mod aabb;
mod cuboid;
mod error;
mod hit;
pub mod kd;
mod plane;
mod ray;
mod rectangle;
mod surface;
mod triangle;

pub use aabb::{Aabb, Axis, CONTAINS_EPSILON};
pub use cuboid::Cuboid;
pub use error::{BuildError, Result};
pub use hit::Hit;
pub use kd::{
    BoxMidpoint, KdNode, KdTree, KdTreeOptions, MedianExtent, NodePath, Side, SplitSelector,
    Traversal,
};
pub use plane::{Plane3D, PlaneSide, PLANE_EPSILON};
pub use ray::Ray;
pub use rectangle::Rectangle;
pub use surface::{Surface, SurfaceHit, SurfaceId};
pub use triangle::Triangle;
