//! kd-tree for closest-hit ray queries.
//!
//! This module provides a kd-tree that recursively partitions 3D space with
//! axis-aligned planes so that a ray only needs to be tested against the
//! surfaces near its path. The tree enables:
//!
//! - Closest-hit queries for rendering (`KdTree::intersect`)
//! - Concurrent queries from many threads against one immutable tree
//! - Structural inspection by left/right path for debugging tools
//!
//! # Example
//!
//! ```ignore
//! use kd_accel::{Cuboid, KdTree, Ray};
//! use nalgebra::{Point3, Vector3};
//!
//! let cubes = vec![
//!     Cuboid::cube(Point3::new(0.0, 0.0, 0.0), 1.0),
//!     Cuboid::cube(Point3::new(10.0, 0.0, 0.0), 1.0),
//!     Cuboid::cube(Point3::new(20.0, 0.0, 0.0), 1.0),
//! ];
//! let tree = KdTree::from_surfaces(cubes)?;
//!
//! let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vector3::x());
//! let hit = tree.intersect(&ray).unwrap();
//! assert_eq!(hit.distance, 4.5);
//! ```
//!
//! # Architecture
//!
//! - [`KdTree`]: The main container owning the surfaces and the root node
//! - [`KdNode`]: Nodes storing a box, the overlapping surfaces and optional children
//! - [`SplitSelector`]: Strategy trait for choosing split coordinates
//! - [`LeafVisitor`]: Visitor trait for walking the leaves

mod node;
mod options;
mod path;
mod selector;
mod tree;
mod visitor;

// Re-export main types
pub use node::{KdNode, SplitPlane};
pub use options::{KdTreeOptions, Traversal, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
pub use path::{NodePath, Side};
pub use selector::{BoxMidpoint, MedianExtent, SplitSelector};
pub use tree::{KdTree, BOUNDS_PADDING};
pub use visitor::{CollectingVisitor, FnVisitor, LeafRecord, LeafVisitor};
