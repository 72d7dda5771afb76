//! Visitor pattern for kd-tree leaf enumeration.
//!
//! Visitors allow custom processing of leaves during a walk over the tree
//! without coupling the walk to specific use cases.

use crate::{Aabb, SurfaceId};

use super::node::KdNode;
use super::path::NodePath;

/// Visitor for processing leaves during [`KdTree::visit_leaves`](crate::KdTree::visit_leaves).
///
/// Common uses include:
/// - Drawing leaf boxes for debugging
/// - Gathering occupancy statistics
/// - Checking structural invariants in tests
pub trait LeafVisitor {
    /// Called once per leaf, left subtrees before right subtrees.
    fn visit(&mut self, path: &NodePath, leaf: &KdNode);
}

/// A snapshot of one leaf, as gathered by [`CollectingVisitor`].
#[derive(Debug, Clone, PartialEq)]
pub struct LeafRecord {
    pub path: NodePath,
    pub bounds: Aabb,
    pub depth: usize,
    pub surfaces: Vec<SurfaceId>,
}

/// A simple visitor that collects every visited leaf.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    collected: Vec<LeafRecord>,
}

impl CollectingVisitor {
    /// Creates a new empty collecting visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected leaves.
    pub fn into_leaves(self) -> Vec<LeafRecord> {
        self.collected
    }

    /// Returns a reference to the collected leaves.
    pub fn leaves(&self) -> &[LeafRecord] {
        &self.collected
    }
}

impl LeafVisitor for CollectingVisitor {
    fn visit(&mut self, path: &NodePath, leaf: &KdNode) {
        self.collected.push(LeafRecord {
            path: path.clone(),
            bounds: *leaf.bounds(),
            depth: leaf.depth(),
            surfaces: leaf.surfaces().to_vec(),
        });
    }
}

/// A visitor that calls a closure for each leaf.
pub struct FnVisitor<F>
where
    F: FnMut(&NodePath, &KdNode),
{
    func: F,
}

impl<F> FnVisitor<F>
where
    F: FnMut(&NodePath, &KdNode),
{
    /// Creates a new visitor from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> LeafVisitor for FnVisitor<F>
where
    F: FnMut(&NodePath, &KdNode),
{
    fn visit(&mut self, path: &NodePath, leaf: &KdNode) {
        (self.func)(path, leaf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kd::path::Side;
    use nalgebra::Point3;

    fn make_leaf(surfaces: &[usize]) -> KdNode {
        KdNode::leaf(
            Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0)),
            2,
            surfaces.iter().copied().map(SurfaceId::new).collect(),
        )
    }

    #[test]
    fn collecting_visitor_empty() {
        let visitor = CollectingVisitor::new();
        assert!(visitor.leaves().is_empty());
    }

    #[test]
    fn collecting_visitor_collects() {
        let mut visitor = CollectingVisitor::new();
        let left = NodePath::root().child(Side::Left);
        let right = NodePath::root().child(Side::Right);

        visitor.visit(&left, &make_leaf(&[0, 1]));
        visitor.visit(&right, &make_leaf(&[]));

        let collected = visitor.into_leaves();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].path, left);
        assert_eq!(collected[0].surfaces, vec![SurfaceId::new(0), SurfaceId::new(1)]);
        assert_eq!(collected[1].depth, 2);
        assert!(collected[1].surfaces.is_empty());
    }

    #[test]
    fn fn_visitor_calls_closure() {
        let mut count = 0;
        {
            let mut visitor = FnVisitor::new(|_: &NodePath, leaf: &KdNode| {
                count += leaf.surface_count();
            });

            visitor.visit(&NodePath::root(), &make_leaf(&[3, 4, 5]));
        }
        assert_eq!(count, 3);
    }
}
