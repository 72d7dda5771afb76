//! kd-tree node implementation.

use crate::{Aabb, Axis, SurfaceId};

use super::path::Side;

/// The plane an interior node was split by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPlane {
    pub axis: Axis,
    pub coordinate: f32,
}

/// A node in the kd-tree.
///
/// Every node covers a box of space and lists the surfaces whose own bounds
/// overlap it. Interior nodes additionally own exactly two children whose
/// boxes partition this node's box along [`split`](KdNode::split); only the
/// surface lists of leaves are tested against rays.
#[derive(Debug, Clone)]
pub struct KdNode {
    /// Region of space covered by this node.
    bounds: Aabb,

    /// Depth of this node; the root is at depth 1.
    depth: usize,

    /// Surfaces overlapping `bounds`, in input order.
    surfaces: Vec<SurfaceId>,

    /// Splitting plane, present on interior nodes only.
    split: Option<SplitPlane>,

    /// Subtree below the split coordinate.
    left: Option<Box<KdNode>>,

    /// Subtree above the split coordinate.
    right: Option<Box<KdNode>>,
}

impl KdNode {
    /// Creates a leaf node.
    pub(crate) fn leaf(bounds: Aabb, depth: usize, surfaces: Vec<SurfaceId>) -> Self {
        Self {
            bounds,
            depth,
            surfaces,
            split: None,
            left: None,
            right: None,
        }
    }

    /// Creates an interior node owning both children.
    pub(crate) fn interior(
        bounds: Aabb,
        depth: usize,
        surfaces: Vec<SurfaceId>,
        split: SplitPlane,
        left: KdNode,
        right: KdNode,
    ) -> Self {
        Self {
            bounds,
            depth,
            surfaces,
            split: Some(split),
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the surfaces overlapping this node's box.
    #[inline]
    pub fn surfaces(&self) -> &[SurfaceId] {
        &self.surfaces
    }

    #[inline]
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    #[inline]
    pub fn split(&self) -> Option<SplitPlane> {
        self.split
    }

    #[inline]
    pub fn left(&self) -> Option<&KdNode> {
        self.left.as_deref()
    }

    #[inline]
    pub fn right(&self) -> Option<&KdNode> {
        self.right.as_deref()
    }

    /// Returns the child on the given side.
    #[inline]
    pub fn child(&self, side: Side) -> Option<&KdNode> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Returns the number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.left().map_or(0, |n| n.node_count()) + self.right().map_or(0, |n| n.node_count())
    }

    /// Returns the number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            return 1;
        }
        self.left().map_or(0, |n| n.leaf_count()) + self.right().map_or(0, |n| n.leaf_count())
    }

    /// Returns the height of this subtree (1 for a leaf node).
    pub fn height(&self) -> usize {
        let left_height = self.left().map_or(0, |n| n.height());
        let right_height = self.right().map_or(0, |n| n.height());
        1 + left_height.max(right_height)
    }
}
