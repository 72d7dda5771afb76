//! kd-tree container, construction and ray traversal.

use crate::error::{BuildError, Result};
use crate::{Aabb, Axis, Hit, Ray, Surface, SurfaceId};

use super::node::{KdNode, SplitPlane};
use super::options::{KdTreeOptions, Traversal};
use super::path::{NodePath, Side};
use super::selector::{MedianExtent, SplitSelector};
use super::visitor::LeafVisitor;

/// Margin added around the union of surface bounds when the root box is
/// derived automatically, so that hits on the outermost faces lie strictly
/// inside the root and flat scenes still get a box with positive extent.
pub const BOUNDS_PADDING: f32 = 1e-3;

/// A kd-tree over a set of surfaces, answering closest-hit ray queries.
///
/// The tree recursively splits its root box with axis-aligned planes. The
/// split axis cycles with depth (`depth mod 3`) and the split coordinate is
/// chosen by a [`SplitSelector`]. A node stops splitting once it holds fewer
/// than `2^(depth-1)` surfaces or lies deeper than
/// [`KdTreeOptions::max_depth`]. Surfaces straddling a split plane are listed
/// in both children.
///
/// # Construction
///
/// ```ignore
/// use kd_accel::{Cuboid, KdTree};
/// use nalgebra::Point3;
///
/// let cubes = vec![
///     Cuboid::cube(Point3::new(0.0, 0.0, 0.0), 1.0),
///     Cuboid::cube(Point3::new(10.0, 0.0, 0.0), 1.0),
/// ];
/// let tree = KdTree::from_surfaces(cubes)?;
/// ```
///
/// # Queries
///
/// The tree is immutable once built, so any number of threads may call
/// [`intersect`](KdTree::intersect) on it concurrently:
///
/// ```ignore
/// let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vector3::x());
/// let hit = tree.intersect(&ray);
/// ```
#[derive(Debug, Clone)]
pub struct KdTree<S> {
    surfaces: Vec<S>,
    root: KdNode,
    options: KdTreeOptions,
}

impl<S: Surface> KdTree<S> {
    /// Builds a tree with default options and the [`MedianExtent`] selector.
    pub fn from_surfaces(surfaces: Vec<S>) -> Result<Self> {
        Self::build(surfaces, KdTreeOptions::default(), &MedianExtent)
    }

    /// Builds a tree whose root box is the padded union of all surface bounds.
    pub fn build<P: SplitSelector>(
        surfaces: Vec<S>,
        options: KdTreeOptions,
        selector: &P,
    ) -> Result<Self> {
        options.validate()?;
        let boxes = surface_bounds(&surfaces)?;
        let bounds = boxes
            .iter()
            .fold(boxes[0], |acc, b| acc.union(b))
            .padded(BOUNDS_PADDING);

        Self::build_from_boxes(bounds, surfaces, boxes, options, selector)
    }

    /// Builds a tree over an explicit root box.
    ///
    /// Surfaces are filtered against `bounds` like at every other level, and
    /// hits outside `bounds` are never reported.
    pub fn build_in<P: SplitSelector>(
        bounds: Aabb,
        surfaces: Vec<S>,
        options: KdTreeOptions,
        selector: &P,
    ) -> Result<Self> {
        options.validate()?;
        let boxes = surface_bounds(&surfaces)?;
        Self::build_from_boxes(bounds, surfaces, boxes, options, selector)
    }

    fn build_from_boxes<P: SplitSelector>(
        bounds: Aabb,
        surfaces: Vec<S>,
        boxes: Vec<Aabb>,
        options: KdTreeOptions,
        selector: &P,
    ) -> Result<Self> {
        bounds.validate()?;

        let builder = Builder {
            boxes: &boxes,
            selector,
            max_depth: options.max_depth,
        };
        let candidates: Vec<SurfaceId> = (0..surfaces.len()).map(SurfaceId::new).collect();
        let root = builder.build_node(bounds, &candidates, 1, &NodePath::root());

        log::debug!(
            "kd-tree built: {} surfaces, {} nodes, {} leaves, height {}",
            surfaces.len(),
            root.node_count(),
            root.leaf_count(),
            root.height()
        );

        Ok(Self {
            surfaces,
            root,
            options,
        })
    }

    /// Finds the closest surface hit by `ray`, or `None` on a miss.
    ///
    /// Uses the traversal selected in [`KdTreeOptions::traversal`].
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        self.root.bounds().check(ray)?;

        match self.options.traversal {
            Traversal::Bounded => self.intersect_bounded(&self.root, ray, f32::INFINITY),
            Traversal::NearestFirst => self.intersect_nearest_first(&self.root, ray),
        }
    }

    /// Finds the closest hit by testing every surface, without the tree.
    ///
    /// Applies the same acceptance rules as the tree (non-negative distance,
    /// hit point inside the root box), so it serves as a reference result.
    pub fn intersect_exhaustive(&self, ray: &Ray) -> Option<Hit> {
        let all: Vec<SurfaceId> = (0..self.surfaces.len()).map(SurfaceId::new).collect();
        self.closest_in(self.root.bounds(), &all, ray, f32::INFINITY)
    }

    /// Nearest-child-first descent with pruning against the best hit so far.
    ///
    /// Returns only hits no farther than `max_distance`.
    fn intersect_bounded(&self, node: &KdNode, ray: &Ray, max_distance: f32) -> Option<Hit> {
        let (Some(left), Some(right)) = (node.left(), node.right()) else {
            return self.intersect_surfaces(node, ray, max_distance);
        };

        let mut near = left.bounds().check(ray).map(|t| (t, left));
        let mut far = right.bounds().check(ray).map(|t| (t, right));
        let swap = match (near, far) {
            (Some((l, _)), Some((r, _))) => r <= l,
            (None, Some(_)) => true,
            _ => false,
        };
        if swap {
            std::mem::swap(&mut near, &mut far);
        }

        let mut best: Option<Hit> = None;
        let mut limit = max_distance;
        for (entry, child) in [near, far].into_iter().flatten() {
            // Children are ordered by entry, and a child only reports hits
            // inside its box, so nothing past `limit` can improve the result.
            if entry > limit {
                break;
            }
            if let Some(hit) = self.intersect_bounded(child, ray, limit) {
                limit = hit.distance;
                best = Some(hit.closer(best));
            }
        }
        best
    }

    /// Nearest-child-first descent that stops at the first child with a hit.
    fn intersect_nearest_first(&self, node: &KdNode, ray: &Ray) -> Option<Hit> {
        let (Some(left), Some(right)) = (node.left(), node.right()) else {
            return self.intersect_surfaces(node, ray, f32::INFINITY);
        };

        match (left.bounds().check(ray), right.bounds().check(ray)) {
            (Some(l), Some(r)) => {
                let (near, far) = if l < r { (left, right) } else { (right, left) };
                self.intersect_nearest_first(near, ray)
                    .or_else(|| self.intersect_nearest_first(far, ray))
            }
            (Some(_), None) => self.intersect_nearest_first(left, ray),
            (None, Some(_)) => self.intersect_nearest_first(right, ray),
            (None, None) => None,
        }
    }

    /// Leaf test: closest hit among the leaf's surfaces whose hit point lies in the leaf box.
    fn intersect_surfaces(&self, leaf: &KdNode, ray: &Ray, max_distance: f32) -> Option<Hit> {
        self.closest_in(leaf.bounds(), leaf.surfaces(), ray, max_distance)
    }

    fn closest_in(
        &self,
        bounds: &Aabb,
        ids: &[SurfaceId],
        ray: &Ray,
        max_distance: f32,
    ) -> Option<Hit> {
        ids.iter()
            .filter_map(|&id| {
                let hit = self.surfaces[id.index()].intersect(ray)?;
                if hit.distance < 0.0 || hit.distance > max_distance {
                    return None;
                }
                let point = ray.point_at(hit.distance);
                bounds.contains(point).then_some(Hit {
                    surface: id,
                    distance: hit.distance,
                    point,
                    normal: hit.normal,
                })
            })
            .fold(None, |closest, hit| Some(hit.closer(closest)))
    }
}

impl<S> KdTree<S> {
    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &KdNode {
        &self.root
    }

    /// Returns the root box.
    #[inline]
    pub fn bounds(&self) -> &Aabb {
        self.root.bounds()
    }

    #[inline]
    pub fn options(&self) -> &KdTreeOptions {
        &self.options
    }

    /// Returns the surfaces in the order they were supplied.
    #[inline]
    pub fn surfaces(&self) -> &[S] {
        &self.surfaces
    }

    /// Returns the surface a hit refers to.
    #[inline]
    pub fn surface(&self, id: SurfaceId) -> Option<&S> {
        self.surfaces.get(id.index())
    }

    /// Consumes the tree, returning its surfaces.
    pub fn into_surfaces(self) -> Vec<S> {
        self.surfaces
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Returns the number of levels in the tree (1 when the root is a leaf).
    pub fn depth(&self) -> usize {
        self.root.height()
    }

    /// Follows `path` from the root, returning `None` if it leaves the tree.
    pub fn node_at(&self, path: &NodePath) -> Option<&KdNode> {
        let mut current = &self.root;
        for &side in path.sides() {
            current = current.child(side)?;
        }
        Some(current)
    }

    /// Calls `visitor` for every leaf, left subtrees first.
    pub fn visit_leaves<V: LeafVisitor>(&self, visitor: &mut V) {
        let mut path = NodePath::root();
        visit_leaves_node(&self.root, &mut path, visitor);
    }
}

/// Recursively visits the leaves of a node subtree.
fn visit_leaves_node<V: LeafVisitor>(node: &KdNode, path: &mut NodePath, visitor: &mut V) {
    if node.is_leaf() {
        visitor.visit(path, node);
        return;
    }
    for side in [Side::Left, Side::Right] {
        if let Some(child) = node.child(side) {
            path.push(side);
            visit_leaves_node(child, path, visitor);
            path.pop();
        }
    }
}

/// Collects and checks the bounds of every surface.
fn surface_bounds<S: Surface>(surfaces: &[S]) -> Result<Vec<Aabb>> {
    if surfaces.is_empty() {
        return Err(BuildError::NoSurfaces);
    }

    surfaces
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let bounds = s.bounds();
            if bounds.is_finite() {
                Ok(bounds)
            } else {
                Err(BuildError::NonFiniteSurface(SurfaceId::new(i)))
            }
        })
        .collect()
}

/// Returns `true` if a node with `count` surfaces at `depth` must be a leaf.
#[inline]
fn is_leaf_node(count: usize, depth: usize, max_depth: usize) -> bool {
    depth > max_depth || (count as u64) < 1u64 << (depth - 1)
}

/// State shared by every level of a build.
struct Builder<'a, P> {
    boxes: &'a [Aabb],
    selector: &'a P,
    max_depth: usize,
}

impl<P: SplitSelector> Builder<'_, P> {
    /// Recursively builds the node covering `bounds` from the parent's surfaces.
    fn build_node(
        &self,
        bounds: Aabb,
        candidates: &[SurfaceId],
        depth: usize,
        path: &NodePath,
    ) -> KdNode {
        let surfaces: Vec<SurfaceId> = candidates
            .iter()
            .copied()
            .filter(|id| self.boxes[id.index()].overlaps(&bounds))
            .collect();

        if is_leaf_node(surfaces.len(), depth, self.max_depth) {
            log::trace!(
                "leaf {path}: depth {depth}, {} surfaces",
                surfaces.len()
            );
            return KdNode::leaf(bounds, depth, surfaces);
        }

        let axis = Axis::from_depth(depth);
        let surface_boxes: Vec<Aabb> = surfaces.iter().map(|id| self.boxes[id.index()]).collect();
        let coordinate = self.selector.select(&bounds, &surface_boxes, axis);
        let (left_bounds, right_bounds) = bounds.split(axis, coordinate);
        let split = SplitPlane {
            axis,
            coordinate: left_bounds.max_along(axis),
        };

        log::trace!(
            "split {path}: depth {depth}, {} surfaces, {axis} = {}",
            surfaces.len(),
            split.coordinate
        );

        let left = self.build_node(left_bounds, &surfaces, depth + 1, &path.child(Side::Left));
        let right = self.build_node(right_bounds, &surfaces, depth + 1, &path.child(Side::Right));

        KdNode::interior(bounds, depth, surfaces, split, left, right)
    }
}
