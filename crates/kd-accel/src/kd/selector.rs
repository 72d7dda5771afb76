//! Split coordinate selection strategies for kd-tree construction.
//!
//! The split axis is fixed by depth; the selector only decides where along
//! that axis the node's box is cut. Different strategies trade build cost
//! against how evenly surfaces end up distributed between the children.

use crate::{Aabb, Axis};

/// Strategy for choosing the coordinate at which a node is split.
pub trait SplitSelector {
    /// Picks a split coordinate along `axis` for a node covering `bounds`
    /// whose overlapping surfaces have the boxes in `surfaces`.
    ///
    /// `surfaces` is never empty. The returned coordinate may lie outside
    /// `bounds`; it is clamped when the box is split.
    fn select(&self, bounds: &Aabb, surfaces: &[Aabb], axis: Axis) -> f32;
}

/// Median of the surface extents.
///
/// Collects the min and max extent of every surface box along the axis
/// (`2N` values), sorts them and takes the value at index `N`, i.e. the
/// upper of the two middle values. This is the default selector.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianExtent;

impl SplitSelector for MedianExtent {
    fn select(&self, _bounds: &Aabb, surfaces: &[Aabb], axis: Axis) -> f32 {
        let mut extents: Vec<f32> = surfaces
            .iter()
            .flat_map(|b| [b.min_along(axis), b.max_along(axis)])
            .collect();
        extents.sort_by(f32::total_cmp);
        extents[surfaces.len()]
    }
}

/// Spatial median: cuts the node's box in half, ignoring the surfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxMidpoint;

impl SplitSelector for BoxMidpoint {
    fn select(&self, bounds: &Aabb, _surfaces: &[Aabb], axis: Axis) -> f32 {
        (bounds.min_along(axis) + bounds.max_along(axis)) * 0.5
    }
}
