//! Error types for tree construction.

use thiserror::Error;

use crate::{Axis, SurfaceId};

/// Errors that can occur while building a [`KdTree`](crate::KdTree).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    /// No surfaces were supplied.
    #[error("cannot build a kd-tree without surfaces")]
    NoSurfaces,

    /// The root box has zero, inverted or non-finite extent on an axis.
    #[error("root bounds have non-positive extent {extent} along the {axis} axis")]
    DegenerateBounds { axis: Axis, extent: f32 },

    /// A surface reported a box with non-finite coordinates.
    #[error("surface {0} has non-finite bounds")]
    NonFiniteSurface(SurfaceId),

    /// Build options are out of range.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Result type for tree construction.
pub type Result<T> = std::result::Result<T, BuildError>;
