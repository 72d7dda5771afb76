//! Build and query configuration.

use crate::error::{BuildError, Result};

/// Default depth past which every node becomes a leaf.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Largest accepted `max_depth`; keeps the `2^(depth-1)` leaf threshold in range.
pub const MAX_DEPTH_LIMIT: usize = 32;

/// How [`KdTree::intersect`](crate::KdTree::intersect) orders and prunes children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Visits the nearer child first and only descends into the farther
    /// child while its entry distance does not exceed the best hit so far.
    #[default]
    Bounded,

    /// Visits the nearer child first and returns its hit as soon as it has
    /// one, without consulting the farther child.
    NearestFirst,
}

/// Options for building a [`KdTree`](crate::KdTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdTreeOptions {
    /// Nodes deeper than this are always leaves. The root has depth 1.
    pub max_depth: usize,
    /// Traversal used by queries against the built tree.
    pub traversal: Traversal,
}

impl Default for KdTreeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            traversal: Traversal::default(),
        }
    }
}

impl KdTreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(BuildError::InvalidOptions(format!(
                "max_depth must be within 1..={MAX_DEPTH_LIMIT}, got {}",
                self.max_depth
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = KdTreeOptions::default();
        assert_eq!(options.max_depth, 10);
        assert_eq!(options.traversal, Traversal::Bounded);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let options = KdTreeOptions::new()
            .with_max_depth(4)
            .with_traversal(Traversal::NearestFirst);
        assert_eq!(options.max_depth, 4);
        assert_eq!(options.traversal, Traversal::NearestFirst);
    }

    #[test]
    fn rejects_out_of_range_depth() {
        assert!(matches!(
            KdTreeOptions::new().with_max_depth(0).validate(),
            Err(BuildError::InvalidOptions(_))
        ));
        assert!(KdTreeOptions::new().with_max_depth(MAX_DEPTH_LIMIT).validate().is_ok());
        assert!(KdTreeOptions::new()
            .with_max_depth(MAX_DEPTH_LIMIT + 1)
            .validate()
            .is_err());
    }
}
