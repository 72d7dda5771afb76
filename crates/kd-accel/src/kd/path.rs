//! Structural node addressing.

use std::fmt;

/// Which child of an interior node to descend into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The child below the split coordinate.
    Left,
    /// The child above the split coordinate.
    Right,
}

/// The sequence of left/right choices leading from the root to a node.
///
/// Paths are stable across builds of the same input, which makes them usable
/// as labels in logs and in interactive tools. The root has the empty path
/// and is displayed as `root`; other paths are displayed like `LRL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<Side>);

impl NodePath {
    /// The path of the root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the path one step further down.
    pub fn child(&self, side: Side) -> Self {
        let mut path = self.clone();
        path.push(side);
        path
    }

    pub fn push(&mut self, side: Side) {
        self.0.push(side);
    }

    /// Removes the last step, returning it; `None` at the root.
    pub fn pop(&mut self) -> Option<Side> {
        self.0.pop()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of steps from the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always equal to `is_root`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sides(&self) -> &[Side] {
        &self.0
    }
}

impl From<Vec<Side>> for NodePath {
    fn from(sides: Vec<Side>) -> Self {
        Self(sides)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("root");
        }
        for side in &self.0 {
            f.write_str(match side {
                Side::Left => "L",
                Side::Right => "R",
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_display() {
        assert_eq!(NodePath::root().to_string(), "root");
        assert!(NodePath::root().is_root());
    }

    #[test]
    fn child_display() {
        let path = NodePath::root()
            .child(Side::Left)
            .child(Side::Right)
            .child(Side::Left);
        assert_eq!(path.to_string(), "LRL");
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn push_and_pop() {
        let mut path = NodePath::root();
        path.push(Side::Right);
        path.push(Side::Right);
        assert_eq!(path.pop(), Some(Side::Right));
        assert_eq!(path.sides(), &[Side::Right]);
        path.clear();
        assert_eq!(path.pop(), None);
    }
}
