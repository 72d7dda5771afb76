//! kd-tree navigation utilities for interactive visualization.

use kd_accel::{KdNode, KdTree, NodePath, Side};
use macroquad::prelude::*;

use crate::draw_bounds;

/// Interactive kd-tree navigator for exploring tree structure.
pub struct TreeNavigator {
    path: NodePath,
}

impl Default for TreeNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeNavigator {
    /// Creates a new navigator starting at the root.
    pub fn new() -> Self {
        Self {
            path: NodePath::root(),
        }
    }

    /// Returns the current navigation path.
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// Attempts to navigate to a child. Returns true if successful.
    pub fn go_child<S>(&mut self, tree: &KdTree<S>, side: Side) -> bool {
        let has_child = self
            .current_node(tree)
            .is_some_and(|node| node.child(side).is_some());
        if has_child {
            self.path.push(side);
        }
        has_child
    }

    /// Navigates to the parent node. Returns true if not already at root.
    pub fn go_parent(&mut self) -> bool {
        self.path.pop().is_some()
    }

    /// Returns to the root node.
    pub fn go_root(&mut self) {
        self.path.clear();
    }

    /// Handles keyboard input for navigation.
    /// Returns true if navigation state changed.
    pub fn update<S>(&mut self, tree: &KdTree<S>) -> bool {
        let mut changed = false;

        if is_key_pressed(KeyCode::L) {
            changed = self.go_child(tree, Side::Left);
        }
        if is_key_pressed(KeyCode::R) {
            changed = self.go_child(tree, Side::Right);
        }
        if is_key_pressed(KeyCode::P) {
            changed = self.go_parent();
        }
        if is_key_pressed(KeyCode::O) && !self.path.is_root() {
            self.go_root();
            changed = true;
        }

        changed
    }

    /// Returns a reference to the current node.
    pub fn current_node<'a, S>(&self, tree: &'a KdTree<S>) -> Option<&'a KdNode> {
        tree.node_at(&self.path)
    }

    /// Draws the current node's box and the leaf boxes below it.
    pub fn render<S>(&self, tree: &KdTree<S>) {
        if let Some(node) = self.current_node(tree) {
            render_leaves(node);
            draw_bounds(node.bounds(), YELLOW);
        }
    }

    /// Draws the navigation UI overlay.
    pub fn draw_ui<S>(&self, tree: &KdTree<S>, y_offset: f32) {
        let Some(node) = self.current_node(tree) else {
            return;
        };

        draw_text(
            &format!(
                "Node: {} surfaces, {} leaves below",
                node.surface_count(),
                node.leaf_count()
            ),
            10.0,
            y_offset,
            18.0,
            WHITE,
        );
        draw_text(
            &format!("Path: {} (depth {})", self.path, node.depth()),
            10.0,
            y_offset + 20.0,
            18.0,
            YELLOW,
        );
        let split = match node.split() {
            Some(split) => format!("Split: {} = {:.3} | [L]eft [R]ight", split.axis, split.coordinate),
            None => "(leaf)".to_string(),
        };
        draw_text(
            &split,
            10.0,
            y_offset + 40.0,
            18.0,
            if node.is_leaf() { ORANGE } else { GREEN },
        );
        draw_text("[P]arent | R[o]ot", 10.0, y_offset + 60.0, 16.0, DARKGRAY);
    }
}

/// Recursively draws the leaf boxes of a node's subtree.
fn render_leaves(node: &KdNode) {
    if node.is_leaf() {
        draw_bounds(node.bounds(), Color::new(0.4, 0.8, 0.4, 0.5));
        return;
    }
    for side in [Side::Left, Side::Right] {
        if let Some(child) = node.child(side) {
            render_leaves(child);
        }
    }
}
