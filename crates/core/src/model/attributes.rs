//! Per-node drawing attributes: colors and grid positions.
//!
//! Colors classify the vertices of the augmented graph:
//! - `Black` — an original input vertex
//! - `Red` — a bend corner inserted by the shape repair loop
//! - `Green` / `Blue` — auxiliaries splitting a high-degree vertex
//!   (horizontal resp. vertical originals)
//! - `GreenDark` / `BlueDark` — offset auxiliaries and repaired rotations
//!   that must not be picked again

use super::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Vertex classification in the augmented graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
    RedSpecial,
    Green,
    GreenDark,
    Blue,
    BlueDark,
}

impl Color {
    /// CSS-compatible color name (used by the SVG and GraphML writers).
    pub fn css_name(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::RedSpecial => "darkred",
            Color::Green => "green",
            Color::GreenDark => "darkgreen",
            Color::Blue => "blue",
            Color::BlueDark => "darkblue",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// An integer grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Typed per-node attribute stores.
///
/// Setters distinguish first assignment (`set_*`, panics on overwrite) from
/// updates (`change_*`, panics when unset) so stale state surfaces as an
/// invariant failure instead of silently winning.
#[derive(Debug, Clone, Default)]
pub struct GraphAttributes {
    colors: HashMap<NodeId, Color>,
    positions: HashMap<NodeId, Point>,
}

impl GraphAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Colors
    // =========================================================================

    /// Assign a color to a node for the first time.
    ///
    /// # Panics
    /// Panics if the node already has a color.
    pub fn set_color(&mut self, node_id: NodeId, color: Color) {
        let previous = self.colors.insert(node_id, color);
        assert!(
            previous.is_none(),
            "GraphAttributes::set_color: node {node_id} already has a color"
        );
    }

    /// Replace the color of a node.
    ///
    /// # Panics
    /// Panics if the node has no color yet.
    pub fn change_color(&mut self, node_id: NodeId, color: Color) {
        let slot = self
            .colors
            .get_mut(&node_id)
            .unwrap_or_else(|| panic!("GraphAttributes::change_color: node {node_id} has no color"));
        *slot = color;
    }

    /// Color of a node.
    ///
    /// # Panics
    /// Panics if the node has no color.
    pub fn color(&self, node_id: NodeId) -> Color {
        *self
            .colors
            .get(&node_id)
            .unwrap_or_else(|| panic!("GraphAttributes::color: node {node_id} has no color"))
    }

    pub fn has_color(&self, node_id: NodeId) -> bool {
        self.colors.contains_key(&node_id)
    }

    // =========================================================================
    // Positions
    // =========================================================================

    /// Assign a position to a node for the first time.
    ///
    /// # Panics
    /// Panics if the node already has a position.
    pub fn set_position(&mut self, node_id: NodeId, x: i32, y: i32) {
        let previous = self.positions.insert(node_id, Point { x, y });
        assert!(
            previous.is_none(),
            "GraphAttributes::set_position: node {node_id} already has a position"
        );
    }

    pub fn has_position(&self, node_id: NodeId) -> bool {
        self.positions.contains_key(&node_id)
    }

    /// Position of a node.
    ///
    /// # Panics
    /// Panics if the node has no position.
    pub fn position(&self, node_id: NodeId) -> Point {
        *self
            .positions
            .get(&node_id)
            .unwrap_or_else(|| panic!("GraphAttributes::position: node {node_id} has no position"))
    }

    pub fn position_x(&self, node_id: NodeId) -> i32 {
        self.position(node_id).x
    }

    pub fn position_y(&self, node_id: NodeId) -> i32 {
        self.position(node_id).y
    }

    /// Update the x coordinate of a placed node.
    ///
    /// # Panics
    /// Panics if the node has no position.
    pub fn change_position_x(&mut self, node_id: NodeId, x: i32) {
        self.positions
            .get_mut(&node_id)
            .unwrap_or_else(|| {
                panic!("GraphAttributes::change_position_x: node {node_id} has no position")
            })
            .x = x;
    }

    /// Update the y coordinate of a placed node.
    ///
    /// # Panics
    /// Panics if the node has no position.
    pub fn change_position_y(&mut self, node_id: NodeId, y: i32) {
        self.positions
            .get_mut(&node_id)
            .unwrap_or_else(|| {
                panic!("GraphAttributes::change_position_y: node {node_id} has no position")
            })
            .y = y;
    }

    /// Drop the position of a node, if any.
    pub fn remove_position(&mut self, node_id: NodeId) {
        self.positions.remove(&node_id);
    }

    /// Drop every position (interim placements are rebuilt from scratch).
    pub fn clear_positions(&mut self) {
        self.positions.clear();
    }

    /// Drop every attribute of a node (used when a node is deleted).
    pub fn remove_node_attributes(&mut self, node_id: NodeId) {
        self.colors.remove(&node_id);
        self.positions.remove(&node_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lifecycle() {
        let mut attributes = GraphAttributes::new();
        attributes.set_color(0, Color::Black);
        assert_eq!(attributes.color(0), Color::Black);
        attributes.change_color(0, Color::Red);
        assert_eq!(attributes.color(0), Color::Red);
    }

    #[test]
    fn test_position_lifecycle() {
        let mut attributes = GraphAttributes::new();
        attributes.set_position(0, 100, 200);
        attributes.change_position_x(0, 300);
        assert_eq!(attributes.position(0), Point { x: 300, y: 200 });
        attributes.remove_position(0);
        assert!(!attributes.has_position(0));
    }

    #[test]
    #[should_panic(expected = "already has a color")]
    fn test_set_color_twice_panics() {
        let mut attributes = GraphAttributes::new();
        attributes.set_color(0, Color::Black);
        attributes.set_color(0, Color::Red);
    }
}
