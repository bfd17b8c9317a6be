//! Edge directions and the shape of a drawing.

use crate::model::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One of the four axis-aligned directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// All directions, in the order variables are allocated.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Rotate a quarter turn clockwise.
    pub fn rotated_90(self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// The shape of a drawing: a direction for every directed edge.
///
/// For each undirected edge both ordered pairs are present, with opposite
/// directions.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    directions: HashMap<(NodeId, NodeId), Direction>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the direction of one ordered pair.
    ///
    /// # Panics
    /// Panics if the pair already has a direction.
    pub fn set_direction(&mut self, from: NodeId, to: NodeId, direction: Direction) {
        let previous = self.directions.insert((from, to), direction);
        assert!(
            previous.is_none(),
            "Shape::set_direction: direction already set for ({from}, {to})"
        );
    }

    /// Set both orientations of an edge at once.
    pub fn assign(&mut self, from: NodeId, to: NodeId, direction: Direction) {
        self.set_direction(from, to, direction);
        self.set_direction(to, from, direction.opposite());
    }

    /// Remove the direction of one ordered pair.
    ///
    /// # Panics
    /// Panics if the pair has no direction.
    pub fn remove_direction(&mut self, from: NodeId, to: NodeId) {
        let removed = self.directions.remove(&(from, to));
        assert!(
            removed.is_some(),
            "Shape::remove_direction: no direction for ({from}, {to})"
        );
    }

    /// Remove both orientations of an edge.
    pub fn clear_pair(&mut self, from: NodeId, to: NodeId) {
        self.remove_direction(from, to);
        self.remove_direction(to, from);
    }

    pub fn contains(&self, from: NodeId, to: NodeId) -> bool {
        self.directions.contains_key(&(from, to))
    }

    /// Direction of an ordered pair.
    ///
    /// # Panics
    /// Panics if the pair has no direction.
    pub fn direction(&self, from: NodeId, to: NodeId) -> Direction {
        *self
            .directions
            .get(&(from, to))
            .unwrap_or_else(|| panic!("Shape::direction: no direction for ({from}, {to})"))
    }

    pub fn is_up(&self, from: NodeId, to: NodeId) -> bool {
        self.direction(from, to) == Direction::Up
    }

    pub fn is_down(&self, from: NodeId, to: NodeId) -> bool {
        self.direction(from, to) == Direction::Down
    }

    pub fn is_left(&self, from: NodeId, to: NodeId) -> bool {
        self.direction(from, to) == Direction::Left
    }

    pub fn is_right(&self, from: NodeId, to: NodeId) -> bool {
        self.direction(from, to) == Direction::Right
    }

    pub fn is_horizontal(&self, from: NodeId, to: NodeId) -> bool {
        self.direction(from, to).is_horizontal()
    }

    pub fn is_vertical(&self, from: NodeId, to: NodeId) -> bool {
        self.direction(from, to).is_vertical()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shape:")?;
        for (&(from, to), direction) in &self.directions {
            // one line per undirected edge
            if matches!(direction, Direction::Left | Direction::Down) {
                continue;
            }
            writeln!(f, "({from} -> {to}): {direction}")?;
        }
        Ok(())
    }
}
