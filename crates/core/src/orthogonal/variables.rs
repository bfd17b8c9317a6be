//! Bijection between SAT variables and (edge, direction) pairs.
//!
//! Each undirected edge `{u, v}` (taken with `u < v`) owns four variables,
//! allocated in the order UP, DOWN, LEFT, RIGHT. The reverse orientation
//! aliases the same variables with flipped meaning: `up(u, v) ≡ down(v, u)`
//! and `left(u, v) ≡ right(v, u)`.

use super::shape::Direction;
use crate::model::{NodeId, UndirectedGraph};
use std::collections::HashMap;

/// Variable bookkeeping for one CNF encoding round.
#[derive(Debug, Default)]
pub struct VariablesHandler {
    next_variable: i32,
    variable_to_edge: HashMap<i32, (NodeId, NodeId)>,
    variable_values: HashMap<i32, bool>,
    up: HashMap<(NodeId, NodeId), i32>,
    down: HashMap<(NodeId, NodeId), i32>,
    left: HashMap<(NodeId, NodeId), i32>,
    right: HashMap<(NodeId, NodeId), i32>,
}

impl VariablesHandler {
    /// Allocate variables for every edge of the graph.
    pub fn new(graph: &UndirectedGraph) -> Self {
        let mut handler = Self {
            next_variable: 1, // 0 is reserved for the clause terminator
            ..Self::default()
        };
        for node_id in graph.node_ids() {
            for edge in graph.edges_of(node_id) {
                if node_id > edge.to {
                    continue;
                }
                handler.add_edge_variables(node_id, edge.to);
            }
        }
        handler
    }

    fn add_variable(&mut self, from: NodeId, to: NodeId, direction: Direction) {
        let variable = self.next_variable;
        self.next_variable += 1;
        self.variable_to_edge.insert(variable, (from, to));
        match direction {
            Direction::Up => {
                self.up.insert((from, to), variable);
                self.down.insert((to, from), variable);
            }
            Direction::Down => {
                self.down.insert((from, to), variable);
                self.up.insert((to, from), variable);
            }
            Direction::Left => {
                self.left.insert((from, to), variable);
                self.right.insert((to, from), variable);
            }
            Direction::Right => {
                self.right.insert((from, to), variable);
                self.left.insert((to, from), variable);
            }
        }
    }

    fn add_edge_variables(&mut self, from: NodeId, to: NodeId) {
        self.add_variable(from, to, Direction::Up);
        self.add_variable(from, to, Direction::Down);
        self.add_variable(from, to, Direction::Left);
        self.add_variable(from, to, Direction::Right);
    }

    /// # Panics
    /// All variable lookups panic when the edge has no variables, which
    /// signals a stale handler.
    pub fn up_variable(&self, from: NodeId, to: NodeId) -> i32 {
        self.up[&(from, to)]
    }

    pub fn down_variable(&self, from: NodeId, to: NodeId) -> i32 {
        self.down[&(from, to)]
    }

    pub fn left_variable(&self, from: NodeId, to: NodeId) -> i32 {
        self.left[&(from, to)]
    }

    pub fn right_variable(&self, from: NodeId, to: NodeId) -> i32 {
        self.right[&(from, to)]
    }

    pub fn variable(&self, from: NodeId, to: NodeId, direction: Direction) -> i32 {
        match direction {
            Direction::Up => self.up_variable(from, to),
            Direction::Down => self.down_variable(from, to),
            Direction::Left => self.left_variable(from, to),
            Direction::Right => self.right_variable(from, to),
        }
    }

    /// The canonical `(u, v)` edge a variable belongs to.
    ///
    /// # Panics
    /// Panics for an unknown variable.
    pub fn edge_of_variable(&self, variable: i32) -> (NodeId, NodeId) {
        *self
            .variable_to_edge
            .get(&variable)
            .unwrap_or_else(|| panic!("VariablesHandler: unknown variable {variable}"))
    }

    /// Record a solver assignment.
    ///
    /// # Panics
    /// Panics if the variable already has a value.
    pub fn set_variable_value(&mut self, variable: i32, value: bool) {
        let previous = self.variable_values.insert(variable, value);
        assert!(
            previous.is_none(),
            "VariablesHandler: value of variable {variable} already set"
        );
    }

    /// Value of a variable under the recorded assignment.
    ///
    /// # Panics
    /// Panics if the variable has no recorded value.
    pub fn variable_value(&self, variable: i32) -> bool {
        *self
            .variable_values
            .get(&variable)
            .unwrap_or_else(|| panic!("VariablesHandler: variable {variable} has no value"))
    }

    /// Decode the direction of an edge from the recorded assignment.
    ///
    /// # Panics
    /// Panics if no direction variable of the edge is true.
    pub fn direction_of_edge(&self, from: NodeId, to: NodeId) -> Direction {
        if self.variable_value(self.up_variable(from, to)) {
            Direction::Up
        } else if self.variable_value(self.down_variable(from, to)) {
            Direction::Down
        } else if self.variable_value(self.left_variable(from, to)) {
            Direction::Left
        } else if self.variable_value(self.right_variable(from, to)) {
            Direction::Right
        } else {
            panic!("VariablesHandler: no direction set for edge ({from}, {to})")
        }
    }
}
