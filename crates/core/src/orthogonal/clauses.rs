//! CNF clauses of the orthogonality encoding.
//!
//! Three constraint families:
//! - every edge has exactly one direction,
//! - no node uses a port twice (degree-dependent),
//! - every basis cycle turns through all four directions.

use super::shape::Direction;
use super::variables::VariablesHandler;
use crate::model::{Cycle, NodeId, UndirectedGraph};
use crate::sat::Cnf;

fn add_at_most_one_of_four(cnf: &mut Cnf, a: i32, b: i32, c: i32, d: i32) {
    // pairwise: at least one of each pair is false
    cnf.add_clause(vec![-a, -b]);
    cnf.add_clause(vec![-a, -c]);
    cnf.add_clause(vec![-a, -d]);
    cnf.add_clause(vec![-b, -c]);
    cnf.add_clause(vec![-b, -d]);
    cnf.add_clause(vec![-c, -d]);
}

/// Exactly one direction per edge.
pub fn add_edge_direction_constraints(
    graph: &UndirectedGraph,
    cnf: &mut Cnf,
    handler: &VariablesHandler,
) {
    for node_id in graph.node_ids() {
        for edge in graph.edges_of(node_id) {
            if node_id > edge.to {
                continue;
            }
            let up = handler.up_variable(node_id, edge.to);
            let down = handler.down_variable(node_id, edge.to);
            let right = handler.right_variable(node_id, edge.to);
            let left = handler.left_variable(node_id, edge.to);
            cnf.add_clause(vec![up, down, right, left]);
            add_at_most_one_of_four(cnf, up, down, left, right);
        }
    }
}

/// At least one incident edge of `node_id` leaves in `direction`.
fn add_at_least_one_in_direction(
    cnf: &mut Cnf,
    handler: &VariablesHandler,
    graph: &UndirectedGraph,
    node_id: NodeId,
    direction: Direction,
) {
    let clause: Vec<i32> = graph
        .edges_of(node_id)
        .iter()
        .map(|edge| handler.variable(node_id, edge.to, direction))
        .collect();
    cnf.add_clause(clause);
}

/// At most one incident edge of `node_id` leaves in `direction`; for
/// degree four this tightens to exactly one.
fn add_port_clauses_for_direction(
    cnf: &mut Cnf,
    handler: &VariablesHandler,
    graph: &UndirectedGraph,
    node_id: NodeId,
    direction: Direction,
) {
    let degree = graph.degree(node_id);
    match degree {
        4 => add_at_least_one_in_direction(cnf, handler, graph, node_id, direction),
        3 => {
            let variables: Vec<i32> = graph
                .edges_of(node_id)
                .iter()
                .map(|edge| handler.variable(node_id, edge.to, direction))
                .collect();
            cnf.add_clause(vec![-variables[0], -variables[1]]);
            cnf.add_clause(vec![-variables[0], -variables[2]]);
            cnf.add_clause(vec![-variables[1], -variables[2]]);
        }
        2 => {
            let clause: Vec<i32> = graph
                .edges_of(node_id)
                .iter()
                .map(|edge| -handler.variable(node_id, edge.to, direction))
                .collect();
            cnf.add_clause(clause);
        }
        0 | 1 => {}
        _ => panic!("port clauses: unexpected degree {degree} for node {node_id}"),
    }
}

/// Port-usage constraints for every node.
///
/// Nodes of degree greater than four only require one edge per direction;
/// the high-degree expander resolves their port sharing later.
pub fn add_node_port_constraints(
    graph: &UndirectedGraph,
    cnf: &mut Cnf,
    handler: &VariablesHandler,
) {
    for node_id in graph.node_ids() {
        if graph.degree(node_id) <= 4 {
            for direction in [
                Direction::Up,
                Direction::Down,
                Direction::Right,
                Direction::Left,
            ] {
                add_port_clauses_for_direction(cnf, handler, graph, node_id, direction);
            }
        } else {
            for direction in [
                Direction::Up,
                Direction::Down,
                Direction::Right,
                Direction::Left,
            ] {
                add_at_least_one_in_direction(cnf, handler, graph, node_id, direction);
            }
        }
    }
}

/// Every cycle of the basis must turn through UP, DOWN, LEFT and RIGHT at
/// least once each.
pub fn add_cycle_constraints(cnf: &mut Cnf, cycles: &[Cycle], handler: &VariablesHandler) {
    for cycle in cycles {
        let mut at_least_one_up = Vec::with_capacity(cycle.len());
        let mut at_least_one_down = Vec::with_capacity(cycle.len());
        let mut at_least_one_right = Vec::with_capacity(cycle.len());
        let mut at_least_one_left = Vec::with_capacity(cycle.len());
        for node_id in cycle.iter() {
            let next_id = cycle.next_of(node_id);
            at_least_one_up.push(handler.up_variable(node_id, next_id));
            at_least_one_down.push(handler.down_variable(node_id, next_id));
            at_least_one_right.push(handler.right_variable(node_id, next_id));
            at_least_one_left.push(handler.left_variable(node_id, next_id));
        }
        cnf.add_clause(at_least_one_down);
        cnf.add_clause(at_least_one_up);
        cnf.add_clause(at_least_one_right);
        cnf.add_clause(at_least_one_left);
    }
}
