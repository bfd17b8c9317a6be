//! Shape synthesis: SAT encoding plus the corner-insertion repair loop.
//!
//! Encode the orthogonality constraints, ask the oracle for a model, and
//! on UNSAT split one edge named by a unit clause of the proof with a RED
//! bend vertex. Every split strictly enlarges the space of drawable
//! shapes, so the loop converges.

use super::clauses::{
    add_cycle_constraints, add_edge_direction_constraints, add_node_port_constraints,
};
use super::shape::Shape;
use super::variables::VariablesHandler;
use crate::error::{DrawingError, Result};
use crate::model::{Color, Cycle, GraphAttributes, NodeId, UndirectedGraph};
use crate::sat::{Cnf, SatOracle, SatOutcome};
use crate::worker::{CancelledError, ProgressMonitor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed seed for the reproducible corner tie-break.
const DEFAULT_SEED: u64 = 42;

/// Synthesize a shape for the graph, inserting RED corner vertices while
/// the encoding stays unsatisfiable.
///
/// The graph, attributes, and cycle basis are updated in place with every
/// inserted corner. With `randomize` unset the unit-clause tie-break runs
/// on a fixed seed and the whole loop is deterministic.
pub fn build_shape(
    graph: &mut UndirectedGraph,
    attributes: &mut GraphAttributes,
    cycles: &mut [Cycle],
    oracle: &dyn SatOracle,
    randomize: bool,
    monitor: &dyn ProgressMonitor,
) -> Result<Shape> {
    let seed = if randomize {
        rand::thread_rng().gen()
    } else {
        DEFAULT_SEED
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let mut iteration = 0u64;
    loop {
        if !monitor.update_with_phase(iteration, "shape synthesis") {
            return Err(CancelledError.into());
        }
        iteration += 1;
        if let Some(shape) = solve_or_add_corner(graph, attributes, cycles, oracle, &mut rng)? {
            return Ok(shape);
        }
    }
}

/// One solver round: `Ok(Some(shape))` on SAT, `Ok(None)` after splitting
/// an edge on UNSAT.
fn solve_or_add_corner(
    graph: &mut UndirectedGraph,
    attributes: &mut GraphAttributes,
    cycles: &mut [Cycle],
    oracle: &dyn SatOracle,
    rng: &mut StdRng,
) -> Result<Option<Shape>> {
    let handler = VariablesHandler::new(graph);
    let mut cnf = Cnf::new();
    cnf.add_comment("one direction per edge");
    add_edge_direction_constraints(graph, &mut cnf, &handler);
    cnf.add_comment("node ports");
    add_node_port_constraints(graph, &mut cnf, &handler);
    cnf.add_comment("cycle orientability");
    add_cycle_constraints(&mut cnf, cycles, &handler);
    match oracle.solve(&cnf)? {
        SatOutcome::Satisfiable(model) => {
            Ok(Some(decode_shape(graph, &model, handler)))
        }
        SatOutcome::Unsatisfiable(proof_lines) => {
            let (from, to) = find_edge_to_split(&proof_lines, rng, &handler)?;
            add_corner_inside_edge(from, to, graph, attributes, cycles)?;
            Ok(None)
        }
    }
}

fn decode_shape(
    graph: &UndirectedGraph,
    model: &[i32],
    mut handler: VariablesHandler,
) -> Shape {
    for &literal in model {
        if literal > 0 {
            handler.set_variable_value(literal, true);
        } else {
            handler.set_variable_value(-literal, false);
        }
    }
    let mut shape = Shape::new();
    for node_id in graph.node_ids() {
        for edge in graph.edges_of(node_id) {
            shape.set_direction(node_id, edge.to, handler.direction_of_edge(node_id, edge.to));
        }
    }
    shape
}

/// Scan the proof backwards for unit clauses and pick one of the first
/// two found; its variable names the edge to split.
fn find_edge_to_split(
    proof_lines: &[String],
    rng: &mut StdRng,
    handler: &VariablesHandler,
) -> Result<(NodeId, NodeId)> {
    let mut unit_clauses: Vec<i32> = Vec::new();
    for line in proof_lines.iter().rev() {
        let mut tokens = line.split_whitespace().peekable();
        if tokens.peek() == Some(&"d") {
            continue; // deletion line
        }
        let mut literals: Vec<i32> = Vec::new();
        let mut terminated = false;
        for token in tokens {
            let literal: i32 = token.parse().map_err(|_| {
                DrawingError::Invariant(format!("malformed proof line `{line}`"))
            })?;
            if literal == 0 {
                terminated = true;
                break;
            }
            literals.push(literal);
        }
        if !terminated {
            return Err(DrawingError::Invariant(format!(
                "proof line `{line}` misses the terminating 0"
            )));
        }
        if literals.len() == 1 {
            unit_clauses.push(literals[0]);
        }
    }
    if unit_clauses.is_empty() {
        return Err(DrawingError::Invariant(
            "no unit clause in UNSAT proof".into(),
        ));
    }
    let index = rng.gen_range(0..unit_clauses.len().min(2));
    let variable = unit_clauses[index].abs();
    Ok(handler.edge_of_variable(variable))
}

/// Split the edge `(from, to)` with a fresh RED corner vertex and patch
/// every basis cycle that traverses it.
fn add_corner_inside_edge(
    from: NodeId,
    to: NodeId,
    graph: &mut UndirectedGraph,
    attributes: &mut GraphAttributes,
    cycles: &mut [Cycle],
) -> Result<()> {
    if !graph.has_edge(from, to) {
        return Err(DrawingError::Invariant(format!(
            "corner insertion on missing edge ({from}, {to})"
        )));
    }
    let corner_id = graph.add_free_node();
    attributes.set_color(corner_id, Color::Red);
    graph.remove_edge_between(from, to);
    graph.add_edge(from, corner_id);
    graph.add_edge(to, corner_id);
    for cycle in cycles.iter_mut() {
        if !cycle.has_node(from) || !cycle.has_node(to) {
            continue;
        }
        cycle.add_between(from, to, corner_id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::DpllSolver;
    use crate::worker::NoopMonitor;

    fn cycle_graph(n: NodeId) -> (UndirectedGraph, GraphAttributes, Vec<Cycle>) {
        let mut graph = UndirectedGraph::new();
        let mut attributes = GraphAttributes::new();
        for i in 0..n {
            graph.add_node(i);
            attributes.set_color(i, Color::Black);
        }
        for i in 0..n {
            graph.add_edge(i, (i + 1) % n);
        }
        let cycles = vec![Cycle::new((0..n).collect())];
        (graph, attributes, cycles)
    }

    #[test]
    fn test_square_needs_no_corner() {
        let (mut graph, mut attributes, mut cycles) = cycle_graph(4);
        let shape = build_shape(
            &mut graph,
            &mut attributes,
            &mut cycles,
            &DpllSolver::new(),
            false,
            &NoopMonitor,
        )
        .expect("square is drawable");
        assert_eq!(graph.node_count(), 4);
        for edge in graph.edges() {
            assert_eq!(
                shape.direction(edge.from, edge.to),
                shape.direction(edge.to, edge.from).opposite()
            );
        }
    }

    #[test]
    fn test_triangle_gets_exactly_one_corner() {
        let (mut graph, mut attributes, mut cycles) = cycle_graph(3);
        let shape = build_shape(
            &mut graph,
            &mut attributes,
            &mut cycles,
            &DpllSolver::new(),
            false,
            &NoopMonitor,
        )
        .expect("triangle is drawable with one bend");
        assert_eq!(graph.node_count(), 4);
        let red_nodes: Vec<NodeId> = graph
            .node_ids()
            .filter(|&id| attributes.has_color(id) && attributes.color(id) == Color::Red)
            .collect();
        assert_eq!(red_nodes.len(), 1);
        // the corner joined the basis cycle
        assert!(cycles[0].has_node(red_nodes[0]));
        assert_eq!(cycles[0].len(), 4);
        let _ = shape;
    }

    #[test]
    fn test_corner_insertion_patches_cycles() {
        let mut graph = UndirectedGraph::new();
        let mut attributes = GraphAttributes::new();
        for i in 0..3 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 0);
        let mut cycles = vec![Cycle::new(vec![0, 1, 2])];
        add_corner_inside_edge(0, 1, &mut graph, &mut attributes, &mut cycles).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert!(!graph.has_edge(0, 1));
        assert_eq!(cycles[0].len(), 4);
    }
}
