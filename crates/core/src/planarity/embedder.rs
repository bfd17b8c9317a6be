//! Planarity testing and embedding by Auslander–Parter decomposition.
//!
//! A graph is embedded one biconnected component at a time. Inside a
//! component, a reference cycle splits the rest into segments; segments are
//! two-colored through their interlacement graph (inside/outside), embedded
//! recursively, and merged back around the cycle. A missing bipartition at
//! any level means the graph is not planar.

use super::embedding::Embedding;
use super::interlacement::compute_interlacement_graph;
use super::segment::{compute_segments, Segment};
use crate::analysis::{biconnected_components, bipartition, find_cycle_undirected};
use crate::model::{Cycle, NodeId, UndirectedGraph};
use std::collections::HashMap;

/// Embed an arbitrary graph, or report non-planarity (`None`).
pub fn embed_graph(graph: &UndirectedGraph) -> Option<Embedding> {
    if graph.node_count() < 4 {
        return Some(base_case_graph(graph));
    }
    if graph.edge_count() > 3 * graph.node_count() - 6 {
        return None;
    }
    let decomposition = biconnected_components(graph);
    let mut embeddings = Vec::with_capacity(decomposition.components.len());
    for component in &decomposition.components {
        embeddings.push(embed_component(component)?);
    }
    Some(merge_biconnected_components(
        graph,
        &decomposition.components,
        &embeddings,
    ))
}

/// Embed a biconnected component, finding a reference cycle first.
pub fn embed_component(component: &UndirectedGraph) -> Option<Embedding> {
    match find_cycle_undirected(component) {
        Some(cycle) => embed_component_with_cycle(component, &cycle),
        None => Some(base_case_graph(component)),
    }
}

fn embed_component_with_cycle(component: &UndirectedGraph, cycle: &Cycle) -> Option<Embedding> {
    let segments = compute_segments(component, cycle);
    if segments.is_empty() {
        // the component is exactly the cycle
        return Some(base_case_graph(component));
    }
    if segments.len() == 1 {
        let segment = &segments[0];
        if segment.is_path() {
            return Some(base_case_component(component, cycle));
        }
        // the chosen cycle is bad: reroute it through the segment
        return embed_component_with_cycle(component, &make_cycle_good(cycle, segment));
    }
    let interlacement = compute_interlacement_graph(&segments, cycle);
    let is_segment_inside = bipartition(&interlacement)?;
    let mut embeddings = Vec::with_capacity(segments.len());
    for segment in &segments {
        embeddings.push(embed_component(segment.graph())?);
    }
    Some(merge_segments_embeddings(
        component,
        cycle,
        &embeddings,
        &segments,
        &is_segment_inside,
    ))
}

/// Rings in incident-edge order; correct whenever no vertex has interior
/// branching to order (|V| < 4, or a component that is exactly a cycle).
fn base_case_graph(graph: &UndirectedGraph) -> Embedding {
    let mut embedding = Embedding::new(graph);
    for node_id in graph.node_ids() {
        for edge in graph.edges_of(node_id) {
            embedding.add_edge(node_id, edge.to);
        }
    }
    embedding
}

/// Base case for a component whose single segment is a path: each cycle
/// vertex of degree three gets the ring (next-on-cycle, interior, prev).
fn base_case_component(component: &UndirectedGraph, cycle: &Cycle) -> Embedding {
    let mut embedding = Embedding::new(component);
    for node_id in component.node_ids() {
        if component.degree(node_id) == 2 {
            for edge in component.edges_of(node_id) {
                embedding.add_edge(node_id, edge.to);
            }
            continue;
        }
        let mut interior_neighbor = None;
        for edge in component.edges_of(node_id) {
            let neighbor_id = edge.to;
            if cycle.next_of(node_id) == neighbor_id || cycle.prev_of(node_id) == neighbor_id {
                continue;
            }
            interior_neighbor = Some(neighbor_id);
            break;
        }
        embedding.add_edge(node_id, cycle.next_of(node_id));
        embedding.add_edge(
            node_id,
            interior_neighbor.expect("degree-3 cycle vertex has an interior neighbor"),
        );
        embedding.add_edge(node_id, cycle.prev_of(node_id));
    }
    embedding
}

/// Replace the cycle arc between the endpoints of `path` with the path
/// itself, keeping `node_to_include` on the new cycle (retrying with the
/// reversed path when the kept arc misses it).
fn change_cycle_with_path(
    cycle: &Cycle,
    path: &[NodeId],
    node_to_include: Option<NodeId>,
) -> Cycle {
    let mut nodes: Vec<NodeId> = path.to_vec();
    let first_of_path = path[0];
    let last_of_path = *path.last().expect("path is never empty");
    let mut current = cycle.next_of(last_of_path);
    let mut found_node_to_include = node_to_include.is_none();
    while current != first_of_path {
        nodes.push(current);
        if node_to_include == Some(current) {
            found_node_to_include = true;
        }
        current = cycle.next_of(current);
    }
    if !found_node_to_include {
        let reversed: Vec<NodeId> = path.iter().rev().copied().collect();
        return change_cycle_with_path(cycle, &reversed, node_to_include);
    }
    Cycle::new(nodes)
}

/// A cycle is "bad" when its single segment is not a path. Reroute the
/// cycle through the segment between two of its attachments, keeping a
/// third attachment (if any) so the rerouted cycle still separates.
fn make_cycle_good(cycle: &Cycle, segment: &Segment) -> Cycle {
    let mut attachments_to_use = Vec::with_capacity(3);
    for node_id in cycle.iter() {
        if !segment.has_attachment(node_id) {
            continue;
        }
        attachments_to_use.push(node_id);
        if attachments_to_use.len() == 3 {
            break;
        }
    }
    let path =
        segment.path_between_attachments(attachments_to_use[0], attachments_to_use[1]);
    if attachments_to_use.len() == 3 {
        change_cycle_with_path(cycle, &path, Some(attachments_to_use[2]))
    } else {
        change_cycle_with_path(cycle, &path, None)
    }
}

// =========================================================================
// Segment merge
// =========================================================================

fn compute_min_max_attachments(
    segments: &[Segment],
    cycle: &Cycle,
) -> (Vec<usize>, Vec<usize>) {
    let mut min_attachment = vec![0; segments.len()];
    let mut max_attachment = vec![0; segments.len()];
    for (i, segment) in segments.iter().enumerate() {
        let mut min = cycle.len();
        let mut max = 0;
        for &attachment in segment.attachments() {
            let position = cycle.position_of(attachment);
            min = min.min(position);
            max = max.max(position);
        }
        min_attachment[i] = min;
        max_attachment[i] = max;
    }
    (min_attachment, max_attachment)
}

/// Whether each recursively computed embedding places its segment inside
/// the cycle when the cycle is drawn clockwise. Checked at any attachment:
/// inside iff the ring there does not read (.., next-on-cycle,
/// prev-on-cycle, ..).
fn embeddings_inside_clockwise_cycle(
    cycle: &Cycle,
    embeddings: &[Embedding],
    segments: &[Segment],
) -> Vec<bool> {
    let mut is_inside = vec![false; segments.len()];
    for (i, segment) in segments.iter().enumerate() {
        let attachment_id = *segment
            .attachments()
            .first()
            .expect("segments have at least one attachment");
        let next = cycle.next_of(attachment_id);
        let prev = cycle.prev_of(attachment_id);
        is_inside[i] = embeddings[i].ring(attachment_id).next_of(next) != prev;
    }
    is_inside
}

fn compute_sub_order(
    sub_segments: &mut [usize],
    segments_attachment_index: &[usize],
    segments: &[Segment],
    ordering_min_segments: bool,
) {
    if sub_segments.len() < 2 {
        return;
    }
    for i in 0..sub_segments.len() - 1 {
        let mut first = i;
        let mut first_index = sub_segments[i];
        for j in i + 1..sub_segments.len() {
            let candidate_index = sub_segments[j];
            if segments_attachment_index[candidate_index]
                < segments_attachment_index[first_index]
            {
                continue;
            }
            if segments_attachment_index[candidate_index]
                > segments_attachment_index[first_index]
            {
                first_index = candidate_index;
                first = j;
                continue;
            }
            let attachments_first = segments[first_index].attachments().len();
            let attachments_candidate = segments[candidate_index].attachments().len();
            if attachments_first == attachments_candidate {
                if first_index > candidate_index {
                    continue;
                }
                first_index = candidate_index;
                first = j;
                continue;
            }
            if ordering_min_segments == (attachments_candidate == 2) {
                first_index = candidate_index;
                first = j;
            }
        }
        sub_segments.swap(first, i);
    }
}

/// Order the segments attached at one cycle vertex: segments ending here
/// first, then the (at most one) segment passing through, then segments
/// starting here, with two-attachment segments pushed toward the middle.
fn compute_order(
    segment_indexes: &[usize],
    segments_min_attachment: &[usize],
    segments_max_attachment: &[usize],
    segments: &[Segment],
    cycle_node_position: usize,
) -> Vec<usize> {
    if segment_indexes.len() < 2 {
        return segment_indexes.to_vec();
    }
    let mut middle_segment = None;
    let mut min_segments = Vec::new();
    let mut max_segments = Vec::new();
    for &segment_index in segment_indexes {
        if segments_min_attachment[segment_index] == cycle_node_position {
            min_segments.push(segment_index);
            continue;
        }
        if segments_max_attachment[segment_index] == cycle_node_position {
            max_segments.push(segment_index);
            continue;
        }
        assert!(
            middle_segment.is_none(),
            "segment merge: more than one segment passes through a cycle vertex"
        );
        middle_segment = Some(segment_index);
    }
    compute_sub_order(&mut max_segments, segments_min_attachment, segments, false);
    compute_sub_order(&mut min_segments, segments_max_attachment, segments, true);
    let mut order = max_segments;
    if let Some(middle) = middle_segment {
        order.push(middle);
    }
    order.extend(min_segments);
    order
}

/// Copy a segment embedding's interior neighbors of `cycle_node_id` into
/// the output ring, skipping the cycle neighbors; reversed when the
/// segment's chosen side disagrees with its computed side.
fn add_middle_edges(
    embedding: &Embedding,
    cycle_node_id: NodeId,
    compatible: bool,
    output: &mut Embedding,
    cycle: &Cycle,
) {
    let prev_cycle_node_id = cycle.prev_of(cycle_node_id);
    let next_cycle_node_id = cycle.next_of(cycle_node_id);
    let ring = embedding.ring(cycle_node_id);
    let mut neighbors_to_add = Vec::new();
    let mut current = prev_cycle_node_id;
    for _ in 1..ring.len() {
        current = ring.next_of(current);
        if current == next_cycle_node_id || current == prev_cycle_node_id {
            continue;
        }
        neighbors_to_add.push(current);
    }
    if compatible {
        for neighbor_id in neighbors_to_add {
            output.add_edge(cycle_node_id, neighbor_id);
        }
    } else {
        for neighbor_id in neighbors_to_add.into_iter().rev() {
            output.add_edge(cycle_node_id, neighbor_id);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn add_edges_incident_to_cycle(
    segments: &[Segment],
    cycle: &Cycle,
    embeddings: &[Embedding],
    is_segment_inside: &HashMap<NodeId, bool>,
    output: &mut Embedding,
    segments_min_attachment: &[usize],
    segments_max_attachment: &[usize],
    is_embedding_inside: &[bool],
) {
    for cycle_node_position in 0..cycle.len() {
        let cycle_node_id = cycle.at(cycle_node_position);
        let mut inside_segments = Vec::new();
        let mut outside_segments = Vec::new();
        for (i, segment) in segments.iter().enumerate() {
            if segment.has_attachment(cycle_node_id) {
                if is_segment_inside[&(i as NodeId)] {
                    inside_segments.push(i);
                } else {
                    outside_segments.push(i);
                }
            }
        }
        let mut inside_order = compute_order(
            &inside_segments,
            segments_min_attachment,
            segments_max_attachment,
            segments,
            cycle_node_position,
        );
        inside_order.reverse();
        let outside_order = compute_order(
            &outside_segments,
            segments_min_attachment,
            segments_max_attachment,
            segments,
            cycle_node_position,
        );
        let prev_cycle_node = cycle.prev_of(cycle_node_id);
        let next_cycle_node = cycle.next_of(cycle_node_id);
        output.add_edge(cycle_node_id, next_cycle_node);
        for segment_index in inside_order {
            let compatible =
                is_segment_inside[&(segment_index as NodeId)] == is_embedding_inside[segment_index];
            add_middle_edges(
                &embeddings[segment_index],
                cycle_node_id,
                compatible,
                output,
                cycle,
            );
        }
        output.add_edge(cycle_node_id, prev_cycle_node);
        for segment_index in outside_order {
            let compatible =
                is_segment_inside[&(segment_index as NodeId)] == is_embedding_inside[segment_index];
            add_middle_edges(
                &embeddings[segment_index],
                cycle_node_id,
                compatible,
                output,
                cycle,
            );
        }
    }
}

fn add_edges_not_incident_to_cycle(
    segments: &[Segment],
    output: &mut Embedding,
    cycle: &Cycle,
    embeddings: &[Embedding],
    is_embedding_inside: &[bool],
    is_segment_inside: &HashMap<NodeId, bool>,
) {
    for (i, segment) in segments.iter().enumerate() {
        let embedding = &embeddings[i];
        for node_id in segment.graph().node_ids() {
            if cycle.has_node(node_id) {
                continue;
            }
            let neighbors_to_add: Vec<NodeId> = embedding.ring(node_id).iter().collect();
            if is_segment_inside[&(i as NodeId)] == is_embedding_inside[i] {
                for neighbor_id in neighbors_to_add {
                    output.add_edge(node_id, neighbor_id);
                }
            } else {
                for neighbor_id in neighbors_to_add.into_iter().rev() {
                    output.add_edge(node_id, neighbor_id);
                }
            }
        }
    }
}

fn merge_segments_embeddings(
    component: &UndirectedGraph,
    cycle: &Cycle,
    embeddings: &[Embedding],
    segments: &[Segment],
    is_segment_inside: &HashMap<NodeId, bool>,
) -> Embedding {
    let mut output = Embedding::new(component);
    let (segments_min_attachment, segments_max_attachment) =
        compute_min_max_attachments(segments, cycle);
    let is_embedding_inside = embeddings_inside_clockwise_cycle(cycle, embeddings, segments);
    add_edges_incident_to_cycle(
        segments,
        cycle,
        embeddings,
        is_segment_inside,
        &mut output,
        &segments_min_attachment,
        &segments_max_attachment,
        &is_embedding_inside,
    );
    add_edges_not_incident_to_cycle(
        segments,
        &mut output,
        cycle,
        embeddings,
        &is_embedding_inside,
        is_segment_inside,
    );
    output
}

/// Concatenate per-component rings; a cut vertex receives the rings of all
/// components it belongs to, one after the other.
fn merge_biconnected_components(
    graph: &UndirectedGraph,
    components: &[UndirectedGraph],
    embeddings: &[Embedding],
) -> Embedding {
    let mut output = Embedding::new(graph);
    for (component, embedding) in components.iter().zip(embeddings) {
        for node_id in component.node_ids() {
            for neighbor_id in embedding.ring(node_id).iter() {
                output.add_edge(node_id, neighbor_id);
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_graph(n: NodeId) -> UndirectedGraph {
        let mut graph = UndirectedGraph::new();
        for i in 0..n {
            graph.add_node(i);
        }
        for i in 0..n {
            for j in i + 1..n {
                graph.add_edge(i, j);
            }
        }
        graph
    }

    fn k33() -> UndirectedGraph {
        let mut graph = UndirectedGraph::new();
        for i in 0..6 {
            graph.add_node(i);
        }
        for i in 0..3u32 {
            for j in 3..6u32 {
                graph.add_edge(i, j);
            }
        }
        graph
    }

    #[test]
    fn test_k4_is_planar() {
        let graph = complete_graph(4);
        let embedding = embed_graph(&graph).expect("K4 is planar");
        assert!(embedding.is_consistent());
        assert_eq!(embedding.directed_edge_count(), 12);
        assert_eq!(embedding.genus(), 0);
    }

    #[test]
    fn test_k5_is_not_planar() {
        assert!(embed_graph(&complete_graph(5)).is_none());
    }

    #[test]
    fn test_k33_is_not_planar() {
        assert!(embed_graph(&k33()).is_none());
    }

    #[test]
    fn test_square_with_center_is_planar() {
        let mut graph = UndirectedGraph::new();
        for i in 0..5 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 0);
        for i in 0..4 {
            graph.add_edge(4, i);
        }
        let embedding = embed_graph(&graph).expect("wheel is planar");
        assert!(embedding.is_consistent());
        assert_eq!(embedding.genus(), 0);
    }

    #[test]
    fn test_two_blocks_merge_at_cut_vertex() {
        // two triangles sharing vertex 2
        let mut graph = UndirectedGraph::new();
        for i in 0..5 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 0);
        graph.add_edge(2, 3);
        graph.add_edge(3, 4);
        graph.add_edge(4, 2);
        let embedding = embed_graph(&graph).expect("planar");
        assert!(embedding.is_consistent());
        assert_eq!(embedding.ring(2).len(), 4);
        assert_eq!(embedding.genus(), 0);
    }

    #[test]
    fn test_small_graph_trivial_embedding() {
        let graph = complete_graph(3);
        let embedding = embed_graph(&graph).expect("triangle");
        assert!(embedding.is_consistent());
        assert!(embedding.is_planar());
    }
}
