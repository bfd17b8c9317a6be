//! Interlacement graph of segments around a reference cycle.
//!
//! Two segments conflict when they cannot be drawn on the same side of the
//! cycle without crossing; the conflict test labels cycle vertices relative
//! to one segment's attachments and checks whether the other segment's
//! attachments fit inside a single arc.

use super::segment::Segment;
use crate::model::{Cycle, NodeId, UndirectedGraph};
use std::collections::HashMap;

/// Label the cycle relative to one segment: attachment `i` (in cycle
/// order) gets `2 * i`, vertices strictly between attachments get the odd
/// label of the arc they lie on.
fn compute_cycle_labels(segment: &Segment, cycle: &Cycle) -> HashMap<NodeId, usize> {
    let mut labels = HashMap::new();
    let mut found_attachments = 0;
    let total_attachments = segment.attachments().len();
    for node_id in cycle.iter() {
        if segment.has_attachment(node_id) {
            labels.insert(node_id, 2 * found_attachments);
            found_attachments += 1;
        } else if found_attachments == 0 {
            labels.insert(node_id, 2 * total_attachments - 1);
        } else {
            labels.insert(node_id, 2 * found_attachments - 1);
        }
    }
    labels
}

fn compute_conflicts(
    segments: &[Segment],
    cycle: &Cycle,
    interlacement: &mut UndirectedGraph,
) {
    if segments.len() <= 1 {
        return;
    }
    for i in 0..segments.len() - 1 {
        let segment = &segments[i];
        let cycle_labels = compute_cycle_labels(segment, cycle);
        let label_count = 2 * segment.attachments().len();
        let mut labels = vec![0usize; label_count];
        for j in i + 1..segments.len() {
            let other = &segments[j];
            labels.iter_mut().for_each(|label| *label = 0);
            for &attachment_id in other.attachments() {
                labels[cycle_labels[&attachment_id]] = 1;
            }
            let sum: usize = labels.iter().sum();
            // slide a window of one arc (attachment, gap, attachment) around
            // the labelling; the segments are compatible iff some window
            // holds every attachment of the other segment
            let mut window = labels[0] + labels[1] + labels[2];
            let mut in_conflict = true;
            let mut k = 0;
            while k <= label_count - 2 {
                if window == sum {
                    in_conflict = false;
                    break;
                }
                window += labels[(3 + k) % label_count] + labels[(4 + k) % label_count];
                window -= labels[k] + labels[(1 + k) % label_count];
                k += 2;
            }
            if in_conflict {
                interlacement.add_edge(i as NodeId, j as NodeId);
            }
        }
    }
}

/// Build the interlacement graph; node `i` stands for `segments[i]`.
pub fn compute_interlacement_graph(segments: &[Segment], cycle: &Cycle) -> UndirectedGraph {
    let mut interlacement = UndirectedGraph::new();
    for i in 0..segments.len() {
        interlacement.add_node(i as NodeId);
    }
    compute_conflicts(segments, cycle, &mut interlacement);
    interlacement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planarity::segment::compute_segments;

    #[test]
    fn test_crossing_chords_conflict() {
        // 4-cycle with both diagonals: the chords interlace
        let mut graph = UndirectedGraph::new();
        for i in 0..4 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 0);
        graph.add_edge(0, 2);
        graph.add_edge(1, 3);
        let cycle = Cycle::new(vec![0, 1, 2, 3]);
        let segments = compute_segments(&graph, &cycle);
        let interlacement = compute_interlacement_graph(&segments, &cycle);
        assert_eq!(interlacement.node_count(), 2);
        assert_eq!(interlacement.edge_count(), 1);
    }

    #[test]
    fn test_nested_chords_do_not_conflict() {
        // 6-cycle with chords (0,2) and (3,5): separable sides
        let mut graph = UndirectedGraph::new();
        for i in 0..6 {
            graph.add_node(i);
        }
        for i in 0..6 {
            graph.add_edge(i, (i + 1) % 6);
        }
        graph.add_edge(0, 2);
        graph.add_edge(3, 5);
        let cycle = Cycle::new(vec![0, 1, 2, 3, 4, 5]);
        let segments = compute_segments(&graph, &cycle);
        let interlacement = compute_interlacement_graph(&segments, &cycle);
        assert_eq!(interlacement.node_count(), 2);
        assert_eq!(interlacement.edge_count(), 0);
    }
}
