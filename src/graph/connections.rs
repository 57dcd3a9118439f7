//! Edge inference between node pairs from raw line geometry.
//!
//! Line-to-node resolution in the builder only sees each line's own
//! endpoints. Detected lines are often fragmented or overshoot, so a second
//! pass checks every unconnected node pair against all lines with three
//! tests, in priority order: direct, near, intersection.

use super::params::GraphParams;
use super::{BuildMode, Graph, GraphNode};
use crate::geometry::{distance, Segment};
use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ConnectionKind {
    Direct,
    Near,
    Intersection,
}

/// Adds inferred edges between node pairs admitted by `mode`.
///
/// Traversable mode only considers unblocked nodes; complete mode considers
/// all of them. Returns the number of edges added.
pub(crate) fn add_geometric_connections(
    graph: &mut Graph,
    lines: &[Segment],
    mode: BuildMode,
    params: &GraphParams,
) -> usize {
    let candidates: Vec<GraphNode> = graph
        .nodes()
        .iter()
        .filter(|n| mode == BuildMode::Complete || !n.blocked)
        .cloned()
        .collect();

    let mut added = 0;
    for (i, a) in candidates.iter().enumerate() {
        for b in &candidates[i + 1..] {
            if graph.has_edge(a.id, b.id) {
                continue;
            }
            if let Some(kind) = classify(a, b, lines, params) {
                if graph.add_edge(a.id, b.id) {
                    debug!("added {:?} connection {} - {}", kind, a.label, b.label);
                    added += 1;
                }
            }
        }
    }
    added
}

pub(crate) fn classify(
    a: &GraphNode,
    b: &GraphNode,
    lines: &[Segment],
    params: &GraphParams,
) -> Option<ConnectionKind> {
    let tolerance = params.connection_tolerance();
    if lines.iter().any(|l| direct_connection(a, b, l, tolerance)) {
        return Some(ConnectionKind::Direct);
    }
    if lines.iter().any(|l| near_connection(a, b, l, tolerance, params)) {
        return Some(ConnectionKind::Near);
    }
    if intersection_connection(a, b, lines, params) {
        return Some(ConnectionKind::Intersection);
    }
    None
}

/// Each node sits at an opposite endpoint of the same line.
fn direct_connection(a: &GraphNode, b: &GraphNode, line: &Segment, tolerance: f64) -> bool {
    let a0 = distance(&a.position, &line.p0);
    let a1 = distance(&a.position, &line.p1);
    let b0 = distance(&b.position, &line.p0);
    let b1 = distance(&b.position, &line.p1);
    (a0 <= tolerance && b1 <= tolerance) || (a1 <= tolerance && b0 <= tolerance)
}

/// The line runs close past both nodes and spans most of the gap between
/// them, or starts at one node and extends towards the other.
fn near_connection(
    a: &GraphNode,
    b: &GraphNode,
    line: &Segment,
    tolerance: f64,
    params: &GraphParams,
) -> bool {
    let c = &params.connections;
    let a_line = line.distance_to(&a.position);
    let b_line = line.distance_to(&b.position);

    let passing = tolerance * c.near_line_factor;
    if a_line < passing
        && b_line < passing
        && line.length() > distance(&a.position, &b.position) * c.span_ratio
    {
        return true;
    }

    let extended = tolerance * c.extension_factor;
    let a_end = distance(&a.position, &line.p0).min(distance(&a.position, &line.p1));
    let b_end = distance(&b.position, &line.p0).min(distance(&b.position, &line.p1));
    (a_end < tolerance && b_line < extended) || (b_end < tolerance && a_line < extended)
}

/// Two distinct lines, one near each node, cross close to both nodes.
fn intersection_connection(
    a: &GraphNode,
    b: &GraphNode,
    lines: &[Segment],
    params: &GraphParams,
) -> bool {
    let c = &params.connections;
    let tolerance = params.connection_tolerance();
    let direct = distance(&a.position, &b.position);
    if direct > c.max_intersection_span {
        return false;
    }

    let near_a: Vec<usize> = (0..lines.len())
        .filter(|&i| lines[i].distance_to(&a.position) < tolerance)
        .collect();
    let near_b: Vec<usize> = (0..lines.len())
        .filter(|&i| lines[i].distance_to(&b.position) < tolerance)
        .collect();

    let outer = tolerance * c.intersection_factor;
    let very_close = tolerance * c.very_close_factor;
    for &i in &near_a {
        for &j in &near_b {
            if i == j {
                continue;
            }
            let Some(ip) = lines[i].intersection(&lines[j], params.line_intersection_tolerance)
            else {
                continue;
            };
            let da = distance(&a.position, &ip);
            let db = distance(&b.position, &ip);
            if (da < very_close && db < outer * 2.0)
                || (db < very_close && da < outer * 2.0)
                || (da < outer && db < outer && da + db < direct * c.detour_ratio)
            {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coordinate;
    use crate::label::NodeLabel;

    fn node(id: usize, label: NodeLabel, x: f64, y: f64, blocked: bool) -> GraphNode {
        GraphNode {
            id,
            label,
            position: Coordinate::new(x, y),
            blocked,
        }
    }

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::new(Coordinate::new(x0, y0), Coordinate::new(x1, y1))
    }

    #[test]
    fn line_between_endpoints_is_direct() {
        let params = GraphParams::default();
        let a = node(0, NodeLabel::N1, 0.0, 0.0, false);
        let b = node(1, NodeLabel::N4, 300.0, 0.0, false);
        let lines = [seg(10.0, 5.0, 290.0, -5.0)];
        assert_eq!(
            classify(&a, &b, &lines, &params),
            Some(ConnectionKind::Direct)
        );
    }

    #[test]
    fn long_line_passing_both_nodes_is_near() {
        let params = GraphParams::default();
        let a = node(0, NodeLabel::N1, 0.0, 10.0, false);
        let b = node(1, NodeLabel::N4, 300.0, 10.0, false);
        // Runs past both nodes; endpoints are far from either node.
        let lines = [seg(-60.0, 0.0, 360.0, 0.0)];
        assert_eq!(
            classify(&a, &b, &lines, &params),
            Some(ConnectionKind::Near)
        );
    }

    #[test]
    fn crossing_lines_close_to_both_nodes_connect() {
        let params = GraphParams::default();
        let a = node(0, NodeLabel::N3, 0.0, 0.0, false);
        let b = node(1, NodeLabel::N4, 80.0, 20.0, false);
        // Neither line reaches the other node; extended, they cross at
        // (40, 0) between the two nodes.
        let lines = [seg(-25.0, 0.0, 45.0, 0.0), seg(42.0, 1.0, 85.0, 22.5)];
        assert_eq!(
            classify(&a, &b, &lines, &params),
            Some(ConnectionKind::Intersection)
        );
    }

    #[test]
    fn unrelated_nodes_stay_disconnected() {
        let params = GraphParams::default();
        let a = node(0, NodeLabel::C, 0.0, 0.0, false);
        let b = node(1, NodeLabel::A, 500.0, 500.0, false);
        let lines = [seg(0.0, 0.0, 0.0, 200.0), seg(500.0, 500.0, 700.0, 500.0)];
        assert_eq!(classify(&a, &b, &lines, &params), None);
    }

    #[test]
    fn traversable_pass_ignores_blocked_nodes() {
        let params = GraphParams::default();
        let nodes = vec![
            node(0, NodeLabel::Start, 0.0, 0.0, false),
            node(1, NodeLabel::N1, 300.0, 0.0, true),
        ];
        let lines = [seg(0.0, 0.0, 300.0, 0.0)];

        let mut traversable = Graph::from_nodes(nodes.clone());
        let added = add_geometric_connections(
            &mut traversable,
            &lines,
            BuildMode::Traversable,
            &params,
        );
        assert_eq!(added, 0);

        let mut complete = Graph::from_nodes(nodes);
        let added =
            add_geometric_connections(&mut complete, &lines, BuildMode::Complete, &params);
        assert_eq!(added, 1);
        assert!(complete.has_edge(0, 1));
    }
}
