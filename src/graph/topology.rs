//! Maze-specific repairs applied after geometric inference.
//!
//! Order matters: essential edges first, then forbidden edges are removed,
//! then critical junctions left without an unblocked neighbor receive an
//! emergency edge. The backfill runs last so that no critical junction ends
//! up isolated. It prefers a candidate outside the forbidden list and only
//! falls back to a forbidden one when nothing else is left.

use super::{BuildMode, Graph, GraphNode};
use crate::geometry::distance;
use crate::profile::MazeProfile;
use log::{debug, warn};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CorrectionStats {
    pub essential_added: usize,
    pub forbidden_removed: usize,
    pub emergency_added: usize,
}

pub(crate) fn apply_corrections(
    graph: &mut Graph,
    profile: &MazeProfile,
    mode: BuildMode,
) -> CorrectionStats {
    CorrectionStats {
        essential_added: add_essential_edges(graph, profile, mode),
        forbidden_removed: remove_forbidden_edges(graph, profile),
        emergency_added: ensure_minimal_connectivity(graph, profile, mode),
    }
}

/// Adds each essential edge that is missing and whose target is unblocked.
fn add_essential_edges(graph: &mut Graph, profile: &MazeProfile, mode: BuildMode) -> usize {
    let mut added = 0;
    for &(from, to) in &profile.essential_edges {
        let (Some(a), Some(b)) = (graph.node_by_label(from), graph.node_by_label(to)) else {
            continue;
        };
        if b.blocked || !mode.admits(a.blocked, b.blocked) {
            continue;
        }
        let (a, b) = (a.id, b.id);
        if graph.add_edge(a, b) {
            debug!("added essential connection {from} - {to}");
            added += 1;
        }
    }
    added
}

fn remove_forbidden_edges(graph: &mut Graph, profile: &MazeProfile) -> usize {
    let mut removed = 0;
    for &(x, y) in &profile.forbidden_edges {
        let (Some(a), Some(b)) = (graph.node_by_label(x), graph.node_by_label(y)) else {
            continue;
        };
        let (a, b) = (a.id, b.id);
        if graph.remove_edge(a, b) {
            debug!("removed forbidden connection {x} - {y}");
            removed += 1;
        }
    }
    removed
}

/// Connects every critical junction that has no unblocked neighbor to its
/// nearest unblocked node, skipping forbidden pairs while any other
/// candidate exists.
fn ensure_minimal_connectivity(
    graph: &mut Graph,
    profile: &MazeProfile,
    mode: BuildMode,
) -> usize {
    let mut added = 0;
    for &label in &profile.critical_labels {
        let Some(critical) = graph.node_by_label(label).cloned() else {
            continue;
        };
        if mode == BuildMode::Traversable && critical.blocked {
            continue;
        }
        let connected = graph
            .neighbors(critical.id)
            .any(|n| !graph.node(n).blocked);
        if connected {
            continue;
        }
        let candidates: Vec<&GraphNode> = graph
            .nodes()
            .iter()
            .filter(|n| n.id != critical.id && !n.blocked)
            .collect();
        let allowed = nearest_to(
            &critical,
            candidates
                .iter()
                .copied()
                .filter(|n| !profile.is_forbidden(critical.label, n.label)),
        );
        let nearest = match allowed {
            Some(n) => Some(n),
            None => {
                let n = nearest_to(&critical, candidates.iter().copied());
                if let Some(n) = n {
                    warn!(
                        "only forbidden candidates left for {label}; falling back to {}",
                        n.label
                    );
                }
                n
            }
        };
        if let Some((id, other)) = nearest.map(|n| (n.id, n.label)) {
            if graph.add_edge(critical.id, id) {
                warn!("added emergency connection {label} - {other}");
                added += 1;
            }
        }
    }
    added
}

fn nearest_to<'g>(
    origin: &GraphNode,
    candidates: impl Iterator<Item = &'g GraphNode>,
) -> Option<&'g GraphNode> {
    candidates
        .map(|n| (n, distance(&origin.position, &n.position)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(n, _)| n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coordinate;
    use crate::label::NodeLabel::{self, *};

    fn node(id: usize, label: NodeLabel, x: f64, y: f64, blocked: bool) -> GraphNode {
        GraphNode {
            id,
            label,
            position: Coordinate::new(x, y),
            blocked,
        }
    }

    fn lower_maze(n1_blocked: bool, start_blocked: bool) -> Graph {
        Graph::from_nodes(vec![
            node(0, Start, 500.0, 900.0, start_blocked),
            node(1, N1, 100.0, 900.0, n1_blocked),
            node(2, N2, 900.0, 900.0, false),
            node(3, N3, 500.0, 628.0, false),
            node(4, N4, 500.0, 420.0, false),
            node(5, C, 100.0, 100.0, false),
        ])
    }

    #[test]
    fn essential_edges_skip_blocked_targets() {
        let mut g = lower_maze(true, false);
        let stats = apply_corrections(&mut g, &MazeProfile::default(), BuildMode::Complete);
        assert!(g.has_label_edge(Start, N2));
        assert!(g.has_label_edge(Start, N3));
        assert!(!g.has_label_edge(Start, N1));
        assert_eq!(stats.essential_added, 2);
    }

    #[test]
    fn forbidden_edges_are_removed() {
        let mut g = lower_maze(false, false);
        g.add_edge(0, 4); // Start - N4
        g.add_edge(0, 5); // Start - C
        g.add_edge(5, 1); // C - N1
        let stats = apply_corrections(&mut g, &MazeProfile::default(), BuildMode::Complete);
        assert_eq!(stats.forbidden_removed, 2);
        assert!(!g.has_label_edge(Start, N4));
        assert!(!g.has_label_edge(Start, C));
        assert!(g.has_label_edge(C, N1));
    }

    #[test]
    fn isolated_critical_node_gets_emergency_edge() {
        let mut g = lower_maze(false, false);
        let stats = apply_corrections(&mut g, &MazeProfile::default(), BuildMode::Traversable);
        assert_eq!(stats.emergency_added, 1);
        // C at (100,100): nearest unblocked node is N4 at (500,420).
        assert!(g.has_label_edge(C, N4));
    }

    #[test]
    fn emergency_edge_never_recreates_forbidden_pair() {
        let mut g = Graph::from_nodes(vec![
            node(0, Start, 0.0, 0.0, false),
            node(1, N4, 10.0, 0.0, false),
            node(2, A, 15.0, 0.0, false),
            node(3, N3, 300.0, 0.0, false),
        ]);
        apply_corrections(&mut g, &MazeProfile::default(), BuildMode::Complete);
        // N3 is essential for Start; no emergency edge needed.
        assert!(g.has_label_edge(Start, N3));
        assert!(!g.has_label_edge(Start, N4));
        assert!(!g.has_label_edge(Start, A));
        // A is critical: nearest allowed unblocked node is N4.
        assert!(g.has_label_edge(A, N4));
    }

    #[test]
    fn traversable_mode_leaves_blocked_start_alone() {
        let mut g = lower_maze(false, true);
        apply_corrections(&mut g, &MazeProfile::default(), BuildMode::Traversable);
        assert!(g.edges().iter().all(|e| !e.touches(0)));
    }

    #[test]
    fn start_falls_back_to_forbidden_candidate_when_lower_row_is_blocked() {
        let mut g = Graph::from_nodes(vec![
            node(0, Start, 500.0, 900.0, false),
            node(1, N1, 100.0, 900.0, true),
            node(2, N2, 900.0, 900.0, true),
            node(3, N3, 500.0, 628.0, true),
            node(4, N4, 500.0, 420.0, false),
            node(5, A, 900.0, 100.0, false),
            node(6, B, 500.0, 100.0, false),
            node(7, C, 100.0, 100.0, false),
        ]);
        for mode in [BuildMode::Complete, BuildMode::Traversable] {
            let mut g = g.clone();
            apply_corrections(&mut g, &MazeProfile::default(), mode);
            let start = g.node_by_label(Start).unwrap().id;
            assert!(g.neighbors(start).any(|n| !g.node(n).blocked), "{mode:?}");
            assert!(g.has_label_edge(Start, N4), "{mode:?}");
        }
        let stats = apply_corrections(&mut g, &MazeProfile::default(), BuildMode::Traversable);
        assert_eq!(stats.essential_added, 0);
    }
}
