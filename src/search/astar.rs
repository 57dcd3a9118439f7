use super::{HeuristicTable, LabelAdjacency};
use crate::label::{NodeLabel, LABEL_COUNT};
use log::{debug, info};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Open-set entry. Lower `f` wins; among equal `f`, the entry pushed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    seq: u64,
    g: u32,
    label: NodeLabel,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap on (f, seq).
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* over `adjacency` with unit edge costs.
///
/// Returns the label path from `start` to `goal` inclusive, `[start]` when
/// they are equal, and an empty path when either label is absent or the goal
/// is unreachable. Successors are expanded in adjacency insertion order, so
/// equal inputs always produce the same path.
pub fn find_path(
    adjacency: &LabelAdjacency,
    start: NodeLabel,
    goal: NodeLabel,
    heuristic: &HeuristicTable,
) -> Vec<NodeLabel> {
    if !adjacency.contains(start) || !adjacency.contains(goal) {
        debug!(
            "start {start} present: {}, goal {goal} present: {}",
            adjacency.contains(start),
            adjacency.contains(goal)
        );
        return Vec::new();
    }
    if start == goal {
        return vec![start];
    }

    let h = heuristic.for_goal(goal);
    let mut g_score = [u32::MAX; LABEL_COUNT];
    let mut came_from: [Option<NodeLabel>; LABEL_COUNT] = [None; LABEL_COUNT];
    let mut seq = 0u64;
    let mut open = BinaryHeap::new();

    g_score[start.index()] = 0;
    open.push(OpenEntry {
        f: h[start.index()],
        seq,
        g: 0,
        label: start,
    });

    while let Some(OpenEntry { g, label, .. }) = open.pop() {
        if g > g_score[label.index()] {
            continue;
        }
        if label == goal {
            let path = reconstruct(&came_from, start, goal);
            info!("path {start} -> {goal}: {}", format_path(&path));
            return path;
        }
        for &next in adjacency.neighbors(label) {
            let tentative = g + 1;
            if tentative < g_score[next.index()] {
                g_score[next.index()] = tentative;
                came_from[next.index()] = Some(label);
                seq += 1;
                open.push(OpenEntry {
                    f: tentative + h[next.index()],
                    seq,
                    g: tentative,
                    label: next,
                });
            }
        }
    }

    info!("no path from {start} to {goal}");
    Vec::new()
}

fn reconstruct(
    came_from: &[Option<NodeLabel>; LABEL_COUNT],
    start: NodeLabel,
    goal: NodeLabel,
) -> Vec<NodeLabel> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from[current.index()] {
            Some(prev) => {
                path.push(prev);
                current = prev;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

pub(crate) fn format_path(path: &[NodeLabel]) -> String {
    path.iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::MazeProfile;
    use NodeLabel::*;

    fn canonical(skip: &[NodeLabel]) -> LabelAdjacency {
        let mut adj = LabelAdjacency::new();
        for label in NodeLabel::ALL.into_iter().filter(|l| !skip.contains(l)) {
            adj.add_vertex(label);
        }
        for (a, b) in MazeProfile::default().canonical_edges {
            if !skip.contains(&a) && !skip.contains(&b) {
                adj.add_edge(a, b);
            }
        }
        adj
    }

    fn is_walk(adj: &LabelAdjacency, path: &[NodeLabel]) -> bool {
        path.windows(2).all(|w| adj.has_edge(w[0], w[1]))
    }

    #[test]
    fn shortest_route_through_n1() {
        let h = HeuristicTable::default();
        assert_eq!(find_path(&canonical(&[]), Start, C, &h), vec![Start, N1, C]);
    }

    #[test]
    fn route_avoids_removed_junction() {
        let h = HeuristicTable::default();
        let adj = canonical(&[N1]);
        assert_eq!(find_path(&adj, Start, C, &h), vec![Start, N3, N4, C]);
    }

    #[test]
    fn three_hop_goal_is_deterministic() {
        let h = HeuristicTable::default();
        let adj = canonical(&[]);
        let first = find_path(&adj, Start, B, &h);
        assert_eq!(first.len(), 4);
        assert_eq!(first.first(), Some(&Start));
        assert_eq!(first.last(), Some(&B));
        assert!(is_walk(&adj, &first));
        for _ in 0..5 {
            assert_eq!(find_path(&adj, Start, B, &h), first);
        }
    }

    #[test]
    fn degenerate_and_missing_endpoints() {
        let h = HeuristicTable::default();
        let adj = canonical(&[C]);
        assert_eq!(find_path(&adj, N2, N2, &h), vec![N2]);
        assert!(find_path(&adj, Start, C, &h).is_empty());
        assert!(find_path(&adj, C, Start, &h).is_empty());
    }

    #[test]
    fn disconnected_goal_yields_empty_path() {
        let h = HeuristicTable::default();
        let mut adj = LabelAdjacency::new();
        adj.add_edge(Start, N1);
        adj.add_vertex(A);
        assert!(find_path(&adj, Start, A, &h).is_empty());
    }

    #[test]
    fn path_formats_as_arrow_chain() {
        assert_eq!(format_path(&[Start, N3, A]), "Start -> N3 -> A");
        assert_eq!(format_path(&[]), "");
    }
}
