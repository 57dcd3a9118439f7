use crate::graph::Graph;
use crate::label::{NodeLabel, LABEL_COUNT};
use serde::Serialize;

/// Undirected adjacency lists keyed by node label.
///
/// Neighbor lists keep insertion order, which fixes the order in which the
/// search expands successors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelAdjacency {
    present: [bool; LABEL_COUNT],
    neighbors: [Vec<NodeLabel>; LABEL_COUNT],
}

/// One vertex of a [`LabelAdjacency`], for reports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdjacencyEntry {
    pub label: NodeLabel,
    pub neighbors: Vec<NodeLabel>,
}

impl LabelAdjacency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Projects the edges between unblocked nodes of `graph`. Every unblocked
    /// node is registered as a vertex, even without edges.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut adjacency = Self::new();
        for node in graph.nodes().iter().filter(|n| !n.blocked) {
            adjacency.add_vertex(node.label);
        }
        for edge in graph.edges() {
            let (a, b) = (graph.node(edge.a), graph.node(edge.b));
            if !a.blocked && !b.blocked {
                adjacency.add_edge(a.label, b.label);
            }
        }
        adjacency
    }

    pub fn add_vertex(&mut self, label: NodeLabel) {
        self.present[label.index()] = true;
    }

    /// Adds `a - b` in both directions. Self-loops and duplicates are ignored.
    pub fn add_edge(&mut self, a: NodeLabel, b: NodeLabel) -> bool {
        if a == b || self.has_edge(a, b) {
            return false;
        }
        self.add_vertex(a);
        self.add_vertex(b);
        self.neighbors[a.index()].push(b);
        self.neighbors[b.index()].push(a);
        true
    }

    /// Adds every edge of `edges` whose endpoints are both in `allowed`.
    /// Returns the number of edges that were new.
    pub fn merge_edges(
        &mut self,
        edges: &[(NodeLabel, NodeLabel)],
        allowed: &[NodeLabel],
    ) -> usize {
        let mut added = 0;
        for &(a, b) in edges {
            if allowed.contains(&a) && allowed.contains(&b) && self.add_edge(a, b) {
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, label: NodeLabel) -> bool {
        self.present[label.index()]
    }

    pub fn has_edge(&self, a: NodeLabel, b: NodeLabel) -> bool {
        self.neighbors[a.index()].contains(&b)
    }

    pub fn neighbors(&self, label: NodeLabel) -> &[NodeLabel] {
        &self.neighbors[label.index()]
    }

    pub fn vertices(&self) -> impl Iterator<Item = NodeLabel> + '_ {
        NodeLabel::ALL.into_iter().filter(|l| self.contains(*l))
    }

    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn entries(&self) -> Vec<AdjacencyEntry> {
        self.vertices()
            .map(|label| AdjacencyEntry {
                label,
                neighbors: self.neighbors(label).to_vec(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use NodeLabel::*;

    #[test]
    fn edges_are_symmetric_and_deduplicated() {
        let mut adj = LabelAdjacency::new();
        assert!(adj.add_edge(Start, N1));
        assert!(!adj.add_edge(N1, Start));
        assert!(!adj.add_edge(C, C));
        assert_eq!(adj.neighbors(N1), &[Start]);
        assert_eq!(adj.edge_count(), 1);
        assert!(!adj.contains(C));
    }

    #[test]
    fn merge_respects_allowed_labels() {
        let mut adj = LabelAdjacency::new();
        adj.add_vertex(Start);
        let added = adj.merge_edges(&[(Start, N1), (N1, C), (Start, N2)], &[Start, N1, N2]);
        assert_eq!(added, 2);
        assert!(adj.has_edge(N1, Start));
        assert!(!adj.contains(C));
        assert_eq!(adj.vertices().collect::<Vec<_>>(), vec![Start, N1, N2]);
    }
}
