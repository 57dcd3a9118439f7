//! Maze graph reconstruction from raw detections.
//!
//! Overview
//! - Seeds junction nodes from detected node markers, adds blocked nodes for
//!   isolated pylons and blocks nodes that sit within the safety margin of a
//!   pylon.
//! - Resolves every detected line to a pair of nodes (nearest node, new node
//!   at the endpoint, node at an intersection with another line, or the
//!   globally nearest node as last resort).
//! - Names the nodes from the maze profile's bounding-box templates.
//! - Adds further edges inferred from line geometry, then applies the
//!   profile's topology corrections.
//!
//! Two graphs come out of the same pipeline: [`BuildMode::Complete`] keeps
//! every inferred connection and is used to decode turns;
//! [`BuildMode::Traversable`] drops connections touching blocked nodes and
//! feeds the router. Both share the same node labeling.
//!
//! Modules
//! - [`params`] – distance thresholds and multipliers.
//! - `builder` – the staged [`GraphBuilder`].
//! - `labeling` – template-based label assignment.
//! - `connections` – geometric edge inference between node pairs.
//! - `topology` – essential/forbidden edges and emergency connectivity.

mod builder;
mod connections;
mod labeling;
pub mod params;
mod topology;

pub use builder::{BuildTrace, GraphBuilder};
pub use params::{ConnectionParams, GraphParams};

use crate::geometry::Coordinate;
use crate::label::{NodeLabel, LABEL_COUNT};
use serde::Serialize;

/// Index of a node inside [`Graph::nodes`].
pub type NodeId = usize;

/// Edge inclusion policy used when building a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BuildMode {
    /// Every inferred connection, including ones touching blocked nodes.
    Complete,
    /// Connections between unblocked nodes only.
    Traversable,
}

impl BuildMode {
    /// Whether an edge between nodes with the given blocked flags is kept.
    #[inline]
    pub fn admits(self, a_blocked: bool, b_blocked: bool) -> bool {
        match self {
            BuildMode::Complete => true,
            BuildMode::Traversable => !a_blocked && !b_blocked,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: NodeLabel,
    pub position: Coordinate,
    /// Too close to a pylon to be driven through.
    pub blocked: bool,
}

/// Undirected edge; `(a, b)` and `(b, a)` denote the same edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    pub a: NodeId,
    pub b: NodeId,
    pub weight: u32,
}

impl GraphEdge {
    #[inline]
    pub fn connects(&self, x: NodeId, y: NodeId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    #[inline]
    pub fn touches(&self, id: NodeId) -> bool {
        self.a == id || self.b == id
    }

    /// The endpoint opposite `id`, if the edge touches `id`.
    #[inline]
    pub fn other(&self, id: NodeId) -> Option<NodeId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Labeled junction graph. Labels are unique, there are at most
/// [`LABEL_COUNT`] nodes and no self-loops.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl Graph {
    pub(crate) fn from_nodes(nodes: Vec<GraphNode>) -> Self {
        debug_assert!(nodes.len() <= LABEL_COUNT);
        Self {
            nodes,
            edges: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id]
    }

    pub fn node_by_label(&self, label: NodeLabel) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.label == label)
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edges.iter().any(|e| e.connects(a, b))
    }

    pub fn has_label_edge(&self, a: NodeLabel, b: NodeLabel) -> bool {
        match (self.node_by_label(a), self.node_by_label(b)) {
            (Some(x), Some(y)) => self.has_edge(x.id, y.id),
            _ => false,
        }
    }

    /// Adds an edge of weight 1. Self-loops and duplicates are ignored;
    /// returns whether the edge was inserted.
    pub(crate) fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b || self.has_edge(a, b) {
            return false;
        }
        self.edges.push(GraphEdge { a, b, weight: 1 });
        true
    }

    pub(crate) fn remove_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| !e.connects(a, b));
        self.edges.len() != before
    }

    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().filter_map(move |e| e.other(id))
    }

    /// Edge list as label pairs, in insertion order.
    pub fn edge_labels(&self) -> Vec<(NodeLabel, NodeLabel)> {
        self.edges
            .iter()
            .map(|e| (self.nodes[e.a].label, self.nodes[e.b].label))
            .collect()
    }

    pub fn unblocked_labels(&self) -> Vec<NodeLabel> {
        self.nodes
            .iter()
            .filter(|n| !n.blocked)
            .map(|n| n.label)
            .collect()
    }

    pub fn blocked_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.blocked).count()
    }

    /// Symmetric 0/1 adjacency matrix in node order.
    pub fn adjacency_matrix(&self) -> Vec<Vec<u8>> {
        let n = self.nodes.len();
        let mut matrix = vec![vec![0u8; n]; n];
        for e in &self.edges {
            matrix[e.a][e.b] = 1;
            matrix[e.b][e.a] = 1;
        }
        matrix
    }
}
