//! Staged construction of a labeled maze graph from one detection snapshot.
//!
//! Stages, in order:
//! 1. seed nodes from detected node markers (unblocked);
//! 2. add a blocked node for every pylon without a nearby node;
//! 3. block nodes inside the safety margin of their nearest pylon;
//! 4. resolve each line's endpoints to nodes, synthesizing nodes while the
//!    cap allows;
//! 5. assign labels from the maze profile;
//! 6. add line links admitted by the build mode, then geometric connections;
//! 7. apply the profile's topology corrections.
//!
//! No stage fails: poor detections degrade into fewer nodes or edges, and
//! callers observe that as an empty route.

use super::connections::add_geometric_connections;
use super::labeling::assign_labels;
use super::params::GraphParams;
use super::topology::apply_corrections;
use super::{BuildMode, Graph, GraphNode, NodeId};
use crate::detection::{DetectionDocument, PylonObject};
use crate::geometry::{distance, Coordinate, Segment};
use crate::profile::MazeProfile;
use log::{debug, info, warn};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeSource {
    Detected,
    Pylon,
    Endpoint,
    Intersection,
}

#[derive(Clone, Debug)]
struct RawNode {
    position: Coordinate,
    blocked: bool,
    source: NodeSource,
}

/// Per-stage counters recorded while building one graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildTrace {
    pub seeded: usize,
    pub pylon_nodes: usize,
    pub blocked_by_proximity: usize,
    pub endpoint_nodes: usize,
    pub intersection_nodes: usize,
    pub unlabeled_dropped: usize,
    pub line_links_added: usize,
    pub line_links_skipped: usize,
    pub geometric_added: usize,
    pub essential_added: usize,
    pub forbidden_removed: usize,
    pub emergency_added: usize,
}

/// Builds [`Graph`]s from detections using fixed thresholds and a maze profile.
pub struct GraphBuilder<'a> {
    params: &'a GraphParams,
    profile: &'a MazeProfile,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(params: &'a GraphParams, profile: &'a MazeProfile) -> Self {
        Self { params, profile }
    }

    pub fn build(&self, document: &DetectionDocument, mode: BuildMode) -> Graph {
        self.build_with_trace(document, mode).0
    }

    pub fn build_with_trace(
        &self,
        document: &DetectionDocument,
        mode: BuildMode,
    ) -> (Graph, BuildTrace) {
        let mut trace = BuildTrace::default();
        let lines = document.line_segments();

        let mut nodes = self.seed_nodes(document);
        trace.seeded = nodes.len();
        trace.pylon_nodes = self.merge_pylons(&mut nodes, &document.pylons);
        trace.blocked_by_proximity = self.propagate_blocking(&mut nodes, &document.pylons);

        let links = self.resolve_line_links(&mut nodes, &lines);
        trace.endpoint_nodes = count_source(&nodes, NodeSource::Endpoint);
        trace.intersection_nodes = count_source(&nodes, NodeSource::Intersection);

        let (mut graph, raw_to_id) = self.label_nodes(&nodes);
        trace.unlabeled_dropped = nodes.len() - graph.nodes().len();
        for node in graph.nodes().iter().filter(|n| n.blocked) {
            info!(
                "blocked node {} at ({:.1}, {:.1})",
                node.label, node.position.x, node.position.y
            );
        }

        for (s, e) in links {
            let (Some(a), Some(b)) = (raw_to_id[s], raw_to_id[e]) else {
                continue;
            };
            if a == b {
                continue;
            }
            let (na, nb) = (graph.node(a), graph.node(b));
            let (la, lb) = (na.label, nb.label);
            if mode.admits(na.blocked, nb.blocked) {
                if graph.add_edge(a, b) {
                    debug!("added line connection {la} - {lb}");
                    trace.line_links_added += 1;
                }
            } else {
                debug!("skipped connection to blocked node {la} - {lb}");
                trace.line_links_skipped += 1;
            }
        }

        trace.geometric_added = add_geometric_connections(&mut graph, &lines, mode, self.params);

        let stats = apply_corrections(&mut graph, self.profile, mode);
        trace.essential_added = stats.essential_added;
        trace.forbidden_removed = stats.forbidden_removed;
        trace.emergency_added = stats.emergency_added;

        debug!(
            "{:?} graph: {} nodes ({} blocked), {} edges",
            mode,
            graph.nodes().len(),
            graph.blocked_count(),
            graph.edges().len()
        );
        (graph, trace)
    }

    fn seed_nodes(&self, document: &DetectionDocument) -> Vec<RawNode> {
        if document.nodes.len() > self.params.max_nodes {
            warn!(
                "{} detected nodes exceed the cap of {}; extra detections ignored",
                document.nodes.len(),
                self.params.max_nodes
            );
        }
        document
            .nodes
            .iter()
            .take(self.params.max_nodes)
            .map(|n| RawNode {
                position: n.center(),
                blocked: false,
                source: NodeSource::Detected,
            })
            .collect()
    }

    /// A pylon with no node nearby stands on a junction the detector missed.
    fn merge_pylons(&self, nodes: &mut Vec<RawNode>, pylons: &[PylonObject]) -> usize {
        let mut added = 0;
        for pylon in pylons {
            let center = pylon.center();
            let has_nearby = nodes
                .iter()
                .any(|n| distance(&n.position, &center) < self.params.pylon_nearby_dist);
            if !has_nearby && nodes.len() < self.params.max_nodes {
                debug!("added pylon node at ({:.1}, {:.1})", center.x, center.y);
                nodes.push(RawNode {
                    position: center,
                    blocked: true,
                    source: NodeSource::Pylon,
                });
                added += 1;
            }
        }
        added
    }

    fn propagate_blocking(&self, nodes: &mut [RawNode], pylons: &[PylonObject]) -> usize {
        let radius = self.params.blocking_radius();
        let mut blocked = 0;
        for node in nodes.iter_mut().filter(|n| !n.blocked) {
            let nearest = pylons
                .iter()
                .map(|p| (p, distance(&node.position, &p.center())))
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
            if let Some((pylon, d)) = nearest {
                if d < radius {
                    node.blocked = true;
                    blocked += 1;
                    debug!(
                        "blocking node at ({:.1}, {:.1}) due to pylon at ({:.1}, {:.1}), distance {:.1}",
                        node.position.x, node.position.y, pylon.x, pylon.y, d
                    );
                }
            }
        }
        blocked
    }

    /// Resolves both endpoints of every line to raw node indices.
    fn resolve_line_links(
        &self,
        nodes: &mut Vec<RawNode>,
        lines: &[Segment],
    ) -> Vec<(usize, usize)> {
        let mut links = Vec::with_capacity(lines.len());
        for (li, line) in lines.iter().enumerate() {
            let mut start = self.nearest_within(nodes, &line.p0);
            let mut end = self.nearest_within(nodes, &line.p1);

            if start.is_none() {
                start = self.push_node(nodes, line.p0, NodeSource::Endpoint);
            }
            if end.is_none() {
                end = self.push_node(nodes, line.p1, NodeSource::Endpoint);
            }

            if start.is_none() || end.is_none() {
                for (_, other) in lines.iter().enumerate().filter(|(oi, _)| *oi != li) {
                    let Some(ip) =
                        line.intersection(other, self.params.line_intersection_tolerance)
                    else {
                        continue;
                    };
                    let found = self
                        .nearest_within(nodes, &ip)
                        .or_else(|| self.push_node(nodes, ip, NodeSource::Intersection));
                    if start.is_none() {
                        start = found;
                    } else if end.is_none() {
                        end = found;
                    }
                    if start.is_some() && end.is_some() {
                        break;
                    }
                }
            }

            let start = start.or_else(|| nearest_any(nodes, &line.p0));
            let end = end.or_else(|| nearest_any(nodes, &line.p1));
            if let (Some(s), Some(e)) = (start, end) {
                links.push((s, e));
            }
        }
        links
    }

    fn nearest_within(&self, nodes: &[RawNode], p: &Coordinate) -> Option<usize> {
        nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (i, distance(&n.position, p)))
            .filter(|&(_, d)| d < self.params.max_node_connection_dist)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
    }

    fn push_node(
        &self,
        nodes: &mut Vec<RawNode>,
        position: Coordinate,
        source: NodeSource,
    ) -> Option<usize> {
        if nodes.len() >= self.params.max_nodes {
            return None;
        }
        debug!(
            "synthesized {:?} node at ({:.1}, {:.1})",
            source, position.x, position.y
        );
        nodes.push(RawNode {
            position,
            blocked: false,
            source,
        });
        Some(nodes.len() - 1)
    }

    /// Labels raw nodes and orders them by label. Returns the graph and the
    /// raw-index to node-id mapping (`None` for nodes left unlabeled).
    fn label_nodes(&self, nodes: &[RawNode]) -> (Graph, Vec<Option<NodeId>>) {
        let positions: Vec<Coordinate> = nodes.iter().map(|n| n.position).collect();
        let labels = assign_labels(&positions, self.profile);

        let mut labeled: Vec<(usize, crate::label::NodeLabel)> = labels
            .iter()
            .enumerate()
            .filter_map(|(i, l)| l.map(|l| (i, l)))
            .collect();
        if labeled.len() < nodes.len() {
            warn!(
                "{} nodes left without a label",
                nodes.len() - labeled.len()
            );
        }
        labeled.sort_by_key(|&(_, l)| l);

        let mut raw_to_id = vec![None; nodes.len()];
        let graph_nodes: Vec<GraphNode> = labeled
            .into_iter()
            .enumerate()
            .map(|(id, (raw, label))| {
                raw_to_id[raw] = Some(id);
                GraphNode {
                    id,
                    label,
                    position: nodes[raw].position,
                    blocked: nodes[raw].blocked,
                }
            })
            .collect();
        (Graph::from_nodes(graph_nodes), raw_to_id)
    }
}

fn nearest_any(nodes: &[RawNode], p: &Coordinate) -> Option<usize> {
    nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (i, distance(&n.position, p)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}

fn count_source(nodes: &[RawNode], source: NodeSource) -> usize {
    nodes.iter().filter(|n| n.source == source).count()
}
