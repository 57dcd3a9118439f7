use super::TimingBreakdown;
use crate::detection::DetectionDocument;
use crate::graph::{BuildMode, BuildTrace, Graph};
use crate::label::NodeLabel;
use crate::search::AdjacencyEntry;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Result of [`PathPlanner::plan_with_diagnostics`](crate::PathPlanner::plan_with_diagnostics).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    pub input: InputDescriptor,
    pub start: NodeLabel,
    pub goal: NodeLabel,
    pub complete: GraphSummary,
    pub traversable: GraphSummary,
    /// Routing view after merging unblocked complete-graph edges.
    pub routing: Vec<AdjacencyEntry>,
    pub merged_edges: usize,
    pub path: Vec<NodeLabel>,
    pub exits: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<PathBuf>,
    pub timings: TimingBreakdown,
}

impl PlanReport {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    pub image_width: u32,
    pub image_height: u32,
    pub nodes: usize,
    pub pylons: usize,
    pub lines: usize,
}

impl InputDescriptor {
    pub fn from_document(document: &DetectionDocument, source: Option<PathBuf>) -> Self {
        Self {
            source,
            image_width: document.image_width,
            image_height: document.image_height,
            nodes: document.nodes.len(),
            pylons: document.pylons.len(),
            lines: document.lines.len(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSummary {
    pub label: NodeLabel,
    pub x: f64,
    pub y: f64,
    pub blocked: bool,
}

/// Serializable snapshot of one built graph.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub mode: BuildMode,
    pub nodes: Vec<NodeSummary>,
    pub edges: Vec<(NodeLabel, NodeLabel)>,
    /// Rows and columns follow `nodes`.
    pub adjacency_matrix: Vec<Vec<u8>>,
    pub trace: BuildTrace,
}

impl GraphSummary {
    pub fn new(graph: &Graph, mode: BuildMode, trace: BuildTrace) -> Self {
        Self {
            mode,
            nodes: graph
                .nodes()
                .iter()
                .map(|n| NodeSummary {
                    label: n.label,
                    x: n.position.x,
                    y: n.position.y,
                    blocked: n.blocked,
                })
                .collect(),
            edges: graph.edge_labels(),
            adjacency_matrix: graph.adjacency_matrix(),
            trace,
        }
    }
}

fn join<T: ToString>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

fn write_graph(out: &mut String, title: &str, g: &GraphSummary) {
    let blocked = g.nodes.iter().filter(|n| n.blocked).count();
    let _ = writeln!(
        out,
        "\n{title} graph: {} nodes ({blocked} blocked), {} edges",
        g.nodes.len(),
        g.edges.len()
    );
    for n in &g.nodes {
        let _ = writeln!(
            out,
            "  {:<5} ({:7.1}, {:7.1}){}",
            n.label.as_str(),
            n.x,
            n.y,
            if n.blocked { "  BLOCKED" } else { "" }
        );
    }
    let header: Vec<String> = g
        .nodes
        .iter()
        .map(|n| format!("{:>5}", n.label.as_str()))
        .collect();
    let _ = writeln!(out, "  adjacency:\n        {}", header.join(""));
    for (n, row) in g.nodes.iter().zip(&g.adjacency_matrix) {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>5}")).collect();
        let _ = writeln!(out, "  {:<5} {}", n.label.as_str(), cells.join(""));
    }
    let t = &g.trace;
    let _ = writeln!(
        out,
        "  stages: seeded={} pylon_nodes={} blocked={} synthesized={}+{} dropped={} lines={}/{} geometric={} essential={} forbidden_removed={} emergency={}",
        t.seeded,
        t.pylon_nodes,
        t.blocked_by_proximity,
        t.endpoint_nodes,
        t.intersection_nodes,
        t.unlabeled_dropped,
        t.line_links_added,
        t.line_links_added + t.line_links_skipped,
        t.geometric_added,
        t.essential_added,
        t.forbidden_removed,
        t.emergency_added
    );
}

/// Human-readable rendering of a [`PlanReport`].
pub fn text_summary(report: &PlanReport) -> String {
    let mut out = String::new();
    let input = &report.input;
    let _ = writeln!(out, "Plan summary");
    if let Some(source) = &input.source {
        let _ = writeln!(out, "  input: {}", source.display());
    }
    let _ = writeln!(
        out,
        "  image: {}x{}  nodes={} pylons={} lines={}",
        input.image_width, input.image_height, input.nodes, input.pylons, input.lines
    );
    let _ = writeln!(out, "  route: {} -> {}", report.start, report.goal);

    write_graph(&mut out, "Complete", &report.complete);
    write_graph(&mut out, "Traversable", &report.traversable);

    let _ = writeln!(
        out,
        "\nRouting view ({} edges merged from the complete graph)",
        report.merged_edges
    );
    for entry in &report.routing {
        let _ = writeln!(
            out,
            "  {:<5} -> [{}]",
            entry.label.as_str(),
            join(&entry.neighbors, ", ")
        );
    }

    if report.found() {
        let _ = writeln!(out, "\nFastest path: {}", join(&report.path, " -> "));
        let _ = writeln!(out, "Exit indices: [{}]", join(&report.exits, ", "));
    } else {
        let _ = writeln!(out, "\nNo route found; re-capture detections and retry.");
    }
    if let Some(path) = &report.rendered {
        let _ = writeln!(out, "Graph image: {}", path.display());
    }

    let stages: Vec<String> = report
        .timings
        .stages
        .iter()
        .map(|s| format!("{}={:.3}", s.label, s.elapsed_ms))
        .collect();
    let _ = writeln!(
        out,
        "\nTimings (ms): {} total={:.3}",
        stages.join(" "),
        report.timings.total_ms
    );
    out
}

pub fn print_text_summary(report: &PlanReport) {
    print!("{}", text_summary(report));
}
