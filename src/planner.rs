//! End-to-end planning: detections in, exit indices out.
//!
//! Stages
//! 1. load the detection document;
//! 2. build the complete and the traversable graph;
//! 3. project the traversable graph into a label adjacency view and merge
//!    every complete-graph edge whose endpoints are both unblocked;
//! 4. run A* on that view;
//! 5. decode the path against the full complete-graph edge list, so turns
//!    count every physical line, including ones the router avoided;
//! 6. optionally render the complete graph.
//!
//! An empty path is a valid outcome (no route) and yields no exit indices.

use crate::detection::DetectionDocument;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    GraphSummary, InputDescriptor, PlanReport, StageTiming, TimingBreakdown,
};
use crate::error::Result;
use crate::graph::{BuildMode, GraphBuilder, GraphParams};
use crate::interpret::PathInterpreter;
use crate::label::NodeLabel;
use crate::profile::MazeProfile;
use crate::render::render_graph;
use crate::search::{find_path, format_path, HeuristicTable, LabelAdjacency};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Planner configuration.
#[derive(Clone, Debug, Default)]
pub struct PlannerParams {
    pub graph: GraphParams,
    /// Where to write a PNG of the complete graph after a successful plan.
    pub render_path: Option<PathBuf>,
}

/// Route and decoded exits of one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanOutcome {
    pub path: Vec<NodeLabel>,
    pub exits: Vec<u32>,
}

pub struct PathPlanner {
    params: PlannerParams,
    profile: MazeProfile,
    heuristic: HeuristicTable,
}

impl Default for PathPlanner {
    fn default() -> Self {
        Self::new(PlannerParams::default(), MazeProfile::default())
    }
}

impl PathPlanner {
    pub fn new(params: PlannerParams, profile: MazeProfile) -> Self {
        let heuristic = HeuristicTable::from_profile(&profile);
        Self {
            params,
            profile,
            heuristic,
        }
    }

    pub fn params(&self) -> &PlannerParams {
        &self.params
    }

    pub fn profile(&self) -> &MazeProfile {
        &self.profile
    }

    /// Loads `document_path` and returns the exit indices from `start` to
    /// `goal`. An unreachable goal yields an empty sequence.
    pub fn compute_path(
        &self,
        document_path: &Path,
        start: NodeLabel,
        goal: NodeLabel,
    ) -> Result<Vec<u32>> {
        let document = DetectionDocument::load(document_path)?;
        Ok(self.plan(&document, start, goal)?.exits)
    }

    pub fn plan(
        &self,
        document: &DetectionDocument,
        start: NodeLabel,
        goal: NodeLabel,
    ) -> Result<PlanOutcome> {
        let report = self.plan_with_diagnostics(document, start, goal)?;
        Ok(PlanOutcome {
            path: report.path,
            exits: report.exits,
        })
    }

    /// Like [`compute_path`](Self::compute_path) but returns the full report,
    /// including the load time.
    pub fn plan_file(
        &self,
        document_path: &Path,
        start: NodeLabel,
        goal: NodeLabel,
    ) -> Result<PlanReport> {
        let load_start = Instant::now();
        let document = DetectionDocument::load(document_path)?;
        let load_ms = elapsed_ms(load_start);
        let mut report = self.plan_with_diagnostics(&document, start, goal)?;
        report.input.source = Some(document_path.to_path_buf());
        report
            .timings
            .stages
            .insert(0, StageTiming::new("load", load_ms));
        report.timings.total_ms += load_ms;
        Ok(report)
    }

    pub fn plan_with_diagnostics(
        &self,
        document: &DetectionDocument,
        start: NodeLabel,
        goal: NodeLabel,
    ) -> Result<PlanReport> {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();
        debug!("planning {start} -> {goal}");

        let build_start = Instant::now();
        let builder = GraphBuilder::new(&self.params.graph, &self.profile);
        let (complete, complete_trace) = builder.build_with_trace(document, BuildMode::Complete);
        let (traversable, traversable_trace) =
            builder.build_with_trace(document, BuildMode::Traversable);
        timings.record_since("build", build_start);

        let search_start = Instant::now();
        let complete_edges = complete.edge_labels();
        let mut adjacency = LabelAdjacency::from_graph(&traversable);
        let unblocked = traversable.unblocked_labels();
        let merged_edges = adjacency.merge_edges(&complete_edges, &unblocked);
        if merged_edges > 0 {
            debug!("merged {merged_edges} complete-graph edges into the routing view");
        }
        let path = find_path(&adjacency, start, goal, &self.heuristic);
        timings.record_since("search", search_start);

        let interpret_start = Instant::now();
        let exits = PathInterpreter::new(&self.profile).interpret(&complete_edges, &path)?;
        timings.record_since("interpret", interpret_start);
        if path.is_empty() {
            warn!("no route from {start} to {goal}");
        } else {
            info!("route {} exits {:?}", format_path(&path), exits);
        }

        let mut rendered = None;
        if let Some(render_path) = &self.params.render_path {
            let render_start = Instant::now();
            render_graph(&complete, render_path)?;
            timings.record_since("render", render_start);
            rendered = Some(render_path.clone());
        }

        timings.total_ms = elapsed_ms(total_start);
        Ok(PlanReport {
            input: InputDescriptor::from_document(document, None),
            start,
            goal,
            complete: GraphSummary::new(&complete, BuildMode::Complete, complete_trace),
            traversable: GraphSummary::new(
                &traversable,
                BuildMode::Traversable,
                traversable_trace,
            ),
            routing: adjacency.entries(),
            merged_edges,
            path,
            exits,
            rendered,
            timings,
        })
    }
}

/// [`PathPlanner::compute_path`] with default parameters and the built-in
/// maze profile.
pub fn compute_path(document_path: &Path, start: NodeLabel, goal: NodeLabel) -> Result<Vec<u32>> {
    PathPlanner::default().compute_path(document_path, start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{LineObject, NodeObject};
    use NodeLabel::*;

    fn doc_with_lines(
        nodes: &[(f64, f64)],
        lines: &[((f64, f64), (f64, f64))],
    ) -> DetectionDocument {
        DetectionDocument {
            image_width: 1000,
            image_height: 1000,
            nodes: nodes
                .iter()
                .map(|&(x, y)| NodeObject {
                    x,
                    y,
                    detection_id: String::new(),
                })
                .collect(),
            pylons: Vec::new(),
            lines: lines
                .iter()
                .map(|&((x0, y0), (x1, y1))| LineObject {
                    x_start: x0,
                    y_start: y0,
                    x_end: x1,
                    y_end: y1,
                    detection_id: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn start_equals_goal_yields_no_exits() {
        let doc = doc_with_lines(
            &[(500.0, 900.0), (100.0, 900.0)],
            &[((500.0, 900.0), (100.0, 900.0))],
        );
        let outcome = PathPlanner::default().plan(&doc, Start, Start).unwrap();
        assert_eq!(outcome.path, vec![Start]);
        assert!(outcome.exits.is_empty());
    }

    #[test]
    fn missing_goal_is_empty_outcome_not_error() {
        let doc = doc_with_lines(
            &[(500.0, 900.0), (100.0, 900.0)],
            &[((500.0, 900.0), (100.0, 900.0))],
        );
        let outcome = PathPlanner::default().plan(&doc, Start, B).unwrap();
        assert!(outcome.path.is_empty());
        assert!(outcome.exits.is_empty());
    }

    #[test]
    fn report_records_stage_timings() {
        let doc = doc_with_lines(
            &[(500.0, 900.0), (100.0, 900.0)],
            &[((500.0, 900.0), (100.0, 900.0))],
        );
        let report = PathPlanner::default()
            .plan_with_diagnostics(&doc, Start, N1)
            .unwrap();
        assert_eq!(report.path, vec![Start, N1]);
        assert_eq!(report.exits, vec![1]);
        for stage in ["build", "search", "interpret"] {
            assert!(report.timings.stage_ms(stage).is_some(), "{stage}");
        }
        assert!(report.timings.stage_ms("render").is_none());
        assert_eq!(report.complete.nodes.len(), 2);
    }
}
