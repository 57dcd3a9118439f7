#![doc = include_str!("../README.md")]

// Public modules
pub mod detection;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod interpret;
pub mod label;
pub mod planner;
pub mod profile;
pub mod search;

// Supporting modules
pub mod config;
pub mod geometry;
pub mod io;
pub mod render;

// --- High-level re-exports -------------------------------------------------

// Main entry points.
pub use crate::planner::{compute_path, PathPlanner, PlanOutcome, PlannerParams};
pub use crate::detection::DetectionDocument;
pub use crate::error::{PlanError, Result};
pub use crate::label::NodeLabel;
pub use crate::profile::MazeProfile;

// Diagnostics returned by the planner.
pub use crate::diagnostics::PlanReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use maze_planner::prelude::*;
/// use std::path::Path;
///
/// # fn main() -> Result<(), PlanError> {
/// let planner = PathPlanner::default();
/// let exits = planner.compute_path(Path::new("detections.json"), NodeLabel::Start, NodeLabel::C)?;
/// println!("exits={exits:?}");
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::graph::{BuildMode, Graph, GraphBuilder, GraphParams};
    pub use crate::search::{find_path, HeuristicTable, LabelAdjacency};
    pub use crate::{
        DetectionDocument, MazeProfile, NodeLabel, PathPlanner, PlanError, PlannerParams,
    };
}
