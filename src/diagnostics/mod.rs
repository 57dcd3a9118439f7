//! Structured diagnostics for one planning request.
//!
//! [`PlanReport`] is returned by
//! [`PathPlanner::plan_with_diagnostics`](crate::PathPlanner::plan_with_diagnostics)
//! and bundles what the planner saw (input counts), what it built (both
//! graphs and the routing view), what it decided (path and exit indices) and
//! how long each stage took.

pub mod report;
pub mod timing;

pub use report::{
    print_text_summary, text_summary, GraphSummary, InputDescriptor, NodeSummary, PlanReport,
};
pub use timing::{StageTiming, TimingBreakdown};
