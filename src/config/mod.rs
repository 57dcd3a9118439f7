//! JSON configuration for the `plan_route` tool.
//!
//! Every field is optional; anything left out keeps the library default.

pub mod plan;

pub use plan::{load_config, ConnectionConfig, GraphConfig, PlannerConfig};
