//! Routing over the traversable maze.
//!
//! Modules
//! - `adjacency` – label-keyed undirected adjacency view of a graph.
//! - `heuristic` – per-goal hop-distance estimates derived from the maze
//!   profile.
//! - `astar` – A* search with a fixed insertion-order tie-break.

mod adjacency;
mod astar;
mod heuristic;

pub use adjacency::{AdjacencyEntry, LabelAdjacency};
pub use astar::find_path;
pub(crate) use astar::format_path;
pub use heuristic::HeuristicTable;
