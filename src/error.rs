//! Error types for the planner.

use crate::label::NodeLabel;
use std::path::PathBuf;

/// Result type alias
pub type Result<T> = std::result::Result<T, PlanError>;

/// Failures that abort a planning request.
///
/// An empty path is not an error: it is the valid "no route found" outcome
/// and is returned as `Ok`.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Input document does not exist
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Document or config file could not be deserialized into the expected schema
    #[error("failed to parse {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A label has no neighbor priority entry
    #[error("no neighbor profile for {0}")]
    MissingProfile(NodeLabel),

    /// Path step that is not among the current node's prioritized neighbors
    #[error("{next} is not a valid neighbor of {current}; available neighbors: [{}]", join_labels(available))]
    InvalidTransition {
        current: NodeLabel,
        next: NodeLabel,
        available: Vec<NodeLabel>,
    },

    /// String outside the fixed label vocabulary
    #[error("unknown node label '{0}'")]
    UnknownLabel(String),

    /// Maze profile violates its own invariants
    #[error("invalid maze profile: {0}")]
    InvalidProfile(String),

    /// I/O error
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Diagnostic image could not be written
    #[error("failed to save image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

fn join_labels(labels: &[NodeLabel]) -> String {
    labels
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_names_node_and_neighbors() {
        let err = PlanError::InvalidTransition {
            current: NodeLabel::N1,
            next: NodeLabel::A,
            available: vec![NodeLabel::C, NodeLabel::N4],
        };
        assert_eq!(
            err.to_string(),
            "A is not a valid neighbor of N1; available neighbors: [C, N4]"
        );
    }
}
