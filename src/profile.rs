//! Declarative description of the fixed maze topology.
//!
//! Everything that encodes *this* maze's layout lives here as data rather
//! than as branches in the builder or interpreter:
//!
//! - label templates: where each structural junction sits inside the
//!   bounding box of all nodes (fractions of width/height);
//! - trailing labels: the order in which the leftover nodes are named,
//!   sorted by ascending x;
//! - neighbor priority: the clockwise order of physical lines around each
//!   junction, used to decode exit indices;
//! - essential / forbidden edges and critical labels for topology repair;
//! - canonical edges: the maze as built, used to derive the A* heuristic.
//!
//! A different maze is supported by loading another profile from JSON with
//! [`MazeProfile::from_json_file`]. The labeling and blocking heuristics in
//! the builder still assume eight junctions and these role names.

use crate::error::{PlanError, Result};
use crate::io::read_json_file;
use crate::label::{NodeLabel, LABEL_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Expected position of a structural label, as fractions of the node
/// bounding box (`0.0` = min, `1.0` = max on each axis).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelTemplate {
    pub label: NodeLabel,
    pub rel: [f64; 2],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MazeProfile {
    pub label_templates: Vec<LabelTemplate>,
    pub trailing_labels: Vec<NodeLabel>,
    pub neighbor_priority: BTreeMap<NodeLabel, Vec<NodeLabel>>,
    pub essential_edges: Vec<(NodeLabel, NodeLabel)>,
    pub forbidden_edges: Vec<(NodeLabel, NodeLabel)>,
    pub critical_labels: Vec<NodeLabel>,
    pub canonical_edges: Vec<(NodeLabel, NodeLabel)>,
}

impl Default for MazeProfile {
    fn default() -> Self {
        use NodeLabel::*;
        let neighbor_priority = BTreeMap::from([
            (Start, vec![N1, N3, N2]),
            (N1, vec![Start, C, N4, N3, B]),
            (N2, vec![Start, N3, A]),
            (N3, vec![Start, N1, N4, A, N2, B]),
            (N4, vec![N1, C, B, A, N3]),
            (A, vec![N3, N4, B, N2]),
            (B, vec![C, A, N4, N3, N1]),
            (C, vec![N1, B, N4]),
        ]);
        Self {
            label_templates: vec![
                LabelTemplate {
                    label: Start,
                    rel: [0.5, 1.0],
                },
                LabelTemplate {
                    label: N1,
                    rel: [0.0, 1.0],
                },
                LabelTemplate {
                    label: N2,
                    rel: [1.0, 1.0],
                },
                LabelTemplate {
                    label: N3,
                    rel: [0.5, 0.66],
                },
                LabelTemplate {
                    label: N4,
                    rel: [0.5, 0.4],
                },
            ],
            trailing_labels: vec![C, B, A],
            neighbor_priority,
            essential_edges: vec![(Start, N1), (Start, N2), (Start, N3)],
            forbidden_edges: vec![
                (N1, B),
                (N3, B),
                (Start, A),
                (Start, B),
                (Start, C),
                (Start, N4),
                (N1, A),
            ],
            critical_labels: vec![Start, A, B, C],
            canonical_edges: vec![
                (Start, N1),
                (Start, N3),
                (Start, N2),
                (N1, C),
                (N1, N4),
                (N1, N3),
                (N2, A),
                (C, B),
                (B, N4),
                (A, B),
                (C, N4),
                (N4, N3),
                (N3, N2),
                (N3, A),
                (N4, A),
            ],
        }
    }
}

impl MazeProfile {
    /// Load a profile from JSON and check its invariants.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let profile: MazeProfile = read_json_file(path)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Clockwise neighbor order around `label`, if the profile has one.
    pub fn priority(&self, label: NodeLabel) -> Option<&[NodeLabel]> {
        self.neighbor_priority.get(&label).map(Vec::as_slice)
    }

    pub fn is_forbidden(&self, a: NodeLabel, b: NodeLabel) -> bool {
        self.forbidden_edges
            .iter()
            .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for label in self
            .label_templates
            .iter()
            .map(|t| t.label)
            .chain(self.trailing_labels.iter().copied())
        {
            if !seen.insert(label) {
                return Err(PlanError::InvalidProfile(format!(
                    "label {label} is assigned more than once"
                )));
            }
        }
        if seen.len() > LABEL_COUNT {
            return Err(PlanError::InvalidProfile(format!(
                "{} labels exceed the node cap of {LABEL_COUNT}",
                seen.len()
            )));
        }
        for t in &self.label_templates {
            if !t.rel.iter().all(|v| v.is_finite()) {
                return Err(PlanError::InvalidProfile(format!(
                    "template for {} is not finite",
                    t.label
                )));
            }
        }
        for (label, order) in &self.neighbor_priority {
            let unique: BTreeSet<_> = order.iter().collect();
            if unique.len() != order.len() || unique.contains(label) {
                return Err(PlanError::InvalidProfile(format!(
                    "neighbor priority of {label} repeats an entry or lists itself"
                )));
            }
        }
        for &(a, b) in self
            .essential_edges
            .iter()
            .chain(&self.forbidden_edges)
            .chain(&self.canonical_edges)
        {
            if a == b {
                return Err(PlanError::InvalidProfile(format!("self-loop edge {a}-{a}")));
            }
        }
        if let Some(&(a, b)) = self
            .essential_edges
            .iter()
            .find(|&&(a, b)| self.is_forbidden(a, b))
        {
            return Err(PlanError::InvalidProfile(format!(
                "edge {a}-{b} is both essential and forbidden"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use NodeLabel::*;

    #[test]
    fn default_profile_is_valid_and_covers_every_label() {
        let profile = MazeProfile::default();
        profile.validate().unwrap();
        for label in NodeLabel::ALL {
            assert!(profile.priority(label).is_some(), "missing {label}");
        }
    }

    #[test]
    fn forbidden_lookup_is_symmetric() {
        let profile = MazeProfile::default();
        assert!(profile.is_forbidden(B, N1));
        assert!(profile.is_forbidden(N1, B));
        assert!(!profile.is_forbidden(Start, N1));
    }

    #[test]
    fn duplicate_priority_entry_is_rejected() {
        let mut profile = MazeProfile::default();
        profile.neighbor_priority.insert(C, vec![N1, N1]);
        assert!(matches!(
            profile.validate(),
            Err(PlanError::InvalidProfile(_))
        ));
    }

    #[test]
    fn essential_edge_cannot_be_forbidden() {
        let mut profile = MazeProfile::default();
        profile.essential_edges.push((N4, Start));
        assert!(profile.validate().is_err());
    }

    #[test]
    fn profile_round_trips_through_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maze.json");
        let profile = MazeProfile::default();
        crate::io::write_json_file(&path, &profile).unwrap();
        let loaded = MazeProfile::from_json_file(&path).unwrap();
        assert_eq!(loaded.neighbor_priority, profile.neighbor_priority);
        assert_eq!(loaded.forbidden_edges, profile.forbidden_edges);
        assert_eq!(loaded.trailing_labels, vec![C, B, A]);
    }
}
