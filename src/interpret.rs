//! Decoding a label path into junction exit indices.
//!
//! At every junction the robot scans the physical lines clockwise, starting
//! just after the line it arrived on. The exit index is the 1-based position
//! of the next junction in that scan, counting only lines that actually exist
//! in the complete graph.

use crate::error::{PlanError, Result};
use crate::label::NodeLabel;
use crate::profile::MazeProfile;
use log::debug;

pub struct PathInterpreter<'a> {
    profile: &'a MazeProfile,
}

impl<'a> PathInterpreter<'a> {
    pub fn new(profile: &'a MazeProfile) -> Self {
        Self { profile }
    }

    /// One exit index per transition of `path`, looked up against `edges`
    /// (undirected label pairs of the complete graph).
    pub fn interpret(
        &self,
        edges: &[(NodeLabel, NodeLabel)],
        path: &[NodeLabel],
    ) -> Result<Vec<u32>> {
        let mut exits = Vec::with_capacity(path.len().saturating_sub(1));
        for (i, pair) in path.windows(2).enumerate() {
            let previous = i.checked_sub(1).map(|p| path[p]);
            exits.push(self.exit_index(edges, previous, pair[0], pair[1])?);
        }
        Ok(exits)
    }

    /// Exit index for leaving `current` towards `next` after arriving from
    /// `previous` (`None` at the start of the route).
    pub fn exit_index(
        &self,
        edges: &[(NodeLabel, NodeLabel)],
        previous: Option<NodeLabel>,
        current: NodeLabel,
        next: NodeLabel,
    ) -> Result<u32> {
        let available = self.ordered_neighbors(edges, previous, current)?;
        match available.iter().position(|&l| l == next) {
            Some(pos) => {
                let exit = pos as u32 + 1;
                debug!("at {current} (from {previous:?}) take exit {exit} towards {next}");
                Ok(exit)
            }
            None => Err(PlanError::InvalidTransition {
                current,
                next,
                available,
            }),
        }
    }

    /// Real neighbors of `current` in clockwise order, starting just after
    /// `previous`.
    fn ordered_neighbors(
        &self,
        edges: &[(NodeLabel, NodeLabel)],
        previous: Option<NodeLabel>,
        current: NodeLabel,
    ) -> Result<Vec<NodeLabel>> {
        let priority = self
            .profile
            .priority(current)
            .ok_or(PlanError::MissingProfile(current))?;
        let neighbors = neighbor_set(edges, current);

        let start = previous
            .and_then(|p| priority.iter().position(|&l| l == p))
            .map_or(0, |i| i + 1);
        Ok(priority[start..]
            .iter()
            .chain(&priority[..start])
            .copied()
            .filter(|l| neighbors.contains(l))
            .collect())
    }
}

fn neighbor_set(edges: &[(NodeLabel, NodeLabel)], label: NodeLabel) -> Vec<NodeLabel> {
    let mut out = Vec::new();
    for &(a, b) in edges {
        let other = if a == label {
            b
        } else if b == label {
            a
        } else {
            continue;
        };
        if !out.contains(&other) {
            out.push(other);
        }
    }
    out
}

/// Convenience wrapper around [`PathInterpreter::interpret`].
pub fn interpret(
    profile: &MazeProfile,
    edges: &[(NodeLabel, NodeLabel)],
    path: &[NodeLabel],
) -> Result<Vec<u32>> {
    PathInterpreter::new(profile).interpret(edges, path)
}
