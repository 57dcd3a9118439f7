//! Closed vocabulary of maze junction labels.
//!
//! The maze has exactly eight junctions. Labels serialize to the same strings
//! the detection tooling and motor-side logs use (`"Start"`, `"N1"`, ...).

use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of distinct labels, and therefore the node cap of a graph.
pub const LABEL_COUNT: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeLabel {
    Start,
    N1,
    N2,
    N3,
    N4,
    A,
    B,
    C,
}

impl NodeLabel {
    pub const ALL: [NodeLabel; LABEL_COUNT] = [
        NodeLabel::Start,
        NodeLabel::N1,
        NodeLabel::N2,
        NodeLabel::N3,
        NodeLabel::N4,
        NodeLabel::A,
        NodeLabel::B,
        NodeLabel::C,
    ];

    /// Dense index in `[0, LABEL_COUNT)`, used for fixed-size per-label tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeLabel::Start => "Start",
            NodeLabel::N1 => "N1",
            NodeLabel::N2 => "N2",
            NodeLabel::N3 => "N3",
            NodeLabel::N4 => "N4",
            NodeLabel::A => "A",
            NodeLabel::B => "B",
            NodeLabel::C => "C",
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeLabel {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeLabel::ALL
            .iter()
            .copied()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| PlanError::UnknownLabel(s.to_string()))
    }
}
