//! Thresholds configuring graph reconstruction.
//!
//! All distances are in image pixels. The multipliers in
//! [`ConnectionParams`] were tuned on the competition camera setup and are
//! meant to be adjusted per deployment rather than read as derived ratios.

/// Detection-to-graph thresholds.
#[derive(Clone, Debug)]
pub struct GraphParams {
    /// Maximum distance from a line endpoint to an existing node for the
    /// endpoint to attach to it.
    pub max_node_connection_dist: f64,
    /// Bounding-box slack when intersecting two detected lines.
    pub line_intersection_tolerance: f64,
    /// Base pylon blocking distance. Nodes closer than twice this value to
    /// their nearest pylon are blocked.
    pub pylon_blocking_dist: f64,
    /// A pylon with no node closer than this becomes a blocked node itself.
    pub pylon_nearby_dist: f64,
    /// Hard cap on the number of nodes (the maze has eight junctions).
    pub max_nodes: usize,
    /// Geometric edge inference between node pairs.
    pub connections: ConnectionParams,
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            max_node_connection_dist: 80.0,
            line_intersection_tolerance: 5.0,
            pylon_blocking_dist: 10.0,
            pylon_nearby_dist: 25.0,
            max_nodes: crate::label::LABEL_COUNT,
            connections: ConnectionParams::default(),
        }
    }
}

impl GraphParams {
    /// Safety margin around a pylon inside which a node is blocked.
    pub fn blocking_radius(&self) -> f64 {
        self.pylon_blocking_dist * 2.0
    }

    /// Base tolerance shared by the connection heuristics.
    pub fn connection_tolerance(&self) -> f64 {
        self.max_node_connection_dist * self.connections.tolerance_factor
    }
}

/// Multipliers for the three connection heuristics.
///
/// - direct: each node within `tolerance` of opposite endpoints of one line.
/// - near: both nodes within `near_line_factor * tolerance` of a line whose
///   length exceeds `span_ratio` times their distance, or one node at an
///   endpoint and the other within `extension_factor * tolerance` of the line.
/// - intersection: two lines near either node meet close to both nodes.
#[derive(Clone, Debug)]
pub struct ConnectionParams {
    /// Base tolerance as a fraction of `max_node_connection_dist`.
    pub tolerance_factor: f64,
    pub near_line_factor: f64,
    pub span_ratio: f64,
    pub extension_factor: f64,
    /// Both nodes within `intersection_factor * tolerance` of the crossing.
    pub intersection_factor: f64,
    /// One node within `very_close_factor * tolerance` of the crossing lets
    /// the other be up to `2 * intersection_factor * tolerance` away.
    pub very_close_factor: f64,
    /// Node-to-crossing distances must sum below this times the direct
    /// node-to-node distance.
    pub detour_ratio: f64,
    /// Node pairs further apart than this are never joined via crossings.
    pub max_intersection_span: f64,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            tolerance_factor: 0.4,
            near_line_factor: 0.6,
            span_ratio: 0.7,
            extension_factor: 1.2,
            intersection_factor: 1.5,
            very_close_factor: 0.3,
            detour_ratio: 1.4,
            max_intersection_span: 200.0,
        }
    }
}
