use crate::error::Result;
use crate::graph::{ConnectionParams, GraphParams};
use crate::io::read_json_file;
use crate::planner::PlannerParams;
use crate::profile::MazeProfile;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PlannerConfig {
    pub graph: GraphConfig,
    pub connections: ConnectionConfig,
    /// Maze profile JSON; relative paths are taken from the config's folder.
    pub profile: Option<PathBuf>,
    /// PNG of the complete graph.
    pub render: Option<PathBuf>,
    /// JSON plan report.
    pub report_json: Option<PathBuf>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl PlannerConfig {
    pub fn resolve(&self) -> PlannerParams {
        let mut graph = self.graph.resolve();
        graph.connections = self.connections.resolve();
        PlannerParams {
            graph,
            render_path: self.render.as_deref().map(|p| resolve_path(&self.base_dir, p)),
        }
    }

    pub fn profile_path(&self) -> Option<PathBuf> {
        self.profile
            .as_deref()
            .map(|p| resolve_path(&self.base_dir, p))
    }

    pub fn report_path(&self) -> Option<PathBuf> {
        self.report_json
            .as_deref()
            .map(|p| resolve_path(&self.base_dir, p))
    }

    /// The configured maze profile, or the built-in one.
    pub fn load_profile(&self) -> Result<MazeProfile> {
        match self.profile_path() {
            Some(path) => MazeProfile::from_json_file(&path),
            None => Ok(MazeProfile::default()),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct GraphConfig {
    pub max_node_connection_dist: Option<f64>,
    pub line_intersection_tolerance: Option<f64>,
    pub pylon_blocking_dist: Option<f64>,
    pub pylon_nearby_dist: Option<f64>,
}

impl GraphConfig {
    pub fn resolve(&self) -> GraphParams {
        let mut params = GraphParams::default();
        if let Some(v) = self.max_node_connection_dist {
            params.max_node_connection_dist = v;
        }
        if let Some(v) = self.line_intersection_tolerance {
            params.line_intersection_tolerance = v;
        }
        if let Some(v) = self.pylon_blocking_dist {
            params.pylon_blocking_dist = v;
        }
        if let Some(v) = self.pylon_nearby_dist {
            params.pylon_nearby_dist = v;
        }
        params
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConnectionConfig {
    pub tolerance_factor: Option<f64>,
    pub near_line_factor: Option<f64>,
    pub span_ratio: Option<f64>,
    pub extension_factor: Option<f64>,
    pub intersection_factor: Option<f64>,
    pub very_close_factor: Option<f64>,
    pub detour_ratio: Option<f64>,
    pub max_intersection_span: Option<f64>,
}

impl ConnectionConfig {
    pub fn resolve(&self) -> ConnectionParams {
        let mut params = ConnectionParams::default();
        if let Some(v) = self.tolerance_factor {
            params.tolerance_factor = v;
        }
        if let Some(v) = self.near_line_factor {
            params.near_line_factor = v;
        }
        if let Some(v) = self.span_ratio {
            params.span_ratio = v;
        }
        if let Some(v) = self.extension_factor {
            params.extension_factor = v;
        }
        if let Some(v) = self.intersection_factor {
            params.intersection_factor = v;
        }
        if let Some(v) = self.very_close_factor {
            params.very_close_factor = v;
        }
        if let Some(v) = self.detour_ratio {
            params.detour_ratio = v;
        }
        if let Some(v) = self.max_intersection_span {
            params.max_intersection_span = v;
        }
        params
    }
}

pub fn load_config(path: &Path) -> Result<PlannerConfig> {
    let mut config: PlannerConfig = read_json_file(path)?;
    config.base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(config)
}

fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
