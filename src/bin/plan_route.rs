//! Plans a route through the maze from one detection document.
//!
//! Usage:
//!   plan_route detections.json --start Start --goal C
//!   plan_route detections.json --goal B --render graph.png --report-json plan.json
//!
//! Verbose stage logging:
//!   RUST_LOG=debug plan_route detections.json

use clap::Parser;
use env_logger::Env;
use maze_planner::config::{load_config, PlannerConfig};
use maze_planner::diagnostics::print_text_summary;
use maze_planner::io::write_json_file;
use maze_planner::{MazeProfile, NodeLabel, PathPlanner, PlanError};
use std::path::{Path, PathBuf};

/// Maze route planner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Detection document (JSON). Bare file names are also looked up in images/
    input: PathBuf,

    /// Start junction
    #[arg(long, default_value = "Start")]
    start: NodeLabel,

    /// Goal junction
    #[arg(long, default_value = "C")]
    goal: NodeLabel,

    /// Planner configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maze profile (JSON); overrides the one named in the config
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Write the plan report as JSON
    #[arg(long)]
    report_json: Option<PathBuf>,

    /// Render the complete graph as PNG
    #[arg(long)]
    render: Option<PathBuf>,

    /// Print the JSON report instead of the text summary
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), PlanError> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => PlannerConfig::default(),
    };

    let mut params = config.resolve();
    if let Some(render) = &args.render {
        params.render_path = Some(render.clone());
    }
    let profile = match &args.profile {
        Some(path) => MazeProfile::from_json_file(path)?,
        None => config.load_profile()?,
    };

    let input = locate_input(&args.input);
    let planner = PathPlanner::new(params, profile);
    let report = planner.plan_file(&input, args.start, args.goal)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|source| PlanError::Format {
            path: input.clone(),
            source,
        })?;
        println!("{json}");
    } else {
        print_text_summary(&report);
    }

    if let Some(path) = args.report_json.clone().or_else(|| config.report_path()) {
        write_json_file(&path, &report)?;
        if !args.json {
            println!("JSON report written to {}", path.display());
        }
    }
    Ok(())
}

/// Falls back to `images/<name>` for bare file names missing from the
/// working directory.
fn locate_input(input: &Path) -> PathBuf {
    let bare = input.parent().map_or(true, |p| p.as_os_str().is_empty());
    if !input.exists() && bare {
        let candidate = Path::new("images").join(input);
        if candidate.exists() {
            log::debug!("using {}", candidate.display());
            return candidate;
        }
    }
    input.to_path_buf()
}
