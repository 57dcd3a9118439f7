use maze_planner::detection::{DetectionDocument, LineObject, NodeObject, PylonObject};
use maze_planner::NodeLabel::{self, *};
use std::fs;
use std::path::{Path, PathBuf};

/// Junction centers of the maze as seen in a 1000x1000 frame.
pub const JUNCTIONS: [(NodeLabel, f64, f64); 8] = [
    (Start, 500.0, 900.0),
    (N1, 100.0, 900.0),
    (N2, 900.0, 900.0),
    (N3, 500.0, 628.0),
    (N4, 500.0, 420.0),
    (C, 100.0, 100.0),
    (B, 500.0, 100.0),
    (A, 900.0, 100.0),
];

/// Physical lines of the maze.
pub const CORRIDORS: [(NodeLabel, NodeLabel); 15] = [
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
];

pub fn junction(label: NodeLabel) -> (f64, f64) {
    JUNCTIONS
        .iter()
        .find(|(l, _, _)| *l == label)
        .map(|&(_, x, y)| (x, y))
        .expect("every label has a junction")
}

/// Detection document of the full maze with every junction and corridor.
pub fn canonical_maze() -> DetectionDocument {
    maze_without(&[])
}

/// Canonical maze minus the listed corridors.
pub fn maze_without(missing: &[(NodeLabel, NodeLabel)]) -> DetectionDocument {
    let nodes = JUNCTIONS
        .iter()
        .enumerate()
        .map(|(i, &(_, x, y))| NodeObject {
            x,
            y,
            detection_id: format!("node-{i}"),
        })
        .collect();
    let lines = CORRIDORS
        .iter()
        .filter(|&&(a, b)| {
            !missing
                .iter()
                .any(|&(x, y)| (x, y) == (a, b) || (y, x) == (a, b))
        })
        .enumerate()
        .map(|(i, &(a, b))| {
            let (x0, y0) = junction(a);
            let (x1, y1) = junction(b);
            LineObject {
                x_start: x0,
                y_start: y0,
                x_end: x1,
                y_end: y1,
                detection_id: format!("line-{i}"),
            }
        })
        .collect();
    DetectionDocument {
        image_width: 1000,
        image_height: 1000,
        nodes,
        pylons: Vec::new(),
        lines,
    }
}

pub fn with_pylon(mut doc: DetectionDocument, x: f64, y: f64) -> DetectionDocument {
    let id = doc.pylons.len();
    doc.pylons.push(PylonObject {
        x,
        y,
        detection_id: format!("pylon-{id}"),
    });
    doc
}

/// Serializes `doc` to `dir/name` and returns the path.
pub fn write_document(dir: &Path, name: &str, doc: &DetectionDocument) -> PathBuf {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(doc).expect("serialize document");
    fs::write(&path, json).expect("write document");
    path
}
