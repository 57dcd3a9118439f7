//! Typed view of the detection document produced by the object detector.
//!
//! The document is deserialized once per planning request and treated as
//! immutable afterwards. Field names follow the detector's JSON output
//! (`Nodes`, `Pylons`, `Lines`, `xStart`, ...).

use crate::error::Result;
use crate::geometry::{Coordinate, Segment};
use crate::io::read_json_file;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Detected junction marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeObject {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub detection_id: String,
}

impl NodeObject {
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

/// Detected pylon (obstacle) marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PylonObject {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub detection_id: String,
}

impl PylonObject {
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

/// Detected line segment between two points in image pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineObject {
    #[serde(rename = "xStart")]
    pub x_start: f64,
    #[serde(rename = "yStart")]
    pub y_start: f64,
    #[serde(rename = "xEnd")]
    pub x_end: f64,
    #[serde(rename = "yEnd")]
    pub y_end: f64,
    #[serde(default)]
    pub detection_id: String,
}

impl LineObject {
    pub fn start(&self) -> Coordinate {
        Coordinate::new(self.x_start, self.y_start)
    }

    pub fn end(&self) -> Coordinate {
        Coordinate::new(self.x_end, self.y_end)
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.start(), self.end())
    }
}

/// One detection snapshot of the maze.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionDocument {
    #[serde(default)]
    pub image_width: u32,
    #[serde(default)]
    pub image_height: u32,
    #[serde(rename = "Nodes")]
    pub nodes: Vec<NodeObject>,
    #[serde(rename = "Pylons")]
    pub pylons: Vec<PylonObject>,
    #[serde(rename = "Lines")]
    pub lines: Vec<LineObject>,
}

impl DetectionDocument {
    /// Reads and deserializes a detection document.
    ///
    /// Fails with [`PlanError::NotFound`] when `path` does not exist and with
    /// [`PlanError::Format`] when the content does not match the schema.
    pub fn load(path: &Path) -> Result<Self> {
        let document: DetectionDocument = read_json_file(path)?;
        log::debug!(
            "loaded {}: {} nodes, {} pylons, {} lines ({}x{})",
            path.display(),
            document.nodes.len(),
            document.pylons.len(),
            document.lines.len(),
            document.image_width,
            document.image_height
        );
        Ok(document)
    }

    /// Parses a document from an in-memory JSON string.
    pub fn from_json_str(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn line_segments(&self) -> Vec<Segment> {
        self.lines.iter().map(LineObject::segment).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "image_width": 640,
        "image_height": 480,
        "Nodes": [{"class_name": "Node", "x": 10.5, "y": 20.0, "detection_id": "n-1"}],
        "Pylons": [{"x": 30.0, "y": 40.0, "detection_id": "p-1"}],
        "Lines": [{"xStart": 1.0, "yStart": 2.0, "xEnd": 3.0, "yEnd": 4.0, "detection_id": "l-1"}]
    }"#;

    #[test]
    fn parses_detector_field_names() {
        let doc = DetectionDocument::from_json_str(SAMPLE).unwrap();
        assert_eq!(doc.image_width, 640);
        assert_eq!(doc.image_height, 480);
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.nodes[0].detection_id, "n-1");
        assert_eq!(doc.pylons[0].center(), Coordinate::new(30.0, 40.0));
        let line = &doc.lines[0];
        assert_eq!(line.start(), Coordinate::new(1.0, 2.0));
        assert_eq!(line.end(), Coordinate::new(3.0, 4.0));
    }

    #[test]
    fn missing_line_list_is_a_format_error() {
        let json = r#"{"image_width": 1, "image_height": 1, "Nodes": [], "Pylons": []}"#;
        assert!(DetectionDocument::from_json_str(json).is_err());
    }

    #[test]
    fn wrong_coordinate_type_is_a_format_error() {
        let json = r#"{"Nodes": [{"x": "left", "y": 1.0}], "Pylons": [], "Lines": []}"#;
        assert!(DetectionDocument::from_json_str(json).is_err());
    }

    #[test]
    fn missing_detection_id_defaults_to_empty() {
        let json = r#"{"Nodes": [{"x": 1.0, "y": 1.0}], "Pylons": [], "Lines": []}"#;
        let doc = DetectionDocument::from_json_str(json).unwrap();
        assert!(doc.nodes[0].detection_id.is_empty());
        assert_eq!(doc.image_width, 0);
    }
}
