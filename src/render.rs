//! Diagnostic PNG of a reconstructed graph.
//!
//! Node positions are rescaled into a fixed canvas. Edges touching a blocked
//! node are drawn dashed light gray, others solid black. Unblocked nodes are
//! filled blue; blocked nodes red with a dark-red ring and a white cross.

use crate::error::{PlanError, Result};
use crate::geometry::Coordinate;
use crate::graph::Graph;
use crate::io::ensure_parent_dir;
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut,
};
use std::path::Path;

pub const CANVAS_SIZE: u32 = 1000;
pub const MARGIN: f64 = 50.0;
const NODE_RADIUS: i32 = 12;
const DASH_ON: f32 = 10.0;
const DASH_OFF: f32 = 5.0;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const LIGHT_GRAY: Rgb<u8> = Rgb([211, 211, 211]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);
const DARK_RED: Rgb<u8> = Rgb([139, 0, 0]);

/// Draws `graph` into a new canvas.
pub fn draw_graph(graph: &Graph) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, WHITE);
    let positions = canvas_positions(graph);

    for edge in graph.edges() {
        let (a, b) = (positions[edge.a], positions[edge.b]);
        if graph.node(edge.a).blocked || graph.node(edge.b).blocked {
            draw_dashed_line(&mut canvas, a, b, LIGHT_GRAY);
        } else {
            draw_thick_line(&mut canvas, a, b, BLACK);
        }
    }

    for node in graph.nodes() {
        let (x, y) = positions[node.id];
        let center = (x.round() as i32, y.round() as i32);
        if node.blocked {
            draw_filled_circle_mut(&mut canvas, center, NODE_RADIUS, RED);
            for r in NODE_RADIUS - 1..=NODE_RADIUS + 1 {
                draw_hollow_circle_mut(&mut canvas, center, r, DARK_RED);
            }
            let s = NODE_RADIUS as f32 * 0.7;
            draw_thick_line(&mut canvas, (x - s, y - s), (x + s, y + s), WHITE);
            draw_thick_line(&mut canvas, (x - s, y + s), (x + s, y - s), WHITE);
        } else {
            draw_filled_circle_mut(&mut canvas, center, NODE_RADIUS, BLUE);
        }
    }
    canvas
}

/// Renders `graph` and writes it as PNG to `path`.
pub fn render_graph(graph: &Graph, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    draw_graph(graph).save(path).map_err(|source| PlanError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("graph image written to {}", path.display());
    Ok(())
}

/// Maps node positions onto the canvas, preserving relative layout.
fn canvas_positions(graph: &Graph) -> Vec<(f32, f32)> {
    let nodes = graph.nodes();
    let Some(first) = nodes.first() else {
        return Vec::new();
    };
    let (mut min, mut max) = (first.position, first.position);
    for n in nodes {
        min = Coordinate::new(min.x.min(n.position.x), min.y.min(n.position.y));
        max = Coordinate::new(max.x.max(n.position.x), max.y.max(n.position.y));
    }
    let inner = CANVAS_SIZE as f64 - 2.0 * MARGIN;
    let scale_x = inner / (max.x - min.x).max(1.0);
    let scale_y = inner / (max.y - min.y).max(1.0);
    nodes
        .iter()
        .map(|n| {
            (
                ((n.position.x - min.x) * scale_x + MARGIN) as f32,
                ((n.position.y - min.y) * scale_y + MARGIN) as f32,
            )
        })
        .collect()
}

/// Two-pixel wide line.
fn draw_thick_line(canvas: &mut RgbImage, a: (f32, f32), b: (f32, f32), color: Rgb<u8>) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len = (dx * dx + dy * dy).sqrt().max(f32::EPSILON);
    let (nx, ny) = (-dy / len * 0.5, dx / len * 0.5);
    draw_line_segment_mut(canvas, (a.0 + nx, a.1 + ny), (b.0 + nx, b.1 + ny), color);
    draw_line_segment_mut(canvas, (a.0 - nx, a.1 - ny), (b.0 - nx, b.1 - ny), color);
}

fn draw_dashed_line(canvas: &mut RgbImage, a: (f32, f32), b: (f32, f32), color: Rgb<u8>) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len <= f32::EPSILON {
        return;
    }
    let (ux, uy) = (dx / len, dy / len);
    let mut t = 0.0f32;
    while t < len {
        let end = (t + DASH_ON).min(len);
        draw_thick_line(
            canvas,
            (a.0 + ux * t, a.1 + uy * t),
            (a.0 + ux * end, a.1 + uy * end),
            color,
        );
        t += DASH_ON + DASH_OFF;
    }
}
