//! Planar geometry in image-pixel space.
//!
//! All thresholds used by the graph builder are expressed in the same pixel
//! units as the detections; no unit conversion happens here.

use nalgebra::{Matrix2, Point2, Vector2};

/// Image-space point `(x, y)` in pixels.
pub type Coordinate = Point2<f64>;

const PARALLEL_EPS: f64 = 1e-10;

/// Segments shorter than this are treated as points when measuring distance.
const DEGENERATE_LEN: f64 = 1.0;

#[inline]
pub fn distance(a: &Coordinate, b: &Coordinate) -> f64 {
    nalgebra::distance(a, b)
}

/// Line segment between two image points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub p0: Coordinate,
    pub p1: Coordinate,
}

impl Segment {
    pub fn new(p0: Coordinate, p1: Coordinate) -> Self {
        Self { p0, p1 }
    }

    pub fn length(&self) -> f64 {
        distance(&self.p0, &self.p1)
    }

    fn direction(&self) -> Vector2<f64> {
        self.p1 - self.p0
    }

    /// Smallest distance from `p` to the segment.
    ///
    /// The endpoint distances are always candidates; the perpendicular foot
    /// is considered only when it falls within the segment.
    pub fn distance_to(&self, p: &Coordinate) -> f64 {
        let to_p0 = distance(p, &self.p0);
        let to_p1 = distance(p, &self.p1);
        let endpoint = to_p0.min(to_p1);
        if self.length() < DEGENERATE_LEN {
            return endpoint;
        }
        let d = self.direction();
        let t = (p - self.p0).dot(&d) / d.norm_squared();
        if !(0.0..=1.0).contains(&t) {
            return endpoint;
        }
        let foot = self.p0 + d * t;
        endpoint.min(distance(p, &foot))
    }

    /// Intersection of the two supporting lines, accepted only when it lies
    /// inside both segments' bounding boxes grown by `tolerance`.
    ///
    /// Parallel and collinear segments never intersect.
    pub fn intersection(&self, other: &Segment, tolerance: f64) -> Option<Coordinate> {
        let d0 = self.direction();
        let d1 = other.direction();
        // p0 + s*d0 = q0 + t*d1  ->  [d0 -d1] [s t]^T = q0 - p0
        let m = Matrix2::new(d0.x, -d1.x, d0.y, -d1.y);
        if m.determinant().abs() < PARALLEL_EPS {
            return None;
        }
        let st = m.try_inverse()? * (other.p0 - self.p0);
        let ip = self.p0 + d0 * st.x;
        if self.bbox_contains(&ip, tolerance) && other.bbox_contains(&ip, tolerance) {
            Some(ip)
        } else {
            None
        }
    }

    fn bbox_contains(&self, p: &Coordinate, tolerance: f64) -> bool {
        within(p.x, self.p0.x, self.p1.x, tolerance)
            && within(p.y, self.p0.y, self.p1.y, tolerance)
    }
}

#[inline]
fn within(v: f64, a: f64, b: f64, tolerance: f64) -> bool {
    v >= a.min(b) - tolerance && v <= a.max(b) + tolerance
}
