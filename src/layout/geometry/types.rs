//! Core geometry types for the layout engine
//!
//! Points, rotations, sampled perimeters, placed components and trace
//! records. Everything here is plain data; the engines that build these
//! values live in `placement`, `traces` and `deletion`.

use serde::Serialize;

/// A 2D point in workspace coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Rotate this point about `center` by `theta` radians
    pub fn rotated_about(&self, center: Point, theta: f64) -> Point {
        let (sin, cos) = theta.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point {
            x: center.x + dx * cos - dy * sin,
            y: center.y + dx * sin + dy * cos,
        }
    }
}

/// Component orientation in whole degrees, always in [0, 360)
///
/// Stored as degrees so that four quarter turns land back on exactly 0
/// instead of accumulating floating error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Rotation(u16);

impl Rotation {
    pub const ZERO: Rotation = Rotation(0);
    pub const QUARTER: Rotation = Rotation(90);

    pub fn from_degrees(degrees: i64) -> Self {
        Rotation(degrees.rem_euclid(360) as u16)
    }

    pub fn degrees(&self) -> u16 {
        self.0
    }

    /// Angle in radians, in [0, 2π)
    pub fn radians(&self) -> f64 {
        f64::from(self.0).to_radians()
    }

    pub fn quarter_turn(&self) -> Rotation {
        Rotation::from_degrees(i64::from(self.0) + 90)
    }
}

/// Sampled boundary of a placed component, one point run per side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Perimeter {
    pub top: Vec<Point>,
    pub bottom: Vec<Point>,
    pub left: Vec<Point>,
    pub right: Vec<Point>,
}

impl Perimeter {
    /// Corner outline as persisted: top start, top end, bottom end, bottom start
    pub fn corners(&self) -> [Point; 4] {
        let first = |side: &[Point]| side.first().copied().unwrap_or(Point::new(0.0, 0.0));
        let last = |side: &[Point]| side.last().copied().unwrap_or(Point::new(0.0, 0.0));
        [
            first(&self.top),
            last(&self.top),
            last(&self.bottom),
            first(&self.bottom),
        ]
    }

    /// All sample points, side by side (top, bottom, right, left)
    pub fn samples(&self) -> impl Iterator<Item = &Point> {
        self.top
            .iter()
            .chain(self.bottom.iter())
            .chain(self.right.iter())
            .chain(self.left.iter())
    }

    /// Axis-aligned extent [min_x, min_y, max_x, max_y] over all samples
    pub fn bounds(&self) -> [f64; 4] {
        let mut bounds = [f64::MAX, f64::MAX, f64::MIN, f64::MIN];
        for p in self.samples() {
            bounds[0] = bounds[0].min(p.x);
            bounds[1] = bounds[1].min(p.y);
            bounds[2] = bounds[2].max(p.x);
            bounds[3] = bounds[3].max(p.y);
        }
        bounds
    }
}

/// A pin coordinate together with the component instance that owns it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinPoint {
    pub position: Point,
    pub component: String,
    pub tag: String,
}

/// A component instance on the workspace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedComponent {
    pub tag: String,
    pub component: String,
    pub center: Point,
    pub rotation: Rotation,
    pub perimeter: Perimeter,
    pub pins: Vec<Point>,
}

impl PlacedComponent {
    /// Pins paired with their owner, ready for the pin index
    pub fn pin_points(&self) -> Vec<PinPoint> {
        self.pins
            .iter()
            .map(|&position| PinPoint {
                position,
                component: self.component.clone(),
                tag: self.tag.clone(),
            })
            .collect()
    }
}

/// One drawn segment of an open trace session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceSegment {
    pub from: Point,
    pub to: Point,
    pub tunnel: bool,
    pub tag: String,
}

/// A saved trace session: the full vertex run under one line tag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceRecord {
    pub tunnel: bool,
    pub vertices: Vec<Point>,
    pub tag: String,
}

impl TraceRecord {
    /// Consecutive vertex pairs
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.vertices.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Workspace boundary as persisted: [origin, extent] per axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkspaceBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_normalizes() {
        assert_eq!(Rotation::from_degrees(360).degrees(), 0);
        assert_eq!(Rotation::from_degrees(-90).degrees(), 270);
        assert_eq!(Rotation::from_degrees(450).degrees(), 90);
        assert!(Rotation::from_degrees(359).radians() < std::f64::consts::TAU);
    }

    #[test]
    fn test_four_quarter_turns_return_to_zero() {
        let mut r = Rotation::ZERO;
        for _ in 0..4 {
            r = r.quarter_turn();
        }
        assert_eq!(r, Rotation::ZERO);
        assert_eq!(r.radians(), 0.0);
    }

    #[test]
    fn test_rotate_about_center() {
        let p = Point::new(110.0, 100.0).rotated_about(Point::new(100.0, 100.0), std::f64::consts::FRAC_PI_2);
        assert!((p.x - 100.0).abs() < 1e-9);
        assert!((p.y - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_trace_segments() {
        let record = TraceRecord {
            tunnel: false,
            vertices: vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
            tag: "line_1".to_string(),
        };
        assert_eq!(record.segments().count(), 2);
    }
}
