//! Renderable geometry descriptors.
//!
//! The engine never draws. It emits plain descriptors — line segments and
//! point markers in root coordinates — for an external renderer to rasterize
//! however it likes (canvas, SVG, terminal). All descriptors serialize, so a
//! host can also ship a whole scene snapshot across a process boundary.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Stroke style hint. Frame axes are dashed; worldlines are solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// A line segment in root coordinates.
///
/// Conceptually infinite lines (axes, worldlines) are materialized as
/// segments of a caller-chosen half-length; see [`Line::through`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub points: [Point2<f64>; 2],
    pub color: String,
    pub style: LineStyle,
}

impl Line {
    /// The segment of half-length `extent` centered on `(x, y)` along
    /// direction `angle` (radians from the spatial axis).
    pub fn through(
        x: f64,
        y: f64,
        angle: f64,
        extent: f64,
        color: impl Into<String>,
        style: LineStyle,
    ) -> Self {
        let dx = extent * angle.cos();
        let dy = extent * angle.sin();
        Self {
            points: [Point2::new(x - dx, y - dy), Point2::new(x + dx, y + dy)],
            color: color.into(),
            style,
        }
    }
}

/// A point marker in root coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Point2<f64>,
    pub color: String,
}

impl Marker {
    pub fn new(x: f64, y: f64, color: impl Into<String>) -> Self {
        Self {
            position: Point2::new(x, y),
            color: color.into(),
        }
    }
}

/// A full renderable snapshot of a universe at its current time cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Caption carried from the load specification, if any.
    pub description: Option<String>,
    /// Two dashed axis lines per frame, root included.
    pub axes: Vec<Line>,
    /// One worldline per object.
    pub worldlines: Vec<Line>,
    /// One marker per point event.
    pub events: Vec<Marker>,
    /// One "now" marker per object: the simultaneity slice at the cursor.
    pub now_markers: Vec<Marker>,
}

/// Direction of a worldline (time axis) for a root-frame velocity `v`.
///
/// `π/2 − atan(v)`: vertical at rest, tilting toward the +45° light
/// diagonal as `v → 1`.
pub fn path_angle(v: f64) -> f64 {
    std::f64::consts::FRAC_PI_2 - v.atan()
}

/// Direction of a frame's space axis for a root-frame velocity `v`.
pub fn space_angle(v: f64) -> f64 {
    v.atan()
}

/// Background geometry: a unit-spaced coordinate grid plus the ±45°
/// light-cone diagonals through the origin. Colors are muted so scene
/// content reads over them.
pub fn background(extent: f64, spacing: f64) -> Vec<Line> {
    const GRID_COLOR: &str = "hsl(0, 0%, 50%, 25%)";
    const CONE_COLOR: &str = "hsl(60, 50%, 50%, 25%)";

    let mut lines = Vec::new();
    let n = (extent / spacing).floor() as i32;
    for i in -n..=n {
        let c = i as f64 * spacing;
        lines.push(Line {
            points: [Point2::new(-extent, c), Point2::new(extent, c)],
            color: GRID_COLOR.to_string(),
            style: LineStyle::Solid,
        });
        lines.push(Line {
            points: [Point2::new(c, -extent), Point2::new(c, extent)],
            color: GRID_COLOR.to_string(),
            style: LineStyle::Solid,
        });
    }
    lines.push(Line {
        points: [Point2::new(-extent, -extent), Point2::new(extent, extent)],
        color: CONE_COLOR.to_string(),
        style: LineStyle::Solid,
    });
    lines.push(Line {
        points: [Point2::new(-extent, extent), Point2::new(extent, -extent)],
        color: CONE_COLOR.to_string(),
        style: LineStyle::Solid,
    });
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_path_angle_at_rest_is_vertical() {
        assert_relative_eq!(path_angle(0.0), FRAC_PI_2);
        assert_relative_eq!(space_angle(0.0), 0.0);
    }

    #[test]
    fn test_axes_approach_light_cone() {
        // As v → 1 both axes close onto the +45° diagonal.
        let v = 0.999999;
        assert!((path_angle(v) - std::f64::consts::FRAC_PI_4).abs() < 1e-3);
        assert!((space_angle(v) - std::f64::consts::FRAC_PI_4).abs() < 1e-3);
    }

    #[test]
    fn test_line_through_endpoints() {
        let line = Line::through(1.0, 2.0, FRAC_PI_2, 3.0, "red", LineStyle::Solid);
        assert_relative_eq!(line.points[0].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(line.points[0].y, -1.0, epsilon = 1e-12);
        assert_relative_eq!(line.points[1].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(line.points[1].y, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_background_contains_light_cone() {
        let lines = background(4.0, 1.0);
        // 9 horizontal + 9 vertical grid lines, then the two diagonals.
        assert_eq!(lines.len(), 20);
        let diag = &lines[lines.len() - 2];
        assert_relative_eq!(diag.points[0].x, diag.points[0].y);
        assert_relative_eq!(diag.points[1].x, diag.points[1].y);
    }

    #[test]
    fn test_scene_serializes() {
        let scene = Scene {
            description: None,
            axes: vec![Line::through(0.0, 0.0, FRAC_PI_2, 1.0, "gray", LineStyle::Dashed)],
            worldlines: vec![],
            events: vec![Marker::new(0.0, 0.5, "red")],
            now_markers: vec![],
        };
        let json = serde_json::to_string(&scene).unwrap();
        assert!(json.contains("\"dashed\""));
        assert!(json.contains("\"events\""));
    }
}
