//! Boxes, viewport and alignment edges in viewport pixel coordinates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned box as captured by the producer (rounded to whole pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Build from edges, collapsing an inverted axis to zero extent
    pub fn from_edges(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            x: clamp_px(left),
            y: clamp_px(top),
            width: clamp_px((right - left).max(0)),
            height: clamp_px((bottom - top).max(0)),
        }
    }

    // Edges are i64 so that x + width never overflows
    pub fn left(&self) -> i64 {
        i64::from(self.x)
    }

    pub fn top(&self) -> i64 {
        i64::from(self.y)
    }

    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    pub fn center_x(&self) -> f64 {
        f64::from(self.x) + f64::from(self.width) / 2.0
    }

    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Whether `other` lies entirely inside this box
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Coordinate used when comparing alignment along `edge`
    pub fn edge_coordinate(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Left => self.left() as f64,
            Edge::Right => self.right() as f64,
            Edge::Center => self.center_x(),
        }
    }
}

fn clamp_px(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] {}x{}", self.x, self.y, self.width, self.height)
    }
}

/// Rendering surface used to judge containment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1280, height: 720 }
    }
}

impl Viewport {
    pub fn center_x(&self) -> f64 {
        f64::from(self.width) / 2.0
    }

    pub fn width_px(&self) -> i64 {
        i64::from(self.width)
    }

    pub fn height_px(&self) -> i64 {
        i64::from(self.height)
    }
}

/// Edge compared by an alignment check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Left,
    Right,
    Center,
}

impl Edge {
    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
            Edge::Center => "center",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Edge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Edge::Left),
            "right" => Ok(Edge::Right),
            "center" | "centre" => Ok(Edge::Center),
            other => Err(format!("unknown alignment edge: {}", other)),
        }
    }
}
