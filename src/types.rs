//! Shared boundary types for the storyboard driver.
//!
//! This module defines the two key data contracts:
//! - Scene → Renderer (in-memory, serializable for recordings): `Frame`
//!   containing `Primitive`s in normalized scene space
//! - Renderer → Player (in-memory): cell grids and `CellChange`s

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared style primitives
// ---------------------------------------------------------------------------

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    /// Build a color from unit-range channels, the way the scenes specify
    /// their palettes. Channels are clamped to [0, 1].
    pub fn unit(r: f32, g: f32, b: f32) -> Color {
        Color {
            r: unit_channel(r),
            g: unit_channel(g),
            b: unit_channel(b),
        }
    }

    pub fn gray(level: f32) -> Color {
        Color::unit(level, level, level)
    }

    /// Linear blend from `self` (t = 0) to `other` (t = 1).
    pub fn mix(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
        }
    }
}

fn unit_channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<Color>,
}

// ---------------------------------------------------------------------------
// Scene → Renderer boundary
// ---------------------------------------------------------------------------

/// A position in scene space: x and y in [-1, 1], y pointing up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Rotate counter-clockwise around `pivot` by `degrees`.
    pub fn rotated(self, pivot: Point, degrees: f32) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
    }

    pub fn offset(self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Quad {
        corners: [Point; 4],
        color: Color,
    },
    Polygon {
        points: Vec<Point>,
        color: Color,
        filled: bool,
    },
    Circle {
        center: Point,
        radius: f32,
        color: Color,
        filled: bool,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
    },
    Polyline {
        points: Vec<Point>,
        color: Color,
    },
    Text {
        at: Point,
        text: String,
        color: Color,
    },
}

/// One rendered frame: a clear color plus primitives in paint order.
/// Later primitives paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub background: Color,
    pub primitives: Vec<Primitive>,
}

impl Frame {
    pub fn new(background: Color) -> Self {
        Frame {
            background,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Axis-aligned filled rectangle between two opposite corners.
    pub fn rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
        self.quad(
            [
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ],
            color,
        );
    }

    pub fn quad(&mut self, corners: [Point; 4], color: Color) {
        self.push(Primitive::Quad { corners, color });
    }

    pub fn triangle(&mut self, points: [Point; 3], color: Color) {
        self.push(Primitive::Polygon {
            points: points.to_vec(),
            color,
            filled: true,
        });
    }

    pub fn circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.push(Primitive::Circle {
            center: Point::new(cx, cy),
            radius,
            color,
            filled: true,
        });
    }

    pub fn ring(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.push(Primitive::Circle {
            center: Point::new(cx, cy),
            radius,
            color,
            filled: false,
        });
    }

    pub fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
        self.push(Primitive::Line {
            from: Point::new(x0, y0),
            to: Point::new(x1, y1),
            color,
        });
    }

    pub fn polyline(&mut self, points: Vec<Point>, color: Color) {
        self.push(Primitive::Polyline { points, color });
    }

    pub fn text(&mut self, x: f32, y: f32, text: impl Into<String>, color: Color) {
        self.push(Primitive::Text {
            at: Point::new(x, y),
            text: text.into(),
            color,
        });
    }

    /// All text strings in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Renderer → Player boundary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalContract {
    pub width: u16,
    pub height: u16,
}

impl TerminalContract {
    /// Width over height of the canvas in physical units. Terminal cells are
    /// roughly twice as tall as they are wide.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / (self.height as f32 * 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub ch: char,
    #[serde(default)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}
