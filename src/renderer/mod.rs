//! Renderer: the deterministic rasterizer.
//!
//! Takes a `Frame` of primitives in scene space and produces a fixed-size
//! cell grid for the player, plus cell-level diffs between grids.
//!
//! The renderer is pure and stateless. Given the same input, it always
//! produces the same output. It knows nothing about time, animation,
//! or scenes.

use crate::types::{Cell, CellChange, Color, Frame, Point, Primitive, Style, TerminalContract};

/// Segments used to outline an unfilled circle.
const RING_SEGMENTS: usize = 64;
/// Glyph for a filled shape too small to cover any cell center.
const DOT: char = '•';

type Grid = Vec<Vec<Cell>>;

pub struct Renderer;

impl Renderer {
    /// Rasterize a frame onto a fixed-size cell grid.
    ///
    /// Primitives paint in order, so later ones cover earlier ones. Fills
    /// set the cell background; lines and text set the glyph and foreground
    /// while keeping whatever background is underneath.
    pub fn rasterize(frame: &Frame, contract: &TerminalContract) -> Grid {
        let mut canvas = Canvas::new(contract, frame.background);
        for primitive in &frame.primitives {
            canvas.draw(primitive);
        }
        canvas.grid
    }

    /// Compute a cell-level diff between two grids.
    pub fn diff(prev: &[Vec<Cell>], next: &[Vec<Cell>]) -> Vec<CellChange> {
        let mut changes = Vec::new();
        for (y, (prev_row, next_row)) in prev.iter().zip(next.iter()).enumerate() {
            for (x, (prev_cell, next_cell)) in prev_row.iter().zip(next_row.iter()).enumerate() {
                if prev_cell != next_cell {
                    changes.push(CellChange {
                        x: x as u16,
                        y: y as u16,
                        cell: next_cell.clone(),
                    });
                }
            }
        }
        changes
    }
}

struct Canvas {
    width: usize,
    height: usize,
    grid: Grid,
}

impl Canvas {
    fn new(contract: &TerminalContract, background: Color) -> Self {
        let width = contract.width as usize;
        let height = contract.height as usize;
        let blank = Cell {
            ch: ' ',
            style: Style {
                bg: Some(background),
                ..Default::default()
            },
        };
        Canvas {
            width,
            height,
            grid: vec![vec![blank; width]; height],
        }
    }

    /// Scene space to fractional cell coordinates (column, row).
    fn to_cell(&self, p: Point) -> (f32, f32) {
        (
            (p.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - p.y) * 0.5 * self.height as f32,
        )
    }

    /// Scene-space center of a cell.
    fn center(&self, col: usize, row: usize) -> Point {
        Point::new(
            (col as f32 + 0.5) / self.width as f32 * 2.0 - 1.0,
            1.0 - (row as f32 + 0.5) / self.height as f32 * 2.0,
        )
    }

    fn cell_at(&self, p: Point) -> Option<(usize, usize)> {
        let (col, row) = self.to_cell(p);
        if !col.is_finite() || !row.is_finite() || col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.width && row < self.height).then_some((col, row))
    }

    /// Cells whose centers may fall inside the scene-space box.
    fn cell_range(&self, min: Point, max: Point) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let (c0, r1) = self.to_cell(min);
        let (c1, r0) = self.to_cell(max);
        let clamp = |v: f32, limit: usize| {
            if v.is_finite() {
                v.clamp(0.0, limit as f32) as usize
            } else {
                0
            }
        };
        let cols = clamp(c0.floor(), self.width)..clamp(c1.ceil(), self.width);
        let rows = clamp(r0.floor(), self.height)..clamp(r1.ceil(), self.height);
        (cols, rows)
    }

    fn draw(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Quad { corners, color } => self.fill_polygon(corners, *color),
            Primitive::Polygon { points, color, filled } => {
                if *filled {
                    self.fill_polygon(points, *color);
                } else {
                    self.outline(points, *color, true);
                }
            }
            Primitive::Circle { center, radius, color, filled } => {
                if *filled {
                    self.fill_circle(*center, *radius, *color);
                } else {
                    let points: Vec<Point> = (0..RING_SEGMENTS)
                        .map(|i| {
                            let theta = std::f32::consts::TAU * i as f32 / RING_SEGMENTS as f32;
                            center.offset(radius * theta.cos(), radius * theta.sin())
                        })
                        .collect();
                    self.outline(&points, *color, true);
                }
            }
            Primitive::Line { from, to, color } => self.stroke(*from, *to, *color),
            Primitive::Polyline { points, color } => self.outline(points, *color, false),
            Primitive::Text { at, text, color } => self.write(*at, text, *color),
        }
    }

    fn fill(&mut self, col: usize, row: usize, color: Color) {
        self.grid[row][col] = Cell {
            ch: ' ',
            style: Style {
                bg: Some(color),
                ..Default::default()
            },
        };
    }

    /// Set glyph and foreground, keeping the background underneath.
    fn mark(&mut self, col: usize, row: usize, ch: char, color: Color) {
        let cell = &mut self.grid[row][col];
        cell.ch = ch;
        cell.style.fg = Some(color);
    }

    /// Filled shapes that cover no cell center still leave a dot.
    fn fill_or_dot(&mut self, hits: usize, anchor: Point, color: Color) {
        if hits == 0 {
            if let Some((col, row)) = self.cell_at(anchor) {
                self.mark(col, row, DOT, color);
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        let r = radius.abs();
        let (cols, rows) = self.cell_range(center.offset(-r, -r), center.offset(r, r));
        let mut hits = 0;
        for row in rows {
            for col in cols.clone() {
                let p = self.center(col, row);
                let (dx, dy) = (p.x - center.x, p.y - center.y);
                if dx * dx + dy * dy <= r * r {
                    self.fill(col, row, color);
                    hits += 1;
                }
            }
        }
        self.fill_or_dot(hits, center, color);
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            self.outline(points, color, false);
            return;
        }
        let min = points
            .iter()
            .fold(Point::new(f32::MAX, f32::MAX), |m, p| Point::new(m.x.min(p.x), m.y.min(p.y)));
        let max = points
            .iter()
            .fold(Point::new(f32::MIN, f32::MIN), |m, p| Point::new(m.x.max(p.x), m.y.max(p.y)));
        let (cols, rows) = self.cell_range(min, max);
        let mut hits = 0;
        for row in rows {
            for col in cols.clone() {
                if contains(points, self.center(col, row)) {
                    self.fill(col, row, color);
                    hits += 1;
                }
            }
        }
        if hits == 0 {
            self.outline(points, color, true);
        }
    }

    fn outline(&mut self, points: &[Point], color: Color, closed: bool) {
        for pair in points.windows(2) {
            self.stroke(pair[0], pair[1], color);
        }
        if closed && points.len() > 2 {
            self.stroke(points[points.len() - 1], points[0], color);
        }
        if points.len() == 1 {
            self.fill_or_dot(0, points[0], color);
        }
    }

    /// Bresenham line between the cells containing `from` and `to`.
    fn stroke(&mut self, from: Point, to: Point, color: Color) {
        let (c0, r0) = self.to_cell(from);
        let (c1, r1) = self.to_cell(to);
        if ![c0, r0, c1, r1].iter().all(|v| v.is_finite()) {
            return;
        }
        let (mut x, mut y) = (c0.floor() as i64, r0.floor() as i64);
        let (x1, y1) = (c1.floor() as i64, r1.floor() as i64);
        let ch = line_glyph(c1 - c0, r1 - r0);

        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
                self.mark(x as usize, y as usize, ch, color);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn write(&mut self, at: Point, text: &str, color: Color) {
        let (col, row) = self.to_cell(at);
        if !col.is_finite() || !row.is_finite() || row < 0.0 {
            return;
        }
        let row = row as usize;
        if row >= self.height {
            return;
        }
        let start = col.floor() as i64;
        for (i, ch) in text.chars().enumerate() {
            let x = start + i as i64;
            if x >= 0 && (x as usize) < self.width {
                self.mark(x as usize, row, ch, color);
            }
        }
    }
}

/// Even-odd point-in-polygon test.
fn contains(points: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let cross_x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Pick a box-drawing glyph from the slope in cell units (rows grow down).
fn line_glyph(dx: f32, dy: f32) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay * 2.0 <= ax {
        '─'
    } else if ax * 2.0 <= ay {
        '│'
    } else if (dx > 0.0) == (dy > 0.0) {
        '╲'
    } else {
        '╱'
    }
}
