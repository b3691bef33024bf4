//! Immediate-mode drawing-surface abstraction.
//!
//! Course objects draw highlights through [`DrawSurface`], a thin seam over
//! whatever 2-D backend the host uses. Backends are chosen at construction
//! time (one trait, many implementations), never by conditional compilation.
//!
//! [`RecordingSurface`] is the concrete backend shipped here: it records
//! every primitive call as a [`DrawOp`]. Hosts can replay the list against a
//! real canvas; the test suites compare recorded draw and erase passes for
//! exact cancellation.

use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::geom::SymPath;

/// A solid fill, color packed as ARGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brush {
    pub color: u32,
}

impl Brush {
    pub fn new(color: u32) -> Self {
        Self { color }
    }
}

/// A stroke: width in surface units plus the brush it paints with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    pub width: f64,
    pub brush: Brush,
}

impl Pen {
    pub fn new(width: f64, brush: Brush) -> Self {
        Self { width, brush }
    }
}

/// Font selector. Concrete face resolution happens in the backend;
/// substitution policy is out of scope here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontDesc {
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

impl FontDesc {
    pub fn new(family: impl Into<String>, bold: bool, italic: bool) -> Self {
        Self {
            family: family.into(),
            bold,
            italic,
        }
    }
}

impl Default for FontDesc {
    fn default() -> Self {
        Self::new("Arial", false, false)
    }
}

/// Text measurement seam: width/height of a string at a given em height.
pub trait TextMetrics {
    fn measure(&self, font: &FontDesc, em_height: f64, text: &str) -> (f64, f64);
}

/// Deterministic, headless metrics: fixed average advance per character and
/// a fixed line height. Good enough for layout math; exact rendering metrics
/// belong to the backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdTextMetrics;

impl StdTextMetrics {
    /// Average glyph advance as a fraction of the em height.
    pub const ADVANCE_RATIO: f64 = 0.58;
    /// Line height as a fraction of the em height.
    pub const LINE_HEIGHT_RATIO: f64 = 1.2;
}

impl TextMetrics for StdTextMetrics {
    fn measure(&self, _font: &FontDesc, em_height: f64, text: &str) -> (f64, f64) {
        let chars = text.chars().count();
        if chars == 0 {
            return (0.0, em_height * Self::LINE_HEIGHT_RATIO);
        }
        (
            em_height * Self::ADVANCE_RATIO * chars as f64,
            em_height * Self::LINE_HEIGHT_RATIO,
        )
    }
}

/// Immediate-mode drawing surface with a transform/clip stack.
pub trait DrawSurface {
    fn push_transform(&mut self, transform: Affine);
    fn pop_transform(&mut self);
    fn push_clip(&mut self, rect: Rect);
    fn pop_clip(&mut self);

    fn draw_line(&mut self, from: Point, to: Point, pen: &Pen);
    fn draw_ellipse(&mut self, bounds: Rect, pen: &Pen);
    fn fill_ellipse(&mut self, bounds: Rect, brush: &Brush);
    /// Arc of the ellipse inscribed in `bounds`; angles in degrees,
    /// counter-clockwise from +x.
    fn draw_arc(&mut self, bounds: Rect, start_deg: f64, sweep_deg: f64, pen: &Pen);
    fn draw_rect(&mut self, rect: Rect, pen: &Pen);
    fn fill_rect(&mut self, rect: Rect, brush: &Brush);
    fn draw_polygon(&mut self, points: &[Point], pen: &Pen);
    fn fill_polygon(&mut self, points: &[Point], brush: &Brush);
    fn draw_path(&mut self, path: &SymPath, pen: &Pen);
    fn draw_text(&mut self, text: &str, at: Point, font: &FontDesc, em_height: f64, brush: &Brush);
}

/// One recorded primitive call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    PushTransform(Affine),
    PopTransform,
    PushClip(Rect),
    PopClip,
    Line(Point, Point, Pen),
    Ellipse(Rect, Pen),
    FillEllipse(Rect, Brush),
    Arc(Rect, f64, f64, Pen),
    RectStroke(Rect, Pen),
    RectFill(Rect, Brush),
    Polygon(Vec<Point>, Pen),
    FillPolygon(Vec<Point>, Brush),
    Path(SymPath, Pen),
    Text(String, Point, FontDesc, f64, Brush),
}

/// A [`DrawSurface`] that records primitive calls as a display list.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn push_transform(&mut self, transform: Affine) {
        self.ops.push(DrawOp::PushTransform(transform));
    }

    fn pop_transform(&mut self) {
        self.ops.push(DrawOp::PopTransform);
    }

    fn push_clip(&mut self, rect: Rect) {
        self.ops.push(DrawOp::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.ops.push(DrawOp::PopClip);
    }

    fn draw_line(&mut self, from: Point, to: Point, pen: &Pen) {
        self.ops.push(DrawOp::Line(from, to, *pen));
    }

    fn draw_ellipse(&mut self, bounds: Rect, pen: &Pen) {
        self.ops.push(DrawOp::Ellipse(bounds, *pen));
    }

    fn fill_ellipse(&mut self, bounds: Rect, brush: &Brush) {
        self.ops.push(DrawOp::FillEllipse(bounds, *brush));
    }

    fn draw_arc(&mut self, bounds: Rect, start_deg: f64, sweep_deg: f64, pen: &Pen) {
        self.ops.push(DrawOp::Arc(bounds, start_deg, sweep_deg, *pen));
    }

    fn draw_rect(&mut self, rect: Rect, pen: &Pen) {
        self.ops.push(DrawOp::RectStroke(rect, *pen));
    }

    fn fill_rect(&mut self, rect: Rect, brush: &Brush) {
        self.ops.push(DrawOp::RectFill(rect, *brush));
    }

    fn draw_polygon(&mut self, points: &[Point], pen: &Pen) {
        self.ops.push(DrawOp::Polygon(points.to_vec(), *pen));
    }

    fn fill_polygon(&mut self, points: &[Point], brush: &Brush) {
        self.ops.push(DrawOp::FillPolygon(points.to_vec(), *brush));
    }

    fn draw_path(&mut self, path: &SymPath, pen: &Pen) {
        self.ops.push(DrawOp::Path(path.clone(), *pen));
    }

    fn draw_text(&mut self, text: &str, at: Point, font: &FontDesc, em_height: f64, brush: &Brush) {
        self.ops.push(DrawOp::Text(
            text.to_string(),
            at,
            font.clone(),
            em_height,
            *brush,
        ));
    }
}
