//! Annotation model: the closed set of shape variants and their common
//! capability surface (bounds, hit-testing, move/resize, drawing).

use serde::{Deserialize, Serialize};

use crate::geometry::{Color, Point, Rect, Size};
use crate::surface::DrawSurface;

mod arrow;
mod line;
mod rectangle;
mod text;

pub use arrow::ArrowShape;
pub use line::LineShape;
pub use rectangle::RectangleShape;
pub use text::{Alignment, FontDesc, TextShape};

/// Smallest width/height an annotation can be resized to.
pub const MIN_ANNOTATION_SIZE: f64 = 5.0;

/// Extra pixels added to the stroke width when hit-testing lines and
/// arrows.
pub const LINE_HIT_TOLERANCE: f64 = 5.0;

/// Diameter of a selection handle; detection tolerance is half of this.
pub const HANDLE_SIZE: f64 = 8.0;

/// Default stroke width for new annotations.
pub const DEFAULT_STROKE_WIDTH: u32 = 2;

pub(crate) fn handle_color() -> Color {
    Color::BLUE
}

pub(crate) fn draw_handle(surface: &mut dyn DrawSurface, at: Point) {
    surface.fill_circle(at, HANDLE_SIZE / 2.0, handle_color());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Arrow,
    Rectangle,
    Line,
    Text,
}

/// Closed sum type over the annotation shape variants. Every dispatch on
/// this enum is exhaustive so adding a variant is a compile-time-checked
/// exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Arrow(ArrowShape),
    Rectangle(RectangleShape),
    Line(LineShape),
    Text(TextShape),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Arrow(_) => ShapeKind::Arrow,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    /// Current bounding box. Derived from the endpoints for arrows and
    /// lines, stored for rectangles and text.
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Arrow(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds,
            Shape::Text(s) => s.bounds,
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Arrow(s) => s.translate(dx, dy),
            Shape::Line(s) => s.translate(dx, dy),
            Shape::Rectangle(s) => s.bounds.translate(dx, dy),
            Shape::Text(s) => s.bounds.translate(dx, dy),
        }
    }
}

/// One vector overlay object drawn atop the captured image.
///
/// `z_order` mirrors the annotation's index in the owning collection; it
/// is reassigned after every structural change and never authoritative on
/// its own. `selected` is kept mutually exclusive by the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: u64,
    pub color: Color,
    pub stroke_width: u32,
    pub z_order: usize,
    pub selected: bool,
    pub shape: Shape,
}

impl Annotation {
    pub fn new(shape: Shape) -> Self {
        Self {
            id: 0,
            color: Color::RED,
            stroke_width: DEFAULT_STROKE_WIDTH,
            z_order: 0,
            selected: false,
            shape,
        }
    }

    pub fn arrow(start: Point, end: Point) -> Self {
        Self::new(Shape::Arrow(ArrowShape::new(start, end)))
    }

    pub fn rectangle(bounds: Rect) -> Self {
        Self::new(Shape::Rectangle(RectangleShape::new(bounds)))
    }

    pub fn line(start: Point, end: Point) -> Self {
        Self::new(Shape::Line(LineShape::new(start, end)))
    }

    pub fn text(location: Point, text: impl Into<String>) -> Self {
        let mut annotation = Self::new(Shape::Text(TextShape::new(location, text)));
        annotation.color = Color::BLACK;
        annotation
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn bounds(&self) -> Rect {
        self.shape.bounds()
    }

    /// Point hit-test: bounds containment for rectangles and text, a
    /// stroke-width plus tolerance band around the segment for arrows and
    /// lines.
    pub fn hit_test(&self, p: Point) -> bool {
        let tolerance = self.stroke_width as f64 + LINE_HIT_TOLERANCE;
        match &self.shape {
            Shape::Arrow(s) => s.hit_test(p, tolerance),
            Shape::Line(s) => s.hit_test(p, tolerance),
            Shape::Rectangle(s) => s.bounds.contains(p),
            Shape::Text(s) => s.bounds.contains(p),
        }
    }

    /// Translates the annotation. Arrow and line bounds are re-derived
    /// from the moved endpoints.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.shape.translate(dx, dy);
    }

    /// Replaces the bounds size, clamped to the minimum. Arrows and lines
    /// have no size-only resize; they are resized through the handle
    /// protocol, so this is a no-op for them.
    pub fn resize(&mut self, size: Size) {
        let width = size.width.max(MIN_ANNOTATION_SIZE);
        let height = size.height.max(MIN_ANNOTATION_SIZE);
        match &mut self.shape {
            Shape::Rectangle(s) => {
                s.bounds.width = width;
                s.bounds.height = height;
            }
            Shape::Text(s) => {
                s.bounds.width = width;
                s.bounds.height = height;
            }
            Shape::Arrow(_) | Shape::Line(_) => {}
        }
    }

    /// Renders the annotation, including selection decorations when
    /// selected.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        match &self.shape {
            Shape::Arrow(s) => s.draw(self.color, self.stroke_width, self.selected, surface),
            Shape::Line(s) => s.draw(self.color, self.stroke_width, self.selected, surface),
            Shape::Rectangle(s) => s.draw(self.color, self.stroke_width, self.selected, surface),
            Shape::Text(s) => s.draw(self.color, self.selected, surface),
        }
    }
}
