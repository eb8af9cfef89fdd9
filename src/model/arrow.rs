//! Arrow shape: a straight shaft ending in a filled triangular head.

use lyon::math::point;
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use crate::geometry::{distance_point_to_segment, Color, Point, Rect};
use crate::model::draw_handle;
use crate::surface::{DrawSurface, StrokeStyle};

/// Minimum arrowhead length in pixels.
const MIN_HEAD_LENGTH: f64 = 10.0;

/// Head width as a fraction of head length.
const HEAD_WIDTH_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowShape {
    pub start: Point,
    pub end: Point,
}

impl ArrowShape {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Bounds are always the bbox of the two endpoints.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.start = self.start.translated(dx, dy);
        self.end = self.end.translated(dx, dy);
    }

    pub fn hit_test(&self, p: Point, tolerance: f64) -> bool {
        distance_point_to_segment(p, self.start, self.end) <= tolerance
    }

    /// Arrowhead geometry scaled by stroke width: length is
    /// `max(3 * stroke, 10)`, width 0.6 of that. Returns the shaft base
    /// point and the two wing points, or `None` when the arrow is
    /// degenerate (zero length).
    pub fn head_points(&self, stroke_width: u32) -> Option<(Point, Point, Point)> {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            return None;
        }
        let ux = dx / len;
        let uy = dy / len;
        let head_len = (stroke_width as f64 * 3.0).max(MIN_HEAD_LENGTH);
        let head_width = head_len * HEAD_WIDTH_RATIO;
        // Perpendicular unit vector.
        let px = -uy;
        let py = ux;
        let base = Point::new(self.end.x - ux * head_len, self.end.y - uy * head_len);
        let half = head_width / 2.0;
        let left = Point::new(base.x + px * half, base.y + py * half);
        let right = Point::new(base.x - px * half, base.y - py * half);
        Some((base, left, right))
    }

    fn build_path(&self, base: Point, left: Point, right: Point) -> Path {
        let mut builder = Path::builder();
        builder.begin(point(self.start.x as f32, self.start.y as f32));
        builder.line_to(point(base.x as f32, base.y as f32));
        builder.line_to(point(left.x as f32, left.y as f32));
        builder.line_to(point(self.end.x as f32, self.end.y as f32));
        builder.line_to(point(right.x as f32, right.y as f32));
        builder.line_to(point(base.x as f32, base.y as f32));
        builder.end(true);
        builder.build()
    }

    pub fn draw(
        &self,
        color: Color,
        stroke_width: u32,
        selected: bool,
        surface: &mut dyn DrawSurface,
    ) {
        match self.head_points(stroke_width) {
            Some((base, left, right)) => {
                let path = self.build_path(base, left, right);
                surface.fill_path(&path, color);
                surface.stroke_path(&path, color, StrokeStyle::rounded(stroke_width as f64));
            }
            // Degenerate arrow renders as a dot sized by the stroke.
            None => {
                let radius = (stroke_width as f64 / 2.0).max(1.0);
                surface.fill_circle(self.start, radius, color);
            }
        }
        if selected {
            draw_handle(surface, self.start);
            draw_handle(surface, self.end);
        }
    }
}
