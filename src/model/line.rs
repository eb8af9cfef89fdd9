//! Straight line shape.

use lyon::math::point;
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use crate::geometry::{distance_point_to_segment, Color, Point, Rect};
use crate::model::draw_handle;
use crate::surface::{DrawSurface, StrokeStyle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub start: Point,
    pub end: Point,
}

impl LineShape {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

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

    fn build_path(&self) -> Path {
        let mut builder = Path::builder();
        builder.begin(point(self.start.x as f32, self.start.y as f32));
        builder.line_to(point(self.end.x as f32, self.end.y as f32));
        builder.end(false);
        builder.build()
    }

    pub fn draw(
        &self,
        color: Color,
        stroke_width: u32,
        selected: bool,
        surface: &mut dyn DrawSurface,
    ) {
        if self.start == self.end {
            // Zero-length line renders as a dot sized by the stroke.
            let radius = (stroke_width as f64 / 2.0).max(1.0);
            surface.fill_circle(self.start, radius, color);
        } else {
            surface.stroke_path(
                &self.build_path(),
                color,
                StrokeStyle::rounded(stroke_width as f64),
            );
        }
        if selected {
            draw_handle(surface, self.start);
            draw_handle(surface, self.end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_follow_endpoints() {
        let line = LineShape::new(Point::new(40.0, 10.0), Point::new(10.0, 50.0));
        assert_eq!(line.bounds(), Rect::new(10.0, 10.0, 30.0, 40.0));
    }

    #[test]
    fn test_translate_moves_both_endpoints() {
        let mut line = LineShape::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        line.translate(5.0, -2.0);
        assert_eq!(line.start, Point::new(5.0, -2.0));
        assert_eq!(line.end, Point::new(15.0, -2.0));
    }

    #[test]
    fn test_hit_test_band() {
        let line = LineShape::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(line.hit_test(Point::new(50.0, 6.0), 7.0));
        assert!(!line.hit_test(Point::new(50.0, 8.0), 7.0));
    }
}
