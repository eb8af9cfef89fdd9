//! Plain 2D geometry used across the annotation engine.
//!
//! Everything here is pure data and pure functions: points, sizes,
//! axis-aligned rectangles, colors, point-to-segment distance and the
//! rounded rectangle path used for rounded annotations and text
//! backgrounds.

use lyon::math::point;
use lyon::path::builder::BorderRadii;
use lyon::path::{Path, Winding};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle. Width and height are kept non-negative by all
/// constructors; `from_points` normalizes swapped corners.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding box of two arbitrary points.
    pub fn from_points(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }
}

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// True for pure black regardless of alpha. Drives the text
    /// background contrast rule.
    pub fn is_pure_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::RED
    }
}

/// Distance from `p` to the segment `ab`. The projection parameter is
/// clamped to the segment, and a zero-length segment degenerates to the
/// distance to `a`.
pub fn distance_point_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let len_sq = (b.x - a.x).powi(2) + (b.y - a.y).powi(2);
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = ((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
    p.distance_to(proj)
}

/// Closed rounded-rectangle path: four 90-degree corner arcs joined
/// top-left, top-right, bottom-right, bottom-left. The radius is clamped
/// so opposing corners never overlap.
pub fn rounded_rectangle_path(rect: &Rect, radius: f64) -> Path {
    let radius = radius.max(0.0).min(rect.width / 2.0).min(rect.height / 2.0);
    let mut builder = Path::builder();
    builder.add_rounded_rectangle(
        &lyon::math::Box2D::new(
            point(rect.left() as f32, rect.top() as f32),
            point(rect.right() as f32, rect.bottom() as f32),
        ),
        &BorderRadii::new(radius as f32),
        Winding::Positive,
    );
    builder.build()
}

/// Plain rectangle outline path.
pub fn rectangle_path(rect: &Rect) -> Path {
    let mut builder = Path::builder();
    builder.add_rectangle(
        &lyon::math::Box2D::new(
            point(rect.left() as f32, rect.top() as f32),
            point(rect.right() as f32, rect.bottom() as f32),
        ),
        Winding::Positive,
    );
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distance_on_segment_interior() {
        let d = distance_point_to_segment(
            Point::new(50.0, 7.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert!((d - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_clamps_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let d = distance_point_to_segment(Point::new(-3.0, 4.0), a, b);
        assert!((d - 5.0).abs() < 1e-9);
        let d = distance_point_to_segment(Point::new(13.0, 4.0), a, b);
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_degenerate_segment() {
        let a = Point::new(5.0, 5.0);
        let d = distance_point_to_segment(Point::new(8.0, 9.0), a, a);
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_rect_from_points_normalizes() {
        let r = Rect::from_points(Point::new(10.0, 20.0), Point::new(2.0, 4.0));
        assert_eq!(r, Rect::new(2.0, 4.0, 8.0, 16.0));
    }

    #[test]
    fn test_rounded_rectangle_path_is_closed() {
        let path = rounded_rectangle_path(&Rect::new(0.0, 0.0, 40.0, 20.0), 4.0);
        let closed = path.iter().any(|e| {
            matches!(
                e,
                lyon::path::Event::End { close: true, .. }
            )
        });
        assert!(closed);
    }

    proptest! {
        /// The clamped projection can never beat the best endpoint by
        /// more than the true perpendicular distance allows; in
        /// particular it is never larger than either endpoint distance.
        #[test]
        fn prop_distance_bounded_by_endpoints(
            px in -500.0..500.0f64, py in -500.0..500.0f64,
            ax in -500.0..500.0f64, ay in -500.0..500.0f64,
            bx in -500.0..500.0f64, by in -500.0..500.0f64,
        ) {
            let p = Point::new(px, py);
            let a = Point::new(ax, ay);
            let b = Point::new(bx, by);
            let d = distance_point_to_segment(p, a, b);
            prop_assert!(d <= p.distance_to(a) + 1e-9);
            prop_assert!(d <= p.distance_to(b) + 1e-9);
            prop_assert!(d >= 0.0);
        }
    }
}
