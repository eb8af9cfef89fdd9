//! Resize handle protocol: detection of which handle a point grabs and
//! the per-handle resize semantics.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::geometry::{Point, Rect};
use crate::model::{Annotation, Shape, HANDLE_SIZE, MIN_ANNOTATION_SIZE};

/// One of the eight resize handles on a selected annotation's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

/// Handle ring positions for drawing: four corners then four edge
/// midpoints.
pub fn handle_points(bounds: &Rect) -> SmallVec<[(ResizeHandle, Point); 8]> {
    let mut out = SmallVec::new();
    out.push((ResizeHandle::TopLeft, Point::new(bounds.left(), bounds.top())));
    out.push((ResizeHandle::TopRight, Point::new(bounds.right(), bounds.top())));
    out.push((
        ResizeHandle::BottomRight,
        Point::new(bounds.right(), bounds.bottom()),
    ));
    out.push((
        ResizeHandle::BottomLeft,
        Point::new(bounds.left(), bounds.bottom()),
    ));
    out.push((ResizeHandle::Top, Point::new(bounds.center().x, bounds.top())));
    out.push((ResizeHandle::Right, Point::new(bounds.right(), bounds.center().y)));
    out.push((
        ResizeHandle::Bottom,
        Point::new(bounds.center().x, bounds.bottom()),
    ));
    out.push((ResizeHandle::Left, Point::new(bounds.left(), bounds.center().y)));
    out
}

/// Returns the handle under `p`, if any. Corners win over edges; edge
/// handles respond anywhere along their edge within the perpendicular
/// tolerance. Unselected annotations and text annotations never expose
/// handles (text resizes itself from its content).
pub fn get_resize_handle(annotation: &Annotation, p: Point) -> Option<ResizeHandle> {
    if !annotation.selected || matches!(annotation.shape, Shape::Text(_)) {
        return None;
    }

    let half = HANDLE_SIZE / 2.0;
    let bounds = annotation.bounds();

    let near_left = (p.x - bounds.left()).abs() <= half;
    let near_right = (p.x - bounds.right()).abs() <= half;
    let near_top = (p.y - bounds.top()).abs() <= half;
    let near_bottom = (p.y - bounds.bottom()).abs() <= half;

    if near_left && near_top {
        return Some(ResizeHandle::TopLeft);
    }
    if near_right && near_top {
        return Some(ResizeHandle::TopRight);
    }
    if near_right && near_bottom {
        return Some(ResizeHandle::BottomRight);
    }
    if near_left && near_bottom {
        return Some(ResizeHandle::BottomLeft);
    }

    let in_x_span = p.x >= bounds.left() && p.x <= bounds.right();
    let in_y_span = p.y >= bounds.top() && p.y <= bounds.bottom();

    if near_top && in_x_span {
        return Some(ResizeHandle::Top);
    }
    if near_right && in_y_span {
        return Some(ResizeHandle::Right);
    }
    if near_bottom && in_x_span {
        return Some(ResizeHandle::Bottom);
    }
    if near_left && in_y_span {
        return Some(ResizeHandle::Left);
    }

    None
}

/// New bounds for a handle drag: the grabbed handle follows `p` while the
/// opposite corner or edge stays anchored. Width and height are clamped
/// to the minimum, keeping the computed origin.
fn resized_bounds(bounds: &Rect, handle: ResizeHandle, p: Point) -> Rect {
    let mut next = match handle {
        ResizeHandle::TopLeft => {
            Rect::new(p.x, p.y, bounds.right() - p.x, bounds.bottom() - p.y)
        }
        ResizeHandle::Top => Rect::new(
            bounds.left(),
            p.y,
            bounds.width,
            bounds.bottom() - p.y,
        ),
        ResizeHandle::TopRight => Rect::new(
            bounds.left(),
            p.y,
            p.x - bounds.left(),
            bounds.bottom() - p.y,
        ),
        ResizeHandle::Right => Rect::new(
            bounds.left(),
            bounds.top(),
            p.x - bounds.left(),
            bounds.height,
        ),
        ResizeHandle::BottomRight => Rect::new(
            bounds.left(),
            bounds.top(),
            p.x - bounds.left(),
            p.y - bounds.top(),
        ),
        ResizeHandle::Bottom => Rect::new(
            bounds.left(),
            bounds.top(),
            bounds.width,
            p.y - bounds.top(),
        ),
        ResizeHandle::BottomLeft => Rect::new(
            p.x,
            bounds.top(),
            bounds.right() - p.x,
            p.y - bounds.top(),
        ),
        ResizeHandle::Left => Rect::new(
            p.x,
            bounds.top(),
            bounds.right() - p.x,
            bounds.height,
        ),
    };
    next.width = next.width.max(MIN_ANNOTATION_SIZE);
    next.height = next.height.max(MIN_ANNOTATION_SIZE);
    next
}

/// Applies a handle drag to the annotation's shape.
///
/// Rectangles take the recomputed bounds directly. Arrows and lines remap
/// the handle onto an endpoint: left-side handles move the start point,
/// right-side handles the end point, and Top/Bottom adjust only the Y of
/// start/end respectively. Text ignores the handle and recomputes its
/// bounds from its content.
pub fn resize_to(annotation: &mut Annotation, handle: ResizeHandle, p: Point) {
    let next = resized_bounds(&annotation.bounds(), handle, p);

    match &mut annotation.shape {
        Shape::Rectangle(s) => s.bounds = next,
        Shape::Text(s) => s.update_bounds_from_text(),
        Shape::Arrow(s) => {
            apply_endpoint_resize(&mut s.start, &mut s.end, handle, &next);
        }
        Shape::Line(s) => {
            apply_endpoint_resize(&mut s.start, &mut s.end, handle, &next);
        }
    }
}

fn apply_endpoint_resize(start: &mut Point, end: &mut Point, handle: ResizeHandle, next: &Rect) {
    match handle {
        ResizeHandle::TopLeft | ResizeHandle::Left | ResizeHandle::BottomLeft => {
            *start = Point::new(next.left(), next.top());
        }
        ResizeHandle::TopRight | ResizeHandle::Right | ResizeHandle::BottomRight => {
            *end = Point::new(next.right(), next.bottom());
        }
        ResizeHandle::Top => start.y = next.top(),
        ResizeHandle::Bottom => end.y = next.bottom(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn selected_rect() -> Annotation {
        let mut a = Annotation::rectangle(Rect::new(10.0, 10.0, 100.0, 50.0));
        a.selected = true;
        a
    }

    #[test]
    fn test_unselected_has_no_handles() {
        let a = Annotation::rectangle(Rect::new(10.0, 10.0, 100.0, 50.0));
        assert_eq!(get_resize_handle(&a, Point::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_corner_beats_edge() {
        let a = selected_rect();
        // Exactly on the top-left corner, which also lies on two edges.
        assert_eq!(
            get_resize_handle(&a, Point::new(10.0, 10.0)),
            Some(ResizeHandle::TopLeft)
        );
    }

    #[test]
    fn test_edge_detection_along_span() {
        let a = selected_rect();
        assert_eq!(
            get_resize_handle(&a, Point::new(60.0, 12.0)),
            Some(ResizeHandle::Top)
        );
        assert_eq!(
            get_resize_handle(&a, Point::new(108.0, 35.0)),
            Some(ResizeHandle::Right)
        );
        assert_eq!(get_resize_handle(&a, Point::new(60.0, 35.0)), None);
    }

    #[test]
    fn test_handle_tolerance_is_half_size() {
        let a = selected_rect();
        assert_eq!(
            get_resize_handle(&a, Point::new(14.0, 14.0)),
            Some(ResizeHandle::TopLeft)
        );
        assert_eq!(get_resize_handle(&a, Point::new(15.0, 15.0)), None);
    }

    #[test]
    fn test_text_never_exposes_handles() {
        let mut a = Annotation::text(Point::new(10.0, 10.0), "hi");
        a.selected = true;
        let corner = a.bounds().location();
        assert_eq!(get_resize_handle(&a, corner), None);
    }

    #[test]
    fn test_bottom_right_resize() {
        let mut a = selected_rect();
        resize_to(&mut a, ResizeHandle::BottomRight, Point::new(200.0, 150.0));
        assert_eq!(a.bounds(), Rect::new(10.0, 10.0, 190.0, 140.0));
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let mut a = selected_rect();
        // Drag the bottom-right handle above and left of the top-left.
        resize_to(&mut a, ResizeHandle::BottomRight, Point::new(0.0, 0.0));
        let bounds = a.bounds();
        assert_eq!(bounds.width, MIN_ANNOTATION_SIZE);
        assert_eq!(bounds.height, MIN_ANNOTATION_SIZE);
    }

    #[test]
    fn test_line_left_handle_moves_start() {
        let mut a = Annotation::line(Point::new(20.0, 20.0), Point::new(100.0, 80.0));
        a.selected = true;
        resize_to(&mut a, ResizeHandle::TopLeft, Point::new(5.0, 5.0));
        if let Shape::Line(line) = &a.shape {
            assert_eq!(line.start, Point::new(5.0, 5.0));
            assert_eq!(line.end, Point::new(100.0, 80.0));
        } else {
            panic!("expected line");
        }
        assert_eq!(a.bounds(), Rect::from_points(Point::new(5.0, 5.0), Point::new(100.0, 80.0)));
    }

    #[test]
    fn test_arrow_top_handle_adjusts_start_y_only() {
        let mut a = Annotation::arrow(Point::new(20.0, 20.0), Point::new(100.0, 80.0));
        a.selected = true;
        resize_to(&mut a, ResizeHandle::Top, Point::new(60.0, 5.0));
        if let Shape::Arrow(arrow) = &a.shape {
            assert_eq!(arrow.start, Point::new(20.0, 5.0));
            assert_eq!(arrow.end, Point::new(100.0, 80.0));
        } else {
            panic!("expected arrow");
        }
    }

    #[test]
    fn test_resize_by_size_clamps() {
        let mut a = selected_rect();
        a.resize(Size::new(1.0, 300.0));
        assert_eq!(a.bounds().size(), Size::new(MIN_ANNOTATION_SIZE, 300.0));
    }
}
