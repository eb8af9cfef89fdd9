//! Interactive editing flows: selection, handle grabs and drag gestures.

use shotmark::{
    get_resize_handle, Annotation, AnnotationCollection, CommandManager, MoveDrag, Point, Rect,
    ResizeDrag, ResizeHandle, Shape, MIN_ANNOTATION_SIZE,
};

fn collection_with_rect() -> (AnnotationCollection, u64) {
    let mut c = AnnotationCollection::new();
    let id = c.add(Annotation::rectangle(Rect::new(10.0, 10.0, 100.0, 50.0)));
    c.select_annotation(Some(id));
    (c, id)
}

#[test]
fn test_move_drag_uses_total_delta() {
    let (mut c, id) = collection_with_rect();
    let drag = MoveDrag::begin(&c, id, Point::new(50.0, 30.0)).unwrap();

    // Many intermediate pointer events must not accumulate.
    for step in 1..=20 {
        drag.preview(&mut c, Point::new(50.0 + step as f64, 30.0));
    }
    assert_eq!(c.get(id).unwrap().bounds(), Rect::new(30.0, 10.0, 100.0, 50.0));

    let cmd = drag.commit(&mut c, Point::new(70.0, 30.0)).unwrap();
    // Commit hands the mutation to the history.
    assert_eq!(c.get(id).unwrap().bounds(), Rect::new(10.0, 10.0, 100.0, 50.0));

    let mut m = CommandManager::new();
    m.execute(cmd, &mut c);
    assert_eq!(c.get(id).unwrap().bounds(), Rect::new(30.0, 10.0, 100.0, 50.0));
    m.undo(&mut c);
    assert_eq!(c.get(id).unwrap().bounds(), Rect::new(10.0, 10.0, 100.0, 50.0));
}

#[test]
fn test_move_drag_cancel_restores() {
    let (mut c, id) = collection_with_rect();
    let drag = MoveDrag::begin(&c, id, Point::new(50.0, 30.0)).unwrap();
    drag.preview(&mut c, Point::new(200.0, 200.0));
    drag.cancel(&mut c);
    assert_eq!(c.get(id).unwrap().bounds(), Rect::new(10.0, 10.0, 100.0, 50.0));
}

#[test]
fn test_move_drag_without_net_movement_yields_no_command() {
    let (mut c, id) = collection_with_rect();
    let drag = MoveDrag::begin(&c, id, Point::new(50.0, 30.0)).unwrap();
    drag.preview(&mut c, Point::new(60.0, 30.0));
    assert!(drag.commit(&mut c, Point::new(50.0, 30.0)).is_none());
    assert_eq!(c.get(id).unwrap().bounds(), Rect::new(10.0, 10.0, 100.0, 50.0));
}

#[test]
fn test_resize_drag_previews_from_start_shape() {
    let (mut c, id) = collection_with_rect();
    let handle = get_resize_handle(c.get(id).unwrap(), Point::new(110.0, 60.0)).unwrap();
    assert_eq!(handle, ResizeHandle::BottomRight);

    let drag = ResizeDrag::begin(&c, id, handle).unwrap();
    drag.preview(&mut c, Point::new(150.0, 100.0));
    drag.preview(&mut c, Point::new(130.0, 80.0));
    assert_eq!(c.get(id).unwrap().bounds(), Rect::new(10.0, 10.0, 120.0, 70.0));

    let cmd = drag.commit(&mut c, Point::new(130.0, 80.0)).unwrap();
    let mut m = CommandManager::new();
    m.execute(cmd, &mut c);
    assert_eq!(c.get(id).unwrap().bounds(), Rect::new(10.0, 10.0, 120.0, 70.0));
    m.undo(&mut c);
    assert_eq!(c.get(id).unwrap().bounds(), Rect::new(10.0, 10.0, 100.0, 50.0));
}

#[test]
fn test_resize_drag_clamps_to_minimum() {
    let (mut c, id) = collection_with_rect();
    let drag = ResizeDrag::begin(&c, id, ResizeHandle::BottomRight).unwrap();
    let cmd = drag.commit(&mut c, Point::new(-50.0, -50.0)).unwrap();
    let mut m = CommandManager::new();
    m.execute(cmd, &mut c);
    let bounds = c.get(id).unwrap().bounds();
    assert_eq!(bounds.width, MIN_ANNOTATION_SIZE);
    assert_eq!(bounds.height, MIN_ANNOTATION_SIZE);
}

#[test]
fn test_resize_drag_line_endpoint_round_trip() {
    let mut c = AnnotationCollection::new();
    let id = c.add(Annotation::line(Point::new(20.0, 20.0), Point::new(100.0, 80.0)));
    c.select_annotation(Some(id));

    let drag = ResizeDrag::begin(&c, id, ResizeHandle::Right).unwrap();
    let cmd = drag.commit(&mut c, Point::new(140.0, 90.0)).unwrap();
    let mut m = CommandManager::new();
    m.execute(cmd, &mut c);
    m.undo(&mut c);
    match &c.get(id).unwrap().shape {
        Shape::Line(line) => {
            assert_eq!(line.start, Point::new(20.0, 20.0));
            assert_eq!(line.end, Point::new(100.0, 80.0));
        }
        _ => panic!("expected line"),
    }
}

#[test]
fn test_escape_mid_drag_leaves_no_history() {
    let (mut c, id) = collection_with_rect();
    let mut m = CommandManager::new();
    let drag = MoveDrag::begin(&c, id, Point::new(50.0, 30.0)).unwrap();
    drag.preview(&mut c, Point::new(90.0, 30.0));
    drag.cancel(&mut c);
    assert!(!m.can_undo());
    assert!(!m.undo(&mut c));
    assert_eq!(c.get(id).unwrap().bounds(), Rect::new(10.0, 10.0, 100.0, 50.0));
}

#[test]
fn test_handle_grab_requires_selection() {
    let mut c = AnnotationCollection::new();
    let id = c.add(Annotation::rectangle(Rect::new(10.0, 10.0, 100.0, 50.0)));
    let corner = Point::new(10.0, 10.0);
    assert_eq!(get_resize_handle(c.get(id).unwrap(), corner), None);
    c.select_annotation(Some(id));
    assert_eq!(
        get_resize_handle(c.get(id).unwrap(), corner),
        Some(ResizeHandle::TopLeft)
    );
}

#[test]
fn test_drag_begin_on_unknown_id() {
    let c = AnnotationCollection::new();
    assert!(MoveDrag::begin(&c, 42, Point::new(0.0, 0.0)).is_none());
    assert!(ResizeDrag::begin(&c, 42, ResizeHandle::Top).is_none());
}
