//! Drag gestures for moving and resizing.
//!
//! A drag snapshots the shape when it begins; every preview is computed
//! from that snapshot plus the total pointer delta, so intermediate
//! pointer events never accumulate rounding or ordering artifacts.
//! Committing restores the snapshot and hands back a command, so the
//! command's apply is the single mutation the history ever records.

use crate::collection::AnnotationCollection;
use crate::commands::EditorCommand;
use crate::geometry::Point;
use crate::handles::{resize_to, ResizeHandle};
use crate::model::Shape;

/// An in-progress move of one annotation.
#[derive(Debug, Clone)]
pub struct MoveDrag {
    id: u64,
    origin: Point,
    shape_at_start: Shape,
}

impl MoveDrag {
    /// Starts a move at the pointer's press position. `None` if the id
    /// is unknown.
    pub fn begin(collection: &AnnotationCollection, id: u64, origin: Point) -> Option<Self> {
        let shape_at_start = collection.get(id)?.shape.clone();
        Some(Self {
            id,
            origin,
            shape_at_start,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    fn delta(&self, current: Point) -> (f64, f64) {
        (current.x - self.origin.x, current.y - self.origin.y)
    }

    /// Shows the shape at the position implied by the total pointer
    /// delta. Safe to call on every pointer event.
    pub fn preview(&self, collection: &mut AnnotationCollection, current: Point) {
        let (dx, dy) = self.delta(current);
        if let Some(annotation) = collection.get_mut(self.id) {
            annotation.shape = self.shape_at_start.clone();
            annotation.move_by(dx, dy);
        }
    }

    /// Restores the pre-drag shape.
    pub fn cancel(&self, collection: &mut AnnotationCollection) {
        if let Some(annotation) = collection.get_mut(self.id) {
            annotation.shape = self.shape_at_start.clone();
        }
    }

    /// Ends the drag: the shape is restored to its pre-drag state and the
    /// net movement is returned as a command for the history to execute.
    /// A drag that went nowhere yields no command.
    pub fn commit(
        self,
        collection: &mut AnnotationCollection,
        current: Point,
    ) -> Option<EditorCommand> {
        let (dx, dy) = self.delta(current);
        self.cancel(collection);
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(EditorCommand::move_by(self.id, dx, dy))
    }
}

/// An in-progress resize through one handle.
#[derive(Debug, Clone)]
pub struct ResizeDrag {
    id: u64,
    handle: ResizeHandle,
    shape_at_start: Shape,
}

impl ResizeDrag {
    pub fn begin(collection: &AnnotationCollection, id: u64, handle: ResizeHandle) -> Option<Self> {
        let shape_at_start = collection.get(id)?.shape.clone();
        Some(Self {
            id,
            handle,
            shape_at_start,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn handle(&self) -> ResizeHandle {
        self.handle
    }

    /// Shows the resize implied by the current pointer position, always
    /// computed against the pre-drag shape.
    pub fn preview(&self, collection: &mut AnnotationCollection, current: Point) {
        if let Some(annotation) = collection.get_mut(self.id) {
            annotation.shape = self.shape_at_start.clone();
            resize_to(annotation, self.handle, current);
        }
    }

    /// Restores the pre-drag shape.
    pub fn cancel(&self, collection: &mut AnnotationCollection) {
        if let Some(annotation) = collection.get_mut(self.id) {
            annotation.shape = self.shape_at_start.clone();
        }
    }

    /// Ends the drag, returning a resize command from the pre-drag shape
    /// to the final one. A no-op resize yields no command.
    pub fn commit(
        self,
        collection: &mut AnnotationCollection,
        current: Point,
    ) -> Option<EditorCommand> {
        self.preview(collection, current);
        let new_shape = collection.get(self.id)?.shape.clone();
        self.cancel(collection);
        if new_shape == self.shape_at_start {
            return None;
        }
        Some(EditorCommand::Resize {
            id: self.id,
            old_shape: self.shape_at_start,
            new_shape,
        })
    }
}
