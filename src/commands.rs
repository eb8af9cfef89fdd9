//! Undoable mutations, one variant per mutation kind.
//!
//! Every command captures at construction all the state its undo needs,
//! so undo never consults the collection's selection or any other live
//! state. Commands reference their target by id; a stale id (target
//! deleted through some other path) makes apply and undo no-ops rather
//! than errors.

use crate::collection::AnnotationCollection;
use crate::geometry::{Color, Size};
use crate::model::{Annotation, FontDesc, Shape};

#[derive(Debug, Clone)]
pub enum EditorCommand {
    /// Adds an annotation. The slot holds the annotation between undo and
    /// redo so identity survives round trips.
    Create {
        slot: Option<Annotation>,
        id: u64,
    },
    /// Removes an annotation, remembering its z position for undo.
    Delete {
        id: u64,
        slot: Option<(usize, Annotation)>,
    },
    Move {
        id: u64,
        dx: f64,
        dy: f64,
    },
    /// Full shape snapshots on both sides make undo exact across every
    /// variant, endpoints included.
    Resize {
        id: u64,
        old_shape: Shape,
        new_shape: Shape,
    },
    ChangeColor {
        id: u64,
        new_color: Color,
        old_color: Color,
    },
    ChangeStrokeWidth {
        id: u64,
        new_width: u32,
        old_width: u32,
    },
    ChangeFontSize {
        id: u64,
        new_size: f32,
        old_font: FontDesc,
    },
    ChangeFont {
        id: u64,
        new_family: String,
        old_font: FontDesc,
    },
}

impl EditorCommand {
    pub fn create(annotation: Annotation) -> Self {
        EditorCommand::Create {
            id: annotation.id,
            slot: Some(annotation),
        }
    }

    pub fn delete(id: u64) -> Self {
        EditorCommand::Delete { id, slot: None }
    }

    pub fn move_by(id: u64, dx: f64, dy: f64) -> Self {
        EditorCommand::Move { id, dx, dy }
    }

    /// Resize to an explicit replacement shape; captures the current
    /// shape for undo. `None` when the id is unknown.
    pub fn resize(
        collection: &AnnotationCollection,
        id: u64,
        new_shape: Shape,
    ) -> Option<Self> {
        let old_shape = collection.get(id)?.shape.clone();
        Some(EditorCommand::Resize {
            id,
            old_shape,
            new_shape,
        })
    }

    /// Resize by size alone, for bounds-based shapes. The clamped result
    /// is computed up front so apply and redo are identical.
    pub fn resize_to_size(
        collection: &AnnotationCollection,
        id: u64,
        size: Size,
    ) -> Option<Self> {
        let annotation = collection.get(id)?;
        let mut resized = annotation.clone();
        resized.resize(size);
        Self::resize(collection, id, resized.shape)
    }

    pub fn change_color(
        collection: &AnnotationCollection,
        id: u64,
        new_color: Color,
    ) -> Option<Self> {
        let old_color = collection.get(id)?.color;
        Some(EditorCommand::ChangeColor {
            id,
            new_color,
            old_color,
        })
    }

    pub fn change_stroke_width(
        collection: &AnnotationCollection,
        id: u64,
        new_width: u32,
    ) -> Option<Self> {
        let old_width = collection.get(id)?.stroke_width;
        Some(EditorCommand::ChangeStrokeWidth {
            id,
            new_width,
            old_width,
        })
    }

    /// Font size change for text annotations; `None` for other kinds.
    pub fn change_font_size(
        collection: &AnnotationCollection,
        id: u64,
        new_size: f32,
    ) -> Option<Self> {
        let old_font = match &collection.get(id)?.shape {
            Shape::Text(text) => text.font.clone(),
            _ => return None,
        };
        Some(EditorCommand::ChangeFontSize {
            id,
            new_size,
            old_font,
        })
    }

    /// Font family change for text annotations; `None` for other kinds.
    pub fn change_font(
        collection: &AnnotationCollection,
        id: u64,
        new_family: impl Into<String>,
    ) -> Option<Self> {
        let old_font = match &collection.get(id)?.shape {
            Shape::Text(text) => text.font.clone(),
            _ => return None,
        };
        Some(EditorCommand::ChangeFont {
            id,
            new_family: new_family.into(),
            old_font,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorCommand::Create { .. } => "create",
            EditorCommand::Delete { .. } => "delete",
            EditorCommand::Move { .. } => "move",
            EditorCommand::Resize { .. } => "resize",
            EditorCommand::ChangeColor { .. } => "change color",
            EditorCommand::ChangeStrokeWidth { .. } => "change stroke width",
            EditorCommand::ChangeFontSize { .. } => "change font size",
            EditorCommand::ChangeFont { .. } => "change font",
        }
    }

    pub fn apply(&mut self, collection: &mut AnnotationCollection) {
        match self {
            EditorCommand::Create { slot, id } => {
                if let Some(annotation) = slot.take() {
                    *id = collection.add(annotation);
                }
            }
            EditorCommand::Delete { id, slot } => {
                *slot = collection.remove_take(*id);
            }
            EditorCommand::Move { id, dx, dy } => {
                if let Some(annotation) = collection.get_mut(*id) {
                    annotation.move_by(*dx, *dy);
                }
            }
            EditorCommand::Resize { id, new_shape, .. } => {
                if let Some(annotation) = collection.get_mut(*id) {
                    annotation.shape = new_shape.clone();
                }
            }
            EditorCommand::ChangeColor { id, new_color, .. } => {
                if let Some(annotation) = collection.get_mut(*id) {
                    annotation.color = *new_color;
                }
            }
            EditorCommand::ChangeStrokeWidth { id, new_width, .. } => {
                if let Some(annotation) = collection.get_mut(*id) {
                    annotation.stroke_width = *new_width;
                }
            }
            EditorCommand::ChangeFontSize {
                id,
                new_size,
                old_font,
            } => {
                if let Some(annotation) = collection.get_mut(*id) {
                    if let Shape::Text(text) = &mut annotation.shape {
                        text.font = old_font.with_size(*new_size);
                    }
                }
            }
            EditorCommand::ChangeFont {
                id,
                new_family,
                old_font,
            } => {
                if let Some(annotation) = collection.get_mut(*id) {
                    if let Shape::Text(text) = &mut annotation.shape {
                        text.font = old_font.with_family(new_family.clone());
                    }
                }
            }
        }
    }

    pub fn undo(&mut self, collection: &mut AnnotationCollection) {
        match self {
            EditorCommand::Create { slot, id } => {
                if let Some((_, annotation)) = collection.remove_take(*id) {
                    *slot = Some(annotation);
                }
            }
            EditorCommand::Delete { slot, .. } => {
                if let Some((index, annotation)) = slot.take() {
                    collection.insert(index, annotation);
                }
            }
            EditorCommand::Move { id, dx, dy } => {
                if let Some(annotation) = collection.get_mut(*id) {
                    annotation.move_by(-*dx, -*dy);
                }
            }
            EditorCommand::Resize { id, old_shape, .. } => {
                if let Some(annotation) = collection.get_mut(*id) {
                    annotation.shape = old_shape.clone();
                }
            }
            EditorCommand::ChangeColor { id, old_color, .. } => {
                if let Some(annotation) = collection.get_mut(*id) {
                    annotation.color = *old_color;
                }
            }
            EditorCommand::ChangeStrokeWidth { id, old_width, .. } => {
                if let Some(annotation) = collection.get_mut(*id) {
                    annotation.stroke_width = *old_width;
                }
            }
            EditorCommand::ChangeFontSize { id, old_font, .. }
            | EditorCommand::ChangeFont { id, old_font, .. } => {
                if let Some(annotation) = collection.get_mut(*id) {
                    if let Shape::Text(text) = &mut annotation.shape {
                        text.font = old_font.clone();
                    }
                }
            }
        }
    }
}
