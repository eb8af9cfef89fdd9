//! # ShotMark
//!
//! Core annotation engine for a screenshot markup editor. The crate owns
//! the vector shape model, hit-testing geometry, command-based undo/redo
//! and flattened raster export; capture, windowing and input belong to
//! the host application.
//!
//! ## Core Components
//!
//! ### Model
//! - **Shapes**: Arrows, rectangles, lines, and text blocks
//! - **Collection**: Ordered annotations with z-order and single selection
//! - **Handles**: Eight-point resize protocol on selected shapes
//!
//! ### Editing
//! - **Commands**: One undoable command per mutation kind
//! - **History**: Linear undo/redo stacks
//! - **Drags**: Move/resize gestures previewed from a start snapshot
//!
//! ### Rendering
//! - **Surface**: Drawing capability trait shapes render against
//! - **Renderer**: tiny-skia raster implementation and flattened export
//! - **Fonts**: System font lookup and text measurement
//!
//! ## Architecture
//!
//! ```text
//! EditorSession
//!   ├── capture (base raster)
//!   ├── AnnotationCollection (z-ordered shapes, selection)
//!   └── CommandManager (undo/redo stacks)
//! ```
//!
//! Hosts feed pointer events into [`interaction`] drags, execute the
//! resulting commands through the [`CommandManager`], and call
//! [`EditorSession::render_flattened`] to export.

pub mod collection;
pub mod command_manager;
pub mod commands;
pub mod error;
pub mod font_manager;
pub mod geometry;
pub mod handles;
pub mod interaction;
pub mod model;
pub mod renderer;
pub mod session;
pub mod surface;

pub use collection::AnnotationCollection;
pub use command_manager::CommandManager;
pub use commands::EditorCommand;
pub use error::EditorError;
pub use geometry::{Color, Point, Rect, Size};
pub use handles::{get_resize_handle, resize_to, ResizeHandle};
pub use interaction::{MoveDrag, ResizeDrag};
pub use model::{
    Alignment, Annotation, ArrowShape, FontDesc, LineShape, RectangleShape, Shape, ShapeKind,
    TextShape, HANDLE_SIZE, LINE_HIT_TOLERANCE, MIN_ANNOTATION_SIZE,
};
pub use renderer::{render_flattened, RasterSurface};
pub use session::EditorSession;
pub use surface::{DrawSurface, StrokeStyle};
