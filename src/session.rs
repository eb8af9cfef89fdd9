//! Editing session: a capture, its annotations and their history.

use image::RgbaImage;
use tracing::info;

use crate::collection::AnnotationCollection;
use crate::command_manager::CommandManager;
use crate::error::EditorError;
use crate::renderer;

/// Everything one open capture carries: the base image, the annotation
/// collection drawn over it and the undo history of edits.
#[derive(Debug, Default)]
pub struct EditorSession {
    capture: Option<RgbaImage>,
    pub annotations: AnnotationCollection,
    pub history: CommandManager,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capture(capture: RgbaImage) -> Self {
        let mut session = Self::new();
        session.load_capture(capture);
        session
    }

    /// Replaces the capture. Annotations and history belong to the old
    /// capture and are discarded with it.
    pub fn load_capture(&mut self, capture: RgbaImage) {
        info!(
            width = capture.width(),
            height = capture.height(),
            "load capture"
        );
        self.capture = Some(capture);
        self.annotations.clear();
        self.history.clear();
    }

    pub fn capture(&self) -> Option<&RgbaImage> {
        self.capture.as_ref()
    }

    pub fn has_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Composes the capture and all annotations into one raster for the
    /// host to save or copy out.
    pub fn render_flattened(&mut self) -> Result<RgbaImage, EditorError> {
        let base = self.capture.as_ref().ok_or(EditorError::NoCapture)?;
        renderer::render_flattened(base, &mut self.annotations)
    }

    /// Ends the session, dropping the capture, annotations and history.
    pub fn close(&mut self) {
        info!("close session");
        self.capture = None;
        self.annotations.clear();
        self.history.clear();
    }
}
