//! Drawing surface abstraction.
//!
//! Shapes render themselves against this trait; the host graphics layer
//! supplies the implementation. The crate ships a tiny-skia raster
//! implementation in [`crate::renderer`].

use lyon::path::Path;

use crate::geometry::{Color, Point, Rect};
use crate::model::{Alignment, FontDesc};

/// Stroke parameters for path outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Stroke width in pixels.
    pub width: f64,
    /// Round caps and joins (arrows); miter otherwise.
    pub round: bool,
}

impl StrokeStyle {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            round: false,
        }
    }

    pub fn rounded(width: f64) -> Self {
        Self { width, round: true }
    }
}

/// The capability set annotations draw against.
pub trait DrawSurface {
    /// Fills a closed path.
    fn fill_path(&mut self, path: &Path, color: Color);

    /// Strokes a path outline.
    fn stroke_path(&mut self, path: &Path, color: Color, style: StrokeStyle);

    /// Fills a circle; used for endpoint markers and selection handles.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);

    /// Draws a text block aligned within `bounds`, honoring embedded
    /// newlines.
    fn draw_text(
        &mut self,
        text: &str,
        bounds: &Rect,
        font: &FontDesc,
        color: Color,
        h_align: Alignment,
        v_align: Alignment,
    );
}
