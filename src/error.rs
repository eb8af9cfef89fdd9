//! Error handling for the annotation engine.
//!
//! Interactive edge cases (degenerate shapes, sub-minimum resizes, missing
//! fonts) are clamped or handled with defaults and never surface as errors.
//! Only programmer-error preconditions are reported upward.

use thiserror::Error;

/// Errors reported by the editing session and renderer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// `render_flattened` was called before a capture was loaded.
    #[error("no capture loaded")]
    NoCapture,

    /// The raster surface could not be allocated.
    #[error("could not allocate a {width}x{height} drawing surface")]
    SurfaceAlloc {
        /// Requested surface width in pixels.
        width: u32,
        /// Requested surface height in pixels.
        height: u32,
    },
}
