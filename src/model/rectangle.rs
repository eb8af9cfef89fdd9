//! Rectangle shape, optionally filled and optionally rounded.

use serde::{Deserialize, Serialize};

use crate::geometry::{rectangle_path, rounded_rectangle_path, Color, Rect};
use crate::handles::handle_points;
use crate::model::draw_handle;
use crate::surface::{DrawSurface, StrokeStyle};

/// Alpha applied to the fill so the capture stays visible through filled
/// rectangles.
const FILL_ALPHA: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleShape {
    pub bounds: Rect,
    pub filled: bool,
    pub corner_radius: f64,
}

impl RectangleShape {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            filled: false,
            corner_radius: 0.0,
        }
    }

    pub fn filled(bounds: Rect) -> Self {
        Self {
            filled: true,
            ..Self::new(bounds)
        }
    }

    pub fn draw(
        &self,
        color: Color,
        stroke_width: u32,
        selected: bool,
        surface: &mut dyn DrawSurface,
    ) {
        let path = if self.corner_radius > 0.0 {
            rounded_rectangle_path(&self.bounds, self.corner_radius)
        } else {
            rectangle_path(&self.bounds)
        };
        if self.filled {
            surface.fill_path(&path, color.with_alpha(FILL_ALPHA));
        }
        surface.stroke_path(&path, color, StrokeStyle::new(stroke_width as f64));
        if selected {
            for (_, at) in handle_points(&self.bounds) {
                draw_handle(surface, at);
            }
        }
    }
}
