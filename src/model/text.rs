//! Text shape: a padded text block drawn over a contrasting rounded
//! background. Bounds are derived from the measured text, never set by
//! resize handles.

use serde::{Deserialize, Serialize};

use crate::font_manager;
use crate::geometry::{rectangle_path, rounded_rectangle_path, Color, Point, Rect};
use crate::handles::handle_points;
use crate::model::draw_handle;
use crate::surface::{DrawSurface, StrokeStyle};

/// Corner radius of the text background.
const BACKGROUND_RADIUS: f64 = 4.0;

/// Dark background used when the text color is not pure black.
const DARK_BACKGROUND: Color = Color::rgb(0x1a, 0x1a, 0x1a);

/// Placeholder size for a freshly created text annotation, replaced by the
/// first bounds recomputation.
const INITIAL_WIDTH: f64 = 100.0;
const INITIAL_HEIGHT: f64 = 30.0;

/// Alignment of text within its bounds, on either axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    Start,
    #[default]
    Center,
    End,
}

/// Font descriptor with value semantics. Font changes replace the whole
/// descriptor so undo can restore the previous one by clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDesc {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl Default for FontDesc {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            size: 12.0,
            bold: false,
            italic: false,
        }
    }
}

impl FontDesc {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            ..Self::default()
        }
    }

    pub fn with_size(&self, size: f32) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    pub fn with_family(&self, family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    pub bounds: Rect,
    pub text: String,
    pub font: FontDesc,
    pub h_align: Alignment,
    pub v_align: Alignment,
    /// When set, height is no longer recomputed from the text.
    pub custom_top_padding: Option<f64>,
    pub custom_bottom_padding: Option<f64>,
}

impl TextShape {
    pub fn new(location: Point, text: impl Into<String>) -> Self {
        Self {
            bounds: Rect::new(location.x, location.y, INITIAL_WIDTH, INITIAL_HEIGHT),
            text: text.into(),
            font: FontDesc::default(),
            h_align: Alignment::Center,
            v_align: Alignment::Center,
            custom_top_padding: None,
            custom_bottom_padding: None,
        }
    }

    /// Background color under the contrast rule: white behind pure black
    /// text, a fixed dark gray behind everything else.
    pub fn background_color(&self, text_color: Color) -> Color {
        if text_color.is_pure_black() {
            Color::WHITE
        } else {
            DARK_BACKGROUND
        }
    }

    /// Recomputes the bounds size from the measured text. Width always
    /// follows the text plus an em-based side margin ("MM" at the current
    /// font). Height follows the text plus 3% vertical padding unless a
    /// custom padding is set, in which case the current height is kept.
    /// Position never changes.
    pub fn update_bounds_from_text(&mut self) {
        let (text_width, text_height) = font_manager::measure_block(&self.text, &self.font);
        let h_padding = font_manager::measure_line("MM", &self.font);
        self.bounds.width = text_width + 2.0 * h_padding;

        if self.custom_top_padding.is_none() && self.custom_bottom_padding.is_none() {
            let v_padding = (text_height * 0.03).round();
            self.bounds.height = text_height + 2.0 * v_padding;
        }
    }

    pub fn draw(&self, color: Color, selected: bool, surface: &mut dyn DrawSurface) {
        let background = rounded_rectangle_path(&self.bounds, BACKGROUND_RADIUS);
        surface.fill_path(&background, self.background_color(color));
        surface.draw_text(
            &self.text,
            &self.bounds,
            &self.font,
            color,
            self.h_align,
            self.v_align,
        );
        if selected {
            surface.stroke_path(
                &rectangle_path(&self.bounds),
                crate::model::handle_color(),
                StrokeStyle::new(1.0),
            );
            for (_, at) in handle_points(&self.bounds) {
                draw_handle(surface, at);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_contrast_rule() {
        let shape = TextShape::new(Point::new(0.0, 0.0), "hi");
        assert_eq!(shape.background_color(Color::BLACK), Color::WHITE);
        assert_eq!(shape.background_color(Color::RED), DARK_BACKGROUND);
        // Near-black still counts as non-black.
        assert_eq!(
            shape.background_color(Color::rgb(1, 0, 0)),
            DARK_BACKGROUND
        );
    }

    #[test]
    fn test_update_bounds_keeps_position() {
        let mut shape = TextShape::new(Point::new(12.0, 34.0), "hello world");
        shape.update_bounds_from_text();
        assert_eq!(shape.bounds.x, 12.0);
        assert_eq!(shape.bounds.y, 34.0);
        assert!(shape.bounds.width > 0.0);
        assert!(shape.bounds.height > 0.0);
    }

    #[test]
    fn test_custom_padding_preserves_height() {
        let mut shape = TextShape::new(Point::new(0.0, 0.0), "hello");
        shape.custom_top_padding = Some(20.0);
        shape.bounds.height = 77.0;
        shape.update_bounds_from_text();
        assert_eq!(shape.bounds.height, 77.0);
    }

    #[test]
    fn test_font_desc_value_semantics() {
        let font = FontDesc::default();
        let bigger = font.with_size(24.0);
        assert_eq!(font.size, 12.0);
        assert_eq!(bigger.size, 24.0);
        assert_eq!(bigger.family, font.family);
        let mono = font.with_family("Monospace");
        assert_eq!(mono.size, 12.0);
        assert_eq!(mono.family, "Monospace");
    }
}
