//! Raster rendering over tiny-skia.
//!
//! [`RasterSurface`] implements [`DrawSurface`] on a premultiplied RGBA
//! pixmap. Vector paths go through tiny-skia with antialiasing; glyphs
//! are rasterized by rusttype and blended pixel by pixel, since
//! tiny-skia has no text support of its own.

use image::RgbaImage;
use rusttype::{point as rt_point, Scale};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::collection::AnnotationCollection;
use crate::error::EditorError;
use crate::font_manager;
use crate::geometry::{Color, Point, Rect};
use crate::model::{Alignment, FontDesc, Shape};
use crate::surface::{DrawSurface, StrokeStyle};

pub struct RasterSurface {
    pixmap: Pixmap,
}

impl RasterSurface {
    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self, EditorError> {
        let pixmap = Pixmap::new(width, height)
            .ok_or(EditorError::SurfaceAlloc { width, height })?;
        Ok(Self { pixmap })
    }

    /// Surface initialized with a copy of the image. The straight-alpha
    /// input is premultiplied into the pixmap.
    pub fn from_image(image: &RgbaImage) -> Result<Self, EditorError> {
        let mut surface = Self::new(image.width(), image.height())?;
        let data = surface.pixmap.data_mut();
        for (index, pixel) in image.pixels().enumerate() {
            let [r, g, b, a] = pixel.0;
            let out = &mut data[index * 4..index * 4 + 4];
            out[0] = premultiply(r, a);
            out[1] = premultiply(g, a);
            out[2] = premultiply(b, a);
            out[3] = a;
        }
        Ok(surface)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Converts the premultiplied pixmap back to a straight-alpha image.
    pub fn into_image(self) -> RgbaImage {
        let width = self.pixmap.width();
        let height = self.pixmap.height();
        let mut image = RgbaImage::new(width, height);
        let data = self.pixmap.data();
        for (index, pixel) in image.pixels_mut().enumerate() {
            let src = &data[index * 4..index * 4 + 4];
            let a = src[3];
            pixel.0 = [
                demultiply(src[0], a),
                demultiply(src[1], a),
                demultiply(src[2], a),
                a,
            ];
        }
        image
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(tiny_skia::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        paint.anti_alias = true;
        paint
    }

    /// Blends one straight-alpha pixel over the premultiplied buffer.
    fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        let width = self.pixmap.width() as i32;
        let height = self.pixmap.height() as i32;
        if x < 0 || x >= width || y < 0 || y >= height {
            return;
        }
        let alpha = coverage.clamp(0.0, 1.0) * color.a as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        let inv = 1.0 - alpha;
        let index = ((y * width + x) * 4) as usize;
        let pixel = &mut self.pixmap.data_mut()[index..index + 4];
        pixel[0] = (color.r as f32 * alpha + pixel[0] as f32 * inv).round() as u8;
        pixel[1] = (color.g as f32 * alpha + pixel[1] as f32 * inv).round() as u8;
        pixel[2] = (color.b as f32 * alpha + pixel[2] as f32 * inv).round() as u8;
        pixel[3] = (255.0 * alpha + pixel[3] as f32 * inv).round() as u8;
    }

    fn draw_text_line(&mut self, line: &str, origin: Point, font: &FontDesc, color: Color) {
        let Some(face) = font_manager::get_font_for(&font.family, font.bold, font.italic) else {
            return;
        };
        let scale = Scale::uniform(font.size);
        let start = rt_point(origin.x as f32, origin.y as f32);
        for glyph in face.layout(line, scale, start) {
            if let Some(bounding_box) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = gx as i32 + bounding_box.min.x;
                    let py = gy as i32 + bounding_box.min.y;
                    self.blend_pixel(px, py, color, v);
                });
            }
        }
    }
}

/// Lyon paths carry the geometry; tiny-skia wants its own path type.
fn to_skia_path(path: &lyon::path::Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for event in path.iter() {
        match event {
            lyon::path::Event::Begin { at } => pb.move_to(at.x, at.y),
            lyon::path::Event::Line { to, .. } => pb.line_to(to.x, to.y),
            lyon::path::Event::Quadratic { ctrl, to, .. } => {
                pb.quad_to(ctrl.x, ctrl.y, to.x, to.y)
            }
            lyon::path::Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => pb.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y),
            lyon::path::Event::End { close, .. } => {
                if close {
                    pb.close();
                }
            }
        }
    }
    pb.finish()
}

impl DrawSurface for RasterSurface {
    fn fill_path(&mut self, path: &lyon::path::Path, color: Color) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &Self::paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn stroke_path(&mut self, path: &lyon::path::Path, color: Color, style: StrokeStyle) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let stroke = Stroke {
            width: style.width as f32,
            line_cap: if style.round {
                LineCap::Round
            } else {
                LineCap::Butt
            },
            line_join: if style.round {
                LineJoin::Round
            } else {
                LineJoin::Miter
            },
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &path,
            &Self::paint(color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        let Some(path) =
            PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &Self::paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn draw_text(
        &mut self,
        text: &str,
        bounds: &Rect,
        font: &FontDesc,
        color: Color,
        h_align: Alignment,
        v_align: Alignment,
    ) {
        let line_height = font_manager::line_height(font);
        let ascent = font_manager::ascent(font);
        let lines: Vec<&str> = text.split('\n').collect();
        let block_height = lines.len() as f64 * line_height;

        let top = match v_align {
            Alignment::Start => bounds.top(),
            Alignment::Center => bounds.top() + (bounds.height - block_height) / 2.0,
            Alignment::End => bounds.bottom() - block_height,
        };

        for (index, line) in lines.iter().enumerate() {
            let line_width = font_manager::measure_line(line, font);
            let x = match h_align {
                Alignment::Start => bounds.left(),
                Alignment::Center => bounds.left() + (bounds.width - line_width) / 2.0,
                Alignment::End => bounds.right() - line_width,
            };
            let baseline = top + index as f64 * line_height + ascent;
            self.draw_text_line(line, Point::new(x, baseline), font, color);
        }
    }
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    ((channel as u16 * alpha as u16 + 127) / 255) as u8
}

fn demultiply(channel: u8, alpha: u8) -> u8 {
    if alpha == 0 {
        0
    } else {
        ((channel as u16 * 255 + alpha as u16 / 2) / alpha as u16).min(255) as u8
    }
}

/// Composites every annotation over a copy of the base capture.
///
/// Text bounds are recomputed first, since text and font edits only
/// invalidate them lazily. Annotations draw in collection order so later
/// ones occlude earlier ones. The base image is untouched.
pub fn render_flattened(
    base: &RgbaImage,
    collection: &mut AnnotationCollection,
) -> Result<RgbaImage, EditorError> {
    for annotation in collection.iter_mut() {
        if let Shape::Text(text) = &mut annotation.shape {
            text.update_bounds_from_text();
        }
    }

    let mut surface = RasterSurface::from_image(base)?;
    for annotation in collection.iter() {
        annotation.draw(&mut surface);
    }
    Ok(surface.into_image())
}
