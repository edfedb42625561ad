use resvg::tiny_skia::{FillRule, Paint, Pixmap, Stroke, Transform};

use crate::layout::{FontStyle, GlyphMask, TextSize};
use crate::text_metrics;

/// Padding stroke width around a word, derived from its `space` factor.
/// Modeled as an outline that is measured but not necessarily drawn.
pub fn stroke_width(space: f32, font_size: f32) -> f32 {
    space * font_size * 2.0
}

/// Axis-aligned box of a `width` x `height` rectangle rotated by `rotate`
/// degrees, rounded up to whole pixels.
pub fn rotated_rect(width: f32, height: f32, rotate: f32) -> (i32, i32) {
    let rad = rotate.to_radians();
    let rotated_width = width * rad.cos().abs() + height * rad.sin().abs();
    let rotated_height = width * rad.sin().abs() + height * rad.cos().abs();
    (
        rotated_width.ceil() as i32,
        rotated_height.ceil() as i32,
    )
}

/// The one environment-coupled seam of the engine: glyph metrics and pixel
/// coverage depend on the text backend, so both live behind this trait and
/// can be swapped out (for tests, or for approximate fast layouts).
pub trait Rasterizer: Send + Sync {
    /// Advance width and vertical extent of the unrotated, unpadded text.
    fn measure(&self, text: &str, style: &FontStyle) -> TextSize;

    /// Full occupancy mask including padding and rotation. Degenerate
    /// input produces an empty mask that fits anywhere, never an error.
    fn rasterize(&self, text: &str, style: &FontStyle, space: f32, rotate: f32) -> GlyphMask;

    /// Outer box of the padded, rotated text. This is the measurement the
    /// fit transform re-runs after scaling font sizes, since text boxes do
    /// not scale linearly with font size.
    fn bounding_rect(&self, text: &str, style: &FontStyle, space: f32, rotate: f32) -> TextSize {
        let size = self.measure(text, style);
        if size.width <= 0.0 || size.height <= 0.0 {
            return TextSize::ZERO;
        }
        let line_width = stroke_width(space, style.font_size);
        let (width, height) =
            rotated_rect(size.width + line_width, size.height + line_width, rotate);
        TextSize {
            width: width as f32,
            height: height as f32,
        }
    }
}

/// Real backend: fontdb-resolved glyph outlines filled (and stroked, when
/// padding is requested) into an alpha pixmap, then scanned pixel by pixel.
pub struct FontRasterizer;

impl Rasterizer for FontRasterizer {
    fn measure(&self, text: &str, style: &FontStyle) -> TextSize {
        text_metrics::measure_text(text, style).unwrap_or(TextSize::ZERO)
    }

    fn rasterize(&self, text: &str, style: &FontStyle, space: f32, rotate: f32) -> GlyphMask {
        let Some(outline) = text_metrics::text_outline(text, style) else {
            return GlyphMask::default();
        };
        if outline.width <= 0.0 || outline.height() <= 0.0 {
            return GlyphMask::default();
        }
        let line_width = stroke_width(space, style.font_size);
        let (mask_width, mask_height) = rotated_rect(
            outline.width + line_width,
            outline.height() + line_width,
            rotate,
        );
        if mask_width <= 0 || mask_height <= 0 {
            return GlyphMask::default();
        }
        let Some(mut pixmap) = Pixmap::new(mask_width as u32, mask_height as u32) else {
            return GlyphMask::default();
        };

        // Center the text block on the canvas center, then rotate about it.
        let transform = Transform::from_translate(
            -outline.width / 2.0,
            (outline.ascent - outline.descent) / 2.0,
        )
        .post_concat(Transform::from_rotate(rotate))
        .post_translate(mask_width as f32 / 2.0, mask_height as f32 / 2.0);

        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, 255);
        paint.anti_alias = true;
        pixmap.fill_path(&outline.path, &paint, FillRule::Winding, transform, None);
        if line_width > 0.0 {
            let stroke = Stroke {
                width: line_width,
                ..Stroke::default()
            };
            pixmap.stroke_path(&outline.path, &paint, &stroke, transform, None);
        }

        let data = pixmap.data();
        let mut pixels = Vec::new();
        for x in 0..mask_width {
            for y in 0..mask_height {
                let alpha = data[((y * mask_width + x) * 4 + 3) as usize];
                if alpha != 0 {
                    pixels.push((x, y));
                }
            }
        }
        GlyphMask {
            width: mask_width,
            height: mask_height,
            pixels,
        }
    }
}

/// Approximate backend that treats every word as a solid box of the
/// padded, rotated extents, with a fixed per-character advance. Trades
/// pixel accuracy for speed and full independence from installed fonts,
/// which also makes it the deterministic backend for tests.
pub struct BoxRasterizer {
    /// Advance per character as a fraction of the font size.
    pub char_width: f32,
}

impl Default for BoxRasterizer {
    fn default() -> Self {
        Self { char_width: 0.6 }
    }
}

impl Rasterizer for BoxRasterizer {
    fn measure(&self, text: &str, style: &FontStyle) -> TextSize {
        if text.is_empty() || style.font_size <= 0.0 {
            return TextSize::ZERO;
        }
        let count = text.chars().count() as f32;
        TextSize {
            width: count * self.char_width * style.font_size,
            height: style.font_size,
        }
    }

    fn rasterize(&self, text: &str, style: &FontStyle, space: f32, rotate: f32) -> GlyphMask {
        let rect = self.bounding_rect(text, style, space, rotate);
        let (width, height) = (rect.width as i32, rect.height as i32);
        if width <= 0 || height <= 0 {
            return GlyphMask::default();
        }
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for x in 0..width {
            for y in 0..height {
                pixels.push((x, y));
            }
        }
        GlyphMask {
            width,
            height,
            pixels,
        }
    }
}
