use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use resvg::tiny_skia::{Path, PathBuilder};
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use crate::layout::{FontStyle, TextSize};

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Measures the advance width and vertical extent (ascent + descent) of
/// `text` under the given style. Empty input measures as zero.
pub fn measure_text(text: &str, style: &FontStyle) -> Option<TextSize> {
    if text.is_empty() || style.font_size <= 0.0 {
        return Some(TextSize::ZERO);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.measure(text, style)
}

/// Builds one filled path of all glyph outlines in `text`, advancing left
/// to right with the baseline at `y = 0` and screen-oriented coordinates
/// (y grows downwards).
pub fn text_outline(text: &str, style: &FontStyle) -> Option<TextOutline> {
    if text.is_empty() || style.font_size <= 0.0 {
        return None;
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.outline(text, style)
}

pub struct TextOutline {
    pub path: Path,
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl TextOutline {
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    cache: HashMap<String, Option<FontFace>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            cache: HashMap::new(),
        }
    }

    fn face_for(&mut self, style: &FontStyle) -> Option<&mut FontFace> {
        let key = face_key(style);
        if !self.cache.contains_key(&key) {
            let face = self.load_face(style);
            self.cache.insert(key.clone(), face);
        }
        self.cache.get_mut(&key).and_then(|face| face.as_mut())
    }

    fn measure(&mut self, text: &str, style: &FontStyle) -> Option<TextSize> {
        let font_size = style.font_size;
        let face = self.face_for(style)?;
        let normalized = text.replace('\t', "    ");
        let width = face.measure_width(&normalized, font_size)?;
        let height = face.line_extent(font_size);
        Some(TextSize { width, height })
    }

    fn outline(&mut self, text: &str, style: &FontStyle) -> Option<TextOutline> {
        let font_size = style.font_size;
        let face = self.face_for(style)?;
        face.outline_text(text, font_size)
    }

    fn load_face(&mut self, style: &FontStyle) -> Option<FontFace> {
        #[derive(Clone, Copy)]
        enum FamilyToken {
            Generic(fontdb::Family<'static>),
            Name(usize),
        }

        let mut names: Vec<String> = Vec::new();
        let mut order: Vec<FamilyToken> = Vec::new();
        for part in style.font_family.split(',') {
            let raw = part.trim().trim_matches('"').trim_matches('\'');
            if raw.is_empty() {
                continue;
            }
            let lower = raw.to_ascii_lowercase();
            match lower.as_str() {
                "serif" => order.push(FamilyToken::Generic(Family::Serif)),
                "sans-serif" => order.push(FamilyToken::Generic(Family::SansSerif)),
                "monospace" => order.push(FamilyToken::Generic(Family::Monospace)),
                "cursive" => order.push(FamilyToken::Generic(Family::Cursive)),
                "fantasy" => order.push(FamilyToken::Generic(Family::Fantasy)),
                "system-ui" | "-apple-system" | "ui-sans-serif" => {
                    order.push(FamilyToken::Generic(Family::SansSerif))
                }
                "ui-monospace" => order.push(FamilyToken::Generic(Family::Monospace)),
                _ => {
                    let idx = names.len();
                    names.push(raw.to_string());
                    order.push(FamilyToken::Name(idx));
                }
            }
        }
        if order.is_empty() {
            order.push(FamilyToken::Generic(Family::SansSerif));
        }

        let mut families: Vec<Family<'_>> = Vec::with_capacity(order.len());
        for token in order {
            match token {
                FamilyToken::Generic(family) => families.push(family),
                FamilyToken::Name(idx) => families.push(Family::Name(names[idx].as_str())),
            }
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: parse_weight(&style.font_weight),
            stretch: Stretch::Normal,
            style: parse_style(&style.font_style),
        };
        let id = self.db.query(&query)?;
        let mut loaded: Option<FontFace> = None;
        self.db.with_face_data(id, |data, index| {
            let bytes = data.to_vec();
            if let Ok(face) = Face::parse(&bytes, index) {
                let units_per_em = face.units_per_em().max(1);
                loaded = Some(FontFace::new(bytes, index, units_per_em));
            }
        });
        loaded
    }
}

struct FontFace {
    _data: Vec<u8>,
    _index: u32,
    units_per_em: u16,
    ascent_units: i16,
    descent_units: i16,
    face: Option<Face<'static>>,
    ascii_advances: Option<[u16; 128]>,
    glyph_cache: HashMap<char, Option<u16>>,
    advance_cache: HashMap<u16, u16>,
}

impl FontFace {
    fn new(data: Vec<u8>, index: u32, units_per_em: u16) -> Self {
        let face = Face::parse(&data, index)
            .ok()
            .map(|parsed| unsafe { std::mem::transmute::<Face<'_>, Face<'static>>(parsed) });
        let (ascent_units, descent_units) = face
            .as_ref()
            .map(|parsed| (parsed.ascender(), parsed.descender()))
            .unwrap_or((0, 0));
        let ascii_advances = face.as_ref().map(|parsed| {
            let mut advances = [0u16; 128];
            for byte in 0u8..=127 {
                let ch = byte as char;
                if let Some(glyph_id) = parsed.glyph_index(ch) {
                    advances[byte as usize] = parsed.glyph_hor_advance(glyph_id).unwrap_or(0);
                }
            }
            advances
        });
        Self {
            _data: data,
            _index: index,
            units_per_em,
            ascent_units,
            descent_units,
            face,
            ascii_advances,
            glyph_cache: HashMap::new(),
            advance_cache: HashMap::new(),
        }
    }

    fn line_extent(&self, font_size: f32) -> f32 {
        let scale = font_size / self.units_per_em as f32;
        (self.ascent_units as f32 - self.descent_units as f32) * scale
    }

    fn measure_width(&mut self, text: &str, font_size: f32) -> Option<f32> {
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * 0.56;

        if text.is_ascii()
            && let Some(advances) = &self.ascii_advances
        {
            let mut width = 0.0f32;
            for byte in text.as_bytes() {
                if *byte == b'\n' {
                    continue;
                }
                let advance = advances[*byte as usize];
                if advance == 0 {
                    width += fallback;
                } else {
                    width += advance as f32 * scale;
                }
            }
            return Some(width.max(0.0));
        }

        self.face.as_ref()?;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            match self.glyph_advance(ch) {
                Some(advance) => width += advance as f32 * scale,
                None => width += fallback,
            }
        }
        Some(width.max(0.0))
    }

    fn glyph_id(&mut self, ch: char) -> Option<u16> {
        if let Some(cached) = self.glyph_cache.get(&ch) {
            return *cached;
        }
        let glyph = self
            .face
            .as_ref()
            .and_then(|face| face.glyph_index(ch))
            .map(|id| id.0);
        self.glyph_cache.insert(ch, glyph);
        glyph
    }

    fn glyph_advance(&mut self, ch: char) -> Option<u16> {
        let glyph_id = self.glyph_id(ch)?;
        if let Some(cached) = self.advance_cache.get(&glyph_id) {
            return Some(*cached);
        }
        let advance = self
            .face
            .as_ref()
            .and_then(|face| face.glyph_hor_advance(GlyphId(glyph_id)))
            .unwrap_or(0);
        self.advance_cache.insert(glyph_id, advance);
        Some(advance)
    }

    fn outline_text(&mut self, text: &str, font_size: f32) -> Option<TextOutline> {
        self.face.as_ref()?;
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * 0.56;
        let mut builder = PathBuilder::new();
        let mut pen_x = 0.0f32;

        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let Some(glyph_id) = self.glyph_id(ch) else {
                pen_x += fallback;
                continue;
            };
            if let Some(face) = self.face.as_ref() {
                let mut sink = OutlineSink {
                    builder: &mut builder,
                    scale,
                    dx: pen_x,
                };
                face.outline_glyph(GlyphId(glyph_id), &mut sink);
            }
            let advance = self.glyph_advance(ch).unwrap_or(0);
            if advance == 0 {
                pen_x += fallback;
            } else {
                pen_x += advance as f32 * scale;
            }
        }

        let path = builder.finish()?;
        Some(TextOutline {
            path,
            width: pen_x.max(0.0),
            ascent: self.ascent_units as f32 * scale,
            descent: -(self.descent_units as f32) * scale,
        })
    }
}

/// Translates font-unit outlines (y up) into screen coordinates (y down)
/// while appending them to the shared path.
struct OutlineSink<'a> {
    builder: &'a mut PathBuilder,
    scale: f32,
    dx: f32,
}

impl OutlineBuilder for OutlineSink<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder
            .move_to(self.dx + x * self.scale, -y * self.scale);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder
            .line_to(self.dx + x * self.scale, -y * self.scale);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(
            self.dx + x1 * self.scale,
            -y1 * self.scale,
            self.dx + x * self.scale,
            -y * self.scale,
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.dx + x1 * self.scale,
            -y1 * self.scale,
            self.dx + x2 * self.scale,
            -y2 * self.scale,
            self.dx + x * self.scale,
            -y * self.scale,
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

fn face_key(style: &FontStyle) -> String {
    let family = style.font_family.trim();
    let family = if family.is_empty() {
        "sans-serif"
    } else {
        family
    };
    format!(
        "{family}|{}|{}",
        parse_weight(&style.font_weight).0,
        style.font_style.trim().to_ascii_lowercase()
    )
}

fn parse_weight(value: &str) -> Weight {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "normal" | "regular" => Weight::NORMAL,
        "bold" => Weight::BOLD,
        "bolder" => Weight::EXTRA_BOLD,
        "lighter" | "light" => Weight::LIGHT,
        other => other
            .parse::<u16>()
            .map(Weight)
            .unwrap_or(Weight::NORMAL),
    }
}

fn parse_style(value: &str) -> Style {
    match value.trim().to_ascii_lowercase().as_str() {
        "italic" => Style::Italic,
        "oblique" => Style::Oblique,
        _ => Style::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(weight: &str, slant: &str) -> FontStyle {
        FontStyle {
            font_size: 16.0,
            font_family: "sans-serif".to_string(),
            font_weight: weight.to_string(),
            font_style: slant.to_string(),
        }
    }

    #[test]
    fn empty_text_measures_zero() {
        let size = measure_text("", &style("", "")).expect("defined for empty input");
        assert_eq!(size, TextSize::ZERO);
    }

    #[test]
    fn zero_font_size_measures_zero() {
        let mut degenerate = style("", "");
        degenerate.font_size = 0.0;
        let size = measure_text("hello", &degenerate).expect("defined for zero size");
        assert_eq!(size, TextSize::ZERO);
    }

    #[test]
    fn weight_strings_map_to_fontdb_weights() {
        assert_eq!(parse_weight(""), Weight::NORMAL);
        assert_eq!(parse_weight("bold"), Weight::BOLD);
        assert_eq!(parse_weight("700"), Weight(700));
        assert_eq!(parse_weight("oddball"), Weight::NORMAL);
    }

    #[test]
    fn style_strings_map_to_fontdb_styles() {
        assert_eq!(parse_style("italic"), Style::Italic);
        assert_eq!(parse_style("oblique"), Style::Oblique);
        assert_eq!(parse_style(""), Style::Normal);
    }

    #[test]
    fn face_key_distinguishes_weight_and_style() {
        let normal = face_key(&style("", ""));
        let bold = face_key(&style("bold", ""));
        let italic = face_key(&style("", "italic"));
        assert_ne!(normal, bold);
        assert_ne!(normal, italic);
    }
}
