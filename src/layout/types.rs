use serde::{Deserialize, Serialize};

/// Per-word overrides carried alongside the raw input tuple. Every field
/// falls back to the engine-level configuration when absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordConfig {
    pub rotate: Option<f32>,
    pub space: Option<f32>,
    pub color: Option<String>,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub font_style: Option<String>,
}

/// Raw caller input: a text with a numeric importance.
#[derive(Debug, Clone, PartialEq)]
pub struct WordSpec {
    pub text: String,
    pub weight: f32,
    pub config: WordConfig,
}

impl WordSpec {
    pub fn new(text: impl Into<String>, weight: f32) -> Self {
        Self {
            text: text.into(),
            weight,
            config: WordConfig::default(),
        }
    }

    pub fn with_config(text: impl Into<String>, weight: f32, config: WordConfig) -> Self {
        Self {
            text: text.into(),
            weight,
            config,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontStyle {
    pub font_size: f32,
    pub font_family: String,
    pub font_weight: String,
    pub font_style: String,
}

/// A word after sorting and style resolution, ready for rasterization.
#[derive(Debug, Clone)]
pub struct StyledWord {
    pub text: String,
    pub weight: f32,
    pub font_style: FontStyle,
    pub space: f32,
    pub rotate: f32,
    pub color: String,
}

/// Binary occupancy mask of one rendered word. `pixels` holds offsets
/// relative to the mask's own top-left corner; `width`/`height` already
/// include rotation and padding expansion. Immutable after creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphMask {
    pub width: i32,
    pub height: i32,
    pub pixels: Vec<(i32, i32)>,
}

impl GlyphMask {
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// A laid-out word. Coordinates are cloud-local after placement and get
/// rewritten to container coordinates by the fit transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedWord {
    pub text: String,
    pub weight: f32,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub rotate: f32,
    pub color: String,
    pub space: f32,
    pub font_style: FontStyle,
}

/// Union extent of everything placed so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl BoundingRect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

impl TextSize {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };
}
