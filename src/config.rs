use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::layout::CloudError;

/// Default word palette.
const DEFAULT_COLOR_LIST: [&str; 13] = [
    "#326BFF", "#5C27FE", "#C165DD", "#FACD68", "#FC76B3", "#1DE5E2", "#B588F7", "#08C792",
    "#FF7B02", "#3bc4c7", "#3a9eea", "#461e47", "#ff4e69",
];

/// Rotation policy applied to words without an explicit per-word angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateType {
    /// No rotation.
    #[default]
    None,
    /// Either upright or -90 degrees, chosen per word.
    Cross,
    /// Always -45 degrees.
    Oblique,
    /// Whole-degree angle in [-90, 90), chosen per word.
    Random,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Target container size the finished cloud is fitted into.
    pub width: f32,
    pub height: f32,
    pub min_font_size: f32,
    pub max_font_size: f32,
    pub font_family: String,
    pub font_weight: String,
    pub font_style: String,
    /// Global shrink factor applied before layout; smaller masks search
    /// faster and the fit step scales everything back up. Values `<= 0`
    /// resolve to `1 / min_font_size`.
    pub font_size_scale: f32,
    pub rotate_type: RotateType,
    /// Padding between words as a fraction of each word's font size.
    pub space: f32,
    pub color_list: Vec<String>,
    /// Place light words centrally instead of heavy ones; also mirrors the
    /// weight-to-size mapping.
    pub small_weight_in_center: bool,
    /// Seed for rotation and color choices.
    pub seed: u32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            min_font_size: 12.0,
            max_font_size: 40.0,
            font_family: "sans-serif".to_string(),
            font_weight: String::new(),
            font_style: String::new(),
            font_size_scale: 0.0,
            rotate_type: RotateType::None,
            space: 0.0,
            color_list: DEFAULT_COLOR_LIST
                .iter()
                .map(|color| color.to_string())
                .collect(),
            small_weight_in_center: false,
            seed: 0,
        }
    }
}

impl CloudConfig {
    /// Fail-fast validation, run before any layout work starts.
    pub fn validate(&self) -> Result<(), CloudError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(CloudError::InvalidContainer {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_font_size < self.min_font_size {
            return Err(CloudError::FontSizeRange {
                min: self.min_font_size,
                max: self.max_font_size,
            });
        }
        Ok(())
    }

    pub fn resolved_font_size_scale(&self) -> f32 {
        if self.font_size_scale > 0.0 {
            self.font_size_scale
        } else {
            1.0 / self.min_font_size.max(1.0)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub cloud: CloudConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    min_font_size: Option<f32>,
    max_font_size: Option<f32>,
    font_family: Option<String>,
    font_weight: Option<String>,
    font_style: Option<String>,
    font_size_scale: Option<f32>,
    rotate_type: Option<RotateType>,
    space: Option<f32>,
    color_list: Option<Vec<String>>,
    small_weight_in_center: Option<bool>,
    seed: Option<u32>,
    background: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(value) = parsed.width {
        config.cloud.width = value;
    }
    if let Some(value) = parsed.height {
        config.cloud.height = value;
    }
    if let Some(value) = parsed.min_font_size {
        config.cloud.min_font_size = value;
    }
    if let Some(value) = parsed.max_font_size {
        config.cloud.max_font_size = value;
    }
    if let Some(value) = parsed.font_family {
        config.cloud.font_family = value;
    }
    if let Some(value) = parsed.font_weight {
        config.cloud.font_weight = value;
    }
    if let Some(value) = parsed.font_style {
        config.cloud.font_style = value;
    }
    if let Some(value) = parsed.font_size_scale {
        config.cloud.font_size_scale = value;
    }
    if let Some(value) = parsed.rotate_type {
        config.cloud.rotate_type = value;
    }
    if let Some(value) = parsed.space {
        config.cloud.space = value;
    }
    if let Some(value) = parsed.color_list {
        config.cloud.color_list = value;
    }
    if let Some(value) = parsed.small_weight_in_center {
        config.cloud.small_weight_in_center = value;
    }
    if let Some(value) = parsed.seed {
        config.cloud.seed = value;
    }
    if let Some(value) = parsed.background {
        config.render.background = value;
    }

    Ok(config)
}
