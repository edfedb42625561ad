mod error;
mod fit;
mod occupancy;
mod placement;
pub(crate) mod types;

pub use error::CloudError;
pub use fit::fit_to_container;
pub use occupancy::OccupancyState;
pub use placement::find_position;
pub use types::*;

use std::cmp::Ordering;

use log::debug;

use crate::config::{CloudConfig, RotateType};
use crate::random::RandomSource;
use crate::raster::{FontRasterizer, Rasterizer};
use crate::worker::ComputeHost;

/// The layout engine. One instance carries the configuration and the
/// rasterization backend; every [`WordCloud::run`] builds its occupancy
/// state from scratch, so repeated runs never leak state into each other.
pub struct WordCloud {
    config: CloudConfig,
    raster: Box<dyn Rasterizer>,
}

impl WordCloud {
    /// Builds an engine with the font-based rasterizer. Configuration
    /// errors are reported here, before any layout work.
    pub fn new(config: CloudConfig) -> Result<Self, CloudError> {
        Self::with_rasterizer(config, Box::new(FontRasterizer))
    }

    pub fn with_rasterizer(
        config: CloudConfig,
        raster: Box<dyn Rasterizer>,
    ) -> Result<Self, CloudError> {
        config.validate()?;
        Ok(Self { config, raster })
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// Computes the full layout and returns the placed words in container
    /// coordinates.
    pub fn run(&self, words: &[WordSpec]) -> Result<Vec<PlacedWord>, CloudError> {
        let (mut placed, bounds) =
            compute_placements(words, &self.config, self.raster.as_ref())?;
        if let Some(bounds) = bounds {
            fit::fit_to_container(
                &mut placed,
                bounds,
                self.config.width,
                self.config.height,
                self.raster.as_ref(),
            );
        }
        Ok(placed)
    }

    /// Same result as [`WordCloud::run`], but occupancy tracking and the
    /// placement search live on a worker thread. One request per word, each
    /// awaited before the next is sent: placement i+1 depends on the state
    /// mutation of placement i, so the protocol is strictly serialized.
    pub fn run_offloaded(&self, words: &[WordSpec]) -> Result<Vec<PlacedWord>, CloudError> {
        let styled = style_words(words, &self.config);
        let host = ComputeHost::spawn();
        let mut placed = Vec::with_capacity(styled.len());
        for (index, word) in styled.into_iter().enumerate() {
            let mask = self
                .raster
                .rasterize(&word.text, &word.font_style, word.space, word.rotate);
            let (left, top) = if index == 0 {
                (0, 0)
            } else {
                match host.find_position(mask.clone(), self.config.width, self.config.height)? {
                    Some(position) => position,
                    None => {
                        return Err(CloudError::PlacementOverflow { word: word.text });
                    }
                }
            };
            let (mask_width, mask_height) = (mask.width, mask.height);
            host.add_mask(mask, left, top)?;
            placed.push(placed_word(word, left, top, mask_width, mask_height));
        }
        let bounds = host.bounding_rect()?;
        if let Some(bounds) = bounds {
            fit::fit_to_container(
                &mut placed,
                bounds,
                self.config.width,
                self.config.height,
                self.raster.as_ref(),
            );
        }
        Ok(placed)
    }
}

/// Places every word in cloud-local coordinates without the final fit.
///
/// The first word always lands at `(0, 0)` and fixes the anchor center;
/// every later word is rasterized, searched and stamped strictly in
/// sequence. Returns the placements together with the cloud's bounding
/// rect (`None` when nothing produced a visible mask).
pub fn compute_placements(
    words: &[WordSpec],
    config: &CloudConfig,
    raster: &dyn Rasterizer,
) -> Result<(Vec<PlacedWord>, Option<BoundingRect>), CloudError> {
    let styled = style_words(words, config);
    let mut state = OccupancyState::new();
    let mut placed = Vec::with_capacity(styled.len());
    for (index, word) in styled.into_iter().enumerate() {
        let mask = raster.rasterize(&word.text, &word.font_style, word.space, word.rotate);
        let (left, top) = if index == 0 {
            (0, 0)
        } else {
            match placement::find_position(&state, &mask, config.width, config.height) {
                Some(position) => position,
                None => {
                    return Err(CloudError::PlacementOverflow { word: word.text });
                }
            }
        };
        debug!(
            "placed {:?} at ({left}, {top}) with {} occupied pixels",
            word.text,
            mask.pixels.len()
        );
        state.add_mask(&mask, left, top);
        placed.push(placed_word(word, left, top, mask.width, mask.height));
    }
    Ok((placed, state.bounding_rect()))
}

fn placed_word(word: StyledWord, left: i32, top: i32, width: i32, height: i32) -> PlacedWord {
    PlacedWord {
        text: word.text,
        weight: word.weight,
        left: left as f32,
        top: top as f32,
        width: width as f32,
        height: height as f32,
        rotate: word.rotate,
        color: word.color,
        space: word.space,
        font_style: word.font_style,
    }
}

/// Sorts the input and resolves every word's style. Sorting is descending
/// by weight, ascending under `small_weight_in_center`, in which case the
/// size mapping flips too: the lightest word gets the largest font.
pub(crate) fn style_words(words: &[WordSpec], config: &CloudConfig) -> Vec<StyledWord> {
    let mut sorted: Vec<&WordSpec> = words.iter().collect();
    if config.small_weight_in_center {
        sorted.sort_by(|a, b| a.weight.partial_cmp(&b.weight).unwrap_or(Ordering::Equal));
    } else {
        sorted.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));
    }
    if sorted.is_empty() {
        return Vec::new();
    }

    let mut low = sorted[0].weight;
    let mut high = sorted[0].weight;
    for word in &sorted {
        low = low.min(word.weight);
        high = high.max(word.weight);
    }
    let (from, to) = if config.small_weight_in_center {
        (high, low)
    } else {
        (low, high)
    };

    let scale = config.resolved_font_size_scale();
    let mut rng = RandomSource::seeded(config.seed);
    sorted
        .into_iter()
        .map(|word| {
            let font_size = interpolate_font_size(
                word.weight,
                from,
                to,
                config.min_font_size,
                config.max_font_size,
            ) * scale;
            let rotate = match word.config.rotate {
                Some(rotate) => rotate,
                None => create_rotate(config.rotate_type, &mut rng),
            };
            let color = word
                .config
                .color
                .clone()
                .or_else(|| rng.pick(&config.color_list).map(|color| color.to_string()))
                .unwrap_or_else(|| "#333333".to_string());
            StyledWord {
                text: word.text.clone(),
                weight: word.weight,
                font_style: FontStyle {
                    font_size,
                    font_family: word
                        .config
                        .font_family
                        .clone()
                        .unwrap_or_else(|| config.font_family.clone()),
                    font_weight: word
                        .config
                        .font_weight
                        .clone()
                        .unwrap_or_else(|| config.font_weight.clone()),
                    font_style: word
                        .config
                        .font_style
                        .clone()
                        .unwrap_or_else(|| config.font_style.clone()),
                },
                space: word.config.space.unwrap_or(config.space),
                rotate,
                color,
            }
        })
        .collect()
}

/// Linear weight-to-size interpolation. A zero weight range degenerates to
/// fraction 0, so every word gets `min_size` instead of dividing by zero.
fn interpolate_font_size(weight: f32, from: f32, to: f32, min_size: f32, max_size: f32) -> f32 {
    let range = to - from;
    let fraction = if range == 0.0 {
        0.0
    } else {
        (weight - from) / range
    };
    min_size + fraction * (max_size - min_size)
}

fn create_rotate(rotate_type: RotateType, rng: &mut RandomSource) -> f32 {
    match rotate_type {
        RotateType::None => 0.0,
        RotateType::Cross => {
            if rng.unit() > 0.5 {
                -90.0
            } else {
                0.0
            }
        }
        RotateType::Oblique => -45.0,
        RotateType::Random => rng.range(-90.0, 90.0).floor(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CloudConfig {
        CloudConfig {
            font_size_scale: 1.0,
            ..CloudConfig::default()
        }
    }

    #[test]
    fn interpolation_covers_the_size_range() {
        assert_eq!(interpolate_font_size(1.0, 1.0, 10.0, 12.0, 40.0), 12.0);
        assert_eq!(interpolate_font_size(10.0, 1.0, 10.0, 12.0, 40.0), 40.0);
        let mid = interpolate_font_size(5.5, 1.0, 10.0, 12.0, 40.0);
        assert!((mid - 26.0).abs() < 1e-4);
    }

    #[test]
    fn zero_weight_range_degenerates_to_min_size() {
        assert_eq!(interpolate_font_size(7.0, 7.0, 7.0, 12.0, 40.0), 12.0);
    }

    #[test]
    fn words_are_sorted_by_descending_weight() {
        let words = vec![
            WordSpec::new("small", 1.0),
            WordSpec::new("big", 10.0),
            WordSpec::new("mid", 5.0),
        ];
        let styled = style_words(&words, &config());
        let order: Vec<&str> = styled.iter().map(|word| word.text.as_str()).collect();
        assert_eq!(order, vec!["big", "mid", "small"]);
    }

    #[test]
    fn small_weight_in_center_flips_order_and_mapping() {
        let words = vec![WordSpec::new("small", 1.0), WordSpec::new("big", 10.0)];
        let cfg = CloudConfig {
            small_weight_in_center: true,
            ..config()
        };
        let styled = style_words(&words, &cfg);
        assert_eq!(styled[0].text, "small");
        assert_eq!(styled[0].font_style.font_size, cfg.max_font_size);
        assert_eq!(styled[1].font_style.font_size, cfg.min_font_size);
    }

    #[test]
    fn explicit_rotate_overrides_the_policy() {
        let mut word = WordSpec::new("w", 1.0);
        word.config.rotate = Some(33.0);
        let cfg = CloudConfig {
            rotate_type: RotateType::Oblique,
            ..config()
        };
        let styled = style_words(&[word], &cfg);
        assert_eq!(styled[0].rotate, 33.0);
    }

    #[test]
    fn rotate_policies_produce_expected_angles() {
        let mut rng = RandomSource::seeded(5);
        assert_eq!(create_rotate(RotateType::None, &mut rng), 0.0);
        assert_eq!(create_rotate(RotateType::Oblique, &mut rng), -45.0);
        for _ in 0..100 {
            let cross = create_rotate(RotateType::Cross, &mut rng);
            assert!(cross == 0.0 || cross == -90.0);
            let random = create_rotate(RotateType::Random, &mut rng);
            assert!((-90.0..90.0).contains(&random));
            assert_eq!(random, random.floor());
        }
    }

    #[test]
    fn per_word_style_overrides_win() {
        let mut word = WordSpec::new("w", 1.0);
        word.config.color = Some("#123456".to_string());
        word.config.font_family = Some("serif".to_string());
        word.config.space = Some(0.5);
        let styled = style_words(&[word], &config());
        assert_eq!(styled[0].color, "#123456");
        assert_eq!(styled[0].font_style.font_family, "serif");
        assert_eq!(styled[0].space, 0.5);
    }

    #[test]
    fn colors_come_from_the_configured_list() {
        let cfg = CloudConfig {
            color_list: vec!["#abcdef".to_string()],
            ..config()
        };
        let styled = style_words(&[WordSpec::new("w", 1.0)], &cfg);
        assert_eq!(styled[0].color, "#abcdef");
    }
}
