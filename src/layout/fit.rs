use crate::raster::Rasterizer;

use super::types::{BoundingRect, PlacedWord};

/// Rescales and recenters a finished cloud so it exactly fills the target
/// container on one axis while preserving the cloud's own aspect ratio.
///
/// Positions and font sizes scale uniformly. Each word's box is measured
/// again at the scaled font size instead of being multiplied, because text
/// bounding boxes do not scale linearly with font size. A final clamp pulls
/// words that stick out back inside the container; this can reintroduce a
/// small amount of overlap at the container edges, which is accepted.
pub fn fit_to_container(
    words: &mut [PlacedWord],
    bounds: BoundingRect,
    container_width: f32,
    container_height: f32,
    raster: &dyn Rasterizer,
) {
    if words.is_empty() {
        return;
    }
    let cloud_width = bounds.width();
    let cloud_height = bounds.height();
    if cloud_width <= 0.0 || cloud_height <= 0.0 {
        return;
    }

    let container_ratio = container_width / container_height;
    let cloud_ratio = cloud_width / cloud_height;

    // Pin the axis the cloud is relatively larger on; the other axis is
    // centered with margins.
    let (scaled_width, scaled_height) = if container_ratio > cloud_ratio {
        (cloud_ratio * container_height, container_height)
    } else {
        (container_width, container_width / cloud_ratio)
    };
    let scale = scaled_width / cloud_width;

    let scaled_left = bounds.left * scale;
    let scaled_top = bounds.top * scale;
    let (offset_x, offset_y) = if container_ratio > cloud_ratio {
        (
            -scaled_left + (container_width - scaled_width) / 2.0,
            -scaled_top,
        )
    } else {
        (
            -scaled_left,
            -scaled_top + (container_height - scaled_height) / 2.0,
        )
    };

    for word in words.iter_mut() {
        word.left = word.left * scale + offset_x;
        word.top = word.top * scale + offset_y;
        word.font_style.font_size *= scale;

        let rect = raster.bounding_rect(&word.text, &word.font_style, word.space, word.rotate);
        word.width = rect.width;
        word.height = rect.height;

        if word.left + word.width > container_width {
            word.left = container_width - word.width;
        }
        if word.top + word.height > container_height {
            word.top = container_height - word.height;
        }
    }
}
