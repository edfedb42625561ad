use std::collections::HashSet;

use super::types::{BoundingRect, GlyphMask};

/// Mutable global state of one layout run: every pixel occupied so far,
/// the running bounding box of the whole cloud, and the anchor center all
/// spiral searches are measured from. Owned by a single run; a fresh run
/// needs a fresh state or an explicit [`OccupancyState::reset`].
#[derive(Debug, Default)]
pub struct OccupancyState {
    occupied: HashSet<(i32, i32)>,
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
    bounded: bool,
    anchor: Option<(i32, i32)>,
}

impl OccupancyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Stamps every occupied pixel of `mask`, offset by `(left, top)`, and
    /// extends the bounding box by the mask's full rectangle (not just its
    /// occupied pixels, so the fit step sees allocated extents).
    ///
    /// The first call of a run additionally fixes the anchor center to the
    /// mask's own center.
    pub fn add_mask(&mut self, mask: &GlyphMask, left: i32, top: i32) {
        for &(x, y) in &mask.pixels {
            self.occupied.insert((x + left, y + top));
        }
        if mask.width > 0 && mask.height > 0 {
            if self.bounded {
                self.min_x = self.min_x.min(left);
                self.max_x = self.max_x.max(left + mask.width);
                self.min_y = self.min_y.min(top);
                self.max_y = self.max_y.max(top + mask.height);
            } else {
                self.min_x = left;
                self.max_x = left + mask.width;
                self.min_y = top;
                self.max_y = top + mask.height;
                self.bounded = true;
            }
        }
        if self.anchor.is_none() {
            self.anchor = Some((mask.width / 2, mask.height / 2));
        }
    }

    pub fn anchor(&self) -> Option<(i32, i32)> {
        self.anchor
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.occupied.contains(&(x, y))
    }

    /// Exact, pixel-granular collision test: the candidate cell itself must
    /// be free and so must every translated pixel of the mask.
    pub fn fits(&self, mask: &GlyphMask, left: i32, top: i32) -> bool {
        if self.occupied.contains(&(left, top)) {
            return false;
        }
        mask.pixels
            .iter()
            .all(|&(x, y)| !self.occupied.contains(&(x + left, y + top)))
    }

    pub fn bounding_rect(&self) -> Option<BoundingRect> {
        if !self.bounded {
            return None;
        }
        Some(BoundingRect {
            left: self.min_x as f32,
            right: self.max_x as f32,
            top: self.min_y as f32,
            bottom: self.max_y as f32,
        })
    }
}
