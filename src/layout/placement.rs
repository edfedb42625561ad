use super::occupancy::OccupancyState;
use super::types::GlyphMask;

/// Ring expansion limit relative to the container's longer side. Beyond it
/// the search reports overflow instead of spiralling forever.
const MAX_RING_FACTOR: f32 = 10.0;

/// Finds the position closest to the anchor center where `mask` does not
/// intersect anything already stamped into `state`.
///
/// The search expands rectangular rings outwards from the anchor. Step
/// sizes are biased by the container aspect ratio (1 on the longer axis,
/// shorter/longer on the other) so the cloud elongates to match the
/// container instead of growing circular. Candidates on each ring are
/// scanned in a fixed order: right edge top to bottom, bottom edge right
/// to left, left edge bottom to top, top edge left to right. The first
/// candidate that fits wins; there is no nearest-distance tie-break.
///
/// Returns `None` once the ring budget is exhausted.
pub fn find_position(
    state: &OccupancyState,
    mask: &GlyphMask,
    container_width: f32,
    container_height: f32,
) -> Option<(i32, i32)> {
    let (anchor_x, anchor_y) = state.anchor().unwrap_or((0, 0));

    let (step_left, step_top) = if container_width > container_height {
        (1.0, container_height / container_width)
    } else if container_height > container_width {
        (container_width / container_height, 1.0)
    } else {
        (1.0, 1.0)
    };

    if state.fits(mask, anchor_x, anchor_y) {
        return Some((anchor_x, anchor_y));
    }

    let mut start_x = anchor_x as f32;
    let mut end_x = anchor_x as f32;
    let mut start_y = anchor_y as f32;
    let mut end_y = anchor_y as f32;
    let max_rings = (container_width.max(container_height) * MAX_RING_FACTOR).ceil() as u32;

    for _ in 0..max_rings {
        start_x -= step_left;
        end_x += step_left;
        start_y -= step_top;
        end_y += step_top;

        let cur_start_x = start_x.floor() as i32;
        let cur_start_y = start_y.floor() as i32;
        let cur_end_x = end_x.floor() as i32;
        let cur_end_y = end_y.floor() as i32;

        // Right edge, top to bottom.
        for top in cur_start_y..cur_end_y {
            if state.fits(mask, cur_end_x, top) {
                return Some((cur_end_x, top));
            }
        }
        // Bottom edge, right to left.
        for left in (cur_start_x + 1..=cur_end_x).rev() {
            if state.fits(mask, left, cur_end_y) {
                return Some((left, cur_end_y));
            }
        }
        // Left edge, bottom to top.
        for top in (cur_start_y + 1..=cur_end_y).rev() {
            if state.fits(mask, cur_start_x, top) {
                return Some((cur_start_x, top));
            }
        }
        // Top edge, left to right.
        for left in cur_start_x..cur_end_x {
            if state.fits(mask, left, cur_start_y) {
                return Some((left, cur_start_y));
            }
        }
    }

    None
}
