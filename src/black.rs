//! Single color diamond tiles
//!
//! Fills a full 64x31 diamond with one palette index, without lighting
//! or blending. Used for the black void around the map.

use crate::buffer::Surface;
use crate::clip::{calculate_clip, visible_span, Clip, ClipLeftAndVertical, ClipRegime, ClipRightAndVertical, ClipVertical, Regime, Unclipped};
use crate::triangle::diamond_clip_y;
use crate::{LOWER_HEIGHT, TILE_WIDTH, TRIANGLE_HEIGHT, TRIANGLE_UPPER_HEIGHT, XSTEP};

/// Columns `(start, width)` of row `r` (from the bottom) of the diamond
pub fn diamond_row_span(r: i32) -> (i32, i32) {
    if r < LOWER_HEIGHT {
        let i = r + 1;
        (TILE_WIDTH / 2 - XSTEP * i, 2 * XSTEP * i)
    } else {
        let i = r - LOWER_HEIGHT + 1;
        (XSTEP * i, TILE_WIDTH - 2 * XSTEP * i)
    }
}

fn fill_diamond<R: Regime>(out: &mut Surface, origin: isize, clip: &Clip, color: u8) {
    let clip_y = diamond_clip_y::<R>(clip, TRIANGLE_UPPER_HEIGHT);
    let pitch = out.pitch as isize;
    let lower = clip_y.lower_bottom .. LOWER_HEIGHT - clip_y.lower_top;
    let upper = LOWER_HEIGHT + clip_y.upper_bottom .. TRIANGLE_HEIGHT - clip_y.upper_top;
    for r in lower.chain(upper) {
        let (start, width) = diamond_row_span(r);
        let (skip, len) = visible_span::<R>(start, width, TILE_WIDTH, clip);
        if len <= 0 {
            continue;
        }
        let off = origin - r as isize * pitch + (start + skip) as isize;
        out.span_mut(off, len).iter_mut().for_each(|d| *d = color);
    }
}

/// Fill the 64x31 diamond whose left corner is column `sx` and bottom row `sy`
pub fn render_single_color_tile(out: &mut Surface, sx: i32, sy: i32, color: u8) {
    let clip = calculate_clip(sx, sy, TILE_WIDTH, TRIANGLE_HEIGHT, out.width as i32, out.height as i32);
    if clip.is_empty() {
        return;
    }
    let origin = out.offset(sx, sy);
    match ClipRegime::select(&clip) {
        ClipRegime::Full => fill_diamond::<Unclipped>(out, origin, &clip, color),
        ClipRegime::Vertical => fill_diamond::<ClipVertical>(out, origin, &clip, color),
        ClipRegime::LeftAndVertical => fill_diamond::<ClipLeftAndVertical>(out, origin, &clip, color),
        ClipRegime::RightAndVertical => fill_diamond::<ClipRightAndVertical>(out, origin, &clip, color),
    }
}

/// [render_single_color_tile](fn.render_single_color_tile.html) with index 0
pub fn render_black_tile(out: &mut Surface, sx: i32, sy: i32) {
    render_single_color_tile(out, sx, sy, 0);
}
