//! Trapezoid tiles: a triangle's lower half under a raw 32x16 block

use crate::buffer::Surface;
use crate::clip::{clip_row, Clip, Regime};
use crate::light::{Light, Lut};
use crate::mask::{render_line, MaskKind};
use crate::triangle::{diamond_clip_y, render_lower_half};
use crate::{LOWER_HEIGHT, TRAPEZOID_UPPER_HEIGHT, WIDTH};

/// Left (`LEFT`) or right trapezoid
///
/// The lower half is uniformly opaque or blended. The mask prefix of
/// the upper half continues from row 16 of the tile, so clipped rows
/// keep their diagonal.
pub fn render_trapezoid<L: Light, M: MaskKind, R: Regime, const LEFT: bool>(out: &mut Surface, origin: isize, src: &[u8], lut: &Lut, clip: &Clip) {
    let clip_y = diamond_clip_y::<R>(clip, TRAPEZOID_UPPER_HEIGHT);
    let upper = render_lower_half::<L, R, LEFT>(out, origin, src, lut, clip, &clip_y, !M::LOWER_HALF_TRANSPARENT);

    let pitch = out.pitch as isize;
    for i in clip_y.upper_bottom .. TRAPEZOID_UPPER_HEIGHT - clip_y.upper_top {
        let r = LOWER_HEIGHT + i;
        let pos = upper + (i * WIDTH) as usize;
        let line = &src[pos .. pos + WIDTH as usize];
        let prefix = M::init_prefix(r);
        clip_row::<R, _>(out, origin - r as isize * pitch, 0, line, clip, |dst, src, x| {
            render_line::<L, M>(dst, src, lut, prefix - x)
        });
    }
}
