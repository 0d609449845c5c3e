//! Triangle tiles
//!
//! A triangle is the left or right half of a 64x31 diamond. The lower
//! half grows by `XSTEP` pixels per row up to the full width, the upper
//! half shrinks again. Odd rows (1-based within each half) carry two
//! padding bytes; a left triangle stores them before the row, a right
//! triangle after it.

use crate::buffer::Surface;
use crate::clip::{calculate_diamond_clip_y, clip_row, Clip, DiamondClipY, Regime};
use crate::light::{Light, Lut};
use crate::mask::{render_line_uniform, MaskKind};
use crate::tile::{triangle_lower_skip, triangle_upper_skip};
use crate::{LOWER_HEIGHT, TRIANGLE_UPPER_HEIGHT, WIDTH, XSTEP};

pub(crate) fn diamond_clip_y<R: Regime>(clip: &Clip, upper_height: i32) -> DiamondClipY {
    if R::CLIPS_Y {
        calculate_diamond_clip_y(clip, upper_height)
    } else {
        DiamondClipY::default()
    }
}

/// Lower half of a triangle or trapezoid, drawn uniformly
///
/// Returns the source offset just past the lower half.
pub(crate) fn render_lower_half<L: Light, R: Regime, const LEFT: bool>(out: &mut Surface, origin: isize, src: &[u8], lut: &Lut, clip: &Clip, clip_y: &DiamondClipY, opaque: bool) -> usize {
    let pitch = out.pitch as isize;
    let mut pos = triangle_lower_skip(clip_y.lower_bottom);
    for i in 1 + clip_y.lower_bottom ..= LOWER_HEIGHT - clip_y.lower_top {
        let pad = (2 * (i % 2)) as usize;
        let width = XSTEP * i;
        if LEFT {
            pos += pad;
        }
        let start = if LEFT { WIDTH - width } else { 0 };
        let line = &src[pos .. pos + width as usize];
        let row = origin - (i - 1) as isize * pitch;
        clip_row::<R, _>(out, row, start, line, clip, |dst, src, _| {
            render_line_uniform::<L>(dst, src, lut, opaque)
        });
        pos += width as usize;
        if !LEFT {
            pos += pad;
        }
    }
    triangle_lower_skip(LOWER_HEIGHT)
}

/// Left (`LEFT`) or right triangle
///
/// `src` holds at least `TileType::LeftTriangle.source_len()` bytes.
/// Only uniform masks apply to triangles.
pub fn render_triangle<L: Light, M: MaskKind, R: Regime, const LEFT: bool>(out: &mut Surface, origin: isize, src: &[u8], lut: &Lut, clip: &Clip) {
    let clip_y = diamond_clip_y::<R>(clip, TRIANGLE_UPPER_HEIGHT);
    let upper = render_lower_half::<L, R, LEFT>(out, origin, src, lut, clip, &clip_y, !M::LOWER_HALF_TRANSPARENT);

    let pitch = out.pitch as isize;
    let opaque = !M::OPAQUE_PREFIX;
    let mut pos = upper + triangle_upper_skip(clip_y.upper_bottom);
    for i in 1 + clip_y.upper_bottom ..= TRIANGLE_UPPER_HEIGHT - clip_y.upper_top {
        let pad = (2 * (i % 2)) as usize;
        let width = WIDTH - XSTEP * i;
        if LEFT {
            pos += pad;
        }
        let start = if LEFT { XSTEP * i } else { 0 };
        let line = &src[pos .. pos + width as usize];
        let row = origin - (LOWER_HEIGHT + i - 1) as isize * pitch;
        clip_row::<R, _>(out, row, start, line, clip, |dst, src, _| {
            render_line_uniform::<L>(dst, src, lut, opaque)
        });
        pos += width as usize;
        if !LEFT {
            pos += pad;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{calculate_clip, ClipVertical, Unclipped};
    use crate::light::{FullyLit, TransparencyTable};
    use crate::mask::SolidMask;
    use crate::rle::{encode_tile, TileImage};
    use crate::tile::TileType;

    fn draw<R: Regime, const LEFT: bool>(out: &mut Surface, x: i32, y: i32, src: &[u8]) {
        let light = [0u8; 256];
        let trn = TransparencyTable::from_fn(|_, fg| fg);
        let lut = Lut { light: &light, trn: &trn, debug_color: 0 };
        let clip = calculate_clip(x, y, 32, 31, out.width as i32, out.height as i32);
        let origin = out.offset(x, y);
        render_triangle::<FullyLit, SolidMask, R, LEFT>(out, origin, src, &lut, &clip);
    }

    #[test]
    fn left_triangle_shape() {
        let img = TileImage::from_fn(TileType::LeftTriangle, |_, r| Some(r as u8 + 1));
        let src = encode_tile(&img);
        let mut out = Surface::new(32, 31);
        draw::<Unclipped, true>(&mut out, 0, 30, &src);
        // bottom row: two pixels on the right
        assert_eq!(&out.row(30)[28 ..], &[0, 0, 1, 1]);
        // widest row
        assert!(out.row(15).iter().all(|&v| v == 16));
        // top row
        assert_eq!(&out.row(0)[28 ..], &[0, 0, 31, 31]);
        assert_eq!(out.row(0)[27], 0);
    }

    #[test]
    fn right_triangle_clipped_at_the_bottom() {
        let img = TileImage::from_fn(TileType::RightTriangle, |_, r| Some(r as u8 + 1));
        let src = encode_tile(&img);
        let mut out = Surface::new(32, 20);
        // 20 rows cut off below the surface
        draw::<ClipVertical, false>(&mut out, 0, 39, &src);
        assert_eq!(&out.row(19)[.. 22], &[21; 22][..]);
        assert_eq!(out.row(19)[22], 0);
        assert_eq!(&out.row(9)[.. 3], &[31, 31, 0]);
        assert_eq!(out.row(8).iter().filter(|&&v| v != 0).count(), 0);
    }
}
