//! Square tiles
//!
//! `origin` is the surface offset of the tile's bottom-left pixel. Rows
//! are read bottom first and written upwards from there.

use crate::buffer::Surface;
use crate::clip::{clip_row, Clip, Regime};
use crate::error::{RenderError, Result};
use crate::light::{Light, Lut};
use crate::mask::{render_line, MaskKind};
use crate::rle::{Run, RunReader};
use crate::{HEIGHT, WIDTH};

/// Raw 32x32 square
///
/// `src` holds at least `WIDTH * HEIGHT` bytes.
pub fn render_square<L: Light, M: MaskKind, R: Regime>(out: &mut Surface, origin: isize, src: &[u8], lut: &Lut, clip: &Clip) {
    let pitch = out.pitch as isize;
    for r in 0 .. HEIGHT {
        if !R::row_visible(r, HEIGHT, clip) {
            continue;
        }
        let prefix = M::init_prefix(r);
        let line = &src[(r * WIDTH) as usize .. ((r + 1) * WIDTH) as usize];
        clip_row::<R, _>(out, origin - r as isize * pitch, 0, line, clip, |dst, src, x| {
            render_line::<L, M>(dst, src, lut, prefix - x)
        });
    }
}

/// Run length encoded 32x32 square
///
/// Runs that cross a clipped edge are drawn in part. Fails on a run
/// that crosses the end of its row or on a stream that ends early.
pub fn render_transparent_square<L: Light, M: MaskKind, R: Regime>(out: &mut Surface, origin: isize, src: &[u8], lut: &Lut, clip: &Clip) -> Result<()> {
    let pitch = out.pitch as isize;
    let mut reader = RunReader::new(src);
    let last = if R::CLIPS_Y { HEIGHT - clip.top } else { HEIGHT };
    for r in 0 .. last {
        if R::CLIPS_Y && r < clip.bottom {
            reader.skip_line(WIDTH, r)?;
            continue;
        }
        let row = origin - r as isize * pitch;
        let prefix = M::init_prefix(r);
        let mut x = 0;
        while x < WIDTH {
            let run = reader.next_run()?;
            let n = run.len();
            if x + n > WIDTH {
                return Err(RenderError::RleOverrun { row: r, width: WIDTH, got: x + n });
            }
            if let Run::Pixels(p) = run {
                clip_row::<R, _>(out, row, x, p, clip, |dst, src, col| {
                    render_line::<L, M>(dst, src, lut, prefix - col)
                });
            }
            x += n;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{calculate_clip, ClipLeftAndVertical, Unclipped};
    use crate::light::{FullyLit, TransparencyTable};
    use crate::mask::{LeftFoliageMask, SolidMask};
    use crate::rle::{encode_tile, TileImage};
    use crate::tile::TileType;

    fn tables() -> ([u8; 256], TransparencyTable) {
        ([0u8; 256], TransparencyTable::from_fn(|bg, fg| bg ^ fg))
    }

    #[test]
    fn square_is_copied_upwards() {
        let (light, trn) = tables();
        let lut = Lut { light: &light, trn: &trn, debug_color: 0 };
        let src: Vec<u8> = (0 .. 1024).map(|i| (i / 32) as u8).collect();
        let mut out = Surface::new(40, 40);
        let origin = out.offset(4, 35);
        let clip = calculate_clip(4, 35, 32, 32, 40, 40);
        render_square::<FullyLit, SolidMask, Unclipped>(&mut out, origin, &src, &lut, &clip);
        assert_eq!(out[(4, 35)], 0);
        assert_eq!(out[(35, 4)], 31);
        assert_eq!(out[(3, 20)], 0);
        assert_eq!(out[(10, 20)], 15);
    }

    #[test]
    fn overshooting_run_is_cut() {
        let (light, trn) = tables();
        let lut = Lut { light: &light, trn: &trn, debug_color: 0 };
        let img = TileImage::filled(TileType::TransparentSquare, 5);
        let src = encode_tile(&img);
        let mut out = Surface::new(20, 40);
        let clip = calculate_clip(-10, 31, 32, 32, 20, 40);
        let origin = out.offset(-10, 31);
        render_transparent_square::<FullyLit, SolidMask, ClipLeftAndVertical>(&mut out, origin, &src, &lut, &clip).unwrap();
        assert!(out.row(0).iter().all(|&v| v == 5));
        assert!(out.row(31).iter().all(|&v| v == 5));
        assert!(out.row(32).iter().all(|&v| v == 0));
    }

    #[test]
    fn foliage_skips_lower_half() {
        let (light, trn) = tables();
        let lut = Lut { light: &light, trn: &trn, debug_color: 0 };
        let src = encode_tile(&TileImage::filled(TileType::TransparentSquare, 5));
        let mut out = Surface::new(32, 32);
        out.fill(1);
        let clip = calculate_clip(0, 31, 32, 32, 32, 32);
        let origin = out.offset(0, 31);
        render_transparent_square::<FullyLit, LeftFoliageMask, Unclipped>(&mut out, origin, &src, &lut, &clip).unwrap();
        // row 17 from the bottom has a prefix of 2
        assert_eq!(&out.row(31 - 17)[.. 3], &[5, 5, 1]);
        assert!(out.row(31 - 15).iter().all(|&v| v == 1));
        assert_eq!(out.row(0)[29], 5);
        assert_eq!(out.row(0)[30], 1);
    }

    #[test]
    fn overrun_is_an_error() {
        let (light, trn) = tables();
        let lut = Lut { light: &light, trn: &trn, debug_color: 0 };
        let mut src = vec![20u8];
        src.extend(vec![1u8; 20]);
        src.push(20);
        src.extend(vec![1u8; 20]);
        let mut out = Surface::new(32, 32);
        let clip = calculate_clip(0, 31, 32, 32, 32, 32);
        let origin = out.offset(0, 31);
        let err = render_transparent_square::<FullyLit, SolidMask, Unclipped>(&mut out, origin, &src, &lut, &clip);
        assert!(matches!(err, Err(RenderError::RleOverrun { row: 0, width: 32, got: 40 })));
    }
}
