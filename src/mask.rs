//! Masks
//!
//! A mask splits every row of a tile into an opaque part and a blended
//! part (or, for foliage, a part that is not drawn at all). The split
//! point of row `y`, counted from the bottom of the tile, is its
//! *prefix*:
//!
//! ```text
//! prefix(y) = init + PREFIX_INCREMENT * y
//! init      = -32 if PREFIX_INCREMENT >= 0 else 64
//! ```
//!
//! With `OPAQUE_PREFIX` the first `prefix` pixels of the row are opaque,
//! otherwise the pixels from `prefix` onwards are. A zero increment
//! makes the whole tile uniform.

use crate::light::{Light, Lut};
use crate::tile::MaskType;
use crate::WIDTH;

/// Compile-time description of a mask
pub trait MaskKind {
    /// The row starts with opaque pixels
    const OPAQUE_PREFIX: bool;
    /// Change of the prefix from one row to the row above
    const PREFIX_INCREMENT: i8;
    /// Pixels that are not opaque are skipped rather than blended
    const IS_FOLIAGE: bool =
        Self::PREFIX_INCREMENT != 0 && Self::OPAQUE_PREFIX == (Self::PREFIX_INCREMENT > 0);
    /// The lower 16 rows are entirely non-opaque
    const LOWER_HALF_TRANSPARENT: bool = Self::OPAQUE_PREFIX == (Self::PREFIX_INCREMENT >= 0);
    const MASK_TYPE: MaskType;

    /// Prefix of row `y` (from the bottom)
    #[inline]
    fn init_prefix(y: i32) -> i32 {
        let inc = Self::PREFIX_INCREMENT as i32;
        let init = if inc >= 0 { -WIDTH } else { 2 * WIDTH };
        init + inc * y
    }
    /// Whether column `x` of a row with the given prefix is opaque
    #[inline]
    fn is_opaque(x: i32, prefix: i32) -> bool {
        if Self::OPAQUE_PREFIX { x < prefix } else { x >= prefix }
    }
}

/// Mask with a compile-time opaque prefix flag and prefix increment
#[derive(Debug,Default,Copy,Clone)]
pub struct Mask<const OPAQUE_PREFIX: bool, const PREFIX_INCREMENT: i8>;

pub type SolidMask = Mask<false, 0>;
pub type TransparentMask = Mask<true, 0>;
pub type LeftMask = Mask<false, 2>;
pub type RightMask = Mask<true, -2>;
pub type LeftFoliageMask = Mask<true, 2>;
pub type RightFoliageMask = Mask<false, -2>;

impl<const OPAQUE_PREFIX: bool, const PREFIX_INCREMENT: i8> MaskKind for Mask<OPAQUE_PREFIX, PREFIX_INCREMENT> {
    const OPAQUE_PREFIX: bool = OPAQUE_PREFIX;
    const PREFIX_INCREMENT: i8 = PREFIX_INCREMENT;
    const MASK_TYPE: MaskType = match (OPAQUE_PREFIX, PREFIX_INCREMENT) {
        (false, 0) => MaskType::Solid,
        (true, 0) => MaskType::Transparent,
        (false, 2) => MaskType::Left,
        (true, -2) => MaskType::Right,
        (true, 2) => MaskType::LeftFoliage,
        _ => MaskType::RightFoliage,
    };
}

/// Draw one span of `dst.len()` pixels
///
/// `prefix` is relative to the first pixel of the span. `src` must hold
/// at least `dst.len()` bytes.
#[inline]
pub fn render_line<L: Light, M: MaskKind>(dst: &mut [u8], src: &[u8], lut: &Lut, prefix: i32) {
    if M::PREFIX_INCREMENT == 0 {
        render_line_uniform::<L>(dst, src, lut, !M::OPAQUE_PREFIX);
        return;
    }
    let n = dst.len();
    let p = prefix.max(0).min(n as i32) as usize;
    let (head, tail) = dst.split_at_mut(p);
    let (src_head, src_tail) = src.split_at(p);
    if M::OPAQUE_PREFIX {
        L::opaque(head, src_head, lut);
        if !M::IS_FOLIAGE {
            L::blended(tail, src_tail, lut);
        }
    } else {
        if !M::IS_FOLIAGE {
            L::blended(head, src_head, lut);
        }
        L::opaque(tail, src_tail, lut);
    }
}

/// Draw a span that is entirely opaque or entirely blended
#[inline]
pub fn render_line_uniform<L: Light>(dst: &mut [u8], src: &[u8], lut: &Lut, opaque: bool) {
    if opaque {
        L::opaque(dst, src, lut);
    } else {
        L::blended(dst, src, lut);
    }
}
