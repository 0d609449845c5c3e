//! Clipping Region

use crate::buffer::Surface;
use crate::WIDTH;

/// Inside Region
pub const INSIDE : u8 = 0b0000;
/// Clipped on the left
pub const LEFT   : u8 = 0b0000_0001;
/// Clipped on the right
pub const RIGHT  : u8 = 0b0000_0010;
/// Clipped below the surface
pub const BOTTOM : u8 = 0b0000_0100;
/// Clipped above the surface
pub const TOP    : u8 = 0b0000_1000;

/// Portion of a tile cut off by the edges of the surface
///
/// All four edges are `>= 0`. `width + left + right` and
/// `height + top + bottom` are the tile's full size.
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Clip {
    /// Rows cut off above the surface
    pub top: i32,
    /// Rows cut off below the surface
    pub bottom: i32,
    /// Columns cut off left of the surface
    pub left: i32,
    /// Columns cut off right of the surface
    pub right: i32,
    /// Visible columns
    pub width: i32,
    /// Visible rows
    pub height: i32,
}

impl Clip {
    /// Nothing is visible
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
    /// Get the clipped edges
    ///
    /// Returned is an a u8 made up of the following bits:
    /// - [INSIDE](constant.INSIDE.html)
    /// - [LEFT](constant.LEFT.html)
    /// - [RIGHT](constant.RIGHT.html)
    /// - [BOTTOM](constant.BOTTOM.html)
    /// - [TOP](constant.TOP.html)
    ///
    pub fn flags(&self) -> u8 {
        let mut code = INSIDE;
        if self.left > 0 { code |= LEFT; }
        if self.right > 0 { code |= RIGHT; }
        if self.bottom > 0 { code |= BOTTOM; }
        if self.top > 0 { code |= TOP; }
        code
    }
}

/// Clip a `w` x `h` tile whose bottom-left pixel is at (x,y)
///
/// The tile covers rows `y - h + 1 ..= y` and columns `x .. x + w` of a
/// `vw` x `vh` surface. Edges are capped at the tile size, so a tile
/// far off the surface comes back empty for any `i32` position.
pub fn calculate_clip(x: i32, y: i32, w: i32, h: i32, vw: i32, vh: i32) -> Clip {
    let (x, y, w, h) = (x as i64, y as i64, w as i64, h as i64);
    let (vw, vh) = (vw as i64, vh as i64);
    let top = (h - (y + 1)).max(0).min(h);
    let bottom = (y + 1 - vh).max(0).min(h);
    let left = (-x).max(0).min(w);
    let right = (x + w - vw).max(0).min(w);
    Clip {
        top: top as i32,
        bottom: bottom as i32,
        left: left as i32,
        right: right as i32,
        width: (w - left - right) as i32,
        height: (h - top - bottom) as i32,
    }
}

/// Vertical clip split between the lower and upper half of a diamond tile
///
/// The lower half is always [LOWER_HEIGHT](../constant.LOWER_HEIGHT.html) rows.
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct DiamondClipY {
    pub lower_bottom: i32,
    pub lower_top: i32,
    pub upper_bottom: i32,
    pub upper_top: i32,
}

/// Split `clip.bottom` and `clip.top` across the two halves
///
/// Bottom rows are taken from the lower half first, top rows from the
/// upper half first.
pub fn calculate_diamond_clip_y(clip: &Clip, upper_height: i32) -> DiamondClipY {
    use crate::LOWER_HEIGHT;
    DiamondClipY {
        lower_bottom: clip.bottom.min(LOWER_HEIGHT),
        upper_bottom: (clip.bottom - LOWER_HEIGHT).max(0),
        upper_top: clip.top.min(upper_height),
        lower_top: (clip.top - upper_height).max(0),
    }
}

/// Which edges a draw routine has to check
#[derive(Debug,Copy,Clone,PartialEq,Eq,Hash)]
pub enum ClipRegime {
    /// The whole tile is visible
    Full,
    /// Only top or bottom rows are cut off
    Vertical,
    /// Columns are cut off on the left, and maybe on the right, top or bottom
    LeftAndVertical,
    /// Columns are cut off on the right, and maybe top or bottom
    RightAndVertical,
}

impl ClipRegime {
    /// Cheapest regime that draws `clip` correctly
    pub fn select(clip: &Clip) -> Self {
        let f = clip.flags();
        if f == INSIDE {
            ClipRegime::Full
        } else if f & LEFT != 0 {
            ClipRegime::LeftAndVertical
        } else if f & RIGHT != 0 {
            ClipRegime::RightAndVertical
        } else {
            ClipRegime::Vertical
        }
    }
    /// Whether this regime checks every edge that `clip` cuts
    pub fn handles(self, clip: &Clip) -> bool {
        let f = clip.flags();
        let ok = match self {
            ClipRegime::Full => INSIDE,
            ClipRegime::Vertical => TOP | BOTTOM,
            ClipRegime::LeftAndVertical => TOP | BOTTOM | LEFT | RIGHT,
            ClipRegime::RightAndVertical => TOP | BOTTOM | RIGHT,
        };
        f & !ok == 0
    }
}

/// Compile-time clip regime
pub trait Regime {
    const CLIPS_Y: bool;
    const CLIPS_LEFT: bool;
    const CLIPS_RIGHT: bool;
    const REGIME: ClipRegime;

    /// Whether row `r`, counted from the bottom of a tile of height `h`, is visible
    #[inline]
    fn row_visible(r: i32, h: i32, clip: &Clip) -> bool {
        !Self::CLIPS_Y || (r >= clip.bottom && r < h - clip.top)
    }
}

pub enum Unclipped {}
pub enum ClipVertical {}
pub enum ClipLeftAndVertical {}
pub enum ClipRightAndVertical {}

impl Regime for Unclipped {
    const CLIPS_Y: bool = false;
    const CLIPS_LEFT: bool = false;
    const CLIPS_RIGHT: bool = false;
    const REGIME: ClipRegime = ClipRegime::Full;
}
impl Regime for ClipVertical {
    const CLIPS_Y: bool = true;
    const CLIPS_LEFT: bool = false;
    const CLIPS_RIGHT: bool = false;
    const REGIME: ClipRegime = ClipRegime::Vertical;
}
impl Regime for ClipLeftAndVertical {
    const CLIPS_Y: bool = true;
    const CLIPS_LEFT: bool = true;
    const CLIPS_RIGHT: bool = true;
    const REGIME: ClipRegime = ClipRegime::LeftAndVertical;
}
impl Regime for ClipRightAndVertical {
    const CLIPS_Y: bool = true;
    const CLIPS_LEFT: bool = false;
    const CLIPS_RIGHT: bool = true;
    const REGIME: ClipRegime = ClipRegime::RightAndVertical;
}

/// Visible part of a row segment `start .. start + width` of a tile
///
/// Returns `(skip, len)`: pixels to skip at the start of the segment and
/// pixels to draw after them. `len` is 0 when nothing is visible.
#[inline]
pub fn visible_span<R: Regime>(start: i32, width: i32, tile_width: i32, clip: &Clip) -> (i32, i32) {
    let mut lo = start;
    let mut hi = start + width;
    if R::CLIPS_LEFT {
        lo = lo.max(clip.left);
    }
    if R::CLIPS_RIGHT {
        hi = hi.min(tile_width - clip.right);
    }
    (lo - start, (hi - lo).max(0))
}

/// Hand the visible part of one row segment to `f`
///
/// `row` is the surface offset of column 0 of the row, `start` the
/// tile column of `src[0]`. `f` receives the destination span, the
/// matching source pixels and the tile column of the first of them.
#[inline]
pub(crate) fn clip_row<R, F>(out: &mut Surface, row: isize, start: i32, src: &[u8], clip: &Clip, f: F)
    where R: Regime, F: FnOnce(&mut [u8], &[u8], i32)
{
    let (skip, len) = visible_span::<R>(start, src.len() as i32, WIDTH, clip);
    if len <= 0 {
        return;
    }
    let x = start + skip;
    let dst = out.span_mut(row + x as isize, len);
    f(dst, &src[skip as usize ..], x);
}
