//! Tile and Mask Types

use std::fmt;

use crate::error::RenderError;
use crate::{HEIGHT, LOWER_HEIGHT, TRIANGLE_HEIGHT, TRIANGLE_UPPER_HEIGHT, WIDTH, XSTEP};

/// Geometric variant of a dungeon tile primitive
///
/// Every primitive is [WIDTH] pixels wide. Triangles are 31 rows tall
/// (16 lower + 15 upper), everything else 32.
///
/// [WIDTH]: ../constant.WIDTH.html
#[derive(Debug,Copy,Clone,PartialEq,Eq,Hash)]
pub enum TileType {
    /// 32 raw rows of 32 pixels
    Square,
    /// 32 run length encoded rows
    TransparentSquare,
    /// Right aligned diamond half ◣◤
    LeftTriangle,
    /// Left aligned diamond half ◢◥
    RightTriangle,
    /// Left triangle lower half with a raw 32x16 block on top
    LeftTrapezoid,
    /// Right triangle lower half with a raw 32x16 block on top
    RightTrapezoid,
}

/// All tile types, in on-disk order
pub const TILE_TYPES: [TileType; 6] = [
    TileType::Square,
    TileType::TransparentSquare,
    TileType::LeftTriangle,
    TileType::RightTriangle,
    TileType::LeftTrapezoid,
    TileType::RightTrapezoid,
];

impl TileType {
    /// Height in pixels
    pub fn height(self) -> i32 {
        match self {
            TileType::LeftTriangle | TileType::RightTriangle => TRIANGLE_HEIGHT,
            _ => HEIGHT,
        }
    }
    /// True for the four shapes built from diamond halves
    pub fn is_diamond(self) -> bool {
        !matches!(self, TileType::Square | TileType::TransparentSquare)
    }
    /// Size of the source data in bytes
    ///
    /// `None` for [TransparentSquare](#variant.TransparentSquare), which
    /// is variable length
    pub fn source_len(self) -> Option<usize> {
        match self {
            TileType::Square => Some((WIDTH * HEIGHT) as usize),
            TileType::TransparentSquare => None,
            TileType::LeftTriangle | TileType::RightTriangle => {
                Some(triangle_lower_skip(LOWER_HEIGHT) + triangle_upper_skip(TRIANGLE_UPPER_HEIGHT))
            }
            TileType::LeftTrapezoid | TileType::RightTrapezoid => {
                Some(triangle_lower_skip(LOWER_HEIGHT) + (WIDTH * (HEIGHT - LOWER_HEIGHT)) as usize)
            }
        }
    }
    /// Padding bytes go before the row (left aligned shapes pad after)
    pub fn pads_before(self) -> bool {
        matches!(self, TileType::LeftTriangle | TileType::LeftTrapezoid)
    }
    /// Columns `(start, width)` covered by row `r`, counted from the bottom
    pub fn row_span(self, r: i32) -> (i32, i32) {
        let lower = r < LOWER_HEIGHT;
        match self {
            TileType::Square | TileType::TransparentSquare => (0, WIDTH),
            TileType::LeftTrapezoid | TileType::RightTrapezoid if !lower => (0, WIDTH),
            _ if lower => {
                let w = XSTEP * (r + 1);
                if self.pads_before() { (WIDTH - w, w) } else { (0, w) }
            }
            _ => {
                let i = r - LOWER_HEIGHT + 1;
                let w = WIDTH - XSTEP * i;
                if self.pads_before() { (XSTEP * i, w) } else { (0, w) }
            }
        }
    }
    /// Padding bytes stored with row `r` of a raw diamond tile
    pub fn row_padding(self, r: i32) -> i32 {
        if !self.is_diamond() {
            return 0;
        }
        if r < LOWER_HEIGHT {
            let i = r + 1;
            2 * (i % 2)
        } else if self == TileType::LeftTriangle || self == TileType::RightTriangle {
            let i = r - LOWER_HEIGHT + 1;
            2 * (i % 2)
        } else {
            0
        }
    }
    /// Whether `mask` can be drawn on this tile type
    pub fn supports(self, mask: MaskType) -> bool {
        match (self, mask) {
            (_, MaskType::Solid) | (_, MaskType::Transparent) => true,
            (TileType::TransparentSquare, _) => true,
            (TileType::LeftTrapezoid, MaskType::Left) => true,
            (TileType::RightTrapezoid, MaskType::Right) => true,
            _ => false,
        }
    }
    /// Palette index used to tint this tile type when debug colors are on
    pub fn debug_color(self) -> u8 {
        match self {
            TileType::Square => PAL16_YELLOW + 5,
            TileType::TransparentSquare => PAL16_ORANGE + 5,
            TileType::LeftTriangle => PAL16_GRAY + 5,
            TileType::RightTriangle => PAL16_BEIGE,
            TileType::LeftTrapezoid => PAL16_RED + 5,
            TileType::RightTrapezoid => PAL16_BLUE + 5,
        }
    }
}

const PAL16_BEIGE: u8 = 160;
const PAL16_BLUE: u8 = 176;
const PAL16_YELLOW: u8 = 192;
const PAL16_ORANGE: u8 = 208;
const PAL16_RED: u8 = 224;
const PAL16_GRAY: u8 = 240;

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TileType::Square => "Square",
            TileType::TransparentSquare => "TransparentSquare",
            TileType::LeftTriangle => "LeftTriangle",
            TileType::RightTriangle => "RightTriangle",
            TileType::LeftTrapezoid => "LeftTrapezoid",
            TileType::RightTrapezoid => "RightTrapezoid",
        };
        f.pad(s)
    }
}

impl std::convert::TryFrom<u8> for TileType {
    type Error = RenderError;
    fn try_from(v: u8) -> Result<Self, RenderError> {
        TILE_TYPES.get(v as usize).copied().ok_or(RenderError::UnknownTileType(v))
    }
}

/// Which part of a tile is opaque, blended or not drawn at all
///
/// Rows are counted from the bottom of the tile. In the diagrams below
/// the top line is the topmost row, `#` is opaque, `.` is blended
/// (or, for foliage, not drawn).
#[derive(Debug,Copy,Clone,PartialEq,Eq,Hash)]
pub enum MaskType {
    /// The entire tile is opaque
    Solid,
    /// The entire tile is blended with transparency
    Transparent,
    /// Upper-right triangle is blended
    ///
    /// Only for `RightTrapezoid` and `TransparentSquare`. The lower 16
    /// rows are opaque; the opaque prefix shrinks by 2 every row above.
    ///
    /// ```text
    /// ##..............................
    /// ####............................
    ///   ...
    /// ##############################..
    /// ################################
    /// ```
    Right,
    /// Upper-left triangle is blended
    ///
    /// Only for `LeftTrapezoid` and `TransparentSquare`. The lower 16
    /// rows are opaque; the blended prefix grows by 2 every row above.
    ///
    /// ```text
    /// ..............................##
    /// ............................####
    ///   ...
    /// ..##############################
    /// ################################
    /// ```
    Left,
    /// Only a right aligned triangle in the upper half is drawn
    ///
    /// Only for `TransparentSquare`. The lower 16 rows and everything
    /// marked `.` are skipped.
    ///
    /// ```text
    /// ..##############################
    /// ....############################
    ///   ...
    /// ..............................##
    /// ................................
    /// ```
    RightFoliage,
    /// Only a left aligned triangle in the upper half is drawn
    ///
    /// Only for `TransparentSquare`. The lower 16 rows and everything
    /// marked `.` are skipped.
    ///
    /// ```text
    /// ##############################..
    /// ############################....
    ///   ...
    /// ##..............................
    /// ................................
    /// ```
    LeftFoliage,
}

/// All mask types
pub const MASK_TYPES: [MaskType; 6] = [
    MaskType::Solid,
    MaskType::Transparent,
    MaskType::Right,
    MaskType::Left,
    MaskType::RightFoliage,
    MaskType::LeftFoliage,
];

impl fmt::Display for MaskType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            MaskType::Solid => "Solid",
            MaskType::Transparent => "Transparent",
            MaskType::Right => "Right",
            MaskType::Left => "Left",
            MaskType::RightFoliage => "RightFoliage",
            MaskType::LeftFoliage => "LeftFoliage",
        };
        f.pad(s)
    }
}

/// A frame reference from the level's block table
///
/// Bits 0-11 hold the frame number in the level cel file,
/// bits 12-14 the [TileType](enum.TileType.html).
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,Hash)]
pub struct LevelCelBlock(pub u16);

impl LevelCelBlock {
    /// Pack a frame number and tile type; `frame` must fit in 12 bits
    pub fn new(frame: u16, tile: TileType) -> Self {
        debug_assert!(frame <= 0x0FFF, "frame {} does not fit a level cel block", frame);
        let kind = TILE_TYPES.iter().position(|&t| t == tile).unwrap_or(0) as u16;
        LevelCelBlock((frame & 0x0FFF) | (kind << 12))
    }
    /// Frame number, 0 means no frame
    pub fn frame(&self) -> u16 {
        self.0 & 0x0FFF
    }
    pub fn has_value(&self) -> bool {
        self.0 != 0
    }
    pub fn tile_type(&self) -> Result<TileType, RenderError> {
        use std::convert::TryFrom;
        TileType::try_from(((self.0 & 0x7000) >> 12) as u8)
    }
}

/// Source bytes of the lowest `n` rows of a triangle's lower half
///
/// Row `i` (1-based) holds `XSTEP * i` pixels plus `2 * (i % 2)` padding.
pub fn triangle_lower_skip(n: i32) -> usize {
    (XSTEP * n * (n + 1) / 2 + 2 * ((n + 1) / 2)) as usize
}

/// Source bytes of the lowest `n` rows of a triangle's upper half
///
/// Row `i` (1-based) holds `WIDTH - XSTEP * i` pixels plus `2 * (i % 2)` padding.
pub fn triangle_upper_skip(n: i32) -> usize {
    (2 * TRIANGLE_UPPER_HEIGHT * n - n * (n - 1) + 2 * ((n + 1) / 2)) as usize
}
