//! Light tables, transparency blending and span writers
//!
//! Every pixel that reaches the surface goes through one of the two
//! span writers of a [Light](trait.Light.html) marker:
//!
//! | span    | FullyDark     | FullyLit        | PartiallyLit          |
//! |---------|---------------|-----------------|-----------------------|
//! | opaque  | 0             | `src`           | `tbl[src]`            |
//! | blended | `trn[0][dst]` | `trn[dst][src]` | `trn[dst][tbl[src]]`  |
//!
//! The marker is picked once per tile, so the loops below are free of
//! per-pixel branching on the light level.

use crate::color::Palette;
use crate::error::{RenderError, Result};
use crate::LIGHTS_MAX;

/// Remapping tables, one per light level
///
/// Level 0 is fully lit, [LIGHTS_MAX](../constant.LIGHTS_MAX.html) is
/// fully dark. Stored flat on disk as `256 * level + index`.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct LightTables {
    tables: Vec<[u8; 256]>,
}

impl LightTables {
    pub const LEVELS: usize = LIGHTS_MAX as usize + 1;

    /// Every level maps each index to itself
    pub fn identity() -> Self {
        Self::from_fn(|_, i| i)
    }
    pub fn from_fn<F: FnMut(u8, u8) -> u8>(mut f: F) -> Self {
        let tables = (0 .. Self::LEVELS as u8).map(|level| {
            let mut t = [0u8; 256];
            for (i, v) in t.iter_mut().enumerate() {
                *v = f(level, i as u8);
            }
            t
        }).collect();
        LightTables { tables }
    }
    /// Read the flat `16 x 256` table
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let expected = Self::LEVELS * 256;
        if data.len() != expected {
            return Err(RenderError::TableSize { expected, got: data.len() });
        }
        let tables = data.chunks_exact(256).map(|c| {
            let mut t = [0u8; 256];
            t.copy_from_slice(c);
            t
        }).collect();
        Ok(LightTables { tables })
    }
    pub fn table(&self, level: u8) -> Result<&[u8; 256]> {
        self.tables.get(level as usize)
            .ok_or(RenderError::LightLevel { level, max: LIGHTS_MAX })
    }
    pub fn table_mut(&mut self, level: u8) -> Result<&mut [u8; 256]> {
        self.tables.get_mut(level as usize)
            .ok_or(RenderError::LightLevel { level, max: LIGHTS_MAX })
    }
}

/// 256x256 blend matrix, indexed `[background][foreground]`
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct TransparencyTable {
    rows: Vec<[u8; 256]>,
}

impl TransparencyTable {
    pub fn from_fn<F: FnMut(u8, u8) -> u8>(mut f: F) -> Self {
        let rows = (0 ..= 255u8).map(|bg| {
            let mut t = [0u8; 256];
            for (fg, v) in t.iter_mut().enumerate() {
                *v = f(bg, fg as u8);
            }
            t
        }).collect();
        TransparencyTable { rows }
    }
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != 256 * 256 {
            return Err(RenderError::TableSize { expected: 256 * 256, got: data.len() });
        }
        let rows = data.chunks_exact(256).map(|c| {
            let mut t = [0u8; 256];
            t.copy_from_slice(c);
            t
        }).collect();
        Ok(TransparencyTable { rows })
    }
    /// 50% blend of every pair, mapped back to the closest palette entry
    pub fn from_palette(pal: &Palette) -> Self {
        let mut rows = vec![[0u8; 256]; 256];
        for a in 0 .. 256 {
            rows[a][a] = a as u8;
            for b in a + 1 .. 256 {
                let v = pal.nearest(&pal.get(a as u8).mix(&pal.get(b as u8)));
                rows[a][b] = v;
                rows[b][a] = v;
            }
        }
        TransparencyTable { rows }
    }
    #[inline]
    pub fn get(&self, bg: u8, fg: u8) -> u8 {
        self.rows[bg as usize][fg as usize]
    }
    #[inline]
    pub fn row(&self, bg: u8) -> &[u8; 256] {
        &self.rows[bg as usize]
    }
}

/// Level 0 as the span writers see it
///
/// Fully lit pixels are never remapped, whatever the level 0 table holds.
pub static FULLY_LIT: [u8; 256] = identity_table();

const fn identity_table() -> [u8; 256] {
    let mut t = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        t[i] = i as u8;
        i += 1;
    }
    t
}

/// Tables used to draw one tile
#[derive(Debug,Copy,Clone)]
pub struct Lut<'a> {
    /// Light table of the tile's light level, [FULLY_LIT](static.FULLY_LIT.html) at level 0
    pub light: &'a [u8; 256],
    /// Blend matrix
    pub trn: &'a TransparencyTable,
    /// Palette index drawn by [DebugColor](enum.DebugColor.html)
    pub debug_color: u8,
}

/// Span writer specialised for one light level class
///
/// `src` is ignored by light levels that do not need it but is always
/// at least `dst.len()` long.
pub trait Light {
    fn opaque(dst: &mut [u8], src: &[u8], lut: &Lut);
    fn blended(dst: &mut [u8], src: &[u8], lut: &Lut);
}

/// Light level `LIGHTS_MAX`
pub enum FullyDark {}
/// Light level 0
pub enum FullyLit {}
/// Any other light level
pub enum PartiallyLit {}
/// Tint with `Lut::debug_color` through the light table
///
/// At level 0 the table is [FULLY_LIT](static.FULLY_LIT.html), so the tint
/// is written as is.
pub enum DebugColor {}

impl Light for FullyDark {
    #[inline]
    fn opaque(dst: &mut [u8], _src: &[u8], _lut: &Lut) {
        dst.iter_mut().for_each(|d| *d = 0);
    }
    #[inline]
    fn blended(dst: &mut [u8], _src: &[u8], lut: &Lut) {
        let t = lut.trn.row(0);
        dst.iter_mut().for_each(|d| *d = t[*d as usize]);
    }
}

impl Light for FullyLit {
    #[inline]
    fn opaque(dst: &mut [u8], src: &[u8], _lut: &Lut) {
        let n = dst.len();
        dst.copy_from_slice(&src[..n]);
    }
    #[inline]
    fn blended(dst: &mut [u8], src: &[u8], lut: &Lut) {
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = lut.trn.get(*d, s);
        }
    }
}

impl Light for PartiallyLit {
    #[inline]
    fn opaque(dst: &mut [u8], src: &[u8], lut: &Lut) {
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = lut.light[s as usize];
        }
    }
    #[inline]
    fn blended(dst: &mut [u8], src: &[u8], lut: &Lut) {
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = lut.trn.get(*d, lut.light[s as usize]);
        }
    }
}

impl Light for DebugColor {
    #[inline]
    fn opaque(dst: &mut [u8], _src: &[u8], lut: &Lut) {
        let c = lut.light[lut.debug_color as usize];
        dst.iter_mut().for_each(|d| *d = c);
    }
    #[inline]
    fn blended(dst: &mut [u8], _src: &[u8], lut: &Lut) {
        let c = lut.light[lut.debug_color.wrapping_add(4) as usize];
        dst.iter_mut().for_each(|d| *d = lut.trn.get(*d, c));
    }
}

/// Light level class, resolved once per tile
#[derive(Debug,Copy,Clone,PartialEq,Eq,Hash)]
pub enum LightKind {
    FullyDark,
    FullyLit,
    PartiallyLit,
    DebugColor,
}

impl LightKind {
    pub fn select(level: u8, debug_colors: bool) -> Self {
        if level == LIGHTS_MAX {
            LightKind::FullyDark
        } else if debug_colors {
            LightKind::DebugColor
        } else if level == 0 {
            LightKind::FullyLit
        } else {
            LightKind::PartiallyLit
        }
    }
}
