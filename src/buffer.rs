//! Rendering buffer

use crate::error::{RenderError, Result};

/// 8-bit indexed drawing surface
///
/// Data is stored as row-major order (C-format), one palette index per
/// pixel. Rows are `pitch` bytes apart; `pitch >= width`.
#[derive(Debug,Default,Clone,PartialEq,Eq)]
pub struct Surface {
    /// Palette indices
    pub data: Vec<u8>,
    /// Image Width in pixels
    pub width: usize,
    /// Image Height in pixels
    pub height: usize,
    /// Bytes between the start of consecutive rows
    pub pitch: usize,
}

impl Surface {
    /// Create a new surface of width and height filled with index 0
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_pitch(width, height, width)
    }
    /// Create a new surface with padded rows
    ///
    /// `pitch` is raised to `width` if smaller
    pub fn with_pitch(width: usize, height: usize, pitch: usize) -> Self {
        let pitch = pitch.max(width);
        Surface { width, height, pitch, data: vec![0u8; pitch * height] }
    }
    /// Wrap existing pixel data
    pub fn from_vec(data: Vec<u8>, width: usize, height: usize, pitch: usize) -> Result<Self> {
        let needed = if height == 0 { 0 } else { pitch * (height - 1) + width };
        if pitch < width || data.len() < needed {
            return Err(RenderError::SurfaceSize { width, height, pitch, needed, got: data.len() });
        }
        Ok(Surface { data, width, height, pitch })
    }
    /// Size of underlying buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Byte offset of pixel (x,y), which may lie outside the surface
    pub fn offset(&self, x: i32, y: i32) -> isize {
        y as isize * self.pitch as isize + x as isize
    }
    /// Visible pixels of row `i`
    pub fn row(&self, i: usize) -> &[u8] {
        debug_assert!(i < self.height);
        let start = i * self.pitch;
        &self.data[start .. start + self.width]
    }
    /// Mutable visible pixels of row `i`
    pub fn row_mut(&mut self, i: usize) -> &mut [u8] {
        debug_assert!(i < self.height);
        let start = i * self.pitch;
        &mut self.data[start .. start + self.width]
    }
    /// `n` pixels starting at byte offset `off`
    ///
    /// Callers clip first; `off` and `n` are always inside the surface
    pub(crate) fn span_mut(&mut self, off: isize, n: i32) -> &mut [u8] {
        debug_assert!(off >= 0 && n >= 0);
        let off = off as usize;
        &mut self.data[off .. off + n as usize]
    }
    /// Set every pixel to `color`
    pub fn fill(&mut self, color: u8) {
        self.data.iter_mut().for_each(|v| *v = color);
    }
    /// Clear to palette index 0
    pub fn clear(&mut self) {
        self.fill(0);
    }
    /// Visible pixels, row by row, with pitch padding removed
    pub fn pixels(&self) -> Vec<u8> {
        (0 .. self.height).flat_map(|i| self.row(i).iter().copied()).collect()
    }
}

use std::ops::Index;
use std::ops::IndexMut;

impl Index<(usize,usize)> for Surface {
    type Output = u8;
    fn index(&self, index: (usize, usize)) -> &u8 {
        assert!(index.0 < self.width, "request {} >= {} width :: index", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index", index.1, self.height);
        &self.data[index.1 * self.pitch + index.0]
    }
}
impl IndexMut<(usize,usize)> for Surface {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut u8 {
        assert!(index.0 < self.width, "request {} >= {} width :: index_mut", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index_mut", index.1, self.height);
        &mut self.data[index.1 * self.pitch + index.0]
    }
}
