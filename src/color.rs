//! Colors

use crate::buffer::Surface;
use crate::error::{RenderError, Result};

/// Color as Red, Green, and Blue
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,Hash)]
pub struct Rgb8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Rgb8 {
    pub fn white() -> Self {
        Self::new(255,255,255)
    }
    pub fn black() -> Self {
        Self::new(0,0,0)
    }
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb8 { r, g, b }
    }
    pub fn gray(g: u8) -> Self {
        Self::new(g,g,g)
    }
    /// Component-wise average of two colors, rounded down
    pub fn mix(&self, other: &Rgb8) -> Rgb8 {
        let avg = |a: u8, b: u8| ((a as u16 + b as u16) / 2) as u8;
        Rgb8::new(avg(self.r, other.r), avg(self.g, other.g), avg(self.b, other.b))
    }
    /// Squared euclidean distance in RGB space
    pub fn distance2(&self, other: &Rgb8) -> u32 {
        let d = |a: u8, b: u8| {
            let v = a as i32 - b as i32;
            (v * v) as u32
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }
}

/// 256 entry palette for 8-bit indexed surfaces
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct Palette {
    colors: Vec<Rgb8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::grayscale()
    }
}

impl Palette {
    /// Index `i` maps to gray level `i`
    pub fn grayscale() -> Self {
        Palette { colors: (0 ..= 255u8).map(Rgb8::gray).collect() }
    }
    /// Build from 256 colors
    pub fn from_fn<F: FnMut(u8) -> Rgb8>(f: F) -> Self {
        Palette { colors: (0 ..= 255u8).map(f).collect() }
    }
    /// Read a raw `.pal` file: 256 RGB triples
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != 256 * 3 {
            return Err(RenderError::TableSize { expected: 256 * 3, got: data.len() });
        }
        let colors = data.chunks_exact(3).map(|c| Rgb8::new(c[0], c[1], c[2])).collect();
        Ok(Palette { colors })
    }
    pub fn get(&self, i: u8) -> Rgb8 {
        self.colors[i as usize]
    }
    pub fn set(&mut self, i: u8, c: Rgb8) {
        self.colors[i as usize] = c;
    }
    /// Index of the closest color, lowest index on ties
    pub fn nearest(&self, c: &Rgb8) -> u8 {
        let mut best = 0;
        let mut best_d = u32::max_value();
        for (i, p) in self.colors.iter().enumerate() {
            let d = p.distance2(c);
            if d < best_d {
                best = i;
                best_d = d;
                if d == 0 {
                    break;
                }
            }
        }
        best as u8
    }
    /// Expand the visible part of an indexed surface to packed RGB
    pub fn to_rgb(&self, surface: &Surface) -> Vec<u8> {
        let mut out = Vec::with_capacity(surface.width * surface.height * 3);
        for y in 0 .. surface.height {
            for &i in surface.row(y) {
                let c = self.get(i);
                out.extend_from_slice(&[c.r, c.g, c.b]);
            }
        }
        out
    }
}
