//! Run length encoded rows and whole-tile pixel grids
//!
//! A `TransparentSquare` row is a sequence of signed control bytes. A
//! positive value `n` is followed by `n` literal pixels, a value `n <= 0`
//! skips `-n` transparent pixels. Every row adds up to exactly 32 pixels.

use crate::error::{RenderError, Result};
use crate::tile::TileType;
use crate::WIDTH;

/// Longest literal run a control byte can describe
pub const MAX_PIXEL_RUN: usize = 127;
/// Longest transparent run a control byte can describe
pub const MAX_SKIP_RUN: usize = 128;

/// One run of a transparent row
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum Run<'a> {
    /// Literal palette indices
    Pixels(&'a [u8]),
    /// Transparent pixels
    Skip(i32),
}

impl<'a> Run<'a> {
    /// Pixels covered by the run
    pub fn len(&self) -> i32 {
        match self {
            Run::Pixels(p) => p.len() as i32,
            Run::Skip(n) => *n,
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sequential reader over run length encoded rows
#[derive(Debug,Clone)]
pub struct RunReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RunReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        RunReader { data, pos: 0 }
    }
    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }
    /// Read the next control byte and its pixels
    pub fn next_run(&mut self) -> Result<Run<'a>> {
        let v = match self.data.get(self.pos) {
            Some(&v) => v as i8,
            None => return Err(RenderError::Truncated { needed: self.pos + 1, len: self.data.len() }),
        };
        self.pos += 1;
        if v > 0 {
            let n = v as usize;
            let end = self.pos + n;
            if end > self.data.len() {
                return Err(RenderError::Truncated { needed: end, len: self.data.len() });
            }
            let pixels = &self.data[self.pos .. end];
            self.pos = end;
            Ok(Run::Pixels(pixels))
        } else {
            Ok(Run::Skip(-(v as i32)))
        }
    }
    /// Consume a whole row of `width` pixels
    ///
    /// `row` is only used to report an overrun.
    pub fn skip_line(&mut self, width: i32, row: i32) -> Result<()> {
        let mut got = 0;
        while got < width {
            got += self.next_run()?.len();
        }
        if got != width {
            return Err(RenderError::RleOverrun { row, width, got });
        }
        Ok(())
    }
}

/// Append the encoding of one row, `None` is transparent
pub fn encode_rle_line(row: &[Option<u8>], out: &mut Vec<u8>) {
    let mut i = 0;
    while i < row.len() {
        if row[i].is_some() {
            let start = i;
            while i < row.len() && i - start < MAX_PIXEL_RUN && row[i].is_some() {
                i += 1;
            }
            out.push((i - start) as u8);
            out.extend(row[start .. i].iter().flatten());
        } else {
            let start = i;
            while i < row.len() && i - start < MAX_SKIP_RUN && row[i].is_none() {
                i += 1;
            }
            out.push((-((i - start) as i32)) as i8 as u8);
        }
    }
}

/// Decoded pixels of one tile
///
/// `WIDTH` columns by `tile.height()` rows, row 0 is the bottom row.
/// Pixels outside the tile's shape, and transparent pixels, are `None`.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct TileImage {
    pub tile: TileType,
    pixels: Vec<Option<u8>>,
}

impl TileImage {
    /// Image with every pixel inside the shape set to `color`
    pub fn filled(tile: TileType, color: u8) -> Self {
        Self::from_fn(tile, |_, _| Some(color))
    }
    /// Image built pixel by pixel; `f` is only called inside the shape
    pub fn from_fn<F: FnMut(i32, i32) -> Option<u8>>(tile: TileType, mut f: F) -> Self {
        let h = tile.height();
        let mut pixels = vec![None; (WIDTH * h) as usize];
        for r in 0 .. h {
            let (start, w) = tile.row_span(r);
            for x in start .. start + w {
                pixels[(r * WIDTH + x) as usize] = f(x, r);
            }
        }
        TileImage { tile, pixels }
    }
    /// Wrap pixels given row by row from the bottom
    pub fn from_pixels(tile: TileType, pixels: Vec<Option<u8>>) -> Result<Self> {
        let expected = (WIDTH * tile.height()) as usize;
        if pixels.len() != expected {
            return Err(RenderError::ImageSize { tile, expected, got: pixels.len() });
        }
        Ok(TileImage { tile, pixels })
    }
    pub fn width(&self) -> i32 {
        WIDTH
    }
    pub fn height(&self) -> i32 {
        self.tile.height()
    }
    /// Pixel at column `x` of row `r` (from the bottom)
    pub fn get(&self, x: i32, r: i32) -> Option<u8> {
        if x < 0 || x >= WIDTH || r < 0 || r >= self.height() {
            return None;
        }
        self.pixels[(r * WIDTH + x) as usize]
    }
    pub fn set(&mut self, x: i32, r: i32, v: Option<u8>) {
        if x >= 0 && x < WIDTH && r >= 0 && r < self.height() {
            self.pixels[(r * WIDTH + x) as usize] = v;
        }
    }
    /// Row `r` (from the bottom)
    pub fn row(&self, r: i32) -> &[Option<u8>] {
        let start = (r * WIDTH) as usize;
        &self.pixels[start .. start + WIDTH as usize]
    }
    /// Apply `f` to every stored pixel
    pub fn map<F: FnMut(u8) -> u8>(&mut self, mut f: F) {
        for p in self.pixels.iter_mut().flatten() {
            *p = f(*p);
        }
    }
}

/// Decode the source bytes of one frame
pub fn decode_tile(tile: TileType, src: &[u8]) -> Result<TileImage> {
    let h = tile.height();
    let mut pixels = vec![None; (WIDTH * h) as usize];
    if tile == TileType::TransparentSquare {
        let mut reader = RunReader::new(src);
        for r in 0 .. h {
            let mut x = 0;
            while x < WIDTH {
                let run = reader.next_run()?;
                if x + run.len() > WIDTH {
                    return Err(RenderError::RleOverrun { row: r, width: WIDTH, got: x + run.len() });
                }
                if let Run::Pixels(p) = run {
                    for (k, &v) in p.iter().enumerate() {
                        pixels[(r * WIDTH + x) as usize + k] = Some(v);
                    }
                }
                x += run.len();
            }
        }
        return TileImage::from_pixels(tile, pixels);
    }

    let needed = tile.source_len().unwrap_or(0);
    if src.len() < needed {
        return Err(RenderError::Truncated { needed, len: src.len() });
    }
    let mut pos = 0usize;
    for r in 0 .. h {
        let (start, w) = tile.row_span(r);
        let pad = tile.row_padding(r) as usize;
        if tile.pads_before() {
            pos += pad;
        }
        for (k, &v) in src[pos .. pos + w as usize].iter().enumerate() {
            pixels[(r * WIDTH + start) as usize + k] = Some(v);
        }
        pos += w as usize;
        if !tile.pads_before() {
            pos += pad;
        }
    }
    TileImage::from_pixels(tile, pixels)
}

/// Encode a tile image into frame source bytes
///
/// Raw shapes store transparent pixels as 0 and padding as 0.
pub fn encode_tile(img: &TileImage) -> Vec<u8> {
    let tile = img.tile;
    let mut out = Vec::new();
    if tile == TileType::TransparentSquare {
        for r in 0 .. img.height() {
            encode_rle_line(img.row(r), &mut out);
        }
        return out;
    }
    for r in 0 .. img.height() {
        let (start, w) = tile.row_span(r);
        let pad = tile.row_padding(r) as usize;
        if tile.pads_before() {
            out.extend(std::iter::repeat(0).take(pad));
        }
        out.extend((start .. start + w).map(|x| img.get(x, r).unwrap_or(0)));
        if !tile.pads_before() {
            out.extend(std::iter::repeat(0).take(pad));
        }
    }
    out
}
