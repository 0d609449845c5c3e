//! Dungeon cel frames

use crate::error::{RenderError, Result};
use crate::rle::{Run, RunReader};
use crate::tile::{LevelCelBlock, TileType};
use crate::{HEIGHT, WIDTH};

/// All tile frames of a level
///
/// The blob starts with a table of little-endian `u32`: entry 0 is the
/// frame count `n`, entry `k` (1-based) is the byte offset of frame `k`
/// and entry `n + 1` is the end of the last frame.
#[derive(Debug,Default,Clone,PartialEq,Eq)]
pub struct DungeonCels {
    data: Vec<u8>,
}

fn read_u32(data: &[u8], i: usize) -> Result<u32> {
    let start = i * 4;
    match data.get(start .. start + 4) {
        Some(b) => Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]])),
        None => Err(RenderError::Truncated { needed: start + 4, len: data.len() }),
    }
}

impl DungeonCels {
    pub fn new(data: Vec<u8>) -> Self {
        DungeonCels { data }
    }
    /// Build a blob from frame sources; the first frame is frame 1
    pub fn from_frames<T: AsRef<[u8]>>(frames: &[T]) -> Self {
        let n = frames.len();
        let mut offset = (n + 2) * 4;
        let mut data = Vec::new();
        data.extend_from_slice(&(n as u32).to_le_bytes());
        for f in frames {
            data.extend_from_slice(&(offset as u32).to_le_bytes());
            offset += f.as_ref().len();
        }
        data.extend_from_slice(&(offset as u32).to_le_bytes());
        for f in frames {
            data.extend_from_slice(f.as_ref());
        }
        DungeonCels { data }
    }
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
    pub fn frame_count(&self) -> Result<u32> {
        read_u32(&self.data, 0)
    }
    fn frame_range(&self, frame: u16) -> Result<(usize, usize)> {
        let count = self.frame_count()?;
        if frame == 0 || frame as u32 > count {
            return Err(RenderError::FrameOutOfRange { frame, count });
        }
        let start = read_u32(&self.data, frame as usize)? as usize;
        let end = read_u32(&self.data, frame as usize + 1)? as usize;
        if start > end || end > self.data.len() {
            return Err(RenderError::Truncated { needed: end.max(start), len: self.data.len() });
        }
        Ok((start, end))
    }
    /// Source bytes of frame `frame`
    pub fn frame(&self, frame: u16) -> Result<&[u8]> {
        let (start, end) = self.frame_range(frame)?;
        Ok(&self.data[start .. end])
    }
    /// Mutable source bytes of frame `frame`
    pub fn frame_mut(&mut self, frame: u16) -> Result<&mut [u8]> {
        let (start, end) = self.frame_range(frame)?;
        Ok(&mut self.data[start .. end])
    }
    /// Frame source and tile type of a block
    pub fn block(&self, block: LevelCelBlock) -> Result<(TileType, &[u8])> {
        Ok((block.tile_type()?, self.frame(block.frame())?))
    }
}

/// Write the frame of `block` to `dst` with every pixel swapped through `tbl`
///
/// Only pixel bytes change. Run control bytes, triangle padding and any
/// bytes past the end of the tile are copied as they are, so `dst` has
/// the frame's exact length and layout.
pub fn apply_trans(cels: &DungeonCels, block: LevelCelBlock, dst: &mut Vec<u8>, tbl: &[u8; 256]) -> Result<()> {
    let (tile, src) = cels.block(block)?;
    dst.clear();
    dst.extend_from_slice(src);
    let remap = |p: &mut [u8]| p.iter_mut().for_each(|v| *v = tbl[*v as usize]);

    if tile == TileType::TransparentSquare {
        let mut reader = RunReader::new(src);
        for r in 0 .. HEIGHT {
            let mut x = 0;
            while x < WIDTH {
                let at = reader.position() + 1;
                let run = reader.next_run()?;
                if x + run.len() > WIDTH {
                    return Err(RenderError::RleOverrun { row: r, width: WIDTH, got: x + run.len() });
                }
                if let Run::Pixels(p) = run {
                    remap(&mut dst[at .. at + p.len()]);
                }
                x += run.len();
            }
        }
        return Ok(());
    }

    let needed = tile.source_len().unwrap_or(0);
    if src.len() < needed {
        return Err(RenderError::Truncated { needed, len: src.len() });
    }
    let mut pos = 0usize;
    for r in 0 .. tile.height() {
        let w = tile.row_span(r).1 as usize;
        let pad = tile.row_padding(r) as usize;
        if tile.pads_before() {
            pos += pad;
        }
        remap(&mut dst[pos .. pos + w]);
        pos += w;
        if !tile.pads_before() {
            pos += pad;
        }
    }
    Ok(())
}
