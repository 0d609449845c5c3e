//! Errors

use crate::clip::ClipRegime;
use crate::tile::{MaskType, TileType};

/// Errors produced while decoding or drawing dungeon tiles
///
/// None of these are transient. A tile that fails to draw means the
/// caller asked for an impossible combination or the cel data is corrupt.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid mask type {mask} for tile type {tile}")]
    InvalidMask { tile: TileType, mask: MaskType },

    #[error("RLE row {row} overruns its width: {got} > {width}")]
    RleOverrun { row: i32, width: i32, got: i32 },

    #[error("clip regime {requested:?} cannot draw a tile that needs {required:?}")]
    Regime { requested: ClipRegime, required: ClipRegime },

    #[error("source truncated: need {needed} bytes, have {len}")]
    Truncated { needed: usize, len: usize },

    #[error("frame {frame} out of range (frame count {count})")]
    FrameOutOfRange { frame: u16, count: u32 },

    #[error("light level {level} out of range (max {max})")]
    LightLevel { level: u8, max: u8 },

    #[error("unknown tile type {0}")]
    UnknownTileType(u8),

    #[error("table size mismatch: expected {expected} bytes, got {got}")]
    TableSize { expected: usize, got: usize },

    #[error("surface {width}x{height} with pitch {pitch} needs {needed} bytes, got {got}")]
    SurfaceSize { width: usize, height: usize, pitch: usize, needed: usize, got: usize },

    #[error("tile image for {tile} must be {expected} pixels, got {got}")]
    ImageSize { tile: TileType, expected: usize, got: usize },

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, RenderError>;
