//! Renderer configuration and draw statistics

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tile::{MaskType, TileType};
use crate::Point;

/// Debug switches of a [TileRenderer](../render/struct.TileRenderer.html)
///
/// ```toml
/// debug_colors = true
/// offset_x = 8
/// collect_stats = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Draw every tile in a flat color per tile type, still lit
    pub debug_colors: bool,
    /// Added to every tile position
    pub offset_x: i32,
    /// Added to every tile position
    pub offset_y: i32,
    /// Count draws per tile and mask type
    pub collect_stats: bool,
}

impl RenderConfig {
    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml(&s)
    }
    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }
}

/// Number of tiles drawn per tile and mask type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderStats {
    counts: HashMap<(TileType, MaskType), usize>,
}

impl RenderStats {
    pub fn record(&mut self, tile: TileType, mask: MaskType) {
        *self.counts.entry((tile, mask)).or_insert(0) += 1;
    }
    pub fn get(&self, tile: TileType, mask: MaskType) -> usize {
        self.counts.get(&(tile, mask)).copied().unwrap_or(0)
    }
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
    pub fn clear(&mut self) {
        self.counts.clear();
    }
    /// Counts, most frequent first
    pub fn sorted(&self) -> Vec<(TileType, MaskType, usize)> {
        let mut v: Vec<_> = self.counts.iter().map(|(&(t, m), &n)| (t, m, n)).collect();
        v.sort_by(|a, b| b.2.cmp(&a.2)
                  .then_with(|| a.0.to_string().cmp(&b.0.to_string()))
                  .then_with(|| a.1.to_string().cmp(&b.1.to_string())));
        v
    }
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (tile, mask, n) in self.sorted() {
            writeln!(f, "{:>8} {:<18} {}", n, tile, mask)?;
        }
        Ok(())
    }
}
