//! Renderer
//!
//! Resolves tile type, mask, light level and clip regime once per tile
//! and hands the tile to a fully specialised routine.

use log::{debug, error, trace};

use crate::black::render_single_color_tile;
use crate::buffer::Surface;
use crate::cel::DungeonCels;
use crate::clip::{calculate_clip, Clip, ClipLeftAndVertical, ClipRegime, ClipRightAndVertical, ClipVertical, Regime, Unclipped};
use crate::config::{RenderConfig, RenderStats};
use crate::error::{RenderError, Result};
use crate::light::{DebugColor, FullyDark, FullyLit, Light, LightKind, LightTables, Lut, PartiallyLit, TransparencyTable, FULLY_LIT};
use crate::mask::{LeftFoliageMask, LeftMask, MaskKind, RightFoliageMask, RightMask, SolidMask, TransparentMask};
use crate::square::{render_square, render_transparent_square};
use crate::tile::{LevelCelBlock, MaskType, TileType};
use crate::trapezoid::render_trapezoid;
use crate::triangle::render_triangle;
use crate::{Point, WIDTH};

/// One tile, ready to draw
struct Job<'a> {
    tile: TileType,
    src: &'a [u8],
    lut: Lut<'a>,
    origin: isize,
    clip: Clip,
}

fn draw_shape<L: Light, M: MaskKind, R: Regime>(out: &mut Surface, job: &Job) -> Result<()> {
    let (src, lut, origin, clip) = (job.src, &job.lut, job.origin, &job.clip);
    match job.tile {
        TileType::Square => render_square::<L, M, R>(out, origin, src, lut, clip),
        TileType::TransparentSquare => render_transparent_square::<L, M, R>(out, origin, src, lut, clip)?,
        TileType::LeftTriangle => render_triangle::<L, M, R, true>(out, origin, src, lut, clip),
        TileType::RightTriangle => render_triangle::<L, M, R, false>(out, origin, src, lut, clip),
        TileType::LeftTrapezoid => render_trapezoid::<L, M, R, true>(out, origin, src, lut, clip),
        TileType::RightTrapezoid => render_trapezoid::<L, M, R, false>(out, origin, src, lut, clip),
    }
    Ok(())
}

fn dispatch_regime<L: Light, M: MaskKind>(regime: ClipRegime, out: &mut Surface, job: &Job) -> Result<()> {
    match regime {
        ClipRegime::Full => draw_shape::<L, M, Unclipped>(out, job),
        ClipRegime::Vertical => draw_shape::<L, M, ClipVertical>(out, job),
        ClipRegime::LeftAndVertical => draw_shape::<L, M, ClipLeftAndVertical>(out, job),
        ClipRegime::RightAndVertical => draw_shape::<L, M, ClipRightAndVertical>(out, job),
    }
}

fn dispatch_mask<L: Light>(mask: MaskType, regime: ClipRegime, out: &mut Surface, job: &Job) -> Result<()> {
    match mask {
        MaskType::Solid => dispatch_regime::<L, SolidMask>(regime, out, job),
        MaskType::Transparent => dispatch_regime::<L, TransparentMask>(regime, out, job),
        MaskType::Left => dispatch_regime::<L, LeftMask>(regime, out, job),
        MaskType::Right => dispatch_regime::<L, RightMask>(regime, out, job),
        MaskType::LeftFoliage => dispatch_regime::<L, LeftFoliageMask>(regime, out, job),
        MaskType::RightFoliage => dispatch_regime::<L, RightFoliageMask>(regime, out, job),
    }
}

fn dispatch(light: LightKind, mask: MaskType, regime: ClipRegime, out: &mut Surface, job: &Job) -> Result<()> {
    match light {
        LightKind::FullyDark => dispatch_mask::<FullyDark>(mask, regime, out, job),
        LightKind::FullyLit => dispatch_mask::<FullyLit>(mask, regime, out, job),
        LightKind::PartiallyLit => dispatch_mask::<PartiallyLit>(mask, regime, out, job),
        LightKind::DebugColor => dispatch_mask::<DebugColor>(mask, regime, out, job),
    }
}

/// Check that `src` holds a whole frame of `tile`
fn check_source(tile: TileType, src: &[u8]) -> Result<()> {
    if let Some(needed) = tile.source_len() {
        if src.len() < needed {
            return Err(RenderError::Truncated { needed, len: src.len() });
        }
    }
    Ok(())
}

/// Draws dungeon tiles onto 8-bit surfaces
///
/// Owns the light tables, the transparency table and the debug
/// settings. Draw calls borrow the surface and the frame data.
#[derive(Debug,Clone)]
pub struct TileRenderer {
    light: LightTables,
    trn: TransparencyTable,
    config: RenderConfig,
    stats: RenderStats,
}

impl TileRenderer {
    pub fn new(light: LightTables, trn: TransparencyTable) -> Self {
        Self::with_config(light, trn, RenderConfig::default())
    }
    pub fn with_config(light: LightTables, trn: TransparencyTable, config: RenderConfig) -> Self {
        debug!("tile renderer: {:?}", config);
        TileRenderer { light, trn, config, stats: RenderStats::default() }
    }
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
    pub fn set_config(&mut self, config: RenderConfig) {
        debug!("tile renderer: {:?}", config);
        self.config = config;
    }
    pub fn light_tables(&self) -> &LightTables {
        &self.light
    }
    pub fn transparency_table(&self) -> &TransparencyTable {
        &self.trn
    }
    /// Draw counts, only collected with `collect_stats`
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }
    pub fn clear_stats(&mut self) {
        self.stats.clear();
    }

    /// Draw the frame of `block` with its bottom-left pixel at `position`
    ///
    /// The clip regime is picked from the position. A tile entirely
    /// outside the surface draws nothing and is not an error.
    pub fn render_tile(&mut self, out: &mut Surface, position: Point, cels: &DungeonCels,
                       block: LevelCelBlock, mask: MaskType, light: u8) -> Result<()> {
        let kind = LightKind::select(light, self.config.debug_colors);
        let res = match cels.block(block) {
            Ok((tile, src)) => self.draw(out, position, tile, src, mask, light, kind, None),
            Err(e) => Err(e),
        };
        if let Err(ref e) = res {
            error!("block {:#06x} (frame {}): {}", block.0, block.frame(), e);
        }
        res
    }

    /// Draw raw frame source with an explicit clip regime
    ///
    /// Fails with `RenderError::Regime` when `regime` cannot handle the
    /// edges the tile actually crosses.
    pub fn draw_frame(&mut self, out: &mut Surface, position: Point, tile: TileType, src: &[u8],
                      mask: MaskType, light: u8, regime: ClipRegime) -> Result<()> {
        let kind = LightKind::select(light, self.config.debug_colors);
        let res = self.draw(out, position, tile, src, mask, light, kind, Some(regime));
        if let Err(ref e) = res {
            error!("{} frame at {:?}: {}", tile, position, e);
        }
        res
    }

    /// Draw without a mask
    pub fn render_opaque_tile(&mut self, out: &mut Surface, position: Point, cels: &DungeonCels,
                              block: LevelCelBlock, light: u8) -> Result<()> {
        self.render_tile(out, position, cels, block, MaskType::Solid, light)
    }

    /// Draw the whole tile blended with the surface
    pub fn render_transparent_tile(&mut self, out: &mut Surface, position: Point, cels: &DungeonCels,
                                   block: LevelCelBlock, light: u8) -> Result<()> {
        self.render_tile(out, position, cels, block, MaskType::Transparent, light)
    }

    /// Copy raw frame source without mask or lighting
    pub fn render_fully_lit_opaque_tile(&mut self, tile: TileType, out: &mut Surface, position: Point,
                                        src: &[u8]) -> Result<()> {
        let res = self.draw(out, position, tile, src, MaskType::Solid, 0, LightKind::FullyLit, None);
        if let Err(ref e) = res {
            error!("{} frame at {:?}: {}", tile, position, e);
        }
        res
    }

    /// Fill a 64x31 diamond; see [render_single_color_tile](../black/fn.render_single_color_tile.html)
    pub fn render_single_color_tile(&self, out: &mut Surface, sx: i32, sy: i32, color: u8) {
        let p = Point::new(sx, sy) + self.config.offset();
        render_single_color_tile(out, p.x, p.y, color);
    }

    pub fn render_black_tile(&self, out: &mut Surface, sx: i32, sy: i32) {
        self.render_single_color_tile(out, sx, sy, 0);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw(&mut self, out: &mut Surface, position: Point, tile: TileType, src: &[u8],
            mask: MaskType, light: u8, kind: LightKind, regime: Option<ClipRegime>) -> Result<()> {
        if !tile.supports(mask) {
            return Err(RenderError::InvalidMask { tile, mask });
        }
        check_source(tile, src)?;
        let table = self.light.table(light)?;
        let lut = Lut {
            light: if light == 0 { &FULLY_LIT } else { table },
            trn: &self.trn,
            debug_color: tile.debug_color(),
        };

        let p = position + self.config.offset();
        let clip = calculate_clip(p.x, p.y, WIDTH, tile.height(), out.width as i32, out.height as i32);
        if clip.is_empty() {
            trace!("{} at {:?} is off the surface", tile, p);
            return Ok(());
        }
        let required = ClipRegime::select(&clip);
        let regime = regime.unwrap_or(required);
        if !regime.handles(&clip) {
            return Err(RenderError::Regime { requested: regime, required });
        }
        if self.config.collect_stats {
            self.stats.record(tile, mask);
        }
        trace!("{} {} {:?} {:?} at {:?}", tile, mask, kind, regime, p);

        let job = Job { tile, src, lut, origin: out.offset(p.x, p.y), clip };
        dispatch(kind, mask, regime, out, &job)
    }
}
