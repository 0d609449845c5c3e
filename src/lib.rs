/// How does this work
///    ren = TileRenderer( LightTables, TransparencyTable, RenderConfig )
///    ren.render_tile(surface, position, cels, block, mask, light)
///  Clip
///    calculate_clip()          -- top/bottom/left/right against the surface
///    ClipRegime::select()      -- Full, Vertical, LeftAndVertical, RightAndVertical
///  Dispatch (closed enums, monomorphic below this point)
///    tile type
///     mask type                -- Mask<OPAQUE_PREFIX, PREFIX_INCREMENT>
///      light level             -- FullyDark, FullyLit, PartiallyLit, DebugColor
///       render_square / render_transparent_square
///       render_triangle / render_trapezoid
///         calculate_diamond_clip_y()
///         rows, bottom to top
///           render_line()      -- opaque / blended / skipped spans
///             Light::opaque()
///             Light::blended()
///  Black tiles
///    render_single_color_tile()  -- 64x31 diamond fill, same four regimes

pub mod error;
pub mod tile;
pub mod buffer;
pub mod color;
pub mod light;
pub mod mask;
pub mod clip;
pub mod rle;
pub mod cel;
pub mod square;
pub mod triangle;
pub mod trapezoid;
pub mod black;
pub mod config;
pub mod render;
pub mod ppm;

pub use error::*;
pub use tile::*;
pub use buffer::*;
pub use color::*;
pub use light::*;
pub use mask::*;
pub use clip::*;
pub use rle::*;
pub use cel::*;
pub use black::*;
pub use config::*;
pub use render::*;
pub use ppm::*;

/// Width of a full isometric tile (two primitives side by side)
pub const TILE_WIDTH: i32 = 64;
/// Height of a full tile column primitive
pub const TILE_HEIGHT: i32 = 32;

/// Width of a tile rendering primitive
pub const WIDTH: i32 = TILE_WIDTH / 2;
/// Height of a tile rendering primitive (except triangles)
pub const HEIGHT: i32 = TILE_HEIGHT;
/// Height of the lower triangle of a triangular or trapezoid tile
pub const LOWER_HEIGHT: i32 = TILE_HEIGHT / 2;
/// Height of the upper triangle of a triangular tile
pub const TRIANGLE_UPPER_HEIGHT: i32 = TILE_HEIGHT / 2 - 1;
/// Height of the upper rectangle of a trapezoid tile
pub const TRAPEZOID_UPPER_HEIGHT: i32 = TILE_HEIGHT / 2;
/// Height of a triangular tile
pub const TRIANGLE_HEIGHT: i32 = LOWER_HEIGHT + TRIANGLE_UPPER_HEIGHT;
/// For triangles, for each pixel drawn vertically, this many pixels are drawn horizontally
pub const XSTEP: i32 = 2;

/// Darkest light level; index 0 is fully lit
pub const LIGHTS_MAX: u8 = 15;

/// Screen position
///
/// `y` is the bottom row of whatever is drawn there; tiles grow upwards.
/// Adding points saturates at the `i32` range.
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Point {
        Point::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }
}
