#![allow(dead_code)]

use dunrender::*;

/// What a mask does with one pixel
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum Paint {
    Opaque,
    Blend,
    Skip,
}

/// Per pixel mask rule, row `r` counted from the bottom
pub fn paint(mask: MaskType, x: i32, r: i32) -> Paint {
    let (opaque_prefix, inc) = match mask {
        MaskType::Solid => (false, 0),
        MaskType::Transparent => (true, 0),
        MaskType::Left => (false, 2),
        MaskType::Right => (true, -2),
        MaskType::LeftFoliage => (true, 2),
        MaskType::RightFoliage => (false, -2),
    };
    let init = if inc >= 0 { -32 } else { 64 };
    let prefix = init + inc * r;
    let opaque = if opaque_prefix { x < prefix } else { x >= prefix };
    if opaque {
        Paint::Opaque
    } else if inc != 0 && opaque_prefix == (inc > 0) {
        Paint::Skip
    } else {
        Paint::Blend
    }
}

/// Light and blend tables where every entry is easy to tell apart
pub fn tables() -> (LightTables, TransparencyTable) {
    let light = LightTables::from_fn(|level, i| i.wrapping_mul(3).wrapping_add(level.wrapping_mul(17)));
    let trn = TransparencyTable::from_fn(|bg, fg| bg.wrapping_mul(7) ^ fg.wrapping_add(13));
    (light, trn)
}

/// Surface with a position dependent background
pub fn background(width: usize, height: usize) -> Surface {
    let mut out = Surface::new(width, height);
    for y in 0 .. height {
        for x in 0 .. width {
            out[(x, y)] = (x * 5 + y * 11) as u8;
        }
    }
    out
}

/// Draw `img` one pixel at a time
///
/// `debug` is the tint color when debug colors are on.
pub fn reference_draw(out: &mut Surface, pos: Point, img: &TileImage, mask: MaskType, level: u8,
                      light: &LightTables, trn: &TransparencyTable, debug: Option<u8>) {
    let tbl = if level == 0 { &FULLY_LIT } else { light.table(level).unwrap() };
    let debug = if level == LIGHTS_MAX { None } else { debug };
    for r in 0 .. img.height() {
        for x in 0 .. img.width() {
            let v = match img.get(x, r) {
                Some(v) => v,
                None => continue,
            };
            let (sx, sy) = (pos.x + x, pos.y - r);
            if sx < 0 || sy < 0 || sx >= out.width as i32 || sy >= out.height as i32 {
                continue;
            }
            let d = out[(sx as usize, sy as usize)];
            let new = match paint(mask, x, r) {
                Paint::Skip => d,
                Paint::Opaque => {
                    if level == LIGHTS_MAX {
                        0
                    } else if let Some(c) = debug {
                        tbl[c as usize]
                    } else if level == 0 {
                        v
                    } else {
                        tbl[v as usize]
                    }
                }
                Paint::Blend => {
                    if level == LIGHTS_MAX {
                        trn.get(0, d)
                    } else if let Some(c) = debug {
                        trn.get(d, tbl[c.wrapping_add(4) as usize])
                    } else if level == 0 {
                        trn.get(d, v)
                    } else {
                        trn.get(d, tbl[v as usize])
                    }
                }
            };
            out[(sx as usize, sy as usize)] = new;
        }
    }
}

/// Fill the 64x31 diamond one pixel at a time
pub fn reference_diamond(out: &mut Surface, sx: i32, sy: i32, color: u8) {
    for r in 0 .. TRIANGLE_HEIGHT {
        let (start, width) = diamond_row_span(r);
        for x in start .. start + width {
            let (px, py) = (sx + x, sy - r);
            if px >= 0 && py >= 0 && px < out.width as i32 && py < out.height as i32 {
                out[(px as usize, py as usize)] = color;
            }
        }
    }
}

/// Image with a different value in every pixel of the shape
pub fn pattern(tile: TileType, seed: u8) -> TileImage {
    TileImage::from_fn(tile, |x, r| {
        let v = (x as u8).wrapping_mul(13).wrapping_add((r as u8).wrapping_mul(29)).wrapping_add(seed);
        if tile == TileType::TransparentSquare && (x + r) % 5 == 0 {
            None
        } else {
            Some(v)
        }
    })
}

/// Masks each tile type accepts
pub fn valid_masks(tile: TileType) -> Vec<MaskType> {
    MASK_TYPES.iter().copied().filter(|&m| tile.supports(m)).collect()
}

/// Positions that hit every clip regime on a 96x80 surface
pub fn positions() -> Vec<Point> {
    vec![
        Point::new(20, 40),
        Point::new(20, 10),
        Point::new(20, 90),
        Point::new(-7, 40),
        Point::new(-20, 5),
        Point::new(80, 40),
        Point::new(90, 95),
        Point::new(0, 31),
        Point::new(64, 79),
        Point::new(-31, 100),
    ]
}

pub fn assert_same(got: &Surface, expected: &Surface, what: &str) {
    for y in 0 .. got.height {
        for x in 0 .. got.width {
            assert_eq!(got[(x, y)], expected[(x, y)], "{} differs at ({}, {})", what, x, y);
        }
    }
}
