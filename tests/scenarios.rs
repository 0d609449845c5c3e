mod common;

use common::*;
use dunrender::*;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn solid_square_fully_lit_is_a_copy() {
    init();
    let src: Vec<u8> = (0 .. 1024).map(|i| (i * 7 % 251) as u8).collect();
    let (light, trn) = tables();
    let mut ren = TileRenderer::new(light, trn);
    let mut out = background(32, 32);
    ren.render_fully_lit_opaque_tile(TileType::Square, &mut out, Point::new(0, 31), &src).unwrap();
    for r in 0 .. 32 {
        assert_eq!(out.row(31 - r), &src[r * 32 .. (r + 1) * 32], "row {}", r);
    }
}

#[test]
fn transparent_square_clipped_left_blends_lit_pixels() {
    init();
    let img = TileImage::filled(TileType::TransparentSquare, 40);
    let cels = DungeonCels::from_frames(&[encode_tile(&img)]);
    let block = LevelCelBlock::new(1, TileType::TransparentSquare);
    let (light, trn) = tables();
    let mut ren = TileRenderer::new(light.clone(), trn.clone());
    let mut out = background(64, 40);
    let old = out.clone();
    ren.render_transparent_tile(&mut out, Point::new(-10, 35), &cels, block, 7).unwrap();
    let tbl = light.table(7).unwrap();
    for y in 4 ..= 35 {
        for x in 0 .. 22 {
            assert_eq!(out[(x, y)], trn.get(old[(x, y)], tbl[40]), "({}, {})", x, y);
        }
        for x in 22 .. 64 {
            assert_eq!(out[(x, y)], old[(x, y)]);
        }
    }
    assert_eq!(out.row(3), old.row(3));
}

#[test]
fn fully_lit_ignores_light_table() {
    let src = encode_tile(&pattern(TileType::LeftTrapezoid, 9));
    let (_, trn) = tables();
    let garbage = LightTables::from_fn(|_, _| 0xEE);
    let (light, _) = tables();
    let mut a = TileRenderer::new(garbage, trn.clone());
    let mut b = TileRenderer::new(light, trn);
    let mut out_a = background(64, 64);
    let mut out_b = out_a.clone();
    for &mask in &[MaskType::Solid, MaskType::Left, MaskType::Transparent] {
        a.draw_frame(&mut out_a, Point::new(3, 40), TileType::LeftTrapezoid, &src, mask, 0, ClipRegime::Full).unwrap();
        b.draw_frame(&mut out_b, Point::new(3, 40), TileType::LeftTrapezoid, &src, mask, 0, ClipRegime::Full).unwrap();
    }
    assert_eq!(out_a, out_b);
}

#[test]
fn fully_dark_writes_zero() {
    let (light, trn) = tables();
    let mut ren = TileRenderer::new(light, trn);
    for &tile in TILE_TYPES.iter() {
        let img = pattern(tile, 100);
        let src = encode_tile(&img);
        let mut out = background(32, 32);
        ren.draw_frame(&mut out, Point::new(0, 31), tile, &src, MaskType::Solid, LIGHTS_MAX, ClipRegime::Full).unwrap();
        for r in 0 .. tile.height() {
            for x in 0 .. WIDTH {
                if img.get(x, r).is_some() {
                    assert_eq!(out[(x as usize, (31 - r) as usize)], 0, "{} ({}, {})", tile, x, r);
                }
            }
        }
    }
}

#[test]
fn black_tile_half_off_the_bottom() {
    let mut out = Surface::new(96, 40);
    out.fill(200);
    // the lower 16 rows fall below the surface
    render_black_tile(&mut out, 10, 40 + 15);
    let black = out.data.iter().filter(|&&v| v == 0).count();
    let upper: i32 = (1 ..= TRIANGLE_UPPER_HEIGHT).map(|i| TILE_WIDTH - 2 * XSTEP * i).sum();
    assert_eq!(black, upper as usize);
    // widest visible row is the first upper row
    assert!(out.row(39)[12 .. 72].iter().all(|&v| v == 0));
    assert_eq!(out.row(39)[11], 200);
    assert_eq!(out.row(39)[72], 200);
    assert!(out.row(24).iter().all(|&v| v == 200));
}

#[test]
fn renderer_offset_moves_black_tiles() {
    let (light, trn) = tables();
    let config = RenderConfig::from_toml("offset_x = 16\noffset_y = 2\n").unwrap();
    let ren = TileRenderer::with_config(light, trn, config);
    let mut a = Surface::new(128, 64);
    let mut b = a.clone();
    ren.render_single_color_tile(&mut a, 0, 30, 5);
    render_single_color_tile(&mut b, 16, 32, 5);
    assert_eq!(a, b);
}

#[test]
fn errors_are_reported() {
    init();
    let (light, trn) = tables();
    let mut ren = TileRenderer::new(light, trn);
    let mut out = Surface::new(64, 64);
    let square = encode_tile(&TileImage::filled(TileType::Square, 1));
    let mut bad_rle = vec![40u8];
    bad_rle.extend(vec![1u8; 40]);
    let cels = DungeonCels::from_frames(&[square, bad_rle]);

    let e = ren.render_tile(&mut out, Point::new(0, 31), &cels, LevelCelBlock::new(3, TileType::Square), MaskType::Solid, 0);
    assert!(matches!(e, Err(RenderError::FrameOutOfRange { frame: 3, count: 2 })));

    let e = ren.render_tile(&mut out, Point::new(0, 31), &cels, LevelCelBlock::new(2, TileType::TransparentSquare), MaskType::Solid, 0);
    assert!(matches!(e, Err(RenderError::RleOverrun { row: 0, .. })));

    let e = ren.render_tile(&mut out, Point::new(0, 31), &cels, LevelCelBlock::new(1, TileType::Square), MaskType::Solid, 16);
    assert!(matches!(e, Err(RenderError::LightLevel { level: 16, .. })));

    let e = ren.render_tile(&mut out, Point::new(0, 31), &cels, LevelCelBlock::new(1, TileType::Square), MaskType::RightFoliage, 0);
    assert!(matches!(e, Err(RenderError::InvalidMask { .. })));

    // off the surface entirely
    ren.render_tile(&mut out, Point::new(500, 31), &cels, LevelCelBlock::new(1, TileType::Square), MaskType::Solid, 0).unwrap();
}

#[test]
fn translated_frame_draws_translated_pixels() {
    let mut tbl = [0u8; 256];
    tbl.iter_mut().enumerate().for_each(|(i, v)| *v = 255 - i as u8);
    let (light, trn) = tables();
    let mut ren = TileRenderer::new(light, trn);
    for &tile in TILE_TYPES.iter() {
        let img = pattern(tile, 17);
        let cels = DungeonCels::from_frames(&[encode_tile(&img)]);
        let block = LevelCelBlock::new(1, tile);
        let mut swapped = Vec::new();
        apply_trans(&cels, block, &mut swapped, &tbl).unwrap();
        assert_eq!(swapped.len(), encode_tile(&img).len());

        let mut expected = img.clone();
        expected.map(|v| tbl[v as usize]);
        let mut a = Surface::new(32, 32);
        let mut b = a.clone();
        ren.draw_frame(&mut a, Point::new(0, 31), tile, &swapped, MaskType::Solid, 0, ClipRegime::Full).unwrap();
        ren.draw_frame(&mut b, Point::new(0, 31), tile, &encode_tile(&expected), MaskType::Solid, 0, ClipRegime::Full).unwrap();
        assert_eq!(a, b, "{}", tile);
    }
}

#[test]
fn decode_restores_every_shape() {
    for &tile in TILE_TYPES.iter() {
        let img = pattern(tile, 55);
        let dec = decode_tile(tile, &encode_tile(&img)).unwrap();
        assert_eq!(dec, img, "{}", tile);
    }
}

#[test]
fn stats_count_draws() {
    let (light, trn) = tables();
    let config = RenderConfig { collect_stats: true, ..RenderConfig::default() };
    let mut ren = TileRenderer::with_config(light, trn, config);
    let src = encode_tile(&pattern(TileType::RightTrapezoid, 0));
    let mut out = Surface::new(64, 64);
    for x in 0 .. 4 {
        ren.draw_frame(&mut out, Point::new(x * 8, 40), TileType::RightTrapezoid, &src, MaskType::Right, 3, ClipRegime::LeftAndVertical).unwrap();
    }
    ren.draw_frame(&mut out, Point::new(-100, 40), TileType::RightTrapezoid, &src, MaskType::Right, 3, ClipRegime::Full).unwrap();
    assert_eq!(ren.stats().get(TileType::RightTrapezoid, MaskType::Right), 4);
    assert_eq!(ren.stats().total(), 4);
    ren.clear_stats();
    assert_eq!(ren.stats().total(), 0);
}

#[test]
fn extreme_positions_and_offsets_are_skipped() {
    init();
    let (light, trn) = tables();
    let mut ren = TileRenderer::new(light.clone(), trn.clone());
    let cels = DungeonCels::from_frames(&[encode_tile(&pattern(TileType::Square, 1))]);
    let block = LevelCelBlock::new(1, TileType::Square);
    let mut out = Surface::new(64, 64);
    out.fill(200);
    let far = [i32::MIN, -1_000_000, 1_000_000, i32::MAX - 5, i32::MAX];
    for &x in &far {
        for &y in &far {
            ren.render_tile(&mut out, Point::new(x, y), &cels, block, MaskType::Solid, 0).unwrap();
            ren.render_black_tile(&mut out, x, y);
        }
        ren.render_black_tile(&mut out, 10, x);
    }
    assert!(out.data.iter().all(|&v| v == 200));

    let config = RenderConfig::from_toml(&format!("offset_x = {}\noffset_y = {}\n", i32::MAX, i32::MIN)).unwrap();
    let mut ren = TileRenderer::with_config(light, trn, config);
    ren.render_black_tile(&mut out, 10, 40);
    ren.render_tile(&mut out, Point::new(10, 40), &cels, block, MaskType::Solid, 0).unwrap();
    assert!(out.data.iter().all(|&v| v == 200));
}
