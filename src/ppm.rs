//! Image snapshots of indexed surfaces
//!
//! Surfaces are expanded through a [Palette](../color/struct.Palette.html)
//! to 24-bit RGB before writing. The format follows the file extension
//! (`.png`, `.ppm`, `.bmp`, ...).
use std::path::Path;

use log::{debug, warn};

use crate::buffer::Surface;
use crate::color::Palette;
use crate::error::Result;

/// Read an image as packed RGB, returning `(data, width, height)`
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<(Vec<u8>,usize,usize)> {
    let img = image::open(filename)?.to_rgb();
    let (w, h) = img.dimensions();
    let buf = img.into_raw();
    Ok((buf, w as usize, h as usize))
}

/// Write packed RGB data
pub fn write_file<P: AsRef<Path>>(buf: &[u8], width: usize, height: usize, filename: P) -> Result<()> {
    image::save_buffer(filename, buf, width as u32, height as u32, image::RGB(8))?;
    Ok(())
}

/// Write the visible part of `surface` through `palette`
pub fn write_surface<P: AsRef<Path>>(surface: &Surface, palette: &Palette, filename: P) -> Result<()> {
    debug!("snapshot {}x{} -> {}", surface.width, surface.height, filename.as_ref().display());
    let rgb = palette.to_rgb(surface);
    write_file(&rgb, surface.width, surface.height, filename)
}

/// Compare two image files pixel by pixel
///
/// Differences are logged as `warn!`, one line per channel.
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool> {
    let (d1,w1,h1) = read_file(f1)?;
    let (d2,w2,h2) = read_file(f2)?;
    if w1 != w2 || h1 != h2 {
        warn!("image sizes differ: {}x{} vs {}x{}", w1, h1, w2, h2);
        return Ok(false);
    }
    let mut flag = true;
    for (i,(v1,v2)) in d1.iter().zip(d2.iter()).enumerate() {
        if v1 != v2 {
            warn!("{} [{},{},{}]: {} {}", i, (i/3)%w1, (i/3)/w1, i%3, v1, v2);
            flag = false;
        }
    }
    Ok(flag)
}
