//! I/O helpers for camera frames and JSON.
//!
//! - `load_ycbcr_image`: read a PNG/JPEG/etc. and convert it to YCbCr.
//! - `save_overlay`: write the frame as RGB with rectangles burnt in.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{Pixel, YCbCrImage};
use image::{Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Axis-aligned rectangle outline drawn by [`save_overlay`].
#[derive(Clone, Copy, Debug)]
pub struct OverlayBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
    pub rgb: [u8; 3],
}

/// Load an image from disk and convert it to YCbCr.
pub fn load_ycbcr_image(path: &Path) -> Result<YCbCrImage, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img
        .pixels()
        .map(|p| Pixel::from_rgb(p[0], p[1], p[2]))
        .collect();
    Ok(YCbCrImage {
        w: width,
        h: height,
        data,
    })
}

/// Save the frame as an RGB PNG with the given boxes outlined.
pub fn save_overlay(image: &YCbCrImage, boxes: &[OverlayBox], path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = RgbImage::new(image.w as u32, image.h as u32);
    for y in 0..image.h {
        for x in 0..image.w {
            out.put_pixel(x as u32, y as u32, Rgb(image.get(x, y).to_rgb()));
        }
    }
    for b in boxes {
        draw_box(&mut out, b);
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

fn draw_box(out: &mut RgbImage, b: &OverlayBox) {
    let (w, h) = (out.width() as i32, out.height() as i32);
    let mut put = |x: i32, y: i32| {
        if x >= 0 && y >= 0 && x < w && y < h {
            out.put_pixel(x as u32, y as u32, Rgb(b.rgb));
        }
    };
    let (x0, x1) = (b.x0.min(b.x1), b.x0.max(b.x1));
    let (y0, y1) = (b.y0.min(b.y1), b.y0.max(b.y1));
    for x in x0..=x1 {
        put(x, y0);
        put(x, y1);
    }
    for y in y0..=y1 {
        put(x0, y);
        put(x1, y);
    }
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
