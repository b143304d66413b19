//! I/O helpers for rasters, byte planes and JSON.
//!
//! - `load_raster`: read a PNG/JPEG/etc. into an owned gray or RGB raster.
//! - `save_byte_plane`: write an `ImageBufU8` (labels, spread bytes,
//!   responses) to a grayscale PNG, optionally stretching values.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageBufU8, RasterU8};
use crate::error::{Result, ShapeMatchError};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Pixel layout requested from `load_raster`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Gray,
    Rgb,
}

/// Load an image from disk as an 8-bit gray or interleaved RGB raster.
pub fn load_raster(path: &Path, mode: ColorMode) -> Result<RasterU8> {
    let img = image::open(path).map_err(|source| ShapeMatchError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let (width, height) = (img.width() as usize, img.height() as usize);
    match mode {
        ColorMode::Gray => RasterU8::from_raw(width, height, 1, img.into_luma8().into_raw()),
        ColorMode::Rgb => RasterU8::from_raw(width, height, 3, img.into_rgb8().into_raw()),
    }
}

/// Save a byte plane to a grayscale PNG. With `stretch`, the plane's
/// maximum is mapped to 255 so small label/response values are visible.
pub fn save_byte_plane(plane: &ImageBufU8, path: &Path, stretch: bool) -> Result<()> {
    ensure_parent_dir(path)?;
    let max = plane.data.iter().copied().max().unwrap_or(0);
    let scale = if stretch && max > 0 {
        255.0 / max as f32
    } else {
        1.0
    };
    let mut out = GrayImage::new(plane.w as u32, plane.h as u32);
    for y in 0..plane.h {
        for x in 0..plane.w {
            let v = (plane.get(x, y) as f32 * scale).round().min(255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path).map_err(|source| ShapeMatchError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| ShapeMatchError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| ShapeMatchError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ShapeMatchError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
