//! Sobel gradient field with per-pixel magnitude and angle in degrees.
//!
//! - Convolves the 3×3 Sobel pair with replicate-border clamping, once per
//!   channel of the raster.
//! - For 3-channel input each pixel keeps the channel with the largest
//!   magnitude; its angle travels with it and ties go to the lowest channel.
//! - `angle_deg` lies in [0, 360); a zero gradient has angle 0.
//!
//! Complexity: O(W·H·C); memory: two float planes.
use crate::angle::angle_degrees;
use crate::error::Result;
use crate::image::{ImageF32, ImageU8, ImageViewMut};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per-pixel gradient magnitude and direction, same size as the source.
#[derive(Clone, Debug)]
pub struct GradientField {
    /// Euclidean magnitude `sqrt(dx^2 + dy^2)`
    pub magnitude: ImageF32,
    /// `atan2(dy, dx)` in degrees, mapped into [0, 360)
    pub angle_deg: ImageF32,
}

impl GradientField {
    pub fn width(&self) -> usize {
        self.magnitude.w
    }

    pub fn height(&self) -> usize {
        self.magnitude.h
    }
}

#[inline]
fn sobel_at(image: &ImageU8, x_idx: [usize; 3], rows: &[&[u8]; 3], c: usize) -> (f32, f32) {
    let ch = image.channels;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for (ky, row) in rows.iter().enumerate() {
        let kx_row = &SOBEL_KERNEL_X[ky];
        let ky_row = &SOBEL_KERNEL_Y[ky];
        for (kx, &xi) in x_idx.iter().enumerate() {
            let v = row[xi * ch + c] as f32;
            sum_x += v * kx_row[kx];
            sum_y += v * ky_row[kx];
        }
    }
    (sum_x, sum_y)
}

/// Compute the gradient field of a 1- or 3-channel raster.
pub fn compute_gradient_field(image: &ImageU8) -> Result<GradientField> {
    image.validate()?;
    let (w, h) = (image.w, image.h);
    let mut magnitude = ImageF32::new(w, h);
    let mut angle_deg = ImageF32::new(w, h);

    for y in 0..h {
        let rows = [
            image.row(y.saturating_sub(1)),
            image.row(y),
            image.row((y + 1).min(h - 1)),
        ];
        let out_mag = magnitude.row_mut(y);
        let out_ang = angle_deg.row_mut(y);
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];
            let mut best = (0.0f32, 0.0f32, -1.0f32);
            for c in 0..image.channels {
                let (dx, dy) = sobel_at(image, x_idx, &rows, c);
                let mag = (dx * dx + dy * dy).sqrt();
                if mag > best.2 {
                    best = (dx, dy, mag);
                }
            }
            out_mag[x] = best.2;
            out_ang[x] = angle_degrees(best.0, best.1);
        }
    }

    Ok(GradientField {
        magnitude,
        angle_deg,
    })
}
