//! Scale pyramid of an exemplar patch for multi-scale training.
//!
//! Each requested scale factor produces one level resampled bilinearly from
//! the base raster, channel by channel. When a level shrinks the exemplar and
//! `blur_downscale` is set, the separable filter (Gaussian by default) is
//! applied first to limit aliasing. Border samples clamp to the image extents.

pub mod filters;
pub mod resample;

use crate::error::{Result, ShapeMatchError};
use crate::image::{ImageU8, RasterU8};
use filters::{blur_separable, SeparableFilter, StaticSeparableFilter, GAUSSIAN_5TAP};
use log::debug;
use resample::{channel_to_f32, resize_bilinear};
use serde::Deserialize;

/// Options controlling pyramid construction.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ScalePyramidOptions {
    /// Scale factors relative to the exemplar, one level each (> 0).
    pub scales: Vec<f32>,
    /// Blur before every level with a scale below 1.
    pub blur_downscale: bool,
    /// Filter used for the separable blur stage.
    #[serde(skip)]
    pub filter: StaticSeparableFilter,
}

impl Default for ScalePyramidOptions {
    fn default() -> Self {
        Self {
            scales: vec![1.0],
            blur_downscale: true,
            filter: GAUSSIAN_5TAP,
        }
    }
}

impl ScalePyramidOptions {
    pub fn new(scales: Vec<f32>) -> Self {
        Self {
            scales,
            ..Self::default()
        }
    }

    pub fn with_blur_downscale(mut self, blur_downscale: bool) -> Self {
        self.blur_downscale = blur_downscale;
        self
    }

    pub fn with_filter(mut self, filter: StaticSeparableFilter) -> Self {
        self.filter = filter;
        self
    }
}

impl std::fmt::Debug for ScalePyramidOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalePyramidOptions")
            .field("scales", &self.scales)
            .field("blur_downscale", &self.blur_downscale)
            .field("filter_taps", &self.filter.taps().len())
            .finish()
    }
}

/// One resampled copy of the exemplar.
#[derive(Clone, Debug)]
pub struct ScaleLevel {
    /// Requested scale factor.
    pub scale: f32,
    /// Width ratio actually realised after rounding to whole pixels.
    pub ratio: f32,
    pub image: RasterU8,
}

#[derive(Clone, Debug)]
pub struct ScalePyramid {
    levels: Vec<ScaleLevel>,
}

impl ScalePyramid {
    /// Resample `exemplar` to every scale in `options.scales`, in order.
    pub fn build(exemplar: &ImageU8, options: &ScalePyramidOptions) -> Result<Self> {
        exemplar.validate()?;
        if options.scales.is_empty() {
            return Err(ShapeMatchError::invalid("scale pyramid needs at least one scale"));
        }
        if let Some(&bad) = options.scales.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(ShapeMatchError::invalid(format!("invalid pyramid scale {bad}")));
        }

        let planes: Vec<_> = (0..exemplar.channels)
            .map(|c| channel_to_f32(exemplar, c))
            .collect();
        let mut levels = Vec::with_capacity(options.scales.len());
        for &scale in &options.scales {
            let nw = ((exemplar.w as f32 * scale).round() as usize).max(1);
            let nh = ((exemplar.h as f32 * scale).round() as usize).max(1);
            let mut raster = RasterU8::new(nw, nh, exemplar.channels);
            for (c, plane) in planes.iter().enumerate() {
                let resized = if options.blur_downscale && scale < 1.0 {
                    resize_bilinear(&blur_separable(plane, &options.filter), nw, nh)
                } else {
                    resize_bilinear(plane, nw, nh)
                };
                for y in 0..nh {
                    for x in 0..nw {
                        let v = resized.get(x, y).round().clamp(0.0, 255.0) as u8;
                        raster.set(x, y, c, v);
                    }
                }
            }
            let ratio = nw as f32 / exemplar.w as f32;
            debug!(
                "ScalePyramid::build level scale={:.3} ratio={:.4} -> {}x{}",
                scale, ratio, nw, nh
            );
            levels.push(ScaleLevel {
                scale,
                ratio,
                image: raster,
            });
        }
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[ScaleLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
