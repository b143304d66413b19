//! Training path: exemplar patch → scattered, labelled feature set.
//!
//! 1. Crop to the ROI, compute the gradient field and quantize it with the
//!    weak magnitude gate (no spreading).
//! 2. Candidates are pixels with `magnitude > strong_threshold` and a
//!    non-zero label, stably sorted by descending magnitude.
//! 3. Scattered selection keeps `N` candidates at a minimum pairwise
//!    distance that starts at `candidates / N + 1` and relaxes by one pixel
//!    per exhausted scan, never below zero.
use super::{Template, TemplateFeature, TemplateParams};
use crate::edges::{compute_gradient_field, GradientField};
use crate::error::{Result, ShapeMatchError};
use crate::image::{ImageBufU8, ImageU8};
use crate::orientation::quantize_orientations;
use crate::pyramid::ScalePyramid;
use crate::types::Rect;
use log::debug;
use std::time::Instant;

/// Strong-gradient pixel eligible for selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub x: usize,
    pub y: usize,
    pub label: u8,
    /// Gradient magnitude used for ranking.
    pub score: f32,
}

impl Candidate {
    #[inline]
    fn dist2(&self, other: &Candidate) -> f32 {
        let dx = self.x as f32 - other.x as f32;
        let dy = self.y as f32 - other.y as f32;
        dx * dx + dy * dy
    }
}

#[derive(Clone, Debug)]
pub struct TemplateBuilder {
    params: TemplateParams,
}

impl TemplateBuilder {
    pub fn new(params: TemplateParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TemplateParams {
        &self.params
    }

    /// Learn a template from `patch` (restricted to `roi` when given).
    pub fn build(
        &self,
        class_id: impl Into<String>,
        patch: &ImageU8,
        roi: Option<Rect>,
    ) -> Result<Template> {
        self.build_scaled(class_id, patch, roi, 1.0)
    }

    /// As [`build`](Self::build), recording `scale_factor` as the resize
    /// ratio that produced `patch`.
    pub fn build_scaled(
        &self,
        class_id: impl Into<String>,
        patch: &ImageU8,
        roi: Option<Rect>,
        scale_factor: f32,
    ) -> Result<Template> {
        let class_id = class_id.into();
        self.params.validate()?;
        patch.validate()?;
        let view = match roi {
            Some(rect) => patch.crop(rect)?,
            None => *patch,
        };

        let start = Instant::now();
        let field = compute_gradient_field(&view)?;
        let quantized = quantize_orientations(
            &field,
            self.params.weak_threshold,
            self.params.vote_threshold,
        );
        let candidates = extract_candidates(&field, &quantized, self.params.strong_threshold);
        let (selected, spacing) = select_scattered(&candidates, self.params.num_features)?;
        let features = selected
            .iter()
            .map(|c| TemplateFeature {
                x: c.x,
                y: c.y,
                label: c.label,
            })
            .collect();
        debug!(
            "TemplateBuilder::build '{}' {}x{} scale={:.3}: {} candidates, spacing {:.1}, {:.2} ms",
            class_id,
            view.w,
            view.h,
            scale_factor,
            candidates.len(),
            spacing,
            start.elapsed().as_secs_f64() * 1000.0
        );
        Template::from_parts(
            class_id,
            view.w,
            view.h,
            self.params.match_threshold,
            scale_factor,
            features,
        )
    }

    /// One template per pyramid level, in level order. The ROI is given in
    /// base-level coordinates and scaled with each level. Templates record
    /// the realised resize ratio of their level as `scale_factor`.
    pub fn build_pyramid(
        &self,
        class_id: &str,
        pyramid: &ScalePyramid,
        roi: Option<Rect>,
    ) -> Vec<Result<Template>> {
        pyramid
            .levels()
            .iter()
            .map(|level| {
                let image = level.image.as_view();
                let roi = roi.map(|r| scale_roi(r, level.scale, image.w, image.h));
                self.build_scaled(class_id, &image, roi, level.ratio)
            })
            .collect()
    }
}

fn scale_roi(roi: Rect, scale: f32, w: usize, h: usize) -> Rect {
    let x = ((roi.x as f32 * scale).round() as usize).min(w);
    let y = ((roi.y as f32 * scale).round() as usize).min(h);
    let rw = ((roi.w as f32 * scale).round() as usize).max(1).min(w - x);
    let rh = ((roi.h as f32 * scale).round() as usize).max(1).min(h - y);
    Rect::new(x, y, rw, rh)
}

/// Strong, labelled pixels sorted by descending magnitude (stable).
pub fn extract_candidates(
    field: &GradientField,
    quantized: &ImageBufU8,
    strong_threshold: f32,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for y in 0..quantized.h {
        for x in 0..quantized.w {
            let q = quantized.get(x, y);
            let score = field.magnitude.get(x, y);
            if q != 0 && score > strong_threshold {
                candidates.push(Candidate {
                    x,
                    y,
                    label: q.trailing_zeros() as u8,
                    score,
                });
            }
        }
    }
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates
}

/// Greedy scattered sampling of `n` candidates.
///
/// Returns the selection in pick order together with the final (smallest)
/// spacing; every selected pair is at least that far apart. The number of
/// scans is bounded by `ceil(d0) + 2`.
pub fn select_scattered(candidates: &[Candidate], n: usize) -> Result<(Vec<Candidate>, f32)> {
    if n == 0 {
        return Err(ShapeMatchError::invalid("feature count must be positive"));
    }
    if candidates.len() < n {
        return Err(ShapeMatchError::InsufficientFeatures {
            requested: n,
            available: candidates.len(),
        });
    }

    let mut distance = candidates.len() as f32 / n as f32 + 1.0;
    let max_scans = distance.ceil() as usize + 2;
    let mut taken = vec![false; candidates.len()];
    let mut selected: Vec<Candidate> = Vec::with_capacity(n);

    for _ in 0..max_scans {
        let min_d2 = distance * distance;
        for (i, c) in candidates.iter().enumerate() {
            if taken[i] || selected.iter().any(|s| s.dist2(c) < min_d2) {
                continue;
            }
            taken[i] = true;
            selected.push(*c);
            if selected.len() == n {
                return Ok((selected, distance));
            }
        }
        distance = (distance - 1.0).max(0.0);
    }

    Err(ShapeMatchError::InsufficientFeatures {
        requested: n,
        available: selected.len(),
    })
}
