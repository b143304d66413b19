//! Learned templates: a sparse set of labelled edge features.
//!
//! A [`Template`] is produced once by the [`TemplateBuilder`] and then only
//! read. Fields are private; `with_match_threshold` returns a new value.
//! Deserialization goes through the same validation as [`Template::from_parts`].

pub mod builder;
pub mod params;

pub use builder::{select_scattered, Candidate, TemplateBuilder};
pub use params::TemplateParams;

use crate::angle::LABEL_COUNT;
use crate::error::{Result, ShapeMatchError};
use crate::response::MAX_SIMILARITY;
use serde::{Deserialize, Serialize};

/// Largest feature count whose best raw score still fits the i16 accumulator.
pub const MAX_FEATURES: usize = i16::MAX as usize / MAX_SIMILARITY as usize;

/// One labelled keypoint, relative to the template's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFeature {
    pub x: usize,
    pub y: usize,
    /// Orientation label in `0..8`.
    pub label: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TemplateRecord", rename_all = "camelCase")]
pub struct Template {
    class_id: String,
    width: usize,
    height: usize,
    match_threshold: f32,
    scale_factor: f32,
    features: Vec<TemplateFeature>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateRecord {
    class_id: String,
    width: usize,
    height: usize,
    match_threshold: f32,
    scale_factor: f32,
    features: Vec<TemplateFeature>,
}

impl TryFrom<TemplateRecord> for Template {
    type Error = ShapeMatchError;

    fn try_from(r: TemplateRecord) -> Result<Self> {
        Template::from_parts(
            r.class_id,
            r.width,
            r.height,
            r.match_threshold,
            r.scale_factor,
            r.features,
        )
    }
}

impl Template {
    /// Assemble a template from already selected features.
    ///
    /// Fails with `InvalidInput` for an empty footprint, a threshold outside
    /// (0, 1], a non-positive scale, a label ≥ 8, a feature outside the
    /// footprint, or more than [`MAX_FEATURES`] features. An empty feature
    /// list is accepted; the matcher skips such templates.
    pub fn from_parts(
        class_id: impl Into<String>,
        width: usize,
        height: usize,
        match_threshold: f32,
        scale_factor: f32,
        features: Vec<TemplateFeature>,
    ) -> Result<Self> {
        let class_id = class_id.into();
        if width == 0 || height == 0 {
            return Err(ShapeMatchError::invalid(format!(
                "template '{class_id}' has empty footprint {width}x{height}"
            )));
        }
        validate_threshold(match_threshold)?;
        if !(scale_factor.is_finite() && scale_factor > 0.0) {
            return Err(ShapeMatchError::invalid(format!(
                "template '{class_id}' has scale factor {scale_factor}"
            )));
        }
        if features.len() > MAX_FEATURES {
            return Err(ShapeMatchError::invalid(format!(
                "template '{class_id}' has {} features, at most {MAX_FEATURES} allowed",
                features.len()
            )));
        }
        if let Some(f) = features
            .iter()
            .find(|f| f.label as usize >= LABEL_COUNT || f.x >= width || f.y >= height)
        {
            return Err(ShapeMatchError::invalid(format!(
                "template '{class_id}' feature {f:?} outside {width}x{height} or label range"
            )));
        }
        Ok(Self {
            class_id,
            width,
            height,
            match_threshold,
            scale_factor,
            features,
        })
    }

    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn match_threshold(&self) -> f32 {
        self.match_threshold
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn features(&self) -> &[TemplateFeature] {
        &self.features
    }

    /// Copy of this template with a different acceptance threshold.
    pub fn with_match_threshold(&self, match_threshold: f32) -> Result<Self> {
        validate_threshold(match_threshold)?;
        Ok(Self {
            match_threshold,
            ..self.clone()
        })
    }
}

fn validate_threshold(match_threshold: f32) -> Result<()> {
    if match_threshold > 0.0 && match_threshold <= 1.0 {
        Ok(())
    } else {
        Err(ShapeMatchError::invalid(format!(
            "match threshold {match_threshold} outside (0, 1]"
        )))
    }
}
