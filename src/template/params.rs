//! Knobs of the training path.
use crate::error::{Result, ShapeMatchError};
use crate::orientation::DEFAULT_VOTE_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Parameters for [`TemplateBuilder`](super::TemplateBuilder).
///
/// - `num_features`: features kept per template.
/// - `weak_threshold`: magnitude gate of the quantizer.
/// - `strong_threshold`: magnitude a pixel needs to become a candidate.
/// - `vote_threshold`: minimum 3×3 agreement of the quantizer.
/// - `match_threshold`: acceptance score stored on the template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateParams {
    pub num_features: usize,
    pub weak_threshold: f32,
    pub strong_threshold: f32,
    pub vote_threshold: u8,
    pub match_threshold: f32,
}

impl Default for TemplateParams {
    fn default() -> Self {
        Self {
            num_features: 16,
            weak_threshold: 30.0,
            strong_threshold: 60.0,
            vote_threshold: DEFAULT_VOTE_THRESHOLD,
            match_threshold: 0.80,
        }
    }
}

impl TemplateParams {
    pub fn with_num_features(mut self, num_features: usize) -> Self {
        self.num_features = num_features;
        self
    }

    pub fn with_match_threshold(mut self, match_threshold: f32) -> Self {
        self.match_threshold = match_threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_features == 0 {
            return Err(ShapeMatchError::invalid("num_features must be positive"));
        }
        if self.num_features > super::MAX_FEATURES {
            return Err(ShapeMatchError::invalid(format!(
                "num_features {} exceeds {}",
                self.num_features,
                super::MAX_FEATURES
            )));
        }
        if !(self.match_threshold > 0.0 && self.match_threshold <= 1.0) {
            return Err(ShapeMatchError::invalid(format!(
                "match_threshold {} outside (0, 1]",
                self.match_threshold
            )));
        }
        if self.vote_threshold > 9 {
            return Err(ShapeMatchError::invalid(format!(
                "vote_threshold {} can never be reached in a 3x3 window",
                self.vote_threshold
            )));
        }
        Ok(())
    }
}
