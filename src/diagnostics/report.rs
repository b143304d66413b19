use crate::diagnostics::TimingBreakdown;
use crate::error::ShapeMatchError;
use crate::types::Detection;
use serde::Serialize;

/// Result of [`Matcher::match_with_report`](crate::detector::Matcher::match_with_report).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub input: InputDescriptor,
    pub detections: Vec<Detection>,
    pub skipped: Vec<SkippedTemplate>,
    pub templates: Vec<TemplateTrace>,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub t: usize,
    pub grid_width: usize,
    pub grid_height: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipKind {
    TemplateTooLarge,
    InsufficientFeatures,
}

/// Template left out of a match call; the rest of the batch still ran.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedTemplate {
    pub template_index: usize,
    pub class_id: String,
    pub kind: SkipKind,
    pub message: String,
}

impl SkippedTemplate {
    pub(crate) fn from_error(template_index: usize, class_id: &str, err: &ShapeMatchError) -> Self {
        let kind = match err {
            ShapeMatchError::TemplateTooLarge { .. } => SkipKind::TemplateTooLarge,
            _ => SkipKind::InsufficientFeatures,
        };
        Self {
            template_index,
            class_id: class_id.to_string(),
            kind,
            message: err.to_string(),
        }
    }
}

/// Per-template accumulation statistics, before suppression.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateTrace {
    pub template_index: usize,
    pub class_id: String,
    /// Accumulator cells above the raw similarity threshold.
    pub cells_above_raw: usize,
    /// Detections emitted for this template before suppression.
    pub accepted: usize,
    pub best_score: Option<f32>,
    pub elapsed_ms: f64,
}
