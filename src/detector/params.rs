//! Parameters of the detection path.
//!
//! Defaults mirror the training defaults: decimation 4, weak magnitude gate
//! 30, vote threshold 4. `nms_iou` suppresses overlapping hits of the same
//! class; `None` returns every accepted accumulator cell.
use crate::error::{Result, ShapeMatchError};
use crate::orientation::{SpreadKernel, DEFAULT_VOTE_THRESHOLD};
use serde::{Deserialize, Serialize};

/// How a feature's plane is added into the accumulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccumulationMode {
    /// One flat run of `span_y * grid_w + span_x` cells starting at the
    /// feature offset. Near the right edge the run continues into the next
    /// decimated row.
    #[default]
    LinearRun,
    /// Row-by-row over the `(span_y + 1) × (span_x + 1)` placement rectangle.
    Rect,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchParams {
    /// Decimation factor: spreading window and linearization stride.
    pub t: usize,
    pub weak_threshold: f32,
    pub vote_threshold: u8,
    pub accumulation: AccumulationMode,
    pub spread_kernel: SpreadKernel,
    /// IoU above which a lower-scoring detection of the same class is dropped.
    pub nms_iou: Option<f32>,
    /// Enables parallel matching when the `rayon` feature is available.
    ///
    /// When the feature is disabled, this flag is ignored and execution stays sequential.
    pub parallel: bool,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            t: 4,
            weak_threshold: 30.0,
            vote_threshold: DEFAULT_VOTE_THRESHOLD,
            accumulation: AccumulationMode::LinearRun,
            spread_kernel: SpreadKernel::Auto,
            nms_iou: Some(0.5),
            parallel: false,
        }
    }
}

impl MatchParams {
    pub fn with_accumulation(mut self, accumulation: AccumulationMode) -> Self {
        self.accumulation = accumulation;
        self
    }

    pub fn with_nms_iou(mut self, nms_iou: Option<f32>) -> Self {
        self.nms_iou = nms_iou;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.t == 0 {
            return Err(ShapeMatchError::invalid("decimation factor t must be positive"));
        }
        if let Some(iou) = self.nms_iou {
            if !(0.0..=1.0).contains(&iou) {
                return Err(ShapeMatchError::invalid(format!(
                    "nms_iou {iou} outside [0, 1]"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn use_parallel(&self) -> bool {
        self.parallel && cfg!(feature = "rayon")
    }
}
