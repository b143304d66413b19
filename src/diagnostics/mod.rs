//! Diagnostics data model returned alongside detections.
//!
//! [`MatchReport`] bundles the detections of one match call with the frame
//! descriptor, the templates that were skipped (and why), per-template
//! accumulation statistics, and stage timings.

pub mod report;
pub mod timing;

pub use report::{InputDescriptor, MatchReport, SkipKind, SkippedTemplate, TemplateTrace};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
