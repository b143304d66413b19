#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod template;
pub mod types;

// Pipeline stages – public for tools and tests, considered internals.
pub mod angle;
pub mod config;
pub mod edges;
pub mod orientation;
pub mod pyramid;
pub mod response;

// --- High-level re-exports -------------------------------------------------

// Training and detection entry points.
pub use crate::detector::{AccumulationMode, MatchParams, Matcher};
pub use crate::template::{Template, TemplateBuilder, TemplateFeature, TemplateParams};
pub use crate::types::{Detection, Rect};

// Errors and diagnostics.
pub use crate::diagnostics::{MatchReport, SkippedTemplate};
pub use crate::error::{Result, ShapeMatchError};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::image::{ImageU8, RasterU8};
    pub use crate::pyramid::{ScalePyramid, ScalePyramidOptions};
    pub use crate::{
        Detection, MatchParams, Matcher, Rect, Result, Template, TemplateBuilder, TemplateParams,
    };
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::edges::{compute_gradient_field, GradientField};
    pub use crate::orientation::{
        quantize_orientations, spread_orientations, spread_orientations_with, SpreadKernel,
    };
    pub use crate::response::{similarity, LinearMemories, ResponseMaps, SIMILARITY_LUT};
    pub use crate::template::{select_scattered, Candidate};
}
