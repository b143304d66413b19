//! Error type shared by the training and detection paths.
//!
//! Detection distinguishes fatal input errors (the whole call fails and no
//! detections are returned) from per-template conditions that are recovered
//! by skipping the template and recording a diagnostic.
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building templates, matching, or loading inputs.
#[derive(Debug, Error)]
pub enum ShapeMatchError {
    /// Empty raster, unsupported channel count, bad dimensions or parameters.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Fewer gradient candidates than requested features.
    #[error("insufficient features: requested {requested}, available {available}")]
    InsufficientFeatures { requested: usize, available: usize },

    /// The decimated template footprint does not fit into the decimated frame.
    #[error(
        "template '{class_id}' ({template_w}x{template_h}) does not fit a \
         {frame_w}x{frame_h} frame at T={t}"
    )]
    TemplateTooLarge {
        class_id: String,
        template_w: usize,
        template_h: usize,
        frame_w: usize,
        frame_h: usize,
        t: usize,
    },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode or encode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to (de)serialize JSON {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ShapeMatchError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShapeMatchError>;
