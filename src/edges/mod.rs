//! Edge processing: the Sobel gradient field feeding orientation quantization.
//!
//! Borders are handled by clamping indices (replicate), so the field has the
//! same size as the source raster.

pub mod grad;

pub use grad::{compute_gradient_field, GradientField};
