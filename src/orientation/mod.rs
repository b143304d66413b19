//! Orientation labels: 3×3-voted quantization and `T×T` OR-spreading.

pub mod quantize;
pub mod spread;

pub use quantize::{quantize_orientations, DEFAULT_VOTE_THRESHOLD};
pub use spread::{spread_orientations, spread_orientations_with, SpreadKernel};
