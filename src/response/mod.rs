//! Per-label similarity responses and their linearized layout.
//!
//! A spread byte is scored against each of the 8 labels through the
//! constant [`SIMILARITY_LUT`], producing [`ResponseMaps`]; the
//! [`LinearMemories`] re-layout turns template sliding into contiguous
//! row runs over a decimated grid.

pub mod linear;
pub mod lut;
pub mod maps;

pub use linear::LinearMemories;
pub use lut::{similarity, MAX_SIMILARITY, SIMILARITY_LUT};
pub use maps::ResponseMaps;
