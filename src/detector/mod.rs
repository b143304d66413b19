//! Detection path.
//!
//! - [`FramePlanes`]: gradient → quantize → spread → linearized responses,
//!   built once per frame and owned by the call.
//! - [`accumulate`]: per-template response sums over all placements, in the
//!   flat-run or rectangular mode of [`AccumulationMode`].
//! - [`Matcher`]: thresholds the accumulator, maps cells back to frame
//!   boxes and applies class-aware suppression.

pub mod accumulate;
pub mod frame;
pub mod matcher;
pub mod nms;
pub mod params;

pub use accumulate::{accumulate, raw_threshold, Placement};
pub use frame::FramePlanes;
pub use matcher::Matcher;
pub use nms::suppress_overlaps;
pub use params::{AccumulationMode, MatchParams};
