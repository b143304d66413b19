//! Call-scoped frame planes shared by every template of one match call.
//!
//! Built once per frame and dropped when the call returns. Nothing here is
//! stored on the matcher, so concurrent calls never share scratch memory.
use super::params::MatchParams;
use crate::diagnostics::TimingBreakdown;
use crate::edges::compute_gradient_field;
use crate::error::Result;
use crate::image::ImageU8;
use crate::orientation::{quantize_orientations, spread_orientations_with};
use crate::response::LinearMemories;
use log::debug;
use std::time::Instant;

#[derive(Clone, Debug)]
pub struct FramePlanes {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub linear: LinearMemories,
}

impl FramePlanes {
    /// Gradient → quantize → spread → linearized responses.
    pub fn build(frame: &ImageU8, params: &MatchParams, timings: &mut TimingBreakdown) -> Result<Self> {
        params.validate()?;
        frame.validate()?;

        let start = Instant::now();
        let field = compute_gradient_field(frame)?;
        let grad_ms = timings.record_since("gradient", start);

        let start = Instant::now();
        let quantized = quantize_orientations(&field, params.weak_threshold, params.vote_threshold);
        drop(field);
        let quant_ms = timings.record_since("quantize", start);

        let start = Instant::now();
        let spread = spread_orientations_with(&quantized, params.t, params.spread_kernel);
        drop(quantized);
        let spread_ms = timings.record_since("spread", start);

        let start = Instant::now();
        let linear = LinearMemories::from_spread(&spread, params.t)?;
        let linear_ms = timings.record_since("linearize", start);

        debug!(
            "FramePlanes::build {}x{}x{} t={} grid={}x{} grad={:.2}ms quant={:.2}ms spread={:.2}ms linear={:.2}ms",
            frame.w,
            frame.h,
            frame.channels,
            params.t,
            linear.grid_width(),
            linear.grid_height(),
            grad_ms,
            quant_ms,
            spread_ms,
            linear_ms
        );
        Ok(Self {
            width: frame.w,
            height: frame.h,
            channels: frame.channels,
            linear,
        })
    }
}
