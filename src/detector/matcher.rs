//! Detection path: frame planes once, then accumulation per template.
//!
//! Typical usage:
//! ```no_run
//! use shape_matcher::detector::{Matcher, MatchParams};
//! use shape_matcher::image::ImageU8;
//! use shape_matcher::template::Template;
//!
//! # fn example(frame: ImageU8, templates: &[Template]) -> shape_matcher::Result<()> {
//! let matcher = Matcher::new(MatchParams::default());
//! let report = matcher.match_with_report(&frame, templates)?;
//! for skipped in &report.skipped {
//!     println!("skipped {}: {}", skipped.class_id, skipped.message);
//! }
//! # Ok(())
//! # }
//! ```
use super::accumulate::{accumulate, raw_threshold, Placement};
use super::frame::FramePlanes;
use super::nms::suppress_overlaps;
use super::params::MatchParams;
use crate::diagnostics::{
    elapsed_ms, InputDescriptor, MatchReport, SkippedTemplate, TemplateTrace, TimingBreakdown,
};
use crate::error::{Result, ShapeMatchError};
use crate::image::ImageU8;
use crate::response::MAX_SIMILARITY;
use crate::template::Template;
use crate::types::{Detection, Rect};
use log::{debug, warn};
use std::time::Instant;

type TemplateOutcome = std::result::Result<(Vec<Detection>, TemplateTrace), SkippedTemplate>;

/// Stateless matcher; every call allocates its own scratch planes, so one
/// instance can serve concurrent calls.
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    params: MatchParams,
}

impl Matcher {
    pub fn new(params: MatchParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &MatchParams {
        &self.params
    }

    /// Detections of every template in `frame`, after suppression.
    pub fn match_templates(&self, frame: &ImageU8, templates: &[Template]) -> Result<Vec<Detection>> {
        Ok(self.match_with_report(frame, templates)?.detections)
    }

    /// Detections plus skipped templates, per-template statistics and timings.
    ///
    /// An invalid frame or parameter set fails the whole call. Templates that
    /// do not fit the frame or carry no features are skipped and reported.
    pub fn match_with_report(&self, frame: &ImageU8, templates: &[Template]) -> Result<MatchReport> {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();
        let planes = FramePlanes::build(frame, &self.params, &mut timings)?;

        let start = Instant::now();
        let outcomes = self.run_all(&planes, templates);
        timings.record_since("templates", start);

        let mut detections = Vec::new();
        let mut skipped = Vec::new();
        let mut traces = Vec::with_capacity(templates.len());
        for outcome in outcomes {
            match outcome {
                Ok((dets, trace)) => {
                    detections.extend(dets);
                    traces.push(trace);
                }
                Err(skip) => skipped.push(skip),
            }
        }

        if let Some(iou) = self.params.nms_iou {
            let start = Instant::now();
            let before = detections.len();
            detections = suppress_overlaps(detections, iou);
            timings.record_since("nms", start);
            debug!(
                "Matcher::match_templates nms iou={:.2}: {} -> {} detections",
                iou,
                before,
                detections.len()
            );
        }
        timings.total_ms = elapsed_ms(total_start);
        debug!(
            "Matcher::match_templates {} templates, {} skipped, {} detections in {:.2} ms",
            templates.len(),
            skipped.len(),
            detections.len(),
            timings.total_ms
        );

        let linear = &planes.linear;
        Ok(MatchReport {
            input: InputDescriptor {
                width: planes.width,
                height: planes.height,
                channels: planes.channels,
                t: linear.t(),
                grid_width: linear.grid_width(),
                grid_height: linear.grid_height(),
            },
            detections,
            skipped,
            templates: traces,
            timings,
        })
    }

    /// Build the per-frame planes without matching, e.g. to reuse them with
    /// [`match_prepared`](Self::match_prepared) for several template sets.
    pub fn prepare(&self, frame: &ImageU8) -> Result<FramePlanes> {
        FramePlanes::build(frame, &self.params, &mut TimingBreakdown::default())
    }

    /// Match against planes from [`prepare`](Self::prepare) built with the
    /// same parameters. Skipped templates are only logged.
    pub fn match_prepared(&self, planes: &FramePlanes, templates: &[Template]) -> Vec<Detection> {
        let detections: Vec<Detection> = self
            .run_all(planes, templates)
            .into_iter()
            .filter_map(|o| o.ok())
            .flat_map(|(dets, _)| dets)
            .collect();
        match self.params.nms_iou {
            Some(iou) => suppress_overlaps(detections, iou),
            None => detections,
        }
    }

    fn run_all(&self, planes: &FramePlanes, templates: &[Template]) -> Vec<TemplateOutcome> {
        if self.params.use_parallel() {
            #[cfg(feature = "rayon")]
            {
                use rayon::prelude::*;
                return templates
                    .par_iter()
                    .enumerate()
                    .map(|(i, template)| self.run_template(planes, i, template))
                    .collect();
            }
        }
        templates
            .iter()
            .enumerate()
            .map(|(i, template)| self.run_template(planes, i, template))
            .collect()
    }

    fn run_template(&self, planes: &FramePlanes, index: usize, template: &Template) -> TemplateOutcome {
        let start = Instant::now();
        let skip = |err: ShapeMatchError| {
            warn!(
                "Matcher::match_templates skipping template {} '{}': {}",
                index,
                template.class_id(),
                err
            );
            SkippedTemplate::from_error(index, template.class_id(), &err)
        };

        if template.features().is_empty() {
            return Err(skip(ShapeMatchError::InsufficientFeatures {
                requested: 1,
                available: 0,
            }));
        }
        let placement = Placement::new(&planes.linear, template, planes.width, planes.height)
            .map_err(skip)?;

        let acc = accumulate(
            &planes.linear,
            template,
            &placement,
            planes.width,
            planes.height,
            self.params.accumulation,
        );
        let (detections, cells_above_raw) = self.score_cells(&acc, &placement, planes, template);
        let best_score = detections.iter().map(|d| d.score).reduce(f32::max);
        let trace = TemplateTrace {
            template_index: index,
            class_id: template.class_id().to_string(),
            cells_above_raw,
            accepted: detections.len(),
            best_score,
            elapsed_ms: elapsed_ms(start),
        };
        Ok((detections, trace))
    }

    /// Threshold the accumulator and map accepted cells back to frame boxes.
    fn score_cells(
        &self,
        acc: &[i16],
        placement: &Placement,
        planes: &FramePlanes,
        template: &Template,
    ) -> (Vec<Detection>, usize) {
        let n = template.features().len();
        let raw_min = raw_threshold(n);
        let max_raw = (n * MAX_SIMILARITY as usize) as f32;
        let t = planes.linear.t();
        let offset = t / 2 + t % 2 - 1;

        let mut detections = Vec::new();
        let mut above = 0usize;
        for (i, &raw) in acc.iter().enumerate() {
            if i32::from(raw) <= raw_min {
                continue;
            }
            above += 1;
            let score = raw as f32 / max_raw;
            if score < template.match_threshold() {
                continue;
            }
            let (r, c) = (i / placement.grid_w, i % placement.grid_w);
            let rect = Rect::new(
                c * t + offset,
                r * t + offset,
                template.width(),
                template.height(),
            );
            if rect.right() > planes.width || rect.bottom() > planes.height {
                continue;
            }
            detections.push(Detection {
                class_id: template.class_id().to_string(),
                score,
                scale: template.scale_factor(),
                rect,
            });
        }
        (detections, above)
    }
}
