//! Sliding a template's features over the linearized response planes.
//!
//! The accumulator is a decimated `grid_w × grid_h` i16 image. Cell `(r, c)`
//! collects, for every feature, the response at pixel
//! `(c*T + x, r*T + y)` of the feature's label.
use super::params::AccumulationMode;
use crate::error::{Result, ShapeMatchError};
use crate::response::LinearMemories;
use crate::template::Template;

/// Decimated geometry of one template against one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub grid_w: usize,
    pub grid_h: usize,
    pub span_x: usize,
    pub span_y: usize,
}

impl Placement {
    /// `span = grid - ceil(template / T)` per axis; `TemplateTooLarge` when
    /// either span would be negative.
    pub fn new(
        linear: &LinearMemories,
        template: &Template,
        frame_w: usize,
        frame_h: usize,
    ) -> Result<Self> {
        let t = linear.t();
        let (grid_w, grid_h) = (linear.grid_width(), linear.grid_height());
        let (fw, fh) = (template.width().div_ceil(t), template.height().div_ceil(t));
        if fw > grid_w || fh > grid_h {
            return Err(ShapeMatchError::TemplateTooLarge {
                class_id: template.class_id().to_string(),
                template_w: template.width(),
                template_h: template.height(),
                frame_w,
                frame_h,
                t,
            });
        }
        Ok(Self {
            grid_w,
            grid_h,
            span_x: grid_w - fw,
            span_y: grid_h - fh,
        })
    }

    /// Length of the flat run added per feature in `LinearRun` mode.
    #[inline]
    pub fn run_len(&self) -> usize {
        self.span_y * self.grid_w + self.span_x
    }
}

/// Sum the responses of every feature of `template` into a fresh accumulator.
///
/// Features outside the `frame_w × frame_h` frame are skipped.
pub fn accumulate(
    linear: &LinearMemories,
    template: &Template,
    placement: &Placement,
    frame_w: usize,
    frame_h: usize,
    mode: AccumulationMode,
) -> Vec<i16> {
    let t = linear.t();
    let grid_w = placement.grid_w;
    let mut acc = vec![0i16; grid_w * placement.grid_h];

    for f in template.features() {
        if f.x >= frame_w || f.y >= frame_h {
            continue;
        }
        let plane = linear.plane(f.label as usize, (f.y % t) * t + f.x % t);
        let base = (f.y / t) * grid_w + f.x / t;
        match mode {
            AccumulationMode::LinearRun => {
                let run = placement.run_len();
                if let Some(src) = plane.get(base..base + run) {
                    add_into(&mut acc[..run], src);
                }
            }
            AccumulationMode::Rect => {
                let cols = placement.span_x + 1;
                for r in 0..=placement.span_y {
                    let row = base + r * grid_w;
                    if let Some(src) = plane.get(row..row + cols) {
                        add_into(&mut acc[r * grid_w..r * grid_w + cols], src);
                    }
                }
            }
        }
    }
    acc
}

#[inline]
fn add_into(acc: &mut [i16], src: &[u8]) {
    for (a, &s) in acc.iter_mut().zip(src) {
        *a += s as i16;
    }
}

/// Raw similarity a cell must exceed: `round(2N + 0.25 * 2N)`.
#[inline]
pub fn raw_threshold(num_features: usize) -> i32 {
    (2.5 * num_features as f32).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageBufU8;
    use crate::template::TemplateFeature;

    /// Every spread byte set, so every response is 4 for every label.
    fn saturated(w: usize, h: usize, t: usize) -> LinearMemories {
        let mut spread = ImageBufU8::new(w, h);
        spread.data.fill(0xff);
        LinearMemories::from_spread(&spread, t).expect("positive t")
    }

    fn template(w: usize, h: usize, features: Vec<TemplateFeature>) -> Template {
        Template::from_parts("probe", w, h, 0.8, 1.0, features).expect("valid template")
    }

    #[test]
    fn placement_spans_and_oversize() {
        let linear = saturated(40, 24, 4);
        let t = template(13, 8, vec![]);
        let p = Placement::new(&linear, &t, 40, 24).expect("fits");
        assert_eq!((p.grid_w, p.grid_h, p.span_x, p.span_y), (10, 6, 6, 4));
        assert_eq!(p.run_len(), 46);

        let big = template(41, 8, vec![]);
        assert!(matches!(
            Placement::new(&linear, &big, 40, 24),
            Err(ShapeMatchError::TemplateTooLarge { .. })
        ));
    }

    #[test]
    fn linear_run_and_rect_differ_only_outside_the_rectangle() {
        let linear = saturated(40, 24, 4);
        let f = TemplateFeature { x: 5, y: 3, label: 2 };
        let t = template(13, 8, vec![f]);
        let p = Placement::new(&linear, &t, 40, 24).expect("fits");
        let run = accumulate(&linear, &t, &p, 40, 24, AccumulationMode::LinearRun);
        let rect = accumulate(&linear, &t, &p, 40, 24, AccumulationMode::Rect);

        for r in 0..p.grid_h {
            for c in 0..p.grid_w {
                let i = r * p.grid_w + c;
                let in_rect = r <= p.span_y && c <= p.span_x;
                let in_run = i < p.run_len();
                assert_eq!(rect[i], if in_rect { 4 } else { 0 }, "rect cell ({r},{c})");
                assert_eq!(run[i], if in_run { 4 } else { 0 }, "run cell ({r},{c})");
            }
        }
        // Wrapped cells right of the rectangle are covered only by the run;
        // the last rectangle cell is covered only by the rectangle.
        assert_eq!((run[p.span_x + 1], rect[p.span_x + 1]), (4, 0));
        let last = p.span_y * p.grid_w + p.span_x;
        assert_eq!((run[last], rect[last]), (0, 4));
    }

    #[test]
    fn features_outside_frame_are_ignored() {
        let linear = saturated(16, 16, 4);
        let t = template(20, 20, vec![TemplateFeature { x: 18, y: 2, label: 0 }]);
        let p = Placement {
            grid_w: 4,
            grid_h: 4,
            span_x: 0,
            span_y: 0,
        };
        let acc = accumulate(&linear, &t, &p, 16, 16, AccumulationMode::Rect);
        assert!(acc.iter().all(|&v| v == 0));
    }

    #[test]
    fn raw_threshold_rounds() {
        assert_eq!(raw_threshold(16), 40);
        assert_eq!(raw_threshold(3), 8);
        assert_eq!(raw_threshold(1), 3);
    }
}
