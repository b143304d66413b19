//! Eight-label orientation quantization with a 3×3 majority vote.
use crate::angle::{fold_to_label, LABEL_COUNT};
use crate::edges::GradientField;
use crate::image::ImageBufU8;

/// Default minimum number of agreeing neighbours (out of 9).
pub const DEFAULT_VOTE_THRESHOLD: u8 = 4;

/// Quantize a gradient field into one-hot orientation bytes.
///
/// Every pixel gets a label `round(angle * 16 / 360) & 7`, with the border
/// ring forced to label 0. An interior pixel whose magnitude exceeds
/// `weak_threshold` emits `1 << d` for the label `d` most frequent in its
/// 3×3 neighbourhood, provided that label collects at least
/// `vote_threshold` votes; everything else is 0.
pub fn quantize_orientations(
    field: &GradientField,
    weak_threshold: f32,
    vote_threshold: u8,
) -> ImageBufU8 {
    let (w, h) = (field.width(), field.height());
    let mut out = ImageBufU8::new(w, h);
    if w < 3 || h < 3 {
        return out;
    }

    let mut labels = ImageBufU8::new(w, h);
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            labels.set(x, y, fold_to_label(field.angle_deg.get(x, y)));
        }
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            if field.magnitude.get(x, y) <= weak_threshold {
                continue;
            }
            let mut histogram = [0u8; LABEL_COUNT];
            for yy in y - 1..=y + 1 {
                for xx in x - 1..=x + 1 {
                    histogram[labels.get(xx, yy) as usize] += 1;
                }
            }
            let mut best = 0usize;
            for (d, &votes) in histogram.iter().enumerate().skip(1) {
                if votes > histogram[best] {
                    best = d;
                }
            }
            if histogram[best] >= vote_threshold {
                out.set(x, y, 1u8 << best);
            }
        }
    }
    out
}
