//! Class-aware greedy non-maximum suppression.
use crate::types::Detection;

/// Keep the best-scoring detection of every overlapping same-class group.
///
/// Detections are stably sorted by descending score, so equal scores keep
/// their input order. A detection is suppressed when its IoU with an already
/// kept detection of the same class exceeds `iou_threshold`.
pub fn suppress_overlaps(mut detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    if detections.len() < 2 {
        return detections;
    }
    detections.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut suppressed = vec![false; detections.len()];
    let mut keep = Vec::new();
    for i in 0..detections.len() {
        if suppressed[i] {
            continue;
        }
        for j in (i + 1)..detections.len() {
            if !suppressed[j]
                && detections[j].class_id == detections[i].class_id
                && detections[i].rect.iou(&detections[j].rect) > iou_threshold
            {
                suppressed[j] = true;
            }
        }
        keep.push(i);
    }

    let mut out = Vec::with_capacity(keep.len());
    let mut keep = keep.into_iter().peekable();
    for (i, det) in detections.into_iter().enumerate() {
        if keep.peek() == Some(&i) {
            keep.next();
            out.push(det);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rect;

    fn det(class_id: &str, score: f32, x: usize, y: usize) -> Detection {
        Detection {
            class_id: class_id.to_string(),
            score,
            scale: 1.0,
            rect: Rect::new(x, y, 20, 20),
        }
    }

    #[test]
    fn keeps_best_of_overlapping_group() {
        let out = suppress_overlaps(
            vec![det("a", 0.8, 0, 0), det("a", 0.95, 2, 2), det("a", 0.9, 60, 60)],
            0.5,
        );
        let scores: Vec<f32> = out.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![0.95, 0.9]);
    }

    #[test]
    fn classes_do_not_suppress_each_other() {
        let out = suppress_overlaps(vec![det("a", 0.9, 0, 0), det("b", 0.85, 1, 1)], 0.3);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn ties_keep_input_order() {
        let out = suppress_overlaps(vec![det("a", 0.9, 4, 0), det("a", 0.9, 0, 0)], 0.5);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].rect.x, 4);
    }
}
