use serde::{Deserialize, Serialize};

/// Axis-aligned box in pixel coordinates, top-left anchored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(&self) -> usize {
        self.x + self.w
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(&self) -> usize {
        self.y + self.h
    }

    #[inline]
    pub const fn area(&self) -> usize {
        self.w * self.h
    }

    /// Intersection over union; 0 for disjoint or degenerate boxes.
    pub fn iou(&self, other: &Rect) -> f32 {
        let ix = self.right().min(other.right()).saturating_sub(self.x.max(other.x));
        let iy = self.bottom().min(other.bottom()).saturating_sub(self.y.max(other.y));
        let inter = ix * iy;
        let union = self.area() + other.area() - inter;
        if union == 0 {
            0.0
        } else {
            inter as f32 / union as f32
        }
    }
}

/// One accepted template placement in source-image coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub class_id: String,
    /// Normalized similarity in [0, 1].
    pub score: f32,
    /// Scale factor of the template that produced the hit.
    pub scale: f32,
    pub rect: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iou_of_shifted_boxes() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 0, 10, 10);
        assert!((a.iou(&b) - 50.0 / 150.0).abs() < 1e-6);
        assert_eq!(a.iou(&Rect::new(20, 20, 4, 4)), 0.0);
        assert_eq!(a.iou(&a), 1.0);
        assert_eq!(Rect::default().iou(&Rect::default()), 0.0);
    }
}
