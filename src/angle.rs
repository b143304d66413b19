//! Angle utilities shared by the gradient and quantization stages.

/// Number of coarse orientation labels after folding opposite directions.
pub const LABEL_COUNT: usize = 8;

/// Gradient direction in degrees within [0, 360). A zero vector maps to 0.
#[inline]
pub fn angle_degrees(dx: f32, dy: f32) -> f32 {
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    let deg = dy.atan2(dx).to_degrees();
    let norm = deg.rem_euclid(360.0);
    if norm >= 360.0 {
        0.0
    } else {
        norm
    }
}

/// 16-level bucket `round(angle * 16 / 360)`, folded to the 8-label ring.
///
/// Bucket 16 (angles rounding up to a full turn) folds onto label 0, and
/// opposite directions share a label.
#[inline]
pub fn fold_to_label(angle_deg: f32) -> u8 {
    let bucket = (angle_deg * 16.0 / 360.0).round() as i32;
    (bucket & 7) as u8
}

/// Steps between two labels on the circular 8-label compass, in [0, 4].
#[inline]
pub const fn compass_distance(a: u8, b: u8) -> u8 {
    let d = (a as i16 - b as i16).rem_euclid(LABEL_COUNT as i16) as u8;
    if d > 4 {
        8 - d
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn angle_degrees_covers_full_turn() {
        assert!(approx_eq(angle_degrees(1.0, 0.0), 0.0));
        assert!(approx_eq(angle_degrees(0.0, 1.0), 90.0));
        assert!(approx_eq(angle_degrees(-1.0, 0.0), 180.0));
        assert!(approx_eq(angle_degrees(0.0, -1.0), 270.0));
        assert!(approx_eq(angle_degrees(-0.0, -0.0), 0.0));
        let a = angle_degrees(1.0, -1e-9);
        assert!((0.0..360.0).contains(&a), "angle {a} out of range");
    }

    #[test]
    fn opposite_directions_share_a_label() {
        for step in 0..32 {
            let a = step as f32 * 11.25;
            assert_eq!(fold_to_label(a), fold_to_label((a + 180.0) % 360.0));
        }
        assert_eq!(fold_to_label(359.0), 0);
        assert_eq!(fold_to_label(22.5), 1);
        assert_eq!(fold_to_label(90.0), 4);
    }

    #[test]
    fn compass_distance_wraps() {
        assert_eq!(compass_distance(0, 7), 1);
        assert_eq!(compass_distance(7, 0), 1);
        assert_eq!(compass_distance(2, 6), 4);
        assert_eq!(compass_distance(3, 3), 0);
    }
}
