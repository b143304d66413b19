//! OR-spreading of quantized orientations over a `T×T` window.
//!
//! Two kernels implement the same contract: `Scalar` ORs byte by byte,
//! `Wide` ORs 16-byte `u128` lanes and finishes each row with a scalar tail.
//! They produce identical bytes for every input.
use crate::image::ImageBufU8;
use serde::{Deserialize, Serialize};

const LANE: usize = 16;

/// Row kernel used by [`spread_orientations_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpreadKernel {
    /// Pick per image via [`SpreadKernel::auto_for`].
    #[default]
    Auto,
    Scalar,
    Wide,
}

impl SpreadKernel {
    /// `Wide` when a row holds at least one full 16-byte lane.
    pub fn auto_for(width: usize) -> Self {
        if width >= LANE {
            SpreadKernel::Wide
        } else {
            SpreadKernel::Scalar
        }
    }

    fn resolve(self, width: usize) -> Self {
        match self {
            SpreadKernel::Auto => Self::auto_for(width),
            other => other,
        }
    }
}

#[inline]
fn or_into_scalar(dst: &mut [u8], src: &[u8]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d |= s;
    }
}

#[inline]
fn or_into_wide(dst: &mut [u8], src: &[u8]) {
    let n = dst.len().min(src.len());
    let (dst, src) = (&mut dst[..n], &src[..n]);
    let mut dst_chunks = dst.chunks_exact_mut(LANE);
    let mut src_chunks = src.chunks_exact(LANE);
    for (d, s) in (&mut dst_chunks).zip(&mut src_chunks) {
        let mut a = [0u8; LANE];
        let mut b = [0u8; LANE];
        a.copy_from_slice(d);
        b.copy_from_slice(s);
        let v = u128::from_ne_bytes(a) | u128::from_ne_bytes(b);
        d.copy_from_slice(&v.to_ne_bytes());
    }
    or_into_scalar(dst_chunks.into_remainder(), src_chunks.remainder());
}

/// Spread with the automatically chosen kernel.
pub fn spread_orientations(quantized: &ImageBufU8, t: usize) -> ImageBufU8 {
    spread_orientations_with(quantized, t, SpreadKernel::Auto)
}

/// `dst[y][x] = OR of src[y+dr][x+dc]` over `dr, dc ∈ [0, t)` that stay
/// inside the image. A zero `t` yields an all-zero plane.
pub fn spread_orientations_with(
    quantized: &ImageBufU8,
    t: usize,
    kernel: SpreadKernel,
) -> ImageBufU8 {
    let (w, h) = (quantized.w, quantized.h);
    let mut out = ImageBufU8::new(w, h);
    let or_into = match kernel.resolve(w) {
        SpreadKernel::Wide => or_into_wide,
        _ => or_into_scalar,
    };
    for dr in 0..t.min(h) {
        for dc in 0..t.min(w) {
            for y in 0..h - dr {
                let src_start = (y + dr) * w + dc;
                let src = &quantized.data[src_start..(y + dr + 1) * w];
                let dst = &mut out.data[y * w..y * w + (w - dc)];
                or_into(dst, src);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pseudo_labels(w: usize, h: usize, seed: u32) -> ImageBufU8 {
        let mut img = ImageBufU8::new(w, h);
        let mut s = seed;
        for v in img.data.iter_mut() {
            s = s.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let r = (s >> 24) as u8;
            *v = if r % 3 == 0 { 1 << (r % 8) } else { 0 };
        }
        img
    }

    #[test]
    fn spreading_keeps_source_bits() {
        let q = pseudo_labels(37, 19, 7);
        let s = spread_orientations(&q, 4);
        for (&src, &spread) in q.data.iter().zip(&s.data) {
            assert_eq!(spread & src, src);
        }
    }

    #[test]
    fn scalar_and_wide_agree() {
        for &(w, h, t) in &[(16, 5, 4), (33, 9, 4), (50, 12, 3), (7, 7, 4), (64, 3, 5)] {
            let q = pseudo_labels(w, h, (w * h) as u32);
            let a = spread_orientations_with(&q, t, SpreadKernel::Scalar);
            let b = spread_orientations_with(&q, t, SpreadKernel::Wide);
            assert_eq!(a, b, "kernels diverge for {w}x{h} t={t}");
        }
    }

    #[test]
    fn single_bit_spreads_up_and_left() {
        let mut q = ImageBufU8::new(8, 8);
        q.set(5, 5, 0b100);
        let s = spread_orientations(&q, 4);
        for y in 0..8 {
            for x in 0..8 {
                let inside = (2..=5).contains(&x) && (2..=5).contains(&y);
                assert_eq!(s.get(x, y) != 0, inside, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn auto_picks_wide_for_long_rows() {
        assert_eq!(SpreadKernel::auto_for(15), SpreadKernel::Scalar);
        assert_eq!(SpreadKernel::auto_for(16), SpreadKernel::Wide);
    }
}
