//! Bilinear resampling on pixel centres with clamped borders.
use super::filters::clamp_index;
use crate::image::{ImageF32, ImageU8, ImageViewMut};

/// Resize `src` to `nw × nh`. Output pixel centres map back to
/// `(x + 0.5) * src.w / nw - 0.5` in the source.
pub fn resize_bilinear(src: &ImageF32, nw: usize, nh: usize) -> ImageF32 {
    let mut out = ImageF32::new(nw, nh);
    if src.w == 0 || src.h == 0 || nw == 0 || nh == 0 {
        return out;
    }
    let sx_ratio = src.w as f32 / nw as f32;
    let sy_ratio = src.h as f32 / nh as f32;
    for y in 0..nh {
        let fy = ((y as f32 + 0.5) * sy_ratio - 0.5).max(0.0);
        let y0 = fy.floor() as isize;
        let wy = fy - y0 as f32;
        let (r0, r1) = (clamp_index(y0, src.h), clamp_index(y0 + 1, src.h));
        let dst = out.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            let fx = ((x as f32 + 0.5) * sx_ratio - 0.5).max(0.0);
            let x0 = fx.floor() as isize;
            let wx = fx - x0 as f32;
            let (c0, c1) = (clamp_index(x0, src.w), clamp_index(x0 + 1, src.w));
            let top = src.get(c0, r0) * (1.0 - wx) + src.get(c1, r0) * wx;
            let bottom = src.get(c0, r1) * (1.0 - wx) + src.get(c1, r1) * wx;
            *px = top * (1.0 - wy) + bottom * wy;
        }
    }
    out
}

/// Split channel `c` of a raster into a float plane (values in 0..=255).
pub(crate) fn channel_to_f32(image: &ImageU8, c: usize) -> ImageF32 {
    let mut out = ImageF32::new(image.w, image.h);
    for y in 0..image.h {
        let row = image.row(y);
        for (x, px) in out.row_mut(y).iter_mut().enumerate() {
            *px = row[x * image.channels + c] as f32;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_size_is_identity() {
        let mut img = ImageF32::new(5, 4);
        for (i, v) in img.data.iter_mut().enumerate() {
            *v = i as f32;
        }
        let out = resize_bilinear(&img, 5, 4);
        assert_eq!(out.data, img.data);
    }

    #[test]
    fn halving_averages_pairs() {
        let mut img = ImageF32::new(4, 2);
        img.data = vec![0.0, 10.0, 20.0, 30.0, 0.0, 10.0, 20.0, 30.0];
        let out = resize_bilinear(&img, 2, 1);
        assert_eq!((out.w, out.h), (2, 1));
        assert!((out.get(0, 0) - 5.0).abs() < 1e-4);
        assert!((out.get(1, 0) - 25.0).abs() < 1e-4);
    }
}
