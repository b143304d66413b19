//! Decimated, cache-contiguous re-layout of the response maps.
//!
//! For decimation `T`, label `d` owns `T²` planes. Plane `(y % T) * T + x % T`
//! stores pixel `(x, y)` at grid index `(y / T) * grid_w + x / T`, where
//! `grid_w = W / T` and `grid_h = H / T`. Pixels in the trailing `W % T`
//! columns and `H % T` rows are dropped.
use super::lut::similarity;
use super::maps::ResponseMaps;
use crate::angle::LABEL_COUNT;
use crate::error::{Result, ShapeMatchError};
use crate::image::ImageBufU8;

#[derive(Clone, Debug)]
pub struct LinearMemories {
    t: usize,
    grid_w: usize,
    grid_h: usize,
    /// Per label: `T²` planes of `grid_w * grid_h` bytes, back to back.
    memories: [Vec<u8>; LABEL_COUNT],
}

impl LinearMemories {
    /// Re-layout already computed response maps.
    pub fn linearize(maps: &ResponseMaps, t: usize) -> Result<Self> {
        Self::build(maps.width(), maps.height(), t, |label, x, y| {
            maps.map(label).get(x, y)
        })
    }

    /// Score and re-layout a spread image in one pass, without keeping the
    /// full-size response maps around.
    pub fn from_spread(spread: &ImageBufU8, t: usize) -> Result<Self> {
        Self::build(spread.w, spread.h, t, |label, x, y| {
            similarity(spread.get(x, y), label)
        })
    }

    fn build(
        w: usize,
        h: usize,
        t: usize,
        response: impl Fn(usize, usize, usize) -> u8,
    ) -> Result<Self> {
        if t == 0 {
            return Err(ShapeMatchError::invalid("decimation factor must be positive"));
        }
        let (grid_w, grid_h) = (w / t, h / t);
        let plane_len = grid_w * grid_h;
        let memories = std::array::from_fn(|label| {
            let mut memory = Vec::with_capacity(t * t * plane_len);
            for r0 in 0..t {
                for c0 in 0..t {
                    for gy in 0..grid_h {
                        let y = gy * t + r0;
                        for gx in 0..grid_w {
                            memory.push(response(label, gx * t + c0, y));
                        }
                    }
                }
            }
            memory
        });
        Ok(Self {
            t,
            grid_w,
            grid_h,
            memories,
        })
    }

    /// Plane `grid_index = (y % T) * T + x % T` of `label`.
    #[inline]
    pub fn plane(&self, label: usize, grid_index: usize) -> &[u8] {
        let len = self.plane_len();
        let start = grid_index * len;
        &self.memories[label][start..start + len]
    }

    #[inline]
    pub fn plane_len(&self) -> usize {
        self.grid_w * self.grid_h
    }

    pub fn grid_width(&self) -> usize {
        self.grid_w
    }

    pub fn grid_height(&self) -> usize {
        self.grid_h
    }

    pub fn t(&self) -> usize {
        self.t
    }

    /// Rebuild the trimmed `(grid_w*T) × (grid_h*T)` response image of `label`.
    pub fn delinearize(&self, label: usize) -> ImageBufU8 {
        let t = self.t;
        let mut out = ImageBufU8::new(self.grid_w * t, self.grid_h * t);
        for y in 0..out.h {
            for x in 0..out.w {
                let plane = self.plane(label, (y % t) * t + x % t);
                out.set(x, y, plane[(y / t) * self.grid_w + x / t]);
            }
        }
        out
    }
}
