use crate::error::{Result, ShapeMatchError};
use crate::types::Rect;

/// Borrowed 8-bit raster with 1 (gray) or 3 (interleaved) channels.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub channels: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Tightly packed single-channel view.
    pub fn gray(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            channels: 1,
            stride: w,
            data,
        }
    }

    /// Tightly packed interleaved 3-channel view.
    pub fn rgb(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            channels: 3,
            stride: w * 3,
            data,
        }
    }

    /// Check dimensions, channel count and buffer length.
    pub fn validate(&self) -> Result<()> {
        if self.w == 0 || self.h == 0 {
            return Err(ShapeMatchError::invalid(format!(
                "empty raster {}x{}",
                self.w, self.h
            )));
        }
        if self.channels != 1 && self.channels != 3 {
            return Err(ShapeMatchError::invalid(format!(
                "unsupported channel count {}",
                self.channels
            )));
        }
        let row_bytes = self.w * self.channels;
        if self.stride < row_bytes {
            return Err(ShapeMatchError::invalid(format!(
                "stride {} shorter than row of {} bytes",
                self.stride, row_bytes
            )));
        }
        let needed = self.stride * (self.h - 1) + row_bytes;
        if self.data.len() < needed {
            return Err(ShapeMatchError::invalid(format!(
                "buffer holds {} bytes, {} required",
                self.data.len(),
                needed
            )));
        }
        Ok(())
    }

    /// Interleaved bytes of row `y` (length `w * channels`).
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * self.channels]
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[y * self.stride + x * self.channels + c]
    }

    /// Sub-view over `rect`; fails when the rectangle leaves the raster.
    pub fn crop(&self, rect: Rect) -> Result<ImageU8<'a>> {
        if rect.w == 0 || rect.h == 0 || rect.right() > self.w || rect.bottom() > self.h {
            return Err(ShapeMatchError::invalid(format!(
                "roi {:?} outside {}x{} raster",
                rect, self.w, self.h
            )));
        }
        let start = rect.y * self.stride + rect.x * self.channels;
        let end = (rect.bottom() - 1) * self.stride + rect.right() * self.channels;
        Ok(ImageU8 {
            w: rect.w,
            h: rect.h,
            channels: self.channels,
            stride: self.stride,
            data: &self.data[start..end],
        })
    }
}

/// Owned single-channel byte plane (quantized labels, spread bytes, responses).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBufU8 {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl ImageBufU8 {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.w + x] = v;
    }

    /// Borrow as a gray raster view.
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8::gray(self.w, self.h, &self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_bad_rasters() {
        let data = vec![0u8; 12];
        assert!(ImageU8::gray(0, 3, &data).validate().is_err());
        assert!(ImageU8::gray(4, 4, &data).validate().is_err());
        let two = ImageU8 {
            w: 2,
            h: 2,
            channels: 2,
            stride: 4,
            data: &data,
        };
        assert!(two.validate().is_err());
        let short_stride = ImageU8 {
            w: 4,
            h: 1,
            channels: 3,
            stride: 8,
            data: &data,
        };
        assert!(short_stride.validate().is_err());
        assert!(ImageU8::gray(4, 3, &data).validate().is_ok());
        assert!(ImageU8::rgb(2, 2, &data).validate().is_ok());
    }

    #[test]
    fn crop_keeps_parent_stride() {
        let data: Vec<u8> = (0..30).collect();
        let img = ImageU8::gray(6, 5, &data);
        let sub = img
            .crop(Rect::new(2, 1, 3, 2))
            .expect("roi inside the raster");
        assert_eq!(sub.stride, 6);
        assert_eq!(sub.row(0), &[8, 9, 10]);
        assert_eq!(sub.row(1), &[14, 15, 16]);
        assert_eq!(sub.get(2, 1, 0), 16);
        assert!(img.crop(Rect::new(4, 0, 3, 1)).is_err());
    }
}
