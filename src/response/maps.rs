use super::lut::similarity;
use crate::angle::LABEL_COUNT;
use crate::image::ImageBufU8;

/// Eight full-size similarity images, one per target label.
#[derive(Clone, Debug)]
pub struct ResponseMaps {
    maps: [ImageBufU8; LABEL_COUNT],
}

impl ResponseMaps {
    /// Score every spread byte against each label.
    pub fn compute(spread: &ImageBufU8) -> Self {
        let maps = std::array::from_fn(|label| {
            let mut map = ImageBufU8::new(spread.w, spread.h);
            for (dst, &b) in map.data.iter_mut().zip(&spread.data) {
                *dst = similarity(b, label);
            }
            map
        });
        Self { maps }
    }

    pub fn width(&self) -> usize {
        self.maps[0].w
    }

    pub fn height(&self) -> usize {
        self.maps[0].h
    }

    /// Response image for `label` (panics when `label >= 8`).
    pub fn map(&self, label: usize) -> &ImageBufU8 {
        &self.maps[label]
    }
}
