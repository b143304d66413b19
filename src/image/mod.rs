pub mod f32;
pub mod io;
pub mod raster;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::raster::RasterU8;
pub use self::traits::{ImageView, ImageViewMut};
pub use self::u8::{ImageBufU8, ImageU8};
