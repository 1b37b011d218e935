pub mod io;
pub mod traits;
pub mod ycbcr;

pub use self::traits::ImageView;
pub use self::ycbcr::{ImageYCbCr, Pixel, YCbCrImage};
