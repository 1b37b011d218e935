//! Packed YCbCr images as delivered by the robot cameras.
//!
//! `ImageYCbCr` is the borrowed view consumed by the detector; `YCbCrImage`
//! owns its buffer and is used by the demo binary and the synthetic scenes in
//! the tests.
use serde::{Deserialize, Serialize};

/// One YCbCr sample (full range, chroma centered at 128).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pixel {
    pub y: u8,
    pub cb: u8,
    pub cr: u8,
}

impl Pixel {
    pub const fn new(y: u8, cb: u8, cr: u8) -> Self {
        Self { y, cb, cr }
    }

    /// BT.601 full-range conversion from RGB.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        let y = 0.299 * r + 0.587 * g + 0.114 * b;
        let cb = 128.0 - 0.168_736 * r - 0.331_264 * g + 0.5 * b;
        let cr = 128.0 + 0.5 * r - 0.418_688 * g - 0.081_312 * b;
        Self {
            y: y.round().clamp(0.0, 255.0) as u8,
            cb: cb.round().clamp(0.0, 255.0) as u8,
            cr: cr.round().clamp(0.0, 255.0) as u8,
        }
    }

    /// Inverse of [`Pixel::from_rgb`], used for debug overlays.
    pub fn to_rgb(self) -> [u8; 3] {
        let y = self.y as f32;
        let cb = self.cb as f32 - 128.0;
        let cr = self.cr as f32 - 128.0;
        let r = y + 1.402 * cr;
        let g = y - 0.344_136 * cb - 0.714_136 * cr;
        let b = y + 1.772 * cb;
        [
            r.round().clamp(0.0, 255.0) as u8,
            g.round().clamp(0.0, 255.0) as u8,
            b.round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Squared euclidean distance in luma/chroma space.
    #[inline]
    pub fn distance2(self, other: Pixel) -> f32 {
        let dy = self.y as f32 - other.y as f32;
        let dcb = self.cb as f32 - other.cb as f32;
        let dcr = self.cr as f32 - other.cr as f32;
        dy * dy + dcb * dcb + dcr * dcr
    }
}

/// Borrowed YCbCr frame.
#[derive(Clone, Copy, Debug)]
pub struct ImageYCbCr<'a> {
    pub w: usize,
    pub h: usize,
    /// Pixels between consecutive rows.
    pub stride: usize,
    pub data: &'a [Pixel],
}

impl<'a> ImageYCbCr<'a> {
    /// True when the view is non-empty and the buffer covers every row.
    pub fn is_well_formed(&self) -> bool {
        self.w > 0
            && self.h > 0
            && self.stride >= self.w
            && self.data.len() >= (self.h - 1) * self.stride + self.w
    }
}

impl<'a> crate::image::traits::ImageView for ImageYCbCr<'a> {
    type Pixel = Pixel;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[Pixel] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

/// Owned YCbCr buffer in row-major layout (stride == width).
#[derive(Clone, Debug)]
pub struct YCbCrImage {
    pub w: usize,
    pub h: usize,
    pub data: Vec<Pixel>,
}

impl YCbCrImage {
    /// Construct a `w × h` image filled with `fill`.
    pub fn new(w: usize, h: usize, fill: Pixel) -> Self {
        Self {
            w,
            h,
            data: vec![fill; w * h],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Pixel {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, p: Pixel) {
        let i = y * self.w + x;
        self.data[i] = p;
    }

    /// Paint the half-open rectangle `[x0, x1) × [y0, y1)`, clipped to the image.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, p: Pixel) {
        let x1 = x1.min(self.w);
        let y1 = y1.min(self.h);
        for y in y0.min(y1)..y1 {
            for x in x0.min(x1)..x1 {
                self.set(x, y, p);
            }
        }
    }

    pub fn as_view(&self) -> ImageYCbCr<'_> {
        ImageYCbCr {
            w: self.w,
            h: self.h,
            stride: self.w,
            data: &self.data,
        }
    }
}
