//! Color classification seam.
//!
//! The detector never decides colors itself; it asks a [`ColorClassifier`]
//! whether a pixel may belong to a goal post and whether a pixel looks like
//! field ground. [`ThresholdClassifier`] is a box-threshold implementation in
//! YCbCr space used by the demo tool and the tests.
use crate::image::Pixel;
use serde::{Deserialize, Serialize};

/// Pixel predicates supplied by the color-calibration layer.
pub trait ColorClassifier {
    /// True when the pixel has the goal-post color.
    fn is_candidate(&self, p: Pixel) -> bool;
    /// True when the pixel looks like the field surface.
    fn is_ground(&self, p: Pixel) -> bool;
}

/// Inclusive per-channel ranges in YCbCr.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorBox {
    pub y: [u8; 2],
    pub cb: [u8; 2],
    pub cr: [u8; 2],
}

impl ColorBox {
    #[inline]
    pub fn contains(&self, p: Pixel) -> bool {
        (self.y[0]..=self.y[1]).contains(&p.y)
            && (self.cb[0]..=self.cb[1]).contains(&p.cb)
            && (self.cr[0]..=self.cr[1]).contains(&p.cr)
    }
}

/// Box-threshold classifier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThresholdClassifier {
    pub post: ColorBox,
    pub ground: ColorBox,
}

impl Default for ThresholdClassifier {
    /// White posts on a green field.
    fn default() -> Self {
        Self {
            post: ColorBox {
                y: [170, 255],
                cb: [100, 156],
                cr: [100, 156],
            },
            ground: ColorBox {
                y: [40, 160],
                cb: [60, 120],
                cr: [40, 120],
            },
        }
    }
}

impl ColorClassifier for ThresholdClassifier {
    fn is_candidate(&self, p: Pixel) -> bool {
        self.post.contains(p)
    }

    fn is_ground(&self, p: Pixel) -> bool {
        self.ground.contains(p)
    }
}

/// Bright, nearly colorless pixel test used when refining a post base.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrightNeutral {
    /// Luma must exceed this value.
    pub min_luma: u8,
    /// Maximum |Cb − 128| and |Cr − 128|.
    pub max_chroma_offset: u8,
}

impl Default for BrightNeutral {
    fn default() -> Self {
        Self {
            min_luma: 110,
            max_chroma_offset: 50,
        }
    }
}

impl BrightNeutral {
    #[inline]
    pub fn matches(&self, p: Pixel) -> bool {
        let off = self.max_chroma_offset as i16;
        p.y > self.min_luma
            && (p.cb as i16 - 128).abs() < off
            && (p.cr as i16 - 128).abs() < off
    }
}
