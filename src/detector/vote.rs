//! Ground vote: a real post stands on the field, so the rows just below its
//! base must look like field.
use super::params::VoteOptions;
use crate::color::ColorClassifier;
use crate::image::{ImageView, ImageYCbCr};
use crate::spots::Spot;

/// Fraction of ground-colored samples below `spot.base`.
///
/// Samples below the bottom row are not counted; with none left the spot is
/// cut off by the image border and scores 1.
pub fn ground_vote(
    image: &ImageYCbCr<'_>,
    classifier: &dyn ColorClassifier,
    spot: &Spot,
    opts: &VoteOptions,
) -> f32 {
    let x = spot.base.x;
    let (mut hits, mut seen) = (0u32, 0u32);
    for k in 1..=opts.samples.max(0) {
        let y = spot.base.y + k * opts.stride;
        if let Some(p) = image.pixel(x, y) {
            seen += 1;
            if classifier.is_ground(p) {
                hits += 1;
            }
        }
    }
    if seen == 0 {
        1.0
    } else {
        hits as f32 / seen as f32
    }
}
