//! Vertical extent tracking.
//!
//! Starting from a candidate's centre the tracker alternates vertical walks
//! and horizontal re-centring: downwards to find where the post meets the
//! ground, upwards to find its top. On the way up a sudden one-sided widening
//! of the band means the walk entered the crossbar, which tells on which side
//! of the goal the post stands.
use super::options::TrackOptions;
use super::types::Spot;
use super::walk::gap_tolerant_walk;
use crate::color::ColorClassifier;
use crate::image::{ImageView, ImageYCbCr};
use crate::types::PostSide;
use log::trace;
use nalgebra::Point2;

/// State of the upward pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpScanState {
    Walking,
    /// The band widened towards one side; the post is on the other side of
    /// the goal.
    CrossbarFound(PostSide),
    /// The walk stopped moving (or hit the iteration bound) without a crossbar.
    Exhausted,
}

impl UpScanState {
    pub fn side(self) -> PostSide {
        match self {
            Self::CrossbarFound(side) => side,
            _ => PostSide::Unknown,
        }
    }
}

struct PostPixels<'a, 'c> {
    image: ImageYCbCr<'a>,
    classifier: &'c dyn ColorClassifier,
}

impl PostPixels<'_, '_> {
    #[inline]
    fn at(&self, x: i32, y: i32) -> bool {
        self.image
            .pixel(x, y)
            .is_some_and(|p| self.classifier.is_candidate(p))
    }

    /// Left and right band edges on row `y` around column `x`.
    fn edges(&self, x: i32, y: i32) -> (i32, i32) {
        let w = self.image.w as i32;
        let left = gap_tolerant_walk(x, -1, 1, |c| self.at(c, y));
        let right = gap_tolerant_walk(x, 1, w - 1, |c| self.at(c, y));
        (left, right)
    }
}

/// Crossbar test between two consecutive edge measurements.
///
/// The left edge jumping outwards while the right edge holds means the
/// crossbar extends to the left, so this is the right post (and vice versa).
pub fn crossbar_side(
    last: (i32, i32),
    current: (i32, i32),
    initial_width: i32,
) -> Option<PostSide> {
    let (last_left, last_right) = last;
    let (left, right) = current;
    if last_left - left > initial_width && (right - last_right).abs() < initial_width {
        Some(PostSide::Right)
    } else if right - last_right > initial_width && (left - last_left).abs() < initial_width {
        Some(PostSide::Left)
    } else {
        None
    }
}

/// Follow the band down to its base; records the measured widths.
pub fn track_down(image: &ImageYCbCr<'_>, classifier: &dyn ColorClassifier, spot: &mut Spot) {
    let post = PostPixels {
        image: *image,
        classifier,
    };
    let h = image.h as i32;
    let mut mid = spot.mid;
    let mut base_y = mid.y;
    let mut last_x = None;
    let mut iterations = 0;
    while last_x != Some(mid.x) && spot.start < mid.x && mid.x < spot.end && iterations < h {
        iterations += 1;
        last_x = Some(mid.x);
        base_y = gap_tolerant_walk(mid.y + 1, 1, h - 1, |y| post.at(mid.x, y));
        mid.y += (base_y - mid.y) / 2;
        let (left, right) = post.edges(mid.x, mid.y);
        let width = right - left;
        spot.widths.push(width);
        mid.x = left + width / 2;
    }
    spot.base = Point2::new(mid.x, base_y + 1);
}

/// Follow the band up to its top, watching for the crossbar.
pub fn track_up(
    image: &ImageYCbCr<'_>,
    classifier: &dyn ColorClassifier,
    spot: &mut Spot,
) -> UpScanState {
    let post = PostPixels {
        image: *image,
        classifier,
    };
    let (w, h) = (image.w as i32, image.h as i32);
    let mut mid = spot.mid;
    let width = spot.widths.last().copied().unwrap_or_else(|| spot.width());
    let (mut left, mut right) = (mid.x - width / 2, mid.x + width / 2);
    let mut initial_width: Option<i32> = None;
    let mut top_y = mid.y;
    let mut last_y = None;
    let mut iterations = 0;

    let mut state = UpScanState::Walking;
    while state == UpScanState::Walking {
        if last_y == Some(mid.y) || iterations >= h {
            state = UpScanState::Exhausted;
            break;
        }
        iterations += 1;
        last_y = Some(mid.y);

        top_y = gap_tolerant_walk(mid.y - 1, -1, 0, |y| post.at(mid.x, y));
        mid.y -= (mid.y - top_y) / 2;
        let last = (left, right);
        (left, right) = post.edges(mid.x, mid.y);
        let width = right - left;
        if initial_width.is_none() && last.0 > 1 && last.1 < w - 2 {
            initial_width = Some(width);
        }
        match initial_width.and_then(|iw| crossbar_side(last, (left, right), iw)) {
            Some(side) => {
                trace!(
                    "track_up: crossbar at row {} edges {:?} -> ({}, {})",
                    mid.y,
                    last,
                    left,
                    right
                );
                state = UpScanState::CrossbarFound(side);
            }
            None => mid.x = left + width / 2,
        }
    }
    spot.top = Point2::new(mid.x, top_y);
    state
}

/// Re-walk the base with the bright-neutral test, starting a few rows above.
pub fn refine_base(image: &ImageYCbCr<'_>, spot: &mut Spot, opts: &TrackOptions) {
    let h = image.h as i32;
    let x = spot.base.x;
    let from = (spot.base.y - opts.base_refine_offset).max(0);
    spot.base.y = gap_tolerant_walk(from, 1, h - 1, |y| {
        image.pixel(x, y).is_some_and(|p| opts.base_refine.matches(p))
    });
}

/// Full vertical tracking of one spot: base, top, side.
pub fn track(
    image: &ImageYCbCr<'_>,
    classifier: &dyn ColorClassifier,
    spot: &mut Spot,
    opts: &TrackOptions,
) -> UpScanState {
    track_down(image, classifier, spot);
    let outcome = track_up(image, classifier, spot);
    if opts.refine_base {
        refine_base(image, spot, opts);
    }
    if spot.top.y > spot.base.y {
        spot.top.y = spot.base.y;
    }
    spot.side = outcome.side();
    outcome
}
