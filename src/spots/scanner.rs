//! Candidate scanners.
//!
//! The boundary scanner samples every other column at the field-boundary
//! row. Where the pixel has the post color it grows a vertical run up and
//! down (gap tolerant, following slow color drift along the post) and merges
//! runs of neighbouring columns into one candidate spot. A candidate survives
//! when it is wide enough and reaches up to the scan height.
//!
//! The scan-line finder is the simpler horizontal variant: runs of post
//! colored pixels along the scan-height row, with a skip tolerance.
use super::options::ScanOptions;
use super::types::Spot;
use super::walk::{gap_tolerant_walk, GapCounter};
use crate::boundary::Polyline;
use crate::color::ColorClassifier;
use crate::image::{ImageView, ImageYCbCr, Pixel};
use nalgebra::Point2;

/// Spot being merged from consecutive accepted columns.
struct OpenCandidate {
    spot: Spot,
}

impl OpenCandidate {
    fn new(x: i32, y: i32, top: i32, bottom: i32) -> Self {
        let mut spot = Spot::new(x, x, y);
        spot.mid = Point2::new(x, y);
        spot.top = Point2::new(x, top);
        spot.base = Point2::new(x, bottom);
        Self { spot }
    }

    fn extend(&mut self, x: i32, top: i32, bottom: i32) {
        let s = &mut self.spot;
        if s.top.y > top {
            s.top = Point2::new(s.mid.x, top);
        }
        if s.base.y < bottom {
            s.base = Point2::new(s.mid.x, bottom);
        }
        s.end = x + 1;
    }

    /// Finish the candidate; `None` when it fails the width or reach gates.
    fn close(self, scan_height: i32, opts: &ScanOptions) -> Option<Spot> {
        let mut spot = self.spot;
        if spot.width() < opts.min_spot_width {
            return None;
        }
        spot.mid.x = spot.center_x();
        (spot.top.y <= scan_height).then_some(spot)
    }
}

/// Grow a vertical run through `(x, y)`; returns `(top, bottom)` rows or
/// `None` when the run is shorter than `min_run_length`.
fn grow_vertical_run(
    image: &ImageYCbCr<'_>,
    classifier: &dyn ColorClassifier,
    x: i32,
    y: i32,
    opts: &ScanOptions,
) -> Option<(i32, i32)> {
    let seed = image.pixel(x, y)?;
    let h = image.h as i32;
    let stride = opts.row_stride.max(1);
    let top = gap_tolerant_walk(y, -stride, 1, similar_to(*image, classifier, x, seed, opts));
    let bottom = gap_tolerant_walk(y, stride, h - 1, similar_to(*image, classifier, x, seed, opts));
    (bottom - top >= opts.min_run_length).then_some((top, bottom))
}

/// Post colored and close to the last post colored pixel seen on this walk.
fn similar_to<'i>(
    image: ImageYCbCr<'i>,
    classifier: &'i dyn ColorClassifier,
    x: i32,
    seed: Pixel,
    opts: &ScanOptions,
) -> impl FnMut(i32) -> bool + 'i {
    let mut reference = seed;
    let threshold = opts.color_difference_threshold;
    move |y| {
        let Some(p) = image.pixel(x, y) else {
            return false;
        };
        if !classifier.is_candidate(p) {
            return false;
        }
        let diff2 = p.distance2(reference);
        reference = p;
        diff2 < threshold
    }
}

/// Scan along the field boundary and append merged candidates to `spots`.
pub fn scan_field_boundary(
    image: &ImageYCbCr<'_>,
    classifier: &dyn ColorClassifier,
    boundary: &Polyline,
    scan_height: i32,
    opts: &ScanOptions,
    spots: &mut Vec<Spot>,
) {
    let w = image.w as i32;
    let h = image.h as i32;
    let stride = opts.column_stride.max(1);
    let mut open: Option<OpenCandidate> = None;
    let mut columns = GapCounter::new();

    let mut x = 0;
    while x < w - 1 {
        let seed_row = boundary
            .y_at(x)
            .filter(|&y| (0..h).contains(&y))
            .filter(|&y| image.pixel(x, y).is_some_and(|p| classifier.is_candidate(p)));

        match seed_row {
            Some(y) => {
                // Short runs neither extend nor interrupt the open candidate.
                if let Some((top, bottom)) = grow_vertical_run(image, classifier, x, y, opts) {
                    match open.as_mut() {
                        Some(c) => c.extend(x, top, bottom),
                        None => {
                            columns = GapCounter::new();
                            let mut c = OpenCandidate::new(x, y, top, bottom);
                            c.extend(x, top, bottom);
                            open = Some(c);
                        }
                    }
                    columns.hit();
                }
            }
            None => {
                if !columns.miss() {
                    if let Some(c) = open.take() {
                        spots.extend(c.close(scan_height, opts));
                    }
                }
            }
        }
        x += stride;
    }
    if let Some(c) = open.take() {
        spots.extend(c.close(scan_height, opts));
    }
}

/// Horizontal runs of post colored pixels on row `row`.
pub fn scan_line(
    image: &ImageYCbCr<'_>,
    classifier: &dyn ColorClassifier,
    row: i32,
    opts: &ScanOptions,
    spots: &mut Vec<Spot>,
) {
    let w = image.w as i32;
    let is_post = |x: i32| image.pixel(x, row).is_some_and(|p| classifier.is_candidate(p));
    let mut x = 0;
    while x < w {
        if is_post(x) {
            let start = x;
            let mut hits = 0;
            let mut skipped = 0;
            while x < w && skipped < opts.yellow_skipping {
                if is_post(x) {
                    hits += 1;
                    skipped = 0;
                } else {
                    skipped += 1;
                }
                x += 1;
            }
            if hits > 0 {
                spots.push(Spot::new(start, x - skipped, row));
            }
        }
        x += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ThresholdClassifier;
    use crate::image::YCbCrImage;

    const GREEN: Pixel = Pixel::new(90, 95, 85);
    const WHITE: Pixel = Pixel::new(240, 128, 128);

    fn scene(w: usize, h: usize, bands: &[(usize, usize, usize, usize)]) -> YCbCrImage {
        let mut img = YCbCrImage::new(w, h, GREEN);
        for &(x0, y0, x1, y1) in bands {
            img.fill_rect(x0, y0, x1, y1, WHITE);
        }
        img
    }

    fn flat_boundary(w: i32, y: i32) -> Polyline {
        Polyline::from_pairs(&[(0, y), (w - 1, y)])
    }

    #[test]
    fn single_band_yields_one_spot() {
        let img = scene(320, 240, &[(100, 40, 112, 200)]);
        let mut spots = Vec::new();
        scan_field_boundary(
            &img.as_view(),
            &ThresholdClassifier::default(),
            &flat_boundary(320, 120),
            120,
            &ScanOptions::default(),
            &mut spots,
        );
        assert_eq!(spots.len(), 1, "spots: {spots:?}");
        let s = &spots[0];
        assert!((s.width() - 12).abs() <= 2, "width {}", s.width());
        let extent = s.base.y - s.top.y;
        assert!((extent - 160).abs() <= 4, "extent {extent}");
        assert!(s.start <= s.mid.x && s.mid.x <= s.end);
    }

    #[test]
    fn short_runs_are_ignored() {
        let img = scene(320, 240, &[(100, 110, 112, 130)]);
        let mut spots = Vec::new();
        scan_field_boundary(
            &img.as_view(),
            &ThresholdClassifier::default(),
            &flat_boundary(320, 120),
            120,
            &ScanOptions::default(),
            &mut spots,
        );
        assert!(spots.is_empty());
    }

    #[test]
    fn band_below_scan_height_is_rejected() {
        let img = scene(320, 240, &[(100, 130, 112, 230)]);
        let mut spots = Vec::new();
        scan_field_boundary(
            &img.as_view(),
            &ThresholdClassifier::default(),
            &flat_boundary(320, 150),
            120,
            &ScanOptions::default(),
            &mut spots,
        );
        assert!(spots.is_empty(), "top below scan height must not survive");
    }

    #[test]
    fn two_separated_bands_yield_two_spots() {
        let img = scene(320, 240, &[(60, 40, 70, 200), (200, 40, 210, 200)]);
        let mut spots = Vec::new();
        scan_field_boundary(
            &img.as_view(),
            &ThresholdClassifier::default(),
            &flat_boundary(320, 120),
            120,
            &ScanOptions::default(),
            &mut spots,
        );
        assert_eq!(spots.len(), 2);
        assert!(spots[0].end <= spots[1].start);
    }

    #[test]
    fn scan_line_tolerates_small_holes() {
        let mut img = scene(320, 240, &[(100, 0, 130, 240)]);
        img.set(110, 50, GREEN);
        let mut spots = Vec::new();
        scan_line(
            &img.as_view(),
            &ThresholdClassifier::default(),
            50,
            &ScanOptions::default(),
            &mut spots,
        );
        assert_eq!(spots.len(), 1);
        assert_eq!(spots[0].start, 100);
        assert_eq!(spots[0].end, 130);
    }

    fn spans(img: &YCbCrImage) -> Vec<(i32, i32)> {
        let mut spots = Vec::new();
        scan_field_boundary(
            &img.as_view(),
            &ThresholdClassifier::default(),
            &flat_boundary(320, 120),
            120,
            &ScanOptions::default(),
            &mut spots,
        );
        spots.iter().map(|s| (s.start, s.end)).collect()
    }

    #[test]
    fn one_missed_column_keeps_the_candidate_open() {
        let mut img = scene(320, 240, &[(100, 40, 130, 200)]);
        img.set(110, 120, GREEN);
        assert_eq!(spans(&img), vec![(100, 129)]);
    }

    #[test]
    fn two_missed_columns_close_the_candidate() {
        let mut img = scene(320, 240, &[(100, 40, 130, 200)]);
        img.set(110, 120, GREEN);
        img.set(112, 120, GREEN);
        assert_eq!(spans(&img), vec![(100, 109), (114, 129)]);
    }
}
