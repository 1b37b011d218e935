//! Detector pipeline driving goal-post detection end-to-end.
//!
//! The [`GoalDetector`] takes one [`Frame`] at a time and runs
//! scan → track → filter → vote → locate → validate → select. Between frames
//! it keeps two things: the posts accepted on the lower camera (hints for
//! truncated posts on the next upper frame) and the last-seen timestamps.
//!
//! Typical usage:
//! ```no_run
//! use goal_perceptor::{Frame, GoalDetector, GoalParams};
//! use goal_perceptor::boundary::Polyline;
//! use goal_perceptor::color::ThresholdClassifier;
//! use goal_perceptor::geometry::PinholeCamera;
//! use goal_perceptor::image::ImageYCbCr;
//!
//! # fn example(image: ImageYCbCr<'_>) {
//! let camera = PinholeCamera::new(300.0, 160.0, 120.0, 500.0, 0.0);
//! let classifier = ThresholdClassifier::default();
//! let boundary = Polyline::from_pairs(&[(0, 150), (319, 150)]);
//! let mut detector = GoalDetector::new(GoalParams::default());
//! let frame = Frame::new(image, &camera, &classifier, &boundary);
//! let report = detector.process_with_diagnostics(&frame);
//! for post in &report.percept.posts {
//!     println!("{:?} at {:?}", post.side, post.position_on_field);
//! }
//! # }
//! ```
use super::filter::filter_spot;
use super::frame::Frame;
use super::params::GoalParams;
use super::position::{estimate_position, PositionSource};
use super::select::{find_duplicates, select_posts};
use super::validate::{validate_spots, ValidationContext};
use super::vote::ground_vote;
use super::workspace::DetectorWorkspace;
use crate::color::ColorClassifier;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    DetectionReport, InputDescriptor, PipelineTrace, RejectReason, RejectedSpot,
};
use crate::geometry::CameraView;
use crate::image::ImageYCbCr;
use crate::spots::{scan_field_boundary, scan_line, track, Spot, TrackOptions};
use crate::types::GoalPercept;
use log::debug;
use std::time::Instant;

/// Goal-post detector with cross-frame memory.
pub struct GoalDetector {
    params: GoalParams,
    hints: Vec<Spot>,
    last_post_seen: Option<u64>,
    last_goal_seen: Option<u64>,
    workspace: DetectorWorkspace,
}

/// Drop every spot for which `check` fails, recording the reason.
fn retain_checked(
    spots: &mut Vec<Spot>,
    rejected: &mut Vec<RejectedSpot>,
    mut check: impl FnMut(&mut Spot) -> Result<(), RejectReason>,
) {
    spots.retain_mut(|spot| match check(spot) {
        Ok(()) => true,
        Err(reason) => {
            debug!("spot {} rejected: {:?}", spot.id, reason);
            rejected.push(RejectedSpot {
                spot: spot.clone(),
                reason,
            });
            false
        }
    });
}

#[cfg(feature = "parallel")]
fn track_spots(
    image: &ImageYCbCr<'_>,
    classifier: &(dyn ColorClassifier + Sync),
    spots: &mut [Spot],
    opts: &TrackOptions,
) {
    use rayon::prelude::*;
    spots.par_iter_mut().for_each(|spot| {
        track(image, classifier, spot, opts);
    });
}

#[cfg(not(feature = "parallel"))]
fn track_spots(
    image: &ImageYCbCr<'_>,
    classifier: &(dyn ColorClassifier + Sync),
    spots: &mut [Spot],
    opts: &TrackOptions,
) {
    for spot in spots.iter_mut() {
        track(image, classifier, spot, opts);
    }
}

impl GoalDetector {
    /// Create a detector with the supplied parameters.
    pub fn new(params: GoalParams) -> Self {
        Self {
            params,
            hints: Vec::new(),
            last_post_seen: None,
            last_goal_seen: None,
            workspace: DetectorWorkspace::new(),
        }
    }

    pub fn params(&self) -> &GoalParams {
        &self.params
    }

    pub fn set_params(&mut self, params: GoalParams) {
        self.params = params;
    }

    pub fn set_quality(&mut self, quality: f32) {
        self.params.quality = quality;
    }

    pub fn set_min_vote_point(&mut self, min_vote_point: f32) {
        self.params.vote.min_vote_point = min_vote_point;
    }

    pub fn set_color_difference(&mut self, threshold: f32) {
        self.params.scan.color_difference_threshold = threshold;
    }

    pub fn set_reject_obstacles(&mut self, reject: bool) {
        self.params.filter.reject_obstacles = reject;
    }

    /// Posts remembered from the last lower-camera frame.
    pub fn hints(&self) -> &[Spot] {
        &self.hints
    }

    /// Replace the remembered posts, e.g. when restoring state.
    pub fn set_hints(&mut self, hints: Vec<Spot>) {
        self.hints = hints;
    }

    /// Run the detector on one frame, returning only the percept.
    pub fn process(&mut self, frame: &Frame<'_>) -> GoalPercept {
        self.process_with_diagnostics(frame).percept
    }

    /// Run the detector and return both the percept and a detailed report.
    pub fn process_with_diagnostics(&mut self, frame: &Frame<'_>) -> DetectionReport {
        let total_start = Instant::now();
        debug!(
            "GoalDetector::process start w={} h={} view={:?} hints={}",
            frame.image.w,
            frame.image.h,
            frame.view,
            self.hints.len()
        );
        let mut trace = PipelineTrace::new(InputDescriptor {
            width: frame.image.w,
            height: frame.image.h,
            view: frame.view,
            timestamp_ms: frame.timestamp_ms,
            hints: self.hints.len(),
        });
        self.workspace.reset();
        let hints = std::mem::take(&mut self.hints);

        if let Some(reason) = frame.precondition_failure() {
            debug!("GoalDetector::process skipped: {reason}");
            trace.skipped = Some(reason.to_string());
            return self.finish(GoalPercept::default(), trace, total_start);
        }

        let params = &self.params;
        let spots = &mut self.workspace.spots;
        let scan_height = frame.scan_height();
        trace.scan_height = Some(scan_height);

        trace.timings.time("scan", || {
            if params.scan.source.uses_field_boundary() {
                scan_field_boundary(
                    &frame.image,
                    frame.classifier,
                    frame.field_boundary,
                    scan_height,
                    &params.scan,
                    spots,
                );
            }
            if params.scan.source.uses_scan_line() {
                scan_line(&frame.image, frame.classifier, scan_height, &params.scan, spots);
            }
        });
        for (id, spot) in spots.iter_mut().enumerate() {
            spot.id = id;
        }
        trace.candidates = spots.len();
        debug!("scan: {} candidates at row {}", spots.len(), scan_height);

        trace.timings.time("track", || {
            track_spots(&frame.image, frame.classifier, spots, &params.track)
        });

        let rejected = &mut trace.rejected;
        trace.timings.time("filter", || {
            retain_checked(spots, rejected, |spot| filter_spot(spot, frame, &params.filter))
        });

        trace.timings.time("vote", || {
            retain_checked(spots, rejected, |spot| {
                spot.vote_point = ground_vote(&frame.image, frame.classifier, spot, &params.vote);
                if spot.vote_point < params.vote.min_vote_point {
                    Err(RejectReason::LowVote {
                        vote_point: spot.vote_point,
                    })
                } else {
                    Ok(())
                }
            })
        });

        let hint_matches = trace.timings.time("position", || {
            let mut matches = 0;
            for spot in spots.iter_mut() {
                let source = estimate_position(
                    spot,
                    frame,
                    &hints,
                    scan_height,
                    &params.field,
                    &params.position,
                );
                if source == PositionSource::Hint {
                    matches += 1;
                }
            }
            matches
        });
        trace.hint_matches = hint_matches;

        trace.timings.time("validate", || {
            let ctx = ValidationContext {
                frame,
                field: &params.field,
                opts: &params.validation,
                quality: params.quality,
            };
            validate_spots(spots, &ctx);
        });

        let select_start = Instant::now();
        let duplicates = find_duplicates(&self.workspace.spots, self.params.selection.dedup);
        for (spot, kept_id) in self.workspace.remove_duplicates(duplicates) {
            debug!("spot {} duplicates spot {}", spot.id, kept_id);
            trace.rejected.push(RejectedSpot {
                spot,
                reason: RejectReason::Duplicate { kept_id },
            });
        }
        trace.scored = self.workspace.spots().to_vec();
        let selection = select_posts(self.workspace.spots(), self.params.quality);
        trace.timings.push("select", elapsed_ms(select_start));

        if frame.view == CameraView::Lower {
            self.hints = selection.accepted;
        }
        if !selection.posts.is_empty() {
            self.last_post_seen = Some(frame.timestamp_ms);
        }
        if selection.complete_goal {
            self.last_goal_seen = Some(frame.timestamp_ms);
        }
        debug!(
            "GoalDetector::process done posts={} complete={}",
            selection.posts.len(),
            selection.complete_goal
        );
        let percept = GoalPercept {
            posts: selection.posts,
            complete_goal_seen: selection.complete_goal,
            ..GoalPercept::default()
        };
        self.finish(percept, trace, total_start)
    }

    fn finish(
        &self,
        mut percept: GoalPercept,
        mut trace: PipelineTrace,
        start: Instant,
    ) -> DetectionReport {
        let total_ms = elapsed_ms(start);
        percept.time_when_goal_post_last_seen = self.last_post_seen;
        percept.time_when_complete_goal_last_seen = self.last_goal_seen;
        percept.latency_ms = total_ms;
        trace.timings.total_ms = total_ms;
        DetectionReport { percept, trace }
    }
}

impl Default for GoalDetector {
    fn default() -> Self {
        Self::new(GoalParams::default())
    }
}
