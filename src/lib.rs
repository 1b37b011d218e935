#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod boundary;
pub mod color;
pub mod detector;
pub mod diagnostics;
pub mod geometry;
pub mod image;
pub mod types;

// Building blocks of the detector; public for tools and tests.
pub mod config;
pub mod spots;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{DetectorWorkspace, Frame, GoalDetector, GoalParams};
pub use crate::types::{GoalPercept, GoalPost, ObstacleSpan, PostSide};

// High-level diagnostics returned by the detector.
pub use crate::diagnostics::{DetectionReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use goal_perceptor::prelude::*;
///
/// # fn main() {
/// let (w, h) = (320usize, 240usize);
/// let image = YCbCrImage::new(w, h, Pixel::new(90, 95, 85));
/// let camera = PinholeCamera::new(300.0, 160.0, 120.0, 500.0, 0.0);
/// let classifier = ThresholdClassifier::default();
/// let boundary = Polyline::from_pairs(&[(0, 150), (319, 150)]);
///
/// let mut det = GoalDetector::new(GoalParams::default());
/// let percept = det.process(&Frame::new(image.as_view(), &camera, &classifier, &boundary));
/// println!("posts={} latency_ms={:.3}", percept.posts.len(), percept.latency_ms);
/// # }
/// ```
pub mod prelude {
    pub use crate::boundary::Polyline;
    pub use crate::color::ThresholdClassifier;
    pub use crate::geometry::{CameraView, FrameMotion, PinholeCamera};
    pub use crate::image::{ImageYCbCr, Pixel, YCbCrImage};
    pub use crate::{Frame, GoalDetector, GoalParams, GoalPercept, PostSide};
}

// --- Stage-level API (for tools & advanced users) ----------------------------

pub mod stages {
    pub use crate::detector::filter::filter_spot;
    pub use crate::detector::position::{estimate_position, PositionSource};
    pub use crate::detector::select::{find_duplicates, select_posts, Selection};
    pub use crate::detector::validate::{soft_score, validate_spots, ValidationContext};
    pub use crate::detector::vote::ground_vote;
    pub use crate::spots::scanner::{scan_field_boundary, scan_line};
    pub use crate::spots::tracker::{track, track_down, track_up, UpScanState};

    pub use crate::diagnostics::{
        InputDescriptor, RejectReason, RejectedSpot, StageTiming, TimingBreakdown,
    };
}
