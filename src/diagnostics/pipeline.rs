use crate::diagnostics::TimingBreakdown;
use crate::geometry::CameraView;
use crate::spots::Spot;
use crate::types::{GoalPercept, ObstacleSpan};
use serde::Serialize;

/// Result produced by [`GoalDetector::process_with_diagnostics`](crate::GoalDetector).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub percept: GoalPercept,
    pub trace: PipelineTrace,
}

/// What happened to the candidates of one frame.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    /// Set when the frame was skipped before scanning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_height: Option<i32>,
    /// Spots produced by the scanners.
    pub candidates: usize,
    /// Spots that reached the validator, in ranking order (best last).
    pub scored: Vec<Spot>,
    pub rejected: Vec<RejectedSpot>,
    /// Spots whose field position came from last frame's posts.
    pub hint_matches: usize,
}

impl PipelineTrace {
    pub fn new(input: InputDescriptor) -> Self {
        Self {
            input,
            timings: TimingBreakdown::default(),
            skipped: None,
            scan_height: None,
            candidates: 0,
            scored: Vec::new(),
            rejected: Vec::new(),
            hint_matches: 0,
        }
    }

    pub fn rejected_for(&self, reason: impl Fn(&RejectReason) -> bool) -> usize {
        self.rejected.iter().filter(|r| reason(&r.reason)).count()
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub view: CameraView,
    pub timestamp_ms: u64,
    /// Posts remembered from the previous frame.
    pub hints: usize,
}

/// Spot dropped before selection.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedSpot {
    pub spot: Spot,
    pub reason: RejectReason,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RejectReason {
    /// The body contour ends above the detected base.
    #[serde(rename_all = "camelCase")]
    OnRobotBody { detected_base: i32, clipped_base: i32 },
    InsideObstacle { obstacle: ObstacleSpan },
    #[serde(rename_all = "camelCase")]
    LowVote { vote_point: f32 },
    /// Resolved as a duplicate of another spot.
    #[serde(rename_all = "camelCase")]
    Duplicate { kept_id: usize },
}
