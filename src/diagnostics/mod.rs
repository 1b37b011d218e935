//! Diagnostics data model returned by the detector.
//!
//! `DetectionReport` bundles the per-frame [`GoalPercept`](crate::GoalPercept)
//! with a `PipelineTrace`: candidate counts, every rejected spot with its
//! reason, the scored spots in ranking order and per-stage timings.

pub mod pipeline;
pub mod timing;

pub use pipeline::{DetectionReport, InputDescriptor, PipelineTrace, RejectReason, RejectedSpot};
pub use timing::{StageTiming, TimingBreakdown};
