//! Goal-post detector orchestrating the per-frame pipeline.
//!
//! Overview
//! - Candidate spots are scanned along the field boundary (and optionally
//!   along the horizon row) and tracked vertically to their base and top; the
//!   crossbar, when visible, tells which post of the goal a spot is.
//! - [`filter`] drops spots on the robot's body or inside obstacles, [`vote`]
//!   drops spots that do not stand on field-colored ground.
//! - [`position`] places each spot on the field, reusing last frame's posts
//!   for spots cut off by the bottom image border.
//! - [`validate`] scores plausibility and ranks; [`select`] removes duplicates
//!   and reports at most two posts.
//!
//! Modules
//! - [`params`] – configuration types used by the detector and the demo.
//! - [`frame`] – per-frame inputs.
//! - `pipeline` – the main [`GoalDetector`] implementation.
//! - `workspace` – reusable buffers that amortise allocations across frames.

pub mod filter;
pub mod frame;
pub mod params;
mod pipeline;
pub mod position;
pub mod select;
pub mod validate;
pub mod vote;
mod workspace;

pub use frame::Frame;
pub use params::{
    DedupStrategy, FieldDimensions, FilterOptions, GoalParams, PositionOptions, SelectionOptions,
    ValidationOptions, VoteOptions,
};
pub use pipeline::GoalDetector;
pub use workspace::DetectorWorkspace;
