//! Goal-post candidate spots: discovery and vertical tracking.
//!
//! - [`scanner`] finds candidate bands along the field boundary (or along a
//!   fixed scan row).
//! - [`tracker`] follows each band down to its base and up to its top, and
//!   classifies crossbar sides.
//! - [`walk`] holds the gap-tolerant walk shared by both.

pub mod options;
pub mod scanner;
pub mod tracker;
pub mod types;
pub mod walk;

pub use options::{ScanOptions, SpotSource, TrackOptions};
pub use scanner::{scan_field_boundary, scan_line};
pub use tracker::{track, UpScanState};
pub use types::Spot;
