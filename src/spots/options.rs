use crate::color::BrightNeutral;
use serde::{Deserialize, Serialize};

/// Where candidate spots come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotSource {
    /// Vertical runs grown from the field boundary.
    #[default]
    FieldBoundary,
    /// Horizontal runs along the scan-height row.
    ScanLine,
    /// Both scanners; duplicates are resolved by the selector.
    Both,
}

impl SpotSource {
    pub fn uses_field_boundary(self) -> bool {
        matches!(self, Self::FieldBoundary | Self::Both)
    }

    pub fn uses_scan_line(self) -> bool {
        matches!(self, Self::ScanLine | Self::Both)
    }
}

/// Options of the candidate scanners.
///
/// - `column_stride` / `row_stride`: sampling steps of the boundary scanner.
/// - `min_run_length`: vertical runs shorter than this are noise.
/// - `color_difference_threshold`: squared YCbCr distance allowed between
///   consecutive post pixels along a run.
/// - `min_spot_width`: merged candidates narrower than this are dropped.
/// - `yellow_skipping`: consecutive misses tolerated by the scan-line finder.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    pub source: SpotSource,
    pub column_stride: i32,
    pub row_stride: i32,
    pub min_run_length: i32,
    pub color_difference_threshold: f32,
    pub min_spot_width: i32,
    pub yellow_skipping: i32,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            source: SpotSource::FieldBoundary,
            column_stride: 2,
            row_stride: 2,
            min_run_length: 30,
            color_difference_threshold: 900.0,
            min_spot_width: 3,
            yellow_skipping: 4,
        }
    }
}

/// Options of the vertical extent tracker.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackOptions {
    /// Re-walk the base with a bright-neutral test after tracking.
    pub refine_base: bool,
    pub base_refine: BrightNeutral,
    /// Rows above the tracked base where base refinement starts.
    pub base_refine_offset: i32,
}

impl Default for TrackOptions {
    fn default() -> Self {
        Self {
            refine_base: false,
            base_refine: BrightNeutral::default(),
            base_refine_offset: 5,
        }
    }
}
