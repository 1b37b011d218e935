//! Parameter types configuring the detector stages.
//!
//! One options struct per stage, grouped in [`GoalParams`]. Every struct
//! deserialises with `#[serde(default)]`, so a JSON config only needs the
//! keys it wants to override.
//!
//! Defaults are tuned for a 320×240 upper camera with white posts. The knobs
//! most worth touching are `quality`, `vote.min_vote_point` and
//! `scan.color_difference_threshold`.

use crate::spots::{ScanOptions, TrackOptions};
use serde::{Deserialize, Serialize};

/// Physical field and goal dimensions in millimetres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDimensions {
    pub goal_post_radius: f32,
    pub goal_height: f32,
    /// Inner distance between the two posts.
    pub goal_width: f32,
    pub field_length_outer: f32,
    pub field_width_outer: f32,
}

impl Default for FieldDimensions {
    fn default() -> Self {
        Self {
            goal_post_radius: 50.0,
            goal_height: 800.0,
            goal_width: 1500.0,
            field_length_outer: 10400.0,
            field_width_outer: 7400.0,
        }
    }
}

impl FieldDimensions {
    pub fn diagonal(&self) -> f32 {
        self.field_length_outer.hypot(self.field_width_outer)
    }

    pub fn post_diameter(&self) -> f32 {
        2.0 * self.goal_post_radius
    }
}

/// Occlusion filter toggles.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Drop spots whose centre column lies inside an obstacle span.
    pub reject_obstacles: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            reject_obstacles: true,
        }
    }
}

/// Ground-below-base voting.
///
/// - `samples`: rows sampled below the base.
/// - `stride`: row spacing between samples.
/// - `min_vote_point`: minimum fraction of ground-colored samples.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VoteOptions {
    pub samples: i32,
    pub stride: i32,
    pub min_vote_point: f32,
}

impl Default for VoteOptions {
    fn default() -> Self {
        Self {
            samples: 5,
            stride: 3,
            min_vote_point: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionOptions {
    /// A base closer than this to the bottom row counts as truncated.
    pub bottom_margin: i32,
    /// Match truncated spots against last frame's lower-camera posts.
    pub use_hints: bool,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            bottom_margin: 5,
            use_hints: true,
        }
    }
}

/// Plausibility scoring.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Farthest plausible post, as a multiple of the field diagonal.
    pub max_distance_factor: f32,
    /// The base may lie above the field boundary by `1 / boundary_tolerance_divisor`
    /// of the boundary row.
    pub boundary_tolerance_divisor: i32,
    /// Gate on every tracked width staying within `max_width_ratio` × width.
    pub check_constant_width: bool,
    pub max_width_ratio: f32,
    /// Score the measured height against the expected height.
    pub score_expected_height: bool,
    /// Relational score assigned when a pairing is found.
    pub relation_score: f32,
    /// Pair-distance score above which two spots count as one goal.
    pub pair_score_threshold: f32,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_distance_factor: 1.3,
            boundary_tolerance_divisor: 20,
            check_constant_width: false,
            max_width_ratio: 2.0,
            score_expected_height: false,
            relation_score: 75.0,
            pair_score_threshold: 75.0,
        }
    }
}

/// How near-duplicate spots are resolved before selection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DedupStrategy {
    /// Spots whose field positions lie within `margin_mm` of each other are
    /// duplicates; the one farther from the robot is kept.
    FieldDistance { margin_mm: f32 },
    /// Spots whose centre columns lie within `min_separation_px` are
    /// duplicates; the higher-ranked one is kept.
    ImageColumn { min_separation_px: i32 },
}

impl Default for DedupStrategy {
    fn default() -> Self {
        Self::ImageColumn {
            min_separation_px: 5,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionOptions {
    pub dedup: DedupStrategy,
}

/// Detector-wide parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalParams {
    /// Minimum validity for a post to be reported; also the neutral value of
    /// the relational scores.
    pub quality: f32,
    pub field: FieldDimensions,
    pub scan: ScanOptions,
    pub track: TrackOptions,
    pub filter: FilterOptions,
    pub vote: VoteOptions,
    pub position: PositionOptions,
    pub validation: ValidationOptions,
    pub selection: SelectionOptions,
}

impl Default for GoalParams {
    fn default() -> Self {
        Self {
            quality: 60.0,
            field: FieldDimensions::default(),
            scan: ScanOptions::default(),
            track: TrackOptions::default(),
            filter: FilterOptions::default(),
            vote: VoteOptions::default(),
            position: PositionOptions::default(),
            validation: ValidationOptions::default(),
            selection: SelectionOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let params: GoalParams = serde_json::from_str(
            r#"{ "quality": 40, "vote": { "min_vote_point": 0.2 } }"#,
        )
        .unwrap();
        assert_eq!(params.quality, 40.0);
        assert_eq!(params.vote.min_vote_point, 0.2);
        assert_eq!(params.vote.samples, 5);
        assert_eq!(params.scan.min_run_length, 30);
    }

    #[test]
    fn dedup_strategy_is_tagged() {
        let s: DedupStrategy =
            serde_json::from_str(r#"{ "kind": "field_distance", "margin_mm": 300 }"#).unwrap();
        assert_eq!(s, DedupStrategy::FieldDistance { margin_mm: 300.0 });
    }

    #[test]
    fn diagonal_of_default_field() {
        let f = FieldDimensions::default();
        assert!((f.diagonal() - 12764.0).abs() < 1.0);
    }
}
