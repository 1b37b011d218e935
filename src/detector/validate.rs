//! Plausibility scoring.
//!
//! Each spot gets `validity = mean(scores) × Π gates`:
//! - gates (0 or 1): plausible distance, minimum apparent height, base not
//!   above the field boundary, optionally width consistency;
//! - soft scores: height/width ratio, expected width, optionally expected
//!   height (`100 − |e − m| / e × 50`, tripled when negative);
//! - relational scores: another spot at goal-width distance, an opposite
//!   crossbar side. Both start at `quality` and rise to `relation_score`.
//!
//! Any degenerate input (no position, zero width, non-positive expectation)
//! yields validity 0.
use super::frame::Frame;
use super::params::{FieldDimensions, ValidationOptions};
use crate::spots::Spot;
use crate::types::PostSide;
use nalgebra::Vector2;

/// Shape score of a measured value against its expectation.
///
/// `None` when the expectation is unusable.
pub fn soft_score(expected: f32, measured: f32) -> Option<f32> {
    if !(expected.is_finite() && expected > 0.0 && measured.is_finite()) {
        return None;
    }
    let score = 100.0 - (expected - measured).abs() / expected * 50.0;
    Some(if score < 0.0 { score * 3.0 } else { score })
}

/// Inputs shared by every spot of a frame.
pub struct ValidationContext<'f, 'a> {
    pub frame: &'f Frame<'a>,
    pub field: &'f FieldDimensions,
    pub opts: &'f ValidationOptions,
    pub quality: f32,
}

impl ValidationContext<'_, '_> {
    fn max_distance(&self) -> f32 {
        self.opts.max_distance_factor * self.field.diagonal()
    }

    fn gates(&self, spot: &Spot, distance: f32) -> bool {
        let camera = self.frame.camera;
        let in_range = distance >= self.field.goal_post_radius && distance <= self.max_distance();

        let tall_enough = camera
            .size_at_distance(self.field.goal_height, self.max_distance())
            .is_some_and(|min| spot.height_px() >= min);

        let on_field = self
            .frame
            .field_boundary
            .y_at(spot.base.x)
            .is_some_and(|b| {
                let b = b as f32;
                let tolerance = b / self.opts.boundary_tolerance_divisor.max(1) as f32;
                spot.base.y as f32 > b - tolerance
            });

        let constant_width = !self.opts.check_constant_width
            || spot
                .widths
                .iter()
                .all(|&w| w as f32 <= self.opts.max_width_ratio * spot.width() as f32);

        in_range && tall_enough && on_field && constant_width
    }

    fn ratio_score(&self, spot: &Spot) -> Option<f32> {
        let expected = self.field.goal_height / self.field.post_diameter();
        soft_score(expected, spot.height_px() / spot.width() as f32)
    }

    fn width_score(&self, spot: &Spot, distance: f32) -> Option<f32> {
        let mut expected = self
            .frame
            .camera
            .size_at_distance(self.field.post_diameter(), distance)?;
        let x = spot.base.x as f32;
        let right_room = (self.frame.width() - 1) as f32 - x;
        if x < expected / 2.0 {
            expected -= expected / 2.0 - x;
        }
        if right_room < expected / 2.0 {
            expected -= expected / 2.0 - right_room;
        }
        soft_score(expected, spot.width() as f32)
    }

    fn height_score(&self, spot: &Spot, distance: f32) -> Option<f32> {
        let mut expected = self
            .frame
            .camera
            .size_at_distance(self.field.goal_height, distance)?;
        let above = spot.base.y as f32;
        let below = (self.frame.height() - 1 - spot.top.y) as f32;
        if above < expected {
            expected -= expected - above;
        }
        if below < expected {
            expected -= expected - below;
        }
        soft_score(expected, spot.height_px())
    }

    /// `(pair_distance, crossbar_pair)` relational scores of `spots[idx]`.
    fn relational_scores(
        &self,
        idx: usize,
        positions: &[Option<Vector2<f32>>],
        sides: &[PostSide],
    ) -> (f32, f32) {
        let mut pair = self.quality;
        let mut crossbar = self.quality;
        for j in (0..positions.len()).filter(|&j| j != idx) {
            if let (Some(a), Some(b)) = (positions[idx], positions[j]) {
                let d = (a - b).norm();
                let score = soft_score(self.field.goal_width, d);
                if score.is_some_and(|s| s > self.opts.pair_score_threshold) {
                    pair = self.opts.relation_score;
                }
            }
            if matches!(
                (sides[idx], sides[j]),
                (PostSide::Left, PostSide::Right) | (PostSide::Right, PostSide::Left)
            ) {
                crossbar = self.opts.relation_score;
            }
        }
        (pair, crossbar)
    }

    fn validity(
        &self,
        idx: usize,
        spot: &Spot,
        positions: &[Option<Vector2<f32>>],
        sides: &[PostSide],
    ) -> f32 {
        let Some(distance) = spot.distance().filter(|d| d.is_finite()) else {
            return 0.0;
        };
        if spot.width() <= 0 || !self.gates(spot, distance) {
            return 0.0;
        }
        let mut terms = Vec::with_capacity(5);
        let scores = (self.ratio_score(spot), self.width_score(spot, distance));
        let (Some(ratio), Some(width)) = scores else {
            return 0.0;
        };
        terms.push(ratio);
        terms.push(width);
        if self.opts.score_expected_height {
            let Some(height) = self.height_score(spot, distance) else {
                return 0.0;
            };
            terms.push(height);
        }
        let (pair, crossbar) = self.relational_scores(idx, positions, sides);
        terms.push(pair);
        terms.push(crossbar);
        // Averaged over the terms actually computed; disabled scores do not
        // dilute the mean.
        terms.iter().sum::<f32>() / terms.len() as f32
    }
}

/// Score every spot and sort ascending by validity (best last, stable).
pub fn validate_spots(spots: &mut [Spot], ctx: &ValidationContext<'_, '_>) {
    let positions: Vec<_> = spots.iter().map(|s| s.position).collect();
    let sides: Vec<_> = spots.iter().map(|s| s.side).collect();
    for (idx, spot) in spots.iter_mut().enumerate() {
        spot.validity = ctx.validity(idx, spot, &positions, &sides);
    }
    spots.sort_by(|a, b| {
        a.validity
            .partial_cmp(&b.validity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
