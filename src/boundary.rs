//! Image-space polylines: the field boundary (visual horizon) and the robot's
//! own body contour.
//!
//! Both are supplied per frame by upstream modules as vertices ordered by
//! increasing column. The field boundary answers "how high is the field edge
//! at column x"; the body contour clips rows that would lie on the robot's own
//! visible body.
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Ordered `(x, y)` vertices with increasing `x`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    pub vertices: Vec<Point2<i32>>,
}

impl Polyline {
    pub fn new(vertices: Vec<Point2<i32>>) -> Self {
        Self { vertices }
    }

    pub fn from_pairs(pairs: &[(i32, i32)]) -> Self {
        Self::new(pairs.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Row of the polyline at column `x`.
    ///
    /// Columns left of the first vertex (or right of the last) clamp to that
    /// vertex's row; in between the row is linearly interpolated between the
    /// bracketing pair. `None` for an empty polyline.
    pub fn y_at(&self, x: i32) -> Option<i32> {
        let first = self.vertices.first()?;
        let last = self.vertices.last()?;
        if x <= first.x {
            return Some(first.y);
        }
        if x >= last.x {
            return Some(last.y);
        }
        let right = self.vertices.iter().position(|v| x < v.x)?;
        let (a, b) = (self.vertices[right - 1], self.vertices[right]);
        let dx = (b.x - a.x) as f32;
        if dx <= 0.0 {
            return Some(b.y);
        }
        let t = (x - a.x) as f32 / dx;
        Some((a.y as f32 + t * (b.y - a.y) as f32).round() as i32)
    }

    fn covers(&self, x: i32) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) => first.x <= x && x <= last.x,
            _ => false,
        }
    }
}

/// Self-occlusion query supplied by the body-contour provider.
pub trait BodyContour {
    /// Clip `y` at column `x` so that it does not lie on the robot's body.
    /// Returns `y` unchanged when the column is unoccluded.
    fn clip_bottom(&self, x: i32, y: i32) -> i32;
}

impl BodyContour for Polyline {
    fn clip_bottom(&self, x: i32, y: i32) -> i32 {
        if !self.covers(x) {
            return y;
        }
        match self.y_at(x) {
            Some(edge) if edge < y => edge,
            _ => y,
        }
    }
}
