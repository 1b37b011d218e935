use crate::types::PostSide;
use nalgebra::{Point2, Vector2};
use serde::Serialize;

/// A candidate vertical color band that might be a goal post.
///
/// Spots are created by the scanners, refined in place by the tracker and
/// then filtered, located, scored and ranked. `position` stays `None` until
/// the position estimator ran (or when the base cannot be projected);
/// `validity` is meaningful only after validation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    /// Discovery order within the frame.
    pub id: usize,
    /// First column of the originating horizontal run.
    pub start: i32,
    /// One past the last column of the originating horizontal run.
    pub end: i32,
    pub mid: Point2<i32>,
    pub top: Point2<i32>,
    pub base: Point2<i32>,
    /// Band widths measured while tracking the base.
    pub widths: Vec<i32>,
    pub side: PostSide,
    pub vote_point: f32,
    pub position: Option<Vector2<f32>>,
    pub validity: f32,
}

impl Spot {
    /// Spot spanning `[start, end)` centred on row `row`.
    pub fn new(start: i32, end: i32, row: i32) -> Self {
        let mid = Point2::new(start + (end - start) / 2, row);
        Self {
            id: 0,
            start,
            end,
            mid,
            top: mid,
            base: mid,
            widths: Vec::new(),
            side: PostSide::Unknown,
            vote_point: 0.0,
            position: None,
            validity: 0.0,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.end - self.start
    }

    /// Centre column of the originating run.
    #[inline]
    pub fn center_x(&self) -> i32 {
        (self.start + self.end) / 2
    }

    /// Euclidean pixel distance between top and base.
    pub fn height_px(&self) -> f32 {
        let d = self.base - self.top;
        ((d.x * d.x + d.y * d.y) as f32).sqrt()
    }

    /// Distance from the robot in millimetres, once located.
    pub fn distance(&self) -> Option<f32> {
        self.position.map(|p| p.norm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_spot_is_centred_in_its_span() {
        let s = Spot::new(100, 111, 40);
        assert_eq!(s.width(), 11);
        assert_eq!(s.mid, Point2::new(105, 40));
        assert!(s.start <= s.mid.x && s.mid.x <= s.end);
        assert!(s.position.is_none());
    }

    #[test]
    fn height_uses_both_axes() {
        let mut s = Spot::new(0, 10, 0);
        s.top = Point2::new(0, 0);
        s.base = Point2::new(3, 4);
        assert_eq!(s.height_px(), 5.0);
    }
}
