use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Which goal post a detection is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostSide {
    Left,
    Right,
    #[default]
    Unknown,
}

/// Horizontal image interval covered by a detected obstacle (robot).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleSpan {
    pub left: i32,
    pub right: i32,
}

impl ObstacleSpan {
    pub fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    /// Strict containment of an image column.
    pub fn contains(&self, x: i32) -> bool {
        self.left < x && x < self.right
    }
}

/// One accepted goal post.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPost {
    pub side: PostSide,
    /// Horizontal centre of the post at its base row.
    pub position_in_image: Point2<i32>,
    /// Robot-relative field position in millimetres.
    pub position_on_field: Vector2<f32>,
    pub validity: f32,
}

/// Per-frame output of the detector.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPercept {
    /// Zero, one or two posts; two posts are ordered left to right.
    pub posts: Vec<GoalPost>,
    /// Both posts of one goal were accepted in this frame.
    pub complete_goal_seen: bool,
    pub time_when_goal_post_last_seen: Option<u64>,
    pub time_when_complete_goal_last_seen: Option<u64>,
    pub latency_ms: f64,
}

impl GoalPercept {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
