use goal_perceptor::geometry::PinholeCamera;
use goal_perceptor::image::{Pixel, YCbCrImage};

pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 240;
/// Row where the carpet starts; everything above is background.
pub const BOUNDARY_ROW: i32 = 150;

pub const FIELD: Pixel = Pixel::new(90, 95, 85);
pub const BACKGROUND: Pixel = Pixel::new(70, 128, 128);
pub const POST: Pixel = Pixel::new(240, 128, 128);

/// Column span of the left post of a goal 3 m ahead (lateral +750 mm).
pub const LEFT_POST: (usize, usize) = (80, 90);
/// Column span of the right post (lateral −750 mm).
pub const RIGHT_POST: (usize, usize) = (230, 240);
const POST_TOP: usize = 90;
const POST_BOTTOM: usize = 170;
const CROSSBAR_BOTTOM: usize = 100;

/// Camera 500 mm above the field looking straight ahead; horizon at row 120.
pub fn reference_camera() -> PinholeCamera {
    PinholeCamera::new(300.0, 160.0, 120.0, 500.0, 0.0)
}

/// Builder for a synthetic upper-camera frame.
pub struct GoalScene {
    posts: Vec<(usize, usize)>,
    crossbar: bool,
    truncated: bool,
}

impl GoalScene {
    /// Field and background only.
    pub fn empty() -> Self {
        Self {
            posts: Vec::new(),
            crossbar: false,
            truncated: false,
        }
    }

    /// Both posts joined by the crossbar.
    pub fn full_goal() -> Self {
        Self {
            posts: vec![LEFT_POST, RIGHT_POST],
            crossbar: true,
            truncated: false,
        }
    }

    pub fn with_post(mut self, span: (usize, usize)) -> Self {
        self.posts.push(span);
        self
    }

    /// Posts run down to the bottom border instead of standing on the field.
    pub fn truncated(mut self) -> Self {
        self.truncated = true;
        self
    }

    pub fn render(&self) -> YCbCrImage {
        let mut img = YCbCrImage::new(WIDTH, HEIGHT, BACKGROUND);
        img.fill_rect(0, BOUNDARY_ROW as usize, WIDTH, HEIGHT, FIELD);
        let bottom = if self.truncated { HEIGHT } else { POST_BOTTOM };
        for &(x0, x1) in &self.posts {
            img.fill_rect(x0, POST_TOP, x1, bottom, POST);
        }
        if self.crossbar {
            if let (Some(first), Some(last)) = (self.posts.first(), self.posts.last()) {
                img.fill_rect(first.0, POST_TOP, last.1, CROSSBAR_BOTTOM, POST);
            }
        }
        img
    }
}
