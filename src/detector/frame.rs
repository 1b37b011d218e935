use crate::boundary::{BodyContour, Polyline};
use crate::color::ColorClassifier;
use crate::geometry::{CameraGeometry, CameraView, FrameMotion};
use crate::image::ImageYCbCr;
use crate::types::ObstacleSpan;

/// Everything the detector reads for one camera frame.
///
/// All collaborators are borrowed; the detector never keeps them past the
/// call. Optional inputs default to "absent": no body contour, no obstacles,
/// no motion since the previous frame.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    pub image: ImageYCbCr<'a>,
    pub view: CameraView,
    pub camera: &'a dyn CameraGeometry,
    pub classifier: &'a (dyn ColorClassifier + Sync),
    pub field_boundary: &'a Polyline,
    pub body_contour: Option<&'a dyn BodyContour>,
    pub obstacles: &'a [ObstacleSpan],
    pub motion: FrameMotion,
    /// Frame time in milliseconds; copied into the last-seen timestamps.
    pub timestamp_ms: u64,
}

impl<'a> Frame<'a> {
    pub fn new(
        image: ImageYCbCr<'a>,
        camera: &'a dyn CameraGeometry,
        classifier: &'a (dyn ColorClassifier + Sync),
        field_boundary: &'a Polyline,
    ) -> Self {
        Self {
            image,
            view: CameraView::Upper,
            camera,
            classifier,
            field_boundary,
            body_contour: None,
            obstacles: &[],
            motion: FrameMotion::default(),
            timestamp_ms: 0,
        }
    }

    pub fn with_view(mut self, view: CameraView) -> Self {
        self.view = view;
        self
    }

    pub fn with_body_contour(mut self, contour: &'a dyn BodyContour) -> Self {
        self.body_contour = Some(contour);
        self
    }

    pub fn with_obstacles(mut self, obstacles: &'a [ObstacleSpan]) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn with_motion(mut self, motion: FrameMotion) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    pub fn width(&self) -> i32 {
        self.image.w as i32
    }

    pub fn height(&self) -> i32 {
        self.image.h as i32
    }

    /// Row at which candidates must reach: the horizon, kept inside the image.
    pub fn scan_height(&self) -> i32 {
        let horizon = self.camera.horizon_y();
        let row = if horizon.is_finite() {
            horizon.round() as i32
        } else {
            1
        };
        row.max(1).min((self.height() - 2).max(1))
    }

    /// Reason the frame cannot be processed at all, if any.
    pub fn precondition_failure(&self) -> Option<&'static str> {
        if self.image.w == 0 || self.image.h == 0 {
            Some("empty image")
        } else if !self.image.is_well_formed() {
            Some("image buffer smaller than its dimensions")
        } else if !self.camera.is_valid() {
            Some("invalid camera geometry")
        } else if self.field_boundary.is_empty() {
            Some("empty field boundary")
        } else {
            None
        }
    }
}
