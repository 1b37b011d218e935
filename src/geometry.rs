//! Camera geometry seam and small planar helpers.
//!
//! Field coordinates are robot-relative millimetres (x forward, y left);
//! image coordinates are pixels (x right, y down). The detector talks to the
//! camera model exclusively through [`CameraGeometry`]; [`PinholeCamera`] is a
//! distortion-free ground-plane model sufficient for the demo and the tests.
use nalgebra::{Point2, Rotation2, Vector2};
use serde::{Deserialize, Serialize};

/// Which of the two head cameras produced the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraView {
    /// Forward-looking camera; sees posts far away, often truncated at the bottom.
    #[default]
    Upper,
    /// Downward-looking camera; sees post bases near the robot.
    Lower,
}

/// Projection services supplied by the camera-matrix provider.
pub trait CameraGeometry {
    /// False when the camera matrix for this frame could not be computed.
    fn is_valid(&self) -> bool {
        true
    }
    /// Image row of the visual horizon.
    fn horizon_y(&self) -> f32;
    /// Project a field point into the image. `None` when behind the camera.
    fn field_to_image(&self, field: Vector2<f32>) -> Option<Point2<f32>>;
    /// Intersect the viewing ray through `image` with the field plane.
    /// `None` when the ray does not hit the ground.
    fn image_to_field(&self, image: Point2<f32>) -> Option<Vector2<f32>>;
    /// Horizontal bearing (radians, counter-clockwise from forward) of the
    /// viewing ray through `image`.
    fn angle_of(&self, image: Point2<f32>) -> f32;
    /// Distance at which an object of `size_mm` appears `size_px` wide.
    fn distance_from_size(&self, size_mm: f32, size_px: f32) -> Option<f32>;
    /// Apparent size in pixels of an object of `size_mm` at `distance_mm`.
    fn size_at_distance(&self, size_mm: f32, distance_mm: f32) -> Option<f32>;
    /// Remove optical distortion / rolling-shutter skew from an image point.
    fn correct(&self, image: Point2<f32>) -> Point2<f32> {
        image
    }
}

/// Robot motion between the previous frame and the current one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameMotion {
    /// Rotation in radians.
    pub rotation: f32,
    /// Translation in millimetres.
    pub translation: Vector2<f32>,
}

impl Default for FrameMotion {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            translation: Vector2::zeros(),
        }
    }
}

impl FrameMotion {
    /// Express a point observed in the previous robot frame in the current one.
    pub fn to_current(&self, previous: Vector2<f32>) -> Vector2<f32> {
        Rotation2::new(-self.rotation) * previous - self.translation
    }
}

/// Parametric image line `base + t·dir`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub base: Point2<f32>,
    pub dir: Vector2<f32>,
}

impl Line {
    pub fn new(base: Point2<f32>, dir: Vector2<f32>) -> Self {
        Self { base, dir }
    }

    pub fn through(a: Point2<f32>, b: Point2<f32>) -> Self {
        Self::new(a, b - a)
    }
}

/// Intersection point of two lines; `None` for (nearly) parallel lines.
pub fn intersect_lines(a: &Line, b: &Line) -> Option<Point2<f32>> {
    let cross = a.dir.perp(&b.dir);
    if cross.abs() < 1e-9 {
        return None;
    }
    let s = (b.base - a.base).perp(&b.dir) / cross;
    Some(a.base + a.dir * s)
}

/// Ideal pinhole camera at a fixed height above the field, pitched down by
/// `tilt` and looking straight ahead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PinholeCamera {
    /// Focal length in pixels.
    pub focal_px: f32,
    /// Principal point.
    pub cx: f32,
    pub cy: f32,
    /// Optical centre height above the field in millimetres.
    pub height_mm: f32,
    /// Downward pitch in radians.
    pub tilt: f32,
    #[serde(default = "default_valid")]
    pub valid: bool,
}

fn default_valid() -> bool {
    true
}

impl PinholeCamera {
    pub fn new(focal_px: f32, cx: f32, cy: f32, height_mm: f32, tilt: f32) -> Self {
        Self {
            focal_px,
            cx,
            cy,
            height_mm,
            tilt,
            valid: true,
        }
    }

    /// Normalised image offsets `(right, down)` of a pixel.
    fn normalized(&self, p: Point2<f32>) -> (f32, f32) {
        ((p.x - self.cx) / self.focal_px, (p.y - self.cy) / self.focal_px)
    }
}

impl CameraGeometry for PinholeCamera {
    fn is_valid(&self) -> bool {
        self.valid && self.focal_px > 0.0 && self.height_mm > 0.0
    }

    fn horizon_y(&self) -> f32 {
        self.cy - self.focal_px * self.tilt.tan()
    }

    fn field_to_image(&self, field: Vector2<f32>) -> Option<Point2<f32>> {
        let (s, c) = self.tilt.sin_cos();
        let depth = field.x * c + self.height_mm * s;
        if depth <= 1e-3 {
            return None;
        }
        let u = self.cx - self.focal_px * field.y / depth;
        let v = self.cy + self.focal_px * (self.height_mm * c - field.x * s) / depth;
        Some(Point2::new(u, v))
    }

    fn image_to_field(&self, image: Point2<f32>) -> Option<Vector2<f32>> {
        let (a, b) = self.normalized(image);
        let (s, c) = self.tilt.sin_cos();
        let down = s + b * c;
        if down <= 1e-6 {
            return None;
        }
        let scale = self.height_mm / down;
        Some(Vector2::new(scale * (c - b * s), -scale * a))
    }

    fn angle_of(&self, image: Point2<f32>) -> f32 {
        let (a, b) = self.normalized(image);
        let (s, c) = self.tilt.sin_cos();
        (-a).atan2(c - b * s)
    }

    fn distance_from_size(&self, size_mm: f32, size_px: f32) -> Option<f32> {
        (size_px > 0.0).then(|| size_mm * self.focal_px / size_px)
    }

    fn size_at_distance(&self, size_mm: f32, distance_mm: f32) -> Option<f32> {
        (distance_mm > 0.0).then(|| size_mm * self.focal_px / distance_mm)
    }
}
