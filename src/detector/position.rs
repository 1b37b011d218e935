//! Field position of a spot.
//!
//! A base on the field is back-projected through the camera. A base cut off
//! by the bottom image border is not a ground contact; such spots reuse a
//! matching post from the previous frame when one projects into their span,
//! and otherwise fall back to distance-from-width along the viewing bearing.
use super::frame::Frame;
use super::params::{FieldDimensions, PositionOptions};
use crate::geometry::{intersect_lines, CameraView, Line};
use crate::spots::Spot;
use nalgebra::{Point2, Vector2};

/// Where a spot's position came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionSource {
    GroundContact,
    Hint,
    SizeAndBearing,
    /// Nothing could be computed; the spot keeps `position = None`.
    Unavailable,
}

pub fn is_truncated(spot: &Spot, frame: &Frame<'_>, opts: &PositionOptions) -> bool {
    spot.base.y > frame.height() - opts.bottom_margin
}

/// Field position of last frame's `hint` if it lines up with `spot`.
pub fn match_hint(
    spot: &Spot,
    hint: &Spot,
    frame: &Frame<'_>,
    scan_height: i32,
) -> Option<Vector2<f32>> {
    let moved = frame.motion.to_current(hint.position?);
    let projected = frame.camera.field_to_image(moved)?;
    let (start, end) = (spot.start as f32, spot.end as f32);
    if !(start < projected.x && projected.x < end) {
        return None;
    }
    let scan_row = Line::new(
        Point2::new(start, scan_height as f32),
        Vector2::new(end - start, 0.0),
    );
    let towards_base = Line::through(projected, spot.base.cast::<f32>());
    let hit = intersect_lines(&scan_row, &towards_base)?;
    (start < hit.x && hit.x < end).then_some(moved)
}

fn size_and_bearing(
    spot: &Spot,
    frame: &Frame<'_>,
    field: &FieldDimensions,
) -> Option<Vector2<f32>> {
    let distance = frame
        .camera
        .distance_from_size(field.post_diameter(), spot.width() as f32)?;
    let angle = frame.camera.angle_of(spot.mid.cast::<f32>());
    let position = Vector2::new(angle.cos(), angle.sin()) * distance;
    position.iter().all(|v| v.is_finite()).then_some(position)
}

/// Set `spot.position` and report how it was obtained.
pub fn estimate_position(
    spot: &mut Spot,
    frame: &Frame<'_>,
    hints: &[Spot],
    scan_height: i32,
    field: &FieldDimensions,
    opts: &PositionOptions,
) -> PositionSource {
    if !is_truncated(spot, frame, opts) {
        let foot = Point2::new(spot.center_x() as f32, spot.base.y as f32);
        spot.position = frame.camera.image_to_field(frame.camera.correct(foot));
        return match spot.position {
            Some(_) => PositionSource::GroundContact,
            None => PositionSource::Unavailable,
        };
    }

    if opts.use_hints && frame.view == CameraView::Upper {
        let matched = hints
            .iter()
            .filter_map(|hint| match_hint(spot, hint, frame, scan_height))
            .last();
        if let Some(position) = matched {
            spot.position = Some(position);
            return PositionSource::Hint;
        }
    }

    spot.position = size_and_bearing(spot, frame, field);
    match spot.position {
        Some(_) => PositionSource::SizeAndBearing,
        None => PositionSource::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Polyline;
    use crate::color::ThresholdClassifier;
    use crate::geometry::{CameraGeometry, FrameMotion, PinholeCamera};
    use crate::image::{Pixel, YCbCrImage};
    use approx::assert_relative_eq;

    struct Scene {
        img: YCbCrImage,
        cam: PinholeCamera,
        classifier: ThresholdClassifier,
        boundary: Polyline,
    }

    impl Scene {
        fn new() -> Self {
            Self {
                img: YCbCrImage::new(320, 240, Pixel::new(90, 95, 85)),
                cam: PinholeCamera::new(300.0, 160.0, 120.0, 500.0, 0.0),
                classifier: ThresholdClassifier::default(),
                boundary: Polyline::from_pairs(&[(0, 150), (319, 150)]),
            }
        }

        fn frame(&self) -> Frame<'_> {
            Frame::new(self.img.as_view(), &self.cam, &self.classifier, &self.boundary)
        }
    }

    fn truncated_spot() -> Spot {
        let mut s = Spot::new(80, 89, 150);
        s.base = Point2::new(84, 240);
        s.top = Point2::new(84, 90);
        s
    }

    #[test]
    fn ground_contact_back_projects_the_foot() {
        let scene = Scene::new();
        let mut s = Spot::new(80, 89, 150);
        s.base = Point2::new(84, 170);
        let src = estimate_position(
            &mut s,
            &scene.frame(),
            &[],
            120,
            &FieldDimensions::default(),
            &PositionOptions::default(),
        );
        assert_eq!(src, PositionSource::GroundContact);
        let p = s.position.unwrap();
        assert_relative_eq!(p.x, 3000.0, epsilon = 1.0);
        assert_relative_eq!(p.y, 760.0, epsilon = 1.0);
    }

    #[test]
    fn truncated_spot_prefers_a_matching_hint() {
        let scene = Scene::new();
        let mut hint = truncated_spot();
        hint.position = Some(Vector2::new(3000.0, 750.0));
        let mut s = truncated_spot();
        let src = estimate_position(
            &mut s,
            &scene.frame(),
            &[hint],
            120,
            &FieldDimensions::default(),
            &PositionOptions::default(),
        );
        assert_eq!(src, PositionSource::Hint);
        assert_eq!(s.position, Some(Vector2::new(3000.0, 750.0)));
    }

    #[test]
    fn hint_follows_robot_motion() {
        let scene = Scene::new();
        let mut hint = truncated_spot();
        // The robot walked 500 mm forward since the hint was stored.
        hint.position = Some(Vector2::new(3500.0, 750.0));
        let frame = scene.frame().with_motion(FrameMotion {
            rotation: 0.0,
            translation: Vector2::new(500.0, 0.0),
        });
        let mut s = truncated_spot();
        let src = estimate_position(
            &mut s,
            &frame,
            &[hint],
            120,
            &FieldDimensions::default(),
            &PositionOptions::default(),
        );
        assert_eq!(src, PositionSource::Hint);
        let p = s.position.unwrap();
        assert_relative_eq!(p.x, 3000.0, epsilon = 1e-3);
    }

    #[test]
    fn unmatched_truncated_spot_uses_size_and_bearing() {
        let scene = Scene::new();
        let mut far_hint = truncated_spot();
        far_hint.position = Some(Vector2::new(3000.0, -750.0));
        let mut s = truncated_spot();
        let src = estimate_position(
            &mut s,
            &scene.frame(),
            &[far_hint],
            120,
            &FieldDimensions::default(),
            &PositionOptions::default(),
        );
        assert_eq!(src, PositionSource::SizeAndBearing);
        let expected = scene.cam.distance_from_size(100.0, 9.0).unwrap();
        assert_relative_eq!(s.distance().unwrap(), expected, epsilon = 1e-2);
        assert!(s.position.unwrap().y > 0.0, "post left of centre has positive y");
    }

    #[test]
    fn lower_view_ignores_hints() {
        let scene = Scene::new();
        let mut hint = truncated_spot();
        hint.position = Some(Vector2::new(3000.0, 750.0));
        let frame = scene.frame().with_view(CameraView::Lower);
        let mut s = truncated_spot();
        let src = estimate_position(
            &mut s,
            &frame,
            &[hint],
            120,
            &FieldDimensions::default(),
            &PositionOptions::default(),
        );
        assert_eq!(src, PositionSource::SizeAndBearing);
    }
}
