//! Occlusion filter: spots standing on the robot's own body or inside a
//! detected obstacle are not goal posts.
use super::frame::Frame;
use super::params::FilterOptions;
use crate::diagnostics::RejectReason;
use crate::spots::Spot;

/// Clamp the tracked extremes into the spot's span, then apply the body and
/// obstacle rules.
pub fn filter_spot(
    spot: &mut Spot,
    frame: &Frame<'_>,
    opts: &FilterOptions,
) -> Result<(), RejectReason> {
    spot.base.x = spot.base.x.clamp(spot.start, spot.end);
    spot.top.x = spot.top.x.clamp(spot.start, spot.end);

    if let Some(body) = frame.body_contour {
        let clipped = body.clip_bottom(spot.base.x, spot.base.y);
        if clipped != spot.base.y {
            return Err(RejectReason::OnRobotBody {
                detected_base: spot.base.y,
                clipped_base: clipped,
            });
        }
    }

    if opts.reject_obstacles {
        if let Some(obstacle) = frame.obstacles.iter().find(|o| o.contains(spot.mid.x)) {
            return Err(RejectReason::InsideObstacle {
                obstacle: *obstacle,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Polyline;
    use crate::color::ThresholdClassifier;
    use crate::geometry::PinholeCamera;
    use crate::image::{Pixel, YCbCrImage};
    use crate::types::ObstacleSpan;
    use nalgebra::Point2;

    fn spot() -> Spot {
        let mut s = Spot::new(100, 110, 120);
        s.top = Point2::new(98, 60);
        s.base = Point2::new(113, 200);
        s
    }

    #[test]
    fn extremes_are_clamped_into_the_span() {
        let img = YCbCrImage::new(320, 240, Pixel::new(90, 95, 85));
        let cam = PinholeCamera::new(300.0, 160.0, 120.0, 500.0, 0.0);
        let classifier = ThresholdClassifier::default();
        let boundary = Polyline::from_pairs(&[(0, 150), (319, 150)]);
        let frame = Frame::new(img.as_view(), &cam, &classifier, &boundary);
        let mut s = spot();
        assert!(filter_spot(&mut s, &frame, &FilterOptions::default()).is_ok());
        assert_eq!(s.base.x, 110);
        assert_eq!(s.top.x, 100);
    }

    #[test]
    fn body_and_obstacles_reject() {
        let img = YCbCrImage::new(320, 240, Pixel::new(90, 95, 85));
        let cam = PinholeCamera::new(300.0, 160.0, 120.0, 500.0, 0.0);
        let classifier = ThresholdClassifier::default();
        let boundary = Polyline::from_pairs(&[(0, 150), (319, 150)]);
        let body = Polyline::from_pairs(&[(80, 190), (140, 190)]);
        let obstacles = [ObstacleSpan::new(90, 130)];

        let bare = Frame::new(img.as_view(), &cam, &classifier, &boundary);
        let frame = bare.with_body_contour(&body);
        let err = filter_spot(&mut spot(), &frame, &FilterOptions::default()).unwrap_err();
        assert_eq!(
            err,
            RejectReason::OnRobotBody {
                detected_base: 200,
                clipped_base: 190
            }
        );

        let frame = bare.with_obstacles(&obstacles);
        let err = filter_spot(&mut spot(), &frame, &FilterOptions::default()).unwrap_err();
        assert!(matches!(err, RejectReason::InsideObstacle { .. }));

        let lenient = FilterOptions {
            reject_obstacles: false,
        };
        assert!(filter_spot(&mut spot(), &frame, &lenient).is_ok());
    }
}
