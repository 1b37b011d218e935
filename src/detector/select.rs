//! Final selection: duplicate removal, best-two pick and left/right labels.
use super::params::DedupStrategy;
use crate::spots::Spot;
use crate::types::{GoalPost, PostSide};
use nalgebra::Point2;

/// Outcome of [`select_posts`].
#[derive(Clone, Debug, Default)]
pub struct Selection {
    /// Posts ordered left to right.
    pub posts: Vec<GoalPost>,
    pub complete_goal: bool,
    /// Spots behind `posts`, best first.
    pub accepted: Vec<Spot>,
}

/// Indices of spots to drop as duplicates, each paired with the id of the
/// spot that made it redundant. `spots` must be sorted ascending by validity.
pub fn find_duplicates(spots: &[Spot], strategy: DedupStrategy) -> Vec<(usize, usize)> {
    let mut dropped = Vec::new();
    for (i, a) in spots.iter().enumerate() {
        let keeper = match strategy {
            DedupStrategy::ImageColumn { min_separation_px } => spots[i + 1..]
                .iter()
                .find(|b| (a.mid.x - b.mid.x).abs() < min_separation_px),
            DedupStrategy::FieldDistance { margin_mm } => {
                let Some(pa) = a.position else {
                    continue;
                };
                spots.iter().enumerate().find_map(|(j, b)| {
                    let pb = b.position?;
                    let (da, db) = (pa.norm(), pb.norm());
                    let closer = da < db || (da == db && i < j);
                    (j != i && (pa - pb).norm() < margin_mm && closer).then_some(b)
                })
            }
        };
        if let Some(keeper) = keeper {
            dropped.push((i, keeper.id));
        }
    }
    dropped
}

fn to_post(spot: &Spot, side: PostSide) -> Option<GoalPost> {
    Some(GoalPost {
        side,
        position_in_image: Point2::new(spot.center_x(), spot.base.y),
        position_on_field: spot.position?,
        validity: spot.validity,
    })
}

/// Pick up to two posts from deduplicated, ascending-sorted spots.
pub fn select_posts(spots: &[Spot], quality: f32) -> Selection {
    let accepted: Vec<&Spot> = spots
        .iter()
        .rev()
        .take(2)
        .take_while(|s| s.validity > quality && s.position.is_some())
        .collect();

    match accepted.as_slice() {
        [best, second] => {
            let (left, right) = if best.center_x() < second.center_x() {
                (best, second)
            } else {
                (second, best)
            };
            let posts: Vec<_> = [to_post(left, PostSide::Left), to_post(right, PostSide::Right)]
                .into_iter()
                .flatten()
                .collect();
            Selection {
                posts,
                complete_goal: true,
                accepted: vec![(*best).clone(), (*second).clone()],
            }
        }
        [only] => Selection {
            posts: to_post(only, only.side).into_iter().collect(),
            complete_goal: false,
            accepted: vec![(*only).clone()],
        },
        _ => Selection::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    fn spot(id: usize, x: i32, validity: f32) -> Spot {
        let mut s = Spot::new(x - 5, x + 5, 100);
        s.id = id;
        s.base = Point2::new(x, 200);
        s.validity = validity;
        s.position = Some(Vector2::new(3000.0, (160 - x) as f32 * 10.0));
        s
    }

    #[test]
    fn two_good_posts_form_a_goal() {
        let spots = vec![spot(0, 300, 70.0), spot(1, 100, 80.0)];
        let sel = select_posts(&spots, 60.0);
        assert!(sel.complete_goal);
        assert_eq!(sel.posts.len(), 2);
        assert_eq!(sel.posts[0].side, PostSide::Left);
        assert_eq!(sel.posts[0].position_in_image.x, 100);
        assert_eq!(sel.posts[1].side, PostSide::Right);
        assert_eq!(sel.posts[1].position_in_image.x, 300);
    }

    #[test]
    fn one_below_quality_leaves_a_single_post() {
        let mut best = spot(1, 100, 80.0);
        best.side = PostSide::Right;
        let spots = vec![spot(0, 300, 40.0), best];
        let sel = select_posts(&spots, 60.0);
        assert!(!sel.complete_goal);
        assert_eq!(sel.posts.len(), 1);
        assert_eq!(sel.posts[0].side, PostSide::Right);
        assert_eq!(sel.accepted[0].id, 1);
    }

    #[test]
    fn nothing_above_quality_yields_nothing() {
        let spots = vec![spot(0, 300, 40.0), spot(1, 100, 50.0)];
        let sel = select_posts(&spots, 60.0);
        assert!(sel.posts.is_empty());
        assert!(!sel.complete_goal);
    }

    #[test]
    fn column_dedup_keeps_higher_ranked() {
        let spots = vec![spot(0, 100, 50.0), spot(1, 103, 70.0), spot(2, 200, 80.0)];
        let dropped = find_duplicates(&spots, DedupStrategy::default());
        assert_eq!(dropped, vec![(0, 1)]);
    }

    #[test]
    fn field_dedup_keeps_farther() {
        let mut near = spot(0, 100, 80.0);
        near.position = Some(Vector2::new(2000.0, 0.0));
        let mut far = spot(1, 110, 50.0);
        far.position = Some(Vector2::new(2300.0, 0.0));
        let other = spot(2, 300, 60.0);
        let spots = vec![far, other, near];
        let dropped = find_duplicates(&spots, DedupStrategy::FieldDistance { margin_mm: 500.0 });
        assert_eq!(dropped, vec![(2, 1)]);
    }
}
