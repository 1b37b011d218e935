//! Gap-tolerant pixel walks.
//!
//! Every run search in the detector (vertical runs in the scanner, base/top
//! and edge searches in the tracker, base refinement) uses the same rule: a
//! single miss is forgiven, but a second miss before two consecutive hits ends
//! the walk, and the reported end is backed off by the gap width.

/// Pixels stepped back from the terminating miss.
pub const GAP_BACKOFF_PX: i32 = 2;

/// Hit/miss bookkeeping for one walk.
#[derive(Clone, Copy, Debug)]
pub struct GapCounter {
    run: u32,
}

impl Default for GapCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl GapCounter {
    /// A fresh counter forgives the very first miss.
    pub fn new() -> Self {
        Self { run: 2 }
    }

    #[inline]
    pub fn hit(&mut self) {
        self.run = self.run.saturating_add(1);
    }

    /// Registers a miss; `false` means the walk has to stop.
    #[inline]
    pub fn miss(&mut self) -> bool {
        if self.run > 1 {
            self.run = 0;
            true
        } else {
            false
        }
    }
}

/// Walk from `from` by `step` while strictly before `limit`.
///
/// Returns the terminating position backed off by [`GAP_BACKOFF_PX`] towards
/// `from`, or the first position at or past `limit` when the walk never
/// terminated.
pub fn gap_tolerant_walk(
    from: i32,
    step: i32,
    limit: i32,
    mut accept: impl FnMut(i32) -> bool,
) -> i32 {
    debug_assert!(step != 0, "walk step must be non-zero");
    let before_limit = |p: i32| if step > 0 { p < limit } else { p > limit };
    let mut gaps = GapCounter::new();
    let mut pos = from;
    while before_limit(pos) {
        if accept(pos) {
            gaps.hit();
        } else if !gaps.miss() {
            return pos - GAP_BACKOFF_PX * step.signum();
        }
        pos += step;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(len: usize, holes: &[usize]) -> Vec<bool> {
        let mut col = vec![true; len];
        for &h in holes {
            col[h] = false;
        }
        col
    }

    #[test]
    fn single_dropout_does_not_split_the_run() {
        let col = column(100, &[50]);
        let end = gap_tolerant_walk(10, 1, 99, |y| col[y as usize]);
        assert_eq!(end, 99);
    }

    #[test]
    fn double_dropout_splits_the_run() {
        let col = column(100, &[50, 51]);
        let end = gap_tolerant_walk(10, 1, 99, |y| col[y as usize]);
        assert_eq!(end, 49, "walk must stop at the last pixel before the gap");
    }

    #[test]
    fn miss_shortly_after_a_gap_terminates() {
        let col = column(100, &[50, 52]);
        let end = gap_tolerant_walk(10, 1, 99, |y| col[y as usize]);
        assert_eq!(end, 50);
    }

    #[test]
    fn upward_walk_backs_off_downwards() {
        let mut col = vec![false; 100];
        col[40..=80].iter_mut().for_each(|c| *c = true);
        let top = gap_tolerant_walk(79, -1, 0, |y| col[y as usize]);
        assert_eq!(top, 40);
    }

    #[test]
    fn exhausted_walk_reports_limit() {
        let top = gap_tolerant_walk(20, -1, 1, |_| true);
        assert_eq!(top, 1);
        let end = gap_tolerant_walk(0, 2, 9, |_| true);
        assert_eq!(end, 10);
    }
}
