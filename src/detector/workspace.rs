//! Per-frame buffers reused across frames.
use crate::spots::Spot;

/// Spot storage kept by the detector so that a frame does not reallocate.
#[derive(Default)]
pub struct DetectorWorkspace {
    pub(crate) spots: Vec<Spot>,
}

impl DetectorWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears per-frame data, keeping capacity.
    pub fn reset(&mut self) {
        self.spots.clear();
    }

    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    /// Remove the listed duplicates, returning them with their keepers' ids.
    pub(crate) fn remove_duplicates(&mut self, found: Vec<(usize, usize)>) -> Vec<(Spot, usize)> {
        let mut removed = Vec::with_capacity(found.len());
        for &(idx, keeper) in found.iter().rev() {
            removed.push((self.spots.remove(idx), keeper));
        }
        removed.reverse();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removing_duplicates_preserves_order_of_the_rest() {
        let mut ws = DetectorWorkspace::new();
        ws.spots = (0..4)
            .map(|i| {
                let mut s = Spot::new(i * 10, i * 10 + 5, 0);
                s.id = i as usize;
                s
            })
            .collect();
        let removed = ws.remove_duplicates(vec![(0, 1), (2, 3)]);
        let removed: Vec<_> = removed.iter().map(|(s, k)| (s.id, *k)).collect();
        assert_eq!(removed, vec![(0, 1), (2, 3)]);
        assert_eq!(ws.spots().iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 3]);
        ws.reset();
        assert!(ws.spots().is_empty());
    }
}
