//! Dirty-rect bookkeeping.

use crate::geometry::Rect;

/// Accumulates damaged regions between refreshes.
///
/// Rects are clipped to the display bounds on entry and merged with any
/// queued rect they touch, so the refresh pass repaints each damaged pixel
/// at most once. Merging is by union: slightly pessimistic, never lossy.
#[derive(Debug, Default)]
pub struct InvalidationQueue {
    rects: Vec<Rect>,
}

impl InvalidationQueue {
    pub fn new() -> Self {
        Self { rects: Vec::new() }
    }

    /// Queue a damaged rect. Empty and fully off-display rects are dropped.
    pub fn add(&mut self, rect: Rect, bounds: Rect) {
        let Some(mut rect) = rect.intersection(bounds) else {
            return;
        };
        // Fold in every queued rect that touches the new one; the union may
        // now touch rects it previously missed, so restart until stable.
        loop {
            let Some(idx) = self
                .rects
                .iter()
                .position(|r| r.adjacent_or_overlapping(rect))
            else {
                break;
            };
            rect = rect.union(self.rects.swap_remove(idx));
        }
        self.rects.push(rect);
    }

    /// Queue the whole display.
    pub fn add_all(&mut self, bounds: Rect) {
        self.rects.clear();
        self.rects.push(bounds);
    }

    /// Whether anything is queued.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Number of distinct dirty regions.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Drain the queued rects for a refresh pass.
    pub fn take(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.rects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect::new(0, 0, 320, 240);

    #[test]
    fn starts_empty() {
        let q = InvalidationQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn add_clips_to_bounds() {
        let mut q = InvalidationQueue::new();
        q.add(Rect::new(300, 230, 40, 40), BOUNDS);
        assert_eq!(q.take(), vec![Rect::new(300, 230, 20, 10)]);
    }

    #[test]
    fn fully_outside_is_dropped() {
        let mut q = InvalidationQueue::new();
        q.add(Rect::new(400, 0, 10, 10), BOUNDS);
        q.add(Rect::new(0, 0, 0, 5), BOUNDS);
        assert!(q.is_empty());
    }

    #[test]
    fn disjoint_rects_stay_separate() {
        let mut q = InvalidationQueue::new();
        q.add(Rect::new(0, 0, 10, 10), BOUNDS);
        q.add(Rect::new(100, 100, 10, 10), BOUNDS);
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn overlapping_rects_merge() {
        let mut q = InvalidationQueue::new();
        q.add(Rect::new(0, 0, 10, 10), BOUNDS);
        q.add(Rect::new(5, 5, 10, 10), BOUNDS);
        assert_eq!(q.take(), vec![Rect::new(0, 0, 15, 15)]);
    }

    #[test]
    fn adjacent_rects_merge() {
        let mut q = InvalidationQueue::new();
        q.add(Rect::new(0, 0, 10, 10), BOUNDS);
        q.add(Rect::new(10, 0, 10, 10), BOUNDS);
        assert_eq!(q.take(), vec![Rect::new(0, 0, 20, 10)]);
    }

    #[test]
    fn merge_cascades() {
        let mut q = InvalidationQueue::new();
        q.add(Rect::new(0, 0, 10, 10), BOUNDS);
        q.add(Rect::new(20, 0, 10, 10), BOUNDS);
        assert_eq!(q.len(), 2);
        // Bridges the gap: all three collapse into one.
        q.add(Rect::new(8, 0, 14, 10), BOUNDS);
        assert_eq!(q.take(), vec![Rect::new(0, 0, 30, 10)]);
    }

    #[test]
    fn add_all_replaces_queue() {
        let mut q = InvalidationQueue::new();
        q.add(Rect::new(0, 0, 10, 10), BOUNDS);
        q.add_all(BOUNDS);
        assert_eq!(q.take(), vec![BOUNDS]);
        assert!(q.is_empty());
    }
}
