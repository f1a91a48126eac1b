//! Offset and duplicate tracking for the update stream.
//!
//! Polling only needs `next_offset`: the service stops returning an update
//! once a later request acknowledges it. Push delivery cannot acknowledge,
//! so every delivered id is remembered in `seen` to drop redeliveries.

use std::collections::BTreeSet;

/// Outcome of offering a pushed update id to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// First sighting; the update should be handled.
    Fresh,
    /// Already handled, or older than anything still remembered.
    Duplicate,
}

#[derive(Debug, Clone)]
pub struct UpdateTracker {
    next_offset: i64,
    seen: BTreeSet<i64>,
    window: usize,
}

impl UpdateTracker {
    /// `window` bounds how many ids below `next_offset` push delivery remembers.
    pub fn new(window: usize) -> Self {
        Self {
            next_offset: 0,
            seen: BTreeSet::new(),
            window: window.max(1),
        }
    }

    /// Smallest update id not yet acknowledged. `0` before anything was seen.
    pub fn next_offset(&self) -> i64 {
        self.next_offset
    }

    /// Offset to send with `getUpdates`, or `None` on the first call.
    pub fn poll_offset(&self) -> Option<i64> {
        (self.next_offset != 0).then_some(self.next_offset)
    }

    /// Advance past a polled update. Never moves backwards.
    pub fn acknowledge(&mut self, id: i64) {
        if id >= self.next_offset {
            self.next_offset = id.saturating_add(1);
        }
    }

    /// Record a pushed update id.
    pub fn admit(&mut self, id: i64) -> Admission {
        if self.seen.contains(&id) || id < self.floor() {
            return Admission::Duplicate;
        }
        self.seen.insert(id);
        if let Some(max) = self.seen.last() {
            self.next_offset = max.saturating_add(1);
        }
        self.evict();
        Admission::Fresh
    }

    pub fn seen_len(&self) -> usize {
        self.seen.len()
    }

    /// Lowest id still tracked; anything below it counts as seen.
    fn floor(&self) -> i64 {
        if self.seen.is_empty() {
            return i64::MIN;
        }
        let window = i64::try_from(self.window).unwrap_or(i64::MAX);
        self.next_offset.saturating_sub(window)
    }

    fn evict(&mut self) {
        let floor = self.floor();
        self.seen = self.seen.split_off(&floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_offset_omitted_initially() {
        let mut t = UpdateTracker::new(16);
        assert_eq!(t.poll_offset(), None);
        t.acknowledge(41);
        assert_eq!(t.poll_offset(), Some(42));
    }

    #[test]
    fn test_acknowledge_is_monotonic() {
        let mut t = UpdateTracker::new(16);
        t.acknowledge(10);
        t.acknowledge(4);
        assert_eq!(t.next_offset(), 11);
        t.acknowledge(11);
        assert_eq!(t.next_offset(), 12);
    }

    #[test]
    fn test_admit_out_of_order_then_duplicate() {
        let mut t = UpdateTracker::new(16);
        assert_eq!(t.admit(5), Admission::Fresh);
        assert_eq!(t.admit(7), Admission::Fresh);
        assert_eq!(t.admit(6), Admission::Fresh);
        assert_eq!(t.next_offset(), 8);
        assert_eq!(t.admit(6), Admission::Duplicate);
        assert_eq!(t.next_offset(), 8);
    }

    #[test]
    fn test_seen_is_bounded_by_window() {
        let mut t = UpdateTracker::new(4);
        for id in 1..=100 {
            assert_eq!(t.admit(id), Admission::Fresh);
        }
        assert!(t.seen_len() <= 4);
        assert_eq!(t.next_offset(), 101);
        // Evicted ids stay rejected.
        assert_eq!(t.admit(3), Admission::Duplicate);
        assert_eq!(t.admit(100), Admission::Duplicate);
        assert_eq!(t.admit(98), Admission::Duplicate);
    }

    #[test]
    fn test_late_id_inside_window_is_fresh() {
        let mut t = UpdateTracker::new(8);
        assert_eq!(t.admit(10), Admission::Fresh);
        assert_eq!(t.admit(5), Admission::Fresh);
        assert_eq!(t.admit(5), Admission::Duplicate);
        assert_eq!(t.next_offset(), 11);
    }

    #[test]
    fn test_offset_saturates_at_max_id() {
        let mut t = UpdateTracker::new(16);
        t.acknowledge(i64::MAX);
        assert_eq!(t.next_offset(), i64::MAX);
        t.acknowledge(i64::MAX - 1);
        assert_eq!(t.next_offset(), i64::MAX);

        let mut t = UpdateTracker::new(16);
        assert_eq!(t.admit(i64::MAX - 1), Admission::Fresh);
        assert_eq!(t.admit(i64::MAX), Admission::Fresh);
        assert_eq!(t.next_offset(), i64::MAX);
        assert_eq!(t.admit(i64::MAX), Admission::Duplicate);
        assert_eq!(t.admit(i64::MAX - 1), Admission::Duplicate);
    }

    #[test]
    fn test_huge_window_keeps_everything() {
        let mut t = UpdateTracker::new(usize::MAX);
        assert_eq!(t.admit(5), Admission::Fresh);
        assert_eq!(t.admit(i64::MAX), Admission::Fresh);
        assert_eq!(t.seen_len(), 2);
        assert_eq!(t.admit(5), Admission::Duplicate);
    }

    #[test]
    fn test_any_order_admits_each_id_once() {
        let mut t = UpdateTracker::new(1024);
        let deliveries = [3, 1, 3, 2, 1, 5, 4, 5, 2, 4];
        let fresh: Vec<i64> = deliveries
            .iter()
            .copied()
            .filter(|&id| t.admit(id) == Admission::Fresh)
            .collect();
        assert_eq!(fresh, vec![3, 1, 2, 5, 4]);
        assert_eq!(t.next_offset(), 6);
    }
}
