//! Discretization of the scheduling window into fixed-length slots.

use crate::models::{TimeInterval, TimeWindow};

/// Maps minutes inside a [`TimeWindow`] to slot indices.
///
/// Invariant: `granularity > 0` and it divides the window length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeGrid {
    window: TimeWindow,
    granularity: i32,
}

impl TimeGrid {
    /// Build a grid. Callers validate the window and granularity first.
    pub(crate) fn new(window: TimeWindow, granularity: i32) -> Self {
        debug_assert!(granularity > 0 && window.start < window.end);
        Self {
            window,
            granularity,
        }
    }

    #[inline]
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Slot containing `minutes`. Negative for times before the window.
    #[inline]
    pub fn slot_index(&self, minutes: i32) -> i32 {
        (minutes - self.window.start).div_euclid(self.granularity)
    }

    #[inline]
    pub fn time_of_slot(&self, index: i32) -> i32 {
        self.window.start + index * self.granularity
    }

    #[inline]
    pub fn total_slots(&self) -> usize {
        (self.window.length() / self.granularity) as usize
    }

    /// First grid boundary at or after `minutes`.
    #[inline]
    pub fn align_up(&self, minutes: i32) -> i32 {
        let offset = minutes - self.window.start;
        let slots = offset.div_euclid(self.granularity)
            + i32::from(offset.rem_euclid(self.granularity) != 0);
        self.time_of_slot(slots)
    }

    /// Slot range `[first, last)` touched by `interval`.
    ///
    /// A partially covered trailing slot is included. Returns `None` when the
    /// range leaves the window or the interval is malformed.
    pub fn slot_range(&self, interval: &TimeInterval) -> Option<(usize, usize)> {
        if !interval.is_well_formed() {
            return None;
        }
        let first = self.slot_index(interval.start);
        let last = self.slot_index(self.align_up(interval.end));
        if first < 0 || last as usize > self.total_slots() {
            return None;
        }
        Some((first as usize, last as usize))
    }

    /// Candidate start times `from, from + g, ...` whose interval of
    /// `duration` still fits in the window.
    pub fn starts_from(&self, from: i32, duration: i32) -> impl Iterator<Item = i32> {
        let step = self.granularity as usize;
        let last_start = self.window.end.checked_sub(duration).unwrap_or(i32::MIN);
        (self.align_up(from.max(self.window.start))..=last_start).step_by(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> TimeGrid {
        TimeGrid::new(TimeWindow::new(540, 1020), 15)
    }

    #[test]
    fn test_slot_conversions() {
        let grid = grid();
        assert_eq!(grid.total_slots(), 32);
        assert_eq!(grid.slot_index(540), 0);
        assert_eq!(grid.slot_index(600), 4);
        assert_eq!(grid.time_of_slot(4), 600);
        assert_eq!(grid.slot_index(525), -1);
    }

    #[test]
    fn test_align_up() {
        let grid = grid();
        assert_eq!(grid.align_up(540), 540);
        assert_eq!(grid.align_up(541), 555);
        assert_eq!(grid.align_up(560), 570);
        assert_eq!(grid.align_up(570), 570);
    }

    #[test]
    fn test_slot_range_includes_partial_trailing_slot() {
        let grid = grid();
        assert_eq!(grid.slot_range(&TimeInterval::new(540, 570)), Some((0, 2)));
        assert_eq!(grid.slot_range(&TimeInterval::new(540, 560)), Some((0, 2)));
        assert_eq!(grid.slot_range(&TimeInterval::new(990, 1020)), Some((30, 32)));
    }

    #[test]
    fn test_slot_range_outside_window() {
        let grid = grid();
        assert_eq!(grid.slot_range(&TimeInterval::new(1005, 1035)), None);
        assert_eq!(grid.slot_range(&TimeInterval::new(510, 570)), None);
        assert_eq!(grid.slot_range(&TimeInterval::new(600, 600)), None);
    }

    #[test]
    fn test_starts_from_stays_on_grid_and_in_window() {
        let grid = grid();
        let starts: Vec<i32> = grid.starts_from(960, 30).collect();
        assert_eq!(starts, vec![960, 975, 990]);

        let starts: Vec<i32> = grid.starts_from(961, 30).collect();
        assert_eq!(starts, vec![975, 990]);

        assert_eq!(grid.starts_from(540, 481).count(), 0);
    }

    #[test]
    fn test_starts_from_huge_duration_is_empty() {
        let grid = TimeGrid::new(TimeWindow::new(0, 1440), 15);
        assert_eq!(grid.starts_from(0, i32::MAX).count(), 0);
        assert_eq!(grid.starts_from(0, i32::MIN + 1).count(), 0);
    }
}
