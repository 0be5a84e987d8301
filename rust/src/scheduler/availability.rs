//! Occupancy tracking for panels and candidates.

use crate::interner::{CandidateId, OrgId};
use crate::models::TimeInterval;
use crate::time_grid::TimeGrid;

/// Slot bitmap for one organization, one row of `total_slots` cells per panel.
///
/// Rows are allocated the first time a panel is reserved; panels past
/// `rows.len()` have never been used and are free everywhere.
#[derive(Clone, Debug)]
struct PanelGrid {
    panel_count: usize,
    total_slots: usize,
    rows: Vec<Vec<bool>>,
}

impl PanelGrid {
    fn new(panel_count: usize, total_slots: usize) -> Self {
        Self {
            panel_count,
            total_slots,
            rows: Vec::new(),
        }
    }

    fn is_free(&self, panel: usize, first: usize, last: usize) -> bool {
        match self.rows.get(panel) {
            Some(row) => !row[first..last].iter().any(|&taken| taken),
            None => true,
        }
    }

    fn row_mut(&mut self, panel: usize) -> &mut [bool] {
        if panel >= self.rows.len() {
            let total_slots = self.total_slots;
            self.rows.resize_with(panel + 1, || vec![false; total_slots]);
        }
        &mut self.rows[panel]
    }

    /// Panels worth scanning: every used row plus the first unused panel.
    fn scan_limit(&self) -> usize {
        self.panel_count.min(self.rows.len() + 1)
    }
}

/// Tracks which panel slots are taken and which intervals each candidate
/// has booked.
///
/// Invariant: a panel cell is set iff a live reservation covers it, and no
/// two intervals booked for the same candidate overlap.
#[derive(Clone, Debug)]
pub struct AvailabilityTracker {
    grid: TimeGrid,
    panels: Vec<PanelGrid>,
    bookings: Vec<Vec<TimeInterval>>,
}

impl AvailabilityTracker {
    pub fn new(grid: TimeGrid) -> Self {
        Self {
            grid,
            panels: Vec::new(),
            bookings: Vec::new(),
        }
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Add the occupancy rows for the next organization id.
    pub fn add_organization(&mut self, panel_count: usize) {
        self.panels
            .push(PanelGrid::new(panel_count, self.grid.total_slots()));
    }

    /// Add an empty booking list for the next candidate id.
    pub fn add_candidate(&mut self) {
        self.bookings.push(Vec::new());
    }

    pub fn panel_count(&self, org: OrgId) -> usize {
        self.panels[org.index()].panel_count
    }

    pub fn is_student_free(&self, student: CandidateId, interval: &TimeInterval) -> bool {
        self.bookings[student.index()]
            .iter()
            .all(|booked| !interval.overlaps(booked))
    }

    /// True iff every slot the interval touches is unoccupied on this panel.
    ///
    /// Intervals reaching outside the window are never free.
    pub fn is_panel_free(&self, org: OrgId, panel: usize, interval: &TimeInterval) -> bool {
        let panels = &self.panels[org.index()];
        if panel >= panels.panel_count {
            return false;
        }
        match self.grid.slot_range(interval) {
            Some((first, last)) => panels.is_free(panel, first, last),
            None => false,
        }
    }

    /// Lowest-indexed free panel for the interval.
    pub fn find_free_panel(&self, org: OrgId, interval: &TimeInterval) -> Option<usize> {
        (0..self.panels[org.index()].scan_limit())
            .find(|&panel| self.is_panel_free(org, panel, interval))
    }

    pub fn reserve(&mut self, org: OrgId, panel: usize, interval: &TimeInterval) {
        self.set_cells(org, panel, interval, true);
    }

    /// Exact inverse of [`reserve`](Self::reserve) for the same arguments.
    pub fn release(&mut self, org: OrgId, panel: usize, interval: &TimeInterval) {
        self.set_cells(org, panel, interval, false);
    }

    fn set_cells(&mut self, org: OrgId, panel: usize, interval: &TimeInterval, value: bool) {
        let panels = &mut self.panels[org.index()];
        if panel >= panels.panel_count {
            return;
        }
        if let Some((first, last)) = self.grid.slot_range(interval) {
            panels.row_mut(panel)[first..last].fill(value);
        }
    }

    pub fn book_student(&mut self, student: CandidateId, interval: TimeInterval) {
        self.bookings[student.index()].push(interval);
    }

    /// Remove the most recent booking, which must be `interval`.
    ///
    /// Returns false (and leaves the list untouched) if the newest entry is
    /// something else.
    pub fn unbook_student(&mut self, student: CandidateId, interval: &TimeInterval) -> bool {
        let booked = &mut self.bookings[student.index()];
        if booked.last() == Some(interval) {
            booked.pop();
            true
        } else {
            false
        }
    }

    pub fn bookings(&self, student: CandidateId) -> &[TimeInterval] {
        &self.bookings[student.index()]
    }

    /// Number of occupied cells across every panel of `org`.
    pub fn occupied_slots(&self, org: OrgId) -> usize {
        self.panels[org.index()]
            .rows
            .iter()
            .flatten()
            .filter(|&&taken| taken)
            .count()
    }
}
