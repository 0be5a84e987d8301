//! Undo log of tentative reservations.
//!
//! Every reservation made while placing a candidate is pushed here, so a
//! failed attempt is unwound by popping back to a mark instead of relying on
//! the call stack.

use crate::interner::{CandidateId, OrgId};
use crate::models::TimeInterval;

use super::availability::AvailabilityTracker;

/// One committed round: a panel reservation plus the matching student booking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reservation {
    pub student: CandidateId,
    pub org: OrgId,
    pub round: i32,
    pub panel: usize,
    pub interval: TimeInterval,
}

/// Position in the log to roll back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark(usize);

#[derive(Debug, Default)]
pub struct UndoLog {
    entries: Vec<Reservation>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self) -> Mark {
        Mark(self.entries.len())
    }

    /// Apply a reservation to the tracker and record it.
    pub fn apply(&mut self, tracker: &mut AvailabilityTracker, reservation: Reservation) {
        tracker.reserve(reservation.org, reservation.panel, &reservation.interval);
        tracker.book_student(reservation.student, reservation.interval);
        self.entries.push(reservation);
    }

    /// Undo every entry after `mark`, newest first. Returns how many were undone.
    pub fn rollback_to(&mut self, tracker: &mut AvailabilityTracker, mark: Mark) -> usize {
        let mut undone = 0;
        while self.entries.len() > mark.0 {
            let Some(entry) = self.entries.pop() else {
                break;
            };
            tracker.release(entry.org, entry.panel, &entry.interval);
            let unbooked = tracker.unbook_student(entry.student, &entry.interval);
            debug_assert!(unbooked, "booking log out of order");
            undone += 1;
        }
        undone
    }

    /// Make everything recorded so far permanent and return it.
    pub fn commit(&mut self) -> Vec<Reservation> {
        std::mem::take(&mut self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interner::{CandidateKind, Interner, OrgKind};
    use crate::models::TimeWindow;
    use crate::time_grid::TimeGrid;

    #[test]
    fn test_rollback_restores_tracker() {
        let mut orgs: Interner<OrgKind> = Interner::new();
        let mut candidates: Interner<CandidateKind> = Interner::new();
        let mut tracker = AvailabilityTracker::new(TimeGrid::new(TimeWindow::new(540, 1020), 15));
        let org = orgs.insert("Acme").unwrap();
        tracker.add_organization(1);
        let student = candidates.insert("s1").unwrap();
        tracker.add_candidate();

        let mut log = UndoLog::new();
        let start = log.mark();
        for (round, start_min) in [(1, 540), (2, 570)] {
            log.apply(
                &mut tracker,
                Reservation {
                    student,
                    org,
                    round,
                    panel: 0,
                    interval: TimeInterval::new(start_min, start_min + 30),
                },
            );
        }
        assert_eq!(log.len(), 2);
        assert_eq!(tracker.occupied_slots(org), 4);
        assert_eq!(tracker.bookings(student).len(), 2);

        assert_eq!(log.rollback_to(&mut tracker, start), 2);
        assert!(log.is_empty());
        assert_eq!(tracker.occupied_slots(org), 0);
        assert!(tracker.bookings(student).is_empty());
    }

    #[test]
    fn test_partial_rollback_keeps_older_entries() {
        let mut orgs: Interner<OrgKind> = Interner::new();
        let mut candidates: Interner<CandidateKind> = Interner::new();
        let mut tracker = AvailabilityTracker::new(TimeGrid::new(TimeWindow::new(540, 1020), 15));
        let org = orgs.insert("Acme").unwrap();
        tracker.add_organization(1);
        let student = candidates.insert("s1").unwrap();
        tracker.add_candidate();

        let mut log = UndoLog::new();
        let reservation = |round, start: i32| Reservation {
            student,
            org,
            round,
            panel: 0,
            interval: TimeInterval::new(start, start + 30),
        };
        log.apply(&mut tracker, reservation(1, 540));
        let middle = log.mark();
        log.apply(&mut tracker, reservation(2, 600));

        assert_eq!(log.rollback_to(&mut tracker, middle), 1);
        assert_eq!(log.len(), 1);
        assert_eq!(tracker.bookings(student), &[TimeInterval::new(540, 570)]);
        assert!(tracker.is_panel_free(org, 0, &TimeInterval::new(600, 630)));

        let committed = log.commit();
        assert_eq!(committed.len(), 1);
        assert!(log.is_empty());
        // Committed entries survive a later rollback to an old mark
        assert_eq!(log.rollback_to(&mut tracker, Mark(0)), 0);
        assert_eq!(tracker.occupied_slots(org), 2);
    }
}
