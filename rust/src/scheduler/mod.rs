//! Interview scheduler with shortlist-level backtracking.
//!
//! Candidates are processed fewest-organizations-first. Each candidate's
//! organizations are placed greedily in shortlist order; any failure unwinds
//! that candidate's reservations through an undo log and records a conflict.

mod availability;
mod core;
mod placement;
mod rollback;

pub use availability::AvailabilityTracker;
pub use self::core::{generate_schedule, InterviewScheduler, SchedulerError};
pub use placement::PlacementFailure;
pub use rollback::{Mark, Reservation, UndoLog};
