//! Placement search for a single candidate.
//!
//! Organizations are placed in shortlist order. Within an organization each
//! round takes the first grid start at or after the previous round's end where
//! both the candidate and some panel are free. Earlier rounds are never
//! revisited: if a round cannot be placed the whole organization fails, and
//! any failure unwinds every organization placed before it for this candidate.

use thiserror::Error;

use crate::interner::{CandidateId, Interner, OrgId, OrgKind};
use crate::models::{Organization, TimeInterval};
use crate::{log_checks, log_debug};

use super::availability::AvailabilityTracker;
use super::rollback::{Reservation, UndoLog};

/// Why a candidate could not be placed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementFailure {
    #[error("round {round} of {organization} does not fit")]
    Unplaceable { organization: String, round: i32 },
    #[error("organization {0} is not registered")]
    UnknownOrganization(String),
    #[error("search budget of {0} steps exhausted")]
    BudgetExhausted(u64),
}

impl PlacementFailure {
    /// The shortlist entry that failed, if any.
    pub fn organization(&self) -> Option<&str> {
        match self {
            Self::Unplaceable { organization, .. } => Some(organization),
            Self::UnknownOrganization(name) => Some(name),
            Self::BudgetExhausted(_) => None,
        }
    }
}

/// Search state for one candidate attempt.
pub struct Placement<'a> {
    pub tracker: &'a mut AvailabilityTracker,
    pub log: &'a mut UndoLog,
    pub organizations: &'a [Organization],
    pub org_ids: &'a Interner<OrgKind>,
    pub student: CandidateId,
    pub shortlist: &'a [String],
    pub verbosity: u8,
    pub max_steps: Option<u64>,
    steps: u64,
}

impl<'a> Placement<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tracker: &'a mut AvailabilityTracker,
        log: &'a mut UndoLog,
        organizations: &'a [Organization],
        org_ids: &'a Interner<OrgKind>,
        student: CandidateId,
        shortlist: &'a [String],
        verbosity: u8,
        max_steps: Option<u64>,
    ) -> Self {
        Self {
            tracker,
            log,
            organizations,
            org_ids,
            student,
            shortlist,
            verbosity,
            max_steps,
            steps: 0,
        }
    }

    /// Grid starts examined so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Place every shortlist entry from `position` on.
    ///
    /// On failure every reservation made from `position` on has been rolled back.
    pub fn place_from(&mut self, position: usize) -> Result<(), PlacementFailure> {
        let shortlist = self.shortlist;
        let Some(name) = shortlist.get(position) else {
            return Ok(());
        };
        let org = self
            .org_ids
            .get(name)
            .ok_or_else(|| PlacementFailure::UnknownOrganization(name.clone()))?;

        let mark = self.log.mark();
        log_checks!(
            self.verbosity,
            "placing {} ({}/{})",
            name,
            position + 1,
            shortlist.len()
        );

        let result = self
            .place_organization(org)
            .and_then(|()| self.place_from(position + 1));

        if result.is_err() {
            let undone = self.log.rollback_to(self.tracker, mark);
            log_checks!(self.verbosity, "rolled back {} round(s) of {}", undone, name);
        }
        result
    }

    /// Place all rounds of one organization, strictly in round order.
    fn place_organization(&mut self, org: OrgId) -> Result<(), PlacementFailure> {
        let organizations = self.organizations;
        let organization = &organizations[org.index()];
        let grid = *self.tracker.grid();
        let mut cursor = grid.window().start;

        for round in 1..=organization.round_count {
            let (interval, panel) = self
                .first_fit(org, cursor, organization.round_duration)?
                .ok_or_else(|| PlacementFailure::Unplaceable {
                    organization: organization.name.clone(),
                    round,
                })?;

            log_debug!(
                self.verbosity,
                "{} round {} -> [{}, {}) panel {}",
                organization.name,
                round,
                interval.start,
                interval.end,
                panel
            );
            self.log.apply(
                self.tracker,
                Reservation {
                    student: self.student,
                    org,
                    round,
                    panel,
                    interval,
                },
            );
            cursor = interval.end;
        }
        Ok(())
    }

    /// Earliest grid start at or after `cursor` free for the candidate and
    /// some panel.
    fn first_fit(
        &mut self,
        org: OrgId,
        cursor: i32,
        duration: i32,
    ) -> Result<Option<(TimeInterval, usize)>, PlacementFailure> {
        let grid = *self.tracker.grid();
        for start in grid.starts_from(cursor, duration) {
            self.steps += 1;
            if let Some(limit) = self.max_steps {
                if self.steps > limit {
                    return Err(PlacementFailure::BudgetExhausted(limit));
                }
            }

            let proposed = TimeInterval::new(start, start + duration);
            if !self.tracker.is_student_free(self.student, &proposed) {
                continue;
            }
            if let Some(panel) = self.tracker.find_free_panel(org, &proposed) {
                return Ok(Some((proposed, panel)));
            }
        }
        Ok(None)
    }
}
