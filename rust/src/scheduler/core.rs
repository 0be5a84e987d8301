//! Interview scheduler: registration, candidate ordering, and the run loop.

use thiserror::Error;

use crate::config::SchedulerConfig;
use crate::interner::{CandidateId, CandidateKind, Interner, OrgKind};
use crate::models::{
    Candidate, ConflictNotice, Interview, Organization, ScheduleResult, ScheduleStatistics,
    TimeWindow, MINUTES_PER_DAY,
};
use crate::report;
use crate::sorting::processing_order;
use crate::time_grid::TimeGrid;
use crate::{log_changes, log_checks};

use super::availability::AvailabilityTracker;
use super::placement::{Placement, PlacementFailure};
use super::rollback::UndoLog;

/// Errors raised by configuration and registration calls.
///
/// Scheduling conflicts are not errors; they are reported as [`ConflictNotice`]s.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Scheduler is not initialized; call initialize() first")]
    NotInitialized,
    #[error("Empty time window: start {start} must be before end {end}")]
    EmptyWindow { start: i32, end: i32 },
    #[error("Time window [{start}, {end}) must lie within 0..=1440 minutes")]
    WindowOutOfRange { start: i32, end: i32 },
    #[error("Slot granularity must be positive, got {0}")]
    InvalidGranularity(i32),
    #[error("Window length {length} is not a multiple of slot granularity {granularity}")]
    GranularityMismatch { length: i32, granularity: i32 },
    #[error("Name must not be empty")]
    EmptyName,
    #[error("Organization already registered: {0}")]
    DuplicateOrganization(String),
    #[error("Candidate already registered: {0}")]
    DuplicateCandidate(String),
    #[error("Organization {name}: {field} must be positive, got {value}")]
    InvalidOrganization {
        name: String,
        field: &'static str,
        value: i32,
    },
}

#[derive(Debug)]
struct CandidateEntry {
    id: CandidateId,
    candidate: Candidate,
}

/// Everything owned by one run, rebuilt by `initialize`.
#[derive(Debug)]
struct RunState {
    grid: TimeGrid,
    org_ids: Interner<OrgKind>,
    organizations: Vec<Organization>,
    candidate_ids: Interner<CandidateKind>,
    candidates: Vec<CandidateEntry>,
    tracker: AvailabilityTracker,
    log: UndoLog,
    schedule: Vec<Interview>,
    conflicts: Vec<ConflictNotice>,
}

impl RunState {
    fn new(grid: TimeGrid) -> Self {
        Self {
            grid,
            org_ids: Interner::new(),
            organizations: Vec::new(),
            candidate_ids: Interner::new(),
            candidates: Vec::new(),
            tracker: AvailabilityTracker::new(grid),
            log: UndoLog::new(),
            schedule: Vec::new(),
            conflicts: Vec::new(),
        }
    }
}

/// Assigns interview rounds to candidates across organizations.
///
/// Usage: `initialize`, register organizations and candidates, then `run`.
/// Each candidate is either scheduled in full or gets a single
/// [`ConflictNotice`] with none of their interviews committed.
#[derive(Debug)]
pub struct InterviewScheduler {
    config: SchedulerConfig,
    state: Option<RunState>,
}

impl InterviewScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Reset all state and fix the window for the next run.
    ///
    /// Registered organizations and candidates are discarded too.
    pub fn initialize(&mut self, window: TimeWindow) -> Result<(), SchedulerError> {
        let granularity = self.config.slot_minutes;
        if granularity <= 0 {
            return Err(SchedulerError::InvalidGranularity(granularity));
        }
        if window.start >= window.end {
            return Err(SchedulerError::EmptyWindow {
                start: window.start,
                end: window.end,
            });
        }
        if window.start < 0 || window.end > MINUTES_PER_DAY {
            return Err(SchedulerError::WindowOutOfRange {
                start: window.start,
                end: window.end,
            });
        }
        if window.length() % granularity != 0 {
            return Err(SchedulerError::GranularityMismatch {
                length: window.length(),
                granularity,
            });
        }

        self.state = Some(RunState::new(TimeGrid::new(window, granularity)));
        log_checks!(
            self.config.verbosity,
            "initialized window [{}, {}) with {} slots",
            window.start,
            window.end,
            window.length() / granularity
        );
        Ok(())
    }

    pub fn window(&self) -> Option<TimeWindow> {
        self.state.as_ref().map(|state| state.grid.window())
    }

    fn state_mut(&mut self) -> Result<&mut RunState, SchedulerError> {
        self.state.as_mut().ok_or(SchedulerError::NotInitialized)
    }

    pub fn register_organization(
        &mut self,
        name: &str,
        round_duration: i32,
        round_count: i32,
        panel_count: i32,
    ) -> Result<(), SchedulerError> {
        if name.is_empty() {
            return Err(SchedulerError::EmptyName);
        }
        for (field, value) in [
            ("round_duration", round_duration),
            ("round_count", round_count),
            ("panel_count", panel_count),
        ] {
            if value <= 0 {
                return Err(SchedulerError::InvalidOrganization {
                    name: name.to_string(),
                    field,
                    value,
                });
            }
        }

        let state = self.state_mut()?;
        state
            .org_ids
            .insert(name)
            .ok_or_else(|| SchedulerError::DuplicateOrganization(name.to_string()))?;
        state.tracker.add_organization(panel_count as usize);
        state.organizations.push(Organization::new(
            name.to_string(),
            round_duration,
            round_count,
            panel_count,
        ));
        Ok(())
    }

    /// Register a candidate. Shortlist names are resolved at run time; an
    /// unknown name makes that candidate a conflict rather than an error here.
    pub fn register_candidate(
        &mut self,
        id: &str,
        display_name: &str,
        shortlist: Vec<String>,
    ) -> Result<(), SchedulerError> {
        if id.is_empty() {
            return Err(SchedulerError::EmptyName);
        }
        let state = self.state_mut()?;
        let candidate_id = state
            .candidate_ids
            .insert(id)
            .ok_or_else(|| SchedulerError::DuplicateCandidate(id.to_string()))?;
        state.tracker.add_candidate();
        state.candidates.push(CandidateEntry {
            id: candidate_id,
            candidate: Candidate::new(id.to_string(), shortlist, display_name.to_string()),
        });
        Ok(())
    }

    /// Schedule every registered candidate.
    ///
    /// Running again without `initialize` schedules into the already occupied
    /// state from the previous run.
    pub fn run(&mut self) -> Result<ScheduleResult, SchedulerError> {
        let verbosity = self.config.verbosity;
        let max_steps = self.config.max_search_steps;
        let state = self.state.as_mut().ok_or(SchedulerError::NotInitialized)?;

        let order = processing_order(
            state
                .candidates
                .iter()
                .map(|entry| (entry.candidate.id.as_str(), entry.candidate.shortlist.len())),
        );

        let mut interviews: Vec<Interview> = Vec::new();
        let mut conflicts: Vec<ConflictNotice> = Vec::new();

        for index in order {
            let entry = &state.candidates[index];
            let student_id = entry.candidate.id.as_str();

            let mut placement = Placement::new(
                &mut state.tracker,
                &mut state.log,
                &state.organizations,
                &state.org_ids,
                entry.id,
                &entry.candidate.shortlist,
                verbosity,
                max_steps,
            );
            let outcome = placement.place_from(0);
            let steps = placement.steps();

            match outcome {
                Ok(()) => {
                    let committed = state.log.commit();
                    log_changes!(
                        verbosity,
                        "scheduled {} ({} interviews, {} steps)",
                        student_id,
                        committed.len(),
                        steps
                    );
                    interviews.extend(committed.into_iter().map(|r| Interview {
                        student_id: student_id.to_string(),
                        organization: state.org_ids.resolve(r.org).to_string(),
                        round: r.round,
                        interval: r.interval,
                        panel: r.panel,
                    }));
                }
                Err(failure) => {
                    debug_assert!(state.log.is_empty(), "failed placement left reservations");
                    log_changes!(verbosity, "conflict for {}: {}", student_id, failure);
                    conflicts.push(conflict_notice(student_id, &failure));
                }
            }
        }

        log_changes!(
            verbosity,
            "run complete: {} interviews, {} conflicts",
            interviews.len(),
            conflicts.len()
        );

        state.schedule.extend(interviews.iter().cloned());
        state.conflicts.clone_from(&conflicts);

        let statistics = ScheduleStatistics::from_counts(
            state.candidates.len(),
            interviews.len(),
            conflicts.len(),
        );
        Ok(ScheduleResult {
            interviews,
            conflicts,
            statistics,
        })
    }

    /// All interviews committed since the last `initialize`, in commit order.
    pub fn interviews(&self) -> &[Interview] {
        self.state
            .as_ref()
            .map_or(&[][..], |state| state.schedule.as_slice())
    }

    /// Conflicts from the most recent run.
    pub fn conflicts(&self) -> &[ConflictNotice] {
        self.state
            .as_ref()
            .map_or(&[][..], |state| state.conflicts.as_slice())
    }

    /// One candidate's interviews, sorted by start time.
    pub fn interviews_for(&self, student_id: &str) -> Vec<Interview> {
        let mut mine: Vec<Interview> = self
            .interviews()
            .iter()
            .filter(|interview| interview.student_id == student_id)
            .cloned()
            .collect();
        mine.sort_by_key(|interview| interview.interval.start);
        mine
    }

    pub fn organizations(&self) -> &[Organization] {
        self.state
            .as_ref()
            .map_or(&[][..], |state| state.organizations.as_slice())
    }

    pub fn candidates(&self) -> Vec<Candidate> {
        self.state.as_ref().map_or_else(Vec::new, |state| {
            state
                .candidates
                .iter()
                .map(|entry| entry.candidate.clone())
                .collect()
        })
    }

    pub fn format_student_schedule(&self, student_id: &str) -> String {
        report::format_student_schedule(student_id, &self.interviews_for(student_id))
    }

    pub fn format_complete_schedule(&self) -> String {
        report::format_complete_schedule(self.interviews())
    }
}

impl Default for InterviewScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

fn conflict_notice(student_id: &str, failure: &PlacementFailure) -> ConflictNotice {
    let reason = match failure {
        PlacementFailure::BudgetExhausted(_) => {
            format!("Search budget exhausted for student {}", student_id)
        }
        PlacementFailure::Unplaceable { .. } | PlacementFailure::UnknownOrganization(_) => {
            format!("Cannot schedule all interviews for student {}", student_id)
        }
    };
    ConflictNotice {
        student_id: student_id.to_string(),
        reason,
        organization: failure.organization().map(str::to_string),
    }
}

/// Initialize, register everything, and run in one call.
pub fn generate_schedule(
    window: TimeWindow,
    organizations: &[Organization],
    candidates: &[Candidate],
    config: SchedulerConfig,
) -> Result<ScheduleResult, SchedulerError> {
    let mut scheduler = InterviewScheduler::new(config);
    scheduler.initialize(window)?;
    for org in organizations {
        scheduler.register_organization(
            &org.name,
            org.round_duration,
            org.round_count,
            org.panel_count,
        )?;
    }
    for candidate in candidates {
        scheduler.register_candidate(
            &candidate.id,
            &candidate.display_name,
            candidate.shortlist.clone(),
        )?;
    }
    scheduler.run()
}
