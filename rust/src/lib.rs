//! Interview scheduling engine.
//!
//! Assigns sequential interview rounds for candidates across organizations
//! with a limited number of panels each, inside a shared daily window split
//! into fixed-length slots. A candidate is either scheduled in full or
//! reported as a conflict with none of their interviews kept.
//!
//! The same types are exported to Python when built as an extension module.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod config;
pub mod interner;
pub mod logging;
mod models;
pub mod report;
pub mod scheduler;
pub mod sorting;
pub mod time_grid;

pub use config::{SchedulerConfig, DEFAULT_SLOT_MINUTES};
pub use models::{
    Candidate, ConflictNotice, Interview, Organization, ScheduleResult, ScheduleStatistics,
    TimeInterval, TimeWindow,
};
pub use report::{format_complete_schedule, format_minutes, format_student_schedule};
pub use scheduler::{generate_schedule, InterviewScheduler, SchedulerError};

fn to_py_err(err: SchedulerError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Stateful scheduler (Python wrapper).
///
/// Call `initialize`, register organizations and candidates, then `run`.
///
/// # Raises
/// * ValueError on invalid windows, duplicate names or non-positive fields
#[pyclass(name = "InterviewScheduler")]
pub struct PyInterviewScheduler {
    inner: InterviewScheduler,
}

#[pymethods]
impl PyInterviewScheduler {
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<SchedulerConfig>) -> Self {
        Self {
            inner: InterviewScheduler::new(config.unwrap_or_default()),
        }
    }

    fn initialize(&mut self, window: TimeWindow) -> PyResult<()> {
        self.inner.initialize(window).map_err(to_py_err)
    }

    fn register_organization(
        &mut self,
        name: &str,
        round_duration: i32,
        round_count: i32,
        panel_count: i32,
    ) -> PyResult<()> {
        self.inner
            .register_organization(name, round_duration, round_count, panel_count)
            .map_err(to_py_err)
    }

    #[pyo3(signature = (id, shortlist, display_name=""))]
    fn register_candidate(
        &mut self,
        id: &str,
        shortlist: Vec<String>,
        display_name: &str,
    ) -> PyResult<()> {
        self.inner
            .register_candidate(id, display_name, shortlist)
            .map_err(to_py_err)
    }

    fn run(&mut self) -> PyResult<ScheduleResult> {
        self.inner.run().map_err(to_py_err)
    }

    fn get_schedule(&self) -> Vec<Interview> {
        self.inner.interviews().to_vec()
    }

    fn get_student_schedule(&self, student_id: &str) -> Vec<Interview> {
        self.inner.interviews_for(student_id)
    }

    fn get_conflicts(&self) -> Vec<ConflictNotice> {
        self.inner.conflicts().to_vec()
    }

    fn get_organizations(&self) -> Vec<Organization> {
        self.inner.organizations().to_vec()
    }

    fn get_candidates(&self) -> Vec<Candidate> {
        self.inner.candidates()
    }

    fn format_student_schedule(&self, student_id: &str) -> String {
        self.inner.format_student_schedule(student_id)
    }

    fn format_complete_schedule(&self) -> String {
        self.inner.format_complete_schedule()
    }

    fn __repr__(&self) -> String {
        format!(
            "InterviewScheduler(window={:?}, organizations={}, interviews={})",
            self.inner.window().map(|w| (w.start, w.end)),
            self.inner.organizations().len(),
            self.inner.interviews().len()
        )
    }
}

/// Schedule everything in one call.
///
/// # Arguments
/// * `window` - Daily window in minutes from midnight
/// * `organizations` - Organizations with round duration, round count and panel count
/// * `candidates` - Candidates with ordered shortlists
/// * `config` - Scheduler configuration (defaults to 15 minute slots)
///
/// # Returns
/// * ScheduleResult with interviews, conflicts and statistics
///
/// # Raises
/// * ValueError on invalid configuration or duplicate registrations
#[pyfunction]
#[pyo3(name = "generate_schedule", signature = (window, organizations, candidates, config=None))]
fn py_generate_schedule(
    window: TimeWindow,
    organizations: Vec<Organization>,
    candidates: Vec<Candidate>,
    config: Option<SchedulerConfig>,
) -> PyResult<ScheduleResult> {
    generate_schedule(
        window,
        &organizations,
        &candidates,
        config.unwrap_or_default(),
    )
    .map_err(to_py_err)
}

/// Render minutes from midnight as 12-hour clock text.
#[pyfunction]
#[pyo3(name = "format_minutes")]
fn py_format_minutes(minutes: i32) -> String {
    format_minutes(minutes)
}

/// The interview_scheduler Python module.
#[pymodule]
fn interview_scheduler(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<TimeWindow>()?;
    m.add_class::<TimeInterval>()?;
    m.add_class::<Organization>()?;
    m.add_class::<Candidate>()?;
    m.add_class::<Interview>()?;
    m.add_class::<ConflictNotice>()?;
    m.add_class::<ScheduleStatistics>()?;
    m.add_class::<ScheduleResult>()?;

    // Config
    m.add_class::<SchedulerConfig>()?;

    // Scheduler
    m.add_class::<PyInterviewScheduler>()?;
    m.add_function(wrap_pyfunction!(py_generate_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_format_minutes, m)?)?;

    Ok(())
}
