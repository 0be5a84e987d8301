//! Core data types for interview scheduling.
//!
//! All times are minutes from midnight.

use chrono::NaiveTime;
use pyo3::prelude::*;

pub(crate) const MINUTES_PER_DAY: i32 = 24 * 60;

/// Convert minutes from midnight to a clock time, wrapping past midnight.
pub(crate) fn minutes_to_time(minutes: i32) -> Option<NaiveTime> {
    let minutes = minutes.rem_euclid(MINUTES_PER_DAY) as u32;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// The daily window inside which every interview must fall.
#[pyclass]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    #[pyo3(get, set)]
    pub start: i32,
    #[pyo3(get, set)]
    pub end: i32,
}

#[pymethods]
impl TimeWindow {
    #[new]
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Window length in minutes, saturating for out-of-range bounds.
    pub fn length(&self) -> i32 {
        self.end.saturating_sub(self.start)
    }

    fn __repr__(&self) -> String {
        format!("TimeWindow(start={}, end={})", self.start, self.end)
    }
}

/// A half-open interval `[start, end)`.
#[pyclass]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    #[pyo3(get, set)]
    pub start: i32,
    #[pyo3(get, set)]
    pub end: i32,
}

#[pymethods]
impl TimeInterval {
    #[new]
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Two intervals overlap unless one ends at or before the other starts.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }

    pub fn duration(&self) -> i32 {
        self.end - self.start
    }

    #[getter]
    fn start_time(&self) -> Option<NaiveTime> {
        minutes_to_time(self.start)
    }

    #[getter]
    fn end_time(&self) -> Option<NaiveTime> {
        minutes_to_time(self.end)
    }

    fn __repr__(&self) -> String {
        format!("TimeInterval(start={}, end={})", self.start, self.end)
    }
}

/// A recruiting organization and the shape of its interview process.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Organization {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub round_duration: i32,
    #[pyo3(get, set)]
    pub round_count: i32,
    #[pyo3(get, set)]
    pub panel_count: i32,
}

#[pymethods]
impl Organization {
    #[new]
    pub fn new(name: String, round_duration: i32, round_count: i32, panel_count: i32) -> Self {
        Self {
            name,
            round_duration,
            round_count,
            panel_count,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Organization(name={:?}, round_duration={}, round_count={}, panel_count={})",
            self.name, self.round_duration, self.round_count, self.panel_count
        )
    }
}

/// A student with an ordered shortlist of organizations.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub display_name: String,
    /// Attempt order; never reordered by the scheduler.
    #[pyo3(get, set)]
    pub shortlist: Vec<String>,
}

#[pymethods]
impl Candidate {
    #[new]
    #[pyo3(signature = (id, shortlist, display_name=String::new()))]
    pub fn new(id: String, shortlist: Vec<String>, display_name: String) -> Self {
        Self {
            id,
            display_name,
            shortlist,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Candidate(id={:?}, display_name={:?}, shortlist={:?})",
            self.id, self.display_name, self.shortlist
        )
    }
}

/// A committed interview.
#[pyclass(frozen)]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interview {
    #[pyo3(get)]
    pub student_id: String,
    #[pyo3(get)]
    pub organization: String,
    /// 1-based.
    #[pyo3(get)]
    pub round: i32,
    #[pyo3(get)]
    pub interval: TimeInterval,
    /// 0-based.
    #[pyo3(get)]
    pub panel: usize,
}

#[pymethods]
impl Interview {
    fn __repr__(&self) -> String {
        format!(
            "Interview(student_id={:?}, organization={:?}, round={}, start={}, end={}, panel={})",
            self.student_id,
            self.organization,
            self.round,
            self.interval.start,
            self.interval.end,
            self.panel
        )
    }
}

/// Recorded when a candidate could not be fully scheduled.
///
/// None of the candidate's interviews are committed when this is produced.
#[pyclass(frozen)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictNotice {
    #[pyo3(get)]
    pub student_id: String,
    #[pyo3(get)]
    pub reason: String,
    /// Shortlist entry whose placement failed, if the search got that far.
    #[pyo3(get)]
    pub organization: Option<String>,
}

#[pymethods]
impl ConflictNotice {
    fn __repr__(&self) -> String {
        format!(
            "ConflictNotice(student_id={:?}, reason={:?}, organization={:?})",
            self.student_id, self.reason, self.organization
        )
    }
}

/// Aggregate numbers for one run.
#[pyclass(frozen)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleStatistics {
    #[pyo3(get)]
    pub total_candidates: usize,
    #[pyo3(get)]
    pub scheduled_candidates: usize,
    #[pyo3(get)]
    pub total_interviews: usize,
    #[pyo3(get)]
    pub total_conflicts: usize,
    /// Percentage of candidates fully scheduled.
    #[pyo3(get)]
    pub success_rate: f64,
}

impl ScheduleStatistics {
    pub fn from_counts(
        total_candidates: usize,
        total_interviews: usize,
        total_conflicts: usize,
    ) -> Self {
        let scheduled_candidates = total_candidates.saturating_sub(total_conflicts);
        let success_rate = if total_candidates == 0 {
            100.0
        } else {
            scheduled_candidates as f64 * 100.0 / total_candidates as f64
        };
        Self {
            total_candidates,
            scheduled_candidates,
            total_interviews,
            total_conflicts,
            success_rate,
        }
    }
}

#[pymethods]
impl ScheduleStatistics {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleStatistics(interviews={}, conflicts={}, success_rate={:.1})",
            self.total_interviews, self.total_conflicts, self.success_rate
        )
    }
}

/// Output of one scheduling run.
#[pyclass(frozen)]
#[derive(Clone, Debug, Default)]
pub struct ScheduleResult {
    #[pyo3(get)]
    pub interviews: Vec<Interview>,
    #[pyo3(get)]
    pub conflicts: Vec<ConflictNotice>,
    #[pyo3(get)]
    pub statistics: ScheduleStatistics,
}

#[pymethods]
impl ScheduleResult {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(interviews={}, conflicts={})",
            self.interviews.len(),
            self.conflicts.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_half_open() {
        let a = TimeInterval::new(540, 570);
        assert!(!a.overlaps(&TimeInterval::new(570, 600)));
        assert!(!a.overlaps(&TimeInterval::new(510, 540)));
        assert!(a.overlaps(&TimeInterval::new(555, 585)));
        assert!(a.overlaps(&TimeInterval::new(500, 700)));
    }

    #[test]
    fn test_well_formed() {
        assert!(TimeInterval::new(0, 1).is_well_formed());
        assert!(!TimeInterval::new(10, 10).is_well_formed());
    }

    #[test]
    fn test_minutes_to_time_wraps() {
        assert_eq!(minutes_to_time(540), NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(minutes_to_time(1440 + 30), NaiveTime::from_hms_opt(0, 30, 0));
    }

    #[test]
    fn test_statistics_success_rate() {
        let stats = ScheduleStatistics::from_counts(4, 6, 1);
        assert_eq!(stats.scheduled_candidates, 3);
        assert!((stats.success_rate - 75.0).abs() < 1e-9);
        assert_eq!(ScheduleStatistics::from_counts(0, 0, 0).success_rate, 100.0);
    }
}
