//! Configuration for a scheduling run.

use pyo3::prelude::*;

/// Default slot granularity in minutes.
pub const DEFAULT_SLOT_MINUTES: i32 = 15;

/// Run-wide scheduler settings.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Slot granularity in minutes; every interview starts on this grid.
    #[pyo3(get, set)]
    pub slot_minutes: i32,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Maximum grid starts tried per candidate (None = unlimited).
    #[pyo3(get, set)]
    pub max_search_steps: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            slot_minutes: DEFAULT_SLOT_MINUTES,
            verbosity: 0,
            max_search_steps: None,
        }
    }
}

#[pymethods]
impl SchedulerConfig {
    #[new]
    #[pyo3(signature = (slot_minutes=DEFAULT_SLOT_MINUTES, verbosity=0, max_search_steps=None))]
    fn new(slot_minutes: i32, verbosity: u8, max_search_steps: Option<u64>) -> Self {
        Self {
            slot_minutes,
            verbosity,
            max_search_steps,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SchedulerConfig(slot_minutes={}, verbosity={}, max_search_steps={:?})",
            self.slot_minutes, self.verbosity, self.max_search_steps
        )
    }
}
