//! Error types for the path-simulation engine.
//!
//! All fatal conditions are detected before the first step executes, so a
//! run never emits a partial path.

use sim_models::ModelError;
use thiserror::Error;

/// Engine-level error.
///
/// # Examples
///
/// ```
/// use sim_engine::EngineError;
///
/// let err = EngineError::InvalidInterval { start_day: 5, end_day: 5 };
/// assert!(err.to_string().contains("5"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Interval must satisfy `start_day < end_day`.
    #[error("invalid interval: start day {start_day} >= end day {end_day}")]
    InvalidInterval {
        /// First day of the interval (exclusive in the sample grid).
        start_day: i64,
        /// Last day of the interval (inclusive in the sample grid).
        end_day: i64,
    },

    /// Chained intervals must be non-overlapping once sorted by start day.
    #[error("overlapping intervals: previous ends at day {prev_end}, next starts at day {next_start}")]
    OverlappingIntervals {
        /// End day of the earlier interval.
        prev_end: i64,
        /// Start day of the later interval.
        next_start: i64,
    },

    /// Sub-step count outside the valid range.
    #[error("invalid steps per day {0}: must be in range [1, 1024]")]
    InvalidStepsPerDay(u32),

    /// Out-of-domain model parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ModelError),

    /// Impossible intermediate state entering a run.
    #[error("invalid state: {what} = {value}")]
    InvalidState {
        /// Which state variable was rejected.
        what: &'static str,
        /// The rejected value.
        value: f64,
    },
}
