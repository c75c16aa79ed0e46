//! Bubble/crash regime schedule for the Heston model.
//!
//! The schedule is a pure function of the current simulation day and the
//! static parameters: no flags are toggled during iteration. Per step the
//! engine asks for the effective drift and whether the one-off crash shock
//! fires on that day.

use crate::error::ModelError;

/// Policy for a crash day that falls outside the bubble window.
///
/// The parameter documentation states `bubble_start_day <= crash_day <=
/// bubble_end_day` as an expected precondition, not a hard requirement.
/// Callers choose how a violation is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrashWindowPolicy {
    /// Log a warning and proceed; the crash is still applied on its day.
    #[default]
    Warn,

    /// Treat the violation as a fatal validation error.
    Reject,
}

/// Day-indexed drift and crash schedule.
///
/// `drift_for_day` returns the bubble-augmented drift inside the window
/// (inclusive on both ends, so a single-day window applies to exactly that
/// day) and the base drift elsewhere. The crash is a one-time multiplicative
/// shock to price only; variance is never shocked directly.
///
/// # Examples
///
/// ```
/// use sim_models::RegimeSchedule;
///
/// let schedule = RegimeSchedule::new(0.05, 0.15, 10, 20, 15, 0.7);
/// assert_eq!(schedule.drift_for_day(9), 0.05);
/// assert_eq!(schedule.drift_for_day(10), 0.20);
/// assert!(schedule.is_crash_day(15));
/// assert!(!schedule.is_crash_day(16));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegimeSchedule {
    base_drift: f64,
    bubble_extra_drift: f64,
    bubble_start_day: i64,
    bubble_end_day: i64,
    crash_day: i64,
    crash_factor: f64,
}

impl RegimeSchedule {
    /// Creates a schedule from its raw components.
    ///
    /// Validation lives on the owning parameter record; this constructor
    /// assumes the window ordering and crash factor were already checked.
    pub fn new(
        base_drift: f64,
        bubble_extra_drift: f64,
        bubble_start_day: i64,
        bubble_end_day: i64,
        crash_day: i64,
        crash_factor: f64,
    ) -> Self {
        Self {
            base_drift,
            bubble_extra_drift,
            bubble_start_day,
            bubble_end_day,
            crash_day,
            crash_factor,
        }
    }

    /// Effective drift for the given day.
    ///
    /// Returns `base_drift + bubble_extra_drift` when
    /// `bubble_start_day <= day <= bubble_end_day`, else `base_drift`.
    #[inline]
    pub fn drift_for_day(&self, day: i64) -> f64 {
        if day >= self.bubble_start_day && day <= self.bubble_end_day {
            self.base_drift + self.bubble_extra_drift
        } else {
            self.base_drift
        }
    }

    /// True exactly when `day` is the configured crash day.
    #[inline]
    pub fn is_crash_day(&self, day: i64) -> bool {
        day == self.crash_day
    }

    /// Multiplier applied to price on the crash day.
    ///
    /// The crash factor is the fractional loss, so the surviving fraction
    /// is `1 - crash_factor`.
    #[inline]
    pub fn crash_multiplier(&self) -> f64 {
        1.0 - self.crash_factor
    }

    /// Checks the crash-day-inside-bubble-window precondition.
    ///
    /// Under [`CrashWindowPolicy::Warn`] a violation is logged and the
    /// schedule stays usable (the crash still fires on its day, evaluated
    /// independently of the window). Under [`CrashWindowPolicy::Reject`]
    /// the violation is a validation error.
    pub fn check_crash_window(&self, policy: CrashWindowPolicy) -> Result<(), ModelError> {
        if self.crash_day >= self.bubble_start_day && self.crash_day <= self.bubble_end_day {
            return Ok(());
        }
        match policy {
            CrashWindowPolicy::Warn => {
                tracing::warn!(
                    crash_day = self.crash_day,
                    bubble_start_day = self.bubble_start_day,
                    bubble_end_day = self.bubble_end_day,
                    "crash day outside bubble window; crash will still be applied"
                );
                Ok(())
            }
            CrashWindowPolicy::Reject => Err(ModelError::CrashOutsideBubble {
                crash_day: self.crash_day,
                start: self.bubble_start_day,
                end: self.bubble_end_day,
            }),
        }
    }
}
