//! Day-indexed time grid.
//!
//! An interval `(start_day, end_day)` discretises into one step per day
//! unit with `dt = 1 / (end_day - start_day)`, and each completed step
//! lands on a day checkpoint used for regime lookups.

use crate::error::EngineError;

/// A simulation interval over whole days.
///
/// Day `start_day` holds the initial state; days `start_day + 1 ..= end_day`
/// each correspond to one completed step.
///
/// # Examples
///
/// ```
/// use sim_engine::SimulationInterval;
///
/// let interval = SimulationInterval::new(0, 10).unwrap();
/// assert_eq!(interval.num_steps(), 10);
/// assert!((interval.dt() - 0.1).abs() < 1e-12);
/// assert_eq!(interval.days().next(), Some(1));
///
/// assert!(SimulationInterval::new(10, 10).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationInterval {
    /// First day (holds the initial state; no sample emitted for it).
    pub start_day: i64,
    /// Last day (inclusive; the terminal sample lands here).
    pub end_day: i64,
}

impl SimulationInterval {
    /// Creates a validated interval.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidInterval`] when `end_day <= start_day`.
    pub fn new(start_day: i64, end_day: i64) -> Result<Self, EngineError> {
        let interval = Self { start_day, end_day };
        interval.validate()?;
        Ok(interval)
    }

    /// Re-checks the interval invariant.
    ///
    /// Exposed because the fields are public (configuration records may be
    /// deserialised directly); the runner always re-validates before a run.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.end_day <= self.start_day {
            return Err(EngineError::InvalidInterval {
                start_day: self.start_day,
                end_day: self.end_day,
            });
        }
        Ok(())
    }

    /// Step size: `1 / (end_day - start_day)`.
    #[inline]
    pub fn dt(&self) -> f64 {
        1.0 / (self.end_day - self.start_day) as f64
    }

    /// Number of steps (one per day unit), always >= 1 for a valid interval.
    #[inline]
    pub fn num_steps(&self) -> usize {
        (self.end_day - self.start_day) as usize
    }

    /// Ordered simulation days `start_day + 1 ..= end_day`.
    pub fn days(&self) -> impl Iterator<Item = i64> {
        self.days_range()
    }

    /// Range form of [`SimulationInterval::days`], used by the stepper.
    pub(crate) fn days_range(&self) -> std::ops::RangeInclusive<i64> {
        (self.start_day + 1)..=self.end_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn derives_dt_and_steps() {
        let interval = SimulationInterval::new(5, 25).unwrap();
        assert_eq!(interval.num_steps(), 20);
        assert_relative_eq!(interval.dt(), 0.05);
    }

    #[test]
    fn single_step_interval() {
        let interval = SimulationInterval::new(0, 1).unwrap();
        assert_eq!(interval.num_steps(), 1);
        assert_relative_eq!(interval.dt(), 1.0);
        assert_eq!(interval.days().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn days_are_ordered_and_exclusive_of_start() {
        let interval = SimulationInterval::new(10, 14).unwrap();
        assert_eq!(interval.days().collect::<Vec<_>>(), vec![11, 12, 13, 14]);
    }

    #[test]
    fn rejects_degenerate_and_inverted_intervals() {
        assert!(matches!(
            SimulationInterval::new(3, 3),
            Err(EngineError::InvalidInterval { .. })
        ));
        assert!(SimulationInterval::new(7, 2).is_err());
    }

    #[test]
    fn negative_start_days_are_allowed() {
        let interval = SimulationInterval::new(-5, 0).unwrap();
        assert_eq!(interval.num_steps(), 5);
        assert_eq!(interval.days().next(), Some(-4));
    }
}
