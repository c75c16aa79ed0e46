//! Per-run simulation configuration.
//!
//! Immutable configuration for a run: the seed, the number of intra-day
//! sub-steps, and the crash-window policy. Built via [`SimConfigBuilder`].

use crate::error::EngineError;
use sim_models::CrashWindowPolicy;

/// Maximum number of intra-day sub-steps allowed.
pub const MAX_STEPS_PER_DAY: u32 = 1024;

/// Simulation run configuration.
///
/// # Examples
///
/// ```rust
/// use sim_engine::SimConfig;
/// use sim_models::CrashWindowPolicy;
///
/// let config = SimConfig::builder()
///     .seed(42)
///     .steps_per_day(4)
///     .crash_window_policy(CrashWindowPolicy::Reject)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.seed(), 42);
/// assert_eq!(config.steps_per_day(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Seed for the run's generator.
    seed: u64,
    /// Intra-day sub-steps (1 = one step per day, the plain grid).
    steps_per_day: u32,
    /// How a crash day outside the bubble window is treated.
    crash_window_policy: CrashWindowPolicy,
}

impl SimConfig {
    /// Creates a configuration builder.
    #[inline]
    pub fn builder() -> SimConfigBuilder {
        SimConfigBuilder::default()
    }

    /// Returns the seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of intra-day sub-steps.
    #[inline]
    pub fn steps_per_day(&self) -> u32 {
        self.steps_per_day
    }

    /// Returns the crash-window policy.
    #[inline]
    pub fn crash_window_policy(&self) -> CrashWindowPolicy {
        self.crash_window_policy
    }
}

impl Default for SimConfig {
    /// Seed 0, one step per day, warn-only crash-window policy.
    fn default() -> Self {
        Self {
            seed: 0,
            steps_per_day: 1,
            crash_window_policy: CrashWindowPolicy::Warn,
        }
    }
}

/// Builder for [`SimConfig`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SimConfigBuilder {
    seed: Option<u64>,
    steps_per_day: Option<u32>,
    crash_window_policy: Option<CrashWindowPolicy>,
}

impl SimConfigBuilder {
    /// Sets the generator seed (default 0).
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of intra-day sub-steps (default 1).
    #[inline]
    pub fn steps_per_day(mut self, steps: u32) -> Self {
        self.steps_per_day = Some(steps);
        self
    }

    /// Sets the crash-window policy (default [`CrashWindowPolicy::Warn`]).
    #[inline]
    pub fn crash_window_policy(mut self, policy: CrashWindowPolicy) -> Self {
        self.crash_window_policy = Some(policy);
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidStepsPerDay`] when the sub-step count is zero
    /// or exceeds [`MAX_STEPS_PER_DAY`].
    pub fn build(self) -> Result<SimConfig, EngineError> {
        let steps_per_day = self.steps_per_day.unwrap_or(1);
        if steps_per_day == 0 || steps_per_day > MAX_STEPS_PER_DAY {
            return Err(EngineError::InvalidStepsPerDay(steps_per_day));
        }
        Ok(SimConfig {
            seed: self.seed.unwrap_or(0),
            steps_per_day,
            crash_window_policy: self.crash_window_policy.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SimConfig::default();
        assert_eq!(config.seed(), 0);
        assert_eq!(config.steps_per_day(), 1);
        assert_eq!(config.crash_window_policy(), CrashWindowPolicy::Warn);
    }

    #[test]
    fn builder_round_trip() {
        let config = SimConfig::builder()
            .seed(7)
            .steps_per_day(8)
            .crash_window_policy(CrashWindowPolicy::Reject)
            .build()
            .unwrap();
        assert_eq!(config.seed(), 7);
        assert_eq!(config.steps_per_day(), 8);
        assert_eq!(config.crash_window_policy(), CrashWindowPolicy::Reject);
    }

    #[test]
    fn rejects_zero_sub_steps() {
        let err = SimConfig::builder().steps_per_day(0).build().unwrap_err();
        assert!(matches!(err, EngineError::InvalidStepsPerDay(0)));
    }

    #[test]
    fn rejects_excessive_sub_steps() {
        let err = SimConfig::builder()
            .steps_per_day(MAX_STEPS_PER_DAY + 1)
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidStepsPerDay(_)));
    }
}
