//! Output records: path samples, OHLC bars, and run results.

use sim_models::ModelState;

/// One completed simulation step.
///
/// Samples are ordered by day ascending; `variance` is present for
/// two-factor models (Heston) and absent for GBM.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathSample {
    /// Simulation day this step completed on.
    pub day: i64,
    /// Price after the step (and after the crash shock, on the crash day).
    pub price: f64,
    /// Variance after the step, for two-factor models.
    pub variance: Option<f64>,
}

/// Daily OHLC bar aggregated from intra-day sub-steps.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OhlcBar {
    /// Simulation day.
    pub day: i64,
    /// Price at the start of the day (previous close or initial state).
    pub open: f64,
    /// Highest price observed during the day (open included).
    pub high: f64,
    /// Lowest price observed during the day (open included).
    pub low: f64,
    /// Price at the end of the day.
    pub close: f64,
    /// Variance at the end of the day, for two-factor models.
    pub variance: Option<f64>,
}

/// Result of a single interval run.
///
/// The terminal state is exposed for chaining: pass it as the connected
/// seed of the next interval when that interval declares
/// `connected_to_previous`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// Day-ordered samples, exactly `num_steps` of them.
    pub samples: Vec<PathSample>,
    /// Terminal (price, variance) state after the last step.
    pub terminal: ModelState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_state_matches_last_sample() {
        let samples = vec![
            PathSample {
                day: 1,
                price: 101.0,
                variance: None,
            },
            PathSample {
                day: 2,
                price: 99.5,
                variance: None,
            },
        ];
        let result = SimulationResult {
            terminal: ModelState::single(99.5),
            samples,
        };
        let last = result.samples.last().unwrap();
        assert_eq!(result.terminal.price, last.price);
        assert_eq!(result.terminal.variance, last.variance);
    }
}
