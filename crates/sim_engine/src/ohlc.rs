//! Daily OHLC bars from intra-day sub-stepping.
//!
//! Each day is simulated as `steps_per_day` sub-steps of size
//! `dt / steps_per_day` under the same model dynamics as the plain runner,
//! and aggregated into an open/high/low/close bar. With one sub-step per
//! day the close series coincides with the plain sampler's prices.
//!
//! The regime drift is resolved from the containing day, and the crash
//! shock fires after the final sub-step of the crash day.

use crate::config::SimConfig;
use crate::error::EngineError;
use crate::grid::SimulationInterval;
use crate::rng::PathRng;
use crate::runner::DayStepper;
use crate::sample::OhlcBar;
use sim_models::{ModelParams, ModelState};

/// Result of an OHLC interval run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OhlcResult {
    /// Day-ordered bars, one per simulation day.
    pub bars: Vec<OhlcBar>,
    /// Terminal (price, variance) state after the last sub-step.
    pub terminal: ModelState,
}

/// Runs one interval, aggregating sub-steps into daily OHLC bars, using a
/// caller-supplied generator.
pub fn simulate_ohlc_with_rng(
    model: &ModelParams,
    interval: SimulationInterval,
    config: &SimConfig,
    rng: &mut PathRng,
    connected: Option<ModelState>,
) -> Result<OhlcResult, EngineError> {
    let mut stepper = DayStepper::new(model, interval, config, rng, connected)?;
    let mut bars = Vec::with_capacity(interval.num_steps());
    while let Some(record) = stepper.advance_day() {
        bars.push(OhlcBar {
            day: record.day,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            variance: record.variance,
        });
    }
    Ok(OhlcResult {
        bars,
        terminal: stepper.state(),
    })
}

/// Runs one interval into daily OHLC bars with a fresh seeded generator.
///
/// # Examples
///
/// ```rust
/// use sim_engine::{simulate_ohlc, SimConfig, SimulationInterval};
/// use sim_models::{GbmParams, ModelParams};
///
/// let model = ModelParams::Gbm(GbmParams::new(100.0, 0.05, 0.2));
/// let interval = SimulationInterval::new(0, 30).unwrap();
/// let config = SimConfig::builder().seed(42).steps_per_day(4).build().unwrap();
///
/// let result = simulate_ohlc(&model, interval, &config, None).unwrap();
/// assert_eq!(result.bars.len(), 30);
/// for bar in &result.bars {
///     assert!(bar.high >= bar.open.max(bar.close));
///     assert!(bar.low <= bar.open.min(bar.close));
/// }
/// ```
pub fn simulate_ohlc(
    model: &ModelParams,
    interval: SimulationInterval,
    config: &SimConfig,
    connected: Option<ModelState>,
) -> Result<OhlcResult, EngineError> {
    let mut rng = PathRng::from_seed(config.seed());
    simulate_ohlc_with_rng(model, interval, config, &mut rng, connected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::simulate;
    use approx::assert_relative_eq;
    use sim_models::{GbmParams, HestonParams};

    fn config(steps_per_day: u32) -> SimConfig {
        SimConfig::builder()
            .seed(42)
            .steps_per_day(steps_per_day)
            .build()
            .unwrap()
    }

    #[test]
    fn bar_count_matches_day_count() {
        let model = ModelParams::Gbm(GbmParams::new(100.0, 0.05, 0.2));
        let interval = SimulationInterval::new(0, 20).unwrap();
        let result = simulate_ohlc(&model, interval, &config(4), None).unwrap();
        assert_eq!(result.bars.len(), 20);
        for (i, bar) in result.bars.iter().enumerate() {
            assert_eq!(bar.day, 1 + i as i64);
        }
    }

    #[test]
    fn bars_bracket_open_and_close() {
        let model = ModelParams::Heston(HestonParams::default());
        let interval = SimulationInterval::new(0, 160).unwrap();
        let result = simulate_ohlc(&model, interval, &config(4), None).unwrap();
        for bar in &result.bars {
            assert!(bar.high >= bar.open.max(bar.close), "bar {:?}", bar);
            assert!(bar.low <= bar.open.min(bar.close), "bar {:?}", bar);
            assert!(bar.low > 0.0);
        }
    }

    #[test]
    fn opens_chain_from_previous_closes() {
        let model = ModelParams::Gbm(GbmParams::new(100.0, 0.05, 0.2));
        let interval = SimulationInterval::new(0, 10).unwrap();
        let result = simulate_ohlc(&model, interval, &config(4), None).unwrap();
        assert_relative_eq!(result.bars[0].open, 100.0);
        for pair in result.bars.windows(2) {
            assert_relative_eq!(pair[1].open, pair[0].close);
        }
    }

    #[test]
    fn single_substep_closes_match_plain_sampler() {
        let model = ModelParams::Heston(HestonParams::default());
        let interval = SimulationInterval::new(0, 50).unwrap();
        let cfg = config(1);
        let bars = simulate_ohlc(&model, interval, &cfg, None).unwrap();
        let plain = simulate(&model, interval, &cfg, None).unwrap();
        for (bar, sample) in bars.bars.iter().zip(&plain.samples) {
            assert_eq!(bar.day, sample.day);
            assert_eq!(bar.close, sample.price);
            assert_eq!(bar.variance, sample.variance);
        }
        assert_eq!(bars.terminal, plain.terminal);
    }

    #[test]
    fn crash_day_close_reflects_the_shock() {
        let params = HestonParams {
            bubble_start_day: 2,
            bubble_end_day: 8,
            crash_day: 5,
            crash_factor: 0.7,
            vol_of_vol: 0.0,
            ..HestonParams::default()
        };
        let model = ModelParams::Heston(params);
        let interval = SimulationInterval::new(0, 10).unwrap();
        let result = simulate_ohlc(&model, interval, &config(4), None).unwrap();
        let crash_bar = &result.bars[4];
        assert_eq!(crash_bar.day, 5);
        // The close carries the shock; the low must include it.
        assert_relative_eq!(crash_bar.low, crash_bar.close);
        assert!(crash_bar.close < 0.5 * crash_bar.open);
    }
}
