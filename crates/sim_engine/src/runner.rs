//! Interval runner: drives a model across a day interval.
//!
//! The runner validates everything up front (parameters, interval, seed
//! state), then advances a (price, variance) cursor one day at a time.
//! Each day performs `steps_per_day` sub-steps of size
//! `dt / steps_per_day`; the plain sampler records the day close, the
//! OHLC sampler additionally tracks the intra-day extremes.
//!
//! Production is incremental: [`PathIter`] yields one sample per day, so a
//! caller who stops consuming pays nothing for the remaining days.

use crate::config::SimConfig;
use crate::error::EngineError;
use crate::grid::SimulationInterval;
use crate::rng::PathRng;
use crate::sample::{PathSample, SimulationResult};
use sim_models::{GbmModel, HestonModel, ModelParams, ModelState};

/// Prepared step function for one run.
enum Simulator {
    Gbm(GbmModel),
    Heston(HestonModel),
}

/// One completed day, with intra-day aggregates.
pub(crate) struct DayRecord {
    pub(crate) day: i64,
    pub(crate) open: f64,
    pub(crate) high: f64,
    pub(crate) low: f64,
    pub(crate) close: f64,
    pub(crate) variance: Option<f64>,
}

/// Sequential day-by-day stepper shared by the plain and OHLC samplers.
pub(crate) struct DayStepper<'r> {
    sim: Simulator,
    rng: &'r mut PathRng,
    dt_intra: f64,
    steps_per_day: u32,
    state: ModelState,
    days: std::ops::RangeInclusive<i64>,
}

impl<'r> DayStepper<'r> {
    /// Validates inputs and prepares a stepper; nothing is drawn yet.
    pub(crate) fn new(
        model: &ModelParams,
        interval: SimulationInterval,
        config: &SimConfig,
        rng: &'r mut PathRng,
        connected: Option<ModelState>,
    ) -> Result<Self, EngineError> {
        interval.validate()?;

        let sim = match model {
            ModelParams::Gbm(p) => Simulator::Gbm(GbmModel::new(*p)?),
            ModelParams::Heston(p) => {
                Simulator::Heston(HestonModel::new(*p, config.crash_window_policy())?)
            }
        };

        // Connected seeding: the previous interval's terminal state replaces
        // the model's own initial fields, but only when this interval opted in.
        let state = match (model.connected_to_previous(), connected) {
            (true, Some(prev)) => match &sim {
                Simulator::Gbm(_) => ModelState::single(prev.price),
                Simulator::Heston(m) => ModelState::two_factor(
                    prev.price,
                    prev.variance.unwrap_or(m.params().initial_variance),
                ),
            },
            _ => model.initial_state(),
        };

        if !state.price.is_finite() || state.price <= 0.0 {
            return Err(EngineError::InvalidState {
                what: "price",
                value: state.price,
            });
        }
        if let Some(v) = state.variance {
            if !v.is_finite() || v < 0.0 {
                return Err(EngineError::InvalidState {
                    what: "variance",
                    value: v,
                });
            }
        }

        tracing::debug!(
            model = model.model_name(),
            start_day = interval.start_day,
            end_day = interval.end_day,
            seed = rng.seed(),
            steps_per_day = config.steps_per_day(),
            "starting simulation run"
        );

        Ok(Self {
            sim,
            rng,
            dt_intra: interval.dt() / config.steps_per_day() as f64,
            steps_per_day: config.steps_per_day(),
            state,
            days: interval.days_range(),
        })
    }

    /// Current (or, after exhaustion, terminal) state.
    pub(crate) fn state(&self) -> ModelState {
        self.state
    }

    /// Advances one full day; `None` once the interval is exhausted.
    pub(crate) fn advance_day(&mut self) -> Option<DayRecord> {
        let day = self.days.next()?;
        let open = self.state.price;
        let mut high = open;
        let mut low = open;

        for _ in 0..self.steps_per_day {
            match &self.sim {
                Simulator::Gbm(m) => {
                    let z = self.rng.draw_normal();
                    self.state.price = m.step(self.state.price, self.dt_intra, z);
                }
                Simulator::Heston(m) => {
                    let (z_s, z_v) = self
                        .rng
                        .correlated_pair_unchecked(m.params().correlation);
                    // Variance is always present for Heston by construction.
                    let v = self.state.variance.unwrap_or(0.0);
                    let (s_next, v_next) =
                        m.step(self.state.price, v, day, self.dt_intra, z_s, z_v);
                    self.state.price = s_next;
                    self.state.variance = Some(v_next);
                }
            }
            high = high.max(self.state.price);
            low = low.min(self.state.price);
        }

        // Crash shock: layered on top of the final sub-step of the crash day.
        if let Simulator::Heston(m) = &self.sim {
            if m.schedule().is_crash_day(day) {
                self.state.price *= m.schedule().crash_multiplier();
                high = high.max(self.state.price);
                low = low.min(self.state.price);
            }
        }

        Some(DayRecord {
            day,
            open,
            high,
            low,
            close: self.state.price,
            variance: self.state.variance,
        })
    }
}

/// Lazy path iterator, one [`PathSample`] per simulation day.
///
/// Dropping the iterator early skips the remaining days entirely.
///
/// # Examples
///
/// ```rust
/// use sim_engine::{PathIter, PathRng, SimConfig, SimulationInterval};
/// use sim_models::{GbmParams, ModelParams};
///
/// let model = ModelParams::Gbm(GbmParams::new(100.0, 0.05, 0.2));
/// let interval = SimulationInterval::new(0, 250).unwrap();
/// let config = SimConfig::default();
/// let mut rng = PathRng::from_seed(42);
///
/// let mut path = PathIter::new(&model, interval, &config, &mut rng, None).unwrap();
/// let first_week: Vec<_> = path.by_ref().take(5).collect();
/// assert_eq!(first_week.len(), 5);
/// assert_eq!(first_week[0].day, 1);
/// ```
pub struct PathIter<'r> {
    stepper: DayStepper<'r>,
}

impl<'r> PathIter<'r> {
    /// Validates inputs and prepares a lazy run.
    ///
    /// `connected` is used as the initial state only when the model
    /// declares `connected_to_previous`; otherwise the model's own
    /// `initial_price`/`initial_variance` apply.
    ///
    /// # Errors
    ///
    /// Any [`EngineError`] from parameter, interval, or state validation;
    /// all failures occur here, before the first sample.
    pub fn new(
        model: &ModelParams,
        interval: SimulationInterval,
        config: &SimConfig,
        rng: &'r mut PathRng,
        connected: Option<ModelState>,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            stepper: DayStepper::new(model, interval, config, rng, connected)?,
        })
    }

    /// Current (or, after exhaustion, terminal) state for chaining.
    pub fn terminal_state(&self) -> ModelState {
        self.stepper.state()
    }
}

impl Iterator for PathIter<'_> {
    type Item = PathSample;

    fn next(&mut self) -> Option<PathSample> {
        let record = self.stepper.advance_day()?;
        Some(PathSample {
            day: record.day,
            price: record.close,
            variance: record.variance,
        })
    }
}

/// Runs one interval to completion using a caller-supplied generator.
///
/// Used directly when several runs must share one random stream (see
/// [`crate::chain::run_chain`]).
pub fn simulate_with_rng(
    model: &ModelParams,
    interval: SimulationInterval,
    config: &SimConfig,
    rng: &mut PathRng,
    connected: Option<ModelState>,
) -> Result<SimulationResult, EngineError> {
    let mut path = PathIter::new(model, interval, config, rng, connected)?;
    let mut samples = Vec::with_capacity(interval.num_steps());
    samples.extend(path.by_ref());
    let terminal = path.terminal_state();

    tracing::debug!(
        model = model.model_name(),
        samples = samples.len(),
        terminal_price = terminal.price,
        "simulation run complete"
    );

    Ok(SimulationResult { samples, terminal })
}

/// Engine entry point: runs one interval with a fresh seeded generator.
///
/// `connected` seeds the initial state only when the model declares
/// `connected_to_previous`. Produces exactly `interval.num_steps()`
/// day-ordered samples.
///
/// # Examples
///
/// ```rust
/// use sim_engine::{simulate, SimConfig, SimulationInterval};
/// use sim_models::{HestonParams, ModelParams};
///
/// let model = ModelParams::Heston(HestonParams::default());
/// let interval = SimulationInterval::new(0, 200).unwrap();
/// let config = SimConfig::builder().seed(42).build().unwrap();
///
/// let result = simulate(&model, interval, &config, None).unwrap();
/// assert_eq!(result.samples.len(), 200);
/// assert!(result.samples.iter().all(|s| s.variance.unwrap() >= 0.0));
/// ```
pub fn simulate(
    model: &ModelParams,
    interval: SimulationInterval,
    config: &SimConfig,
    connected: Option<ModelState>,
) -> Result<SimulationResult, EngineError> {
    let mut rng = PathRng::from_seed(config.seed());
    simulate_with_rng(model, interval, config, &mut rng, connected)
}
