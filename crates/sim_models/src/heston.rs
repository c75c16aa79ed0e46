//! Heston stochastic-volatility model with bubble/crash regime.
//!
//! The Heston model describes a joint (price, variance) diffusion:
//! ```text
//! dS = mu_t * S * dt + sqrt(V) * S * dW_S
//! dV = kappa * (theta - V) * dt + sigma_v * sqrt(V) * dW_V
//! E[dW_S * dW_V] = rho * dt
//! ```
//! with a day-indexed drift `mu_t` from the [`RegimeSchedule`] (base drift,
//! bubble-augmented inside the window) and a one-off multiplicative crash
//! shock applied to price after the ordinary update on the crash day.
//!
//! ## Full-truncation scheme
//!
//! The variance step is full-truncation Euler, flooring variance at zero
//! inside the update (`v+ = max(v, 0)`) and absorbing at zero afterwards,
//! so the square root never sees a negative argument regardless of draws.
//! The price step is log-Euler using `v+`, which keeps price positive.

use crate::error::ModelError;
use crate::regime::{CrashWindowPolicy, RegimeSchedule};

/// Heston model parameters with bubble/crash regime.
///
/// # Examples
///
/// ```
/// use sim_models::HestonParams;
///
/// let params = HestonParams::default();
/// assert!(params.validate().is_ok());
///
/// let invalid = HestonParams {
///     correlation: 1.5,
///     ..HestonParams::default()
/// };
/// assert!(invalid.validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HestonParams {
    /// Initial price (S0), used unless the interval is connected.
    pub initial_price: f64,
    /// Initial variance (v0), non-negative.
    pub initial_variance: f64,
    /// Mean-reversion speed (kappa), strictly positive.
    pub mean_reversion_speed: f64,
    /// Long-term variance (theta), non-negative.
    pub long_term_variance: f64,
    /// Vol-of-vol (sigma_v), non-negative.
    pub vol_of_vol: f64,
    /// Correlation (rho) between price and variance innovations, in [-1, 1].
    pub correlation: f64,
    /// Base drift outside the bubble window.
    pub base_drift: f64,
    /// Extra drift added inside the bubble window.
    pub bubble_extra_drift: f64,
    /// First day of the bubble regime (inclusive).
    pub bubble_start_day: i64,
    /// Last day of the bubble regime (inclusive).
    pub bubble_end_day: i64,
    /// Day the crash shock fires.
    pub crash_day: i64,
    /// Fractional loss at the crash: price is multiplied by `1 - crash_factor`.
    pub crash_factor: f64,
    /// Seed the initial state from the previous interval's terminal state.
    #[cfg_attr(feature = "serde", serde(default))]
    pub connected_to_previous: bool,
}

impl HestonParams {
    /// Validates the parameter domain.
    ///
    /// Checks every field invariant except the crash-window precondition,
    /// which is policy-dependent and checked by
    /// [`HestonModel::new`] via [`RegimeSchedule::check_crash_window`].
    pub fn validate(&self) -> Result<(), ModelError> {
        for (name, value) in [
            ("initial_price", self.initial_price),
            ("initial_variance", self.initial_variance),
            ("mean_reversion_speed", self.mean_reversion_speed),
            ("long_term_variance", self.long_term_variance),
            ("vol_of_vol", self.vol_of_vol),
            ("correlation", self.correlation),
            ("base_drift", self.base_drift),
            ("bubble_extra_drift", self.bubble_extra_drift),
            ("crash_factor", self.crash_factor),
        ] {
            if !value.is_finite() {
                return Err(ModelError::NonFinite(name));
            }
        }
        if self.initial_price <= 0.0 {
            return Err(ModelError::InvalidInitialPrice(self.initial_price));
        }
        if self.initial_variance < 0.0 {
            return Err(ModelError::InvalidInitialVariance(self.initial_variance));
        }
        if self.mean_reversion_speed <= 0.0 {
            return Err(ModelError::InvalidMeanReversion(self.mean_reversion_speed));
        }
        if self.long_term_variance < 0.0 {
            return Err(ModelError::InvalidLongTermVariance(self.long_term_variance));
        }
        if self.vol_of_vol < 0.0 {
            return Err(ModelError::InvalidVolOfVol(self.vol_of_vol));
        }
        if !(-1.0..=1.0).contains(&self.correlation) {
            return Err(ModelError::InvalidCorrelation(self.correlation));
        }
        if self.crash_factor <= 0.0 || self.crash_factor >= 1.0 {
            return Err(ModelError::InvalidCrashFactor(self.crash_factor));
        }
        if self.bubble_start_day > self.bubble_end_day {
            return Err(ModelError::InvalidBubbleWindow {
                start: self.bubble_start_day,
                end: self.bubble_end_day,
            });
        }
        Ok(())
    }

    /// Builds the regime schedule described by these parameters.
    pub fn schedule(&self) -> RegimeSchedule {
        RegimeSchedule::new(
            self.base_drift,
            self.bubble_extra_drift,
            self.bubble_start_day,
            self.bubble_end_day,
            self.crash_day,
            self.crash_factor,
        )
    }
}

impl Default for HestonParams {
    /// Standard parameter set from the reference bubble/crash scenario.
    fn default() -> Self {
        Self {
            initial_price: 100.0,
            initial_variance: 0.04,
            mean_reversion_speed: 3.0,
            long_term_variance: 0.04,
            vol_of_vol: 0.6,
            correlation: -0.7,
            base_drift: 0.05,
            bubble_extra_drift: 0.15,
            bubble_start_day: 100,
            bubble_end_day: 150,
            crash_day: 140,
            crash_factor: 0.7,
            connected_to_previous: false,
        }
    }
}

/// Heston step function with its regime schedule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HestonModel {
    params: HestonParams,
    schedule: RegimeSchedule,
}

impl HestonModel {
    /// Creates a model from validated parameters.
    ///
    /// The crash-window precondition is checked under the supplied policy:
    /// [`CrashWindowPolicy::Warn`] logs and proceeds,
    /// [`CrashWindowPolicy::Reject`] fails with
    /// [`ModelError::CrashOutsideBubble`].
    pub fn new(params: HestonParams, policy: CrashWindowPolicy) -> Result<Self, ModelError> {
        params.validate()?;
        let schedule = params.schedule();
        schedule.check_crash_window(policy)?;
        Ok(Self { params, schedule })
    }

    /// Returns the underlying parameters.
    pub fn params(&self) -> &HestonParams {
        &self.params
    }

    /// Returns the regime schedule.
    pub fn schedule(&self) -> &RegimeSchedule {
        &self.schedule
    }

    /// Advances (price, variance) one step of size `dt` on the given day.
    ///
    /// The ordinary stochastic update only; the crash shock is layered on
    /// top by the caller after the final update of the crash day (see
    /// [`RegimeSchedule::is_crash_day`]).
    ///
    /// # Arguments
    ///
    /// * `price` - Current price (positive; guarded at run start)
    /// * `variance` - Current variance (non-negative by induction)
    /// * `day` - Simulation day used for the regime drift lookup
    /// * `dt` - Step size
    /// * `z_s` - Standard normal draw for the price innovation
    /// * `z_v` - Standard normal draw for the variance innovation,
    ///   already correlated with `z_s`
    ///
    /// # Returns
    ///
    /// `(next_price, next_variance)` with `next_price > 0` and
    /// `next_variance >= 0`.
    #[inline]
    pub fn step(
        &self,
        price: f64,
        variance: f64,
        day: i64,
        dt: f64,
        z_s: f64,
        z_v: f64,
    ) -> (f64, f64) {
        let kappa = self.params.mean_reversion_speed;
        let theta = self.params.long_term_variance;
        let sigma_v = self.params.vol_of_vol;

        // Full truncation: the update only ever sees v+ = max(v, 0).
        let v_plus = variance.max(0.0);

        // Variance: Euler with sqrt(v+), absorbed at zero afterwards.
        let v_next =
            (variance + kappa * (theta - v_plus) * dt + sigma_v * (v_plus * dt).sqrt() * z_v)
                .max(0.0);

        // Price: log-Euler on v+ with the regime drift for this day.
        let mu_t = self.schedule.drift_for_day(day);
        let s_next = price * ((mu_t - 0.5 * v_plus) * dt + (v_plus * dt).sqrt() * z_s).exp();

        (s_next, v_next)
    }
}
