//! Static dispatch enum over the supported stochastic models.
//!
//! The engine dispatches on [`ModelParams`] with `match` expressions rather
//! than trait objects: two concrete models, zero vtable overhead, and the
//! state layout stays transparent to callers.

use crate::error::ModelError;
use crate::gbm::GbmParams;
use crate::heston::HestonParams;
use crate::regime::CrashWindowPolicy;

/// Unified parameter record for a single simulation interval.
///
/// # Examples
///
/// ```
/// use sim_models::{GbmParams, ModelParams};
///
/// let model = ModelParams::Gbm(GbmParams::new(100.0, 0.05, 0.2));
/// assert_eq!(model.model_name(), "GBM");
/// assert!(!model.is_two_factor());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelParams {
    /// Geometric Brownian Motion.
    Gbm(GbmParams),
    /// Heston with bubble/crash regime.
    Heston(HestonParams),
}

impl ModelParams {
    /// Human-readable model name.
    pub fn model_name(&self) -> &'static str {
        match self {
            ModelParams::Gbm(_) => "GBM",
            ModelParams::Heston(_) => "Heston",
        }
    }

    /// True for models with a stochastic variance state.
    pub fn is_two_factor(&self) -> bool {
        matches!(self, ModelParams::Heston(_))
    }

    /// Whether this interval seeds its initial state from the previous one.
    pub fn connected_to_previous(&self) -> bool {
        match self {
            ModelParams::Gbm(p) => p.connected_to_previous,
            ModelParams::Heston(p) => p.connected_to_previous,
        }
    }

    /// Validates the wrapped parameters under the given crash-window policy.
    ///
    /// The policy only affects the Heston variant; GBM has no schedule.
    pub fn validate(&self, policy: CrashWindowPolicy) -> Result<(), ModelError> {
        match self {
            ModelParams::Gbm(p) => p.validate(),
            ModelParams::Heston(p) => {
                p.validate()?;
                p.schedule().check_crash_window(policy)
            }
        }
    }

    /// Initial state declared by the parameters themselves.
    pub fn initial_state(&self) -> ModelState {
        match self {
            ModelParams::Gbm(p) => ModelState::single(p.initial_price),
            ModelParams::Heston(p) => ModelState::two_factor(p.initial_price, p.initial_variance),
        }
    }
}

/// Unified simulation state across models.
///
/// GBM carries price only; Heston carries (price, variance).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelState {
    /// Current price.
    pub price: f64,
    /// Current variance, present for two-factor models.
    pub variance: Option<f64>,
}

impl ModelState {
    /// Single-factor state (price only).
    pub fn single(price: f64) -> Self {
        Self {
            price,
            variance: None,
        }
    }

    /// Two-factor state (price and variance).
    pub fn two_factor(price: f64, variance: f64) -> Self {
        Self {
            price,
            variance: Some(variance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gbm_variant_properties() {
        let model = ModelParams::Gbm(GbmParams::new(100.0, 0.05, 0.2));
        assert_eq!(model.model_name(), "GBM");
        assert!(!model.is_two_factor());
        assert!(!model.connected_to_previous());
        assert_eq!(model.initial_state(), ModelState::single(100.0));
    }

    #[test]
    fn heston_variant_properties() {
        let model = ModelParams::Heston(HestonParams::default());
        assert_eq!(model.model_name(), "Heston");
        assert!(model.is_two_factor());
        assert_eq!(
            model.initial_state(),
            ModelState::two_factor(100.0, 0.04)
        );
    }

    #[test]
    fn validate_dispatches_to_wrapped_params() {
        let bad = ModelParams::Heston(HestonParams {
            correlation: -2.0,
            ..HestonParams::default()
        });
        assert!(bad.validate(CrashWindowPolicy::Warn).is_err());

        let good = ModelParams::Gbm(GbmParams::default());
        assert!(good.validate(CrashWindowPolicy::Reject).is_ok());
    }
}
