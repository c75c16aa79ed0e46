//! Geometric Brownian Motion (GBM) model.
//!
//! GBM describes asset price dynamics via:
//! ```text
//! dS = mu * S * dt + sigma * S * dW
//! ```
//!
//! ## Log-space formulation
//!
//! Per step we use the exact transition rather than an Euler scheme on the
//! price itself:
//! ```text
//! S(t+dt) = S(t) * exp((mu - 0.5*sigma^2)*dt + sigma*sqrt(dt)*Z)
//! ```
//! The closed-form transition avoids discretisation bias and keeps
//! `S(t+dt) > 0` for any finite draw.

use crate::error::ModelError;

/// GBM model parameters.
///
/// # Examples
///
/// ```
/// use sim_models::GbmParams;
///
/// let params = GbmParams::new(100.0, 0.05, 0.2);
/// assert!(params.validate().is_ok());
///
/// let invalid = GbmParams::new(100.0, 0.05, -0.2);
/// assert!(invalid.validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GbmParams {
    /// Initial price (S0), used unless the interval is connected.
    pub initial_price: f64,
    /// Drift (mu), per unit of interval time.
    pub drift: f64,
    /// Volatility (sigma), non-negative; zero yields a deterministic path.
    pub volatility: f64,
    /// Seed the initial price from the previous interval's terminal price.
    #[cfg_attr(feature = "serde", serde(default))]
    pub connected_to_previous: bool,
}

impl GbmParams {
    /// Creates GBM parameters with `connected_to_previous = false`.
    pub fn new(initial_price: f64, drift: f64, volatility: f64) -> Self {
        Self {
            initial_price,
            drift,
            volatility,
            connected_to_previous: false,
        }
    }

    /// Marks the interval as connected to the previous one.
    pub fn connected(mut self) -> Self {
        self.connected_to_previous = true;
        self
    }

    /// Validates the parameter domain.
    ///
    /// # Returns
    ///
    /// `Ok(())` when all fields are finite and in domain, otherwise the
    /// [`ModelError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.initial_price.is_finite() {
            return Err(ModelError::NonFinite("initial_price"));
        }
        if !self.drift.is_finite() {
            return Err(ModelError::NonFinite("drift"));
        }
        if !self.volatility.is_finite() {
            return Err(ModelError::NonFinite("volatility"));
        }
        if self.initial_price <= 0.0 {
            return Err(ModelError::InvalidInitialPrice(self.initial_price));
        }
        if self.volatility < 0.0 {
            return Err(ModelError::InvalidVolatility(self.volatility));
        }
        Ok(())
    }
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            initial_price: 100.0,
            drift: 0.05,
            volatility: 0.2,
            connected_to_previous: false,
        }
    }
}

/// Geometric Brownian Motion step function.
///
/// Holds validated parameters; stepping itself cannot fail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmModel {
    params: GbmParams,
}

impl GbmModel {
    /// Creates a model from validated parameters.
    pub fn new(params: GbmParams) -> Result<Self, ModelError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Returns the underlying parameters.
    pub fn params(&self) -> &GbmParams {
        &self.params
    }

    /// Advances the price one step of size `dt` using the draw `z`.
    ///
    /// # Arguments
    ///
    /// * `price` - Current price (positive; guarded at run start)
    /// * `dt` - Step size
    /// * `z` - Standard normal draw
    #[inline]
    pub fn step(&self, price: f64, dt: f64, z: f64) -> f64 {
        let sigma = self.params.volatility;
        let drift = (self.params.drift - 0.5 * sigma * sigma) * dt;
        let diffusion = sigma * dt.sqrt() * z;
        price * (drift + diffusion).exp()
    }
}
