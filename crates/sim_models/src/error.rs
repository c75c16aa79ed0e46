//! Error types for model parameter validation.
//!
//! Every out-of-domain parameter has its own variant so callers can report
//! exactly which field of a configuration record was rejected.

use thiserror::Error;

/// Model parameter validation error.
///
/// These errors occur before any simulation step executes; a run that
/// starts never emits a partial path.
///
/// # Examples
///
/// ```
/// use sim_models::ModelError;
///
/// let err = ModelError::InvalidCorrelation(1.5);
/// assert!(format!("{}", err).contains("1.5"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Initial price must be strictly positive.
    #[error("invalid initial price: S0 = {0} (must be positive)")]
    InvalidInitialPrice(f64),

    /// Initial variance must be non-negative.
    #[error("invalid initial variance: v0 = {0} (must be non-negative)")]
    InvalidInitialVariance(f64),

    /// Volatility must be non-negative.
    #[error("invalid volatility: sigma = {0} (must be non-negative)")]
    InvalidVolatility(f64),

    /// Mean-reversion speed must be strictly positive.
    #[error("invalid mean-reversion speed: kappa = {0} (must be positive)")]
    InvalidMeanReversion(f64),

    /// Long-term variance must be non-negative.
    #[error("invalid long-term variance: theta = {0} (must be non-negative)")]
    InvalidLongTermVariance(f64),

    /// Vol-of-vol must be non-negative.
    #[error("invalid vol-of-vol: sigma_v = {0} (must be non-negative)")]
    InvalidVolOfVol(f64),

    /// Correlation must lie in [-1, 1].
    #[error("invalid correlation: rho = {0} (must be in [-1, 1])")]
    InvalidCorrelation(f64),

    /// Crash factor is a fractional loss and must lie strictly in (0, 1).
    #[error("invalid crash factor: {0} (must be in (0, 1))")]
    InvalidCrashFactor(f64),

    /// Bubble window must satisfy `bubble_start_day <= bubble_end_day`.
    #[error("invalid bubble window: start day {start} > end day {end}")]
    InvalidBubbleWindow {
        /// First day of the bubble regime.
        start: i64,
        /// Last day of the bubble regime.
        end: i64,
    },

    /// Crash day outside the bubble window under the strict policy.
    #[error(
        "crash day {crash_day} outside bubble window [{start}, {end}] \
         (rejected by CrashWindowPolicy::Reject)"
    )]
    CrashOutsideBubble {
        /// Configured crash day.
        crash_day: i64,
        /// First day of the bubble regime.
        start: i64,
        /// Last day of the bubble regime.
        end: i64,
    },

    /// Non-finite parameter value (NaN or infinity).
    #[error("non-finite value for parameter '{0}'")]
    NonFinite(&'static str),
}
