//! Seeded random source for path simulation.
//!
//! Wraps a seeded PRNG behind a small draw API: independent standard
//! normals and correlated bivariate pairs. The same seed and call sequence
//! always reproduce the same draws, which is the whole point of a synthetic
//! data engine. One instance per run; never shared across paths.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::EngineError;
use sim_models::ModelError;

/// Path-simulation random number generator.
///
/// # Examples
///
/// ```rust
/// use sim_engine::PathRng;
///
/// let mut rng1 = PathRng::from_seed(12345);
/// let mut rng2 = PathRng::from_seed(12345);
///
/// // Same seed produces identical sequences.
/// assert_eq!(rng1.draw_normal(), rng2.draw_normal());
/// ```
pub struct PathRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation (kept for reproducibility tracking).
    seed: u64,
}

impl PathRng {
    /// Creates a generator initialised with the given seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws a single standard normal variate (mean 0, variance 1).
    ///
    /// Uses the Ziggurat sampler from `rand_distr::StandardNormal`.
    #[inline]
    pub fn draw_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Draws a correlated standard-normal pair `(z1, z2)` with
    /// `corr(z1, z2) = rho`.
    ///
    /// Cholesky construction: `z2 = rho * z1 + sqrt(1 - rho^2) * w` with
    /// `w` an independent standard normal.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidParameter`] when `|rho| > 1` or `rho` is not
    /// finite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sim_engine::PathRng;
    ///
    /// let mut rng = PathRng::from_seed(42);
    /// let (z1, z2) = rng.draw_correlated_pair(-0.7).unwrap();
    /// assert!(z1.is_finite() && z2.is_finite());
    ///
    /// assert!(rng.draw_correlated_pair(1.5).is_err());
    /// ```
    #[inline]
    pub fn draw_correlated_pair(&mut self, rho: f64) -> Result<(f64, f64), EngineError> {
        if !rho.is_finite() || !(-1.0..=1.0).contains(&rho) {
            return Err(ModelError::InvalidCorrelation(rho).into());
        }
        Ok(self.correlated_pair_unchecked(rho))
    }

    /// Correlated pair without the domain check.
    ///
    /// Callers must have validated `|rho| <= 1` (the runner does so before
    /// the first step).
    #[inline]
    pub(crate) fn correlated_pair_unchecked(&mut self, rho: f64) -> (f64, f64) {
        let z1 = self.draw_normal();
        let w = self.draw_normal();
        let z2 = rho * z1 + (1.0 - rho * rho).sqrt() * w;
        (z1, z2)
    }
}

impl std::fmt::Debug for PathRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathRng").field("seed", &self.seed).finish()
    }
}
