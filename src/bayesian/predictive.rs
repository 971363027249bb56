//! Seeded predictive sampling from normal distributions.
//!
//! Used to simulate new observations from a posterior predictive and new
//! group means from a group-level prior. Every draw sequence is a pure
//! function of its arguments and the seed.

use crate::bayesian::conjugate::{NormalPosterior, NormalPrior};
use crate::error::{ConjugateError, Result};
use crate::stats;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Draws `count` independent samples from `N(mean, sd²)`.
///
/// The same `(count, mean, sd, seed)` always yields the same draws, and a
/// shorter run is a prefix of a longer one.
///
/// # Errors
///
/// Returns [`ConjugateError::InvalidArgument`] if `mean` is not finite or
/// `sd` is not finite and positive.
///
/// # Example
///
/// ```
/// use conjugate_normal::bayesian::predictive_sample;
///
/// let a = predictive_sample(5, 10.0, 2.0, 7).expect("valid");
/// let b = predictive_sample(5, 10.0, 2.0, 7).expect("valid");
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 5);
/// ```
pub fn predictive_sample(count: usize, mean: f64, sd: f64, seed: u64) -> Result<Vec<f64>> {
    if !mean.is_finite() {
        return Err(ConjugateError::invalid_argument("mean", mean, "finite"));
    }
    if !(sd > 0.0 && sd.is_finite()) {
        return Err(ConjugateError::invalid_argument("sd", sd, "finite and > 0"));
    }

    let dist = Normal::new(mean, sd)
        .map_err(|e| ConjugateError::invalid_argument("sd", sd, &e.to_string()))?;
    let mut rng = StdRng::seed_from_u64(seed);

    tracing::debug!(count, mean, sd, seed, "drawing predictive sample");
    Ok((0..count).map(|_| dist.sample(&mut rng)).collect())
}

/// Simulates new observations from the posterior predictive
/// `N(mean_post, sd_post² + sd_y²)`.
///
/// # Errors
///
/// Returns [`ConjugateError::InvalidArgument`] if `sd_y` is not finite and
/// positive.
pub fn simulate_observations(
    posterior: &NormalPosterior,
    sd_y: f64,
    count: usize,
    seed: u64,
) -> Result<Vec<f64>> {
    let (mean, sd) = posterior.predictive_for_observation(sd_y)?;
    predictive_sample(count, mean, sd, seed)
}

/// Simulates new group means from the group-level distribution.
///
/// # Errors
///
/// Returns [`ConjugateError::InvalidArgument`] for a flat prior, which has
/// no proper distribution to draw from.
pub fn simulate_group_means(prior: &NormalPrior, count: usize, seed: u64) -> Result<Vec<f64>> {
    predictive_sample(count, prior.mean(), prior.sd(), seed)
}

/// Empirical summary of a vector of draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictiveSummary {
    /// Sample mean of the draws
    pub mean: f64,
    /// Sample standard deviation of the draws
    pub sd: f64,
    /// Lower bound of the central interval
    pub lower: f64,
    /// Upper bound of the central interval
    pub upper: f64,
    /// Mass of the central interval
    pub alpha: f64,
}

impl PredictiveSummary {
    /// Summarizes `draws` with an empirical central interval of mass `alpha`.
    ///
    /// # Errors
    ///
    /// Returns [`ConjugateError::InvalidArgument`] if `alpha ∉ (0, 1)` and
    /// [`ConjugateError::EmptyInput`] for fewer than two draws.
    pub fn from_draws(draws: &[f64], alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ConjugateError::invalid_argument("alpha", alpha, "in (0, 1)"));
        }
        let tail = (1.0 - alpha) / 2.0;
        Ok(Self {
            mean: stats::mean(draws)?,
            sd: stats::std_dev(draws)?,
            lower: stats::quantile(draws, tail)?,
            upper: stats::quantile(draws, 1.0 - tail)?,
            alpha,
        })
    }

    /// Width of the central interval.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}
