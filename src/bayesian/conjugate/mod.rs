//! Conjugate normal-normal updates for an unknown mean with known variance.
//!
//! The prior and the likelihood are both normal, so the posterior is normal
//! and available in closed form:
//!
//! ```text
//! precision_post = 1/sd_prior² + 1/sd_y²
//! sd_post        = sqrt(1 / precision_post)
//! mean_post      = (mean_prior/sd_prior² + y/sd_y²) · sd_post²
//! ```
//!
//! The update is evaluated in ratio form so that any positive standard
//! deviation, however far from 1, gives finite moments:
//!
//! ```text
//! w         = 1 / (1 + (sd_prior/sd_y)²)      weight on the prior mean
//! mean_post = w·mean_prior + (1-w)·y
//! sd_post   = s / hypot(1, s/l)               s, l = smaller, larger sd
//! ```
//!
//! Each type here is an immutable value. Updating a [`NormalPrior`] yields a
//! new [`NormalPosterior`]; chaining is done through
//! [`NormalPosterior::as_prior`].

use crate::bayesian::predictive::predictive_sample;
use crate::error::{ConjugateError, Result};
use crate::stats::z_critical;
use serde::{Deserialize, Serialize};

/// Validate a standard deviation: strictly positive, `+∞` allowed.
fn check_sd(param: &str, sd: f64) -> Result<()> {
    // `!(sd > 0.0)` also rejects NaN
    if !(sd > 0.0) {
        return Err(ConjugateError::invalid_argument(param, sd, "> 0"));
    }
    Ok(())
}

fn check_finite(param: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ConjugateError::invalid_argument(param, value, "finite"));
    }
    Ok(())
}

fn check_mass(alpha: f64) -> Result<()> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(ConjugateError::invalid_argument("alpha", alpha, "in (0, 1)"));
    }
    Ok(())
}

/// Precision `1/sd²`; zero for an infinite `sd`.
fn precision_of(sd: f64) -> f64 {
    1.0 / (sd * sd)
}

/// Share of the posterior mean taken from the prior, `τ_prior / τ_post`.
///
/// The ratio saturates to 0 or 1 instead of overflowing.
fn prior_weight(sd_y: f64, sd_prior: f64) -> f64 {
    let ratio = sd_prior / sd_y;
    1.0 / (1.0 + ratio * ratio)
}

/// `sqrt(1 / (1/a² + 1/b²))` without squaring either input.
fn combined_sd(a: f64, b: f64) -> f64 {
    let (small, large) = if a <= b { (a, b) } else { (b, a) };
    small / 1.0_f64.hypot(small / large)
}

/// Normal prior `N(mean, sd²)` over an unknown mean.
///
/// # Example
///
/// ```
/// use conjugate_normal::bayesian::{NormalObservation, NormalPrior};
///
/// let prior = NormalPrior::new(0.5, 0.1).expect("valid prior");
/// let obs = NormalObservation::new(0.3, 0.05).expect("valid observation");
///
/// let post = prior.update(&obs).expect("finite inputs");
/// assert!((post.mean() - 0.34).abs() < 1e-12);
/// assert!((post.sd() - 0.002_f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalPrior {
    mean: f64,
    sd: f64,
}

impl NormalPrior {
    /// Creates the prior `N(mean, sd²)`.
    ///
    /// `sd = f64::INFINITY` is accepted and behaves like [`NormalPrior::flat`]
    /// centred at `mean`.
    ///
    /// # Errors
    ///
    /// Returns [`ConjugateError::InvalidArgument`] if `sd ≤ 0`, `sd` is NaN,
    /// or `mean` is not finite.
    pub fn new(mean: f64, sd: f64) -> Result<Self> {
        check_finite("mean_prior", mean)?;
        check_sd("sd_prior", sd)?;
        Ok(Self { mean, sd })
    }

    /// Creates the flat (improper) prior with infinite standard deviation.
    ///
    /// Updating a flat prior returns the observation unchanged.
    ///
    /// ```
    /// use conjugate_normal::bayesian::{NormalObservation, NormalPrior};
    ///
    /// let obs = NormalObservation::new(1.3, 0.4).expect("valid observation");
    /// let post = NormalPrior::flat().update(&obs).expect("one finite sd");
    /// assert!((post.mean() - 1.3).abs() < 1e-12);
    /// assert!((post.sd() - 0.4).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn flat() -> Self {
        Self {
            mean: 0.0,
            sd: f64::INFINITY,
        }
    }

    /// Prior mean.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Prior standard deviation.
    #[must_use]
    pub fn sd(&self) -> f64 {
        self.sd
    }

    /// Prior variance `sd²`.
    #[must_use]
    pub fn variance(&self) -> f64 {
        self.sd * self.sd
    }

    /// Prior precision `1/sd²` (zero for a flat prior).
    #[must_use]
    pub fn precision(&self) -> f64 {
        precision_of(self.sd)
    }

    /// True if the prior carries no information.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.sd.is_infinite()
    }

    /// Conjugate update with one observation.
    ///
    /// # Errors
    ///
    /// Returns [`ConjugateError::InvalidArgument`] if both the prior and the
    /// observation have infinite standard deviation.
    pub fn update(&self, obs: &NormalObservation) -> Result<NormalPosterior> {
        combine(obs.value, obs.sd, self.mean, self.sd)
    }

    /// Weight the posterior mean would place on this prior's mean after
    /// updating with `obs`, in `[0, 1]`.
    ///
    /// ```
    /// use conjugate_normal::bayesian::{NormalObservation, NormalPrior};
    ///
    /// let prior = NormalPrior::new(0.5, 0.1).expect("valid prior");
    /// let obs = NormalObservation::new(0.3, 0.05).expect("valid observation");
    /// assert!((prior.shrinkage(&obs) - 0.2).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn shrinkage(&self, obs: &NormalObservation) -> f64 {
        prior_weight(obs.sd, self.sd)
    }

    /// Sequential conjugate updates, one observation at a time.
    ///
    /// The result equals a single update with the precision-weighted
    /// combination of all observations.
    ///
    /// # Errors
    ///
    /// Returns [`ConjugateError::EmptyInput`] when `observations` is empty,
    /// otherwise any error from [`NormalPrior::update`].
    ///
    /// # Example
    ///
    /// ```
    /// use conjugate_normal::bayesian::{NormalObservation, NormalPrior};
    ///
    /// let prior = NormalPrior::new(0.0, 1.0).expect("valid prior");
    /// let obs = [
    ///     NormalObservation::new(1.0, 1.0).expect("valid"),
    ///     NormalObservation::new(2.0, 1.0).expect("valid"),
    /// ];
    /// let post = prior.update_many(&obs).expect("non-empty");
    /// // three unit-precision sources: 0, 1, 2
    /// assert!((post.mean() - 1.0).abs() < 1e-12);
    /// assert!((post.variance() - 1.0 / 3.0).abs() < 1e-12);
    /// ```
    pub fn update_many(&self, observations: &[NormalObservation]) -> Result<NormalPosterior> {
        let (first, rest) = observations
            .split_first()
            .ok_or_else(|| ConjugateError::empty_input("observations for sequential update"))?;

        let mut post = self.update(first)?;
        for obs in rest {
            post = post.as_prior().update(obs)?;
        }
        Ok(post)
    }
}

/// Observed value `y` with known standard deviation `sd_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalObservation {
    value: f64,
    sd: f64,
}

impl NormalObservation {
    /// Creates a single observation.
    ///
    /// # Errors
    ///
    /// Returns [`ConjugateError::InvalidArgument`] if `sd ≤ 0`, `sd` is NaN,
    /// or `value` is not finite.
    pub fn new(value: f64, sd: f64) -> Result<Self> {
        check_finite("y", value)?;
        check_sd("sd_y", sd)?;
        Ok(Self { value, sd })
    }

    /// Creates the observation for a group mean of `n` measurements.
    ///
    /// Each measurement has standard deviation `sd`, so the mean has
    /// `sd / sqrt(n)`.
    ///
    /// ```
    /// use conjugate_normal::bayesian::NormalObservation;
    ///
    /// let obs = NormalObservation::group_mean(1.2, 0.8, 16).expect("valid");
    /// assert!((obs.sd() - 0.2).abs() < 1e-12);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConjugateError::InvalidArgument`] if `n == 0`, or for the
    /// reasons listed on [`NormalObservation::new`].
    pub fn group_mean(mean: f64, sd: f64, n: u32) -> Result<Self> {
        if n == 0 {
            return Err(ConjugateError::invalid_argument("n", n, ">= 1"));
        }
        check_sd("sd_y", sd)?;
        Self::new(mean, sd / f64::from(n).sqrt())
    }

    /// Observed value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Known standard deviation of the observation.
    #[must_use]
    pub fn sd(&self) -> f64 {
        self.sd
    }

    /// Observation precision `1/sd²`.
    #[must_use]
    pub fn precision(&self) -> f64 {
        precision_of(self.sd)
    }
}

/// Normal posterior `N(mean_post, sd_post²)` over the unknown mean.
///
/// Always has finite moments: at least one of its two inputs carried a
/// finite standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalPosterior {
    mean: f64,
    sd: f64,
}

impl NormalPosterior {
    /// Posterior mean.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Posterior standard deviation.
    #[must_use]
    pub fn sd(&self) -> f64 {
        self.sd
    }

    /// Posterior variance `sd_post²`.
    #[must_use]
    pub fn variance(&self) -> f64 {
        self.sd * self.sd
    }

    /// Posterior precision, the sum of the input precisions.
    #[must_use]
    pub fn precision(&self) -> f64 {
        precision_of(self.sd)
    }

    /// Central credible interval holding `alpha` of the posterior mass.
    ///
    /// Bounds are the normal quantiles at `(1-alpha)/2` and
    /// `1-(1-alpha)/2`, i.e. `mean ± z·sd` with `z = z_critical(alpha)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConjugateError::InvalidArgument`] if `alpha ∉ (0, 1)`.
    ///
    /// # Example
    ///
    /// ```
    /// use conjugate_normal::bayesian::posterior;
    ///
    /// let post = posterior(0.0, 1.0, 0.0, 1.0).expect("valid inputs");
    /// let (lo, hi) = post.credible_interval(0.95).expect("valid mass");
    /// assert!((hi - 1.96 * post.sd()).abs() < 1e-3);
    /// assert!((lo + hi).abs() < 1e-12);
    /// ```
    pub fn credible_interval(&self, alpha: f64) -> Result<(f64, f64)> {
        let half_width = z_critical(alpha)? * self.sd;
        Ok((self.mean - half_width, self.mean + half_width))
    }

    /// Posterior predictive of a new observation with known `sd_y`.
    ///
    /// Returns `(mean_post, sqrt(sd_post² + sd_y²))`.
    ///
    /// # Errors
    ///
    /// Returns [`ConjugateError::InvalidArgument`] if `sd_y` is not finite
    /// and positive.
    pub fn predictive_for_observation(&self, sd_y: f64) -> Result<(f64, f64)> {
        check_sd("sd_y", sd_y)?;
        check_finite("sd_y", sd_y)?;
        Ok((self.mean, self.sd.hypot(sd_y)))
    }

    /// Draws `count` values of the unknown mean from the posterior.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`predictive_sample`].
    pub fn sample(&self, count: usize, seed: u64) -> Result<Vec<f64>> {
        predictive_sample(count, self.mean, self.sd, seed)
    }

    /// Reuse this posterior as the prior for the next update.
    #[must_use]
    pub fn as_prior(&self) -> NormalPrior {
        NormalPrior {
            mean: self.mean,
            sd: self.sd,
        }
    }
}

impl From<NormalPosterior> for (f64, f64) {
    fn from(post: NormalPosterior) -> Self {
        (post.mean, post.sd)
    }
}

/// Precision-weighted combination of two normal sources.
fn combine(y: f64, sd_y: f64, mean_prior: f64, sd_prior: f64) -> Result<NormalPosterior> {
    if sd_y.is_infinite() && sd_prior.is_infinite() {
        return Err(ConjugateError::invalid_argument(
            "sd_y, sd_prior",
            format!("({sd_y}, {sd_prior})"),
            "at least one finite",
        ));
    }

    let w = prior_weight(sd_y, sd_prior);
    let mean_post = w * mean_prior + (1.0 - w) * y;
    let sd_post = combined_sd(sd_y, sd_prior);

    tracing::debug!(y, sd_y, mean_prior, sd_prior, mean_post, sd_post, "conjugate normal update");

    Ok(NormalPosterior {
        mean: mean_post,
        sd: sd_post,
    })
}

/// Closed-form posterior of a normal mean given one normal observation.
///
/// Returns `N(mean_post, sd_post²)`; convert to a `(mean_post, sd_post)`
/// tuple with `.into()`.
///
/// # Errors
///
/// Returns [`ConjugateError::InvalidArgument`] if `sd_y ≤ 0` or
/// `sd_prior ≤ 0` (or NaN), if `y` or `mean_prior` is not finite, or if both
/// standard deviations are infinite.
///
/// # Example
///
/// ```
/// use conjugate_normal::bayesian::posterior;
///
/// let (mean_post, sd_post): (f64, f64) =
///     posterior(0.3, 0.05, 0.5, 0.1).expect("valid inputs").into();
/// assert!((mean_post - 0.34).abs() < 1e-12);
/// assert!((sd_post - 0.0447).abs() < 1e-4);
/// ```
pub fn posterior(y: f64, sd_y: f64, mean_prior: f64, sd_prior: f64) -> Result<NormalPosterior> {
    let prior = NormalPrior::new(mean_prior, sd_prior)?;
    let obs = NormalObservation::new(y, sd_y)?;
    prior.update(&obs)
}

/// Central `alpha` credible interval of the posterior from [`posterior`].
///
/// # Errors
///
/// Returns [`ConjugateError::InvalidArgument`] if `alpha ∉ (0, 1)` or for
/// any reason [`posterior`] fails.
///
/// # Example
///
/// ```
/// use conjugate_normal::bayesian::credible_interval;
///
/// let (lo, hi) = credible_interval(0.3, 0.05, 0.5, 0.1, 0.95).expect("valid");
/// assert!(lo < 0.34 && 0.34 < hi);
/// assert!(credible_interval(0.3, 0.05, 0.5, 0.1, 1.0).is_err());
/// ```
pub fn credible_interval(
    y: f64,
    sd_y: f64,
    mean_prior: f64,
    sd_prior: f64,
    alpha: f64,
) -> Result<(f64, f64)> {
    check_mass(alpha)?;
    posterior(y, sd_y, mean_prior, sd_prior)?.credible_interval(alpha)
}


#[cfg(test)]
mod tests_conjugate_contract;
