//! Normal distribution helpers and small descriptive statistics.
//!
//! The conjugate update itself lives in [`crate::bayesian`]; this module
//! holds the pieces it leans on:
//!
//! - Normal quantile (inverse CDF) and CDF, backed by `statrs`
//! - Two-sided critical values for credible intervals ([`z_critical`])
//! - Sample mean and standard deviation
//! - Grouping of raw measurements into per-group means ([`grouping`])
//!
//! # Examples
//!
//! ```
//! use conjugate_normal::stats::{normal_cdf, normal_quantile, z_critical};
//!
//! let z = normal_quantile(0.975, 0.0, 1.0).expect("valid probability");
//! assert!((z - 1.959_964).abs() < 1e-5);
//! assert!((z_critical(0.95).expect("valid mass") - z).abs() < 1e-12);
//!
//! let p = normal_cdf(z, 0.0, 1.0).expect("valid sd");
//! assert!((p - 0.975).abs() < 1e-9);
//! ```

pub mod grouping;

pub use grouping::{group_measurements, GroupRecord};

use crate::error::{ConjugateError, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Build a `statrs` normal, rejecting a non-positive or non-finite `sd`.
fn normal(mean: f64, sd: f64) -> Result<Normal> {
    if !mean.is_finite() {
        return Err(ConjugateError::invalid_argument("mean", mean, "finite"));
    }
    if !(sd > 0.0 && sd.is_finite()) {
        return Err(ConjugateError::invalid_argument("sd", sd, "finite and > 0"));
    }
    Normal::new(mean, sd).map_err(|e| ConjugateError::invalid_argument("sd", sd, &e.to_string()))
}

/// Quantile (inverse CDF) of `N(mean, sd)` at probability `p`.
///
/// # Errors
///
/// Returns [`ConjugateError::InvalidArgument`] if `p ∉ (0, 1)`, `sd` is not
/// finite and positive, or `mean` is not finite.
pub fn normal_quantile(p: f64, mean: f64, sd: f64) -> Result<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(ConjugateError::invalid_argument("p", p, "in (0, 1)"));
    }
    Ok(normal(mean, sd)?.inverse_cdf(p))
}

/// CDF of `N(mean, sd)` evaluated at `x`.
///
/// # Errors
///
/// Returns [`ConjugateError::InvalidArgument`] if `sd` is not finite and
/// positive, or `mean` is not finite.
pub fn normal_cdf(x: f64, mean: f64, sd: f64) -> Result<f64> {
    Ok(normal(mean, sd)?.cdf(x))
}

/// Two-sided standard normal critical value for credible mass `mass`.
///
/// `z_critical(0.95) ≈ 1.96`.
///
/// # Errors
///
/// Returns [`ConjugateError::InvalidArgument`] if `mass ∉ (0, 1)`.
pub fn z_critical(mass: f64) -> Result<f64> {
    if !(mass > 0.0 && mass < 1.0) {
        return Err(ConjugateError::invalid_argument("alpha", mass, "in (0, 1)"));
    }
    normal_quantile(1.0 - (1.0 - mass) / 2.0, 0.0, 1.0)
}

/// Arithmetic mean of `data`.
///
/// # Errors
///
/// Returns [`ConjugateError::EmptyInput`] for an empty slice.
pub fn mean(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(ConjugateError::empty_input("mean of empty slice"));
    }
    #[allow(clippy::cast_precision_loss)]
    let n = data.len() as f64;
    Ok(data.iter().sum::<f64>() / n)
}

/// Sample standard deviation of `data` (denominator `n - 1`).
///
/// # Errors
///
/// Returns [`ConjugateError::EmptyInput`] when fewer than two values are
/// supplied.
pub fn std_dev(data: &[f64]) -> Result<f64> {
    if data.len() < 2 {
        return Err(ConjugateError::empty_input(
            "standard deviation needs at least two values",
        ));
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|&x| (x - m).powi(2)).sum();
    #[allow(clippy::cast_precision_loss)]
    let dof = (data.len() - 1) as f64;
    Ok((ss / dof).sqrt())
}

/// Empirical quantile of `data` using linear interpolation (R-7 method,
/// Hyndman & Fan 1996).
///
/// # Errors
///
/// Returns [`ConjugateError::EmptyInput`] for an empty slice and
/// [`ConjugateError::InvalidArgument`] if `q ∉ [0, 1]`.
///
/// # Examples
///
/// ```
/// use conjugate_normal::stats::quantile;
///
/// let data = [5.0, 1.0, 3.0, 2.0, 4.0];
/// assert_eq!(quantile(&data, 0.5).expect("valid"), 3.0);
/// assert_eq!(quantile(&data, 0.25).expect("valid"), 2.0);
/// ```
pub fn quantile(data: &[f64], q: f64) -> Result<f64> {
    if data.is_empty() {
        return Err(ConjugateError::empty_input("quantile of empty slice"));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(ConjugateError::invalid_argument("q", q, "in [0, 1]"));
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    // h = (n - 1) * q, 0-indexed position in the sorted data
    #[allow(clippy::cast_precision_loss)]
    let h = (sorted.len() - 1) as f64 * q;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (lo, hi) = (h.floor() as usize, h.ceil() as usize);

    let fraction = h - h.floor();
    Ok(sorted[lo] + fraction * (sorted[hi] - sorted[lo]))
}
