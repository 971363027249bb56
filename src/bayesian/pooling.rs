//! Per-group estimates under complete, no, and partial pooling.
//!
//! Each group contributes its mean of `n` measurements; with a known
//! within-group standard deviation `sd_within` that mean has standard
//! deviation `sd_within / sqrt(n)`. Partial pooling updates every group
//! against a shared group-level prior, pulling small groups toward the prior
//! mean harder than large ones.
//!
//! # Example
//!
//! ```
//! use conjugate_normal::bayesian::{estimate_groups, NormalPrior, Pooling};
//! use conjugate_normal::stats::GroupRecord;
//!
//! let records = vec![
//!     GroupRecord::new("small", 2.0, 1),
//!     GroupRecord::new("large", 2.0, 100),
//! ];
//! let prior = NormalPrior::new(1.0, 0.5).expect("valid prior");
//! let est = estimate_groups(&records, 1.0, &Pooling::Partial(prior)).expect("valid");
//!
//! // the single-measurement group is pulled much closer to 1.0
//! assert!(est[0].posterior.mean() < est[1].posterior.mean());
//! assert!(est[0].shrinkage > est[1].shrinkage);
//! ```

use crate::bayesian::conjugate::{NormalObservation, NormalPosterior, NormalPrior};
use crate::error::{ConjugateError, Result};
use crate::stats::GroupRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How information is shared between groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pooling {
    /// Ignore group membership: every group gets the grand-mean posterior.
    Complete,
    /// Each group on its own, with a flat prior.
    Unpooled,
    /// Each group updated against a shared group-level prior.
    Partial(NormalPrior),
}

/// Posterior estimate for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEstimate {
    /// Group identifier
    pub group_id: String,
    /// Number of measurements in the group
    pub n: u32,
    /// Observed group mean
    pub observed: f64,
    /// Posterior over the group's true mean
    pub posterior: NormalPosterior,
    /// Weight on the pooled/prior mean, in `[0, 1]`
    pub shrinkage: f64,
}

impl GroupEstimate {
    /// Distance the estimate moved away from the observed group mean.
    #[must_use]
    pub fn pull(&self) -> f64 {
        self.posterior.mean() - self.observed
    }
}

fn validate(records: &[GroupRecord], sd_within: f64) -> Result<()> {
    if records.is_empty() {
        return Err(ConjugateError::empty_input("group records"));
    }
    if !(sd_within > 0.0 && sd_within.is_finite()) {
        return Err(ConjugateError::invalid_argument(
            "sd_within",
            sd_within,
            "finite and > 0",
        ));
    }
    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        if !seen.insert(r.group_id.as_str()) {
            return Err(ConjugateError::invalid_argument(
                "group_id",
                &r.group_id,
                "unique across records",
            ));
        }
    }
    Ok(())
}

/// Estimates every group's mean under the chosen pooling.
///
/// Output order follows `records`.
///
/// # Errors
///
/// - [`ConjugateError::EmptyInput`] for no records
/// - [`ConjugateError::InvalidArgument`] for `sd_within` not finite and
///   positive, a record with `n = 0` or a non-finite value, or a repeated
///   `group_id`
pub fn estimate_groups(
    records: &[GroupRecord],
    sd_within: f64,
    pooling: &Pooling,
) -> Result<Vec<GroupEstimate>> {
    validate(records, sd_within)?;

    let observations = records
        .iter()
        .map(|r| NormalObservation::group_mean(r.value, sd_within, r.n))
        .collect::<Result<Vec<_>>>()?;

    let estimates = match pooling {
        Pooling::Complete => {
            let pooled = complete_pool(records, sd_within)?;
            records
                .iter()
                .map(|r| GroupEstimate {
                    group_id: r.group_id.clone(),
                    n: r.n,
                    observed: r.value,
                    posterior: pooled,
                    shrinkage: 1.0,
                })
                .collect()
        }
        Pooling::Unpooled => records
            .iter()
            .zip(&observations)
            .map(|(r, obs)| {
                Ok(GroupEstimate {
                    group_id: r.group_id.clone(),
                    n: r.n,
                    observed: r.value,
                    posterior: NormalPrior::flat().update(obs)?,
                    shrinkage: 0.0,
                })
            })
            .collect::<Result<Vec<_>>>()?,
        Pooling::Partial(prior) => records
            .iter()
            .zip(&observations)
            .map(|(r, obs)| {
                let posterior = prior.update(obs)?;
                Ok(GroupEstimate {
                    group_id: r.group_id.clone(),
                    n: r.n,
                    observed: r.value,
                    posterior,
                    shrinkage: prior.shrinkage(obs),
                })
            })
            .collect::<Result<Vec<_>>>()?,
    };

    tracing::debug!(
        groups = records.len(),
        sd_within,
        pooling = ?pooling,
        "estimated group means"
    );
    Ok(estimates)
}

/// Flat-prior posterior of the grand mean over all measurements.
///
/// The grand mean weights each group mean by its `n`; its standard
/// deviation is `sd_within / sqrt(Σn)`.
///
/// # Errors
///
/// Same conditions as [`estimate_groups`].
pub fn complete_pool(records: &[GroupRecord], sd_within: f64) -> Result<NormalPosterior> {
    validate(records, sd_within)?;
    if let Some(r) = records.iter().find(|r| r.n == 0) {
        return Err(ConjugateError::invalid_argument(
            "n",
            format!("0 (group {})", r.group_id),
            ">= 1",
        ));
    }

    let total: u64 = records.iter().map(|r| u64::from(r.n)).sum();
    let weighted: f64 = records.iter().map(|r| f64::from(r.n) * r.value).sum();
    #[allow(clippy::cast_precision_loss)]
    let total = total as f64;

    let obs = NormalObservation::new(weighted / total, sd_within / total.sqrt())?;
    NormalPrior::flat().update(&obs)
}

/// Side-by-side unpooled and partially pooled estimates for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolingComparison {
    /// Group identifier
    pub group_id: String,
    /// Number of measurements in the group
    pub n: u32,
    /// Group-only estimate
    pub unpooled: NormalPosterior,
    /// Estimate under the shared prior
    pub partial: NormalPosterior,
    /// Weight on the prior mean, in `[0, 1]`
    pub shrinkage: f64,
}

/// Unpooled and partially pooled estimates for every group, in input order.
///
/// # Errors
///
/// Same conditions as [`estimate_groups`].
pub fn compare_pooling(
    records: &[GroupRecord],
    sd_within: f64,
    prior: &NormalPrior,
) -> Result<Vec<PoolingComparison>> {
    let unpooled = estimate_groups(records, sd_within, &Pooling::Unpooled)?;
    let partial = estimate_groups(records, sd_within, &Pooling::Partial(*prior))?;

    Ok(unpooled
        .into_iter()
        .zip(partial)
        .map(|(u, p)| PoolingComparison {
            group_id: u.group_id,
            n: u.n,
            unpooled: u.posterior,
            partial: p.posterior,
            shrinkage: p.shrinkage,
        })
        .collect())
}

#[cfg(test)]
#[path = "pooling_tests.rs"]
mod tests;
