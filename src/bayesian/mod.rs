//! Bayesian inference for a normal mean with known variance.
//!
//! This module implements:
//! - The conjugate normal-normal update ([`posterior`], [`NormalPrior::update`])
//! - Central credible intervals ([`credible_interval`])
//! - Seeded predictive sampling ([`predictive_sample`])
//! - Complete, no, and partial pooling of group means ([`estimate_groups`])
//!
//! Every result is exact and closed-form. There is no MCMC here: for the
//! normal-normal model the sampler's answer converges to these formulas.
//!
//! # Example: one observation
//!
//! ```
//! use conjugate_normal::bayesian::{credible_interval, posterior};
//!
//! // Prior N(0.5, 0.1²), observation 0.3 with known sd 0.05
//! let post = posterior(0.3, 0.05, 0.5, 0.1).expect("valid inputs");
//! assert!((post.mean() - 0.34).abs() < 1e-9);
//!
//! let (lower, upper) = credible_interval(0.3, 0.05, 0.5, 0.1, 0.95).expect("valid alpha");
//! assert!(lower < post.mean() && post.mean() < upper);
//! ```
//!
//! # Example: new group means
//!
//! ```
//! use conjugate_normal::bayesian::{simulate_group_means, NormalPrior};
//!
//! let county_level = NormalPrior::new(1.3, 0.3).expect("valid prior");
//! let draws = simulate_group_means(&county_level, 1_000, 42).expect("proper prior");
//! assert_eq!(draws.len(), 1_000);
//! ```

mod conjugate;
mod pooling;
mod predictive;

pub use conjugate::{
    credible_interval, posterior, NormalObservation, NormalPosterior, NormalPrior,
};
pub use pooling::{
    compare_pooling, complete_pool, estimate_groups, GroupEstimate, Pooling, PoolingComparison,
};
pub use predictive::{
    predictive_sample, simulate_group_means, simulate_observations, PredictiveSummary,
};
