//! conjugate-normal: closed-form Bayesian inference for a normal mean.
//!
//! Given an observation (or a group mean) with known standard deviation and
//! a normal prior over the unknown mean, the posterior is normal and exact.
//! This crate computes that posterior, its central credible interval, and
//! seeded predictive draws for new observations or new group means.
//!
//! # Quick Start
//!
//! ```
//! use conjugate_normal::prelude::*;
//!
//! // Prior N(0.5, 0.1²), observation 0.3 with known sd 0.05
//! let post = posterior(0.3, 0.05, 0.5, 0.1).expect("valid inputs");
//! assert!((post.mean() - 0.34).abs() < 1e-9);
//! assert!(post.sd() < 0.05);
//!
//! let (lower, upper) = post.credible_interval(0.95).expect("valid alpha");
//! assert!(lower < 0.34 && 0.34 < upper);
//!
//! // Simulate new observations from the posterior predictive
//! let (mean, sd) = post.predictive_for_observation(0.05).expect("valid sd");
//! let draws = predictive_sample(100, mean, sd, 42).expect("valid");
//! assert_eq!(draws.len(), 100);
//! ```
//!
//! # Modules
//!
//! - [`bayesian`]: Conjugate update, credible intervals, predictive sampling, group pooling
//! - [`stats`]: Normal quantile/CDF, descriptive statistics, measurement grouping
//! - [`config`]: Defaults for credible mass, draws, and seed
//! - [`error`]: Error type and `Result` alias

pub mod bayesian;
pub mod config;
pub mod error;
pub mod prelude;
pub mod stats;

pub use error::{ConjugateError, Result};
