//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use conjugate_normal::prelude::*;
//! ```

pub use crate::bayesian::{
    credible_interval, estimate_groups, posterior, predictive_sample, GroupEstimate,
    NormalObservation, NormalPosterior, NormalPrior, Pooling, PredictiveSummary,
};
pub use crate::config::UpdaterConfig;
pub use crate::error::ConjugateError;
pub use crate::stats::GroupRecord;
