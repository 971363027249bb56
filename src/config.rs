//! Updater configuration.
//!
//! Holds the defaults a caller would otherwise repeat at every call site:
//! credible mass, number of predictive draws, RNG seed, and an optional
//! within-group measurement sd for pooling.
//!
//! # Examples
//!
//! ```
//! use conjugate_normal::config::UpdaterConfig;
//!
//! let config = UpdaterConfig::new()
//!     .with_credible_mass(0.9)
//!     .with_predictive_draws(500)
//!     .with_seed(Some(7));
//!
//! assert_eq!(config.credible_mass, 0.9);
//! assert!(config.validate().is_ok());
//! ```

use crate::bayesian::{
    estimate_groups, predictive_sample, GroupEstimate, NormalPosterior, Pooling,
    PredictiveSummary,
};
use crate::error::{ConjugateError, Result};
use crate::stats::GroupRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Defaults for interval and sampling calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// Credible mass for intervals, in (0, 1)
    pub credible_mass: f64,
    /// Number of draws per predictive simulation
    pub predictive_draws: usize,
    /// RNG seed; `None` derives one from the system clock
    pub seed: Option<u64>,
    /// Within-group measurement sd used for group means
    pub sd_within: Option<f64>,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            credible_mass: 0.95,
            predictive_draws: 1000,
            seed: Some(42),
            sd_within: None,
        }
    }
}

impl UpdaterConfig {
    /// Create a configuration with defaults.
    ///
    /// ```
    /// use conjugate_normal::config::UpdaterConfig;
    ///
    /// let config = UpdaterConfig::new();
    /// assert_eq!(config.credible_mass, 0.95);
    /// assert_eq!(config.predictive_draws, 1000);
    /// assert_eq!(config.seed, Some(42));
    /// assert_eq!(config.sd_within, None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the credible mass.
    #[must_use]
    pub fn with_credible_mass(mut self, mass: f64) -> Self {
        self.credible_mass = mass;
        self
    }

    /// Set the number of predictive draws.
    #[must_use]
    pub fn with_predictive_draws(mut self, draws: usize) -> Self {
        self.predictive_draws = draws;
        self
    }

    /// Set or clear the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set the within-group measurement sd.
    #[must_use]
    pub fn with_sd_within(mut self, sd: f64) -> Self {
        self.sd_within = Some(sd);
        self
    }

    /// Check every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConjugateError::InvalidArgument`] naming the first
    /// out-of-range field.
    pub fn validate(&self) -> Result<()> {
        if !(self.credible_mass > 0.0 && self.credible_mass < 1.0) {
            return Err(ConjugateError::invalid_argument(
                "credible_mass",
                self.credible_mass,
                "in (0, 1)",
            ));
        }
        if let Some(sd) = self.sd_within {
            if !(sd > 0.0 && sd.is_finite()) {
                return Err(ConjugateError::invalid_argument(
                    "sd_within",
                    sd,
                    "finite and > 0",
                ));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    ///
    /// ```
    /// use conjugate_normal::config::UpdaterConfig;
    ///
    /// let config = UpdaterConfig::from_json_str(r#"{"credible_mass": 0.8}"#)
    ///     .expect("valid config");
    /// assert_eq!(config.credible_mass, 0.8);
    /// assert_eq!(config.predictive_draws, 1000);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConjugateError::Serialization`] for malformed JSON and
    /// [`ConjugateError::InvalidArgument`] for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConjugateError::Io`] if the file cannot be read, otherwise
    /// as [`UpdaterConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded updater config");
        Ok(config)
    }

    /// Seed to use for the next draw.
    #[must_use]
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
                .unwrap_or(0)
        })
    }

    /// Credible interval of `posterior` at the configured mass.
    ///
    /// # Errors
    ///
    /// Returns [`ConjugateError::InvalidArgument`] if the configured mass is
    /// out of range.
    pub fn interval(&self, posterior: &NormalPosterior) -> Result<(f64, f64)> {
        posterior.credible_interval(self.credible_mass)
    }

    /// Draw the configured number of samples from `N(mean, sd²)` and
    /// summarize them at the configured mass.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`predictive_sample`] and
    /// [`PredictiveSummary::from_draws`].
    pub fn simulate(&self, mean: f64, sd: f64) -> Result<PredictiveSummary> {
        let draws = predictive_sample(self.predictive_draws, mean, sd, self.effective_seed())?;
        PredictiveSummary::from_draws(&draws, self.credible_mass)
    }

    /// Pool `records` using the configured within-group sd.
    ///
    /// # Errors
    ///
    /// Returns [`ConjugateError::InvalidArgument`] if `sd_within` is unset,
    /// otherwise propagates errors from [`estimate_groups`].
    pub fn estimate_groups(
        &self,
        records: &[GroupRecord],
        pooling: &Pooling,
    ) -> Result<Vec<GroupEstimate>> {
        let sd_within = self.sd_within.ok_or_else(|| {
            ConjugateError::invalid_argument("sd_within", "unset", "configured for pooling")
        })?;
        estimate_groups(records, sd_within, pooling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bayesian::posterior;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        assert!(UpdaterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = UpdaterConfig::new()
            .with_credible_mass(0.5)
            .with_predictive_draws(10)
            .with_seed(None)
            .with_sd_within(0.8);
        assert_eq!(config.credible_mass, 0.5);
        assert_eq!(config.predictive_draws, 10);
        assert_eq!(config.seed, None);
        assert_eq!(config.sd_within, Some(0.8));
    }

    #[test]
    fn test_validate_rejects_bad_mass() {
        for mass in [0.0, 1.0, 1.5, f64::NAN] {
            let err = UpdaterConfig::new()
                .with_credible_mass(mass)
                .validate()
                .unwrap_err();
            assert!(err.to_string().contains("credible_mass"));
        }
    }

    #[test]
    fn test_validate_rejects_bad_sd_within() {
        let err = UpdaterConfig::new()
            .with_sd_within(-0.1)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("sd_within"));
    }

    #[test]
    fn test_from_json_defaults_and_overrides() {
        let config = UpdaterConfig::from_json_str(
            r#"{"predictive_draws": 250, "seed": null, "sd_within": 0.8}"#,
        )
        .expect("valid");
        assert_eq!(config.credible_mass, 0.95);
        assert_eq!(config.predictive_draws, 250);
        assert_eq!(config.seed, None);
        assert_eq!(config.sd_within, Some(0.8));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = UpdaterConfig::from_json_str("{credible_mass").unwrap_err();
        assert!(matches!(err, ConjugateError::Serialization(_)));
    }

    #[test]
    fn test_from_json_out_of_range() {
        let err = UpdaterConfig::from_json_str(r#"{"credible_mass": 2.0}"#).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"credible_mass": 0.9, "seed": 3}}"#).expect("write config");

        let config = UpdaterConfig::load(file.path()).expect("valid config");
        assert_eq!(config.credible_mass, 0.9);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = UpdaterConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConjugateError::Io(_)));
    }

    #[test]
    fn test_interval_uses_configured_mass() {
        let post = posterior(0.3, 0.05, 0.5, 0.1).expect("valid");
        let narrow = UpdaterConfig::new().with_credible_mass(0.5);
        let wide = UpdaterConfig::new().with_credible_mass(0.99);
        let (a_lo, a_hi) = narrow.interval(&post).expect("valid");
        let (b_lo, b_hi) = wide.interval(&post).expect("valid");
        assert!(a_hi - a_lo < b_hi - b_lo);
    }

    #[test]
    fn test_estimate_groups_uses_sd_within() {
        let records = vec![GroupRecord::new("a", 1.0, 4), GroupRecord::new("b", 2.0, 1)];
        let config = UpdaterConfig::new().with_sd_within(0.8);
        let est = config
            .estimate_groups(&records, &Pooling::Unpooled)
            .expect("valid");
        assert!((est[0].posterior.sd() - 0.4).abs() < 1e-12);
        assert!((est[1].posterior.sd() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_groups_requires_sd_within() {
        let records = vec![GroupRecord::new("a", 1.0, 4)];
        let err = UpdaterConfig::new()
            .estimate_groups(&records, &Pooling::Complete)
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("sd_within"));
    }

    #[test]
    fn test_effective_seed() {
        assert_eq!(UpdaterConfig::new().with_seed(Some(11)).effective_seed(), 11);
        // clock-derived seed still yields usable draws
        let config = UpdaterConfig::new().with_seed(None).with_predictive_draws(10);
        assert_eq!(config.simulate(0.0, 1.0).expect("valid").alpha, 0.95);
    }

    #[test]
    fn test_simulate_is_seeded() {
        let config = UpdaterConfig::new().with_predictive_draws(200).with_seed(Some(9));
        let a = config.simulate(0.0, 1.0).expect("valid");
        let b = config.simulate(0.0, 1.0).expect("valid");
        assert_eq!(a, b);
        assert_eq!(a.alpha, 0.95);
    }
}
