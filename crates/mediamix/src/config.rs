//! Configuration for panel generation and analytics defaults.
//!
//! Loaded from an optional TOML file layered with environment variables
//! (`MEDIAMIX__GENERATOR__SEED=7`, `MEDIAMIX__ANALYTICS__TOP_N=20`).
//!
//! ```toml
//! [generator]
//! seed = 42
//! start_date = "2024-01-01"
//! end_date = "2024-12-31"
//! media_budget_fraction = 0.12
//!
//! [analytics]
//! sample_points = 120
//! top_n = 15
//! ```

use crate::error::{MediaMixError, Result};
use crate::fabric::GeneratorConfig;
use chrono::NaiveDate;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "MEDIAMIX";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaMixConfig {
    /// Panel generator settings.
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Analytics defaults.
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// Defaults applied by callers of the transform library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Maximum points kept when downsampling long series.
    #[serde(default = "default_sample_points")]
    pub sample_points: usize,
    /// Rows kept by top-N views.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_sample_points() -> usize {
    120
}

fn default_top_n() -> usize {
    15
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            sample_points: default_sample_points(),
            top_n: default_top_n(),
        }
    }
}

impl MediaMixConfig {
    /// Load from a TOML file, overridden by environment variables.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML text, overridden by environment variables.
    pub fn load_from_str(content: &str) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables only.
    pub fn from_env() -> Result<Self> {
        let builder =
            Config::builder().add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load with fallback to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        if self.analytics.sample_points == 0 {
            return Err(MediaMixError::Config(
                "analytics.sample_points must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Set the generator seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.generator.seed = seed;
        self
    }

    /// Set the generation window.
    pub fn with_window(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.generator.start_date = start;
        self.generator.end_date = end;
        self
    }

    /// Set the downsampling target.
    pub fn with_sample_points(mut self, points: usize) -> Self {
        self.analytics.sample_points = points;
        self
    }

    /// Set the top-N truncation.
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.analytics.top_n = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MediaMixConfig::default();
        assert_eq!(config.generator.seed, 42);
        assert_eq!(config.analytics.sample_points, 120);
        assert_eq!(config.analytics.top_n, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_str() {
        let toml = r#"
            [generator]
            seed = 7
            start_date = "2024-03-01"
            end_date = "2024-03-31"

            [analytics]
            top_n = 5
        "#;
        let config = MediaMixConfig::load_from_str(toml).unwrap();
        assert_eq!(config.generator.seed, 7);
        assert_eq!(config.generator.days(), 31);
        assert_eq!(config.generator.media_budget_fraction, 0.12);
        assert_eq!(config.analytics.top_n, 5);
        assert_eq!(config.analytics.sample_points, 120);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = MediaMixConfig::load_from_str("").unwrap();
        assert_eq!(config, MediaMixConfig::default());
    }

    #[test]
    fn test_validation() {
        let config = MediaMixConfig::default().with_sample_points(0);
        assert!(matches!(config.validate(), Err(MediaMixError::Config(_))));

        let config = MediaMixConfig::default().with_window(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        );
        assert!(matches!(
            config.validate(),
            Err(MediaMixError::InvalidDateRange { .. })
        ));

        let toml = "[generator]\nmedia_budget_fraction = 1.5\n";
        assert!(MediaMixConfig::load_from_str(toml).is_err());
    }

    #[test]
    fn test_builder_setters() {
        let config = MediaMixConfig::default()
            .with_seed(9)
            .with_sample_points(60)
            .with_top_n(3);
        assert_eq!(config.generator.seed, 9);
        assert_eq!(config.analytics.sample_points, 60);
        assert_eq!(config.analytics.top_n, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = MediaMixConfig::load_or_default("/nonexistent/mediamix.toml");
        assert_eq!(config, MediaMixConfig::default());
    }
}
