//! Configuration types for the quality engine.
//!
//! This module provides configuration options using the builder pattern.
//! The defaults reproduce the reference scoring behaviour; changing them is
//! meant for experimentation, not for normal use.

use crate::utils::NumericRule;
use serde::{Deserialize, Serialize};

/// Configuration shared by the analyzer, the scoring engine and the
/// cleaning operations.
///
/// Use [`QualityConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use lex_quality::{NumericRule, QualityConfig};
///
/// let config = QualityConfig::builder()
///     .numeric_rule(NumericRule::StrictPattern)
///     .outlier_z_threshold(2.5)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Rule used everywhere a cell must be recognised as a number.
    /// Default: LenientParse
    pub numeric_rule: NumericRule,

    /// Values whose absolute z-score is strictly greater than this are outliers.
    /// Default: 3.0
    pub outlier_z_threshold: f64,

    /// Minimum numeric values a column needs before the outlier cleaning
    /// operation considers it.
    /// Default: 2
    pub min_outlier_sample: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            numeric_rule: NumericRule::default(),
            outlier_z_threshold: 3.0,
            min_outlier_sample: 2,
        }
    }
}

impl QualityConfig {
    /// Create a new configuration builder.
    pub fn builder() -> QualityConfigBuilder {
        QualityConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.outlier_z_threshold.is_finite() || self.outlier_z_threshold <= 0.0 {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "outlier_z_threshold".to_string(),
                value: self.outlier_z_threshold,
            });
        }

        if self.min_outlier_sample == 0 {
            return Err(ConfigValidationError::InvalidSampleSize(
                self.min_outlier_sample,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be a positive finite number)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid minimum outlier sample: {0} (must be at least 1)")]
    InvalidSampleSize(usize),
}

impl From<ConfigValidationError> for crate::error::QualityError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::QualityError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`QualityConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct QualityConfigBuilder {
    numeric_rule: Option<NumericRule>,
    outlier_z_threshold: Option<f64>,
    min_outlier_sample: Option<usize>,
}

impl QualityConfigBuilder {
    /// Set the numeric detection rule.
    pub fn numeric_rule(mut self, rule: NumericRule) -> Self {
        self.numeric_rule = Some(rule);
        self
    }

    /// Set the z-score above which a value is an outlier.
    pub fn outlier_z_threshold(mut self, threshold: f64) -> Self {
        self.outlier_z_threshold = Some(threshold);
        self
    }

    /// Set the minimum sample size for outlier cleaning.
    pub fn min_outlier_sample(mut self, count: usize) -> Self {
        self.min_outlier_sample = Some(count);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `QualityConfig` or an error if validation fails.
    pub fn build(self) -> Result<QualityConfig, ConfigValidationError> {
        let config = QualityConfig {
            numeric_rule: self.numeric_rule.unwrap_or_default(),
            outlier_z_threshold: self.outlier_z_threshold.unwrap_or(3.0),
            min_outlier_sample: self.min_outlier_sample.unwrap_or(2),
        };

        config.validate()?;
        Ok(config)
    }
}
