//! Calculator configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Upper bound for mantissa decimals; `f64` carries ~17 significant digits
const MAX_EXPONENT_PRECISION: usize = 16;

/// What a division by zero produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivisionByZeroPolicy {
    /// IEEE 754 result: `Infinity`, `-Infinity` or `NaN`
    #[default]
    Ieee,
    /// Explicit error state shown as `Error`
    Error,
}

impl DivisionByZeroPolicy {
    /// Display text for the hardened error state
    pub const ERROR_TEXT: &'static str = "Error";
}

/// Display limits and numeric policies for one calculator session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Results whose plain text is longer than this switch to scientific
    /// notation
    pub max_display_len: usize,
    /// Mantissa decimals used in scientific notation
    pub exponent_precision: usize,
    /// Division by zero handling
    pub division_by_zero: DivisionByZeroPolicy,
    /// Text shown when there is no active value
    pub empty_display: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_display_len: 10,
            exponent_precision: 5,
            division_by_zero: DivisionByZeroPolicy::Ieee,
            empty_display: "0".to_string(),
        }
    }
}

impl CalculatorConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overflow threshold
    #[must_use]
    pub const fn with_max_display_len(mut self, len: usize) -> Self {
        self.max_display_len = len;
        self
    }

    /// Set the scientific notation precision
    #[must_use]
    pub const fn with_exponent_precision(mut self, precision: usize) -> Self {
        self.exponent_precision = precision;
        self
    }

    /// Set the division by zero policy
    #[must_use]
    pub const fn with_division_by_zero(mut self, policy: DivisionByZeroPolicy) -> Self {
        self.division_by_zero = policy;
        self
    }

    /// Set the empty display text
    #[must_use]
    pub fn with_empty_display(mut self, text: impl Into<String>) -> Self {
        self.empty_display = text.into();
        self
    }

    /// Checks value ranges
    pub fn validate(&self) -> CalcResult<()> {
        if self.max_display_len == 0 {
            return Err(CalcError::config("max_display_len must be at least 1"));
        }
        if self.exponent_precision > MAX_EXPONENT_PRECISION {
            return Err(CalcError::config(format!(
                "exponent_precision must be at most {MAX_EXPONENT_PRECISION}, got {}",
                self.exponent_precision
            )));
        }
        if self.empty_display.is_empty() {
            return Err(CalcError::config("empty_display must not be empty"));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration; missing fields default
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), ?config, "loaded calculator config");
        Ok(config)
    }

    /// Serializes the configuration as pretty JSON
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
