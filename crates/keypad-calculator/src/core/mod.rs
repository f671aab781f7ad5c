//! Core calculator: typed actions, operators, number formatting and the
//! state machine that ties them together.
//!
//! Actions themselves never fail. Errors only surface at the boundary where
//! raw input (characters, labels, config files) becomes typed values.

pub mod action;
pub mod config;
pub mod format;
mod machine;
mod operations;

pub use action::{Action, Digit};
pub use config::{CalculatorConfig, DivisionByZeroPolicy};
pub use machine::{Calculator, CalculatorState};
pub use operations::Operator;

use thiserror::Error;

/// Result type for calculator boundary operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors raised while turning raw input into typed calculator values
#[derive(Debug, Error)]
pub enum CalcError {
    /// Digit value outside 0-9
    #[error("Invalid digit: {0} (expected 0-9)")]
    InvalidDigit(u8),

    /// Character with no calculator meaning
    #[error("Invalid key: {0:?}")]
    InvalidKey(char),

    /// Button label with no calculator meaning
    #[error("Unknown label: {0:?}")]
    UnknownLabel(String),

    /// Configuration value out of range
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// IO error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CalcError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_error_display_invalid_digit() {
        let err = CalcError::InvalidDigit(12);
        assert_eq!(format!("{err}"), "Invalid digit: 12 (expected 0-9)");
    }

    #[test]
    fn test_calc_error_display_invalid_key() {
        let err = CalcError::InvalidKey('x');
        assert_eq!(format!("{err}"), "Invalid key: 'x'");
    }

    #[test]
    fn test_calc_error_display_unknown_label() {
        let err = CalcError::UnknownLabel("sqrt".into());
        assert_eq!(format!("{err}"), "Unknown label: \"sqrt\"");
    }

    #[test]
    fn test_calc_error_config_constructor() {
        let err = CalcError::config("max_display_len must be positive");
        assert!(matches!(err, CalcError::Config { .. }));
        assert_eq!(
            err.to_string(),
            "Configuration error: max_display_len must be positive"
        );
    }

    #[test]
    fn test_calc_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CalcError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn test_calc_error_from_json() {
        let json_err = serde_json::from_str::<u8>("nope").unwrap_err();
        let err: CalcError = json_err.into();
        assert!(matches!(err, CalcError::Json(_)));
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::InvalidDigit(10));
        assert!(err.to_string().contains("digit"));
    }
}
