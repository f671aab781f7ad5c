//! Typed user gestures
//!
//! Raw characters and button labels are validated once, here. Everything
//! past this point works with values that cannot be out of range.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult, Operator};

/// A single decimal digit, 0-9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// All digits in ascending order
    pub const ALL: [Self; 10] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
        Self(9),
    ];

    /// Creates a digit, rejecting values above 9
    pub fn new(value: u8) -> CalcResult<Self> {
        if value <= 9 {
            Ok(Self(value))
        } else {
            Err(CalcError::InvalidDigit(value))
        }
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the character for this digit
    #[must_use]
    pub const fn to_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl TryFrom<u8> for Digit {
    type Error = CalcError;

    fn try_from(value: u8) -> CalcResult<Self> {
        Self::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl TryFrom<char> for Digit {
    type Error = CalcError;

    fn try_from(c: char) -> CalcResult<Self> {
        c.to_digit(10)
            .map(|d| Self(d as u8))
            .ok_or(CalcError::InvalidKey(c))
    }
}

impl std::fmt::Display for Digit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One discrete user gesture forwarded into the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Append a digit to the entry
    Digit(Digit),
    /// Append the decimal separator
    DecimalPoint,
    /// Negate the active value
    ToggleSign,
    /// Remove the last entry character
    Backspace,
    /// Reset to the initial state
    Clear,
    /// Select a pending binary operator
    Operator(Operator),
    /// Apply the pending operator
    Evaluate,
}

impl Action {
    /// Button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_char().to_string(),
            Self::DecimalPoint => ".".into(),
            Self::ToggleSign => "±".into(),
            Self::Backspace => "⌫".into(),
            Self::Clear => "C".into(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Evaluate => "=".into(),
        }
    }

    /// Maps a single typed character to an action.
    ///
    /// `n` and `_` toggle the sign, `c` clears; letters are otherwise
    /// rejected.
    pub fn from_char(c: char) -> CalcResult<Self> {
        if let Ok(digit) = Digit::try_from(c) {
            return Ok(Self::Digit(digit));
        }
        if let Some(op) = Operator::from_symbol(c) {
            return Ok(Self::Operator(op));
        }
        match c {
            '.' => Ok(Self::DecimalPoint),
            '=' => Ok(Self::Evaluate),
            '±' | 'n' | 'N' | '_' => Ok(Self::ToggleSign),
            '⌫' => Ok(Self::Backspace),
            'c' | 'C' => Ok(Self::Clear),
            _ => Err(CalcError::InvalidKey(c)),
        }
    }

    /// Parses a script of single-character keys, ignoring whitespace.
    ///
    /// `"12+8="` yields `[1, 2, +, 8, =]`.
    pub fn parse_keys(keys: &str) -> CalcResult<Vec<Self>> {
        keys.chars()
            .filter(|c| !c.is_whitespace())
            .map(Self::from_char)
            .collect()
    }
}

impl FromStr for Action {
    type Err = CalcError;

    /// Parses a button label; accepts the labels [`Action::label`]
    /// produces plus a few spelled-out aliases.
    fn from_str(label: &str) -> CalcResult<Self> {
        let trimmed = label.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "neg" | "+/-" => return Ok(Self::ToggleSign),
            "back" | "bksp" | "backspace" => return Ok(Self::Backspace),
            "clear" | "ac" => return Ok(Self::Clear),
            _ => {}
        }

        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_char(c).map_err(|_| CalcError::UnknownLabel(label.to_string()))
            }
            _ => Err(CalcError::UnknownLabel(label.to_string())),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
