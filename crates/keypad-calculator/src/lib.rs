//! Keypad Calculator
//!
//! A four-function calculator as an explicit state machine: digits
//! accumulate as text, one binary operator waits for its second operand,
//! and `=` (or a chained operator) computes the result.
//!
//! Front ends forward discrete [`Action`](core::Action)s and show the
//! display text each action returns. The crate ships two: a [`keypad`]
//! grid and, with the `tui` feature, a crossterm keyboard handler used by
//! the `keycalc` binary.
//!
//! # Example
//!
//! ```rust
//! use keypad_calculator::prelude::*;
//!
//! let mut calc = Calculator::new();
//! let display = calc.apply_all(Action::parse_keys("12+8=").unwrap());
//! assert_eq!(display, "20");
//!
//! // Results longer than ten characters switch to scientific notation
//! calc.clear();
//! let display = calc.apply_all(Action::parse_keys("999999*999999=").unwrap());
//! assert_eq!(display, "9.99998e+11");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;
pub mod keypad;

#[cfg(feature = "tui")]
pub mod input;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::{
        Action, CalcError, CalcResult, Calculator, CalculatorConfig, CalculatorState, Digit,
        DivisionByZeroPolicy, Operator,
    };
    pub use crate::driver::{CalculatorDriver, DisplaySink, KeypadDriver, Session};
    pub use crate::keypad::{Area, Keypad, KeypadButton};

    #[cfg(feature = "tui")]
    pub use crate::input::{InputHandler, KeyAction};
}
