//! Calculator state machine
//!
//! ```text
//! Empty -> Entering -> [operator] -> PendingSecondOperand -> Entering
//!       -> [evaluate] -> Result -> Empty-or-Entering
//! ```
//!
//! `clear` is reachable from every state. Every action returns the text the
//! display should show afterwards; actions that do nothing return the
//! previous text unchanged.

use std::mem;

use serde::{Deserialize, Serialize};

use crate::core::format::{negate_text, parse_operand, render_result};
use crate::core::{Action, CalculatorConfig, Digit, DivisionByZeroPolicy, Operator};

/// All mutable calculator state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// First operand of the in-progress operation
    pub pending_operand: String,
    /// Number currently being typed
    pub current_entry: String,
    /// Operator awaiting its second operand
    pub operator: Option<Operator>,
    /// Most recently computed result
    pub last_result: String,
}

impl CalculatorState {
    /// Returns true when every field is in its initial state
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending_operand.is_empty()
            && self.current_entry.is_empty()
            && self.operator.is_none()
            && self.last_result.is_empty()
    }
}

/// Four-function calculator driven by discrete actions
#[derive(Debug, Clone)]
pub struct Calculator {
    state: CalculatorState,
    config: CalculatorConfig,
    display: String,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a calculator with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates a calculator with a custom configuration
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        let display = config.empty_display.clone();
        Self {
            state: CalculatorState::default(),
            config,
            display,
        }
    }

    /// Returns the current state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Returns the configuration
    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Returns the text currently displayed
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Applies one action and returns the new display text
    pub fn apply(&mut self, action: Action) -> String {
        let shown = match action {
            Action::Digit(d) => self.digit(d),
            Action::DecimalPoint => self.decimal_point(),
            Action::ToggleSign => self.toggle_sign(),
            Action::Backspace => self.backspace(),
            Action::Clear => self.clear(),
            Action::Operator(op) => self.set_operator(op),
            Action::Evaluate => self.evaluate(),
        };
        tracing::debug!(%action, display = %shown, state = ?self.state, "applied action");
        shown
    }

    /// Applies a sequence of actions and returns the final display text
    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = Action>) -> String {
        for action in actions {
            self.apply(action);
        }
        self.display.clone()
    }

    /// Appends a digit, starting a fresh entry after a result
    pub fn digit(&mut self, d: Digit) -> String {
        if self.state.last_result.is_empty() {
            self.state.current_entry.push(d.to_char());
        } else {
            self.state.last_result.clear();
            self.state.current_entry = d.to_char().to_string();
        }
        self.show_entry()
    }

    /// Appends the decimal separator unless the entry already has one
    pub fn decimal_point(&mut self) -> String {
        if !self.state.last_result.is_empty() {
            self.state.last_result.clear();
            self.state.current_entry.clear();
        }
        if !self.state.current_entry.contains('.') {
            self.state.current_entry.push('.');
        }
        self.show_entry()
    }

    /// Negates the entry, or the last result when there is no entry
    pub fn toggle_sign(&mut self) -> String {
        if !self.state.current_entry.is_empty() {
            self.state.current_entry = negate_text(&self.state.current_entry);
            self.show_entry()
        } else if !self.state.last_result.is_empty() {
            self.state.last_result = negate_text(&self.state.last_result);
            let text = self.state.last_result.clone();
            self.show(text)
        } else {
            self.display.clone()
        }
    }

    /// Removes the last entry character; never touches the result
    pub fn backspace(&mut self) -> String {
        if self.state.current_entry.pop().is_some() {
            self.show_entry()
        } else {
            self.display.clone()
        }
    }

    /// Resets to the initial state
    pub fn clear(&mut self) -> String {
        self.state = CalculatorState::default();
        self.show(String::new())
    }

    /// Selects the pending operator, first collapsing a complete pending
    /// operation into its result.
    ///
    /// The active value becomes the first operand. With no active value
    /// the existing first operand is kept and only the operator changes.
    pub fn set_operator(&mut self, op: Operator) -> String {
        if self.state.operator.is_some() && !self.state.current_entry.is_empty() {
            self.evaluate();
        }

        let active = if self.state.last_result.is_empty() {
            mem::take(&mut self.state.current_entry)
        } else {
            mem::take(&mut self.state.last_result)
        };
        if !active.is_empty() {
            self.state.pending_operand = active;
        }
        self.state.current_entry.clear();
        self.state.operator = Some(op);

        let text = self.state.pending_operand.clone();
        self.show(text)
    }

    /// Applies the pending operator to the first operand and the entry.
    ///
    /// Does nothing without a pending operator.
    pub fn evaluate(&mut self) -> String {
        let Some(op) = self.state.operator else {
            return self.display.clone();
        };

        let a = parse_operand(&self.state.pending_operand);
        let b = parse_operand(&self.state.current_entry);
        let result = if op == Operator::Divide
            && b == 0.0
            && self.config.division_by_zero == DivisionByZeroPolicy::Error
        {
            DivisionByZeroPolicy::ERROR_TEXT.to_string()
        } else {
            render_result(
                op.apply(a, b),
                self.config.max_display_len,
                self.config.exponent_precision,
            )
        };
        tracing::trace!(a, %op, b, %result, "evaluated");

        self.state.last_result = result;
        self.state.current_entry.clear();
        self.state.pending_operand.clear();
        self.state.operator = None;

        let text = self.state.last_result.clone();
        self.show(text)
    }

    /// A lone `-` is a zero operand and shows like an empty entry
    fn show_entry(&mut self) -> String {
        let text = if self.state.current_entry == "-" {
            String::new()
        } else {
            self.state.current_entry.clone()
        };
        self.show(text)
    }

    /// Empty text renders as the configured empty display
    fn show(&mut self, text: String) -> String {
        self.display = if text.is_empty() {
            self.config.empty_display.clone()
        } else {
            text
        };
        self.display.clone()
    }
}
