//! Calculator drivers and display sinks
//!
//! A front end talks to the calculator through [`CalculatorDriver`] and
//! receives display text through a [`DisplaySink`]. The `verify_*`
//! functions below describe calculator behaviour once and run against any
//! driver: the bare [`Calculator`], the [`KeypadDriver`] clicking through
//! the button grid, or a [`Session`] feeding a sink.

use crate::core::{Action, CalcError, CalcResult, Calculator};
use crate::keypad::Keypad;

/// Receives the display text after every action
pub trait DisplaySink {
    /// Shows the given text
    fn show(&mut self, text: &str);
}

/// Records every display update, oldest first
impl DisplaySink for Vec<String> {
    fn show(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Forwards one action and returns the new display text
    fn press(&mut self, action: Action) -> String;

    /// Gets the current display text
    fn display(&self) -> String;

    /// Forwards the action behind a button label
    fn press_label(&mut self, label: &str) -> CalcResult<String> {
        let action = label.parse()?;
        Ok(self.press(action))
    }

    /// Forwards a script of single-character keys, e.g. `"12+8="`
    fn enter_keys(&mut self, keys: &str) -> CalcResult<String> {
        let mut display = self.display();
        for action in Action::parse_keys(keys)? {
            display = self.press(action);
        }
        Ok(display)
    }

    /// Resets the calculator
    fn clear(&mut self) {
        self.press(Action::Clear);
    }
}

impl CalculatorDriver for Calculator {
    fn press(&mut self, action: Action) -> String {
        self.apply(action)
    }

    fn display(&self) -> String {
        Calculator::display(self).to_string()
    }
}

/// Drives the calculator by pressing keypad buttons
#[derive(Debug, Default)]
pub struct KeypadDriver {
    keypad: Keypad,
    calculator: Calculator,
}

impl KeypadDriver {
    /// Creates a driver over a fresh calculator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver over an existing calculator
    #[must_use]
    pub fn with_calculator(calculator: Calculator) -> Self {
        Self {
            keypad: Keypad::new(),
            calculator,
        }
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the calculator
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Clicks the button at `index`; clicks outside the grid do nothing
    pub fn click(&mut self, index: usize) -> String {
        match self.keypad.press(index) {
            Some(action) => self.calculator.apply(action),
            None => self.calculator.display().to_string(),
        }
    }
}

impl CalculatorDriver for KeypadDriver {
    fn press(&mut self, action: Action) -> String {
        match self.keypad.find_button_by_action(action) {
            Some(index) => self.click(index),
            None => self.calculator.apply(action),
        }
    }

    fn display(&self) -> String {
        self.calculator.display().to_string()
    }

    fn press_label(&mut self, label: &str) -> CalcResult<String> {
        let index = self
            .keypad
            .find_button_by_label(label)
            .ok_or_else(|| CalcError::UnknownLabel(label.to_string()))?;
        Ok(self.click(index))
    }
}

/// One calculator session pushing its display into a sink
#[derive(Debug)]
pub struct Session<S> {
    calculator: Calculator,
    sink: S,
}

impl<S: DisplaySink> Session<S> {
    /// Starts a session; the sink immediately receives the initial display
    pub fn new(calculator: Calculator, mut sink: S) -> Self {
        sink.show(calculator.display());
        Self { calculator, sink }
    }

    /// Returns the calculator
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Returns the sink
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Ends the session, returning the sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: DisplaySink> CalculatorDriver for Session<S> {
    fn press(&mut self, action: Action) -> String {
        let display = self.calculator.apply(action);
        self.sink.show(&display);
        display
    }

    fn display(&self) -> String {
        self.calculator.display().to_string()
    }
}

// ===== Shared Behaviour Checks =====
// These work with ANY CalculatorDriver implementation

/// Verifies the four operators
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    assert_eq!(driver.enter_keys("12+8=")?, "20");
    driver.clear();
    assert_eq!(driver.enter_keys("10-4=")?, "6");
    driver.clear();
    assert_eq!(driver.enter_keys("6*7=")?, "42");
    driver.clear();
    assert_eq!(driver.enter_keys("20/4=")?, "5");
    driver.clear();
    Ok(())
}

/// Verifies digit accumulation, the decimal separator and backspace
pub fn verify_entry_editing<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    assert_eq!(driver.enter_keys("0123456789")?, "0123456789");
    driver.clear();

    assert_eq!(driver.enter_keys("1..5.")?, "1.5");
    driver.clear();

    assert_eq!(driver.enter_keys("7")?, "7");
    assert_eq!(driver.press(Action::Backspace), "0");
    assert_eq!(driver.press(Action::Backspace), "0");
    assert_eq!(driver.press(Action::Clear), "0");
    Ok(())
}

/// Verifies sign toggling on the entry and on a result
pub fn verify_sign_toggle<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    assert_eq!(driver.enter_keys("1.5")?, "1.5");
    assert_eq!(driver.press(Action::ToggleSign), "-1.5");
    assert_eq!(driver.press(Action::ToggleSign), "1.5");
    driver.clear();

    assert_eq!(driver.enter_keys("2-5=")?, "-3");
    assert_eq!(driver.press(Action::ToggleSign), "3");
    driver.clear();
    Ok(())
}

/// Verifies chained operators evaluate left to right
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    assert_eq!(driver.enter_keys("12+8+")?, "20");
    assert_eq!(driver.enter_keys("5=")?, "25");
    assert_eq!(driver.enter_keys("*2=")?, "50");
    driver.clear();

    // No precedence: 2 + 3 * 4 = 20
    assert_eq!(driver.enter_keys("2+3*4=")?, "20");
    driver.clear();
    Ok(())
}

/// Verifies the scientific notation fallback
pub fn verify_overflow<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    assert_eq!(driver.enter_keys("999999*999999=")?, "9.99998e+11");
    driver.clear();
    Ok(())
}

/// Verifies IEEE division by zero and the empty second operand policy
pub fn verify_edge_cases<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    assert_eq!(driver.enter_keys("5/0=")?, "Infinity");
    driver.clear();
    assert_eq!(driver.enter_keys("5+=")?, "5");
    driver.clear();
    assert_eq!(driver.enter_keys("5=")?, "5");
    driver.clear();
    Ok(())
}

/// Runs every behaviour check
pub fn verify_all<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    verify_basic_arithmetic(driver)?;
    verify_entry_editing(driver)?;
    verify_sign_toggle(driver)?;
    verify_chaining(driver)?;
    verify_overflow(driver)?;
    verify_edge_cases(driver)
}
