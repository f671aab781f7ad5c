//! Calculator keypad
//!
//! The button grid a front end renders and clicks. Pressing a button
//! highlights it and yields the [`Action`] to forward into the calculator.
//!
//! ```text
//! [ C ] [ ⌫ ] [ ± ] [ / ]
//! [ 7 ] [ 8 ] [ 9 ] [ * ]
//! [ 4 ] [ 5 ] [ 6 ] [ - ]
//! [ 1 ] [ 2 ] [ 3 ] [ + ]
//! [ 0 ] [ . ] [ = ]
//! ```

use crate::core::{Action, Digit, Operator};

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The text on the button
    pub label: String,
    /// Whether the button is currently pressed/highlighted
    pub pressed: bool,
    /// The action this button forwards
    pub action: Action,
}

impl KeypadButton {
    /// Creates a button labelled after its action
    #[must_use]
    pub fn new(action: Action) -> Self {
        Self {
            label: action.label(),
            pressed: false,
            action,
        }
    }

    /// Creates a digit button
    #[must_use]
    pub fn digit(d: Digit) -> Self {
        Self::new(Action::Digit(d))
    }

    /// Creates an operator button
    #[must_use]
    pub fn operator(op: Operator) -> Self {
        Self::new(Action::Operator(op))
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}

/// Rectangular terminal area, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Area {
    /// Left column
    pub x: u16,
    /// Top row
    pub y: u16,
    /// Width in columns
    pub width: u16,
    /// Height in rows
    pub height: u16,
}

impl Area {
    /// Creates an area
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if the cell lies inside the area
    #[must_use]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && (x as u32) < self.x as u32 + self.width as u32
            && (y as u32) < self.y as u32 + self.height as u32
    }
}

/// The keypad layout, row-major
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard four-function keypad
    #[must_use]
    pub fn new() -> Self {
        let digit = |n: u8| KeypadButton::digit(Digit::ALL[usize::from(n)]);
        let buttons = vec![
            // Row 1: C ⌫ ± /
            KeypadButton::new(Action::Clear),
            KeypadButton::new(Action::Backspace),
            KeypadButton::new(Action::ToggleSign),
            KeypadButton::operator(Operator::Divide),
            // Row 2: 7 8 9 *
            digit(7),
            digit(8),
            digit(9),
            KeypadButton::operator(Operator::Multiply),
            // Row 3: 4 5 6 -
            digit(4),
            digit(5),
            digit(6),
            KeypadButton::operator(Operator::Subtract),
            // Row 4: 1 2 3 +
            digit(1),
            digit(2),
            digit(3),
            KeypadButton::operator(Operator::Add),
            // Row 5: 0 . =
            digit(0),
            KeypadButton::new(Action::DecimalPoint),
            KeypadButton::new(Action::Evaluate),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets a button by row and column; the last row is short
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds a button by its label
    #[must_use]
    pub fn find_button_by_label(&self, label: &str) -> Option<usize> {
        self.buttons.iter().position(|b| b.label == label)
    }

    /// Finds the button forwarding an action
    #[must_use]
    pub fn find_button_by_action(&self, action: Action) -> Option<usize> {
        self.buttons.iter().position(|b| b.action == action)
    }

    /// Presses a button: highlights it alone and returns its action
    pub fn press(&mut self, index: usize) -> Option<Action> {
        self.release_all();
        let btn = self.buttons.get_mut(index)?;
        btn.set_pressed(true);
        Some(btn.action)
    }

    /// Presses the button with the given label
    pub fn press_label(&mut self, label: &str) -> Option<Action> {
        let index = self.find_button_by_label(label)?;
        self.press(index)
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.set_pressed(false);
        }
    }

    /// Highlights the button for an action typed on the keyboard
    pub fn highlight(&mut self, action: Action) {
        self.release_all();
        if let Some(idx) = self.find_button_by_action(action) {
            self.buttons[idx].set_pressed(true);
        }
    }

    /// Index of the currently pressed button, if any
    #[must_use]
    pub fn pressed_index(&self) -> Option<usize> {
        self.buttons.iter().position(|b| b.pressed)
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Returns an iterator over buttons with their (row, col) positions
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.buttons.iter().enumerate().map(move |(i, btn)| {
            let row = i / self.cols;
            let col = i % self.cols;
            ((row, col), btn)
        })
    }

    /// Converts a click inside a bordered area to a button index
    #[must_use]
    pub fn hit_test(&self, area: Area, x: u16, y: u16) -> Option<usize> {
        if !area.contains(x, y) {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Border is one cell on each side
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let inner_x = rel_x - 1;
        let inner_y = rel_y - 1;

        let btn_width = (area.width - 2) / self.cols as u16;
        let btn_height = (area.height - 2) / self.rows as u16;

        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = (inner_x / btn_width) as usize;
        let row = (inner_y / btn_height) as usize;

        if row < self.rows && col < self.cols && row * self.cols + col < self.buttons.len() {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Renders the grid as plain text, the pressed button in `<>`
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for ((_, col), btn) in self.buttons_with_positions() {
            if col == 0 && !out.is_empty() {
                out.push('\n');
            } else if col > 0 {
                out.push(' ');
            }
            let (open, close) = if btn.pressed { ('<', '>') } else { ('[', ']') };
            out.push_str(&format!("{open} {} {close}", btn.label));
        }
        out
    }
}
