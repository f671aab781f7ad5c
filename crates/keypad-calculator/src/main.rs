//! keycalc: terminal front end for the keypad calculator
//!
//! ## Usage
//!
//! ```bash
//! keycalc                          # interactive session (keyboard + mouse)
//! keycalc --keys "12+8="           # replay keys, print the final display
//! keycalc --keys "12+8=" --echo    # print every display update
//! keycalc --config calc.json -v    # custom limits, debug logs on stderr
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEvent, MouseEventKind},
    execute, queue,
    style::Print,
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use keypad_calculator::prelude::*;
use tracing_subscriber::EnvFilter;

/// Keypad border box: 4 buttons of 6 cells, 5 rows of 1 cell, plus border
const KEYPAD_AREA: Area = Area::new(0, 2, 26, 7);
const INNER_WIDTH: usize = 24;

/// keycalc: four-function keypad calculator
#[derive(Parser, Debug)]
#[command(name = "keycalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, env = "KEYCALC_CONFIG")]
    config: Option<PathBuf>,

    /// Replay these keys instead of starting an interactive session
    #[arg(short, long)]
    keys: Option<String>,

    /// Print every display update while replaying
    #[arg(long)]
    echo: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CalcResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => CalculatorConfig::load(path)?,
        None => CalculatorConfig::default(),
    };
    let calculator = Calculator::with_config(config);

    match cli.keys {
        Some(keys) => replay(calculator, &keys, cli.echo),
        None => interactive(calculator),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,keypad_calculator={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Writes each display update on its own line
struct LineSink<W: Write> {
    out: W,
}

impl<W: Write> DisplaySink for LineSink<W> {
    fn show(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "failed to write display");
        }
    }
}

fn replay(calculator: Calculator, keys: &str, echo: bool) -> CalcResult<()> {
    if echo {
        let mut session = Session::new(calculator, LineSink { out: io::stdout() });
        session.enter_keys(keys)?;
    } else {
        let mut calculator = calculator;
        println!("{}", calculator.enter_keys(keys)?);
    }
    Ok(())
}

/// Holds the terminal in raw mode; dropping it restores the terminal on
/// every exit path, including a failed setup
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Self::setup(out)
    }

    /// Raw mode is already on here
    fn setup(out: W) -> io::Result<Self> {
        let mut guard = Self { out };
        execute!(
            guard.out,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!(error = %e, "failed to leave raw mode");
        }
        if let Err(e) = execute!(
            self.out,
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        ) {
            tracing::warn!(error = %e, "failed to restore terminal");
        }
    }
}

fn interactive(calculator: Calculator) -> CalcResult<()> {
    let mut guard = TerminalGuard::enter(io::stdout())?;
    run_session(&mut guard.out, KeypadDriver::with_calculator(calculator))
}

fn run_session(out: &mut impl Write, mut driver: KeypadDriver) -> CalcResult<()> {
    let handler = InputHandler::new();

    loop {
        draw(out, &driver)?;

        match event::read()? {
            Event::Key(key) => match handler.handle_key(key) {
                KeyAction::Press(action) => {
                    driver.press(action);
                }
                KeyAction::Quit => break,
                KeyAction::None => {}
            },
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(_),
                column,
                row,
                ..
            }) => {
                if let Some(index) = driver.keypad().hit_test(KEYPAD_AREA, column, row) {
                    driver.click(index);
                }
            }
            _ => {}
        }
    }

    Ok(())
}

fn draw(out: &mut impl Write, driver: &KeypadDriver) -> io::Result<()> {
    queue!(
        out,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        Print(format!(" {:>width$}", driver.display(), width = INNER_WIDTH))
    )?;

    let horizontal = "─".repeat(INNER_WIDTH);
    let top = KEYPAD_AREA.y;
    queue!(out, cursor::MoveTo(0, top), Print(format!("┌{horizontal}┐")))?;
    for (offset, line) in driver.keypad().render_text().lines().enumerate() {
        queue!(
            out,
            cursor::MoveTo(0, top + 1 + offset as u16),
            Print(format!("│{line:<width$}│", width = INNER_WIDTH))
        )?;
    }
    queue!(
        out,
        cursor::MoveTo(0, top + KEYPAD_AREA.height - 1),
        Print(format!("└{horizontal}┘")),
        cursor::MoveTo(0, top + KEYPAD_AREA.height + 1),
        Print("n: ±  Esc: clear  q: quit")
    )?;
    out.flush()
}
