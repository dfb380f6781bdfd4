//! Console command parser and dispatcher
//!
//! Commands are one word per line; surrounding whitespace is ignored and
//! arguments are rejected since no command takes any.
//!
//! | Command | Action |
//! |---|---|
//! | `help` | list commands |
//! | `clear` | clear the terminal |
//! | `acc_calib` | start a six-face accelerometer calibration on this console |

use embedded_io::Write;

use super::console::LINE_END;
use crate::subsystems::calibration::{request_accel_calibration, CalibrationChannel};

/// Parsed console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Clear,
    AccCalib,
}

/// Command names with their help text
pub const COMMANDS: [(&str, ShellCommand, &str); 3] = [
    ("help", ShellCommand::Help, "list commands"),
    ("clear", ShellCommand::Clear, "clear the screen"),
    (
        "acc_calib",
        ShellCommand::AccCalib,
        "six-face accelerometer calibration",
    ),
];

/// ANSI clear screen and cursor home
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Console parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellError {
    /// Line contains only whitespace
    Empty,
    /// First word is not a known command
    UnknownCommand,
    /// Command was followed by arguments
    UnexpectedArgument,
}

impl ShellError {
    /// Return variant name as a static string (usable with defmt on embedded)
    pub fn as_str(&self) -> &'static str {
        match self {
            ShellError::Empty => "Empty",
            ShellError::UnknownCommand => "UnknownCommand",
            ShellError::UnexpectedArgument => "UnexpectedArgument",
        }
    }
}

impl core::fmt::Display for ShellError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShellError::Empty => write!(f, "empty command"),
            ShellError::UnknownCommand => write!(f, "unknown command"),
            ShellError::UnexpectedArgument => write!(f, "command takes no arguments"),
        }
    }
}

impl ShellCommand {
    /// Command name as typed on the console
    pub fn name(&self) -> &'static str {
        match self {
            ShellCommand::Help => "help",
            ShellCommand::Clear => "clear",
            ShellCommand::AccCalib => "acc_calib",
        }
    }
}

/// Parse one console line
pub fn parse_command(line: &str) -> Result<ShellCommand, ShellError> {
    let mut words = line.split_whitespace();
    let name = words.next().ok_or(ShellError::Empty)?;
    let command = COMMANDS
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(_, command, _)| *command)
        .ok_or(ShellError::UnknownCommand)?;

    if words.next().is_some() {
        return Err(ShellError::UnexpectedArgument);
    }
    Ok(command)
}

/// Run a parsed command, writing its response to `console`
pub fn execute<W: Write>(command: ShellCommand, console: &mut W) -> Result<(), W::Error> {
    match command {
        ShellCommand::Help => {
            for (name, _, help) in COMMANDS {
                console.write_all(name.as_bytes())?;
                console.write_all(b" - ")?;
                console.write_all(help.as_bytes())?;
                console.write_all(LINE_END.as_bytes())?;
            }
        }
        ShellCommand::Clear => console.write_all(CLEAR_SCREEN.as_bytes())?,
        ShellCommand::AccCalib => match request_accel_calibration(CalibrationChannel::Shell) {
            Ok(()) => {
                crate::log_info!("Accel calibration requested via console");
            }
            Err(e) => {
                crate::log_warn!("Accel calibration rejected: {}", e.as_str());
                console.write_all(b"[cal] calibration already in progress")?;
                console.write_all(LINE_END.as_bytes())?;
            }
        },
    }
    Ok(())
}

/// Parse and run one console line
///
/// Parse errors are reported on the console; empty lines print nothing.
pub fn handle_line<W: Write>(line: &str, console: &mut W) -> Result<(), W::Error> {
    match parse_command(line) {
        Ok(command) => execute(command, console),
        Err(ShellError::Empty) => Ok(()),
        Err(ShellError::UnknownCommand) => {
            let name = line.split_whitespace().next().unwrap_or_default();
            console.write_all(b"unknown command: ")?;
            console.write_all(name.as_bytes())?;
            console.write_all(b" (try 'help')")?;
            console.write_all(LINE_END.as_bytes())
        }
        Err(ShellError::UnexpectedArgument) => {
            let name = line.split_whitespace().next().unwrap_or_default();
            console.write_all(name.as_bytes())?;
            console.write_all(b": ")?;
            console.write_all(b"command takes no arguments")?;
            console.write_all(LINE_END.as_bytes())
        }
    }
}
