//! Interactive serial console
//!
//! - `command`: line parser and command dispatch
//! - `console`: console writer and calibration progress binding

pub mod command;
pub mod console;

pub use command::{execute, handle_line, parse_command, ShellCommand, ShellError};
pub use console::{take_console_output, ConsoleNotifier, ConsoleOutput, LINE_END};
