//! MAVLink protocol handlers

pub mod command;

pub use command::CommandHandler;
