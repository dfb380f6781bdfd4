//! Flight controller subsystems
//!
//! - `calibration`: six-face accelerometer calibration sessions and their
//!   request arbitration

pub mod calibration;
