#![cfg_attr(not(test), no_std)]

//! quadfc_firmware - Embassy firmware glue for the quadfc flight controller
//!
//! This crate binds the platform-agnostic logic in `quadfc_core` to the
//! firmware's operator channels and shared state.
//!
//! # Design Principles
//!
//! - **Embassy tasks**: the calibration task runs behind the `embassy` feature
//! - **Operator channels**: MAVLink COMMAND_LONG/STATUSTEXT and a serial console
//! - **Shared state**: critical-section protected globals, no allocation
//! - **Logging**: `log_*!` macros routed to defmt on target

// Core systems - logging macros, platform trait implementations and
// re-exports from quadfc_core
pub mod core;

// Sensor state shared between tasks
pub mod devices;

// Communication protocols (MAVLink, serial console)
pub mod communication;

// Parameter definitions and the calibration result sink
pub mod parameters;

// Subsystems (accelerometer calibration)
pub mod subsystems;

// Note: Logging macros (log_info!, log_warn!, log_error!, log_debug!)
// are exported at crate root via #[macro_export] in core::logging
