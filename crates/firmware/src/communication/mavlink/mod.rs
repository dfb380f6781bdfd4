//! MAVLink communication
//!
//! - `status_notifier`: STATUSTEXT queue drained by the telemetry router
//! - `calibration`: calibration progress binding onto STATUSTEXT
//! - `handlers`: COMMAND_LONG handling

pub mod calibration;
pub mod handlers;
pub mod status_notifier;

pub use calibration::StatusTextNotifier;
pub use handlers::CommandHandler;
