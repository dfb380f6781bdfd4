//! Core firmware infrastructure
//!
//! Logging macros and platform trait implementations, plus re-exports of the
//! pure logic in `quadfc_core`.

pub mod logging;
pub mod traits;

pub use quadfc_core::ahrs;
pub use quadfc_core::calibration;
