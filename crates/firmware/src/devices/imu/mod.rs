//! IMU sensor state
//!
//! - `filtered`: low-pass filtered accelerometer shared between tasks
//!
//! Hardware drivers publish into [`SharedFilteredAccel`]; consumers read it
//! through the `AccelSource` trait from `quadfc_core`.

pub mod filtered;

pub use filtered::{SharedFilteredAccel, DEFAULT_ACCEL_LPF_ALPHA};
