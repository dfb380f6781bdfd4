//! AHRS (Attitude and Heading Reference System) calibration types
//!
//! Platform-specific implementations (parameter loading) are in the firmware crate.

pub mod calibration;

pub use calibration::{
    AccelCalibration, GRAVITY, PARAM_ACCEL_OFFSET_X, PARAM_ACCEL_OFFSET_Y, PARAM_ACCEL_OFFSET_Z,
    PARAM_ACCEL_SCALE_X, PARAM_ACCEL_SCALE_Y, PARAM_ACCEL_SCALE_Z, PARAM_GRAVITY_READINGS,
};
