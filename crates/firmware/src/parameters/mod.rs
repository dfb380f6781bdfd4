//! Parameter definitions
//!
//! Registers firmware parameters in the `ParameterStore` from `quadfc_core`
//! and converts between stored values and typed configuration.
//!
//! # Parameter Groups
//!
//! - `accel_cal` - Accelerometer calibration tunables and results

pub mod accel_cal;

pub use accel_cal::{
    accel_cal_config_from_store, store_accel_calibration, AccelCalParams, ParameterStoreSink,
};

// Re-export core parameter types
pub use quadfc_core::parameters::{
    ParamFlags, ParamMetadata, ParamValue, ParameterError, ParameterStore, PARAM_NAME_LEN,
};
