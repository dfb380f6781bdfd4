//! Accelerometer Calibration Parameter Definitions
//!
//! # Parameters
//!
//! Tunables (read when a session starts):
//!
//! - `ACCCAL_SAMPLES` - Samples averaged per face (default 2000)
//! - `ACCCAL_SETTLE_MS` - Stillness required before a face is captured (default 5000)
//! - `ACCCAL_MOT_THR` - Inter-sample change counted as motion, m/s² (default 0.98)
//!
//! Results (written when a session completes):
//!
//! - `ACC_CAL_XP` .. `ACC_CAL_ZN` - Raw gravity reading per face
//! - `AHRS_ACC_OFS_X/Y/Z` - Derived offset, m/s²
//! - `AHRS_ACC_SCL_X/Y/Z` - Derived scale factor

use core::cell::RefCell;

use critical_section::Mutex;
use quadfc_core::ahrs::{
    AccelCalibration, PARAM_ACCEL_OFFSET_X, PARAM_ACCEL_OFFSET_Y, PARAM_ACCEL_OFFSET_Z,
    PARAM_ACCEL_SCALE_X, PARAM_ACCEL_SCALE_Y, PARAM_ACCEL_SCALE_Z, PARAM_GRAVITY_READINGS,
};
use quadfc_core::calibration::{AccelCalConfig, AccelCalibrationSink, GravityReadings};
use quadfc_core::parameters::{ParamFlags, ParamValue, ParameterError, ParameterStore};

/// Samples averaged per face
pub const PARAM_SAMPLES: &str = "ACCCAL_SAMPLES";
/// Settle time in milliseconds
pub const PARAM_SETTLE_MS: &str = "ACCCAL_SETTLE_MS";
/// Motion threshold (m/s²)
pub const PARAM_MOTION_THRESHOLD: &str = "ACCCAL_MOT_THR";

const OFFSET_PARAMS: [&str; 3] = [
    PARAM_ACCEL_OFFSET_X,
    PARAM_ACCEL_OFFSET_Y,
    PARAM_ACCEL_OFFSET_Z,
];
const SCALE_PARAMS: [&str; 3] = [
    PARAM_ACCEL_SCALE_X,
    PARAM_ACCEL_SCALE_Y,
    PARAM_ACCEL_SCALE_Z,
];

/// Accelerometer calibration parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct AccelCalParams {
    /// Offset/scale applied to raw accelerometer readings
    pub calibration: AccelCalibration,
}

impl AccelCalParams {
    /// Register calibration tunables and results with default values
    ///
    /// Existing values are kept (registration is idempotent).
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            PARAM_SAMPLES,
            ParamValue::Int(AccelCalConfig::DEFAULT_SAMPLE_COUNT as i32),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_SETTLE_MS,
            ParamValue::Int((AccelCalConfig::DEFAULT_SETTLE_TIME_US / 1000) as i32),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_MOTION_THRESHOLD,
            ParamValue::Float(AccelCalConfig::DEFAULT_MOTION_THRESHOLD),
            ParamFlags::empty(),
        )?;

        for name in PARAM_GRAVITY_READINGS {
            store.register(name, ParamValue::Float(0.0), ParamFlags::empty())?;
        }
        for name in OFFSET_PARAMS {
            store.register(name, ParamValue::Float(0.0), ParamFlags::empty())?;
        }
        for name in SCALE_PARAMS {
            store.register(name, ParamValue::Float(1.0), ParamFlags::empty())?;
        }

        Ok(())
    }

    /// Load the stored calibration, falling back to identity per value
    pub fn from_store(store: &ParameterStore) -> Self {
        let mut calibration = AccelCalibration::default();
        for axis in 0..3 {
            if let Some(offset) = store.get_float(OFFSET_PARAMS[axis]) {
                calibration.offset[axis] = offset;
            }
            if let Some(scale) = store.get_float(SCALE_PARAMS[axis]) {
                calibration.scale[axis] = scale;
            }
        }
        Self { calibration }
    }
}

/// Build the session configuration from stored tunables
///
/// Missing, ill-typed and non-positive values fall back to the defaults.
pub fn accel_cal_config_from_store(store: &ParameterStore) -> AccelCalConfig {
    let mut config = AccelCalConfig::default();

    if let Some(samples) = store.get_int(PARAM_SAMPLES).filter(|v| *v > 0) {
        config.sample_count = samples as u32;
    }
    if let Some(settle_ms) = store.get_int(PARAM_SETTLE_MS).filter(|v| *v > 0) {
        config.settle_time_us = u64::from(settle_ms as u32) * 1000;
    }
    if let Some(threshold) = store
        .get_float(PARAM_MOTION_THRESHOLD)
        .filter(|v| v.is_finite() && *v > 0.0)
    {
        config.motion_threshold = threshold;
    }

    config
}

/// Write a session result into the store
///
/// The six raw readings are always stored. Offset and scale are derived and
/// stored only when the readings are usable; the derived calibration is
/// returned in that case.
pub fn store_accel_calibration(
    store: &mut ParameterStore,
    readings: &GravityReadings,
) -> Result<Option<AccelCalibration>, ParameterError> {
    for (name, value) in PARAM_GRAVITY_READINGS.iter().zip(readings.as_array()) {
        store.set(name, ParamValue::Float(value))?;
    }

    let Some(calibration) = AccelCalibration::from_readings(readings) else {
        return Ok(None);
    };
    for axis in 0..3 {
        store.set(OFFSET_PARAMS[axis], ParamValue::Float(calibration.offset[axis]))?;
        store.set(SCALE_PARAMS[axis], ParamValue::Float(calibration.scale[axis]))?;
    }
    Ok(Some(calibration))
}

/// Calibration sink writing into a shared parameter store
///
/// The store lock is held only while the result is written.
pub struct ParameterStoreSink<'a> {
    store: &'a Mutex<RefCell<ParameterStore>>,
}

impl<'a> ParameterStoreSink<'a> {
    pub fn new(store: &'a Mutex<RefCell<ParameterStore>>) -> Self {
        Self { store }
    }
}

impl AccelCalibrationSink for ParameterStoreSink<'_> {
    fn apply_accel_calibration(&mut self, readings: &GravityReadings) {
        let result = critical_section::with(|cs| {
            store_accel_calibration(&mut self.store.borrow_ref_mut(cs), readings)
        });

        match result {
            Ok(Some(calibration)) => {
                crate::log_info!(
                    "Accel calibration saved: ofs=({}, {}, {}) scl=({}, {}, {})",
                    calibration.offset.x,
                    calibration.offset.y,
                    calibration.offset.z,
                    calibration.scale.x,
                    calibration.scale.y,
                    calibration.scale.z
                );
            }
            Ok(None) => {
                crate::log_error!("Accel calibration degenerate, offsets not updated");
                crate::communication::mavlink::status_notifier::send_error(
                    "[cal] accel readings degenerate, offsets unchanged",
                );
            }
            Err(e) => {
                crate::log_error!("Accel calibration not stored: {}", e.as_str());
            }
        }
    }
}
