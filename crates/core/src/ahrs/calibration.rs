//! Accelerometer offset/scale calibration
//!
//! Turns the six gravity readings of a calibration session into per-axis
//! bias and scale, and applies them to raw samples.
//!
//! Platform-specific parameter loading/saving is in the firmware crate.

use crate::calibration::GravityReadings;
use nalgebra::Vector3;

/// Standard gravity (m/s²)
pub const GRAVITY: f32 = 9.80665;

/// Parameter names for calibration data
pub const PARAM_ACCEL_OFFSET_X: &str = "AHRS_ACC_OFS_X";
pub const PARAM_ACCEL_OFFSET_Y: &str = "AHRS_ACC_OFS_Y";
pub const PARAM_ACCEL_OFFSET_Z: &str = "AHRS_ACC_OFS_Z";
pub const PARAM_ACCEL_SCALE_X: &str = "AHRS_ACC_SCL_X";
pub const PARAM_ACCEL_SCALE_Y: &str = "AHRS_ACC_SCL_Y";
pub const PARAM_ACCEL_SCALE_Z: &str = "AHRS_ACC_SCL_Z";

/// Raw gravity readings, `(x+, x-, y+, y-, z+, z-)`
pub const PARAM_GRAVITY_READINGS: [&str; 6] = [
    "ACC_CAL_XP",
    "ACC_CAL_XN",
    "ACC_CAL_YP",
    "ACC_CAL_YN",
    "ACC_CAL_ZP",
    "ACC_CAL_ZN",
];

/// Accelerometer calibration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelCalibration {
    /// Accelerometer offset (m/s²)
    /// Subtracted from raw readings before scaling
    pub offset: Vector3<f32>,

    /// Accelerometer scale factors (dimensionless)
    /// Applied after offset removal (typically near 1.0)
    pub scale: Vector3<f32>,
}

impl Default for AccelCalibration {
    /// Identity calibration (uncalibrated sensor)
    fn default() -> Self {
        Self {
            offset: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl AccelCalibration {
    /// Derive offset and scale from six-face gravity readings
    ///
    /// # Formula
    ///
    /// ```text
    /// offset = (pos + neg) / 2
    /// scale  = g / ((pos - neg) / 2)
    /// ```
    ///
    /// Returns `None` if any axis span `pos - neg` is not a positive finite
    /// number, i.e. a face was captured upside down or not at all.
    pub fn from_readings(readings: &GravityReadings) -> Option<Self> {
        let (ox, sx) = axis_calibration(readings.x_pos, readings.x_neg)?;
        let (oy, sy) = axis_calibration(readings.y_pos, readings.y_neg)?;
        let (oz, sz) = axis_calibration(readings.z_pos, readings.z_neg)?;
        Some(Self {
            offset: Vector3::new(ox, oy, oz),
            scale: Vector3::new(sx, sy, sz),
        })
    }

    /// Apply calibration to raw reading
    ///
    /// ```text
    /// calibrated = (raw - offset) .* scale
    /// ```
    pub fn apply(&self, raw: Vector3<f32>) -> Vector3<f32> {
        (raw - self.offset).component_mul(&self.scale)
    }

    /// Check if calibration is non-identity
    pub fn is_calibrated(&self) -> bool {
        self.offset.norm() > 0.01 || (self.scale - Vector3::new(1.0, 1.0, 1.0)).norm() > 1e-3
    }
}

fn axis_calibration(pos: f32, neg: f32) -> Option<(f32, f32)> {
    let span = pos - neg;
    if !span.is_finite() || span <= 0.0 {
        return None;
    }
    let scale = GRAVITY / (span / 2.0);
    scale.is_finite().then_some(((pos + neg) / 2.0, scale))
}
