//! Accelerometer calibration subsystem
//!
//! Binds the six-face calibration engine from `quadfc_core` to the two
//! operator channels:
//!
//! - [`mavlink_accel_calibration`]: progress as STATUSTEXT, plain done message
//! - [`shell_accel_calibration`]: progress on the console, per-axis summary
//!
//! Requests from either channel go through the [`request`] slot so only one
//! session runs at a time. With the `embassy` feature, [`task`] provides the
//! task that waits for requests and runs the session.

pub mod request;
#[cfg(feature = "embassy")]
pub mod task;

pub use request::{
    calibration_slot_state, finish_accel_calibration, is_calibration_busy,
    request_accel_calibration, take_pending_request, CalibrationChannel, CalibrationRequestError,
    SlotState,
};

use embedded_hal_async::delay::DelayNs;
use embedded_io::Write;
use quadfc_core::calibration::{
    AccelCalConfig, AccelCalibrationSink, AccelCalibrator, AccelSource, GravityReadings,
};
use quadfc_core::traits::TimeSource;

use crate::communication::mavlink::StatusTextNotifier;
use crate::communication::shell::ConsoleNotifier;

/// Run one session reporting through STATUSTEXT
///
/// Returns after all six faces are captured and `sink` has been invoked.
pub async fn mavlink_accel_calibration<S, D, T, K>(
    source: S,
    delay: D,
    time: T,
    config: AccelCalConfig,
    sink: &mut K,
) -> GravityReadings
where
    S: AccelSource,
    D: DelayNs,
    T: TimeSource,
    K: AccelCalibrationSink,
{
    crate::log_info!("Accel calibration started (mavlink)");
    let mut notifier = StatusTextNotifier::new();
    let readings = AccelCalibrator::new(source, delay, time, config)
        .run(&mut notifier, sink)
        .await;
    log_readings(&readings);
    readings
}

/// Run one session reporting on `console`
///
/// Returns after all six faces are captured and `sink` has been invoked.
pub async fn shell_accel_calibration<W, S, D, T, K>(
    console: &mut W,
    source: S,
    delay: D,
    time: T,
    config: AccelCalConfig,
    sink: &mut K,
) -> GravityReadings
where
    W: Write,
    S: AccelSource,
    D: DelayNs,
    T: TimeSource,
    K: AccelCalibrationSink,
{
    crate::log_info!("Accel calibration started (shell)");
    let mut notifier = ConsoleNotifier::new(console);
    let readings = AccelCalibrator::new(source, delay, time, config)
        .run(&mut notifier, sink)
        .await;
    log_readings(&readings);
    readings
}

fn log_readings(readings: &GravityReadings) {
    crate::log_info!(
        "Accel calibration finished: x+={} x-={} y+={} y-={} z+={} z-={}",
        readings.x_pos,
        readings.x_neg,
        readings.y_pos,
        readings.y_neg,
        readings.z_pos,
        readings.z_neg
    );
}
