//! Six-face accelerometer calibration
//!
//! The operator places the vehicle on each of its six faces in any order.
//! A face is captured once the vehicle has been still for the settle time;
//! when all six gravity readings are in, the result is handed to a sink.
//!
//! - [`orientation`]: which face is down
//! - [`motion`]: quiescence detection between polls
//! - [`capture`]: per-face gravity averaging
//! - [`session`]: per-face completion tracking
//! - [`calibrator`]: the session state machine
//! - [`traits`]: sensor, notifier and sink seams

pub mod calibrator;
pub mod capture;
pub mod config;
pub mod motion;
pub mod orientation;
pub mod session;
pub mod traits;

pub use calibrator::{AccelCalibrator, StepOutcome};
pub use capture::capture_gravity;
pub use config::AccelCalConfig;
pub use motion::{Motion, MotionDetector};
pub use orientation::{classify_orientation, Axis, CaptureTarget, OrientationFace, Polarity};
pub use session::{CalibrationSession, GravityReadings};
pub use traits::{
    AccelCalibrationSink, AccelSource, CalibrationNotifier, MockAccelSource,
    CALIBRATION_DONE_TEXT, CALIBRATION_STARTED_TEXT,
};
