//! Calibration request slot
//!
//! One global slot arbitrates between the telemetry and console triggers:
//! at most one accelerometer calibration is pending or running at a time.
//!
//! ```text
//! Idle --request--> Pending(ch) --take--> Running(ch) --finish--> Idle
//! ```

use core::cell::Cell;
use critical_section::Mutex;

/// Operator channel that requested a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationChannel {
    /// MAV_CMD_PREFLIGHT_CALIBRATION, progress via STATUSTEXT
    Mavlink,
    /// `acc_calib` console command, progress on the console
    Shell,
}

impl CalibrationChannel {
    /// Channel name (usable with defmt on embedded)
    pub fn as_str(&self) -> &'static str {
        match self {
            CalibrationChannel::Mavlink => "mavlink",
            CalibrationChannel::Shell => "shell",
        }
    }
}

/// State of the request slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Idle,
    Pending(CalibrationChannel),
    Running(CalibrationChannel),
}

/// Errors from [`request_accel_calibration`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationRequestError {
    /// A session is already pending or running
    Busy,
}

impl CalibrationRequestError {
    /// Return variant name as a static string (usable with defmt on embedded)
    pub fn as_str(&self) -> &'static str {
        match self {
            CalibrationRequestError::Busy => "Busy",
        }
    }
}

impl core::fmt::Display for CalibrationRequestError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CalibrationRequestError::Busy => write!(f, "calibration already in progress"),
        }
    }
}

static SLOT: Mutex<Cell<SlotState>> = Mutex::new(Cell::new(SlotState::Idle));

/// Ask the calibration task to start a session for `channel`
pub fn request_accel_calibration(
    channel: CalibrationChannel,
) -> Result<(), CalibrationRequestError> {
    critical_section::with(|cs| {
        let slot = SLOT.borrow(cs);
        match slot.get() {
            SlotState::Idle => {
                slot.set(SlotState::Pending(channel));
                Ok(())
            }
            _ => Err(CalibrationRequestError::Busy),
        }
    })
}

/// Claim a pending request; the slot stays busy until [`finish_accel_calibration`]
pub fn take_pending_request() -> Option<CalibrationChannel> {
    critical_section::with(|cs| {
        let slot = SLOT.borrow(cs);
        match slot.get() {
            SlotState::Pending(channel) => {
                slot.set(SlotState::Running(channel));
                Some(channel)
            }
            _ => None,
        }
    })
}

/// Release the slot after a session has finished
pub fn finish_accel_calibration() {
    critical_section::with(|cs| SLOT.borrow(cs).set(SlotState::Idle));
}

/// Current slot state
pub fn calibration_slot_state() -> SlotState {
    critical_section::with(|cs| SLOT.borrow(cs).get())
}

/// True while a session is pending or running
pub fn is_calibration_busy() -> bool {
    calibration_slot_state() != SlotState::Idle
}
