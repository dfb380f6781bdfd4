//! Command Protocol Handler
//!
//! Handles COMMAND_LONG messages from ground control station.
//!
//! # Supported Commands
//!
//! - **MAV_CMD_PREFLIGHT_CALIBRATION**: accelerometer six-face calibration
//!   (`param5 == 1`); every other calibration type is unsupported
//!
//! # Command Flow
//!
//! 1. GCS sends COMMAND_LONG message
//! 2. CommandHandler validates command and parameters
//! 3. Handler queues the request with the calibration subsystem
//! 4. Handler returns COMMAND_ACK with result (ACCEPTED/TEMPORARILY_REJECTED/UNSUPPORTED)

use crate::communication::mavlink::status_notifier;
use crate::subsystems::calibration::{request_accel_calibration, CalibrationChannel};
use mavlink::common::{MavCmd, MavResult, COMMAND_ACK_DATA, COMMAND_LONG_DATA};

/// `param5` value selecting accelerometer calibration
const PARAM5_ACCEL_CALIBRATION: i32 = 1;

/// Command handler for COMMAND_LONG messages
#[derive(Default)]
pub struct CommandHandler {}

impl CommandHandler {
    /// Create a new command handler
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle COMMAND_LONG message from GCS
    ///
    /// Returns the COMMAND_ACK to send back. Calibration progress follows
    /// asynchronously as STATUSTEXT.
    pub fn handle_command_long(&mut self, cmd: &COMMAND_LONG_DATA) -> COMMAND_ACK_DATA {
        crate::log_debug!("Received COMMAND_LONG: command={}", cmd.command as u32);

        let result = match cmd.command {
            MavCmd::MAV_CMD_PREFLIGHT_CALIBRATION => self.handle_preflight_calibration(cmd),
            _ => {
                crate::log_warn!("Unsupported command: {}", cmd.command as u32);
                MavResult::MAV_RESULT_UNSUPPORTED
            }
        };

        COMMAND_ACK_DATA {
            command: cmd.command,
            result,
            progress: 0,         // MAVLink v2 extension
            result_param2: 0,    // MAVLink v2 extension
            target_system: 0,    // MAVLink v2 extension
            target_component: 0, // MAVLink v2 extension
        }
    }

    /// Handle MAV_CMD_PREFLIGHT_CALIBRATION command
    ///
    /// param1: gyro, param2: magnetometer, param3: ground pressure,
    /// param4: radio, param5: accelerometer (1 = full six-face),
    /// param6: compass/motor interference, param7: ESC/airspeed
    fn handle_preflight_calibration(&mut self, cmd: &COMMAND_LONG_DATA) -> MavResult {
        let others = [
            cmd.param1, cmd.param2, cmd.param3, cmd.param4, cmd.param6, cmd.param7,
        ];
        let accel_only = cmd.param5 as i32 == PARAM5_ACCEL_CALIBRATION
            && others.iter().all(|p| *p as i32 == 0);

        if !accel_only {
            crate::log_warn!(
                "Unsupported preflight calibration: p1={} p2={} p3={} p5={}",
                cmd.param1,
                cmd.param2,
                cmd.param3,
                cmd.param5
            );
            return MavResult::MAV_RESULT_UNSUPPORTED;
        }

        match request_accel_calibration(CalibrationChannel::Mavlink) {
            Ok(()) => {
                crate::log_info!("Accel calibration requested via MAVLink");
                MavResult::MAV_RESULT_ACCEPTED
            }
            Err(e) => {
                crate::log_warn!("Accel calibration rejected: {}", e.as_str());
                status_notifier::send_warning("[cal] calibration already in progress");
                MavResult::MAV_RESULT_TEMPORARILY_REJECTED
            }
        }
    }
}
