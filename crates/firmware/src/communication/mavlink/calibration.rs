//! Calibration progress over MAVLink
//!
//! Forwards calibration messages to the STATUSTEXT queue at INFO severity.
//! Ground stations key their calibration UI on the `[cal] ` prefix, so the
//! text is passed through unchanged.

use super::status_notifier;
use quadfc_core::calibration::CalibrationNotifier;

/// Calibration notifier bound to the STATUSTEXT queue
#[derive(Debug, Default, Clone, Copy)]
pub struct StatusTextNotifier;

impl StatusTextNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl CalibrationNotifier for StatusTextNotifier {
    fn notify(&mut self, text: &str) {
        crate::log_info!("{}", text);
        status_notifier::send_info(text);
    }
}
