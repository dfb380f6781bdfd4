//! Collaborator traits for the accelerometer calibration engine
//!
//! The engine reads samples through [`AccelSource`], reports progress through
//! [`CalibrationNotifier`] and hands its result to [`AccelCalibrationSink`].
//! Each is called only from the single task running the session.

use super::session::GravityReadings;
use nalgebra::Vector3;

/// Message sent when a session starts
pub const CALIBRATION_STARTED_TEXT: &str = "[cal] calibration started: 2 accel";

/// Message sent when all six faces are captured
pub const CALIBRATION_DONE_TEXT: &str = "[cal] calibration done: accel";

/// Source of filtered accelerometer samples (m/s², body frame)
pub trait AccelSource {
    /// Latest filtered sample. Always succeeds.
    fn read_filtered_accel(&mut self) -> Vector3<f32>;
}

/// Operator-facing progress channel
pub trait CalibrationNotifier {
    /// Emit one progress message. Fire-and-forget.
    fn notify(&mut self, text: &str);

    /// Emit the final message once all faces are captured
    ///
    /// Bindings that can show more detail override this; the call sequence
    /// seen by the engine is the same either way.
    fn notify_complete(&mut self, readings: &GravityReadings) {
        let _ = readings;
        self.notify(CALIBRATION_DONE_TEXT);
    }
}

/// Consumer of the committed calibration result
pub trait AccelCalibrationSink {
    /// Apply or persist the six gravity readings. Called once per session.
    fn apply_accel_calibration(&mut self, readings: &GravityReadings);
}

impl<F> AccelCalibrationSink for F
where
    F: FnMut(&GravityReadings),
{
    fn apply_accel_calibration(&mut self, readings: &GravityReadings) {
        self(readings)
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock accelerometer with a queue of preset samples
///
/// Returns queued samples in order, then the default sample forever.
pub struct MockAccelSource {
    samples: heapless::Deque<Vector3<f32>, 64>,
    default_sample: Vector3<f32>,
    reads: u32,
}

impl MockAccelSource {
    /// Mock that always returns `sample`
    pub fn constant(sample: Vector3<f32>) -> Self {
        Self {
            samples: heapless::Deque::new(),
            default_sample: sample,
            reads: 0,
        }
    }

    /// Mock returning `samples` first (up to 64), then `default_sample`
    pub fn with_samples(samples: &[Vector3<f32>], default_sample: Vector3<f32>) -> Self {
        let mut queue = heapless::Deque::new();
        for sample in samples.iter().take(64) {
            let _ = queue.push_back(*sample);
        }
        Self {
            samples: queue,
            default_sample,
            reads: 0,
        }
    }

    /// Change the sample returned once the queue is empty
    pub fn set_default_sample(&mut self, sample: Vector3<f32>) {
        self.default_sample = sample;
    }

    /// Number of reads served
    pub fn reads(&self) -> u32 {
        self.reads
    }
}

impl AccelSource for MockAccelSource {
    fn read_filtered_accel(&mut self) -> Vector3<f32> {
        self.reads += 1;
        self.samples.pop_front().unwrap_or(self.default_sample)
    }
}
