//! Motion quiescence detection
//!
//! Judges whether the operator has stopped repositioning the vehicle by
//! looking at the change between consecutive accelerometer samples, not at
//! deviation from a fixed rest vector.

use nalgebra::Vector3;

/// Result of feeding one sample to the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Inter-sample change exceeded the threshold
    Moving,
    /// Inter-sample change at or below the threshold
    Still,
}

/// Inter-sample motion detector
///
/// Owned by a single calibration session. The previous sample starts at the
/// zero vector, so the first real reading normally registers as motion.
#[derive(Debug, Clone)]
pub struct MotionDetector {
    threshold: f32,
    last_sample: Vector3<f32>,
    last_motion_us: u64,
}

impl MotionDetector {
    /// Create a detector whose settle timer starts at `now_us`
    pub fn new(threshold: f32, now_us: u64) -> Self {
        Self {
            threshold,
            last_sample: Vector3::zeros(),
            last_motion_us: now_us,
        }
    }

    /// Feed a sample taken at `now_us`
    ///
    /// Motion is declared when `|sample - previous| > threshold`; the motion
    /// timestamp moves to `now_us` only in that case. The stored previous
    /// sample is replaced on every call.
    pub fn update(&mut self, sample: Vector3<f32>, now_us: u64) -> Motion {
        let change = (sample - self.last_sample).norm();
        self.last_sample = sample;

        if change > self.threshold {
            self.last_motion_us = now_us;
            Motion::Moving
        } else {
            Motion::Still
        }
    }

    /// True once at least `settle_time_us` has elapsed since the last motion
    pub fn is_settled(&self, now_us: u64, settle_time_us: u64) -> bool {
        now_us.saturating_sub(self.last_motion_us) >= settle_time_us
    }

    /// Most recently fed sample
    pub fn last_sample(&self) -> Vector3<f32> {
        self.last_sample
    }

    /// Timestamp of the most recent detected motion
    pub fn last_motion_us(&self) -> u64 {
        self.last_motion_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f32 = 0.98;

    #[test]
    fn test_first_sample_from_zero_is_motion() {
        let mut detector = MotionDetector::new(THRESHOLD, 0);
        assert_eq!(
            detector.update(Vector3::new(0.0, 0.0, 9.8), 1_000),
            Motion::Moving
        );
        assert_eq!(detector.last_motion_us(), 1_000);
    }

    #[test]
    fn test_small_change_is_still() {
        let mut detector = MotionDetector::new(THRESHOLD, 0);
        detector.update(Vector3::new(0.0, 0.0, 9.8), 0);

        assert_eq!(
            detector.update(Vector3::new(0.5, 0.5, 9.8), 2_500),
            Motion::Still
        );
        // Still does not touch the motion timestamp
        assert_eq!(detector.last_motion_us(), 0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Binary-exact values so the norm lands exactly on the threshold
        let mut detector = MotionDetector::new(0.5, 0);
        detector.update(Vector3::new(1.0, 0.0, 0.0), 0);

        assert_eq!(
            detector.update(Vector3::new(1.5, 0.0, 0.0), 10),
            Motion::Still
        );
        assert_eq!(
            detector.update(Vector3::new(0.75, 0.0, 0.0), 20),
            Motion::Moving
        );
        assert_eq!(detector.last_motion_us(), 20);
    }

    #[test]
    fn test_delta_uses_euclidean_norm() {
        let mut detector = MotionDetector::new(THRESHOLD, 0);
        detector.update(Vector3::zeros(), 0);

        // Each component 0.6 < 0.98, but the norm ~1.04 > 0.98
        assert_eq!(
            detector.update(Vector3::new(0.6, 0.6, 0.6), 10),
            Motion::Moving
        );
    }

    #[test]
    fn test_previous_sample_always_replaced() {
        let mut detector = MotionDetector::new(THRESHOLD, 0);

        let a = Vector3::new(0.0, 0.0, 9.8);
        detector.update(a, 0);
        assert_eq!(detector.last_sample(), a);

        let b = Vector3::new(0.1, 0.0, 9.8);
        detector.update(b, 10);
        assert_eq!(detector.last_sample(), b);

        // Slow drift measured against the last sample, not the first one
        let c = Vector3::new(0.2, 0.0, 9.8);
        assert_eq!(detector.update(c, 20), Motion::Still);
        assert_eq!(detector.last_sample(), c);
    }

    #[test]
    fn test_settle_timer() {
        let mut detector = MotionDetector::new(THRESHOLD, 0);
        detector.update(Vector3::new(0.0, 0.0, 9.8), 1_000_000);

        assert!(!detector.is_settled(5_999_999, 5_000_000));
        assert!(detector.is_settled(6_000_000, 5_000_000));
        assert!(detector.is_settled(9_000_000, 5_000_000));

        detector.update(Vector3::new(9.8, 0.0, 0.0), 9_000_000);
        assert!(!detector.is_settled(9_000_000, 5_000_000));
    }

    #[test]
    fn test_settle_timer_starts_at_creation() {
        let detector = MotionDetector::new(THRESHOLD, 2_000_000);
        assert!(!detector.is_settled(6_999_999, 5_000_000));
        assert!(detector.is_settled(7_000_000, 5_000_000));
    }
}
