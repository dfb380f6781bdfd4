//! Six-face accelerometer calibration session
//!
//! [`AccelCalibrator`] owns one session: the motion detector, the face
//! tracker and the injected sensor, delay and clock. Each poll walks the
//! state machine
//!
//! ```text
//! AWAITING_SETTLE --(still >= settle time)--> FACE_DETECTED
//!       ^                                          |
//!       |<----- unknown / already completed -------+
//!       |                                          |
//!       +<----------- capture + record ------------+
//!                                                  |
//!                         all six faces --> SESSION_COMPLETE
//! ```
//!
//! and suspends only on the poll cadence and the per-sample capture delay.
//! There is no timeout: [`AccelCalibrator::run`] returns only after all six
//! faces have been presented.

use core::fmt::Write;

use embedded_hal_async::delay::DelayNs;
use heapless::String;

use super::capture::capture_gravity;
use super::config::AccelCalConfig;
use super::motion::{Motion, MotionDetector};
use super::orientation::{classify_orientation, OrientationFace};
use super::session::{CalibrationSession, GravityReadings};
use super::traits::{
    AccelCalibrationSink, AccelSource, CalibrationNotifier, CALIBRATION_STARTED_TEXT,
};
use crate::traits::TimeSource;

/// Longest progress message is "[cal] front side done, rotate to a different side"
const MESSAGE_LEN: usize = 64;

/// What a single poll did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Sample differed from the previous one by more than the motion threshold
    Moving,
    /// Still, but not for long enough yet
    Settling,
    /// Settled on `Unknown` or on a face that is already completed
    Skipped(OrientationFace),
    /// Captured and recorded a new face
    Captured(OrientationFace, f32),
    /// All six faces recorded and committed to the sink
    Complete(GravityReadings),
}

/// Accelerometer calibration session driver
pub struct AccelCalibrator<S, D, T> {
    source: S,
    delay: D,
    time: T,
    config: AccelCalConfig,
    detector: MotionDetector,
    session: CalibrationSession,
    committed: Option<GravityReadings>,
}

impl<S, D, T> AccelCalibrator<S, D, T>
where
    S: AccelSource,
    D: DelayNs,
    T: TimeSource,
{
    /// Start a new session; the settle timer starts now
    pub fn new(source: S, delay: D, time: T, config: AccelCalConfig) -> Self {
        let detector = MotionDetector::new(config.motion_threshold, time.now_us());
        Self {
            source,
            delay,
            time,
            config,
            detector,
            session: CalibrationSession::new(),
            committed: None,
        }
    }

    /// Face tracker for this session
    pub fn session(&self) -> &CalibrationSession {
        &self.session
    }

    /// Motion detector state for this session
    pub fn detector(&self) -> &MotionDetector {
        &self.detector
    }

    /// Session configuration
    pub fn config(&self) -> &AccelCalConfig {
        &self.config
    }

    /// True once the result has been committed to a sink
    pub fn is_complete(&self) -> bool {
        self.committed.is_some()
    }

    /// Run the session to completion
    ///
    /// Sends the start message, then polls at `poll_period_us` until all six
    /// faces are captured. The sink is invoked exactly once, right after the
    /// final message.
    pub async fn run<N, K>(mut self, notifier: &mut N, sink: &mut K) -> GravityReadings
    where
        N: CalibrationNotifier,
        K: AccelCalibrationSink,
    {
        notifier.notify(CALIBRATION_STARTED_TEXT);

        loop {
            if let StepOutcome::Complete(readings) = self.step(notifier, sink).await {
                return readings;
            }
            self.delay.delay_us(self.config.poll_period_us).await;
        }
    }

    /// Poll the sensor once and advance the state machine
    ///
    /// Captures block this call for the full capture window. When the sixth
    /// face is recorded the final message is sent and the sink is invoked;
    /// later calls keep returning `Complete` without touching either again.
    pub async fn step<N, K>(&mut self, notifier: &mut N, sink: &mut K) -> StepOutcome
    where
        N: CalibrationNotifier,
        K: AccelCalibrationSink,
    {
        if let Some(readings) = self.committed {
            return StepOutcome::Complete(readings);
        }

        let sample = self.source.read_filtered_accel();
        let now_us = self.time.now_us();

        if self.detector.update(sample, now_us) == Motion::Moving {
            return StepOutcome::Moving;
        }
        if !self.detector.is_settled(now_us, self.config.settle_time_us) {
            return StepOutcome::Settling;
        }

        let face = classify_orientation(&sample);
        let Some(target) = face.capture_target() else {
            return StepOutcome::Skipped(face);
        };
        if self.session.is_completed(face) {
            return StepOutcome::Skipped(face);
        }

        notifier.notify(&face_message(face, "orientation detected"));
        let value = capture_gravity(
            &mut self.source,
            &mut self.delay,
            target,
            self.config.sample_count,
            self.config.sample_period_us,
        )
        .await;
        notifier.notify(&face_message(face, "side done, rotate to a different side"));
        self.session.record(face, value);

        match self.session.readings() {
            Some(readings) => {
                notifier.notify_complete(&readings);
                sink.apply_accel_calibration(&readings);
                self.committed = Some(readings);
                StepOutcome::Complete(readings)
            }
            None => StepOutcome::Captured(face, value),
        }
    }
}

fn face_message(face: OrientationFace, suffix: &str) -> String<MESSAGE_LEN> {
    let mut text = String::new();
    let _ = write!(text, "[cal] {} {}", face.as_str(), suffix);
    text
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::calibration::traits::{MockAccelSource, CALIBRATION_DONE_TEXT};
    use core::cell::RefCell;
    use crate::traits::{MockDelay, MockTime};
    use embassy_futures::block_on;
    use nalgebra::Vector3;
    use std::string::{String as StdString, ToString};
    use std::vec::Vec;

    const G: f32 = 9.80665;

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Vec<StdString>,
    }

    impl CalibrationNotifier for RecordingNotifier {
        fn notify(&mut self, text: &str) {
            self.messages.push(text.to_string());
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<GravityReadings>,
    }

    impl AccelCalibrationSink for RecordingSink {
        fn apply_accel_calibration(&mut self, readings: &GravityReadings) {
            self.calls.push(*readings);
        }
    }

    /// Pose schedule: each entry holds from its start time until the next one
    struct PoseScript<'a> {
        time: &'a MockTime,
        poses: &'a [(u64, Vector3<f32>)],
    }

    impl AccelSource for PoseScript<'_> {
        fn read_filtered_accel(&mut self) -> Vector3<f32> {
            let now = self.time.now_us();
            self.poses
                .iter()
                .rev()
                .find(|(start, _)| *start <= now)
                .map(|(_, pose)| *pose)
                .unwrap_or_else(Vector3::zeros)
        }
    }

    /// Poll `steps` times at the default cadence without the run loop
    fn poll_for<S: AccelSource>(
        calibrator: &mut AccelCalibrator<S, MockDelay<'_>, &MockTime>,
        time: &MockTime,
        notifier: &mut RecordingNotifier,
        sink: &mut RecordingSink,
        steps: usize,
    ) -> Vec<StepOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..steps {
            outcomes.push(block_on(calibrator.step(notifier, sink)));
            time.advance(2_500);
        }
        outcomes
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_full_session_end_to_end() {
        let time = MockTime::new();
        let poses = [
            (0, Vector3::new(-G, 0.1, 0.2)),                // front
            (20_000_000, Vector3::new(9.75, -0.1, 0.2)),    // back
            (40_000_000, Vector3::new(0.1, 0.2, 9.9)),      // up
            (60_000_000, Vector3::new(0.1, -0.2, -9.7)),    // down
            (80_000_000, Vector3::new(0.3, 9.85, 0.1)),     // left
            (100_000_000, Vector3::new(-0.3, -9.76, -0.1)), // right
        ];
        let source = PoseScript {
            time: &time,
            poses: &poses,
        };
        let calibrator = AccelCalibrator::new(
            source,
            MockDelay::new(&time),
            &time,
            AccelCalConfig::default(),
        );
        let mut notifier = RecordingNotifier::default();
        let mut sink = RecordingSink::default();

        let readings = block_on(calibrator.run(&mut notifier, &mut sink));

        assert_close(readings.x_pos, 9.75);
        assert_close(readings.x_neg, -G);
        assert_close(readings.y_pos, 9.85);
        assert_close(readings.y_neg, -9.76);
        assert_close(readings.z_pos, 9.9);
        assert_close(readings.z_neg, -9.7);

        assert_eq!(sink.calls.len(), 1);
        assert_eq!(sink.calls[0], readings);

        let expected = [
            "[cal] calibration started: 2 accel",
            "[cal] front orientation detected",
            "[cal] front side done, rotate to a different side",
            "[cal] back orientation detected",
            "[cal] back side done, rotate to a different side",
            "[cal] up orientation detected",
            "[cal] up side done, rotate to a different side",
            "[cal] down orientation detected",
            "[cal] down side done, rotate to a different side",
            "[cal] left orientation detected",
            "[cal] left side done, rotate to a different side",
            "[cal] right orientation detected",
            "[cal] right side done, rotate to a different side",
            CALIBRATION_DONE_TEXT,
        ];
        assert_eq!(notifier.messages, expected);

        // Last face settled at 105 s and captured for 5 s
        assert_eq!(time.now_us(), 110_000_000);
    }

    #[test]
    fn test_capture_waits_for_settle_time() {
        let time = MockTime::new();
        let source = MockAccelSource::constant(Vector3::new(-G, 0.0, 0.0));
        let mut calibrator = AccelCalibrator::new(
            source,
            MockDelay::new(&time),
            &time,
            AccelCalConfig::default(),
        );
        let mut notifier = RecordingNotifier::default();
        let mut sink = RecordingSink::default();

        // First sample jumps from the zero vector
        let first = poll_for(&mut calibrator, &time, &mut notifier, &mut sink, 1);
        assert_eq!(first, [StepOutcome::Moving]);

        // 2.5 ms .. 4.9975 s: still, but not long enough
        let settling = poll_for(&mut calibrator, &time, &mut notifier, &mut sink, 1999);
        assert!(settling.iter().all(|o| *o == StepOutcome::Settling));
        assert!(notifier.messages.is_empty());

        // Exactly 5 s after the motion the face is captured
        assert_eq!(time.now_us(), 5_000_000);
        let captured = poll_for(&mut calibrator, &time, &mut notifier, &mut sink, 1);
        match captured[0] {
            StepOutcome::Captured(face, value) => {
                assert_eq!(face, OrientationFace::Front);
                assert_close(value, -G);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(calibrator.session().is_completed(OrientationFace::Front));
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_completed_face_is_skipped_without_messages() {
        let time = MockTime::new();
        let source = MockAccelSource::constant(Vector3::new(-G, 0.0, 0.0));
        let mut calibrator = AccelCalibrator::new(
            source,
            MockDelay::new(&time),
            &time,
            AccelCalConfig::default(),
        );
        let mut notifier = RecordingNotifier::default();
        let mut sink = RecordingSink::default();

        // Hold the front face for ~30 s of polls
        let outcomes = poll_for(&mut calibrator, &time, &mut notifier, &mut sink, 8000);

        assert_eq!(
            notifier.messages,
            [
                "[cal] front orientation detected",
                "[cal] front side done, rotate to a different side",
            ]
        );
        let captures = outcomes
            .iter()
            .filter(|o| matches!(o, StepOutcome::Captured(..)))
            .count();
        assert_eq!(captures, 1);
        assert_eq!(
            outcomes.last(),
            Some(&StepOutcome::Skipped(OrientationFace::Front))
        );
        assert_eq!(calibrator.session().completed_count(), 1);
    }

    #[test]
    fn test_ambiguous_pose_stalls_without_progress() {
        let time = MockTime::new();
        let source = MockAccelSource::constant(Vector3::new(6.9, -6.9, 0.5));
        let mut calibrator = AccelCalibrator::new(
            source,
            MockDelay::new(&time),
            &time,
            AccelCalConfig::default(),
        );
        let mut notifier = RecordingNotifier::default();
        let mut sink = RecordingSink::default();

        let outcomes = poll_for(&mut calibrator, &time, &mut notifier, &mut sink, 6000);

        assert!(notifier.messages.is_empty());
        assert!(sink.calls.is_empty());
        assert_eq!(calibrator.session().completed_count(), 0);
        assert_eq!(
            outcomes.last(),
            Some(&StepOutcome::Skipped(OrientationFace::Unknown))
        );
    }

    #[test]
    fn test_motion_rearms_settle_timer() {
        let time = MockTime::new();
        let up = Vector3::new(0.0, 0.0, G);
        let tilted = Vector3::new(2.0, 0.0, G);
        let source = MockAccelSource::constant(up);
        let mut calibrator = AccelCalibrator::new(
            source,
            MockDelay::new(&time),
            &time,
            AccelCalConfig::default(),
        );
        let mut notifier = RecordingNotifier::default();
        let mut sink = RecordingSink::default();

        poll_for(&mut calibrator, &time, &mut notifier, &mut sink, 1000);
        assert_eq!(calibrator.detector().last_motion_us(), 0);

        // Operator bumps the vehicle at 2.5 s
        let bump_at = time.now_us();
        calibrator.source.set_default_sample(tilted);
        let bumped = poll_for(&mut calibrator, &time, &mut notifier, &mut sink, 1);
        assert_eq!(bumped, [StepOutcome::Moving]);
        assert_eq!(calibrator.detector().last_motion_us(), bump_at);

        calibrator.source.set_default_sample(up);
        let back = poll_for(&mut calibrator, &time, &mut notifier, &mut sink, 1);
        assert_eq!(back, [StepOutcome::Moving]);

        // 5 s after the last motion, not after the first
        let settle_from = bump_at + 2_500;
        let steps_to_settle = ((settle_from + 5_000_000 - time.now_us()) / 2_500) as usize;
        let waiting = poll_for(&mut calibrator, &time, &mut notifier, &mut sink, steps_to_settle);
        assert!(waiting.iter().all(|o| *o == StepOutcome::Settling));

        let captured = poll_for(&mut calibrator, &time, &mut notifier, &mut sink, 1);
        assert!(matches!(
            captured[0],
            StepOutcome::Captured(OrientationFace::Up, _)
        ));
    }

    #[test]
    fn test_five_faces_never_commit() {
        let time = MockTime::new();
        let poses = [
            (0, Vector3::new(-G, 0.0, 0.0)),
            (20_000_000, Vector3::new(G, 0.0, 0.0)),
            (40_000_000, Vector3::new(0.0, 0.0, G)),
            (60_000_000, Vector3::new(0.0, 0.0, -G)),
            (80_000_000, Vector3::new(0.0, G, 0.0)),
            // Back to front instead of presenting right
            (100_000_000, Vector3::new(-G, 0.0, 0.0)),
        ];
        let source = PoseScript {
            time: &time,
            poses: &poses,
        };
        let mut calibrator = AccelCalibrator::new(
            source,
            MockDelay::new(&time),
            &time,
            AccelCalConfig::default(),
        );
        let mut notifier = RecordingNotifier::default();
        let mut sink = RecordingSink::default();

        // 130 s of polling, captures included
        while time.now_us() < 130_000_000 {
            let outcome = block_on(calibrator.step(&mut notifier, &mut sink));
            assert!(!matches!(outcome, StepOutcome::Complete(_)));
            time.advance(2_500);
        }

        assert_eq!(calibrator.session().completed_count(), 5);
        assert!(!calibrator.session().is_completed(OrientationFace::Right));
        assert!(sink.calls.is_empty());
        assert!(!calibrator.is_complete());
        assert_eq!(notifier.messages.len(), 10);
    }

    #[test]
    fn test_commit_happens_once() {
        let time = MockTime::new();
        let poses = [
            (0, Vector3::new(-G, 0.0, 0.0)),
            (20_000_000, Vector3::new(G, 0.0, 0.0)),
            (40_000_000, Vector3::new(0.0, 0.0, G)),
            (60_000_000, Vector3::new(0.0, 0.0, -G)),
            (80_000_000, Vector3::new(0.0, G, 0.0)),
            (100_000_000, Vector3::new(0.0, -G, 0.0)),
        ];
        let source = PoseScript {
            time: &time,
            poses: &poses,
        };
        let mut calibrator = AccelCalibrator::new(
            source,
            MockDelay::new(&time),
            &time,
            AccelCalConfig::default(),
        );
        let mut notifier = RecordingNotifier::default();
        let mut sink = RecordingSink::default();

        let mut completions = 0;
        while time.now_us() < 130_000_000 {
            if let StepOutcome::Complete(_) =
                block_on(calibrator.step(&mut notifier, &mut sink))
            {
                completions += 1;
            }
            time.advance(2_500);
        }

        assert!(calibrator.is_complete());
        assert!(completions > 1);
        assert_eq!(sink.calls.len(), 1);
        assert_eq!(
            notifier
                .messages
                .iter()
                .filter(|m| m.as_str() == CALIBRATION_DONE_TEXT)
                .count(),
            1
        );
        assert_eq!(notifier.messages.last().map(|m| m.as_str()), Some(CALIBRATION_DONE_TEXT));
    }

    /// Notifier and sink events recorded in one timeline
    #[derive(Debug, PartialEq)]
    enum Event {
        Message(StdString),
        Commit(GravityReadings),
    }

    struct TimelineNotifier<'a> {
        events: &'a RefCell<Vec<Event>>,
    }

    impl CalibrationNotifier for TimelineNotifier<'_> {
        fn notify(&mut self, text: &str) {
            self.events.borrow_mut().push(Event::Message(text.to_string()));
        }
    }

    #[test]
    fn test_sink_invoked_after_final_message() {
        let time = MockTime::new();
        let poses = [
            (0, Vector3::new(0.0, 0.0, G)),
            (20_000_000, Vector3::new(0.0, 0.0, -G)),
            (40_000_000, Vector3::new(-G, 0.0, 0.0)),
            (60_000_000, Vector3::new(G, 0.0, 0.0)),
            (80_000_000, Vector3::new(0.0, G, 0.0)),
            (100_000_000, Vector3::new(0.0, -G, 0.0)),
        ];
        let source = PoseScript {
            time: &time,
            poses: &poses,
        };
        let calibrator = AccelCalibrator::new(
            source,
            MockDelay::new(&time),
            &time,
            AccelCalConfig::default(),
        );
        let events = RefCell::new(Vec::new());
        let mut notifier = TimelineNotifier { events: &events };
        let mut sink = |r: &GravityReadings| events.borrow_mut().push(Event::Commit(*r));

        let readings = block_on(calibrator.run(&mut notifier, &mut sink));

        let events = events.into_inner();
        assert_eq!(events.len(), 15);
        assert_eq!(
            events[13],
            Event::Message(CALIBRATION_DONE_TEXT.to_string())
        );
        assert_eq!(events[14], Event::Commit(readings));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, Event::Commit(_)))
                .count(),
            1
        );
    }
}
