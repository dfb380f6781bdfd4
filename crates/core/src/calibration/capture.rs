//! Gravity sample integration
//!
//! Averages one axis of the accelerometer over a fixed-cadence window while
//! the vehicle rests on a face. The task yields on every sample delay, so a
//! full window (2000 × 2.5 ms by default) never monopolizes the executor.

use super::orientation::CaptureTarget;
use super::traits::AccelSource;
use embedded_hal_async::delay::DelayNs;

/// Average `target.axis` over `sample_count` samples spaced `sample_period_us`
///
/// The full vector is read each time but only the target axis is
/// accumulated. `target.polarity` labels the face and does not enter the
/// arithmetic. Returns 0.0 when `sample_count` is zero.
pub async fn capture_gravity<S, D>(
    source: &mut S,
    delay: &mut D,
    target: CaptureTarget,
    sample_count: u32,
    sample_period_us: u32,
) -> f32
where
    S: AccelSource,
    D: DelayNs,
{
    if sample_count == 0 {
        return 0.0;
    }

    let mut sum = 0.0f32;
    for _ in 0..sample_count {
        let sample = source.read_filtered_accel();
        sum += target.axis.component(&sample);
        delay.delay_us(sample_period_us).await;
    }

    sum / sample_count as f32
}
