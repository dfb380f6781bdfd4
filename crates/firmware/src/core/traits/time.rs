//! Embassy time source
//!
//! The `TimeSource` trait and its mocks live in `quadfc_core`; this module
//! adds the implementation backed by the Embassy time driver.

pub use quadfc_core::traits::time::{MockDelay, MockTime, TimeSource};

/// Embassy-based time source using the Embassy time driver.
///
/// Pair with `embassy_time::Delay` for the calibration poll and capture
/// delays so both read the same clock.
#[cfg(feature = "embassy")]
#[derive(Clone, Copy, Default)]
pub struct EmbassyTime;

#[cfg(feature = "embassy")]
impl TimeSource for EmbassyTime {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }

    fn now_us(&self) -> u64 {
        embassy_time::Instant::now().as_micros()
    }
}
