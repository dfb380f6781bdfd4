//! Time abstraction traits for platform-agnostic timing operations.
//!
//! This module provides the `TimeSource` trait that abstracts over different
//! time providers (Embassy, mock, etc.) and a `MockDelay` that drives a
//! `MockTime` forward, so delay-paced routines can run on the host without an
//! executor timer.

use core::cell::Cell;
use embedded_hal_async::delay::DelayNs;

/// Platform-agnostic time source for control loops and timing.
///
/// This trait abstracts over different time providers:
/// - `EmbassyTime` (in firmware crate) for embedded targets using Embassy
/// - `MockTime` for host testing with controllable time
///
/// # Example
///
/// ```
/// use quadfc_core::traits::{MockTime, TimeSource};
///
/// fn settled<T: TimeSource>(time: &T, last_motion_us: u64) -> bool {
///     time.elapsed_since(last_motion_us) >= 5_000_000
/// }
///
/// let time = MockTime::with_initial(6_000_000);
/// assert!(settled(&time, 0));
/// ```
pub trait TimeSource: Clone + Send + Sync {
    /// Returns current time in milliseconds since system start.
    fn now_ms(&self) -> u64;

    /// Returns current time in microseconds since system start.
    fn now_us(&self) -> u64;

    /// Returns elapsed time in microseconds since a reference point.
    ///
    /// Uses saturating subtraction to handle potential overflow.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

/// A shared reference to a time source is itself a time source.
///
/// Lets a test hand the same `MockTime` to both the code under test and a
/// `MockDelay`.
impl<T: TimeSource> TimeSource for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock time source for testing with controllable time advancement.
///
/// # Example
///
/// ```
/// use quadfc_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// assert_eq!(time.now_us(), 0);
///
/// time.advance(1000); // Advance 1ms
/// assert_eq!(time.now_us(), 1000);
/// assert_eq!(time.now_ms(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

// Safety: MockTime is only used in single-threaded test contexts
// where Cell is safe. The Send+Sync bounds on TimeSource trait
// are required for embedded contexts, but MockTime is not used there.
unsafe impl Send for MockTime {}
unsafe impl Sync for MockTime {}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: Cell::new(us),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.current_us.get() / 1000
    }

    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}

/// Async delay that completes immediately and advances a `MockTime`.
///
/// Every awaited delay moves the shared clock forward by exactly the requested
/// duration, which makes delay-paced loops fully deterministic on the host.
pub struct MockDelay<'a> {
    time: &'a MockTime,
    calls: u32,
}

impl<'a> MockDelay<'a> {
    /// Creates a delay bound to the given clock.
    pub fn new(time: &'a MockTime) -> Self {
        Self { time, calls: 0 }
    }

    /// Number of delays awaited so far.
    pub fn calls(&self) -> u32 {
        self.calls
    }
}

impl DelayNs for MockDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.time.advance(u64::from(ns) / 1000);
    }

    async fn delay_us(&mut self, us: u32) {
        self.calls += 1;
        self.time.advance(u64::from(us));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.time.advance(u64::from(ms) * 1000);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
