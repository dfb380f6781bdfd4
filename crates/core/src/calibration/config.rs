//! Accelerometer calibration timing and thresholds

/// Tunables for a six-face accelerometer calibration session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelCalConfig {
    /// Samples averaged per face
    pub sample_count: u32,
    /// Delay between averaged samples (µs)
    pub sample_period_us: u32,
    /// Stillness required before a pose is classified (µs)
    pub settle_time_us: u64,
    /// Inter-sample change norm counted as motion (m/s²)
    pub motion_threshold: f32,
    /// Delay between orientation polls (µs)
    pub poll_period_us: u32,
}

impl AccelCalConfig {
    /// Samples averaged per face
    pub const DEFAULT_SAMPLE_COUNT: u32 = 2000;
    /// 400 Hz capture cadence
    pub const DEFAULT_SAMPLE_PERIOD_US: u32 = 2500;
    /// Five seconds of stillness
    pub const DEFAULT_SETTLE_TIME_US: u64 = 5_000_000;
    /// About 0.1 g
    pub const DEFAULT_MOTION_THRESHOLD: f32 = 0.98;
    /// Poll at the capture cadence
    pub const DEFAULT_POLL_PERIOD_US: u32 = 2500;
}

impl Default for AccelCalConfig {
    fn default() -> Self {
        Self {
            sample_count: Self::DEFAULT_SAMPLE_COUNT,
            sample_period_us: Self::DEFAULT_SAMPLE_PERIOD_US,
            settle_time_us: Self::DEFAULT_SETTLE_TIME_US,
            motion_threshold: Self::DEFAULT_MOTION_THRESHOLD,
            poll_period_us: Self::DEFAULT_POLL_PERIOD_US,
        }
    }
}
