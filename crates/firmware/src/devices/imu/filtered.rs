//! Shared low-pass filtered accelerometer
//!
//! The IMU task publishes raw accelerometer samples; calibration and other
//! consumers read the latest filtered vector. Filtering is a first-order
//! low-pass `y += alpha * (x - y)`, seeded by the first sample.

use core::cell::Cell;
use critical_section::Mutex;
use nalgebra::Vector3;
use quadfc_core::calibration::AccelSource;

/// Default filter coefficient
pub const DEFAULT_ACCEL_LPF_ALPHA: f32 = 0.1;

#[derive(Clone, Copy)]
struct FilterState {
    value: Vector3<f32>,
    seeded: bool,
}

/// Filtered accelerometer shared between the IMU task and its readers
pub struct SharedFilteredAccel {
    alpha: f32,
    state: Mutex<Cell<FilterState>>,
}

impl SharedFilteredAccel {
    /// Create an empty filter
    ///
    /// `alpha` outside (0, 1] disables filtering (output follows input).
    pub const fn new(alpha: f32) -> Self {
        Self {
            alpha,
            state: Mutex::new(Cell::new(FilterState {
                value: Vector3::new(0.0, 0.0, 0.0),
                seeded: false,
            })),
        }
    }

    /// Feed one raw sample (m/s², body frame)
    pub fn publish(&self, raw: Vector3<f32>) {
        let alpha = if self.alpha > 0.0 && self.alpha <= 1.0 {
            self.alpha
        } else {
            1.0
        };
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            state.value = if state.seeded {
                state.value + (raw - state.value) * alpha
            } else {
                raw
            };
            state.seeded = true;
            cell.set(state);
        });
    }

    /// Latest filtered sample; zero before the first publish
    pub fn latest(&self) -> Vector3<f32> {
        critical_section::with(|cs| self.state.borrow(cs).get().value)
    }
}

impl Default for SharedFilteredAccel {
    fn default() -> Self {
        Self::new(DEFAULT_ACCEL_LPF_ALPHA)
    }
}

impl AccelSource for &SharedFilteredAccel {
    fn read_filtered_accel(&mut self) -> Vector3<f32> {
        self.latest()
    }
}
