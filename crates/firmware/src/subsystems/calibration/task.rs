//! Embassy calibration task
//!
//! Waits for a request from either operator channel, runs one session on the
//! shared filtered accelerometer and releases the request slot.
//!
//! ```rust,ignore
//! static ACCEL: SharedFilteredAccel = SharedFilteredAccel::new(DEFAULT_ACCEL_LPF_ALPHA);
//! static PARAMS: Mutex<RefCell<ParameterStore>> = Mutex::new(RefCell::new(ParameterStore::new()));
//!
//! spawner.spawn(accel_calibration_task(&ACCEL, &PARAMS)).unwrap();
//! ```

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::{Delay, Duration, Timer};
use quadfc_core::parameters::ParameterStore;

use super::{
    finish_accel_calibration, mavlink_accel_calibration, shell_accel_calibration,
    take_pending_request, CalibrationChannel,
};
use crate::communication::shell::ConsoleOutput;
use crate::core::traits::EmbassyTime;
use crate::devices::imu::SharedFilteredAccel;
use crate::parameters::{accel_cal_config_from_store, ParameterStoreSink};

/// Request poll interval while idle
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Accelerometer calibration task
///
/// Runs forever; sessions execute one at a time in request order.
#[embassy_executor::task]
pub async fn accel_calibration_task(
    accel: &'static SharedFilteredAccel,
    store: &'static Mutex<RefCell<ParameterStore>>,
) {
    crate::log_info!("Accel calibration task started");

    loop {
        let Some(channel) = take_pending_request() else {
            Timer::after(IDLE_POLL).await;
            continue;
        };

        let config =
            critical_section::with(|cs| accel_cal_config_from_store(&store.borrow_ref(cs)));
        crate::log_info!(
            "Accel calibration session: channel={} samples={} settle_us={}",
            channel.as_str(),
            config.sample_count,
            config.settle_time_us
        );

        let mut sink = ParameterStoreSink::new(store);
        match channel {
            CalibrationChannel::Mavlink => {
                mavlink_accel_calibration(accel, Delay, EmbassyTime, config, &mut sink).await;
            }
            CalibrationChannel::Shell => {
                let mut console = ConsoleOutput;
                shell_accel_calibration(&mut console, accel, Delay, EmbassyTime, config, &mut sink)
                    .await;
            }
        }

        finish_accel_calibration();
    }
}
