//! Sensor devices and shared sensor state

pub mod imu;
