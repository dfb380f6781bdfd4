//! quadfc_core - Pure no_std flight-controller logic
//!
//! This crate contains platform-agnostic algorithms and types
//! that can be tested on host without any feature flags or embassy dependencies.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Platform services injected via traits
//!
//! # Modules
//!
//! - [`traits`]: Platform-agnostic trait abstractions (TimeSource)
//! - [`calibration`]: Six-face accelerometer calibration engine
//! - [`ahrs`]: Accelerometer offset/scale derivation
//! - [`parameters`]: Parameter store

#![no_std]

pub mod ahrs;
pub mod calibration;
pub mod parameters;
pub mod traits;
