//! ACS Navigation Simulation Harness
//!
//! Fixed-rate gyro propagation on top of the `acs-nav` attitude algebra.
//!
//! A scenario is a sequence of constant body-rate segments. Each step feeds
//! the true rate through a gyroscope model (bias + white noise) and
//! propagates two attitudes with [`acs_nav::math::integrate`]: the reference
//! from the true rate and the estimate from the measured one. The geodesic
//! angle between them is the drift.
//!
//! # Components
//!
//! - [`config`]: YAML scenario configuration and validation
//! - [`sensors`]: Gyroscope error model
//! - [`simulator`]: Step loop, telemetry and run summary

pub mod config;
pub mod sensors;
pub mod simulator;

// Re-exports
pub use config::{ConfigError, SimConfig};
pub use sensors::GyroSensor;
pub use simulator::{AttitudeSimulator, SimError, SimReport, TelemetryRecord};
