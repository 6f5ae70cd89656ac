//! Gyro propagation runner
//!
//! Flies the configured body-rate profile twice at the configured sample
//! rate: once with the true rates (reference attitude) and once with the
//! modelled gyro measurements (propagated attitude), and reports the drift
//! between the two.

use acs_nav::math::{error_rotation_vector, from_euler, integrate, to_euler, EulerAngles};
use acs_nav::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, SimConfig};
use crate::sensors::GyroSensor;

/// Simulation errors
#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("propagated attitude became non-finite at step {step}")]
    NonFinite { step: usize },
}

/// Simulation output for one timestep
#[derive(Debug, Clone, Copy)]
pub struct SimStep {
    /// Step index (1-based: the state after `index` samples)
    pub index: usize,
    /// Simulation time [s]
    pub time: f32,
    /// Reference attitude from the true rates
    pub truth: Quat,
    /// Attitude propagated from gyro measurements
    pub estimate: Quat,
    /// Gyro measurement used for this step [rad/s]
    pub measured_rate: Vec3,
    /// Geodesic angle between truth and estimate [rad]
    pub drift: f32,
}

/// Decimated telemetry record, in degrees for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Simulation time [s]
    pub time: f32,
    /// Propagated attitude [deg]
    pub attitude_deg: EulerAngles,
    /// Drift from the reference attitude [deg]
    pub drift_deg: f32,
}

impl TelemetryRecord {
    fn from_step(step: &SimStep) -> Self {
        Self {
            time: step.time,
            attitude_deg: to_euler(&step.estimate).to_degrees(),
            drift_deg: step.drift.to_degrees(),
        }
    }
}

/// Summary of a complete run
#[derive(Debug, Clone)]
pub struct SimReport {
    /// Number of integration steps
    pub steps: usize,
    /// Simulated time [s]
    pub duration: f32,
    /// Final reference attitude
    pub final_truth: Quat,
    /// Final propagated attitude
    pub final_estimate: Quat,
    /// Final drift [rad]
    pub final_drift: f32,
    /// Largest drift seen over the run [rad]
    pub max_drift: f32,
    /// Decimated telemetry
    pub telemetry: Vec<TelemetryRecord>,
}

/// Fixed-rate gyro propagation simulator
#[derive(Debug, Clone)]
pub struct AttitudeSimulator {
    config: SimConfig,
    gyro: GyroSensor,
    /// Samples per segment
    segment_steps: Vec<usize>,
    segment: usize,
    segment_step: usize,
    step: usize,
    truth: Quat,
    estimate: Quat,
    warned: bool,
}

impl AttitudeSimulator {
    /// Create a simulator from a validated configuration
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let q0 = from_euler(
            config.initial_attitude.roll,
            config.initial_attitude.pitch,
            config.initial_attitude.yaw,
        );

        Ok(Self {
            gyro: GyroSensor::from_config(&config.gyro),
            segment_steps: config.segment_steps(),
            segment: 0,
            segment_step: 0,
            step: 0,
            truth: q0,
            estimate: q0,
            warned: false,
            config,
        })
    }

    /// Validated scenario configuration
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Reference attitude
    pub fn truth(&self) -> &Quat {
        &self.truth
    }

    /// Propagated attitude
    pub fn estimate(&self) -> &Quat {
        &self.estimate
    }

    /// Total number of steps in the scenario
    pub fn total_steps(&self) -> usize {
        self.segment_steps.iter().sum()
    }

    /// True once every segment has been flown
    pub fn is_finished(&self) -> bool {
        self.segment >= self.segment_steps.len()
    }

    /// Advance past exhausted (including zero-length) segments
    fn skip_finished_segments(&mut self) {
        while self.segment < self.segment_steps.len()
            && self.segment_step >= self.segment_steps[self.segment]
        {
            self.segment += 1;
            self.segment_step = 0;
        }
    }

    /// Run one integration step
    ///
    /// Returns `Ok(None)` once the scenario is complete.
    pub fn step(&mut self) -> Result<Option<SimStep>, SimError> {
        self.skip_finished_segments();
        if self.is_finished() {
            return Ok(None);
        }

        let dt = self.config.dt();
        let true_rate = self.config.segments[self.segment].angular_velocity;
        let measured_rate = self.gyro.measure(&true_rate);

        self.truth = integrate(&self.truth, &true_rate, dt);
        self.estimate = integrate(&self.estimate, &measured_rate, dt);

        self.segment_step += 1;
        self.step += 1;

        if !self.estimate.coords.iter().all(|c| c.is_finite()) {
            return Err(SimError::NonFinite { step: self.step });
        }

        let drift = error_rotation_vector(&self.truth, &self.estimate).norm();
        let warn_limit = self.config.telemetry.drift_warn_deg.to_radians();
        if !self.warned && drift > warn_limit {
            warn!(
                step = self.step,
                drift_deg = drift.to_degrees(),
                "attitude drift exceeded {:.2} deg",
                self.config.telemetry.drift_warn_deg
            );
            self.warned = true;
        }

        Ok(Some(SimStep {
            index: self.step,
            time: self.step as f32 * dt,
            truth: self.truth,
            estimate: self.estimate,
            measured_rate,
            drift,
        }))
    }

    /// Run the whole scenario
    pub fn run(&mut self) -> Result<SimReport, SimError> {
        info!(
            rate_hz = self.config.rate_hz,
            steps = self.total_steps(),
            segments = self.config.segments.len(),
            "starting gyro propagation"
        );

        let decimation = self.config.telemetry.decimation;
        let mut telemetry = Vec::new();
        let mut max_drift: f32 = 0.0;
        let mut final_drift = 0.0;
        let mut time = 0.0;

        while let Some(step) = self.step()? {
            max_drift = max_drift.max(step.drift);
            final_drift = step.drift;
            time = step.time;

            if step.index % decimation == 0 {
                let record = TelemetryRecord::from_step(&step);
                debug!(
                    time = record.time,
                    roll = record.attitude_deg.roll,
                    pitch = record.attitude_deg.pitch,
                    yaw = record.attitude_deg.yaw,
                    drift_deg = record.drift_deg,
                    "telemetry"
                );
                telemetry.push(record);
            }
        }

        info!(
            steps = self.step,
            final_drift_deg = final_drift.to_degrees(),
            max_drift_deg = max_drift.to_degrees(),
            "gyro propagation finished"
        );

        Ok(SimReport {
            steps: self.step,
            duration: time,
            final_truth: self.truth,
            final_estimate: self.estimate,
            final_drift,
            max_drift,
            telemetry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RateSegment;
    use approx::assert_relative_eq;

    fn single_segment(duration: f32, rate: Vec3) -> SimConfig {
        SimConfig {
            segments: vec![RateSegment::new(duration, rate)],
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimConfig {
            rate_hz: -1.0,
            ..Default::default()
        };

        assert!(matches!(
            AttitudeSimulator::new(config),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn test_step_count_and_time() {
        let mut sim = AttitudeSimulator::new(single_segment(0.25, Vec3::zeros())).unwrap();

        let report = sim.run().unwrap();

        assert_eq!(report.steps, 250);
        assert_relative_eq!(report.duration, 0.25, epsilon = 1e-5);
        assert!(sim.is_finished());
        assert!(sim.step().unwrap().is_none());
    }

    #[test]
    fn test_zero_length_segments_are_skipped() {
        let config = SimConfig {
            segments: vec![
                RateSegment::new(0.0, Vec3::new(5.0, 0.0, 0.0)),
                RateSegment::new(0.01, Vec3::new(0.0, 0.0, 1.0)),
                RateSegment::new(0.0, Vec3::new(0.0, 5.0, 0.0)),
            ],
            ..Default::default()
        };
        let mut sim = AttitudeSimulator::new(config).unwrap();

        let first = sim.step().unwrap().unwrap();
        assert_eq!(first.measured_rate, Vec3::new(0.0, 0.0, 1.0));

        let report = sim.run().unwrap();
        assert_eq!(report.steps, 10);
    }

    #[test]
    fn test_ideal_gyro_has_no_drift() {
        let mut sim = AttitudeSimulator::new(SimConfig::default()).unwrap();

        let report = sim.run().unwrap();

        assert!(report.max_drift < 1e-4);
        assert_eq!(report.final_truth, report.final_estimate);
    }

    #[test]
    fn test_telemetry_decimation() {
        let mut sim = AttitudeSimulator::new(single_segment(1.0, Vec3::zeros())).unwrap();

        let report = sim.run().unwrap();

        // 1000 steps, one record every 100
        assert_eq!(report.telemetry.len(), 10);
        assert_relative_eq!(report.telemetry[0].time, 0.1, epsilon = 1e-5);
    }

    #[test]
    fn test_initial_attitude_is_used() {
        let mut config = single_segment(0.1, Vec3::zeros());
        config.initial_attitude = EulerAngles::new(0.0, 0.0, 1.0);

        let sim = AttitudeSimulator::new(config).unwrap();

        assert_relative_eq!(sim.config().initial_attitude.yaw, 1.0);
        assert_relative_eq!(to_euler(sim.truth()).yaw, 1.0, epsilon = 1e-5);
        assert_eq!(sim.truth(), sim.estimate());
    }
}
