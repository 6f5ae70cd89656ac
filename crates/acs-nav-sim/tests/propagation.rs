//! Gyro Propagation Scenarios
//!
//! End-to-end runs of the simulation harness against closed-form results.

use approx::assert_relative_eq;
use std::f32::consts::FRAC_PI_2;

use acs_nav::math::{error_rotation_vector, from_euler, to_euler};
use acs_nav::Vec3;
use acs_nav_sim::config::{GyroConfig, RateSegment};
use acs_nav_sim::{AttitudeSimulator, ConfigError, SimConfig, SimError};

const TOL_DEG: f32 = 0.1 * std::f32::consts::PI / 180.0;

fn scenario(segments: Vec<RateSegment>, gyro: GyroConfig) -> SimConfig {
    SimConfig {
        segments,
        gyro,
        ..Default::default()
    }
}

#[test]
fn test_constant_yaw_rate_reaches_quarter_turn() {
    let config = scenario(
        vec![RateSegment::new(1.0, Vec3::new(0.0, 0.0, FRAC_PI_2))],
        GyroConfig::default(),
    );
    let mut sim = AttitudeSimulator::new(config).unwrap();

    let report = sim.run().unwrap();
    let euler = to_euler(&report.final_estimate);

    assert_eq!(report.steps, 1000);
    assert_relative_eq!(euler.yaw, FRAC_PI_2, epsilon = TOL_DEG);
    assert_relative_eq!(euler.roll, 0.0, epsilon = TOL_DEG);
    assert_relative_eq!(euler.pitch, 0.0, epsilon = TOL_DEG);
}

#[test]
fn test_default_scenario_composes_in_body_frame() {
    // 90° yaw, hold, then 20° about the new body x axis
    let mut sim = AttitudeSimulator::new(SimConfig::default()).unwrap();

    let report = sim.run().unwrap();
    let expected = from_euler(20f32.to_radians(), 0.0, 90f32.to_radians());

    assert!(error_rotation_vector(&expected, &report.final_truth).norm() < TOL_DEG);
    assert_relative_eq!(report.duration, 2.5, epsilon = 1e-4);
    assert_eq!(report.telemetry.len(), 25);
}

#[test]
fn test_gyro_bias_drifts_linearly() {
    let bias = 0.01;
    let config = scenario(
        vec![RateSegment::new(2.0, Vec3::zeros())],
        GyroConfig {
            bias: Vec3::new(0.0, 0.0, bias),
            ..Default::default()
        },
    );
    let mut sim = AttitudeSimulator::new(config).unwrap();

    let report = sim.run().unwrap();

    assert_relative_eq!(report.final_drift, bias * 2.0, epsilon = 1e-4);
    assert_relative_eq!(report.max_drift, report.final_drift, epsilon = 1e-6);

    // Drift grows monotonically through the run
    for pair in report.telemetry.windows(2) {
        assert!(pair[1].drift_deg > pair[0].drift_deg);
    }
}

#[test]
fn test_bias_along_rotation_axis_while_turning() {
    let bias = 0.005;
    let config = scenario(
        vec![RateSegment::new(1.0, Vec3::new(0.0, 0.0, 1.0))],
        GyroConfig {
            bias: Vec3::new(0.0, 0.0, bias),
            ..Default::default()
        },
    );
    let mut sim = AttitudeSimulator::new(config).unwrap();

    let report = sim.run().unwrap();

    assert_relative_eq!(report.final_drift, bias, epsilon = 1e-4);
    assert_relative_eq!(
        to_euler(&report.final_estimate).yaw - to_euler(&report.final_truth).yaw,
        bias,
        epsilon = 1e-4
    );
}

#[test]
fn test_white_noise_gives_small_random_walk() {
    let config = scenario(
        vec![RateSegment::new(1.0, Vec3::new(0.2, -0.1, 0.3))],
        GyroConfig {
            noise_std: 0.01,
            ..Default::default()
        },
    );
    let mut sim = AttitudeSimulator::new(config).unwrap();

    let report = sim.run().unwrap();

    // Angle random walk: 0.01 rad/s * sqrt(1 ms * 1 s) ≈ 3e-4 rad
    assert!(report.final_drift > 0.0);
    assert!(report.max_drift < 5e-3);
    assert_relative_eq!(report.final_estimate.norm(), 1.0, epsilon = 1e-5);
}

#[test]
fn test_runs_are_reproducible_for_a_seed() {
    let config = scenario(
        vec![RateSegment::new(0.5, Vec3::new(0.0, 1.0, 0.0))],
        GyroConfig {
            noise_std: 0.02,
            seed: 2024,
            ..Default::default()
        },
    );

    let first = AttitudeSimulator::new(config.clone()).unwrap().run().unwrap();
    let second = AttitudeSimulator::new(config).unwrap().run().unwrap();

    assert_eq!(first.final_estimate, second.final_estimate);
    assert_eq!(first.telemetry, second.telemetry);
}

#[test]
fn test_yaml_scenario_runs() {
    let yaml = r#"
rate_hz: 200.0
initial_attitude:
  roll: 0.0
  pitch: 0.0
  yaw: 0.5
segments:
  - duration: 0.5
    angular_velocity: [0.0, 0.0, -1.0]
telemetry:
  decimation: 10
"#;
    let config = SimConfig::parse(yaml).unwrap();
    let mut sim = AttitudeSimulator::new(config).unwrap();

    let report = sim.run().unwrap();

    assert_eq!(report.steps, 100);
    assert_eq!(report.telemetry.len(), 10);
    assert_relative_eq!(to_euler(&report.final_truth).yaw, 0.0, epsilon = TOL_DEG);
}

#[test]
fn test_invalid_yaml_scenario_is_rejected() {
    let yaml = r#"
rate_hz: 100.0
segments:
  - duration: -1.0
    angular_velocity: [0.0, 0.0, 0.0]
"#;

    assert!(matches!(SimConfig::parse(yaml), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_simulator_validates_config() {
    let config = scenario(
        vec![RateSegment::new(1.0, Vec3::new(f32::NAN, 0.0, 0.0))],
        GyroConfig::default(),
    );

    assert!(matches!(
        AttitudeSimulator::new(config),
        Err(SimError::Config(ConfigError::Invalid(_)))
    ));
}

#[test]
fn test_oversized_scenario_is_rejected_before_running() {
    let config = scenario(
        vec![
            RateSegment::new(1e30, Vec3::zeros()),
            RateSegment::new(1e30, Vec3::zeros()),
        ],
        GyroConfig::default(),
    );

    assert!(matches!(
        AttitudeSimulator::new(config),
        Err(SimError::Config(ConfigError::Invalid(_)))
    ));
}
