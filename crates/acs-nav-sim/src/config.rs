//! Simulation configuration
//!
//! YAML-backed configuration for the gyro propagation harness: sample rate,
//! initial attitude, the body-rate profile and the gyroscope error model.
//!
//! ## Example Configuration
//!
//! ```yaml
//! rate_hz: 1000.0
//! initial_attitude:
//!   roll: 0.0
//!   pitch: 0.0
//!   yaw: 0.0
//! segments:
//!   - duration: 1.0
//!     angular_velocity: [0.0, 0.0, 1.5707964]
//! gyro:
//!   noise_std: 0.0
//!   bias: [0.0, 0.0, 0.0]
//!   seed: 12345
//! telemetry:
//!   decimation: 100
//!   drift_warn_deg: 1.0
//! ```

use std::path::{Path, PathBuf};

use acs_nav::math::EulerAngles;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on the number of integration steps in one scenario
///
/// About 28 hours of flight at the default 1 kHz rate.
pub const MAX_STEPS: usize = 100_000_000;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Main simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Gyro sample / integration rate [Hz]
    pub rate_hz: f32,
    /// Initial attitude, ZYX Euler [rad]
    pub initial_attitude: EulerAngles,
    /// Body-rate profile, flown in order
    pub segments: Vec<RateSegment>,
    /// Gyroscope error model
    pub gyro: GyroConfig,
    /// Telemetry output
    pub telemetry: TelemetryConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rate_hz: 1000.0, // 1 kHz gyro loop
            initial_attitude: EulerAngles::default(),
            segments: vec![
                // 90°/s yaw for one second
                RateSegment::new(1.0, Vector3::new(0.0, 0.0, 90f32.to_radians())),
                // Hold
                RateSegment::new(0.5, Vector3::zeros()),
                // 20°/s roll for one second
                RateSegment::new(1.0, Vector3::new(20f32.to_radians(), 0.0, 0.0)),
            ],
            gyro: GyroConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

/// Constant body-rate segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSegment {
    /// Segment duration [s]
    pub duration: f32,
    /// Body-frame angular velocity [rad/s]
    pub angular_velocity: Vector3<f32>,
}

impl RateSegment {
    pub fn new(duration: f32, angular_velocity: Vector3<f32>) -> Self {
        Self {
            duration,
            angular_velocity,
        }
    }
}

/// Gyroscope error model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GyroConfig {
    /// White noise standard deviation [rad/s]
    pub noise_std: f32,
    /// Constant bias [rad/s]
    pub bias: Vector3<f32>,
    /// Noise generator seed
    pub seed: u64,
}

impl Default for GyroConfig {
    fn default() -> Self {
        Self {
            noise_std: 0.0,
            bias: Vector3::zeros(),
            seed: 12345,
        }
    }
}

/// Telemetry output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Emit one telemetry record every `decimation` steps
    pub decimation: usize,
    /// Log a warning once drift exceeds this angle [deg]
    pub drift_warn_deg: f32,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            decimation: 100, // 10 Hz at the default rate
            drift_warn_deg: 1.0,
        }
    }
}

impl SimConfig {
    /// Load and validate a configuration file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rate_hz.is_finite() && self.rate_hz > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "rate_hz must be positive, got {}",
                self.rate_hz
            )));
        }
        if self.segments.is_empty() {
            return Err(ConfigError::Invalid("at least one rate segment is required".into()));
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if !(segment.duration.is_finite() && segment.duration >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "segment {} has invalid duration {}",
                    i, segment.duration
                )));
            }
            if !segment.angular_velocity.iter().all(|w| w.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "segment {} has a non-finite angular velocity",
                    i
                )));
            }
        }
        if self.total_duration() <= 0.0 {
            return Err(ConfigError::Invalid("total duration must be positive".into()));
        }
        let mut total_steps: usize = 0;
        for (i, segment) in self.segments.iter().enumerate() {
            let steps = (segment.duration * self.rate_hz).round();
            if !steps.is_finite() || steps > MAX_STEPS as f32 {
                return Err(ConfigError::Invalid(format!(
                    "segment {} needs {} steps, limit is {}",
                    i, steps, MAX_STEPS
                )));
            }
            total_steps = total_steps
                .checked_add(steps as usize)
                .filter(|&n| n <= MAX_STEPS)
                .ok_or_else(|| {
                    ConfigError::Invalid(format!("scenario exceeds {} steps", MAX_STEPS))
                })?;
        }
        if !(self.gyro.noise_std.is_finite() && self.gyro.noise_std >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "gyro noise_std must be non-negative, got {}",
                self.gyro.noise_std
            )));
        }
        if !self.gyro.bias.iter().all(|b| b.is_finite()) {
            return Err(ConfigError::Invalid("gyro bias must be finite".into()));
        }
        if self.telemetry.decimation == 0 {
            return Err(ConfigError::Invalid("telemetry decimation must be at least 1".into()));
        }
        Ok(())
    }

    /// Integration time step [s]
    pub fn dt(&self) -> f32 {
        1.0 / self.rate_hz
    }

    /// Sum of all segment durations [s]
    pub fn total_duration(&self) -> f32 {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Number of gyro samples in each segment
    ///
    /// Durations are rounded to a whole number of samples.
    pub fn segment_steps(&self) -> Vec<usize> {
        self.segments
            .iter()
            .map(|s| (s.duration * self.rate_hz).round() as usize)
            .collect()
    }

    /// Default configuration serialized as YAML
    pub fn example_yaml() -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(&Self::default())?)
    }
}
