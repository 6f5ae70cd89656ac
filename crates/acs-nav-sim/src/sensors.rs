//! Gyroscope model
//!
//! Produces body-rate measurements with a constant bias and white Gaussian
//! noise, deterministic for a given seed.

use acs_nav::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::config::GyroConfig;

/// Rate gyroscope with bias and white noise
#[derive(Debug, Clone)]
pub struct GyroSensor {
    /// Per-axis white noise; `None` for a noiseless sensor
    noise: Option<Normal<f32>>,
    /// Constant bias [rad/s]
    bias: Vec3,
    rng: StdRng,
}

impl GyroSensor {
    /// Create a gyro model
    ///
    /// A zero, negative or non-finite `noise_std` gives a noiseless sensor.
    pub fn new(noise_std: f32, bias: Vec3, seed: u64) -> Self {
        let noise = if noise_std > 0.0 {
            Normal::new(0.0, noise_std).ok()
        } else {
            None
        };

        Self {
            noise,
            bias,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: &GyroConfig) -> Self {
        Self::new(config.noise_std, config.bias, config.seed)
    }

    /// Ideal sensor: no bias, no noise
    pub fn ideal() -> Self {
        Self::new(0.0, Vec3::zeros(), 0)
    }

    pub fn bias(&self) -> &Vec3 {
        &self.bias
    }

    /// Measure angular velocity (body frame) [rad/s]
    pub fn measure(&mut self, true_omega: &Vec3) -> Vec3 {
        let measured = true_omega + self.bias;
        match &self.noise {
            Some(dist) => {
                measured
                    + Vec3::new(
                        dist.sample(&mut self.rng),
                        dist.sample(&mut self.rng),
                        dist.sample(&mut self.rng),
                    )
            }
            None => measured,
        }
    }
}
