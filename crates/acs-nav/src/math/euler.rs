//! ZYX (yaw-pitch-roll) Euler angles
//!
//! Aerospace convention: R = Rz(ψ) · Ry(θ) · Rx(φ).
//!
//! Euler angles are a telemetry format only. They are produced for logging
//! and display and must never be fed back into estimation or control; keep
//! the attitude state as a quaternion.

use serde::{Deserialize, Serialize};

use crate::math::{from_axis_angle, multiply, normalize, to_dcm};
use crate::{Mat3, Quat, Vec3};

/// ZYX Euler angles [rad]
///
/// - Roll (φ): rotation about body X (forward)
/// - Pitch (θ): rotation about body Y (right)
/// - Yaw (ψ): rotation about body Z (down)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Roll angle [rad], in [-π, π]
    pub roll: f32,
    /// Pitch angle [rad], in [-π/2, π/2]
    pub pitch: f32,
    /// Yaw angle [rad], in [-π, π]
    pub yaw: f32,
}

impl EulerAngles {
    pub fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Same angles in degrees, for human-readable output
    pub fn to_degrees(&self) -> Self {
        Self {
            roll: self.roll.to_degrees(),
            pitch: self.pitch.to_degrees(),
            yaw: self.yaw.to_degrees(),
        }
    }

    /// True when all three angles are finite
    pub fn is_finite(&self) -> bool {
        self.roll.is_finite() && self.pitch.is_finite() && self.yaw.is_finite()
    }
}

/// Quaternion from ZYX Euler angles
///
/// q = q_yaw ⊗ q_pitch ⊗ q_roll (roll applied first, intrinsic)
///
/// # Arguments
/// * `roll` - φ, rotation about X [rad]
/// * `pitch` - θ, rotation about Y [rad]
/// * `yaw` - ψ, rotation about Z [rad]
pub fn from_euler(roll: f32, pitch: f32, yaw: f32) -> Quat {
    let q_roll = from_axis_angle(&Vec3::x(), roll);
    let q_pitch = from_axis_angle(&Vec3::y(), pitch);
    let q_yaw = from_axis_angle(&Vec3::z(), yaw);

    normalize(&multiply(&multiply(&q_yaw, &q_pitch), &q_roll))
}

/// Extract ZYX Euler angles from a quaternion
///
/// From the DCM:
/// ```text
/// roll  = atan2(R21, R22)
/// pitch = asin(-R20)
/// yaw   = atan2(R10, R00)
/// ```
///
/// The `asin` argument is clamped to [-1, 1]; rounding pushes it marginally
/// outside that range near ±90° pitch even for an exactly unit quaternion.
/// In the gimbal-lock region roll and yaw are ill-conditioned but finite, and
/// only pitch is meaningful.
///
/// The input is normalized first, so a degenerate or NaN quaternion reports
/// the identity attitude (all zeros).
///
/// Telemetry/logging only. Never re-enter the result into flight computation.
pub fn to_euler(q: &Quat) -> EulerAngles {
    euler_from_dcm(&to_dcm(&normalize(q)))
}

/// Extract ZYX Euler angles from a direction cosine matrix
///
/// Same formulas as [`to_euler`]. The matrix is not re-orthonormalized, so
/// `R20` may lie outside [-1, 1]; the clamp maps it to ±90° pitch.
pub fn euler_from_dcm(r: &Mat3) -> EulerAngles {
    let sin_pitch = (-r[(2, 0)]).clamp(-1.0, 1.0);

    EulerAngles {
        roll: r[(2, 1)].atan2(r[(2, 2)]),
        pitch: sin_pitch.asin(),
        yaw: r[(1, 0)].atan2(r[(0, 0)]),
    }
}
