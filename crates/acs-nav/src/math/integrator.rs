//! Gyro integration
//!
//! Propagates an attitude quaternion with a body-frame angular velocity
//! sample. The step runs entirely in quaternion space (no Euler-angle
//! singularities) and re-normalizes every call so repeated composition does
//! not accumulate norm drift.

use crate::math::{from_rotation_vector, multiply, normalize};
use crate::{Quat, Vec3};

/// Integrate a quaternion with angular velocity (first order)
///
/// q_new = normalize(q ⊗ exp(ω · dt))
///
/// The angular velocity is assumed constant over the step, for which the
/// exponential-map increment is exact; the first-order error comes only from
/// sampling a time-varying ω.
///
/// # Arguments
/// * `q` - Current orientation (body to reference)
/// * `omega` - Angular velocity in body frame [rad/s]
/// * `dt` - Time step [s]
///
/// # Returns
/// Updated unit quaternion
#[inline]
pub fn integrate(q: &Quat, omega: &Vec3, dt: f32) -> Quat {
    let dq = from_rotation_vector(&(omega * dt));
    normalize(&multiply(q, &dq))
}
