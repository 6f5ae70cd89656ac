//! Attitude error metrics
//!
//! Compares two orientations for control and monitoring. All metrics treat
//! `q` and `-q` as the same rotation and always report the shortest path.

use crate::math::{conjugate, multiply, to_rotation_vector};
use crate::{Quat, Vec3};

/// Geodesic angle between two orientations
///
/// θ = 2 · acos(|a · b|), with a · b the 4-component dot product.
///
/// The absolute value makes the result invariant to the `q / -q` ambiguity.
/// The `acos` argument is clamped to [0, 1]. Non-finite input yields `0.0`.
///
/// # Returns
/// Angle in [0, π] [rad]
pub fn error_angle(a: &Quat, b: &Quat) -> f32 {
    let dot = a.coords.dot(&b.coords).abs();
    if !dot.is_finite() {
        return 0.0;
    }
    2.0 * dot.clamp(0.0, 1.0).acos()
}

/// Small-angle rotation error from current to desired orientation
///
/// ```text
/// q_err = current* ⊗ desired     (negated if q_err.w < 0)
/// e     = 2 · vec(q_err)
/// ```
///
/// The result is expressed in the body frame of `current`; its sign follows
/// the commanded rotation (positive roll command gives positive X).
///
/// `2·vec(q_err) = 2·sin(θ/2)·axis`, so the magnitude saturates toward 2.0
/// for large errors instead of growing to π. Use [`error_rotation_vector`]
/// when the exact large-angle error is needed. Non-finite input yields the
/// zero vector.
pub fn error_vector(current: &Quat, desired: &Quat) -> Vec3 {
    let mut q_err = multiply(&conjugate(current), desired);

    // Shortest path
    if q_err.w < 0.0 {
        q_err = -q_err;
    }

    let e = q_err.imag() * 2.0;
    if !e.iter().all(|c| c.is_finite()) {
        return Vec3::zeros();
    }
    e
}

/// Exact rotation error from current to desired orientation
///
/// Rotation vector (axis × angle) of current* ⊗ desired, taking the short
/// way round. Its magnitude equals [`error_angle`] and its direction matches
/// [`error_vector`]; unlike the latter it does not saturate.
///
/// # Returns
/// Rotation vector in the body frame of `current` [rad], magnitude in [0, π]
pub fn error_rotation_vector(current: &Quat, desired: &Quat) -> Vec3 {
    to_rotation_vector(&multiply(&conjugate(current), desired))
}
