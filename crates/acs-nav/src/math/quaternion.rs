//! Quaternion construction and core algebra
//!
//! - Identity, axis-angle and rotation-vector (exponential map) constructors
//! - Normalization with an identity fallback for degenerate input
//! - Conjugate and Hamilton product
//! - Logarithmic map back to a rotation vector

use nalgebra::SVector;

use crate::{Quat, Vec3, EPSILON_NORM};

/// Euclidean norm that survives large finite components
///
/// Squaring overflows f32 once a component exceeds about 1.8e19. When that
/// happens the vector is rescaled by its largest magnitude first. Non-finite
/// components still give a non-finite result.
#[inline]
pub(crate) fn stable_norm<const D: usize>(v: &SVector<f32, D>) -> f32 {
    let n = v.norm();
    if n.is_finite() || !v.iter().all(|c| c.is_finite()) {
        return n;
    }
    let scale = v.amax();
    (v / scale).norm() * scale
}

/// Identity quaternion (no rotation)
#[inline]
pub fn identity() -> Quat {
    Quat::identity()
}

/// Normalize a quaternion to unit length
///
/// Returns [`identity`] when the norm is below [`EPSILON_NORM`] or is not
/// finite (any NaN or infinite component). The fallback is silent. Large
/// finite components are normalized correctly.
#[inline]
pub fn normalize(q: &Quat) -> Quat {
    let n = stable_norm(&q.coords);
    if !n.is_finite() || n < EPSILON_NORM {
        return identity();
    }
    Quat::from_vector(q.coords / n)
}

/// Quaternion conjugate
///
/// Negates the vector part. Equal to the inverse for unit quaternions.
#[inline]
pub fn conjugate(q: &Quat) -> Quat {
    q.conjugate()
}

/// Hamilton product `a ⊗ b`
///
/// Composes rotations: `a ⊗ b` applies `b` first (in the body frame of `a`).
/// Associative, not commutative.
#[inline]
pub fn multiply(a: &Quat, b: &Quat) -> Quat {
    a * b
}

/// Quaternion from a rotation vector (exponential map)
///
/// q = exp(rv / 2), with θ = ‖rv‖:
/// ```text
/// w   = cos(θ/2)
/// vec = rv · sin(θ/2) / θ
/// ```
///
/// Below [`EPSILON_NORM`] the first-order expansion `(1, rv/2)` is used and
/// normalized, which avoids the 0/0 in `sin(θ/2)/θ`. A non-finite `rv` takes
/// the same branch and therefore yields [`identity`].
///
/// # Arguments
/// * `rv` - Rotation vector [rad]; direction = axis, magnitude = angle
pub fn from_rotation_vector(rv: &Vec3) -> Quat {
    let angle = stable_norm(rv);
    if !angle.is_finite() || angle < EPSILON_NORM {
        return normalize(&Quat::from_parts(1.0, rv * 0.5));
    }

    let half_angle = angle * 0.5;
    let s = half_angle.sin() / angle;
    Quat::from_parts(half_angle.cos(), rv * s)
}

/// Quaternion from axis-angle representation
///
/// A zero-length axis is defined as "no rotation" and yields [`identity`]
/// for any angle.
///
/// # Arguments
/// * `axis` - Rotation axis (normalized internally)
/// * `angle` - Rotation angle [rad]
pub fn from_axis_angle(axis: &Vec3, angle: f32) -> Quat {
    let n = stable_norm(axis);
    if !n.is_finite() || n < EPSILON_NORM {
        return identity();
    }

    let u = axis / n;
    let half = angle * 0.5;
    Quat::from_parts(half.cos(), u * half.sin())
}

/// Rotation vector from a quaternion (logarithmic map)
///
/// Inverse of [`from_rotation_vector`]. The input is normalized first, so
/// degenerate input maps to the zero vector. The sign is chosen so that
/// `w ≥ 0`, giving the shortest rotation with magnitude in `[0, π]`.
///
/// The angle is computed as `2·atan2(‖vec‖, w)`, which stays well
/// conditioned at both 0 and π where `acos(w)` does not.
pub fn to_rotation_vector(q: &Quat) -> Vec3 {
    let mut q = normalize(q);
    if q.w < 0.0 {
        q = -q;
    }

    let v = q.imag();
    let sin_half = v.norm();
    if sin_half < EPSILON_NORM {
        // First-order inverse of the small-angle branch above
        return v * 2.0;
    }

    let angle = 2.0 * sin_half.atan2(q.w);
    v * (angle / sin_half)
}
