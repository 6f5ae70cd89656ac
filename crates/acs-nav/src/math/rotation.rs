//! Vector rotation and direction cosine matrices
//!
//! Applies an attitude quaternion to vectors and converts it to the
//! equivalent DCM. Both paths agree to floating-point tolerance for every
//! unit quaternion.

use crate::{Mat3, Quat, Vec3};

/// Rotate a vector from body frame to reference frame
///
/// v' = vec(q ⊗ (0, v) ⊗ q*)
///
/// # Arguments
/// * `q` - Body-to-reference attitude (unit quaternion)
/// * `v` - Vector in body frame
///
/// # Returns
/// The same vector expressed in the reference frame
#[inline]
pub fn rotate_vector(q: &Quat, v: &Vec3) -> Vec3 {
    (q * Quat::from_imag(*v) * q.conjugate()).imag()
}

/// Rotate a vector from reference frame to body frame
///
/// v' = vec(q* ⊗ (0, v) ⊗ q)
#[inline]
pub fn rotate_vector_inverse(q: &Quat, v: &Vec3) -> Vec3 {
    (q.conjugate() * Quat::from_imag(*v) * q).imag()
}

/// Direction cosine matrix from quaternion
///
/// For a unit quaternion q = (w, x, y, z):
/// ```text
/// R = [1-2(y²+z²)   2(xy-wz)     2(xz+wy)  ]
///     [2(xy+wz)     1-2(x²+z²)   2(yz-wx)  ]
///     [2(xz-wy)     2(yz+wx)     1-2(x²+y²)]
/// ```
///
/// `R * v` equals [`rotate_vector`]`(q, v)`.
pub fn to_dcm(q: &Quat) -> Mat3 {
    let (w, x, y, z) = (q.w, q.i, q.j, q.k);

    let xx = x * x;
    let yy = y * y;
    let zz = z * z;
    let xy = x * y;
    let xz = x * z;
    let yz = y * z;
    let wx = w * x;
    let wy = w * y;
    let wz = w * z;

    Mat3::new(
        1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz),       2.0 * (xz + wy),
        2.0 * (xy + wz),       1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx),
        2.0 * (xz - wy),       2.0 * (yz + wx),       1.0 - 2.0 * (xx + yy),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{conjugate, from_axis_angle, from_euler, identity};
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    const TOL: f32 = 1e-5;

    #[test]
    fn test_rotate_90deg_about_z() {
        let q = from_axis_angle(&Vec3::z(), PI / 2.0);
        let v = rotate_vector(&q, &Vec3::x());

        assert_relative_eq!(v, Vec3::y(), epsilon = TOL);
    }

    #[test]
    fn test_rotate_identity_unchanged() {
        let v = Vec3::new(1.0, 2.0, 3.0);

        assert_relative_eq!(rotate_vector(&identity(), &v), v, epsilon = TOL);
    }

    #[test]
    fn test_rotate_180deg_about_x() {
        let q = from_axis_angle(&Vec3::x(), PI);
        let v = rotate_vector(&q, &Vec3::y());

        assert_relative_eq!(v, Vec3::new(0.0, -1.0, 0.0), epsilon = TOL);
    }

    #[test]
    fn test_conjugate_undoes_rotation() {
        let q = from_euler(0.3, 0.5, 1.2);
        let v = Vec3::new(1.0, 2.0, 3.0);

        let rotated = rotate_vector(&q, &v);
        let unrotated = rotate_vector(&conjugate(&q), &rotated);

        assert_relative_eq!(unrotated, v, epsilon = TOL);
    }

    #[test]
    fn test_inverse_rotation_matches_conjugate() {
        let q = from_euler(-0.4, 0.2, 2.0);
        let v = Vec3::new(0.0, 0.0, 9.81);

        assert_relative_eq!(
            rotate_vector_inverse(&q, &v),
            rotate_vector(&conjugate(&q), &v),
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_zero_vector_stays_zero() {
        let q = from_euler(0.1, 0.2, 0.3);

        assert_relative_eq!(rotate_vector(&q, &Vec3::zeros()), Vec3::zeros());
    }

    #[test]
    fn test_dcm_identity_is_diagonal() {
        let r = to_dcm(&identity());

        assert_relative_eq!(r, Mat3::identity(), epsilon = TOL);
    }

    #[test]
    fn test_dcm_consistent_with_rotate_vector() {
        let q = from_euler(0.3, 0.5, 1.2);
        let v = Vec3::new(1.0, -0.5, 2.0);

        assert_relative_eq!(to_dcm(&q) * v, rotate_vector(&q, &v), epsilon = TOL);
    }

    #[test]
    fn test_dcm_orthonormal() {
        let q = from_axis_angle(&Vec3::new(1.0, 1.0, 1.0), 1.0);
        let r = to_dcm(&q);

        // R * R^T = I
        assert_relative_eq!(r * r.transpose(), Mat3::identity(), epsilon = TOL);

        // det(R) = 1
        assert_relative_eq!(r.determinant(), 1.0, epsilon = TOL);
    }
}
