//! # ACS Nav
//!
//! Attitude algebra for the ACS4 flight computer.
//!
//! Pure, allocation-free functions for representing, composing, integrating
//! and comparing rigid-body orientations with Hamilton unit quaternions.
//! Every function is total: degenerate or NaN inputs map to a defined
//! fallback (identity attitude, zero error) instead of a panic or a NaN, so
//! the whole crate can be called unconditionally from a real-time loop.
//!
//! ## Conventions
//!
//! - Hamilton quaternion `q = w + xi + yj + zk`, stored as [`Quat`]
//! - Rotation semantics: body frame -> reference (NED) frame
//! - Euler angles: ZYX aerospace convention (yaw-pitch-roll), logging only
//! - All angles in radians, all rates in rad/s
//!
//! ## Modules
//!
//! - [`math`]: construction, core algebra, Euler extraction, integration and
//!   error metrics

pub mod math;

pub use math::*;

// Common type aliases
use nalgebra::{Matrix3, Quaternion, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type (direction cosine matrix)
pub type Mat3 = Matrix3<f32>;

/// Quaternion type for orientations
///
/// A plain `Quaternion` rather than `UnitQuaternion`: [`math::normalize`]
/// accepts arbitrary (zero, NaN) input and maps it back onto the unit
/// sphere. Every constructor in this crate returns a unit quaternion.
pub type Quat = Quaternion<f32>;

/// Magnitude below which a vector, axis or quaternion is treated as zero
pub const EPSILON_NORM: f32 = 1e-10;
