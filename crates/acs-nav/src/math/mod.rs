//! Attitude mathematics
//!
//! Implements quaternion construction and algebra, rotation of vectors,
//! direction cosine matrices, ZYX Euler extraction, gyro integration and
//! attitude error metrics.

pub mod quaternion;
pub mod rotation;
pub mod euler;
pub mod integrator;
pub mod error;

pub use quaternion::*;
pub use rotation::*;
pub use euler::*;
pub use integrator::*;
pub use error::*;
