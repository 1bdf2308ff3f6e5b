//! Rigid, quaternion-based and affine **3D transforms** together with the rotation
//! representations they are built from.
//!
//! A transform maps a point `p` to `A·p + t` where `A` is a rotation
//! ([`RigidTransform`], [`QuaternionTransform`]) or a rotation composed with a
//! strictly positive per-axis scale ([`AffineTransform`]).
//!
//! # Conventions
//! - Yaw-pitch-roll is intrinsic Z-Y-X: `R = Rz(yaw) · Ry(pitch) · Rx(roll)`.
//! - Euler vectors are ordered `(roll, pitch, yaw)`.
//! - Quaternions are `(x, y, z, s)` with `s` the scalar part.
//! - Flat 4×4 arrays are row-major unless the method says otherwise.
//!
//! ```
//! use nalgebra::Point3;
//! use spatial_transforms::{RigidTransform, Transform, TransformReadOnly};
//!
//! let mut t = RigidTransform::new();
//! t.set_translation(1.0, 0.0, 0.0);
//! t.set_rotation_yaw(std::f64::consts::FRAC_PI_2);
//! let p = t.transform(&Point3::new(1.0, 0.0, 0.0));
//! assert!((p - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
//! ```

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod rotation;
pub mod transform;

pub use errors::TransformError;
pub use float_types::Real;
pub use rotation::{
    AxisAngle, RotationMatrix, RotationReadOnly, RotationScaleMatrix, UnitQuaternion,
    YawPitchRoll,
};
pub use transform::{
    AffineTransform, Planar, QuaternionTransform, RigidTransform, Transform, TransformReadOnly,
    Transformable,
};
