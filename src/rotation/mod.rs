//! Rotation representations and the read-only capability they share.
//!
//! [`RotationMatrix`] and [`UnitQuaternion`] are the two representations a transform
//! can store; [`AxisAngle`] and [`YawPitchRoll`] are interchange types only.
//! [`RotationScaleMatrix`] pairs a rotation matrix with a strictly positive scale.

use crate::float_types::Real;
use nalgebra::Vector3;

pub mod conversion;
pub mod matrix;
pub mod quaternion;
pub mod scale;

pub use matrix::RotationMatrix;
pub use quaternion::UnitQuaternion;
pub use scale::RotationScaleMatrix;

/// Getters every rotation representation offers.
///
/// Implementors only have to provide the two hub conversions; everything else
/// is derived through [`conversion`], but representations override the methods
/// they can answer without converting.
pub trait RotationReadOnly {
    fn to_rotation_matrix(&self) -> RotationMatrix;

    fn to_quaternion(&self) -> UnitQuaternion;

    fn axis_angle(&self) -> AxisAngle {
        conversion::axis_angle_from_quaternion(self.to_quaternion().quaternion())
    }

    /// Axis scaled by the angle.
    fn rotation_vector(&self) -> Vector3<Real> {
        conversion::rotation_vector_from_quaternion(self.to_quaternion().quaternion())
    }

    fn yaw_pitch_roll(&self) -> YawPitchRoll {
        conversion::yaw_pitch_roll_from_matrix(self.to_rotation_matrix().matrix())
    }

    /// `(roll, pitch, yaw)`, the angles about X, Y and Z.
    fn euler(&self) -> Vector3<Real> {
        self.yaw_pitch_roll().to_euler()
    }

    fn yaw(&self) -> Real {
        self.yaw_pitch_roll().yaw
    }

    fn pitch(&self) -> Real {
        self.yaw_pitch_roll().pitch
    }

    fn roll(&self) -> Real {
        self.yaw_pitch_roll().roll
    }

    /// `2·atan2(|v|, s)` of the quaternion form, within `[0, π]` when `s ≥ 0`.
    fn angle(&self) -> Real {
        self.axis_angle().angle
    }

    fn transform_vector(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.to_rotation_matrix().transform(vector)
    }

    fn inverse_transform_vector(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.to_rotation_matrix().inverse_transform(vector)
    }

    /// Whether the rotation only turns about Z, within `epsilon`.
    fn is_rotation_2d(&self, epsilon: Real) -> bool {
        conversion::is_rotation_2d(self.to_rotation_matrix().matrix(), epsilon)
    }
}

/// Unit axis and angle (radians).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAngle {
    pub axis: Vector3<Real>,
    pub angle: Real,
}

impl AxisAngle {
    /// Normalizes `axis`. A zero axis describes no rotation and yields [`AxisAngle::identity`].
    pub fn new(axis: Vector3<Real>, angle: Real) -> Self {
        match axis.try_normalize(crate::float_types::EPSILON) {
            Some(axis) => Self { axis, angle },
            None => Self::identity(),
        }
    }

    pub fn identity() -> Self {
        Self {
            axis: Vector3::x(),
            angle: 0.0,
        }
    }

    pub fn from_rotation_vector(rotation_vector: &Vector3<Real>) -> Self {
        let angle = rotation_vector.norm();
        Self::new(*rotation_vector, angle)
    }
}

impl Default for AxisAngle {
    fn default() -> Self {
        Self::identity()
    }
}

impl RotationReadOnly for AxisAngle {
    fn to_rotation_matrix(&self) -> RotationMatrix {
        RotationMatrix::from_matrix_unchecked(conversion::matrix_from_axis_angle(
            &self.axis, self.angle,
        ))
    }

    fn to_quaternion(&self) -> UnitQuaternion {
        UnitQuaternion::from_quaternion_unchecked(conversion::quaternion_from_axis_angle(
            &self.axis, self.angle,
        ))
    }

    fn axis_angle(&self) -> AxisAngle {
        *self
    }

    fn rotation_vector(&self) -> Vector3<Real> {
        self.axis * self.angle
    }
}

/// Intrinsic Z-Y-X angles (radians): `R = Rz(yaw) · Ry(pitch) · Rx(roll)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct YawPitchRoll {
    pub yaw: Real,
    pub pitch: Real,
    pub roll: Real,
}

impl YawPitchRoll {
    pub const fn new(yaw: Real, pitch: Real, roll: Real) -> Self {
        Self { yaw, pitch, roll }
    }

    /// From `(roll, pitch, yaw)`.
    pub fn from_euler(euler: &Vector3<Real>) -> Self {
        Self::new(euler.z, euler.y, euler.x)
    }

    pub const fn from_yaw(yaw: Real) -> Self {
        Self::new(yaw, 0.0, 0.0)
    }

    pub const fn from_pitch(pitch: Real) -> Self {
        Self::new(0.0, pitch, 0.0)
    }

    pub const fn from_roll(roll: Real) -> Self {
        Self::new(0.0, 0.0, roll)
    }

    pub fn to_euler(&self) -> Vector3<Real> {
        Vector3::new(self.roll, self.pitch, self.yaw)
    }
}

impl RotationReadOnly for YawPitchRoll {
    fn to_rotation_matrix(&self) -> RotationMatrix {
        RotationMatrix::from_matrix_unchecked(conversion::matrix_from_yaw_pitch_roll(
            self.yaw, self.pitch, self.roll,
        ))
    }

    fn to_quaternion(&self) -> UnitQuaternion {
        UnitQuaternion::from_quaternion_unchecked(conversion::quaternion_from_yaw_pitch_roll(
            self.yaw, self.pitch, self.roll,
        ))
    }

    fn yaw_pitch_roll(&self) -> YawPitchRoll {
        *self
    }
}
