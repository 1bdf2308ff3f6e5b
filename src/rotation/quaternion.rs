//! Unit quaternion `(x, y, z, s)`.

use crate::errors::TransformError;
use crate::float_types::{EPSILON, Real};
use crate::rotation::{AxisAngle, RotationMatrix, RotationReadOnly, YawPitchRoll, conversion};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Quaternion, Unit, Vector3};

/// A quaternion of norm 1.
///
/// Validated setters normalize their input and reject zero or non-finite quaternions;
/// `*_unchecked` setters store what they are given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitQuaternion {
    q: Quaternion<Real>,
}

impl Default for UnitQuaternion {
    fn default() -> Self {
        Self::identity()
    }
}

fn normalized(q: Quaternion<Real>) -> Result<Quaternion<Real>, TransformError> {
    let norm = q.norm();
    if !norm.is_finite() || norm < EPSILON {
        return Err(TransformError::DegenerateQuaternion(q));
    }
    Ok(q / norm)
}

impl UnitQuaternion {
    pub fn identity() -> Self {
        Self {
            q: conversion::identity_quaternion(),
        }
    }

    /// Normalizes `(x, y, z, s)`.
    pub fn new(x: Real, y: Real, z: Real, s: Real) -> Result<Self, TransformError> {
        Self::from_quaternion(conversion::quaternion(x, y, z, s))
    }

    pub fn new_unchecked(x: Real, y: Real, z: Real, s: Real) -> Self {
        Self::from_quaternion_unchecked(conversion::quaternion(x, y, z, s))
    }

    pub fn from_quaternion(q: Quaternion<Real>) -> Result<Self, TransformError> {
        Ok(Self { q: normalized(q)? })
    }

    pub const fn from_quaternion_unchecked(q: Quaternion<Real>) -> Self {
        Self { q }
    }

    pub fn from_rotation<R: RotationReadOnly>(rotation: &R) -> Self {
        rotation.to_quaternion()
    }

    pub fn from_yaw_pitch_roll(yaw: Real, pitch: Real, roll: Real) -> Self {
        YawPitchRoll::new(yaw, pitch, roll).to_quaternion()
    }

    #[inline]
    pub const fn quaternion(&self) -> &Quaternion<Real> {
        &self.q
    }

    #[inline]
    pub fn x(&self) -> Real {
        self.q.i
    }

    #[inline]
    pub fn y(&self) -> Real {
        self.q.j
    }

    #[inline]
    pub fn z(&self) -> Real {
        self.q.k
    }

    /// Scalar part.
    #[inline]
    pub fn s(&self) -> Real {
        self.q.w
    }

    pub fn norm(&self) -> Real {
        self.q.norm()
    }

    pub fn dot(&self, other: &UnitQuaternion) -> Real {
        self.q.dot(&other.q)
    }

    pub fn set_identity(&mut self) {
        self.q = conversion::identity_quaternion();
    }

    pub fn set(&mut self, other: &UnitQuaternion) {
        self.q = other.q;
    }

    /// Validated setter; on failure the receiver is left untouched.
    pub fn set_components(
        &mut self,
        x: Real,
        y: Real,
        z: Real,
        s: Real,
    ) -> Result<(), TransformError> {
        self.q = normalized(conversion::quaternion(x, y, z, s))?;
        Ok(())
    }

    pub fn set_components_unchecked(&mut self, x: Real, y: Real, z: Real, s: Real) {
        self.q = conversion::quaternion(x, y, z, s);
    }

    pub fn set_rotation<R: RotationReadOnly>(&mut self, rotation: &R) {
        *self = rotation.to_quaternion();
    }

    pub fn set_rotation_matrix(&mut self, rotation: &RotationMatrix) {
        self.q = conversion::quaternion_from_matrix(rotation.matrix());
    }

    pub fn set_axis_angle(&mut self, axis_angle: &AxisAngle) {
        self.q = conversion::quaternion_from_axis_angle(&axis_angle.axis, axis_angle.angle);
    }

    pub fn set_rotation_vector(&mut self, rotation_vector: &Vector3<Real>) {
        self.q = conversion::quaternion_from_rotation_vector(rotation_vector);
    }

    pub fn set_yaw_pitch_roll(&mut self, yaw: Real, pitch: Real, roll: Real) {
        self.q = conversion::quaternion_from_yaw_pitch_roll(yaw, pitch, roll);
    }

    /// `(roll, pitch, yaw)`.
    pub fn set_euler(&mut self, euler: &Vector3<Real>) {
        self.set_yaw_pitch_roll(euler.z, euler.y, euler.x);
    }

    pub fn set_to_yaw_quaternion(&mut self, yaw: Real) {
        self.set_yaw_pitch_roll(yaw, 0.0, 0.0);
    }

    pub fn set_to_pitch_quaternion(&mut self, pitch: Real) {
        self.set_yaw_pitch_roll(0.0, pitch, 0.0);
    }

    pub fn set_to_roll_quaternion(&mut self, roll: Real) {
        self.set_yaw_pitch_roll(0.0, 0.0, roll);
    }

    /// Inverts in place.
    pub fn conjugate(&mut self) {
        self.q = self.q.conjugate();
    }

    pub fn conjugated(&self) -> Self {
        Self::from_quaternion_unchecked(self.q.conjugate())
    }

    /// `-q` describes the same rotation.
    pub fn negate(&mut self) {
        self.q = -self.q;
    }

    /// Restores the unit norm after `*_unchecked` writes or long chains of products.
    pub fn normalize(&mut self) -> Result<(), TransformError> {
        self.q = normalized(self.q)?;
        Ok(())
    }

    /// Normalizes and flips the sign so that `s ≥ 0`, i.e. the angle lies in `[0, π]`.
    pub fn normalize_and_limit_to_pi(&mut self) -> Result<(), TransformError> {
        self.normalize()?;
        if self.q.w < 0.0 {
            self.negate();
        }
        Ok(())
    }

    #[inline]
    fn renormalize(&mut self) {
        let norm = self.q.norm();
        if norm > EPSILON {
            self.q /= norm;
        }
    }

    /// `q ← q · other`
    pub fn multiply(&mut self, other: &UnitQuaternion) {
        self.q *= other.q;
        self.renormalize();
    }

    /// `q ← other · q`
    pub fn pre_multiply(&mut self, other: &UnitQuaternion) {
        self.q = other.q * self.q;
        self.renormalize();
    }

    /// `q ← q⁻¹ · other`
    pub fn multiply_conjugate_this(&mut self, other: &UnitQuaternion) {
        self.q = self.q.conjugate() * other.q;
        self.renormalize();
    }

    /// `q ← q · other⁻¹`
    pub fn multiply_conjugate_other(&mut self, other: &UnitQuaternion) {
        self.q *= other.q.conjugate();
        self.renormalize();
    }

    /// `q ← other · q⁻¹`
    pub fn pre_multiply_conjugate_this(&mut self, other: &UnitQuaternion) {
        self.q = other.q * self.q.conjugate();
        self.renormalize();
    }

    /// `q ← other⁻¹ · q`
    pub fn pre_multiply_conjugate_other(&mut self, other: &UnitQuaternion) {
        self.q = other.q.conjugate() * self.q;
        self.renormalize();
    }

    pub fn append_yaw_rotation(&mut self, yaw: Real) {
        self.multiply(&YawPitchRoll::from_yaw(yaw).to_quaternion());
    }

    pub fn append_pitch_rotation(&mut self, pitch: Real) {
        self.multiply(&YawPitchRoll::from_pitch(pitch).to_quaternion());
    }

    pub fn append_roll_rotation(&mut self, roll: Real) {
        self.multiply(&YawPitchRoll::from_roll(roll).to_quaternion());
    }

    pub fn prepend_yaw_rotation(&mut self, yaw: Real) {
        self.pre_multiply(&YawPitchRoll::from_yaw(yaw).to_quaternion());
    }

    pub fn prepend_pitch_rotation(&mut self, pitch: Real) {
        self.pre_multiply(&YawPitchRoll::from_pitch(pitch).to_quaternion());
    }

    pub fn prepend_roll_rotation(&mut self, roll: Real) {
        self.pre_multiply(&YawPitchRoll::from_roll(roll).to_quaternion());
    }

    /// `q · v · q⁻¹`
    pub fn transform(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        Unit::new_unchecked(self.q) * vector
    }

    pub fn inverse_transform(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        Unit::new_unchecked(self.q).inverse_transform_vector(vector)
    }

    /// Angle of the rotation taking `self` onto `other`, in `[0, π]`.
    pub fn distance(&self, other: &UnitQuaternion) -> Real {
        let relative = self.q.conjugate() * other.q;
        let sin_half = Vector3::new(relative.i, relative.j, relative.k).norm();
        2.0 * sin_half.atan2(relative.w.abs())
    }
}

impl RotationReadOnly for UnitQuaternion {
    fn to_rotation_matrix(&self) -> RotationMatrix {
        RotationMatrix::from_matrix_unchecked(conversion::matrix_from_quaternion(&self.q))
    }

    fn to_quaternion(&self) -> UnitQuaternion {
        *self
    }

    fn yaw_pitch_roll(&self) -> YawPitchRoll {
        conversion::yaw_pitch_roll_from_quaternion(&self.q)
    }

    fn transform_vector(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.transform(vector)
    }

    fn inverse_transform_vector(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.inverse_transform(vector)
    }
}

impl AbsDiffEq for UnitQuaternion {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.q.coords.abs_diff_eq(&other.q.coords, epsilon)
    }
}

impl RelativeEq for UnitQuaternion {
    fn default_max_relative() -> Self::Epsilon {
        Real::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.q.coords.relative_eq(&other.q.coords, epsilon, max_relative)
    }
}
