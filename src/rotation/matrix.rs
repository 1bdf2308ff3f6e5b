//! Orthonormal 3×3 rotation matrix with determinant +1.

use crate::errors::TransformError;
use crate::float_types::{Real, tolerance};
use crate::rotation::{
    AxisAngle, RotationReadOnly, UnitQuaternion, YawPitchRoll, conversion,
};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Matrix3, Vector3};

/// A 3×3 rotation matrix.
///
/// The storage is private so the orthonormality invariant can only be broken
/// through the explicit `*_unchecked` setters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix {
    m: Matrix3<Real>,
}

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl RotationMatrix {
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
        }
    }

    /// Validated constructor, fails with [`TransformError::NotARotationMatrix`].
    pub fn from_matrix(matrix: &Matrix3<Real>) -> Result<Self, TransformError> {
        let mut rotation = Self::identity();
        rotation.set_matrix(matrix)?;
        Ok(rotation)
    }

    /// Skips the orthonormality check; the caller guarantees it.
    pub const fn from_matrix_unchecked(matrix: Matrix3<Real>) -> Self {
        Self { m: matrix }
    }

    /// Row-major `[m00, m01, m02, m10, ..., m22]`.
    pub fn from_row_major(values: &[Real; 9]) -> Result<Self, TransformError> {
        Self::from_matrix(&Matrix3::from_row_slice(values))
    }

    pub fn from_rotation<R: RotationReadOnly>(rotation: &R) -> Self {
        rotation.to_rotation_matrix()
    }

    pub fn from_yaw(yaw: Real) -> Self {
        Self::from_matrix_unchecked(conversion::yaw_matrix(yaw))
    }

    pub fn from_pitch(pitch: Real) -> Self {
        Self::from_matrix_unchecked(conversion::pitch_matrix(pitch))
    }

    pub fn from_roll(roll: Real) -> Self {
        Self::from_matrix_unchecked(conversion::roll_matrix(roll))
    }

    pub fn from_yaw_pitch_roll(yaw: Real, pitch: Real, roll: Real) -> Self {
        Self::from_matrix_unchecked(conversion::matrix_from_yaw_pitch_roll(yaw, pitch, roll))
    }

    #[inline]
    pub const fn matrix(&self) -> &Matrix3<Real> {
        &self.m
    }

    pub fn element(&self, row: usize, col: usize) -> Result<Real, TransformError> {
        if row > 2 || col > 2 {
            return Err(TransformError::IndexOutOfBounds { row, col });
        }
        Ok(self.m[(row, col)])
    }

    pub fn determinant(&self) -> Real {
        self.m.determinant()
    }

    pub fn is_rotation_matrix(&self, epsilon: Real) -> bool {
        conversion::is_rotation_matrix(&self.m, epsilon)
    }

    /// Fails with [`TransformError::NotAMatrix2D`] unless the rotation only turns about Z.
    pub fn check_if_rotation_2d(&self) -> Result<(), TransformError> {
        if conversion::is_rotation_2d(&self.m, tolerance()) {
            Ok(())
        } else {
            Err(TransformError::NotAMatrix2D(self.m))
        }
    }

    pub fn set_identity(&mut self) {
        self.m = Matrix3::identity();
    }

    pub fn set(&mut self, other: &RotationMatrix) {
        self.m = other.m;
    }

    /// Validated setter; on failure the receiver is left untouched.
    pub fn set_matrix(&mut self, matrix: &Matrix3<Real>) -> Result<(), TransformError> {
        if !conversion::is_rotation_matrix(matrix, tolerance()) {
            return Err(TransformError::NotARotationMatrix(*matrix));
        }
        self.m = *matrix;
        Ok(())
    }

    pub fn set_matrix_unchecked(&mut self, matrix: &Matrix3<Real>) {
        self.m = *matrix;
    }

    pub fn set_rotation<R: RotationReadOnly>(&mut self, rotation: &R) {
        *self = rotation.to_rotation_matrix();
    }

    pub fn set_quaternion(&mut self, quaternion: &UnitQuaternion) {
        self.m = conversion::matrix_from_quaternion(quaternion.quaternion());
    }

    pub fn set_axis_angle(&mut self, axis_angle: &AxisAngle) {
        self.m = conversion::matrix_from_axis_angle(&axis_angle.axis, axis_angle.angle);
    }

    pub fn set_rotation_vector(&mut self, rotation_vector: &Vector3<Real>) {
        self.m = conversion::matrix_from_rotation_vector(rotation_vector);
    }

    pub fn set_yaw_pitch_roll(&mut self, yaw: Real, pitch: Real, roll: Real) {
        self.m = conversion::matrix_from_yaw_pitch_roll(yaw, pitch, roll);
    }

    /// `(roll, pitch, yaw)`.
    pub fn set_euler(&mut self, euler: &Vector3<Real>) {
        self.set_yaw_pitch_roll(euler.z, euler.y, euler.x);
    }

    pub fn set_to_yaw_matrix(&mut self, yaw: Real) {
        self.m = conversion::yaw_matrix(yaw);
    }

    pub fn set_to_pitch_matrix(&mut self, pitch: Real) {
        self.m = conversion::pitch_matrix(pitch);
    }

    pub fn set_to_roll_matrix(&mut self, roll: Real) {
        self.m = conversion::roll_matrix(roll);
    }

    /// Inverts in place (`R ← Rᵀ`).
    pub fn transpose(&mut self) {
        self.m.transpose_mut();
    }

    pub fn transposed(&self) -> Self {
        Self::from_matrix_unchecked(self.m.transpose())
    }

    /// `R ← R · other`
    pub fn multiply(&mut self, other: &RotationMatrix) {
        self.m *= other.m;
    }

    /// `R ← other · R`
    pub fn pre_multiply(&mut self, other: &RotationMatrix) {
        self.m = other.m * self.m;
    }

    /// `R ← Rᵀ · other`
    pub fn multiply_transpose_this(&mut self, other: &RotationMatrix) {
        self.m = self.m.tr_mul(&other.m);
    }

    /// `R ← R · otherᵀ`
    pub fn multiply_transpose_other(&mut self, other: &RotationMatrix) {
        self.m *= other.m.transpose();
    }

    /// `R ← other · Rᵀ`
    pub fn pre_multiply_transpose_this(&mut self, other: &RotationMatrix) {
        self.m = other.m * self.m.transpose();
    }

    /// `R ← otherᵀ · R`
    pub fn pre_multiply_transpose_other(&mut self, other: &RotationMatrix) {
        self.m = other.m.tr_mul(&self.m);
    }

    pub fn append_yaw_rotation(&mut self, yaw: Real) {
        self.m *= conversion::yaw_matrix(yaw);
    }

    pub fn append_pitch_rotation(&mut self, pitch: Real) {
        self.m *= conversion::pitch_matrix(pitch);
    }

    pub fn append_roll_rotation(&mut self, roll: Real) {
        self.m *= conversion::roll_matrix(roll);
    }

    pub fn prepend_yaw_rotation(&mut self, yaw: Real) {
        self.m = conversion::yaw_matrix(yaw) * self.m;
    }

    pub fn prepend_pitch_rotation(&mut self, pitch: Real) {
        self.m = conversion::pitch_matrix(pitch) * self.m;
    }

    pub fn prepend_roll_rotation(&mut self, roll: Real) {
        self.m = conversion::roll_matrix(roll) * self.m;
    }

    /// Re-orthonormalizes to the closest rotation, correcting drift accumulated by
    /// repeated floating-point composition.
    pub fn normalize(&mut self) {
        let Some(normalized) = conversion::orthonormalize(&self.m) else {
            return;
        };
        let drift = (normalized - self.m).amax();
        if drift > tolerance() {
            log::debug!("re-orthonormalized rotation matrix, drift = {drift:e}");
        }
        self.m = normalized;
    }

    #[inline]
    pub fn transform(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.m * vector
    }

    #[inline]
    pub fn inverse_transform(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.m.tr_mul(vector)
    }

    /// Angle of the rotation taking `self` onto `other`, in `[0, π]`.
    pub fn distance(&self, other: &RotationMatrix) -> Real {
        conversion::axis_angle_from_matrix(&self.m.tr_mul(&other.m)).angle
    }
}

impl RotationReadOnly for RotationMatrix {
    fn to_rotation_matrix(&self) -> RotationMatrix {
        *self
    }

    fn to_quaternion(&self) -> UnitQuaternion {
        UnitQuaternion::from_quaternion_unchecked(conversion::quaternion_from_matrix(&self.m))
    }

    fn axis_angle(&self) -> AxisAngle {
        conversion::axis_angle_from_matrix(&self.m)
    }

    fn rotation_vector(&self) -> Vector3<Real> {
        conversion::rotation_vector_from_matrix(&self.m)
    }

    fn yaw_pitch_roll(&self) -> YawPitchRoll {
        conversion::yaw_pitch_roll_from_matrix(&self.m)
    }

    fn transform_vector(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.transform(vector)
    }

    fn inverse_transform_vector(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.inverse_transform(vector)
    }

    fn is_rotation_2d(&self, epsilon: Real) -> bool {
        conversion::is_rotation_2d(&self.m, epsilon)
    }
}

impl AbsDiffEq for RotationMatrix {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.m.abs_diff_eq(&other.m, epsilon)
    }
}

impl RelativeEq for RotationMatrix {
    fn default_max_relative() -> Self::Epsilon {
        Real::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.m.relative_eq(&other.m, epsilon, max_relative)
    }
}
