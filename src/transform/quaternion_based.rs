//! Unit quaternion + translation. Same group as [`RigidTransform`] without storing a matrix.

use crate::errors::TransformError;
use crate::float_types::Real;
use crate::rotation::{RotationMatrix, RotationReadOnly, UnitQuaternion, conversion};
use crate::transform::{
    RigidTransform, Transform, TransformReadOnly, matrix4_from_column_major,
    matrix4_from_row_major, split_homogeneous,
};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Matrix3, Matrix4, Vector3};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuaternionTransform {
    quaternion: UnitQuaternion,
    translation: Vector3<Real>,
}

impl QuaternionTransform {
    /// Identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts<R: RotationReadOnly>(rotation: &R, translation: &Vector3<Real>) -> Self {
        Self {
            quaternion: rotation.to_quaternion(),
            translation: *translation,
        }
    }

    /// Rigid part of any transform; the scale of an affine transform is dropped.
    pub fn from_transform<T: TransformReadOnly>(other: &T) -> Self {
        Self {
            quaternion: other.rotation_quaternion(),
            translation: *other.translation(),
        }
    }

    pub fn from_rigid_transform(other: &RigidTransform) -> Self {
        Self::from_transform(other)
    }

    pub fn from_homogeneous(matrix: &Matrix4<Real>) -> Result<Self, TransformError> {
        let mut transform = Self::new();
        transform.set_from_homogeneous(matrix)?;
        Ok(transform)
    }

    #[inline]
    pub const fn quaternion(&self) -> &UnitQuaternion {
        &self.quaternion
    }

    pub fn set(&mut self, other: &QuaternionTransform) {
        self.clone_from(other);
    }

    pub fn set_from_transform<T: TransformReadOnly>(&mut self, other: &T) {
        self.quaternion = other.rotation_quaternion();
        self.translation = *other.translation();
    }

    pub fn set_from_rigid_transform(&mut self, other: &RigidTransform) {
        self.set_from_transform(other);
    }

    pub fn set_rotation_and_translation<R: RotationReadOnly>(
        &mut self,
        rotation: &R,
        translation: &Vector3<Real>,
    ) {
        self.quaternion = rotation.to_quaternion();
        self.translation = *translation;
    }

    /// Validated (normalizing) quaternion setter.
    pub fn set_quaternion(
        &mut self,
        x: Real,
        y: Real,
        z: Real,
        s: Real,
    ) -> Result<(), TransformError> {
        self.quaternion.set_components(x, y, z, s)
    }

    pub fn set_quaternion_unchecked(&mut self, x: Real, y: Real, z: Real, s: Real) {
        self.quaternion.set_components_unchecked(x, y, z, s);
    }

    /// Validated: the 3×3 block must be a rotation matrix.
    pub fn set_rotation_matrix(&mut self, matrix: &Matrix3<Real>) -> Result<(), TransformError> {
        let rotation = RotationMatrix::from_matrix(matrix)?;
        self.quaternion.set_rotation_matrix(&rotation);
        Ok(())
    }

    /// No orthonormality check; the quaternion is still extracted normalized.
    pub fn set_rotation_matrix_unchecked(&mut self, matrix: &Matrix3<Real>) {
        self.quaternion
            .set_rotation_matrix(&RotationMatrix::from_matrix_unchecked(*matrix));
    }

    /// Reads the upper 3×4 block; the last row is ignored.
    pub fn set_from_homogeneous(&mut self, matrix: &Matrix4<Real>) -> Result<(), TransformError> {
        let (rotation, translation) = split_homogeneous(matrix);
        self.set_rotation_matrix(&rotation)?;
        self.translation = translation;
        Ok(())
    }

    /// Row-major 4×4.
    pub fn set_from_array(&mut self, values: &[Real; 16]) -> Result<(), TransformError> {
        self.set_from_homogeneous(&matrix4_from_row_major(values))
    }

    /// Column-major 4×4.
    pub fn set_as_transpose(&mut self, values: &[Real; 16]) -> Result<(), TransformError> {
        self.set_from_homogeneous(&matrix4_from_column_major(values))
    }

    /// `(qx, qy, qz, qs, tx, ty, tz)`; the quaternion is normalized.
    pub fn set_from_array7(&mut self, values: &[Real; 7]) -> Result<(), TransformError> {
        let [x, y, z, s, tx, ty, tz] = *values;
        self.quaternion.set_components(x, y, z, s)?;
        self.translation = Vector3::new(tx, ty, tz);
        Ok(())
    }

    /// Packs `(qx, qy, qz, qs, tx, ty, tz)` into `out`.
    pub fn get_array7(&self, out: &mut [Real; 7]) {
        let q = &self.quaternion;
        let t = &self.translation;
        *out = [q.x(), q.y(), q.z(), q.s(), t.x, t.y, t.z];
    }

    /// `(q⁻¹, -q⁻¹·t·q)`
    pub fn invert(&mut self) {
        self.quaternion.conjugate();
        self.translation = -self.quaternion.transform(&self.translation);
    }

    pub fn inverse(&self) -> Self {
        let mut inverse = self.clone();
        inverse.invert();
        inverse
    }

    /// Relative rotation angle and translation distance.
    pub fn geometrically_equals(&self, other: &QuaternionTransform, epsilon: Real) -> bool {
        self.quaternion.distance(&other.quaternion) <= epsilon
            && (self.translation - other.translation).norm() <= epsilon
    }

    pub fn epsilon_equals(&self, other: &QuaternionTransform, epsilon: Real) -> bool {
        self.abs_diff_eq(other, epsilon)
    }
}

impl TransformReadOnly for QuaternionTransform {
    #[inline]
    fn translation(&self) -> &Vector3<Real> {
        &self.translation
    }

    fn rotation_matrix(&self) -> RotationMatrix {
        self.quaternion.to_rotation_matrix()
    }

    fn rotation_quaternion(&self) -> UnitQuaternion {
        self.quaternion
    }

    fn linear_matrix(&self) -> Matrix3<Real> {
        conversion::matrix_from_quaternion(self.quaternion.quaternion())
    }

    fn linear_inverse_matrix(&self) -> Matrix3<Real> {
        self.linear_matrix().transpose()
    }

    fn linear_transform(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.quaternion.transform(vector)
    }

    fn linear_inverse_transform(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.quaternion.inverse_transform(vector)
    }
}

impl Transform for QuaternionTransform {
    fn set_identity(&mut self) {
        self.quaternion.set_identity();
        self.translation = Vector3::zeros();
    }

    #[inline]
    fn translation_mut(&mut self) -> &mut Vector3<Real> {
        &mut self.translation
    }

    fn set_rotation<R: RotationReadOnly>(&mut self, rotation: &R) {
        self.quaternion.set_rotation(rotation);
    }

    fn multiply<T: TransformReadOnly>(&mut self, other: &T) {
        let other_quaternion = other.rotation_quaternion();
        self.translation += self.quaternion.transform(other.translation());
        self.quaternion.multiply(&other_quaternion);
    }

    fn pre_multiply<T: TransformReadOnly>(&mut self, other: &T) {
        let other_quaternion = other.rotation_quaternion();
        self.translation = other_quaternion.transform(&self.translation) + other.translation();
        self.quaternion.pre_multiply(&other_quaternion);
    }

    fn multiply_invert_this<T: TransformReadOnly>(&mut self, other: &T) {
        let other_quaternion = other.rotation_quaternion();
        self.translation = self
            .quaternion
            .inverse_transform(&(other.translation() - self.translation));
        self.quaternion.multiply_conjugate_this(&other_quaternion);
    }

    fn multiply_invert_other<T: TransformReadOnly>(&mut self, other: &T) {
        let other_quaternion = other.rotation_quaternion();
        self.quaternion.multiply_conjugate_other(&other_quaternion);
        self.translation -= self.quaternion.transform(other.translation());
    }

    fn pre_multiply_invert_this<T: TransformReadOnly>(&mut self, other: &T) {
        let other_quaternion = other.rotation_quaternion();
        self.quaternion.pre_multiply_conjugate_this(&other_quaternion);
        self.translation = other.translation() - self.quaternion.transform(&self.translation);
    }

    fn pre_multiply_invert_other<T: TransformReadOnly>(&mut self, other: &T) {
        let other_quaternion = other.rotation_quaternion();
        self.translation =
            other_quaternion.inverse_transform(&(self.translation - other.translation()));
        self.quaternion.pre_multiply_conjugate_other(&other_quaternion);
    }

    fn append_rotation<R: RotationReadOnly>(&mut self, rotation: &R) {
        self.quaternion.multiply(&rotation.to_quaternion());
    }

    fn prepend_rotation<R: RotationReadOnly>(&mut self, rotation: &R) {
        let rotation = rotation.to_quaternion();
        self.translation = rotation.transform(&self.translation);
        self.quaternion.pre_multiply(&rotation);
    }

    /// Also brings the scalar part back to `s ≥ 0`.
    fn normalize_rotation_part(&mut self) {
        if let Err(error) = self.quaternion.normalize_and_limit_to_pi() {
            log::warn!("quaternion left as is: {error}");
        }
    }
}

impl AbsDiffEq for QuaternionTransform {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.quaternion.abs_diff_eq(&other.quaternion, epsilon)
            && self.translation.abs_diff_eq(&other.translation, epsilon)
    }
}

impl RelativeEq for QuaternionTransform {
    fn default_max_relative() -> Self::Epsilon {
        Real::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.quaternion.relative_eq(&other.quaternion, epsilon, max_relative)
            && self
                .translation
                .relative_eq(&other.translation, epsilon, max_relative)
    }
}
