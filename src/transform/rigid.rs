//! Rotation matrix + translation: an element of SE(3).

use crate::errors::TransformError;
use crate::float_types::Real;
use crate::rotation::{RotationMatrix, RotationReadOnly, UnitQuaternion};
use crate::transform::{
    QuaternionTransform, Transform, TransformReadOnly, matrix4_from_column_major,
    matrix4_from_row_major, split_homogeneous,
};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Matrix3, Matrix4, Vector3};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RigidTransform {
    rotation: RotationMatrix,
    translation: Vector3<Real>,
}

impl RigidTransform {
    /// Identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts<R: RotationReadOnly>(rotation: &R, translation: &Vector3<Real>) -> Self {
        Self {
            rotation: rotation.to_rotation_matrix(),
            translation: *translation,
        }
    }

    /// Rigid part of any transform; the scale of an affine transform is dropped.
    pub fn from_transform<T: TransformReadOnly>(other: &T) -> Self {
        Self {
            rotation: other.rotation_matrix(),
            translation: *other.translation(),
        }
    }

    pub fn from_homogeneous(matrix: &Matrix4<Real>) -> Result<Self, TransformError> {
        let mut transform = Self::new();
        transform.set_from_homogeneous(matrix)?;
        Ok(transform)
    }

    #[inline]
    pub const fn rotation(&self) -> &RotationMatrix {
        &self.rotation
    }

    pub fn set(&mut self, other: &RigidTransform) {
        self.clone_from(other);
    }

    pub fn set_from_transform<T: TransformReadOnly>(&mut self, other: &T) {
        self.rotation = other.rotation_matrix();
        self.translation = *other.translation();
    }

    pub fn set_from_quaternion_transform(&mut self, other: &QuaternionTransform) {
        self.set_from_transform(other);
    }

    pub fn set_rotation_and_translation<R: RotationReadOnly>(
        &mut self,
        rotation: &R,
        translation: &Vector3<Real>,
    ) {
        self.rotation = rotation.to_rotation_matrix();
        self.translation = *translation;
    }

    /// Validated; the receiver is untouched on failure.
    pub fn set_rotation_matrix(&mut self, matrix: &Matrix3<Real>) -> Result<(), TransformError> {
        self.rotation.set_matrix(matrix)
    }

    pub fn set_rotation_matrix_unchecked(&mut self, matrix: &Matrix3<Real>) {
        self.rotation.set_matrix_unchecked(matrix);
    }

    /// Reads the upper 3×4 block; the last row is ignored.
    pub fn set_from_homogeneous(&mut self, matrix: &Matrix4<Real>) -> Result<(), TransformError> {
        let (rotation, translation) = split_homogeneous(matrix);
        self.rotation.set_matrix(&rotation)?;
        self.translation = translation;
        Ok(())
    }

    /// Row-major 4×4.
    pub fn set_from_array(&mut self, values: &[Real; 16]) -> Result<(), TransformError> {
        self.set_from_homogeneous(&matrix4_from_row_major(values))
    }

    /// Column-major 4×4, i.e. the transpose of the [`set_from_array`](Self::set_from_array) layout.
    pub fn set_as_transpose(&mut self, values: &[Real; 16]) -> Result<(), TransformError> {
        self.set_from_homogeneous(&matrix4_from_column_major(values))
    }

    /// `(Rᵀ, -Rᵀ·t)`
    pub fn invert(&mut self) {
        self.rotation.transpose();
        self.translation = -self.rotation.transform(&self.translation);
    }

    pub fn inverse(&self) -> Self {
        let mut inverse = self.clone();
        inverse.invert();
        inverse
    }

    /// Compares the relative rotation angle and the translation distance instead of
    /// individual components.
    pub fn geometrically_equals(&self, other: &RigidTransform, epsilon: Real) -> bool {
        self.rotation.distance(&other.rotation) <= epsilon
            && (self.translation - other.translation).norm() <= epsilon
    }

    pub fn epsilon_equals(&self, other: &RigidTransform, epsilon: Real) -> bool {
        self.abs_diff_eq(other, epsilon)
    }
}

impl TransformReadOnly for RigidTransform {
    #[inline]
    fn translation(&self) -> &Vector3<Real> {
        &self.translation
    }

    fn rotation_matrix(&self) -> RotationMatrix {
        self.rotation
    }

    fn rotation_quaternion(&self) -> UnitQuaternion {
        self.rotation.to_quaternion()
    }

    fn linear_matrix(&self) -> Matrix3<Real> {
        *self.rotation.matrix()
    }

    fn linear_inverse_matrix(&self) -> Matrix3<Real> {
        self.rotation.matrix().transpose()
    }

    fn linear_transform(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.rotation.transform(vector)
    }

    fn linear_inverse_transform(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.rotation.inverse_transform(vector)
    }
}

impl Transform for RigidTransform {
    fn set_identity(&mut self) {
        self.rotation.set_identity();
        self.translation = Vector3::zeros();
    }

    #[inline]
    fn translation_mut(&mut self) -> &mut Vector3<Real> {
        &mut self.translation
    }

    fn set_rotation<R: RotationReadOnly>(&mut self, rotation: &R) {
        self.rotation.set_rotation(rotation);
    }

    fn multiply<T: TransformReadOnly>(&mut self, other: &T) {
        let other_rotation = other.rotation_matrix();
        self.translation += self.rotation.transform(other.translation());
        self.rotation.multiply(&other_rotation);
    }

    fn pre_multiply<T: TransformReadOnly>(&mut self, other: &T) {
        let other_rotation = other.rotation_matrix();
        self.translation = other_rotation.transform(&self.translation) + other.translation();
        self.rotation.pre_multiply(&other_rotation);
    }

    fn multiply_invert_this<T: TransformReadOnly>(&mut self, other: &T) {
        let other_rotation = other.rotation_matrix();
        self.translation = self
            .rotation
            .inverse_transform(&(other.translation() - self.translation));
        self.rotation.multiply_transpose_this(&other_rotation);
    }

    fn multiply_invert_other<T: TransformReadOnly>(&mut self, other: &T) {
        let other_rotation = other.rotation_matrix();
        self.rotation.multiply_transpose_other(&other_rotation);
        self.translation -= self.rotation.transform(other.translation());
    }

    fn pre_multiply_invert_this<T: TransformReadOnly>(&mut self, other: &T) {
        let other_rotation = other.rotation_matrix();
        self.rotation.pre_multiply_transpose_this(&other_rotation);
        self.translation = other.translation() - self.rotation.transform(&self.translation);
    }

    fn pre_multiply_invert_other<T: TransformReadOnly>(&mut self, other: &T) {
        let other_rotation = other.rotation_matrix();
        self.translation =
            other_rotation.inverse_transform(&(self.translation - other.translation()));
        self.rotation.pre_multiply_transpose_other(&other_rotation);
    }

    fn append_rotation<R: RotationReadOnly>(&mut self, rotation: &R) {
        self.rotation.multiply(&rotation.to_rotation_matrix());
    }

    fn prepend_rotation<R: RotationReadOnly>(&mut self, rotation: &R) {
        let rotation = rotation.to_rotation_matrix();
        self.translation = rotation.transform(&self.translation);
        self.rotation.pre_multiply(&rotation);
    }

    fn normalize_rotation_part(&mut self) {
        self.rotation.normalize();
    }
}

impl AbsDiffEq for RigidTransform {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.rotation.abs_diff_eq(&other.rotation, epsilon)
            && self.translation.abs_diff_eq(&other.translation, epsilon)
    }
}

impl RelativeEq for RigidTransform {
    fn default_max_relative() -> Self::Epsilon {
        Real::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.rotation.relative_eq(&other.rotation, epsilon, max_relative)
            && self
                .translation
                .relative_eq(&other.translation, epsilon, max_relative)
    }
}
