//! Rotation-scale + translation.
//!
//! The linear part is `A = R · diag(s)`. Affine transforms with a non-unit scale are not
//! closed under inversion as the same shape, so there is no `invert()`; use
//! [`TransformReadOnly::inverse_transform`] or the rigid part instead.
//!
//! Composition only moves the rotation part: the receiver's scale stays on the right
//! of its rotation (`R' = R·R_other`, `A' = R'·diag(s)`) and the argument's scale, if
//! any, is ignored. Translations are always combined with the receiver's full `A`.

use crate::errors::TransformError;
use crate::float_types::Real;
use crate::rotation::{RotationMatrix, RotationReadOnly, RotationScaleMatrix};
use crate::transform::{
    RigidTransform, Transform, TransformReadOnly, matrix4_from_column_major,
    matrix4_from_row_major, split_homogeneous,
};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Matrix3, Matrix4, Vector3};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AffineTransform {
    rotation_scale: RotationScaleMatrix,
    translation: Vector3<Real>,
}

impl AffineTransform {
    /// Identity transform with unit scale.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(rotation_scale: &RotationScaleMatrix, translation: &Vector3<Real>) -> Self {
        Self {
            rotation_scale: *rotation_scale,
            translation: *translation,
        }
    }

    /// Unit scale.
    pub fn from_transform<T: TransformReadOnly>(other: &T) -> Self {
        let mut transform = Self::new();
        transform.set_from_transform(other);
        transform
    }

    pub fn from_homogeneous(matrix: &Matrix4<Real>) -> Result<Self, TransformError> {
        let mut transform = Self::new();
        transform.set_from_homogeneous(matrix)?;
        Ok(transform)
    }

    #[inline]
    pub const fn rotation_scale(&self) -> &RotationScaleMatrix {
        &self.rotation_scale
    }

    #[inline]
    pub const fn scale(&self) -> &Vector3<Real> {
        self.rotation_scale.scale()
    }

    /// Rigid part; the scale is dropped.
    pub fn to_rigid_transform(&self) -> RigidTransform {
        RigidTransform::from_transform(self)
    }

    pub fn set(&mut self, other: &AffineTransform) {
        self.clone_from(other);
    }

    /// Takes the rotation and translation of `other` and resets the scale to 1.
    pub fn set_from_transform<T: TransformReadOnly>(&mut self, other: &T) {
        self.rotation_scale.set_rotation(&other.rotation_matrix());
        self.rotation_scale.reset_scale();
        self.translation = *other.translation();
    }

    pub fn set_rotation_and_translation<R: RotationReadOnly>(
        &mut self,
        rotation: &R,
        translation: &Vector3<Real>,
    ) {
        self.rotation_scale.set_rotation(rotation);
        self.translation = *translation;
    }

    /// Validated: the block must decompose into `R · diag(s)` with positive `s`.
    pub fn set_rotation_scale_matrix(&mut self, matrix: &Matrix3<Real>) -> Result<(), TransformError> {
        self.rotation_scale.set_matrix(matrix)
    }

    /// Stores `rotation` and `scale` as given; neither is checked.
    pub fn set_rotation_scale_unchecked(&mut self, rotation: &Matrix3<Real>, scale: &Vector3<Real>) {
        self.rotation_scale.set_unchecked(rotation, scale);
    }

    /// Validated rotation-only setter; scale untouched.
    pub fn set_rotation_matrix(&mut self, matrix: &Matrix3<Real>) -> Result<(), TransformError> {
        self.rotation_scale.set_rotation_matrix(matrix)
    }

    pub fn set_rotation_matrix_unchecked(&mut self, matrix: &Matrix3<Real>) {
        self.rotation_scale.rotation_mut().set_matrix_unchecked(matrix);
    }

    pub fn set_scale(&mut self, x: Real, y: Real, z: Real) -> Result<(), TransformError> {
        self.rotation_scale.set_scale(x, y, z)
    }

    pub fn set_scale_vector(&mut self, scale: &Vector3<Real>) -> Result<(), TransformError> {
        self.rotation_scale.set_scale_vector(scale)
    }

    pub fn set_uniform_scale(&mut self, scale: Real) -> Result<(), TransformError> {
        self.rotation_scale.set_uniform_scale(scale)
    }

    pub fn reset_scale(&mut self) {
        self.rotation_scale.reset_scale();
    }

    pub fn set_from_homogeneous(&mut self, matrix: &Matrix4<Real>) -> Result<(), TransformError> {
        let (rotation_scale, translation) = split_homogeneous(matrix);
        self.rotation_scale.set_matrix(&rotation_scale)?;
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

    /// Relative rotation angle, translation distance and per-axis scale difference.
    pub fn geometrically_equals(&self, other: &AffineTransform, epsilon: Real) -> bool {
        self.rotation_scale
            .rotation()
            .distance(other.rotation_scale.rotation())
            <= epsilon
            && (self.translation - other.translation).norm() <= epsilon
            && (self.scale() - other.scale()).amax() <= epsilon
    }

    pub fn epsilon_equals(&self, other: &AffineTransform, epsilon: Real) -> bool {
        self.abs_diff_eq(other, epsilon)
    }
}

impl TransformReadOnly for AffineTransform {
    #[inline]
    fn translation(&self) -> &Vector3<Real> {
        &self.translation
    }

    fn rotation_matrix(&self) -> RotationMatrix {
        *self.rotation_scale.rotation()
    }

    fn linear_matrix(&self) -> Matrix3<Real> {
        self.rotation_scale.matrix()
    }

    fn linear_inverse_matrix(&self) -> Matrix3<Real> {
        self.rotation_scale.inverse_matrix()
    }

    fn linear_transform(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.rotation_scale.transform(vector)
    }

    fn linear_inverse_transform(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.rotation_scale.inverse_transform(vector)
    }
}

impl Transform for AffineTransform {
    fn set_identity(&mut self) {
        self.rotation_scale.set_identity();
        self.translation = Vector3::zeros();
    }

    #[inline]
    fn translation_mut(&mut self) -> &mut Vector3<Real> {
        &mut self.translation
    }

    fn set_rotation<R: RotationReadOnly>(&mut self, rotation: &R) {
        self.rotation_scale.set_rotation(rotation);
    }

    fn multiply<T: TransformReadOnly>(&mut self, other: &T) {
        let other_rotation = other.rotation_matrix();
        self.translation += self.rotation_scale.transform(other.translation());
        self.rotation_scale.rotation_mut().multiply(&other_rotation);
    }

    fn pre_multiply<T: TransformReadOnly>(&mut self, other: &T) {
        let other_rotation = other.rotation_matrix();
        self.translation = other_rotation.transform(&self.translation) + other.translation();
        self.rotation_scale.rotation_mut().pre_multiply(&other_rotation);
    }

    fn multiply_invert_this<T: TransformReadOnly>(&mut self, other: &T) {
        let other_rotation = other.rotation_matrix();
        self.translation = self
            .rotation_scale
            .inverse_transform(&(other.translation() - self.translation));
        self.rotation_scale
            .rotation_mut()
            .multiply_transpose_this(&other_rotation);
    }

    fn multiply_invert_other<T: TransformReadOnly>(&mut self, other: &T) {
        let other_rotation = other.rotation_matrix();
        let offset = other_rotation.inverse_transform(other.translation());
        self.translation -= self.rotation_scale.transform(&offset);
        self.rotation_scale
            .rotation_mut()
            .multiply_transpose_other(&other_rotation);
    }

    /// Only the rigid part of the receiver is inverted.
    fn pre_multiply_invert_this<T: TransformReadOnly>(&mut self, other: &T) {
        let other_rotation = other.rotation_matrix();
        let rotation = self.rotation_scale.rotation_mut();
        rotation.pre_multiply_transpose_this(&other_rotation);
        self.translation = other.translation() - rotation.transform(&self.translation);
    }

    fn pre_multiply_invert_other<T: TransformReadOnly>(&mut self, other: &T) {
        let other_rotation = other.rotation_matrix();
        self.translation =
            other_rotation.inverse_transform(&(self.translation - other.translation()));
        self.rotation_scale
            .rotation_mut()
            .pre_multiply_transpose_other(&other_rotation);
    }

    fn append_rotation<R: RotationReadOnly>(&mut self, rotation: &R) {
        self.rotation_scale
            .rotation_mut()
            .multiply(&rotation.to_rotation_matrix());
    }

    fn prepend_rotation<R: RotationReadOnly>(&mut self, rotation: &R) {
        let rotation = rotation.to_rotation_matrix();
        self.translation = rotation.transform(&self.translation);
        self.rotation_scale.rotation_mut().pre_multiply(&rotation);
    }

    fn normalize_rotation_part(&mut self) {
        self.rotation_scale.normalize_rotation_matrix();
    }
}

impl AbsDiffEq for AffineTransform {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.rotation_scale.abs_diff_eq(&other.rotation_scale, epsilon)
            && self.translation.abs_diff_eq(&other.translation, epsilon)
    }
}

impl RelativeEq for AffineTransform {
    fn default_max_relative() -> Self::Epsilon {
        Real::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.rotation_scale
            .relative_eq(&other.rotation_scale, epsilon, max_relative)
            && self
                .translation
                .relative_eq(&other.translation, epsilon, max_relative)
    }
}
