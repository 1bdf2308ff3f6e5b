//! Rotation matrix composed with a strictly positive per-axis scale: `M = R · diag(s)`.

use crate::errors::TransformError;
use crate::float_types::{EPSILON, Real, tolerance};
use crate::rotation::{RotationMatrix, RotationReadOnly, conversion};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Matrix3, Vector3};

/// Setting the rotation never touches the scale and vice versa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationScaleMatrix {
    rotation: RotationMatrix,
    scale: Vector3<Real>,
}

impl Default for RotationScaleMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

fn check_scale(scale: &Vector3<Real>) -> Result<(), TransformError> {
    if scale.iter().all(|s| s.is_finite() && *s > 0.0) {
        Ok(())
    } else {
        Err(TransformError::InvalidScale(*scale))
    }
}

impl RotationScaleMatrix {
    pub fn identity() -> Self {
        Self {
            rotation: RotationMatrix::identity(),
            scale: Vector3::repeat(1.0),
        }
    }

    pub fn new<R: RotationReadOnly>(
        rotation: &R,
        scale: &Vector3<Real>,
    ) -> Result<Self, TransformError> {
        check_scale(scale)?;
        Ok(Self {
            rotation: rotation.to_rotation_matrix(),
            scale: *scale,
        })
    }

    /// Decomposes `matrix` into `R · diag(s)`.
    pub fn from_matrix(matrix: &Matrix3<Real>) -> Result<Self, TransformError> {
        let mut rotation_scale = Self::identity();
        rotation_scale.set_matrix(matrix)?;
        Ok(rotation_scale)
    }

    #[inline]
    pub const fn rotation(&self) -> &RotationMatrix {
        &self.rotation
    }

    /// The rotation part maintains its own invariant, so handing it out mutably
    /// cannot corrupt the scale.
    #[inline]
    pub const fn rotation_mut(&mut self) -> &mut RotationMatrix {
        &mut self.rotation
    }

    #[inline]
    pub const fn scale(&self) -> &Vector3<Real> {
        &self.scale
    }

    /// Recomposes `R · diag(s)`.
    pub fn matrix(&self) -> Matrix3<Real> {
        let mut m = *self.rotation.matrix();
        for (mut column, s) in m.column_iter_mut().zip(self.scale.iter()) {
            column *= *s;
        }
        m
    }

    /// `diag(1/s) · Rᵀ`, no general inversion involved.
    pub fn inverse_matrix(&self) -> Matrix3<Real> {
        let mut m = self.rotation.matrix().transpose();
        for (mut row, s) in m.row_iter_mut().zip(self.scale.iter()) {
            row /= *s;
        }
        m
    }

    pub fn element(&self, row: usize, col: usize) -> Result<Real, TransformError> {
        Ok(self.rotation.element(row, col)? * self.scale[col])
    }

    pub fn set_identity(&mut self) {
        self.rotation.set_identity();
        self.reset_scale();
    }

    pub fn set(&mut self, other: &RotationScaleMatrix) {
        *self = *other;
    }

    /// Validated decomposition; fails with [`TransformError::NotARotationScaleMatrix`]
    /// when a column vanishes or the normalized columns are not a rotation.
    pub fn set_matrix(&mut self, matrix: &Matrix3<Real>) -> Result<(), TransformError> {
        let scale = Vector3::from_iterator(matrix.column_iter().map(|column| column.norm()));
        if scale.iter().any(|s| !s.is_finite() || *s <= EPSILON) {
            return Err(TransformError::NotARotationScaleMatrix(*matrix));
        }
        let mut rotation = *matrix;
        for (mut column, s) in rotation.column_iter_mut().zip(scale.iter()) {
            column /= *s;
        }
        if !conversion::is_rotation_matrix(&rotation, tolerance()) {
            return Err(TransformError::NotARotationScaleMatrix(*matrix));
        }
        self.rotation.set_matrix_unchecked(&rotation);
        self.scale = scale;
        Ok(())
    }

    pub fn set_unchecked(&mut self, rotation: &Matrix3<Real>, scale: &Vector3<Real>) {
        self.rotation.set_matrix_unchecked(rotation);
        self.scale = *scale;
    }

    /// Scale is left untouched.
    pub fn set_rotation<R: RotationReadOnly>(&mut self, rotation: &R) {
        self.rotation.set_rotation(rotation);
    }

    pub fn set_rotation_matrix(&mut self, matrix: &Matrix3<Real>) -> Result<(), TransformError> {
        self.rotation.set_matrix(matrix)
    }

    pub fn set_rotation_yaw_pitch_roll(&mut self, yaw: Real, pitch: Real, roll: Real) {
        self.rotation.set_yaw_pitch_roll(yaw, pitch, roll);
    }

    /// Rotation is left untouched; on failure nothing changes.
    pub fn set_scale(&mut self, x: Real, y: Real, z: Real) -> Result<(), TransformError> {
        self.set_scale_vector(&Vector3::new(x, y, z))
    }

    pub fn set_scale_vector(&mut self, scale: &Vector3<Real>) -> Result<(), TransformError> {
        check_scale(scale)?;
        self.scale = *scale;
        Ok(())
    }

    pub fn set_uniform_scale(&mut self, scale: Real) -> Result<(), TransformError> {
        self.set_scale(scale, scale, scale)
    }

    pub fn reset_scale(&mut self) {
        log::trace!("scale reset from {:?}", self.scale);
        self.scale = Vector3::repeat(1.0);
    }

    /// Re-orthonormalizes `R`, scale unchanged.
    pub fn normalize_rotation_matrix(&mut self) {
        self.rotation.normalize();
    }

    /// `R · (s ∘ v)`
    pub fn transform(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.rotation.transform(&self.scale.component_mul(vector))
    }

    /// `(Rᵀ · v) ∘ (1/s)`
    pub fn inverse_transform(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.rotation
            .inverse_transform(vector)
            .component_div(&self.scale)
    }

    pub fn append_yaw_rotation(&mut self, yaw: Real) {
        self.rotation.append_yaw_rotation(yaw);
    }

    pub fn append_pitch_rotation(&mut self, pitch: Real) {
        self.rotation.append_pitch_rotation(pitch);
    }

    pub fn append_roll_rotation(&mut self, roll: Real) {
        self.rotation.append_roll_rotation(roll);
    }

    pub fn prepend_yaw_rotation(&mut self, yaw: Real) {
        self.rotation.prepend_yaw_rotation(yaw);
    }

    pub fn prepend_pitch_rotation(&mut self, pitch: Real) {
        self.rotation.prepend_pitch_rotation(pitch);
    }

    pub fn prepend_roll_rotation(&mut self, roll: Real) {
        self.rotation.prepend_roll_rotation(roll);
    }
}

impl AbsDiffEq for RotationScaleMatrix {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.rotation.abs_diff_eq(&other.rotation, epsilon)
            && self.scale.abs_diff_eq(&other.scale, epsilon)
    }
}

impl RelativeEq for RotationScaleMatrix {
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
            && self.scale.relative_eq(&other.scale, epsilon, max_relative)
    }
}
