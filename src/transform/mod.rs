//! Rigid, quaternion-based and affine transforms.
//!
//! A transform `T = (A, t)` maps a point `p` to `A·p + t`. `A` is a rotation for
//! [`RigidTransform`] and [`QuaternionTransform`], and a rotation-scale `R·diag(s)`
//! for [`AffineTransform`].
//!
//! [`TransformReadOnly`] is the inspection capability shared by the three types,
//! [`Transform`] adds the setters and the composition algebra. Application to
//! points, vectors and the other primitives goes through [`Transformable`].

use crate::errors::TransformError;
use crate::float_types::Real;
use crate::rotation::{AxisAngle, RotationMatrix, RotationReadOnly, UnitQuaternion, YawPitchRoll};
use nalgebra::{Matrix3, Matrix4, Vector3};

pub mod affine;
pub mod apply;
pub mod quaternion_based;
pub mod rigid;

pub use affine::AffineTransform;
pub use apply::{Planar, Transformable};
pub use quaternion_based::QuaternionTransform;
pub use rigid::RigidTransform;

/// Getters and primitive application.
///
/// Implementors provide the linear part `A` (and its inverse without a general
/// matrix inversion) plus the translation; the 4×4 view, element access and
/// application of every primitive are derived from those.
pub trait TransformReadOnly {
    fn translation(&self) -> &Vector3<Real>;

    /// Pure rotation part; the scale of an affine transform is dropped.
    fn rotation_matrix(&self) -> RotationMatrix;

    fn rotation_quaternion(&self) -> UnitQuaternion {
        self.rotation_matrix().to_quaternion()
    }

    /// `A`
    fn linear_matrix(&self) -> Matrix3<Real>;

    /// `A⁻¹`
    fn linear_inverse_matrix(&self) -> Matrix3<Real>;

    /// `A · v`
    fn linear_transform(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.linear_matrix() * vector
    }

    /// `A⁻¹ · v`
    fn linear_inverse_transform(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.linear_inverse_matrix() * vector
    }

    /// Element of the 4×4 homogeneous matrix. The last row is `[0, 0, 0, 1]` and the
    /// last column of the first three rows is the translation.
    fn element(&self, row: usize, col: usize) -> Result<Real, TransformError> {
        match (row, col) {
            (0..=2, 0..=2) => Ok(self.linear_matrix()[(row, col)]),
            (0..=2, 3) => Ok(self.translation()[row]),
            (3, 0..=2) => Ok(0.0),
            (3, 3) => Ok(1.0),
            _ => Err(TransformError::IndexOutOfBounds { row, col }),
        }
    }

    fn to_homogeneous(&self) -> Matrix4<Real> {
        let mut homogeneous = Matrix4::identity();
        homogeneous
            .fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&self.linear_matrix());
        homogeneous
            .fixed_view_mut::<3, 1>(0, 3)
            .copy_from(self.translation());
        homogeneous
    }

    /// Packs the 4×4 matrix row-major into `out`.
    fn get_array(&self, out: &mut [Real; 16]) {
        let homogeneous = self.to_homogeneous();
        for (row, chunk) in out.chunks_exact_mut(4).enumerate() {
            for (col, value) in chunk.iter_mut().enumerate() {
                *value = homogeneous[(row, col)];
            }
        }
    }

    /// Whether the rotation part only turns about Z, within `epsilon`.
    fn is_rotation_2d(&self, epsilon: Real) -> bool {
        self.rotation_matrix().is_rotation_2d(epsilon)
    }

    fn check_if_rotation_2d(&self) -> Result<(), TransformError> {
        self.rotation_matrix().check_if_rotation_2d()
    }

    fn transform<P: Transformable>(&self, original: &P) -> P
    where
        Self: Sized,
    {
        original.transformed_by(self)
    }

    fn inverse_transform<P: Transformable>(&self, original: &P) -> P
    where
        Self: Sized,
    {
        original.inverse_transformed_by(self)
    }

    fn transform_in_place<P: Transformable>(&self, primitive: &mut P)
    where
        Self: Sized,
    {
        *primitive = primitive.transformed_by(self);
    }

    fn inverse_transform_in_place<P: Transformable>(&self, primitive: &mut P)
    where
        Self: Sized,
    {
        *primitive = primitive.inverse_transformed_by(self);
    }

    /// 2D application; with `check_planarity` the rotation must be about Z only,
    /// else [`TransformError::NotAMatrix2D`].
    fn transform_2d<P: Planar>(&self, original: &P, check_planarity: bool) -> Result<P, TransformError>
    where
        Self: Sized,
    {
        if check_planarity {
            self.check_if_rotation_2d()?;
        }
        Ok(original.transformed_by(self))
    }

    fn inverse_transform_2d<P: Planar>(
        &self,
        original: &P,
        check_planarity: bool,
    ) -> Result<P, TransformError>
    where
        Self: Sized,
    {
        if check_planarity {
            self.check_if_rotation_2d()?;
        }
        Ok(original.inverse_transformed_by(self))
    }
}

/// Setters and composition.
///
/// Composition follows `this ← this ∘ other` for `multiply` and `this ← other ∘ this`
/// for `pre_multiply`. The invert variants use the inverse of one operand without
/// materializing it: a rotation is inverted by transposition (or conjugation) and a
/// translation by `-Rᵀ·t`. When the argument is an [`AffineTransform`] only its
/// rotation and translation take part, its scale is ignored.
pub trait Transform: TransformReadOnly {
    fn set_identity(&mut self);

    fn translation_mut(&mut self) -> &mut Vector3<Real>;

    /// Replaces the rotation; an affine transform keeps its scale.
    fn set_rotation<R: RotationReadOnly>(&mut self, rotation: &R);

    /// `this ← this ∘ other`
    fn multiply<T: TransformReadOnly>(&mut self, other: &T);

    /// `this ← other ∘ this`
    fn pre_multiply<T: TransformReadOnly>(&mut self, other: &T);

    /// `this ← this⁻¹ ∘ other`
    fn multiply_invert_this<T: TransformReadOnly>(&mut self, other: &T);

    /// `this ← this ∘ other⁻¹`
    fn multiply_invert_other<T: TransformReadOnly>(&mut self, other: &T);

    /// `this ← other ∘ this⁻¹`
    fn pre_multiply_invert_this<T: TransformReadOnly>(&mut self, other: &T);

    /// `this ← other⁻¹ ∘ this`
    fn pre_multiply_invert_other<T: TransformReadOnly>(&mut self, other: &T);

    /// `this ← this ∘ (rotation, 0)`; the translation is unchanged.
    fn append_rotation<R: RotationReadOnly>(&mut self, rotation: &R);

    /// `this ← (rotation, 0) ∘ this`; the translation is rotated too.
    fn prepend_rotation<R: RotationReadOnly>(&mut self, rotation: &R);

    /// Removes floating-point drift from the rotation part.
    fn normalize_rotation_part(&mut self);

    fn set_translation(&mut self, x: Real, y: Real, z: Real) {
        *self.translation_mut() = Vector3::new(x, y, z);
    }

    fn set_translation_vector(&mut self, translation: &Vector3<Real>) {
        *self.translation_mut() = *translation;
    }

    fn set_translation_to_zero(&mut self) {
        *self.translation_mut() = Vector3::zeros();
    }

    fn set_rotation_to_zero(&mut self) {
        self.set_rotation(&RotationMatrix::identity());
    }

    fn set_rotation_yaw(&mut self, yaw: Real) {
        self.set_rotation(&YawPitchRoll::from_yaw(yaw));
    }

    fn set_rotation_pitch(&mut self, pitch: Real) {
        self.set_rotation(&YawPitchRoll::from_pitch(pitch));
    }

    fn set_rotation_roll(&mut self, roll: Real) {
        self.set_rotation(&YawPitchRoll::from_roll(roll));
    }

    fn set_rotation_yaw_pitch_roll(&mut self, yaw: Real, pitch: Real, roll: Real) {
        self.set_rotation(&YawPitchRoll::new(yaw, pitch, roll));
    }

    /// `(roll, pitch, yaw)`.
    fn set_rotation_euler(&mut self, euler: &Vector3<Real>) {
        self.set_rotation(&YawPitchRoll::from_euler(euler));
    }

    fn set_rotation_axis_angle(&mut self, axis: &Vector3<Real>, angle: Real) {
        self.set_rotation(&AxisAngle::new(*axis, angle));
    }

    fn set_rotation_vector(&mut self, rotation_vector: &Vector3<Real>) {
        self.set_rotation(&AxisAngle::from_rotation_vector(rotation_vector));
    }

    fn append_yaw_rotation(&mut self, yaw: Real) {
        self.append_rotation(&YawPitchRoll::from_yaw(yaw));
    }

    fn append_pitch_rotation(&mut self, pitch: Real) {
        self.append_rotation(&YawPitchRoll::from_pitch(pitch));
    }

    fn append_roll_rotation(&mut self, roll: Real) {
        self.append_rotation(&YawPitchRoll::from_roll(roll));
    }

    fn prepend_yaw_rotation(&mut self, yaw: Real) {
        self.prepend_rotation(&YawPitchRoll::from_yaw(yaw));
    }

    fn prepend_pitch_rotation(&mut self, pitch: Real) {
        self.prepend_rotation(&YawPitchRoll::from_pitch(pitch));
    }

    fn prepend_roll_rotation(&mut self, roll: Real) {
        self.prepend_rotation(&YawPitchRoll::from_roll(roll));
    }

    /// `this ← this ∘ (I, (x, y, z))`: the offset is expressed in the local frame.
    fn append_translation(&mut self, x: Real, y: Real, z: Real) {
        let offset = self.linear_transform(&Vector3::new(x, y, z));
        *self.translation_mut() += offset;
    }

    /// `this ← (I, (x, y, z)) ∘ this`: the offset is expressed in the parent frame.
    fn prepend_translation(&mut self, x: Real, y: Real, z: Real) {
        *self.translation_mut() += Vector3::new(x, y, z);
    }
}

/// Row-major 16 values to a 4×4 matrix.
pub(crate) fn matrix4_from_row_major(values: &[Real; 16]) -> Matrix4<Real> {
    Matrix4::from_row_slice(values)
}

/// Column-major 16 values to a 4×4 matrix.
pub(crate) fn matrix4_from_column_major(values: &[Real; 16]) -> Matrix4<Real> {
    Matrix4::from_column_slice(values)
}

/// Splits the upper 3×4 block of a homogeneous matrix.
pub(crate) fn split_homogeneous(matrix: &Matrix4<Real>) -> (Matrix3<Real>, Vector3<Real>) {
    (
        matrix.fixed_view::<3, 3>(0, 0).into_owned(),
        matrix.fixed_view::<3, 1>(0, 3).into_owned(),
    )
}
