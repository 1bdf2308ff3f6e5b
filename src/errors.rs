//! Errors raised by validated setters, 2D application and element access

use crate::float_types::Real;
use nalgebra::{Matrix3, Quaternion, Vector3};
use std::fmt::Display;

/// All the contract violations a transform operation can report
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// (NotARotationMatrix) A 3×3 block is not orthonormal with determinant +1
    NotARotationMatrix(Matrix3<Real>),
    /// (NotARotationScaleMatrix) A 3×3 block does not decompose into `R·diag(s)`
    NotARotationScaleMatrix(Matrix3<Real>),
    /// (InvalidScale) A scale component is not strictly positive
    InvalidScale(Vector3<Real>),
    /// (NotAMatrix2D) A rotation is not confined to the XY plane
    NotAMatrix2D(Matrix3<Real>),
    /// (IndexOutOfBounds) `element(row, col)` outside the 4×4 layout
    IndexOutOfBounds { row: usize, col: usize },
    /// (DegenerateQuaternion) A quaternion with zero or non-finite norm
    DegenerateQuaternion(Quaternion<Real>),
}

impl Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::NotARotationMatrix(matrix) => write!(f, "(NotARotationMatrix) The matrix is not a rotation matrix: {}", matrix),
            TransformError::NotARotationScaleMatrix(matrix) => write!(f, "(NotARotationScaleMatrix) The matrix is not a rotation-scale matrix: {}", matrix),
            TransformError::InvalidScale(scale) => write!(f, "(InvalidScale) Every scale component must be strictly positive, got: {}", scale),
            TransformError::NotAMatrix2D(matrix) => write!(f, "(NotAMatrix2D) The rotation is not in the XY plane: {}", matrix),
            TransformError::IndexOutOfBounds { row, col } => write!(f, "(IndexOutOfBounds) row and col must be in [0, 3], got ({}, {})", row, col),
            TransformError::DegenerateQuaternion(q) => write!(f, "(DegenerateQuaternion) Cannot normalize the quaternion ({}, {}, {}, {})", q.i, q.j, q.k, q.w),
        }
    }
}
