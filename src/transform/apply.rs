//! Application of a transform to geometric primitives.
//!
//! Every primitive says how it maps under `T = (A, t)`. Points get the translation,
//! free vectors don't, rotations only see the rotation part of `T`. A [`Vector4`]
//! `(v, s)` is a homogeneous point scaled by `s`, so `s = 0` is a vector and `s = 1`
//! a point.

use crate::float_types::Real;
use crate::rotation::{RotationMatrix, RotationScaleMatrix, UnitQuaternion};
use crate::transform::{
    AffineTransform, QuaternionTransform, RigidTransform, Transform, TransformReadOnly,
};
use nalgebra::{Matrix3, Point2, Point3, Vector2, Vector3, Vector4};

/// A value a transform can be applied to.
pub trait Transformable: Sized {
    fn transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self;

    fn inverse_transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self;
}

/// Primitives living in the XY plane.
///
/// The value is lifted to `z = 0`, the full 3D rule is applied and the result's Z is
/// dropped, as is the Z of the translation. The rotation is not projected onto a
/// rotation about Z. For a forward application this amounts to the upper-left 2×2
/// block of the linear part plus `(tx, ty)`. The inverse goes through the 3D inverse
/// before dropping Z, so when the rotation tilts the plane (a `check_planarity = false`
/// call with a non-planar rotation) it is not the inverse of the forward 2D map.
pub trait Planar: Transformable {}

impl Transformable for Point3<Real> {
    fn transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        Point3::from(transform.linear_transform(&self.coords) + transform.translation())
    }

    fn inverse_transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        Point3::from(transform.linear_inverse_transform(&(self.coords - transform.translation())))
    }
}

impl Transformable for Vector3<Real> {
    fn transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        transform.linear_transform(self)
    }

    fn inverse_transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        transform.linear_inverse_transform(self)
    }
}

/// `(A·v + s·t, s)`
impl Transformable for Vector4<Real> {
    fn transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        let v = transform.linear_transform(&self.xyz()) + transform.translation() * self.w;
        Vector4::new(v.x, v.y, v.z, self.w)
    }

    fn inverse_transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        let v = transform
            .linear_inverse_transform(&(self.xyz() - transform.translation() * self.w));
        Vector4::new(v.x, v.y, v.z, self.w)
    }
}

/// Change of basis of a linear map: `A·M·A⁻¹`.
impl Transformable for Matrix3<Real> {
    fn transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        transform.linear_matrix() * self * transform.linear_inverse_matrix()
    }

    fn inverse_transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        transform.linear_inverse_matrix() * self * transform.linear_matrix()
    }
}

impl Transformable for UnitQuaternion {
    fn transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        let mut out = transform.rotation_quaternion();
        out.multiply(self);
        out
    }

    fn inverse_transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        let mut out = transform.rotation_quaternion();
        out.multiply_conjugate_this(self);
        out
    }
}

impl Transformable for RotationMatrix {
    fn transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        let mut out = *self;
        out.pre_multiply(&transform.rotation_matrix());
        out
    }

    fn inverse_transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        let mut out = *self;
        out.pre_multiply_transpose_other(&transform.rotation_matrix());
        out
    }
}

/// Only the rotation part moves; the scale is intrinsic to the primitive.
impl Transformable for RotationScaleMatrix {
    fn transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        let mut out = *self;
        out.rotation_mut().pre_multiply(&transform.rotation_matrix());
        out
    }

    fn inverse_transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        let mut out = *self;
        out.rotation_mut()
            .pre_multiply_transpose_other(&transform.rotation_matrix());
        out
    }
}

impl Transformable for Point2<Real> {
    fn transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        let v = transform.linear_transform(&Vector3::new(self.x, self.y, 0.0));
        let t = transform.translation();
        Point2::new(v.x + t.x, v.y + t.y)
    }

    fn inverse_transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        let t = transform.translation();
        let v = transform.linear_inverse_transform(&Vector3::new(self.x - t.x, self.y - t.y, 0.0));
        Point2::new(v.x, v.y)
    }
}

impl Planar for Point2<Real> {}

impl Transformable for Vector2<Real> {
    fn transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        transform
            .linear_transform(&Vector3::new(self.x, self.y, 0.0))
            .xy()
    }

    fn inverse_transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
        transform
            .linear_inverse_transform(&Vector3::new(self.x, self.y, 0.0))
            .xy()
    }
}

impl Planar for Vector2<Real> {}

/// Transforms applied to transforms: `T ∘ self` and `T⁻¹ ∘ self`. The scale of an
/// affine `T` is ignored, as in [`Transform::pre_multiply`].
macro_rules! impl_transformable_for_transform {
    ($($ty:ty),*) => {$(
        impl Transformable for $ty {
            fn transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
                let mut out = self.clone();
                out.pre_multiply(transform);
                out
            }

            fn inverse_transformed_by<T: TransformReadOnly>(&self, transform: &T) -> Self {
                let mut out = self.clone();
                out.pre_multiply_invert_other(transform);
                out
            }
        }
    )*};
}

impl_transformable_for_transform!(RigidTransform, QuaternionTransform, AffineTransform);
