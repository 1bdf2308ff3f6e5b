//! Canonical conversions between rotation representations.
//!
//! Every representation is converted through one of three hubs: the 3×3 matrix,
//! the raw quaternion `(x, y, z, s)`, or the axis-angle pair. The typed wrappers in
//! the parent module only call into these functions, so each formula lives once.
//!
//! Conventions:
//! - quaternions are stored as nalgebra [`Quaternion`]s, `w` being the scalar part `s`;
//! - yaw-pitch-roll is intrinsic Z-Y-X: `R = Rz(yaw) · Ry(pitch) · Rx(roll)`;
//! - Euler angles are the vector `(roll, pitch, yaw)`, i.e. the angles about X, Y, Z.

use crate::float_types::{EPSILON, Real};
use crate::rotation::{AxisAngle, YawPitchRoll};
use nalgebra::{Matrix3, Quaternion, Rotation3, Vector3};

/// Below this `cos(pitch)` the yaw and roll angles can no longer be told apart.
const GIMBAL_LOCK_EPSILON: Real = 1e-10;

/// Build a raw quaternion from its vector part and scalar part.
#[inline]
pub fn quaternion(x: Real, y: Real, z: Real, s: Real) -> Quaternion<Real> {
    Quaternion::new(s, x, y, z)
}

#[inline]
pub fn identity_quaternion() -> Quaternion<Real> {
    quaternion(0.0, 0.0, 0.0, 1.0)
}

/// Elementary rotation about Z.
pub fn yaw_matrix(yaw: Real) -> Matrix3<Real> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), yaw).into_inner()
}

/// Elementary rotation about Y.
pub fn pitch_matrix(pitch: Real) -> Matrix3<Real> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), pitch).into_inner()
}

/// Elementary rotation about X.
pub fn roll_matrix(roll: Real) -> Matrix3<Real> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), roll).into_inner()
}

/// Matrix → quaternion, branching on the largest of `{trace, m00, m11, m22}` so the
/// square root is always taken of a value bounded away from zero.
///
/// The result is normalized and its scalar part is non-negative.
pub fn quaternion_from_matrix(m: &Matrix3<Real>) -> Quaternion<Real> {
    let (m00, m01, m02) = (m[(0, 0)], m[(0, 1)], m[(0, 2)]);
    let (m10, m11, m12) = (m[(1, 0)], m[(1, 1)], m[(1, 2)]);
    let (m20, m21, m22) = (m[(2, 0)], m[(2, 1)], m[(2, 2)]);
    let trace = m00 + m11 + m22;

    let (x, y, z, s);
    if trace >= m00 && trace >= m11 && trace >= m22 {
        let r = (1.0 + trace).sqrt();
        let inv = 0.5 / r;
        s = 0.5 * r;
        x = (m21 - m12) * inv;
        y = (m02 - m20) * inv;
        z = (m10 - m01) * inv;
    } else if m00 >= m11 && m00 >= m22 {
        let r = (1.0 + m00 - m11 - m22).sqrt();
        let inv = 0.5 / r;
        x = 0.5 * r;
        y = (m01 + m10) * inv;
        z = (m02 + m20) * inv;
        s = (m21 - m12) * inv;
    } else if m11 >= m22 {
        let r = (1.0 - m00 + m11 - m22).sqrt();
        let inv = 0.5 / r;
        y = 0.5 * r;
        x = (m01 + m10) * inv;
        z = (m12 + m21) * inv;
        s = (m02 - m20) * inv;
    } else {
        let r = (1.0 - m00 - m11 + m22).sqrt();
        let inv = 0.5 / r;
        z = 0.5 * r;
        x = (m02 + m20) * inv;
        y = (m12 + m21) * inv;
        s = (m10 - m01) * inv;
    }

    let q = if s < 0.0 {
        quaternion(-x, -y, -z, -s)
    } else {
        quaternion(x, y, z, s)
    };
    q.normalize()
}

/// Quaternion → matrix, the bilinear expansion scaled by `2 / |q|²` so a
/// non-normalized input still yields a proper rotation.
///
/// A zero quaternion yields the identity.
pub fn matrix_from_quaternion(q: &Quaternion<Real>) -> Matrix3<Real> {
    let norm_squared = q.norm_squared();
    if norm_squared < EPSILON {
        return Matrix3::identity();
    }
    let f = 2.0 / norm_squared;
    let (x, y, z, s) = (q.i, q.j, q.k, q.w);

    let (xx, yy, zz) = (f * x * x, f * y * y, f * z * z);
    let (xy, xz, yz) = (f * x * y, f * x * z, f * y * z);
    let (xs, ys, zs) = (f * x * s, f * y * s, f * z * s);

    Matrix3::new(
        1.0 - (yy + zz), xy - zs, xz + ys,
        xy + zs, 1.0 - (xx + zz), yz - xs,
        xz - ys, yz + xs, 1.0 - (xx + yy),
    )
}

/// `angle = 2·atan2(|(x, y, z)|, |s|)`, so the angle lies in `[0, π]` whatever the sign
/// of `s`; for `s < 0` the axis is flipped instead. A vanishing vector part gives the
/// x-axis and a zero angle.
pub fn axis_angle_from_quaternion(q: &Quaternion<Real>) -> AxisAngle {
    let v = Vector3::new(q.i, q.j, q.k);
    let sin_half = v.norm();
    if sin_half < EPSILON {
        return AxisAngle::identity();
    }
    let sign = if q.w < 0.0 { -1.0 } else { 1.0 };
    AxisAngle {
        axis: v * (sign / sin_half),
        angle: 2.0 * sin_half.atan2(q.w.abs()),
    }
}

pub fn quaternion_from_axis_angle(axis: &Vector3<Real>, angle: Real) -> Quaternion<Real> {
    let Some(axis) = axis.try_normalize(EPSILON) else {
        return identity_quaternion();
    };
    let (sin_half, cos_half) = (0.5 * angle).sin_cos();
    quaternion(axis.x * sin_half, axis.y * sin_half, axis.z * sin_half, cos_half)
}

/// Rodrigues' formula. A zero axis gives the identity.
pub fn matrix_from_axis_angle(axis: &Vector3<Real>, angle: Real) -> Matrix3<Real> {
    let Some(a) = axis.try_normalize(EPSILON) else {
        return Matrix3::identity();
    };
    let (s, c) = angle.sin_cos();
    let omc = 1.0 - c;

    Matrix3::new(
        c + a.x * a.x * omc, a.x * a.y * omc - a.z * s, a.x * a.z * omc + a.y * s,
        a.y * a.x * omc + a.z * s, c + a.y * a.y * omc, a.y * a.z * omc - a.x * s,
        a.z * a.x * omc - a.y * s, a.z * a.y * omc + a.x * s, c + a.z * a.z * omc,
    )
}

pub fn axis_angle_from_matrix(m: &Matrix3<Real>) -> AxisAngle {
    axis_angle_from_quaternion(&quaternion_from_matrix(m))
}

/// Rotation vector = axis × angle.
pub fn quaternion_from_rotation_vector(rotation_vector: &Vector3<Real>) -> Quaternion<Real> {
    let angle = rotation_vector.norm();
    if angle < EPSILON {
        // first order: sin(θ/2)·axis ≈ θ/2·axis
        return quaternion(
            0.5 * rotation_vector.x,
            0.5 * rotation_vector.y,
            0.5 * rotation_vector.z,
            1.0,
        )
        .normalize();
    }
    quaternion_from_axis_angle(&(rotation_vector / angle), angle)
}

/// Norm in `[0, π]`; `q` and `-q` give the same vector.
pub fn rotation_vector_from_quaternion(q: &Quaternion<Real>) -> Vector3<Real> {
    let v = Vector3::new(q.i, q.j, q.k);
    let sign = if q.w < 0.0 { -1.0 } else { 1.0 };
    let sin_half = v.norm();
    if sin_half < EPSILON {
        return 2.0 * sign * v;
    }
    let angle = 2.0 * sin_half.atan2(q.w.abs());
    v * (sign * angle / sin_half)
}

pub fn matrix_from_rotation_vector(rotation_vector: &Vector3<Real>) -> Matrix3<Real> {
    matrix_from_quaternion(&quaternion_from_rotation_vector(rotation_vector))
}

pub fn rotation_vector_from_matrix(m: &Matrix3<Real>) -> Vector3<Real> {
    rotation_vector_from_quaternion(&quaternion_from_matrix(m))
}

/// `Rz(yaw) · Ry(pitch) · Rx(roll)` expanded.
pub fn matrix_from_yaw_pitch_roll(yaw: Real, pitch: Real, roll: Real) -> Matrix3<Real> {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    let (sr, cr) = roll.sin_cos();

    Matrix3::new(
        cy * cp, cy * sp * sr - sy * cr, cy * sp * cr + sy * sr,
        sy * cp, sy * sp * sr + cy * cr, sy * sp * cr - cy * sr,
        -sp, cp * sr, cp * cr,
    )
}

/// `qz(yaw) · qy(pitch) · qx(roll)` expanded on half angles.
pub fn quaternion_from_yaw_pitch_roll(yaw: Real, pitch: Real, roll: Real) -> Quaternion<Real> {
    let (sy, cy) = (0.5 * yaw).sin_cos();
    let (sp, cp) = (0.5 * pitch).sin_cos();
    let (sr, cr) = (0.5 * roll).sin_cos();

    quaternion(
        cy * cp * sr - sy * sp * cr,
        cy * sp * cr + sy * cp * sr,
        sy * cp * cr - cy * sp * sr,
        cy * cp * cr + sy * sp * sr,
    )
}

/// Extract intrinsic Z-Y-X angles.
///
/// At gimbal lock (`pitch ≈ ±π/2`) yaw and roll are coupled; the roll is then
/// reported as zero and the whole in-plane angle is assigned to the yaw.
pub fn yaw_pitch_roll_from_matrix(m: &Matrix3<Real>) -> YawPitchRoll {
    let cos_pitch = (m[(0, 0)] * m[(0, 0)] + m[(1, 0)] * m[(1, 0)]).sqrt();
    let pitch = (-m[(2, 0)]).atan2(cos_pitch);

    if cos_pitch < GIMBAL_LOCK_EPSILON {
        log::debug!("yaw-pitch-roll extraction at gimbal lock (pitch = {pitch}), roll forced to 0");
        return YawPitchRoll {
            yaw: (-m[(0, 1)]).atan2(m[(1, 1)]),
            pitch,
            roll: 0.0,
        };
    }

    YawPitchRoll {
        yaw: m[(1, 0)].atan2(m[(0, 0)]),
        pitch,
        roll: m[(2, 1)].atan2(m[(2, 2)]),
    }
}

pub fn yaw_pitch_roll_from_quaternion(q: &Quaternion<Real>) -> YawPitchRoll {
    yaw_pitch_roll_from_matrix(&matrix_from_quaternion(q))
}

/// Checks `MᵀM = I` component-wise within `epsilon` and a positive determinant.
pub fn is_rotation_matrix(m: &Matrix3<Real>, epsilon: Real) -> bool {
    if m.iter().any(|value| !value.is_finite()) {
        return false;
    }
    let gram = m.transpose() * m - Matrix3::identity();
    gram.iter().all(|value| value.abs() <= epsilon) && m.determinant() > 0.0
}

/// A rotation is 2D when it only rotates about Z.
pub fn is_rotation_2d(m: &Matrix3<Real>, epsilon: Real) -> bool {
    m[(0, 2)].abs() <= epsilon
        && m[(1, 2)].abs() <= epsilon
        && m[(2, 0)].abs() <= epsilon
        && m[(2, 1)].abs() <= epsilon
        && (m[(2, 2)] - 1.0).abs() <= epsilon
}

/// Closest rotation to `m` in the Frobenius sense (`U·Vᵀ` from the SVD, with the
/// sign of the last singular direction flipped when the product is a reflection).
pub fn orthonormalize(m: &Matrix3<Real>) -> Option<Matrix3<Real>> {
    let svd = (*m).svd(true, true);
    let (mut u, v_t) = (svd.u?, svd.v_t?);
    if (u * v_t).determinant() < 0.0 {
        u.column_mut(2).neg_mut();
    }
    Some(u * v_t)
}
