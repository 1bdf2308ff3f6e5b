mod support;

use approx::assert_relative_eq;
use nalgebra::{Matrix3, Vector3};
use spatial_transforms::{
    AxisAngle, RotationMatrix, RotationReadOnly, RotationScaleMatrix, TransformError,
    UnitQuaternion, YawPitchRoll,
    float_types::{FRAC_PI_2, PI},
};

use crate::support::{random_quaternion, random_rotation, random_yaw_pitch_roll, rng};

#[test]
fn matrix_quaternion_round_trip() {
    let mut rng = rng();
    for _ in 0..200 {
        let m = random_rotation(&mut rng);
        let q = m.to_quaternion();
        assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-12);
        assert!(q.s() >= 0.0);
        assert_relative_eq!(q.to_rotation_matrix(), m, epsilon = 1e-10);
    }
}

#[test]
fn matrix_axis_angle_round_trip() {
    let mut rng = rng();
    for _ in 0..200 {
        let m = random_rotation(&mut rng);
        let axis_angle = m.axis_angle();
        let mut back = RotationMatrix::identity();
        back.set_axis_angle(&axis_angle);
        assert_relative_eq!(back, m, epsilon = 1e-10);
    }
}

#[test]
fn quaternion_axis_angle_round_trip() {
    let mut rng = rng();
    for _ in 0..200 {
        let mut q = random_quaternion(&mut rng);
        q.normalize_and_limit_to_pi().unwrap();
        let axis_angle = q.axis_angle();
        assert_relative_eq!(axis_angle.axis.norm(), 1.0, epsilon = 1e-12);
        assert!((0.0..=PI).contains(&axis_angle.angle));
        assert_relative_eq!(axis_angle.to_quaternion(), q, epsilon = 1e-10);
    }
}

#[test]
fn rotation_vector_round_trip() {
    let mut rng = rng();
    for _ in 0..200 {
        let m = random_rotation(&mut rng);
        let rv = m.rotation_vector();
        assert!(rv.norm() <= PI + 1e-12);
        let mut back = RotationMatrix::identity();
        back.set_rotation_vector(&rv);
        assert_relative_eq!(back, m, epsilon = 1e-10);
    }
}

#[test]
fn yaw_pitch_roll_round_trip() {
    let mut rng = rng();
    for _ in 0..200 {
        let (yaw, pitch, roll) = random_yaw_pitch_roll(&mut rng);
        let q = UnitQuaternion::from_yaw_pitch_roll(yaw, pitch, roll);
        let ypr = q.yaw_pitch_roll();
        assert_relative_eq!(ypr.yaw, yaw, epsilon = 1e-10);
        assert_relative_eq!(ypr.pitch, pitch, epsilon = 1e-10);
        assert_relative_eq!(ypr.roll, roll, epsilon = 1e-10);
        assert_relative_eq!(q.euler(), Vector3::new(roll, pitch, yaw), epsilon = 1e-10);
    }
}

#[test]
fn elementary_rotations_turn_the_expected_axes() {
    let cases = [
        (YawPitchRoll::from_yaw(FRAC_PI_2), Vector3::x(), Vector3::y()),
        (YawPitchRoll::from_pitch(FRAC_PI_2), Vector3::z(), Vector3::x()),
        (YawPitchRoll::from_roll(FRAC_PI_2), Vector3::y(), Vector3::z()),
    ];
    for (ypr, input, expected) in cases {
        assert_relative_eq!(ypr.transform_vector(&input), expected, epsilon = 1e-12);
        assert_relative_eq!(
            ypr.to_quaternion().transform(&input),
            expected,
            epsilon = 1e-12
        );
        assert_relative_eq!(ypr.inverse_transform_vector(&expected), input, epsilon = 1e-12);
    }
}

#[test]
fn quaternion_and_matrix_compose_alike() {
    let mut rng = rng();
    for _ in 0..50 {
        let (a, b) = (random_quaternion(&mut rng), random_quaternion(&mut rng));
        let (ma, mb) = (a.to_rotation_matrix(), b.to_rotation_matrix());

        let mut q = a;
        q.multiply(&b);
        let mut m = ma;
        m.multiply(&mb);
        assert_relative_eq!(q.to_rotation_matrix(), m, epsilon = 1e-10);

        let mut q = a;
        q.multiply_conjugate_other(&b);
        let mut m = ma;
        m.multiply_transpose_other(&mb);
        assert_relative_eq!(q.to_rotation_matrix(), m, epsilon = 1e-10);

        let mut q = a;
        q.pre_multiply_conjugate_this(&b);
        let mut m = ma;
        m.pre_multiply_transpose_this(&mb);
        assert_relative_eq!(q.to_rotation_matrix(), m, epsilon = 1e-10);
    }
}

#[test]
fn zero_axis_is_identity() {
    let axis_angle = AxisAngle::new(Vector3::zeros(), 1.0);
    assert_eq!(axis_angle, AxisAngle::identity());
    assert_eq!(axis_angle.to_rotation_matrix(), RotationMatrix::identity());
}

#[test]
fn normalize_restores_orthonormality() {
    let mut rng = rng();
    let mut m = RotationMatrix::identity();
    for _ in 0..1000 {
        m.multiply(&random_rotation(&mut rng));
    }
    m.normalize();
    assert!(m.is_rotation_matrix(1e-12));
    assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-12);
}

#[test]
fn rotation_scale_invariant_survives_mutation() {
    let mut rng = rng();
    let mut rs = RotationScaleMatrix::new(&random_rotation(&mut rng), &Vector3::new(1.0, 2.0, 3.0))
        .unwrap();
    for _ in 0..20 {
        rs.append_yaw_rotation(0.3);
        rs.prepend_roll_rotation(-0.2);
        rs.rotation_mut().multiply(&random_rotation(&mut rng));
    }
    rs.normalize_rotation_matrix();
    assert!(rs.rotation().is_rotation_matrix(1e-12));
    assert_eq!(rs.scale(), &Vector3::new(1.0, 2.0, 3.0));

    let before = rs;
    assert!(matches!(
        rs.set_scale(1.0, -1.0, 1.0),
        Err(TransformError::InvalidScale(_))
    ));
    let reflection = Matrix3::from_diagonal(&Vector3::new(2.0, 2.0, -2.0));
    assert!(matches!(
        rs.set_matrix(&reflection),
        Err(TransformError::NotARotationScaleMatrix(_))
    ));
    assert_eq!(rs, before);
}

#[test]
fn two_dimensional_check() {
    assert!(RotationMatrix::from_yaw(1.2).check_if_rotation_2d().is_ok());
    let tilted = RotationMatrix::from_roll(PI / 6.0);
    assert!(!tilted.is_rotation_2d(1e-7));
    assert!(matches!(
        tilted.check_if_rotation_2d(),
        Err(TransformError::NotAMatrix2D(_))
    ));
}
