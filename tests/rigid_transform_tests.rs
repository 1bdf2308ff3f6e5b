mod support;

use approx::assert_relative_eq;
use nalgebra::{Matrix4, Point2, Point3, Vector3};
use spatial_transforms::{
    RigidTransform, RotationMatrix, Transform, TransformError, TransformReadOnly,
    float_types::{FRAC_PI_2, PI},
};

use crate::support::{random_point, random_rigid, rng};

#[test]
fn composition_matches_homogeneous_product() {
    let mut rng = rng();
    for _ in 0..100 {
        let (a, b) = (random_rigid(&mut rng), random_rigid(&mut rng));
        let mut ab = a.clone();
        ab.multiply(&b);
        assert_relative_eq!(
            ab.to_homogeneous(),
            a.to_homogeneous() * b.to_homogeneous(),
            epsilon = 1e-10
        );

        let mut ba = a.clone();
        ba.pre_multiply(&b);
        assert_relative_eq!(
            ba.to_homogeneous(),
            b.to_homogeneous() * a.to_homogeneous(),
            epsilon = 1e-10
        );
    }
}

#[test]
fn invert_variants_match_explicit_inverses() {
    let mut rng = rng();
    for _ in 0..100 {
        let (a, b) = (random_rigid(&mut rng), random_rigid(&mut rng));
        let (a_inv, b_inv) = (a.inverse(), b.inverse());

        let mut r = a.clone();
        r.multiply_invert_this(&b);
        let mut expected = a_inv.clone();
        expected.multiply(&b);
        assert_relative_eq!(r, expected, epsilon = 1e-10);

        let mut r = a.clone();
        r.multiply_invert_other(&b);
        let mut expected = a.clone();
        expected.multiply(&b_inv);
        assert_relative_eq!(r, expected, epsilon = 1e-10);

        let mut r = a.clone();
        r.pre_multiply_invert_this(&b);
        let mut expected = a_inv.clone();
        expected.pre_multiply(&b);
        assert_relative_eq!(r, expected, epsilon = 1e-10);

        let mut r = a.clone();
        r.pre_multiply_invert_other(&b);
        let mut expected = a.clone();
        expected.pre_multiply(&b_inv);
        assert_relative_eq!(r, expected, epsilon = 1e-10);
    }
}

#[test]
fn inverse_composes_to_identity() {
    let mut rng = rng();
    for _ in 0..100 {
        let t = random_rigid(&mut rng);
        let mut product = t.clone();
        product.multiply(&t.inverse());
        assert!(product.geometrically_equals(&RigidTransform::new(), 1e-10));

        let p = random_point(&mut rng);
        assert_relative_eq!(t.inverse_transform(&t.transform(&p)), p, epsilon = 1e-10);
        assert_relative_eq!(t.inverse().transform(&p), t.inverse_transform(&p), epsilon = 1e-10);
    }
}

#[test]
fn point_and_vector_differ_by_translation() {
    let mut rng = rng();
    let t = random_rigid(&mut rng);
    let p = random_point(&mut rng);
    let moved_point = t.transform(&p);
    let moved_vector = t.transform(&p.coords);
    assert_relative_eq!(moved_point.coords - moved_vector, *t.translation(), epsilon = 1e-12);
}

#[test]
fn multiply_then_multiply_invert_other_restores() {
    let mut rng = rng();
    for _ in 0..100 {
        let (a, b) = (random_rigid(&mut rng), random_rigid(&mut rng));
        let mut t = a.clone();
        t.multiply(&b);
        t.multiply_invert_other(&b);
        assert_relative_eq!(t, a, epsilon = 1e-10);
    }
}

#[test]
fn yaw_then_translate_scenario() {
    let mut t = RigidTransform::new();
    assert_eq!(t.transform(&Point3::new(1.0, 2.0, 3.0)), Point3::new(1.0, 2.0, 3.0));

    t.set_rotation_yaw(FRAC_PI_2);
    t.set_translation(1.0, 0.0, 0.0);

    let p = t.transform(&Point3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(p, Point3::new(1.0, 1.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(t.inverse_transform(&p), Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
}

#[test]
fn append_and_prepend_translation_frames() {
    let mut t = RigidTransform::new();
    t.set_rotation_yaw(FRAC_PI_2);
    t.append_translation(1.0, 0.0, 0.0);
    assert_relative_eq!(*t.translation(), Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    t.prepend_translation(1.0, 0.0, 0.0);
    assert_relative_eq!(*t.translation(), Vector3::new(1.0, 1.0, 0.0), epsilon = 1e-12);
}

#[test]
fn prepend_rotation_moves_translation() {
    let mut t = RigidTransform::new();
    t.set_translation(1.0, 0.0, 0.0);
    t.append_yaw_rotation(FRAC_PI_2);
    assert_relative_eq!(*t.translation(), Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    t.prepend_yaw_rotation(FRAC_PI_2);
    assert_relative_eq!(*t.translation(), Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(*t.rotation(), RotationMatrix::from_yaw(PI), epsilon = 1e-12);
}

#[test]
fn two_dimensional_guard() {
    let mut t = RigidTransform::new();
    t.set_rotation_roll(PI / 6.0);
    assert!(matches!(
        t.transform_2d(&Point2::new(1.0, 1.0), true),
        Err(TransformError::NotAMatrix2D(_))
    ));
    assert!(t.transform_2d(&Point2::new(1.0, 1.0), false).is_ok());

    t.set_rotation_yaw(0.4);
    t.set_translation(1.0, 2.0, 7.0);
    let p = t.transform_2d(&Point2::new(1.0, 1.0), true).unwrap();
    let expected = t.transform(&Point3::new(1.0, 1.0, 0.0));
    assert_relative_eq!(p, expected.xy(), epsilon = 1e-12);
}

#[test]
fn element_and_array_layout() {
    let t = RigidTransform::from_parts(&RotationMatrix::from_yaw(FRAC_PI_2), &Vector3::new(4.0, 5.0, 6.0));
    let mut values = [0.0; 16];
    t.get_array(&mut values);
    assert_relative_eq!(values[3], 4.0);
    assert_relative_eq!(values[7], 5.0);
    assert_relative_eq!(values[11], 6.0);
    assert_eq!(&values[12..], &[0.0, 0.0, 0.0, 1.0]);
    assert_relative_eq!(t.element(1, 0).unwrap(), 1.0, epsilon = 1e-15);
    assert_eq!(
        t.element(4, 0),
        Err(TransformError::IndexOutOfBounds { row: 4, col: 0 })
    );

    let mut back = RigidTransform::new();
    back.set_from_array(&values).unwrap();
    assert_eq!(back, t);
}

#[test]
fn homogeneous_last_row_is_ignored() {
    let t = RigidTransform::from_parts(&RotationMatrix::from_pitch(0.2), &Vector3::new(1.0, 2.0, 3.0));
    let mut m = t.to_homogeneous();
    m[(3, 0)] = 9.0;
    m[(3, 3)] = 2.0;
    assert_eq!(RigidTransform::from_homogeneous(&m).unwrap(), t);

    let mut bad = Matrix4::identity();
    bad[(1, 1)] = -1.0;
    assert!(RigidTransform::from_homogeneous(&bad).is_err());
}

#[test]
fn normalize_rotation_part_after_long_chain() {
    let mut rng = rng();
    let mut t = RigidTransform::new();
    for _ in 0..500 {
        t.multiply(&random_rigid(&mut rng));
    }
    t.normalize_rotation_part();
    assert!(t.rotation().is_rotation_matrix(1e-12));
}
