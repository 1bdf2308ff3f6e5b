mod support;

use approx::assert_relative_eq;
use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};
use spatial_transforms::{
    AffineTransform, Real, RigidTransform, RotationMatrix, RotationScaleMatrix, Transform,
    TransformError, TransformReadOnly,
    float_types::FRAC_PI_2,
};

use crate::support::{random_affine, random_point, random_rigid, rng};

#[test]
fn application_matches_homogeneous_matrix() {
    let mut rng = rng();
    for _ in 0..100 {
        let t = random_affine(&mut rng);
        let h = t.to_homogeneous();
        let p = random_point(&mut rng);

        assert_relative_eq!(t.transform(&p), h.transform_point(&p), epsilon = 1e-9);
        assert_relative_eq!(t.inverse_transform(&t.transform(&p)), p, epsilon = 1e-9);

        let v = Vector4::new(p.x, p.y, p.z, 0.5);
        assert_relative_eq!(t.transform(&v), h * v, epsilon = 1e-9);
        assert_relative_eq!(t.inverse_transform(&(h * v)), v, epsilon = 1e-9);
    }
}

#[test]
fn linear_inverse_is_exact_inverse() {
    let mut rng = rng();
    for _ in 0..50 {
        let t = random_affine(&mut rng);
        assert_relative_eq!(
            t.linear_matrix() * t.linear_inverse_matrix(),
            Matrix3::identity(),
            epsilon = 1e-10
        );
    }
}

#[test]
fn composition_moves_rotation_only() {
    let mut rng = rng();
    for _ in 0..50 {
        let t = random_affine(&mut rng);
        let other = random_rigid(&mut rng);

        let mut r = t.clone();
        r.multiply(&other);
        assert_eq!(r.scale(), t.scale());
        let mut expected = t.rotation_matrix();
        expected.multiply(&other.rotation_matrix());
        assert_relative_eq!(r.rotation_matrix(), expected, epsilon = 1e-10);
        assert_relative_eq!(
            Point3::from(*r.translation()),
            t.transform(&Point3::from(*other.translation())),
            epsilon = 1e-9
        );

        let mut r = t.clone();
        r.pre_multiply(&other);
        assert_eq!(r.scale(), t.scale());
        assert_relative_eq!(
            Point3::from(*r.translation()),
            other.transform(&Point3::from(*t.translation())),
            epsilon = 1e-9
        );
    }
}

#[test]
fn affine_argument_contributes_no_scale() {
    let mut rng = rng();
    let t = random_rigid(&mut rng);
    let affine = random_affine(&mut rng);

    let mut with_affine = t.clone();
    with_affine.multiply(&affine);
    let mut with_rigid = t.clone();
    with_rigid.multiply(&affine.to_rigid_transform());
    assert_eq!(with_affine, with_rigid);
}

#[test]
fn rigid_inverse_variants_with_unit_scale() {
    let mut rng = rng();
    for _ in 0..50 {
        let a = random_rigid(&mut rng);
        let b = random_rigid(&mut rng);
        let affine = AffineTransform::from_transform(&a);

        let mut expected = a.clone();
        let mut r = affine.clone();
        expected.multiply_invert_this(&b);
        r.multiply_invert_this(&b);
        assert!(RigidTransform::from_transform(&r).geometrically_equals(&expected, 1e-10));

        let mut expected = a.clone();
        let mut r = affine.clone();
        expected.pre_multiply_invert_this(&b);
        r.pre_multiply_invert_this(&b);
        assert!(RigidTransform::from_transform(&r).geometrically_equals(&expected, 1e-10));
    }
}

/// Translation column of a homogeneous matrix.
fn translation_of(m: &Matrix4<Real>) -> Vector3<Real> {
    m.fixed_view::<3, 1>(0, 3).into_owned()
}

#[test]
fn inverse_variants_with_non_uniform_scale() {
    let mut rng = rng();
    for _ in 0..50 {
        let t = random_affine(&mut rng);
        let other = random_rigid(&mut rng);
        let h = t.to_homogeneous();
        let h_inverse = h.try_inverse().unwrap();
        let h_other = other.to_homogeneous();
        let h_other_inverse = other.inverse().to_homogeneous();
        let rigid_inverse = t.to_rigid_transform().inverse().to_homogeneous();
        let rotation = *t.rotation_matrix().matrix();
        let other_rotation = *other.rotation().matrix();

        // A⁻¹·(to − t)
        let mut r = t.clone();
        r.multiply_invert_this(&other);
        assert_eq!(r.scale(), t.scale());
        assert_relative_eq!(*r.translation(), translation_of(&(h_inverse * h_other)), epsilon = 1e-9);
        assert_relative_eq!(
            *r.translation(),
            t.linear_inverse_matrix() * (other.translation() - t.translation()),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            *r.rotation_matrix().matrix(),
            rotation.transpose() * other_rotation,
            epsilon = 1e-10
        );

        // t − A·Roᵀ·to
        let mut r = t.clone();
        r.multiply_invert_other(&other);
        assert_eq!(r.scale(), t.scale());
        assert_relative_eq!(*r.translation(), translation_of(&(h * h_other_inverse)), epsilon = 1e-9);
        assert_relative_eq!(
            *r.rotation_matrix().matrix(),
            rotation * other_rotation.transpose(),
            epsilon = 1e-10
        );

        // only the rigid part of the receiver is inverted
        let mut r = t.clone();
        r.pre_multiply_invert_this(&other);
        assert_eq!(r.scale(), t.scale());
        assert_relative_eq!(
            *r.translation(),
            translation_of(&(h_other * rigid_inverse)),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            *r.rotation_matrix().matrix(),
            other_rotation * rotation.transpose(),
            epsilon = 1e-10
        );

        // Roᵀ·(t − to)
        let mut r = t.clone();
        r.pre_multiply_invert_other(&other);
        assert_eq!(r.scale(), t.scale());
        assert_relative_eq!(*r.translation(), translation_of(&(h_other_inverse * h)), epsilon = 1e-9);
        assert_relative_eq!(
            *r.rotation_matrix().matrix(),
            other_rotation.transpose() * rotation,
            epsilon = 1e-10
        );
    }
}

#[test]
fn scale_setters_validate() {
    let mut t = AffineTransform::new();
    t.set_scale(1.0, 2.0, 3.0).unwrap();
    for (x, y, z) in [(0.0, 1.0, 1.0), (1.0, -2.0, 1.0), (1.0, 1.0, Real::INFINITY)] {
        assert!(matches!(
            t.set_scale(x, y, z),
            Err(TransformError::InvalidScale(_))
        ));
    }
    assert_eq!(t.scale(), &Vector3::new(1.0, 2.0, 3.0));
    assert!(matches!(
        t.set_uniform_scale(0.0),
        Err(TransformError::InvalidScale(_))
    ));

    t.reset_scale();
    assert_eq!(t.scale(), &Vector3::repeat(1.0));
}

#[test]
fn rotation_scale_block_round_trip() {
    let rs = RotationScaleMatrix::new(&RotationMatrix::from_yaw(FRAC_PI_2), &Vector3::new(2.0, 1.0, 0.5))
        .unwrap();
    let mut t = AffineTransform::from_parts(&rs, &Vector3::new(0.0, 0.0, 1.0));
    let p = t.transform(&Point3::new(1.0, 1.0, 2.0));
    assert_relative_eq!(p, Point3::new(-1.0, 2.0, 2.0), epsilon = 1e-12);

    let mut values = [0.0; 16];
    t.get_array(&mut values);
    let mut back = AffineTransform::new();
    back.set_from_array(&values).unwrap();
    assert!(back.geometrically_equals(&t, 1e-12));

    let sheared = Matrix3::new(1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
    assert!(matches!(
        t.set_rotation_scale_matrix(&sheared),
        Err(TransformError::NotARotationScaleMatrix(_))
    ));
    t.set_identity();
    assert_eq!(t, AffineTransform::new());
}
