//! Test support library
//! Seeded generators for rotations, transforms and points.
// every test binary compiles this module but uses only some of the generators
#![allow(dead_code)]

use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spatial_transforms::{
    AffineTransform, QuaternionTransform, RigidTransform, RotationMatrix, Transform,
    UnitQuaternion, float_types::{PI, Real},
};

/// Deterministic generator so failures reproduce.
pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed_7f0a)
}

pub fn random_vector(rng: &mut StdRng, range: Real) -> Vector3<Real> {
    Vector3::new(
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
    )
}

pub fn random_point(rng: &mut StdRng) -> Point3<Real> {
    Point3::from(random_vector(rng, 10.0))
}

/// Uniform over yaw and roll, pitch kept away from gimbal lock.
pub fn random_yaw_pitch_roll(rng: &mut StdRng) -> (Real, Real, Real) {
    (
        rng.gen_range(-PI..PI),
        rng.gen_range(-1.4..1.4),
        rng.gen_range(-PI..PI),
    )
}

pub fn random_rotation(rng: &mut StdRng) -> RotationMatrix {
    let (yaw, pitch, roll) = random_yaw_pitch_roll(rng);
    RotationMatrix::from_yaw_pitch_roll(yaw, pitch, roll)
}

pub fn random_quaternion(rng: &mut StdRng) -> UnitQuaternion {
    loop {
        let (x, y, z, s) = (
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        // rejection sampling inside the unit ball keeps the direction uniform
        let norm_squared: Real = x * x + y * y + z * z + s * s;
        if (0.25..1.0).contains(&norm_squared) {
            if let Ok(q) = UnitQuaternion::new(x, y, z, s) {
                return q;
            }
        }
    }
}

pub fn random_rigid(rng: &mut StdRng) -> RigidTransform {
    let rotation = random_rotation(rng);
    RigidTransform::from_parts(&rotation, &random_vector(rng, 10.0))
}

pub fn random_quaternion_transform(rng: &mut StdRng) -> QuaternionTransform {
    let quaternion = random_quaternion(rng);
    QuaternionTransform::from_parts(&quaternion, &random_vector(rng, 10.0))
}

pub fn random_affine(rng: &mut StdRng) -> AffineTransform {
    let mut transform = AffineTransform::new();
    let (yaw, pitch, roll) = random_yaw_pitch_roll(rng);
    transform.set_rotation_yaw_pitch_roll(yaw, pitch, roll);
    transform
        .set_scale(
            rng.gen_range(0.2..5.0),
            rng.gen_range(0.2..5.0),
            rng.gen_range(0.2..5.0),
        )
        .expect("positive scale");
    transform.set_translation_vector(&random_vector(rng, 10.0));
    transform
}
