//! DH parameters to rigid-body transforms.
//!
//! A link pose is `Rz(theta) * Tz(d) * Tx(a) * Rx(alpha)`: built by applying
//! Rx, Tx, Tz, Rz in turn to an identity accumulator, each one multiplied in
//! from the left.

use nalgebra::{Isometry3, Matrix4, Vector3};

use crate::params::DhParameter;

/// Pose of a link frame relative to its parent frame.
pub type RigidTransform = Isometry3<f64>;

pub fn rot_x(alpha: f64) -> RigidTransform {
    Isometry3::rotation(Vector3::x() * alpha)
}

pub fn trans_x(a: f64) -> RigidTransform {
    Isometry3::translation(a, 0., 0.)
}

pub fn trans_z(d: f64) -> RigidTransform {
    Isometry3::translation(0., 0., d)
}

pub fn rot_z(theta: f64) -> RigidTransform {
    Isometry3::rotation(Vector3::z() * theta)
}

/// Pose of link `dh.index` relative to its parent at the nominal joint angle.
pub fn compose(dh: &DhParameter) -> RigidTransform {
    compose_at(dh, 0.)
}

/// Same as [`compose`] with joint variable `q` added to `theta`.
pub fn compose_at(dh: &DhParameter, q: f64) -> RigidTransform {
    [
        rot_x(dh.alpha),
        trans_x(dh.a),
        trans_z(dh.d),
        rot_z(dh.theta + q),
    ]
    .into_iter()
    .fold(RigidTransform::identity(), |acc, op| op * acc)
}

pub fn to_homogeneous(t: &RigidTransform) -> Matrix4<f64> {
    t.to_homogeneous()
}
