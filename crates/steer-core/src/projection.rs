//! Projection machinery for evaluating a planar metric inside 3D space.
//!
//! [`make_projection`] flattens vectors onto the plane orthogonal to a
//! normal and rotates that plane onto `xy`, so a 2×2 metric can act on the
//! first two components.
use glam::{DMat3, DVec3};

use crate::metric::outer3;

/// `I - n ⊗ n`: removes the component along unit vector `n`.
#[inline]
pub fn vector_projector(n: DVec3) -> DMat3 {
    DMat3::IDENTITY - outer3(n, n)
}

/// Closed-form rotation between unit vectors `a` and `b`.
///
/// Built as `I + V + V² / (1 + a·b)` with `V` the skew matrix of `a × b` in
/// the column layout `(0,-v.z,v.y) (v.z,0,-v.x) (-v.y,v.x,0)`; the result
/// carries `b` onto `a` and its transpose carries `a` onto `b`.
///
/// Antiparallel inputs divide by zero and produce non-finite entries.
pub fn dihedral(a: DVec3, b: DVec3) -> DMat3 {
    let v = a.cross(b);
    let c = a.dot(b);
    let v_prime = DMat3::from_cols(
        DVec3::new(0.0, -v.z, v.y),
        DVec3::new(v.z, 0.0, -v.x),
        DVec3::new(-v.y, v.x, 0.0),
    );

    let scale = 1.0 / (1.0 + c);
    DMat3::IDENTITY + v_prime + (v_prime * v_prime) * scale
}

/// Projector onto the plane orthogonal to `n`, composed with the rotation
/// relating `n` and `+z`. Apply as a row vector (`projectionᵀ * v`).
pub fn make_projection(n: DVec3) -> DMat3 {
    vector_projector(n) * dihedral(n, DVec3::Z)
}
