//! Stateless positional hashes used to seed lattice corners.
//!
//! Every value is a pure function of the input coordinate: the classic
//! `fract(sin(dot(p, K)) * D)` construction. The constants are load-bearing
//! for reproducing the reference field and must not be tuned.
use std::f64::consts::PI;

use glam::{DVec2, DVec3};

/// Dot-product key for the 3D scalar hash.
pub const HASH3_DOT: DVec3 = DVec3::new(64.25375463, 23.27536534, 86.29678483);
/// Scale applied to `sin` before taking the fractional part (3D).
pub const HASH3_SCALE: f64 = 59482.7542;
/// Dot-product key for the 2D scalar hash.
pub const HASH2_DOT: DVec2 = DVec2::new(12.9898, 78.233);
/// Scale applied after taking the fractional part (2D).
pub const HASH2_SCALE: f64 = 43758.5453123;
/// Per-channel position deltas used to decorrelate [`vector_hash3`].
pub const CHANNEL_DELTAS: [f64; 3] = [0.01, 0.02, 0.03];
/// Radius exponent in [`direction_on_sphere`]; deliberately not exactly 1/3.
pub const RADIUS_EXPONENT: f64 = 0.33333;

/// Fractional part with GLSL semantics (`x - floor(x)`), always in `[0, 1)`.
#[inline]
pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// Scalar hash of a 3D position, in `[0, 1)`.
#[inline]
pub fn scalar_hash(pos: DVec3) -> f64 {
    fract(pos.dot(HASH3_DOT).sin() * HASH3_SCALE)
}

/// Three decorrelated hash channels for one position.
pub fn vector_hash3(pos: DVec3) -> DVec3 {
    DVec3::new(
        scalar_hash(pos + CHANNEL_DELTAS[0]),
        scalar_hash(pos + CHANNEL_DELTAS[1]),
        scalar_hash(pos + CHANNEL_DELTAS[2]),
    )
}

/// Pseudo-random vector inside the unit ball.
///
/// Two channels pick the spherical angles, the third picks the radius via
/// `w^0.33333`. The result is *not* unit length; lattice gradients depend on
/// the varying magnitude.
pub fn direction_on_sphere(pos: DVec3) -> DVec3 {
    let vals = vector_hash3(pos);

    let theta = vals.x * 2.0 * PI;
    let phi = (2.0 * vals.y - 1.0).acos();
    let r = vals.z.powf(RADIUS_EXPONENT);

    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    DVec3::new(
        r * sin_phi * cos_theta,
        r * sin_phi * sin_theta,
        r * cos_phi,
    )
}

/// Scalar hash of a 2D position.
///
/// The scale is applied after `fract`, so the range is `[0, HASH2_SCALE)`
/// rather than the unit interval. Only ever consumed as an angle.
#[inline]
pub fn scalar_hash2(pos: DVec2) -> f64 {
    fract(pos.dot(HASH2_DOT).sin()) * HASH2_SCALE
}

/// Unit direction on the circle keyed by a 2D position.
pub fn direction_on_circle(pos: DVec2) -> DVec2 {
    let angle = scalar_hash2(pos) * PI * 2.0;
    DVec2::new(angle.cos(), angle.sin())
}
