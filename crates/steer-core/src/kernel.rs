//! Quintic falloff kernel shared by blending and anisotropic weighting.
use glam::{DVec2, DVec3};

/// Clamped quintic smootherstep `6x^5 - 15x^4 + 10x^3`.
#[inline]
pub fn quintic(x: f64) -> f64 {
    (6.0 * (x * x * x * x * x) - 15.0 * (x * x * x * x) + 10.0 * (x * x * x)).clamp(0.0, 1.0)
}

/// Bump weight: 1 at the origin, 0 for `|x| >= 1`.
#[inline]
pub fn falloff(x: f64) -> f64 {
    1.0 - quintic(x.abs())
}

#[inline]
pub fn falloff2(v: DVec2) -> DVec2 {
    DVec2::new(falloff(v.x), falloff(v.y))
}

#[inline]
pub fn falloff3(v: DVec3) -> DVec3 {
    DVec3::new(falloff(v.x), falloff(v.y), falloff(v.z))
}
