//! Perlin-style lattice evaluators with metric-warped gradients and weights.
//!
//! Corners are combined with a weighted average instead of nested lerps.
//! With the identity metric and the anisotropic weight dropped, the
//! average is exactly quintic-faded trilinear Perlin noise. The metric
//! enters twice: it warps the corner offset before the gradient dot product
//! and it shapes an extra `falloff(vᵀ M v)` weight per corner.
use glam::{DMat2, DMat3, DVec2, DVec3};

use crate::hash::{direction_on_circle, direction_on_sphere};
use crate::kernel::{falloff, falloff2, falloff3};

/// Walk the eight corners of the cell containing `pos`.
///
/// `corner(g, v)` receives the integer corner coordinate and the offset from
/// the sample to that corner, and returns `(contribution, weight)`. Each
/// corner adds `contribution * (blend weights * weight)`.
pub(crate) fn cell_sum3(pos: DVec3, mut corner: impl FnMut(DVec3, DVec3) -> (f64, f64)) -> f64 {
    let cell = pos.floor();
    let frac = pos - cell;
    let blend = falloff3(frac);

    let mut out = 0.0;
    for i in 0..=1 {
        for j in 0..=1 {
            for k in 0..=1 {
                let o = DVec3::new(i as f64, j as f64, k as f64);
                let v = o - frac;
                let (d, aniso) = corner(cell + o, v);

                let wv = (o - blend).abs();
                let w = wv.x * wv.y * wv.z * aniso;
                out += d * w;
            }
        }
    }
    out
}

/// Steerable Perlin noise in 3D under a 3×3 metric.
pub fn steerable_perlin(pos: DVec3, metric: DMat3) -> f64 {
    cell_sum3(pos, |g, v| {
        let r = direction_on_sphere(g);
        let metric_v = metric * v;
        (r.dot(metric_v), falloff(v.dot(metric_v)))
    })
}

/// Steerable Perlin noise in 3D whose anisotropy is a 2×2 metric acting in
/// the plane selected by `projection` (see [`crate::projection::make_projection`]).
pub fn steerable_perlin_projected(pos: DVec3, metric: DMat2, projection: DMat3) -> f64 {
    let to_plane = projection.transpose();
    cell_sum3(pos, |g, v| {
        let r = (to_plane * direction_on_sphere(g)).truncate();
        let v = (to_plane * v).truncate();
        let metric_v = metric * v;
        (r.dot(metric_v), falloff(v.dot(metric_v)))
    })
}

/// Anisotropic 2D Perlin noise over a widened neighbourhood.
///
/// Corners span `[-order, order + 1]` on each axis, so order 0 is the plain
/// unit cell. A separable window with scale `2 / (2 * order + 2)` tapers the
/// contributions toward the neighbourhood edge.
pub fn aniso_perlin(p: DVec2, metric: DMat2, order: u32) -> f64 {
    let cell = p.floor();
    let frac = p - cell;

    let order = order as i64;
    let start = -order;
    let end = order + 1;
    let scale = 2.0 / (start.abs() + end + 1) as f64;
    let metric_t = metric.transpose();

    let mut out = 0.0;
    for i in start..=end {
        for j in start..=end {
            let o = DVec2::new(i as f64, j as f64);
            let r = direction_on_circle(cell + o);
            let v = o - frac;
            let metric_v = metric_t * v;
            let d = r.dot(metric_v);

            let window = falloff2(v * scale);
            let w = window.x * window.y * falloff(v.dot(metric_v));
            out += d * w;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::quintic;
    use approx::assert_abs_diff_eq;

    fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + (b - a) * t
    }

    /// Textbook trilinear Perlin with quintic fade and the same gradients.
    fn classic_perlin(pos: DVec3) -> f64 {
        let cell = pos.floor();
        let f = pos - cell;
        let grad = |i: f64, j: f64, k: f64| {
            let o = DVec3::new(i, j, k);
            direction_on_sphere(cell + o).dot(o - f)
        };
        let (u, v, w) = (quintic(f.x), quintic(f.y), quintic(f.z));
        let x00 = lerp(grad(0., 0., 0.), grad(1., 0., 0.), u);
        let x10 = lerp(grad(0., 1., 0.), grad(1., 1., 0.), u);
        let x01 = lerp(grad(0., 0., 1.), grad(1., 0., 1.), u);
        let x11 = lerp(grad(0., 1., 1.), grad(1., 1., 1.), u);
        lerp(lerp(x00, x10, v), lerp(x01, x11, v), w)
    }

    fn sample_points() -> Vec<DVec3> {
        vec![
            DVec3::new(0.25, 0.5, 0.75),
            DVec3::new(3.1, -2.7, 0.4),
            DVec3::new(-5.5, 1.01, 9.99),
            DVec3::new(12.3, 4.56, -7.89),
        ]
    }

    #[test]
    fn weighted_average_reduces_to_classic_perlin() {
        for p in sample_points() {
            let weighted = cell_sum3(p, |g, v| (direction_on_sphere(g).dot(v), 1.0));
            assert_abs_diff_eq!(weighted, classic_perlin(p), epsilon = 1e-12);
        }
    }

    #[test]
    fn identity_metric_adds_only_radial_weight() {
        for p in sample_points() {
            let expected = cell_sum3(p, |g, v| {
                (direction_on_sphere(g).dot(v), falloff(v.length_squared()))
            });
            assert_abs_diff_eq!(steerable_perlin(p, DMat3::IDENTITY), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn vanishes_on_lattice_points() {
        // On a corner only the home corner carries blend weight, and its
        // offset is zero.
        let m = crate::metric::build_metric3(DVec3::new(0.3, 0.1, -0.8), 4.0);
        assert_abs_diff_eq!(steerable_perlin(DVec3::new(2.0, -3.0, 5.0), m), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn projected_with_z_normal_matches_planar_metric() {
        // Normal +z gives the identity rotation; the projector drops z.
        let projection = crate::projection::make_projection(DVec3::Z);
        let p = DVec3::new(1.3, 0.7, 2.2);
        let expected = cell_sum3(p, |g, v| {
            let r = direction_on_sphere(g).truncate();
            let v = v.truncate();
            (r.dot(v), falloff(v.length_squared()))
        });
        assert_abs_diff_eq!(
            steerable_perlin_projected(p, DMat2::IDENTITY, projection),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn aniso_order_zero_is_unit_cell() {
        let p = DVec2::new(4.3, -1.6);
        let cell = p.floor();
        let frac = p - cell;
        let mut expected = 0.0;
        for i in 0..=1 {
            for j in 0..=1 {
                let o = DVec2::new(i as f64, j as f64);
                let v = o - frac;
                let w = falloff(v.x) * falloff(v.y) * falloff(v.length_squared());
                expected += direction_on_circle(cell + o).dot(v) * w;
            }
        }
        assert_abs_diff_eq!(aniso_perlin(p, DMat2::IDENTITY, 0), expected, epsilon = 1e-12);
    }

    #[test]
    fn aniso_higher_order_changes_field() {
        let m = crate::metric::build_metric2(DVec2::new(0.4, 0.9), 1.5);
        let p = DVec2::new(0.37, 0.81);
        let a = aniso_perlin(p, m, 0);
        let b = aniso_perlin(p, m, 2);
        assert!(a.is_finite() && b.is_finite());
        assert!((a - b).abs() > 1e-9, "wider neighbourhood should alter the value");
    }
}
