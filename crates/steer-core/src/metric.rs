//! Metric-tensor synthesis from a steering direction.
//!
//! The outer product `x ⊗ x` of a unit direction has a closed-form
//! eigenbasis: eigenvalue 1 along `x` and 0 on the orthogonal complement.
//! Rather than `(0, 0, 1)` the eigenvalues are remapped through
//! [`fit_range`] so that `eigen_value_sum` controls how strongly the
//! field is stretched across the steering direction.
//!
//! The 2D and 3D paths differ on purpose: the 3D path divides the budget by
//! `dimensions - 1`, the 2D path uses a denominator of 1. Both are kept as
//! observed so that existing fields do not change shape.
use glam::{DMat2, DMat3, DVec2, DVec3};

/// Eigenvalue assigned to the steering axis itself.
pub const STEERING_EIGENVALUE: f64 = 0.51;
/// Replacement magnitude for near-zero direction components.
pub const DIRECTION_EPSILON: f64 = 1e-5;
/// Keeps the orthogonal eigenvalues strictly below their nominal budget.
pub const EIGENVALUE_BIAS: f64 = 1e-4;

/// Clamp `x` into `[in_low, in_high]` and remap affinely onto
/// `[out_low, out_high]`.
///
/// `in_low == in_high` divides by zero; callers only use the unit interval.
#[inline]
pub fn fit_range(x: f64, in_low: f64, in_high: f64, out_low: f64, out_high: f64) -> f64 {
    let u = x.clamp(in_low, in_high);
    ((out_high - out_low) * (u - in_low)) / (in_high - in_low) + out_low
}

/// `a ⊗ b`, i.e. `a * bᵀ`.
#[inline]
pub fn outer2(a: DVec2, b: DVec2) -> DMat2 {
    DMat2::from_cols(a * b.x, a * b.y)
}

/// `a ⊗ b`, i.e. `a * bᵀ`.
#[inline]
pub fn outer3(a: DVec3, b: DVec3) -> DMat3 {
    DMat3::from_cols(a * b.x, a * b.y, a * b.z)
}

/// `max(|c|, eps)` carrying the flipped sign of `c`.
///
/// Written as `a < b ? b : a` so a NaN component stays NaN.
#[inline]
fn guard_component(c: f64) -> f64 {
    let magnitude = if c.abs() < DIRECTION_EPSILON { DIRECTION_EPSILON } else { c.abs() };
    if c > 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Build a symmetric 3×3 metric whose distinguished axis follows `direction`.
///
/// A zero `direction` has no orientation; the result is NaN.
pub fn build_metric3(direction: DVec3, eigen_value_sum: f64) -> DMat3 {
    let n = direction.normalize();
    let x = DVec3::new(guard_component(n.x), guard_component(n.y), guard_component(n.z));

    let evec0 = DVec3::new(-x.z / x.x, 0.0, 1.0).normalize();
    let evec1 = DVec3::new(-x.y / x.x, 1.0, 0.0).normalize();
    let evec2 = DVec3::new(x.x / x.z, x.y / x.z, 1.0).normalize();

    let dimensions = 3.0;
    let denom = 1.0 / (dimensions - 1.0);
    let low = (eigen_value_sum - STEERING_EIGENVALUE) * denom - EIGENVALUE_BIAS;
    let mapped = [0.0, 0.0, 1.0].map(|e| fit_range(e, 0.0, 1.0, low, STEERING_EIGENVALUE));

    outer3(evec0, evec0) * mapped[0] + outer3(evec1, evec1) * mapped[1] + outer3(evec2, evec2) * mapped[2]
}

/// Build a symmetric 2×2 metric whose distinguished axis follows `direction`.
pub fn build_metric2(direction: DVec2, eigen_value_sum: f64) -> DMat2 {
    let n = direction.normalize();
    let x = DVec2::new(guard_component(n.x), guard_component(n.y));

    let evec0 = DVec2::new(-x.y / x.x, 1.0).normalize();
    let evec1 = DVec2::new(x.x / x.y, 1.0).normalize();

    let low = (eigen_value_sum - STEERING_EIGENVALUE) - EIGENVALUE_BIAS;
    let mapped = [0.0, 1.0].map(|e| fit_range(e, 0.0, 1.0, low, STEERING_EIGENVALUE));

    outer2(evec0, evec0) * mapped[0] + outer2(evec1, evec1) * mapped[1]
}

/// Blend a metric toward the identity: `strength * m + (1 - strength) * I`.
#[inline]
pub fn blend_toward_identity(metric: DMat2, strength: f64) -> DMat2 {
    metric * strength + DMat2::IDENTITY * (1.0 - strength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn directions3() -> Vec<DVec3> {
        vec![
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(-0.3, 0.9, 0.1),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.5, -0.5, 0.0),
            DVec3::new(-4.0, -1.0, 2.5),
        ]
    }

    fn assert_symmetric3(m: DMat3) {
        let t = m.transpose();
        for c in 0..3 {
            for r in 0..3 {
                assert_abs_diff_eq!(m.col(c)[r], t.col(c)[r], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn fit_range_clamps_and_remaps() {
        assert_eq!(fit_range(0.0, 0.0, 1.0, 2.0, 4.0), 2.0);
        assert_eq!(fit_range(0.5, 0.0, 1.0, 2.0, 4.0), 3.0);
        assert_eq!(fit_range(9.0, 0.0, 1.0, 2.0, 4.0), 4.0);
        assert_eq!(fit_range(-9.0, 0.0, 1.0, 2.0, 4.0), 2.0);
    }

    #[test]
    fn outer_product_layout() {
        let m = outer3(DVec3::new(1.0, 2.0, 3.0), DVec3::new(4.0, 5.0, 6.0));
        // Row r, column c holds a[r] * b[c].
        assert_eq!(m.col(1)[0], 5.0);
        assert_eq!(m.col(0)[1], 8.0);
        assert_eq!(m.col(2)[2], 18.0);
    }

    #[test]
    fn metric3_is_symmetric() {
        for d in directions3() {
            let m = build_metric3(d, 4.0);
            assert!(m.is_finite(), "metric for {d} should be finite");
            assert_symmetric3(m);
        }
    }

    #[test]
    fn metric2_is_symmetric() {
        for d in [DVec2::new(1.0, 0.0), DVec2::new(0.3, -2.0), DVec2::new(-1.0, -1.0)] {
            let m = build_metric2(d, 4.0);
            assert!(m.is_finite());
            assert_abs_diff_eq!(m.col(0).y, m.col(1).x, epsilon = 1e-12);
        }
    }

    #[test]
    fn metric2_eigenvalues_follow_budget() {
        // Eigenvectors are orthonormal in 2D, so the spectrum is exactly the
        // mapped values: 0.51 along the direction, sum - 0.51 - bias across it.
        let d = DVec2::new(0.6, 0.8);
        let m = build_metric2(d, 4.0);
        let along = d.dot(m * d);
        let perp = DVec2::new(-d.y, d.x);
        let across = perp.dot(m * perp);
        assert_abs_diff_eq!(along, STEERING_EIGENVALUE, epsilon = 1e-6);
        assert_abs_diff_eq!(across, 4.0 - STEERING_EIGENVALUE - EIGENVALUE_BIAS, epsilon = 1e-6);
    }

    #[test]
    fn metric3_steering_axis_gets_fixed_eigenvalue() {
        let d = DVec3::new(1.0, 2.0, 3.0).normalize();
        let m = build_metric3(d, 4.0);
        // evec2 is parallel to the direction and orthogonal to evec0/evec1.
        let mv = m * d;
        assert_abs_diff_eq!(mv.x, STEERING_EIGENVALUE * d.x, epsilon = 1e-9);
        assert_abs_diff_eq!(mv.y, STEERING_EIGENVALUE * d.y, epsilon = 1e-9);
        assert_abs_diff_eq!(mv.z, STEERING_EIGENVALUE * d.z, epsilon = 1e-9);
    }

    #[test]
    fn zero_direction_yields_nan() {
        assert!(build_metric3(DVec3::ZERO, 4.0).is_nan());
        assert!(build_metric2(DVec2::ZERO, 4.0).is_nan());
    }

    #[test]
    fn zero_strength_is_identity() {
        let m = build_metric2(DVec2::new(0.2, 0.9), 4.0);
        assert_eq!(blend_toward_identity(m, 0.0), DMat2::IDENTITY);
        assert_eq!(blend_toward_identity(m, 1.0), m);
    }
}
