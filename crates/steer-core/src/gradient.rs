//! Steering directions estimated from an external scalar map.
//!
//! Any `noise::NoiseFn<f64, 2>` can act as the map. Its central-difference
//! gradient becomes the local steering direction of the 2D field.
use std::fmt;
use std::sync::{Arc, Once};

use glam::DVec2;
use log::warn;
use noise::NoiseFn;

/// Finite-difference step used by the 2D entry point.
pub const GRADIENT_STEP: f64 = 1.0;

static MISSING_MAP: Once = Once::new();

/// Shared, read-only handle to a scalar field sampled at `[x, y]`.
#[derive(Clone)]
pub struct AnisotropyMap(Arc<dyn NoiseFn<f64, 2> + Send + Sync>);

impl AnisotropyMap {
    pub fn new<F>(field: F) -> Self
    where
        F: NoiseFn<f64, 2> + Send + Sync + 'static,
    {
        Self(Arc::new(field))
    }

    #[inline]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        self.0.get([x, y])
    }
}

impl fmt::Debug for AnisotropyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnisotropyMap").finish_non_exhaustive()
    }
}

/// Central-difference gradient of `map` at `p` with step `h`.
///
/// Returns `((l - r), (u - d)) / 2h`, i.e. the map's descent direction. When
/// no map is configured the result is `(1, 0)` and a warning is logged the
/// first time this happens in the process.
pub fn gradient(map: Option<&AnisotropyMap>, p: DVec2, h: f64) -> DVec2 {
    let Some(map) = map else {
        MISSING_MAP.call_once(|| {
            warn!("anisotropy map requested but none is configured; steering along +x");
        });
        return DVec2::X;
    };

    let left = map.sample(p.x - h, p.y);
    let right = map.sample(p.x + h, p.y);
    let up = map.sample(p.x, p.y - h);
    let down = map.sample(p.x, p.y + h);

    DVec2::new(left - right, up - down) / (2.0 * h)
}
