//! Public evaluation surface.
//!
//! [`SteerableNoise`] owns a [`NoiseConfig`] and an optional change observer.
//! Host integrations (property panels, resource systems) register the
//! observer and mutate through [`SteerableNoise::update_config`]; evaluation
//! itself only reads the config and is safe to call from many threads.
use std::fmt;

use glam::{DVec2, DVec3};
use log::debug;
use noise::NoiseFn;

use crate::fractal::FractalMode;
use crate::gradient::{gradient, GRADIENT_STEP};
use crate::metric::{blend_toward_identity, build_metric2, build_metric3};
use crate::params::{AnisotropySource, NoiseConfig};
use crate::projection::make_projection;

pub type Observer = Box<dyn Fn(&NoiseConfig) + Send + Sync>;

#[derive(Default)]
pub struct SteerableNoise {
    config: NoiseConfig,
    observer: Option<Observer>,
}

impl fmt::Debug for SteerableNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteerableNoise")
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl SteerableNoise {
    pub fn new(config: NoiseConfig) -> Self {
        Self { config, observer: None }
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Register the callback invoked after every [`Self::update_config`].
    /// Replaces any previous observer.
    pub fn on_change(&mut self, observer: impl Fn(&NoiseConfig) + Send + Sync + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Mutate the config, then notify the observer once.
    pub fn update_config(&mut self, update: impl FnOnce(&mut NoiseConfig)) {
        update(&mut self.config);
        if let Some(observer) = &self.observer {
            debug!("noise config changed, notifying observer");
            observer(&self.config);
        }
    }

    /// 1D noise: the 2D field along `y = 0`.
    pub fn sample_1d(&self, x: f64) -> f64 {
        self.sample_2d(x, 0.0)
    }

    /// 2D noise from the widened anisotropic kernel.
    pub fn sample_2d(&self, x: f64, y: f64) -> f64 {
        let cfg = &self.config;
        let p = DVec2::new(x, y) * cfg.scale.truncate();

        let steering = match cfg.steering_source() {
            AnisotropySource::Swirl => DVec2::new(p.y, -p.x),
            AnisotropySource::Map => gradient(cfg.anisotropy_map.as_ref(), p, GRADIENT_STEP),
        } * cfg.anisotropy_vector_scale;

        let metric = blend_toward_identity(
            build_metric2(steering, cfg.eigen_value_sum),
            cfg.anisotropy_strength,
        );
        cfg.fractal().sample_planar(p, metric, cfg.noise_order)
    }

    /// 3D noise steered along `(z, 0, -x)`.
    pub fn sample_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        let cfg = &self.config;
        let p = DVec3::new(x, y, z);
        let metric = build_metric3(DVec3::new(z, 0.0, -x), cfg.eigen_value_sum);

        let fractal = cfg.fractal();
        match cfg.fractal_mode {
            FractalMode::ArtifactFree => fractal.sample_artifact_free(p, metric),
            FractalMode::Standard => fractal.sample(p, metric),
        }
    }

    /// 3D noise whose anisotropy is a 2×2 metric living in the plane
    /// orthogonal to `normal`.
    ///
    /// An all-zero `normal`, or one pointing along `-z`, has no well-defined
    /// projection and yields NaN.
    pub fn sample_projected(&self, p: DVec3, normal: DVec3) -> f64 {
        let cfg = &self.config;
        let projection = make_projection(normal.normalize());
        let steering = projection.transpose() * DVec3::new(p.z, 0.0, -p.x);
        let metric = build_metric2(steering.truncate(), cfg.eigen_value_sum);
        cfg.fractal().sample_projected(p, metric, projection)
    }
}

impl NoiseFn<f64, 1> for SteerableNoise {
    fn get(&self, point: [f64; 1]) -> f64 {
        self.sample_1d(point[0])
    }
}

impl NoiseFn<f64, 2> for SteerableNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample_2d(point[0], point[1])
    }
}

impl NoiseFn<f64, 3> for SteerableNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.sample_3d(point[0], point[1], point[2])
    }
}
