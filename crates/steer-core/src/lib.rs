//! Steerable anisotropic Perlin noise.
//!
//! Perlin's lattice-gradient construction generalised with a per-sample
//! metric tensor. The metric is synthesised from a local steering direction
//! and warps both the gradient projection and the corner weights, so the
//! field stretches and rotates locally instead of being isotropic.
//!
//! ```
//! use steer_core::{NoiseConfig, SteerableNoise};
//!
//! let mut config = NoiseConfig::default();
//! config.octaves = 4;
//! let noise = SteerableNoise::new(config);
//! let v = noise.sample_3d(0.25, 1.5, -0.75);
//! assert!(v.is_finite());
//! ```
//!
//! Evaluation is a pure function of `(position, config)`: nothing is cached
//! between calls.
pub mod fractal;
pub mod gradient;
pub mod hash;
pub mod kernel;
pub mod lattice;
pub mod metric;
pub mod params;
pub mod projection;
pub mod steerable;

pub use fractal::{Fractal, FractalMode};
pub use gradient::AnisotropyMap;
pub use params::{AnisotropySource, ConfigError, NoiseConfig};
pub use steerable::{Observer, SteerableNoise};
