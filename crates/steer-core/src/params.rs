//! Noise configuration: parameters, count clamping, and JSON loading.
use std::fs;
use std::path::Path;

use glam::{DVec2, DVec3};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fractal::{Fractal, FractalMode};
use crate::gradient::AnisotropyMap;

/// Seeds are reduced modulo 2^24 so the per-axis seed shift is exact in
/// floating point.
pub const SEED_MODULUS: i64 = 1 << 24;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read noise config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid noise config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the 2D entry point takes its steering direction from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnisotropySource {
    /// Rotational field `(y, -x)` around the origin.
    #[default]
    Swirl,
    /// Gradient of [`NoiseConfig::anisotropy_map`]. Also used whenever a
    /// map is configured, whatever this field says.
    Map,
}

/// Full parameter set for one steerable noise field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawConfig")]
pub struct NoiseConfig {
    pub seed: i64,
    pub frequency: DVec3,
    pub offset: DVec3,
    /// Input scale for the 2D path.
    pub scale: DVec3,
    pub octaves: u32,
    /// Per-octave amplitude multiplier.
    pub octave_bias: f64,
    /// Budget controlling how strongly the field stretches.
    pub eigen_value_sum: f64,
    /// 0 = isotropic, 1 = fully steered (2D path). Not clamped.
    pub anisotropy_strength: f64,
    pub anisotropy_vector_scale: DVec2,
    /// Neighbourhood radius of the 2D kernel.
    pub noise_order: u32,
    pub anisotropy_source: AnisotropySource,
    pub fractal_mode: FractalMode,
    #[serde(skip)]
    pub anisotropy_map: Option<AnisotropyMap>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: DVec3::ONE,
            offset: DVec3::ZERO,
            scale: DVec3::ONE,
            octaves: 6,
            octave_bias: 0.67,
            eigen_value_sum: 4.0,
            anisotropy_strength: 1.0,
            anisotropy_vector_scale: DVec2::ONE,
            noise_order: 0,
            anisotropy_source: AnisotropySource::Swirl,
            fractal_mode: FractalMode::ArtifactFree,
            anisotropy_map: None,
        }
    }
}

/// Negative counts are clamped to zero with a warning, never rejected.
fn clamp_count(name: &str, value: i64) -> u32 {
    if value < 0 {
        warn!("invalid {name} {value}; set to 0");
    }
    value.clamp(0, u32::MAX as i64) as u32
}

impl NoiseConfig {
    pub fn set_octaves(&mut self, octaves: i32) {
        self.octaves = clamp_count("octave count", octaves.into());
    }

    pub fn set_noise_order(&mut self, order: i32) {
        self.noise_order = clamp_count("noise order", order.into());
    }

    pub fn with_anisotropy_map(mut self, map: AnisotropyMap) -> Self {
        self.anisotropy_map = Some(map);
        self.anisotropy_source = AnisotropySource::Map;
        self
    }

    /// Source the 2D path actually steers by: a configured map wins.
    pub fn steering_source(&self) -> AnisotropySource {
        if self.anisotropy_map.is_some() {
            AnisotropySource::Map
        } else {
            self.anisotropy_source
        }
    }

    /// The per-axis shift `offset + seed`.
    pub fn seed_shift(&self) -> DVec3 {
        self.offset + DVec3::splat(self.seed.rem_euclid(SEED_MODULUS) as f64)
    }

    pub fn fractal(&self) -> Fractal {
        Fractal {
            octaves: self.octaves,
            octave_bias: self.octave_bias,
            shift: self.seed_shift(),
            frequency: self.frequency,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// On-disk shape of [`NoiseConfig`]: counts are signed so negative input
/// can be clamped instead of failing to parse.
#[derive(Deserialize)]
#[serde(default)]
struct RawConfig {
    seed: i64,
    frequency: DVec3,
    offset: DVec3,
    scale: DVec3,
    octaves: i64,
    octave_bias: f64,
    eigen_value_sum: f64,
    anisotropy_strength: f64,
    anisotropy_vector_scale: DVec2,
    noise_order: i64,
    anisotropy_source: AnisotropySource,
    fractal_mode: FractalMode,
}

impl Default for RawConfig {
    fn default() -> Self {
        let d = NoiseConfig::default();
        Self {
            seed: d.seed,
            frequency: d.frequency,
            offset: d.offset,
            scale: d.scale,
            octaves: d.octaves as i64,
            octave_bias: d.octave_bias,
            eigen_value_sum: d.eigen_value_sum,
            anisotropy_strength: d.anisotropy_strength,
            anisotropy_vector_scale: d.anisotropy_vector_scale,
            noise_order: d.noise_order as i64,
            anisotropy_source: d.anisotropy_source,
            fractal_mode: d.fractal_mode,
        }
    }
}

impl From<RawConfig> for NoiseConfig {
    fn from(raw: RawConfig) -> Self {
        NoiseConfig {
            seed: raw.seed,
            frequency: raw.frequency,
            offset: raw.offset,
            scale: raw.scale,
            octaves: clamp_count("octave count", raw.octaves),
            octave_bias: raw.octave_bias,
            eigen_value_sum: raw.eigen_value_sum,
            anisotropy_strength: raw.anisotropy_strength,
            anisotropy_vector_scale: raw.anisotropy_vector_scale,
            noise_order: clamp_count("noise order", raw.noise_order),
            anisotropy_source: raw.anisotropy_source,
            fractal_mode: raw.fractal_mode,
            anisotropy_map: None,
        }
    }
}
