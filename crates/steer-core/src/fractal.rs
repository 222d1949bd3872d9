//! Multi-octave composition of the lattice evaluators.
//!
//! Octave `i` samples at frequency `2^i` with amplitude `octave_bias^i`.
//! Sample positions are shifted by `offset + seed` before scaling.
use glam::{DMat2, DMat3, DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::lattice::{aniso_perlin, steerable_perlin, steerable_perlin_projected};

/// Offset added to the second evaluation of each octave in
/// [`Fractal::sample_artifact_free`].
pub const ARTIFACT_SHIFT: f64 = 0.5;

/// Which octave sum the 3D entry point uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractalMode {
    /// Plain fBm.
    Standard,
    /// Each octave averages two half-cell-shifted evaluations.
    #[default]
    ArtifactFree,
}

/// Octave-stack parameters resolved from a [`crate::NoiseConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fractal {
    pub octaves: u32,
    pub octave_bias: f64,
    /// `offset + seed`, applied before frequency scaling.
    pub shift: DVec3,
    pub frequency: DVec3,
}

impl Fractal {
    #[inline]
    fn amplitude(&self, i: u32) -> f64 {
        self.octave_bias.powf(i as f64)
    }

    #[inline]
    fn lacunarity(i: u32) -> f64 {
        2.0f64.powf(i as f64)
    }

    /// Plain fBm of [`steerable_perlin`].
    pub fn sample(&self, p: DVec3, metric: DMat3) -> f64 {
        let mut out = 0.0;
        for i in 0..self.octaves {
            let q = Self::lacunarity(i) * (p + self.shift) * self.frequency;
            out += self.amplitude(i) * steerable_perlin(q, metric);
        }
        out
    }

    /// fBm where each octave averages the lattice at `p` and at `p + 0.5`.
    ///
    /// Corner weights peak at cell centres; when those peaks line up across
    /// octaves they show as a regular grid. The half-cell shifted copy fills
    /// the troughs.
    pub fn sample_artifact_free(&self, p: DVec3, metric: DMat3) -> f64 {
        let mut out = 0.0;
        for i in 0..self.octaves {
            let scale = Self::lacunarity(i);
            let base = steerable_perlin(scale * (p + self.shift) * self.frequency, metric);
            let shifted = steerable_perlin(
                scale * ((p + self.shift + ARTIFACT_SHIFT) * self.frequency),
                metric,
            );
            out += self.amplitude(i) * (base + shifted) * 0.5;
        }
        out
    }

    /// Octave sum of the 2D [`aniso_perlin`] kernel, using the `xy` parts of
    /// the shift and frequency.
    pub fn sample_planar(&self, p: DVec2, metric: DMat2, order: u32) -> f64 {
        let shift = self.shift.truncate();
        let frequency = self.frequency.truncate();
        let mut out = 0.0;
        for i in 0..self.octaves {
            let q = Self::lacunarity(i) * (p + shift) * frequency;
            out += self.amplitude(i) * aniso_perlin(q, metric, order);
        }
        out
    }

    /// Plain fBm of [`steerable_perlin_projected`].
    pub fn sample_projected(&self, p: DVec3, metric: DMat2, projection: DMat3) -> f64 {
        let mut out = 0.0;
        for i in 0..self.octaves {
            let q = Self::lacunarity(i) * (p + self.shift) * self.frequency;
            out += self.amplitude(i) * steerable_perlin_projected(q, metric, projection);
        }
        out
    }
}
