//! Seeded 3D gradient noise.

use glam::DVec3;
use noise::{NoiseFn, Simplex};

/// Seed of the permutation table used when none is given.
pub const DEFAULT_NOISE_SEED: u32 = 0;

/// A deterministic scalar field over ℝ³ with values in `[-1, 1]`.
pub trait ScalarField: Send + Sync {
    fn evaluate(&self, point: DVec3) -> f64;
}

/// Simplex gradient noise over a fixed permutation table.
///
/// Holds no mutable state: the same point always yields the same value.
/// Terrain variation comes from offsetting the input, not from reseeding.
#[derive(Clone)]
pub struct NoiseField {
    source: Simplex,
    seed: u32,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            source: Simplex::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SEED)
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

impl ScalarField for NoiseField {
    #[inline]
    fn evaluate(&self, point: DVec3) -> f64 {
        self.source.get(point.to_array()).clamp(-1.0, 1.0)
    }
}
