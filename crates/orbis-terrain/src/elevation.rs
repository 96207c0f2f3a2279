//! Layered elevation: fBm base terrain floored at sea level, masked ridged mountains on top.
//!
//! Both layers halve their amplitude every octave. The base layer maps each
//! noise sample to `[0, 1]` before accumulating; the mountain layer folds the
//! sample into a ridge `(1 - |n|)²` and weights each octave by the previous
//! one so ridges stay connected.

use glam::DVec3;
use orbis_config::PlanetSettings;

use crate::noise_field::{NoiseField, ScalarField};

/// Computes per-point elevation from a noise field and the planet settings.
#[derive(Debug, Clone, Default)]
pub struct ElevationModel<N = NoiseField> {
    noise: N,
}

impl<N: ScalarField> ElevationModel<N> {
    pub fn new(noise: N) -> Self {
        Self { noise }
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }

    /// Sum of the base-terrain octaves before the sea-level floor.
    pub fn base_raw(&self, point: DVec3, settings: &PlanetSettings) -> f64 {
        let offset = DVec3::splat(f64::from(settings.noise_offset));
        let mut total = 0.0;
        let mut frequency = f64::from(settings.base_shape_roughness);
        let mut amplitude = 1.0;

        for _ in 0..settings.iterations {
            let v = self.noise.evaluate(point * frequency + offset);
            total += (v + 1.0) * 0.5 * amplitude;
            frequency *= f64::from(settings.terrain_roughness);
            amplitude *= 0.5;
        }
        total
    }

    /// Base terrain layer: `max(0, raw - sea_level) * strength`.
    pub fn base_layer(&self, point: DVec3, settings: &PlanetSettings) -> f64 {
        let raw = self.base_raw(point, settings);
        (raw - f64::from(settings.sea_level)).max(0.0) * f64::from(settings.strength)
    }

    /// Ridged mountain layer, already scaled by `mountain_strength`.
    pub fn mountain_layer(&self, point: DVec3, settings: &PlanetSettings) -> f64 {
        let offset = DVec3::splat(f64::from(settings.noise_offset));
        let lacunarity = f64::from(settings.mountain_frequency);
        let mut total = 0.0;
        let mut frequency = lacunarity;
        let mut amplitude = 1.0;
        let mut weight = 1.0;

        for _ in 0..settings.iterations {
            let ridge = 1.0 - self.noise.evaluate(point * frequency + offset).abs();
            let ridge = ridge * ridge * weight;
            total += ridge * amplitude;
            weight = ridge;
            frequency *= lacunarity;
            amplitude *= 0.5;
        }
        total * f64::from(settings.mountain_strength)
    }

    /// Combined elevation. Mountains are masked by the base layer, so they
    /// only rise where there is already land above sea level.
    pub fn elevation(&self, point: DVec3, settings: &PlanetSettings) -> f64 {
        let base = self.base_layer(point, settings);
        if base == 0.0 {
            return 0.0;
        }
        base + self.mountain_layer(point, settings) * base
    }

    /// Final displaced position for a point on the unit sphere.
    pub fn surface_point(&self, point_on_unit_sphere: DVec3, settings: &PlanetSettings) -> DVec3 {
        let elevation = self.elevation(point_on_unit_sphere, settings);
        point_on_unit_sphere * f64::from(settings.radius) * (1.0 + elevation)
    }
}

/// Largest value [`ElevationModel::base_raw`] can reach for the given octave count.
pub fn max_base_raw(iterations: u32) -> f64 {
    (0..iterations).map(|i| 0.5f64.powi(i as i32)).sum()
}
