//! Material parameters for the planet shader.

use bytemuck::{Pod, Zeroable};
use orbis_config::PlanetSettings;

use crate::ocean::ocean_radius;

/// Height bands and blend width the planet material needs, laid out for a uniform buffer.
///
/// Heights are distances from the planet center.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialParams {
    /// Where grass turns into dirt.
    pub grass_dirt_distance: f32,
    /// Where rock starts.
    pub rock_distance: f32,
    /// Width of the sand band above the ocean.
    pub beach_size: f32,
    pub transition_smoothness: f32,
    /// Radius of the ocean surface.
    pub ocean_level: f32,
    pub _padding: [f32; 3],
}

impl MaterialParams {
    pub fn new(settings: &PlanetSettings, ocean_scale: f64) -> Self {
        Self {
            grass_dirt_distance: settings.grass_height,
            rock_distance: settings.rocks_height,
            beach_size: settings.beach_size,
            transition_smoothness: settings.transitions_smoothness,
            ocean_level: ocean_radius(ocean_scale) as f32,
            _padding: [0.0; 3],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
