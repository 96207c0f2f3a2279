//! The planet parameter bag read by every generation step.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Upper bound on noise octaves per layer.
pub const MAX_ITERATIONS: u32 = 8;

/// Largest base radius. Placement rays start at 50 units, so planets stay well inside that.
pub const MAX_RADIUS: f32 = 10.0;

/// Largest per-axis jitter applied to a unit direction when grouping.
pub const MAX_NEIGHBOR_DISTANCE: f32 = 1.0;

/// Parameters for one planet: terrain shape, mountains, forest and brush.
///
/// Generation treats a `PlanetSettings` value as immutable for the duration
/// of a pass. The only field written back by the core is
/// [`last_instancing_seed`](Self::last_instancing_seed).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetSettings {
    /// Base sphere radius before displacement.
    pub radius: f32,

    /// Multiplier applied to the base terrain layer after the sea-level floor.
    pub strength: f32,
    /// Number of noise octaves per layer, at most [`MAX_ITERATIONS`].
    pub iterations: u32,
    /// Frequency of the first base-terrain octave.
    pub base_shape_roughness: f32,
    /// Frequency multiplier between successive base-terrain octaves.
    pub terrain_roughness: f32,
    /// Offset added to every noise input. Same offset, same terrain.
    pub noise_offset: f32,
    /// Raw base-layer values below this produce no land.
    pub sea_level: f32,

    /// Multiplier applied to the ridged mountain layer.
    pub mountain_strength: f32,
    /// First-octave frequency and per-octave multiplier of the mountain layer.
    pub mountain_frequency: f32,

    /// Number of trees to place.
    pub tree_count: u32,
    /// Percentage chance (0-100) that a tree is placed near the previous one.
    pub grouping_chance: f32,
    /// Maximum per-axis jitter applied to the direction when grouping.
    pub neighbor_distance: f32,
    /// Tree scale; instances are scaled by `tree_scale * 0.02`.
    pub tree_scale: f32,
    /// Seed used by the most recent instancing pass.
    pub last_instancing_seed: u64,

    /// Width of the sand band above the ocean.
    pub beach_size: f32,
    /// Distance from the center where grass turns into dirt.
    pub grass_height: f32,
    /// Distance from the center where rock starts.
    pub rocks_height: f32,
    /// Blend width between material bands.
    pub transitions_smoothness: f32,
}

impl Default for PlanetSettings {
    fn default() -> Self {
        Self {
            radius: 1.0,
            strength: 1.0,
            iterations: MAX_ITERATIONS,
            base_shape_roughness: 1.0,
            terrain_roughness: 2.0,
            noise_offset: 42.0,
            sea_level: 1.0,
            mountain_strength: 1.0,
            mountain_frequency: 1.0,
            tree_count: 500,
            grouping_chance: 95.0,
            neighbor_distance: 0.015,
            tree_scale: 1.0,
            last_instancing_seed: 0,
            beach_size: 0.02,
            grass_height: 1.162_985,
            rocks_height: 1.138_341,
            transitions_smoothness: 1.0,
        }
    }
}

impl PlanetSettings {
    /// Check every parameter the generators rely on.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.radius > 0.0 && self.radius <= MAX_RADIUS) {
            return Err(SettingsError::InvalidRadius {
                got: self.radius,
                max: MAX_RADIUS,
            });
        }
        if self.iterations > MAX_ITERATIONS {
            return Err(SettingsError::TooManyIterations {
                got: self.iterations,
                max: MAX_ITERATIONS,
            });
        }

        let finite = [
            ("strength", self.strength),
            ("base_shape_roughness", self.base_shape_roughness),
            ("terrain_roughness", self.terrain_roughness),
            ("noise_offset", self.noise_offset),
            ("sea_level", self.sea_level),
            ("mountain_strength", self.mountain_strength),
            ("mountain_frequency", self.mountain_frequency),
            ("tree_scale", self.tree_scale),
        ];
        if let Some(&(name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SettingsError::NonFinite { name, value });
        }

        if !(0.0..=100.0).contains(&self.grouping_chance) {
            return Err(SettingsError::InvalidGroupingChance(self.grouping_chance));
        }
        if !(0.0..=MAX_NEIGHBOR_DISTANCE).contains(&self.neighbor_distance) {
            return Err(SettingsError::InvalidNeighborDistance {
                got: self.neighbor_distance,
                max: MAX_NEIGHBOR_DISTANCE,
            });
        }
        Ok(())
    }
}
