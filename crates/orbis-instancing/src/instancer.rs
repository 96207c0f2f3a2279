//! Tree placement by ray casting onto the planet surface.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat3, Quat, Vec3};
use orbis_config::{GenerationConfig, PlanetSettings};
use orbis_mesh::Ray;
use orbis_planet::SurfaceQuery;
use tracing::{debug, info, warn};

use crate::error::InstancingError;
use crate::seed::SeedControl;
use crate::walk::DirectionWalk;

/// Rays start this far from the center. `PlanetSettings::validate` caps the base
/// radius at `MAX_RADIUS`, well inside this sphere.
pub const RAY_START_DISTANCE: f32 = 50.0;

/// Most instances reserved up front; larger forests grow the buffer as they go.
const PREALLOCATE_LIMIT: usize = 4096;

/// Instances are scaled by `tree_scale * INSTANCE_SCALE_FACTOR`.
pub const INSTANCE_SCALE_FACTOR: f32 = 0.02;

/// One placed tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedInstance {
    /// Surface hit point.
    pub position: Vec3,
    /// Maps the model's local up (+Y) onto `direction`.
    pub rotation: Quat,
    pub scale: f32,
    /// Normalized direction from the center the instance was placed along.
    pub direction: Vec3,
}

/// Look-rotation toward `direction` followed by a +90° pitch, so the model's
/// up axis points along `direction`.
pub fn instance_rotation(direction: Vec3) -> Quat {
    let forward = direction.normalize();
    let hint = if forward.cross(Vec3::Y).length_squared() < 1e-8 {
        Vec3::Z
    } else {
        Vec3::Y
    };
    let right = hint.cross(forward).normalize();
    let up = forward.cross(right);
    let look = Quat::from_mat3(&Mat3::from_cols(right, up, forward));
    (look * Quat::from_rotation_x(FRAC_PI_2)).normalize()
}

/// Scatters `tree_count` instances over a surface, skipping anything at or below the ocean.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceInstancer {
    max_retries_per_instance: u32,
}

impl SurfaceInstancer {
    pub fn new(max_retries_per_instance: u32) -> Self {
        Self {
            max_retries_per_instance,
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.max_retries_per_instance)
    }

    pub fn max_retries_per_instance(&self) -> u32 {
        self.max_retries_per_instance
    }

    /// Place `settings.tree_count` instances.
    ///
    /// The seed is taken from `seed` and recorded in
    /// `settings.last_instancing_seed` before any placement. A rejected
    /// attempt (underwater hit or no hit) retries the same instance with the
    /// next walk step; more than `max_retries_per_instance` consecutive
    /// rejections end the pass with [`InstancingError::PlacementExhausted`].
    pub fn generate(
        &self,
        settings: &mut PlanetSettings,
        surface: &dyn SurfaceQuery,
        ocean_radius: f64,
        seed: &mut SeedControl,
    ) -> Result<Vec<PlacedInstance>, InstancingError> {
        settings.validate()?;
        let seed = seed.take();
        settings.last_instancing_seed = seed;

        let requested = settings.tree_count;
        let scale = settings.tree_scale * INSTANCE_SCALE_FACTOR;
        let max_distance = RAY_START_DISTANCE * 2.0;
        let mut walk = DirectionWalk::new(seed);
        let mut instances = Vec::with_capacity((requested as usize).min(PREALLOCATE_LIMIT));
        let mut rejected_total = 0u64;

        while instances.len() < requested as usize {
            let mut rejections = 0u32;
            let instance = loop {
                let raw = walk.step(settings.grouping_chance, settings.neighbor_distance);
                let direction = raw.try_normalize().unwrap_or(Vec3::X);
                let ray = Ray::new(direction * RAY_START_DISTANCE, -direction);

                match surface.raycast(&ray, max_distance) {
                    Some(hit) if f64::from(hit.point.length()) > ocean_radius => {
                        break Some(PlacedInstance {
                            position: hit.point,
                            rotation: instance_rotation(direction),
                            scale,
                            direction,
                        });
                    }
                    _ => {
                        rejections += 1;
                        rejected_total += 1;
                        if rejections > self.max_retries_per_instance {
                            break None;
                        }
                    }
                }
            };

            match instance {
                Some(instance) => instances.push(instance),
                None => {
                    let placed = instances.len() as u32;
                    warn!(
                        "Instancing gave up after {} consecutive rejections: placed {} of {}",
                        rejections, placed, requested
                    );
                    return Err(InstancingError::PlacementExhausted { placed, requested });
                }
            }
        }

        debug!(seed, rejected = rejected_total, "instancing walk finished");
        info!("Placed {} instances (seed {})", instances.len(), seed);
        Ok(instances)
    }
}
