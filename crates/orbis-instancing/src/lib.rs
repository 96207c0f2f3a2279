//! Surface instancing: scatters trees over the planet surface by casting rays toward the center along a random walk of directions.

mod error;
mod instancer;
mod seed;
mod walk;

pub use error::InstancingError;
pub use instancer::{INSTANCE_SCALE_FACTOR, PlacedInstance, RAY_START_DISTANCE, SurfaceInstancer, instance_rotation};
pub use seed::SeedControl;
pub use walk::DirectionWalk;
