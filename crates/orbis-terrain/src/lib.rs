//! Procedural terrain: seeded 3D noise and the layered elevation model (base terrain + ridged mountains).

mod elevation;
mod noise_field;

pub use elevation::{ElevationModel, max_base_raw};
pub use noise_field::{DEFAULT_NOISE_SEED, NoiseField, ScalarField};
