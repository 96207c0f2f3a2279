//! Configuration system for Orbis.
//!
//! Holds the planet parameter bag consumed by every generation step, the
//! application config persisted as RON, CLI overrides via clap, and the
//! on-disk store for named planet presets.

mod cli;
mod config;
mod error;
mod preset;
mod settings;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, GenerationConfig, LodConfig, PresetConfig};
pub use error::{ConfigError, SettingsError};
pub use preset::PresetStore;
pub use settings::{MAX_ITERATIONS, MAX_NEIGHBOR_DISTANCE, MAX_RADIUS, PlanetSettings};
