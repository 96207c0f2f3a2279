//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur when loading, saving, or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// A preset name that would escape the preset directory.
    #[error("invalid preset name {0:?}")]
    InvalidPresetName(String),

    /// A preset was loaded but its parameters are out of range.
    #[error("preset {path} is invalid: {source}")]
    InvalidPreset {
        path: PathBuf,
        #[source]
        source: SettingsError,
    },
}

/// Out-of-range planet parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("radius must be in (0, {max}], got {got}")]
    InvalidRadius { got: f32, max: f32 },

    #[error("iterations must be at most {max}, got {got}")]
    TooManyIterations { got: u32, max: u32 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("grouping chance must be a percentage in 0..=100, got {0}")]
    InvalidGroupingChance(f32),

    #[error("neighbor distance must be in 0..={max}, got {got}")]
    InvalidNeighborDistance { got: f32, max: f32 },
}
