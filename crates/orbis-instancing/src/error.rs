//! Instancing errors.

use orbis_config::SettingsError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InstancingError {
    /// Too many consecutive attempts for one instance were rejected.
    #[error("gave up after placing {placed} of {requested} instances")]
    PlacementExhausted { placed: u32, requested: u32 },

    #[error("invalid planet settings: {0}")]
    Settings(#[from] SettingsError),
}
