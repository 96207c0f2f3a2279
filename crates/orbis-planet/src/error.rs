//! Planet assembly errors.

use orbis_config::SettingsError;
use orbis_mesh::MeshError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanetError {
    #[error("invalid planet settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("mesh generation failed: {0}")]
    Mesh(#[from] MeshError),

    /// At least one LOD level is required.
    #[error("lod_levels must be at least 1, got {0}")]
    InvalidLodLevels(u32),

    /// Regeneration was cancelled; the previous patches are untouched.
    #[error("generation cancelled")]
    Cancelled,

    /// The planet has not been generated yet.
    #[error("planet has not been generated")]
    NotGenerated,
}
