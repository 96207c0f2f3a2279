//! Named planet presets stored as RON files in a single directory.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::ConfigError;
use crate::settings::PlanetSettings;

const PRESET_EXTENSION: &str = "ron";

/// Saves, loads and lists [`PlanetSettings`] presets.
#[derive(Debug, Clone)]
pub struct PresetStore {
    directory: PathBuf,
}

impl PresetStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write `settings` as `<name>.ron`, creating the directory if needed.
    pub fn save(&self, name: &str, settings: &PlanetSettings) -> Result<PathBuf, ConfigError> {
        let path = self.path_for(name)?;
        std::fs::create_dir_all(&self.directory).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        let serialized =
            ron::ser::to_string_pretty(settings, pretty).map_err(ConfigError::SerializeError)?;
        std::fs::write(&path, serialized).map_err(ConfigError::WriteError)?;

        log::info!("Saved planet preset to {}", path.display());
        Ok(path)
    }

    /// Load `<name>.ron`. Returns `Ok(None)` when no such preset exists.
    pub fn load(&self, name: &str) -> Result<Option<PlanetSettings>, ConfigError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadError)?;
        let settings: PlanetSettings = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        settings
            .validate()
            .map_err(|source| ConfigError::InvalidPreset {
                path: path.clone(),
                source,
            })?;

        log::info!("Loaded planet preset from {}", path.display());
        Ok(Some(settings))
    }

    /// Preset names, most recently modified first.
    pub fn list(&self) -> Result<Vec<String>, ConfigError> {
        if !self.directory.exists() {
            return Ok(Vec::new());
        }

        let mut entries: Vec<(SystemTime, String)> = Vec::new();
        for entry in std::fs::read_dir(&self.directory).map_err(ConfigError::ReadError)? {
            let entry = entry.map_err(ConfigError::ReadError)?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PRESET_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            entries.push((modified, stem.to_string()));
        }

        entries.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        Ok(entries.into_iter().map(|(_, name)| name).collect())
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, ConfigError> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);
        if !valid {
            return Err(ConfigError::InvalidPresetName(name.to_string()));
        }
        Ok(self
            .directory
            .join(format!("{name}.{PRESET_EXTENSION}")))
    }
}
