//! Distance-based LOD selection with configurable thresholds.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LodError {
    #[error("at least one LOD threshold is required")]
    NoThresholds,

    #[error("LOD threshold {index} must be positive and finite, got {value}")]
    InvalidThreshold { index: usize, value: f64 },

    #[error("LOD thresholds must be strictly increasing: {previous} then {value}")]
    NotIncreasing { previous: f64, value: f64 },

    #[error("LOD thresholds select {switch_levels} levels but {lod_levels} are generated")]
    LevelCountMismatch { switch_levels: u32, lod_levels: u32 },
}

/// Distance boundaries between LOD levels.
#[derive(Clone, Debug, PartialEq)]
pub struct LodThresholds {
    /// `thresholds[i]` is the exclusive upper distance for LOD level `i`.
    /// The last level extends to infinity.
    thresholds: Vec<f64>,
}

impl LodThresholds {
    /// Planet-scale defaults in planet radii: LOD 0 below 2.0, LOD 1 below 3.25, LOD 2 beyond.
    pub fn default_planet() -> Self {
        Self {
            thresholds: vec![2.0, 3.25],
        }
    }

    /// Validate and wrap a list of distance boundaries.
    pub fn custom(thresholds: Vec<f64>) -> Result<Self, LodError> {
        if thresholds.is_empty() {
            return Err(LodError::NoThresholds);
        }
        for (index, &value) in thresholds.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(LodError::InvalidThreshold { index, value });
            }
            if index > 0 && value <= thresholds[index - 1] {
                return Err(LodError::NotIncreasing {
                    previous: thresholds[index - 1],
                    value,
                });
            }
        }
        Ok(Self { thresholds })
    }

    /// The coarsest LOD level.
    pub fn max_lod(&self) -> u8 {
        self.thresholds.len() as u8
    }

    /// Number of LOD levels, one more than the number of thresholds.
    pub fn level_count(&self) -> u32 {
        self.thresholds.len() as u32 + 1
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }
}

impl Default for LodThresholds {
    fn default() -> Self {
        Self::default_planet()
    }
}

/// Selects LOD levels based on the viewer's distance from the planet center.
#[derive(Clone, Debug, PartialEq)]
pub struct LodSelector {
    thresholds: LodThresholds,
}

impl LodSelector {
    pub fn new(thresholds: LodThresholds) -> Self {
        Self { thresholds }
    }

    /// LOD 0 is the finest. Distances at or past the last threshold return `max_lod`.
    pub fn select_lod(&self, distance: f64) -> u8 {
        debug_assert!(distance >= 0.0, "distance must be non-negative");
        for (i, &threshold) in self.thresholds.thresholds.iter().enumerate() {
            if distance < threshold {
                return i as u8;
            }
        }
        self.thresholds.max_lod()
    }

    pub fn thresholds(&self) -> &LodThresholds {
        &self.thresholds
    }
}

impl Default for LodSelector {
    fn default() -> Self {
        Self::new(LodThresholds::default_planet())
    }
}

/// Grid resolution for a LOD level: `max(2, base / (level + 1))`.
pub fn resolution_for_lod(base_resolution: u32, level: u32) -> u32 {
    (base_resolution / (level + 1)).max(2)
}
