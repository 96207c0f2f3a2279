//! Discrete LOD switching: tracks the active level and reports changes.

use orbis_config::LodConfig;
use tracing::debug;

use crate::{LodError, LodSelector, LodThresholds};

/// A change of the active LOD level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LodTransition {
    pub from: u8,
    pub to: u8,
}

/// Holds the active LOD level and emits a [`LodTransition`] only when it changes.
///
/// Showing and hiding the per-level meshes is left to whoever consumes the
/// transitions. A disabled switch stays on LOD 0.
#[derive(Clone, Debug)]
pub struct LodSwitch {
    selector: LodSelector,
    enabled: bool,
    active: u8,
}

impl LodSwitch {
    pub fn new(selector: LodSelector, enabled: bool) -> Self {
        Self {
            selector,
            enabled,
            active: 0,
        }
    }

    /// Build from the `[lod]` config section.
    pub fn from_config(config: &LodConfig) -> Result<Self, LodError> {
        let selector = LodSelector::new(LodThresholds::custom(config.thresholds.clone())?);
        Ok(Self::new(selector, config.enabled))
    }

    /// Fail if an enabled switch could select a level outside `0..lod_levels`.
    pub fn check_levels(&self, lod_levels: u32) -> Result<(), LodError> {
        let switch_levels = self.selector.thresholds().level_count();
        if self.enabled && switch_levels != lod_levels {
            return Err(LodError::LevelCountMismatch {
                switch_levels,
                lod_levels,
            });
        }
        Ok(())
    }

    pub fn selector(&self) -> &LodSelector {
        &self.selector
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn active(&self) -> u8 {
        self.active
    }

    /// Feed the current viewer distance. Returns the transition if the level changed.
    pub fn update(&mut self, distance: f64) -> Option<LodTransition> {
        let target = if self.enabled {
            self.selector.select_lod(distance.max(0.0))
        } else {
            0
        };
        self.switch_to(target)
    }

    /// Turn switching on or off. Disabling snaps back to LOD 0.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<LodTransition> {
        self.enabled = enabled;
        if enabled { None } else { self.switch_to(0) }
    }

    fn switch_to(&mut self, target: u8) -> Option<LodTransition> {
        if target == self.active {
            return None;
        }
        let transition = LodTransition {
            from: self.active,
            to: target,
        };
        debug!(from = transition.from, to = transition.to, "LOD switch");
        self.active = target;
        Some(transition)
    }
}
