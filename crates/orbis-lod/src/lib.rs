//! Level-of-detail management: distance-based LOD selection, the per-level mesh resolution rule, and the LOD switch state machine.

mod selector;
mod switch;

pub use selector::{LodError, LodSelector, LodThresholds, resolution_for_lod};
pub use switch::{LodSwitch, LodTransition};
