//! Orbis application layer: one full generation pass from settings to published geometry, forest and material.

pub mod pipeline;

pub use pipeline::{PassReport, PipelineError, PlanetPipeline};
