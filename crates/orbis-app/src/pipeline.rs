//! One generation pass: snapshot settings, rebuild patches, publish, scatter trees, paint.

use orbis_config::{Config, ConfigError, PlanetSettings};
use orbis_instancing::{InstancingError, PlacedInstance, SeedControl, SurfaceInstancer};
use orbis_lod::{LodError, LodSwitch, LodTransition};
use orbis_planet::{GenerationReport, MaterialParams, PlanetAssembler, PlanetError, PlanetSink};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Planet(#[from] PlanetError),

    #[error(transparent)]
    Instancing(#[from] InstancingError),

    #[error(transparent)]
    Lod(#[from] LodError),
}

/// Outcome of [`PlanetPipeline::run_pass`].
#[derive(Clone, Debug, PartialEq)]
pub struct PassReport {
    pub generation: GenerationReport,
    pub instance_count: usize,
    pub instancing_seed: u64,
    pub material: MaterialParams,
}

/// Owns the assembler, instancer, seed control and LOD switch, and runs them in order.
pub struct PlanetPipeline {
    assembler: PlanetAssembler,
    instancer: SurfaceInstancer,
    seed: SeedControl,
    lod: LodSwitch,
    instances: Vec<PlacedInstance>,
}

impl PlanetPipeline {
    /// Fails when the enabled LOD switch covers a different number of levels than are generated.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let assembler = PlanetAssembler::new(&config.generation)?;
        let lod = LodSwitch::from_config(&config.lod)?;
        lod.check_levels(assembler.lod_levels())?;
        Ok(Self {
            assembler,
            instancer: SurfaceInstancer::from_config(&config.generation),
            seed: SeedControl::new(),
            lod,
            instances: Vec::new(),
        })
    }

    pub fn assembler(&self) -> &PlanetAssembler {
        &self.assembler
    }

    pub fn assembler_mut(&mut self) -> &mut PlanetAssembler {
        &mut self.assembler
    }

    pub fn instances(&self) -> &[PlacedInstance] {
        &self.instances
    }

    pub fn clear_instances(&mut self) {
        self.instances.clear();
    }

    /// Use `seed` for the next instancing pass only.
    pub fn request_seed(&mut self, seed: u64) {
        self.seed.request(seed);
    }

    /// Queue the forest recorded in a loaded preset for replay.
    pub fn replay_forest_of(&mut self, settings: &PlanetSettings) {
        self.request_seed(settings.last_instancing_seed);
    }

    /// Rebuild everything from `settings`.
    ///
    /// Generation works on a snapshot; the only field written back is
    /// `last_instancing_seed`. The material is applied even when placement
    /// gives up, so the sink always matches the new geometry.
    pub fn run_pass(
        &mut self,
        settings: &mut PlanetSettings,
        sink: &mut dyn PlanetSink,
    ) -> Result<PassReport, PipelineError> {
        let mut snapshot = settings.clone();

        let generation = self.assembler.regenerate_all(&snapshot)?;
        self.assembler.publish(sink)?;

        self.clear_instances();
        let surface = self
            .assembler
            .finest_surface()
            .ok_or(PlanetError::NotGenerated)?;
        let placement = self.instancer.generate(
            &mut snapshot,
            surface,
            self.assembler.ocean_radius(),
            &mut self.seed,
        );
        settings.last_instancing_seed = snapshot.last_instancing_seed;

        let material = self.assembler.repaint(&snapshot, sink);
        self.instances = placement?;

        info!(
            "Generation pass complete: {} patches, {} instances",
            generation.patch_count,
            self.instances.len()
        );
        Ok(PassReport {
            generation,
            instance_count: self.instances.len(),
            instancing_seed: snapshot.last_instancing_seed,
            material,
        })
    }

    /// Apply brush-only changes without regenerating geometry.
    pub fn repaint(&self, settings: &PlanetSettings, sink: &mut dyn PlanetSink) -> MaterialParams {
        self.assembler.repaint(settings, sink)
    }

    /// Feed the viewer's distance from the planet center.
    pub fn update_lod(&mut self, distance: f64) -> Option<LodTransition> {
        self.lod.update(distance)
    }

    pub fn active_lod(&self) -> u8 {
        self.lod.active()
    }
}
