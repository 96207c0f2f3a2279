//! The boundary to whatever renders and collides with the planet.

use std::collections::BTreeMap;

use orbis_mesh::MeshPatch;

use crate::assembler::PatchKey;
use crate::paint::MaterialParams;
use crate::surface::PlanetSurface;

/// Receives generated geometry, the collision surface, the ocean scale and material updates.
pub trait PlanetSink {
    fn upload_patch(&mut self, key: PatchKey, patch: &MeshPatch);
    fn rebuild_collision(&mut self, surface: &PlanetSurface);
    fn set_ocean_scale(&mut self, scale: f64);
    fn apply_material(&mut self, params: &MaterialParams);
}

/// Summary of one uploaded patch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadedPatch {
    pub resolution: u32,
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Incremented each time the same key is uploaded again.
    pub generation: u32,
}

/// A headless sink that records what it was given.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub patches: BTreeMap<PatchKey, UploadedPatch>,
    pub collision_triangles: Option<usize>,
    pub collision_rebuilds: u32,
    pub ocean_scale: Option<f64>,
    pub material: Option<MaterialParams>,
    pub material_updates: u32,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_vertices(&self) -> usize {
        self.patches.values().map(|p| p.vertex_count).sum()
    }

    pub fn total_triangles(&self) -> usize {
        self.patches.values().map(|p| p.triangle_count).sum()
    }
}

impl PlanetSink for RecordingSink {
    fn upload_patch(&mut self, key: PatchKey, patch: &MeshPatch) {
        let generation = self.patches.get(&key).map_or(0, |p| p.generation + 1);
        self.patches.insert(
            key,
            UploadedPatch {
                resolution: patch.resolution(),
                vertex_count: patch.vertex_count(),
                triangle_count: patch.triangle_count(),
                generation,
            },
        );
    }

    fn rebuild_collision(&mut self, surface: &PlanetSurface) {
        self.collision_triangles = Some(surface.triangle_count());
        self.collision_rebuilds += 1;
    }

    fn set_ocean_scale(&mut self, scale: f64) {
        self.ocean_scale = Some(scale);
    }

    fn apply_material(&mut self, params: &MaterialParams) {
        self.material = Some(*params);
        self.material_updates += 1;
    }
}
