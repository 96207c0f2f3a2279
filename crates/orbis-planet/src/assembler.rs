//! Builds and owns every face patch of every LOD level.
//!
//! Patches are laid out LOD-major: level 0 holds the six finest faces in
//! [`CubeFace::ALL`] order, level 1 the next coarser six, and so on. A
//! regeneration builds the full set into fresh buffers and only swaps them in
//! once every patch succeeded.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use orbis_config::{GenerationConfig, PlanetSettings};
use orbis_cubesphere::CubeFace;
use orbis_lod::resolution_for_lod;
use orbis_mesh::{FaceMeshBuilder, MAX_RESOLUTION, MIN_RESOLUTION, MeshError, MeshPatch};
use orbis_terrain::ElevationModel;
use tracing::{debug, info};

use crate::error::PlanetError;
use crate::ocean::{OCEAN_BASE_SCALE, ocean_radius, ocean_scale};
use crate::paint::MaterialParams;
use crate::sink::PlanetSink;
use crate::surface::PlanetSurface;

/// Identifies one patch: a LOD level and a cube face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatchKey {
    pub lod: u32,
    pub face: CubeFace,
}

/// Shared flag checked between patches. Cloning shares the flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What one regeneration produced.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationReport {
    pub patch_count: usize,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub ocean_scale: f64,
    pub elapsed: Duration,
}

pub struct PlanetAssembler {
    base_resolution: u32,
    lod_levels: u32,
    parallel: bool,
    model: ElevationModel,
    levels: Vec<PlanetSurface>,
    ocean_scale: f64,
    cancel: Option<CancelToken>,
}

impl PlanetAssembler {
    pub fn new(config: &GenerationConfig) -> Result<Self, PlanetError> {
        if config.lod_levels == 0 {
            return Err(PlanetError::InvalidLodLevels(config.lod_levels));
        }
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&config.base_resolution) {
            return Err(MeshError::InvalidResolution(config.base_resolution).into());
        }
        Ok(Self {
            base_resolution: config.base_resolution,
            lod_levels: config.lod_levels,
            parallel: config.parallel,
            model: ElevationModel::default(),
            levels: Vec::new(),
            ocean_scale: OCEAN_BASE_SCALE,
            cancel: None,
        })
    }

    /// Check this token between patches; a set token aborts the pass.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub fn lod_levels(&self) -> u32 {
        self.lod_levels
    }

    pub fn model(&self) -> &ElevationModel {
        &self.model
    }

    /// Mesh resolution used for `lod`.
    pub fn resolution_for(&self, lod: u32) -> u32 {
        resolution_for_lod(self.base_resolution, lod)
    }

    /// Every patch key in build order.
    pub fn patch_keys(&self) -> Vec<PatchKey> {
        (0..self.lod_levels)
            .flat_map(|lod| CubeFace::ALL.map(|face| PatchKey { lod, face }))
            .collect()
    }

    /// Rebuild all `lod_levels × 6` patches and recompute the ocean scale.
    ///
    /// Calling this twice with the same settings yields identical geometry.
    /// On error or cancellation the previous patches stay in place.
    pub fn regenerate_all(
        &mut self,
        settings: &PlanetSettings,
    ) -> Result<GenerationReport, PlanetError> {
        settings.validate()?;
        let start = Instant::now();
        let keys = self.patch_keys();

        let built = if self.parallel && keys.len() > 1 {
            self.build_parallel(&keys, settings)?
        } else {
            self.build_group(&keys, settings)?
        };

        let mut built = built.into_iter();
        let levels: Vec<PlanetSurface> = (0..self.lod_levels)
            .map(|lod| PlanetSurface::new(lod, built.by_ref().take(CubeFace::ALL.len()).collect()))
            .collect();

        self.levels = levels;
        self.ocean_scale = ocean_scale(settings.sea_level);

        let report = GenerationReport {
            patch_count: keys.len(),
            vertex_count: self.levels.iter().map(PlanetSurface::vertex_count).sum(),
            triangle_count: self.levels.iter().map(PlanetSurface::triangle_count).sum(),
            ocean_scale: self.ocean_scale,
            elapsed: start.elapsed(),
        };
        info!(
            "Planet regenerated: {} patches, {} vertices, {} triangles in {:.1} ms",
            report.patch_count,
            report.vertex_count,
            report.triangle_count,
            report.elapsed.as_secs_f64() * 1000.0
        );
        Ok(report)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    fn build_group(
        &self,
        keys: &[PatchKey],
        settings: &PlanetSettings,
    ) -> Result<Vec<MeshPatch>, PlanetError> {
        keys.iter()
            .map(|&key| {
                if self.is_cancelled() {
                    return Err(PlanetError::Cancelled);
                }
                let builder = FaceMeshBuilder::new(key.face, self.resolution_for(key.lod))?;
                let patch = builder.build(&self.model, settings)?;
                debug!(
                    lod = key.lod,
                    face = ?key.face,
                    resolution = patch.resolution(),
                    "built patch"
                );
                Ok(patch)
            })
            .collect()
    }

    /// Split the keys into contiguous groups, one per worker, and concatenate
    /// the results in key order.
    fn build_parallel(
        &self,
        keys: &[PatchKey],
        settings: &PlanetSettings,
    ) -> Result<Vec<MeshPatch>, PlanetError> {
        let workers = num_cpus::get().clamp(1, keys.len());
        let group_len = keys.len().div_ceil(workers);

        std::thread::scope(|scope| {
            let handles: Vec<_> = keys
                .chunks(group_len)
                .map(|group| scope.spawn(move || self.build_group(group, settings)))
                .collect();

            let mut patches = Vec::with_capacity(keys.len());
            for handle in handles {
                match handle.join() {
                    Ok(group) => patches.extend(group?),
                    Err(payload) => std::panic::resume_unwind(payload),
                }
            }
            Ok(patches)
        })
    }

    pub fn is_generated(&self) -> bool {
        !self.levels.is_empty()
    }

    /// The six LOD-0 patches, used for collision and instancing.
    pub fn finest_surface(&self) -> Option<&PlanetSurface> {
        self.levels.first()
    }

    pub fn surface(&self, lod: u32) -> Option<&PlanetSurface> {
        self.levels.get(lod as usize)
    }

    pub fn patch(&self, key: PatchKey) -> Option<&MeshPatch> {
        self.surface(key.lod).map(|s| s.patch(key.face))
    }

    pub fn ocean_scale(&self) -> f64 {
        self.ocean_scale
    }

    pub fn ocean_radius(&self) -> f64 {
        ocean_radius(self.ocean_scale)
    }

    /// Material parameters derived from `settings` alone, including the ocean level.
    pub fn paint(&self, settings: &PlanetSettings) -> MaterialParams {
        MaterialParams::new(settings, ocean_scale(settings.sea_level))
    }

    /// Push new material parameters without touching geometry.
    pub fn repaint(&self, settings: &PlanetSettings, sink: &mut dyn PlanetSink) -> MaterialParams {
        let params = self.paint(settings);
        sink.apply_material(&params);
        debug!(ocean_level = params.ocean_level, "material updated");
        params
    }

    /// Hand every patch to the sink, then the collision surface, then the ocean scale.
    pub fn publish(&self, sink: &mut dyn PlanetSink) -> Result<(), PlanetError> {
        let finest = self.finest_surface().ok_or(PlanetError::NotGenerated)?;
        for surface in &self.levels {
            for (face, patch) in surface.patches() {
                sink.upload_patch(
                    PatchKey {
                        lod: surface.lod(),
                        face,
                    },
                    patch,
                );
            }
        }
        sink.rebuild_collision(finest);
        sink.set_ocean_scale(self.ocean_scale);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use crate::surface::SurfaceQuery;
    use glam::Vec3;
    use orbis_config::SettingsError;
    use orbis_mesh::Ray;

    fn config(base_resolution: u32, lod_levels: u32) -> GenerationConfig {
        GenerationConfig {
            base_resolution,
            lod_levels,
            parallel: false,
            ..GenerationConfig::default()
        }
    }

    fn flat_settings() -> PlanetSettings {
        PlanetSettings {
            iterations: 0,
            ..Default::default()
        }
    }

    fn position_bits(assembler: &PlanetAssembler) -> Vec<u32> {
        assembler
            .patch_keys()
            .into_iter()
            .flat_map(|key| {
                assembler
                    .patch(key)
                    .map(|p| p.positions().to_vec())
                    .unwrap_or_default()
            })
            .flat_map(|v| v.to_array().map(f32::to_bits))
            .collect()
    }

    #[test]
    fn test_patch_keys_in_build_order() {
        let assembler = PlanetAssembler::new(&config(8, 2)).unwrap();
        let keys = assembler.patch_keys();
        assert_eq!(keys.len(), 12);
        assert_eq!(keys[0], PatchKey { lod: 0, face: CubeFace::Up });
        assert_eq!(keys[2], PatchKey { lod: 0, face: CubeFace::Left });
        assert_eq!(keys[6], PatchKey { lod: 1, face: CubeFace::Up });
        assert_eq!(keys[11], PatchKey { lod: 1, face: CubeFace::Back });
    }

    #[test]
    fn test_resolution_per_lod() {
        let mut assembler = PlanetAssembler::new(&config(12, 3)).unwrap();
        assembler.regenerate_all(&flat_settings()).unwrap();
        for (lod, expected) in [(0, 12), (1, 6), (2, 4)] {
            for face in CubeFace::ALL {
                let patch = assembler.patch(PatchKey { lod, face }).unwrap();
                assert_eq!(patch.resolution(), expected, "lod {lod} face {face:?}");
            }
        }
    }

    #[test]
    fn test_tiny_base_resolution_clamps_to_two() {
        let mut assembler = PlanetAssembler::new(&config(3, 3)).unwrap();
        assembler.regenerate_all(&flat_settings()).unwrap();
        let coarse = assembler.patch(PatchKey { lod: 2, face: CubeFace::Down }).unwrap();
        assert_eq!(coarse.resolution(), 2);
    }

    #[test]
    fn test_report_counts() {
        let mut assembler = PlanetAssembler::new(&config(5, 2)).unwrap();
        let report = assembler.regenerate_all(&flat_settings()).unwrap();
        assert_eq!(report.patch_count, 12);
        assert_eq!(report.vertex_count, 6 * 25 + 6 * 4);
        assert_eq!(report.triangle_count, 6 * 32 + 6 * 2);
        assert_eq!(report.ocean_scale, OCEAN_BASE_SCALE);
    }

    #[test]
    fn test_regenerate_is_idempotent() {
        let settings = PlanetSettings::default();
        let mut assembler = PlanetAssembler::new(&config(9, 2)).unwrap();
        assembler.regenerate_all(&settings).unwrap();
        let first = position_bits(&assembler);
        assembler.regenerate_all(&settings).unwrap();
        assert_eq!(first, position_bits(&assembler));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let settings = PlanetSettings::default();
        let mut sequential = PlanetAssembler::new(&config(10, 3)).unwrap();
        sequential.regenerate_all(&settings).unwrap();

        let mut parallel = PlanetAssembler::new(&config(10, 3)).unwrap();
        parallel.set_parallel(true);
        parallel.regenerate_all(&settings).unwrap();

        assert_eq!(position_bits(&sequential), position_bits(&parallel));
    }

    #[test]
    fn test_cancel_keeps_previous_patches() {
        let token = CancelToken::new();
        let mut assembler = PlanetAssembler::new(&config(6, 1))
            .unwrap()
            .with_cancel_token(token.clone());
        assembler.regenerate_all(&flat_settings()).unwrap();
        let before = position_bits(&assembler);

        token.cancel();
        let result = assembler.regenerate_all(&PlanetSettings::default());
        assert_eq!(result, Err(PlanetError::Cancelled));
        assert_eq!(before, position_bits(&assembler));

        token.reset();
        assert!(assembler.regenerate_all(&PlanetSettings::default()).is_ok());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut assembler = PlanetAssembler::new(&config(4, 1)).unwrap();
        let settings = PlanetSettings {
            radius: 0.0,
            ..Default::default()
        };
        assert_eq!(
            assembler.regenerate_all(&settings),
            Err(PlanetError::Settings(SettingsError::InvalidRadius {
                got: 0.0,
                max: orbis_config::MAX_RADIUS,
            }))
        );
        assert!(!assembler.is_generated());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert_eq!(
            PlanetAssembler::new(&config(8, 0)).err(),
            Some(PlanetError::InvalidLodLevels(0))
        );
        assert_eq!(
            PlanetAssembler::new(&config(1, 1)).err(),
            Some(PlanetError::Mesh(MeshError::InvalidResolution(1)))
        );
    }

    #[test]
    fn test_ocean_follows_sea_level() {
        let mut assembler = PlanetAssembler::new(&config(4, 1)).unwrap();
        let settings = PlanetSettings {
            sea_level: 3.0,
            ..flat_settings()
        };
        assembler.regenerate_all(&settings).unwrap();
        assert!((assembler.ocean_scale() - (2.035 + 2e-7)).abs() < 1e-12);
        let params = assembler.paint(&settings);
        assert!((f64::from(params.ocean_level) - assembler.ocean_radius()).abs() < 1e-6);
    }

    #[test]
    fn test_paint_reads_sea_level_from_settings() {
        let assembler = PlanetAssembler::new(&config(4, 1)).unwrap();
        let settings = PlanetSettings {
            sea_level: 1_000_001.0,
            ..flat_settings()
        };
        let params = assembler.paint(&settings);
        assert_eq!(assembler.ocean_scale(), OCEAN_BASE_SCALE);
        assert!((params.ocean_level - 1.0675).abs() < 1e-6);
    }

    #[test]
    fn test_publish_before_generation_fails() {
        let assembler = PlanetAssembler::new(&config(4, 1)).unwrap();
        let mut sink = RecordingSink::new();
        assert_eq!(assembler.publish(&mut sink), Err(PlanetError::NotGenerated));
        assert!(sink.patches.is_empty());
    }

    #[test]
    fn test_publish_reaches_sink() {
        let mut assembler = PlanetAssembler::new(&config(5, 3)).unwrap();
        assembler.regenerate_all(&flat_settings()).unwrap();
        let mut sink = RecordingSink::new();
        assembler.publish(&mut sink).unwrap();

        assert_eq!(sink.patches.len(), 18);
        assert_eq!(sink.collision_rebuilds, 1);
        assert_eq!(sink.collision_triangles, Some(6 * 32));
        assert_eq!(sink.ocean_scale, Some(OCEAN_BASE_SCALE));
        assert!(sink.material.is_none());

        assembler.publish(&mut sink).unwrap();
        assert_eq!(sink.patches.len(), 18);
        assert!(sink.patches.values().all(|p| p.generation == 1));
    }

    #[test]
    fn test_repaint_only_touches_material() {
        let mut assembler = PlanetAssembler::new(&config(4, 1)).unwrap();
        assembler.regenerate_all(&flat_settings()).unwrap();
        let mut sink = RecordingSink::new();
        let settings = PlanetSettings {
            beach_size: 0.1,
            ..flat_settings()
        };
        let params = assembler.repaint(&settings, &mut sink);
        assert_eq!(sink.material, Some(params));
        assert_eq!(params.beach_size, 0.1);
        assert!(sink.patches.is_empty());
        assert_eq!(sink.collision_rebuilds, 0);
    }

    #[test]
    fn test_finest_surface_raycast() {
        let mut assembler = PlanetAssembler::new(&config(9, 2)).unwrap();
        assembler.regenerate_all(&flat_settings()).unwrap();
        let surface = assembler.finest_surface().unwrap();
        assert_eq!(surface.lod(), 0);

        for dir in [Vec3::X, Vec3::NEG_Y, Vec3::Z, Vec3::new(1.0, 1.0, 1.0).normalize()] {
            let ray = Ray::new(dir * 50.0, -dir);
            let hit = surface.raycast(&ray, 100.0).unwrap();
            let r = hit.point.length();
            assert!(r <= 1.0 + 1e-4 && r > 0.9, "hit radius {r} along {dir:?}");
            assert!(hit.normal.dot(dir) > 0.0, "nearest hit should be the outer side");
        }

        let miss = Ray::new(Vec3::new(5.0, 5.0, 50.0), Vec3::NEG_Z);
        assert!(surface.raycast(&miss, 100.0).is_none());
    }

    #[test]
    fn test_axis_ray_through_face_center_hits() {
        // odd resolutions put each face center on a tile corner
        let settings = PlanetSettings {
            radius: 2.0,
            ..flat_settings()
        };
        for base_resolution in [33, 65] {
            let mut assembler = PlanetAssembler::new(&config(base_resolution, 1)).unwrap();
            assembler.regenerate_all(&settings).unwrap();
            let surface = assembler.finest_surface().unwrap();
            for dir in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z] {
                let hit = surface
                    .raycast(&Ray::new(dir * 50.0, -dir), 100.0)
                    .unwrap_or_else(|| panic!("missed along {dir:?} at {base_resolution}"));
                assert!((hit.point.length() - 2.0).abs() < 1e-4);
            }
        }
    }
}
