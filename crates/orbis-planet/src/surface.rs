//! The six patches of one LOD level, queried as a single surface.

use orbis_cubesphere::CubeFace;
use orbis_mesh::{Aabb, MeshPatch, Ray, RayHit};

/// Anything a ray can be cast against.
pub trait SurfaceQuery {
    /// Nearest hit within `max_distance`, if any.
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit>;
}

/// Six face patches of one LOD level in [`CubeFace::ALL`] order.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetSurface {
    lod: u32,
    patches: Vec<MeshPatch>,
    bounds: Aabb,
}

impl PlanetSurface {
    /// `patches` must hold one patch per face in build order.
    pub(crate) fn new(lod: u32, patches: Vec<MeshPatch>) -> Self {
        debug_assert_eq!(patches.len(), CubeFace::ALL.len());
        let bounds = patches.iter().fold(Aabb::EMPTY, |mut acc, p| {
            acc.grow(p.bounds().min);
            acc.grow(p.bounds().max);
            acc
        });
        Self {
            lod,
            patches,
            bounds,
        }
    }

    pub fn lod(&self) -> u32 {
        self.lod
    }

    pub fn patch(&self, face: CubeFace) -> &MeshPatch {
        &self.patches[face.index()]
    }

    pub fn patches(&self) -> impl Iterator<Item = (CubeFace, &MeshPatch)> {
        CubeFace::ALL.into_iter().zip(self.patches.iter())
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.patches.iter().map(MeshPatch::vertex_count).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.patches.iter().map(MeshPatch::triangle_count).sum()
    }
}

impl SurfaceQuery for PlanetSurface {
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        self.bounds.ray_entry(ray, max_distance)?;
        self.patches
            .iter()
            .filter_map(|patch| patch.raycast(ray, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
