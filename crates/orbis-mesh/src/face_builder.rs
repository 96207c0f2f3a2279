//! Builds the displaced grid mesh for one cube face.

use orbis_config::PlanetSettings;
use orbis_cubesphere::{CubeFace, LocalFrame, sphere_point};
use orbis_terrain::{ElevationModel, ScalarField};

use crate::error::MeshError;
use crate::patch::{MAX_RESOLUTION, MIN_RESOLUTION, MeshPatch};

/// Samples the elevation model over a `resolution × resolution` grid on one face.
///
/// The builder only stores the face and resolution; the local frame is
/// derived from the face's axis on every build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceMeshBuilder {
    face: CubeFace,
    resolution: u32,
}

impl FaceMeshBuilder {
    pub fn new(face: CubeFace, resolution: u32) -> Result<Self, MeshError> {
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
            return Err(MeshError::InvalidResolution(resolution));
        }
        Ok(Self { face, resolution })
    }

    pub fn face(&self) -> CubeFace {
        self.face
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn frame(&self) -> LocalFrame {
        self.face.frame()
    }

    /// Sample every grid vertex, displace it by elevation and triangulate.
    ///
    /// Deterministic: the same inputs always produce bit-identical meshes.
    pub fn build<N: ScalarField>(
        &self,
        model: &ElevationModel<N>,
        settings: &PlanetSettings,
    ) -> Result<MeshPatch, MeshError> {
        let frame = self.frame();
        let r = self.resolution;
        let step = 1.0 / f64::from(r - 1);

        let mut positions = Vec::with_capacity((r * r) as usize);
        for y in 0..r {
            for x in 0..r {
                let on_sphere = sphere_point(&frame, f64::from(x) * step, f64::from(y) * step);
                positions.push(model.surface_point(on_sphere, settings).as_vec3());
            }
        }

        MeshPatch::from_grid(r, positions)
    }
}
