//! Planet assembly: six cube-face patches per LOD level, the collision surface, ocean scale and material parameters.

mod assembler;
mod error;
mod ocean;
mod paint;
mod sink;
mod surface;

pub use assembler::{CancelToken, GenerationReport, PatchKey, PlanetAssembler};
pub use error::PlanetError;
pub use ocean::{OCEAN_BASE_SCALE, ocean_radius, ocean_scale};
pub use paint::MaterialParams;
pub use sink::{PlanetSink, RecordingSink, UploadedPatch};
pub use surface::{PlanetSurface, SurfaceQuery};
