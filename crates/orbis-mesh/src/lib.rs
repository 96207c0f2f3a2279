//! Face meshes: cube-face grid construction, triangle topology, recomputed normals and ray queries.

pub mod error;
pub mod face_builder;
pub mod patch;
pub mod ray;

pub use error::MeshError;
pub use face_builder::FaceMeshBuilder;
pub use patch::{MAX_RESOLUTION, MIN_RESOLUTION, MeshPatch};
pub use ray::{Aabb, Ray, RayHit, ray_triangle_intersect};
