//! Cube-sphere geometry: the six cube faces, their local frames, and the cube-to-sphere projection.

mod cube_face;
mod frame;
mod projection;

pub use cube_face::CubeFace;
pub use frame::LocalFrame;
pub use projection::{cube_point, project_to_sphere, sphere_point};
