//! Mesh construction errors.

use crate::patch::{MAX_RESOLUTION, MIN_RESOLUTION};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    /// Resolution outside `MIN_RESOLUTION..=MAX_RESOLUTION`.
    #[error("resolution must be in {min}..={max}, got {0}", min = MIN_RESOLUTION, max = MAX_RESOLUTION)]
    InvalidResolution(u32),

    /// Vertex buffer length does not match `resolution²`.
    #[error("expected {expected} vertices, got {got}")]
    VertexCountMismatch { expected: usize, got: usize },

    /// Index buffer length does not match `6 * (resolution - 1)²`.
    #[error("expected {expected} indices, got {got}")]
    IndexCountMismatch { expected: usize, got: usize },

    /// A triangle references a vertex that does not exist.
    #[error("index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },
}
