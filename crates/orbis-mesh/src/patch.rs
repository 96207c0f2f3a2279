//! One cube face's grid mesh: positions, recomputed normals, triangle indices and a tiled ray index.

use glam::Vec3;

use crate::error::MeshError;
use crate::ray::{Aabb, Ray, RayHit, ray_triangle_intersect};

/// Smallest resolution that still yields one quad.
pub const MIN_RESOLUTION: u32 = 2;

/// Largest resolution whose vertex indices fit comfortably in `u32`.
pub const MAX_RESOLUTION: u32 = 4096;

/// Cells per tile edge in the ray index.
const TILE_CELLS: u32 = 16;

/// A block of grid cells with its bounding box, used to skip triangles during ray queries.
#[derive(Clone, Debug, PartialEq)]
struct Tile {
    bounds: Aabb,
    cells_x: (u32, u32),
    cells_y: (u32, u32),
}

/// A regular `resolution × resolution` vertex grid triangulated into
/// `2 * (resolution - 1)²` triangles.
///
/// Vertex `(x, y)` lives at index `x + y * resolution`. Each cell is split
/// into `{i, i+R+1, i+R}` and `{i, i+1, i+R+1}`, which faces outward for the
/// cube-face frames this crate is built with.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshPatch {
    resolution: u32,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    bounds: Aabb,
    tiles: Vec<Tile>,
}

impl MeshPatch {
    /// Triangulate a row-major vertex grid and derive normals and bounds.
    pub fn from_grid(resolution: u32, positions: Vec<Vec3>) -> Result<Self, MeshError> {
        check_resolution(resolution)?;
        let expected = (resolution * resolution) as usize;
        if positions.len() != expected {
            return Err(MeshError::VertexCountMismatch {
                expected,
                got: positions.len(),
            });
        }

        let indices = grid_indices(resolution);
        let normals = recalculate_normals(&positions, &indices);
        let bounds = Aabb::from_points(positions.iter().copied());
        let tiles = build_tiles(resolution, &positions);

        Ok(Self {
            resolution,
            positions,
            normals,
            indices,
            bounds,
            tiles,
        })
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex positions as bytes for GPU upload.
    pub fn positions_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Vertex normals as bytes for GPU upload.
    pub fn normals_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Triangle indices as bytes for GPU upload.
    pub fn indices_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// The three corners of triangle `t`.
    pub fn triangle(&self, t: usize) -> [Vec3; 3] {
        let i = &self.indices[t * 3..t * 3 + 3];
        [
            self.positions[i[0] as usize],
            self.positions[i[1] as usize],
            self.positions[i[2] as usize],
        ]
    }

    /// Check the size and index invariants.
    pub fn validate(&self) -> Result<(), MeshError> {
        check_resolution(self.resolution)?;
        let r = self.resolution as usize;
        if self.positions.len() != r * r {
            return Err(MeshError::VertexCountMismatch {
                expected: r * r,
                got: self.positions.len(),
            });
        }
        let expected = 6 * (r - 1) * (r - 1);
        if self.indices.len() != expected {
            return Err(MeshError::IndexCountMismatch {
                expected,
                got: self.indices.len(),
            });
        }
        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.positions.len())
        {
            return Err(MeshError::IndexOutOfBounds {
                index,
                vertex_count: self.positions.len(),
            });
        }
        Ok(())
    }

    /// Nearest triangle hit within `max_distance`.
    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        self.bounds.ray_entry(ray, max_distance)?;

        let r = self.resolution;
        let mut best: Option<(f32, u32)> = None;
        for tile in &self.tiles {
            let Some(entry) = tile.bounds.ray_entry(ray, max_distance) else {
                continue;
            };
            if best.is_some_and(|(t, _)| entry > t) {
                continue;
            }
            for y in tile.cells_y.0..tile.cells_y.1 {
                for x in tile.cells_x.0..tile.cells_x.1 {
                    let first = (x + y * (r - 1)) * 2;
                    for tri in [first, first + 1] {
                        let [a, b, c] = self.triangle(tri as usize);
                        let Some(t) = ray_triangle_intersect(ray, a, b, c) else {
                            continue;
                        };
                        if t <= max_distance && best.is_none_or(|(bt, _)| t < bt) {
                            best = Some((t, tri));
                        }
                    }
                }
            }
        }

        best.map(|(distance, triangle)| {
            let [a, b, c] = self.triangle(triangle as usize);
            RayHit {
                distance,
                point: ray.point_at(distance),
                normal: (b - a).cross(c - a).normalize_or_zero(),
                triangle,
            }
        })
    }
}

fn check_resolution(resolution: u32) -> Result<(), MeshError> {
    if (MIN_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
        Ok(())
    } else {
        Err(MeshError::InvalidResolution(resolution))
    }
}

/// Two triangles per cell, cells in row-major order.
fn grid_indices(resolution: u32) -> Vec<u32> {
    let r = resolution;
    let cells = (r - 1) as usize;
    let mut indices = Vec::with_capacity(cells * cells * 6);
    for y in 0..r - 1 {
        for x in 0..r - 1 {
            let i = x + y * r;
            indices.extend_from_slice(&[i, i + r + 1, i + r]);
            indices.extend_from_slice(&[i, i + 1, i + r + 1]);
        }
    }
    indices
}

/// Area-weighted vertex normals from the final geometry.
fn recalculate_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face = (positions[ib] - positions[ia]).cross(positions[ic] - positions[ia]);
        normals[ia] += face;
        normals[ib] += face;
        normals[ic] += face;
    }
    for n in &mut normals {
        *n = n.normalize_or_zero();
    }
    normals
}

fn build_tiles(resolution: u32, positions: &[Vec3]) -> Vec<Tile> {
    let cells = resolution - 1;
    let mut tiles = Vec::new();
    for ty in (0..cells).step_by(TILE_CELLS as usize) {
        for tx in (0..cells).step_by(TILE_CELLS as usize) {
            let cells_x = (tx, (tx + TILE_CELLS).min(cells));
            let cells_y = (ty, (ty + TILE_CELLS).min(cells));
            let mut bounds = Aabb::EMPTY;
            for y in cells_y.0..=cells_y.1 {
                for x in cells_x.0..=cells_x.1 {
                    bounds.grow(positions[(x + y * resolution) as usize]);
                }
            }
            tiles.push(Tile {
                bounds,
                cells_x,
                cells_y,
            });
        }
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat grid in the XZ plane at height 0 spanning [0, R-1]², facing +Y.
    fn flat_grid(resolution: u32) -> Vec<Vec3> {
        let mut positions = Vec::new();
        for y in 0..resolution {
            for x in 0..resolution {
                positions.push(Vec3::new(x as f32, 0.0, -(y as f32)));
            }
        }
        positions
    }

    #[test]
    fn test_sizes_match_resolution() {
        for r in [2u32, 3, 5, 17, 40] {
            let patch = MeshPatch::from_grid(r, flat_grid(r)).unwrap();
            assert_eq!(patch.vertex_count(), (r * r) as usize);
            assert_eq!(patch.indices().len(), (6 * (r - 1) * (r - 1)) as usize);
            assert_eq!(patch.normals().len(), patch.vertex_count());
            patch.validate().unwrap();
        }
    }

    #[test]
    fn test_resolution_below_two_rejected() {
        assert_eq!(
            MeshPatch::from_grid(1, vec![Vec3::ZERO]),
            Err(MeshError::InvalidResolution(1))
        );
        assert_eq!(
            MeshPatch::from_grid(0, Vec::new()),
            Err(MeshError::InvalidResolution(0))
        );
    }

    #[test]
    fn test_vertex_count_mismatch_rejected() {
        assert!(matches!(
            MeshPatch::from_grid(3, flat_grid(2)),
            Err(MeshError::VertexCountMismatch {
                expected: 9,
                got: 4
            })
        ));
    }

    #[test]
    fn test_first_cell_triangles() {
        let patch = MeshPatch::from_grid(3, flat_grid(3)).unwrap();
        assert_eq!(&patch.indices()[..6], &[0, 4, 3, 0, 1, 4]);
    }

    #[test]
    fn test_flat_grid_normals_face_up() {
        // x grows along +X and y along -Z, so x × z-direction gives +Y.
        let patch = MeshPatch::from_grid(4, flat_grid(4)).unwrap();
        for n in patch.normals() {
            assert!((*n - Vec3::Y).length() < 1e-6, "normal {n:?} should be +Y");
        }
    }

    #[test]
    fn test_byte_views_match_lengths() {
        let patch = MeshPatch::from_grid(3, flat_grid(3)).unwrap();
        assert_eq!(patch.positions_bytes().len(), 9 * 12);
        assert_eq!(patch.normals_bytes().len(), 9 * 12);
        assert_eq!(patch.indices_bytes().len(), 24 * 4);
    }

    #[test]
    fn test_raycast_finds_nearest_triangle() {
        let r = 40;
        let patch = MeshPatch::from_grid(r, flat_grid(r)).unwrap();
        let ray = Ray::new(Vec3::new(20.3, 10.0, -30.6), Vec3::NEG_Y);
        let hit = patch.raycast(&ray, 100.0).unwrap();
        assert!((hit.distance - 10.0).abs() < 1e-4);
        assert!((hit.point - Vec3::new(20.3, 0.0, -30.6)).length() < 1e-4);
        assert!((hit.normal - Vec3::Y).length() < 1e-6);

        let [a, b, c] = patch.triangle(hit.triangle as usize);
        let lo = a.min(b).min(c);
        let hi = a.max(b).max(c);
        assert!(hit.point.x >= lo.x - 1e-4 && hit.point.x <= hi.x + 1e-4);
        assert!(hit.point.z >= lo.z - 1e-4 && hit.point.z <= hi.z + 1e-4);
    }

    #[test]
    fn test_raycast_outside_grid_misses() {
        let patch = MeshPatch::from_grid(10, flat_grid(10)).unwrap();
        let ray = Ray::new(Vec3::new(50.0, 10.0, 50.0), Vec3::NEG_Y);
        assert!(patch.raycast(&ray, 100.0).is_none());
    }

    #[test]
    fn test_raycast_respects_max_distance() {
        let patch = MeshPatch::from_grid(10, flat_grid(10)).unwrap();
        let ray = Ray::new(Vec3::new(3.5, 10.0, -3.5), Vec3::NEG_Y);
        assert!(patch.raycast(&ray, 5.0).is_none());
        assert!(patch.raycast(&ray, 15.0).is_some());
    }

    #[test]
    fn test_raycast_along_tile_boundary_hits() {
        let r = 33;
        let patch = MeshPatch::from_grid(r, flat_grid(r)).unwrap();
        let boundary = TILE_CELLS as f32;
        for (x, z) in [(boundary, -8.5), (5.5, -boundary), (boundary, -boundary)] {
            let ray = Ray::new(Vec3::new(x, 5.0, z), Vec3::NEG_Y);
            let hit = patch
                .raycast(&ray, 100.0)
                .unwrap_or_else(|| panic!("ray at ({x}, {z}) missed"));
            assert!((hit.distance - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_tiles_cover_every_cell() {
        let r = 37;
        let patch = MeshPatch::from_grid(r, flat_grid(r)).unwrap();
        let covered: u32 = patch
            .tiles
            .iter()
            .map(|t| (t.cells_x.1 - t.cells_x.0) * (t.cells_y.1 - t.cells_y.0))
            .sum();
        assert_eq!(covered, (r - 1) * (r - 1));
    }
}
