//! Cube-to-sphere projection by normalization.

use glam::DVec3;

use crate::LocalFrame;

/// Map face progress `(px, py)` in `[0, 1]²` to a point on the `[-1, 1]` cube.
///
/// `(0.5, 0.5)` maps to the face normal.
#[inline]
#[must_use]
pub fn cube_point(frame: &LocalFrame, px: f64, py: f64) -> DVec3 {
    frame.axis_y + (2.0 * px - 1.0) * frame.axis_x + (2.0 * py - 1.0) * frame.axis_z
}

/// Project a cube-surface point onto the unit sphere.
#[inline]
#[must_use]
pub fn project_to_sphere(cube_point: DVec3) -> DVec3 {
    cube_point.normalize()
}

/// Convenience: face progress → unit sphere point.
#[inline]
#[must_use]
pub fn sphere_point(frame: &LocalFrame, px: f64, py: f64) -> DVec3 {
    project_to_sphere(cube_point(frame, px, py))
}
