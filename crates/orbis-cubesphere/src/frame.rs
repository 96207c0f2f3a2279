//! Per-face coordinate frames.

use glam::DVec3;

/// Two in-plane axes spanning a cube face, derived from its normal.
///
/// `axis_y` is the face normal. `axis_x` is the normal with its components
/// rotated `(y, z, x)`, and `axis_z = axis_y × axis_x`. The frame is always
/// rederived from the normal and never stored alongside mesh data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalFrame {
    pub axis_x: DVec3,
    pub axis_y: DVec3,
    pub axis_z: DVec3,
}

impl LocalFrame {
    /// Build the frame for an axis-aligned unit normal.
    ///
    /// The component rotation only yields a perpendicular `axis_x` for
    /// axis-aligned normals, which is all a cubesphere needs.
    #[must_use]
    pub fn from_axis(axis_y: DVec3) -> Self {
        debug_assert!(
            (axis_y.length() - 1.0).abs() < 1e-9,
            "face axis must be unit length, got {axis_y:?}"
        );
        let axis_x = DVec3::new(axis_y.y, axis_y.z, axis_y.x);
        let axis_z = axis_y.cross(axis_x);
        Self {
            axis_x,
            axis_y,
            axis_z,
        }
    }
}
