//! The six faces of a cubesphere.

use glam::DVec3;

use crate::LocalFrame;

/// The six faces of the cube that forms the cubesphere.
///
/// Each variant corresponds to a face whose outward normal points along the
/// named direction. The discriminants give the order faces are built in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CubeFace {
    /// +Y face
    Up = 0,
    /// −Y face
    Down = 1,
    /// −X face
    Left = 2,
    /// +X face
    Right = 3,
    /// +Z face
    Forward = 4,
    /// −Z face
    Back = 5,
}

impl CubeFace {
    /// All six faces in build order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Up,
        CubeFace::Down,
        CubeFace::Left,
        CubeFace::Right,
        CubeFace::Forward,
        CubeFace::Back,
    ];

    /// Position of this face in [`CubeFace::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Outward-pointing unit normal for this face.
    #[must_use]
    pub fn normal(self) -> DVec3 {
        match self {
            CubeFace::Up => DVec3::Y,
            CubeFace::Down => DVec3::NEG_Y,
            CubeFace::Left => DVec3::NEG_X,
            CubeFace::Right => DVec3::X,
            CubeFace::Forward => DVec3::Z,
            CubeFace::Back => DVec3::NEG_Z,
        }
    }

    /// The local frame spanning this face.
    #[must_use]
    pub fn frame(self) -> LocalFrame {
        LocalFrame::from_axis(self.normal())
    }
}
