//! # Block Side Module
//!
//! This module defines the six axis-aligned faces of a voxel, together with the
//! fixed geometry tables used to emit a quad for each face.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel.
///
/// The discriminant is the face's position in the mesh emission order:
/// [TOP, BOTTOM, FRONT, BACK, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The top face (facing positive Y)
    TOP = 0,

    /// The bottom face (facing negative Y)
    BOTTOM = 1,

    /// The front face (facing positive Z)
    FRONT = 2,

    /// The back face (facing negative Z)
    BACK = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

/// Corner offsets of each face quad, relative to the voxel's minimum corner.
/// Indexed by `BlockSide as usize`; the corners wind as a fan `0-1-2, 0-2-3`.
const FACE_CORNERS: [[[f32; 3]; 4]; 6] = [
    [[0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
    [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 0.0, 0.0]],
    [[0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
    [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
    [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]],
    [[1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
];

const FACE_UVS: [[[f32; 2]; 4]; 6] = [
    [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
    [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
    [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
    [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
    [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
    [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
];

impl BlockSide {
    /// Returns an array containing all six block faces in emission order.
    ///
    /// The order is: [TOP, BOTTOM, FRONT, BACK, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// The grid step from a voxel to the neighbour this face touches.
    pub fn neighbor_offset(self) -> Vector3<i32> {
        match self {
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> [f32; 3] {
        let offset = self.neighbor_offset();
        [offset.x as f32, offset.y as f32, offset.z as f32]
    }

    /// The four quad corners of this face for a voxel at the origin.
    pub fn corners(self) -> &'static [[f32; 3]; 4] {
        &FACE_CORNERS[self as usize]
    }

    /// The texture coordinates paired with `corners`.
    pub fn uvs(self) -> &'static [[f32; 2]; 4] {
        &FACE_UVS[self as usize]
    }
}
