//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and the neighbour
//! offset each one looks through. The discriminant of a side is also its bit
//! position inside the visibility mask of a packed block.

/// Represents the six possible faces of a voxel block.
///
/// The order is: [LEFT, RIGHT, BOTTOM, TOP, BACK, FRONT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The left face (facing negative X)
    LEFT = 0,

    /// The right face (facing positive X)
    RIGHT = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The back face (facing negative Z)
    BACK = 4,

    /// The front face (facing positive Z)
    FRONT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in bit order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::LEFT,
            BlockSide::RIGHT,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::BACK,
            BlockSide::FRONT,
        ]
    }

    /// The offset from a block to the neighbour behind this face.
    pub fn neighbor_offset(self) -> [i32; 3] {
        match self {
            BlockSide::LEFT => [-1, 0, 0],
            BlockSide::RIGHT => [1, 0, 0],
            BlockSide::BOTTOM => [0, -1, 0],
            BlockSide::TOP => [0, 1, 0],
            BlockSide::BACK => [0, 0, -1],
            BlockSide::FRONT => [0, 0, 1],
        }
    }

    /// The single bit this face occupies in a 6-bit visibility mask.
    #[inline]
    pub fn mask_bit(self) -> u32 {
        1 << self as u32
    }
}
