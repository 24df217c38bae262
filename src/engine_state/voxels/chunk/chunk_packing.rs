//! # Chunk Packing Module
//!
//! Converts a chunk into the 32-bit words the renderer uploads as a texture.
//!
//! ## Word Layout
//!
//! ```text
//!  31        22 21        16 15              0
//! +------------+------------+-----------------+
//! |   unused   | face mask  |  packed block   |
//! +------------+------------+-----------------+
//! ```
//!
//! The face mask has one bit per [`BlockSide`], set when the neighbour on that
//! side is outside the chunk or not opaque. Air blocks carry no face bits.
//!
//! ## Swizzle
//!
//! Words are not stored in block order. Four consecutive `y` layers are
//! interleaved side by side so the chunk reads as a 64x64 2D texture:
//!
//! ```text
//! x_offset = x * 4 + y % 4
//! z_offset = z * 4 + y / 4
//! index    = z_offset * 64 + x_offset
//! ```
//!
//! The renderer's sampling code depends on this exact layout.

use crate::engine_state::voxels::block::block_side::BlockSide;

use super::{Chunk, CHUNK_DIMENSION, CHUNK_VOLUME};

/// Number of `y` layers interleaved into one texture row group.
pub const LAYER_INTERLEAVE: usize = 4;
/// Width of the packed 2D texture of one chunk, in words.
pub const PACKED_ROW_STRIDE: usize = CHUNK_DIMENSION * LAYER_INTERLEAVE;
/// Bit offset of the face mask inside a packed word.
pub const FACE_MASK_SHIFT: u32 = 16;

/// Destination index of block `(x, y, z)` in a packed chunk map.
#[inline]
pub fn swizzle_index(x: usize, y: usize, z: usize) -> usize {
    let x_offset = x * LAYER_INTERLEAVE + y % LAYER_INTERLEAVE;
    let z_offset = z * LAYER_INTERLEAVE + y / LAYER_INTERLEAVE;
    z_offset * PACKED_ROW_STRIDE + x_offset
}

impl Chunk {
    /// Writes the packed words of every block into `chunk_map`.
    ///
    /// # Panics
    /// Panics unless `chunk_map` holds exactly `CHUNK_VOLUME` words.
    pub fn fill_chunk_map(&self, chunk_map: &mut [u32]) {
        assert_eq!(
            chunk_map.len(),
            CHUNK_VOLUME,
            "chunk map must hold exactly one word per block"
        );

        for (position, block) in self.iter_blocks() {
            let mut word = u32::from(block.pack());
            if !block.is_air() {
                word |= self.face_mask(position.x, position.y, position.z) << FACE_MASK_SHIFT;
            }
            chunk_map[swizzle_index(position.x, position.y, position.z)] = word;
        }
    }

    /// Allocates and fills a packed chunk map.
    pub fn packed_chunk_map(&self) -> Vec<u32> {
        let mut chunk_map = vec![0; CHUNK_VOLUME];
        self.fill_chunk_map(&mut chunk_map);
        chunk_map
    }

    /// The 6-bit mask of faces of block `(x, y, z)` that may be seen.
    ///
    /// Neighbours in other chunks are not looked up; a face on the chunk
    /// boundary always counts as exposed.
    pub fn face_mask(&self, x: usize, y: usize, z: usize) -> u32 {
        BlockSide::all()
            .into_iter()
            .filter(|side| self.is_face_exposed(x, y, z, *side))
            .fold(0, |mask, side| mask | side.mask_bit())
    }

    fn is_face_exposed(&self, x: usize, y: usize, z: usize, side: BlockSide) -> bool {
        let [dx, dy, dz] = side.neighbor_offset();
        let neighbor = (
            x.checked_add_signed(dx as isize),
            y.checked_add_signed(dy as isize),
            z.checked_add_signed(dz as isize),
        );

        match neighbor {
            (Some(nx), Some(ny), Some(nz))
                if nx < CHUNK_DIMENSION && ny < CHUNK_DIMENSION && nz < CHUNK_DIMENSION =>
            {
                !self.is_block_opaque(nx, ny, nz)
            }
            _ => true,
        }
    }
}
