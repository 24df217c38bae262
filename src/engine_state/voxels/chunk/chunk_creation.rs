//! # Chunk Creation Module
//!
//! This module provides the builder used while a chunk is being generated.
//! It keeps the block array and the opacity bit vector in step, so the two
//! can never disagree once the chunk is built.

use bitvec::prelude::*;
use cgmath::Point3;

use crate::engine_state::voxels::block::{material_type::MaterialType, Block};

use super::{block_index, bounding_box::BoundingBox, Chunk, CHUNK_VOLUME};

/// A builder for populating a chunk before it is frozen.
///
/// Starts out all air. Blocks are written with [`ChunkBuilder::set_block`]
/// and the finished chunk is taken with [`ChunkBuilder::build`].
pub struct ChunkBuilder {
    /// The grid position of the chunk being created
    position: Point3<usize>,
    /// Block data, indexed by `block_index`
    blocks: Vec<Block>,
    /// Bit vector where each bit represents whether a block is opaque (1) or not (0)
    opaque_array: BitVec,
}

impl ChunkBuilder {
    /// Creates a new `ChunkBuilder` for the chunk at the given grid position.
    pub fn new(position: Point3<usize>) -> Self {
        ChunkBuilder {
            position,
            blocks: vec![Block::AIR; CHUNK_VOLUME],
            opaque_array: bitvec![0; CHUNK_VOLUME],
        }
    }

    /// Writes a block and updates its opacity bit.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the chunk.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, material: MaterialType) {
        let block = Block::new(material);
        let index = block_index(x, y, z);
        self.blocks[index] = block;
        self.opaque_array.set(index, block.is_opaque());
    }

    /// Finalizes the chunk.
    ///
    /// The chunk starts active if any block is not air.
    pub fn build(self) -> Chunk {
        let active = self.blocks.iter().any(|block| !block.is_air());

        Chunk {
            position: self.position,
            blocks: self.blocks,
            opaque_array: self.opaque_array,
            bounding_box: BoundingBox::for_chunk(self.position),
            active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder_yields_inactive_chunk() {
        let chunk = ChunkBuilder::new(Point3::new(0, 0, 0)).build();

        assert!(!chunk.is_active());
        assert_eq!(chunk.solid_block_count(), 0);
        assert_eq!(chunk.blocks().len(), CHUNK_VOLUME);
    }

    #[test]
    fn test_overwriting_clears_opacity() {
        let mut builder = ChunkBuilder::new(Point3::new(0, 0, 0));
        builder.set_block(1, 2, 3, MaterialType::Stone);
        builder.set_block(1, 2, 3, MaterialType::Glass);
        builder.set_block(4, 5, 6, MaterialType::Dirt);
        let chunk = builder.build();

        assert!(!chunk.is_block_opaque(1, 2, 3));
        assert_eq!(chunk.get_block(1, 2, 3).material(), MaterialType::Glass);
        assert!(chunk.is_block_opaque(4, 5, 6));
        assert!(chunk.is_active());
    }
}
