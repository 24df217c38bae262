//! # Chunk Iteration Module
//!
//! This module provides an iterator for traversing every block of a chunk
//! together with its chunk-local position.

use cgmath::Point3;

use crate::engine_state::voxels::block::Block;

use super::{Chunk, CHUNK_DIMENSION, CHUNK_PLANE_SIZE, CHUNK_VOLUME};

/// An iterator over all blocks in a chunk, in storage order (x fastest, then y, then z).
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Current index into the block array
    index: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned at block `(0, 0, 0)`.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            index: 0,
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<usize>, Block);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= CHUNK_VOLUME {
            return None;
        }

        let index = self.index;
        self.index += 1;

        let position = Point3::new(
            index % CHUNK_DIMENSION,
            (index / CHUNK_DIMENSION) % CHUNK_DIMENSION,
            index / CHUNK_PLANE_SIZE,
        );
        Some((position, self.chunk_ref.blocks[index]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = CHUNK_VOLUME - self.index.min(CHUNK_VOLUME);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkBlockIterator<'_> {}
