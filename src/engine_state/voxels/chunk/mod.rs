//! # Chunk Module
//!
//! This module provides the `Chunk` struct and related functionality for managing
//! 16x16x16 blocks of voxel data. It includes heightfield terrain generation,
//! visibility packing for the GPU, and frustum testing.
//!
//! ## Storage
//!
//! Blocks live in a flat array indexed `z * 256 + y * 16 + x`. Next to it an
//! opacity bit vector (1 bit per block, same indexing) answers the neighbour
//! queries made while packing without going through the material catalog.
//!
//! ## Lifecycle
//!
//! A chunk is generated once from a heightfield and never edited afterwards.
//! Its grid position, and with it its bounding box, is fixed for its lifetime.

use bitvec::prelude::BitVec;
use cgmath::Point3;

use super::block::material_type::MaterialType;
use super::block::Block;
use super::noise::HeightSource;
use crate::engine_state::camera_state::frustum::{BoundingVolume, Frustum, Intersection};

use bounding_box::BoundingBox;
use chunk_creation::ChunkBuilder;
use chunk_iteration::ChunkBlockIterator;

pub mod bounding_box;
mod chunk_creation;
pub mod chunk_iteration;
pub mod chunk_packing;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: usize = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: usize = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_VOLUME: usize = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// Flat storage index of a chunk-local block position.
#[inline]
pub fn block_index(x: usize, y: usize, z: usize) -> usize {
    z * CHUNK_PLANE_SIZE + y * CHUNK_DIMENSION + x
}

/// Represents a 16x16x16 collection of voxel blocks in the world.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    position: Point3<usize>,

    /// Every block of the chunk, indexed by [`block_index`].
    blocks: Vec<Block>,

    /// One bit per block, set where the block is opaque.
    opaque_array: BitVec,

    bounding_box: BoundingBox,

    active: bool,
}

impl Chunk {
    /// Generates the chunk at grid position `(cx, cy, cz)` from a heightfield.
    ///
    /// For every `(x, z)` column the height is sampled at the column's world
    /// position, floored and clamped into the chunk. The surface block is
    /// grass, everything below it dirt and everything above it air.
    ///
    /// Generation only reads `heights`, so it is a pure function of the
    /// heightfield and the grid position.
    pub fn new<H: HeightSource + ?Sized>(heights: &H, cx: usize, cy: usize, cz: usize) -> Self {
        let position = Point3::new(cx, cy, cz);
        let mut builder = ChunkBuilder::new(position);

        for z in 0..CHUNK_DIMENSION {
            for x in 0..CHUNK_DIMENSION {
                let sample = heights.height_at(cx * CHUNK_DIMENSION + x, cz * CHUNK_DIMENSION + z);
                let height = sample.floor().clamp(0.0, (CHUNK_DIMENSION - 1) as f32) as usize;

                for y in 0..height {
                    builder.set_block(x, y, z, MaterialType::Dirt);
                }
                builder.set_block(x, height, z, MaterialType::Grass);
            }
        }

        builder.build()
    }

    /// The position of this chunk in chunk coordinates.
    pub fn position(&self) -> Point3<usize> {
        self.position
    }

    /// World block coordinates of the chunk's local `(0, 0, 0)` block.
    pub fn origin(&self) -> Point3<usize> {
        Point3::new(
            self.position.x * CHUNK_DIMENSION,
            self.position.y * CHUNK_DIMENSION,
            self.position.z * CHUNK_DIMENSION,
        )
    }

    /// The axis-aligned box enclosing the chunk in world space.
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// Whether the renderer should consider this chunk at all.
    ///
    /// A freshly generated chunk is active when it holds any non-air block.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Overrides the active flag.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Gets the block at the specified chunk-relative coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn get_block(&self, x: usize, y: usize, z: usize) -> Block {
        assert!(
            x < CHUNK_DIMENSION && y < CHUNK_DIMENSION && z < CHUNK_DIMENSION,
            "block ({x}, {y}, {z}) outside chunk"
        );
        self.blocks[block_index(x, y, z)]
    }

    /// Checks if the block at the specified chunk-relative coordinates is opaque.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn is_block_opaque(&self, x: usize, y: usize, z: usize) -> bool {
        assert!(
            x < CHUNK_DIMENSION && y < CHUNK_DIMENSION && z < CHUNK_DIMENSION,
            "block ({x}, {y}, {z}) outside chunk"
        );
        self.opaque_array[block_index(x, y, z)]
    }

    /// Iterates over every block with its chunk-local position, in storage order.
    pub fn iter_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// The raw block array, indexed by [`block_index`].
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of non-air blocks.
    pub fn solid_block_count(&self) -> usize {
        self.blocks.iter().filter(|block| !block.is_air()).count()
    }

    /// The `y` of the topmost non-air block in every column.
    ///
    /// Columns are indexed `z * CHUNK_DIMENSION + x`. An all-air column
    /// reports 0, the same as a column whose only block sits at the bottom.
    pub fn generate_height_map(&self) -> Vec<usize> {
        let mut height_map = Vec::with_capacity(CHUNK_PLANE_SIZE);
        for z in 0..CHUNK_DIMENSION {
            for x in 0..CHUNK_DIMENSION {
                let top = (0..CHUNK_DIMENSION)
                    .rev()
                    .find(|&y| !self.blocks[block_index(x, y, z)].is_air())
                    .unwrap_or(0);
                height_map.push(top);
            }
        }
        height_map
    }
}

impl BoundingVolume for Chunk {
    fn classify(&self, frustum: &Frustum) -> Intersection {
        self.bounding_box.classify(frustum)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use cgmath::Vector3;

    use crate::engine_state::camera_state::frustum::Plane;

    /// A heightfield returning the same height everywhere except where overridden.
    pub(crate) struct FixedHeights {
        pub default: f32,
        pub overrides: Vec<((usize, usize), f32)>,
        pub extents: (usize, usize),
    }

    impl HeightSource for FixedHeights {
        fn height_at(&self, x: usize, z: usize) -> f32 {
            self.overrides
                .iter()
                .find(|(column, _)| *column == (x, z))
                .map_or(self.default, |(_, height)| *height)
        }

        fn extents(&self) -> (usize, usize) {
            self.extents
        }
    }

    fn flat(height: f32) -> FixedHeights {
        FixedHeights {
            default: height,
            overrides: Vec::new(),
            extents: (64, 64),
        }
    }

    #[test]
    fn test_column_is_grass_over_dirt_under_air() {
        let heights = FixedHeights {
            overrides: vec![((0, 0), 5.7)],
            ..flat(2.0)
        };
        let chunk = Chunk::new(&heights, 0, 0, 0);

        assert_eq!(chunk.get_block(0, 5, 0).material(), MaterialType::Grass);
        for y in 0..5 {
            assert_eq!(chunk.get_block(0, y, 0).material(), MaterialType::Dirt);
        }
        for y in 6..CHUNK_DIMENSION {
            assert!(chunk.get_block(0, y, 0).is_air());
        }
        assert_eq!(chunk.get_block(1, 2, 0).material(), MaterialType::Grass);
    }

    #[test]
    fn test_heights_are_clamped_into_the_chunk() {
        let heights = FixedHeights {
            overrides: vec![((3, 4), -7.0), ((5, 6), 99.0)],
            ..flat(1.0)
        };
        let chunk = Chunk::new(&heights, 0, 0, 0);

        assert_eq!(chunk.get_block(3, 0, 4).material(), MaterialType::Grass);
        assert_eq!(chunk.get_block(5, 15, 6).material(), MaterialType::Grass);
        assert_eq!(chunk.get_block(5, 14, 6).material(), MaterialType::Dirt);
    }

    #[test]
    fn test_columns_sample_world_coordinates() {
        let heights = FixedHeights {
            overrides: vec![((16 + 2, 32 + 3), 9.0)],
            ..flat(0.0)
        };
        let chunk = Chunk::new(&heights, 1, 0, 2);

        assert_eq!(chunk.get_block(2, 9, 3).material(), MaterialType::Grass);
        assert_eq!(chunk.origin(), Point3::new(16, 0, 32));
    }

    #[test]
    fn test_bounding_box_matches_grid_position() {
        let chunk = Chunk::new(&flat(3.0), 2, 0, 1);
        let bounding_box = chunk.bounding_box();

        assert_eq!(bounding_box.center, Point3::new(40.0, 8.0, 24.0));
        assert_eq!(bounding_box.half_extent, Vector3::new(8.0, 8.0, 8.0));
    }

    #[test]
    fn test_opacity_tracks_blocks() {
        let chunk = Chunk::new(&flat(4.0), 0, 0, 0);

        assert!(chunk.is_block_opaque(7, 4, 7));
        assert!(chunk.is_block_opaque(7, 0, 7));
        assert!(!chunk.is_block_opaque(7, 5, 7));
        assert!(chunk.is_active());
        assert_eq!(chunk.solid_block_count(), 5 * CHUNK_PLANE_SIZE);
    }

    #[test]
    fn test_height_map_reports_topmost_block() {
        let heights = FixedHeights {
            overrides: vec![((4, 1), 11.0), ((0, 15), 0.0)],
            ..flat(6.0)
        };
        let chunk = Chunk::new(&heights, 0, 0, 0);
        let height_map = chunk.generate_height_map();

        assert_eq!(height_map.len(), CHUNK_PLANE_SIZE);
        assert_eq!(height_map[CHUNK_DIMENSION + 4], 11);
        assert_eq!(height_map[15 * CHUNK_DIMENSION], 0);
        assert_eq!(height_map[0], 6);
    }

    #[test]
    fn test_visibility_follows_bounding_box() {
        let chunk = Chunk::new(&flat(3.0), 0, 0, 0);
        // Half-space x <= 4 keeps part of the chunk.
        let straddling = Frustum::from_planes([Plane::new(Vector3::new(-1.0, 0.0, 0.0), 4.0); 6]);
        // Half-space x >= 20 keeps none of it.
        let beyond = Frustum::from_planes([Plane::new(Vector3::new(1.0, 0.0, 0.0), -20.0); 6]);

        assert_eq!(chunk.classify(&straddling), Intersection::Intersecting);
        assert!(chunk.is_visible(&straddling));
        assert!(!chunk.is_visible(&beyond));
    }

    #[test]
    #[should_panic(expected = "outside chunk")]
    fn test_out_of_range_block_panics() {
        let chunk = Chunk::new(&flat(3.0), 0, 0, 0);
        chunk.get_block(0, 16, 0);
    }
}
