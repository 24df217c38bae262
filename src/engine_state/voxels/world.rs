//! # World Module
//!
//! This module provides the `World` struct which owns the grid of chunks making
//! up the voxel world, maps world-space positions onto it, and serializes every
//! chunk into the terrain buffer consumed by the renderer.
//!
//! ## Grid Layout
//!
//! The grid is `render_distance` chunks wide along x and z and `CHUNK_LAYERS`
//! chunks tall. Chunks are stored row-major in a flat vector:
//!
//! ```text
//! index = cz * (render_distance * CHUNK_LAYERS) + cy * render_distance + cx
//! ```
//!
//! The terrain buffer concatenates the packed map of every chunk in that
//! same order, `CHUNK_VOLUME` words per chunk.
//!
//! ## Chunk Generation
//!
//! The world is generated once, eagerly, from a heightfield. Each chunk only
//! reads its own columns of the shared heightfield.

use cgmath::Point3;
use log::{debug, info};

use crate::engine_state::camera_state::frustum::{BoundingVolume, Frustum};
use crate::engine_state::voxels::block::Block;
use crate::engine_state::voxels::chunk::{Chunk, CHUNK_DIMENSION, CHUNK_VOLUME};
use crate::engine_state::voxels::noise::HeightSource;
use crate::error::{Result, VoxelError};

/// Number of vertical chunk layers. The generated world is a single layer.
pub const CHUNK_LAYERS: usize = 1;

/// Represents a voxel world composed of a fixed grid of chunks.
///
/// # Examples
///
/// ```
/// use voxel_terrain::engine_state::voxels::noise::{NoiseField, NoiseSettings};
/// use voxel_terrain::engine_state::voxels::world::World;
///
/// let noise = NoiseField::new(&NoiseSettings { seed: Some(1), ..NoiseSettings::default() })?;
/// let world = World::new(&noise, 4)?;
///
/// assert_eq!(world.chunk_count(), 16);
/// assert_eq!(world.terrain_buffer().len(), 16 * 4096);
/// # Ok::<(), voxel_terrain::error::VoxelError>(())
/// ```
pub struct World {
    /// All chunks, indexed by [`World::chunk_index`].
    chunks: Vec<Chunk>,

    /// Chunks along x and along z.
    render_distance: usize,

    /// Spawn position above the center of the world.
    origin: Point3<f32>,

    /// Packed words of every chunk, in chunk-index order.
    terrain_buffer: Vec<u32>,
}

impl World {
    /// Generates a `render_distance` x `render_distance` world from a heightfield.
    ///
    /// The spawn origin sits one block above the height sampled at the
    /// horizontal center of the world.
    ///
    /// # Errors
    /// Returns [`VoxelError::InvalidArgument`] if `render_distance` is zero or
    /// the heightfield does not cover every column of the world.
    pub fn new<H: HeightSource + ?Sized>(heights: &H, render_distance: usize) -> Result<Self> {
        if render_distance == 0 {
            return Err(VoxelError::InvalidArgument(
                "render distance must be at least one chunk".into(),
            ));
        }

        let extent = render_distance * CHUNK_DIMENSION;
        let (available_x, available_z) = heights.extents();
        if available_x < extent || available_z < extent {
            return Err(VoxelError::InvalidArgument(format!(
                "heightfield of {available_x}x{available_z} columns cannot cover a {extent}x{extent} world"
            )));
        }

        let center = extent / 2;
        let origin = Point3::new(
            center as f32,
            heights.height_at(center, center) + 1.0,
            center as f32,
        );
        debug!("World origin at {:?}", origin);

        let mut chunks = Vec::with_capacity(render_distance * render_distance * CHUNK_LAYERS);
        for cz in 0..render_distance {
            for cy in 0..CHUNK_LAYERS {
                for cx in 0..render_distance {
                    chunks.push(Chunk::new(heights, cx, cy, cz));
                }
            }
        }

        let mut world = World {
            chunks,
            render_distance,
            origin,
            terrain_buffer: Vec::new(),
        };

        let mut terrain_buffer = vec![0; world.chunk_count() * CHUNK_VOLUME];
        world.update_terrain_data(&mut terrain_buffer);
        world.terrain_buffer = terrain_buffer;

        info!(
            "Generated {}x{} chunk world ({} chunks, {} terrain words)",
            render_distance,
            render_distance,
            world.chunk_count(),
            world.terrain_buffer.len()
        );

        Ok(world)
    }

    /// Spawn position for the camera or player.
    pub fn origin(&self) -> Point3<f32> {
        self.origin
    }

    /// Chunks along x and along z.
    pub fn render_distance(&self) -> usize {
        self.render_distance
    }

    /// Total number of chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// All chunks in grid order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Flat index of the chunk at grid position `(cx, cy, cz)`.
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    pub fn chunk_index(&self, cx: usize, cy: usize, cz: usize) -> usize {
        assert!(
            cx < self.render_distance && cy < CHUNK_LAYERS && cz < self.render_distance,
            "chunk ({cx}, {cy}, {cz}) outside {}x{}x{} world grid",
            self.render_distance,
            CHUNK_LAYERS,
            self.render_distance
        );
        cz * self.render_distance * CHUNK_LAYERS + cy * self.render_distance + cx
    }

    /// The chunk at grid position `(cx, cy, cz)`.
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    pub fn get_chunk(&self, cx: usize, cy: usize, cz: usize) -> &Chunk {
        &self.chunks[self.chunk_index(cx, cy, cz)]
    }

    /// Mutable access to the chunk at grid position `(cx, cy, cz)`.
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    pub fn get_chunk_mut(&mut self, cx: usize, cy: usize, cz: usize) -> &mut Chunk {
        let index = self.chunk_index(cx, cy, cz);
        &mut self.chunks[index]
    }

    /// Chunk coordinates containing a world position.
    ///
    /// The position is first snapped to its containing voxel, so fractional
    /// coordinates never round up into the next block.
    pub fn world_to_chunk(position: Point3<f32>) -> Point3<i32> {
        let voxel = Self::containing_voxel(position);
        let size = CHUNK_DIMENSION as i32;
        Point3::new(
            voxel.x.div_euclid(size),
            voxel.y.div_euclid(size),
            voxel.z.div_euclid(size),
        )
    }

    /// Chunk-local block coordinates of a world position, each in `0..CHUNK_DIMENSION`.
    pub fn world_to_local(position: Point3<f32>) -> Point3<usize> {
        let voxel = Self::containing_voxel(position);
        let size = CHUNK_DIMENSION as i32;
        Point3::new(
            voxel.x.rem_euclid(size) as usize,
            voxel.y.rem_euclid(size) as usize,
            voxel.z.rem_euclid(size) as usize,
        )
    }

    fn containing_voxel(position: Point3<f32>) -> Point3<i32> {
        Point3::new(
            position.x.floor() as i32,
            position.y.floor() as i32,
            position.z.floor() as i32,
        )
    }

    /// The block containing a world position.
    ///
    /// # Panics
    /// Panics if the position falls outside the chunk grid.
    pub fn get_block(&self, position: Point3<f32>) -> Block {
        let chunk = Self::world_to_chunk(position);
        let in_grid = |c: i32, limit: usize| usize::try_from(c).ok().filter(|&c| c < limit);

        let (cx, cy, cz) = match (
            in_grid(chunk.x, self.render_distance),
            in_grid(chunk.y, CHUNK_LAYERS),
            in_grid(chunk.z, self.render_distance),
        ) {
            (Some(cx), Some(cy), Some(cz)) => (cx, cy, cz),
            _ => panic!("position {position:?} maps to chunk {chunk:?} outside the world grid"),
        };

        let local = Self::world_to_local(position);
        self.get_chunk(cx, cy, cz).get_block(local.x, local.y, local.z)
    }

    /// Re-packs every chunk into `buffer` in grid order.
    ///
    /// Chunk `i` occupies words `i * CHUNK_VOLUME..(i + 1) * CHUNK_VOLUME`.
    ///
    /// # Panics
    /// Panics unless `buffer` holds exactly `chunk_count() * CHUNK_VOLUME` words.
    pub fn update_terrain_data(&self, buffer: &mut [u32]) {
        assert_eq!(
            buffer.len(),
            self.chunks.len() * CHUNK_VOLUME,
            "terrain buffer must hold one packed map per chunk"
        );

        for (chunk, chunk_map) in self.chunks.iter().zip(buffer.chunks_exact_mut(CHUNK_VOLUME)) {
            chunk.fill_chunk_map(chunk_map);
        }
    }

    /// Re-packs the world's own terrain buffer.
    pub fn refresh_terrain_buffer(&mut self) {
        let mut terrain_buffer = std::mem::take(&mut self.terrain_buffer);
        self.update_terrain_data(&mut terrain_buffer);
        self.terrain_buffer = terrain_buffer;
        debug!("Refreshed terrain buffer ({} words)", self.terrain_buffer.len());
    }

    /// The serialized terrain, one packed word per block.
    pub fn terrain_buffer(&self) -> &[u32] {
        &self.terrain_buffer
    }

    /// The serialized terrain as raw bytes, ready for upload.
    pub fn terrain_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.terrain_buffer)
    }

    /// Active chunks that may be seen through `frustum`, with their indices.
    pub fn visible_chunks<'a>(
        &'a self,
        frustum: &'a Frustum,
    ) -> impl Iterator<Item = (usize, &'a Chunk)> + 'a {
        self.chunks
            .iter()
            .enumerate()
            .filter(move |(_, chunk)| chunk.is_active() && chunk.is_visible(frustum))
    }
}
