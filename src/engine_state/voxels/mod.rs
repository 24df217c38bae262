//! # Voxel Terrain Core
//!
//! This module contains the voxel data model and the procedural generation that
//! fills it.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Noise**: Seeded value and gradient noise producing the heightfield
//! * **Block**: The material catalog, block packing and face directions
//! * **Chunk**: Fixed-size 3D arrays of blocks generated from the heightfield
//! * **World**: The grid of chunks and the terrain buffer built from them
//!
//! ## Data Flow
//!
//! 1. A `NoiseField` is synthesized from `NoiseSettings`
//! 2. The `World` generates every chunk of its grid from that field
//! 3. Each chunk is packed into the terrain buffer, faces already culled
//! 4. The renderer uploads the buffer and draws the chunks the frustum keeps
//!
//! ## Thread Safety
//!
//! Generated chunks are immutable apart from their active flag, so a `World`
//! can be shared read-only across threads.

pub mod block;
pub mod chunk;
pub mod noise;
pub mod world;
