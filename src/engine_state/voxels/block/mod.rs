//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes material definitions, the static property catalog, block face
//! handling, and the 16-bit packed form a block takes on its way to the GPU.
//!
//! ## Packed Layout
//!
//! ```text
//!  15        8 7         0
//! +-----------+-----------+
//! | material  |    gfx    |
//! +-----------+-----------+
//! ```
//!
//! Only the material byte is read back. The gfx byte is informational for the
//! renderer; unpacking re-derives every property from the material.

use block_properties::{properties_for, GfxProperty, MaterialProperties};
use material_type::MaterialType;

pub mod block_properties;
pub mod block_side;
pub mod material_type;

/// The underlying integer type used to represent material ids in memory.
/// This is used for efficient storage and serialization of block data.
pub type BlockTypeSize = u8;

/// Packs a material id and its gfx class into one 16-bit word.
#[inline]
pub fn pack(material: MaterialType, gfx: GfxProperty) -> u16 {
    (u16::from(material.id()) << 8) | u16::from(gfx as u8)
}

/// Recovers the material from a packed word, ignoring the gfx byte.
///
/// # Panics
/// Panics if the high byte is not a valid material id.
#[inline]
pub fn unpack(packed: u16) -> MaterialType {
    MaterialType::from_id((packed >> 8) as BlockTypeSize)
}

/// Represents a single voxel block in the world.
///
/// This is a lightweight structure that stores only the material id.
/// Every other property is looked up from the material.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute ensures a consistent memory layout for GPU interoperability.
/// The zeroed block is air.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    /// The material of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// An air block.
    pub const AIR: Block = Block { block_type: 0 };

    /// Creates a new block of the specified material.
    pub fn new(material: MaterialType) -> Self {
        Block {
            block_type: material.id(),
        }
    }

    /// Rebuilds a block from its packed form.
    ///
    /// # Panics
    /// Panics if the packed word carries an invalid material id.
    pub fn from_packed(packed: u16) -> Self {
        Block::new(unpack(packed))
    }

    /// The material of this block.
    ///
    /// # Panics
    /// Panics if `block_type` was overwritten with an invalid id.
    #[inline]
    pub fn material(&self) -> MaterialType {
        MaterialType::from_id(self.block_type)
    }

    /// The catalog properties of this block's material.
    #[inline]
    pub fn properties(&self) -> MaterialProperties {
        properties_for(self.material())
    }

    /// Whether this block is air.
    #[inline]
    pub fn is_air(&self) -> bool {
        self.material() == MaterialType::Air
    }

    /// Whether this block hides the faces of its neighbours.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.properties().is_opaque()
    }

    /// The 16-bit packed form of this block.
    #[inline]
    pub fn pack(&self) -> u16 {
        let material = self.material();
        pack(material, properties_for(material).gfx)
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::AIR
    }
}

impl From<MaterialType> for Block {
    fn from(material: MaterialType) -> Self {
        Block::new(material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        assert_eq!(pack(MaterialType::Grass, GfxProperty::Opaque), 0x0101);
        assert_eq!(pack(MaterialType::Cloud, GfxProperty::Transparent), 0x0B02);
        assert_eq!(Block::AIR.pack(), 0x0002);
    }

    #[test]
    fn test_pack_unpack_round_trip_rederives_properties() {
        for material in MaterialType::ALL {
            let properties = properties_for(material);
            let packed = pack(material, properties.gfx);

            assert_eq!(unpack(packed), material);
            assert_eq!(Block::from_packed(packed).properties(), properties);
        }
    }

    #[test]
    fn test_unpack_ignores_gfx_byte() {
        let packed = pack(MaterialType::Stone, GfxProperty::Emissive);
        let block = Block::from_packed(packed);

        assert_eq!(block.material(), MaterialType::Stone);
        assert_eq!(block.properties().gfx, GfxProperty::Opaque);
    }

    #[test]
    fn test_zeroed_block_is_air() {
        let block: Block = bytemuck::Zeroable::zeroed();
        assert!(block.is_air());
        assert!(!block.is_opaque());
        assert_eq!(block, Block::default());
    }

    #[test]
    #[should_panic(expected = "invalid material id")]
    fn test_unpack_rejects_unknown_material() {
        unpack(0xFF01);
    }
}
