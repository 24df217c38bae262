//! # Material Type Module
//!
//! This module defines the closed set of materials a block can be made of.
//! It provides conversion from the compact stored id.

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Number of distinct materials.
pub const MATERIAL_COUNT: usize = 12;

/// Enumerates every material a block can be made of.
///
/// The discriminant is the 8-bit id stored in [`super::Block`] and in the
/// high byte of the packed GPU word. The `FromPrimitive` derive allows
/// conversion back from that id.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive)]
pub enum MaterialType {
    /// Empty space.
    Air = 0,
    /// Topsoil with a grass cover.
    Grass = 1,
    /// Plain soil found under grass.
    Dirt = 2,
    /// Bedrock-like rock.
    Stone = 3,
    /// Packed snow, falls when unsupported.
    Snow = 4,
    /// Loose sand, falls when unsupported.
    Sand = 5,
    /// Tree trunk, oriented along its growth axis.
    Wood = 6,
    /// Still water.
    Water = 7,
    /// Molten rock, emits light.
    Lava = 8,
    /// Clear glass.
    Glass = 9,
    /// Foliage with cut-out transparency.
    Leaves = 10,
    /// Soft cloud, see-through and intangible.
    Cloud = 11,
}

impl MaterialType {
    /// Every material, in id order.
    pub const ALL: [MaterialType; MATERIAL_COUNT] = [
        MaterialType::Air,
        MaterialType::Grass,
        MaterialType::Dirt,
        MaterialType::Stone,
        MaterialType::Snow,
        MaterialType::Sand,
        MaterialType::Wood,
        MaterialType::Water,
        MaterialType::Lava,
        MaterialType::Glass,
        MaterialType::Leaves,
        MaterialType::Cloud,
    ];

    /// Converts a stored id back to a `MaterialType`.
    ///
    /// # Panics
    /// Panics if the id does not name a material. Ids only ever come from
    /// `MaterialType as BlockTypeSize`, so an unknown id means the voxel data
    /// is corrupt.
    pub fn from_id(id: BlockTypeSize) -> Self {
        num::FromPrimitive::from_u8(id)
            .unwrap_or_else(|| panic!("invalid material id {id} (expected < {MATERIAL_COUNT})"))
    }

    /// The compact id of this material.
    #[inline]
    pub fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for (index, material) in MaterialType::ALL.iter().enumerate() {
            assert_eq!(material.id() as usize, index);
            assert_eq!(MaterialType::from_id(material.id()), *material);
        }
    }

    #[test]
    #[should_panic(expected = "invalid material id 12")]
    fn test_unknown_id_panics() {
        MaterialType::from_id(12);
    }
}
