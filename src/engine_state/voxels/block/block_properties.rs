//! # Block Properties Module
//!
//! The static material catalog. Every property of a block is derived from its
//! [`MaterialType`] through this table and never stored alongside it, so a
//! block's type and properties cannot drift apart.

use std::ops::{BitOr, BitOrAssign};

use super::material_type::{MaterialType, MATERIAL_COUNT};

/// How a material is drawn.
///
/// The discriminant is the byte written into the low half of a packed block.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GfxProperty {
    /// Fully occludes whatever is behind it.
    Opaque = 0x01,
    /// Blended see-through surface.
    Transparent = 0x02,
    /// Texels are either fully drawn or discarded.
    AlphaClipped = 0x04,
    /// Emits its own light.
    Emissive = 0x08,
}

/// The physical state of a material.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StateProperty {
    /// Nothing there.
    Void = 0x01,
    /// Rigid matter.
    Solid = 0x02,
    /// Flowing matter.
    Fluid = 0x04,
    /// Burning or molten matter.
    Hot = 0x08,
}

macro_rules! property_flags {
    ($(#[$meta:meta])* $name:ident { $($(#[$flag_meta:meta])* $flag:ident = $bits:expr,)+ }) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub struct $name(u8);

        impl $name {
            $(
                $(#[$flag_meta])*
                pub const $flag: $name = $name($bits);
            )+

            /// The raw bit pattern.
            #[inline]
            pub const fn bits(self) -> u8 {
                self.0
            }

            /// Whether every flag of `other` is also set in `self`.
            #[inline]
            pub const fn contains(self, other: $name) -> bool {
                self.0 & other.0 == other.0
            }
        }

        impl BitOr for $name {
            type Output = $name;

            #[inline]
            fn bitor(self, rhs: $name) -> $name {
                $name(self.0 | rhs.0)
            }
        }

        impl BitOrAssign for $name {
            #[inline]
            fn bitor_assign(&mut self, rhs: $name) {
                self.0 |= rhs.0;
            }
        }
    };
}

property_flags! {
    /// How a material takes part in collisions. Flags may be combined.
    InteractionProperty {
        /// Entities pass through it.
        INTANGIBLE = 0x01,
        /// Entities collide with it.
        COLLIDABLE = 0x02,
        /// Falls when nothing supports it.
        GRAVITY = 0x04,
    }
}

property_flags! {
    /// How a material's texture is chosen. Flags may be combined.
    AspectProperty {
        /// Same texture on every face.
        REGULAR = 0x01,
        /// Texture depends on face orientation.
        DIRECTED = 0x02,
        /// Tinted at draw time.
        COLORED = 0x04,
        /// Picks between texture variants.
        VARIATED = 0x08,
        /// Tint depends on the surrounding biome.
        BIOME = 0x10,
    }
}

/// The four property fields derived from a material.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MaterialProperties {
    /// Rendering class.
    pub gfx: GfxProperty,
    /// Physical state.
    pub state: StateProperty,
    /// Collision behavior.
    pub interaction: InteractionProperty,
    /// Texturing behavior.
    pub aspect: AspectProperty,
}

impl MaterialProperties {
    const fn new(
        gfx: GfxProperty,
        state: StateProperty,
        interaction: InteractionProperty,
        aspect: AspectProperty,
    ) -> Self {
        MaterialProperties {
            gfx,
            state,
            interaction,
            aspect,
        }
    }

    /// Whether the material hides the faces of its neighbours.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.gfx == GfxProperty::Opaque
    }
}

const SOLID_GROUND: InteractionProperty = InteractionProperty(
    InteractionProperty::COLLIDABLE.bits() | InteractionProperty::GRAVITY.bits(),
);

const BIOME_TINTED: AspectProperty =
    AspectProperty(AspectProperty::COLORED.bits() | AspectProperty::BIOME.bits());

/// Maps each material id to its properties.
///
/// Indexed by `MaterialType` as a `usize`.
static MATERIAL_PROPERTIES: [MaterialProperties; MATERIAL_COUNT] = {
    use AspectProperty as A;
    use GfxProperty as G;
    use InteractionProperty as I;
    use StateProperty as S;

    [
        // AIR
        MaterialProperties::new(G::Transparent, S::Void, I::INTANGIBLE, A::REGULAR),
        // GRASS (top differs from sides, tint follows the biome)
        MaterialProperties::new(
            G::Opaque,
            S::Solid,
            I::COLLIDABLE,
            AspectProperty(A::DIRECTED.bits() | BIOME_TINTED.bits()),
        ),
        // DIRT
        MaterialProperties::new(G::Opaque, S::Solid, I::COLLIDABLE, A::REGULAR),
        // STONE
        MaterialProperties::new(G::Opaque, S::Solid, I::COLLIDABLE, A::VARIATED),
        // SNOW
        MaterialProperties::new(G::Opaque, S::Solid, SOLID_GROUND, A::REGULAR),
        // SAND
        MaterialProperties::new(G::Opaque, S::Solid, SOLID_GROUND, A::VARIATED),
        // WOOD
        MaterialProperties::new(G::Opaque, S::Solid, I::COLLIDABLE, A::DIRECTED),
        // WATER
        MaterialProperties::new(G::Transparent, S::Fluid, I::INTANGIBLE, BIOME_TINTED),
        // LAVA
        MaterialProperties::new(G::Emissive, S::Hot, I::INTANGIBLE, A::REGULAR),
        // GLASS
        MaterialProperties::new(G::Transparent, S::Solid, I::COLLIDABLE, A::REGULAR),
        // LEAVES
        MaterialProperties::new(G::AlphaClipped, S::Solid, I::COLLIDABLE, BIOME_TINTED),
        // CLOUD
        MaterialProperties::new(G::Transparent, S::Void, I::INTANGIBLE, A::COLORED),
    ]
};

/// Looks up the properties of a material.
#[inline]
pub fn properties_for(material: MaterialType) -> MaterialProperties {
    MATERIAL_PROPERTIES[material as usize]
}
