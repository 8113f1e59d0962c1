// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the stack: rotations, faces, sides, and layer bit masks.

/// Planar rotation of a unit within its layer.
///
/// Host arrays carry rotation as a float number of degrees; only 90 is meaningful,
/// every other value is treated as unrotated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Product length runs along the layer's x axis.
    #[default]
    Deg0,
    /// Product length runs along the layer's z axis.
    Deg90,
}

impl Rotation {
    /// Interpret a raw host rotation value. The value is truncated toward zero first.
    pub fn from_degrees(raw: f32) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Rotation flags are small integral degree values stored as floats."
        )]
        let deg = raw as i32;
        if deg == 90 { Self::Deg90 } else { Self::Deg0 }
    }

    /// True for [`Rotation::Deg90`].
    pub const fn is_quarter_turn(self) -> bool {
        matches!(self, Self::Deg90)
    }
}

bitflags::bitflags! {
    /// Box faces of a unit. The scene convention is Y-up with Z toward the front.
    ///
    /// Bits follow the face order used by the mesh emitter.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Faces: u8 {
        /// +Z face.
        const FRONT  = 0b0000_0001;
        /// -Z face.
        const BACK   = 0b0000_0010;
        /// +X face.
        const RIGHT  = 0b0000_0100;
        /// -X face.
        const LEFT   = 0b0000_1000;
        /// +Y face.
        const TOP    = 0b0001_0000;
        /// -Y face. Never rendered: it rests on the layer below or on the pallet.
        const BOTTOM = 0b0010_0000;

        /// The four vertical faces.
        const SIDES =
            Self::FRONT.bits() | Self::BACK.bits() | Self::RIGHT.bits() | Self::LEFT.bits();
        /// Faces that can hide a unit; a unit covered on all of them is interior.
        const ENCLOSING = Self::SIDES.bits() | Self::TOP.bits();
        /// Faces emitted for every kept unit.
        const RENDERED = Self::ENCLOSING.bits();
    }
}

impl Default for Faces {
    fn default() -> Self {
        Self::empty()
    }
}

/// One of the four same-layer neighbor directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Toward `-x`: the neighbor's `max_x` meets this unit's `min_x`.
    Left,
    /// Toward `+x`: the neighbor's `min_x` meets this unit's `max_x`.
    Right,
    /// Toward `+z`: the neighbor's `min_z` meets this unit's `max_z`.
    Front,
    /// Toward `-z`: the neighbor's `max_z` meets this unit's `min_z`.
    Back,
}

impl Side {
    /// All four sides in evaluation order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Front, Self::Back];

    /// The face this side covers.
    pub const fn face(self) -> Faces {
        match self {
            Self::Left => Faces::LEFT,
            Self::Right => Faces::RIGHT,
            Self::Front => Faces::FRONT,
            Self::Back => Faces::BACK,
        }
    }
}

/// Per-layer bit field as stored by the host (`LayerFlip`, `LayerSheet`).
///
/// Bit mapping:
/// - bit `0` is the pallet deck (for sheets: a sheet lying directly on the pallet),
/// - bit `L + 1` is layer `L`, counted from `0` at the bottom.
///
/// For `LayerFlip` a set layer bit selects the flipped pattern for that layer; for
/// `LayerSheet` it places a sheet on top of that layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LayerMask(i32);

impl LayerMask {
    /// No bits set.
    pub const EMPTY: Self = Self(0);

    /// Wrap a raw host bit field.
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// The raw bit field.
    pub const fn bits(self) -> i32 {
        self.0
    }

    /// Raw bit `n`. Bits past 31 are never set.
    pub const fn bit(self, n: usize) -> bool {
        n < 32 && (self.0 >> n) & 1 == 1
    }

    /// Bit `0`: the pallet deck.
    pub const fn deck(self) -> bool {
        self.bit(0)
    }

    /// Bit `layer + 1`.
    pub const fn layer(self, layer: usize) -> bool {
        self.bit(layer + 1)
    }

    /// Return a copy with the bit for `layer` set.
    pub const fn with_layer(self, layer: usize) -> Self {
        if layer + 1 < 32 {
            Self(self.0 | (1 << (layer + 1)))
        } else {
            self
        }
    }

    /// Return a copy with the deck bit set.
    pub const fn with_deck(self) -> Self {
        Self(self.0 | 1)
    }
}
