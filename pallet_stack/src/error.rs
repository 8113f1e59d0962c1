// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors raised while turning host arrays into a stack.

/// Which host array a [`StackError`] refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArrayName {
    /// `UnitX`.
    UnitX,
    /// `UnitY`.
    UnitY,
    /// `UnitR`.
    UnitR,
    /// `UnitFX`.
    UnitFx,
    /// `UnitFY`.
    UnitFy,
    /// `UnitFR`.
    UnitFr,
}

impl core::fmt::Display for ArrayName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::UnitX => "UnitX",
            Self::UnitY => "UnitY",
            Self::UnitR => "UnitR",
            Self::UnitFx => "UnitFX",
            Self::UnitFy => "UnitFY",
            Self::UnitFr => "UnitFR",
        })
    }
}

/// A configuration error. Assembly aborts on the first one; no partial stack is produced.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StackError {
    /// The pattern arrays leave no usable placements.
    #[error("no usable placements: NumPerLayer = {num_per_layer}, arrays hold {available}")]
    NoPlacements {
        /// Requested placements per layer.
        num_per_layer: i32,
        /// Entries available past the index 0 sentinel.
        available: usize,
    },
    /// A flipped array is shorter than the usable count of the normal arrays.
    #[error("{array} holds {len} entries, need {needed} (1-based with sentinel)")]
    ShortArray {
        /// The short array.
        array: ArrayName,
        /// Its length, sentinel included.
        len: usize,
        /// Minimum length, sentinel included.
        needed: usize,
    },
    /// A product dimension is zero, negative, or not finite.
    #[error("invalid product dimensions {length} x {width} x {height}")]
    InvalidProduct {
        /// `ProductLength`.
        length: f64,
        /// `ProductWidth`.
        width: f64,
        /// `ProductHeight`.
        height: f64,
    },
    /// A required host array is absent.
    #[error("missing {0} array")]
    Missing(ArrayName),
}
