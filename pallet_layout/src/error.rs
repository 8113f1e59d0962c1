// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors of the pattern editor.

/// Which custom pattern array a [`LayoutError`] refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatternArray {
    /// `LeftMargin`.
    LeftMargin,
    /// `TopMargin`.
    TopMargin,
    /// `WidthArray`.
    Width,
    /// `HeightArray`.
    Height,
    /// `Rot90`.
    Rot90,
}

impl core::fmt::Display for PatternArray {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::LeftMargin => "LeftMargin",
            Self::TopMargin => "TopMargin",
            Self::Width => "WidthArray",
            Self::Height => "HeightArray",
            Self::Rot90 => "Rot90",
        })
    }
}

/// A configuration error. The operation that hit it writes nothing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// One or more of `XLimitNeg`, `XLimitPos`, `YLimitNeg`, `YLimitPos` is not configured.
    #[error("boundary limits are not configured")]
    MissingLimits,
    /// An array cannot hold the requested case.
    #[error("{array} holds {len} entries, need {needed} (1-based with sentinel)")]
    ShortArray {
        /// The short array.
        array: PatternArray,
        /// Its length, sentinel included.
        len: usize,
        /// Minimum length, sentinel included.
        needed: usize,
    },
}
