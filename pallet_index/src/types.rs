// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and tolerance predicates.

use core::cmp::Ordering;

/// Axis-aligned bounding box in 2D.
///
/// In pallet terms the index plane is the layer plane: `x` runs along the pallet
/// length and `y` along the pallet width (the scene's Z axis).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x
    pub min_x: T,
    /// Minimum y
    pub min_y: T,
    /// Maximum x
    pub max_x: T,
    /// Maximum y
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// The intersection of two AABBs. May be inverted when they are disjoint.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            min_x: max_t(self.min_x, other.min_x),
            min_y: max_t(self.min_y, other.min_y),
            max_x: min_t(self.max_x, other.max_x),
            max_y: min_t(self.max_y, other.max_y),
        }
    }

    /// Whether the two AABBs share at least a point (touching edges count).
    pub fn touches(&self, other: &Self) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Return true if the AABB is inverted. Degenerate (zero-area) boxes are not empty.
    pub fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y)
    }
}

impl Aabb2D<f64> {
    /// Create an AABB from origin and size.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }

    /// Grow the box by `d` on every side.
    pub fn inflate(&self, d: f64) -> Self {
        Self {
            min_x: self.min_x - d,
            min_y: self.min_y - d,
            max_x: self.max_x + d,
            max_y: self.max_y + d,
        }
    }
}

/// Comparison tolerance for face contact and overlap tests, in layout length units.
///
/// Two coordinates closer than the tolerance are treated as the same face plane, and
/// two ranges must share more than the tolerance to count as overlapping. Sliver
/// contacts at a corner therefore never make units neighbors.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tolerance(pub f64);

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Tolerance {
    /// `0.01` length units.
    pub const DEFAULT: Self = Self(0.01);

    /// The raw epsilon.
    pub const fn get(self) -> f64 {
        self.0
    }

    /// `|a - b| <= ε`.
    pub fn almost_eq(self, a: f64, b: f64) -> bool {
        abs_diff(a, b) <= self.0
    }

    /// `min(max_a, max_b) - max(min_a, min_b) > ε`.
    pub fn ranges_overlap(self, min_a: f64, max_a: f64, min_b: f64, max_b: f64) -> bool {
        max_a.min(max_b) - min_a.max(min_b) > self.0
    }

    /// Both axes of the two boxes overlap by more than ε.
    pub fn overlaps(self, a: &Aabb2D<f64>, b: &Aabb2D<f64>) -> bool {
        self.ranges_overlap(a.min_x, a.max_x, b.min_x, b.max_x)
            && self.ranges_overlap(a.min_y, a.max_y, b.min_y, b.max_y)
    }
}

#[inline]
fn abs_diff(a: f64, b: f64) -> f64 {
    if a >= b { a - b } else { b - a }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
