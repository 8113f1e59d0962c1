// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unit footprints: the axis-aligned rectangle a placed product occupies on its layer.

use kurbo::Rect;
use pallet_index::Aabb2D;

use crate::error::StackError;
use crate::types::Rotation;

/// Product dimensions in layer units. All three are strictly positive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProductDims {
    length: f64,
    width: f64,
    height: f64,
}

impl ProductDims {
    /// Validate and wrap product dimensions.
    pub fn new(length: f64, width: f64, height: f64) -> Result<Self, StackError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(length) && ok(width) && ok(height) {
            Ok(Self {
                length,
                width,
                height,
            })
        } else {
            Err(StackError::InvalidProduct {
                length,
                width,
                height,
            })
        }
    }

    /// `ProductLength`.
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// `ProductWidth`.
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// `ProductHeight`; also the layer pitch.
    pub const fn height(&self) -> f64 {
        self.height
    }
}

/// A placed unit's footprint in layer-local coordinates.
///
/// `x` runs along the layer's X axis and `y` along its Z axis. Bounds are derived from the
/// placement and product dimensions each time; a footprint is never mutated in place.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Footprint {
    /// Top-left X of the placement.
    pub x: f64,
    /// Top-left Y (layer Z) of the placement.
    pub y: f64,
    /// Planar rotation.
    pub rotation: Rotation,
    /// Extent along X.
    pub size_x: f64,
    /// Extent along Z.
    pub size_z: f64,
}

impl Footprint {
    /// Build a footprint from a raw placement triple.
    ///
    /// Unrotated units run their length along X; a quarter turn swaps the extents.
    pub fn from_placement(x: f32, y: f32, r: f32, dims: &ProductDims) -> Self {
        let rotation = Rotation::from_degrees(r);
        let (size_x, size_z) = if rotation.is_quarter_turn() {
            (dims.width, dims.length)
        } else {
            (dims.length, dims.width)
        };
        Self {
            x: f64::from(x),
            y: f64::from(y),
            rotation,
            size_x,
            size_z,
        }
    }

    /// Lower X bound.
    pub fn min_x(&self) -> f64 {
        self.x
    }

    /// Upper X bound.
    pub fn max_x(&self) -> f64 {
        self.x + self.size_x
    }

    /// Lower Z bound.
    pub fn min_z(&self) -> f64 {
        self.y
    }

    /// Upper Z bound.
    pub fn max_z(&self) -> f64 {
        self.y + self.size_z
    }

    /// The footprint as an index box (index Y is layer Z).
    pub fn aabb(&self) -> Aabb2D<f64> {
        Aabb2D::new(self.min_x(), self.min_z(), self.max_x(), self.max_z())
    }

    /// The footprint as a Kurbo rectangle in layer coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.min_x(), self.min_z(), self.max_x(), self.max_z())
    }
}
