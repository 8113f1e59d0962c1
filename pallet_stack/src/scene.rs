// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene plan: where each kept unit and each slip sheet sits in the pallet frame.
//!
//! The frame is Y-up with its origin at the pallet center. Layer coordinates start at a
//! pallet corner: `+X/-Z` normally, `+X/+Z` when the origin is mirrored. Layer X runs
//! toward `-X` and layer Y runs toward `+Z` (`-Z` when mirrored).

use alloc::vec::Vec;
use core::f64::consts::FRAC_PI_2;

use kurbo::{Point, Size};

use crate::cull::Visibility;
use crate::footprint::ProductDims;
use crate::stack::{BuildState, Stack};
use crate::types::Faces;

/// Slip sheet dimensions.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct SheetSpec {
    /// Extent along X.
    pub length: f64,
    /// Extent along Z.
    pub width: f64,
    /// Extent along Y.
    pub thickness: f64,
}

impl Default for SheetSpec {
    fn default() -> Self {
        Self {
            length: 48.0,
            width: 40.0,
            thickness: 0.10,
        }
    }
}

/// Pallet frame parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct SceneFrame {
    /// Pallet `Length`, along X.
    pub pallet_length: f64,
    /// Pallet `Width`, along Z.
    pub pallet_width: f64,
    /// `OriginMirror`.
    pub origin_mirror: bool,
    /// Slip sheet dimensions.
    pub sheet: SheetSpec,
}

impl Default for SceneFrame {
    fn default() -> Self {
        Self {
            pallet_length: 48.0,
            pallet_width: 40.0,
            origin_mirror: false,
            sheet: SheetSpec::default(),
        }
    }
}

impl SceneFrame {
    /// The layer origin corner as `(x, z)`.
    pub fn corner(&self) -> Point {
        let z = self.pallet_width / 2.0;
        Point::new(
            self.pallet_length / 2.0,
            if self.origin_mirror { z } else { -z },
        )
    }
}

/// A kept unit in the scene.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UnitPlacement {
    /// Layer index.
    pub layer: usize,
    /// Index within the layer.
    pub unit: usize,
    /// Physical case id.
    pub case: u16,
    /// Center on the ground plane, `(x, z)`.
    pub center: Point,
    /// Center height.
    pub elevation: f64,
    /// Rotation about Y in radians.
    pub yaw: f64,
    /// Faces to emit.
    pub faces: Faces,
}

/// A slip sheet in the scene, centered on the pallet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SheetPlacement {
    /// Center height.
    pub elevation: f64,
    /// Footprint, `(x, z)`.
    pub size: Size,
    /// Extent along Y.
    pub thickness: f64,
}

/// Everything a mesh emitter needs to draw the stack.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenePlan {
    /// Kept units, bottom layer first.
    pub units: Vec<UnitPlacement>,
    /// Slip sheets, bottom first.
    pub sheets: Vec<SheetPlacement>,
}

/// Place every kept unit and every slip sheet.
pub fn plan_scene(
    stack: &Stack,
    visibility: &Visibility,
    frame: &SceneFrame,
    dims: &ProductDims,
    state: &BuildState,
) -> ScenePlan {
    let corner = frame.corner();
    let h = dims.height();
    let mut units = Vec::new();
    for layer in &stack.layers {
        let elevation = h / 2.0 + layer.index as f64 * h;
        for (i, u) in layer.units.iter().enumerate() {
            if visibility.is_culled(layer.index, i) {
                continue;
            }
            let f = &u.footprint;
            let cx = corner.x - f.x - f.size_x / 2.0;
            let cz = if frame.origin_mirror {
                corner.y - f.y - f.size_z / 2.0
            } else {
                corner.y + f.y + f.size_z / 2.0
            };
            let yaw = match (f.rotation.is_quarter_turn(), frame.origin_mirror) {
                (false, _) => 0.0,
                (true, false) => FRAC_PI_2,
                (true, true) => -FRAC_PI_2,
            };
            units.push(UnitPlacement {
                layer: layer.index,
                unit: i,
                case: u.case,
                center: Point::new(cx, cz),
                elevation,
                yaw,
                faces: Faces::RENDERED,
            });
        }
    }

    let size = Size::new(frame.sheet.length, frame.sheet.width);
    let sheets = sheet_elevations(state, h, frame.sheet.thickness)
        .into_iter()
        .map(|elevation| SheetPlacement {
            elevation,
            size,
            thickness: frame.sheet.thickness,
        })
        .collect();

    ScenePlan { units, sheets }
}

/// Center heights of the slip sheets selected by `LayerSheet`, bottom first.
///
/// - Deck bit: a sheet on the pallet.
/// - Bit `L + 1`: a sheet on completed layer `L`. While no layer is in progress the topmost
///   completed layer is left to the top sheet rule.
/// - Top sheet: with no layer in progress, `TopSheetPlaced`, and the bit for the stack top set.
pub fn sheet_elevations(state: &BuildState, layer_height: f64, thickness: f64) -> Vec<f64> {
    let mask = state.layer_sheet;
    let half = thickness / 2.0;
    let completed = state.layers_completed();
    let idle = !state.in_progress();
    let mut out = Vec::new();
    if mask.deck() {
        out.push(half);
    }
    let limit = if idle {
        completed.saturating_sub(1)
    } else {
        completed
    };
    for l in 0..limit {
        if mask.layer(l) {
            out.push((l + 1) as f64 * layer_height + half);
        }
    }
    let total = state.total_layers();
    if idle && total > 0 && state.top_sheet_placed && mask.bit(total) {
        out.push(total as f64 * layer_height + half);
    }
    out
}
