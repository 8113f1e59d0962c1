// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack assembly: pattern arrays plus build counters become layers of placed units.

use alloc::vec::Vec;

use crate::error::StackError;
use crate::footprint::{Footprint, ProductDims};
use crate::pattern::{PatternSource, case_for};
use crate::types::LayerMask;

/// Build progress and per-layer options as reported by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct BuildState {
    /// `NumPerLayer`.
    pub num_per_layer: i32,
    /// `NumLayers`: layers completed so far.
    #[cfg_attr(feature = "serde", serde(rename = "NumLayers"))]
    pub layers_completed: i32,
    /// `UnitsDone`: units placed on the layer in progress.
    pub units_done: i32,
    /// `LayerFlip`.
    pub layer_flip: LayerMask,
    /// `LayerSheet`.
    pub layer_sheet: LayerMask,
    /// `TopSheetPlaced`.
    pub top_sheet_placed: bool,
}

impl Default for BuildState {
    fn default() -> Self {
        Self {
            num_per_layer: 0,
            layers_completed: 0,
            units_done: 0,
            layer_flip: LayerMask::EMPTY,
            layer_sheet: LayerMask::EMPTY,
            top_sheet_placed: true,
        }
    }
}

impl BuildState {
    /// `UnitsDone` clamped to `[0, usable]`.
    ///
    /// `usable` is `NumPerLayer` after clamping to the pattern arrays; see
    /// [`PatternSource::usable_count`].
    pub fn units_done(&self, usable: usize) -> usize {
        usize::try_from(self.units_done).unwrap_or(0).min(usable)
    }

    /// Completed layers, negative counts read as zero.
    pub fn layers_completed(&self) -> usize {
        usize::try_from(self.layers_completed).unwrap_or(0)
    }

    /// True while units are being placed on a layer above the completed ones.
    pub fn in_progress(&self) -> bool {
        self.units_done > 0
    }

    /// True while the layer in progress holds fewer than `usable` units.
    pub fn has_partial_layer(&self, usable: usize) -> bool {
        let ud = self.units_done(usable);
        ud > 0 && ud < usable
    }

    /// Completed layers plus the layer in progress, if any.
    pub fn total_layers(&self) -> usize {
        self.layers_completed() + usize::from(self.in_progress())
    }
}

/// A placed unit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Unit {
    /// 1-based physical case id.
    pub case: u16,
    /// Layer-local footprint.
    pub footprint: Footprint,
}

/// One layer of units, bottom-up index.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// 0-based layer index.
    pub index: usize,
    /// Units in placement order.
    pub units: Vec<Unit>,
    /// True for the partly built top layer.
    pub partial: bool,
}

/// The assembled stack.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stack {
    /// Layers, bottom first.
    pub layers: Vec<Layer>,
    /// True when the top layer is partly built.
    pub has_partial_layer: bool,
}

impl Stack {
    /// Assemble the stack described by `state` from the pattern arrays.
    ///
    /// Each layer uses the flipped arrays when its `LayerFlip` bit is set and flipped arrays
    /// exist. The partial top layer holds only the first `UnitsDone` placements in sequence
    /// order. Any configuration error aborts the whole assembly.
    pub fn assemble(
        source: &PatternSource<'_>,
        dims: &ProductDims,
        state: &BuildState,
    ) -> Result<Self, StackError> {
        let usable = source.usable_count(state.num_per_layer)?;
        let units_done = state.units_done(usable);
        let has_partial_layer = state.has_partial_layer(usable);
        let total = state.total_layers();

        let mut layers = Vec::with_capacity(total);
        for index in 0..total {
            let flipped = state.layer_flip.layer(index) && source.flipped.is_some();
            let arrays = source.arrays(flipped);
            let seq = source.sequence(flipped);
            let partial = has_partial_layer && index + 1 == total;
            let count = if partial { units_done } else { usable };

            let mut units = Vec::with_capacity(count);
            for i in 0..count {
                let case = case_for(seq, i, usable);
                let (x, y, r) = arrays.placement(case).ok_or(StackError::NoPlacements {
                    num_per_layer: state.num_per_layer,
                    available: arrays.available(),
                })?;
                units.push(Unit {
                    case: u16::try_from(case).unwrap_or(u16::MAX),
                    footprint: Footprint::from_placement(x, y, r, dims),
                });
            }
            log::debug!(
                "layer {index}: {} units{}{}",
                units.len(),
                if flipped { ", flipped" } else { "" },
                if partial { ", partial" } else { "" }
            );
            layers.push(Layer {
                index,
                units,
                partial,
            });
        }

        Ok(Self {
            layers,
            has_partial_layer,
        })
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// True if the stack has no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Units across all layers.
    pub fn unit_count(&self) -> usize {
        self.layers.iter().map(|l| l.units.len()).sum()
    }
}
