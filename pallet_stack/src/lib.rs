// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pallet Stack: a Kurbo-native model of a palletized stack of cases.
//!
//! This crate turns the 1-based pattern arrays of a palletizer HMI into layers of placed
//! units, decides which units can never be seen, and plans where everything sits.
//!
//! - [`Stack::assemble`]: pattern arrays, sequences, flip and build counters into layers.
//! - [`compute_visibility`]: interior unit culling with the protected-layer policy of
//!   [`Protection::for_stack`].
//! - [`plan_scene`]: unit centers, yaw, and slip sheets in the pallet frame.
//! - [`top_view`]: canvas geometry for the top-down pattern view.
//!
//! Rendering is out of scope: the outputs are plain data for a mesh or SVG emitter.
//!
//! ## Conventions
//!
//! - Host arrays reserve index `0`; case `n` lives at index `n`.
//! - Layer masks map bit `0` to the pallet deck and bit `L + 1` to layer `L`; see [`LayerMask`].
//! - Contact tests use a tolerance of `0.01` length units; see [`pallet_index::Tolerance`].
//!
//! ## Example
//!
//! ```rust
//! use pallet_stack::{
//!     BuildState, PatternArrays, PatternSource, ProductDims, Protection, Stack,
//!     compute_visibility,
//! };
//!
//! // A 3x3 layer of unit cubes, two layers high.
//! let mut x = vec![0.0_f32];
//! let mut y = vec![0.0_f32];
//! for row in 0..3 {
//!     for col in 0..3 {
//!         x.push(col as f32);
//!         y.push(row as f32);
//!     }
//! }
//! let r = vec![0.0_f32; 10];
//! let source = PatternSource::new(PatternArrays::new(&x, &y, &r));
//! let dims = ProductDims::new(1.0, 1.0, 1.0).unwrap();
//! let state = BuildState { num_per_layer: 9, layers_completed: 2, ..BuildState::default() };
//!
//! let stack = Stack::assemble(&source, &dims, &state).unwrap();
//! let protection = Protection::for_stack(&stack);
//! let vis = compute_visibility(&stack, |l| protection.is_protected(l));
//!
//! // Only the center of the bottom layer is hidden.
//! assert!(vis.is_culled(0, 4));
//! assert_eq!(vis.culled_count(), 1);
//! ```
//!
//! ### Float semantics
//!
//! Coordinates are assumed finite. Product dimensions are validated by [`ProductDims::new`].

#![no_std]

extern crate alloc;

pub mod config;
pub mod cull;
pub mod error;
pub mod footprint;
pub mod pattern;
pub mod scene;
pub mod stack;
pub mod top_view;
pub mod types;

pub use config::{PatternData, StackParams};
pub use cull::{Culler, Protection, UnitVisibility, Visibility, compute_visibility};
pub use error::{ArrayName, StackError};
pub use footprint::{Footprint, ProductDims};
pub use pattern::{PatternArrays, PatternSource};
pub use scene::{SceneFrame, ScenePlan, SheetPlacement, SheetSpec, UnitPlacement, plan_scene};
pub use stack::{BuildState, Layer, Stack, Unit};
pub use types::{Faces, LayerMask, Rotation, Side};

/// An assembled, culled, and placed stack.
#[derive(Clone, Debug, PartialEq)]
pub struct StackView {
    /// Layers of units.
    pub stack: Stack,
    /// Culling decisions.
    pub visibility: Visibility,
    /// Scene placement of kept units and sheets.
    pub scene: ScenePlan,
}

/// Assemble, cull, and place a stack.
///
/// Fallible steps run before any output is built. A configuration error is logged once
/// as a warning and yields `None`.
pub fn visualize(params: &StackParams, source: &PatternSource<'_>) -> Option<StackView> {
    match try_visualize(params, source) {
        Ok(view) => Some(view),
        Err(e) => {
            log::warn!("stack view aborted: {e}");
            None
        }
    }
}

fn try_visualize(
    params: &StackParams,
    source: &PatternSource<'_>,
) -> Result<StackView, StackError> {
    let dims = params.dims()?;
    let stack = Stack::assemble(source, &dims, &params.build)?;
    let protection = Protection::for_stack(&stack);
    let visibility = Culler::new()
        .with_tolerance(params.tolerance())
        .compute(&stack, |l| protection.is_protected(l));
    let scene = plan_scene(&stack, &visibility, &params.frame, &dims, &params.build);
    log::info!(
        "stack: {} layers{}, {} units kept, {} culled, {} sheets",
        stack.len(),
        if stack.has_partial_layer { " (partial top)" } else { "" },
        visibility.kept_count(),
        visibility.culled_count(),
        scene.sheets.len()
    );
    Ok(StackView {
        stack,
        visibility,
        scene,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn grid() -> (Vec<f32>, Vec<f32>, Vec<f32>) {
        let mut x = alloc::vec![0.0];
        let mut y = alloc::vec![0.0];
        for row in 0..3_u8 {
            for col in 0..3_u8 {
                x.push(f32::from(col));
                y.push(f32::from(row));
            }
        }
        (x, y, alloc::vec![0.0; 10])
    }

    fn params(layers: i32, done: i32) -> StackParams {
        StackParams {
            product_length: 1.0,
            product_width: 1.0,
            product_height: 1.0,
            build: BuildState {
                num_per_layer: 9,
                layers_completed: layers,
                units_done: done,
                ..BuildState::default()
            },
            ..StackParams::default()
        }
    }

    #[test]
    fn partial_top_over_center_keeps_layer_below() {
        // Two full layers and one unit of the third, placed over the center.
        let (x, y, r) = grid();
        let seq = [0, 5, 1, 2, 3, 4, 6, 7, 8, 9];
        let source =
            PatternSource::new(PatternArrays::new(&x, &y, &r)).with_sequences(Some(&seq), None);
        let view = visualize(&params(2, 1), &source).unwrap();
        assert_eq!(view.stack.len(), 3);
        assert_eq!(view.stack.layers[2].units[0].case, 5);
        assert!(!view.visibility.is_culled(1, 4));
        assert!(view.visibility.is_culled(0, 4));
        assert_eq!(view.scene.units.len(), 9 + 9 + 1 - 1);
    }

    #[test]
    fn top_layer_using_every_placement_is_full() {
        // Nine placements, ten requested: nine units done fills the third layer.
        let (x, y, r) = grid();
        let source = PatternSource::new(PatternArrays::new(&x, &y, &r));
        let mut p = params(2, 9);
        p.build.num_per_layer = 10;
        let view = visualize(&p, &source).unwrap();
        assert_eq!(view.stack.len(), 3);
        assert!(!view.stack.has_partial_layer);
        assert!(view.visibility.is_culled(1, 4), "layer below a full top is not protected");
        assert!(view.visibility.is_culled(0, 4));
        assert!(!view.visibility.is_culled(2, 4));
    }

    #[test]
    fn units_done_past_capacity_is_a_full_layer() {
        let (x, y, r) = grid();
        let source = PatternSource::new(PatternArrays::new(&x, &y, &r));
        let mut p = params(1, 40);
        p.build.num_per_layer = 12;
        let view = visualize(&p, &source).unwrap();
        assert_eq!(view.stack.unit_count(), 18);
        assert!(!view.stack.has_partial_layer);
        assert!(view.visibility.is_culled(0, 4));
    }

    #[test]
    fn config_error_yields_nothing() {
        let (x, y, r) = grid();
        let source = PatternSource::new(PatternArrays::new(&x, &y, &r));
        let mut p = params(2, 0);
        p.product_height = 0.0;
        assert!(visualize(&p, &source).is_none());
        p = params(2, 0);
        p.build.num_per_layer = 0;
        assert!(visualize(&p, &source).is_none());
    }
}
