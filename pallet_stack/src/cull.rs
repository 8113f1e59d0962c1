// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interior unit culling.
//!
//! A unit is culled when another unit covers its top and same-layer neighbors cover all four
//! of its sides. The bottom face is never evaluated. Protected layers are never culled.
//!
//! Neighbor candidates come from a per-layer [`pallet_index`] index; every candidate is then
//! checked with the exact tolerance predicates, so the backend choice never changes a result.

use alloc::vec::Vec;

use pallet_index::{Aabb2D, Backend, FlatVec, GridF64, IndexGeneric, Tolerance};

use crate::stack::{Layer, Stack};
use crate::types::{Faces, Side};

/// Which layers are exempt from culling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Protection {
    /// Lowest protected layer; every layer at or above it is protected.
    first: usize,
}

impl Protection {
    /// Protect nothing.
    pub const NONE: Self = Self { first: usize::MAX };

    /// Protection for a stack: the topmost layer, plus the layer below it while the top
    /// layer is partly built.
    pub fn for_stack(stack: &Stack) -> Self {
        let n = stack.len();
        if n == 0 {
            return Self::NONE;
        }
        let depth = if stack.has_partial_layer { 2 } else { 1 };
        Self {
            first: n.saturating_sub(depth),
        }
    }

    /// True if `layer` must not be culled.
    pub fn is_protected(&self, layer: usize) -> bool {
        layer >= self.first
    }
}

/// Per-unit result.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitVisibility {
    /// True when the unit is omitted from rendering.
    pub culled: bool,
    /// Faces found covered, whether or not the unit was culled.
    pub covered: Faces,
}

/// Culling results, indexed like [`Stack::layers`] and [`Layer::units`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Visibility {
    /// One entry per layer, one inner entry per unit.
    pub layers: Vec<Vec<UnitVisibility>>,
}

impl Visibility {
    /// Result for unit `unit` of layer `layer`.
    pub fn get(&self, layer: usize, unit: usize) -> Option<UnitVisibility> {
        self.layers.get(layer)?.get(unit).copied()
    }

    /// True if the unit exists and was culled.
    pub fn is_culled(&self, layer: usize, unit: usize) -> bool {
        self.get(layer, unit).is_some_and(|v| v.culled)
    }

    /// Number of culled units.
    pub fn culled_count(&self) -> usize {
        self.layers.iter().flatten().filter(|v| v.culled).count()
    }

    /// Number of kept units.
    pub fn kept_count(&self) -> usize {
        self.layers.iter().flatten().filter(|v| !v.culled).count()
    }
}

/// Culler over a spatial backend.
///
/// The backend is a prototype: each layer gets a fresh clone.
#[derive(Clone, Debug)]
pub struct Culler<B: Backend<f64> + Clone> {
    tolerance: Tolerance,
    prototype: B,
}

impl Default for Culler<FlatVec<f64>> {
    fn default() -> Self {
        Self::new()
    }
}

impl Culler<FlatVec<f64>> {
    /// Culler with the flat vector backend and the default tolerance.
    pub fn new() -> Self {
        Self::with_backend(FlatVec::default())
    }
}

impl Culler<GridF64> {
    /// Culler with a uniform grid backend. A cell near the product footprint works well.
    pub fn with_grid(cell_w: f64, cell_h: f64, origin_x: f64, origin_y: f64) -> Self {
        Self::with_backend(GridF64::new(cell_w, cell_h, origin_x, origin_y))
    }
}

impl<B: Backend<f64> + Clone> Culler<B> {
    /// Culler over an explicit backend prototype.
    pub fn with_backend(prototype: B) -> Self {
        Self {
            tolerance: Tolerance::DEFAULT,
            prototype,
        }
    }

    /// Replace the contact tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The contact tolerance.
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Decide visibility for every unit in `stack`.
    pub fn compute(&self, stack: &Stack, is_protected: impl Fn(usize) -> bool) -> Visibility {
        let indexes: Vec<_> = stack.layers.iter().map(|l| self.index_layer(l)).collect();
        let mut layers = Vec::with_capacity(stack.len());
        for (l, layer) in stack.layers.iter().enumerate() {
            let protected = is_protected(l);
            let above = indexes.get(l + 1);
            let row: Vec<_> = layer
                .units
                .iter()
                .enumerate()
                .map(|(i, u)| {
                    let aabb = u.footprint.aabb();
                    let mut covered = self.covered_sides(&indexes[l], i, &aabb);
                    if above.is_some_and(|idx| self.covered_above(idx, &aabb)) {
                        covered |= Faces::TOP;
                    }
                    UnitVisibility {
                        culled: !protected && covered.contains(Faces::ENCLOSING),
                        covered,
                    }
                })
                .collect();
            log::debug!(
                "layer {l}: {} of {} culled{}",
                row.iter().filter(|v| v.culled).count(),
                row.len(),
                if protected { " (protected)" } else { "" }
            );
            layers.push(row);
        }
        Visibility { layers }
    }

    fn index_layer(&self, layer: &Layer) -> IndexGeneric<f64, usize, B> {
        let mut idx = IndexGeneric::with_backend(self.prototype.clone());
        idx.reserve(layer.units.len());
        for (i, u) in layer.units.iter().enumerate() {
            idx.insert(u.footprint.aabb(), i);
        }
        idx
    }

    fn covered_sides(
        &self,
        idx: &IndexGeneric<f64, usize, B>,
        me: usize,
        u: &Aabb2D<f64>,
    ) -> Faces {
        let mut covered = Faces::empty();
        for (other, j) in idx.query_rect(u.inflate(self.tolerance.get())) {
            if j == me {
                continue;
            }
            for side in Side::ALL {
                if side_covered(self.tolerance, side, u, &other) {
                    covered |= side.face();
                }
            }
        }
        covered
    }

    fn covered_above(&self, idx: &IndexGeneric<f64, usize, B>, u: &Aabb2D<f64>) -> bool {
        idx.query_rect(*u)
            .any(|(other, _)| self.tolerance.overlaps(u, &other))
    }
}

/// True if `other` sits flush against `side` of `u` with more than ε of shared edge.
pub fn side_covered(eps: Tolerance, side: Side, u: &Aabb2D<f64>, other: &Aabb2D<f64>) -> bool {
    match side {
        Side::Left => {
            eps.almost_eq(other.max_x, u.min_x)
                && eps.ranges_overlap(u.min_y, u.max_y, other.min_y, other.max_y)
        }
        Side::Right => {
            eps.almost_eq(other.min_x, u.max_x)
                && eps.ranges_overlap(u.min_y, u.max_y, other.min_y, other.max_y)
        }
        Side::Front => {
            eps.almost_eq(other.min_y, u.max_y)
                && eps.ranges_overlap(u.min_x, u.max_x, other.min_x, other.max_x)
        }
        Side::Back => {
            eps.almost_eq(other.max_y, u.min_y)
                && eps.ranges_overlap(u.min_x, u.max_x, other.min_x, other.max_x)
        }
    }
}

/// Cull `stack` with the default culler.
///
/// Pass [`Protection::for_stack`] for the standard policy:
///
/// ```
/// # use pallet_stack::{compute_visibility, Protection, Stack};
/// let stack = Stack::default();
/// let protection = Protection::for_stack(&stack);
/// let vis = compute_visibility(&stack, |l| protection.is_protected(l));
/// assert_eq!(vis.culled_count(), 0);
/// ```
pub fn compute_visibility(stack: &Stack, is_protected: impl Fn(usize) -> bool) -> Visibility {
    Culler::new().compute(stack, is_protected)
}
