// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Index` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::flatvec::FlatVec;
use crate::backends::grid::GridF64;
use crate::types::Aabb2D;

/// A generic AABB index parameterized by a spatial backend.
///
/// The index is append-only: it is rebuilt from pattern arrays for every layer, so
/// entries are never moved or removed once inserted.
#[derive(Clone, Debug)]
pub struct IndexGeneric<T: Copy + PartialOrd + Debug, P: Copy + Debug, B: Backend<T>> {
    entries: Vec<(Aabb2D<T>, P)>,
    backend: B,
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T> + Default,
{
    /// Create an empty index using the backend's default constructor.
    pub fn new() -> Self {
        Self::with_backend(B::default())
    }
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T>,
{
    /// Create an empty index over an explicit backend instance.
    ///
    /// The backend is cleared first, so a configured prototype can be cloned per layer.
    pub fn with_backend(mut backend: B) -> Self {
        backend.clear();
        Self {
            entries: Vec::new(),
            backend,
        }
    }

    /// Reserve space for at least `n` entries.
    pub fn reserve(&mut self, n: usize) {
        self.entries.reserve(n);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an AABB with payload.
    pub fn insert(&mut self, aabb: Aabb2D<T>, payload: P) {
        self.backend.insert(self.entries.len(), aabb);
        self.entries.push((aabb, payload));
    }

    /// Query for entries whose AABB touches the given rectangle.
    pub fn query_rect(&self, rect: Aabb2D<T>) -> impl Iterator<Item = (Aabb2D<T>, P)> + '_ {
        self.backend
            .query_rect(rect)
            .filter_map(|i| self.entries.get(i).copied())
    }
}

/// Default index using a flat vector backend.
pub type Index<T, P> = IndexGeneric<T, P, FlatVec<T>>;

impl<T: Copy + PartialOrd + Debug, P: Copy + Debug> Default for Index<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Copy + Debug> Index<f64, P> {
    /// Create a grid-backed index with the given cell size and origin offset.
    pub fn with_uniform_grid(
        cell_w: f64,
        cell_h: f64,
        origin_x: f64,
        origin_y: f64,
    ) -> IndexGeneric<f64, P, GridF64> {
        IndexGeneric::with_backend(GridF64::new(cell_w, cell_h, origin_x, origin_y))
    }
}
