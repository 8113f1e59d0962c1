// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend for `f64` layer coordinates.

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb2D;

type CellKey = (i64, i64);

/// Uniform grid backend.
///
/// Maps each AABB to the cells it covers and answers queries from the union of the
/// covered cells. A cell size close to the product footprint keeps every unit in at
/// most four cells. Negative coordinates (overhang) are handled through `origin`.
#[derive(Clone)]
pub struct GridF64 {
    cell_w: f64,
    cell_h: f64,
    origin_x: f64,
    origin_y: f64,
    boxes: Vec<Aabb2D<f64>>,
    cells: BTreeMap<CellKey, Vec<usize>>,
}

impl GridF64 {
    /// Create a grid backend with the given cell size and origin offset.
    ///
    /// Non-positive cell sizes are replaced by `1.0`.
    pub fn new(cell_w: f64, cell_h: f64, origin_x: f64, origin_y: f64) -> Self {
        Self {
            cell_w: if cell_w > 0.0 { cell_w } else { 1.0 },
            cell_h: if cell_h > 0.0 { cell_h } else { 1.0 },
            origin_x,
            origin_y,
            boxes: Vec::new(),
            cells: BTreeMap::new(),
        }
    }

    #[inline]
    fn floor_to_i64(v: f64) -> i64 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Cell indices are bounded by pallet dimensions over cell size."
        )]
        let i = v as i64;
        if (i as f64) > v { i - 1 } else { i }
    }

    fn key_for(&self, x: f64, y: f64) -> CellKey {
        let cx = Self::floor_to_i64((x - self.origin_x) / self.cell_w);
        let cy = Self::floor_to_i64((y - self.origin_y) / self.cell_h);
        (cx, cy)
    }

    fn cells_for_aabb(&self, a: &Aabb2D<f64>) -> impl Iterator<Item = CellKey> + use<> {
        let (minx, miny) = self.key_for(a.min_x, a.min_y);
        let (maxx, maxy) = self.key_for(a.max_x, a.max_y);
        (miny..=maxy).flat_map(move |y| (minx..=maxx).map(move |x| (x, y)))
    }

    fn link(&mut self, slot: usize, aabb: &Aabb2D<f64>) {
        for key in self.cells_for_aabb(aabb) {
            self.cells.entry(key).or_default().push(slot);
        }
    }

    fn collect(&self, keys: impl Iterator<Item = CellKey>) -> BTreeSet<usize> {
        let mut set = BTreeSet::new();
        for key in keys {
            if let Some(slots) = self.cells.get(&key) {
                set.extend(slots.iter().copied());
            }
        }
        set
    }
}

impl Backend<f64> for GridF64 {
    fn insert(&mut self, slot: usize, aabb: Aabb2D<f64>) {
        debug_assert_eq!(slot, self.boxes.len(), "slots are dense and append-only");
        self.boxes.push(aabb);
        self.link(slot, &aabb);
    }

    fn clear(&mut self) {
        self.boxes.clear();
        self.cells.clear();
    }

    fn query_rect<'a>(&'a self, rect: Aabb2D<f64>) -> Box<dyn Iterator<Item = usize> + 'a> {
        let set = self.collect(self.cells_for_aabb(&rect));
        Box::new(
            set.into_iter()
                .filter(move |&s| self.boxes.get(s).is_some_and(|a| a.touches(&rect))),
        )
    }
}

impl Debug for GridF64 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridF64")
            .field("cell_w", &self.cell_w)
            .field("cell_h", &self.cell_h)
            .field("origin_x", &self.origin_x)
            .field("origin_y", &self.origin_y)
            .field("slots", &self.boxes.len())
            .field("cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}
