// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans.
//!
//! A pallet layer holds at most a few dozen units, so a scan over a dense vector is
//! usually the fastest option and keeps slot order, which makes results reproducible.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Flat vector backend with linear scans.
#[derive(Clone)]
pub struct FlatVec<T: Copy + PartialOrd + Debug> {
    boxes: Vec<Aabb2D<T>>,
}

impl<T: Copy + PartialOrd + Debug> Default for FlatVec<T> {
    fn default() -> Self {
        Self { boxes: Vec::new() }
    }
}

impl<T: Copy + PartialOrd + Debug> Debug for FlatVec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("slots", &self.boxes.len())
            .finish_non_exhaustive()
    }
}

impl<T: Copy + PartialOrd + Debug> Backend<T> for FlatVec<T> {
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>) {
        if slot < self.boxes.len() {
            self.boxes[slot] = aabb;
        } else {
            debug_assert_eq!(slot, self.boxes.len(), "slots are dense");
            self.boxes.push(aabb);
        }
    }

    fn clear(&mut self) {
        self.boxes.clear();
    }

    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(
            self.boxes
                .iter()
                .enumerate()
                .filter(move |(_, a)| a.touches(&rect))
                .map(|(i, _)| i),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_keeps_slot_order() {
        let mut f = FlatVec::default();
        f.insert(0, Aabb2D::from_xywh(10.0, 0.0, 10.0, 10.0));
        f.insert(1, Aabb2D::from_xywh(30.0, 0.0, 10.0, 10.0));
        f.insert(2, Aabb2D::from_xywh(0.0, 0.0, 10.0, 10.0));
        let hits: Vec<_> = f.query_rect(Aabb2D::from_xywh(0.0, 0.0, 10.0, 10.0)).collect();
        assert_eq!(hits, [0, 2]);
        f.clear();
        assert_eq!(f.query_rect(Aabb2D::from_xywh(0.0, 0.0, 10.0, 10.0)).count(), 0);
    }
}
