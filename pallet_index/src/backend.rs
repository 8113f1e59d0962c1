// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial candidate search.

use alloc::boxed::Box;

use crate::types::Aabb2D;
use core::fmt::Debug;

/// Spatial backend abstraction used by [`IndexGeneric`](crate::IndexGeneric).
///
/// Slots are dense and append-only: the index hands out `0, 1, 2, …` and never
/// moves or removes one. Backends return *candidates*: every slot whose box touches
/// the query must be reported, false positives are allowed.
pub trait Backend<T: Copy + PartialOrd + Debug> {
    /// Record the AABB of a new slot.
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>);

    /// Forget every slot.
    fn clear(&mut self);

    /// Query slots whose AABB touches the rectangle (shared edges included).
    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a>;
}
