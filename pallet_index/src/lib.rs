// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pallet Index: 2D AABB primitives and a small footprint index.
//!
//! This crate is the geometric floor of the pallet stack crates.
//!
//! - [`Aabb2D`] boxes with inclusive-edge contact tests.
//! - [`Tolerance`] predicates used for face contact (`almost_eq`) and overlap (`ranges_overlap`).
//! - [`Index`]: an append-only set of boxes with payloads, queried by rectangle.
//!
//! Queries return candidates whose box *touches* the query, shared edges included, which is
//! what neighbor searches between flush-packed units need. Exact tolerance predicates are then
//! applied by the caller.
//!
//! # Example
//!
//! ```rust
//! use pallet_index::{Aabb2D, Index, Tolerance};
//!
//! // Two cases side by side on a layer.
//! let mut idx: Index<f64, u16> = Index::new();
//! let a = Aabb2D::from_xywh(0.0, 0.0, 12.0, 8.0);
//! let b = Aabb2D::from_xywh(12.0, 0.0, 12.0, 8.0);
//! idx.insert(a, 1);
//! idx.insert(b, 2);
//!
//! // Candidates touching case 1, grown by the tolerance.
//! let eps = Tolerance::DEFAULT;
//! let touching: Vec<_> = idx
//!     .query_rect(a.inflate(eps.get()))
//!     .filter(|(_, case)| *case != 1)
//!     .filter(|(other, _)| eps.almost_eq(other.min_x, a.max_x))
//!     .collect();
//! assert_eq!(touching.len(), 1);
//! ```
//!
//! ## Choosing a backend
//!
//! - `FlatVec` (default): linear scans in slot order. Best for layers of a few dozen units.
//! - `GridF64`: uniform grid; pick a cell close to the product footprint. Use `origin`
//!   offsets to cover overhang (negative) coordinates.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod index;
pub mod types;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::grid::GridF64;
pub use index::{Index, IndexGeneric};
pub use types::{Aabb2D, Tolerance};
