// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple, slot-ordered).
//! - `grid`: uniform grid for `f64` layer coordinates, origin offset for overhang.

pub mod flatvec;
pub mod grid;

pub use flatvec::FlatVec;
pub use grid::GridF64;
