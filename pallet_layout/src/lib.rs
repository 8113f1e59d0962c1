// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pallet Layout: editing support for operator-defined pallet patterns.
//!
//! A custom pattern is a set of cases dragged around a pallet image. When the operator drops
//! a case this crate decides where it ends up:
//!
//! - [`Adjuster::boundary_clamp`]: keep the case origin inside the configured pallet limits.
//! - [`Adjuster::snap`]: move the case flush against the nearest side of another case.
//! - [`Adjuster::on_drop`]: clamp, then (in snap mode) snap and clamp again.
//!
//! Operations read a [`PatternView`] snapshot and return an [`Adjustment`] listing the
//! writes; nothing is mutated until the caller applies it. [`CustomPattern`] is an owned
//! store the adjustment can be applied to, with case add and remove.
//!
//! ## Conventions
//!
//! - Arrays are 1-based; index `0` is unused.
//! - `LeftMargin` and `TopMargin` are editor pixels; limits and hold values are physical
//!   units, converted by `PixelScaling` (12 pixels per unit when not configured).
//! - An out-of-range `CaseSelected` is a quiet no-op; missing limits are logged once.
//!
//! ## Example
//!
//! ```rust
//! use pallet_layout::{Adjuster, AdjusterConfig, CustomPattern};
//!
//! let mut pattern = CustomPattern::with_capacity(62, 10.0, 6.0);
//! pattern.add_case().unwrap();
//! pattern.left_margin[2] = 13.0;
//! pattern.top_margin[2] = 1.0;
//! pattern.snap_mode = true;
//!
//! // Case 2 snaps flush to the right of case 1.
//! Adjuster::new(AdjusterConfig::default())
//!     .on_drop(&pattern.view())
//!     .apply_to(&mut pattern);
//! assert_eq!((pattern.left_margin[2], pattern.top_margin[2]), (10.0, 0.0));
//! ```

#![no_std]

extern crate alloc;

pub mod adjust;
pub mod cases;
pub mod clamp;
pub mod error;
pub mod pattern;
pub mod snap;

pub use adjust::{Adjuster, AdjusterConfig, Adjustment, Write};
pub use cases::{MAX_CASES, MIN_CASES};
pub use clamp::{Limits, PixelBounds};
pub use error::{LayoutError, PatternArray};
pub use pattern::{CustomPattern, PatternView};
pub use snap::{flush_candidates, nearest_flush};
