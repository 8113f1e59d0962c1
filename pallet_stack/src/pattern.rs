// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Borrowed views over the host's 1-based pattern arrays.
//!
//! Every array reserves index `0`; placement `n` lives at index `n`. The views never copy.

use crate::error::{ArrayName, StackError};

/// One placement triple set: `UnitX`, `UnitY`, `UnitR` (or the flipped `UnitF*` arrays).
#[derive(Copy, Clone, Debug)]
pub struct PatternArrays<'a> {
    /// Top-left X per placement.
    pub x: &'a [f32],
    /// Top-left Y per placement.
    pub y: &'a [f32],
    /// Rotation in degrees per placement.
    pub r: &'a [f32],
}

impl<'a> PatternArrays<'a> {
    /// Wrap three 1-based arrays.
    pub const fn new(x: &'a [f32], y: &'a [f32], r: &'a [f32]) -> Self {
        Self { x, y, r }
    }

    /// Placements available past the sentinel, limited by the shortest array.
    pub fn available(&self) -> usize {
        self.x
            .len()
            .min(self.y.len())
            .min(self.r.len())
            .saturating_sub(1)
    }

    /// The `(x, y, r)` triple for 1-based placement `n`.
    pub fn placement(&self, n: usize) -> Option<(f32, f32, f32)> {
        if n == 0 {
            return None;
        }
        Some((*self.x.get(n)?, *self.y.get(n)?, *self.r.get(n)?))
    }

    fn check_covers(&self, usable: usize, names: [ArrayName; 3]) -> Result<(), StackError> {
        let needed = usable + 1;
        for (arr, array) in [self.x, self.y, self.r].into_iter().zip(names) {
            if arr.len() < needed {
                return Err(StackError::ShortArray {
                    array,
                    len: arr.len(),
                    needed,
                });
            }
        }
        Ok(())
    }
}

/// Everything the stack reads from the pattern: normal and flipped placements plus the
/// placement-order sequences `Seq_UnitNum` / `SeqF_UnitNum`.
#[derive(Copy, Clone, Debug)]
pub struct PatternSource<'a> {
    /// `UnitX` / `UnitY` / `UnitR`.
    pub normal: PatternArrays<'a>,
    /// `UnitFX` / `UnitFY` / `UnitFR`, when the pattern has a flipped variant.
    pub flipped: Option<PatternArrays<'a>>,
    /// `Seq_UnitNum`: 1-based placement order to physical case id.
    pub seq: Option<&'a [i32]>,
    /// `SeqF_UnitNum`: the same for flipped layers.
    pub seq_flipped: Option<&'a [i32]>,
}

impl<'a> PatternSource<'a> {
    /// A source with only the normal placement arrays.
    pub const fn new(normal: PatternArrays<'a>) -> Self {
        Self {
            normal,
            flipped: None,
            seq: None,
            seq_flipped: None,
        }
    }

    /// Attach flipped placement arrays.
    #[must_use]
    pub const fn with_flipped(mut self, flipped: PatternArrays<'a>) -> Self {
        self.flipped = Some(flipped);
        self
    }

    /// Attach the placement sequences.
    #[must_use]
    pub const fn with_sequences(
        mut self,
        seq: Option<&'a [i32]>,
        seq_flipped: Option<&'a [i32]>,
    ) -> Self {
        self.seq = seq;
        self.seq_flipped = seq_flipped;
        self
    }

    /// Placements per layer: `NumPerLayer` limited by the shortest normal array.
    ///
    /// A present flipped triple must cover the same count.
    pub fn usable_count(&self, num_per_layer: i32) -> Result<usize, StackError> {
        let available = self.normal.available();
        let requested = usize::try_from(num_per_layer).unwrap_or(0);
        let usable = requested.min(available);
        if usable == 0 {
            return Err(StackError::NoPlacements {
                num_per_layer,
                available,
            });
        }
        if let Some(f) = &self.flipped {
            f.check_covers(usable, [ArrayName::UnitFx, ArrayName::UnitFy, ArrayName::UnitFr])?;
        }
        Ok(usable)
    }

    /// Placement arrays for a layer; flipped only when requested and present.
    pub fn arrays(&self, flipped: bool) -> &PatternArrays<'a> {
        match (&self.flipped, flipped) {
            (Some(f), true) => f,
            _ => &self.normal,
        }
    }

    /// Active sequence for a layer, falling back to the other sequence when absent.
    pub fn sequence(&self, flipped: bool) -> Option<&'a [i32]> {
        if flipped {
            self.seq_flipped.or(self.seq)
        } else {
            self.seq.or(self.seq_flipped)
        }
    }
}

/// Physical case id for 0-based placement `i` within a layer of `usable` placements.
///
/// The sequence entry at `i + 1` wins when it names a valid case; otherwise placement order
/// is the case order.
pub fn case_for(seq: Option<&[i32]>, i: usize, usable: usize) -> usize {
    seq.and_then(|s| s.get(i + 1))
        .and_then(|&v| usize::try_from(v).ok())
        .filter(|v| (1..=usable).contains(v))
        .unwrap_or(i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: [f32; 4] = [0.0, 0.0, 12.0, 24.0];
    const Y: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
    const R: [f32; 3] = [0.0, 0.0, 90.0];

    #[test]
    fn usable_count_takes_shortest_array() {
        let src = PatternSource::new(PatternArrays::new(&X, &Y, &R));
        assert_eq!(src.usable_count(10), Ok(2));
        assert_eq!(src.usable_count(1), Ok(1));
        assert!(matches!(
            src.usable_count(0),
            Err(StackError::NoPlacements { .. })
        ));
        assert!(src.usable_count(-3).is_err());
    }

    #[test]
    fn empty_arrays_have_no_placements() {
        let src = PatternSource::new(PatternArrays::new(&[], &[], &[]));
        assert!(matches!(
            src.usable_count(4),
            Err(StackError::NoPlacements { available: 0, .. })
        ));
    }

    #[test]
    fn short_flipped_array_is_reported() {
        let short = [0.0_f32, 1.0];
        let src = PatternSource::new(PatternArrays::new(&X, &Y, &R))
            .with_flipped(PatternArrays::new(&X, &short, &R));
        assert_eq!(
            src.usable_count(2),
            Err(StackError::ShortArray {
                array: ArrayName::UnitFy,
                len: 2,
                needed: 3,
            })
        );
    }

    #[test]
    fn sequence_falls_back_to_other_variant() {
        let seq = [0, 2, 1];
        let src =
            PatternSource::new(PatternArrays::new(&X, &Y, &R)).with_sequences(Some(&seq), None);
        assert_eq!(src.sequence(true), Some(&seq[..]));
        assert_eq!(src.sequence(false), Some(&seq[..]));
    }

    #[test]
    fn case_ids_ignore_out_of_range_entries() {
        let seq = [0, 3, 9, -1];
        assert_eq!(case_for(Some(&seq), 0, 3), 3);
        assert_eq!(case_for(Some(&seq), 1, 3), 2);
        assert_eq!(case_for(Some(&seq), 2, 3), 3);
        assert_eq!(case_for(Some(&seq), 5, 8), 6);
        assert_eq!(case_for(None, 0, 3), 1);
    }
}
