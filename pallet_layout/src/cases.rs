// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adding and removing cases of a custom pattern.

use crate::error::{LayoutError, PatternArray};
use crate::pattern::CustomPattern;

/// Most cases a custom pattern can hold.
pub const MAX_CASES: i32 = 62;

/// Fewest cases a custom pattern can hold.
pub const MIN_CASES: i32 = 1;

fn check_len(array: PatternArray, len: usize, needed: usize) -> Result<(), LayoutError> {
    if len < needed {
        Err(LayoutError::ShortArray { array, len, needed })
    } else {
        Ok(())
    }
}

impl CustomPattern {
    /// Append a case and select it.
    ///
    /// The new case takes the default size and copies position and rotation from case 1.
    /// Returns the new case index, or `None` when the pattern is full (or its count is
    /// negative). Every array is checked before anything is written.
    pub fn add_case(&mut self) -> Result<Option<usize>, LayoutError> {
        if self.num_cases < 0 || self.num_cases >= MAX_CASES {
            return Ok(None);
        }
        let n = usize::try_from(self.num_cases).unwrap_or(0) + 1;
        let needed = n + 1;
        check_len(PatternArray::Width, self.width.len(), needed)?;
        check_len(PatternArray::Height, self.height.len(), needed)?;
        check_len(PatternArray::TopMargin, self.top_margin.len(), needed)?;
        check_len(PatternArray::LeftMargin, self.left_margin.len(), needed)?;
        check_len(PatternArray::Rot90, self.rot90.len(), needed)?;

        self.width[n] = self.default_width;
        self.height[n] = self.default_height;
        if n != 1 {
            self.top_margin[n] = self.top_margin[1];
            self.left_margin[n] = self.left_margin[1];
            self.rot90[n] = self.rot90[1];
        }
        self.num_cases += 1;
        self.case_selected = self.num_cases;
        log::info!("added case {n}");
        Ok(Some(n))
    }

    /// Drop the last case and select the new last one. Returns the new count, or `None`
    /// when only one case is left.
    pub fn remove_case(&mut self) -> Option<usize> {
        if self.num_cases <= MIN_CASES {
            return None;
        }
        self.num_cases -= 1;
        self.case_selected = self.num_cases;
        log::info!("removed case {}", self.num_cases + 1);
        usize::try_from(self.num_cases).ok()
    }

    /// Keep the selection if it names a case, otherwise select case 1.
    ///
    /// Counts outside `1..=62` are left alone.
    pub fn normalize_selection(&mut self) {
        if !(MIN_CASES..=MAX_CASES).contains(&self.num_cases) {
            return;
        }
        if !(1..=self.num_cases).contains(&self.case_selected) {
            self.case_selected = 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_copies_first_case_and_selects() {
        let mut p = CustomPattern::with_capacity(62, 10.0, 6.0);
        p.top_margin[1] = 12.0;
        p.left_margin[1] = 24.0;
        p.rot90[1] = true;
        p.default_width = 11.0;
        assert_eq!(p.add_case(), Ok(Some(2)));
        assert_eq!(p.num_cases, 2);
        assert_eq!(p.case_selected, 2);
        assert_eq!((p.width[2], p.height[2]), (11.0, 6.0));
        assert_eq!((p.top_margin[2], p.left_margin[2]), (12.0, 24.0));
        assert!(p.rot90[2]);
    }

    #[test]
    fn add_stops_at_capacity() {
        let mut p = CustomPattern::with_capacity(62, 10.0, 6.0);
        p.num_cases = MAX_CASES;
        assert_eq!(p.add_case(), Ok(None));
        assert_eq!(p.num_cases, MAX_CASES);
    }

    #[test]
    fn add_with_short_arrays_changes_nothing() {
        let mut p = CustomPattern::with_capacity(2, 10.0, 6.0);
        p.num_cases = 2;
        p.rot90.truncate(2);
        let before = p.clone();
        assert_eq!(
            p.add_case(),
            Err(LayoutError::ShortArray {
                array: PatternArray::Width,
                len: 3,
                needed: 4,
            })
        );
        assert_eq!(p, before);
    }

    #[test]
    fn remove_keeps_one_case() {
        let mut p = CustomPattern::with_capacity(4, 10.0, 6.0);
        p.num_cases = 2;
        p.case_selected = 1;
        assert_eq!(p.remove_case(), Some(1));
        assert_eq!(p.case_selected, 1);
        assert_eq!(p.remove_case(), None);
        assert_eq!(p.num_cases, 1);
    }

    #[test]
    fn selection_is_normalized() {
        let mut p = CustomPattern::with_capacity(4, 10.0, 6.0);
        p.num_cases = 3;
        p.case_selected = 2;
        p.normalize_selection();
        assert_eq!(p.case_selected, 2);
        p.case_selected = 7;
        p.normalize_selection();
        assert_eq!(p.case_selected, 1);
        p.num_cases = 0;
        p.case_selected = 9;
        p.normalize_selection();
        assert_eq!(p.case_selected, 9);
    }
}
