// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Custom pattern arrays: an owned store and the read-only view the adjuster works on.
//!
//! All arrays are 1-based; case `n` lives at index `n` and index `0` is unused. Positions
//! are editor pixels: `LeftMargin` runs along the layer Y axis and `TopMargin` along X.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

/// Read-only snapshot of a custom pattern at call time.
///
/// Elements past the end of an array read as `0.0` (or `false`).
#[derive(Copy, Clone, Debug)]
pub struct PatternView<'a> {
    /// `LeftMargin`.
    pub left: &'a [f32],
    /// `TopMargin`.
    pub top: &'a [f32],
    /// `WidthArray`.
    pub width: &'a [f32],
    /// `HeightArray`.
    pub height: &'a [f32],
    /// `Rot90`.
    pub rot90: &'a [bool],
    /// `NumCasesCustom`.
    pub num_cases: i32,
    /// `CaseSelected`.
    pub case_selected: i32,
    /// `SnapMode`.
    pub snap_mode: bool,
}

fn read(arr: &[f32], i: usize) -> f32 {
    arr.get(i).copied().unwrap_or(0.0)
}

impl PatternView<'_> {
    /// Number of cases, negative counts read as zero.
    pub fn num_cases(&self) -> usize {
        usize::try_from(self.num_cases).unwrap_or(0)
    }

    /// The selected case when it lies in `1..=num_cases`.
    pub fn selected(&self) -> Option<usize> {
        usize::try_from(self.case_selected)
            .ok()
            .filter(|i| (1..=self.num_cases()).contains(i))
    }

    /// Position of case `i` as `(left, top)`.
    pub fn position(&self, i: usize) -> Point {
        Point::new(f64::from(read(self.left, i)), f64::from(read(self.top, i)))
    }

    /// Raw `(width, height)` of case `i`, ignoring rotation.
    pub fn raw_size(&self, i: usize) -> Size {
        Size::new(f64::from(read(self.width, i)), f64::from(read(self.height, i)))
    }

    /// True if case `i` is turned a quarter turn.
    pub fn is_rotated(&self, i: usize) -> bool {
        self.rot90.get(i).copied().unwrap_or(false)
    }

    /// On-screen extent of case `i`: width and height swap when rotated.
    pub fn extent(&self, i: usize) -> Size {
        let s = self.raw_size(i);
        if self.is_rotated(i) {
            Size::new(s.height, s.width)
        } else {
            s
        }
    }

    /// On-screen rectangle of case `i`.
    pub fn case_rect(&self, i: usize) -> Rect {
        Rect::from_origin_size(self.position(i), self.extent(i))
    }
}

/// Owned custom pattern, as stored by the host.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct CustomPattern {
    /// `LeftMargin`.
    pub left_margin: Vec<f32>,
    /// `TopMargin`.
    pub top_margin: Vec<f32>,
    /// `WidthArray`.
    #[cfg_attr(feature = "serde", serde(rename = "WidthArray"))]
    pub width: Vec<f32>,
    /// `HeightArray`.
    #[cfg_attr(feature = "serde", serde(rename = "HeightArray"))]
    pub height: Vec<f32>,
    /// `Rot90`.
    pub rot90: Vec<bool>,
    /// `NumCasesCustom`.
    #[cfg_attr(feature = "serde", serde(rename = "NumCasesCustom"))]
    pub num_cases: i32,
    /// `CaseSelected`.
    pub case_selected: i32,
    /// `SnapMode`.
    pub snap_mode: bool,
    /// `Width`: width given to new cases.
    #[cfg_attr(feature = "serde", serde(rename = "Width"))]
    pub default_width: f32,
    /// `Height`: height given to new cases.
    #[cfg_attr(feature = "serde", serde(rename = "Height"))]
    pub default_height: f32,
    /// `XHold`: selected case `TopMargin` in physical units.
    #[cfg_attr(feature = "serde", serde(rename = "XHold"))]
    pub x_hold: f32,
    /// `YHold`: selected case `LeftMargin` in physical units.
    #[cfg_attr(feature = "serde", serde(rename = "YHold"))]
    pub y_hold: f32,
}

impl Default for CustomPattern {
    fn default() -> Self {
        Self {
            left_margin: Vec::new(),
            top_margin: Vec::new(),
            width: Vec::new(),
            height: Vec::new(),
            rot90: Vec::new(),
            num_cases: 1,
            case_selected: 1,
            snap_mode: false,
            default_width: 0.0,
            default_height: 0.0,
            x_hold: 0.0,
            y_hold: 0.0,
        }
    }
}

impl CustomPattern {
    /// A pattern with room for `capacity` cases (plus the sentinel), holding one case.
    pub fn with_capacity(capacity: usize, default_width: f32, default_height: f32) -> Self {
        let n = capacity + 1;
        let mut width = alloc::vec![0.0; n];
        let mut height = alloc::vec![0.0; n];
        if n > 1 {
            width[1] = default_width;
            height[1] = default_height;
        }
        Self {
            left_margin: alloc::vec![0.0; n],
            top_margin: alloc::vec![0.0; n],
            width,
            height,
            rot90: alloc::vec![false; n],
            default_width,
            default_height,
            ..Self::default()
        }
    }

    /// Borrow a snapshot for the adjuster.
    pub fn view(&self) -> PatternView<'_> {
        PatternView {
            left: &self.left_margin,
            top: &self.top_margin,
            width: &self.width,
            height: &self.height,
            rot90: &self.rot90,
            num_cases: self.num_cases,
            case_selected: self.case_selected,
            snap_mode: self.snap_mode,
        }
    }
}
