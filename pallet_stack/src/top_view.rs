// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-down layer view: canvas, pallet deck, unit rectangles, build status, and label marks.
//!
//! Canvas X is layer Y and canvas Y is layer X, so a pattern reads the same way it is
//! stacked when viewed from the operator side. The pallet sits inside overhang margins.

use alloc::vec::Vec;

use kurbo::{Line, Point, Rect, Size};

use crate::footprint::ProductDims;
use crate::pattern::PatternArrays;

/// Half the mark stroke plus a small margin.
const MARK_INSET: f64 = 0.4 / 2.0 + 0.1;

/// Highest `Rot180` index consulted.
const ROT180_SLOTS: usize = 64;

/// Canvas geometry around the pallet.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct Canvas {
    /// Pallet `Width`, along canvas X.
    pub pallet_width: f64,
    /// Pallet `Length`, along canvas Y.
    pub pallet_length: f64,
    /// `MaxOverhangWidth`.
    #[cfg_attr(feature = "serde", serde(rename = "MaxOverhangWidth"))]
    pub overhang_width: f64,
    /// `MaxOverhangLength`.
    #[cfg_attr(feature = "serde", serde(rename = "MaxOverhangLength"))]
    pub overhang_length: f64,
}

impl Canvas {
    /// Canvas size including both overhang margins.
    pub fn size(&self) -> Size {
        Size::new(
            self.pallet_width + 2.0 * self.overhang_width,
            self.pallet_length + 2.0 * self.overhang_length,
        )
    }

    /// The pallet deck, offset by the overhang margins.
    pub fn pallet_rect(&self) -> Rect {
        Rect::from_origin_size(
            Point::new(self.overhang_width, self.overhang_length),
            Size::new(self.pallet_width, self.pallet_length),
        )
    }

    /// Five deck slats, evenly spaced along the pallet length.
    pub fn slats(&self) -> [Rect; 5] {
        let h = self.pallet_length / 12.0;
        let spacing = self.pallet_length / 6.0;
        core::array::from_fn(|i| {
            let y = self.overhang_length + (i + 1) as f64 * spacing - h / 2.0;
            Rect::from_origin_size(
                Point::new(self.overhang_width, y),
                Size::new(self.pallet_width, h),
            )
        })
    }

    /// Canvas rectangle of a unit at layer position `(x, y)`.
    ///
    /// Only an exact `90.0` swaps the sides here; the 3D footprint truncates to whole degrees.
    pub fn unit_rect(&self, x: f64, y: f64, r: f32, dims: &ProductDims) -> Rect {
        let size = if r == 90.0 {
            Size::new(dims.length(), dims.width())
        } else {
            Size::new(dims.width(), dims.length())
        };
        Rect::from_origin_size(
            Point::new(y + self.overhang_width, x + self.overhang_length),
            size,
        )
    }

    /// Layer Y mirrored across the canvas for mirrored patterns.
    ///
    /// Units turned 90° or 270° span their length along canvas X.
    pub fn mirror_y(&self, y: f64, r: f32, dims: &ProductDims) -> f64 {
        let unit_len = if r == 90.0 || r == 270.0 {
            dims.length()
        } else {
            dims.width()
        };
        let margin = if self.overhang_width > 0.0 {
            2.0 * self.overhang_width
        } else {
            0.0
        };
        let v = self.size().width - y - unit_len - margin;
        if v < 0.0 { -v } else { v }
    }
}

/// Whether a case is already on the pallet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuildStatus {
    /// Placed by the robot.
    Placed,
    /// Not placed yet.
    Pending,
}

/// Build status of `case` from its position in the placement sequence.
///
/// A case absent from the sequence reports [`BuildStatus::Placed`].
pub fn build_status(seq: &[i32], case: usize, units_done: i32) -> BuildStatus {
    let position = seq
        .iter()
        .skip(1)
        .position(|&v| usize::try_from(v).is_ok_and(|v| v == case));
    match position {
        Some(p) if i64::try_from(p + 1).unwrap_or(i64::MAX) > i64::from(units_done) => {
            BuildStatus::Pending
        }
        _ => BuildStatus::Placed,
    }
}

bitflags::bitflags! {
    /// `LabelOrient`: the case side carrying the label. Bit 0 is unused.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LabelSide: u32 {
        /// Bottom edge.
        const BOTTOM = 2;
        /// Top edge.
        const TOP    = 4;
        /// Left edge.
        const LEFT   = 8;
        /// Right edge.
        const RIGHT  = 16;
    }
}

impl LabelSide {
    /// Read a raw host value, ignoring unknown bits.
    pub fn from_raw(raw: i32) -> Self {
        Self::from_bits_truncate(raw.cast_unsigned())
    }

    /// The first set side, in bottom, top, left, right order.
    pub fn base(self) -> Option<Self> {
        [Self::BOTTOM, Self::TOP, Self::LEFT, Self::RIGHT]
            .into_iter()
            .find(|s| self.contains(*s))
    }

    /// One step clockwise: bottom to left, top to right, left to top, right to bottom.
    #[must_use]
    pub fn turned_clockwise(self) -> Self {
        match self {
            Self::BOTTOM => Self::LEFT,
            Self::TOP => Self::RIGHT,
            Self::LEFT => Self::TOP,
            Self::RIGHT => Self::BOTTOM,
            other => other,
        }
    }

    /// The opposite side.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::BOTTOM => Self::TOP,
            Self::TOP => Self::BOTTOM,
            Self::LEFT => Self::RIGHT,
            Self::RIGHT => Self::LEFT,
            other => other,
        }
    }
}

/// Label inputs: `LabelOrient`, `Rot180`, and the flipped sequence that indexes `Rot180`.
#[derive(Copy, Clone, Debug)]
pub struct Labels<'a> {
    /// `LabelOrient`.
    pub orient: LabelSide,
    /// `Rot180`, 1-based.
    pub rot180: &'a [bool],
    /// `SeqF_UnitNum`; `Rot180[k]` applies to case `SeqF_UnitNum[k]`.
    pub seq_flipped: &'a [i32],
}

impl Labels<'_> {
    /// The side marked on `case`, or `None` when no label side is configured.
    pub fn side_for(&self, case: usize, rotation: f32) -> Option<LabelSide> {
        let mut side = self.orient.base()?;
        if rotation != 0.0 {
            side = side.turned_clockwise();
        }
        let slot = (1..self.seq_flipped.len().min(ROT180_SLOTS + 1))
            .find(|&k| usize::try_from(self.seq_flipped[k]).is_ok_and(|v| v == case));
        if slot.is_some_and(|k| self.rot180.get(k).copied().unwrap_or(false)) {
            side = side.flipped();
        }
        Some(side)
    }
}

/// The label mark for `side` of `rect`: a line half the short side long, centered on
/// that edge and inset by half the stroke plus a margin.
pub fn label_mark(rect: Rect, side: LabelSide) -> Option<Line> {
    let (w, h) = (rect.width(), rect.height());
    let len = w.min(h) / 2.0;
    let i = MARK_INSET;
    let across_x = (rect.x0 + (w - len) / 2.0 + i, rect.x0 + (w + len) / 2.0 - i);
    let across_y = (rect.y0 + (h - len) / 2.0 + i, rect.y0 + (h + len) / 2.0 - i);
    let line = match side {
        LabelSide::BOTTOM => {
            let y = rect.y1 - i;
            Line::new((across_x.0, y), (across_x.1, y))
        }
        LabelSide::TOP => {
            let y = rect.y0 + i;
            Line::new((across_x.0, y), (across_x.1, y))
        }
        LabelSide::LEFT => {
            let x = rect.x0 + i;
            Line::new((x, across_y.0), (x, across_y.1))
        }
        LabelSide::RIGHT => {
            let x = rect.x1 - i;
            Line::new((x, across_y.0), (x, across_y.1))
        }
        _ => return None,
    };
    Some(line)
}

/// One unit as drawn in the top view.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TopViewUnit {
    /// 1-based case id.
    pub case: usize,
    /// Canvas rectangle.
    pub rect: Rect,
    /// Build status.
    pub status: BuildStatus,
    /// Label mark, when labels are configured.
    pub mark: Option<Line>,
}

/// Builder for the units of one layer in the top view.
#[derive(Copy, Clone, Debug)]
pub struct TopView<'a> {
    canvas: Canvas,
    dims: ProductDims,
    arrays: PatternArrays<'a>,
    count: usize,
    mirror: bool,
    progress: Option<(&'a [i32], i32)>,
    labels: Option<Labels<'a>>,
}

impl<'a> TopView<'a> {
    /// Draw cases `1..=count` of `arrays`.
    pub fn new(canvas: Canvas, dims: ProductDims, arrays: PatternArrays<'a>, count: usize) -> Self {
        Self {
            canvas,
            dims,
            arrays,
            count,
            mirror: false,
            progress: None,
            labels: None,
        }
    }

    /// Mirror layer Y across the canvas.
    #[must_use]
    pub fn mirrored(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// Report build status from the placement sequence and `UnitsDone`.
    #[must_use]
    pub fn with_progress(mut self, seq: &'a [i32], units_done: i32) -> Self {
        self.progress = Some((seq, units_done));
        self
    }

    /// Draw label marks.
    #[must_use]
    pub fn with_labels(mut self, labels: Labels<'a>) -> Self {
        self.labels = Some(labels);
        self
    }

    /// The canvas.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Units in case order. Cases missing from the arrays are skipped.
    pub fn units(&self) -> Vec<TopViewUnit> {
        (1..=self.count)
            .filter_map(|case| {
                let (x, y, r) = self.arrays.placement(case)?;
                let (x, mut y) = (f64::from(x), f64::from(y));
                if self.mirror {
                    y = self.canvas.mirror_y(y, r, &self.dims);
                }
                let rect = self.canvas.unit_rect(x, y, r, &self.dims);
                let status = self
                    .progress
                    .map_or(BuildStatus::Placed, |(seq, done)| build_status(seq, case, done));
                let mark = self
                    .labels
                    .and_then(|l| l.side_for(case, r))
                    .and_then(|side| label_mark(rect, side));
                Some(TopViewUnit {
                    case,
                    rect,
                    status,
                    mark,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas {
            pallet_width: 40.0,
            pallet_length: 48.0,
            overhang_width: 2.0,
            overhang_length: 3.0,
        }
    }

    fn dims() -> ProductDims {
        ProductDims::new(12.0, 8.0, 6.0).unwrap()
    }

    #[test]
    fn canvas_adds_margins() {
        let c = canvas();
        assert_eq!(c.size(), Size::new(44.0, 54.0));
        assert_eq!(c.pallet_rect(), Rect::new(2.0, 3.0, 42.0, 51.0));
        let slats = c.slats();
        assert_eq!(slats[0], Rect::new(2.0, 3.0 + 8.0 - 2.0, 42.0, 3.0 + 8.0 + 2.0));
        assert_eq!(slats[4].y0, 3.0 + 40.0 - 2.0);
    }

    #[test]
    fn unit_rect_swaps_axes() {
        let c = canvas();
        let flat = c.unit_rect(10.0, 4.0, 0.0, &dims());
        assert_eq!(flat, Rect::new(6.0, 13.0, 14.0, 25.0));
        let turned = c.unit_rect(10.0, 4.0, 90.0, &dims());
        assert_eq!(turned.size(), Size::new(12.0, 8.0));
        // Fractional degrees never count as a quarter turn on the canvas.
        assert_eq!(c.unit_rect(10.0, 4.0, 90.5, &dims()).size(), Size::new(8.0, 12.0));
        assert_eq!(c.unit_rect(10.0, 4.0, 89.9, &dims()).size(), Size::new(8.0, 12.0));
    }

    #[test]
    fn mirror_accounts_for_rotation_and_overhang() {
        let c = canvas();
        // 44 - 4 - 8 - 4
        assert_eq!(c.mirror_y(4.0, 0.0, &dims()), 28.0);
        // 44 - 4 - 12 - 4
        assert_eq!(c.mirror_y(4.0, 270.0, &dims()), 24.0);
        let tight = Canvas {
            overhang_width: 0.0,
            ..canvas()
        };
        assert_eq!(tight.mirror_y(36.0, 0.0, &dims()), 4.0);
        assert_eq!(tight.mirror_y(40.0, 0.0, &dims()), 8.0);
        assert_eq!(c.mirror_y(4.0, 270.5, &dims()), 28.0);
    }

    #[test]
    fn status_follows_sequence_position() {
        let seq = [0, 3, 1, 2];
        assert_eq!(build_status(&seq, 3, 1), BuildStatus::Placed);
        assert_eq!(build_status(&seq, 1, 1), BuildStatus::Pending);
        assert_eq!(build_status(&seq, 2, 3), BuildStatus::Placed);
        assert_eq!(build_status(&seq, 9, 0), BuildStatus::Placed);
    }

    #[test]
    fn label_side_rotation_rules() {
        let labels = Labels {
            orient: LabelSide::from_raw(4 | 16),
            rot180: &[false, true],
            seq_flipped: &[0, 5, 6],
        };
        assert_eq!(labels.side_for(1, 0.0), Some(LabelSide::TOP));
        assert_eq!(labels.side_for(1, 90.0), Some(LabelSide::RIGHT));
        assert_eq!(labels.side_for(5, 0.0), Some(LabelSide::BOTTOM));
        assert_eq!(labels.side_for(5, 90.0), Some(LabelSide::LEFT));
        // Rot180[2] is out of range.
        assert_eq!(labels.side_for(6, 0.0), Some(LabelSide::TOP));
        let none = Labels {
            orient: LabelSide::from_raw(1),
            ..labels
        };
        assert_eq!(none.side_for(1, 0.0), None);
    }

    #[test]
    fn mark_is_centered_and_inset() {
        let r = Rect::new(0.0, 0.0, 8.0, 12.0);
        let bottom = label_mark(r, LabelSide::BOTTOM).unwrap();
        assert_eq!(bottom.p0, Point::new(2.0 + MARK_INSET, 12.0 - MARK_INSET));
        assert_eq!(bottom.p1, Point::new(6.0 - MARK_INSET, 12.0 - MARK_INSET));
        let left = label_mark(r, LabelSide::LEFT).unwrap();
        assert_eq!(left.p0.x, MARK_INSET);
        assert_eq!(left.p0.y, 4.0 + MARK_INSET);
        assert!(label_mark(r, LabelSide::empty()).is_none());
    }

    #[test]
    fn top_view_units() {
        let x = [0.0_f32, 0.0, 0.0];
        let y = [0.0_f32, 0.0, 8.0];
        let r = [0.0_f32, 0.0, 0.0];
        let seq = [0, 2, 1];
        let units = TopView::new(canvas(), dims(), PatternArrays::new(&x, &y, &r), 3)
            .with_progress(&seq, 1)
            .units();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].status, BuildStatus::Pending);
        assert_eq!(units[1].status, BuildStatus::Placed);
        assert_eq!(units[1].rect.x0, 10.0);
        assert!(units[0].mark.is_none());
    }
}
