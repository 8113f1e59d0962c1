// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drop handler: boundary clamp, then optional snap, as a list of writes.

use alloc::vec::Vec;

use kurbo::Point;

use crate::clamp::{Limits, moved};
use crate::error::LayoutError;
use crate::pattern::{CustomPattern, PatternView};
use crate::snap::nearest_flush;

/// Adjuster settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AdjusterConfig {
    /// Pallet boundary limits; `None` when not configured.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub limits: Option<Limits>,
    /// `PixelScaling`: editor pixels per physical unit.
    #[cfg_attr(feature = "serde", serde(rename = "PixelScaling"))]
    pub pixel_scaling: f32,
}

impl AdjusterConfig {
    /// Pixels per physical unit when `PixelScaling` is not configured.
    pub const DEFAULT_PIXEL_SCALING: f32 = 12.0;
}

impl Default for AdjusterConfig {
    fn default() -> Self {
        Self {
            limits: None,
            pixel_scaling: Self::DEFAULT_PIXEL_SCALING,
        }
    }
}

/// One pending write to the pattern.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Write {
    /// `LeftMargin[index] = value`.
    LeftMargin {
        /// 1-based case index.
        index: usize,
        /// New value in pixels.
        value: f32,
    },
    /// `TopMargin[index] = value`.
    TopMargin {
        /// 1-based case index.
        index: usize,
        /// New value in pixels.
        value: f32,
    },
    /// `XHold = value`, physical units.
    XHold(f32),
    /// `YHold = value`, physical units.
    YHold(f32),
}

impl Write {
    fn same_target(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::LeftMargin { index: a, .. }, Self::LeftMargin { index: b, .. })
            | (Self::TopMargin { index: a, .. }, Self::TopMargin { index: b, .. }) => a == b,
            (Self::XHold(_), Self::XHold(_)) | (Self::YHold(_), Self::YHold(_)) => true,
            _ => false,
        }
    }
}

/// An ordered set of writes; a later write to the same target replaces the earlier one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Adjustment {
    writes: Vec<Write>,
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Pattern arrays store single-precision pixels."
)]
fn narrow(v: f64) -> f32 {
    v as f32
}

impl Adjustment {
    /// Record a write, replacing any earlier write to the same target in place.
    pub fn push(&mut self, w: Write) {
        match self.writes.iter_mut().find(|e| e.same_target(&w)) {
            Some(e) => *e = w,
            None => self.writes.push(w),
        }
    }

    /// True if nothing is to be written.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// The writes in order.
    pub fn writes(&self) -> &[Write] {
        &self.writes
    }

    /// The new `(left, top)` of case `index`, if both margins are written.
    pub fn position_of(&self, index: usize) -> Option<Point> {
        let mut left = None;
        let mut top = None;
        for w in &self.writes {
            match *w {
                Write::LeftMargin { index: i, value } if i == index => left = Some(value),
                Write::TopMargin { index: i, value } if i == index => top = Some(value),
                _ => {}
            }
        }
        Some(Point::new(f64::from(left?), f64::from(top?)))
    }

    /// Write a position and, when `px > 0`, the matching hold values.
    fn set_position(&mut self, index: usize, p: Point, px: f64) {
        self.push(Write::LeftMargin {
            index,
            value: narrow(p.x),
        });
        self.push(Write::TopMargin {
            index,
            value: narrow(p.y),
        });
        if px > 0.0 {
            self.push(Write::XHold(narrow(p.y / px)));
            self.push(Write::YHold(narrow(p.x / px)));
        }
    }

    /// Apply every write to `pattern`. Writes past the end of an array are dropped.
    pub fn apply_to(&self, pattern: &mut CustomPattern) {
        for w in &self.writes {
            match *w {
                Write::LeftMargin { index, value } => {
                    if let Some(slot) = pattern.left_margin.get_mut(index) {
                        *slot = value;
                    }
                }
                Write::TopMargin { index, value } => {
                    if let Some(slot) = pattern.top_margin.get_mut(index) {
                        *slot = value;
                    }
                }
                Write::XHold(v) => pattern.x_hold = v,
                Write::YHold(v) => pattern.y_hold = v,
            }
        }
    }
}

/// Boundary clamp and snap for the selected case of a custom pattern.
///
/// Every operation reads an immutable [`PatternView`] and returns an [`Adjustment`]; nothing
/// is written until the caller applies it. An out-of-range `CaseSelected` yields an empty
/// adjustment without logging.
///
/// ```
/// use pallet_layout::{Adjuster, AdjusterConfig, CustomPattern, Limits};
///
/// let mut pattern = CustomPattern::with_capacity(4, 10.0, 6.0);
/// pattern.left_margin[1] = -30.0;
/// let adjuster = Adjuster::new(AdjusterConfig {
///     limits: Some(Limits { x_neg: 0.0, x_pos: 40.0, y_neg: 0.0, y_pos: 48.0 }),
///     ..AdjusterConfig::default()
/// });
/// adjuster.on_drop(&pattern.view()).apply_to(&mut pattern);
/// assert_eq!(pattern.left_margin[1], 0.0);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Adjuster {
    config: AdjusterConfig,
}

impl Adjuster {
    /// Adjuster with the given settings.
    pub fn new(config: AdjusterConfig) -> Self {
        Self { config }
    }

    /// The settings.
    pub fn config(&self) -> &AdjusterConfig {
        &self.config
    }

    fn px(&self) -> f64 {
        f64::from(self.config.pixel_scaling)
    }

    /// Clamp origin `from` of case `i`. `Ok(None)` when nothing moves.
    fn clamp_from(
        &self,
        view: &PatternView<'_>,
        i: usize,
        from: Point,
    ) -> Result<Option<Point>, LayoutError> {
        let limits = self.config.limits.ok_or(LayoutError::MissingLimits)?;
        let px = self.px();
        if px <= 0.0 {
            return Ok(None);
        }
        let bounds = limits.to_pixels(px);
        let to = bounds.clamp(from);
        if !moved(from, to) {
            return Ok(None);
        }
        let ext = view.extent(i);
        log::info!(
            "case {i} clamped from ({:.0}, {:.0}) to ({:.0}, {:.0})",
            from.x,
            from.y,
            to.x,
            to.y
        );
        log::debug!(
            "clamp px limits left [{:.0}, {:.0}] top [{:.0}, {:.0}], extent {:.0} x {:.0}",
            bounds.left.0,
            bounds.left.1,
            bounds.top.0,
            bounds.top.1,
            ext.width,
            ext.height
        );
        Ok(Some(to))
    }

    /// Boundary clamp of the selected case.
    ///
    /// Writes only when the case moves by more than [`MOVE_EPSILON`](crate::clamp::MOVE_EPSILON)
    /// on either axis; missing limits are logged and write nothing.
    pub fn boundary_clamp(&self, view: &PatternView<'_>) -> Adjustment {
        let mut adj = Adjustment::default();
        let Some(i) = view.selected() else {
            return adj;
        };
        match self.clamp_from(view, i, view.position(i)) {
            Ok(Some(p)) => adj.set_position(i, p, self.px()),
            Ok(None) => {}
            Err(e) => log::warn!("boundary clamp skipped: {e}"),
        }
        adj
    }

    /// Snap the selected case flush against its nearest neighbor, then clamp the result.
    ///
    /// Needs at least two cases. Snap mode is not consulted; see [`Adjuster::on_drop`].
    pub fn snap(&self, view: &PatternView<'_>) -> Adjustment {
        let mut adj = Adjustment::default();
        if let Some(i) = view.selected() {
            let mut logged = false;
            self.snap_from(view, i, view.position(i), &mut adj, &mut logged);
        }
        adj
    }

    /// Handle a drop of the selected case: clamp, then snap and clamp again in snap mode.
    pub fn on_drop(&self, view: &PatternView<'_>) -> Adjustment {
        let mut adj = Adjustment::default();
        let Some(i) = view.selected() else {
            log::debug!("drop ignored: CaseSelected = {}", view.case_selected);
            return adj;
        };
        let mut logged = false;
        let mut pos = view.position(i);
        if let Some(p) = self.clamp_logged(view, i, pos, &mut logged) {
            adj.set_position(i, p, self.px());
            pos = p;
        }
        if !view.snap_mode {
            return adj;
        }
        self.snap_from(view, i, pos, &mut adj, &mut logged);
        adj
    }

    fn snap_from(
        &self,
        view: &PatternView<'_>,
        i: usize,
        from: Point,
        adj: &mut Adjustment,
        logged: &mut bool,
    ) {
        if view.num_cases() < 2 {
            return;
        }
        let Some(to) = nearest_flush(view, i, from) else {
            return;
        };
        adj.set_position(i, to, self.px());
        log::info!("case {i} snapped to ({:.1}, {:.1})", to.x, to.y);
        if let Some(p) = self.clamp_logged(view, i, to, logged) {
            adj.set_position(i, p, self.px());
        }
    }

    /// Clamp, logging a configuration error only once per operation.
    fn clamp_logged(
        &self,
        view: &PatternView<'_>,
        i: usize,
        from: Point,
        logged: &mut bool,
    ) -> Option<Point> {
        match self.clamp_from(view, i, from) {
            Ok(p) => p,
            Err(e) => {
                if !*logged {
                    log::warn!("boundary clamp skipped: {e}");
                    *logged = true;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> Limits {
        Limits {
            x_neg: 0.0,
            x_pos: 10.0,
            y_neg: 0.0,
            y_pos: 20.0,
        }
    }

    fn adjuster() -> Adjuster {
        Adjuster::new(AdjusterConfig {
            limits: Some(limits()),
            pixel_scaling: 12.0,
        })
    }

    /// Case 1 at `(left, top)`, case 2 a 10 x 6 anchor at (100, 100).
    fn pattern(left: f32, top: f32) -> CustomPattern {
        let mut p = CustomPattern::with_capacity(4, 10.0, 6.0);
        p.num_cases = 2;
        p.width[2] = 10.0;
        p.height[2] = 6.0;
        p.left_margin[2] = 100.0;
        p.top_margin[2] = 100.0;
        p.left_margin[1] = left;
        p.top_margin[1] = top;
        p
    }

    #[test]
    fn clamp_writes_position_and_holds() {
        let p = pattern(-12.0, 150.0);
        let adj = adjuster().boundary_clamp(&p.view());
        assert_eq!(
            adj.writes(),
            [
                Write::LeftMargin {
                    index: 1,
                    value: 0.0
                },
                Write::TopMargin {
                    index: 1,
                    value: 120.0
                },
                Write::XHold(10.0),
                Write::YHold(0.0),
            ]
        );
    }

    #[test]
    fn clamp_inside_bounds_writes_nothing() {
        let p = pattern(50.0, 50.0);
        assert!(adjuster().boundary_clamp(&p.view()).is_empty());
    }

    #[test]
    fn clamp_twice_is_clamp_once() {
        let mut p = pattern(500.0, -7.0);
        let a = adjuster();
        a.boundary_clamp(&p.view()).apply_to(&mut p);
        let once = p.clone();
        assert!(a.boundary_clamp(&p.view()).is_empty());
        a.boundary_clamp(&p.view()).apply_to(&mut p);
        assert_eq!(p, once);
    }

    #[test]
    fn missing_limits_or_scale_write_nothing() {
        let p = pattern(-50.0, -50.0);
        let a = Adjuster::new(AdjusterConfig::default());
        assert!(a.boundary_clamp(&p.view()).is_empty());
        let zero = Adjuster::new(AdjusterConfig {
            limits: Some(limits()),
            pixel_scaling: 0.0,
        });
        assert!(zero.boundary_clamp(&p.view()).is_empty());
    }

    #[test]
    fn out_of_range_selection_is_a_noop() {
        let wide = Adjuster::new(AdjusterConfig {
            limits: Some(limits()),
            pixel_scaling: 12.0,
        });
        for sel in [0, 3, -1] {
            let mut p = pattern(-50.0, 500.0);
            p.snap_mode = true;
            p.case_selected = sel;
            let before = p.clone();
            wide.boundary_clamp(&p.view()).apply_to(&mut p);
            wide.snap(&p.view()).apply_to(&mut p);
            wide.on_drop(&p.view()).apply_to(&mut p);
            assert_eq!(p, before, "CaseSelected = {sel}");
        }
    }

    #[test]
    fn drop_without_snap_mode_only_clamps() {
        let p = pattern(-5.0, 60.0);
        let adj = adjuster().on_drop(&p.view());
        assert_eq!(adj.position_of(1), Some(Point::new(0.0, 60.0)));
    }

    #[test]
    fn drop_in_snap_mode_snaps_then_clamps() {
        let mut p = pattern(112.0, 101.0);
        p.snap_mode = true;
        let a = Adjuster::new(AdjusterConfig {
            limits: Some(Limits {
                x_neg: 0.0,
                x_pos: 100.0,
                y_neg: 0.0,
                y_pos: 9.0,
            }),
            pixel_scaling: 12.0,
        });
        // Snap to (110, 100), then the left limit of 108 px pulls it back.
        let adj = a.on_drop(&p.view());
        assert_eq!(adj.position_of(1), Some(Point::new(108.0, 100.0)));
        assert_eq!(adj.writes().len(), 4);
        adj.apply_to(&mut p);
        assert_eq!(p.y_hold, 9.0);
        assert_eq!(p.x_hold, 100.0 / 12.0_f32);
    }

    #[test]
    fn snap_without_limits_still_snaps() {
        let mut p = pattern(88.0, 99.0);
        p.snap_mode = true;
        let a = Adjuster::new(AdjusterConfig::default());
        let adj = a.on_drop(&p.view());
        assert_eq!(adj.position_of(1), Some(Point::new(90.0, 100.0)));
    }

    #[test]
    fn snap_needs_two_cases() {
        let mut p = pattern(88.0, 99.0);
        p.num_cases = 1;
        p.snap_mode = true;
        assert!(adjuster().snap(&p.view()).is_empty());
    }

    #[test]
    fn later_writes_replace_earlier_ones() {
        let mut adj = Adjustment::default();
        adj.push(Write::XHold(1.0));
        adj.push(Write::LeftMargin { index: 1, value: 2.0 });
        adj.push(Write::LeftMargin { index: 2, value: 3.0 });
        adj.push(Write::XHold(4.0));
        assert_eq!(
            adj.writes(),
            [
                Write::XHold(4.0),
                Write::LeftMargin { index: 1, value: 2.0 },
                Write::LeftMargin { index: 2, value: 3.0 },
            ]
        );
    }
}
