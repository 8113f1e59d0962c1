// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary limits and origin clamping.

use kurbo::Point;

/// Movement below this many pixels on both axes is not written back.
pub const MOVE_EPSILON: f64 = 0.001;

/// Pallet boundary limits in physical units.
///
/// X limits bound `TopMargin`, Y limits bound `LeftMargin`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    /// `XLimitNeg`.
    #[cfg_attr(feature = "serde", serde(rename = "XLimitNeg"))]
    pub x_neg: f32,
    /// `XLimitPos`.
    #[cfg_attr(feature = "serde", serde(rename = "XLimitPos"))]
    pub x_pos: f32,
    /// `YLimitNeg`.
    #[cfg_attr(feature = "serde", serde(rename = "YLimitNeg"))]
    pub y_neg: f32,
    /// `YLimitPos`.
    #[cfg_attr(feature = "serde", serde(rename = "YLimitPos"))]
    pub y_pos: f32,
}

/// Limits converted to editor pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelBounds {
    /// `LeftMargin` range.
    pub left: (f64, f64),
    /// `TopMargin` range.
    pub top: (f64, f64),
}

impl Limits {
    /// Scale to pixels.
    pub fn to_pixels(&self, px: f64) -> PixelBounds {
        PixelBounds {
            left: (f64::from(self.y_neg) * px, f64::from(self.y_pos) * px),
            top: (f64::from(self.x_neg) * px, f64::from(self.x_pos) * px),
        }
    }
}

fn clamp_axis(v: f64, (min, max): (f64, f64)) -> f64 {
    min.max(max.min(v))
}

impl PixelBounds {
    /// Clamp an origin `(left, top)` into the bounds, each axis on its own.
    ///
    /// Only the origin corner is bounded; the case extent may reach past the positive limits.
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(clamp_axis(p.x, self.left), clamp_axis(p.y, self.top))
    }
}

/// True if `to` differs from `from` by more than [`MOVE_EPSILON`] on either axis.
pub fn moved(from: Point, to: Point) -> bool {
    let d = to - from;
    d.x > MOVE_EPSILON || d.x < -MOVE_EPSILON || d.y > MOVE_EPSILON || d.y < -MOVE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> PixelBounds {
        Limits {
            x_neg: -1.0,
            x_pos: 40.0,
            y_neg: 0.0,
            y_pos: 48.0,
        }
        .to_pixels(12.0)
    }

    #[test]
    fn clamps_each_axis_independently() {
        let b = bounds();
        assert_eq!(b.clamp(Point::new(-5.0, 100.0)), Point::new(0.0, 100.0));
        assert_eq!(b.clamp(Point::new(700.0, -30.0)), Point::new(576.0, -12.0));
        assert_eq!(b.clamp(Point::new(20.0, 30.0)), Point::new(20.0, 30.0));
    }

    #[test]
    fn clamp_is_idempotent() {
        let b = bounds();
        for p in [
            Point::new(-1e6, 1e6),
            Point::new(575.9, 480.1),
            Point::new(3.25, -12.0),
            Point::new(0.0, 0.0),
        ] {
            let once = b.clamp(p);
            assert_eq!(b.clamp(once), once, "clamp of {p:?}");
        }
    }

    #[test]
    fn tiny_moves_are_ignored() {
        let p = Point::new(10.0, 10.0);
        assert!(!moved(p, Point::new(10.0005, 9.9995)));
        assert!(moved(p, Point::new(10.002, 10.0)));
    }
}
