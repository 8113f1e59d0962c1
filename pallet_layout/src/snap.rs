// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flush snapping against the other cases of the pattern.

use kurbo::{Point, Vec2};

use crate::pattern::PatternView;

/// Positions placing case `i` flush against case `j`: right of, below, left of, above.
///
/// The moving case's own extent honors its rotation; `j` contributes its raw width and
/// height whatever its rotation.
pub fn flush_candidates(view: &PatternView<'_>, i: usize, j: usize) -> [Point; 4] {
    let jp = view.position(j);
    let js = view.raw_size(j);
    let mine = view.extent(i);
    [
        jp + Vec2::new(js.width, 0.0),
        jp + Vec2::new(0.0, js.height),
        jp - Vec2::new(mine.width, 0.0),
        jp - Vec2::new(0.0, mine.height),
    ]
}

/// The candidate nearest to `from` over every other case.
///
/// Candidates are visited case by case in index order, four per case; the first strict
/// minimum wins. Returns `None` when there is no other case.
pub fn nearest_flush(view: &PatternView<'_>, i: usize, from: Point) -> Option<Point> {
    let mut best: Option<(f64, Point)> = None;
    for j in (1..=view.num_cases()).filter(|&j| j != i) {
        for c in flush_candidates(view, i, j) {
            let d = (from - c).hypot2();
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, c));
            }
        }
    }
    best.map(|(_, p)| p)
}
