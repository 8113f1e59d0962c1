// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top view as SVG.
//!
//! Lay out the top layer of the stack in `data/stack.json` on a canvas with overhang margins
//! and print a minimal SVG: deck, slats, cases colored by build status, label marks.
//!
//! Run:
//! - `cargo run -p pallet_demos --example top_view_svg > layer.svg`

use std::fmt::Write as _;

use kurbo::Rect;
use pallet_stack::top_view::{BuildStatus, Canvas, LabelSide, Labels, TopView};
use pallet_stack::{PatternData, StackParams};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ViewParams {
    #[serde(flatten)]
    canvas: Canvas,
    label_orient: i32,
    rot180: Vec<bool>,
    mirror: bool,
}

#[derive(Deserialize)]
struct StackFile {
    params: StackParams,
    pattern: PatternData,
    view: ViewParams,
}

fn rect(svg: &mut String, r: Rect, fill: &str) {
    let _ = writeln!(
        svg,
        concat!(
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{fill}""#,
            r#" stroke="black" stroke-width="0.1"/>"#
        ),
        r.x0,
        r.y0,
        r.width(),
        r.height(),
        fill = fill
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let file: StackFile = serde_json::from_str(include_str!("../data/stack.json"))?;
    let dims = file.params.dims()?;
    let source = file.pattern.source()?;
    let build = file.params.build;
    let count = source.usable_count(build.num_per_layer)?;

    // The layer in progress, or the last completed one.
    let top = build.total_layers().saturating_sub(1);
    let flipped = build.layer_flip.layer(top) && source.flipped.is_some();
    let seq = source.sequence(flipped).unwrap_or(&[]);
    let seq_flipped = source.seq_flipped.unwrap_or(&[]);

    let view = TopView::new(file.view.canvas, dims, *source.arrays(flipped), count)
        .mirrored(file.view.mirror)
        .with_progress(seq, build.units_done)
        .with_labels(Labels {
            orient: LabelSide::from_raw(file.view.label_orient),
            rot180: &file.view.rot180,
            seq_flipped,
        });

    let size = view.canvas().size();
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg""#,
            r#" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#
        ),
        w = size.width,
        h = size.height
    );
    rect(&mut svg, view.canvas().pallet_rect(), "#d2a679");
    for slat in view.canvas().slats() {
        rect(&mut svg, slat, "#b07535");
    }
    for u in view.units() {
        let fill = match u.status {
            BuildStatus::Placed => "#8B4513",
            BuildStatus::Pending => "#959494",
        };
        rect(&mut svg, u.rect, fill);
        if let Some(m) = u.mark {
            let _ = writeln!(
                svg,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="white" stroke-width="0.4"/>"#,
                m.p0.x, m.p0.y, m.p1.x, m.p1.y
            );
        }
    }
    svg.push_str("</svg>\n");
    print!("{svg}");
    Ok(())
}
