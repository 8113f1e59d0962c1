// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack visibility from a parameter file.
//!
//! Load pattern arrays and build counters from JSON, assemble the stack, cull interior
//! units, and print the scene plan.
//!
//! Run:
//! - `cargo run -p pallet_demos --example stack_visibility`
//! - `cargo run -p pallet_demos --example stack_visibility -- path/to/stack.json`
//! - `RUST_LOG=debug cargo run -p pallet_demos --example stack_visibility` for per-layer counts.

use pallet_stack::{PatternData, StackParams, visualize};
use serde::Deserialize;

#[derive(Deserialize)]
struct StackFile {
    params: StackParams,
    pattern: PatternData,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => include_str!("../data/stack.json").to_owned(),
    };
    let file: StackFile = serde_json::from_str(&text)?;
    let source = file.pattern.source()?;

    let Some(view) = visualize(&file.params, &source) else {
        // The reason was logged.
        std::process::exit(1);
    };

    for (layer, row) in view.stack.layers.iter().zip(&view.visibility.layers) {
        let marks: String = row.iter().map(|v| if v.culled { '.' } else { '#' }).collect();
        println!(
            "layer {:>2}{}: {marks}",
            layer.index,
            if layer.partial { " (partial)" } else { "" }
        );
    }
    for u in &view.scene.units {
        println!(
            "case {:>2} layer {} at ({:>6.2}, {:>6.2}, {:>6.2}) yaw {:+.3}",
            u.case, u.layer, u.center.x, u.elevation, u.center.y, u.yaw
        );
    }
    for s in &view.scene.sheets {
        println!("sheet at y = {:.2}", s.elevation);
    }
    Ok(())
}
