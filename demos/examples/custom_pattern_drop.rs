// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Custom pattern drop handling.
//!
//! Load a custom pattern and adjuster settings from JSON, drop the selected case, and apply
//! the resulting writes. Then add a case and drop it far outside the pallet.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p pallet_demos --example custom_pattern_drop`

use pallet_layout::{Adjuster, AdjusterConfig, CustomPattern};
use serde::Deserialize;

#[derive(Deserialize)]
struct PatternFile {
    pattern: CustomPattern,
    adjuster: AdjusterConfig,
}

fn show(p: &CustomPattern) {
    let n = usize::try_from(p.num_cases).unwrap_or(0);
    for i in 1..=n {
        println!(
            "  case {i}: left {:>6.1} top {:>6.1}{}",
            p.left_margin[i],
            p.top_margin[i],
            if i32::try_from(i).is_ok_and(|i| i == p.case_selected) { " *" } else { "" }
        );
    }
    println!("  hold: x {:.2} y {:.2}", p.x_hold, p.y_hold);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let file: PatternFile = serde_json::from_str(include_str!("../data/custom_pattern.json"))?;
    let mut pattern = file.pattern;
    let adjuster = Adjuster::new(file.adjuster);
    println!("before:");
    show(&pattern);

    let adj = adjuster.on_drop(&pattern.view());
    println!("writes: {:?}", adj.writes());
    adj.apply_to(&mut pattern);
    println!("after drop:");
    show(&pattern);

    if let Some(n) = pattern.add_case()? {
        pattern.left_margin[n] = 9_000.0;
        pattern.top_margin[n] = -500.0;
        adjuster.on_drop(&pattern.view()).apply_to(&mut pattern);
        println!("after adding case {n} and dropping it off the pallet:");
        show(&pattern);
    }

    pattern.remove_case();
    pattern.normalize_selection();
    println!("after removing the last case:");
    show(&pattern);
    Ok(())
}
