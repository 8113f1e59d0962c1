// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pallet_layout::{Adjuster, AdjusterConfig, CustomPattern, Limits, MAX_CASES};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f32(&mut self) -> f32 {
        let v = self.next_u64() >> 40;
        (v as f32) / ((1u64 << 24) as f32)
    }
}

fn gen_pattern(cases: i32) -> CustomPattern {
    let mut p = CustomPattern::with_capacity(MAX_CASES as usize, 120.0, 96.0);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    p.num_cases = cases;
    p.case_selected = 1;
    p.snap_mode = true;
    for i in 1..=cases as usize {
        p.width[i] = 120.0;
        p.height[i] = 96.0;
        p.left_margin[i] = rng.next_f32() * 480.0;
        p.top_margin[i] = rng.next_f32() * 576.0;
        p.rot90[i] = rng.next_u64() & 1 == 1;
    }
    p
}

fn bench_snap(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap");
    let adjuster = Adjuster::new(AdjusterConfig {
        limits: Some(Limits {
            x_neg: -2.0,
            x_pos: 50.0,
            y_neg: -2.0,
            y_pos: 42.0,
        }),
        pixel_scaling: 12.0,
    });
    for &n in &[2i32, 16, MAX_CASES] {
        let pattern = gen_pattern(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("on_drop_n{n}"), |b| {
            b.iter(|| black_box(adjuster.on_drop(black_box(&pattern.view()))));
        });
        group.bench_function(format!("on_drop_apply_n{n}"), |b| {
            b.iter_batched(
                || pattern.clone(),
                |mut p| {
                    adjuster.on_drop(&p.view()).apply_to(&mut p);
                    black_box(p.left_margin[1])
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_snap);
criterion_main!(benches);
