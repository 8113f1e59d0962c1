// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use pallet_index::{Aabb2D, Index};
use pallet_stack::{
    BuildState, Culler, PatternArrays, PatternSource, ProductDims, Protection, Stack,
};

/// Row-major `side x side` layer of `cell`-sized cases, 1-based with sentinel.
fn gen_grid_pattern(side: usize, cell: f32) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
    let mut x = vec![0.0];
    let mut y = vec![0.0];
    for row in 0..side {
        for col in 0..side {
            x.push(col as f32 * cell);
            y.push(row as f32 * cell);
        }
    }
    let r = vec![0.0; x.len()];
    (x, y, r)
}

fn build_stack(side: usize, layers: i32) -> Stack {
    let (x, y, r) = gen_grid_pattern(side, 12.0);
    let source = PatternSource::new(PatternArrays::new(&x, &y, &r));
    let dims = ProductDims::new(12.0, 12.0, 8.0).unwrap();
    let state = BuildState {
        num_per_layer: (side * side) as i32,
        layers_completed: layers,
        ..BuildState::default()
    };
    Stack::assemble(&source, &dims, &state).unwrap()
}

fn bench_cull(c: &mut Criterion) {
    let mut group = c.benchmark_group("cull");
    // 8x8 is past the documented per-layer maximum; it shows where the grid starts to pay.
    for &(side, layers) in &[(3usize, 6i32), (6, 12), (8, 24)] {
        let stack = build_stack(side, layers);
        let protection = Protection::for_stack(&stack);
        group.throughput(Throughput::Elements(stack.unit_count() as u64));
        group.bench_function(format!("flatvec_{side}x{side}_l{layers}"), |b| {
            let culler = Culler::new();
            b.iter(|| {
                let vis = culler.compute(black_box(&stack), |l| protection.is_protected(l));
                black_box(vis.culled_count())
            });
        });
        group.bench_function(format!("grid_{side}x{side}_l{layers}"), |b| {
            let culler = Culler::with_grid(12.0, 12.0, -12.0, -12.0);
            b.iter(|| {
                let vis = culler.compute(black_box(&stack), |l| protection.is_protected(l));
                black_box(vis.culled_count())
            });
        });
    }
    group.finish();
}

fn bench_neighbor_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbor_query");
    let (x, y, _) = gen_grid_pattern(8, 12.0);
    let boxes: Vec<_> = x
        .iter()
        .zip(&y)
        .skip(1)
        .map(|(&x, &y)| Aabb2D::from_xywh(f64::from(x), f64::from(y), 12.0, 12.0))
        .collect();
    let mut flat: Index<f64, usize> = Index::new();
    let mut grid = Index::<f64, usize>::with_uniform_grid(12.0, 12.0, -12.0, -12.0);
    for (i, a) in boxes.iter().enumerate() {
        flat.insert(*a, i);
        grid.insert(*a, i);
    }
    group.bench_function("flatvec_8x8", |b| {
        b.iter(|| {
            let hits: usize = boxes
                .iter()
                .map(|a| flat.query_rect(a.inflate(0.01)).count())
                .sum();
            black_box(hits)
        });
    });
    group.bench_function("grid_8x8", |b| {
        b.iter(|| {
            let hits: usize = boxes
                .iter()
                .map(|a| grid.query_rect(a.inflate(0.01)).count())
                .sum();
            black_box(hits)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_cull, bench_neighbor_query);
criterion_main!(benches);
