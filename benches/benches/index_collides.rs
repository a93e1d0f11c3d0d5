// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_label_index::{Aabb2D, CollisionIndex, FlatVec, GridF64, RStarIndex};

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
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Label-sized boxes scattered over a 1920x1080 screen.
fn gen_labels(count: usize, seed: u64) -> Vec<Aabb2D<f64>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let w = 30.0 + rng.next_f64() * 60.0;
            let h = 12.0 + rng.next_f64() * 6.0;
            let x = rng.next_f64() * (1920.0 - w);
            let y = rng.next_f64() * (1080.0 - h);
            Aabb2D::from_xywh(x, y, w, h)
        })
        .collect()
}

/// Greedy placement: test each label and insert it if free.
fn place<I: CollisionIndex<f64>>(idx: &mut I, labels: &[Aabb2D<f64>]) -> usize {
    let mut placed = 0;
    for b in labels {
        if !idx.collides(b) {
            idx.insert(*b);
            placed += 1;
        }
    }
    placed
}

fn bench_greedy_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_placement");
    for &n in &[256usize, 1024, 4096] {
        let labels = gen_labels(n, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("flatvec_n{}", n), |b| {
            b.iter_batched(
                FlatVec::<f64>::new,
                |mut idx| black_box(place(&mut idx, &labels)),
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("grid64_n{}", n), |b| {
            b.iter_batched(
                || GridF64::new(64.0, 32.0, 0.0, 0.0),
                |mut idx| black_box(place(&mut idx, &labels)),
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_n{}", n), |b| {
            b.iter_batched(
                RStarIndex::new,
                |mut idx| black_box(place(&mut idx, &labels)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_greedy_placement);
criterion_main!(benches);
