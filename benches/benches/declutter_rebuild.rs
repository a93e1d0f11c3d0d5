// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashSet;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_declutter::{CollisionLayer, CollisionOptions, OverlayLayer};
use understory_label_index::{CollisionIndex, GridF64, RStarIndex};

/// Markers on a jittered lattice. Rescaling moves label origins the way a zoom
/// does, while label sizes stay fixed in screen pixels.
struct Lattice {
    labels: Vec<Rect>,
    shown: HashSet<usize>,
}

impl Lattice {
    fn new(side: usize) -> Self {
        let mut labels = Vec::with_capacity(side * side);
        for y in 0..side {
            for x in 0..side {
                let jitter = ((x * 7 + y * 13) % 11) as f64;
                let x0 = x as f64 * 40.0 + jitter;
                let y0 = y as f64 * 20.0 + jitter * 0.5;
                labels.push(Rect::new(x0, y0, x0 + 48.0, y0 + 14.0));
            }
        }
        Self {
            labels,
            shown: HashSet::new(),
        }
    }

    fn rescale(&mut self, scale: f64) {
        for r in &mut self.labels {
            let (w, h) = (r.width(), r.height());
            let (x0, y0) = (r.x0 * scale, r.y0 * scale);
            *r = Rect::new(x0, y0, x0 + w, y0 + h);
        }
    }
}

impl OverlayLayer for Lattice {
    type Overlay = usize;
    fn add(&mut self, m: usize) {
        self.shown.insert(m);
    }
    fn remove(&mut self, m: usize) {
        self.shown.remove(&m);
    }
    fn clear(&mut self) {
        self.shown.clear();
    }
    fn contains(&self, m: usize) -> bool {
        self.shown.contains(&m)
    }
    fn has_label(&self, _m: usize) -> bool {
        true
    }
    fn label_rect(&self, m: usize) -> Option<Rect> {
        self.labels.get(m).copied()
    }
}

fn zoom_cycle<I: CollisionIndex<f64>>(layer: &mut CollisionLayer<Lattice, I>) -> usize {
    let mut visible = 0;
    for scale in [0.5, 2.0, 0.8, 1.25] {
        layer.base_mut().rescale(scale);
        visible += layer.rebuild().visible;
    }
    visible
}

fn bench_zoom_rebuilds(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoom_rebuilds");
    let opts = CollisionOptions::default().with_margin(2.0);
    for &side in &[16usize, 32, 64] {
        let n = side * side;
        group.throughput(Throughput::Elements((n * 4) as u64));

        let mut flat = CollisionLayer::new(Lattice::new(side), opts);
        flat.add_overlays(0..n);
        group.bench_function(format!("flatvec_n{}", n), |b| {
            b.iter(|| black_box(zoom_cycle(&mut flat)))
        });

        let mut grid =
            CollisionLayer::with_index(Lattice::new(side), GridF64::new(64.0, 32.0, 0.0, 0.0), opts);
        grid.add_overlays(0..n);
        group.bench_function(format!("grid64_n{}", n), |b| {
            b.iter(|| black_box(zoom_cycle(&mut grid)))
        });

        let mut rstar = CollisionLayer::with_index(Lattice::new(side), RStarIndex::new(), opts);
        rstar.add_overlays(0..n);
        group.bench_function(format!("rstar_n{}", n), |b| {
            b.iter(|| black_box(zoom_cycle(&mut rstar)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_zoom_rebuilds);
criterion_main!(benches);
