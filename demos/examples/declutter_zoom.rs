// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declutter across zoom levels.
//!
//! Place city markers, attach the collision layer to a map view, and watch labels
//! appear and disappear as the view zooms in and out.
//!
//! Run:
//! - `RUST_LOG=understory_declutter=debug cargo run -p understory_demos --example declutter_zoom`

use std::collections::HashSet;

use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_declutter::{
    CollisionLayer, CollisionOptions, OverlayLayer, OverlayState, ScaleSubscription, Viewport,
};

struct City {
    name: &'static str,
    world: Point,
    label: Size,
}

/// Marker group: projects world positions to screen with the current scale.
struct Cities {
    cities: Vec<City>,
    shown: HashSet<usize>,
    scale: f64,
}

impl OverlayLayer for Cities {
    type Overlay = usize;

    fn add(&mut self, city: usize) {
        self.shown.insert(city);
    }

    fn remove(&mut self, city: usize) {
        self.shown.remove(&city);
    }

    fn clear(&mut self) {
        self.shown.clear();
    }

    fn contains(&self, city: usize) -> bool {
        self.shown.contains(&city)
    }

    fn has_label(&self, city: usize) -> bool {
        city < self.cities.len()
    }

    fn label_rect(&self, city: usize) -> Option<Rect> {
        let c = self.cities.get(city)?;
        let anchor = Point::new(c.world.x * self.scale, c.world.y * self.scale);
        // Label sits to the right of the marker, vertically centred.
        Some(Rect::from_origin_size(
            Point::new(anchor.x + 6.0, anchor.y - c.label.height / 2.0),
            c.label,
        ))
    }
}

/// Map view with a single scale-change channel and a deferred-task slot.
#[derive(Default)]
struct MapView {
    subscribers: Vec<ScaleSubscription>,
    next_subscription: u64,
    deferred_pass: bool,
}

impl Viewport for MapView {
    fn subscribe_scale_change(&mut self) -> ScaleSubscription {
        self.next_subscription += 1;
        let sub = ScaleSubscription(self.next_subscription);
        self.subscribers.push(sub);
        sub
    }

    fn unsubscribe_scale_change(&mut self, subscription: ScaleSubscription) {
        self.subscribers.retain(|s| *s != subscription);
    }

    fn defer_collision_pass(&mut self) {
        self.deferred_pass = true;
    }
}

fn report(layer: &CollisionLayer<Cities>) {
    for city in layer.tracked_overlays() {
        let name = layer.base().cities[city].name;
        match layer.overlay_state(city) {
            Some(OverlayState::Visible) => println!("  {name:<10} shown"),
            Some(OverlayState::Suppressed) => println!("  {name:<10} hidden"),
            Some(OverlayState::Pending) | None => println!("  {name:<10} pending"),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let city = |name: &'static str, x: f64, y: f64| City {
        name,
        world: Point::new(x, y),
        label: Size::new(7.0 * name.len() as f64, 14.0),
    };
    let cities = Cities {
        cities: vec![
            city("Lyon", 100.0, 100.0),
            city("Villeurbanne", 104.0, 99.0),
            city("Vienne", 101.0, 120.0),
            city("Grenoble", 130.0, 140.0),
            city("Bourgoin", 118.0, 112.0),
        ],
        shown: HashSet::new(),
        scale: 1.0,
    };

    let mut layer = CollisionLayer::new(cities, CollisionOptions::default().with_margin(2.0));
    let mut view = MapView::default();
    layer.add_overlays(0..5);
    layer.attach(&mut view);

    // The host runs the deferred pass once its first layout has finished.
    if std::mem::take(&mut view.deferred_pass) {
        layer.run_deferred_pass();
    }
    println!("scale 1.0");
    report(&layer);

    for scale in [4.0, 16.0, 0.5] {
        layer.base_mut().scale = scale;
        if !view.subscribers.is_empty() {
            let summary = layer.on_scale_changed();
            println!("scale {scale}: {summary:?}");
        }
        report(&layer);
    }

    layer.detach(&mut view);
    layer.base_mut().scale = 16.0;
    assert_eq!(layer.on_scale_changed(), None, "detached layers ignore zoom");
}
