// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_declutter --heading-base-level=0

//! Understory Declutter: deterministic label collision handling for map overlays.
//!
//! Map markers and shapes often carry a screen-space label. When markers sit close
//! together on screen their labels overlap and become unreadable. This crate wraps
//! the host's overlay container in a [`CollisionLayer`] that decides, deterministically,
//! which labelled overlays stay visible, and replays that decision whenever the
//! viewport's scale changes.
//!
//! ## How placement works
//!
//! - Each labelled overlay's label is measured in screen space and padded by a
//!   fixed [margin](CollisionOptions::margin) on all four sides.
//! - Labels are placed greedily in the order their overlays were first added. A label
//!   that touches an already placed label loses: its overlay is removed from the base
//!   container but stays tracked.
//! - On every scale change the collision index is cleared and all tracked overlays
//!   compete again in the same order. Hidden overlays are put back first, so a label
//!   that lost at one zoom level can win at another.
//! - A label that has not been laid out yet is left alone and retried on the next
//!   rebuild.
//!
//! ## Host integration
//!
//! The layer does not render, lay out, or own overlays. Implement [`OverlayLayer`]
//! for your marker container and [`Viewport`] for your map view, then forward the
//! viewport's events:
//!
//! - scale changes go to [`CollisionLayer::on_scale_changed`];
//! - the one-shot pass requested by [`CollisionLayer::attach`] goes to
//!   [`CollisionLayer::run_deferred_pass`] once labels have been laid out.
//!
//! Everything runs to completion on the caller's thread; there is no locking.
//!
//! ## Collision index
//!
//! Boxes live in an [`understory_label_index`] backend. The default is a flat vector;
//! pass a [`GridF64`](understory_label_index::GridF64) or, with the `rstar` feature,
//! an `RStarIndex` to [`CollisionLayer::with_index`] for large marker sets.
//!
//! ## Minimal usage
//!
//! ```
//! use std::collections::{HashMap, HashSet};
//!
//! use kurbo::Rect;
//! use understory_declutter::{CollisionLayer, CollisionOptions, OverlayLayer, OverlayState};
//!
//! #[derive(Default)]
//! struct Markers {
//!     labels: HashMap<u32, Rect>,
//!     shown: HashSet<u32>,
//! }
//!
//! impl OverlayLayer for Markers {
//!     type Overlay = u32;
//!     fn add(&mut self, m: u32) { self.shown.insert(m); }
//!     fn remove(&mut self, m: u32) { self.shown.remove(&m); }
//!     fn clear(&mut self) { self.shown.clear(); }
//!     fn contains(&self, m: u32) -> bool { self.shown.contains(&m) }
//!     fn has_label(&self, m: u32) -> bool { self.labels.contains_key(&m) }
//!     fn label_rect(&self, m: u32) -> Option<Rect> { self.labels.get(&m).copied() }
//! }
//!
//! let mut markers = Markers::default();
//! markers.labels.insert(1, Rect::new(0.0, 0.0, 10.0, 10.0));
//! markers.labels.insert(2, Rect::new(5.0, 5.0, 15.0, 15.0));
//! markers.labels.insert(3, Rect::new(20.0, 20.0, 30.0, 30.0));
//!
//! let mut layer = CollisionLayer::new(markers, CollisionOptions::default());
//! layer.add_overlays([1, 2, 3]);
//!
//! assert_eq!(layer.overlay_state(1), Some(OverlayState::Visible));
//! assert_eq!(layer.overlay_state(2), Some(OverlayState::Suppressed));
//! assert_eq!(layer.overlay_state(3), Some(OverlayState::Visible));
//!
//! // After zooming in, the host reports new label positions and the layer rebuilds.
//! layer.base_mut().labels.insert(2, Rect::new(40.0, 40.0, 50.0, 50.0));
//! layer.rebuild();
//! assert_eq!(layer.overlay_state(2), Some(OverlayState::Visible));
//! ```
//!
//! ## Known staleness
//!
//! By default a label that cannot be measured keeps the box it last recorded, and
//! that box keeps blocking later labels until the next rebuild. Set
//! [`CollisionOptions::clear_box_when_unavailable`] to drop it instead.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod extract;
pub mod host;
pub mod layer;
pub mod options;
pub mod tracker;

#[cfg(test)]
mod testing;

pub use host::{OverlayLayer, ScaleSubscription, Viewport};
pub use layer::{CollisionLayer, OverlayState, RebuildSummary};
pub use options::CollisionOptions;
pub use tracker::{TrackedLabel, Tracker};
