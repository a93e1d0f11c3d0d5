// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision-aware overlay layer: resolution, rebuilds, and viewport wiring.

use alloc::vec::Vec;
use core::fmt::Debug;

use tracing::{debug, trace};
use understory_label_index::{Aabb2D, CollisionIndex, FlatVec};

use crate::extract;
use crate::host::{OverlayLayer, ScaleSubscription, Viewport};
use crate::options::CollisionOptions;
use crate::tracker::{TrackedLabel, Tracker};

/// Where a tracked overlay stands after its last resolution attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OverlayState {
    /// In the visible set, but its label has not been measured successfully yet.
    Pending,
    /// In the visible set with its label box in the collision index.
    Visible,
    /// Hidden because its label collided with an earlier one. It stays tracked and
    /// competes again on the next rebuild.
    Suppressed,
}

/// Counts from one [`CollisionLayer::rebuild`] pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RebuildSummary {
    /// Overlays whose label was placed.
    pub visible: usize,
    /// Overlays hidden by a collision.
    pub suppressed: usize,
    /// Overlays whose label could not be measured; left as they were.
    pub unavailable: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Resolution {
    Unavailable,
    Visible,
    Suppressed,
}

/// A drop-in wrapper around an [`OverlayLayer`] that hides overlays whose labels
/// would overlap on screen.
///
/// Labels are placed greedily in the order their overlays were first added: each
/// label is measured, padded by the configured margin, and kept only if it does not
/// touch a label placed before it. Losers are removed from the base layer but stay
/// tracked, and every scale change replays the whole placement from scratch so a
/// label hidden at one zoom level can come back at another.
///
/// Overlays without a label pass straight through to the base layer.
pub struct CollisionLayer<L: OverlayLayer, I: CollisionIndex<f64> = FlatVec<f64>> {
    base: L,
    index: I,
    tracker: Tracker<L::Overlay>,
    options: CollisionOptions,
    subscription: Option<ScaleSubscription>,
}

impl<L: OverlayLayer, I: CollisionIndex<f64> + Debug> Debug for CollisionLayer<L, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CollisionLayer")
            .field("tracked", &self.tracker.len())
            .field("index", &self.index)
            .field("options", &self.options)
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}

impl<L: OverlayLayer> CollisionLayer<L> {
    /// Wrap `base` using the flat-vector collision index.
    pub fn new(base: L, options: CollisionOptions) -> Self {
        Self::with_index(base, FlatVec::new(), options)
    }
}

impl<L: OverlayLayer, I: CollisionIndex<f64>> CollisionLayer<L, I> {
    /// Wrap `base` using a specific collision index backend.
    ///
    /// The index is cleared; it must only ever hold boxes placed by this layer.
    pub fn with_index(base: L, mut index: I, options: CollisionOptions) -> Self {
        index.clear();
        Self {
            base,
            index,
            tracker: Tracker::new(),
            options: options.sanitized(),
            subscription: None,
        }
    }

    /// Add an overlay to the base layer and place its label.
    ///
    /// If the label collides with one placed earlier, the overlay is removed from the
    /// base layer again. Overlays with a label are tracked for future rebuilds even
    /// when their label cannot be measured yet. Adding an overlay that is already
    /// tracked and visible does nothing.
    pub fn add_overlay(&mut self, overlay: L::Overlay) {
        if self.tracker.contains(overlay) && self.base.contains(overlay) {
            return;
        }
        self.base.add(overlay);
        if self.base.has_label(overlay) {
            self.resolve(overlay);
            self.tracker.track(overlay);
        }
    }

    /// Add several overlays in iteration order.
    pub fn add_overlays(&mut self, overlays: impl IntoIterator<Item = L::Overlay>) {
        for overlay in overlays {
            self.add_overlay(overlay);
        }
    }

    /// Remove an overlay from the base layer and stop tracking it.
    ///
    /// Its label box leaves the collision index right away. Overlays it had
    /// suppressed stay hidden until the next rebuild.
    pub fn remove_overlay(&mut self, overlay: L::Overlay) {
        if let Some(label_box) = self.tracker.forget(overlay).and_then(|l| l.indexed_box()) {
            self.index.remove(&label_box);
        }
        self.base.remove(overlay);
    }

    /// Remove every overlay and forget all collision state.
    pub fn clear_overlays(&mut self) {
        self.base.clear();
        self.index.clear();
        self.tracker.forget_all();
    }

    /// Attach to a viewport: subscribe to scale changes and request the deferred
    /// first pass. Attaching while already attached does nothing.
    pub fn attach<V: Viewport>(&mut self, viewport: &mut V) {
        if self.subscription.is_some() {
            debug!("collision layer already attached");
            return;
        }
        let subscription = viewport.subscribe_scale_change();
        debug!(?subscription, "collision layer attached");
        self.subscription = Some(subscription);
        viewport.defer_collision_pass();
    }

    /// Detach from a viewport: unsubscribe from scale changes.
    ///
    /// A deferred pass requested by [`attach`](Self::attach) is not cancelled and
    /// still runs when the host delivers it.
    pub fn detach<V: Viewport>(&mut self, viewport: &mut V) {
        if let Some(subscription) = self.subscription.take() {
            viewport.unsubscribe_scale_change(subscription);
            debug!(?subscription, "collision layer detached");
        }
    }

    /// Whether the layer is subscribed to a viewport's scale changes.
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Handle a viewport scale change by rebuilding.
    ///
    /// Returns `None` and does nothing while detached.
    pub fn on_scale_changed(&mut self) -> Option<RebuildSummary> {
        if self.subscription.is_none() {
            trace!("scale change ignored while detached");
            return None;
        }
        Some(self.rebuild())
    }

    /// Run the one-shot pass requested on attach.
    ///
    /// Runs against the current state even if the layer was detached in between.
    pub fn run_deferred_pass(&mut self) -> RebuildSummary {
        self.rebuild()
    }

    /// Clear the collision index and place every tracked label again, in tracking order.
    ///
    /// Suppressed overlays are put back into the base layer before their label is
    /// tested, so they get a fresh chance at the current scale.
    pub fn rebuild(&mut self) -> RebuildSummary {
        self.index.clear();
        self.tracker.clear_indexed();
        let order: Vec<L::Overlay> = self.tracker.overlays().collect();
        let mut summary = RebuildSummary::default();
        for overlay in order {
            if !self.base.contains(overlay) {
                self.base.add(overlay);
            }
            match self.resolve(overlay) {
                Resolution::Visible => summary.visible += 1,
                Resolution::Suppressed => summary.suppressed += 1,
                Resolution::Unavailable => summary.unavailable += 1,
            }
        }
        debug!(
            visible = summary.visible,
            suppressed = summary.suppressed,
            unavailable = summary.unavailable,
            "collision rebuild"
        );
        summary
    }

    fn resolve(&mut self, overlay: L::Overlay) -> Resolution {
        let prior = self.tracker.get(overlay).unwrap_or_default();
        let Some(label_box) = extract::label_box(&self.base, overlay, self.options.margin) else {
            if self.options.clear_box_when_unavailable && prior.label_box.is_some() {
                if let Some(stale) = prior.indexed_box() {
                    self.index.remove(&stale);
                }
                self.tracker.record(overlay, TrackedLabel::NONE);
            }
            trace!(?overlay, "label not measurable");
            return Resolution::Unavailable;
        };
        // Only reachable when the overlay left the base layer behind our back.
        if let Some(own) = prior.indexed_box() {
            self.index.remove(&own);
        }
        if self.index.collides(&label_box) {
            self.base.remove(overlay);
            self.tracker.record(overlay, TrackedLabel::NONE);
            trace!(?overlay, "label suppressed");
            Resolution::Suppressed
        } else {
            self.index.insert(label_box);
            self.tracker.record(overlay, TrackedLabel::placed(label_box));
            trace!(?overlay, "label placed");
            Resolution::Visible
        }
    }

    /// State of a tracked overlay, or `None` if it is not tracked.
    pub fn overlay_state(&self, overlay: L::Overlay) -> Option<OverlayState> {
        let label = self.tracker.get(overlay)?;
        Some(if label.indexed {
            OverlayState::Visible
        } else if self.base.contains(overlay) {
            OverlayState::Pending
        } else {
            OverlayState::Suppressed
        })
    }

    /// The padded label box recorded for an overlay, if it has one.
    ///
    /// A recorded box is not necessarily in the collision index: a label that could
    /// not be measured during the last rebuild keeps its old box but is
    /// [`Pending`](OverlayState::Pending).
    pub fn tracked_box(&self, overlay: L::Overlay) -> Option<Aabb2D<f64>> {
        self.tracker.get(overlay).and_then(|l| l.label_box)
    }

    /// Whether the overlay is tracked.
    pub fn is_tracked(&self, overlay: L::Overlay) -> bool {
        self.tracker.contains(overlay)
    }

    /// Number of tracked overlays.
    pub fn tracked_len(&self) -> usize {
        self.tracker.len()
    }

    /// Tracked overlays in tracking (tie-break) order.
    pub fn tracked_overlays(&self) -> impl Iterator<Item = L::Overlay> + '_ {
        self.tracker.overlays()
    }

    /// The tracker holding every labelled overlay and its recorded box.
    pub fn tracker(&self) -> &Tracker<L::Overlay> {
        &self.tracker
    }

    /// The wrapped base layer.
    pub fn base(&self) -> &L {
        &self.base
    }

    /// Mutable access to the wrapped base layer.
    ///
    /// Adding or removing overlays through this bypasses collision handling; use it
    /// for host-side state such as label geometry.
    pub fn base_mut(&mut self) -> &mut L {
        &mut self.base
    }

    /// The collision index.
    pub fn index(&self) -> &I {
        &self.index
    }

    /// The options in effect (after sanitizing).
    pub fn options(&self) -> &CollisionOptions {
        &self.options
    }

    /// Unwrap the base layer, dropping all collision state.
    pub fn into_base(self) -> L {
        self.base
    }
}
