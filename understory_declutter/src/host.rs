// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host integration traits: the overlay container and the viewport.
//!
//! The declutter layer does not render, lay out, or own overlays. It talks to the
//! host map through two narrow seams:
//!
//! - [`OverlayLayer`]: the base container of drawable overlays, plus the per-overlay
//!   label queries needed to measure a label on screen.
//! - [`Viewport`]: scale-change subscriptions and the one-shot deferred pass that
//!   runs after the first layout.
//!
//! Viewport callbacks are not closures. The host owns its event loop and forwards
//! events to [`CollisionLayer::on_scale_changed`](crate::CollisionLayer::on_scale_changed)
//! and [`CollisionLayer::run_deferred_pass`](crate::CollisionLayer::run_deferred_pass).

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Rect;

/// A container of drawable overlays, such as a marker group on a map.
///
/// Overlays are identified by a small copyable handle. The container owns the
/// overlays themselves; the declutter layer only stores handles.
pub trait OverlayLayer {
    /// Handle identifying an overlay. Equality is identity.
    type Overlay: Copy + Eq + Hash + Debug;

    /// Add an overlay to the visible set. Adding a present overlay is a no-op.
    fn add(&mut self, overlay: Self::Overlay);

    /// Remove an overlay from the visible set. Removing an absent overlay is a no-op.
    fn remove(&mut self, overlay: Self::Overlay);

    /// Remove every overlay from the visible set.
    fn clear(&mut self);

    /// Whether the overlay is currently part of the visible set.
    fn contains(&self, overlay: Self::Overlay) -> bool;

    /// Whether the overlay carries a label annotation.
    fn has_label(&self, overlay: Self::Overlay) -> bool;

    /// Screen-space edges of the overlay's rendered label element.
    ///
    /// Returns `None` while the label has no laid-out element (for example before
    /// the first render), or if the overlay has no label at all.
    fn label_rect(&self, overlay: Self::Overlay) -> Option<Rect>;
}

/// Token for a scale-change subscription, handed out by the host's [`Viewport`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScaleSubscription(pub u64);

/// The scrollable, zoomable view a collision layer is attached to.
pub trait Viewport {
    /// Start delivering scale-change events to the layer.
    fn subscribe_scale_change(&mut self) -> ScaleSubscription;

    /// Stop delivering scale-change events for `subscription`.
    fn unsubscribe_scale_change(&mut self, subscription: ScaleSubscription);

    /// Schedule one call to
    /// [`CollisionLayer::run_deferred_pass`](crate::CollisionLayer::run_deferred_pass)
    /// after the current turn yields and labels have been laid out.
    ///
    /// The request fires once and cannot be cancelled.
    fn defer_collision_pass(&mut self);
}
