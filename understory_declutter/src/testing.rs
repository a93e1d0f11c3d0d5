// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host used by unit tests.

use alloc::vec::Vec;

use hashbrown::HashSet;
use kurbo::Rect;

use crate::host::{OverlayLayer, ScaleSubscription, Viewport};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct MarkerId(u32);

#[derive(Copy, Clone, Debug)]
enum Label {
    Missing,
    Unrendered,
    Rendered(Rect),
}

/// Marker group whose label geometry is set directly by the test.
#[derive(Debug, Default)]
pub(crate) struct MockMap {
    labels: Vec<Label>,
    visible: HashSet<MarkerId>,
}

impl MockMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, label: Label) -> MarkerId {
        self.labels.push(label);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Tests create a handful of markers."
        )]
        let idx = (self.labels.len() - 1) as u32;
        MarkerId(idx)
    }

    /// A marker whose label is laid out at `rect`.
    pub(crate) fn overlay(&mut self, rect: Rect) -> MarkerId {
        self.push(Label::Rendered(rect))
    }

    /// A marker whose label has not been laid out yet.
    pub(crate) fn pending_overlay(&mut self) -> MarkerId {
        self.push(Label::Unrendered)
    }

    /// A marker without a label.
    pub(crate) fn unlabelled_overlay(&mut self) -> MarkerId {
        self.push(Label::Missing)
    }

    pub(crate) fn set_label_rect(&mut self, id: MarkerId, rect: Rect) {
        self.labels[id.0 as usize] = Label::Rendered(rect);
    }

    /// Drop the label's rendered element, as if it were detached from the page.
    pub(crate) fn unrender(&mut self, id: MarkerId) {
        self.labels[id.0 as usize] = Label::Unrendered;
    }
}

impl OverlayLayer for MockMap {
    type Overlay = MarkerId;

    fn add(&mut self, overlay: MarkerId) {
        self.visible.insert(overlay);
    }

    fn remove(&mut self, overlay: MarkerId) {
        self.visible.remove(&overlay);
    }

    fn clear(&mut self) {
        self.visible.clear();
    }

    fn contains(&self, overlay: MarkerId) -> bool {
        self.visible.contains(&overlay)
    }

    fn has_label(&self, overlay: MarkerId) -> bool {
        !matches!(self.labels[overlay.0 as usize], Label::Missing)
    }

    fn label_rect(&self, overlay: MarkerId) -> Option<Rect> {
        match self.labels[overlay.0 as usize] {
            Label::Rendered(rect) => Some(rect),
            Label::Missing | Label::Unrendered => None,
        }
    }
}

/// Viewport that records subscriptions and deferred-pass requests.
#[derive(Debug, Default)]
pub(crate) struct MockViewport {
    pub(crate) subscribers: Vec<ScaleSubscription>,
    pub(crate) deferred: usize,
    next: u64,
}

impl Viewport for MockViewport {
    fn subscribe_scale_change(&mut self) -> ScaleSubscription {
        self.next += 1;
        let sub = ScaleSubscription(self.next);
        self.subscribers.push(sub);
        sub
    }

    fn unsubscribe_scale_change(&mut self, subscription: ScaleSubscription) {
        self.subscribers.retain(|s| *s != subscription);
    }

    fn defer_collision_pass(&mut self) {
        self.deferred += 1;
    }
}
