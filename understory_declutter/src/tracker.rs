// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion-ordered record of labelled overlays and their last indexed box.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use understory_label_index::Aabb2D;

/// What the tracker knows about one overlay's label.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TrackedLabel {
    /// Last padded box measured for the label, if any.
    pub label_box: Option<Aabb2D<f64>>,
    /// Whether `label_box` is currently stored in the collision index.
    ///
    /// A recorded box can outlive its index entry: the index is cleared at the start
    /// of every rebuild, and a label that cannot be measured keeps its old box.
    pub indexed: bool,
}

impl TrackedLabel {
    /// No box recorded.
    pub const NONE: Self = Self {
        label_box: None,
        indexed: false,
    };

    /// A box that was just placed in the collision index.
    pub const fn placed(label_box: Aabb2D<f64>) -> Self {
        Self {
            label_box: Some(label_box),
            indexed: true,
        }
    }

    /// The box, only if it is stored in the collision index.
    pub fn indexed_box(&self) -> Option<Aabb2D<f64>> {
        if self.indexed { self.label_box } else { None }
    }
}

#[derive(Clone, Debug)]
struct Entry<K> {
    overlay: K,
    label: TrackedLabel,
}

/// Ordered map from overlay handle to its last measured label box.
///
/// Iteration follows first-insertion order and is stable across updates: recording
/// a new box for a tracked overlay never moves it. That order is the tie-break for
/// collisions, so an overlay tracked earlier always wins against a later one.
///
/// An overlay with no recorded box was never measured or lost its last collision.
/// A recorded box is only known to be in the collision index when
/// [`TrackedLabel::indexed`] is set.
///
/// Removal leaves a tombstone so positions stay valid; tombstones are compacted
/// once they make up half of the slots.
#[derive(Clone)]
pub struct Tracker<K: Copy + Eq + Hash> {
    slots: Vec<Option<Entry<K>>>,
    positions: HashMap<K, usize>,
}

impl<K: Copy + Eq + Hash> Default for Tracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash + Debug> Debug for Tracker<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Copy + Eq + Hash> Tracker<K> {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Start tracking `overlay` with no box. Returns false if it was already tracked,
    /// in which case its box and position are unchanged.
    pub fn track(&mut self, overlay: K) -> bool {
        if self.positions.contains_key(&overlay) {
            return false;
        }
        self.push(overlay, TrackedLabel::NONE);
        true
    }

    /// Record the overlay's label state, tracking it first if needed.
    pub fn record(&mut self, overlay: K, label: TrackedLabel) {
        match self.positions.get(&overlay) {
            Some(&pos) => {
                if let Some(entry) = self.slots[pos].as_mut() {
                    entry.label = label;
                }
            }
            None => self.push(overlay, label),
        }
    }

    /// Mark every recorded box as absent from the collision index.
    ///
    /// Call this whenever the index is cleared wholesale.
    pub fn clear_indexed(&mut self) {
        for entry in self.slots.iter_mut().flatten() {
            entry.label.indexed = false;
        }
    }

    /// Stop tracking `overlay`, returning its last label state.
    ///
    /// Returns `None` when the overlay was not tracked.
    pub fn forget(&mut self, overlay: K) -> Option<TrackedLabel> {
        let pos = self.positions.remove(&overlay)?;
        let entry = self.slots[pos].take()?;
        if self.positions.len() * 2 < self.slots.len() {
            self.compact();
        }
        Some(entry.label)
    }

    /// Stop tracking every overlay.
    pub fn forget_all(&mut self) {
        self.slots.clear();
        self.positions.clear();
    }

    /// Label state for `overlay`, or `None` if it is not tracked.
    pub fn get(&self, overlay: K) -> Option<TrackedLabel> {
        let pos = *self.positions.get(&overlay)?;
        self.slots[pos].as_ref().map(|e| e.label)
    }

    /// Whether `overlay` is tracked.
    pub fn contains(&self, overlay: K) -> bool {
        self.positions.contains_key(&overlay)
    }

    /// Number of tracked overlays.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Tracked overlays and their label state in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (K, TrackedLabel)> + '_ {
        self.slots.iter().flatten().map(|e| (e.overlay, e.label))
    }

    /// Tracked overlays in insertion order.
    pub fn overlays(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    fn push(&mut self, overlay: K, label: TrackedLabel) {
        self.positions.insert(overlay, self.slots.len());
        self.slots.push(Some(Entry { overlay, label }));
    }

    fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        for (pos, entry) in self.slots.iter().flatten().enumerate() {
            self.positions.insert(entry.overlay, pos);
        }
    }
}
