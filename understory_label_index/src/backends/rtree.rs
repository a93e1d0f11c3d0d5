// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree backend built on the [`rstar`] crate.

use core::fmt::Debug;

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

use crate::backend::CollisionIndex;
use crate::types::Aabb2D;

/// R-tree backend for f64 coordinates.
///
/// `rstar` envelopes are closed, so edge contact counts as a collision here too.
/// Non-finite boxes are not stored and never collide.
#[derive(Default)]
pub struct RStarIndex {
    tree: RTree<Rectangle<[f64; 2]>>,
}

impl RStarIndex {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_rectangle(b: &Aabb2D<f64>) -> Rectangle<[f64; 2]> {
    Rectangle::from_corners([b.min_x, b.min_y], [b.max_x, b.max_y])
}

impl Debug for RStarIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RStarIndex")
            .field("len", &self.tree.size())
            .finish_non_exhaustive()
    }
}

impl CollisionIndex<f64> for RStarIndex {
    fn insert(&mut self, aabb: Aabb2D<f64>) {
        if aabb.is_finite() && !aabb.is_empty() {
            self.tree.insert(to_rectangle(&aabb));
        }
    }

    fn collides(&self, aabb: &Aabb2D<f64>) -> bool {
        if !aabb.is_finite() || aabb.is_empty() {
            return false;
        }
        let envelope = AABB::from_corners([aabb.min_x, aabb.min_y], [aabb.max_x, aabb.max_y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .next()
            .is_some()
    }

    fn remove(&mut self, aabb: &Aabb2D<f64>) -> bool {
        self.tree.remove(&to_rectangle(aabb)).is_some()
    }

    fn clear(&mut self) {
        self.tree = RTree::new();
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}
