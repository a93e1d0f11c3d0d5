// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for collision index implementations.

use core::fmt::Debug;

use crate::types::Aabb2D;

/// Collision index abstraction used by the declutter layer.
///
/// An index stores a multiset of boxes and answers a single question: does a query
/// box overlap any stored box? Boxes are not keyed by owner, so callers that need
/// an owner-to-box association keep it themselves.
pub trait CollisionIndex<T: Copy + PartialOrd + Debug> {
    /// Insert a box. Duplicates are kept.
    fn insert(&mut self, aabb: Aabb2D<T>);

    /// True if the closed rectangle of `aabb` shares a point with any stored box.
    fn collides(&self, aabb: &Aabb2D<T>) -> bool;

    /// Remove one stored box equal to `aabb`. Returns false if none matched.
    fn remove(&mut self, aabb: &Aabb2D<T>) -> bool;

    /// Remove every stored box.
    fn clear(&mut self);

    /// Number of stored boxes.
    fn len(&self) -> usize;

    /// True if no box is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
