// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for a few hundred labels.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::CollisionIndex;
use crate::types::Aabb2D;

/// Flat vector backend with linear scans.
#[derive(Clone)]
pub struct FlatVec<T: Copy + PartialOrd + Debug> {
    boxes: Vec<Aabb2D<T>>,
}

impl<T: Copy + PartialOrd + Debug> FlatVec<T> {
    /// Create an empty backend.
    pub const fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Create an empty backend with room for `n` boxes.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            boxes: Vec::with_capacity(n),
        }
    }
}

impl<T: Copy + PartialOrd + Debug> Default for FlatVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + PartialOrd + Debug> Debug for FlatVec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("len", &self.boxes.len())
            .field("capacity", &self.boxes.capacity())
            .finish_non_exhaustive()
    }
}

impl<T: Copy + PartialOrd + Debug> CollisionIndex<T> for FlatVec<T> {
    fn insert(&mut self, aabb: Aabb2D<T>) {
        self.boxes.push(aabb);
    }

    fn collides(&self, aabb: &Aabb2D<T>) -> bool {
        self.boxes.iter().any(|b| b.intersects(aabb))
    }

    fn remove(&mut self, aabb: &Aabb2D<T>) -> bool {
        if let Some(pos) = self.boxes.iter().position(|b| b == aabb) {
            self.boxes.swap_remove(pos);
            true
        } else {
            false
        }
    }

    fn clear(&mut self) {
        self.boxes.clear();
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }
}
