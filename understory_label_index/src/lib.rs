// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_label_index --heading-base-level=0

//! Understory Label Index: a collision index for screen-space label boxes.
//!
//! The index answers one question as fast as the chosen backend allows:
//! does this box overlap anything already placed?
//!
//! - Insert axis-aligned bounding boxes (AABBs). Duplicates are kept.
//! - Test a box for overlap against every stored box with [`CollisionIndex::collides`].
//! - Remove one copy of a stored box, or clear everything.
//!
//! Boxes are closed rectangles: touching edges or corners count as a collision.
//! Callers that want a visual gap between labels inflate boxes by a margin before
//! inserting or testing them (see [`Aabb2D::inflate`]).
//!
//! Boxes are not keyed by owner. Higher layers (like a declutter layer over map
//! markers) keep their own owner-to-box association and feed boxes in here.
//!
//! # Example
//!
//! ```rust
//! use understory_label_index::{Aabb2D, CollisionIndex, FlatVec};
//!
//! let mut idx: FlatVec<f64> = FlatVec::new();
//! let a = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
//! assert!(!idx.collides(&a));
//! idx.insert(a);
//!
//! // Overlaps the first box.
//! assert!(idx.collides(&Aabb2D::new(5.0, 5.0, 15.0, 15.0)));
//! // Disjoint, until a 2px margin closes the gap.
//! let c = Aabb2D::new(12.0, 0.0, 20.0, 10.0);
//! assert!(!idx.collides(&c));
//! assert!(idx.collides(&c.inflate(2.0)));
//! ```
//!
//! ## Choosing a backend
//!
//! - [`FlatVec`] (default): linear scans. Good for a few hundred labels.
//! - [`GridF64`]: uniform grid; pick a cell size near the typical label size.
//!   Provide an origin offset if you want cells aligned to something other than `(0, 0)`.
//! - `RStarIndex` (feature `rstar`): R-tree from the `rstar` crate; good general-purpose
//!   choice when labels number in the thousands or vary widely in size.
//!
//! ### Float semantics
//!
//! Comparisons involving NaN never collide. The grid and R-tree backends refuse to
//! store non-finite boxes.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod types;

pub use backend::CollisionIndex;
pub use backends::flatvec::FlatVec;
pub use backends::grid::GridF64;
#[cfg(feature = "rstar")]
pub use backends::rtree::RStarIndex;
pub use types::Aabb2D;
