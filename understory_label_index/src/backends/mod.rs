// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple).
//! - `grid`: uniform grid for f64 coordinates with an origin offset, great locality.
//! - `rtree`: R-tree from the `rstar` crate (feature `rstar`), good for thousands of labels.
//!
//! All backends implement the same closed-rectangle overlap rule, so swapping one
//! for another never changes which labels are suppressed.

pub mod flatvec;
pub mod grid;
#[cfg(feature = "rstar")]
pub mod rtree;
