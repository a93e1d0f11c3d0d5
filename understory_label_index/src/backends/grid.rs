// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend for f64 screen coordinates.

use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::HashMap;

use crate::backend::CollisionIndex;
use crate::types::Aabb2D;

/// Uniform grid backend.
///
/// Each stored box is registered in every cell it covers. A collision query visits
/// the cells covered by the query box and checks the candidates exactly, so the grid
/// never reports a collision the flat backend would not.
///
/// Pick a cell size near the typical label size. Boxes much larger than a cell
/// touch many cells and make inserts and queries proportionally slower. A box
/// spanning more than [`GridF64::MAX_CELLS`] cells is kept in a separate list that
/// every query scans, and a query that large scans every stored box.
/// Non-finite boxes are not stored and never collide.
pub struct GridF64 {
    cell_w: f64,
    cell_h: f64,
    origin_x: f64,
    origin_y: f64,
    slots: Vec<Option<Aabb2D<f64>>>,
    free_list: Vec<usize>,
    cells: HashMap<(i64, i64), Vec<usize>>,
    oversized: Vec<usize>,
    len: usize,
}

impl GridF64 {
    /// Create a grid backend with the given cell size and origin offset.
    ///
    /// Coordinates map to cells by floor division of `(x - origin_x) / cell_w`,
    /// so negative coordinates are supported.
    pub fn new(cell_w: f64, cell_h: f64, origin_x: f64, origin_y: f64) -> Self {
        assert!(
            cell_w > 0.0 && cell_h > 0.0,
            "grid cell sizes must be positive"
        );
        Self {
            cell_w,
            cell_h,
            origin_x,
            origin_y,
            slots: Vec::new(),
            free_list: Vec::new(),
            cells: HashMap::new(),
            oversized: Vec::new(),
            len: 0,
        }
    }

    /// Largest number of cells a single box is registered in.
    pub const MAX_CELLS: i128 = 4096;

    #[inline]
    fn floor_to_i64(v: f64) -> i64 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Cell coordinates are bounded by screen size; saturation is acceptable."
        )]
        let i = v as i64;
        if (i as f64) > v { i - 1 } else { i }
    }

    fn key_for(&self, x: f64, y: f64) -> (i64, i64) {
        let cx = Self::floor_to_i64((x - self.origin_x) / self.cell_w);
        let cy = Self::floor_to_i64((y - self.origin_y) / self.cell_h);
        (cx, cy)
    }

    /// Cells covered by `a`, or `None` if there are more than [`Self::MAX_CELLS`].
    fn cells_for_aabb(
        &self,
        a: &Aabb2D<f64>,
    ) -> Option<impl Iterator<Item = (i64, i64)> + use<>> {
        let (minx, miny) = self.key_for(a.min_x, a.min_y);
        let (maxx, maxy) = self.key_for(a.max_x, a.max_y);
        let cols = i128::from(maxx) - i128::from(minx) + 1;
        let rows = i128::from(maxy) - i128::from(miny) + 1;
        if cols.saturating_mul(rows) > Self::MAX_CELLS {
            return None;
        }
        Some((miny..=maxy).flat_map(move |y| (minx..=maxx).map(move |x| (x, y))))
    }

    fn hits(&self, slot: usize, aabb: &Aabb2D<f64>) -> bool {
        self.slots[slot].is_some_and(|b| b.intersects(aabb))
    }
}

impl Debug for GridF64 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridF64")
            .field("cell_w", &self.cell_w)
            .field("cell_h", &self.cell_h)
            .field("origin_x", &self.origin_x)
            .field("origin_y", &self.origin_y)
            .field("len", &self.len)
            .field("total_slots", &self.slots.len())
            .field("cells", &self.cells.len())
            .field("oversized", &self.oversized.len())
            .finish_non_exhaustive()
    }
}

impl CollisionIndex<f64> for GridF64 {
    fn insert(&mut self, aabb: Aabb2D<f64>) {
        if !aabb.is_finite() || aabb.is_empty() {
            return;
        }
        let slot = if let Some(slot) = self.free_list.pop() {
            self.slots[slot] = Some(aabb);
            slot
        } else {
            self.slots.push(Some(aabb));
            self.slots.len() - 1
        };
        match self.cells_for_aabb(&aabb) {
            Some(keys) => {
                for key in keys {
                    self.cells.entry(key).or_default().push(slot);
                }
            }
            None => self.oversized.push(slot),
        }
        self.len += 1;
    }

    fn collides(&self, aabb: &Aabb2D<f64>) -> bool {
        if !aabb.is_finite() || aabb.is_empty() {
            return false;
        }
        if self.oversized.iter().any(|&s| self.hits(s, aabb)) {
            return true;
        }
        match self.cells_for_aabb(aabb) {
            Some(mut keys) => keys.any(|key| {
                self.cells
                    .get(&key)
                    .is_some_and(|slots| slots.iter().any(|&s| self.hits(s, aabb)))
            }),
            None => self.slots.iter().flatten().any(|b| b.intersects(aabb)),
        }
    }

    fn remove(&mut self, aabb: &Aabb2D<f64>) -> bool {
        if !aabb.is_finite() || aabb.is_empty() {
            return false;
        }
        let slot = match self.cells_for_aabb(aabb) {
            Some(keys) => {
                let (minx, miny) = self.key_for(aabb.min_x, aabb.min_y);
                let Some(slot) = self.cells.get(&(minx, miny)).and_then(|slots| {
                    slots
                        .iter()
                        .copied()
                        .find(|&s| self.slots[s].as_ref() == Some(aabb))
                }) else {
                    return false;
                };
                for key in keys {
                    if let Some(slots) = self.cells.get_mut(&key) {
                        if let Some(pos) = slots.iter().position(|&s| s == slot) {
                            slots.swap_remove(pos);
                        }
                        if slots.is_empty() {
                            self.cells.remove(&key);
                        }
                    }
                }
                slot
            }
            None => {
                let Some(pos) = self
                    .oversized
                    .iter()
                    .position(|&s| self.slots[s].as_ref() == Some(aabb))
                else {
                    return false;
                };
                self.oversized.swap_remove(pos)
            }
        };
        self.slots[slot] = None;
        self.free_list.push(slot);
        self.len -= 1;
        true
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.cells.clear();
        self.oversized.clear();
        self.len = 0;
    }

    fn len(&self) -> usize {
        self.len
    }
}
