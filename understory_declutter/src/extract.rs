// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label bounding-box extraction.

use kurbo::Rect;
use understory_label_index::Aabb2D;

use crate::host::OverlayLayer;

/// Convert a Kurbo rect to an index AABB (min/max corners).
pub(crate) fn rect_to_aabb(r: Rect) -> Aabb2D<f64> {
    Aabb2D::new(r.x0, r.y0, r.x1, r.y1)
}

/// Measure the overlay's label and expand it by `margin` on every side.
///
/// Returns `None` when the label has no rendered element yet or reports
/// non-finite edges. Nothing is mutated either way.
pub(crate) fn label_box<L: OverlayLayer>(
    layer: &L,
    overlay: L::Overlay,
    margin: f64,
) -> Option<Aabb2D<f64>> {
    let rect = layer.label_rect(overlay)?;
    if !rect.is_finite() {
        return None;
    }
    Some(rect_to_aabb(rect.abs().inflate(margin, margin)))
}
