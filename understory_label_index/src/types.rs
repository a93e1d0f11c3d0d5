// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;

/// Axis-aligned bounding box in 2D screen space.
///
/// The box is treated as a closed rectangle: two boxes that only share an edge or
/// a corner still [intersect](Aabb2D::intersects).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether the closed rectangles of `self` and `other` share at least one point.
    ///
    /// Edge and corner contact counts as an intersection. Comparisons involving NaN
    /// never intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        le(self.min_x, other.max_x)
            && le(other.min_x, self.max_x)
            && le(self.min_y, other.max_y)
            && le(other.min_y, self.max_y)
    }

    /// Return true if the AABB is inverted (max below min on either axis). Assumes no NaN.
    ///
    /// A degenerate box with zero width or height is not empty: it still covers a
    /// line segment or a point of the closed plane.
    pub fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y)
    }
}

impl Aabb2D<f64> {
    /// Create an AABB from origin and size in f64.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }

    /// Expand the box by `margin` on all four sides.
    #[must_use]
    pub fn inflate(self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Width of the box (may be negative for inverted boxes).
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box (may be negative for inverted boxes).
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True if every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_contact_intersects() {
        let a = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
        let right = Aabb2D::new(10.0, 0.0, 20.0, 10.0);
        let corner = Aabb2D::new(10.0, 10.0, 20.0, 20.0);
        assert!(a.intersects(&right), "shared edge is a collision");
        assert!(a.intersects(&corner), "shared corner is a collision");
        assert!(right.intersects(&a), "intersection is symmetric");
    }

    #[test]
    fn separated_boxes_do_not_intersect() {
        let a = Aabb2D::new(0, 0, 10, 10);
        let b = Aabb2D::new(11, 0, 20, 10);
        let c = Aabb2D::new(0, 11, 10, 20);
        assert!(!a.intersects(&b), "gap on x");
        assert!(!a.intersects(&c), "gap on y");
    }

    #[test]
    fn containment_intersects() {
        let outer = Aabb2D::new(0, 0, 100, 100);
        let inner = Aabb2D::new(40, 40, 60, 60);
        assert!(outer.intersects(&inner), "outer contains inner");
        assert!(inner.intersects(&outer), "inner is inside outer");
    }

    #[test]
    fn nan_never_intersects() {
        let a = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
        let n = Aabb2D::new(f64::NAN, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&n), "NaN edge must not collide");
        assert!(!n.is_finite(), "NaN box is not finite");
    }

    #[test]
    fn inflate_expands_all_sides() {
        let a = Aabb2D::new(0.0, 0.0, 10.0, 10.0).inflate(2.0);
        assert_eq!(a, Aabb2D::new(-2.0, -2.0, 12.0, 12.0));
        assert_eq!(a.width(), 14.0);
        assert_eq!(a.height(), 14.0);
    }

    #[test]
    fn degenerate_box_is_not_empty() {
        let point = Aabb2D::new(5, 5, 5, 5);
        assert!(!point.is_empty(), "a point box still covers a point");
        assert!(Aabb2D::new(5, 5, 4, 5).is_empty(), "inverted box is empty");
        assert!(point.intersects(&point), "a point box touches itself");
    }
}
