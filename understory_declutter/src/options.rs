// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction options for [`CollisionLayer`](crate::CollisionLayer).

/// Options fixed at construction of a [`CollisionLayer`](crate::CollisionLayer).
///
/// With the `serde` feature, options deserialize from any self-describing format.
/// Missing keys take their defaults and unknown keys are ignored.
///
/// ```
/// use understory_declutter::CollisionOptions;
///
/// let opts = CollisionOptions::default().with_margin(4.0);
/// assert_eq!(opts.margin, 4.0);
/// assert!(!opts.clear_box_when_unavailable);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CollisionOptions {
    /// Padding in screen pixels added to every side of a label box before it is
    /// tested or indexed. Two labels collide when their padded boxes touch.
    pub margin: f64,
    /// What to do when a label cannot be measured during a resolution attempt.
    ///
    /// When `false` (the default) the overlay keeps whatever box it last recorded,
    /// which stays in the collision index until the next successful measurement,
    /// removal, or clear. When `true` the recorded box is dropped from the index and
    /// the overlay's entry is reset to "no box".
    pub clear_box_when_unavailable: bool,
}

impl CollisionOptions {
    /// Set the margin.
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the policy for labels that cannot be measured.
    #[must_use]
    pub fn with_clear_box_when_unavailable(mut self, clear: bool) -> Self {
        self.clear_box_when_unavailable = clear;
        self
    }

    /// Options with a margin that is finite and non-negative.
    ///
    /// Negative and non-finite margins become `0.0`.
    pub(crate) fn sanitized(self) -> Self {
        if self.margin.is_finite() && self.margin >= 0.0 {
            self
        } else {
            tracing::warn!(margin = self.margin, "invalid collision margin, using 0");
            Self {
                margin: 0.0,
                ..self
            }
        }
    }
}
