//! Document font profile.

use serde::{Deserialize, Serialize};

/// Slack for `f32` rounding when a size sits exactly on the tolerance edge.
const TOLERANCE_EPSILON: f32 = 1e-4;

/// Body size and heading size tiers of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontProfile {
    /// Most common font size (body text)
    pub body_size: f32,
    /// Heading sizes, largest first (tier 1 = index 0)
    pub heading_sizes: Vec<f32>,
}

impl FontProfile {
    /// Find the 1-based tier whose size is within `tolerance` of `size`.
    ///
    /// Tiers are tried largest first; the first match wins. The bound is
    /// inclusive: 12.6 is within 0.6 of 12.0.
    pub fn tier_of(&self, size: f32, tolerance: f32) -> Option<usize> {
        let limit = tolerance + TOLERANCE_EPSILON;
        self.heading_sizes
            .iter()
            .position(|&h| (size - h).abs() <= limit)
            .map(|i| i + 1)
    }

    /// Number of heading tiers.
    pub fn tier_count(&self) -> usize {
        self.heading_sizes.len()
    }
}
