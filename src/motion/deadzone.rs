//! # Deadzone
//!
//! Static noise gate on normalized values. Anything whose magnitude is
//! strictly below the threshold is forced to zero; everything else passes
//! through untouched (no rescaling, no smoothing).

use super::normalize::NormalizedSample;

/// Default deadzone in normalized units.
pub const DEFAULT_DEADZONE: i32 = 5;

/// Deadzone-filtered values.
pub type FilteredSample = NormalizedSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadzoneFilter {
    threshold: i32,
}

impl Default for DeadzoneFilter {
    fn default() -> Self {
        Self::new(DEFAULT_DEADZONE)
    }
}

impl DeadzoneFilter {
    /// Negative thresholds are treated as 0 (no filtering).
    #[must_use]
    pub fn new(threshold: i32) -> Self {
        Self {
            threshold: threshold.max(0),
        }
    }

    #[must_use]
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Filters all channels.
    #[must_use]
    pub fn apply(&self, values: &NormalizedSample) -> FilteredSample {
        values.map(|v| self.apply_one(v))
    }

    #[inline]
    #[must_use]
    pub fn apply_one(&self, value: i32) -> i32 {
        if value.unsigned_abs() < self.threshold.unsigned_abs() {
            0
        } else {
            value
        }
    }
}
