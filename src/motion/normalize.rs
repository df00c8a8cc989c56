//! # Normalization
//!
//! Maps each channel's offset from its centerpoint into `-half_range..=half_range`.
//!
//! The two sides of the center are scaled independently. A knob resting at
//! raw 3000 on a 0-8191 converter has 3000 counts of travel below center and
//! 5191 above; each side is stretched to the full half range so that both end
//! stops land on `±half_range` and the center lands exactly on zero:
//!
//! ```text
//! delta < 0:  round(delta * half_range / center)
//! delta >= 0: round(delta * half_range / (raw_max - center))
//! ```
//!
//! Rounding is to nearest with halves away from zero.

use crate::sensor::calibration::CenterPoints;
use crate::sensor::channel::{Channels, CHANNEL_COUNT};
use crate::sensor::sampler::RawSample;

/// Signed, centered values in `-half_range..=half_range`.
pub type NormalizedSample = Channels<i32>;

/// Half-amplitude used by the HID build.
pub const DEFAULT_HALF_RANGE: i32 = 250;

/// Converts raw samples into centered, symmetric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    raw_max: u16,
    half_range: i32,
}

impl Normalizer {
    /// Creates a normalizer for a converter with the given maximum.
    ///
    /// `half_range` is clamped to at least 1.
    #[must_use]
    pub fn new(raw_max: u16, half_range: i32) -> Self {
        Self {
            raw_max,
            half_range: half_range.max(1),
        }
    }

    #[must_use]
    pub fn half_range(&self) -> i32 {
        self.half_range
    }

    /// Normalizes all eight channels against their centers.
    #[must_use]
    pub fn normalize(&self, raw: &RawSample, centers: &CenterPoints) -> NormalizedSample {
        let mut out = [0i32; CHANNEL_COUNT];
        for (i, value) in out.iter_mut().enumerate() {
            *value = self.normalize_one(raw[i], centers.values()[i]);
        }
        out
    }

    /// Normalizes a single reading.
    ///
    /// Both denominators are floored at 1, so a center on a range boundary
    /// degrades to a saturated output instead of a division fault.
    #[must_use]
    pub fn normalize_one(&self, raw: u16, center: u16) -> i32 {
        let raw = i64::from(raw.min(self.raw_max));
        let center = i64::from(center.min(self.raw_max));
        let half = i64::from(self.half_range);

        let delta = raw - center;
        let span = if delta < 0 {
            center
        } else {
            i64::from(self.raw_max) - center
        }
        .max(1);

        let scaled = round_div(delta * half, span);
        scaled.clamp(-half, half) as i32
    }
}

/// Integer division rounding to nearest, halves away from zero. `den > 0`.
fn round_div(num: i64, den: i64) -> i64 {
    if num >= 0 {
        (2 * num + den) / (2 * den)
    } else {
        -((2 * -num + den) / (2 * den))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centers(value: u16) -> CenterPoints {
        CenterPoints::new([value; CHANNEL_COUNT], 8191).unwrap()
    }

    #[test]
    fn test_center_maps_to_zero() {
        let normalizer = Normalizer::new(8191, 512);
        let c = centers(4096);
        assert_eq!(normalizer.normalize(&[4096; CHANNEL_COUNT], &c), [0; CHANNEL_COUNT]);
    }

    #[test]
    fn test_center_maps_to_zero_off_midpoint() {
        let normalizer = Normalizer::new(8191, 250);
        let c = CenterPoints::new([1, 100, 3000, 4095, 4096, 5000, 8000, 8190], 8191).unwrap();
        let raw = *c.values();
        assert_eq!(normalizer.normalize(&raw, &c), [0; CHANNEL_COUNT]);
    }

    #[test]
    fn test_positive_branch_example() {
        // 2048 * 512 / (8191 - 4096) = 256.06
        let normalizer = Normalizer::new(8191, 512);
        assert_eq!(normalizer.normalize_one(6144, 4096), 256);
    }

    #[test]
    fn test_negative_branch_uses_center_as_span() {
        // -2048 * 512 / 4096 = -256
        let normalizer = Normalizer::new(8191, 512);
        assert_eq!(normalizer.normalize_one(2048, 4096), -256);
    }

    #[test]
    fn test_extremes_map_to_half_range() {
        let normalizer = Normalizer::new(8191, 250);
        assert_eq!(normalizer.normalize_one(0, 3000), -250);
        assert_eq!(normalizer.normalize_one(8191, 3000), 250);
        assert_eq!(normalizer.normalize_one(0, 7000), -250);
        assert_eq!(normalizer.normalize_one(8191, 7000), 250);
    }

    #[test]
    fn test_asymmetric_scaling() {
        // Center 2000: 2000 counts below, 6191 above
        let normalizer = Normalizer::new(8191, 250);
        assert_eq!(normalizer.normalize_one(1000, 2000), -125);
        // 1000 * 250 / 6191 = 40.38
        assert_eq!(normalizer.normalize_one(3000, 2000), 40);
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        // span 4: delta 1 * 10 / 4 = 2.5 -> 3, -2.5 -> -3
        let normalizer = Normalizer::new(8, 10);
        assert_eq!(normalizer.normalize_one(5, 4), 3);
        assert_eq!(normalizer.normalize_one(3, 4), -3);
    }

    #[test]
    fn test_output_always_bounded() {
        let normalizer = Normalizer::new(8191, 512);
        for center in [1u16, 17, 4096, 8000, 8190] {
            for raw in (0..=8191u16).step_by(97) {
                let v = normalizer.normalize_one(raw, center);
                assert!((-512..=512).contains(&v), "raw {} center {} -> {}", raw, center, v);
            }
        }
    }

    #[test]
    fn test_degenerate_center_does_not_divide_by_zero() {
        let normalizer = Normalizer::new(8191, 250);
        assert_eq!(normalizer.normalize_one(0, 0), 0);
        // 100 * 250 / 8191 = 3.05
        assert_eq!(normalizer.normalize_one(100, 0), 3);
        assert_eq!(normalizer.normalize_one(8191, 8191), 0);
        assert_eq!(normalizer.normalize_one(0, 8191), -250);
    }

    #[test]
    fn test_raw_above_max_is_clamped() {
        let normalizer = Normalizer::new(4095, 250);
        assert_eq!(normalizer.normalize_one(u16::MAX, 2048), 250);
    }

    #[test]
    fn test_half_range_floor() {
        assert_eq!(Normalizer::new(8191, 0).half_range(), 1);
        assert_eq!(Normalizer::new(8191, -5).half_range(), 1);
    }
}
