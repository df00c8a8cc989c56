//! # Centerpoint Calibration
//!
//! Captures the rest position of every channel once at startup. All motion
//! is measured relative to these centers for the rest of the process
//! lifetime; there is no drift compensation and no way to recalibrate short
//! of restarting.
//!
//! The knobs must be untouched while this runs. A knob held off-center is
//! indistinguishable from a badly mounted one, so only the degenerate case
//! (a center sitting on a raw-range boundary) is detected.
//!
//! ## Usage
//!
//! ```no_run
//! use spacemouse_bridge::sensor::adc::IioAdc;
//! use spacemouse_bridge::sensor::calibration::CenterPoints;
//! use spacemouse_bridge::sensor::sampler::Sampler;
//!
//! let adc = IioAdc::open("/sys/bus/iio/devices/iio:device0", &[0, 1, 2, 3, 4, 5, 6, 7], 8191)?;
//! let mut sampler = Sampler::new(adc);
//! let centers = CenterPoints::calibrate(&mut sampler, 100, 8191)?;
//! println!("A.x rests at {}", centers.values()[0]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use tracing::info;

use super::adc::AdcReader;
use super::channel::{format_channels, Channel, Channels};
use super::sampler::Sampler;
use crate::error::{BridgeError, Result};

/// Default number of reads averaged into each centerpoint.
pub const DEFAULT_CALIBRATION_SAMPLES: u32 = 100;

/// Per-channel rest positions. Immutable once captured.
///
/// Every center is strictly inside `(0, raw_max)`, so both sides of the
/// normalization always have a non-zero span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenterPoints {
    values: Channels<u16>,
    raw_max: u16,
}

impl CenterPoints {
    /// Validates externally captured centers.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::DegenerateCenter`] for the first channel whose
    /// center is `0` or `>= raw_max`.
    pub fn new(values: Channels<u16>, raw_max: u16) -> Result<Self> {
        for channel in Channel::ALL {
            let center = values[channel.index()];
            if center == 0 || center >= raw_max {
                return Err(BridgeError::DegenerateCenter {
                    channel,
                    center,
                    raw_max,
                });
            }
        }
        Ok(Self { values, raw_max })
    }

    /// Averages `samples` reads per channel and stores them as centers.
    ///
    /// # Errors
    ///
    /// Propagates any acquisition failure, or a degenerate center.
    pub fn calibrate<A: AdcReader>(
        sampler: &mut Sampler<A>,
        samples: u32,
        raw_max: u16,
    ) -> Result<Self> {
        info!("Calibrating centerpoints from {} samples, keep the knobs still", samples);
        let values = sampler.acquire(samples)?;
        let centers = Self::new(values, raw_max)?;
        info!("Centerpoints: {}", format_channels(&centers.values));
        Ok(centers)
    }

    /// Center of every channel, in [`Channel::ALL`] order.
    #[must_use]
    pub fn values(&self) -> &Channels<u16> {
        &self.values
    }

    /// Raw maximum the centers were validated against.
    #[must_use]
    pub fn raw_max(&self) -> u16 {
        self.raw_max
    }
}
