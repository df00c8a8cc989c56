//! # Sampler
//!
//! Averages several raw reads per channel to knock down converter noise.
//!
//! Every inner iteration reads all eight channels before moving on, so the
//! channels stay time-correlated instead of each channel being sampled in
//! its own burst.

use super::adc::AdcReader;
use super::channel::{Channel, Channels, CHANNEL_COUNT};
use crate::error::{BridgeError, Result};
use serde::de::Error;

/// Averaged raw readings, one per channel.
pub type RawSample = Channels<u16>;

/// Averages raw reads from an [`AdcReader`].
#[derive(Debug)]
pub struct Sampler<A> {
    adc: A,
}

impl<A: AdcReader> Sampler<A> {
    #[must_use]
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    /// Reads every channel `samples` times and returns the truncated mean.
    ///
    /// # Errors
    ///
    /// - Any failed read aborts the acquisition and is returned as-is.
    /// - `samples == 0` is a configuration error.
    pub fn acquire(&mut self, samples: u32) -> Result<RawSample> {
        if samples == 0 {
            return Err(BridgeError::Config(toml::de::Error::custom(
                "sample count must be greater than 0",
            )));
        }

        let mut sums = [0u64; CHANNEL_COUNT];

        for _ in 0..samples {
            for channel in Channel::ALL {
                sums[channel.index()] += u64::from(self.adc.read(channel)?);
            }
        }

        // Mean of u16 values always fits in u16
        Ok(sums.map(|sum| (sum / u64::from(samples)) as u16))
    }
}
