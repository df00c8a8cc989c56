//! # ADC Access
//!
//! The [`AdcReader`] trait is the only thing the sampler needs from the
//! analog hardware: one blocking read of one logical channel.
//!
//! [`IioAdc`] implements it on top of the Linux Industrial I/O subsystem,
//! which exposes each converter input as a sysfs attribute:
//!
//! ```text
//! /sys/bus/iio/devices/iio:device0/in_voltage3_raw  ->  "4093\n"
//! ```
//!
//! Each logical [`Channel`] is mapped to a converter input index by
//! configuration, so the knobs can be wired to any pins.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::channel::{Channel, Channels, CHANNEL_COUNT};
use crate::error::{BridgeError, Result};

/// Blocking single-channel ADC read.
///
/// Implementations return a value in `0..=raw_max` or an error. Errors are
/// never retried by callers.
#[cfg_attr(test, mockall::automock)]
pub trait AdcReader {
    /// Reads one raw sample from `channel`.
    fn read(&mut self, channel: Channel) -> Result<u16>;
}

/// ADC backed by an IIO device directory in sysfs.
#[derive(Debug)]
pub struct IioAdc {
    paths: Channels<PathBuf>,
    raw_max: u16,
}

impl IioAdc {
    /// Opens an IIO device and binds the eight logical channels to inputs.
    ///
    /// # Arguments
    ///
    /// * `device_dir` - IIO device directory (e.g. `/sys/bus/iio/devices/iio:device0`)
    /// * `inputs` - converter input index for each channel, in [`Channel::ALL`] order
    /// * `raw_max` - largest value the converter can report
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::AdcInit`] if the directory or any bound input
    /// attribute does not exist.
    pub fn open<P: AsRef<Path>>(device_dir: P, inputs: &[u8], raw_max: u16) -> Result<Self> {
        let device_dir = device_dir.as_ref();

        if inputs.len() != CHANNEL_COUNT {
            return Err(BridgeError::AdcInit(format!(
                "expected {} channel bindings, got {}",
                CHANNEL_COUNT,
                inputs.len()
            )));
        }

        if !device_dir.is_dir() {
            return Err(BridgeError::AdcInit(format!(
                "{} is not an IIO device directory",
                device_dir.display()
            )));
        }

        let paths: Channels<PathBuf> = std::array::from_fn(|i| {
            device_dir.join(format!("in_voltage{}_raw", inputs[i]))
        });

        for (channel, path) in Channel::ALL.iter().zip(paths.iter()) {
            if !path.exists() {
                return Err(BridgeError::AdcInit(format!(
                    "input for channel {} not found at {}",
                    channel,
                    path.display()
                )));
            }
            debug!("Channel {} bound to {}", channel, path.display());
        }

        info!("Opened IIO ADC at {}", device_dir.display());
        Ok(Self { paths, raw_max })
    }

    /// Largest value this converter reports.
    #[must_use]
    pub fn raw_max(&self) -> u16 {
        self.raw_max
    }
}

impl AdcReader for IioAdc {
    fn read(&mut self, channel: Channel) -> Result<u16> {
        let path = &self.paths[channel.index()];

        let text = fs::read_to_string(path).map_err(|e| BridgeError::Adc {
            channel,
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let value: u16 = text.trim().parse().map_err(|e| BridgeError::Adc {
            channel,
            reason: format!("unparsable sample {:?}: {}", text.trim(), e),
        })?;

        if value > self.raw_max {
            return Err(BridgeError::Adc {
                channel,
                reason: format!("sample {} exceeds raw maximum {}", value, self.raw_max),
            });
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_device(values: &[(u8, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (input, value) in values {
            fs::write(dir.path().join(format!("in_voltage{}_raw", input)), value).unwrap();
        }
        dir
    }

    fn all_inputs() -> Vec<(u8, &'static str)> {
        (0..8).map(|i| (i, "4096\n")).collect()
    }

    #[test]
    fn test_open_and_read() {
        let dir = fake_device(&all_inputs());
        fs::write(dir.path().join("in_voltage2_raw"), "123\n").unwrap();

        let mut adc = IioAdc::open(dir.path(), &[0, 1, 2, 3, 4, 5, 6, 7], 8191).unwrap();
        assert_eq!(adc.read(Channel::Ax).unwrap(), 4096);
        assert_eq!(adc.read(Channel::Bx).unwrap(), 123);
        assert_eq!(adc.raw_max(), 8191);
    }

    #[test]
    fn test_channel_bindings_are_respected() {
        let dir = fake_device(&[
            (10, "1"),
            (11, "2"),
            (12, "3"),
            (13, "4"),
            (14, "5"),
            (15, "6"),
            (16, "7"),
            (17, "8"),
        ]);

        let mut adc = IioAdc::open(dir.path(), &[17, 16, 15, 14, 13, 12, 11, 10], 8191).unwrap();
        assert_eq!(adc.read(Channel::Ax).unwrap(), 8);
        assert_eq!(adc.read(Channel::Dy).unwrap(), 1);
    }

    #[test]
    fn test_open_missing_directory() {
        let result = IioAdc::open("/nonexistent/iio:device9", &[0, 1, 2, 3, 4, 5, 6, 7], 8191);
        assert!(matches!(result, Err(BridgeError::AdcInit(_))));
    }

    #[test]
    fn test_open_missing_input() {
        let dir = fake_device(&all_inputs());
        let result = IioAdc::open(dir.path(), &[0, 1, 2, 3, 4, 5, 6, 9], 8191);
        match result {
            Err(BridgeError::AdcInit(msg)) => assert!(msg.contains("D.y")),
            other => panic!("Expected AdcInit error, got: {:?}", other),
        }
    }

    #[test]
    fn test_open_wrong_binding_count() {
        let dir = fake_device(&all_inputs());
        let result = IioAdc::open(dir.path(), &[0, 1, 2], 8191);
        assert!(matches!(result, Err(BridgeError::AdcInit(_))));
    }

    #[test]
    fn test_read_garbage_is_fatal() {
        let dir = fake_device(&all_inputs());
        let mut adc = IioAdc::open(dir.path(), &[0, 1, 2, 3, 4, 5, 6, 7], 8191).unwrap();

        fs::write(dir.path().join("in_voltage5_raw"), "not-a-number").unwrap();
        let err = adc.read(Channel::Cy).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, BridgeError::Adc { channel: Channel::Cy, .. }));
    }

    #[test]
    fn test_read_out_of_range_is_fatal() {
        let dir = fake_device(&all_inputs());
        let mut adc = IioAdc::open(dir.path(), &[0, 1, 2, 3, 4, 5, 6, 7], 4095).unwrap();
        assert!(adc.read(Channel::Ax).is_err());
    }

    #[test]
    fn test_read_vanished_input_is_fatal() {
        let dir = fake_device(&all_inputs());
        let mut adc = IioAdc::open(dir.path(), &[0, 1, 2, 3, 4, 5, 6, 7], 8191).unwrap();

        fs::remove_file(dir.path().join("in_voltage0_raw")).unwrap();
        assert!(matches!(
            adc.read(Channel::Ax),
            Err(BridgeError::Adc { channel: Channel::Ax, .. })
        ));
    }
}
