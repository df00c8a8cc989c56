//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{BridgeError, Result};
use crate::hid::protocol::DeviceProfile;
use crate::motion::mapper::InversionProfile;
use crate::sensor::channel::CHANNEL_COUNT;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub adc: AdcConfig,
    pub sampling: SamplingConfig,
    pub motion: MotionConfig,
    pub hid: HidConfig,
    pub logging: LoggingConfig,
}

/// ADC configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AdcConfig {
    #[serde(default = "default_device_dir")]
    pub device_dir: String,

    /// Converter input index for A.x, A.y, B.x, B.y, C.x, C.y, D.x, D.y
    #[serde(default = "default_channels")]
    pub channels: Vec<u8>,

    #[serde(default = "default_raw_max")]
    pub raw_max: u16,
}

/// Acquisition cadence
#[derive(Debug, Deserialize, Clone)]
pub struct SamplingConfig {
    #[serde(default = "default_samples_per_cycle")]
    pub samples_per_cycle: u32,

    #[serde(default = "default_calibration_samples")]
    pub calibration_samples: u32,

    #[serde(default = "default_cycle_delay_ms")]
    pub cycle_delay_ms: u64,
}

/// Motion processing configuration
#[derive(Debug, Deserialize, Clone)]
pub struct MotionConfig {
    #[serde(default = "default_half_range")]
    pub half_range: i32,

    #[serde(default = "default_deadzone")]
    pub deadzone: i32,

    #[serde(default)]
    pub invert: InversionProfile,
}

/// HID output configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HidConfig {
    /// When false, reports are only logged (no USB gadget needed)
    #[serde(default = "default_hid_enabled")]
    pub enabled: bool,

    #[serde(default = "default_profile")]
    pub profile: DeviceProfile,

    #[serde(default = "default_hid_device")]
    pub device: String,

    /// UDC `state` attribute; empty means auto-detect
    #[serde(default)]
    pub udc_state: String,
}

/// Diagnostics configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default)]
    pub diagnostics: Diagnostics,
}

/// Which pipeline stage to dump every cycle (at DEBUG level)
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Diagnostics {
    #[default]
    Off,
    /// Averaged raw ADC values
    Raw,
    /// Centered values before the deadzone
    Normalized,
    /// Centered values after the deadzone
    Filtered,
    /// Translation and rotation output
    Motion,
    /// Filtered values and motion output side by side
    Combined,
}

// Default value functions
fn default_device_dir() -> String { "/sys/bus/iio/devices/iio:device0".to_string() }
fn default_channels() -> Vec<u8> { (0..CHANNEL_COUNT as u8).collect() }
fn default_raw_max() -> u16 { 8191 }

fn default_samples_per_cycle() -> u32 { 5 }
fn default_calibration_samples() -> u32 { crate::sensor::calibration::DEFAULT_CALIBRATION_SAMPLES }
fn default_cycle_delay_ms() -> u64 { 5 }

fn default_half_range() -> i32 { crate::motion::normalize::DEFAULT_HALF_RANGE }
fn default_deadzone() -> i32 { crate::motion::deadzone::DEFAULT_DEADZONE }

fn default_hid_enabled() -> bool { true }
fn default_profile() -> DeviceProfile { DeviceProfile::SpaceMouseEnterprise }
fn default_hid_device() -> String { "/dev/hidg0".to_string() }

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use spacemouse_bridge::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        // Validate ADC configuration
        if self.adc.device_dir.is_empty() {
            return Err(invalid("adc device_dir cannot be empty"));
        }

        if self.adc.channels.len() != CHANNEL_COUNT {
            return Err(invalid(format!(
                "adc channels must list exactly {} inputs (A.x A.y B.x B.y C.x C.y D.x D.y)",
                CHANNEL_COUNT
            )));
        }

        for (i, input) in self.adc.channels.iter().enumerate() {
            if self.adc.channels[..i].contains(input) {
                return Err(invalid(format!("adc input {} is bound to more than one channel", input)));
            }
        }

        if self.adc.raw_max < 2 {
            return Err(invalid("raw_max must be at least 2"));
        }

        // Validate sampling cadence
        if self.sampling.samples_per_cycle == 0 || self.sampling.samples_per_cycle > 1000 {
            return Err(invalid("samples_per_cycle must be between 1 and 1000"));
        }

        if self.sampling.calibration_samples == 0 || self.sampling.calibration_samples > 100_000 {
            return Err(invalid("calibration_samples must be between 1 and 100000"));
        }

        if self.sampling.cycle_delay_ms > 1000 {
            return Err(invalid("cycle_delay_ms must be between 0 and 1000"));
        }

        // Validate motion scaling
        if self.motion.half_range < 1 || self.motion.half_range > 16384 {
            return Err(invalid("half_range must be between 1 and 16384"));
        }

        if self.motion.deadzone < 0 || self.motion.deadzone > self.motion.half_range {
            return Err(invalid("deadzone must be between 0 and half_range"));
        }

        // Validate HID output
        if self.hid.enabled && self.hid.device.is_empty() {
            return Err(invalid("hid device cannot be empty when enabled"));
        }

        Ok(())
    }
}

fn invalid(msg: impl std::fmt::Display) -> BridgeError {
    BridgeError::Config(toml::de::Error::custom(msg))
}
