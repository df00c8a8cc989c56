//! # Sensor Module
//!
//! Analog acquisition for the four-knob rig.
//!
//! This module handles:
//! - The fixed eight-channel layout (four knobs, X and Y each)
//! - Reading the ADC through the [`adc::AdcReader`] trait
//! - Averaging several reads per channel per cycle
//! - Capturing the rest centerpoints once at startup

pub mod adc;
pub mod calibration;
pub mod channel;
pub mod sampler;
