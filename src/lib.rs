//! # SpaceMouse Bridge Library
//!
//! Turn four two-axis analog joysticks into a 6-DOF SpaceMouse.
//!
//! This library provides the pipeline that samples the knobs through a Linux
//! IIO ADC, converts their deflection into translation and rotation, and
//! delivers SpaceMouse-compatible HID input reports through a USB gadget.

pub mod config;
pub mod error;
pub mod hid;
pub mod motion;
pub mod pipeline;
pub mod sensor;
