//! # Motion Module
//!
//! Signal processing from raw samples to a 6-DOF motion vector.
//!
//! This module handles:
//! - Centering and asymmetric scaling into a symmetric range
//! - Static deadzone suppression
//! - Fusing eight channels into translation and rotation with Z exclusivity
//! - Per-axis inversion and `i16` saturation

pub mod deadzone;
pub mod mapper;
pub mod normalize;
