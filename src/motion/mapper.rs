//! # Motion Mapper
//!
//! Fuses the eight filtered knob channels into a 6-DOF motion vector.
//!
//! ## Base Combination
//!
//! | Output | Formula |
//! |--------|---------|
//! | translation.x | A.y − C.y |
//! | translation.y | D.y − B.y |
//! | rotation.x | C.x − A.x |
//! | rotation.y | B.x − D.x |
//!
//! ## Z Exclusivity
//!
//! Pushing or twisting the cap deflects all four knobs at once, which would
//! otherwise also leak into the pairwise X/Y terms. The Z axes therefore
//! only fire when all four channels of a group are strictly beyond the
//! deadzone, and when they fire they suppress the pairwise terms for that
//! cycle:
//!
//! - X group (A.x, B.x, C.x, D.x) all active:
//!   `translation.z = −(A.x + B.x + C.x + D.x)`, translation.x/y = 0
//! - Y group (A.y, B.y, C.y, D.y) all active:
//!   `rotation.z = (A.y + B.y + C.y + D.y) / 2`, rotation.x/y = 0
//!
//! A Z gesture and a pan/tilt cannot be reported in the same cycle.
//!
//! Inversion flags are applied last, then every axis saturates to `i16`.
//!
//! ## Usage
//!
//! ```
//! use spacemouse_bridge::motion::mapper::{InversionProfile, MotionMapper};
//!
//! let mapper = MotionMapper::new(5, InversionProfile::none());
//! let motion = mapper.map(&[256, 0, 256, 0, 256, 0, 256, 0]);
//! assert_eq!(motion.translation.z, -1024);
//! assert_eq!(motion.translation.x, 0);
//! ```

use serde::Deserialize;

use super::deadzone::FilteredSample;
use crate::sensor::channel::Channel;

/// Three signed 16-bit axis values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vec3 {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Vec3 {
    #[must_use]
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }
}

/// One cycle's 6-DOF output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionVector {
    pub translation: Vec3,
    pub rotation: Vec3,
}

impl MotionVector {
    #[must_use]
    pub const fn new(translation: Vec3, rotation: Vec3) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// True when every axis is zero (the rig is at rest).
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.translation.is_zero() && self.rotation.is_zero()
    }
}

/// Per-axis sign flips, fixed at startup.
///
/// Defaults match the stock knob assembly: zoom, tilt front/back and twist
/// are inverted so the host application sees the conventional directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct InversionProfile {
    /// Pan left/right
    #[serde(default)]
    pub translation_x: bool,
    /// Pan up/down
    #[serde(default)]
    pub translation_y: bool,
    /// Zoom in/out
    #[serde(default = "default_true")]
    pub translation_z: bool,
    /// Tilt front/back
    #[serde(default = "default_true")]
    pub rotation_x: bool,
    /// Tilt left/right
    #[serde(default)]
    pub rotation_y: bool,
    /// Twist
    #[serde(default = "default_true")]
    pub rotation_z: bool,
}

fn default_true() -> bool { true }

impl Default for InversionProfile {
    fn default() -> Self {
        Self {
            translation_x: false,
            translation_y: false,
            translation_z: true,
            rotation_x: true,
            rotation_y: false,
            rotation_z: true,
        }
    }
}

impl InversionProfile {
    /// No axis inverted.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            translation_x: false,
            translation_y: false,
            translation_z: false,
            rotation_x: false,
            rotation_y: false,
            rotation_z: false,
        }
    }
}

/// Intermediate axes before inversion and saturation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct WideMotion {
    tx: i64,
    ty: i64,
    tz: i64,
    rx: i64,
    ry: i64,
    rz: i64,
}

/// Combines filtered channels into a [`MotionVector`].
#[derive(Debug, Clone, Copy)]
pub struct MotionMapper {
    /// Group activation threshold. Shares the per-channel deadzone value.
    deadzone: i32,
    inversion: InversionProfile,
}

impl MotionMapper {
    #[must_use]
    pub fn new(deadzone: i32, inversion: InversionProfile) -> Self {
        Self {
            deadzone,
            inversion,
        }
    }

    /// Maps filtered channels to a motion vector.
    #[must_use]
    pub fn map(&self, filtered: &FilteredSample) -> MotionVector {
        let wide = self.apply_inversion(self.combine(filtered));

        MotionVector {
            translation: Vec3::new(saturate(wide.tx), saturate(wide.ty), saturate(wide.tz)),
            rotation: Vec3::new(saturate(wide.rx), saturate(wide.ry), saturate(wide.rz)),
        }
    }

    /// Base combination plus Z exclusivity, before inversion.
    fn combine(&self, filtered: &FilteredSample) -> WideMotion {
        let v = |ch: Channel| i64::from(filtered[ch.index()]);

        let mut m = WideMotion {
            tx: v(Channel::Ay) - v(Channel::Cy),
            ty: v(Channel::Dy) - v(Channel::By),
            rx: v(Channel::Cx) - v(Channel::Ax),
            ry: v(Channel::Bx) - v(Channel::Dx),
            ..WideMotion::default()
        };

        if self.group_active(filtered, &Channel::X_GROUP) {
            m.tz = -Channel::X_GROUP.iter().map(|&ch| v(ch)).sum::<i64>();
            m.tx = 0;
            m.ty = 0;
        }

        if self.group_active(filtered, &Channel::Y_GROUP) {
            m.rz = Channel::Y_GROUP.iter().map(|&ch| v(ch)).sum::<i64>() / 2;
            m.rx = 0;
            m.ry = 0;
        }

        m
    }

    /// All four channels strictly beyond the deadzone.
    fn group_active(&self, filtered: &FilteredSample, group: &[Channel; 4]) -> bool {
        group
            .iter()
            .all(|ch| i64::from(filtered[ch.index()]).abs() > i64::from(self.deadzone))
    }

    fn apply_inversion(&self, m: WideMotion) -> WideMotion {
        let flip = |value: i64, invert: bool| if invert { -value } else { value };
        let inv = &self.inversion;

        WideMotion {
            tx: flip(m.tx, inv.translation_x),
            ty: flip(m.ty, inv.translation_y),
            tz: flip(m.tz, inv.translation_z),
            rx: flip(m.rx, inv.rotation_x),
            ry: flip(m.ry, inv.rotation_y),
            rz: flip(m.rz, inv.rotation_z),
        }
    }
}

#[inline]
fn saturate(value: i64) -> i16 {
    value.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16
}
