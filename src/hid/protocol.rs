//! # SpaceMouse HID Protocol Constants and Types
//!
//! Report layouts understood by the 3Dconnexion host driver.
//!
//! Every axis is a signed 16-bit little-endian value in `-32768..=32767`.
//! Two layouts exist depending on which device the rig impersonates:
//!
//! ```text
//! Split (Pro / Wireless):
//!   report 1: TX_lo TX_hi TY_lo TY_hi TZ_lo TZ_hi
//!   report 2: RX_lo RX_hi RY_lo RY_hi RZ_lo RZ_hi
//!
//! Combined (Enterprise):
//!   report 1: TX TY TZ RX RY RZ   (12 bytes)
//! ```

use bytes::Bytes;
use serde::Deserialize;
use std::fmt;

/// Translation report id (split layout)
pub const REPORT_ID_TRANSLATION: u8 = 1;

/// Rotation report id (split layout)
pub const REPORT_ID_ROTATION: u8 = 2;

/// Single motion report id (combined layout)
pub const REPORT_ID_MOTION: u8 = 1;

/// Payload size of one three-axis report
pub const AXIS_REPORT_SIZE: usize = 6;

/// Payload size of the combined six-axis report
pub const COMBINED_REPORT_SIZE: usize = 12;

/// How the six axes are grouped into reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLayout {
    /// Translation in report 1, rotation in report 2.
    Split,
    /// All six axes in report 1.
    Combined,
}

/// Device the rig presents itself as. Fixed per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceProfile {
    SpaceMousePro,
    SpaceMouseWireless,
    SpaceMouseEnterprise,
}

impl DeviceProfile {
    /// USB vendor id the gadget must be configured with.
    #[must_use]
    pub const fn vendor_id(self) -> u16 {
        match self {
            DeviceProfile::SpaceMousePro => 0x046d,
            DeviceProfile::SpaceMouseWireless | DeviceProfile::SpaceMouseEnterprise => 0x256f,
        }
    }

    /// USB product id the gadget must be configured with.
    #[must_use]
    pub const fn product_id(self) -> u16 {
        match self {
            DeviceProfile::SpaceMousePro => 0xc62b,
            DeviceProfile::SpaceMouseWireless => 0xc631,
            DeviceProfile::SpaceMouseEnterprise => 0xc633,
        }
    }

    #[must_use]
    pub const fn layout(self) -> ReportLayout {
        match self {
            DeviceProfile::SpaceMousePro | DeviceProfile::SpaceMouseWireless => ReportLayout::Split,
            DeviceProfile::SpaceMouseEnterprise => ReportLayout::Combined,
        }
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceProfile::SpaceMousePro => "SpaceMouse Pro",
            DeviceProfile::SpaceMouseWireless => "SpaceMouse Wireless",
            DeviceProfile::SpaceMouseEnterprise => "SpaceMouse Enterprise",
        };
        write!(f, "{} ({:04x}:{:04x})", name, self.vendor_id(), self.product_id())
    }
}

/// One HID input report: id plus payload (id not included in the payload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HidReport {
    pub id: u8,
    pub payload: Bytes,
}
