//! # SpaceMouse Report Encoder
//!
//! Serializes a [`MotionVector`] into HID input reports. Pure byte packing,
//! no scaling or clamping happens here.

use bytes::{BufMut, Bytes, BytesMut};

use super::protocol::*;
use crate::motion::mapper::{MotionVector, Vec3};

/// Encode a motion vector into the reports for `layout`
///
/// # Returns
///
/// * `Vec<HidReport>` - two 6-byte reports (split) or one 12-byte report (combined),
///   in the order they must be sent
///
/// # Examples
///
/// ```
/// use spacemouse_bridge::hid::encoder::encode_motion;
/// use spacemouse_bridge::hid::protocol::ReportLayout;
/// use spacemouse_bridge::motion::mapper::{MotionVector, Vec3};
///
/// let motion = MotionVector::new(Vec3::new(1, -1, 0), Vec3::default());
/// let reports = encode_motion(&motion, ReportLayout::Combined);
/// assert_eq!(reports.len(), 1);
/// assert_eq!(&reports[0].payload[..4], &[0x01, 0x00, 0xFF, 0xFF]);
/// ```
pub fn encode_motion(motion: &MotionVector, layout: ReportLayout) -> Vec<HidReport> {
    match layout {
        ReportLayout::Split => vec![
            HidReport {
                id: REPORT_ID_TRANSLATION,
                payload: encode_axes(&motion.translation),
            },
            HidReport {
                id: REPORT_ID_ROTATION,
                payload: encode_axes(&motion.rotation),
            },
        ],
        ReportLayout::Combined => {
            let mut buf = BytesMut::with_capacity(COMBINED_REPORT_SIZE);
            put_axes(&mut buf, &motion.translation);
            put_axes(&mut buf, &motion.rotation);
            vec![HidReport {
                id: REPORT_ID_MOTION,
                payload: buf.freeze(),
            }]
        }
    }
}

/// Encode three axes as a 6-byte little-endian payload
pub fn encode_axes(axes: &Vec3) -> Bytes {
    let mut buf = BytesMut::with_capacity(AXIS_REPORT_SIZE);
    put_axes(&mut buf, axes);
    buf.freeze()
}

fn put_axes(buf: &mut BytesMut, axes: &Vec3) {
    buf.put_i16_le(axes.x);
    buf.put_i16_le(axes.y);
    buf.put_i16_le(axes.z);
}
