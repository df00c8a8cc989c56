//! # SpaceMouse Report Decoder
//!
//! Parses HID input reports back into axis values. Used by the monitor
//! transport to print what would go over the wire.

use super::protocol::*;
use crate::error::{BridgeError, Result};
use crate::motion::mapper::{MotionVector, Vec3};

/// Decode a 6-byte little-endian payload into three axes
///
/// # Errors
///
/// Returns error if the payload is shorter than [`AXIS_REPORT_SIZE`]
pub fn decode_axes(payload: &[u8]) -> Result<Vec3> {
    if payload.len() < AXIS_REPORT_SIZE {
        return Err(BridgeError::Report(format!(
            "axis payload too short: {} bytes (need {})",
            payload.len(),
            AXIS_REPORT_SIZE
        )));
    }

    let axis = |i: usize| i16::from_le_bytes([payload[2 * i], payload[2 * i + 1]]);
    Ok(Vec3::new(axis(0), axis(1), axis(2)))
}

/// Decode the reports for one cycle back into a motion vector
///
/// # Errors
///
/// Returns error if a report id is unknown for `layout`, a payload is too
/// short, or a required report is missing
pub fn decode_motion(reports: &[HidReport], layout: ReportLayout) -> Result<MotionVector> {
    match layout {
        ReportLayout::Split => {
            let mut translation = None;
            let mut rotation = None;

            for report in reports {
                match report.id {
                    REPORT_ID_TRANSLATION => translation = Some(decode_axes(&report.payload)?),
                    REPORT_ID_ROTATION => rotation = Some(decode_axes(&report.payload)?),
                    other => {
                        return Err(BridgeError::Report(format!(
                            "unexpected report id {} in split layout",
                            other
                        )))
                    }
                }
            }

            match (translation, rotation) {
                (Some(t), Some(r)) => Ok(MotionVector::new(t, r)),
                _ => Err(BridgeError::Report(
                    "split layout needs both translation and rotation reports".to_string(),
                )),
            }
        }
        ReportLayout::Combined => {
            let report = reports
                .iter()
                .find(|r| r.id == REPORT_ID_MOTION)
                .ok_or_else(|| BridgeError::Report("missing combined motion report".to_string()))?;

            if report.payload.len() < COMBINED_REPORT_SIZE {
                return Err(BridgeError::Report(format!(
                    "combined payload too short: {} bytes (need {})",
                    report.payload.len(),
                    COMBINED_REPORT_SIZE
                )));
            }

            Ok(MotionVector::new(
                decode_axes(&report.payload[..AXIS_REPORT_SIZE])?,
                decode_axes(&report.payload[AXIS_REPORT_SIZE..])?,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hid::encoder::encode_motion;
    use bytes::Bytes;

    #[test]
    fn test_round_trip_extremes_both_layouts() {
        let values = [i16::MIN, -1024, -1, 0, 1, 256, i16::MAX];

        for layout in [ReportLayout::Split, ReportLayout::Combined] {
            for &a in &values {
                for &b in &values {
                    let motion = MotionVector::new(Vec3::new(a, b, -a), Vec3::new(b, a, b));
                    let decoded = decode_motion(&encode_motion(&motion, layout), layout).unwrap();
                    assert_eq!(decoded, motion, "layout {:?}", layout);
                }
            }
        }
    }

    #[test]
    fn test_round_trip_full_range_single_axis() {
        for v in (i16::MIN..=i16::MAX).step_by(251).chain([i16::MAX]) {
            let motion = MotionVector::new(Vec3::new(v, 0, 0), Vec3::new(0, 0, v));
            let decoded = decode_motion(
                &encode_motion(&motion, ReportLayout::Combined),
                ReportLayout::Combined,
            )
            .unwrap();
            assert_eq!(decoded, motion);
        }
    }

    #[test]
    fn test_decode_axes_too_short() {
        assert!(decode_axes(&[0x01, 0x02, 0x03]).is_err());
    }

    #[test]
    fn test_decode_split_unknown_id() {
        let reports = vec![HidReport {
            id: 3,
            payload: Bytes::from_static(&[0; 6]),
        }];
        assert!(decode_motion(&reports, ReportLayout::Split).is_err());
    }

    #[test]
    fn test_decode_split_missing_rotation() {
        let reports = vec![HidReport {
            id: REPORT_ID_TRANSLATION,
            payload: Bytes::from_static(&[0; 6]),
        }];
        assert!(decode_motion(&reports, ReportLayout::Split).is_err());
    }

    #[test]
    fn test_decode_combined_too_short() {
        let reports = vec![HidReport {
            id: REPORT_ID_MOTION,
            payload: Bytes::from_static(&[0; 6]),
        }];
        match decode_motion(&reports, ReportLayout::Combined) {
            Err(BridgeError::Report(msg)) => assert!(msg.contains("too short")),
            other => panic!("Expected Report error, got: {:?}", other),
        }
    }
}
