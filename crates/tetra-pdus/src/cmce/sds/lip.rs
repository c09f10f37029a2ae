//! Location Information Protocol, TS 100 392-18.
//!
//! LIP rides on SDS type-4 data; it completes the event opened by the SDS
//! layer rather than starting its own.

use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;
use tetra_saps::DecodeContext;

/// Minimum size of a short location report (6.2.1).
const SHORT_REPORT_MIN_BITS: usize = 68;

/// LIP service entry point. Cursor starts at the LIP PDU type; the SDS
/// protocol identifier has been stripped.
pub fn service(
    pdu: &mut BitBuffer,
    _ctx: &DecodeContext,
    report: &mut Report,
) -> Result<(), PduParseErr> {
    let pdu_type = pdu.read_field(2, "lip pdu type")?;

    match pdu_type {
        // table 6.29
        0b00 => {
            report.add("sds-lip", "short location report");
            parse_short_location_report(pdu, report)?;
        }
        0b01 => {
            report.add("sds-lip", "extension pdu");
            parse_extended_message(pdu, report)?;
        }
        _ => {
            report.add("sds-lip", "reserved");
        }
    }
    Ok(())
}

/// Short location report PDU, 6.2.1. Cursor is past the 2-bit PDU type.
fn parse_short_location_report(pdu: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    if pdu.get_len() < SHORT_REPORT_MIN_BITS {
        report.add("invalid pdu size", pdu.get_len() as u64);
        report.add("pdu minimum size", SHORT_REPORT_MIN_BITS as u64);
        return Ok(());
    }

    pdu.skip(2); // time elapsed

    let longitude = pdu.read_field(25, "longitude")? as u32;
    report.add("longitude uint32", longitude as u64);
    report.add("longitude", decode_longitude(longitude));

    let latitude = pdu.read_field(24, "latitude")? as u32;
    report.add("latitude uint32", latitude as u64);
    report.add("latitude", decode_latitude(latitude));

    let position_error = pdu.read_field(3, "position error")? as u8;
    report.add("position error", decode_position_error(position_error));

    let horizontal_velocity = pdu.read_field(7, "horizontal velocity")? as u8;
    report.add("horizontal_velocity uint8", horizontal_velocity as u64);
    report.add("horizontal_velocity", decode_horizontal_velocity(horizontal_velocity));

    let direction_of_travel = pdu.read_field(4, "direction of travel")? as u8;
    report.add("direction of travel", decode_direction_of_travel(direction_of_travel));

    // 6.3.87 table 6.120
    let type_of_additional_data = pdu.read_field(1, "type of additional data")?;
    let additional_data = pdu.read_field(8, "additional data")?;

    if type_of_additional_data == 0 {
        report.add("reason for sending", additional_data);
    } else {
        report.add("user-defined additional data", additional_data);
    }

    Ok(())
}

/// LIP extension PDU, 6.3.62 table 6.92. The extension bodies are labeled
/// but not walked.
fn parse_extended_message(pdu: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let extension = pdu.read_field(4, "extension")?;

    let label = match extension {
        0b0001 => "immediate location report request",
        0b0011 => "long location report",
        0b0100 => "location report ack",
        0b0101 => "basic location parameters request/response",
        0b0110 => "add/modify trigger request/response",
        0b0111 => "remove trigger request/response",
        0b1000 => "report trigger request/response",
        0b1001 => "report basic location parameters request/response",
        0b1010 => "location reporting enable/disable request/response",
        0b1011 => "location reporting temporary control request/response",
        0b1100 => "backlog request/response",
        _ => "reserved",
    };
    report.add("extension", label);
    Ok(())
}

/// Decode a two's complement field scaled so that the full positive range
/// maps to `mult` degrees.
fn decode_twos_complement(data: u32, n_bits: u8, mult: f64) -> f64 {
    let half = (1u32 << (n_bits - 1)) as f64;
    if data & (1 << (n_bits - 1)) != 0 {
        // negative value, take the two's complement
        let val = (!data).wrapping_add(1) & (u32::MAX >> (32 - n_bits));
        val as f64 * -mult / half
    } else {
        data as f64 * mult / half
    }
}

/// LIP longitude, 6.3.50: 25-bit two's complement, 180 degrees full scale.
pub fn decode_longitude(longitude: u32) -> f64 {
    decode_twos_complement(longitude, 25, 180.0)
}

/// Inverse of decode_longitude, used to validate the coordinate scaling.
pub fn encode_longitude(longitude: f64) -> u32 {
    let half = (1u32 << 24) as f64;
    ((longitude * half / 180.0).round() as i64 as u32) & 0x1FF_FFFF
}

/// LIP latitude, 6.3.30: 24-bit two's complement, 90 degrees full scale.
pub fn decode_latitude(latitude: u32) -> f64 {
    decode_twos_complement(latitude, 24, 90.0)
}

/// LIP horizontal velocity, 6.3.17: value 127 means unknown, otherwise
/// v = 16 * 1.038^(13 - n) km/h.
fn decode_horizontal_velocity(val: u8) -> f64 {
    if val == 127 {
        return -1.0;
    }
    const C: f64 = 16.0;
    const X: f64 = 0.038;
    const A: f64 = 13.0;
    C * (1.0 + X).powf(A - val as f64)
}

/// LIP direction of travel, 6.3.5: sixteen compass points.
fn decode_direction_of_travel(val: u8) -> &'static str {
    const DIRECTIONS: [&str; 16] = [
        "0 N", "22.5 NNE", "45 NE", "67.5 ENE",
        "90 E", "112.5 ESE", "135 SE", "157.5 SSE",
        "180 S", "202.5 SSW", "225 SW", "247.5 WSW",
        "270 W", "292.5 WNW", "315 NW", "337.5 NNW",
    ];
    DIRECTIONS[(val & 0xF) as usize]
}

/// LIP position error, 6.3.63.
fn decode_position_error(val: u8) -> &'static str {
    const POS_ERROR: [&str; 8] = [
        "< 2 m", "< 20 m", "< 200 m", "< 2 km", "< 20 km", "<= 200 km", "> 200 km", "unknown",
    ];
    POS_ERROR[(val & 0x7) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_coordinates() {
        // reference fix: Melbourne area
        assert!((decode_longitude(0x0CE6C98) - 145.142012).abs() < 1e-4);
        assert!((decode_latitude(0xCA1959) - -37.899131).abs() < 1e-4);
    }

    #[test]
    fn test_longitude_roundtrip_within_lsb() {
        for &x in &[0u32, 1, 0x0CE6C98, 0x1000000, 0x1FFFFFF, 0x17F3A21] {
            let back = encode_longitude(decode_longitude(x));
            let diff = (back as i64 - x as i64).rem_euclid(1 << 25);
            let diff = diff.min((1 << 25) - diff);
            assert!(diff <= 1, "longitude {:#x} -> {:#x}", x, back);
        }
    }

    #[test]
    fn test_velocity() {
        assert_eq!(decode_horizontal_velocity(127), -1.0);
        // v(13) = 16 km/h exactly
        assert!((decode_horizontal_velocity(13) - 16.0).abs() < 1e-9);
        // value 70: about 1.9 km/h... decreasing in n
        assert!(decode_horizontal_velocity(70) < decode_horizontal_velocity(13));
    }

    #[test]
    fn test_labels() {
        assert_eq!(decode_position_error(2), "< 200 m");
        assert_eq!(decode_direction_of_travel(3), "67.5 ENE");
    }
}
