//! SDS user-defined type 4 data, Clause 29.4 / 29.5 and Annex J.
//!
//! An 8-bit protocol identifier splits the space: 0x00..0x7F are protocols
//! carried without SDS-TL, 0x80..0xFF run over the SDS transport layer.

use tetra_core::{BitBuffer, PduParseErr, textdec};
use tetra_core::report::Report;
use tetra_saps::DecodeContext;

use crate::cmce::sds::{lip, transfer};

/// Longest permitted type-4 payload including the protocol identifier
/// (14.8.52).
const MAX_TYPE4_BITS: usize = 2047;

pub fn parse_type4_data(
    buf: &mut BitBuffer,
    len: usize,
    ctx: &DecodeContext,
    report: &mut Report,
) -> Result<(), PduParseErr> {
    if buf.get_len() < len || len > MAX_TYPE4_BITS {
        report.add("type4", "invalid pdu");
        report.add("type4 declared len", len as u64);
        report.add("type4 actual len", buf.get_len() as u64);
        return Ok(());
    }

    let protocol_id = buf.read_field(8, "protocol id")? as u8;
    report.add("protocol id", protocol_id as u64);

    if protocol_id <= 0x7F {
        // Non SDS-TL protocols, table 29.21
        match protocol_id {
            0b0000_0000 => {
                report.add("protocol info", "reserved");
            }
            0b0000_0001 => {
                report.add("protocol info", "OTAK");
            }
            0b0000_0010 => {
                report.add("protocol info", "simple text messaging");
                parse_simple_text_messaging(buf, len, report)?;
            }
            0b0000_0011 => {
                report.add("protocol info", "simple location system");
                parse_simple_location_system(buf, len, report)?;
            }
            0b0000_0100 => {
                report.add("protocol info", "wireless datagram protocol");
            }
            0b0000_0101 => {
                report.add("protocol info", "wireless control message protocol");
            }
            0b0000_0110 => {
                report.add("protocol info", "M-DMO");
            }
            0b0000_0111 => {
                report.add("protocol info", "pin authentification");
            }
            0b0000_1000 => {
                report.add("protocol info", "end-to-end encrypted message");
            }
            0b0000_1001 => {
                // same wire format as simple text messaging, only the
                // handling by the MS differs
                report.add("protocol info", "simple immediate text messaging");
                parse_simple_text_messaging(buf, len, report)?;
            }
            0b0000_1010 => {
                report.add("protocol info", "location information protocol");
                let mut sdu = buf.remaining_view();
                lip::service(&mut sdu, ctx, report)?;
            }
            0b0000_1011 => {
                report.add("protocol info", "net assist protocol");
            }
            0b0000_1100 => {
                report.add("protocol info", "concatenated sds message");
            }
            0b0000_1101 => {
                report.add("protocol info", "DOTAM");
            }
            0b0111_1111 => {
                report.add("protocol info", "reserved for extension");
            }
            other if other <= 0b0011_1111 => {
                report.add("protocol info", "reserved for future standard definition");
            }
            _ => {
                report.add("protocol info", "available for user application definition");
            }
        }
    } else {
        // SDS-TL carried protocols, Clause 29.4.3.8 table 29.20
        let message_type = buf.read_field(4, "message type")?;
        report.add("message type", message_type);

        match message_type {
            0b0000 => {
                report.add("sds-pdu", "SDS-TRANSFER");
                transfer::parse_sds_transfer(buf, len, protocol_id, report)?;
            }
            0b0001 => {
                report.add("sds-pdu", "SDS-REPORT");
            }
            0b0010 => {
                report.add("sds-pdu", "SDS-ACK");
            }
            other if other <= 0b0111 => {
                report.add("sds-pdu", "reserved for additional message types");
            }
            _ => {
                report.add("protocol info", "defined by application");
            }
        }
    }

    Ok(())
}

/// Simple text messaging, Clause 29.5.2. Cursor is past the protocol id.
pub fn parse_simple_text_messaging(
    buf: &mut BitBuffer,
    len: usize,
    report: &mut Report,
) -> Result<(), PduParseErr> {
    // In the plain protocol this bit is a fill bit and should be 0; under
    // SDS-TL it doubles as the timestamp present flag (29.5.3.3)
    let timestamp_used = buf.read_field(1, "timestamp flag")?;

    let text_coding_scheme = buf.read_field(7, "text coding scheme")?;
    report.add("text coding scheme", text_coding_scheme);

    if timestamp_used == 1 {
        report.add("timestamp", buf.read_field(24, "timestamp")?);
    }

    let sdu_length = len.saturating_sub(buf.get_pos());
    let sdu = buf.remaining_view();
    report.add("infos", decode_text(&sdu, text_coding_scheme, sdu_length));
    Ok(())
}

/// Simple location system, Clause 29.5.5. Cursor is past the protocol id.
pub fn parse_simple_location_system(
    buf: &mut BitBuffer,
    len: usize,
    report: &mut Report,
) -> Result<(), PduParseErr> {
    let location_system_coding = buf.read_field(8, "location coding system")?;
    report.add("location coding system", location_system_coding);

    let sdu_length = len.saturating_sub(buf.get_pos());
    let sdu = buf.remaining_view();

    match location_system_coding {
        0b0000_0000 => {
            // NMEA 0183, Annex L
            report.add("infos", textdec::location_nmea(&sdu, sdu_length));
        }
        // RTCM RC-104 and the proprietary codings seen in the wild are
        // reported as hex only
        _ => {
            report.add_pdu("infos", &sdu);
        }
    }
    Ok(())
}

/// Text decode shared by the simple and SDS-TL text services: coding scheme
/// 0 is the GSM 7-bit alphabet, everything else is treated as an 8-bit
/// alphabet since the hex dump is available anyway.
pub fn decode_text(sdu: &BitBuffer, coding_scheme: u64, sdu_length: usize) -> String {
    if coding_scheme == 0 {
        textdec::text_gsm_7bit(sdu, sdu_length)
    } else {
        textdec::text_generic_8bit(sdu, sdu_length)
    }
}
