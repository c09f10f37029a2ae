//! SDS-TRANSFER, Clause 29.4.2.4.

use tetra_core::{BitBuffer, PduParseErr, textdec};
use tetra_core::report::Report;

use crate::cmce::fields::party_identifier::parse_external_subscriber_number;
use crate::cmce::sds::type4::decode_text;

/// Parse an SDS-TRANSFER message. Cursor is past the protocol identifier
/// and the 4-bit message type; `protocol_id` selects the user-SDU
/// interpretation per table 29.21.
pub fn parse_sds_transfer(
    buf: &mut BitBuffer,
    len: usize,
    protocol_id: u8,
    report: &mut Report,
) -> Result<(), PduParseErr> {
    buf.skip(2); // delivery report request
    buf.skip(1); // service selection / short form report

    let service_forward_control = buf.read_field(1, "service forward control")?;

    report.add("message reference", buf.read_field(8, "message reference")?);

    if service_forward_control == 1 {
        report.add("validity period", buf.read_field(5, "validity period")?);

        let forward_address_type = buf.read_field(3, "forward address type")?;
        report.add("forward address type", forward_address_type); // 29.4.3.5

        match forward_address_type {
            0b000 => {
                // SNA is reserved for the MS -> SwMI direction, parsed for
                // telemetry only
                report.add("forward address ssi", buf.read_field(8, "forward address sna")?);
            }
            0b001 => {
                report.add("forward address ssi", buf.read_field(24, "forward address ssi")?);
            }
            0b010 => {
                report.add("forward address ssi", buf.read_field(24, "forward address ssi")?);
                report.add("forward address ext", buf.read_field(24, "forward address ext")?);
            }
            0b011 => {
                parse_external_subscriber_number(buf, report, "forward address external number")?;
            }
            0b111 => {
                report.add("forward address", "none");
            }
            _ => {
                report.add("forward address", "reserved");
            }
        }
    }

    let mut sdu = buf.view(buf.get_pos(), len.saturating_sub(buf.get_pos()));

    match protocol_id {
        0b1000_0010 => {
            // 29.5.3
            report.add("protocol info", "text messaging (SDS-TL)");
            parse_text_with_sds_tl(&mut sdu, report)?;
        }
        0b1000_0011 => {
            // 29.5.6
            report.add("protocol info", "location system (SDS-TL)");
            parse_location_with_sds_tl(&mut sdu, report)?;
        }
        0b1000_0100 => {
            report.add("protocol info", "WAP (SDS-TL)");
            report.add_pdu("infos", &sdu);
        }
        0b1000_0101 => {
            report.add("protocol info", "WCMP (SDS-TL)");
            report.add_pdu("infos", &sdu);
        }
        0b1000_0110 => {
            report.add("protocol info", "M-DMO (SDS-TL)");
            report.add_pdu("infos", &sdu);
        }
        0b1000_1000 => {
            report.add("protocol info", "end-to-end encrypted message (SDS-TL)");
            report.add_pdu("infos", &sdu);
        }
        0b1000_1001 => {
            // same as text messaging, only the handling by the MS differs
            report.add("protocol info", "immediate text messaging (SDS-TL)");
            parse_text_with_sds_tl(&mut sdu, report)?;
        }
        0b1000_1010 => {
            report.add("protocol info", "message with user-data header");
            report.add_pdu("infos", &sdu);
        }
        0b1000_1100 => {
            report.add("protocol info", "concatenated sds message (SDS-TL)");
            report.add_pdu("infos", &sdu);
        }
        _ => {
            // reserved or user-defined: a text read is the most useful guess
            report.add("protocol info", "reserved/user-defined");
            parse_text_with_sds_tl(&mut sdu, report)?;
        }
    }

    Ok(())
}

/// Text messaging over SDS-TL, Clause 29.5.3 table 28.29.
fn parse_text_with_sds_tl(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let timestamp_flag = buf.read_field(1, "timestamp flag")?;

    let text_coding_scheme = buf.read_field(7, "text coding scheme")?;
    report.add("text coding scheme", text_coding_scheme);

    if timestamp_flag == 1 {
        report.add("timestamp", buf.read_field(24, "timestamp")?);
    }

    let sdu = buf.remaining_view();
    let sdu_length = sdu.get_len();
    report.add("infos", decode_text(&sdu, text_coding_scheme, sdu_length));
    Ok(())
}

/// Location system over SDS-TL, Clause 29.5.6.
fn parse_location_with_sds_tl(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let location_system_coding = buf.read_field(8, "location coding system")?;
    report.add("location coding system", location_system_coding);

    let sdu = buf.remaining_view();
    match location_system_coding {
        0b0000_0000 => {
            report.add("infos", textdec::location_nmea(&sdu, sdu.get_len()));
        }
        _ => {
            report.add_pdu("infos", &sdu);
        }
    }
    Ok(())
}
