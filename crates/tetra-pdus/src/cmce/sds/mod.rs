//! SDS sub-entity of the CMCE (Clause 14.7.1.10 / 14.7.1.11 and Clause 29).
//!
//! The CMCE hands D-STATUS and D-SDS-DATA here with the 5-bit CMCE PDU type
//! still in front. Type-4 user data fans out further by protocol identifier,
//! including the LIP location service.

pub mod lip;
pub mod transfer;
pub mod type4;

use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;
use tetra_saps::{DecodeContext, finish_event};

use crate::cmce::fields::party_identifier::{parse_external_subscriber_number, parse_party_identifier};

/// SDS service entry point. Expects the full CMCE PDU.
pub fn service(pdu: &mut BitBuffer, ctx: &DecodeContext, report: &mut Report) {
    let Some(pdu_type) = pdu.read_bits(5) else {
        return;
    };

    match pdu_type {
        0b01000 => parse_d_status(pdu, ctx, report),
        0b01111 => parse_d_sds_data(pdu, ctx, report),
        other => {
            tracing::warn!("sds: unexpected pdu type {:#07b}", other);
        }
    }
}

/// CMCE D-STATUS, Clause 14.7.1.10.
fn parse_d_status(pdu: &mut BitBuffer, ctx: &DecodeContext, report: &mut Report) {
    report.start("CMCE", "D-STATUS", ctx.time, &ctx.address);
    let result = walk_d_status(pdu, report);
    finish_event(report, result);
}

fn walk_d_status(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    parse_party_identifier(
        buf, report,
        "calling party type identifier", "calling party ssi", "calling party ext",
    )?;

    report.add("pre-coded status", buf.read_field(16, "pre-coded status")?);

    let o_flag = buf.read_field(1, "o_flag")?;
    if o_flag == 1 {
        parse_external_subscriber_number(buf, report, "external subscriber number")?;
    }
    Ok(())
}

/// CMCE D-SDS-DATA, Clause 14.7.1.11. A type-4 payload yields a second
/// event carrying the raw hex dump for offline analysis.
fn parse_d_sds_data(pdu: &mut BitBuffer, ctx: &DecodeContext, report: &mut Report) {
    report.start("CMCE", "D-SDS-DATA", ctx.time, &ctx.address);

    let mut type4_sdu: Option<BitBuffer> = None;
    let result = walk_d_sds_data(pdu, ctx, report, &mut type4_sdu);
    finish_event(report, result);

    if let Some(sdu) = type4_sdu {
        report.start("CMCE", "D-SDS-DATA", ctx.time, &ctx.address);
        report.add_pdu("hex", &sdu);
        report.send();
    }
}

fn walk_d_sds_data(
    buf: &mut BitBuffer,
    ctx: &DecodeContext,
    report: &mut Report,
    type4_sdu: &mut Option<BitBuffer>,
) -> Result<(), PduParseErr> {
    let cpti = parse_party_identifier(
        buf, report,
        "calling party type identifier", "calling party ssi", "calling party ext",
    )?;
    if cpti == 3 {
        // reserved identifier type, the address length is unknown
        report.add("reserved", true);
        return Ok(());
    }

    let sdti = buf.read_field(2, "sds type identifier")?;
    report.add("sds type identifier", sdti);

    match sdti {
        0 => {
            let sdu = buf.view(buf.get_pos(), 16);
            buf.skip(16);
            report.add_pdu("infos", &sdu);
        }
        1 => {
            let sdu = buf.view(buf.get_pos(), 32);
            buf.skip(32);
            report.add_pdu("infos", &sdu);
        }
        2 => {
            let sdu = buf.view(buf.get_pos(), 64);
            buf.skip(64);
            report.add_pdu("infos", &sdu);
        }
        _ => {
            let len = buf.read_field(11, "length indicator")? as usize;
            let sdu = buf.view(buf.get_pos(), len);
            // keep the raw payload for the hex companion event even when
            // the walk below runs out of bits
            let mut walk_view = sdu.view(0, 0);
            *type4_sdu = Some(sdu);
            type4::parse_type4_data(&mut walk_view, len, ctx, report)?;
        }
    }

    Ok(())
}
