//! MM D-AUTHENTICATION, EN 300 392-7 A.1. A 2-bit sub-type follows the MM
//! PDU type (A.8.6).

use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;
use tetra_saps::{DecodeContext, finish_event};

pub fn service(buf: &mut BitBuffer, ctx: &DecodeContext, report: &mut Report) {
    let Some(subtype) = buf.read_bits(2) else {
        return;
    };

    let (name, walk): (&str, fn(&mut BitBuffer, &mut Report) -> Result<(), PduParseErr>) =
        match subtype {
            0b00 => ("D-AUTHENTICATION DEMAND", walk_demand),
            0b01 => ("D-AUTHENTICATION RESPONSE", walk_response),
            0b10 => ("D-AUTHENTICATION RESULT", walk_result),
            _ => ("D-AUTHENTICATION REJECT", walk_reject),
        };

    report.start("MM", name, ctx.time, &ctx.address);
    let result = walk(buf, report);
    finish_event(report, result);
}

/// A.1.1 demand: the SwMI challenges the MS.
fn walk_demand(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("Random challenge", read_80bit_hex(buf, "Random challenge")?);
    report.add("Random seed", read_80bit_hex(buf, "Random seed")?);
    Ok(())
}

/// A.1.3 response: mutual authentication, the SwMI answers an MS challenge.
fn walk_response(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("Random seed", read_80bit_hex(buf, "Random seed")?);
    report.add("Response value", buf.read_field(32, "Response value")?);

    if buf.read_field(1, "mutual flag")? == 1 {
        report.add("Random challenge", read_80bit_hex(buf, "Random challenge")?);
    }
    Ok(())
}

/// A.1.4 result
fn walk_result(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("Authentication successful", buf.read_field(1, "Authentication successful")? == 1);

    if buf.read_field(1, "mutual flag")? == 1 {
        report.add("Response value", buf.read_field(32, "Response value")?);
    }
    Ok(())
}

/// A.1.2 reject
fn walk_reject(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let reason = buf.read_field(3, "Authentication reject reason")?;
    if reason == 0 {
        report.add("Authentication reject reason", "Authentication not supported");
    } else {
        report.add("Authentication reject reason", reason);
    }
    Ok(())
}

/// 80-bit challenge/seed values don't fit a single u64 field read.
fn read_80bit_hex(buf: &mut BitBuffer, name: &'static str) -> Result<String, PduParseErr> {
    let high = buf.read_field(40, name)?;
    let low = buf.read_field(40, name)?;
    Ok(format!("{:010x}{:010x}", high, low))
}
