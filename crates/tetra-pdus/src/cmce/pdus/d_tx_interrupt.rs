use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;

use crate::cmce::fields::party_identifier::parse_party_identifier;

/// CMCE D-TX INTERRUPT, Clause 14.7.1.16.
pub fn parse(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("call identifier", buf.read_field(14, "call identifier")?);
    report.add("transmission grant", buf.read_field(2, "transmission grant")?);
    report.add("transmission request permission", buf.read_field(1, "transmission request permission")?);
    report.add("encryption control", buf.read_field(1, "encryption control")?);
    buf.skip(1); // reserved, set to 0

    let o_flag = buf.read_field(1, "o_flag")?;
    if o_flag == 1 {
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("notification indicator", buf.read_field(6, "notification indicator")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            parse_party_identifier(
                buf, report,
                "transmission party type identifier", "transmitting party ssi", "transmitting party ext",
            )?;
        }
    }

    Ok(())
}
