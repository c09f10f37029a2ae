use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;

/// CMCE D-CONNECT ACK, Clause 14.7.1.5.
pub fn parse(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("call identifier", buf.read_field(14, "call identifier")?);
    report.add("call timeout", buf.read_field(4, "call timeout")?);
    report.add("transmission grant", buf.read_field(2, "transmission grant")?);
    report.add("transmission request permission", buf.read_field(1, "transmission request permission")?);

    let o_flag = buf.read_field(1, "o_flag")?;
    if o_flag == 1 {
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("notification indicator", buf.read_field(6, "notification indicator")?);
        }
    }

    Ok(())
}
