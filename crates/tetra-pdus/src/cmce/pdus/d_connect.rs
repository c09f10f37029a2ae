use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;

/// CMCE D-CONNECT, Clause 14.7.1.4.
pub fn parse(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("call identifier", buf.read_field(14, "call identifier")?);
    report.add("call timeout", buf.read_field(4, "call timeout")?);
    report.add("hook method selection", buf.read_field(1, "hook method selection")?);
    report.add("simplex/duplex selection", buf.read_field(1, "simplex/duplex selection")?);
    report.add("transmission grant", buf.read_field(2, "transmission grant")?);
    report.add("transmission request permission", buf.read_field(1, "transmission request permission")?);
    report.add("call ownership", buf.read_field(1, "call ownership")?);

    let o_flag = buf.read_field(1, "o_flag")?;
    if o_flag == 1 {
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("call priority", buf.read_field(4, "call priority")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("basic service information", buf.read_field(8, "basic service information")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("temporary address", buf.read_field(24, "temporary address")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("notification indicator", buf.read_field(6, "notification indicator")?);
        }
    }

    Ok(())
}
