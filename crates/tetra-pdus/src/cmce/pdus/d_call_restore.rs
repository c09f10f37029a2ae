use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;

/// CMCE D-CALL RESTORE, Clause 14.7.1.3.
pub fn parse(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("call identifier", buf.read_field(14, "call identifier")?);
    report.add("transmission grant", buf.read_field(2, "transmission grant")?);
    report.add("transmission request permission", buf.read_field(1, "transmission request permission")?);
    report.add("reset call time-out timer T310", buf.read_field(1, "reset call time-out timer T310")?);

    let o_flag = buf.read_field(1, "o_flag")?;
    if o_flag == 1 {
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("new call identifier", buf.read_field(14, "new call identifier")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("call time-out", buf.read_field(4, "call time-out")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("call status", buf.read_field(3, "call status")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("modify", buf.read_field(9, "modify")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("notification indicator", buf.read_field(6, "notification indicator")?);
        }
        // type 3/4 elements not walked; the type-2 chain ends the parse
    }

    Ok(())
}
