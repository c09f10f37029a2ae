use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;

/// CMCE D-INFO, Clause 14.7.1.8.
pub fn parse(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("call identifier", buf.read_field(14, "call identifier")?);
    report.add("reset call time-out timer (T310)", buf.read_field(1, "reset call time-out timer (T310)")?);
    report.add("poll request", buf.read_field(1, "poll request")?);

    let o_flag = buf.read_field(1, "o_flag")?;
    if o_flag == 1 {
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("new call identifier", buf.read_field(14, "new call identifier")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("call time-out", buf.read_field(4, "call time-out")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("call time-out setup phase (T301, T302)", buf.read_field(3, "call time-out setup phase (T301, T302)")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("call ownership", buf.read_field(1, "call ownership")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("modify", buf.read_field(9, "modify")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("call status", buf.read_field(3, "call status")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("temporary address", buf.read_field(24, "temporary address")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("notification indicator", buf.read_field(6, "notification indicator")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("poll response percentage", buf.read_field(6, "poll response percentage")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("poll response number", buf.read_field(6, "poll response number")?);
        }
    }

    Ok(())
}
