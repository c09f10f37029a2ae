use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;

/// CMCE D-CALL-PROCEEDING, Clause 14.7.1.2.
pub fn parse(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("call identifier", buf.read_field(14, "call identifier")?);
    report.add("call timeout, setup phase", buf.read_field(3, "call timeout, setup phase")?);
    report.add("hook method selection", buf.read_field(1, "hook method selection")?);
    report.add("simplex/duplex selection", buf.read_field(1, "simplex/duplex selection")?);
    Ok(())
}
