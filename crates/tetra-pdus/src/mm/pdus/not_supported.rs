//! MM PDU/FUNCTION NOT SUPPORTED, Clause 16.9.4. The body echoes the PDU
//! that was not understood; it is dumped for offline inspection.

use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;

pub fn parse(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("not supported pdu type", buf.read_field(4, "not supported pdu type")?);
    let rest = buf.remaining_view();
    if rest.get_len() > 0 {
        report.add_pdu("pdu", &rest);
    }
    Ok(())
}
