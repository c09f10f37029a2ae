//! SNDCP: packet data. The receiver reports the raw NSDU; IP reassembly is
//! outside its scope (Clause 28.4).

use tetra_core::{BitBuffer, Report};
use tetra_saps::DecodeContext;

pub fn service(sdu: BitBuffer, ctx: &DecodeContext, report: &mut Report) {
    report.start("SNDCP", "RAW-DATA", ctx.time, &ctx.address);
    report.add_pdu("data", &sdu);
    report.send();
}
