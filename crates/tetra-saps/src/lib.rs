//! Service access point primitives between the receive-stack layers.
//!
//! The receiver is a one-way pipeline, so only the *indication* primitives
//! of each SAP exist here: TMV (lower MAC -> upper MAC), TMA (upper MAC ->
//! LLC), TLA (LLC -> MLE) and TMD (upper MAC -> U-plane). See Clause 19.2.1
//! for the SAP overview.

pub mod tla;
pub mod tma;
pub mod tmd;
pub mod tmv;

use tetra_core::{MacAddress, TdmaTime};
use tetra_core::pdu_parse_error::PduParseErr;
use tetra_core::report::Report;

use crate::tmv::enums::logical_chans::LogicalChannel;

/// Decode-time context handed down the signalling stack with each SDU. The
/// address is the one established by the most recent MAC-RESOURCE.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext {
    pub channel: LogicalChannel,
    pub time: TdmaTime,
    pub address: MacAddress,
}

/// Finish an in-progress event after a parser returned. Truncation is not an
/// error on a live downlink: the partial event is emitted with a marker and
/// the PDU is abandoned. Reserved values are likewise recorded, not raised.
pub fn finish_event(report: &mut Report, result: Result<(), PduParseErr>) {
    match result {
        Ok(()) => {}
        Err(err) if err.is_truncation() => {
            report.add("truncated", true);
            if let Some(field) = err.field() {
                report.add("truncated at", field);
            }
        }
        Err(PduParseErr::InvalidValue { field, value }) => {
            report.add("invalid field", field);
            report.add("invalid value", value);
        }
        Err(err) => {
            tracing::warn!("parse error: {:?}", err);
            report.add("parse error", format!("{:?}", err));
        }
    }
    report.send();
}
