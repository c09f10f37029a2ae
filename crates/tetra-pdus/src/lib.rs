//! Downlink PDU parsers for every protocol entity of the receive stack.
//!
//! MAC-layer PDUs parse into structs consumed by the upper MAC; the
//! signalling entities above the MAC (MLE, CMCE, SDS, MM) instead walk their
//! fields straight into the JSON event record, because field order in the
//! emitted event follows bit order on the air.

pub mod cmce;
pub mod llc;
pub mod mle;
pub mod mm;
pub mod umac;
