//! The layer entities of the TETRA downlink receive stack.
//!
//! Data flows through a single-threaded pipeline: the frame synchronizer
//! aligns symbols into bursts, the lower MAC runs the channel codec chain,
//! the upper MAC dispatches MAC PDUs and reassembles fragments, and the
//! signalling entities (LLC, MLE, CMCE with its SDS/LIP sub-layers, MM,
//! SNDCP) translate each PDU into one JSON event. Speech traffic is framed
//! by the U-plane handler without transcoding.

pub mod cmce;
pub mod llc;
pub mod lmac;
pub mod mle;
pub mod mm;
pub mod phy;
pub mod sndcp;
pub mod stack;
pub mod umac;
pub mod uplane;
pub mod wiremsg;

pub use stack::RxStack;
