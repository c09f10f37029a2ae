//! Core utilities for the TETRA AirScope downlink receiver
//!
//! This crate provides the fundamental types used across the receive stack:
//! bit-level buffers, TDMA timing, MAC addressing, serving-cell state, text
//! decoding and the JSON event reporter.

/// Git version string, set at compile time
pub const GIT_VERSION: &str = git_version::git_version!(fallback = "unknown");
/// Receiver version followed by git version string, e.g., "0.3.2-aabbccdd"
pub const STACK_VERSION: &str = const_format::formatcp!("{}-{}", env!("CARGO_PKG_VERSION"), GIT_VERSION);

pub mod address;
pub mod bitbuffer;
pub mod cell;
pub mod debug;
pub mod pdu_parse_error;
pub mod phy_types;
pub mod report;
pub mod tdma_time;
pub mod textdec;

// Re-export commonly used items
pub use address::{AddressKey, AddressType, MacAddress};
pub use bitbuffer::BitBuffer;
pub use cell::CellContext;
pub use pdu_parse_error::PduParseErr;
pub use phy_types::*;
pub use report::{EventSink, Report, VecSink};
pub use tdma_time::TdmaTime;
