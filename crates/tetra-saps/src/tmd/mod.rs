use tetra_core::BitBuffer;

use crate::DecodeContext;

/// The TMD-UNITDATA indication primitive carries circuit-mode traffic from
/// the upper MAC to the U-plane handler.
#[derive(Debug)]
pub struct TmdUnitdataInd {
    pub block: BitBuffer,
    pub ctx: DecodeContext,
    /// Usage marker currently assigned to the downlink, from the last AACH.
    pub downlink_usage_marker: u8,
    /// Encryption state signalled for the carrying MAC resource.
    pub encryption_mode: u8,
}
