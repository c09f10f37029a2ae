pub mod enums;

use tetra_core::{BitBuffer, BlockNum};

use crate::tmv::enums::logical_chans::LogicalChannel;

/// The TMV-UNITDATA indication primitive is used by the lower MAC to deliver
/// a received and error-control-decoded MAC block to the upper MAC.
#[derive(Debug)]
pub struct TmvUnitdataInd {
    pub pdu: BitBuffer,

    /// Which block of the timeslot this is. Needed to order the two
    /// half-slot channels of a split burst.
    pub block_num: BlockNum,

    pub logical_channel: LogicalChannel,

    /// True when the CRC verified, or when the channel carries no CRC (AACH).
    pub crc_pass: bool,
}
