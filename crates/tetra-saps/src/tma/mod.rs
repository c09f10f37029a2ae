use tetra_core::BitBuffer;

use crate::DecodeContext;

/// The TMA-UNITDATA indication primitive carries a complete TM-SDU (fill
/// bits removed, fragments reassembled) from the upper MAC to the LLC.
#[derive(Debug)]
pub struct TmaUnitdataInd {
    pub sdu: BitBuffer,
    pub ctx: DecodeContext,
}
