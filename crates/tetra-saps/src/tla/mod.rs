use tetra_core::BitBuffer;

use crate::DecodeContext;

/// The TLA-UNITDATA indication primitive carries a TL-SDU from the LLC to
/// the MLE. BSCH blocks bypass the LLC and arrive here unchanged.
#[derive(Debug)]
pub struct TlaUnitdataInd {
    pub sdu: BitBuffer,
    pub ctx: DecodeContext,
}
