use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

/// Error control parameters per downlink logical channel (Clause 8.2):
/// type-3/4/5 block size, type-2 size after de-puncturing and Viterbi,
/// type-1 payload size, and the interleaver coefficient a.
#[derive(Debug)]
pub struct ErrorControlParams {
    pub type345_bits: usize,
    pub type2_bits: usize,
    pub type1_bits: usize,
    pub interleave_a: usize,
}

/// Broadcast Synchronization Channel
pub const BSCH_PARAMS: ErrorControlParams = ErrorControlParams {
    type345_bits: 120,
    type2_bits: 80,
    type1_bits: 60,
    interleave_a: 11,
};

/// Half-slot signalling: SCH/HD, STCH and BNCH
pub const SCH_HD_PARAMS: ErrorControlParams = ErrorControlParams {
    type345_bits: 216,
    type2_bits: 144,
    type1_bits: 124,
    interleave_a: 101,
};

/// Full-slot signalling channel SCH/F
pub const SCH_F_PARAMS: ErrorControlParams = ErrorControlParams {
    type345_bits: 432,
    type2_bits: 288,
    type1_bits: 268,
    interleave_a: 103,
};

/// Gets error control parameters for a downlink signalling channel. The
/// AACH (Reed-Muller) and TCH/S (no FEC applied here) don't run through the
/// signalling chain.
pub fn get_params(lchan: LogicalChannel) -> &'static ErrorControlParams {
    match lchan {
        LogicalChannel::Bsch => &BSCH_PARAMS,
        LogicalChannel::SchHd | LogicalChannel::Stch | LogicalChannel::Bnch => &SCH_HD_PARAMS,
        LogicalChannel::SchF => &SCH_F_PARAMS,
        LogicalChannel::Aach | LogicalChannel::TchS => {
            unreachable!("{:?} does not use the signalling codec chain", lchan)
        }
    }
}
