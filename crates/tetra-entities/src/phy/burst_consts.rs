//! Field offsets within the 510-bit continuous downlink bursts
//! (Clause 9.4.4.2 / 9.4.4.3).

/// Burst length in bits (255 modulation symbols).
pub const BURST_BITS: usize = 510;

/// Synchronization burst: frequency correction occupies 14..94, the
/// training sequence 214..252.
pub const SB_BLOCK1_OFFSET: usize = 94;
pub const SB_BLOCK1_BITS: usize = 120;
pub const SB_BBK_OFFSET: usize = 252;

/// Normal downlink burst: block 1 follows the 14 head bits; the broadcast
/// block is split around the training sequence at 244..266. Block 2 sits at
/// the same offset in SB and NDB bursts.
pub const NDB_BLOCK1_OFFSET: usize = 14;
pub const NDB_BBK1_OFFSET: usize = 230;
pub const NDB_BBK1_BITS: usize = 14;
pub const NDB_BBK2_OFFSET: usize = 266;
pub const NDB_BBK2_BITS: usize = 16;
pub const NDB_BLOCK2_OFFSET: usize = 282;

/// Half-slot signalling block length (both block positions).
pub const HALF_SLOT_BITS: usize = 216;

/// Offset of the training sequence in a synchronization burst.
pub const SB_TRAIN_OFFSET: usize = 214;
/// Offset of the normal training sequence in NDB bursts.
pub const NDB_TRAIN_OFFSET: usize = 244;
