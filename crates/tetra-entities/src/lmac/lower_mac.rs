//! Lower MAC: slices logical-channel blocks out of classified bursts and
//! runs them through the channel codec chain. Which logical channel a
//! block carries depends on burst type, the downlink usage signalled by the
//! AACH, and the stolen flags, so the pipeline drives these functions
//! block by block.

use tetra_core::{BitBuffer, BlockNum, CellContext};
use tetra_saps::tmv::TmvUnitdataInd;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

use crate::lmac::components::errorcontrol::{self, CodecStage};
use crate::lmac::components::scrambler;
use crate::phy::burst_consts::*;
use crate::phy::framesync::RxBurst;

/// Reed-Muller distance above which an AACH block is treated as
/// undecodable rather than corrected.
const AACH_MAX_DISTANCE: u32 = 3;

fn block(bits: &[u8], offset: usize, len: usize) -> BitBuffer {
    BitBuffer::from_bitarr(&bits[offset..offset + len])
}

/// BSCH block of a synchronization burst. Always decodable: the BSCH is
/// scrambled with the fixed acquisition code, not the cell code.
pub fn decode_bsch(burst: &RxBurst) -> Result<TmvUnitdataInd, CodecStage> {
    let type5 = block(&burst.bits, SB_BLOCK1_OFFSET, SB_BLOCK1_BITS);
    let (type1, crc_ok) = errorcontrol::decode_cp(LogicalChannel::Bsch, type5, scrambler::SCRAMB_INIT);
    if !crc_ok {
        return Err(CodecStage::Crc16);
    }
    Ok(TmvUnitdataInd {
        pdu: type1,
        block_num: BlockNum::Block1,
        logical_channel: LogicalChannel::Bsch,
        crc_pass: true,
    })
}

/// AACH broadcast block. On an SB burst it sits behind the training
/// sequence; on NDB bursts it is split around it.
pub fn decode_aach(burst: &RxBurst, cell: &CellContext) -> Result<TmvUnitdataInd, CodecStage> {
    let type5 = match burst_is_sync(burst) {
        true => block(&burst.bits, SB_BBK_OFFSET, 30),
        false => {
            let mut joined = BitBuffer::new(30);
            let mut bb1 = block(&burst.bits, NDB_BBK1_OFFSET, NDB_BBK1_BITS);
            let mut bb2 = block(&burst.bits, NDB_BBK2_OFFSET, NDB_BBK2_BITS);
            joined.copy_bits(&mut bb1, NDB_BBK1_BITS);
            joined.copy_bits(&mut bb2, NDB_BBK2_BITS);
            joined.seek(0);
            joined
        }
    };

    let (type1, distance) = errorcontrol::decode_aach(type5, cell.scrambling_code);
    if distance > AACH_MAX_DISTANCE {
        return Err(CodecStage::ReedMuller);
    }
    Ok(TmvUnitdataInd {
        pdu: type1,
        block_num: BlockNum::Both,
        logical_channel: LogicalChannel::Aach,
        crc_pass: true,
    })
}

/// Second half-slot of a synchronization burst, pre-scheduled as BNCH.
pub fn decode_sb_block2(burst: &RxBurst, cell: &CellContext) -> Result<TmvUnitdataInd, CodecStage> {
    decode_half(burst, cell, BlockNum::Block2, LogicalChannel::Bnch)
}

/// Full-slot channel of a normal downlink burst: SCH/F signalling, or TCH/S
/// speech which is only descrambled (the speech codec chain is outside the
/// receiver).
pub fn decode_full_slot(burst: &RxBurst, cell: &CellContext, lchan: LogicalChannel) -> Result<TmvUnitdataInd, CodecStage> {
    let mut joined = BitBuffer::new(2 * HALF_SLOT_BITS);
    let mut bkn1 = block(&burst.bits, NDB_BLOCK1_OFFSET, HALF_SLOT_BITS);
    let mut bkn2 = block(&burst.bits, NDB_BLOCK2_OFFSET, HALF_SLOT_BITS);
    joined.copy_bits(&mut bkn1, HALF_SLOT_BITS);
    joined.copy_bits(&mut bkn2, HALF_SLOT_BITS);
    joined.seek(0);

    match lchan {
        LogicalChannel::TchS => {
            scrambler::scramble_bits(cell.scrambling_code, &mut joined);
            Ok(TmvUnitdataInd {
                pdu: joined,
                block_num: BlockNum::Both,
                logical_channel: LogicalChannel::TchS,
                crc_pass: true,
            })
        }
        LogicalChannel::SchF => {
            let (type1, crc_ok) = errorcontrol::decode_cp(LogicalChannel::SchF, joined, cell.scrambling_code);
            if !crc_ok {
                return Err(CodecStage::Crc16);
            }
            Ok(TmvUnitdataInd {
                pdu: type1,
                block_num: BlockNum::Both,
                logical_channel: LogicalChannel::SchF,
                crc_pass: true,
            })
        }
        other => unreachable!("{:?} is not a full-slot channel", other),
    }
}

/// One half-slot signalling channel of a split burst.
pub fn decode_half_slot(
    burst: &RxBurst,
    cell: &CellContext,
    block_num: BlockNum,
    lchan: LogicalChannel,
) -> Result<TmvUnitdataInd, CodecStage> {
    decode_half(burst, cell, block_num, lchan)
}

fn decode_half(
    burst: &RxBurst,
    cell: &CellContext,
    block_num: BlockNum,
    lchan: LogicalChannel,
) -> Result<TmvUnitdataInd, CodecStage> {
    // SB and NDB bursts place block 2 at the same offset
    let offset = match block_num {
        BlockNum::Block1 => NDB_BLOCK1_OFFSET,
        BlockNum::Block2 => NDB_BLOCK2_OFFSET,
        BlockNum::Both => unreachable!("half-slot decode needs a block number"),
    };

    let type5 = block(&burst.bits, offset, HALF_SLOT_BITS);
    let (type1, crc_ok) = errorcontrol::decode_cp(lchan, type5, cell.scrambling_code);
    if !crc_ok {
        return Err(CodecStage::Crc16);
    }
    Ok(TmvUnitdataInd {
        pdu: type1,
        block_num,
        logical_channel: lchan,
        crc_pass: true,
    })
}

fn burst_is_sync(burst: &RxBurst) -> bool {
    burst.burst_type == tetra_core::BurstType::Sb
}
