//! The channel codec chain, Clause 8.2: scrambling, block interleaving,
//! rate-compatible puncturing over the rate-1/4 mother code, and CRC-16.
//! Decoding runs type5 -> type1; the encode direction is retained for
//! loopback tests.

use tetra_core::BitBuffer;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

use crate::lmac::components::convenc::{self, ConvEncState, RcpcPunctMode};
use crate::lmac::components::{crc16, errorcontrol_params, interleaver, rm3014, viterbi};
use crate::lmac::components::scrambler;

const MAX_TYPE2_BITS: usize = 288;
const MAX_TYPE345_BITS: usize = 432;

/// Codec chain stages, reported on decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecStage {
    Descramble = 1,
    Deinterleave = 2,
    Depuncture = 3,
    Viterbi = 4,
    ReedMuller = 5,
    Crc16 = 6,
}

/// Decodes a signalling block from type5 to type1 bits.
/// Returns the type1 buffer and whether the CRC verified.
pub fn decode_cp(lchan: LogicalChannel, mut type5: BitBuffer, scrambling_code: u32) -> (BitBuffer, bool) {
    let mut type4_arr = [0u8; MAX_TYPE345_BITS];
    let mut type3_arr = [0u8; MAX_TYPE345_BITS];
    let mut type3dp_arr = [0xFFu8; MAX_TYPE345_BITS * 4];
    let mut type2_arr = [0u8; MAX_TYPE2_BITS];

    let params = errorcontrol_params::get_params(lchan);
    tracing::trace!("decode_cp {:?} type5: {}", lchan, type5.dump_bin());

    // Unscrambling, type5 -> type4
    scrambler::scramble_bits(scrambling_code, &mut type5);
    let mut type4 = type5;
    tracing::trace!("decode_cp {:?} type4: {}", lchan, type4.dump_bin());

    // De-interleaving, type4 -> type3
    type4.to_bitarr(&mut type4_arr[0..params.type345_bits]);
    interleaver::block_deinterleave(params.type345_bits, params.interleave_a, &type4_arr, &mut type3_arr);

    // De-puncturing, type3 -> type3dp (erasures stay 0xff)
    convenc::rcpc_depuncture(RcpcPunctMode::Rate2_3, &type3_arr, params.type345_bits, &mut type3dp_arr);

    // Viterbi, type3dp -> type2
    viterbi::decode_hard(&type3dp_arr, &mut type2_arr, params.type2_bits);
    tracing::trace!("decode_cp {:?} type2: {:?}", lchan, &type2_arr[0..params.type2_bits]);

    // CRC check over payload plus checksum, type2 -> type1
    let crc = crc16::crc16_ccitt_bits(&type2_arr, params.type1_bits + 16);
    let crc_ok = crc == crc16::TETRA_CRC_OK;
    let type1 = BitBuffer::from_bitarr(&type2_arr[0..params.type1_bits]);

    (type1, crc_ok)
}

/// Encodes a signalling block from type1 to type5 bits (test support).
pub fn encode_cp(lchan: LogicalChannel, mut type1: BitBuffer, scrambling_code: u32) -> BitBuffer {
    let params = errorcontrol_params::get_params(lchan);
    assert!(
        type1.get_len() == params.type1_bits,
        "encode_cp: type1 length {} does not match {} for lchan {:?}",
        type1.get_len(), params.type1_bits, lchan
    );

    // type1 -> bit array with room for the CRC
    type1.seek(0);
    let mut type2_arr = [0u8; MAX_TYPE2_BITS];
    type1.to_bitarr(&mut type2_arr[0..params.type1_bits]);

    // CRC addition, type1 -> type2
    crc16::crc16_ccitt_append(&mut type2_arr, params.type1_bits);

    // Convolutional encode, type2 -> mother code
    let mut type3dp_arr = [0u8; MAX_TYPE345_BITS * 4];
    let mut ces = ConvEncState::new();
    ces.encode(&type2_arr[0..params.type2_bits], &mut type3dp_arr);

    // Puncturing, mother code -> type3
    let mut type3_arr = [0u8; MAX_TYPE345_BITS];
    convenc::get_punctured_rate(RcpcPunctMode::Rate2_3, &type3dp_arr, &mut type3_arr[0..params.type345_bits]);

    // Interleaving, type3 -> type4
    let mut type4_arr = [0u8; MAX_TYPE345_BITS];
    interleaver::block_interleave(params.type345_bits, params.interleave_a, &type3_arr, &mut type4_arr);
    let mut type4 = BitBuffer::from_bitarr(&type4_arr[0..params.type345_bits]);

    // Scrambling, type4 -> type5
    scrambler::scramble_bits(scrambling_code, &mut type4);
    type4
}

/// Decodes the 30-bit AACH broadcast block: unscramble, then maximum
/// likelihood Reed-Muller. Returns the 14 information bits and the Hamming
/// distance of the winning codeword (0 for a clean block).
pub fn decode_aach(mut type5: BitBuffer, scrambling_code: u32) -> (BitBuffer, u32) {
    assert!(type5.get_len_remaining() == 30);

    scrambler::scramble_bits(scrambling_code, &mut type5);
    let mut type2 = type5;

    let x = type2.read_bits(30).unwrap() as u32; // 30 bits guaranteed
    let (word, distance) = rm3014::rm3014_decode(x);

    let mut type1 = BitBuffer::new(14);
    type1.write_bits(word as u64, 14);
    type1.seek(0);
    (type1, distance)
}

/// Encodes a 14-bit AACH block to type5 (test support).
pub fn encode_aach(mut type1: BitBuffer, scrambling_code: u32) -> BitBuffer {
    assert!(type1.get_len_remaining() == 14);

    let type1_int = type1.read_bits(14).unwrap() as u16;
    let type2_int = rm3014::rm3014_compute(type1_int);

    let mut type2 = BitBuffer::new(30);
    type2.write_bits(type2_int as u64, 30);
    type2.seek(0);

    scrambler::scramble_bits(scrambling_code, &mut type2);
    type2
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetra_core::CellContext;

    /// Reference vectors from a live capture: SCH/HD family with the cell
    /// scrambling code of MCC 204 / MNC 1337 / colour 1.
    #[test]
    fn test_decode_bnch_reference_vector() {
        let type1vec = "1000001111101001010000000000101001101110011000000000000000001010000101010100000000000000000000101111111111111111110100100000";
        let type5vec = "001101111110011111000110100001101110011100110000111100011000011100101011111100010101101001101001001110011100001010001101101010100000000011010001001101001010101100100110011001111100001011000001010010000011010110110110";
        let scramb = CellContext::compute_scrambling_code(204, 1337, 1);

        let (type1, crc_ok) = decode_cp(LogicalChannel::Bnch, BitBuffer::from_bitstr(type5vec), scramb);
        assert!(crc_ok);
        assert_eq!(type1.to_bitstr(), type1vec);
    }

    #[test]
    fn test_encode_decode_roundtrip_all_channels() {
        let scramb = CellContext::compute_scrambling_code(208, 10, 5);
        for (lchan, len) in [
            (LogicalChannel::Bsch, 60usize),
            (LogicalChannel::SchHd, 124),
            (LogicalChannel::Stch, 124),
            (LogicalChannel::SchF, 268),
        ] {
            let bits: String = (0..len).map(|i| if (i * 31) % 7 < 3 { '1' } else { '0' }).collect();
            let type1 = BitBuffer::from_bitstr(&bits);
            let code = if lchan == LogicalChannel::Bsch { scrambler::SCRAMB_INIT } else { scramb };

            let type5 = encode_cp(lchan, type1, code);
            let (decoded, crc_ok) = decode_cp(lchan, type5, code);
            assert!(crc_ok, "{:?}", lchan);
            assert_eq!(decoded.to_bitstr(), bits, "{:?}", lchan);
        }
    }

    #[test]
    fn test_corrupted_block_fails_crc() {
        let bits: String = (0..60).map(|i| if i % 3 == 0 { '1' } else { '0' }).collect();
        let mut type5 = encode_cp(LogicalChannel::Bsch, BitBuffer::from_bitstr(&bits), scrambler::SCRAMB_INIT);

        // flip a burst of bits well beyond what the code can absorb
        for pos in (0..60).step_by(2) {
            type5.seek(pos);
            type5.xor_bit(1);
        }
        type5.seek(0);

        let (_, crc_ok) = decode_cp(LogicalChannel::Bsch, type5, scrambler::SCRAMB_INIT);
        assert!(!crc_ok);
    }

    #[test]
    fn test_aach_roundtrip_reference_vector() {
        let scramb = CellContext::compute_scrambling_code(204, 1337, 1);
        let type5vec = "100100100001011110111010111011";
        let type1vec = "00001010001010";

        let (type1, distance) = decode_aach(BitBuffer::from_bitstr(type5vec), scramb);
        assert_eq!(distance, 0);
        assert_eq!(type1.to_bitstr(), type1vec);

        let type5 = encode_aach(BitBuffer::from_bitstr(type1vec), scramb);
        assert_eq!(type5.to_bitstr(), type5vec);
    }
}
