//! U-plane: frames TCH/S speech traffic for the external codec. The 432
//! descrambled class bits are laid out in the marker-delimited buffer the
//! codec expects; no transcoding happens here.

use tetra_core::Report;
use tetra_saps::tmd::TmdUnitdataInd;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

/// Minimum number of class bits in a speech slot.
const MIN_BITS: usize = 432;
/// Length of the exported frame in 16-bit words.
const FRAME_WORDS: usize = 690;

pub fn service(ind: TmdUnitdataInd, report: &mut Report) {
    let ctx = ind.ctx;
    if ctx.channel != LogicalChannel::TchS {
        return;
    }

    report.start_uplane("UPLANE", "TCH_S", ctx.time, &ctx.address);

    let pdu = ind.block;
    if pdu.get_len() < MIN_BITS {
        report.add("invalid pdu size", pdu.get_len() as u64);
        report.add("pdu minimum size", MIN_BITS as u64);
        report.send();
        return;
    }

    // Marker words 0x6B21+i delimit the three 114-bit blocks and the final
    // 90-bit block; the bits themselves are exported as bipolar samples.
    let mut speech_frame = [0u16; FRAME_WORDS];
    for idx in 0..6 {
        speech_frame[115 * idx] = 0x6b21 + idx as u16;
    }

    let sections: [(usize, usize, usize); 4] =
        [(1, 0, 114), (116, 114, 114), (231, 228, 114), (346, 342, 90)];
    for (frame_base, bit_base, count) in sections {
        for idx in 0..count {
            let bit = pdu.peek_bits_zeroext(bit_base + idx, 1);
            speech_frame[frame_base + idx] = if bit == 1 { (-127i16) as u16 } else { 127 };
        }
    }

    let mut bytes = Vec::with_capacity(FRAME_WORDS * 2);
    for word in speech_frame {
        bytes.extend_from_slice(&word.to_le_bytes());
    }

    report.add("downlink usage marker", ind.downlink_usage_marker as u64);
    report.add("encryption mode", ind.encryption_mode as u64);
    report.add_compressed("frame", &bytes);
    report.send();
}
