//! Shared fixtures: a collecting event sink and builders for complete
//! 510-bit downlink bursts with properly encoded blocks.

use std::sync::{Arc, Mutex};

use tetra_core::{BitBuffer, CellContext, EventSink};
use tetra_entities::lmac::components::{errorcontrol, scrambler};
use tetra_entities::phy::burst_consts::*;
use tetra_entities::phy::train_consts::*;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

/// Event sink that both the stack and the test can hold.
pub struct SharedSink(pub Arc<Mutex<Vec<String>>>);

impl EventSink for SharedSink {
    fn send_line(&mut self, line: &str) {
        self.0.lock().unwrap().push(line.trim_end().to_string());
    }
}

pub fn shared_sink() -> (Box<SharedSink>, Arc<Mutex<Vec<String>>>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    (Box::new(SharedSink(lines.clone())), lines)
}

/// Parse every collected line as JSON.
pub fn events(lines: &Arc<Mutex<Vec<String>>>) -> Vec<serde_json::Value> {
    lines
        .lock()
        .unwrap()
        .iter()
        .map(|l| serde_json::from_str(l).expect("event is valid JSON"))
        .collect()
}

/// Type-1 bits of a SYNC PDU plus D-MLE-SYNC for the given cell identity.
pub fn build_bsch_type1(mcc: u16, mnc: u16, colour_code: u8, t: u8, f: u8, m: u8) -> BitBuffer {
    let mut buf = BitBuffer::new(60);
    buf.write_bits(1, 4);                   // system code
    buf.write_bits(colour_code as u64, 6);
    buf.write_bits(t as u64 - 1, 2);
    buf.write_bits(f as u64, 5);
    buf.write_bits(m as u64, 6);
    buf.write_bits(0, 2);                   // sharing mode
    buf.write_bits(0, 3);                   // ts reserved frames
    buf.write_bits(0, 1);                   // u-plane dtx
    buf.write_bits(0, 1);                   // frame 18 extension
    buf.write_bits(0, 1);                   // reserved
    // D-MLE-SYNC
    buf.write_bits(mcc as u64, 10);
    buf.write_bits(mnc as u64, 14);
    buf.write_bits(0, 2);                   // neighbour cell broadcast
    buf.write_bits(0, 2);                   // cell load
    buf.write_bits(1, 1);                   // late entry supported
    buf.seek(0);
    buf
}

/// Type-1 bits of a SYSINFO PDU plus D-MLE-SYSINFO (124 bits).
pub fn build_bnch_type1(location_area: u16) -> BitBuffer {
    let mut buf = BitBuffer::new(124);
    buf.write_bits(2, 2);                   // broadcast
    buf.write_bits(0, 2);                   // sysinfo
    buf.write_bits(1000, 12);               // main carrier
    buf.write_bits(4, 4);                   // frequency band
    buf.write_bits(0, 2);                   // offset
    buf.write_bits(0, 3);                   // duplex spacing
    buf.write_bits(0, 1);                   // reverse operation
    buf.write_bits(0, 2);                   // num csch
    buf.write_bits(3, 3);                   // txpwr
    buf.write_bits(5, 4);                   // rxlev
    buf.write_bits(6, 4);                   // access parameter
    buf.write_bits(2, 4);                   // radio dl timeout
    buf.write_bits(0, 1);                   // hyperframe follows
    buf.write_bits(0x1234, 16);             // hyperframe number
    buf.write_bits(3, 2);                   // option: extended services
    buf.write_bits(0, 20);                  // option value
    // D-MLE-SYSINFO
    buf.write_bits(location_area as u64, 14);
    buf.write_bits(0xCAFE, 16);             // subscriber class
    buf.write_bits(0b100000100110, 12);     // BS service details
    buf.seek(0);
    buf
}

/// Wrap an upper-layer SDU into a MAC-RESOURCE carrying block of
/// `block_bits` type-1 bits, with correct length indication and fill bits.
/// The remainder of the block is zero padding, which parses as a null PDU.
pub fn build_mac_resource_block(ssi: u32, sdu: &BitBuffer, block_bits: usize) -> BitBuffer {
    const HEADER_BITS: usize = 43; // fixed fields + SSI address, no elements
    let total = HEADER_BITS + sdu.get_len();
    let total_bytes = (total + 7) / 8;
    let fill = total_bytes * 8 - total;
    assert!(total_bytes * 8 <= block_bits, "SDU too large for block");

    let mut buf = BitBuffer::new(block_bits);
    buf.write_bits(0, 2);                           // MAC-RESOURCE
    buf.write_bits((fill > 0) as u64, 1);           // fill bits present
    buf.write_bits(0, 1);                           // position of grant
    buf.write_bits(0, 2);                           // encryption mode
    buf.write_bits(0, 1);                           // random access flag
    buf.write_bits(total_bytes as u64, 6);          // length in octets
    buf.write_bits(1, 3);                           // address type: SSI
    buf.write_bits(ssi as u64, 24);
    buf.write_bits(0, 1);                           // no power control
    buf.write_bits(0, 1);                           // no slot granting
    buf.write_bits(0, 1);                           // no channel allocation
    let mut sdu_copy = sdu.view(0, 0);
    buf.copy_bits(&mut sdu_copy, sdu.get_len());
    if fill > 0 {
        buf.write_bit(1);
        buf.write_zeroes(fill - 1);
    }
    buf.seek(0);
    buf
}

/// AACH signalling common control on the downlink.
pub fn build_aach_common() -> BitBuffer {
    BitBuffer::from_bitstr("00001010001010")
}

/// AACH assigning the downlink to a traffic usage marker.
pub fn build_aach_traffic(marker: u8) -> BitBuffer {
    let mut buf = BitBuffer::new(14);
    buf.write_bits(1, 2);
    buf.write_bits(marker as u64, 6);
    buf.write_bits(0, 6);
    buf.seek(0);
    buf
}

fn place(bits: &mut [u8], offset: usize, mut block: BitBuffer) {
    let len = block.get_len();
    block.seek(0);
    let mut arr = vec![0u8; len];
    block.to_bitarr(&mut arr);
    bits[offset..offset + len].copy_from_slice(&arr);
}

/// Assemble a synchronization burst from type-1 blocks.
pub fn build_sb_burst(bsch_type1: BitBuffer, aach_type1: BitBuffer, bnch_type1: BitBuffer, cell: &CellContext) -> Vec<u8> {
    let mut bits = vec![0u8; BURST_BITS];

    let sb1 = errorcontrol::encode_cp(LogicalChannel::Bsch, bsch_type1, scrambler::SCRAMB_INIT);
    place(&mut bits, SB_BLOCK1_OFFSET, sb1);

    bits[SB_TRAIN_OFFSET..SB_TRAIN_OFFSET + 38].copy_from_slice(&SYNC_TRAINING_SEQ);

    let bbk = errorcontrol::encode_aach(aach_type1, cell.scrambling_code);
    place(&mut bits, SB_BBK_OFFSET, bbk);

    let bkn2 = errorcontrol::encode_cp(LogicalChannel::Bnch, bnch_type1, cell.scrambling_code);
    place(&mut bits, NDB_BLOCK2_OFFSET, bkn2);

    bits
}

/// Assemble a normal downlink burst carrying one full-slot channel.
pub fn build_ndb_burst(full_slot_type5: BitBuffer, aach_type1: BitBuffer, cell: &CellContext) -> Vec<u8> {
    let mut bits = vec![0u8; BURST_BITS];

    assert_eq!(full_slot_type5.get_len(), 2 * HALF_SLOT_BITS);
    place(&mut bits, NDB_BLOCK1_OFFSET, full_slot_type5.view(0, HALF_SLOT_BITS));
    place(&mut bits, NDB_BLOCK2_OFFSET, full_slot_type5.view(HALF_SLOT_BITS, HALF_SLOT_BITS));

    let bbk = errorcontrol::encode_aach(aach_type1, cell.scrambling_code);
    place(&mut bits, NDB_BBK1_OFFSET, bbk.view(0, NDB_BBK1_BITS));
    place(&mut bits, NDB_BBK2_OFFSET, bbk.view(NDB_BBK1_BITS, NDB_BBK2_BITS));

    bits[NDB_TRAIN_OFFSET..NDB_TRAIN_OFFSET + 22].copy_from_slice(&NORMAL_TRAINING_SEQ_1);

    bits
}

/// Full-slot SCH/F type-5 block from type-1 bits.
pub fn encode_sch_f(type1: BitBuffer, cell: &CellContext) -> BitBuffer {
    errorcontrol::encode_cp(LogicalChannel::SchF, type1, cell.scrambling_code)
}

/// Full-slot TCH/S type-5 block: speech class bits are only scrambled.
pub fn encode_tch_s(mut class_bits: BitBuffer, cell: &CellContext) -> BitBuffer {
    assert_eq!(class_bits.get_len(), 432);
    scrambler::scramble_bits(cell.scrambling_code, &mut class_bits);
    class_bits
}

/// Feed a burst bit by bit into the stack.
pub fn feed_bits(stack: &mut tetra_entities::RxStack, bits: &[u8]) {
    for &bit in bits {
        stack.rx_symbol(bit);
    }
}
