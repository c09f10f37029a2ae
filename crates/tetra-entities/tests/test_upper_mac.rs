//! Upper MAC tests: MAC PDU dispatch, fill-bit handling and fragment
//! reassembly driven with hand-built MAC blocks.

mod common;

use common::{events, shared_sink};
use tetra_core::{BitBuffer, BlockNum, CellContext, Report, TdmaTime};
use tetra_entities::umac::upper_mac::UpperMac;
use tetra_saps::tma::TmaUnitdataInd;
use tetra_saps::tmv::TmvUnitdataInd;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

fn ind(block: BitBuffer, lchan: LogicalChannel) -> TmvUnitdataInd {
    TmvUnitdataInd {
        pdu: block,
        block_num: BlockNum::Both,
        logical_channel: lchan,
        crc_pass: true,
    }
}

fn drive(
    umac: &mut UpperMac,
    report: &mut Report,
    block: BitBuffer,
    lchan: LogicalChannel,
    time: TdmaTime,
) -> Vec<TmaUnitdataInd> {
    let mut cell = CellContext::default();
    umac.service(ind(block, lchan), time, &mut cell, report)
}

/// A MAC-RESOURCE header with SSI address and no optional elements.
fn resource_header(buf: &mut BitBuffer, fill: bool, length_ind: u8, ssi: u32) {
    buf.write_bits(0, 2);
    buf.write_bits(fill as u64, 1);
    buf.write_bits(0, 1);
    buf.write_bits(0, 2);
    buf.write_bits(0, 1);
    buf.write_bits(length_ind as u64, 6);
    buf.write_bits(1, 3); // SSI
    buf.write_bits(ssi as u64, 24);
    buf.write_bits(0, 1);
    buf.write_bits(0, 1);
    buf.write_bits(0, 1);
}

#[test]
fn test_mac_resource_sdu_extraction_with_fill() {
    let (sink, _lines) = shared_sink();
    let mut report = Report::new(sink);
    let mut umac = UpperMac::new(false);

    // 43-bit header + 12-bit SDU padded to 7 octets with one fill bit
    let mut block = BitBuffer::new(268);
    resource_header(&mut block, true, 7, 1234);
    block.write_bits(0b101100111000, 12);   // SDU
    block.write_bit(1);                     // fill pattern
    block.write_zeroes(268 - block.get_pos());
    block.seek(0);

    let out = drive(&mut umac, &mut report, block, LogicalChannel::SchF, TdmaTime::default());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].sdu.to_bitstr(), "101100111000");
    assert_eq!(umac.address.ssi, 1234);
}

#[test]
fn test_fragment_reassembly_single_delivery() {
    let (sink, lines) = shared_sink();
    let mut report = Report::new(sink);
    let mut umac = UpperMac::new(false);

    let prefix = "1011001110001111";
    let suffix = "0000111101011010";

    // MAC-RESOURCE with fragmentation-start length indication; the SDU
    // prefix runs to the end of the block
    let mut block = BitBuffer::new(43 + prefix.len());
    resource_header(&mut block, false, 0b111111, 777);
    for c in prefix.chars() {
        block.write_bit((c == '1') as u8);
    }
    block.seek(0);

    let t1 = TdmaTime { t: 1, f: 2, m: 3 };
    let out = drive(&mut umac, &mut report, block, LogicalChannel::SchF, t1);
    assert!(out.is_empty(), "fragment start must not reach the LLC");

    // MAC-END with the suffix, timestamped two slots later
    let mut end = BitBuffer::new(13 + suffix.len());
    end.write_bits(1, 2);                   // MAC-FRAG/END
    end.write_bits(1, 1);                   // subtype: END
    end.write_bits(0, 1);                   // no fill
    end.write_bits(0, 1);                   // pos of grant
    end.write_bits(((13 + suffix.len()).div_ceil(8)) as u64, 6);
    end.write_bits(0, 1);                   // no slot granting
    end.write_bits(0, 1);                   // no chan alloc
    for c in suffix.chars() {
        end.write_bit((c == '1') as u8);
    }
    end.seek(0);

    let t2 = TdmaTime { t: 3, f: 2, m: 3 };
    let out = drive(&mut umac, &mut report, end, LogicalChannel::SchF, t2);

    // exactly one reassembled SDU, prefix || suffix, MAC-END timestamp
    assert_eq!(out.len(), 1);
    let sdu = &out[0];
    assert_eq!(sdu.sdu.to_bitstr(), format!("{}{}", prefix, suffix));
    assert_eq!(sdu.ctx.time, t2);
    assert_eq!(sdu.ctx.address.ssi, 777);
    assert!(events(&lines).is_empty(), "reassembly itself emits no events");
}

#[test]
fn test_orphan_mac_end_reports_and_discards() {
    let (sink, lines) = shared_sink();
    let mut report = Report::new(sink);
    let mut umac = UpperMac::new(false);

    let mut end = BitBuffer::new(29);
    end.write_bits(1, 2);
    end.write_bits(1, 1);
    end.write_bits(0, 1);
    end.write_bits(0, 1);
    end.write_bits(4, 6); // 4 octets
    end.write_bits(0, 1);
    end.write_bits(0, 1);
    end.write_bits(0xABCD & 0x7, 3);
    end.write_zeroes(29 - end.get_pos());
    end.seek(0);

    let out = drive(&mut umac, &mut report, end, LogicalChannel::SchF, TdmaTime::default());
    assert!(out.is_empty());

    let events = events(&lines);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["pdu"], "MAC-END");
    assert_eq!(events[0]["orphan"], true);
}

#[test]
fn test_second_fragment_start_overwrites() {
    let (sink, _lines) = shared_sink();
    let mut report = Report::new(sink);
    let mut umac = UpperMac::new(false);
    let t = TdmaTime::default();

    for prefix in ["11110000", "00001111"] {
        let mut block = BitBuffer::new(43 + 8);
        resource_header(&mut block, false, 0b111111, 42);
        for c in prefix.chars() {
            block.write_bit((c == '1') as u8);
        }
        block.seek(0);
        drive(&mut umac, &mut report, block, LogicalChannel::SchF, t);
    }

    let mut end = BitBuffer::new(16);
    end.write_bits(1, 2);
    end.write_bits(1, 1);
    end.write_bits(0, 1);
    end.write_bits(0, 1);
    end.write_bits(2, 6); // 2 octets: header only, 3 SDU bits
    end.write_bits(0, 1);
    end.write_bits(0, 1);
    end.write_bits(0b101, 3);
    end.seek(0);

    let out = drive(&mut umac, &mut report, end, LogicalChannel::SchF, t);
    assert_eq!(out.len(), 1);
    // the replay of the first prefix was dropped
    assert_eq!(out[0].sdu.to_bitstr(), "00001111101");
}

#[test]
fn test_null_pdu_ends_block() {
    let (sink, lines) = shared_sink();
    let mut report = Report::new(sink);
    let mut umac = UpperMac::new(false);

    // an all-zero block parses as a null MAC-RESOURCE and nothing more
    let block = BitBuffer::new(268);
    let out = drive(&mut umac, &mut report, block, LogicalChannel::SchF, TdmaTime::default());
    assert!(out.is_empty());
    assert!(events(&lines).is_empty());
}
