//! End-to-end pipeline tests: raw burst bits in, JSON events out.

mod common;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::io::Read;

use common::*;
use tetra_config::RxConfig;
use tetra_core::{BitBuffer, CellContext};
use tetra_entities::RxStack;

fn acquire_cell(stack: &mut RxStack) -> CellContext {
    let mut cell = CellContext::default();
    cell.update_scrambling_code(208, 10, 5);

    // noise, then a synchronization burst at an odd alignment
    feed_bits(stack, &vec![0u8; 77]);
    let sb = build_sb_burst(
        build_bsch_type1(208, 10, 5, 1, 9, 20),
        build_aach_common(),
        build_bnch_type1(0x2A),
        &cell,
    );
    feed_bits(stack, &sb);
    cell
}

#[test]
fn test_sync_burst_acquires_cell() {
    let (sink, lines) = shared_sink();
    let mut stack = RxStack::new(&RxConfig::default(), sink);

    acquire_cell(&mut stack);

    // cell context carries the identity and derived scrambling code
    let cell = stack.cell();
    assert!(cell.acquired);
    assert_eq!(cell.mcc, 208);
    assert_eq!(cell.mnc, 10);
    assert_eq!(cell.colour_code, 5);
    assert_eq!(
        cell.scrambling_code,
        CellContext::compute_scrambling_code(208, 10, 5)
    );
    // frequency plan and location area from the SYSINFO broadcast
    assert_eq!(cell.downlink_freq_hz, 425_000_000);
    assert_eq!(cell.location_area, 0x2A);

    let events = events(&lines);
    let sync_events: Vec<_> = events.iter().filter(|e| e["pdu"] == "D-MLE-SYNC").collect();
    assert_eq!(sync_events.len(), 1, "exactly one D-MLE-SYNC event");
    assert_eq!(sync_events[0]["service"], "MLE");
    assert_eq!(sync_events[0]["MCC"], 208);
    assert_eq!(sync_events[0]["MNC"], 10);
    // the SYNC PDU anchored the TDMA clock
    assert_eq!(sync_events[0]["tn"], 1);
    assert_eq!(sync_events[0]["fn"], 9);
    assert_eq!(sync_events[0]["mn"], 20);

    let sysinfo: Vec<_> = events.iter().filter(|e| e["pdu"] == "D-MLE-SYSINFO").collect();
    assert_eq!(sysinfo.len(), 1);
    assert_eq!(sysinfo[0]["location area"], 0x2A);
}

#[test]
fn test_d_alert_end_to_end() {
    let (sink, lines) = shared_sink();
    let mut stack = RxStack::new(&RxConfig::default(), sink);
    let cell = acquire_cell(&mut stack);

    // D-ALERT: call id 0x1234, timeout phase 3, reserved, simplex 1, queued 0
    let mut cmce = BitBuffer::new(25);
    cmce.write_bits(0b00000, 5);
    cmce.write_bits(0x1234, 14);
    cmce.write_bits(3, 3);
    cmce.write_bits(0, 1);
    cmce.write_bits(1, 1);
    cmce.write_bits(0, 1);
    cmce.seek(0);

    // LLC BL-UDATA wrapping MLE discriminator 010 (CMCE)
    let mut sdu = BitBuffer::new(4 + 3 + 25);
    sdu.write_bits(0b0010, 4);
    sdu.write_bits(0b010, 3);
    sdu.copy_bits(&mut cmce, 25);
    sdu.seek(0);

    let sch_f = build_mac_resource_block(0x00BEEF, &sdu, 268);
    let ndb = build_ndb_burst(encode_sch_f(sch_f, &cell), build_aach_common(), &cell);
    feed_bits(&mut stack, &ndb);

    let events = events(&lines);
    let alerts: Vec<_> = events.iter().filter(|e| e["pdu"] == "D-ALERT").collect();
    assert_eq!(alerts.len(), 1, "exactly one D-ALERT event");
    let alert = alerts[0];
    assert_eq!(alert["service"], "CMCE");
    assert_eq!(alert["call identifier"], 4660);
    assert_eq!(alert["call timeout, setup phase"], 3);
    assert_eq!(alert["simplex/duplex operation"], 1);
    assert_eq!(alert["call queued"], 0);
    // address context from the carrying MAC-RESOURCE
    assert_eq!(alert["ssi"], 0x00BEEF);
    // one slot after the SYNC burst
    assert_eq!(alert["tn"], 2);
    assert_eq!(alert["fn"], 9);
    assert_eq!(alert["mn"], 20);
}

#[test]
fn test_tch_s_speech_frame() {
    let (sink, lines) = shared_sink();
    let mut stack = RxStack::new(&RxConfig::default(), sink);
    let cell = acquire_cell(&mut stack);

    // class bits with a recognizable pattern
    let mut class_bits = BitBuffer::new(432);
    for i in 0..432 {
        class_bits.write_bits(((i / 3) % 2) as u64, 1);
    }
    class_bits.seek(0);

    let ndb = build_ndb_burst(
        encode_tch_s(class_bits, &cell),
        build_aach_traffic(9),
        &cell,
    );
    feed_bits(&mut stack, &ndb);

    let events = events(&lines);
    let frames: Vec<_> = events.iter().filter(|e| e["pdu"] == "TCH_S").collect();
    assert_eq!(frames.len(), 1);
    let frame = frames[0];
    assert_eq!(frame["service"], "UPLANE");
    assert_eq!(frame["uzsize"], 1380);
    assert_eq!(frame["downlink usage marker"], 9);
    let zsize = frame["zsize"].as_u64().unwrap();
    assert!(zsize <= 1380);

    // expand the payload and check the marker layout
    let compressed = BASE64.decode(frame["frame"].as_str().unwrap()).unwrap();
    assert_eq!(compressed.len() as u64, zsize);
    let mut raw = Vec::new();
    flate2::read::ZlibDecoder::new(&compressed[..]).read_to_end(&mut raw).unwrap();
    assert_eq!(raw.len(), 1380);

    let words: Vec<u16> = raw
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    for i in 0..6 {
        assert_eq!(words[115 * i], 0x6B21 + i as u16, "marker {}", i);
    }
    // first class bit is 0 -> positive sample
    assert_eq!(words[1], 127);
    // payload samples are bipolar
    for (i, &w) in words.iter().enumerate() {
        if i % 115 != 0 && i < 436 {
            assert!(w == 127 || w == (-127i16) as u16, "sample {} = {:#x}", i, w);
        }
    }
}

#[test]
fn test_unacquired_bursts_stay_silent() {
    let (sink, lines) = shared_sink();
    let mut stack = RxStack::new(&RxConfig::default(), sink);

    // sync on a burst whose BSCH is corrupted: the receiver aligns but
    // cannot acquire the cell, and non-SB bursts must be dropped silently
    let mut cell = CellContext::default();
    cell.update_scrambling_code(208, 10, 5);
    let mut sb = build_sb_burst(
        build_bsch_type1(208, 10, 5, 1, 1, 1),
        build_aach_common(),
        build_bnch_type1(1),
        &cell,
    );
    // destroy the BSCH block beyond repair, keep the training sequence
    for bit in sb.iter_mut().take(214).skip(94).step_by(2) {
        *bit ^= 1;
    }
    feed_bits(&mut stack, &sb);
    assert!(!stack.cell().acquired);

    let before = lines.lock().unwrap().len();
    let ndb = build_ndb_burst(
        encode_sch_f(BitBuffer::new(268), &cell),
        build_aach_common(),
        &cell,
    );
    feed_bits(&mut stack, &ndb);

    // no spurious events for the undecodable burst
    assert_eq!(lines.lock().unwrap().len(), before);
}
