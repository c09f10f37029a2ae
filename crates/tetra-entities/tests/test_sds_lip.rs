//! SDS and LIP tests driven through the CMCE service entry point.

mod common;

use common::{events, shared_sink};
use tetra_core::{BitBuffer, MacAddress, Report, TdmaTime};
use tetra_entities::cmce;
use tetra_saps::DecodeContext;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

fn ctx() -> DecodeContext {
    DecodeContext {
        channel: LogicalChannel::SchF,
        time: TdmaTime { t: 2, f: 5, m: 11 },
        address: MacAddress::default(),
    }
}

/// Builds a D-SDS-DATA PDU carrying a type-4 payload.
fn build_d_sds_data(type4_payload: &BitBuffer) -> BitBuffer {
    let len = type4_payload.get_len();
    let mut pdu = BitBuffer::new(5 + 2 + 24 + 2 + 11 + len);
    pdu.write_bits(0b01111, 5);         // D-SDS-DATA
    pdu.write_bits(1, 2);               // CPTI: SSI
    pdu.write_bits(0x1E240, 24);        // calling party 123456
    pdu.write_bits(3, 2);               // SDTI: length + type 4
    pdu.write_bits(len as u64, 11);
    let mut payload = type4_payload.view(0, 0);
    pdu.copy_bits(&mut payload, len);
    pdu.seek(0);
    pdu
}

#[test]
fn test_simple_text_messaging_gsm7() {
    let (sink, lines) = shared_sink();
    let mut report = Report::new(sink);

    // PID 0x02, no timestamp, GSM-7, "HELLO" in 35 bits
    let mut payload = BitBuffer::new(8 + 1 + 7 + 35);
    payload.write_bits(0x02, 8);
    payload.write_bits(0, 1);
    payload.write_bits(0, 7);
    for c in [0x48u8, 0x45, 0x4c, 0x4c, 0x4f] {
        payload.write_bits(c as u64, 7);
    }
    payload.seek(0);

    let mut pdu = build_d_sds_data(&payload);
    cmce::service(&mut pdu, &ctx(), &mut report);

    let events = events(&lines);
    // the decoded event plus the hex dump companion
    assert_eq!(events.len(), 2);
    let ev = &events[0];
    assert_eq!(ev["pdu"], "D-SDS-DATA");
    assert_eq!(ev["calling party ssi"], 123456);
    assert_eq!(ev["protocol id"], 2);
    assert_eq!(ev["protocol info"], "simple text messaging");
    assert_eq!(ev["infos"], "HELLO");

    assert_eq!(events[1]["pdu"], "D-SDS-DATA");
    assert!(events[1]["hex"].is_string());
}

#[test]
fn test_lip_short_location_report() {
    let (sink, lines) = shared_sink();
    let mut report = Report::new(sink);

    // PID 0x0A, short location report with the reference coordinates
    let mut payload = BitBuffer::new(8 + 68);
    payload.write_bits(0x0A, 8);
    payload.write_bits(0b00, 2);            // short location report
    payload.write_bits(0, 2);               // time elapsed
    payload.write_bits(0x0CE6C98, 25);      // longitude
    payload.write_bits(0xCA1959, 24);       // latitude
    payload.write_bits(2, 3);               // position error
    payload.write_bits(70, 7);              // horizontal velocity
    payload.write_bits(3, 4);               // direction of travel
    payload.write_bits(0, 1);               // type of additional data
    payload.write_bits(1, 8);               // reason for sending
    payload.seek(0);

    let mut pdu = build_d_sds_data(&payload);
    cmce::service(&mut pdu, &ctx(), &mut report);

    let events = events(&lines);
    let ev = &events[0];
    assert_eq!(ev["protocol info"], "location information protocol");
    assert_eq!(ev["sds-lip"], "short location report");
    assert!((ev["longitude"].as_f64().unwrap() - 145.142012).abs() < 1e-4);
    assert!((ev["latitude"].as_f64().unwrap() - -37.899131).abs() < 1e-4);
    assert_eq!(ev["position error"], "< 200 m");
    assert_eq!(ev["direction of travel"], "67.5 ENE");
    assert_eq!(ev["reason for sending"], 1);
    assert_eq!(ev["horizontal_velocity uint8"], 70);
}

#[test]
fn test_d_status() {
    let (sink, lines) = shared_sink();
    let mut report = Report::new(sink);

    let mut pdu = BitBuffer::new(5 + 2 + 24 + 16 + 1);
    pdu.write_bits(0b01000, 5);         // D-STATUS
    pdu.write_bits(1, 2);               // CPTI: SSI
    pdu.write_bits(4242, 24);
    pdu.write_bits(0x8001, 16);         // pre-coded status
    pdu.write_bits(0, 1);               // no type 3 elements
    pdu.seek(0);

    cmce::service(&mut pdu, &ctx(), &mut report);

    let events = events(&lines);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["pdu"], "D-STATUS");
    assert_eq!(events[0]["calling party ssi"], 4242);
    assert_eq!(events[0]["pre-coded status"], 0x8001);
}

#[test]
fn test_truncated_sds_marks_event() {
    let (sink, lines) = shared_sink();
    let mut report = Report::new(sink);

    // D-SDS-DATA cut off inside the calling party address
    let mut pdu = BitBuffer::new(5 + 2 + 8);
    pdu.write_bits(0b01111, 5);
    pdu.write_bits(1, 2);               // CPTI: SSI, but only 8 bits follow
    pdu.write_bits(0xAB, 8);
    pdu.seek(0);

    cmce::service(&mut pdu, &ctx(), &mut report);

    let events = events(&lines);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["truncated"], true);
}
