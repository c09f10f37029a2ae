//! One JSON event per decoded PDU.
//!
//! Parsers insert keys in the order the bits are read; that order is part of
//! the external contract, so the JSON map must preserve insertion order
//! (serde_json with the `preserve_order` feature).

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use serde_json::{Map, Value};
use std::io::Write;

use crate::address::{AddressType, MacAddress};
use crate::bitbuffer::BitBuffer;
use crate::tdma_time::TdmaTime;

/// Receives completed event lines. The production sink pushes onto a message
/// queue; tests collect into a Vec.
pub trait EventSink {
    fn send_line(&mut self, line: &str);
}

/// Collecting sink for tests and tooling.
#[derive(Default)]
pub struct VecSink {
    pub lines: Vec<String>,
}

impl EventSink for VecSink {
    fn send_line(&mut self, line: &str) {
        self.lines.push(line.trim_end().to_string());
    }
}

/// Accumulator for a single event. `start` seeds the common header fields,
/// `add` appends in parse order, `send` emits exactly one line and resets.
/// No state survives a `send`.
pub struct Report {
    sink: Box<dyn EventSink>,
    obj: Map<String, Value>,
}

impl Report {
    pub fn new(sink: Box<dyn EventSink>) -> Self {
        Report { sink, obj: Map::new() }
    }

    /// Begin an event for a signalling PDU.
    pub fn start(&mut self, service: &str, pdu: &str, time: TdmaTime, addr: &MacAddress) {
        self.obj.clear();

        let now = chrono::Local::now();
        self.add("time", now.format("%Y-%m-%dT%H:%M:%SZ").to_string());
        self.add("service", service);
        self.add("pdu", pdu);

        self.add("tn", time.t as u64);
        self.add("fn", time.f as u64);
        self.add("mn", time.m as u64);

        self.add("ssi", addr.ssi as u64);
        self.add("usage marker", addr.usage_marker as u64);
        self.add("encryption mode", addr.encryption_mode as u64);
        self.add("address_type", addr.address_type as u64);
        self.add_address_fields(addr);
    }

    /// Begin an event for U-plane traffic. Encryption mode is reported from
    /// MAC state by the caller, not seeded from the address element.
    pub fn start_uplane(&mut self, service: &str, pdu: &str, time: TdmaTime, addr: &MacAddress) {
        self.obj.clear();

        let now = chrono::Local::now();
        self.add("time", now.format("%Y-%m-%dT%H:%M:%SZ").to_string());
        self.add("service", service);
        self.add("pdu", pdu);

        self.add("tn", time.t as u64);
        self.add("fn", time.f as u64);
        self.add("mn", time.m as u64);

        self.add("ssi", addr.ssi as u64);
        self.add("usage marker", addr.usage_marker as u64);
        self.add("address_type", addr.address_type as u64);
        self.add_address_fields(addr);
    }

    fn add_address_fields(&mut self, addr: &MacAddress) {
        match addr.address_type {
            AddressType::Ssi => {
                self.add("actual ssi", addr.ssi as u64);
            }
            AddressType::Ussi => {
                self.add("ussi", addr.ussi as u64);
            }
            AddressType::Smi => {
                self.add("smi", addr.smi as u64);
            }
            AddressType::EventLabel => {
                self.add("event label", addr.event_label as u64);
            }
            AddressType::SsiAndEventLabel => {
                self.add("actual ssi", addr.ssi as u64);
                self.add("event label", addr.event_label as u64);
            }
            AddressType::SsiAndUsageMarker => {
                self.add("actual ssi", addr.ssi as u64);
                self.add("actual usage marker", addr.usage_marker as u64);
            }
            AddressType::SmiAndEventLabel => {
                self.add("smi", addr.smi as u64);
                self.add("event label", addr.event_label as u64);
            }
            AddressType::NullPdu => {}
        }
    }

    /// Append a keyed value. Insertion order is preserved through
    /// serialization.
    pub fn add<V: Into<Value>>(&mut self, field: &str, val: V) {
        self.obj.insert(field.to_string(), val.into());
    }

    /// Append a bit buffer as a hex string (packed 4-bit groups, no 0x).
    pub fn add_pdu(&mut self, field: &str, pdu: &BitBuffer) {
        self.add(field, pdu.dump_hex());
    }

    /// Append an array of single-key objects, e.g. neighbour cell listings.
    pub fn add_array(&mut self, name: &str, infos: &[(String, u64)]) {
        let arr: Vec<Value> = infos
            .iter()
            .map(|(field, val)| {
                let mut obj = Map::new();
                obj.insert(field.clone(), Value::from(*val));
                Value::Object(obj)
            })
            .collect();
        self.obj.insert(name.to_string(), Value::Array(arr));
    }

    /// Append binary data zlib-compressed and base64-encoded, together with
    /// the sizes needed to expand it again ("uzsize" and "zsize").
    pub fn add_compressed(&mut self, field: &str, data: &[u8]) {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        // writing to a Vec cannot fail
        enc.write_all(data).unwrap();
        let compressed = enc.finish().unwrap();

        self.add("uzsize", data.len() as u64);
        self.add("zsize", compressed.len() as u64);
        self.add(field, BASE64.encode(&compressed));
    }

    /// Serialize the accumulated event as one line of JSON and emit it.
    pub fn send(&mut self) {
        let mut line = serde_json::to_string(&Value::Object(std::mem::take(&mut self.obj)))
            .unwrap_or_else(|e| format!("{{\"error\":\"serialize: {}\"}}", e));
        line.push('\n');
        self.sink.send_line(&line);
        tracing::debug!("-> {}", line.trim_end());
    }
}
