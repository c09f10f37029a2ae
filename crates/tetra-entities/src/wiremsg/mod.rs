//! GSMTAP v2 mirror of decoded blocks for protocol analyzers listening on
//! UDP 4729 (type TETRA_I1).

use std::net::UdpSocket;

use tetra_core::{BitBuffer, TdmaTime};
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

const GSMTAP_VERSION: u8 = 0x02;
const GSMTAP_TYPE_TETRA_I1: u8 = 0x05;
const GSMTAP_PORT: u16 = 4729;

const GSMTAP_TETRA_BSCH: u8 = 1;
const GSMTAP_TETRA_AACH: u8 = 2;
const GSMTAP_TETRA_SCH_HD: u8 = 4;
const GSMTAP_TETRA_SCH_F: u8 = 5;
const GSMTAP_TETRA_BNCH: u8 = 6;
const GSMTAP_TETRA_STCH: u8 = 7;
const GSMTAP_TETRA_TCH_F: u8 = 8;

pub struct WireMsg {
    socket: UdpSocket,
}

impl WireMsg {
    pub fn new() -> std::io::Result<Self> {
        let socket = UdpSocket::bind(("0.0.0.0", 0))?;
        socket.connect(("127.0.0.1", GSMTAP_PORT))?;
        Ok(WireMsg { socket })
    }

    fn tetra_channel_to_gsmtap(channel: LogicalChannel) -> u8 {
        match channel {
            LogicalChannel::Bsch => GSMTAP_TETRA_BSCH,
            LogicalChannel::Aach => GSMTAP_TETRA_AACH,
            LogicalChannel::SchHd => GSMTAP_TETRA_SCH_HD,
            LogicalChannel::SchF => GSMTAP_TETRA_SCH_F,
            LogicalChannel::Bnch => GSMTAP_TETRA_BNCH,
            LogicalChannel::Stch => GSMTAP_TETRA_STCH,
            LogicalChannel::TchS => GSMTAP_TETRA_TCH_F,
        }
    }

    /// Send one decoded block. Failures are logged and otherwise ignored:
    /// the analyzer tap must never stall the pipeline.
    pub fn send_block(&self, channel: LogicalChannel, time: TdmaTime, pdu: &BitBuffer) {
        let mut msg = Vec::with_capacity(16 + pdu.get_len() / 8 + 1);

        // 16-byte GSMTAP header
        msg.push(GSMTAP_VERSION);
        msg.push(4); // header length in 32-bit words
        msg.push(GSMTAP_TYPE_TETRA_I1);
        msg.push(time.t as u8);
        msg.extend_from_slice(&0u16.to_be_bytes()); // arfcn
        msg.push(0); // signal dBm
        msg.push(0); // snr dB
        let frame_number = 18 * time.m as u32 + time.f as u32;
        msg.extend_from_slice(&frame_number.to_be_bytes());
        msg.push(Self::tetra_channel_to_gsmtap(channel));
        msg.push(0); // antenna
        msg.push(0); // sub slot
        msg.push(0); // reserved

        // pack the block bits MSB-first
        let len = pdu.get_len();
        let mut byte = 0u8;
        for i in 0..len {
            byte = (byte << 1) | pdu.peek_bits_zeroext(i, 1) as u8;
            if i % 8 == 7 {
                msg.push(byte);
                byte = 0;
            }
        }
        if len % 8 != 0 {
            msg.push(byte << (8 - len % 8));
        }

        if let Err(e) = self.socket.send(&msg) {
            tracing::debug!("gsmtap send failed: {}", e);
        }
    }
}
