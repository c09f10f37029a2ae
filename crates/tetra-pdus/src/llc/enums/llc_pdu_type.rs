/// LLC PDU types, Clause 21.2.1 table 21.1. The four-bit discriminator
/// covers both the basic link (BL) and advanced link (AL) sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlcPduType {
    BlAdata,
    BlData,
    BlUdata,
    BlAck,
    BlAdataFcs,
    BlDataFcs,
    BlUdataFcs,
    BlAckFcs,
    AlSetup,
    AlDataFinal,
    AlUdataUfinal,
    AlAckRnr,
    AlReconnect,
    SupplLlcPdu,
    Layer2SignallingPdu,
    AlDisc,
}

impl From<u64> for LlcPduType {
    fn from(v: u64) -> Self {
        match v & 0xF {
            0b0000 => LlcPduType::BlAdata,
            0b0001 => LlcPduType::BlData,
            0b0010 => LlcPduType::BlUdata,
            0b0011 => LlcPduType::BlAck,
            0b0100 => LlcPduType::BlAdataFcs,
            0b0101 => LlcPduType::BlDataFcs,
            0b0110 => LlcPduType::BlUdataFcs,
            0b0111 => LlcPduType::BlAckFcs,
            0b1000 => LlcPduType::AlSetup,
            0b1001 => LlcPduType::AlDataFinal,
            0b1010 => LlcPduType::AlUdataUfinal,
            0b1011 => LlcPduType::AlAckRnr,
            0b1100 => LlcPduType::AlReconnect,
            0b1101 => LlcPduType::SupplLlcPdu,
            0b1110 => LlcPduType::Layer2SignallingPdu,
            _ => LlcPduType::AlDisc,
        }
    }
}

impl LlcPduType {
    pub fn has_fcs(self) -> bool {
        matches!(
            self,
            LlcPduType::BlAdataFcs
                | LlcPduType::BlDataFcs
                | LlcPduType::BlUdataFcs
                | LlcPduType::BlAckFcs
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            LlcPduType::BlAdata => "BL-ADATA",
            LlcPduType::BlData => "BL-DATA",
            LlcPduType::BlUdata => "BL-UDATA",
            LlcPduType::BlAck => "BL-ACK",
            LlcPduType::BlAdataFcs => "BL-ADATA+FCS",
            LlcPduType::BlDataFcs => "BL-DATA+FCS",
            LlcPduType::BlUdataFcs => "BL-UDATA+FCS",
            LlcPduType::BlAckFcs => "BL-ACK+FCS",
            LlcPduType::AlSetup => "AL-SETUP",
            LlcPduType::AlDataFinal => "AL-DATA/AL-FINAL",
            LlcPduType::AlUdataUfinal => "AL-UDATA/AL-UFINAL",
            LlcPduType::AlAckRnr => "AL-ACK/AL-RNR",
            LlcPduType::AlReconnect => "AL-RECONNECT",
            LlcPduType::SupplLlcPdu => "SUPPLEMENTARY LLC PDU",
            LlcPduType::Layer2SignallingPdu => "LAYER 2 SIGNALLING PDU",
            LlcPduType::AlDisc => "AL-DISC",
        }
    }
}
