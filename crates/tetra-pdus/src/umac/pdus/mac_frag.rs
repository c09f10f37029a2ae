use core::fmt;

use tetra_core::{BitBuffer, PduParseErr};

/// Clause 21.4.3.2 MAC-FRAG (downlink). The SDU continuation runs from the
/// header to the end of the MAC block.
#[derive(Debug, Clone)]
pub struct MacFrag {
    // 1
    pub fill_bits: bool,
}

impl MacFrag {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let mac_pdu_type = buf.read_field(2, "mac_pdu_type")?;
        if mac_pdu_type != 1 {
            return Err(PduParseErr::InvalidPduType { expected: 1, found: mac_pdu_type });
        }
        let pdu_subtype = buf.read_field(1, "pdu_subtype")?;
        if pdu_subtype != 0 {
            return Err(PduParseErr::InvalidPduType { expected: 0, found: pdu_subtype });
        }
        let fill_bits = buf.read_field(1, "fill_bits")? != 0;

        Ok(MacFrag { fill_bits })
    }
}

impl fmt::Display for MacFrag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacFrag {{ fill_bits: {} }}", self.fill_bits)
    }
}
