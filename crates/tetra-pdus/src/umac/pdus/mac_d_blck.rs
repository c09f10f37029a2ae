use core::fmt;

use tetra_core::{BitBuffer, PduParseErr};

/// Clause 21.4.3.4 MAC-D-BLCK. Addressed by event label only; the TM-SDU
/// runs to the end of the MAC block.
#[derive(Debug, Clone)]
pub struct MacDBlck {
    // 1
    pub fill_bits: bool,
    // 1
    pub slot_granting_flag: bool,
    // 8 opt
    pub slot_granting_element: Option<u8>,
    // 2
    pub encryption_mode: u8,
    // 10
    pub event_label: u16,
    // 1
    pub immediate_napping: bool,
}

impl MacDBlck {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let mac_pdu_type = buf.read_field(2, "mac_pdu_type")?;
        if mac_pdu_type != 3 {
            return Err(PduParseErr::InvalidPduType { expected: 3, found: mac_pdu_type });
        }

        let fill_bits = buf.read_field(1, "fill_bits")? != 0;
        let slot_granting_flag = buf.read_field(1, "slot_granting_flag")? != 0;
        let slot_granting_element = if slot_granting_flag {
            Some(buf.read_field(8, "slot_granting_element")? as u8)
        } else {
            None
        };
        let encryption_mode = buf.read_field(2, "encryption_mode")? as u8;
        let event_label = buf.read_field(10, "event_label")? as u16;
        let immediate_napping = buf.read_field(1, "immediate_napping")? != 0;

        Ok(MacDBlck {
            fill_bits,
            slot_granting_flag,
            slot_granting_element,
            encryption_mode,
            event_label,
            immediate_napping,
        })
    }
}

impl fmt::Display for MacDBlck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MacDBlck {{ fill_bits: {} encryption_mode: {} event_label: {} }}",
            self.fill_bits, self.encryption_mode, self.event_label
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_d_blck() {
        // type 11, fill 0, no slot grant, encr 01, label 0x155, napping 0
        let mut bits = String::from("11");
        bits += "0";
        bits += "0";
        bits += "01";
        bits += &format!("{:010b}", 0x155);
        bits += "0";
        let mut buf = BitBuffer::from_bitstr(&bits);

        let pdu = MacDBlck::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.encryption_mode, 1);
        assert_eq!(pdu.event_label, 0x155);
        assert_eq!(buf.get_pos(), 17);
    }
}
