use core::fmt;

use tetra_core::{BitBuffer, PduParseErr};

use crate::umac::pdus::fields::ChanAllocElement;

/// Clause 21.4.3.3 MAC-END (downlink). Carries the final part of a
/// fragmented TM-SDU.
#[derive(Debug, Clone)]
pub struct MacEnd {
    // 1
    pub fill_bits: bool,
    // 1
    pub pos_of_grant: u8,
    // 6
    pub length_ind: u8,
    // 8 opt
    pub slot_granting_element: Option<u8>,
    pub chan_alloc_element: Option<ChanAllocElement>,
}

impl MacEnd {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let mac_pdu_type = buf.read_field(2, "mac_pdu_type")?;
        if mac_pdu_type != 1 {
            return Err(PduParseErr::InvalidPduType { expected: 1, found: mac_pdu_type });
        }
        let pdu_subtype = buf.read_field(1, "pdu_subtype")?;
        if pdu_subtype != 1 {
            return Err(PduParseErr::InvalidPduType { expected: 1, found: pdu_subtype });
        }

        let mut s = MacEnd {
            fill_bits: buf.read_field(1, "fill_bits")? != 0,
            pos_of_grant: buf.read_field(1, "pos_of_grant")? as u8,
            length_ind: buf.read_field(6, "length_ind")? as u8,
            slot_granting_element: None,
            chan_alloc_element: None,
        };

        if buf.read_field(1, "slot_granting_flag")? == 1 {
            s.slot_granting_element = Some(buf.read_field(8, "slot_granting_element")? as u8);
        }

        if buf.read_field(1, "chan_alloc_flag")? == 1 {
            s.chan_alloc_element = Some(ChanAllocElement::from_bitbuf(buf)?);
        }

        Ok(s)
    }
}

impl fmt::Display for MacEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MacEnd {{ fill_bits: {} length_ind: {} }}",
            self.fill_bits, self.length_ind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_end() {
        // type 01, subtype 1, fill 1, grant 0, len 5, no grants
        let mut buf = BitBuffer::from_bitstr("0111000010100");
        let pdu = MacEnd::from_bitbuf(&mut buf).unwrap();
        assert!(pdu.fill_bits);
        assert_eq!(pdu.length_ind, 5);
        assert_eq!(buf.get_pos(), 13);
    }

    #[test]
    fn test_frag_subtype_rejected() {
        let mut buf = BitBuffer::from_bitstr("0100000000000");
        assert!(MacEnd::from_bitbuf(&mut buf).is_err());
    }
}
