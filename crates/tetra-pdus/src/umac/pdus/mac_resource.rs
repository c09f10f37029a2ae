use core::fmt;

use tetra_core::{AddressType, BitBuffer, MacAddress, PduParseErr};

use crate::umac::pdus::fields::ChanAllocElement;

/// Length indication value announcing the start of a fragmented TM-SDU
/// (Clause 21.4.3.1): the SDU runs to the end of the MAC block and is
/// continued by MAC-FRAG / MAC-END PDUs.
pub const LENGTH_IND_FRAG_START: u8 = 0b111111;
/// Length indication value announcing that the second half slot is stolen.
pub const LENGTH_IND_SECOND_HALF_STOLEN: u8 = 0b111110;

/// Clause 21.4.3.1 MAC-RESOURCE (downlink reception)
#[derive(Debug, Clone)]
pub struct MacResource {
    /// SDU is followed by fill bits to reach 8-bit alignment
    pub fill_bits: bool,
    /// Only relevant if a slot granting element is present
    pub pos_of_grant: u8,
    /// Upper bit = encryption enabled, lower bit = CCK parity
    pub encryption_mode: u8,
    /// Random access acknowledged
    pub random_access_flag: bool,
    /// PDU length in octets, or one of the LENGTH_IND_* markers
    pub length_ind: u8,
    /// Resolved address element. None for a Null PDU, which carries no SDU
    /// and ends processing of the MAC block.
    pub address: Option<MacAddress>,
    // 4 opt
    pub power_control_element: Option<u8>,
    // 8 opt
    pub slot_granting_element: Option<u8>,
    pub chan_alloc_element: Option<ChanAllocElement>,
}

impl MacResource {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let pdu_type = buf.read_field(2, "mac_pdu_type")?;
        if pdu_type != 0 {
            return Err(PduParseErr::InvalidPduType { expected: 0, found: pdu_type });
        }

        let mut s = MacResource {
            fill_bits: buf.read_field(1, "fill_bits")? != 0,
            pos_of_grant: buf.read_field(1, "pos_of_grant")? as u8,
            encryption_mode: buf.read_field(2, "encryption_mode")? as u8,
            random_access_flag: buf.read_field(1, "random_access_flag")? != 0,
            length_ind: buf.read_field(6, "length_ind")? as u8,
            address: None,
            power_control_element: None,
            slot_granting_element: None,
            chan_alloc_element: None,
        };

        let bits = buf.read_field(3, "addr_type")?;
        let addr_type = AddressType::try_from(bits).unwrap(); // 3 bits cover the enum

        if addr_type == AddressType::NullPdu {
            // Remaining header fields carry no meaning in a null PDU
            s.fill_bits = false;
            s.encryption_mode = 0;
            return Ok(s);
        }

        let mut addr = MacAddress {
            address_type: addr_type,
            encryption_mode: s.encryption_mode,
            ..Default::default()
        };
        match addr_type {
            AddressType::Ssi => {
                addr.ssi = buf.read_field(24, "ssi")? as u32;
            }
            AddressType::EventLabel => {
                addr.event_label = buf.read_field(10, "event_label")? as u16;
            }
            AddressType::Ussi => {
                addr.ussi = buf.read_field(24, "ussi")? as u32;
            }
            AddressType::Smi => {
                addr.smi = buf.read_field(24, "smi")? as u32;
            }
            AddressType::SsiAndEventLabel => {
                addr.ssi = buf.read_field(24, "ssi")? as u32;
                addr.event_label = buf.read_field(10, "event_label")? as u16;
            }
            AddressType::SsiAndUsageMarker => {
                addr.ssi = buf.read_field(24, "ssi")? as u32;
                addr.usage_marker = buf.read_field(6, "usage_marker")? as u8;
            }
            AddressType::SmiAndEventLabel => {
                addr.smi = buf.read_field(24, "smi")? as u32;
                addr.event_label = buf.read_field(10, "event_label")? as u16;
            }
            AddressType::NullPdu => unreachable!(),
        }
        s.address = Some(addr);

        if buf.read_field(1, "power_control_flag")? == 1 {
            s.power_control_element = Some(buf.read_field(4, "power_control_element")? as u8);
        }

        if buf.read_field(1, "slot_granting_flag")? == 1 {
            s.slot_granting_element = Some(buf.read_field(8, "slot_granting_element")? as u8);
        }

        if buf.read_field(1, "chan_alloc_flag")? == 1 {
            s.chan_alloc_element = Some(ChanAllocElement::from_bitbuf(buf)?);
        }

        Ok(s)
    }

    pub fn is_null_pdu(&self) -> bool {
        self.address.is_none()
    }

    /// True when the length indication announces a fragmented SDU running to
    /// the end of the MAC block.
    pub fn starts_fragmentation(&self) -> bool {
        self.length_ind == LENGTH_IND_FRAG_START
    }

    pub fn second_half_stolen(&self) -> bool {
        self.length_ind == LENGTH_IND_SECOND_HALF_STOLEN
    }
}

impl fmt::Display for MacResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MacResource {{ fill_bits: {} encryption_mode: {} length_ind: {}",
            self.fill_bits, self.encryption_mode, self.length_ind
        )?;
        if let Some(addr) = &self.address {
            write!(f, " addr_type: {:?} ssi: {}", addr.address_type, addr.ssi)?;
        } else {
            write!(f, " (null pdu)")?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ssi_address() {
        // header: type 00, fill 0, grant 0, encr 00, random 0, len 9,
        // addr type SSI, ssi 0x123456, no optional elements
        let mut bits = String::from("00" );
        bits += "0";       // fill
        bits += "0";       // pos of grant
        bits += "00";      // encryption
        bits += "0";       // random access
        bits += "001001";  // length = 9 octets
        bits += "001";     // SSI
        bits += &format!("{:024b}", 0x123456);
        bits += "0";       // power control flag
        bits += "0";       // slot granting flag
        bits += "0";       // chan alloc flag
        let mut buf = BitBuffer::from_bitstr(&bits);

        let pdu = MacResource::from_bitbuf(&mut buf).unwrap();
        assert_eq!(buf.get_len_remaining(), 0);
        let addr = pdu.address.unwrap();
        assert_eq!(addr.address_type, AddressType::Ssi);
        assert_eq!(addr.ssi, 0x123456);
        assert_eq!(pdu.length_ind, 9);
        assert!(!pdu.starts_fragmentation());
    }

    #[test]
    fn test_parse_ssi_usage_marker_frag() {
        let mut bits = String::from("00");
        bits += "0";       // fill
        bits += "0";       // pos of grant
        bits += "01";      // encryption
        bits += "0";       // random access
        bits += "111111";  // frag start
        bits += "110";     // SSI + usage marker
        bits += &format!("{:024b}", 42);
        bits += "010101";  // usage marker 21
        bits += "0";
        bits += "0";
        bits += "0";
        let mut buf = BitBuffer::from_bitstr(&bits);

        let pdu = MacResource::from_bitbuf(&mut buf).unwrap();
        let addr = pdu.address.unwrap();
        assert_eq!(addr.address_type, AddressType::SsiAndUsageMarker);
        assert_eq!(addr.ssi, 42);
        assert_eq!(addr.usage_marker, 21);
        assert_eq!(addr.encryption_mode, 1);
        assert!(pdu.starts_fragmentation());
    }

    #[test]
    fn test_parse_null_pdu() {
        let mut buf = BitBuffer::from_bitstr("0000000000010000");
        let pdu = MacResource::from_bitbuf(&mut buf).unwrap();
        assert!(pdu.is_null_pdu());
        assert_eq!(buf.get_pos(), 16);
    }

    #[test]
    fn test_parse_with_chanalloc() {
        // captured frame carrying a channel allocation element
        let mut buffer = BitBuffer::from_bitstr(
            "00000000100111100000000000000000110011001111100010100101100010111111000011",
        );
        let pdu = MacResource::from_bitbuf(&mut buffer).unwrap();
        assert_eq!(buffer.get_len_remaining(), 0);
        assert_eq!(pdu.chan_alloc_element.as_ref().unwrap().carrier_num, 1528);
    }
}
