//! Variable-length elements shared by the downlink MAC PDUs.

use tetra_core::{BitBuffer, PduParseErr};

/// Channel allocation element, Clause 21.5.2. Parsed mainly to advance the
/// cursor past it so the TM-SDU boundary is found; the carrier number is the
/// one field of interest to a passive receiver.
#[derive(Debug, Clone)]
pub struct ChanAllocElement {
    // 2
    pub alloc_type: u8,
    // 4-bit field, each bit represents a timeslot (TS1 to TS4)
    pub ts_assigned: [bool; 4],
    // 2 bits. 0 = Augmented, 1 = DL only, 2 = UL only, 3 = Both
    pub ul_dl_assigned: u8,
    // 1
    pub clch_permission: bool,
    // 1
    pub cell_change_flag: bool,
    // 12
    pub carrier_num: u16,
    // 10 opt: freq band, offset, duplex spacing, reverse operation
    pub ext_carrier: Option<(u8, u8, u8, bool)>,
    // 2
    pub mon_pattern: u8,
    // 2 opt
    pub frame18_mon_pattern: Option<u8>,
}

impl ChanAllocElement {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let alloc_type = buf.read_field(2, "alloc_type")? as u8;

        let bitmap = buf.read_field(4, "ts_assigned")? as u8;
        let ts_assigned = [
            (bitmap & 0b1000) != 0,
            (bitmap & 0b0100) != 0,
            (bitmap & 0b0010) != 0,
            (bitmap & 0b0001) != 0,
        ];

        let ul_dl_assigned = buf.read_field(2, "ul_dl_assigned")? as u8;
        let clch_permission = buf.read_field(1, "clch_permission")? != 0;
        let cell_change_flag = buf.read_field(1, "cell_change_flag")? != 0;
        let carrier_num = buf.read_field(12, "carrier_num")? as u16;

        let ext_carrier = if buf.read_field(1, "ext_carrier_num_flag")? == 1 {
            let freq_band = buf.read_field(4, "ext_freq_band")? as u8;
            let offset = buf.read_field(2, "ext_offset")? as u8;
            let duplex_spacing = buf.read_field(3, "ext_duplex_spacing")? as u8;
            let reverse_operation = buf.read_field(1, "ext_reverse_operation")? != 0;
            Some((freq_band, offset, duplex_spacing, reverse_operation))
        } else {
            None
        };

        let mon_pattern = buf.read_field(2, "mon_pattern")? as u8;
        let frame18_mon_pattern = match mon_pattern {
            0 => Some(buf.read_field(2, "frame18_mon_pattern")? as u8),
            _ => None,
        };

        if ul_dl_assigned == 0 {
            // Augmented channel allocation has an open-ended tail; the SDU
            // boundary cannot be recovered, so the caller must stop here.
            return Err(PduParseErr::InvalidValue {
                field: "ul_dl_assigned",
                value: 0,
            });
        }

        Ok(ChanAllocElement {
            alloc_type,
            ts_assigned,
            ul_dl_assigned,
            clch_permission,
            cell_change_flag,
            carrier_num,
            ext_carrier,
            mon_pattern,
            frame18_mon_pattern,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chanalloc() {
        let bitstr = "0100101100010111111000011";
        let mut buffer = BitBuffer::from_bitstr(bitstr);
        let result = ChanAllocElement::from_bitbuf(&mut buffer).unwrap();
        assert_eq!(buffer.get_len_remaining(), 0);
        assert_eq!(result.carrier_num, 1528);
        assert_eq!(result.ul_dl_assigned, 3);
    }

    #[test]
    fn test_parse_chanalloc_frame18_pattern() {
        let bitstr = "010010110000000000101000010";
        let mut buffer = BitBuffer::from_bitstr(bitstr);
        let result = ChanAllocElement::from_bitbuf(&mut buffer).unwrap();
        assert_eq!(buffer.get_len_remaining(), 0);
        assert_eq!(result.carrier_num, 10);
        assert_eq!(result.frame18_mon_pattern, Some(0b10));
    }

    #[test]
    fn test_parse_chanalloc_augmented_rejected() {
        // ul_dl_assigned == 0 marks the open-ended augmented form
        let bitstr = "010010000000000000101000010";
        let mut buffer = BitBuffer::from_bitstr(bitstr);
        assert!(ChanAllocElement::from_bitbuf(&mut buffer).is_err());
    }
}
