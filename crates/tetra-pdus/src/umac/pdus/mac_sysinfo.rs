use core::fmt;

use tetra_core::{BitBuffer, PduParseErr};

/// Frequency offset values in Hz, indexed by the 2-bit offset field.
const FREQ_OFFSET_HZ: [i64; 4] = [0, 6_250, -6_250, 12_500];

/// Duplex spacing values in kHz (Annex B.2), indexed by the 3-bit field.
const DUPLEX_SPACING_KHZ: [i64; 8] = [1_600, 4_500, 3_600, 7_000, 1_000, 0, 1_800, 9_500];

/// Clause 21.4.4.1 SYSINFO broadcast. The 42-bit TM-SDU following the
/// header is the D-MLE-SYSINFO.
#[derive(Debug, Clone)]
pub struct MacSysinfo {
    // 12
    pub main_carrier: u16,
    // 4
    pub freq_band: u8,
    // 2
    pub freq_offset_index: u8,
    // 3
    pub duplex_spacing: u8,
    // 1
    pub reverse_operation: bool,
    // 2 Number of common secondary control channels on the main carrier
    pub num_of_csch: u8,
    // 3
    pub ms_txpwr_max_cell: u8,
    // 4
    pub rxlev_access_min: u8,
    // 4
    pub access_parameter: u8,
    // 4
    pub radio_dl_timeout: u8,
    // 16 opt
    pub cck_id: Option<u16>,
    // 16 opt
    pub hyperframe_number: Option<u16>,
    // 2: which optional broadcast element the next 20 bits carry
    pub option_field: u8,
    // 20
    pub option_value: u32,
}

impl MacSysinfo {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let pdu_type = buf.read_field(2, "mac_pdu_type")?;
        if pdu_type != 2 {
            return Err(PduParseErr::InvalidPduType { expected: 2, found: pdu_type });
        }
        let subtype = buf.read_field(2, "broadcast_type")?;
        if subtype != 0 {
            return Err(PduParseErr::InvalidPduType { expected: 0, found: subtype });
        }

        let main_carrier = buf.read_field(12, "main_carrier")? as u16;
        let freq_band = buf.read_field(4, "freq_band")? as u8;
        let freq_offset_index = buf.read_field(2, "freq_offset")? as u8;
        let duplex_spacing = buf.read_field(3, "duplex_spacing")? as u8;
        let reverse_operation = buf.read_field(1, "reverse_operation")? != 0;
        let num_of_csch = buf.read_field(2, "num_of_csch")? as u8;
        let ms_txpwr_max_cell = buf.read_field(3, "ms_txpwr_max_cell")? as u8;
        let rxlev_access_min = buf.read_field(4, "rxlev_access_min")? as u8;
        let access_parameter = buf.read_field(4, "access_parameter")? as u8;
        let radio_dl_timeout = buf.read_field(4, "radio_dl_timeout")? as u8;

        let (cck_id, hyperframe_number) = if buf.read_field(1, "has_cck_field")? == 1 {
            (Some(buf.read_field(16, "cck_id")? as u16), None)
        } else {
            (None, Some(buf.read_field(16, "hyperframe_number")? as u16))
        };

        let option_field = buf.read_field(2, "option_field")? as u8;
        let option_value = buf.read_field(20, "option_value")? as u32;

        Ok(MacSysinfo {
            main_carrier,
            freq_band,
            freq_offset_index,
            duplex_spacing,
            reverse_operation,
            num_of_csch,
            ms_txpwr_max_cell,
            rxlev_access_min,
            access_parameter,
            radio_dl_timeout,
            cck_id,
            hyperframe_number,
            option_field,
            option_value,
        })
    }

    /// Downlink main carrier frequency in Hz.
    pub fn downlink_frequency_hz(&self) -> i64 {
        self.freq_band as i64 * 100_000_000
            + self.main_carrier as i64 * 25_000
            + FREQ_OFFSET_HZ[self.freq_offset_index as usize]
    }

    /// Uplink frequency in Hz, derived via the duplex spacing table. Reverse
    /// operation puts the uplink above the downlink.
    pub fn uplink_frequency_hz(&self) -> i64 {
        let spacing = DUPLEX_SPACING_KHZ[self.duplex_spacing as usize] * 1_000;
        if self.reverse_operation {
            self.downlink_frequency_hz() + spacing
        } else {
            self.downlink_frequency_hz() - spacing
        }
    }

    /// Minimum received access level in dBm: -125 + 5n.
    pub fn rxlev_access_min_dbm(&self) -> i32 {
        -125 + 5 * self.rxlev_access_min as i32
    }

    /// Access parameter in dBm: -53 + 2n.
    pub fn access_parameter_dbm(&self) -> i32 {
        -53 + 2 * self.access_parameter as i32
    }
}

impl fmt::Display for MacSysinfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MacSysinfo {{ main_carrier: {} freq_band: {} dl: {} Hz ul: {} Hz }}",
            self.main_carrier,
            self.freq_band,
            self.downlink_frequency_hz(),
            self.uplink_frequency_hz()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sysinfo() {
        let mut bits = String::new();
        bits += "10";                           // broadcast
        bits += "00";                           // sysinfo
        bits += &format!("{:012b}", 1000);      // main carrier
        bits += "0100";                         // band 4 (400 MHz)
        bits += "00";                           // no offset
        bits += "000";                          // duplex index 0 (1.6 MHz)
        bits += "0";                            // normal operation
        bits += "00";                           // num csch
        bits += "011";                          // txpwr
        bits += "0101";                         // rxlev
        bits += "0110";                         // access parameter
        bits += "0010";                         // radio dl timeout
        bits += "0";                            // hyperframe follows
        bits += &format!("{:016b}", 0x1234);    // hyperframe number
        bits += "11";                           // option: extended services
        bits += &format!("{:020b}", 0);         // option value
        let mut buf = BitBuffer::from_bitstr(&bits);

        let pdu = MacSysinfo::from_bitbuf(&mut buf).unwrap();
        assert_eq!(buf.get_pos(), 82);
        assert_eq!(pdu.main_carrier, 1000);
        assert_eq!(pdu.downlink_frequency_hz(), 425_000_000);
        assert_eq!(pdu.uplink_frequency_hz(), 423_400_000);
        assert_eq!(pdu.hyperframe_number, Some(0x1234));
        assert_eq!(pdu.rxlev_access_min_dbm(), -100);
        assert_eq!(pdu.access_parameter_dbm(), -41);
    }
}
