use core::fmt;

use tetra_core::{BitBuffer, PduParseErr};

/// Clause 18.4.2.1 D-MLE-SYNC, the 29-bit TM-SDU of the SYNC PDU. Delivered
/// to the MLE without an MLE discriminator.
#[derive(Debug, Clone)]
pub struct DMleSync {
    // 10 Country code
    pub mcc: u16,
    // 14
    pub mnc: u16,
    // 2
    pub neighbour_cell_broadcast: u8,
    // 2
    pub cell_load_ca: u8,
    // 1
    pub late_entry_supported: bool,
}

impl DMleSync {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let mcc = buf.read_field(10, "mcc")? as u16;
        let mnc = buf.read_field(14, "mnc")? as u16;
        let neighbour_cell_broadcast = buf.read_field(2, "neighbour_cell_broadcast")? as u8;
        let cell_load_ca = buf.read_field(2, "cell_load_ca")? as u8;
        let late_entry_supported = buf.read_field(1, "late_entry_supported")? != 0;

        Ok(DMleSync {
            mcc,
            mnc,
            neighbour_cell_broadcast,
            cell_load_ca,
            late_entry_supported,
        })
    }
}

impl fmt::Display for DMleSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DMleSync {{ mcc: {} mnc: {} cell_load_ca: {} late_entry: {} }}",
            self.mcc, self.mnc, self.cell_load_ca, self.late_entry_supported
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sync_sdu() {
        let mut bits = String::new();
        bits += &format!("{:010b}", 208);
        bits += &format!("{:014b}", 10);
        bits += "01"; // neighbour cell broadcast
        bits += "10"; // cell load
        bits += "1";  // late entry
        let mut buf = BitBuffer::from_bitstr(&bits);

        let pdu = DMleSync::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.mcc, 208);
        assert_eq!(pdu.mnc, 10);
        assert!(pdu.late_entry_supported);
        assert_eq!(buf.get_pos(), 29);
    }
}
