use core::fmt;

use tetra_core::{BitBuffer, PduParseErr};

use crate::umac::enums::downlink_usage::DownlinkUsage;

/// Clause 21.4.7.2 ACCESS-ASSIGN, carried in the AACH of every downlink
/// slot. A passive receiver only cares about the downlink usage: it decides
/// whether the following slots carry traffic or signalling. The uplink
/// access fields are parsed for completeness of the event but not acted on.
#[derive(Debug)]
pub struct AccessAssign {
    // 2
    pub header: u8,
    pub dl_usage: DownlinkUsage,
    /// Usage marker the downlink is assigned to, when dl_usage is Traffic
    pub dl_usage_marker: u8,
    // 6 + 6 raw field values for reporting
    pub field1: u8,
    pub field2: u8,
}

impl AccessAssign {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let header = buf.read_field(2, "header")? as u8;
        let field1 = buf.read_field(6, "field1")? as u8;
        let field2 = buf.read_field(6, "field2")? as u8;

        // Header 0 signals common control on the downlink; any other value
        // derives the downlink usage from the first field's usage marker.
        let (dl_usage, dl_usage_marker) = match header {
            0 => (DownlinkUsage::CommonControl, 0),
            _ => (DownlinkUsage::from_usage_marker(field1), field1),
        };

        Ok(AccessAssign {
            header,
            dl_usage,
            dl_usage_marker,
            field1,
            field2,
        })
    }
}

impl fmt::Display for AccessAssign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AccessAssign {{ dl_usage: {:?} marker: {} }}",
            self.dl_usage, self.dl_usage_marker
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_control() {
        let mut buf = BitBuffer::from_bitstr("00001010001010");
        let pdu = AccessAssign::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.dl_usage, DownlinkUsage::CommonControl);
        assert_eq!(buf.get_pos(), 14);
    }

    #[test]
    fn test_traffic_marker() {
        // header 1, field1 = usage marker 9 -> traffic
        let mut buf = BitBuffer::from_bitstr("01001001000000");
        let pdu = AccessAssign::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.dl_usage, DownlinkUsage::Traffic);
        assert_eq!(pdu.dl_usage_marker, 9);
    }

    #[test]
    fn test_unallocated() {
        let mut buf = BitBuffer::from_bitstr("11000000000000");
        let pdu = AccessAssign::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.dl_usage, DownlinkUsage::Unallocated);
    }
}
