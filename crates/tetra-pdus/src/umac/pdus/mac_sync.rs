use core::fmt;

use tetra_core::{BitBuffer, PduParseErr, TdmaTime, assert_warn};

/// Clause 21.4.4.2 SYNC PDU, carried on the BSCH. The timing fields anchor
/// the receiver's TDMA clock; the 29-bit TM-SDU behind the header is the
/// D-MLE-SYNC.
#[derive(Debug, Clone)]
pub struct MacSync {
    // 4
    pub system_code: u8,
    // 6
    pub colour_code: u8,
    // 2 + 5 + 6
    pub time: TdmaTime,
    // 2
    pub sharing_mode: u8,
    // 3
    pub ts_reserved_frames: u8,
    // 1
    pub u_plane_dtx: bool,
    // 1
    pub frame_18_ext: bool,
}

impl MacSync {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let system_code = buf.read_field(4, "system_code")? as u8;
        let colour_code = buf.read_field(6, "colour_code")? as u8;
        let t = buf.read_field(2, "timeslot_number")? as u8 + 1;
        let f = buf.read_field(5, "frame_number")? as u8;
        let m = buf.read_field(6, "multiframe_number")? as u8;
        let time = TdmaTime { t, f, m };
        let sharing_mode = buf.read_field(2, "sharing_mode")? as u8;
        let ts_reserved_frames = buf.read_field(3, "ts_reserved_frames")? as u8;
        let u_plane_dtx = buf.read_field(1, "u_plane_dtx")? != 0;
        let frame_18_ext = buf.read_field(1, "frame_18_ext")? != 0;
        assert_warn!(buf.read_field(1, "reserved")? == 0, "reserved bit not zero");

        Ok(MacSync {
            system_code,
            colour_code,
            time,
            sharing_mode,
            ts_reserved_frames,
            u_plane_dtx,
            frame_18_ext,
        })
    }
}

impl fmt::Display for MacSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MacSync {{ system_code: {} colour_code: {} time: {:?} sharing_mode: {} }}",
            self.system_code, self.colour_code, self.time, self.sharing_mode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sync_header() {
        let mut bits = String::new();
        bits += "0001";     // system code
        bits += "000101";   // colour code 5
        bits += "10";       // tn 3
        bits += "01001";    // fn 9
        bits += "010100";   // mn 20
        bits += "00";       // sharing mode
        bits += "000";      // ts reserved frames
        bits += "0";        // u-plane dtx
        bits += "0";        // frame 18 ext
        bits += "0";        // reserved
        let mut buf = BitBuffer::from_bitstr(&bits);

        let pdu = MacSync::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.colour_code, 5);
        assert_eq!(pdu.time, TdmaTime { t: 3, f: 9, m: 20 });
        assert_eq!(buf.get_pos(), 31);
    }
}
