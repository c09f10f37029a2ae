//! MM D-ATTACH/DETACH GROUP IDENTITY (+ACK), Clause 16.9.2.1 / 16.9.2.2.
//! The group identity assignments themselves travel in the type 3/4 chain
//! as Group identity downlink elements.

use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;

use crate::mm::elements::parse_type34_elements;

pub fn parse_attach_detach(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("group identity report", buf.read_field(1, "group identity report")?);
    report.add("group identity acknowledgement request", buf.read_field(1, "group identity acknowledgement request")?);
    report.add("group identity attach/detach mode", buf.read_field(1, "group identity attach/detach mode")?);

    let o_flag = buf.read_field(1, "o_flag")?;
    if o_flag == 1 {
        parse_type34_elements(buf, report)?;
    }
    Ok(())
}

pub fn parse_attach_detach_ack(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("group identity accept/reject", buf.read_field(1, "group identity accept/reject")?);
    buf.skip(1); // reserved

    let o_flag = buf.read_field(1, "o_flag")?;
    if o_flag == 1 {
        parse_type34_elements(buf, report)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetra_core::report::VecSink;
    use tetra_core::{MacAddress, TdmaTime};

    #[test]
    fn test_attach_detach_with_group_downlink() {
        // flags, o-flag, one group identity downlink type-4 element
        let mut body = String::from("0");      // attachment
        body += "01";                          // lifetime
        body += "010";                         // class of usage
        body += "10";                          // (V)GSSI
        body += &format!("{:024b}", 0x123456);

        let mut bits = String::from("1");      // group identity report
        bits += "0";                           // ack request
        bits += "0";                           // attach/detach mode
        bits += "1";                           // o-flag
        bits += "1";                           // m-bit
        bits += "0111";                        // group identity downlink
        bits += &format!("{:011b}", 6 + body.len());
        bits += &format!("{:06b}", 1);
        bits += &body;
        bits += "0";                           // chain end
        let mut buf = BitBuffer::from_bitstr(&bits);

        let mut report = Report::new(Box::new(VecSink::default()));
        report.start("MM", "D-ATTACH/DETACH GROUP IDENTITY", TdmaTime::default(), &MacAddress::default());
        parse_attach_detach(&mut buf, &mut report).unwrap();
        assert_eq!(buf.get_len_remaining(), 0);
    }
}
