use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;

/// CMCE D-ALERT, Clause 14.7.1.1. Cursor is past the 5-bit PDU type.
pub fn parse(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("call identifier", buf.read_field(14, "call identifier")?);
    report.add("call timeout, setup phase", buf.read_field(3, "call timeout, setup phase")?);
    buf.skip(1); // reserved
    report.add("simplex/duplex operation", buf.read_field(1, "simplex/duplex operation")?);
    report.add("call queued", buf.read_field(1, "call queued")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetra_core::report::VecSink;
    use tetra_core::{MacAddress, TdmaTime};

    #[test]
    fn test_d_alert_fields() {
        // call id 0x1234, timeout phase 3, reserved 0, simplex 1, queued 0
        let mut bits = format!("{:014b}", 0x1234);
        bits += "011";
        bits += "0";
        bits += "1";
        bits += "0";
        let mut buf = BitBuffer::from_bitstr(&bits);

        let mut report = Report::new(Box::new(VecSink::default()));
        report.start("CMCE", "D-ALERT", TdmaTime::default(), &MacAddress::default());
        parse(&mut buf, &mut report).unwrap();
        assert_eq!(buf.get_len_remaining(), 0);
    }
}
