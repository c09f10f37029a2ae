use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;

use crate::cmce::fields::party_identifier::parse_party_identifier;

/// CMCE D-SETUP, Clause 14.7.1.12.
pub fn parse(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("call identifier", buf.read_field(14, "call identifier")?);
    report.add("call timeout", buf.read_field(4, "call timeout")?);
    report.add("hook method selection", buf.read_field(1, "hook method selection")?);
    report.add("simplex/duplex selection", buf.read_field(1, "simplex/duplex selection")?);
    report.add("basic service information", buf.read_field(8, "basic service information")?);
    report.add("transmission grant", buf.read_field(2, "transmission grant")?);
    report.add("transmission request permission", buf.read_field(1, "transmission request permission")?);
    report.add("call priority", buf.read_field(4, "call priority")?);

    let o_flag = buf.read_field(1, "o_flag")?;
    if o_flag == 1 {
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("notification indicator", buf.read_field(6, "notification indicator")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("temporary address", buf.read_field(24, "temporary address")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            parse_party_identifier(
                buf, report,
                "calling party type identifier", "calling party ssi", "calling party ext",
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetra_core::report::VecSink;
    use tetra_core::{MacAddress, TdmaTime};

    #[test]
    fn test_d_setup_with_calling_party() {
        let mut bits = format!("{:014b}", 77);
        bits += "0011";     // call timeout
        bits += "0";        // hook
        bits += "1";        // duplex
        bits += &format!("{:08b}", 0);  // basic service information
        bits += "01";       // transmission grant
        bits += "0";        // request permission
        bits += "0000";     // priority
        bits += "1";        // o-flag
        bits += "0";        // no notification indicator
        bits += "0";        // no temporary address
        bits += "1";        // calling party present
        bits += "01";       // cpti = SSI
        bits += &format!("{:024b}", 90210);
        let mut buf = BitBuffer::from_bitstr(&bits);

        let mut report = Report::new(Box::new(VecSink::default()));
        report.start("CMCE", "D-SETUP", TdmaTime::default(), &MacAddress::default());
        parse(&mut buf, &mut report).unwrap();
        assert_eq!(buf.get_len_remaining(), 0);
    }
}
