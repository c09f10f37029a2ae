use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;
use tetra_core::textdec;

/// Calling/transmitting party identifier: a 2-bit type selector followed by
/// the address bits. Type 0 is an 8-bit SNA, undocumented on the downlink
/// but seen on live networks and parsed for telemetry. Type 3 is reserved.
/// Returns the type selector so callers can stop on reserved values.
pub fn parse_party_identifier(
    buf: &mut BitBuffer,
    report: &mut Report,
    type_key: &str,
    ssi_key: &str,
    ext_key: &str,
) -> Result<u8, PduParseErr> {
    let pti = buf.read_field(2, "party type identifier")? as u8;
    report.add(type_key, pti as u64);

    match pti {
        0 => {
            report.add(ssi_key, buf.read_field(8, "party sna")?);
        }
        1 => {
            report.add(ssi_key, buf.read_field(24, "party ssi")?);
        }
        2 => {
            report.add(ssi_key, buf.read_field(24, "party ssi")?);
            report.add(ext_key, buf.read_field(24, "party ext")?);
        }
        _ => {}
    }
    Ok(pti)
}

/// External subscriber number, CMCE type 3 block (14.8.20): a digit count
/// followed by 4-bit TETRA digits, padded to even count with a dummy digit.
pub fn parse_external_subscriber_number(
    buf: &mut BitBuffer,
    report: &mut Report,
    key: &str,
) -> Result<(), PduParseErr> {
    let digits_count = buf.read_field(8, "digits count")?;

    let mut number = String::new();
    for _ in 0..digits_count {
        number.push(textdec::tetra_digit(buf.read_field(4, "digit")? as u8));
    }
    if digits_count % 2 != 0 {
        buf.skip(4); // dummy digit
    }
    report.add(key, number);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetra_core::report::VecSink;
    use tetra_core::{MacAddress, TdmaTime};

    fn test_report() -> Report {
        let mut r = Report::new(Box::new(VecSink::default()));
        r.start("CMCE", "TEST", TdmaTime::default(), &MacAddress::default());
        r
    }

    #[test]
    fn test_ssi_with_extension() {
        let mut bits = String::from("10");
        bits += &format!("{:024b}", 1234);
        bits += &format!("{:024b}", 5678);
        let mut buf = BitBuffer::from_bitstr(&bits);
        let mut report = test_report();

        let pti = parse_party_identifier(
            &mut buf, &mut report,
            "calling party type identifier", "calling party ssi", "calling party ext",
        ).unwrap();
        assert_eq!(pti, 2);
        assert_eq!(buf.get_len_remaining(), 0);
    }

    #[test]
    fn test_external_number_odd_digits() {
        // 3 digits "42#" plus one dummy nibble
        let mut bits = String::from(&format!("{:08b}", 3));
        bits += "0100";
        bits += "0010";
        bits += "1011";
        bits += "0000"; // dummy
        let mut buf = BitBuffer::from_bitstr(&bits);
        let mut report = test_report();

        parse_external_subscriber_number(&mut buf, &mut report, "external subscriber number").unwrap();
        assert_eq!(buf.get_len_remaining(), 0);
    }
}
