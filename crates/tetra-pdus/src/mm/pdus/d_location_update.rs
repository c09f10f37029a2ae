//! MM location update PDUs, Clause 16.9.2.6 .. 16.9.2.10.

use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;

use crate::mm::elements::{
    location_update_accept_type_name, location_update_type_name, parse_address_extension,
    parse_ciphering_parameters, parse_energy_saving_information, parse_proprietary,
    parse_scch_information_and_distribution, parse_type34_elements, reject_cause_name,
};

/// D-LOCATION UPDATE ACCEPT, 16.9.2.7. Registration completed; the type-2
/// chain may assign a new (V)ASSI, subscriber class and energy economy
/// schedule, followed by the group/security type 3/4 elements.
pub fn parse_accept(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let accept_type = buf.read_field(3, "location update accept type")?;
    report.add("location update accept type", location_update_accept_type_name(accept_type));

    let o_flag = buf.read_field(1, "o_flag")?;
    if o_flag == 1 {
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("ssi", buf.read_field(24, "ssi")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            parse_address_extension(buf, report)?;
        }
        if buf.read_field(1, "p_flag")? == 1 {
            report.add("subscriber class", buf.read_field(16, "subscriber class")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            parse_energy_saving_information(buf, report)?;
        }
        if buf.read_field(1, "p_flag")? == 1 {
            parse_scch_information_and_distribution(buf, report)?;
        }

        parse_type34_elements(buf, report)?;
    }
    Ok(())
}

/// D-LOCATION UPDATE COMMAND, 16.9.2.8.
pub fn parse_command(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("group identity report request", buf.read_field(1, "group identity report request")?);
    Ok(())
}

/// D-LOCATION UPDATE REJECT, 16.9.2.9.
pub fn parse_reject(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let update_type = buf.read_field(3, "location update type")?;
    report.add("location update type", location_update_type_name(update_type));

    let cause = buf.read_field(5, "reject cause")?;
    report.add("reject cause", reject_cause_name(cause));

    let cipher_control = buf.read_field(1, "cipher control")?;
    report.add("cipher control", cipher_control);
    if cipher_control == 1 {
        parse_ciphering_parameters(buf, report)?;
    }

    let o_flag = buf.read_field(1, "o_flag")?;
    if o_flag == 1 {
        if buf.read_field(1, "p_flag")? == 1 {
            parse_address_extension(buf, report)?;
        }
        if buf.read_field(1, "m_bit")? == 1 {
            // only the proprietary element is defined for this PDU
            buf.skip(4); // element identifier
            buf.skip(11); // length indicator
            parse_proprietary(buf, report)?;
        }
    }
    Ok(())
}

/// D-LOCATION UPDATE PROCEEDING, 16.9.2.10.
pub fn parse_proceeding(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("ssi", buf.read_field(24, "ssi")?);

    if buf.read_field(1, "address extension flag")? == 1 {
        parse_address_extension(buf, report)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetra_core::report::VecSink;
    use tetra_core::{MacAddress, TdmaTime};

    fn test_report() -> Report {
        let mut r = Report::new(Box::new(VecSink::default()));
        r.start("MM", "TEST", TdmaTime::default(), &MacAddress::default());
        r
    }

    #[test]
    fn test_accept_minimal() {
        // accept type 3 (ITSI attach), no optional part
        let mut buf = BitBuffer::from_bitstr("0110");
        let mut report = test_report();
        parse_accept(&mut buf, &mut report).unwrap();
        assert_eq!(buf.get_len_remaining(), 0);
    }

    #[test]
    fn test_accept_with_ssi_and_empty_type34() {
        let mut bits = String::from("011"); // accept type
        bits += "1";                        // o-flag
        bits += "1";                        // ssi present
        bits += &format!("{:024b}", 7001);
        bits += "0";                        // no address extension
        bits += "0";                        // no subscriber class
        bits += "0";                        // no energy saving
        bits += "0";                        // no scch info
        bits += "0";                        // m-bit: no type 3/4 elements
        let mut buf = BitBuffer::from_bitstr(&bits);
        let mut report = test_report();
        parse_accept(&mut buf, &mut report).unwrap();
        assert_eq!(buf.get_len_remaining(), 0);
    }

    #[test]
    fn test_proceeding() {
        let mut bits = format!("{:024b}", 1234);
        bits += "0";
        let mut buf = BitBuffer::from_bitstr(&bits);
        let mut report = test_report();
        parse_proceeding(&mut buf, &mut report).unwrap();
        assert_eq!(buf.get_len_remaining(), 0);
    }
}
