//! MM D-DISABLE / D-ENABLE, EN 300 392-7 Clause 5.4.1 / 5.4.2. Both share
//! one layout: equipment and/or subscription targeting plus an optional
//! authentication challenge.

use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;

use crate::mm::elements::parse_address_extension;

pub fn parse(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("intent/confirm", buf.read_field(1, "intent/confirm")?);
    report.add("disabling type", buf.read_field(1, "disabling type")?);

    let equipment = buf.read_field(1, "equipment flag")?;
    report.add("equipment", equipment);
    if equipment == 1 {
        // 60-bit TEI
        let high = buf.read_field(30, "TEI")?;
        let low = buf.read_field(30, "TEI")?;
        report.add("TEI", format!("{:015x}", (high << 30) | low));
    }

    let subscription = buf.read_field(1, "subscription flag")?;
    report.add("subscription", subscription);
    if subscription == 1 {
        parse_address_extension(buf, report)?;
        report.add("SSI", buf.read_field(24, "SSI")?);
    }

    if buf.read_field(1, "authentication challenge flag")? == 1 {
        let c1 = buf.read_field(40, "Random challenge")?;
        let c2 = buf.read_field(40, "Random challenge")?;
        report.add("Random challenge", format!("{:010x}{:010x}", c1, c2));
        let s1 = buf.read_field(40, "Random seed")?;
        let s2 = buf.read_field(40, "Random seed")?;
        report.add("Random seed", format!("{:010x}{:010x}", s1, s2));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetra_core::report::VecSink;
    use tetra_core::{MacAddress, TdmaTime};

    #[test]
    fn test_subscription_disable() {
        let mut bits = String::from("1");  // intent
        bits += "0";                       // disabling type
        bits += "0";                       // no equipment
        bits += "1";                       // subscription
        bits += &format!("{:010b}", 208);  // MCC
        bits += &format!("{:014b}", 10);   // MNC
        bits += &format!("{:024b}", 5555); // SSI
        bits += "0";                       // no challenge
        let mut buf = BitBuffer::from_bitstr(&bits);

        let mut report = Report::new(Box::new(VecSink::default()));
        report.start("MM", "D-DISABLE", TdmaTime::default(), &MacAddress::default());
        parse(&mut buf, &mut report).unwrap();
        assert_eq!(buf.get_len_remaining(), 0);
    }
}
