//! Shared MM information elements and the type 3/4 element walker
//! (Clause 16.10 and EN 300 392-7 Annex A element definitions).

use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;

/// Type 3/4 element identifiers on the downlink, Clause 16.10.51 table 16.89.
mod elem_id {
    pub const DEFAULT_GROUP_ATTACH_LIFETIME: u64 = 0b0001;
    pub const NEW_REGISTERED_AREA: u64 = 0b0010;
    pub const SECURITY_DOWNLINK: u64 = 0b0011;
    pub const GROUP_REPORT_RESPONSE: u64 = 0b0100;
    pub const GROUP_IDENTITY_LOCATION_ACCEPT: u64 = 0b0101;
    pub const GROUP_IDENTITY_DOWNLINK: u64 = 0b0111;
    pub const AUTHENTICATION_DOWNLINK: u64 = 0b1010;
    pub const GISRI: u64 = 0b1100;
    pub const CELL_TYPE_CONTROL: u64 = 0b1101;
    pub const PROPRIETARY: u64 = 0b1111;
}

fn elem_id_name(id: u64) -> &'static str {
    match id {
        0b0000 => "Reserved for future extension",
        0b0001 => "Default group attachment lifetime",
        0b0010 => "New registered area",
        0b0011 => "Group identity location demand",
        0b0100 => "Group report response",
        0b0101 => "Group identity location accept",
        0b0110 => "DM-MS address",
        0b0111 => "Group identity downlink",
        0b1000 => "Group identity uplink",
        0b1001 => "Authentication uplink",
        0b1010 => "Authentication downlink",
        0b1011 => "Extended capabilities",
        0b1100 => "Group Identity Security Related Information",
        0b1111 => "Proprietary",
        _ => "Reserved for any future specified Type 3/4 element",
    }
}

/// Walk the trailing type 3/4 element chain: repeat while the m-bit reads 1,
/// then element identifier (4), length indicator (11) and the body. Type 4
/// elements carry a 6-bit repeat count. Bodies of element types this
/// receiver does not understand are skipped over by the length indicator.
pub fn parse_type34_elements(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    while buf.read_field(1, "m_bit")? == 1 {
        let element_id = buf.read_field(4, "type 3/4 element identifier")?;
        report.add("Type 3/4 element identifier", elem_id_name(element_id));

        let length = buf.read_field(11, "Length indicator")? as usize;
        report.add("Length indicator", length as u64);

        let body_start = buf.get_pos();

        match element_id {
            // type 4: repeated sub-elements behind a count
            elem_id::NEW_REGISTERED_AREA => {
                let count = buf.read_field(6, "number of elements")?;
                for _ in 0..count {
                    parse_new_registered_area(buf, report)?;
                }
            }
            elem_id::GROUP_IDENTITY_DOWNLINK => {
                let count = buf.read_field(6, "number of elements")?;
                for _ in 0..count {
                    parse_group_identity_downlink(buf, report)?;
                }
            }
            elem_id::GISRI => {
                let count = buf.read_field(6, "number of elements")?;
                for _ in 0..count {
                    parse_gisri(buf, report)?;
                }
            }

            // type 3: a single body
            elem_id::DEFAULT_GROUP_ATTACH_LIFETIME => {
                let val = buf.read_field(2, "Default group attachment lifetime")?;
                report.add("Default group attachment lifetime", attachment_lifetime_name(val));
            }
            elem_id::SECURITY_DOWNLINK => {
                parse_security_downlink(buf, report)?;
            }
            elem_id::GROUP_REPORT_RESPONSE => {
                report.add("group report response", buf.read_field(1, "group report response")?);
            }
            elem_id::GROUP_IDENTITY_LOCATION_ACCEPT => {
                parse_group_identity_location_accept(buf, report)?;
            }
            elem_id::AUTHENTICATION_DOWNLINK => {
                parse_authentication_downlink(buf, report)?;
            }
            elem_id::CELL_TYPE_CONTROL => {
                parse_cell_type_control(buf, report)?;
            }
            elem_id::PROPRIETARY => {
                parse_proprietary(buf, report)?;
            }

            _ => {
                // unknown body: the length indicator tells us how far to skip
            }
        }

        // re-align on the announced element length; a parser that consumed
        // less leaves padding, one that overran has misparsed the element
        let consumed = buf.get_pos() - body_start;
        if consumed < length {
            buf.skip(length - consumed);
        } else if consumed > length {
            return Err(PduParseErr::InconsistentLength { expected: length, found: consumed });
        }
    }
    Ok(())
}

/// Address extension, 16.10.1.
pub fn parse_address_extension(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("MCC", buf.read_field(10, "MCC")?);
    report.add("MNC", buf.read_field(14, "MNC")?);
    Ok(())
}

/// Authentication downlink, EN 300 392-7 A.7.1.
pub fn parse_authentication_downlink(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("Authentication successful", buf.read_field(1, "Authentication successful")? == 1);
    report.add("Supply TEI", buf.read_field(1, "Supply TEI")? == 1);

    if buf.read_field(1, "ck_provision_flag")? == 1 {
        parse_ck_provisioning_information(buf, report)?;
    }
    Ok(())
}

/// CCK information, EN 300 392-7 A.8.8.
pub fn parse_cck_information(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("CCK identifier", buf.read_field(16, "CCK identifier")?);
    report.add("Key type flag", buf.read_field(1, "Key type flag")?);
    report.add("Sealed CCK", format!("{:016x}", buf.read_field(64, "Sealed CCK")?) );
    buf.skip(120 - 64); // sealed key is 120 bits, only the head is reported

    parse_cck_location_area_information(buf, report)?;

    if buf.read_field(1, "future_key_flag")? == 1 {
        report.add("Sealed CCK (future)", format!("{:016x}", buf.read_field(64, "Sealed CCK (future)")?));
        buf.skip(120 - 64);
    }
    Ok(())
}

/// CCK location area information, EN 300 392-7 A.8.9.
fn parse_cck_location_area_information(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let la_type = buf.read_field(2, "Type")?;
    report.add("Type", la_info_type_name(la_type));

    match la_type {
        0b01 => parse_location_area_list(buf, report)?,
        0b10 => {
            report.add("Location area bit mask", buf.read_field(14, "Location area bit mask")?);
            report.add("Location area selector", buf.read_field(14, "Location area selector")?);
        }
        0b11 => parse_location_area_range(buf, report)?,
        _ => {}
    }
    Ok(())
}

/// Cell type control, 16.10.1a.
pub fn parse_cell_type_control(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let revert = buf.read_field(1, "Revert to user application setting")? == 1;
    report.add("Revert to user application setting", revert);

    if !revert {
        let count = parse_cell_type_list_control(buf)?;
        for _ in 0..count {
            report.add("Required cell type", required_cell_type_name(buf.read_field(3, "required cell type")?));
        }

        let count = parse_cell_type_list_control(buf)?;
        for _ in 0..count {
            report.add("Preferred cell type", required_cell_type_name(buf.read_field(3, "preferred cell type")?));
        }
    }
    Ok(())
}

/// Required/preferred cell type list control, 16.10.40b / 16.10.43b.
/// Values above 8 describe an unordered list (table 16.78).
fn parse_cell_type_list_control(buf: &mut BitBuffer) -> Result<u8, PduParseErr> {
    let control = buf.read_field(4, "cell type list control")? as u8;
    Ok(if control <= 0b1000 { control } else { control - 8 })
}

/// Ciphering parameters, EN 300 392-7 A.8.12. Ten bits in either security
/// class layout.
pub fn parse_ciphering_parameters(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("KSG number", buf.read_field(4, "KSG number")?);

    if buf.read_field(1, "security class")? == 1 {
        report.add("Security class", "Class 3");
        report.add("TM-SCK OTAR supported", buf.read_field(1, "TM-SCK OTAR supported")? == 1);
        report.add("SDMO and DM-SCK OTAR supported", buf.read_field(1, "SDMO and DM-SCK OTAR supported")? == 1);
        report.add("GCK encryption/OTAR supported", buf.read_field(1, "GCK encryption/OTAR supported")? == 1);
        report.add("Security information protocol supported", buf.read_field(1, "Security information protocol supported")? == 1);
        buf.skip(1); // reserved
    } else {
        report.add("Security class", "Class 2");
        report.add("SCK number", buf.read_field(5, "SCK number")?);
    }
    Ok(())
}

/// CK provisioning information, EN 300 392-7 A.8.14.
pub fn parse_ck_provisioning_information(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    if buf.read_field(1, "sck_provision_flag")? == 1 {
        parse_sck_information(buf, report)?;
    }
    if buf.read_field(1, "cck_provision_flag")? == 1 {
        parse_cck_information(buf, report)?;
    }
    Ok(())
}

/// Energy saving information, 16.10.10. The frame numbers have no meaning
/// in "stay alive" mode.
pub fn parse_energy_saving_information(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let mode = buf.read_field(3, "Energy saving mode")?;
    if mode > 0 {
        report.add("Energy saving mode", format!("Economy mode {}", mode));
        report.add("Frame number", buf.read_field(5, "Frame number")?);
        report.add("Multiframe number", buf.read_field(6, "Multiframe number")?);
    } else {
        report.add("Energy saving mode", "Stay Alive");
        buf.skip(5);
        buf.skip(6);
    }
    Ok(())
}

/// GCK rejected, EN 300 392-7 A.8.28b.
pub fn parse_gck_rejected(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let reason = buf.read_field(3, "OTAR reject reason")?;
    report.add("OTAR reject reason", otar_reject_reason_name(reason));

    if buf.read_field(1, "group association")? == 1 {
        report.add("GSSI", buf.read_field(24, "GSSI")?);
    } else {
        report.add("GCKN", buf.read_field(16, "GCKN")?);
    }
    Ok(())
}

/// Group identity attachment, 16.10.19.
fn parse_group_identity_attachment(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let lifetime = buf.read_field(2, "Group identity attachment lifetime")?;
    report.add("Group identity attachment lifetime", attachment_lifetime_name(lifetime));
    report.add("Class of usage", buf.read_field(3, "Class of usage")? + 1);
    Ok(())
}

/// Group identity downlink, 16.10.22.
pub fn parse_group_identity_downlink(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let detach = buf.read_field(1, "attach/detach type")? == 1;
    if detach {
        let val = buf.read_field(2, "Group identity detachment downlink")?;
        report.add("Group identity detachment downlink", detachment_downlink_name(val));
    } else {
        parse_group_identity_attachment(buf, report)?;
    }

    // 16.10.15 group identity address type
    match buf.read_field(2, "group identity address type")? {
        0b00 => {
            report.add("GSSI", buf.read_field(24, "GSSI")?);
        }
        0b01 => {
            report.add("GSSI", buf.read_field(24, "GSSI")?);
            parse_address_extension(buf, report)?;
        }
        0b10 => {
            report.add("(V)GSSI", buf.read_field(24, "(V)GSSI")?);
        }
        _ => {
            report.add("GSSI", buf.read_field(24, "GSSI")?);
            parse_address_extension(buf, report)?;
            report.add("(V)GSSI", buf.read_field(24, "(V)GSSI")?);
        }
    }
    Ok(())
}

/// Group identity location accept, 16.10.23. May itself carry a nested
/// type 3/4 chain holding the group identity downlink elements.
pub fn parse_group_identity_location_accept(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    // 16.10.12 group identity accept/reject
    report.add("All attachment/detachments accepted", buf.read_field(1, "group identity accept/reject")? == 0);
    buf.skip(1); // reserved

    if buf.read_field(1, "o_bit")? == 1 {
        parse_type34_elements(buf, report)?;
    }
    Ok(())
}

/// Group Identity Security Related Information, EN 300 392-7 A.8.31a.
pub fn parse_gisri(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let number_of_groups = buf.read_field(5, "Number of groups")?;
    report.add("Number of groups", number_of_groups);

    for _ in 0..number_of_groups {
        report.add("GSSI", buf.read_field(24, "GSSI")?);
    }

    if buf.read_field(1, "gck association")? == 1 {
        report.add("GCK select number", buf.read_field(17, "GCK select number")?);
    }
    if buf.read_field(1, "sck association")? == 1 {
        report.add("SCK subset grouping type", buf.read_field(4, "SCK subset grouping type")?);
        report.add("SCK subset number", buf.read_field(5, "SCK subset number")?);
    }
    Ok(())
}

/// Location area list, EN 300 392-7 A.8.45.
fn parse_location_area_list(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let count = buf.read_field(4, "Number of location areas")?;
    report.add("Number of location areas", count);
    for _ in 0..count {
        report.add("Location area", buf.read_field(14, "Location area")?);
    }
    Ok(())
}

/// Location area range, EN 300 392-7 A.8.46.
fn parse_location_area_range(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("LLAV", buf.read_field(14, "LLAV")?);
    report.add("HLAV", buf.read_field(14, "HLAV")?);
    Ok(())
}

/// New registered area, 16.10.40.
pub fn parse_new_registered_area(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let timer = buf.read_field(3, "LA timer")?;
    report.add("LA timer", la_timer_name(timer));
    report.add("LA", buf.read_field(14, "LA")?);

    if buf.read_field(1, "o_bit")? == 1 {
        if buf.read_field(1, "p_bit")? == 1 {
            report.add("LACC", buf.read_field(10, "LACC")?);
        }
        if buf.read_field(1, "p_bit")? == 1 {
            report.add("LANC", buf.read_field(14, "LANC")?);
        }
    }
    Ok(())
}

/// Proprietary element, 16.10.41 / Annex H.1. Owner 0 marks an extension
/// whose content cannot be parsed.
pub fn parse_proprietary(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("Proprietary element owner", buf.read_field(8, "Proprietary element owner")?);
    Ok(())
}

/// SCCH information and distribution on 18th frame, 16.10.46.
pub fn parse_scch_information_and_distribution(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let scch_information = buf.read_field(4, "SCCH information")?;
    if scch_information < 0b1100 {
        report.add("SCCH information", format!("MS SCCH allocation {}", scch_information));
    }
    report.add("Distribution on 18th frame", format!("Time slot {}", buf.read_field(2, "Distribution on 18th frame")? + 1));
    Ok(())
}

/// SCK data, EN 300 392-7 A.8.67.
pub fn parse_sck_data(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("SCK number", buf.read_field(5, "SCK number")?);
    report.add("SCK version number", buf.read_field(16, "SCK version number")?);
    Ok(())
}

/// GCK data, EN 300 392-7 A.8.26.
pub fn parse_gck_data(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("GCK number", buf.read_field(16, "GCK number")?);
    report.add("GCK version number", buf.read_field(16, "GCK version number")?);
    Ok(())
}

/// SCK information, EN 300 392-7 A.8.68.
pub fn parse_sck_information(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    if buf.read_field(1, "session key")? == 1 {
        report.add("GSKO-VN", buf.read_field(16, "GSKO-VN")?);
    } else {
        report.add("Random seed for OTAR", format!("{:012x}", buf.read_field(48, "Random seed for OTAR")?));
        buf.skip(80 - 48);
    }

    report.add("SCK number", buf.read_field(5, "SCK number")?);
    report.add("SCK version number", buf.read_field(16, "SCK version number")?);
    report.add("Sealed SCK", format!("{:016x}", buf.read_field(64, "Sealed SCK")?));
    buf.skip(120 - 64);

    if buf.read_field(1, "future_key_flag")? == 1 {
        report.add("SCK number", buf.read_field(5, "SCK number")?);
        report.add("SCK version number", buf.read_field(16, "SCK version number")?);
        report.add("Sealed SCK (future)", format!("{:016x}", buf.read_field(64, "Sealed SCK (future)")?));
        buf.skip(120 - 64);
    }
    Ok(())
}

/// Security downlink, EN 300 392-7 A.7.3.
pub fn parse_security_downlink(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("Authentication successful", buf.read_field(1, "Authentication successful")? == 1);
    report.add("Supply TEI", buf.read_field(1, "Supply TEI")? == 1);
    report.add("Model number information requested", buf.read_field(1, "Model number information requested")? == 1);
    report.add("HW SW version number information requested", buf.read_field(1, "HW SW version number information requested")? == 1);
    report.add("AI algorithm information requested", buf.read_field(1, "AI algorithm information requested")? == 1);
    buf.skip(1); // reserved
    Ok(())
}

// Value renderings for enumerated elements (16.10.x tables, A.8.x tables)

pub fn attachment_lifetime_name(val: u64) -> &'static str {
    // 16.10.16 table 16.48
    match val {
        0b00 => "Attachment not needed",
        0b01 => "Attachment for next ITSI attach required",
        0b10 => "Attachment not allowed for next ITSI attach",
        _ => "Attachment for next location update required",
    }
}

pub fn detachment_downlink_name(val: u64) -> &'static str {
    // 16.10.20 table 16.52
    match val {
        0b00 => "Unknown group identity",
        0b01 => "Temporary 1 detachment",
        0b10 => "Temporary 2 detachment",
        _ => "Permanent detachment",
    }
}

pub fn key_change_type_name(val: u64) -> &'static str {
    // EN 300 392-7 A.8.39
    match val {
        0b000 => "SCK",
        0b001 => "CCK",
        0b010 => "GCK",
        0b011 => "Class 3 CCK and GCK activation",
        0b100 => "All GCKs",
        0b101 => "No cipher key",
        _ => "reserved",
    }
}

pub fn la_timer_name(val: u64) -> &'static str {
    // 16.10.33 table 16.63
    match val {
        0b000 => "10 min",
        0b001 => "30 min",
        0b010 => "1 hour",
        0b011 => "2 hours",
        0b100 => "4 hours",
        0b101 => "8 hours",
        0b110 => "24 hours",
        _ => "no timing",
    }
}

pub fn location_update_accept_type_name(val: u64) -> &'static str {
    // 16.10.35a
    match val {
        0b000 => "Roaming location updating",
        0b001 => "Temporary registration",
        0b010 => "Periodic location updating",
        0b011 => "ITSI attach",
        0b100 => "Call restoration roaming location updating",
        0b101 => "Migrating or call restoration migrating location updating",
        0b110 => "Demand location updating",
        _ => "Disabled MS updating",
    }
}

pub fn location_update_type_name(val: u64) -> &'static str {
    // 16.10.35
    match val {
        0b000 => "Roaming location updating",
        0b001 => "Migrating location updating",
        0b010 => "Periodic location updating",
        0b011 => "ITSI attach",
        0b100 => "Call restoration roaming location updating",
        0b101 => "Call restoration migrating location updating",
        0b110 => "Demand location updating",
        _ => "Disabled MS updating",
    }
}

pub fn otar_reject_reason_name(val: u64) -> &'static str {
    // EN 300 392-7 A.8.57b
    match val {
        0b000 => "Key not available",
        0b001 => "Invalid key number",
        0b010 => "Invalid address",
        0b011 => "KSG number not supported",
        _ => "reserved",
    }
}

pub fn reject_cause_name(val: u64) -> &'static str {
    // 16.10.42
    match val {
        0b00001 => "ITSI/ATSI unknown (system rejection)",
        0b00010 => "Illegal MS (system rejection)",
        0b00011 => "LA not allowed (LA rejection)",
        0b00100 => "LA unknown (LA rejection)",
        0b00101 => "Network failure (cell rejection)",
        0b00110 => "Congestion (cell rejection)",
        0b00111 => "Forward registration failure (cell rejection)",
        0b01000 => "Service not subscribed (LA rejection)",
        0b01001 => "Mandatory element error (system rejection)",
        0b01010 => "Message consistency error (system rejection)",
        0b01011 => "Roaming not supported (LA rejection)",
        0b01100 => "Migration not supported (LA rejection)",
        0b01101 => "No cipher KSG (cell rejection)",
        0b01110 => "Identified cipher KSG not supported (cell rejection)",
        0b01111 => "Requested cipher key type not available (cell rejection)",
        0b10000 => "Identified cipher key not available (cell rejection)",
        0b10010 => "Ciphering required (cell rejection)",
        0b10011 => "Authentication failure",
        _ => "reserved",
    }
}

fn required_cell_type_name(val: u64) -> &'static str {
    // 16.10.43a
    match val {
        0b000 => "CA cell",
        0b001 => "DA cell",
        _ => "reserved",
    }
}

pub fn dual_watch_result_name(val: u64) -> &'static str {
    // 16.10.43d
    match val {
        0b000 => "Request rejected for undefined reason",
        0b001 => "Dual watch not supported",
        0b010 => "Request accepted",
        _ => "reserved",
    }
}

pub fn time_type_name(val: u64) -> &'static str {
    // EN 300 392-7 A.8.86
    match val {
        0b00 => "Absolute IV",
        0b01 => "Network time",
        0b10 => "Immediate, first slot of first frame of next multiframe",
        _ => "Currently in use",
    }
}

fn la_info_type_name(val: u64) -> &'static str {
    // EN 300 392-7 A.8.9
    match val {
        0b00 => "All location areas",
        0b01 => "List is provided",
        0b10 => "LA-id mask is provided",
        _ => "Range of LA-ids is provided",
    }
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
    fn test_walker_terminates_on_zero_mbit() {
        let mut buf = BitBuffer::from_bitstr("0");
        let mut report = test_report();
        parse_type34_elements(&mut buf, &mut report).unwrap();
        assert_eq!(buf.get_len_remaining(), 0);
    }

    #[test]
    fn test_walker_type3_lifetime() {
        // m-bit 1, id 0001, length 2, body "10", m-bit 0
        let mut bits = String::from("1");
        bits += "0001";
        bits += &format!("{:011b}", 2);
        bits += "10";
        bits += "0";
        let mut buf = BitBuffer::from_bitstr(&bits);
        let mut report = test_report();
        parse_type34_elements(&mut buf, &mut report).unwrap();
        assert_eq!(buf.get_len_remaining(), 0);
    }

    #[test]
    fn test_walker_skips_unknown_element() {
        // id 0110 (DM-MS address, not parsed) with a 17-bit body
        let mut bits = String::from("1");
        bits += "0110";
        bits += &format!("{:011b}", 17);
        bits += &"1".repeat(17);
        bits += "0";
        let mut buf = BitBuffer::from_bitstr(&bits);
        let mut report = test_report();
        parse_type34_elements(&mut buf, &mut report).unwrap();
        assert_eq!(buf.get_len_remaining(), 0);
    }

    #[test]
    fn test_walker_type4_group_identity_downlink() {
        // one repeated group identity downlink element: attachment with
        // lifetime 0, class of usage 2, plain GSSI
        let mut body = String::from("0");      // attach
        body += "00";                          // lifetime
        body += "001";                         // class of usage
        body += "00";                          // address type: GSSI
        body += &format!("{:024b}", 0x00ABCD);

        let mut bits = String::from("1");
        bits += "0111";
        bits += &format!("{:011b}", 6 + body.len());
        bits += &format!("{:06b}", 1);
        bits += &body;
        bits += "0";
        let mut buf = BitBuffer::from_bitstr(&bits);
        let mut report = test_report();
        parse_type34_elements(&mut buf, &mut report).unwrap();
        assert_eq!(buf.get_len_remaining(), 0);
    }

    #[test]
    fn test_energy_saving_stay_alive_skips_frames() {
        let mut bits = String::from("000"); // stay alive
        bits += "10101";
        bits += "010101";
        let mut buf = BitBuffer::from_bitstr(&bits);
        let mut report = test_report();
        parse_energy_saving_information(&mut buf, &mut report).unwrap();
        assert_eq!(buf.get_len_remaining(), 0);
    }
}
