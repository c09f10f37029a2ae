//! MM D-OTAR, EN 300 392-7 A.8.58 / table A.85 (downlink sub-types).
//!
//! Cursor arrives past the 4-bit MM PDU type; the 4-bit OTAR sub-type
//! selects one of the thirteen key-management PDUs.

use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;
use tetra_saps::{DecodeContext, finish_event};

use crate::mm::elements::{
    otar_reject_reason_name, parse_address_extension, parse_cck_information, parse_gck_rejected,
    parse_type34_elements, time_type_name,
};

pub fn service(buf: &mut BitBuffer, ctx: &DecodeContext, report: &mut Report) {
    let Some(subtype) = buf.read_bits(4) else {
        return;
    };

    let (name, walk): (&str, fn(&mut BitBuffer, &mut Report) -> Result<(), PduParseErr>) =
        match subtype {
            0b0000 => ("D-OTAR CCK Provide", walk_cck_provide),
            // D-OTAR CCK Reject carries no documented downlink body
            0b0001 => ("D-OTAR CCK Reject", walk_nothing),
            0b0010 => ("D-OTAR SCK Provide", walk_sck_provide),
            0b0011 => ("D-OTAR SCK Reject", walk_sck_reject),
            0b0100 => ("D-OTAR GCK Provide", walk_gck_provide),
            0b0101 => ("D-OTAR GCK Reject", walk_gck_reject),
            0b0110 => ("D-OTAR KEY ASSOCIATE demand", walk_key_associate_demand),
            0b0111 => ("D-OTAR NEWCELL", walk_newcell),
            0b1000 => ("D-OTAR GSKO Provide", walk_gsko_provide),
            0b1001 => ("D-OTAR GSKO Reject", walk_gsko_reject),
            0b1010 => ("D-OTAR KEY DELETE demand", walk_key_delete_demand),
            0b1011 => ("D-OTAR KEY STATUS demand", walk_key_status_demand),
            0b1100 => ("D-OTAR CMG GTSI PROVIDE", walk_cmg_gtsi_provide),
            0b1101 => ("D-DM-SCK ACTIVATE DEMAND", walk_dm_sck_activate),
            _ => {
                report.start("MM", "D-OTAR", ctx.time, &ctx.address);
                report.add("otar subtype", subtype);
                report.add("reserved", true);
                report.send();
                return;
            }
        };

    report.start("MM", name, ctx.time, &ctx.address);
    let result = walk(buf, report);
    finish_event(report, result);
}

fn walk_nothing(_buf: &mut BitBuffer, _report: &mut Report) -> Result<(), PduParseErr> {
    Ok(())
}

/// A.2.1 D-OTAR CCK Provide
fn walk_cck_provide(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let provision_flag = buf.read_field(1, "cck provision flag")?;
    report.add("cck provision flag", provision_flag);
    if provision_flag == 1 {
        parse_cck_information(buf, report)?;
    }
    Ok(())
}

/// A.2.7 D-OTAR SCK Provide
fn walk_sck_provide(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let acknowledgement_flag = buf.read_field(1, "acknowledgement flag")?;
    report.add("acknowledgement flag", acknowledgement_flag);

    if acknowledgement_flag == 1 {
        report.add("explicit response", buf.read_field(1, "explicit response")?);
    } else {
        report.add("reserved", buf.read_field(1, "reserved")?);
    }

    report.add("max response timer value", buf.read_field(16, "max response timer value")?);

    let session_key = buf.read_field(1, "session key")?;
    report.add("session key", session_key);

    if session_key == 1 {
        // encrypted with the group encryption session key
        report.add("gsko-vn", buf.read_field(16, "gsko-vn")?);
    } else {
        // encrypted with the individual encryption session key
        report.add("random seed for otar", format!("{:012x}", buf.read_field(48, "random seed for otar")?));
        buf.skip(80 - 48);
    }

    let number_of_scks = buf.read_field(3, "number of scks provided")?;
    report.add("number of scks provided", number_of_scks);

    for _ in 0..number_of_scks {
        // A.8.69 SCK key and identifier, 143 bits
        report.add("sckn", buf.read_field(5, "sckn")?);
        report.add("sck version number", buf.read_field(16, "sck version number")?);
        report.add("sck use", if buf.read_field(1, "sck use")? == 1 { "DMO" } else { "TMO" });
        buf.skip(1); // reserved
        report.add("sealed key (SSCK)", format!("{:016x}", buf.read_field(64, "sealed key (SSCK)")?));
        buf.skip(120 - 64);
    }

    report.add("ksg number", buf.read_field(4, "ksg number")?);
    report.add("otar retry interval", buf.read_field(3, "otar retry interval")?);

    walk_optional_address_extension(buf, report)
}

/// A.2.9a D-OTAR SCK Reject
fn walk_sck_reject(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let number_rejected = buf.read_field(3, "number of scks rejected")?;
    report.add("number of scks rejected", number_rejected);

    for _ in 0..number_rejected {
        // A.8.72b SCK rejected
        report.add("otar reject reason", otar_reject_reason_name(buf.read_field(3, "otar reject reason")?));
        report.add("sckn", buf.read_field(5, "sckn")?);
    }

    report.add("otar retry interval", buf.read_field(3, "otar retry interval")?);

    walk_optional_address_extension(buf, report)
}

/// A.2.4 D-OTAR GCK Provide
fn walk_gck_provide(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let acknowledgement_flag = buf.read_field(1, "acknowledgement flag")?;

    if acknowledgement_flag == 1 {
        report.add("explicit response", buf.read_field(1, "explicit response")?);
    } else {
        buf.skip(1); // reserved
    }

    report.add("max response timer value", buf.read_field(16, "max response timer value")?);

    let session_key = buf.read_field(1, "session key")?;
    report.add("session key", session_key);

    if session_key == 1 {
        report.add("gsko-vn", buf.read_field(16, "gsko-vn")?);
    } else {
        report.add("random seed for otar", format!("{:012x}", buf.read_field(48, "random seed for otar")?));
        buf.skip(80 - 48);
    }

    let number_of_gcks = buf.read_field(3, "number of gcks provided")?;
    report.add("number of gcks provided", number_of_gcks);

    for _ in 0..number_of_gcks {
        // A.8.27 GCK key and identifier, 152 bits
        report.add("gckn", buf.read_field(16, "gckn")?);
        report.add("gck version number", buf.read_field(16, "gck version number")?);
        report.add("sealed key (SGCK)", format!("{:016x}", buf.read_field(64, "sealed key (SGCK)")?));
        buf.skip(120 - 64);
    }

    report.add("ksg number", buf.read_field(4, "ksg number")?);

    let group_association = buf.read_field(1, "group association")?;
    report.add("group association", group_association);
    if group_association == 1 {
        report.add("gssi", buf.read_field(24, "gssi")?);
    }

    report.add("otar retry interval", buf.read_field(3, "otar retry interval")?);

    walk_optional_address_extension(buf, report)
}

/// A.2.6a D-OTAR GCK Reject
fn walk_gck_reject(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let number_rejected = buf.read_field(3, "number of gcks rejected")?;
    report.add("number of gcks rejected", number_rejected);

    for _ in 0..number_rejected {
        parse_gck_rejected(buf, report)?;
    }

    report.add("otar retry interval", buf.read_field(3, "otar retry interval")?);

    walk_optional_address_extension(buf, report)
}

/// A.3.1 D-OTAR KEY ASSOCIATE demand
fn walk_key_associate_demand(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let acknowledgement_flag = buf.read_field(1, "acknowledgement flag")?;
    if acknowledgement_flag == 1 {
        report.add("explicit response", buf.read_field(1, "explicit response")?);
    } else {
        buf.skip(1);
    }

    report.add("max response timer value", buf.read_field(16, "max response timer value")?);

    let key_association_type = buf.read_field(1, "key association type")?;
    report.add("key association type", key_association_type);

    if key_association_type == 1 {
        report.add("gck select number", buf.read_field(17, "gck select number")?);
    } else {
        report.add("sck select number", buf.read_field(6, "sck select number")?);
        report.add("sck subset grouping type", buf.read_field(4, "sck subset grouping type")?);
    }

    let number_of_groups = buf.read_field(5, "number of groups")?;
    report.add("number of groups", number_of_groups);

    for _ in 0..number_of_groups {
        report.add("gssi", buf.read_field(24, "gssi")?);
    }

    Ok(())
}

/// A.5.3 D-OTAR NEWCELL
fn walk_newcell(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("dck forwarding result", buf.read_field(1, "dck forwarding result")?);

    if buf.read_field(1, "cck provision flag")? == 1 {
        parse_cck_information(buf, report)?;
    }

    parse_type34_elements(buf, report)
}

/// A.2.10 D-OTAR GSKO Provide
fn walk_gsko_provide(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("random seed for otar", format!("{:012x}", buf.read_field(48, "random seed for otar")?));
    buf.skip(80 - 48);
    report.add("gsko-vn", buf.read_field(16, "gsko-vn")?);
    report.add("sealed gsko", format!("{:016x}", buf.read_field(64, "sealed gsko")?));
    buf.skip(120 - 64);
    report.add("gssi", buf.read_field(24, "gssi")?);

    walk_optional_address_extension(buf, report)
}

/// A.2.12a D-OTAR GSKO Reject
fn walk_gsko_reject(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("otar reject reason", otar_reject_reason_name(buf.read_field(3, "otar reject reason")?));
    report.add("gssi", buf.read_field(24, "gssi")?);
    report.add("otar retry interval", buf.read_field(3, "otar retry interval")?);

    walk_optional_address_extension(buf, report)
}

/// A.4a.1 D-OTAR KEY DELETE demand
fn walk_key_delete_demand(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let key_delete_type = buf.read_field(3, "key delete type")?;
    report.add("key delete type", key_delete_type);

    match key_delete_type {
        0 | 1 => {
            let count = buf.read_field(5, "number of scks deleted")?;
            report.add("number of scks deleted", count);
            for _ in 0..count {
                report.add("sckn", buf.read_field(5, "sckn")?);
            }
        }
        2 => {
            report.add("sck subset grouping type", buf.read_field(4, "sck subset grouping type")?);
            report.add("sck subset number", buf.read_field(5, "sck subset number")?);
        }
        3 => {
            let count = buf.read_field(4, "number of gcks deleted")?;
            report.add("number of gcks deleted", count);
            for _ in 0..count {
                report.add("gckn", buf.read_field(16, "gckn")?);
            }
        }
        _ => {}
    }

    walk_optional_address_extension(buf, report)
}

/// A.4b.1 D-OTAR KEY STATUS demand
fn walk_key_status_demand(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let acknowledgement_flag = buf.read_field(1, "acknowledgement flag")?;
    if acknowledgement_flag == 1 {
        report.add("explicit response", buf.read_field(1, "explicit response")?);
    } else {
        buf.skip(1);
    }

    report.add("max response timer value", buf.read_field(16, "max response timer value")?);

    let key_status_type = buf.read_field(3, "key status type")?;
    report.add("key status type", key_status_type);

    match key_status_type {
        0 => {
            report.add("sckn", buf.read_field(5, "sckn")?);
        }
        1 => {
            report.add("sck subset grouping type", buf.read_field(4, "sck subset grouping type")?);
            report.add("sck subset number", buf.read_field(5, "sck subset number")?);
        }
        3 => {
            report.add("gckn", buf.read_field(16, "gckn")?);
        }
        _ => {}
    }

    walk_optional_address_extension(buf, report)
}

/// A.5.4 D-OTAR CMG GTSI PROVIDE
fn walk_cmg_gtsi_provide(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("gssi", buf.read_field(24, "gssi")?);

    walk_optional_address_extension(buf, report)
}

/// A.5.3 D-DM-SCK ACTIVATE DEMAND
fn walk_dm_sck_activate(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("acknowledgement flag", buf.read_field(1, "acknowledgement flag")?);

    let number_changed = buf.read_field(4, "number of scks changed")?;
    report.add("number of scks changed", number_changed);

    if number_changed == 0 {
        report.add("sck subset grouping type", buf.read_field(4, "sck subset grouping type")?);
        report.add("sck subset number", buf.read_field(5, "sck subset number")?);
        report.add("sck-vn", buf.read_field(16, "sck-vn")?);
    } else {
        for _ in 0..number_changed {
            // A.8.67 SCK data
            report.add("sck number", buf.read_field(5, "sck number")?);
            report.add("sck version number", buf.read_field(16, "sck version number")?);
        }
    }

    let time_type = buf.read_field(2, "time type")?;
    report.add("time type", time_type_name(time_type));

    match time_type {
        0 => {
            // absolute IV
            report.add("slot number", buf.read_field(2, "slot number")?);
            report.add("frame number", buf.read_field(5, "frame number")?);
            report.add("multiframe number", buf.read_field(6, "multiframe number")?);
            report.add("hyperframe number", buf.read_field(16, "hyperframe number")?);
        }
        1 => {
            report.add("network time", format!("{:012x}", buf.read_field(48, "network time")?));
        }
        _ => {}
    }

    parse_address_extension(buf, report)
}

/// The common trailer of the OTAR PDUs: an o-bit introducing a single
/// optional address extension.
fn walk_optional_address_extension(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    if buf.read_field(1, "o_bit")? == 1 {
        if buf.read_field(1, "p_bit")? == 1 {
            parse_address_extension(buf, report)?;
        }
    }
    Ok(())
}
