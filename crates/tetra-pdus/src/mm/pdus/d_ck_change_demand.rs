//! MM D-CK CHANGE DEMAND, EN 300 392-7 A.5.1: the SwMI orders a cipher key
//! change, optionally at a given point of network time.

use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;

use crate::mm::elements::{key_change_type_name, parse_gck_data, parse_sck_data, time_type_name};

pub fn parse(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("acknowledgement flag", buf.read_field(1, "acknowledgement flag")?);

    let key_change_type = buf.read_field(3, "key change type")?;
    report.add("key change type", key_change_type_name(key_change_type));

    match key_change_type {
        0b000 => {
            // SCK
            let count = buf.read_field(4, "number of scks changed")?;
            report.add("number of scks changed", count);
            for _ in 0..count {
                parse_sck_data(buf, report)?;
            }
        }
        0b001 | 0b011 => {
            // CCK / class 3 activation
            report.add("CCK identifier", buf.read_field(16, "CCK identifier")?);
        }
        0b010 => {
            // GCK
            let count = buf.read_field(4, "number of gcks changed")?;
            report.add("number of gcks changed", count);
            for _ in 0..count {
                parse_gck_data(buf, report)?;
            }
        }
        0b100 => {
            // all GCKs
            report.add("GCK version number", buf.read_field(16, "GCK version number")?);
        }
        _ => {}
    }

    let time_type = buf.read_field(2, "time type")?;
    report.add("time type", time_type_name(time_type));

    match time_type {
        0 => {
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

    Ok(())
}
