//! MM D-MM STATUS, Clause 16.9.2.5. A 6-bit status-downlink value selects
//! the carried message (16.10.48).

use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;
use tetra_saps::{DecodeContext, finish_event};

use crate::mm::elements::{
    dual_watch_result_name, parse_energy_saving_information, parse_scch_information_and_distribution,
};

pub fn service(buf: &mut BitBuffer, ctx: &DecodeContext, report: &mut Report) {
    let Some(status_downlink) = buf.read_bits(6) else {
        return;
    };

    let (name, walk): (&str, fn(&mut BitBuffer, &mut Report) -> Result<(), PduParseErr>) =
        match status_downlink {
            0b000001 => ("D-CHANGE OF ENERGY SAVING MODE REQUEST", walk_energy_saving),
            0b000010 => ("D-CHANGE OF ENERGY SAVING MODE RESPONSE", walk_energy_saving),
            0b000011 => ("D-DUAL WATCH MODE RESPONSE", walk_dual_watch_response),
            0b000100 => ("D-TERMINATING DUAL WATCH MODE RESPONSE", walk_terminating_dual_watch),
            0b000101 => ("D-CHANGE OF DUAL WATCH MODE REQUEST", walk_change_dual_watch),
            0b000111 => ("D-MS FREQUENCY BANDS REQUEST", walk_frequency_bands),
            0b001000 => ("D-DISTANCE REPORTING REQUEST", walk_distance_reporting),
            _ => {
                report.start("MM", "D-MM STATUS", ctx.time, &ctx.address);
                report.add("status downlink", status_downlink);
                report.add("reserved", true);
                report.send();
                return;
            }
        };

    report.start("MM", name, ctx.time, &ctx.address);
    report.add("status downlink", status_downlink);
    let result = walk(buf, report);
    finish_event(report, result);
}

/// 16.9.2.5.2 / 16.9.2.5.3: both carry only the energy saving information.
fn walk_energy_saving(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    parse_energy_saving_information(buf, report)
}

/// 16.9.2.5.4
fn walk_dual_watch_response(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    parse_energy_saving_information(buf, report)?;
    report.add("result of dual watch request", dual_watch_result_name(buf.read_field(3, "result of dual watch request")?));
    buf.skip(8); // reserved

    if buf.read_field(1, "o_bit")? == 1 {
        if buf.read_field(1, "p_bit")? == 1 {
            parse_scch_information_and_distribution(buf, report)?;
        }
    }
    Ok(())
}

/// 16.9.2.5.5
fn walk_terminating_dual_watch(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    buf.skip(8); // reserved

    if buf.read_field(1, "o_bit")? == 1 {
        if buf.read_field(1, "p_bit")? == 1 {
            parse_energy_saving_information(buf, report)?;
        }
        if buf.read_field(1, "p_bit")? == 1 {
            parse_scch_information_and_distribution(buf, report)?;
        }
    }
    Ok(())
}

/// 16.9.2.5.6
fn walk_change_dual_watch(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    parse_energy_saving_information(buf, report)?;
    report.add("reason for dual watch change by swmi", buf.read_field(3, "reason for dual watch change by swmi")?);
    buf.skip(8); // reserved

    if buf.read_field(1, "o_bit")? == 1 {
        if buf.read_field(1, "p_bit")? == 1 {
            parse_scch_information_and_distribution(buf, report)?;
        }
    }
    Ok(())
}

/// 16.9.2.5.8: the request body is proprietary.
fn walk_frequency_bands(_buf: &mut BitBuffer, _report: &mut Report) -> Result<(), PduParseErr> {
    Ok(())
}

/// 16.9.2.5.9
fn walk_distance_reporting(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("distance reporting timer", buf.read_field(7, "distance reporting timer")?);
    report.add("distance reporting validity", buf.read_field(1, "distance reporting validity")?);
    Ok(())
}
