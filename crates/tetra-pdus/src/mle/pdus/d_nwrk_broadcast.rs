use chrono::{DateTime, NaiveDate};
use tetra_core::{BitBuffer, PduParseErr};
use tetra_core::report::Report;

/// Clause 18.4.1.4.1 D-NWRK-BROADCAST. Cursor is positioned after the 3-bit
/// MLE subsystem PDU type.
pub fn parse(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    report.add("cell re-select parameter", buf.read_field(16, "cell re-select parameter")?);
    report.add("cell service level", buf.read_field(2, "cell service level")?);

    let o_flag = buf.read_field(1, "o_flag")?;
    if o_flag == 1 {
        let p_flag = buf.read_field(1, "tetra network time flag")?;
        if p_flag == 1 {
            parse_network_time(buf, report)?;
        }

        let p_flag = buf.read_field(1, "neighbour cells flag")?;
        if p_flag == 1 {
            let count = buf.read_field(3, "number of neighbour cells")?;
            report.add("number of neighbour cells", count);

            for cnt in 0..count {
                let mut infos: Vec<(String, u64)> = Vec::new();
                parse_neighbour_cell_information(buf, &mut infos)?;
                report.add_array(&format!("cell {}", cnt), &infos);
            }
        }
    }

    Ok(())
}

/// Clause 18.4.1.4.1a D-NWRK-BROADCAST-EXTENSION.
pub fn parse_extension(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let o_flag = buf.read_field(1, "o_flag")?;
    if o_flag == 1 {
        let p_flag = buf.read_field(1, "channel classes flag")?;
        if p_flag == 1 {
            // 18.5.5b channel class bodies are not walked; the count alone
            // is of interest to a monitoring receiver
            report.add("number of channel classes", buf.read_field(4, "number of channel classes")?);
        }
    }
    Ok(())
}

/// 18.5.24 TETRA network time: half-second units since the start of the
/// broadcast year, plus a signed local offset in 15-minute steps.
fn parse_network_time(buf: &mut BitBuffer, report: &mut Report) -> Result<(), PduParseErr> {
    let utctime = buf.read_field(24, "utc time")? * 2;
    let sign = buf.read_field(1, "offset sign")?;
    let looffset = buf.read_field(6, "local offset")?;
    let year = buf.read_field(6, "year")?;
    buf.skip(11); // reserved

    let offset_sec: i64 = looffset as i64 * 15 * 60 * if sign == 1 { -1 } else { 1 };

    let base = NaiveDate::from_ymd_opt(2000 + year as i32, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0);
    let ts = base + utctime as i64 + offset_sec;

    match DateTime::from_timestamp(ts, 0) {
        Some(dt) => {
            report.add("tetra network time", dt.format("%Y-%m-%dT%H:%M:%SZ").to_string());
        }
        None => {
            report.add("tetra network time", "out of range");
        }
    }
    Ok(())
}

/// 18.5.17 neighbour cell information. Appends to `infos`; the caller nests
/// the result as one array entry per cell.
fn parse_neighbour_cell_information(
    buf: &mut BitBuffer,
    infos: &mut Vec<(String, u64)>,
) -> Result<(), PduParseErr> {
    let mut push = |name: &str, val: u64| infos.push((name.to_string(), val));

    push("identifier", buf.read_field(5, "identifier")?);
    push("reselection types supported", buf.read_field(2, "reselection types supported")?);
    push("neighbour cell synchronized", buf.read_field(1, "neighbour cell synchronized")?);
    push("service level", buf.read_field(2, "service level")?);
    push("main carrier number", buf.read_field(12, "main carrier number")?);

    let o_flag = buf.read_field(1, "o_flag")?;
    if o_flag == 1 {
        if buf.read_field(1, "p_flag")? == 1 {
            push("main carrier number extension", buf.read_field(10, "main carrier number extension")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            push("MCC", buf.read_field(10, "MCC")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            push("MNC", buf.read_field(14, "MNC")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            push("LA", buf.read_field(14, "LA")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            push("max. MS tx power", buf.read_field(3, "max. MS tx power")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            push("min. rx access level", buf.read_field(4, "min. rx access level")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            push("subscriber class", buf.read_field(16, "subscriber class")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            push("BS service details", buf.read_field(12, "BS service details")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            push("timeshare or security", buf.read_field(5, "timeshare or security")?);
        }
        if buf.read_field(1, "p_flag")? == 1 {
            push("TDMA frame offset", buf.read_field(6, "TDMA frame offset")?);
        }
    }

    Ok(())
}
