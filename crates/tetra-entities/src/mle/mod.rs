//! MLE: routes TL-SDUs to MM, CMCE and SNDCP by protocol discriminator and
//! parses its own subsystem PDUs. BSCH and BNCH deliveries carry no
//! discriminator and map directly to D-MLE-SYNC / D-MLE-SYSINFO.

use tetra_core::Report;
use tetra_pdus::mle::pdus::d_mle_sync::DMleSync;
use tetra_pdus::mle::pdus::d_mle_sysinfo::DMleSysinfo;
use tetra_pdus::mle::pdus::d_nwrk_broadcast;
use tetra_saps::tla::TlaUnitdataInd;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;
use tetra_saps::{DecodeContext, finish_event};

use crate::{cmce, mm, sndcp};

/// MLE service entry point, Clause 18.5.21.
pub fn service(ind: TlaUnitdataInd, report: &mut Report) {
    let mut sdu = ind.sdu;
    let ctx = ind.ctx;

    match ctx.channel {
        LogicalChannel::Bsch => {
            rx_d_mle_sync(&mut sdu, &ctx, report);
            return;
        }
        LogicalChannel::Bnch => {
            rx_d_mle_sysinfo(&mut sdu, &ctx, report);
            return;
        }
        _ => {}
    }

    let Some(disc) = sdu.read_bits(3) else {
        return;
    };

    match disc {
        0b001 => {
            let mut body = sdu.remaining_view();
            mm::service(&mut body, &ctx, report);
        }
        0b010 => {
            let mut body = sdu.remaining_view();
            cmce::service(&mut body, &ctx, report);
        }
        0b100 => {
            let body = sdu.remaining_view();
            sndcp::service(body, &ctx, report);
        }
        0b101 => {
            service_subsystem(&mut sdu, &ctx, report);
        }
        other => {
            report.start("MLE", "reserved", ctx.time, &ctx.address);
            report.add("disc", "reserved");
            report.add("code", other);
            report.add("reserved", true);
            report.send();
        }
    }
}

/// MLE subsystem PDUs, Clause 18.5.22.
fn service_subsystem(sdu: &mut tetra_core::BitBuffer, ctx: &DecodeContext, report: &mut Report) {
    let Some(pdu_type) = sdu.read_bits(3) else {
        return;
    };

    match pdu_type {
        0b010 => {
            report.start("MLE", "D-NWRK-BROADCAST", ctx.time, &ctx.address);
            let result = d_nwrk_broadcast::parse(sdu, report);
            finish_event(report, result);
        }
        0b011 => {
            report.start("MLE", "D-NWRK-BROADCAST-EXTENSION", ctx.time, &ctx.address);
            let result = d_nwrk_broadcast::parse_extension(sdu, report);
            finish_event(report, result);
        }
        0b100 => {
            // D-RESTORE-ACK wraps a CMCE PDU
            let mut body = sdu.remaining_view();
            cmce::service(&mut body, ctx, report);
        }
        other => {
            let name = match other {
                0b000 => "D-NEW-CELL",
                0b001 => "D-PREPARE-FAIL",
                0b101 => "D-RESTORE-FAIL",
                0b110 => "D-CHANNEL-RESPONSE",
                _ => "reserved",
            };
            report.start("MLE", name, ctx.time, &ctx.address);
            if name == "reserved" {
                report.add("code", other);
                report.add("reserved", true);
            }
            report.send();
        }
    }
}

/// D-MLE-SYNC (18.4.2.1), delivered without discriminator on the BSCH.
fn rx_d_mle_sync(sdu: &mut tetra_core::BitBuffer, ctx: &DecodeContext, report: &mut Report) {
    match DMleSync::from_bitbuf(sdu) {
        Ok(pdu) => {
            report.start("MLE", "D-MLE-SYNC", ctx.time, &ctx.address);
            report.add("MCC", pdu.mcc as u64);
            report.add("MNC", pdu.mnc as u64);
            report.add("neighbour cell broadcast", pdu.neighbour_cell_broadcast as u64);
            report.add("cell load CA", pdu.cell_load_ca as u64);
            report.add("late entry supported", pdu.late_entry_supported);
            report.send();
        }
        Err(e) => {
            tracing::warn!("D-MLE-SYNC parse failed: {:?}", e);
        }
    }
}

/// D-MLE-SYSINFO (18.4.2.2), delivered without discriminator on the BNCH.
fn rx_d_mle_sysinfo(sdu: &mut tetra_core::BitBuffer, ctx: &DecodeContext, report: &mut Report) {
    match DMleSysinfo::from_bitbuf(sdu) {
        Ok(pdu) => {
            report.start("MLE", "D-MLE-SYSINFO", ctx.time, &ctx.address);
            report.add("location area", pdu.location_area as u64);
            report.add("subscriber class", pdu.subscriber_class as u64);
            report.add("BS service details", pdu.bs_service_details as u64);
            report.add("registration mandatory", pdu.registration_mandatory());
            report.add("deregistration mandatory", pdu.deregistration_mandatory());
            report.add("priority cell", pdu.priority_cell());
            report.add("cell never minimum mode", pdu.cell_never_minimum_mode());
            report.add("migration supported", pdu.migration_supported());
            report.add("system wide services", pdu.system_wide_services());
            report.add("voice service", pdu.voice_service());
            report.add("circuit mode data service", pdu.circuit_mode_data_service());
            report.add("SNDCP service", pdu.sndcp_service());
            report.add("air interface encryption", pdu.air_interface_encryption());
            report.add("advanced link supported", pdu.advanced_link_supported());
            report.send();
        }
        Err(e) => {
            tracing::warn!("D-MLE-SYSINFO parse failed: {:?}", e);
        }
    }
}
