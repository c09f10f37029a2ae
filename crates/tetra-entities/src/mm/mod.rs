//! MM: mobility management. Key management (OTAR), authentication,
//! enable/disable, location updating and group attachment.

use tetra_core::{BitBuffer, Report};
use tetra_pdus::mm::enums::mm_pdu_type_dl::MmPduTypeDl;
use tetra_pdus::mm::pdus;
use tetra_saps::{DecodeContext, finish_event};

/// MM service entry point, Clause 16.9.
pub fn service(pdu: &mut BitBuffer, ctx: &DecodeContext, report: &mut Report) {
    let Some(bits) = pdu.read_bits(4) else {
        return;
    };
    let pdu_type = MmPduTypeDl::from(bits);

    // sub-typed families start their own events
    match pdu_type {
        MmPduTypeDl::DOtar => {
            pdus::d_otar::service(pdu, ctx, report);
            return;
        }
        MmPduTypeDl::DAuthentication => {
            pdus::d_authentication::service(pdu, ctx, report);
            return;
        }
        MmPduTypeDl::DMmStatus => {
            pdus::d_mm_status::service(pdu, ctx, report);
            return;
        }
        _ => {}
    }

    let walk: fn(&mut BitBuffer, &mut Report) -> Result<(), tetra_core::PduParseErr> = match pdu_type {
        MmPduTypeDl::DCkChangeDemand => pdus::d_ck_change_demand::parse,
        MmPduTypeDl::DDisable => pdus::d_disable_enable::parse,
        MmPduTypeDl::DEnable => pdus::d_disable_enable::parse,
        MmPduTypeDl::DLocationUpdateAccept => pdus::d_location_update::parse_accept,
        MmPduTypeDl::DLocationUpdateCommand => pdus::d_location_update::parse_command,
        MmPduTypeDl::DLocationUpdateReject => pdus::d_location_update::parse_reject,
        MmPduTypeDl::DLocationUpdateProceeding => pdus::d_location_update::parse_proceeding,
        MmPduTypeDl::DAttachDetachGroupIdentity => pdus::d_group_identity::parse_attach_detach,
        MmPduTypeDl::DAttachDetachGroupIdentityAck => pdus::d_group_identity::parse_attach_detach_ack,
        MmPduTypeDl::FunctionNotSupported => pdus::not_supported::parse,

        MmPduTypeDl::Reserved(code) => {
            report.start("MM", "reserved", ctx.time, &ctx.address);
            report.add("code", code as u64);
            report.add("reserved", true);
            report.send();
            return;
        }
        MmPduTypeDl::DOtar | MmPduTypeDl::DAuthentication | MmPduTypeDl::DMmStatus => unreachable!(),
    };

    report.start("MM", pdu_type.name(), ctx.time, &ctx.address);
    let result = walk(pdu, report);
    finish_event(report, result);
}
