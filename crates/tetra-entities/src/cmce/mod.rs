//! CMCE: circuit-mode call control. Each downlink PDU becomes one event;
//! D-STATUS and D-SDS-DATA belong to the SDS sub-entity.

use tetra_core::{BitBuffer, Report};
use tetra_pdus::cmce::enums::cmce_pdu_type_dl::CmcePduTypeDl;
use tetra_pdus::cmce::pdus;
use tetra_pdus::cmce::sds;
use tetra_saps::{DecodeContext, finish_event};

/// CMCE service entry point, Clause 14.7.
pub fn service(pdu: &mut BitBuffer, ctx: &DecodeContext, report: &mut Report) {
    let Some(bits) = pdu.peek_bits(5) else {
        return;
    };
    let pdu_type = CmcePduTypeDl::from(bits);

    // the SDS sub-entity consumes the type itself
    match pdu_type {
        CmcePduTypeDl::DStatus | CmcePduTypeDl::DSdsData => {
            sds::service(pdu, ctx, report);
            return;
        }
        _ => {}
    }
    pdu.skip(5);

    let walk: fn(&mut BitBuffer, &mut Report) -> Result<(), tetra_core::PduParseErr> = match pdu_type {
        CmcePduTypeDl::DAlert => pdus::d_alert::parse,
        CmcePduTypeDl::DCallProceeding => pdus::d_call_proceeding::parse,
        CmcePduTypeDl::DConnect => pdus::d_connect::parse,
        CmcePduTypeDl::DConnectAck => pdus::d_connect_ack::parse,
        CmcePduTypeDl::DDisconnect => pdus::d_disconnect::parse,
        CmcePduTypeDl::DInfo => pdus::d_info::parse,
        CmcePduTypeDl::DRelease => pdus::d_release::parse,
        CmcePduTypeDl::DSetup => pdus::d_setup::parse,
        CmcePduTypeDl::DTxCeased => pdus::d_tx_ceased::parse,
        CmcePduTypeDl::DTxContinue => pdus::d_tx_continue::parse,
        CmcePduTypeDl::DTxGranted => pdus::d_tx_granted::parse,
        CmcePduTypeDl::DTxWait => pdus::d_tx_wait::parse,
        CmcePduTypeDl::DTxInterrupt => pdus::d_tx_interrupt::parse,
        CmcePduTypeDl::DCallRestore => pdus::d_call_restore::parse,

        CmcePduTypeDl::DFacility | CmcePduTypeDl::FunctionNotSupported => {
            // labeled, body not walked (D-FACILITY belongs to the SS
            // protocol)
            report.start("CMCE", pdu_type.name(), ctx.time, &ctx.address);
            report.send();
            return;
        }
        CmcePduTypeDl::Reserved(code) => {
            report.start("CMCE", "reserved", ctx.time, &ctx.address);
            report.add("code", code as u64);
            report.add("reserved", true);
            report.send();
            return;
        }
        CmcePduTypeDl::DStatus | CmcePduTypeDl::DSdsData => unreachable!(),
    };

    report.start("CMCE", pdu_type.name(), ctx.time, &ctx.address);
    let result = walk(pdu, report);
    finish_event(report, result);
}
