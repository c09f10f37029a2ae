//! LLC: types the link-layer PDU, strips the link-control bits and hands
//! the TL-SDU to the MLE. The receiver never acknowledges anything, so the
//! advanced-link state machines reduce to SDU extraction.

pub mod components;

use tetra_core::Report;
use tetra_pdus::llc::enums::llc_pdu_type::LlcPduType;
use tetra_saps::tla::TlaUnitdataInd;
use tetra_saps::tma::TmaUnitdataInd;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

use crate::llc::components::fcs;

/// LLC service entry point, Clause 21.2.1. Returns the TL-SDU for the MLE
/// when the PDU carries one.
pub fn service(ind: TmaUnitdataInd, report: &mut Report) -> Option<TlaUnitdataInd> {
    let mut sdu = ind.sdu;
    let ctx = ind.ctx;

    // BSCH blocks carry no LLC header; the TM-SDU goes straight to the MLE
    if ctx.channel == LogicalChannel::Bsch {
        return Some(TlaUnitdataInd { sdu, ctx });
    }

    let pdu_type = LlcPduType::from(sdu.read_bits(4)?);
    tracing::debug!("<- {} ({} bits)", pdu_type.name(), sdu.get_len());

    match pdu_type {
        LlcPduType::BlAdata | LlcPduType::BlAdataFcs => {
            sdu.skip(1); // N(R)
            sdu.skip(1); // N(S)
            if pdu_type.has_fcs() {
                return Some(TlaUnitdataInd { sdu: strip_fcs(&mut sdu, pdu_type, &ctx, report)?, ctx });
            }
            Some(TlaUnitdataInd { sdu: sdu.remaining_view(), ctx })
        }
        LlcPduType::BlData | LlcPduType::BlDataFcs => {
            sdu.skip(1); // N(S)
            if pdu_type.has_fcs() {
                return Some(TlaUnitdataInd { sdu: strip_fcs(&mut sdu, pdu_type, &ctx, report)?, ctx });
            }
            Some(TlaUnitdataInd { sdu: sdu.remaining_view(), ctx })
        }
        LlcPduType::BlUdata | LlcPduType::BlUdataFcs => {
            if pdu_type.has_fcs() {
                return Some(TlaUnitdataInd { sdu: strip_fcs(&mut sdu, pdu_type, &ctx, report)?, ctx });
            }
            Some(TlaUnitdataInd { sdu: sdu.remaining_view(), ctx })
        }
        LlcPduType::BlAck | LlcPduType::BlAckFcs => {
            sdu.skip(1); // N(R)
            if pdu_type.has_fcs() {
                return Some(TlaUnitdataInd { sdu: strip_fcs(&mut sdu, pdu_type, &ctx, report)?, ctx });
            }
            Some(TlaUnitdataInd { sdu: sdu.remaining_view(), ctx })
        }
        LlcPduType::AlDataFinal => {
            let final_flag = sdu.read_bits(1)?;
            sdu.skip(1); // AR
            sdu.skip(3); // N(S)
            sdu.skip(8); // S(S)
            tracing::debug!("<- {}", if final_flag == 1 { "AL-FINAL" } else { "AL-DATA" });
            Some(TlaUnitdataInd { sdu: sdu.remaining_view(), ctx })
        }
        LlcPduType::AlUdataUfinal => {
            let final_flag = sdu.read_bits(1)?;
            sdu.skip(8); // N(S)
            sdu.skip(8); // S(S)
            tracing::debug!("<- {}", if final_flag == 1 { "AL-UFINAL" } else { "AL-UDATA" });
            Some(TlaUnitdataInd { sdu: sdu.remaining_view(), ctx })
        }
        LlcPduType::AlSetup => {
            report.start("LLC", "AL-SETUP", ctx.time, &ctx.address);
            let advanced_link = sdu.peek_bits(1).unwrap_or(0);
            report.add("advanced link", advanced_link);
            report.send();
            None
        }
        LlcPduType::AlAckRnr => {
            report.start("LLC", "AL-ACK/AL-RNR", ctx.time, &ctx.address);
            if let Some(bits) = sdu.read_bits(4) {
                report.add("flow control", bits >> 3);
                report.add("N(R)", bits & 0x7);
            }
            report.send();
            None
        }
        LlcPduType::AlReconnect
        | LlcPduType::AlDisc
        | LlcPduType::SupplLlcPdu
        | LlcPduType::Layer2SignallingPdu => {
            // header-only for this receiver: no SDU travels upward
            report.start("LLC", pdu_type.name(), ctx.time, &ctx.address);
            report.send();
            None
        }
    }
}

/// Verify and strip the trailing FCS of a +FCS PDU. The checksum covers
/// the TL-SDU, so the link-control bits must already be consumed. On a
/// mismatch the failure is reported and the SDU dropped.
fn strip_fcs(
    sdu: &mut tetra_core::BitBuffer,
    pdu_type: LlcPduType,
    ctx: &tetra_saps::DecodeContext,
    report: &mut Report,
) -> Option<tetra_core::BitBuffer> {
    if !fcs::check_fcs(sdu) {
        report.start("LLC", pdu_type.name(), ctx.time, &ctx.address);
        report.add("fcs", "invalid");
        report.send();
        return None;
    }
    let body_len = sdu.get_len_remaining().checked_sub(32)?;
    Some(sdu.view(sdu.get_pos(), body_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetra_core::{BitBuffer, MacAddress, TdmaTime, VecSink};
    use tetra_saps::DecodeContext;

    fn ctx() -> DecodeContext {
        DecodeContext {
            channel: LogicalChannel::SchF,
            time: TdmaTime::default(),
            address: MacAddress::default(),
        }
    }

    fn report() -> Report {
        Report::new(Box::new(VecSink::default()))
    }

    #[test]
    fn test_bl_udata_passthrough() {
        let mut bits = String::from("0010"); // BL-UDATA
        bits += "101100111000";
        let ind = TmaUnitdataInd { sdu: BitBuffer::from_bitstr(&bits), ctx: ctx() };

        let out = service(ind, &mut report()).unwrap();
        assert_eq!(out.sdu.to_bitstr(), "101100111000");
    }

    #[test]
    fn test_bl_adata_strips_sequence_bits() {
        let mut bits = String::from("0000"); // BL-ADATA
        bits += "1";                         // N(R)
        bits += "0";                         // N(S)
        bits += "11110000";
        let ind = TmaUnitdataInd { sdu: BitBuffer::from_bitstr(&bits), ctx: ctx() };

        let out = service(ind, &mut report()).unwrap();
        assert_eq!(out.sdu.to_bitstr(), "11110000");
    }

    #[test]
    fn test_bsch_bypass() {
        let mut c = ctx();
        c.channel = LogicalChannel::Bsch;
        let ind = TmaUnitdataInd { sdu: BitBuffer::from_bitstr("110011"), ctx: c };
        let out = service(ind, &mut report()).unwrap();
        assert_eq!(out.sdu.to_bitstr(), "110011");
    }

    #[test]
    fn test_bad_fcs_drops_sdu() {
        // BL-UDATA+FCS with a garbage checksum
        let mut bits = String::from("0110");
        bits += "1010101010101010";
        bits += &"0".repeat(32);
        let ind = TmaUnitdataInd { sdu: BitBuffer::from_bitstr(&bits), ctx: ctx() };

        assert!(service(ind, &mut report()).is_none());
    }

    #[test]
    fn test_supplementary_reports_without_delivery() {
        let ind = TmaUnitdataInd { sdu: BitBuffer::from_bitstr("11010000"), ctx: ctx() };
        assert!(service(ind, &mut report()).is_none());
    }
}
