//! The receive pipeline: one symbol in, at most one JSON event out per
//! decoded PDU, all on the calling thread. Stateful pieces are the burst
//! synchronizer, the serving-cell context and the upper MAC; everything
//! above the MAC is a pure function of the SDU and its context.

use tetra_config::RxConfig;
use tetra_core::{BurstType, CellContext, EventSink, Report, TdmaTime};
use tetra_pdus::umac::enums::downlink_usage::DownlinkUsage;
use tetra_saps::DecodeContext;
use tetra_saps::tma::TmaUnitdataInd;
use tetra_saps::tmd::TmdUnitdataInd;
use tetra_saps::tmv::TmvUnitdataInd;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

use crate::lmac::components::errorcontrol::CodecStage;
use crate::lmac::lower_mac;
use crate::phy::framesync::{FrameSync, RxBurst};
use crate::umac::upper_mac::UpperMac;
use crate::wiremsg::WireMsg;
use crate::{llc, mle, uplane};

pub struct RxStack {
    sync: FrameSync,
    cell: CellContext,
    umac: UpperMac,
    report: Report,
    wiremsg: Option<WireMsg>,
}

impl RxStack {
    pub fn new(config: &RxConfig, sink: Box<dyn EventSink>) -> Self {
        let wiremsg = if config.gsmtap_output {
            match WireMsg::new() {
                Ok(w) => Some(w),
                Err(e) => {
                    tracing::warn!("gsmtap output disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        RxStack {
            sync: FrameSync::new(),
            cell: CellContext::default(),
            umac: UpperMac::new(config.keep_fill_bits),
            report: Report::new(sink),
            wiremsg,
        }
    }

    pub fn cell(&self) -> &CellContext {
        &self.cell
    }

    /// Feed one demodulated symbol bit (LSB of the byte).
    pub fn rx_symbol(&mut self, sym: u8) {
        let mut sync_lost = false;
        let burst = self.sync.rx_bit(sym & 1, &mut sync_lost);

        if sync_lost {
            // every non-SB burst is now undecodable until the next BSCH
            self.cell.drop_acquisition();
            self.umac.reset();
        }

        if let Some(burst) = burst {
            self.process_burst(burst);
        }
    }

    fn process_burst(&mut self, burst: RxBurst) {
        match burst.burst_type {
            BurstType::Sb => self.process_sb(burst),
            BurstType::Ndb => self.process_ndb(burst),
            BurstType::NdbSplit => self.process_ndb_split(burst),
        }
    }

    /// Synchronization burst: BSCH (always decodable with the acquisition
    /// scrambling code), then AACH and the pre-scheduled BNCH half slot
    /// with the cell code the BSCH just (re)established.
    fn process_sb(&mut self, burst: RxBurst) {
        let mut time = burst.time;

        match lower_mac::decode_bsch(&burst) {
            Ok(ind) => {
                self.emit_gsmtap(&ind, time);
                if let Some((info, tma)) = self.umac.rx_bsch(ind, time) {
                    // the SYNC PDU carries its own slot number: re-anchor
                    // the TDMA clock and adopt the cell identity
                    self.sync.anchor_time(info.time.next_slot());
                    self.cell.update_scrambling_code(info.mcc, info.mnc, info.colour_code);
                    time = info.time;

                    let tma = TmaUnitdataInd {
                        sdu: tma.sdu,
                        ctx: DecodeContext { time, ..tma.ctx },
                    };
                    self.service_llc(tma);
                }
            }
            Err(stage) => {
                self.decode_failure(stage, LogicalChannel::Bsch, time);
            }
        }

        if !self.cell.acquired {
            return;
        }

        match lower_mac::decode_aach(&burst, &self.cell) {
            Ok(ind) => {
                self.emit_gsmtap(&ind, time);
                self.umac.rx_aach(ind);
            }
            Err(stage) => self.decode_failure(stage, LogicalChannel::Aach, time),
        }

        match lower_mac::decode_sb_block2(&burst, &self.cell) {
            Ok(ind) => self.service_signalling(ind, time),
            Err(stage) => self.decode_failure(stage, LogicalChannel::Bnch, time),
        }
    }

    /// Normal downlink burst with one full-slot channel: SCH/F signalling,
    /// or TCH/S speech when the AACH assigned the slot to traffic.
    fn process_ndb(&mut self, burst: RxBurst) {
        if !self.cell.acquired {
            return;
        }
        let time = burst.time;

        match lower_mac::decode_aach(&burst, &self.cell) {
            Ok(ind) => {
                self.emit_gsmtap(&ind, time);
                self.umac.rx_aach(ind);
            }
            Err(stage) => self.decode_failure(stage, LogicalChannel::Aach, time),
        }

        let traffic = self.umac.state.downlink_usage == DownlinkUsage::Traffic;
        let lchan = if traffic { LogicalChannel::TchS } else { LogicalChannel::SchF };

        match lower_mac::decode_full_slot(&burst, &self.cell, lchan) {
            Ok(ind) if lchan == LogicalChannel::TchS => {
                self.emit_gsmtap(&ind, time);
                self.service_uplane(ind, time);
            }
            Ok(ind) => self.service_signalling(ind, time),
            Err(stage) => self.decode_failure(stage, lchan, time),
        }
    }

    /// Normal downlink burst split into two half slots. On a traffic
    /// carrier the first half is the stealing channel and the second half
    /// is stolen only when signalled; otherwise both halves carry SCH/HD.
    fn process_ndb_split(&mut self, burst: RxBurst) {
        if !self.cell.acquired {
            return;
        }
        let time = burst.time;

        match lower_mac::decode_aach(&burst, &self.cell) {
            Ok(ind) => {
                self.emit_gsmtap(&ind, time);
                self.umac.rx_aach(ind);
            }
            Err(stage) => self.decode_failure(stage, LogicalChannel::Aach, time),
        }

        let traffic = self.umac.state.downlink_usage == DownlinkUsage::Traffic;
        let lchan1 = if traffic { LogicalChannel::Stch } else { LogicalChannel::SchHd };

        match lower_mac::decode_half_slot(&burst, &self.cell, tetra_core::BlockNum::Block1, lchan1) {
            Ok(ind) => self.service_signalling(ind, time),
            Err(stage) => self.decode_failure(stage, lchan1, time),
        }

        // events from the lower half slot precede the upper half slot
        let second_stolen = self.umac.take_second_half_stolen();
        let lchan2 = match (traffic, second_stolen) {
            (true, true) => LogicalChannel::Stch,
            (true, false) => {
                // second half continues the traffic stream; a lone half
                // slot of speech is not exportable
                return;
            }
            (false, _) => LogicalChannel::SchHd,
        };

        match lower_mac::decode_half_slot(&burst, &self.cell, tetra_core::BlockNum::Block2, lchan2) {
            Ok(ind) => self.service_signalling(ind, time),
            Err(stage) => self.decode_failure(stage, lchan2, time),
        }
    }

    /// Run one decoded signalling block through the upper MAC and hand each
    /// extracted TM-SDU to the LLC.
    fn service_signalling(&mut self, ind: TmvUnitdataInd, time: TdmaTime) {
        self.emit_gsmtap(&ind, time);
        let tma_inds = self.umac.service(ind, time, &mut self.cell, &mut self.report);
        for tma in tma_inds {
            self.service_llc(tma);
        }
    }

    fn service_llc(&mut self, ind: TmaUnitdataInd) {
        if let Some(tla) = llc::service(ind, &mut self.report) {
            mle::service(tla, &mut self.report);
        }
    }

    fn service_uplane(&mut self, ind: TmvUnitdataInd, time: TdmaTime) {
        let tmd = TmdUnitdataInd {
            block: ind.pdu,
            ctx: DecodeContext {
                channel: LogicalChannel::TchS,
                time,
                address: self.umac.address,
            },
            downlink_usage_marker: self.umac.state.downlink_usage_marker,
            encryption_mode: self.umac.address.encryption_mode,
        };
        uplane::service(tmd, &mut self.report);
    }

    /// Codec chain failure: the burst is dropped and one structured event
    /// records where the chain broke. TetraTime has already advanced.
    fn decode_failure(&mut self, stage: CodecStage, channel: LogicalChannel, time: TdmaTime) {
        tracing::debug!("decode failure at {:?} on {:?}", stage, channel);
        self.report.start("MAC", channel.name(), time, &self.umac.address);
        self.report.add("error", "decode_failure");
        self.report.add("stage", stage as u8 as u64);
        self.report.add("channel", channel.name());
        self.report.send();
    }

    fn emit_gsmtap(&self, ind: &TmvUnitdataInd, time: TdmaTime) {
        if let Some(wiremsg) = &self.wiremsg {
            wiremsg.send_block(ind.logical_channel, time, &ind.pdu);
        }
    }
}
