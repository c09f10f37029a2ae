//! Upper MAC: dispatches the MAC PDUs inside each decoded block, resolves
//! addressing, strips fill bits, reassembles fragmented TM-SDUs and keeps
//! the downlink usage state from the AACH.

use tetra_core::{BitBuffer, CellContext, MacAddress, Report, TdmaTime};
use tetra_pdus::umac::enums::broadcast_type::BroadcastType;
use tetra_pdus::umac::enums::downlink_usage::DownlinkUsage;
use tetra_pdus::umac::enums::mac_pdu_type::MacPduType;
use tetra_pdus::umac::pdus::access_assign::AccessAssign;
use tetra_pdus::umac::pdus::mac_d_blck::MacDBlck;
use tetra_pdus::umac::pdus::mac_end::MacEnd;
use tetra_pdus::umac::pdus::mac_frag::MacFrag;
use tetra_pdus::umac::pdus::mac_resource::MacResource;
use tetra_pdus::umac::pdus::mac_sync::MacSync;
use tetra_pdus::umac::pdus::mac_sysinfo::MacSysinfo;
use tetra_pdus::mle::pdus::d_mle_sync::DMleSync;
use tetra_pdus::mle::pdus::d_mle_sysinfo::DMleSysinfo;
use tetra_saps::DecodeContext;
use tetra_saps::tma::TmaUnitdataInd;
use tetra_saps::tmv::TmvUnitdataInd;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

use crate::umac::subcomp::defrag::Defrag;
use crate::umac::subcomp::fillbits;

/// Downlink usage as signalled by the most recent AACH, consumed when
/// routing the traffic blocks of the following slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacState {
    pub downlink_usage: DownlinkUsage,
    pub downlink_usage_marker: u8,
}

pub struct UpperMac {
    pub state: MacState,
    /// Address established by the last MAC-RESOURCE, context for all
    /// following upper-layer PDUs.
    pub address: MacAddress,
    defrag: Defrag,
    /// Latched when a MAC-RESOURCE signals that the second half slot of the
    /// current burst is stolen.
    second_half_stolen: bool,
    keep_fill_bits: bool,
}

/// Cell identity extracted from a SYNC PDU and its D-MLE-SYNC payload.
pub struct SyncInfo {
    pub time: TdmaTime,
    pub mcc: u16,
    pub mnc: u16,
    pub colour_code: u8,
}

impl UpperMac {
    pub fn new(keep_fill_bits: bool) -> Self {
        UpperMac {
            state: MacState::default(),
            address: MacAddress::default(),
            defrag: Defrag::new(),
            second_half_stolen: false,
            keep_fill_bits,
        }
    }

    /// Drop per-cell state on loss of synchronization.
    pub fn reset(&mut self) {
        self.state = MacState::default();
        self.address = MacAddress::default();
        self.defrag.reset();
        self.second_half_stolen = false;
    }

    /// Consume the stolen flag for the second half slot of the current
    /// burst.
    pub fn take_second_half_stolen(&mut self) -> bool {
        std::mem::take(&mut self.second_half_stolen)
    }

    /// ACCESS-ASSIGN (Clause 21.4.7.2): updates the downlink usage state.
    /// Carries no SDU and emits no event.
    pub fn rx_aach(&mut self, mut prim: TmvUnitdataInd) {
        match AccessAssign::from_bitbuf(&mut prim.pdu) {
            Ok(pdu) => {
                tracing::debug!("<- {}", pdu);
                self.state.downlink_usage = pdu.dl_usage;
                self.state.downlink_usage_marker = pdu.dl_usage_marker;
            }
            Err(e) => {
                tracing::warn!("AACH parse failed: {:?}", e);
            }
        }
    }

    /// SYNC PDU on the BSCH (Clause 21.4.4.2). Returns the cell identity
    /// for scrambling-code acquisition and the D-MLE-SYNC TM-SDU for the
    /// MLE.
    pub fn rx_bsch(&mut self, mut prim: TmvUnitdataInd, time: TdmaTime) -> Option<(SyncInfo, TmaUnitdataInd)> {
        let sync = match MacSync::from_bitbuf(&mut prim.pdu) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("SYNC parse failed: {:?}", e);
                return None;
            }
        };
        tracing::debug!("<- {}", sync);

        // the TM-SDU is the D-MLE-SYNC; its MCC/MNC feed the scrambling code
        let sdu = prim.pdu.remaining_view();
        let mut peek = sdu.view(0, 0);
        let mle_sync = match DMleSync::from_bitbuf(&mut peek) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("D-MLE-SYNC parse failed: {:?}", e);
                return None;
            }
        };

        let info = SyncInfo {
            time: sync.time,
            mcc: mle_sync.mcc,
            mnc: mle_sync.mnc,
            colour_code: sync.colour_code,
        };
        let ind = TmaUnitdataInd {
            sdu,
            ctx: DecodeContext {
                channel: LogicalChannel::Bsch,
                time,
                address: self.address,
            },
        };
        Some((info, ind))
    }

    /// Signalling block (SCH/F, SCH/HD, STCH or BNCH): iterate over the MAC
    /// PDUs in the block and collect the TM-SDUs for the LLC. MAC-level
    /// broadcast (SYSINFO) is reported here and its TM-SDU forwarded as
    /// BNCH.
    pub fn service(
        &mut self,
        mut prim: TmvUnitdataInd,
        time: TdmaTime,
        cell: &mut CellContext,
        report: &mut Report,
    ) -> Vec<TmaUnitdataInd> {
        let mut out = Vec::new();
        let lchan = prim.logical_channel;
        let buf = &mut prim.pdu;

        // Null PDUs are 16 bits; anything shorter is padding
        while buf.get_len_remaining() >= 16 {
            let start = buf.get_pos();
            let Some(bits) = buf.peek_bits(3) else { break };
            let pdu_type = MacPduType::try_from(bits >> 1).unwrap(); // 2 bits cover the enum

            let proceed = match pdu_type {
                MacPduType::MacResource => self.rx_mac_resource(buf, lchan, time, report, &mut out),
                MacPduType::MacFragMacEnd => {
                    if bits & 1 == 0 {
                        self.rx_mac_frag(buf, lchan)
                    } else {
                        self.rx_mac_end(buf, lchan, time, report, &mut out)
                    }
                }
                MacPduType::Broadcast => self.rx_broadcast(buf, time, cell, report, &mut out),
                MacPduType::MacDBlck => self.rx_d_blck(buf, lchan, time, &mut out),
            };

            if !proceed || buf.get_pos() == start {
                break;
            }
        }

        out
    }

    /// MAC-RESOURCE (Clause 21.4.3.1). Returns false when parsing of the
    /// block must stop (null PDU, open-ended SDU, parse failure).
    fn rx_mac_resource(
        &mut self,
        buf: &mut BitBuffer,
        lchan: LogicalChannel,
        time: TdmaTime,
        report: &mut Report,
        out: &mut Vec<TmaUnitdataInd>,
    ) -> bool {
        let header_start = buf.get_pos();
        let pdu = match MacResource::from_bitbuf(buf) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("MAC-RESOURCE parse failed: {:?} {}", e, buf.dump_bin());
                return false;
            }
        };
        tracing::debug!("<- {}", pdu);

        let Some(mut addr) = pdu.address else {
            // null PDU: the rest of the block is padding
            return false;
        };
        addr.stolen_flag = lchan == LogicalChannel::Stch;
        self.address = addr;

        let header_end = buf.get_pos();
        let block_len = buf.get_len();

        // Locate the end of this PDU from the length indication. The two
        // marker values mean the SDU runs to the end of the block.
        let (sdu_end, fragmenting) = if pdu.starts_fragmentation() {
            (block_len, true)
        } else if pdu.second_half_stolen() {
            self.second_half_stolen = true;
            (block_len, false)
        } else {
            ((header_start + pdu.length_ind as usize * 8).min(block_len), false)
        };
        let open_ended = sdu_end == block_len;

        if sdu_end < header_end {
            tracing::warn!("MAC-RESOURCE length {} shorter than header", pdu.length_ind);
            return false;
        }

        let mut sdu_len = sdu_end - header_end;
        if pdu.fill_bits && !self.keep_fill_bits {
            let fill = fillbits::get_num_fill_bits(buf, sdu_end);
            if fill == 0 {
                report.start("MAC", "MAC-RESOURCE", time, &self.address);
                report.add("warning", "fill bit indication without fill bits");
                report.send();
            }
            sdu_len = sdu_len.saturating_sub(fill);
        }

        let sdu = buf.view(header_end, sdu_len);
        buf.seek(sdu_end);

        if sdu.get_len() == 0 {
            // header-only resource grant, nothing for the LLC
            return !open_ended;
        }

        if fragmenting {
            self.defrag.start((lchan, self.address.key()), sdu, time);
        } else {
            out.push(TmaUnitdataInd {
                sdu,
                ctx: DecodeContext { channel: lchan, time, address: self.address },
            });
        }

        !open_ended
    }

    /// MAC-FRAG (Clause 21.4.3.2): SDU continuation to the end of the block.
    fn rx_mac_frag(&mut self, buf: &mut BitBuffer, lchan: LogicalChannel) -> bool {
        let pdu = match MacFrag::from_bitbuf(buf) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("MAC-FRAG parse failed: {:?}", e);
                return false;
            }
        };

        let header_end = buf.get_pos();
        let block_len = buf.get_len();

        let mut sdu_len = block_len - header_end;
        if pdu.fill_bits && !self.keep_fill_bits {
            sdu_len = sdu_len.saturating_sub(fillbits::get_num_fill_bits(buf, block_len));
        }

        let sdu = buf.view(header_end, sdu_len);
        buf.seek(block_len);
        self.defrag.append((lchan, self.address.key()), sdu);
        false
    }

    /// MAC-END (Clause 21.4.3.3): completes a fragmented SDU. The
    /// reassembled SDU is timestamped with the MAC-END burst.
    fn rx_mac_end(
        &mut self,
        buf: &mut BitBuffer,
        lchan: LogicalChannel,
        time: TdmaTime,
        report: &mut Report,
        out: &mut Vec<TmaUnitdataInd>,
    ) -> bool {
        let header_start = buf.get_pos();
        let pdu = match MacEnd::from_bitbuf(buf) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("MAC-END parse failed: {:?}", e);
                return false;
            }
        };
        tracing::debug!("<- {}", pdu);

        let header_end = buf.get_pos();
        let block_len = buf.get_len();
        let sdu_end = (header_start + pdu.length_ind as usize * 8).min(block_len);

        if sdu_end < header_end {
            tracing::warn!("MAC-END length {} shorter than header", pdu.length_ind);
            return false;
        }

        let mut sdu_len = sdu_end - header_end;
        if pdu.fill_bits && !self.keep_fill_bits {
            sdu_len = sdu_len.saturating_sub(fillbits::get_num_fill_bits(buf, sdu_end));
        }

        let suffix = buf.view(header_end, sdu_len);
        buf.seek(sdu_end);

        match self.defrag.complete((lchan, self.address.key()), suffix) {
            Some(sdu) => {
                out.push(TmaUnitdataInd {
                    sdu,
                    ctx: DecodeContext { channel: lchan, time, address: self.address },
                });
            }
            None => {
                report.start("MAC", "MAC-END", time, &self.address);
                report.add("orphan", true);
                report.send();
            }
        }
        true
    }

    /// MAC broadcast (Clause 21.4.4): SYSINFO is reported and feeds the
    /// cell frequency plan; its TM-SDU travels upward as BNCH. The other
    /// broadcast subtypes are labeled only.
    fn rx_broadcast(
        &mut self,
        buf: &mut BitBuffer,
        time: TdmaTime,
        cell: &mut CellContext,
        report: &mut Report,
        out: &mut Vec<TmaUnitdataInd>,
    ) -> bool {
        let subtype = BroadcastType::from(buf.peek_bits_posoffset(2, 2).unwrap_or(3));

        match subtype {
            BroadcastType::Sysinfo => {
                let pdu = match MacSysinfo::from_bitbuf(buf) {
                    Ok(pdu) => pdu,
                    Err(e) => {
                        tracing::warn!("SYSINFO parse failed: {:?}", e);
                        return false;
                    }
                };
                tracing::debug!("<- {}", pdu);

                cell.set_frequencies(pdu.downlink_frequency_hz(), pdu.uplink_frequency_hz());

                report.start("MAC", "SYSINFO", time, &self.address);
                report.add("main carrier", pdu.main_carrier as u64);
                report.add("frequency band", pdu.freq_band as u64);
                report.add("downlink frequency", pdu.downlink_frequency_hz());
                report.add("uplink frequency", pdu.uplink_frequency_hz());
                report.add("number of common secondary control channels in use", pdu.num_of_csch as u64);
                report.add("MS_TXPWR_MAX_CELL", pdu.ms_txpwr_max_cell as u64);
                report.add("RXLEV_ACCESS_MIN", pdu.rxlev_access_min_dbm());
                report.add("ACCESS_PARAMETER", pdu.access_parameter_dbm());
                report.add("RADIO_DOWNLINK_TIMEOUT", pdu.radio_dl_timeout as u64);
                if let Some(cck_id) = pdu.cck_id {
                    report.add("hyperframe or cck", "cck");
                    report.add("cck identifier", cck_id as u64);
                } else {
                    report.add("hyperframe or cck", "hyperframe");
                    report.add("hyperframe number", pdu.hyperframe_number.unwrap_or(0) as u64);
                }
                report.add("optional field flag", pdu.option_field as u64);
                report.send();

                // the 42-bit TM-SDU behind the header is the D-MLE-SYSINFO;
                // its location area belongs to the cell context
                let sdu = buf.remaining_view();
                buf.seek(buf.get_len());
                if let Ok(sysinfo) = DMleSysinfo::from_bitbuf(&mut sdu.view(0, 0)) {
                    cell.location_area = sysinfo.location_area;
                }
                out.push(TmaUnitdataInd {
                    sdu,
                    ctx: DecodeContext { channel: LogicalChannel::Bnch, time, address: self.address },
                });
                true
            }
            other => {
                tracing::debug!("unhandled broadcast subtype {:?}", other);
                false
            }
        }
    }

    /// MAC-D-BLCK (Clause 21.4.3.4): event-label addressed block with the
    /// SDU running to the end of the block.
    fn rx_d_blck(
        &mut self,
        buf: &mut BitBuffer,
        lchan: LogicalChannel,
        time: TdmaTime,
        out: &mut Vec<TmaUnitdataInd>,
    ) -> bool {
        let pdu = match MacDBlck::from_bitbuf(buf) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("MAC-D-BLCK parse failed: {:?}", e);
                return false;
            }
        };
        tracing::debug!("<- {}", pdu);

        self.address = MacAddress {
            address_type: tetra_core::AddressType::EventLabel,
            event_label: pdu.event_label,
            encryption_mode: pdu.encryption_mode,
            stolen_flag: lchan == LogicalChannel::Stch,
            ..Default::default()
        };

        let header_end = buf.get_pos();
        let block_len = buf.get_len();

        let mut sdu_len = block_len - header_end;
        if pdu.fill_bits && !self.keep_fill_bits {
            sdu_len = sdu_len.saturating_sub(fillbits::get_num_fill_bits(buf, block_len));
        }

        let sdu = buf.view(header_end, sdu_len);
        buf.seek(block_len);
        out.push(TmaUnitdataInd {
            sdu,
            ctx: DecodeContext { channel: lchan, time, address: self.address },
        });
        false
    }
}
