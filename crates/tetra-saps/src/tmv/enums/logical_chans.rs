/// Downlink logical channels handled by this receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalChannel {
    /// Access Assignment CHannel
    Aach,
    /// Broadcast Synchronization Channel
    Bsch,
    /// Broadcast Network Channel
    Bnch,
    /// Signalling Channel (full slot)
    SchF,
    /// Signalling Channel (half slot, downlink)
    SchHd,
    /// STealing CHannel (half slot)
    Stch,
    /// Traffic Channel (voice)
    TchS,
}

impl LogicalChannel {
    pub fn is_traffic(self) -> bool {
        self == LogicalChannel::TchS
    }

    /// Channels whose MAC blocks run through the full signalling codec chain
    /// (scrambling, interleaving, RCPC, CRC). The AACH uses the Reed-Muller
    /// broadcast block codec instead.
    pub fn is_signalling(self) -> bool {
        matches!(
            self,
            LogicalChannel::Bsch
                | LogicalChannel::Bnch
                | LogicalChannel::SchF
                | LogicalChannel::SchHd
                | LogicalChannel::Stch
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            LogicalChannel::Aach => "AACH",
            LogicalChannel::Bsch => "BSCH",
            LogicalChannel::Bnch => "BNCH",
            LogicalChannel::SchF => "SCH_F",
            LogicalChannel::SchHd => "SCH_HD",
            LogicalChannel::Stch => "STCH",
            LogicalChannel::TchS => "TCH_S",
        }
    }
}
