//! PHY-layer types referenced by the synchronizer and the lower MAC.

/// Downlink burst types (Clause 9.4.4). Only continuous downlink bursts are
/// decoded by this receiver.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BurstType {
    /// Synchronization downlink burst (9.4.4.3.4)
    Sb,
    /// Normal downlink burst, one full-slot logical channel
    Ndb,
    /// Normal downlink burst split into two half slots (9.4.4.3.2)
    NdbSplit,
}

/// Identifies which block within a timeslot a decoded MAC block came from.
/// Events from block 1 precede events from block 2 within a burst.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BlockNum {
    /// Both half-slots combined (full slot)
    Both,
    /// First half-slot only
    Block1,
    /// Second half-slot only
    Block2,
}
