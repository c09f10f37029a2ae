//! Burst synchronizer: aligns the incoming bit stream to TDMA bursts by
//! finding the synchronization training sequence, then classifies each
//! 510-bit burst by the training sequence found at its expected offset.

use tetra_core::{BurstType, TdmaTime};

use crate::phy::burst_consts::*;
use crate::phy::train_consts::*;

/// Consecutive bursts without a recognizable training sequence before
/// synchronization is declared lost.
const MAX_TRAIN_SEQ_MISSES: u32 = 4;

/// A burst aligned and classified by the synchronizer, with the TDMA time
/// of the slot it occupied.
pub struct RxBurst {
    pub burst_type: BurstType,
    pub bits: Vec<u8>,
    pub time: TdmaTime,
}

/// Outcome of one processed burst window while synchronized.
enum Classified {
    Burst(BurstType),
    Unknown,
}

pub struct FrameSync {
    /// Sliding window while hunting; burst accumulator while locked. One
    /// byte per bit.
    frame: Vec<u8>,
    synchronized: bool,
    misses: u32,
    time: TdmaTime,
}

impl FrameSync {
    pub fn new() -> Self {
        FrameSync {
            frame: Vec::with_capacity(BURST_BITS),
            synchronized: false,
            misses: 0,
            time: TdmaTime::default(),
        }
    }

    pub fn is_synchronized(&self) -> bool {
        self.synchronized
    }

    pub fn time(&self) -> TdmaTime {
        self.time
    }

    /// Anchor the TDMA clock from a decoded SYNC PDU. The burst carrying
    /// the PDU has already been consumed, so the next burst sits one slot
    /// later.
    pub fn anchor_time(&mut self, time: TdmaTime) {
        self.time = time;
    }

    /// Feed one bit. Returns a burst when a full one has been accumulated
    /// and classified. Returns whether synchronization was just lost via
    /// `sync_lost` (the caller drops cell acquisition in response).
    pub fn rx_bit(&mut self, bit: u8, sync_lost: &mut bool) -> Option<RxBurst> {
        *sync_lost = false;

        if !self.synchronized {
            self.hunt(bit);
            return None;
        }

        self.frame.push(bit);
        if self.frame.len() < BURST_BITS {
            return None;
        }

        // A complete burst window: classify, advance time, hand upward
        let burst_time = self.time;
        self.time = self.time.next_slot();

        let result = match self.classify() {
            Classified::Burst(burst_type) => {
                self.misses = 0;
                Some(RxBurst {
                    burst_type,
                    bits: std::mem::take(&mut self.frame),
                    time: burst_time,
                })
            }
            Classified::Unknown => {
                self.misses += 1;
                tracing::debug!("no training sequence found ({}/{})", self.misses, MAX_TRAIN_SEQ_MISSES);
                self.frame.clear();
                if self.misses > MAX_TRAIN_SEQ_MISSES {
                    tracing::info!("burst synchronization lost");
                    self.reset();
                    *sync_lost = true;
                }
                None
            }
        };

        self.frame.reserve(BURST_BITS);
        result
    }

    /// Hunt for the synchronization training sequence in a sliding window.
    /// The y-sequence ends at burst offset 252, so when it matches the
    /// window tail the window holds the first 252 bits of the burst.
    fn hunt(&mut self, bit: u8) {
        const WINDOW: usize = SB_BBK_OFFSET; // 252

        self.frame.push(bit);
        if self.frame.len() > WINDOW {
            self.frame.remove(0);
        }
        if self.frame.len() < WINDOW {
            return;
        }

        let tail = &self.frame[WINDOW - SYNC_TRAINING_SEQ.len()..];
        if tail == &SYNC_TRAINING_SEQ[..] {
            tracing::info!("burst synchronization found");
            self.synchronized = true;
            self.misses = 0;
            // the window is burst-aligned: keep it as the partial burst
        }
    }

    fn classify(&self) -> Classified {
        let sync_area = &self.frame[SB_TRAIN_OFFSET..SB_TRAIN_OFFSET + SYNC_TRAINING_SEQ.len()];
        if sync_area == &SYNC_TRAINING_SEQ[..] {
            return Classified::Burst(BurstType::Sb);
        }

        let normal_area = &self.frame[NDB_TRAIN_OFFSET..NDB_TRAIN_OFFSET + NORMAL_TRAINING_SEQ_1.len()];
        if normal_area == &NORMAL_TRAINING_SEQ_1[..] {
            return Classified::Burst(BurstType::Ndb);
        }
        if normal_area == &NORMAL_TRAINING_SEQ_2[..] {
            return Classified::Burst(BurstType::NdbSplit);
        }

        Classified::Unknown
    }

    fn reset(&mut self) {
        self.synchronized = false;
        self.misses = 0;
        self.frame.clear();
    }
}

impl Default for FrameSync {
    fn default() -> Self {
        Self::new()
    }
}
