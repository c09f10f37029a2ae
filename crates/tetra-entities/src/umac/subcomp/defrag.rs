//! Fragment reassembly for downlink TM-SDUs. A fragmented SDU starts in a
//! MAC-RESOURCE whose length indication reads "fragmentation start",
//! continues in MAC-FRAG PDUs and completes with a MAC-END.

use std::collections::HashMap;

use tetra_core::{AddressKey, BitBuffer, TdmaTime};
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

const DEFRAG_BUF_INITIAL_LEN: usize = 512;

/// Fragments only belong together when both the logical channel and the MAC
/// address element match.
pub type DefragKey = (LogicalChannel, AddressKey);

pub struct DefragBuffer {
    pub t_first: TdmaTime,
    pub num_frags: usize,
    pub buffer: BitBuffer,
}

#[derive(Default)]
pub struct Defrag {
    slots: HashMap<DefragKey, DefragBuffer>,
}

impl Defrag {
    pub fn new() -> Self {
        Defrag { slots: HashMap::new() }
    }

    /// Begin reassembly with the SDU prefix from the fragmenting
    /// MAC-RESOURCE. An incomplete previous fragment chain under the same
    /// key is overwritten (fragmentation loss).
    pub fn start(&mut self, key: DefragKey, mut prefix: BitBuffer, time: TdmaTime) {
        if self.slots.contains_key(&key) {
            tracing::warn!("defrag: restart for {:?}, dropping incomplete SDU", key);
        }

        let mut buffer = BitBuffer::new_autoexpand(DEFRAG_BUF_INITIAL_LEN);
        let len = prefix.get_len_remaining();
        buffer.copy_bits(&mut prefix, len);
        self.slots.insert(key, DefragBuffer { t_first: time, num_frags: 1, buffer });
    }

    /// Append a MAC-FRAG continuation. Without a preceding start the
    /// fragment has no home and is dropped.
    pub fn append(&mut self, key: DefragKey, mut continuation: BitBuffer) {
        match self.slots.get_mut(&key) {
            Some(slot) => {
                let len = continuation.get_len_remaining();
                slot.buffer.copy_bits(&mut continuation, len);
                slot.num_frags += 1;
            }
            None => {
                tracing::warn!("defrag: MAC-FRAG without fragmentation start for {:?}", key);
            }
        }
    }

    /// Complete reassembly with the MAC-END suffix, yielding the full SDU.
    /// Returns None for an orphan MAC-END.
    pub fn complete(&mut self, key: DefragKey, mut suffix: BitBuffer) -> Option<BitBuffer> {
        let mut slot = self.slots.remove(&key)?;
        let len = suffix.get_len_remaining();
        slot.buffer.copy_bits(&mut suffix, len);
        slot.buffer.seek(0);
        tracing::debug!(
            "defrag: completed {} bits over {} fragments for {:?}",
            slot.buffer.get_len(), slot.num_frags + 1, key
        );
        Some(slot.buffer)
    }

    /// Drop all partial SDUs, e.g. on loss of burst synchronization.
    pub fn reset(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetra_core::MacAddress;

    fn key(ssi: u32) -> DefragKey {
        let addr = MacAddress {
            address_type: tetra_core::AddressType::Ssi,
            ssi,
            ..Default::default()
        };
        (LogicalChannel::SchF, addr.key())
    }

    #[test]
    fn test_start_append_complete() {
        let mut defrag = Defrag::new();
        defrag.start(key(1), BitBuffer::from_bitstr("1010"), TdmaTime::default());
        defrag.append(key(1), BitBuffer::from_bitstr("1111"));
        let sdu = defrag.complete(key(1), BitBuffer::from_bitstr("0001")).unwrap();
        assert_eq!(sdu.to_bitstr(), "101011110001");
    }

    #[test]
    fn test_orphan_end() {
        let mut defrag = Defrag::new();
        assert!(defrag.complete(key(2), BitBuffer::from_bitstr("0001")).is_none());
    }

    #[test]
    fn test_keys_are_independent() {
        let mut defrag = Defrag::new();
        defrag.start(key(1), BitBuffer::from_bitstr("1111"), TdmaTime::default());
        defrag.start(key(2), BitBuffer::from_bitstr("0000"), TdmaTime::default());
        let sdu = defrag.complete(key(2), BitBuffer::from_bitstr("11")).unwrap();
        assert_eq!(sdu.to_bitstr(), "000011");
        let sdu = defrag.complete(key(1), BitBuffer::from_bitstr("00")).unwrap();
        assert_eq!(sdu.to_bitstr(), "111100");
    }

    #[test]
    fn test_restart_overwrites() {
        let mut defrag = Defrag::new();
        defrag.start(key(1), BitBuffer::from_bitstr("1111"), TdmaTime::default());
        defrag.start(key(1), BitBuffer::from_bitstr("0000"), TdmaTime::default());
        let sdu = defrag.complete(key(1), BitBuffer::from_bitstr("11")).unwrap();
        assert_eq!(sdu.to_bitstr(), "000011");
    }
}
