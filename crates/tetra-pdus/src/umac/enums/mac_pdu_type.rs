/// Downlink MAC PDU types, Clause 21.4.1. The MAC-FRAG/MAC-END pair shares
/// one type value and is told apart by the following subtype bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacPduType {
    MacResource,
    MacFragMacEnd,
    Broadcast,
    MacDBlck,
}

impl TryFrom<u64> for MacPduType {
    type Error = u64;
    fn try_from(v: u64) -> Result<Self, u64> {
        match v {
            0b00 => Ok(MacPduType::MacResource),
            0b01 => Ok(MacPduType::MacFragMacEnd),
            0b10 => Ok(MacPduType::Broadcast),
            0b11 => Ok(MacPduType::MacDBlck),
            other => Err(other),
        }
    }
}
