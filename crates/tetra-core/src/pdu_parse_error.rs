/// Errors surfaced by PDU field walks. `BufferEnded` is the common case on a
/// live downlink: the PDU was cut short at the logical-channel boundary. The
/// dispatching layer turns it into a `truncated` marker on the in-progress
/// event instead of propagating further.
#[derive(Debug, PartialEq, Eq)]
pub enum PduParseErr {
    BufferEnded { field: Option<&'static str> },
    InvalidPduType { expected: u64, found: u64 },
    InvalidValue { field: &'static str, value: u64 },
    InconsistentLength { expected: usize, found: usize },
}

impl PduParseErr {
    /// True when the error means "ran out of bits" rather than "bad value".
    pub fn is_truncation(&self) -> bool {
        matches!(self, PduParseErr::BufferEnded { .. })
    }

    /// Field name to attach to the event, if one was recorded.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            PduParseErr::BufferEnded { field } => *field,
            PduParseErr::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }
}
