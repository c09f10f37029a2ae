/// MAC address type selector from the MAC-RESOURCE address element
/// (Clause 21.4.3.1). The raw 3-bit value is kept because it is part of the
/// emitted event (`address_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AddressType {
    NullPdu = 0b000,
    Ssi = 0b001,
    EventLabel = 0b010,
    Ussi = 0b011,
    Smi = 0b100,
    SsiAndEventLabel = 0b101,
    SsiAndUsageMarker = 0b110,
    SmiAndEventLabel = 0b111,
}

impl TryFrom<u64> for AddressType {
    type Error = u64;
    fn try_from(v: u64) -> Result<Self, u64> {
        match v {
            0b000 => Ok(AddressType::NullPdu),
            0b001 => Ok(AddressType::Ssi),
            0b010 => Ok(AddressType::EventLabel),
            0b011 => Ok(AddressType::Ussi),
            0b100 => Ok(AddressType::Smi),
            0b101 => Ok(AddressType::SsiAndEventLabel),
            0b110 => Ok(AddressType::SsiAndUsageMarker),
            0b111 => Ok(AddressType::SmiAndEventLabel),
            other => Err(other),
        }
    }
}

/// Current burst addressing state. Established by each MAC-RESOURCE and kept
/// as context for every upper-layer call until the next MAC-RESOURCE
/// replaces it.
#[derive(Debug, Clone, Copy)]
pub struct MacAddress {
    pub address_type: AddressType,
    pub ssi: u32,
    pub ussi: u32,
    pub smi: u32,
    pub event_label: u16,
    pub usage_marker: u8,
    pub encryption_mode: u8,
    pub stolen_flag: bool,
}

impl Default for MacAddress {
    fn default() -> Self {
        MacAddress {
            address_type: AddressType::NullPdu,
            ssi: 0,
            ussi: 0,
            smi: 0,
            event_label: 0,
            usage_marker: 0,
            encryption_mode: 0,
            stolen_flag: false,
        }
    }
}

/// Fragment reassembly key. Two fragments belong to the same SDU only when
/// both the address element and the logical channel match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressKey {
    pub address_type: u8,
    pub identity: u32,
    pub event_label: u16,
}

impl MacAddress {
    pub fn key(&self) -> AddressKey {
        let identity = match self.address_type {
            AddressType::Ussi => self.ussi,
            AddressType::Smi | AddressType::SmiAndEventLabel => self.smi,
            _ => self.ssi,
        };
        AddressKey {
            address_type: self.address_type as u8,
            identity,
            event_label: self.event_label,
        }
    }
}
