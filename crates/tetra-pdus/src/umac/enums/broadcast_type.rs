/// Broadcast PDU subtypes, Clause 21.4.4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastType {
    Sysinfo,
    AccessDefine,
    SysinfoDa,
    Reserved,
}

impl From<u64> for BroadcastType {
    fn from(v: u64) -> Self {
        match v {
            0b00 => BroadcastType::Sysinfo,
            0b01 => BroadcastType::AccessDefine,
            0b10 => BroadcastType::SysinfoDa,
            _ => BroadcastType::Reserved,
        }
    }
}
