/// Downlink MM PDU types, Clause 16.10.39.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmPduTypeDl {
    DOtar,
    DAuthentication,
    DCkChangeDemand,
    DDisable,
    DEnable,
    DLocationUpdateAccept,
    DLocationUpdateCommand,
    DLocationUpdateReject,
    DLocationUpdateProceeding,
    DAttachDetachGroupIdentity,
    DAttachDetachGroupIdentityAck,
    DMmStatus,
    FunctionNotSupported,
    Reserved(u8),
}

impl From<u64> for MmPduTypeDl {
    fn from(v: u64) -> Self {
        match v & 0xF {
            0b0000 => MmPduTypeDl::DOtar,
            0b0001 => MmPduTypeDl::DAuthentication,
            0b0010 => MmPduTypeDl::DCkChangeDemand,
            0b0011 => MmPduTypeDl::DDisable,
            0b0100 => MmPduTypeDl::DEnable,
            0b0101 => MmPduTypeDl::DLocationUpdateAccept,
            0b0110 => MmPduTypeDl::DLocationUpdateCommand,
            0b0111 => MmPduTypeDl::DLocationUpdateReject,
            0b1001 => MmPduTypeDl::DLocationUpdateProceeding,
            0b1010 => MmPduTypeDl::DAttachDetachGroupIdentity,
            0b1011 => MmPduTypeDl::DAttachDetachGroupIdentityAck,
            0b1100 => MmPduTypeDl::DMmStatus,
            0b1111 => MmPduTypeDl::FunctionNotSupported,
            other => MmPduTypeDl::Reserved(other as u8),
        }
    }
}

impl MmPduTypeDl {
    pub fn name(self) -> &'static str {
        match self {
            MmPduTypeDl::DOtar => "D-OTAR",
            MmPduTypeDl::DAuthentication => "D-AUTHENTICATION",
            MmPduTypeDl::DCkChangeDemand => "D-CK CHANGE DEMAND",
            MmPduTypeDl::DDisable => "D-DISABLE",
            MmPduTypeDl::DEnable => "D-ENABLE",
            MmPduTypeDl::DLocationUpdateAccept => "D-LOCATION UPDATE ACCEPT",
            MmPduTypeDl::DLocationUpdateCommand => "D-LOCATION UPDATE COMMAND",
            MmPduTypeDl::DLocationUpdateReject => "D-LOCATION UPDATE REJECT",
            MmPduTypeDl::DLocationUpdateProceeding => "D-LOCATION UPDATE PROCEEDING",
            MmPduTypeDl::DAttachDetachGroupIdentity => "D-ATTACH/DETACH GROUP IDENTITY",
            MmPduTypeDl::DAttachDetachGroupIdentityAck => "D-ATTACH/DETACH GROUP IDENTITY ACK",
            MmPduTypeDl::DMmStatus => "D-MM STATUS",
            MmPduTypeDl::FunctionNotSupported => "MM PDU/FUNCTION NOT SUPPORTED",
            MmPduTypeDl::Reserved(_) => "reserved",
        }
    }
}
