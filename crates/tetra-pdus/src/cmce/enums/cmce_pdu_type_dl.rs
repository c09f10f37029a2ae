/// Downlink CMCE PDU types, Clause 14.7 table 14.26.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmcePduTypeDl {
    DAlert,
    DCallProceeding,
    DConnect,
    DConnectAck,
    DDisconnect,
    DInfo,
    DRelease,
    DSetup,
    DStatus,
    DTxCeased,
    DTxContinue,
    DTxGranted,
    DTxWait,
    DTxInterrupt,
    DCallRestore,
    DSdsData,
    DFacility,
    FunctionNotSupported,
    Reserved(u8),
}

impl From<u64> for CmcePduTypeDl {
    fn from(v: u64) -> Self {
        match v & 0x1F {
            0b00000 => CmcePduTypeDl::DAlert,
            0b00001 => CmcePduTypeDl::DCallProceeding,
            0b00010 => CmcePduTypeDl::DConnect,
            0b00011 => CmcePduTypeDl::DConnectAck,
            0b00100 => CmcePduTypeDl::DDisconnect,
            0b00101 => CmcePduTypeDl::DInfo,
            0b00110 => CmcePduTypeDl::DRelease,
            0b00111 => CmcePduTypeDl::DSetup,
            0b01000 => CmcePduTypeDl::DStatus,
            0b01001 => CmcePduTypeDl::DTxCeased,
            0b01010 => CmcePduTypeDl::DTxContinue,
            0b01011 => CmcePduTypeDl::DTxGranted,
            0b01100 => CmcePduTypeDl::DTxWait,
            0b01101 => CmcePduTypeDl::DTxInterrupt,
            0b01110 => CmcePduTypeDl::DCallRestore,
            0b01111 => CmcePduTypeDl::DSdsData,
            0b10000 => CmcePduTypeDl::DFacility,
            0b11111 => CmcePduTypeDl::FunctionNotSupported,
            other => CmcePduTypeDl::Reserved(other as u8),
        }
    }
}

impl CmcePduTypeDl {
    pub fn name(self) -> &'static str {
        match self {
            CmcePduTypeDl::DAlert => "D-ALERT",
            CmcePduTypeDl::DCallProceeding => "D-CALL-PROCEEDING",
            CmcePduTypeDl::DConnect => "D-CONNECT",
            CmcePduTypeDl::DConnectAck => "D-CONNECT ACK",
            CmcePduTypeDl::DDisconnect => "D-DISCONNECT",
            CmcePduTypeDl::DInfo => "D-INFO",
            CmcePduTypeDl::DRelease => "D-RELEASE",
            CmcePduTypeDl::DSetup => "D-SETUP",
            CmcePduTypeDl::DStatus => "D-STATUS",
            CmcePduTypeDl::DTxCeased => "D-TX CEASED",
            CmcePduTypeDl::DTxContinue => "D-TX CONTINUE",
            CmcePduTypeDl::DTxGranted => "D-TX GRANTED",
            CmcePduTypeDl::DTxWait => "D-TX WAIT",
            CmcePduTypeDl::DTxInterrupt => "D-TX INTERRUPT",
            CmcePduTypeDl::DCallRestore => "D-CALL RESTORE",
            CmcePduTypeDl::DSdsData => "D-SDS-DATA",
            CmcePduTypeDl::DFacility => "D-FACILITY",
            CmcePduTypeDl::FunctionNotSupported => "CMCE FUNCTION NOT SUPPORTED",
            CmcePduTypeDl::Reserved(_) => "reserved",
        }
    }
}
