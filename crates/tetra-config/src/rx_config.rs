/// Runtime configuration of the receiver pipeline.
#[derive(Debug, Clone)]
pub struct RxConfig {
    /// UDP port receiving demodulated symbols from the PHY front-end
    pub rx_port: u16,
    /// Push endpoint for the JSON event stream
    pub event_sink_url: String,
    /// Input bytes carry 8 bits each instead of one bit in the LSB
    pub packed_input: bool,
    /// Log verbosity, 0..4
    pub verbosity: u8,
    /// Keep MAC fill bits on the TM-SDU instead of stripping them
    pub keep_fill_bits: bool,
    /// Mirror decoded bursts as GSMTAP packets on UDP 4729
    pub gsmtap_output: bool,
    /// Optional verbose log file
    pub debug_log: Option<String>,
}

impl Default for RxConfig {
    fn default() -> Self {
        RxConfig {
            rx_port: 42000,
            event_sink_url: "tcp://localhost:42100".to_string(),
            packed_input: false,
            verbosity: 1,
            keep_fill_bits: false,
            gsmtap_output: false,
            debug_log: None,
        }
    }
}
