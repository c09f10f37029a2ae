pub mod broadcast_type;
pub mod downlink_usage;
pub mod mac_pdu_type;
