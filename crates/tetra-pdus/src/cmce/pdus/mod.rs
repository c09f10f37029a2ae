pub mod d_alert;
pub mod d_call_proceeding;
pub mod d_call_restore;
pub mod d_connect;
pub mod d_connect_ack;
pub mod d_disconnect;
pub mod d_info;
pub mod d_release;
pub mod d_setup;
pub mod d_tx_ceased;
pub mod d_tx_continue;
pub mod d_tx_granted;
pub mod d_tx_interrupt;
pub mod d_tx_wait;
