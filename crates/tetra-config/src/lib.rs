//! Receiver configuration
//!
//! Defaults live in `RxConfig`; a TOML file can override them and CLI flags
//! override both.

pub mod rx_config;
pub mod toml_config;

pub use rx_config::RxConfig;
