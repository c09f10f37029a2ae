use std::collections::HashMap;
use std::fs;

use serde::Deserialize;
use toml::Value;

use crate::rx_config::RxConfig;

/// Build an `RxConfig` from a TOML string, leaving defaults in place for
/// anything not mentioned. Unknown keys are rejected so that typos in a
/// config file fail loudly instead of silently using a default.
pub fn from_toml_str(toml_str: &str) -> Result<RxConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    if !root.extra.is_empty() {
        let mut keys: Vec<&String> = root.extra.keys().collect();
        keys.sort();
        return Err(format!("Unrecognized config fields: {:?}", keys).into());
    }

    let mut cfg = RxConfig::default();
    if let Some(v) = root.rx_port {
        cfg.rx_port = v;
    }
    if let Some(v) = root.event_sink_url {
        cfg.event_sink_url = v;
    }
    if let Some(v) = root.packed_input {
        cfg.packed_input = v;
    }
    if let Some(v) = root.verbosity {
        if v > 4 {
            return Err(format!("verbosity out of range: {}", v).into());
        }
        cfg.verbosity = v;
    }
    if let Some(v) = root.keep_fill_bits {
        cfg.keep_fill_bits = v;
    }
    if let Some(v) = root.gsmtap_output {
        cfg.gsmtap_output = v;
    }
    cfg.debug_log = root.debug_log;

    Ok(cfg)
}

pub fn from_file(path: &str) -> Result<RxConfig, Box<dyn std::error::Error>> {
    from_toml_str(&fs::read_to_string(path)?)
}

#[derive(Debug, Deserialize)]
struct TomlConfigRoot {
    rx_port: Option<u16>,
    event_sink_url: Option<String>,
    packed_input: Option<bool>,
    verbosity: Option<u8>,
    keep_fill_bits: Option<bool>,
    gsmtap_output: Option<bool>,
    debug_log: Option<String>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}
