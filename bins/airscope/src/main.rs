mod zmq_sink;

use std::net::UdpSocket;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;

use tetra_config::{RxConfig, toml_config};
use tetra_core::{STACK_VERSION, debug};
use tetra_entities::RxStack;

use crate::zmq_sink::ZmqSink;

#[derive(Parser, Debug)]
#[command(
    name = "tetra-airscope",
    version = STACK_VERSION,
    disable_version_flag = true,
    about = "Passive TETRA downlink receiver",
    long_about = "Reads demodulated symbol bits from UDP, decodes the TETRA downlink \
                  control plane and pushes one JSON event per PDU to a message queue"
)]
struct Args {
    /// UDP port receiving symbols from the PHY demodulator
    #[arg(short = 'r', value_name = "port", default_value_t = 42000)]
    rx_port: u16,

    /// Output URL for the JSON event stream
    #[arg(short = 'a', value_name = "url", default_value = "tcp://localhost:42100")]
    event_sink_url: String,

    /// Packed input: each received byte carries 8 bits
    #[arg(short = 'P')]
    packed: bool,

    /// Log verbosity, 0..4
    #[arg(short = 'd', value_name = "level", default_value_t = 1)]
    debug_level: u8,

    /// Keep MAC fill bits
    #[arg(short = 'f')]
    keep_fill_bits: bool,

    /// Mirror decoded blocks as GSMTAP to 127.0.0.1:4729
    #[arg(short = 'w')]
    gsmtap: bool,

    /// Optional TOML config file providing receiver defaults
    #[arg(short = 'c', value_name = "file")]
    config: Option<String>,
}

/// Merge CLI flags over the config file (or built-in) defaults. Flags win
/// whenever they differ from their own default.
fn build_config(args: &Args) -> Result<RxConfig, Box<dyn std::error::Error>> {
    let mut cfg = match &args.config {
        Some(path) => toml_config::from_file(path)?,
        None => RxConfig::default(),
    };

    let defaults = Args::parse_from(["tetra-airscope"]);
    if args.rx_port != defaults.rx_port {
        cfg.rx_port = args.rx_port;
    }
    if args.event_sink_url != defaults.event_sink_url {
        cfg.event_sink_url = args.event_sink_url.clone();
    }
    if args.packed {
        cfg.packed_input = true;
    }
    if args.debug_level != defaults.debug_level {
        cfg.verbosity = args.debug_level;
    }
    if args.keep_fill_bits {
        cfg.keep_fill_bits = true;
    }
    if args.gsmtap {
        cfg.gsmtap_output = true;
    }
    Ok(cfg)
}

fn main() -> ExitCode {
    // help and option errors both leave with a non-zero code
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    let cfg = match build_config(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = debug::setup_logging_default(cfg.verbosity, cfg.debug_log.clone());
    tracing::info!("tetra-airscope {}", STACK_VERSION);
    tracing::info!("Destination: {}", cfg.event_sink_url);

    let sink = match ZmqSink::connect(&cfg.event_sink_url) {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("Couldn't connect event sink {}: {}", cfg.event_sink_url, e);
            return ExitCode::FAILURE;
        }
    };

    let socket = match UdpSocket::bind(("0.0.0.0", cfg.rx_port)) {
        Ok(socket) => socket,
        Err(e) => {
            eprintln!("Couldn't bind input socket on port {}: {}", cfg.rx_port, e);
            return ExitCode::FAILURE;
        }
    };
    // poll so Ctrl-C is honored even while no symbols arrive
    socket
        .set_read_timeout(Some(Duration::from_millis(250)))
        .expect("set_read_timeout");
    tracing::info!("Input socket on port {}", cfg.rx_port);

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("failed to set Ctrl+C handler");

    let mut stack = RxStack::new(&cfg, Box::new(sink));

    let mut rx_buf = [0u8; 1024];
    while running.load(Ordering::SeqCst) {
        let bytes_read = match socket.recv(&mut rx_buf) {
            Ok(n) => n,
            Err(e) if matches!(e.kind(), std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut) => {
                // no data yet
                continue;
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                continue;
            }
            Err(e) => {
                tracing::error!("read error: {}", e);
                break;
            }
        };

        if bytes_read == 0 {
            // zero-length datagram signals end of stream
            break;
        }

        // symbols go into the decoder one bit at a time
        for &byte in &rx_buf[..bytes_read] {
            if cfg.packed_input {
                // packed bytes carry eight symbol bits MSB-first
                for idx in (0..8).rev() {
                    stack.rx_symbol((byte >> idx) & 1);
                }
            } else {
                stack.rx_symbol(byte);
            }
        }
    }

    tracing::info!("Clean exit");
    ExitCode::SUCCESS
}
