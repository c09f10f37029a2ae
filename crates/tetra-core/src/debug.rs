use std::fs::OpenOptions;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt as tracingfmt};

/// if `cond` is false, logs a warning with your message.
#[macro_export]
macro_rules! assert_warn {
    ($cond:expr, $($arg:tt)+) => {{
        if !$cond {
            tracing::warn!(
                target: module_path!(),
                "assertion warning: `{}` failed: {} at {}:{}",
                stringify!($cond),
                format_args!($($arg)+),
                file!(),
                line!(),
            );
        }
    }};
}

static INIT_LOG: Once = Once::new();

/// Map the CLI `-d 0..4` verbosity to a subscriber filter. The decode
/// pipeline logs per-burst detail at debug/trace; level 1 keeps only the
/// per-PDU summary lines.
fn filter_for_verbosity(verbosity: u8) -> EnvFilter {
    let base = match verbosity {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::new(base);
    if verbosity == 3 {
        // level 3: full protocol detail without the bit-level firehose
        filter
            .add_directive("tetra_core::bitbuffer=debug".parse().unwrap())
            .add_directive("tetra_entities::lmac=debug".parse().unwrap())
    } else {
        filter
    }
}

/// Sets up logging with maximum verbosity (trace level).
/// Mainly for unit tests.
pub fn setup_logging_verbose() {
    setup_logging(EnvFilter::new("trace"), None);
}

/// Sets up stderr logging for the given verbosity and optionally a verbose
/// log file. Returns a guard that must be kept alive for the file writer.
pub fn setup_logging_default(verbosity: u8, verbose_logfile: Option<String>) -> Option<WorkerGuard> {
    let logfile = verbose_logfile.map(|file| (file, EnvFilter::new("debug")));
    setup_logging(filter_for_verbosity(verbosity), logfile)
}

fn setup_logging(stderr_filter: EnvFilter, outfile: Option<(String, EnvFilter)>) -> Option<WorkerGuard> {
    if let Some((outfile, outfile_filter)) = outfile {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(outfile)
            .expect("Failed to open log file");
        let (file_writer, guard) = tracing_appender::non_blocking(file);

        INIT_LOG.call_once(|| {
            let file_layer = tracingfmt::layer()
                .with_writer(file_writer)
                .with_ansi(false);
            let stderr_layer = tracingfmt::layer()
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(file_layer.with_filter(outfile_filter))
                .with(stderr_layer.with_filter(stderr_filter))
                .init();
        });
        Some(guard)
    } else {
        INIT_LOG.call_once(|| {
            let stderr_layer = tracingfmt::layer()
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(stderr_layer.with_filter(stderr_filter))
                .init();
        });
        None
    }
}
