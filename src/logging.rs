//! Diagnostic logging
//!
//! `tracing` events go to stderr so they never mix with operator output on
//! stdout. `SHIPIT_LOG` takes an `EnvFilter` directive and wins over `-v`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "SHIPIT_LOG";

/// Filter directive for a `-v` count.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "shipit=warn",
        1 => "shipit=info",
        2 => "shipit=debug",
        _ => "shipit=trace",
    }
}

pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .compact();

    // A subscriber may already be installed (tests, embedding callers).
    if let Err(e) = tracing_subscriber::registry().with(filter).with(layer).try_init() {
        eprintln!("logging disabled: {}", e);
    }
}
