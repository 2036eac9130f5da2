//! Process-wide observability state, initialized once at startup. Pipeline
//! components emit `tracing` events and never configure logging themselves.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Verbosity maps from repeated `-v`
/// flags; `RUST_LOG` overrides when set.
pub fn init(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("port_lineup={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
