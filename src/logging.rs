//! Diagnostic logging setup
//!
//! Logs go to stderr so they never mix with command output. `RUST_LOG`
//! wins when set; otherwise the level is `warn`, or `debug` with `--verbose`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact();

    tracing_subscriber::registry()
        .with(filter(verbose)?)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "ccsync=debug"
    } else {
        "warn"
    }
}

fn filter(verbose: bool) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_directive(verbose)))
}
