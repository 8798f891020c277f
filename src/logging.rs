//! Logging configuration using tracing
//!
//! Structured logging to stderr, filtered by RUST_LOG or by the CLI verbosity.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the tracing subscriber
///
/// RUST_LOG takes precedence over `verbosity`. Logs go to stderr so state
/// printed on stdout stays machine-readable.
///
/// # Errors
/// Returns an error if the subscriber has already been initialized
pub fn init(verbosity: u8) -> crate::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(|e| {
            crate::ProviderError::Config(format!("Failed to initialize tracing: {}", e))
        })?;

    Ok(())
}

/// Initialize logging for tests (no-op if already initialized)
pub fn init_test() {
    let _ = init(2);
}
