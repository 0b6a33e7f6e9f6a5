//! Tracing setup shared by the gtasks binaries.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for server and CLI binaries, writing to stdout.
///
/// `GTASKS_LOG` takes precedence, then `RUST_LOG`; the given directive is
/// the fallback when neither is set. Safe to call once per process.
pub fn init_tracing(default_directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .init();
}

/// Initialize tracing for stdio transports where stdout carries protocol
/// frames. Log lines go to stderr instead.
pub fn init_stderr_tracing(default_directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_writer(std::io::stderr)
        .init();
}

fn env_filter(default_directive: &str) -> EnvFilter {
    if let Ok(directive) = std::env::var("GTASKS_LOG") {
        if !directive.is_empty() {
            return EnvFilter::new(directive);
        }
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}
