//! Shared `tracing` setup for the piodata front-ends.
//!
//! Diagnostics always go to stderr: stdout carries the single status line that
//! build orchestrators read.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset or invalid.
///
/// Targets are matched by prefix, so this covers every `piodata_*` crate and keeps
/// host-process crates (e.g. pyo3) quiet.
pub const C_DEFAULT_DIRECTIVE: &str = "piodata=warn";

/// Build the env filter: `RUST_LOG` first, `default_directive` otherwise.
pub fn build_env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed (e.g. a host process or
/// a previous call); that is not an error.
pub fn init(default_directive: &str) -> bool {
    tracing_subscriber::registry()
        .with(build_env_filter(default_directive))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_line_number(true),
        )
        .try_init()
        .is_ok()
}
