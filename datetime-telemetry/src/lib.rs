//! Tracing setup shared by the binaries.
//!
//! Logs go to stderr so that stdout stays reserved for JSON results.

#![warn(missing_docs, clippy::pedantic)]

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber once for the process.
///
/// The filter is read from `RUST_LOG` and falls back to [`DEFAULT_FILTER`].
/// Later calls are no-ops, as are calls made after another subscriber was
/// installed.
pub fn init_tracing() {
    TRACING_INIT.get_or_init(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let result = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init();

        if let Err(err) = result {
            eprintln!("tracing init skipped: {err}");
        }
        tracing::debug!("tracing initialised");
    });
}

#[cfg(test)]
mod tests {
    use super::init_tracing;

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
        tracing::info!("still logging");
    }
}
