//! Diagnostic logging setup
//!
//! Installs a `tracing` subscriber that writes to stderr so balance output on
//! stdout stays machine-readable.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Initialize the global subscriber once
///
/// `RUST_LOG` wins over `default_filter`; `verbose` forces debug output for
/// this crate.
pub fn init(default_filter: &str, verbose: bool) {
    TRACING_INIT.call_once(|| {
        let directive = if verbose {
            "splitledger=debug"
        } else {
            default_filter
        };

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(directive))
            .unwrap_or_else(|_| EnvFilter::new("splitledger=info"));

        // Another subscriber may already be installed (e.g. by a test harness)
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();

        tracing::debug!("tracing initialized");
    });
}
