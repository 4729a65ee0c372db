//! Tracing subscriber setup

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_DIRECTIVE: &str = "finance_tracker=warn";

static TRACING_INIT: Once = Once::new();

/// Install the fmt subscriber on stderr. Safe to call more than once.
pub fn init() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // A test harness may already have installed a global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
