//! `tracing` subscriber setup.

use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Install a formatting subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = fmt().with_env_filter(filter).with_target(true).try_init();
    if installed.is_ok() {
        debug!("tracing subscriber installed");
    }
}
