//! Log output for embedding hosts.
//!
//! The library only emits `tracing` events. Hosts that do not install their
//! own subscriber can call [`init_logging`] once at startup; verbosity is then
//! controlled through `RUST_LOG`.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a formatting subscriber filtered by `RUST_LOG`.
///
/// Returns false if a global subscriber was already set.
pub fn init_logging() -> bool {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}
