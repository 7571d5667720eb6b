//! Shared helpers: score math and logging setup.

mod scores;

pub use scores::{softmax, top1};

use tracing_subscriber::EnvFilter;

/// Initializes tracing with an env-filter (`RUST_LOG`), defaulting to `info`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
