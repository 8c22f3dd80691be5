//! Diagnostics on stderr.
//!
//! Stdout is reserved for the results table, so the fmt subscriber writes to
//! stderr. `RUST_LOG` directives are honoured on top of the default level.

use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Calling it again is harmless: the second subscriber is silently dropped.
pub fn enable_logs(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
