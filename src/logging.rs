//! Logging initialization

use tracing::Level;
use tracing_subscriber::fmt;

/// Install a stderr subscriber at `level`.
///
/// Returns `false` when the host program already installed a global
/// subscriber; that one stays in place.
pub fn init_logging(level: Level) -> bool {
    let installed = fmt::Subscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr) // stdout carries the records
        .try_init()
        .is_ok();

    if !installed {
        tracing::debug!("keeping existing tracing subscriber");
    }
    installed
}
