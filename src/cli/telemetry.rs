use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr; stdout is reserved for
/// metric lines and check verdicts.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(debug: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}

fn filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}
