pub mod actions;
pub mod commands;
pub mod dispatch;
pub mod telemetry;

use crate::cli::actions::Action;
use anyhow::Result;

/// Parse arguments and environment, initialize logging and validate the
/// configuration into an [`Action`].
///
/// # Errors
///
/// Returns an error if the arguments do not parse, logging cannot be
/// initialized, or validation fails.
pub fn start() -> Result<Action> {
    let matches = dispatch::parse(std::env::args_os())?;

    telemetry::init(matches.get_flag("debug"))?;

    dispatch::handler(&matches)
}
