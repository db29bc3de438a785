use crate::collectors::COLLECTOR_NAMES;
use clap::{Arg, Command};

/// `--metrics` selects the domains for a metrics run; `--check` narrows a
/// run to one point and evaluates it against the thresholds.
#[must_use]
pub fn add_collectors_args(cmd: Command) -> Command {
    let names = COLLECTOR_NAMES.join(", ");

    cmd.arg(
        Arg::new("metrics")
            .short('m')
            .long("metrics")
            .env("METRICS")
            .num_args(1..)
            .value_delimiter(',')
            .default_values(COLLECTOR_NAMES.iter().copied())
            .help(format!("Metrics to collect, any of: {names}")),
    )
    .arg(
        Arg::new("check")
            .short('k')
            .long("check")
            .env("CHECK")
            .help(format!(
                "Run check for a specific metric, <domain> or <domain>.<point> \
                 where domain is one of: {names}"
            )),
    )
}
