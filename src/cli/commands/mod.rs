pub mod collectors;

use clap::{Arg, ArgAction, Command, builder::PossibleValuesParser, value_parser};

pub const DEFAULT_DATABASE: &str = "sensu";
pub const DEFAULT_USERNAME: &str = "sensu";

#[must_use]
pub fn new() -> Command {
    let cmd = Command::new(env!("CARGO_PKG_NAME"))
        .about("PostgreSQL check and metrics")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("database")
                .short('d')
                .long("database")
                .env("DATABASE_NAME")
                .default_value(DEFAULT_DATABASE)
                .help("Database to collect metrics"),
        )
        .arg(
            Arg::new("username")
                .short('u')
                .long("username")
                .env("USER_NAME")
                .default_value(DEFAULT_USERNAME)
                .help("Postgres user to gather metrics"),
        )
        .arg(
            Arg::new("warning")
                .short('w')
                .long("warning")
                .env("WARNING")
                .default_value("85")
                .value_parser(value_parser!(f64))
                .help("Warning threshold for specific metric check"),
        )
        .arg(
            Arg::new("critical")
                .short('c')
                .long("critical")
                .env("CRITICAL")
                .default_value("95")
                .value_parser(value_parser!(f64))
                .help("Critical threshold for specific metric check"),
        )
        .arg(
            Arg::new("debug")
                .short('l')
                .long("debug")
                .env("DEBUG")
                .action(ArgAction::SetTrue)
                .help("Print debug log messages"),
        )
        .arg(
            Arg::new("psql")
                .long("psql")
                .env("PSQL_PATH")
                .default_value("psql")
                .help("psql binary used to run queries"),
        )
        .arg(
            Arg::new("query-timeout")
                .long("query-timeout")
                .env("QUERY_TIMEOUT")
                .value_parser(value_parser!(u64).range(1..))
                .help("Seconds to wait for each query before giving up"),
        )
        .arg(
            Arg::new("namespace")
                .long("namespace")
                .env("METRICS_NAMESPACE")
                .help("Prefix for metric lines [default: <hostname>.postgresql]"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .env("OUTPUT_FORMAT")
                .default_value("graphite")
                .value_parser(PossibleValuesParser::new(["graphite", "json"]))
                .help("Metric output format"),
        );

    collectors::add_collectors_args(cmd)
}
