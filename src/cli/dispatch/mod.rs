use crate::{
    check::Threshold,
    cli::{actions::Action, commands},
    collectors::{COLLECTOR_NAMES, config::CollectorConfig, registry::point_domain},
    metrics::output::{Output, OutputFormat, default_namespace},
};
use anyhow::{Result, anyhow};
use clap::{ArgMatches, error::ErrorKind};
use std::{ffi::OsString, time::Duration};
use tracing::debug;

/// Parse `args` against the command definition.
///
/// Help and version requests print and exit with status 0. Any other usage
/// error is returned like a validation error, so it exits with the same
/// status.
///
/// # Errors
///
/// Returns clap's message, without its `error: ` prefix, for unknown flags
/// and values that fail to parse.
pub fn parse<I, T>(args: I) -> Result<ArgMatches>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    commands::new()
        .try_get_matches_from(args)
        .or_else(|e| match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let rendered = e.to_string();
                Err(anyhow!(
                    "{}",
                    rendered.trim_end().trim_start_matches("error: ")
                ))
            }
        })
}

/// Validate the parsed arguments into an [`Action`]. Nothing here touches the
/// database, so every configuration error surfaces before the first query.
///
/// # Errors
///
/// Returns an error if a required value is missing, the thresholds are
/// inverted, or a requested check/metric is not in the catalog.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let database = trimmed(matches, "database");
    if database.is_empty() {
        return Err(anyhow!(
            "--database or DATABASE_NAME environment variable is required"
        ));
    }

    let check = trimmed(matches, "check");

    let username = trimmed(matches, "username");
    if username.is_empty() {
        return Err(anyhow!(
            "--username or USER_NAME environment variable is required"
        ));
    }

    let config = CollectorConfig::new(database, username)
        .with_psql(trimmed(matches, "psql"))
        .with_query_timeout(
            matches
                .get_one::<u64>("query-timeout")
                .map(|secs| Duration::from_secs(*secs)),
        );

    let output = get_output(matches)?;

    debug!(
        database = config.database(),
        username = config.username(),
        psql = config.psql(),
        "configuration"
    );

    if !check.is_empty() {
        let warning = matches
            .get_one::<f64>("warning")
            .copied()
            .ok_or_else(|| anyhow!("--warning threshold is required"))?;
        let critical = matches
            .get_one::<f64>("critical")
            .copied()
            .ok_or_else(|| anyhow!("--critical threshold is required"))?;
        let threshold = Threshold::new(warning, critical)?;

        if !COLLECTOR_NAMES.contains(&point_domain(&check)) {
            return Err(anyhow!("--check is not supported: {check}"));
        }

        debug!(check = %check, warning, critical, "check mode");

        return Ok(Action::Check {
            config,
            output,
            point: check,
            threshold,
        });
    }

    Ok(Action::Collect {
        config,
        output,
        domains: get_enabled_collectors(matches)?,
    })
}

fn trimmed(matches: &ArgMatches, id: &str) -> String {
    matches
        .get_one::<String>(id)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn get_output(matches: &ArgMatches) -> Result<Output> {
    let format = matches
        .get_one::<String>("output")
        .map_or(Ok(OutputFormat::default()), |s| s.parse::<OutputFormat>())?;

    let namespace = matches
        .get_one::<String>("namespace")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default_namespace);

    Ok(Output::new(namespace, format))
}

/// Domains requested with `--metrics`, in the order given.
///
/// # Errors
///
/// Returns an error naming the first entry that is not a catalog key.
pub fn get_enabled_collectors(matches: &ArgMatches) -> Result<Vec<String>> {
    let metrics: Vec<String> = matches
        .get_many::<String>("metrics")
        .map(|vals| {
            vals.map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if let Some(unknown) = metrics
        .iter()
        .find(|metric| !COLLECTOR_NAMES.contains(&metric.as_str()))
    {
        return Err(anyhow!("--metrics not supported: {unknown}"));
    }

    debug!(?metrics, "metrics mode");

    Ok(metrics)
}
