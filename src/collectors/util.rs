//! Shared result parsers for collectors:
//! - single value: one point from one scalar query.
//! - multi column: one row, fields zipped positionally with column names.
//! - multi row: `key|value` rows, one point per row.
//!
//! Query failures are logged at debug and recorded as failed points; they
//! never produce a metric.

use crate::collectors::context::{CollectReport, RunContext};
use crate::query::QueryOutcome;
use once_cell::sync::OnceCell;
use regex::Regex;
use tracing::{debug, warn};

/// Field separator in tuples-only, unaligned output.
pub const FIELD_SEPARATOR: char = '|';

/// Quote `value` as a SQL string literal.
#[must_use]
pub fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Leading numeric token of a `server_version` string.
/// e.g. "13.4 (Debian 13.4-1.pgdg100+1)" -> 13.4, "9.6.24" -> 9.6, "16devel" -> 16.
/// Returns 0 if there is none.
///
/// # Panics
///
/// Panics if the regex cannot be compiled (should never happen).
#[must_use]
pub fn parse_server_version(version_string: &str) -> f64 {
    static RE: OnceCell<Regex> = OnceCell::new();
    let re = RE.get_or_init(|| {
        #[allow(clippy::expect_used)]
        Regex::new(r"^\s*(\d+(?:\.\d+)?)").expect("Invalid regex")
    });

    re.captures(version_string)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// A single-row `SELECT` over a statistics view.
#[derive(Clone, Debug)]
pub struct ColumnQuery<'a> {
    pub table: &'a str,
    /// Condition for the `where` clause, if any.
    pub filter: Option<String>,
    /// Aggregate wrapped around every column, e.g. `sum`.
    pub aggregate: Option<&'a str>,
    pub columns: &'a [&'a str],
}

impl ColumnQuery<'_> {
    #[must_use]
    pub fn sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|column| match self.aggregate {
                Some(aggregate) => format!("{aggregate}({column})"),
                None => (*column).to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");

        match &self.filter {
            Some(filter) => format!("select {columns} from {} where {filter};", self.table),
            None => format!("select {columns} from {};", self.table),
        }
    }
}

/// Zip the first row's fields with `columns`.
///
/// Returns `None` when the row has fewer fields than columns; extra fields
/// are ignored.
#[must_use]
pub fn split_columns<'t, 'c>(
    text: &'t str,
    columns: &[&'c str],
) -> Option<Vec<(&'c str, &'t str)>> {
    let row = text.lines().next().unwrap_or("");
    let fields: Vec<&str> = row.split(FIELD_SEPARATOR).collect();

    if fields.len() < columns.len() {
        return None;
    }

    Some(columns.iter().copied().zip(fields).collect())
}

/// Split `key|value` rows. Blank lines are ignored; rows without a separator
/// are returned separately so the caller can report them.
#[must_use]
pub fn split_rows(text: &str) -> (Vec<(&str, &str)>, Vec<&str>) {
    let mut rows = Vec::new();
    let mut malformed = Vec::new();

    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        match line.split_once(FIELD_SEPARATOR) {
            Some((key, value)) => rows.push((key, value)),
            None => malformed.push(line),
        }
    }

    (rows, malformed)
}

/// Store the query's first row as `point`; empty output is stored as `"0"`.
pub async fn single_value(
    ctx: &mut RunContext,
    report: &mut CollectReport,
    point: &str,
    sql: &str,
) {
    match ctx.query(sql).await {
        QueryOutcome::Text(text) => {
            let mut lines = text.lines();
            let value = lines.next().unwrap_or("");
            if lines.next().is_some() {
                debug!(point, "query returned more than one row; keeping the first");
            }
            let point = ctx.sink_mut().push(point, value);
            report.produced(point);
        }
        QueryOutcome::Failure(reason) => {
            debug!(point, %reason, "query failed; skipping metric");
            report.failed(point);
        }
    }
}

/// Store one point per column as `prefix + column`.
pub async fn multi_column(
    ctx: &mut RunContext,
    report: &mut CollectReport,
    prefix: &str,
    query: &ColumnQuery<'_>,
) {
    let text = match ctx.query(&query.sql()).await {
        QueryOutcome::Text(text) => text,
        QueryOutcome::Failure(reason) => {
            debug!(prefix, %reason, "query failed; skipping metrics");
            for column in query.columns {
                report.failed(&format!("{prefix}{column}"));
            }
            return;
        }
    };

    let Some(pairs) = split_columns(&text, query.columns) else {
        warn!(
            prefix,
            table = query.table,
            expected = query.columns.len(),
            result = %text,
            "result row has fewer fields than columns; skipping metrics"
        );
        for column in query.columns {
            report.failed(&format!("{prefix}{column}"));
        }
        return;
    };

    for (column, value) in pairs {
        let point = ctx.sink_mut().push(&format!("{prefix}{column}"), value);
        report.produced(point);
    }
}

/// Store one point per `key|value` row as `prefix + lowercase(key)`.
pub async fn multi_row(ctx: &mut RunContext, report: &mut CollectReport, prefix: &str, sql: &str) {
    let text = match ctx.query(sql).await {
        QueryOutcome::Text(text) => text,
        QueryOutcome::Failure(reason) => {
            debug!(prefix, %reason, "query failed; skipping metrics");
            report.failed(&format!("{prefix}*"));
            return;
        }
    };

    let (rows, malformed) = split_rows(&text);
    for line in malformed {
        warn!(prefix, row = line, "row has no field separator; skipping");
    }

    for (key, value) in rows {
        let point = ctx.sink_mut().push(&format!("{prefix}{key}"), value);
        report.produced(point);
    }
}
