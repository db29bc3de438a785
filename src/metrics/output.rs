use super::MetricSink;
use anyhow::{Result, anyhow};
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use sysinfo::System;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `<namespace>.<point> <value> <timestamp>`
    #[default]
    Graphite,
    /// One JSON object per line.
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "graphite" => Ok(Self::Graphite),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("unsupported output format: {other}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graphite => f.write_str("graphite"),
            Self::Json => f.write_str("json"),
        }
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    name: String,
    value: &'a str,
    timestamp: i64,
}

/// Where and how collected metrics are printed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output {
    namespace: String,
    format: OutputFormat,
}

impl Output {
    #[must_use]
    pub fn new(namespace: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            namespace: namespace.into(),
            format,
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Same format, no namespace prefix.
    #[must_use]
    pub fn without_namespace(&self) -> Self {
        Self::new(String::new(), self.format)
    }

    fn qualified(&self, point: &str) -> String {
        if self.namespace.is_empty() {
            point.to_string()
        } else {
            format!("{}.{point}", self.namespace)
        }
    }

    /// Print every metric with the run's timestamp, returning how many were written.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or JSON encoding fails.
    pub fn write_metrics<W: Write>(
        &self,
        out: &mut W,
        sink: &MetricSink,
        timestamp: i64,
    ) -> Result<usize> {
        let mut count = 0;

        for metric in sink.iter() {
            let name = self.qualified(&metric.point);
            match self.format {
                OutputFormat::Graphite => {
                    writeln!(out, "{name} {} {timestamp}", metric.value)?;
                }
                OutputFormat::Json => {
                    let line = serde_json::to_string(&JsonLine {
                        name,
                        value: &metric.value,
                        timestamp,
                    })?;
                    writeln!(out, "{line}")?;
                }
            }
            count += 1;
        }

        Ok(count)
    }
}

/// `<host>.postgresql`, with dots in the host name replaced so the host stays
/// a single path segment.
#[must_use]
pub fn default_namespace() -> String {
    namespace_for_host(&System::host_name().unwrap_or_default())
}

#[must_use]
pub fn namespace_for_host(host: &str) -> String {
    let host = host.trim().replace('.', "-");
    if host.is_empty() {
        "postgresql".to_string()
    } else {
        format!("{host}.postgresql")
    }
}
