use crate::metrics::{MetricSink, normalize_point};
use crate::query::{QueryOutcome, QueryRunner};
use chrono::Utc;
use std::sync::Arc;
use tracing::info_span;
use tracing_futures::Instrument as _;

/// State for one collection run: created empty, threaded through every
/// collector, consumed once the metrics are printed or evaluated.
pub struct RunContext {
    runner: Arc<dyn QueryRunner>,
    database: String,
    sink: MetricSink,
    server_version: f64,
    timestamp: i64,
}

impl RunContext {
    #[must_use]
    pub fn new(runner: Arc<dyn QueryRunner>, database: impl Into<String>) -> Self {
        Self {
            runner,
            database: database.into(),
            sink: MetricSink::new(),
            server_version: 0.0,
            timestamp: Utc::now().timestamp(),
        }
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub const fn sink(&self) -> &MetricSink {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut MetricSink {
        &mut self.sink
    }

    /// Server version parsed during this run, `0.0` until known.
    #[must_use]
    pub const fn server_version(&self) -> f64 {
        self.server_version
    }

    pub fn set_server_version(&mut self, version: f64) {
        self.server_version = version;
    }

    /// Unix timestamp fixed when the run started, shared by every emitted line.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub async fn query(&self, sql: &str) -> QueryOutcome {
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.name = %self.database,
            db.statement = sql,
            otel.kind = "client"
        );

        self.runner.run(sql).instrument(span).await
    }
}

/// Which points a collector produced and which it could not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectReport {
    pub produced: Vec<String>,
    pub failed: Vec<String>,
}

impl CollectReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn produced(&mut self, point: impl Into<String>) {
        self.produced.push(point.into());
    }

    pub fn failed(&mut self, point: &str) {
        self.failed.push(normalize_point(point));
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
