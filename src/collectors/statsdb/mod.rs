use crate::collectors::util::{ColumnQuery, multi_column, sql_literal};
use crate::collectors::{CollectReport, Collector, RunContext};
use futures::future::BoxFuture;
use tracing::instrument;

pub const STATSDB_COLUMNS: &[&str] = &[
    "numbackends",
    "xact_commit",
    "xact_rollback",
    "blks_read",
    "blks_hit",
    "tup_returned",
    "tup_fetched",
    "tup_inserted",
    "tup_updated",
    "tup_deleted",
    "conflicts",
    "temp_files",
    "temp_bytes",
    "deadlocks",
    "blk_read_time",
    "blk_write_time",
];

/// The configured database's row in `pg_stat_database`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatsDbCollector;

impl StatsDbCollector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn query(database: &str) -> ColumnQuery<'static> {
        ColumnQuery {
            table: "pg_stat_database",
            filter: Some(format!("datname = {}", sql_literal(database))),
            aggregate: None,
            columns: STATSDB_COLUMNS,
        }
    }
}

impl Collector for StatsDbCollector {
    fn name(&self) -> &'static str {
        "statsdb"
    }

    #[instrument(skip(self, ctx), level = "info", fields(collector = "statsdb"))]
    fn collect<'a>(&'a self, ctx: &'a mut RunContext) -> BoxFuture<'a, CollectReport> {
        Box::pin(async move {
            let mut report = CollectReport::new();
            let prefix = format!("statsdb.{}.", ctx.database());
            let query = Self::query(ctx.database());

            multi_column(ctx, &mut report, &prefix, &query).await;

            report
        })
    }
}
