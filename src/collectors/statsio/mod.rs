use crate::collectors::util::{ColumnQuery, multi_column};
use crate::collectors::{CollectReport, Collector, RunContext};
use futures::future::BoxFuture;
use tracing::instrument;

pub const STATSIO_COLUMNS: &[&str] = &[
    "heap_blks_read",
    "heap_blks_hit",
    "idx_blks_read",
    "idx_blks_hit",
    "toast_blks_read",
    "toast_blks_hit",
    "tidx_blks_read",
    "tidx_blks_hit",
];

/// Block I/O summed over `pg_statio_user_tables`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatsIoCollector;

impl StatsIoCollector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn query() -> ColumnQuery<'static> {
        ColumnQuery {
            table: "pg_statio_user_tables",
            filter: None,
            aggregate: Some("sum"),
            columns: STATSIO_COLUMNS,
        }
    }
}

impl Collector for StatsIoCollector {
    fn name(&self) -> &'static str {
        "statsio"
    }

    #[instrument(skip(self, ctx), level = "info", fields(collector = "statsio"))]
    fn collect<'a>(&'a self, ctx: &'a mut RunContext) -> BoxFuture<'a, CollectReport> {
        Box::pin(async move {
            let mut report = CollectReport::new();
            let prefix = format!("statsio.{}.", ctx.database());

            multi_column(ctx, &mut report, &prefix, &Self::query()).await;

            report
        })
    }
}
