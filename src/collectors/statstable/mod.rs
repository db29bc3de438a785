use crate::collectors::util::{ColumnQuery, multi_column};
use crate::collectors::{CollectReport, Collector, RunContext};
use futures::future::BoxFuture;
use tracing::instrument;

pub const STATSTABLE_COLUMNS: &[&str] = &[
    "seq_scan",
    "seq_tup_read",
    "idx_scan",
    "idx_tup_fetch",
    "n_tup_ins",
    "n_tup_upd",
    "n_tup_del",
    "n_tup_hot_upd",
    "n_live_tup",
    "n_dead_tup",
];

/// Scan and tuple counters summed over `pg_stat_user_tables`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatsTableCollector;

impl StatsTableCollector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn query() -> ColumnQuery<'static> {
        ColumnQuery {
            table: "pg_stat_user_tables",
            filter: None,
            aggregate: Some("sum"),
            columns: STATSTABLE_COLUMNS,
        }
    }
}

impl Collector for StatsTableCollector {
    fn name(&self) -> &'static str {
        "statstable"
    }

    #[instrument(skip(self, ctx), level = "info", fields(collector = "statstable"))]
    fn collect<'a>(&'a self, ctx: &'a mut RunContext) -> BoxFuture<'a, CollectReport> {
        Box::pin(async move {
            let mut report = CollectReport::new();
            let prefix = format!("statstable.{}.", ctx.database());

            multi_column(ctx, &mut report, &prefix, &Self::query()).await;

            report
        })
    }
}
