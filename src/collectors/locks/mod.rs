use crate::collectors::util::{multi_row, sql_literal};
use crate::collectors::{CollectReport, Collector, RunContext};
use crate::metrics::normalize_point;
use futures::future::BoxFuture;
use tracing::{debug, instrument};

/// Lock counts per mode from `pg_locks`, plus their total.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocksCollector;

impl LocksCollector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[must_use]
pub fn locks_query(database: &str) -> String {
    format!(
        "select mode, count(mode) as count from pg_locks where database = \
         (select oid from pg_database where datname = {}) group by mode;",
        sql_literal(database)
    )
}

impl Collector for LocksCollector {
    fn name(&self) -> &'static str {
        "locks"
    }

    #[instrument(skip(self, ctx), level = "info", fields(collector = "locks"))]
    fn collect<'a>(&'a self, ctx: &'a mut RunContext) -> BoxFuture<'a, CollectReport> {
        Box::pin(async move {
            let mut report = CollectReport::new();
            let prefix = normalize_point(&format!("locks.{}.", ctx.database()));
            let total_point = format!("{prefix}total");
            let sql = locks_query(ctx.database());

            multi_row(ctx, &mut report, &prefix, &sql).await;

            // total is derived from the per-mode points already in the sink
            let total = ctx.sink().sum_prefix(&prefix, &total_point);
            debug!(total, "summed lock modes");
            let point = ctx.sink_mut().push(&total_point, &format!("{total:.6}"));
            report.produced(point);

            report
        })
    }
}
