use crate::collectors::util::{ColumnQuery, multi_column};
use crate::collectors::{CollectReport, Collector, RunContext};
use futures::future::BoxFuture;
use tracing::instrument;

pub const BGWRITER_COLUMNS: &[&str] = &[
    "checkpoints_timed",
    "checkpoints_req",
    "checkpoint_write_time",
    "checkpoint_sync_time",
    "buffers_checkpoint",
    "buffers_clean",
    "maxwritten_clean",
    "buffers_backend",
    "buffers_backend_fsync",
    "buffers_alloc",
];

/// Checkpoint and buffer counters from `pg_stat_bgwriter`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BgwriterCollector;

impl BgwriterCollector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn query() -> ColumnQuery<'static> {
        ColumnQuery {
            table: "pg_stat_bgwriter",
            filter: None,
            aggregate: None,
            columns: BGWRITER_COLUMNS,
        }
    }
}

impl Collector for BgwriterCollector {
    fn name(&self) -> &'static str {
        "bgwriter"
    }

    #[instrument(skip(self, ctx), level = "info", fields(collector = "bgwriter"))]
    fn collect<'a>(&'a self, ctx: &'a mut RunContext) -> BoxFuture<'a, CollectReport> {
        Box::pin(async move {
            let mut report = CollectReport::new();
            multi_column(ctx, &mut report, "bgwriter.", &Self::query()).await;
            report
        })
    }
}
