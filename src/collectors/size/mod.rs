use crate::collectors::util::{single_value, sql_literal};
use crate::collectors::{CollectReport, Collector, RunContext};
use futures::future::BoxFuture;
use tracing::instrument;

/// On-disk size of the configured database in bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SizeCollector;

impl SizeCollector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Collector for SizeCollector {
    fn name(&self) -> &'static str {
        "size"
    }

    #[instrument(skip(self, ctx), level = "info", fields(collector = "size"))]
    fn collect<'a>(&'a self, ctx: &'a mut RunContext) -> BoxFuture<'a, CollectReport> {
        Box::pin(async move {
            let mut report = CollectReport::new();
            let point = format!("size.{}", ctx.database());
            let sql = format!("select pg_database_size({});", sql_literal(ctx.database()));

            single_value(ctx, &mut report, &point, &sql).await;

            report
        })
    }
}
