use crate::collectors::util::{single_value, sql_literal};
use crate::collectors::{CollectReport, Collector, RunContext};
use futures::future::BoxFuture;
use tracing::instrument;

/// `pg_stat_activity.state` values reported individually.
pub const CONNECTION_STATES: &[&str] = &[
    "active",
    "disabled",
    "idle",
    "idle in transaction",
    "idle in transaction (aborted)",
    "fastpath function call",
];

/// Backend counts from `pg_stat_activity`: total, waiting and one per state.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConnectionsCollector;

impl ConnectionsCollector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Point segment for a state: `idle in transaction (aborted)` -> `idle_in_transaction_aborted`.
#[must_use]
pub fn state_point(state: &str) -> String {
    state.replace(' ', "_").replace(['(', ')'], "")
}

impl Collector for ConnectionsCollector {
    fn name(&self) -> &'static str {
        "connections"
    }

    #[instrument(skip(self, ctx), level = "info", fields(collector = "connections"))]
    fn collect<'a>(&'a self, ctx: &'a mut RunContext) -> BoxFuture<'a, CollectReport> {
        Box::pin(async move {
            let mut report = CollectReport::new();
            let prefix = format!("connections.{}.", ctx.database());

            single_value(
                ctx,
                &mut report,
                &format!("{prefix}total"),
                "select count(*) from pg_stat_activity;",
            )
            .await;

            single_value(
                ctx,
                &mut report,
                &format!("{prefix}waiting"),
                "select count(*) from pg_stat_activity where wait_event_type is not null;",
            )
            .await;

            for state in CONNECTION_STATES {
                let sql = format!(
                    "select count(*) from pg_stat_activity where state = {};",
                    sql_literal(state)
                );
                single_value(ctx, &mut report, &format!("{prefix}{}", state_point(state)), &sql)
                    .await;
            }

            report
        })
    }
}
