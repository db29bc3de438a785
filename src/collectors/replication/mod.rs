use crate::collectors::util::single_value;
use crate::collectors::version::VersionCollector;
use crate::collectors::{CollectReport, Collector, RunContext};
use futures::future::BoxFuture;
use tracing::{debug, instrument};

pub mod topology;
pub use topology::{ReplicationProbe, ReplicationRole, ReplicationType};

/// WAL bytes between the current position and what logical subscribers confirmed.
pub const LOGICAL_DELAY_QUERY: &str = "SELECT (pg_current_wal_lsn() - confirmed_flush_lsn) \
     AS lsn_distance FROM pg_replication_slots;";

/// Milliseconds since the last replayed transaction on a server in recovery.
pub const PHYSICAL_DELAY_QUERY: &str =
    "select (extract(epoch from (now()-pg_last_xact_replay_timestamp()))*1000)::bigint \
     as replication_delay;";

/// Replication delay plus the inferred role and type.
///
/// `replication.role` and `replication.type` are only reported once the
/// server version is known; the version is fetched here if no earlier
/// collector did.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReplicationCollector;

impl ReplicationCollector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Collector for ReplicationCollector {
    fn name(&self) -> &'static str {
        "replication"
    }

    #[instrument(skip(self, ctx), level = "info", fields(collector = "replication"))]
    fn collect<'a>(&'a self, ctx: &'a mut RunContext) -> BoxFuture<'a, CollectReport> {
        Box::pin(async move {
            let mut report = CollectReport::new();
            let probe = ReplicationProbe::run(ctx).await;

            if probe.is_logical_publisher {
                single_value(ctx, &mut report, "replication.delay", LOGICAL_DELAY_QUERY).await;
            }

            if probe.in_recovery_mode {
                single_value(ctx, &mut report, "replication.delay", PHYSICAL_DELAY_QUERY).await;
            }

            if ctx.server_version() <= 0.0 {
                VersionCollector::refresh(ctx, &mut report).await;
            }

            if ctx.server_version() > 0.0 {
                let role = probe.role();
                let kind = probe.replication_type();
                debug!(?role, ?kind, "determined replication topology");

                let point = ctx
                    .sink_mut()
                    .push("replication.role", &role.code().to_string());
                report.produced(point);

                let point = ctx
                    .sink_mut()
                    .push("replication.type", &kind.code().to_string());
                report.produced(point);
            } else {
                debug!("server version unknown; skipping replication role and type");
                report.failed("replication.role");
                report.failed("replication.type");
            }

            report
        })
    }
}
