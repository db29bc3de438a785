use crate::collectors::util::parse_server_version;
use crate::collectors::{CollectReport, Collector, RunContext};
use crate::query::QueryOutcome;
use futures::future::BoxFuture;
use tracing::{debug, instrument};

pub const SERVER_VERSION_QUERY: &str = "show server_version;";

/// Reports the server version and records it on the run context, where it
/// gates the replication role/type points.
#[derive(Clone, Copy, Debug, Default)]
pub struct VersionCollector;

impl VersionCollector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Query `server_version`, remember the numeric part and add the `version` point.
    pub async fn refresh(ctx: &mut RunContext, report: &mut CollectReport) {
        match ctx.query(SERVER_VERSION_QUERY).await {
            QueryOutcome::Text(text) => {
                let version = parse_server_version(&text);
                ctx.set_server_version(version);
                let point = ctx.sink_mut().push("version", &format!("{version:.6}"));
                report.produced(point);
            }
            QueryOutcome::Failure(reason) => {
                debug!(%reason, "failed to read server version");
                report.failed("version");
            }
        }
    }
}

impl Collector for VersionCollector {
    fn name(&self) -> &'static str {
        "version"
    }

    #[instrument(skip(self, ctx), level = "info", fields(collector = "version"))]
    fn collect<'a>(&'a self, ctx: &'a mut RunContext) -> BoxFuture<'a, CollectReport> {
        Box::pin(async move {
            let mut report = CollectReport::new();
            Self::refresh(ctx, &mut report).await;
            report
        })
    }
}
