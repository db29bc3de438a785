use crate::collectors::{
    COLLECTOR_NAMES, CollectReport, Collector, CollectorType, RunContext, all_factories,
};
use anyhow::{Result, anyhow};
use tracing::{debug, info_span};
use tracing_futures::Instrument as _;

/// The collectors selected for one run, resolved from catalog keys up front
/// so an unknown name fails before any query executes.
#[derive(Clone, Debug)]
pub struct CollectorRegistry {
    collectors: Vec<CollectorType>,
}

impl CollectorRegistry {
    /// # Errors
    ///
    /// Returns an error naming the first entry that is not a catalog key.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let factories = all_factories();

        let collectors = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                factories
                    .get(name)
                    .map(|factory| factory())
                    .ok_or_else(|| anyhow!("point not supported: {name}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { collectors })
    }

    /// Every collector in catalog order.
    ///
    /// # Errors
    ///
    /// Never in practice; the catalog keys always resolve.
    pub fn all() -> Result<Self> {
        Self::new(COLLECTOR_NAMES)
    }

    /// Only the collector owning `point`'s domain.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is not a catalog key.
    pub fn for_point(point: &str) -> Result<Self> {
        Self::new(&[point_domain(point)])
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.collectors.iter().map(Collector::name).collect()
    }

    /// Run the selected collectors in order against one context.
    pub async fn collect(&self, ctx: &mut RunContext) -> Vec<(&'static str, CollectReport)> {
        let mut reports = Vec::with_capacity(self.collectors.len());

        for collector in &self.collectors {
            let name = collector.name();
            let span = info_span!("collector.collect", collector = name);
            let report = collector.collect(ctx).instrument(span).await;

            debug!(
                collector = name,
                produced = report.produced.len(),
                failed = ?report.failed,
                "collector finished"
            );
            reports.push((name, report));
        }

        reports
    }
}

/// Domain of a dot-qualified point: `connections.sensu.total` -> `connections`.
#[must_use]
pub fn point_domain(point: &str) -> &str {
    point.split('.').next().unwrap_or(point)
}
