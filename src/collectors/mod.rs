use futures::future::BoxFuture;
use std::collections::HashMap;

#[macro_use]
mod register_macro;

pub mod config;
pub mod context;
pub mod registry;
pub mod util;

pub use context::{CollectReport, RunContext};

pub trait Collector {
    fn name(&self) -> &'static str;

    /// Run the domain's queries, appending what they produce to the run's sink.
    ///
    /// Query failures never abort the run; the report lists which points were
    /// produced and which could not be.
    fn collect<'a>(&'a self, ctx: &'a mut RunContext) -> BoxFuture<'a, CollectReport>;
}

register_collectors! {
    version => VersionCollector,
    bgwriter => BgwriterCollector,
    connections => ConnectionsCollector,
    locks => LocksCollector,
    replication => ReplicationCollector,
    size => SizeCollector,
    statsdb => StatsDbCollector,
    statsio => StatsIoCollector,
    statstable => StatsTableCollector,
}
