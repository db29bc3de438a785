pub mod run;

use crate::check::Threshold;
use crate::collectors::config::CollectorConfig;
use crate::metrics::output::Output;

#[derive(Debug)]
pub enum Action {
    /// Run the listed domains and print every metric.
    Collect {
        config: CollectorConfig,
        output: Output,
        domains: Vec<String>,
    },
    /// Run one point's domain and classify that point.
    Check {
        config: CollectorConfig,
        output: Output,
        point: String,
        threshold: Threshold,
    },
}

impl Action {
    #[must_use]
    pub const fn config(&self) -> &CollectorConfig {
        match self {
            Self::Collect { config, .. } | Self::Check { config, .. } => config,
        }
    }
}
