//! PostgreSQL health check and metrics collector.
//!
//! A fixed catalog of collectors runs diagnostic queries through `psql`,
//! turns the tuples-only output into a flat list of metric points and, in
//! check mode, classifies one point against warning/critical thresholds.

pub mod check;
pub mod cli;
pub mod collectors;
pub mod metrics;
pub mod query;
