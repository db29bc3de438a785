//! Query execution boundary.
//!
//! Every statement is a one-shot invocation of an external client; the
//! outcome is either the trimmed text it printed or the reason it failed.
//! Failures are values here, the caller decides whether to skip them.

use futures::future::BoxFuture;

pub mod mock;
pub mod psql;

pub use mock::ScriptedRunner;
pub use psql::PsqlRunner;

/// Result of a single query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Tuples-only output with the trailing newline removed (may be empty).
    Text(String),
    /// The client could not run the statement.
    Failure(String),
}

impl QueryOutcome {
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

pub trait QueryRunner: Send + Sync {
    /// Run one SQL statement. Never retried, never cached.
    fn run<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, QueryOutcome>;
}
