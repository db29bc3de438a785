use crate::query::PsqlRunner;
use crate::query::psql::DEFAULT_PSQL;
use std::time::Duration;

/// Connection settings shared by every collector in a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectorConfig {
    database: String,
    username: String,
    psql: String,
    query_timeout: Option<Duration>,
}

impl CollectorConfig {
    #[must_use]
    pub fn new(database: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            username: username.into(),
            psql: DEFAULT_PSQL.to_string(),
            query_timeout: None,
        }
    }

    #[must_use]
    pub fn with_psql(mut self, psql: impl Into<String>) -> Self {
        self.psql = psql.into();
        self
    }

    #[must_use]
    pub const fn with_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.query_timeout = timeout;
        self
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn psql(&self) -> &str {
        &self.psql
    }

    #[must_use]
    pub const fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout
    }

    /// Query runner bound to this database and role.
    #[must_use]
    pub fn runner(&self) -> PsqlRunner {
        PsqlRunner::new(self.database.clone(), self.username.clone())
            .with_program(self.psql.clone())
            .with_timeout(self.query_timeout)
    }
}
