use super::{QueryOutcome, QueryRunner};
use futures::future::BoxFuture;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

pub const DEFAULT_PSQL: &str = "psql";

/// Runs statements through the `psql` client in tuples-only, unaligned mode.
///
/// Rows come back separated by newlines and fields by a single `|`.
#[derive(Clone, Debug)]
pub struct PsqlRunner {
    program: String,
    database: String,
    username: String,
    timeout: Option<Duration>,
}

impl PsqlRunner {
    #[must_use]
    pub fn new(database: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            program: DEFAULT_PSQL.to_string(),
            database: database.into(),
            username: username.into(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Arguments passed to the client for `sql`; `-X` keeps `~/.psqlrc` from
    /// altering the output format.
    #[must_use]
    pub fn args(&self, sql: &str) -> Vec<String> {
        vec![
            self.database.clone(),
            "-U".to_string(),
            self.username.clone(),
            "-X".to_string(),
            "-t".to_string(),
            "-A".to_string(),
            "-c".to_string(),
            sql.to_string(),
        ]
    }

    async fn execute(&self, sql: &str) -> QueryOutcome {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args(sql))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, cmd.output()).await {
                Ok(output) => output,
                Err(_) => {
                    return QueryOutcome::Failure(format!(
                        "timed out after {}s",
                        limit.as_secs()
                    ));
                }
            },
            None => cmd.output().await,
        };

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                return QueryOutcome::Failure(format!("failed to run {}: {e}", self.program));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return QueryOutcome::Failure(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            ));
        }

        match String::from_utf8(output.stdout) {
            Ok(text) => {
                let text = strip_trailing_newline(text);
                debug!(result = %text, "query result");
                QueryOutcome::Text(text)
            }
            Err(e) => QueryOutcome::Failure(format!("output is not valid UTF-8: {e}")),
        }
    }
}

impl QueryRunner for PsqlRunner {
    fn run<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, QueryOutcome> {
        Box::pin(self.execute(sql))
    }
}

/// Remove a single trailing newline, leaving inner row separators alone.
fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
    }
    text
}
