use super::{QueryOutcome, QueryRunner};
use futures::future::BoxFuture;
use std::sync::{Mutex, PoisonError};

/// In-memory runner answering from a script instead of a live server.
///
/// Each rule pairs a SQL fragment with an outcome; the first rule whose
/// fragment appears in the statement wins. Statements with no matching rule
/// fail. Every statement is recorded so callers can assert which queries ran.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    rules: Vec<(String, QueryOutcome)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn respond(mut self, fragment: &str, text: &str) -> Self {
        self.rules
            .push((fragment.to_string(), QueryOutcome::Text(text.to_string())));
        self
    }

    #[must_use]
    pub fn fail(mut self, fragment: &str) -> Self {
        self.rules.push((
            fragment.to_string(),
            QueryOutcome::Failure(format!("scripted failure for {fragment}")),
        ));
        self
    }

    /// Statements executed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of executed statements containing `fragment`.
    #[must_use]
    pub fn call_count(&self, fragment: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|sql| sql.contains(fragment))
            .count()
    }
}

impl QueryRunner for ScriptedRunner {
    fn run<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, QueryOutcome> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sql.to_string());

        let outcome = self
            .rules
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map_or_else(
                || QueryOutcome::Failure(format!("no scripted response for: {sql}")),
                |(_, outcome)| outcome.clone(),
            );

        Box::pin(async move { outcome })
    }
}
