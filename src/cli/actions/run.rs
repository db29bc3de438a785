use crate::check::{CheckState, Evaluation, evaluate};
use crate::cli::actions::Action;
use crate::collectors::RunContext;
use crate::collectors::registry::CollectorRegistry;
use crate::query::QueryRunner;
use anyhow::{Result, anyhow};
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{debug, info};

/// Handle the action against the configured server, printing to stdout.
///
/// # Errors
///
/// Returns an error if no metrics were collected, the checked point is
/// missing, or writing the output fails.
pub async fn handle(action: Action) -> Result<CheckState> {
    let runner: Arc<dyn QueryRunner> = Arc::new(action.config().runner());
    execute(action, runner, &mut io::stdout()).await
}

/// Run the action with `runner`, writing metric lines or the verdict to `out`.
///
/// # Errors
///
/// See [`handle`].
pub async fn execute<W: Write>(
    action: Action,
    runner: Arc<dyn QueryRunner>,
    out: &mut W,
) -> Result<CheckState> {
    match action {
        Action::Collect {
            config,
            output,
            domains,
        } => {
            let registry = CollectorRegistry::new(domains.as_slice())?;
            let mut ctx = RunContext::new(runner, config.database());

            info!(collectors = ?registry.names(), "collecting metrics");
            registry.collect(&mut ctx).await;

            let count = output.write_metrics(out, ctx.sink(), ctx.timestamp())?;
            debug!(count, "printed metrics");

            if count == 0 {
                return Err(anyhow!("No metrics found"));
            }

            Ok(CheckState::Ok)
        }
        Action::Check {
            config,
            output,
            point,
            threshold,
        } => {
            let registry = CollectorRegistry::for_point(&point)?;
            let mut ctx = RunContext::new(runner, config.database());

            info!(point = %point, collectors = ?registry.names(), "checking point");
            registry.collect(&mut ctx).await;

            match evaluate(ctx.sink(), &point, &threshold) {
                Evaluation::NotFound { point } => {
                    output
                        .without_namespace()
                        .write_metrics(out, ctx.sink(), ctx.timestamp())?;
                    Err(anyhow!("point not found: {point}"))
                }
                evaluation => {
                    writeln!(out, "{evaluation}")?;
                    Ok(evaluation.state())
                }
            }
        }
    }
}
