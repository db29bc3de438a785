use super::common;
use postgres_check::collectors::{Collector, ConnectionsCollector};
use postgres_check::query::ScriptedRunner;
use std::sync::Arc;

#[tokio::test]
async fn test_connections_total_and_states() {
    let runner = Arc::new(common::standalone_server());
    let mut ctx = common::context(&runner);

    let report = ConnectionsCollector::new().collect(&mut ctx).await;

    assert!(report.is_complete());
    assert_eq!(ctx.sink().len(), 8);
    assert_eq!(common::value(&ctx, "connections.sensu.total"), Some("42"));
    assert_eq!(common::value(&ctx, "connections.sensu.waiting"), Some("2"));
    assert_eq!(common::value(&ctx, "connections.sensu.active"), Some("1"));
    assert_eq!(common::value(&ctx, "connections.sensu.idle"), Some("5"));
    assert_eq!(
        common::value(&ctx, "connections.sensu.idle_in_transaction"),
        Some("1")
    );
    assert_eq!(
        common::value(&ctx, "connections.sensu.idle_in_transaction_aborted"),
        Some("0")
    );
    assert_eq!(
        common::value(&ctx, "connections.sensu.fastpath_function_call"),
        Some("0")
    );
}

#[tokio::test]
async fn test_empty_result_is_stored_as_zero() {
    let runner = Arc::new(common::standalone_server());
    let mut ctx = common::context(&runner);

    ConnectionsCollector::new().collect(&mut ctx).await;

    assert_eq!(common::value(&ctx, "connections.sensu.disabled"), Some("0"));
}

#[tokio::test]
async fn test_failed_state_query_does_not_affect_others() {
    let runner = Arc::new(
        ScriptedRunner::new()
            .fail("state = 'idle'")
            .respond("pg_stat_activity", "7"),
    );
    let mut ctx = common::context(&runner);

    let report = ConnectionsCollector::new().collect(&mut ctx).await;

    assert_eq!(report.failed, vec!["connections.sensu.idle".to_string()]);
    assert!(common::value(&ctx, "connections.sensu.idle").is_none());
    assert_eq!(common::value(&ctx, "connections.sensu.total"), Some("7"));
    assert_eq!(ctx.sink().len(), 7);
}

#[tokio::test]
async fn test_point_names_are_lower_cased() {
    let runner = Arc::new(ScriptedRunner::new().respond("pg_stat_activity", "1"));
    let mut ctx = postgres_check::collectors::RunContext::new(runner, "Reporting");

    ConnectionsCollector::new().collect(&mut ctx).await;

    assert_eq!(common::value(&ctx, "connections.reporting.total"), Some("1"));
}
