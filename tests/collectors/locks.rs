use super::common;
use postgres_check::collectors::{Collector, LocksCollector};
use postgres_check::query::ScriptedRunner;
use std::sync::Arc;

#[tokio::test]
async fn test_total_is_sum_of_modes() {
    let runner = Arc::new(common::standalone_server());
    let mut ctx = common::context(&runner);

    let report = LocksCollector::new().collect(&mut ctx).await;

    assert!(report.is_complete());
    assert_eq!(common::value(&ctx, "locks.sensu.accesssharelock"), Some("4"));
    assert_eq!(common::value(&ctx, "locks.sensu.rowexclusivelock"), Some("2"));
    assert_eq!(common::value(&ctx, "locks.sensu.exclusivelock"), Some("1"));
    assert_eq!(common::value(&ctx, "locks.sensu.total"), Some("7.000000"));
    assert_eq!(runner.call_count("pg_locks"), 1);
}

#[tokio::test]
async fn test_no_locks_gives_zero_total() {
    let runner = Arc::new(ScriptedRunner::new().respond("pg_locks", ""));
    let mut ctx = common::context(&runner);

    LocksCollector::new().collect(&mut ctx).await;

    assert_eq!(ctx.sink().len(), 1);
    assert_eq!(common::value(&ctx, "locks.sensu.total"), Some("0.000000"));
}

#[tokio::test]
async fn test_malformed_rows_are_skipped() {
    let runner = Arc::new(
        ScriptedRunner::new().respond("pg_locks", "AccessShareLock|3\nnot-a-row\nShareLock|2"),
    );
    let mut ctx = common::context(&runner);

    let report = LocksCollector::new().collect(&mut ctx).await;

    assert_eq!(report.produced.len(), 3);
    assert_eq!(common::value(&ctx, "locks.sensu.total"), Some("5.000000"));
}

#[tokio::test]
async fn test_failed_query_reports_modes_and_keeps_total() {
    let runner = Arc::new(ScriptedRunner::new().fail("pg_locks"));
    let mut ctx = common::context(&runner);

    let report = LocksCollector::new().collect(&mut ctx).await;

    assert_eq!(report.failed, vec!["locks.sensu.*".to_string()]);
    assert_eq!(report.produced, vec!["locks.sensu.total".to_string()]);
    assert_eq!(common::value(&ctx, "locks.sensu.total"), Some("0.000000"));
}
