use super::common;
use postgres_check::collectors::replication::PHYSICAL_DELAY_QUERY;
use postgres_check::collectors::{Collector, ReplicationCollector, VersionCollector};
use postgres_check::query::ScriptedRunner;
use std::sync::Arc;

#[tokio::test]
async fn test_standalone_server() {
    let runner = Arc::new(common::standalone_server());
    let mut ctx = common::context(&runner);

    let report = ReplicationCollector::new().collect(&mut ctx).await;

    assert!(report.is_complete());
    assert_eq!(common::value(&ctx, "replication.role"), Some("0"));
    assert_eq!(common::value(&ctx, "replication.type"), Some("0"));
    assert!(common::value(&ctx, "replication.delay").is_none());
    assert_eq!(runner.call_count(PHYSICAL_DELAY_QUERY), 0);
}

#[tokio::test]
async fn test_wal_shipping_standby_reports_delay() {
    let runner = Arc::new(
        ScriptedRunner::new()
            .respond("server_version", "12.8")
            .respond("pg_is_in_recovery", "t")
            .respond("pg_last_xact_replay_timestamp", "1530")
            .respond("pg_replication_slots", "")
            .respond("pg_stat_replication", "")
            .respond("pg_stat_wal_receiver", "")
            .respond("LogicalApplyMain", ""),
    );
    let mut ctx = common::context(&runner);

    ReplicationCollector::new().collect(&mut ctx).await;

    assert_eq!(common::value(&ctx, "replication.delay"), Some("1530"));
    assert_eq!(common::value(&ctx, "replication.role"), Some("0"));
    assert_eq!(common::value(&ctx, "replication.type"), Some("1"));
}

#[tokio::test]
async fn test_streaming_standby_skips_subscriber_probe() {
    let runner = Arc::new(
        ScriptedRunner::new()
            .respond("server_version", "14.1")
            .respond("pg_is_in_recovery", "t")
            .respond("pg_last_xact_replay_timestamp", "12")
            .respond("pg_replication_slots", "")
            .respond("pg_stat_replication", "")
            .respond("pg_stat_wal_receiver", "streaming"),
    );
    let mut ctx = common::context(&runner);

    ReplicationCollector::new().collect(&mut ctx).await;

    assert_eq!(common::value(&ctx, "replication.role"), Some("2"));
    assert_eq!(common::value(&ctx, "replication.type"), Some("2"));
    assert_eq!(runner.call_count("LogicalApplyMain"), 0);
}

#[tokio::test]
async fn test_logical_publisher_reports_lsn_distance() {
    let runner = Arc::new(
        ScriptedRunner::new()
            .respond("server_version", "15.2")
            .respond("pg_is_in_recovery", "f")
            .respond("confirmed_flush_lsn", "2048")
            .respond("slot_type='logical'", "logical")
            .respond("pg_stat_wal_receiver", "")
            .respond("LogicalApplyMain", ""),
    );
    let mut ctx = common::context(&runner);

    ReplicationCollector::new().collect(&mut ctx).await;

    assert_eq!(common::value(&ctx, "replication.delay"), Some("2048"));
    assert_eq!(common::value(&ctx, "replication.role"), Some("1"));
    assert_eq!(common::value(&ctx, "replication.type"), Some("3"));
    assert_eq!(runner.call_count("pg_stat_replication"), 0);
}

#[tokio::test]
async fn test_version_fetched_when_unknown() {
    let runner = Arc::new(common::standalone_server());
    let mut ctx = common::context(&runner);

    ReplicationCollector::new().collect(&mut ctx).await;

    assert_eq!(runner.call_count("server_version"), 1);
    assert_eq!(common::value(&ctx, "version"), Some("13.400000"));
}

#[tokio::test]
async fn test_version_not_refetched_when_known() {
    let runner = Arc::new(common::standalone_server());
    let mut ctx = common::context(&runner);

    VersionCollector::new().collect(&mut ctx).await;
    ReplicationCollector::new().collect(&mut ctx).await;

    assert_eq!(runner.call_count("server_version"), 1);
    assert_eq!(ctx.sink().iter().filter(|m| m.point == "version").count(), 1);
}

#[tokio::test]
async fn test_unknown_version_suppresses_role_and_type() {
    let runner = Arc::new(
        ScriptedRunner::new()
            .fail("server_version")
            .respond("pg_is_in_recovery", "f")
            .respond("pg_replication_slots", "")
            .respond("pg_stat_replication", "")
            .respond("pg_stat_wal_receiver", "")
            .respond("LogicalApplyMain", ""),
    );
    let mut ctx = common::context(&runner);

    let report = ReplicationCollector::new().collect(&mut ctx).await;

    assert!(ctx.sink().is_empty());
    assert!(report.failed.contains(&"replication.role".to_string()));
    assert!(report.failed.contains(&"replication.type".to_string()));
}
