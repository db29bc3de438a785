use super::common;
use postgres_check::collectors::bgwriter::BGWRITER_COLUMNS;
use postgres_check::collectors::statsdb::STATSDB_COLUMNS;
use postgres_check::collectors::statsio::STATSIO_COLUMNS;
use postgres_check::collectors::statstable::STATSTABLE_COLUMNS;
use postgres_check::collectors::{
    BgwriterCollector, Collector, SizeCollector, StatsDbCollector, StatsIoCollector,
    StatsTableCollector,
};
use postgres_check::query::ScriptedRunner;
use std::sync::Arc;

#[tokio::test]
async fn test_bgwriter_one_point_per_column() {
    let runner = Arc::new(common::standalone_server());
    let mut ctx = common::context(&runner);

    let report = BgwriterCollector::new().collect(&mut ctx).await;

    assert_eq!(report.produced.len(), BGWRITER_COLUMNS.len());
    assert_eq!(common::value(&ctx, "bgwriter.checkpoints_timed"), Some("120"));
    assert_eq!(common::value(&ctx, "bgwriter.buffers_alloc"), Some("45000"));
}

#[tokio::test]
async fn test_statsdb_uses_database_prefix() {
    let runner = Arc::new(common::standalone_server());
    let mut ctx = common::context(&runner);

    let report = StatsDbCollector::new().collect(&mut ctx).await;

    assert_eq!(report.produced.len(), STATSDB_COLUMNS.len());
    assert_eq!(common::value(&ctx, "statsdb.sensu.numbackends"), Some("3"));
    assert_eq!(common::value(&ctx, "statsdb.sensu.blk_write_time"), Some("0.25"));
    assert_eq!(runner.call_count("where datname = 'sensu'"), 1);
}

#[tokio::test]
async fn test_statsio_and_statstable_are_summed() {
    let runner = Arc::new(common::standalone_server());
    let mut ctx = common::context(&runner);

    let io = StatsIoCollector::new().collect(&mut ctx).await;
    let table = StatsTableCollector::new().collect(&mut ctx).await;

    assert_eq!(io.produced.len(), STATSIO_COLUMNS.len());
    assert_eq!(table.produced.len(), STATSTABLE_COLUMNS.len());
    assert_eq!(common::value(&ctx, "statsio.sensu.heap_blks_hit"), Some("900"));
    assert_eq!(common::value(&ctx, "statstable.sensu.n_dead_tup"), Some("20"));
    assert_eq!(runner.call_count("sum(heap_blks_read)"), 1);
    assert_eq!(runner.call_count("sum(seq_scan)"), 1);
}

#[tokio::test]
async fn test_short_row_produces_nothing() {
    let runner = Arc::new(ScriptedRunner::new().respond("pg_stat_bgwriter", "1|2|3"));
    let mut ctx = common::context(&runner);

    let report = BgwriterCollector::new().collect(&mut ctx).await;

    assert!(ctx.sink().is_empty());
    assert_eq!(report.failed.len(), BGWRITER_COLUMNS.len());
}

#[tokio::test]
async fn test_empty_aggregate_row_is_zero() {
    // sum() over no tables returns NULLs, printed as empty fields
    let runner = Arc::new(ScriptedRunner::new().respond("pg_statio_user_tables", "|||||||"));
    let mut ctx = common::context(&runner);

    StatsIoCollector::new().collect(&mut ctx).await;

    assert_eq!(ctx.sink().len(), STATSIO_COLUMNS.len());
    assert!(ctx.sink().iter().all(|m| m.value == "0"));
}

#[tokio::test]
async fn test_size() {
    let runner = Arc::new(common::standalone_server());
    let mut ctx = common::context(&runner);

    SizeCollector::new().collect(&mut ctx).await;

    assert_eq!(common::value(&ctx, "size.sensu"), Some("8028695"));
}
