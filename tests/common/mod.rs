use postgres_check::collectors::RunContext;
use postgres_check::query::ScriptedRunner;
use std::sync::Arc;

#[allow(dead_code)]
pub const DATABASE: &str = "sensu";

/// Fresh run context for the test database backed by `runner`.
#[allow(dead_code)]
pub fn context(runner: &Arc<ScriptedRunner>) -> RunContext {
    RunContext::new(runner.clone(), DATABASE)
}

/// Last value stored for `point`.
#[allow(dead_code)]
pub fn value<'a>(ctx: &'a RunContext, point: &str) -> Option<&'a str> {
    ctx.sink().last(point).map(|m| m.value.as_str())
}

/// A standalone 13.4 server answering every catalog query.
#[allow(dead_code)]
pub fn standalone_server() -> ScriptedRunner {
    ScriptedRunner::new()
        .respond("server_version", "13.4 (Debian 13.4-1.pgdg100+1)")
        .respond(
            "pg_stat_bgwriter",
            "120|4|53000|210|9000|15|0|3000|0|45000",
        )
        .respond("wait_event_type is not null", "2")
        .respond("state = 'active'", "1")
        .respond("state = 'idle'", "5")
        .respond("state = 'idle in transaction'", "1")
        .respond("state = 'idle in transaction (aborted)'", "0")
        .respond("state = 'disabled'", "")
        .respond("state = 'fastpath function call'", "0")
        .respond("LogicalApplyMain", "")
        .respond("from pg_stat_activity;", "42")
        .respond("pg_locks", "AccessShareLock|4\nRowExclusiveLock|2\nExclusiveLock|1")
        .respond("pg_is_in_recovery", "f")
        .respond("pg_replication_slots", "")
        .respond("pg_stat_replication", "")
        .respond("pg_stat_wal_receiver", "")
        .respond("pg_database_size", "8028695")
        .respond(
            "pg_stat_database",
            "3|1500|2|400|90000|120000|30000|500|40|10|0|1|8192|0|0.5|0.25",
        )
        .respond("pg_statio_user_tables", "10|900|5|700|0|0|0|0")
        .respond("pg_stat_user_tables", "30|6000|80|700|500|40|10|20|480|20")
}
