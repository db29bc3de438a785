//! Replication role and type inference.
//!
//! Five boolean probes, each comparing a query's output rows with an
//! expected literal, are reduced to a role and a replication type. Both
//! reductions are ordered: the first matching branch wins.

use crate::collectors::RunContext;
use tracing::{debug, instrument};

pub const RECOVERY_QUERY: &str = "select pg_is_in_recovery();";
pub const LOGICAL_PUBLISHER_QUERY: &str =
    "select slot_type from pg_replication_slots where slot_type='logical' and active='t';";
pub const STREAMING_MASTER_QUERY: &str =
    "select state from pg_stat_replication WHERE state='streaming';";
pub const STREAMING_SLAVE_QUERY: &str =
    "select status from pg_stat_wal_receiver WHERE status='streaming';";
pub const LOGICAL_SUBSCRIBER_QUERY: &str =
    "select wait_event from pg_stat_activity WHERE wait_event='LogicalApplyMain';";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplicationRole {
    Standalone = 0,
    /// Streaming master or logical publisher.
    Primary = 1,
    /// Streaming standby or logical subscriber.
    Secondary = 2,
}

impl ReplicationRole {
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplicationType {
    None = 0,
    /// In recovery without a streaming WAL receiver (log shipping).
    Wal = 1,
    Streaming = 2,
    Logical = 3,
}

impl ReplicationType {
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplicationProbe {
    pub in_recovery_mode: bool,
    pub is_logical_publisher: bool,
    pub is_streaming_master: bool,
    pub is_streaming_slave: bool,
    pub is_logical_subscriber: bool,
}

impl ReplicationProbe {
    /// Run the probes in order. The streaming-master probe is skipped for a
    /// logical publisher and the logical-subscriber probe for a streaming standby.
    #[instrument(skip(ctx), level = "debug")]
    pub async fn run(ctx: &RunContext) -> Self {
        let in_recovery_mode = probe(ctx, RECOVERY_QUERY, "t").await;
        let is_logical_publisher = probe(ctx, LOGICAL_PUBLISHER_QUERY, "logical").await;

        let is_streaming_master =
            !is_logical_publisher && probe(ctx, STREAMING_MASTER_QUERY, "streaming").await;

        let is_streaming_slave = probe(ctx, STREAMING_SLAVE_QUERY, "streaming").await;

        let is_logical_subscriber = !is_streaming_slave
            && probe(ctx, LOGICAL_SUBSCRIBER_QUERY, "LogicalApplyMain").await;

        Self {
            in_recovery_mode,
            is_logical_publisher,
            is_streaming_master,
            is_streaming_slave,
            is_logical_subscriber,
        }
    }

    #[must_use]
    pub const fn role(&self) -> ReplicationRole {
        if self.is_streaming_master || self.is_logical_publisher {
            ReplicationRole::Primary
        } else if self.is_streaming_slave || self.is_logical_subscriber {
            ReplicationRole::Secondary
        } else {
            ReplicationRole::Standalone
        }
    }

    #[must_use]
    pub const fn replication_type(&self) -> ReplicationType {
        if self.in_recovery_mode && !self.is_streaming_slave {
            ReplicationType::Wal
        } else if self.is_streaming_master || self.is_streaming_slave {
            ReplicationType::Streaming
        } else if self.is_logical_publisher || self.is_logical_subscriber {
            ReplicationType::Logical
        } else {
            ReplicationType::None
        }
    }
}

/// True when the query succeeds and any returned row equals `expected`.
async fn probe(ctx: &RunContext, sql: &str, expected: &str) -> bool {
    let matched = ctx
        .query(sql)
        .await
        .text()
        .is_some_and(|text| text.lines().any(|row| row == expected));

    debug!(expected, matched, "replication probe");
    matched
}
